//! Input sanitization for submitted metadata.
//!
//! Titles and settings values are reduced to plain text, descriptions keep a
//! safe subset of markup, and thumbnail URLs must be absolute `http`/`https`
//! URLs. File names are cut down to their base name.

use std::collections::HashSet;

use url::Url;

/// Reduce input to a single line of plain text.
///
/// Markup is removed (the contents of `script` and `style` elements with
/// it), control characters are dropped, runs of whitespace collapse to one
/// space, and the result is trimmed. Angle brackets that survive as text
/// stay encoded as `&lt;`/`&gt;`, so the result never contains a tag.
pub fn sanitize_text(input: &str) -> String {
    let stripped = ammonia::Builder::default()
        .tags(HashSet::new())
        .clean(input)
        .to_string();
    let decoded = decode_entities(&stripped);

    decoded
        .split(|c: char| c.is_whitespace() || c.is_control())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Keep common formatting markup and strip everything executable.
pub fn sanitize_rich_text(input: &str) -> String {
    ammonia::clean(input.trim())
}

/// Accept an absolute `http` or `https` URL.
///
/// Input without a scheme is retried as `http://`. Anything else yields `None`.
pub fn sanitize_url(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed.chars().any(char::is_control) {
        return None;
    }

    let parsed = match Url::parse(trimmed) {
        Ok(url) => url,
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            Url::parse(&format!("http://{trimmed}")).ok()?
        }
        Err(_) => return None,
    };

    match parsed.scheme() {
        "http" | "https" if parsed.host_str().is_some_and(|h| !h.is_empty()) => {
            Some(parsed.to_string())
        }
        _ => None,
    }
}

/// Reduce a client-supplied file name to its base name.
///
/// Both `/` and `\` count as separators. Returns `None` when nothing usable
/// remains.
pub fn sanitize_file_name(input: &str) -> Option<String> {
    let base = input.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base.chars().filter(|c| !c.is_control()).collect();
    let cleaned = cleaned.trim();

    match cleaned {
        "" | "." | ".." => None,
        name => Some(name.to_string()),
    }
}

/// Undo the serializer's escaping of `&` and non-breaking spaces.
fn decode_entities(input: &str) -> String {
    input.replace("&nbsp;", " ").replace("&amp;", "&")
}
