//! Recursive directory listing for the target directory picker.

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{debug, warn};

use intake_core::result::AppResult;
use intake_entity::catalog::DirectoryEntry;

use crate::confine::{TrustedRoot, normalize_relative};

/// List every directory beneath `base`, depth-first in pre-order.
///
/// Entries are `<base>/<sub>/<dir>` strings relative to the trusted root,
/// emitted in the order the filesystem returns them. Symbolic links are
/// skipped, so the walk cannot leave the root. A base that is empty,
/// escapes the root, or is not an existing directory yields an empty list.
pub async fn list_directories(root: &TrustedRoot, base: &str) -> AppResult<Vec<DirectoryEntry>> {
    let prefix = match normalize_relative(base) {
        Ok(clean) => clean.to_string_lossy().replace('\\', "/"),
        Err(e) => {
            debug!(base, error = %e, "Catalog base rejected");
            return Ok(Vec::new());
        }
    };
    if prefix.is_empty() {
        return Ok(Vec::new());
    }
    let prefix = prefix.as_str();

    let start = match root.resolve_dir(prefix).await {
        Ok(path) => path,
        Err(e) => {
            debug!(base = prefix, error = %e, "Catalog base not usable");
            return Ok(Vec::new());
        }
    };

    let mut entries = Vec::new();
    // Popped directories are emitted; children are pushed in reverse to keep listing order.
    let mut stack: Vec<(PathBuf, String)> = Vec::new();
    push_children(&start, prefix, &mut stack).await;

    while let Some((path, display)) = stack.pop() {
        entries.push(DirectoryEntry::new(display.clone()));
        push_children(&path, &display, &mut stack).await;
    }

    Ok(entries)
}

async fn push_children(dir: &Path, display: &str, stack: &mut Vec<(PathBuf, String)>) {
    let mut children = Vec::new();

    let mut reader = match fs::read_dir(dir).await {
        Ok(reader) => reader,
        Err(e) => {
            warn!(path = %dir.display(), error = %e, "Failed to read directory");
            return;
        }
    };

    loop {
        let entry = match reader.next_entry().await {
            Ok(Some(entry)) => entry,
            Ok(None) => break,
            Err(e) => {
                warn!(path = %dir.display(), error = %e, "Failed to read directory entry");
                break;
            }
        };

        // file_type() does not follow links
        let Ok(file_type) = entry.file_type().await else {
            continue;
        };
        if file_type.is_symlink() || !file_type.is_dir() {
            continue;
        }

        let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
            warn!(path = %entry.path().display(), "Skipping directory with non UTF-8 name");
            continue;
        };
        children.push((entry.path(), format!("{display}/{name}")));
    }

    stack.extend(children.into_iter().rev());
}
