//! Path confinement to the trusted root.
//!
//! Relative paths coming from settings or administrator input are checked
//! lexically (no `..`, no absolute or prefixed components, no NUL bytes),
//! then canonicalized so symbolic links are resolved before the prefix
//! check against the canonical root.

use std::path::{Component, Path, PathBuf};

use tokio::fs;
use tracing::warn;

use intake_core::error::{AppError, ErrorKind};
use intake_core::result::AppResult;

/// The canonical directory no resolved path may escape.
#[derive(Debug, Clone)]
pub struct TrustedRoot {
    root: PathBuf,
}

impl TrustedRoot {
    /// Open (creating if needed) the trusted root and canonicalize it.
    pub async fn open(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        fs::create_dir_all(path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Configuration,
                format!("Failed to create trusted root: {}", path.display()),
                e,
            )
        })?;
        let root = fs::canonicalize(path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Configuration,
                format!("Failed to resolve trusted root: {}", path.display()),
                e,
            )
        })?;
        Ok(Self { root })
    }

    /// The canonical root path.
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Lexically validate a root-relative path and join it onto the root.
    ///
    /// Leading and trailing slashes are ignored. The result is not
    /// canonicalized and may not exist.
    pub fn join_relative(&self, relative: &str) -> AppResult<PathBuf> {
        Ok(self.root.join(normalize_relative(relative)?))
    }

    /// Resolve a root-relative path to an existing directory inside the root.
    pub async fn resolve_dir(&self, relative: &str) -> AppResult<PathBuf> {
        let joined = self.join_relative(relative)?;

        let canonical = fs::canonicalize(&joined).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::validation(format!("Directory does not exist: {relative}"))
            } else {
                AppError::with_source(
                    ErrorKind::Validation,
                    format!("Failed to resolve directory: {relative}"),
                    e,
                )
            }
        })?;

        if !canonical.starts_with(&self.root) {
            warn!(path = relative, resolved = %canonical.display(), "Path escapes trusted root");
            return Err(AppError::validation(format!(
                "Path escapes the trusted root: {relative}"
            )));
        }

        let meta = fs::metadata(&canonical).await?;
        if !meta.is_dir() {
            return Err(AppError::validation(format!(
                "Not a directory: {relative}"
            )));
        }

        Ok(canonical)
    }

    /// Whether an absolute path lies lexically under the root.
    pub fn contains(&self, path: &Path) -> bool {
        path.is_absolute()
            && path.starts_with(&self.root)
            && !path.components().any(|c| matches!(c, Component::ParentDir))
    }

    /// Express an absolute path inside the root as a `/`-separated relative string.
    pub fn relative(&self, path: &Path) -> Option<String> {
        let rest = path.strip_prefix(&self.root).ok()?;
        let parts: Option<Vec<&str>> = rest.components().map(|c| c.as_os_str().to_str()).collect();
        Some(parts?.join("/"))
    }
}

/// Validate a relative path: only normal components are allowed.
pub fn normalize_relative(relative: &str) -> AppResult<PathBuf> {
    if relative.contains('\0') {
        return Err(AppError::validation("Path contains a NUL byte"));
    }

    let trimmed = relative.trim().trim_matches('/');
    let mut clean = PathBuf::new();
    for component in Path::new(trimmed).components() {
        match component {
            Component::Normal(part) => clean.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(AppError::validation(format!(
                    "Path must stay inside the trusted root: {relative}"
                )));
            }
        }
    }
    Ok(clean)
}
