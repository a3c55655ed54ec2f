//! Request path resolution
//!
//! Maps a URL path onto a filesystem path under the served root. Traversal
//! segments are rejected outright instead of being normalised away.

use crate::error::ServeError;
use crate::logger;
use std::path::{Path, PathBuf};

/// A request path mapped under the root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    /// Filesystem location, not yet checked for existence
    pub fs_path: PathBuf,
    /// Percent-decoded URL path, used for listing titles
    pub url_path: String,
    /// Whether the URL path ended with `/`
    pub trailing_slash: bool,
}

/// Resolve `url_path` (without query) against `root`
pub fn resolve(root: &Path, url_path: &str) -> Result<ResolvedPath, ServeError> {
    if !url_path.starts_with('/') {
        return Err(ServeError::BadRequest("path must start with '/'"));
    }

    let decoded = percent_decode(url_path)?;
    let mut fs_path = root.to_path_buf();

    for segment in decoded.split('/') {
        match segment {
            "" | "." => {}
            ".." => return Err(ServeError::Forbidden),
            s if s.contains(['\0', '\\']) => {
                return Err(ServeError::BadRequest("illegal character in path"));
            }
            s => fs_path.push(s),
        }
    }

    Ok(ResolvedPath {
        fs_path,
        trailing_slash: decoded.ends_with('/'),
        url_path: decoded,
    })
}

/// Canonicalize `target` and make sure it still lies under `root`
///
/// Catches symlinks pointing out of the served tree.
pub fn ensure_within_root(root: &Path, target: &Path) -> Result<PathBuf, ServeError> {
    let root_canonical = root.canonicalize().map_err(|e| {
        logger::log_warning(&format!(
            "Static directory not found or inaccessible '{}': {e}",
            root.display()
        ));
        ServeError::NotFound
    })?;

    let target_canonical = target.canonicalize().map_err(ServeError::from_io)?;
    if !target_canonical.starts_with(&root_canonical) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {} -> {}",
            target.display(),
            target_canonical.display()
        ));
        return Err(ServeError::Forbidden);
    }

    Ok(target_canonical)
}

/// Decode `%XX` escapes; the result must be UTF-8
///
/// `decode_binary` passes malformed escapes through verbatim, so they are
/// rejected up front.
fn percent_decode(input: &str) -> Result<String, ServeError> {
    if has_malformed_escape(input) {
        return Err(ServeError::BadRequest("invalid percent-encoding"));
    }
    let bytes = urlencoding::decode_binary(input.as_bytes()).into_owned();
    String::from_utf8(bytes).map_err(|_| ServeError::BadRequest("path is not valid UTF-8"))
}

fn has_malformed_escape(input: &str) -> bool {
    input.match_indices('%').any(|(i, _)| {
        !input
            .get(i + 1..i + 3)
            .is_some_and(|hex| hex.bytes().all(|b| b.is_ascii_hexdigit()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root() -> PathBuf {
        PathBuf::from("/srv/public")
    }

    #[test]
    fn test_resolve_plain_file() {
        let resolved = resolve(&root(), "/data/catalog.ttl").unwrap();
        assert_eq!(resolved.fs_path, root().join("data").join("catalog.ttl"));
        assert_eq!(resolved.url_path, "/data/catalog.ttl");
        assert!(!resolved.trailing_slash);
    }

    #[test]
    fn test_resolve_root_and_directories() {
        let resolved = resolve(&root(), "/").unwrap();
        assert_eq!(resolved.fs_path, root());
        assert!(resolved.trailing_slash);

        let resolved = resolve(&root(), "/a/./b//c/").unwrap();
        assert_eq!(resolved.fs_path, root().join("a").join("b").join("c"));
        assert!(resolved.trailing_slash);
    }

    #[test]
    fn test_resolve_decodes_escapes() {
        let resolved = resolve(&root(), "/my%20file%C3%A9.txt").unwrap();
        assert_eq!(resolved.fs_path, root().join("my fileé.txt"));
        assert_eq!(resolved.url_path, "/my fileé.txt");
    }

    #[test]
    fn test_percent_decode_mixed_case_and_multibyte() {
        assert_eq!(percent_decode("/a%2fb%2Fc").unwrap(), "/a/b/c");
        assert_eq!(percent_decode("/caf%c3%a9").unwrap(), "/café");
        assert_eq!(percent_decode("/100%25").unwrap(), "/100%");
    }

    #[test]
    fn test_traversal_is_forbidden() {
        for path in [
            "/../../etc/passwd",
            "/a/../../etc/passwd",
            "/%2e%2e/etc/passwd",
            "/..%2Fetc/passwd",
            "/a/..",
        ] {
            assert!(
                matches!(resolve(&root(), path), Err(ServeError::Forbidden)),
                "expected Forbidden for {path}"
            );
        }
    }

    #[test]
    fn test_malformed_paths_are_bad_requests() {
        for path in [
            "relative",
            "*",
            "/bad%2",
            "/bad%zz",
            "/tail%",
            "/%%41",
            "/%ff%fe",
            "/nul%00byte",
            "/back%5Cslash",
        ] {
            assert!(
                matches!(resolve(&root(), path), Err(ServeError::BadRequest(_))),
                "expected BadRequest for {path}"
            );
        }
    }

    #[test]
    fn test_ensure_within_root_accepts_children() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.txt");
        std::fs::write(&file, b"a").unwrap();

        let canonical = ensure_within_root(dir.path(), &file).unwrap();
        assert_eq!(canonical, file.canonicalize().unwrap());
    }

    #[test]
    fn test_ensure_within_root_missing_target() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.txt");
        assert!(matches!(
            ensure_within_root(dir.path(), &missing),
            Err(ServeError::NotFound)
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_ensure_within_root_rejects_escaping_symlink() {
        let outside = tempfile::tempdir().unwrap();
        let secret = outside.path().join("secret.txt");
        std::fs::write(&secret, b"secret").unwrap();

        let served = tempfile::tempdir().unwrap();
        let link = served.path().join("link.txt");
        std::os::unix::fs::symlink(&secret, &link).unwrap();

        assert!(matches!(
            ensure_within_root(served.path(), &link),
            Err(ServeError::Forbidden)
        ));
    }
}
