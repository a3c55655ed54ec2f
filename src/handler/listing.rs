//! Directory listing
//!
//! Renders an HTML index for directories that have no index file.

use crate::error::ServeError;
use std::fmt::Write as _;
use std::path::Path;
use tokio::fs;

/// One row of a directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub name: String,
    pub is_dir: bool,
    pub is_symlink: bool,
}

impl ListingEntry {
    /// Relative link target; directories keep a trailing slash
    fn href(&self) -> String {
        let encoded = urlencoding::encode(&self.name);
        if self.is_dir {
            format!("{encoded}/")
        } else {
            encoded.into_owned()
        }
    }

    fn display_name(&self) -> String {
        if self.is_symlink {
            format!("{}@", self.name)
        } else if self.is_dir {
            format!("{}/", self.name)
        } else {
            self.name.clone()
        }
    }
}

/// Read a directory, sorted case-insensitively by name
pub async fn read_entries(dir: &Path) -> Result<Vec<ListingEntry>, ServeError> {
    let mut reader = fs::read_dir(dir).await.map_err(ServeError::from_io)?;
    let mut entries = Vec::new();

    while let Some(entry) = reader.next_entry().await.map_err(ServeError::from_io)? {
        // Non-UTF-8 names cannot be requested back, so they are left out
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        let file_type = entry.file_type().await.map_err(ServeError::from_io)?;
        let is_symlink = file_type.is_symlink();
        // Symlinks are listed as directories when their target is one
        let is_dir = if is_symlink {
            fs::metadata(entry.path())
                .await
                .is_ok_and(|meta| meta.is_dir())
        } else {
            file_type.is_dir()
        };

        entries.push(ListingEntry {
            name,
            is_dir,
            is_symlink,
        });
    }

    entries.sort_by_cached_key(|e| e.name.to_lowercase());
    Ok(entries)
}

/// Render the listing page for `url_path`
pub fn render(url_path: &str, entries: &[ListingEntry]) -> String {
    let title = format!("Directory listing for {}", html_escape(url_path));

    let mut html = String::with_capacity(256 + entries.len() * 64);
    html.push_str("<!DOCTYPE HTML>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    let _ = writeln!(html, "<title>{title}</title>");
    html.push_str("</head>\n<body>\n");
    let _ = writeln!(html, "<h1>{title}</h1>");
    html.push_str("<hr>\n<ul>\n");
    for entry in entries {
        let _ = writeln!(
            html,
            "<li><a href=\"{}\">{}</a></li>",
            entry.href(),
            html_escape(&entry.display_name())
        );
    }
    html.push_str("</ul>\n<hr>\n</body>\n</html>\n");
    html
}

fn html_escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, is_dir: bool, is_symlink: bool) -> ListingEntry {
        ListingEntry {
            name: name.to_string(),
            is_dir,
            is_symlink,
        }
    }

    #[test]
    fn test_href_encoding() {
        assert_eq!(entry("plain-name_1.txt", false, false).href(), "plain-name_1.txt");
        assert_eq!(entry("é#?", false, false).href(), "%C3%A9%23%3F");
        assert_eq!(entry("my dir", true, false).href(), "my%20dir/");
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape("<a href=\"x\">&'"),
            "&lt;a href=&quot;x&quot;&gt;&amp;&#x27;"
        );
    }

    #[test]
    fn test_render_entries() {
        let entries = vec![
            entry("data", true, false),
            entry("link", false, true),
            entry("my file.ttl", false, false),
        ];
        let html = render("/catalogs/", &entries);

        assert!(html.contains("<title>Directory listing for /catalogs/</title>"));
        assert!(html.contains("<h1>Directory listing for /catalogs/</h1>"));
        assert!(html.contains("<li><a href=\"data/\">data/</a></li>"));
        assert!(html.contains("<li><a href=\"link\">link@</a></li>"));
        assert!(html.contains("<li><a href=\"my%20file.ttl\">my file.ttl</a></li>"));
    }

    #[test]
    fn test_render_escapes_names() {
        let html = render("/<x>/", &[entry("<script>", false, false)]);
        assert!(html.contains("Directory listing for /&lt;x&gt;/"));
        assert!(html.contains("<a href=\"%3Cscript%3E\">&lt;script&gt;</a>"));
        assert!(!html.contains("<script>"));
    }

    #[tokio::test]
    async fn test_read_entries_sorted_case_insensitively() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.txt"), b"b").unwrap();
        std::fs::write(dir.path().join("A.txt"), b"a").unwrap();
        std::fs::create_dir(dir.path().join("c")).unwrap();

        let entries = read_entries(dir.path()).await.unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["A.txt", "b.txt", "c"]);
        assert!(entries[2].is_dir);
        assert!(!entries[0].is_dir);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_read_entries_skips_non_utf8_names() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("ok.txt"), b"ok").unwrap();
        let raw = dir.path().join(OsStr::from_bytes(b"bad\xffname"));
        if std::fs::write(&raw, b"x").is_err() {
            // Filesystem refuses non-UTF-8 names
            return;
        }

        let entries = read_entries(dir.path()).await.unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["ok.txt"]);
    }

    #[tokio::test]
    async fn test_read_entries_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_entries(&dir.path().join("nope")).await;
        assert!(matches!(result, Err(ServeError::NotFound)));
    }
}
