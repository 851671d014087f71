use std::collections::HashMap;

/// MIME type for which no extension should ever be appended.
pub const MIME_TYPE_DEFAULT: &str = "application/octet-stream";

/// MIME types naming a directory rather than a file.
pub const DIRECTORY_MIME_TYPES: &[&str] = &["inode/directory", "vnd.android.document/directory"];

/// Ordered extensions for a MIME type, canonical first, lowercase, no leading dot.
pub trait MimeExtensionTable: Send + Sync {
    fn extensions_for(&self, mime_type: &str) -> Vec<String>;
}

impl MimeExtensionTable for HashMap<String, Vec<String>> {
    fn extensions_for(&self, mime_type: &str) -> Vec<String> {
        self.get(&normalize_mime(mime_type)).cloned().unwrap_or_default()
    }
}

// Entries where the reverse lookup from `mime_guess` is missing or would
// put a rare extension first.
const CANONICAL: &[(&str, &[&str])] = &[
    ("image/jpeg", &["jpg", "jpeg", "jpe"]),
    ("image/png", &["png"]),
    ("image/gif", &["gif"]),
    ("image/webp", &["webp"]),
    ("image/heic", &["heic"]),
    ("image/heif", &["heif"]),
    ("image/bmp", &["bmp"]),
    ("image/tiff", &["tiff", "tif"]),
    ("image/svg+xml", &["svg", "svgz"]),
    ("video/mp4", &["mp4"]),
    ("video/3gpp", &["3gp", "3gpp"]),
    ("video/webm", &["webm"]),
    ("video/quicktime", &["mov"]),
    ("video/x-matroska", &["mkv"]),
    ("audio/mpeg", &["mp3", "mpga"]),
    ("audio/mp4", &["m4a"]),
    ("audio/aac", &["aac"]),
    ("audio/ogg", &["ogg", "oga"]),
    ("audio/flac", &["flac"]),
    ("audio/x-flac", &["flac"]),
    ("application/x-flac", &["flac"]),
    ("audio/wav", &["wav"]),
    ("audio/x-wav", &["wav"]),
    ("audio/amr", &["amr"]),
    ("audio/x-mpegurl", &["m3u"]),
    ("application/vnd.apple.mpegurl", &["m3u8"]),
    ("audio/x-scpls", &["pls"]),
    ("application/vnd.ms-wpl", &["wpl"]),
    ("text/plain", &["txt", "text", "log"]),
    ("text/html", &["html", "htm"]),
    ("text/csv", &["csv"]),
    ("text/markdown", &["md", "markdown"]),
    ("application/pdf", &["pdf"]),
    ("application/json", &["json"]),
    ("application/zip", &["zip"]),
];

/// Curated canonical table backed by the `mime_guess` database.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinMimeTable;

impl MimeExtensionTable for BuiltinMimeTable {
    fn extensions_for(&self, mime_type: &str) -> Vec<String> {
        let mime = normalize_mime(mime_type);
        if mime.is_empty() || mime == MIME_TYPE_DEFAULT || is_directory_mime(&mime) {
            return Vec::new();
        }

        if let Some((_, exts)) = CANONICAL.iter().find(|(m, _)| *m == mime) {
            return exts.iter().map(|e| e.to_string()).collect();
        }

        mime_guess::get_mime_extensions_str(&mime)
            .map(|exts| exts.iter().map(|e| e.to_ascii_lowercase()).collect())
            .unwrap_or_default()
    }
}

/// Whether `mime_type` denotes a directory.
pub fn is_directory_mime(mime_type: &str) -> bool {
    let mime = normalize_mime(mime_type);
    DIRECTORY_MIME_TYPES.iter().any(|d| *d == mime)
}

/// Lowercase essence of a MIME type, parameters such as `; charset=` removed.
pub fn normalize_mime(mime_type: &str) -> String {
    mime_type
        .split(';')
        .next()
        .unwrap_or(mime_type)
        .trim()
        .to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn canonical_extension_comes_first() {
        let table = BuiltinMimeTable;
        assert_eq!(table.extensions_for("image/jpeg"), vec!["jpg", "jpeg", "jpe"]);
        assert_eq!(table.extensions_for("application/x-flac"), vec!["flac"]);
        assert_eq!(table.extensions_for("audio/flac"), vec!["flac"]);
    }

    #[test]
    fn parameters_and_case_are_ignored() {
        let table = BuiltinMimeTable;
        assert_eq!(table.extensions_for("Text/Plain; charset=UTF-8")[0], "txt");
    }

    #[test]
    fn extensionless_types_yield_nothing() {
        let table = BuiltinMimeTable;
        assert!(table.extensions_for(MIME_TYPE_DEFAULT).is_empty());
        assert!(table.extensions_for("inode/directory").is_empty());
        assert!(table.extensions_for("lolz/lolz").is_empty());
        assert!(table.extensions_for("").is_empty());
    }

    #[test]
    fn falls_back_to_mime_guess_database() {
        let exts = BuiltinMimeTable.extensions_for("application/epub+zip");
        assert!(exts.iter().any(|e| e == "epub"), "got {exts:?}");
    }

    #[test]
    fn map_table_uses_normalized_keys() {
        let mut table: HashMap<String, Vec<String>> = HashMap::new();
        table.insert("x-test/thing".into(), vec!["thing".into()]);
        assert_eq!(table.extensions_for("X-Test/Thing; v=1"), vec!["thing"]);
        assert!(table.extensions_for("x-test/other").is_empty());
    }
}
