//! Extension-based file categorization.
//!
//! This module maps file extensions to broad category labels ("Images",
//! "Documents", ...). Lookups are case-insensitive and total: an extension
//! that is not in the map resolves to the fallback category.
//!
//! # Examples
//!
//! ```
//! use sortify::category::CategoryMap;
//!
//! let map = CategoryMap::default();
//! assert_eq!(map.resolve(".jpg"), "Images");
//! assert_eq!(map.resolve(".PDF"), "Documents");
//! assert_eq!(map.resolve(".xyz"), CategoryMap::FALLBACK);
//! ```

use std::collections::HashMap;

/// Maps lowercase file extensions (including the leading dot) to category
/// names used as destination subdirectory names.
///
/// The map starts from a fixed default table and can be overridden
/// entry-by-entry; an override always replaces the whole entry.
/// Once a scan starts the map is never mutated.
#[derive(Debug, Clone)]
pub struct CategoryMap {
    entries: HashMap<String, String>,
}

impl CategoryMap {
    /// Category returned for extensions absent from the map.
    pub const FALLBACK: &'static str = "Others";

    /// Creates a map containing the standard extension table.
    pub fn new() -> Self {
        let mut map = Self {
            entries: HashMap::new(),
        };
        map.populate_defaults();
        map
    }

    fn populate_defaults(&mut self) {
        // Images
        self.insert(".jpg", "Images");
        self.insert(".jpeg", "Images");
        self.insert(".png", "Images");
        self.insert(".gif", "Images");
        self.insert(".bmp", "Images");
        self.insert(".tiff", "Images");
        self.insert(".webp", "Images");
        self.insert(".heic", "Images");

        // Documents
        self.insert(".pdf", "Documents");
        self.insert(".doc", "Documents");
        self.insert(".docx", "Documents");
        self.insert(".ppt", "Documents");
        self.insert(".pptx", "Documents");
        self.insert(".xls", "Documents");
        self.insert(".xlsx", "Documents");
        self.insert(".txt", "Documents");
        self.insert(".rtf", "Documents");
        self.insert(".odt", "Documents");

        // Videos
        self.insert(".mp4", "Videos");
        self.insert(".mov", "Videos");
        self.insert(".avi", "Videos");
        self.insert(".mkv", "Videos");
        self.insert(".webm", "Videos");

        // Audio
        self.insert(".mp3", "Audio");
        self.insert(".wav", "Audio");
        self.insert(".flac", "Audio");
        self.insert(".aac", "Audio");

        // Archives
        self.insert(".zip", "Archives");
        self.insert(".rar", "Archives");
        self.insert(".7z", "Archives");
        self.insert(".tar", "Archives");
        self.insert(".gz", "Archives");

        // Executables and packages
        self.insert(".exe", "Executables");
        self.insert(".dmg", "Executables");
        self.insert(".app", "Executables");
        self.insert(".deb", "Executables");
        self.insert(".rpm", "Executables");

        // Code
        self.insert(".go", "Code");
        self.insert(".js", "Code");
        self.insert(".ts", "Code");
        self.insert(".py", "Code");
        self.insert(".java", "Code");
        self.insert(".c", "Code");
        self.insert(".cpp", "Code");
        self.insert(".h", "Code");
        self.insert(".hpp", "Code");
        self.insert(".rs", "Code");
        self.insert(".html", "Code");
        self.insert(".css", "Code");
        self.insert(".json", "Code");
        self.insert(".xml", "Code");
        self.insert(".md", "Code");
    }

    /// Adds or replaces a single mapping. The extension is stored lowercase
    /// with a leading dot regardless of how it is passed in.
    pub fn insert(&mut self, extension: &str, category: &str) {
        let ext = extension.to_lowercase();
        let key = if ext.starts_with('.') {
            ext
        } else {
            format!(".{}", ext)
        };
        self.entries.insert(key, category.to_string());
    }

    /// Applies caller-supplied overrides on top of the current entries.
    /// Each override replaces the matching entry wholesale.
    pub fn apply_overrides(&mut self, overrides: &HashMap<String, String>) {
        for (ext, category) in overrides {
            self.insert(ext, category);
        }
    }

    /// Resolves an extension (with leading dot) to its category.
    ///
    /// Total over the string domain: unknown extensions, the empty string
    /// and extensionless lookups all resolve to [`CategoryMap::FALLBACK`].
    pub fn resolve(&self, extension: &str) -> &str {
        self.entries
            .get(&extension.to_lowercase())
            .map(String::as_str)
            .unwrap_or(Self::FALLBACK)
    }

    /// Number of entries currently in the map.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CategoryMap {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_lookups() {
        let map = CategoryMap::default();
        assert_eq!(map.resolve(".jpg"), "Images");
        assert_eq!(map.resolve(".pdf"), "Documents");
        assert_eq!(map.resolve(".mp4"), "Videos");
        assert_eq!(map.resolve(".flac"), "Audio");
        assert_eq!(map.resolve(".zip"), "Archives");
        assert_eq!(map.resolve(".deb"), "Executables");
        assert_eq!(map.resolve(".rs"), "Code");
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        let map = CategoryMap::default();
        assert_eq!(map.resolve(".JPG"), "Images");
        assert_eq!(map.resolve(".Pdf"), "Documents");
    }

    #[test]
    fn test_unknown_extension_falls_back() {
        let map = CategoryMap::default();
        assert_eq!(map.resolve(".xyz"), CategoryMap::FALLBACK);
        assert_eq!(map.resolve(""), CategoryMap::FALLBACK);
        assert_eq!(map.resolve("noleadingdot"), CategoryMap::FALLBACK);
    }

    #[test]
    fn test_insert_normalizes_key() {
        let mut map = CategoryMap::default();
        map.insert("SVG", "Images");
        assert_eq!(map.resolve(".svg"), "Images");
    }

    #[test]
    fn test_override_replaces_entry() {
        let mut map = CategoryMap::default();
        let mut overrides = HashMap::new();
        overrides.insert(".md".to_string(), "Notes".to_string());
        overrides.insert("log".to_string(), "Logs".to_string());
        map.apply_overrides(&overrides);

        assert_eq!(map.resolve(".md"), "Notes");
        assert_eq!(map.resolve(".log"), "Logs");
        // Untouched entries keep their defaults
        assert_eq!(map.resolve(".rs"), "Code");
    }
}
