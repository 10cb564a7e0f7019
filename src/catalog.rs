use std::path::{Path, PathBuf};

/// Separator between the fields of one configuration line.
pub const FIELD_DELIMITER: char = '|';

/// One launchable entry of the pad.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileRecord {
    pub title: String,
    /// Already resolved against the directory of the configuration document.
    pub icon_path: PathBuf,
    pub executable: String,
    /// Empty when the line has no fourth field.
    pub arguments: String,
    /// Empty when the line has no fifth field. The launcher treats empty as
    /// "inherit the current directory".
    pub working_directory: String,
}

/// Parse a single `Title|IconPath|Executable|Arguments|WorkingDirectory`
/// line.
///
/// Returns `None` for blank lines, lines with fewer than three fields and
/// lines where one of the three mandatory fields is empty.
pub fn parse_line(line: &str, base_dir: &Path) -> Option<TileRecord> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let fields: Vec<&str> = line.split(FIELD_DELIMITER).map(str::trim).collect();
    if fields.len() < 3 {
        return None;
    }
    let (title, icon, executable) = (fields[0], fields[1], fields[2]);
    if title.is_empty() || icon.is_empty() || executable.is_empty() {
        return None;
    }
    let optional = |i: usize| fields.get(i).map(|s| s.to_string()).unwrap_or_default();
    Some(TileRecord {
        title: title.to_string(),
        icon_path: base_dir.join(icon),
        executable: executable.to_string(),
        arguments: optional(3),
        working_directory: optional(4),
    })
}

/// Ordered list of tiles. Document order is display order (row-major).
///
/// The catalog is always rebuilt as a whole; there is no API to add or
/// remove single records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TileCatalog {
    tiles: Vec<TileRecord>,
}

impl TileCatalog {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a catalog from the text of a configuration document. Icon paths
    /// are resolved against `base_dir`.
    pub fn parse(content: &str, base_dir: &Path) -> Self {
        let tiles = content
            .lines()
            .filter_map(|line| parse_line(line, base_dir))
            .collect();
        Self { tiles }
    }

    /// Read and parse the document at `path`.
    ///
    /// Bytes that aren't valid UTF-8 are replaced rather than failing the
    /// whole document. Records whose icon file doesn't exist are dropped.
    pub fn read(path: &Path) -> anyhow::Result<Self> {
        let bytes = std::fs::read(path)?;
        let content = String::from_utf8_lossy(&bytes);
        let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
        let mut catalog = Self::parse(&content, base_dir);
        catalog.tiles.retain(|tile| {
            let found = tile.icon_path.is_file();
            if !found {
                tracing::warn!(
                    title = %tile.title,
                    icon = %tile.icon_path.display(),
                    "skipping tile with missing icon"
                );
            }
            found
        });
        Ok(catalog)
    }

    /// Like [`TileCatalog::read`] but a document that cannot be opened yields
    /// an empty catalog instead of an error.
    pub fn load(path: &Path) -> Self {
        match Self::read(path) {
            Ok(catalog) => {
                tracing::info!(path = %path.display(), tiles = catalog.len(), "loaded tile catalog");
                catalog
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), "failed to read tile catalog: {e}");
                Self::empty()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TileRecord> {
        self.tiles.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TileRecord> {
        self.tiles.iter()
    }
}

impl<'a> IntoIterator for &'a TileCatalog {
    type Item = &'a TileRecord;
    type IntoIter = std::slice::Iter<'a, TileRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_field_line_has_empty_optionals() {
        let base = Path::new("/pad");
        let rec = parse_line("Notes|notes.png|notepad.exe", base).expect("record");
        assert_eq!(rec.title, "Notes");
        assert_eq!(rec.icon_path, base.join("notes.png"));
        assert_eq!(rec.executable, "notepad.exe");
        assert!(rec.arguments.is_empty());
        assert!(rec.working_directory.is_empty());
    }

    #[test]
    fn two_field_line_is_dropped() {
        assert!(parse_line("Bad|only2fields", Path::new("/pad")).is_none());
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let rec = parse_line("  Term | term.png | wt.exe | -p dev | C:\\src  ", Path::new("/pad"))
            .expect("record");
        assert_eq!(rec.title, "Term");
        assert_eq!(rec.arguments, "-p dev");
        assert_eq!(rec.working_directory, "C:\\src");
    }

    #[test]
    fn empty_mandatory_field_is_dropped() {
        assert!(parse_line("|icon.png|app.exe", Path::new("/pad")).is_none());
        assert!(parse_line("App||app.exe", Path::new("/pad")).is_none());
    }

    #[test]
    fn parse_keeps_document_order_and_skips_blanks() {
        let doc = "A|a.png|a.exe\n\n   \nBad|x\nB|b.png|b.exe|--flag\n";
        let catalog = TileCatalog::parse(doc, Path::new("/pad"));
        let titles: Vec<&str> = catalog.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B"]);
        assert_eq!(catalog.get(1).map(|t| t.arguments.as_str()), Some("--flag"));
    }
}
