use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::elements::parsing::parse_multi_tle;
use crate::elements::{ElementError, OrbitalElementSet};

/// Loads element sets from a single TLE file or a directory of them.
pub struct TleLoader {
    path: PathBuf,
    satellites: BTreeMap<u32, OrbitalElementSet>,
}

impl TleLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            satellites: BTreeMap::new(),
        }
    }

    /// Load every `.tle`/`.txt` file under the path. Entries that cannot be
    /// parsed are logged and skipped; a later duplicate catalog number
    /// replaces an earlier one.
    pub fn load_all(&mut self) -> Result<usize, ElementError> {
        if !self.path.exists() {
            return Err(ElementError::PathNotFound(self.path.display().to_string()));
        }

        self.satellites.clear();

        if self.path.is_file() {
            let path = self.path.clone();
            self.load_file(&path)?;
            return Ok(self.satellites.len());
        }

        let mut files: Vec<PathBuf> = fs::read_dir(&self.path)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file())
            .filter(|p| {
                p.extension()
                    .map(|ext| ext == "tle" || ext == "txt")
                    .unwrap_or(false)
            })
            .collect();
        files.sort();

        for path in files {
            if let Err(e) = self.load_file(&path) {
                log::warn!("Failed to read TLE file {}: {}", path.display(), e);
            }
        }

        Ok(self.satellites.len())
    }

    fn load_file(&mut self, path: &Path) -> Result<(), ElementError> {
        let content = fs::read_to_string(path)?;
        for set in parse_element_sets(&content, &path.display().to_string()) {
            let norad_id = set.norad_id;
            if let Some(earlier) = self.satellites.insert(norad_id, set) {
                log::warn!(
                    "Duplicate catalog number {} in {}: replaced earlier element set {}",
                    norad_id,
                    path.display(),
                    earlier.name
                );
            }
        }
        Ok(())
    }

    /// Loaded sets ordered by catalog number.
    pub fn satellites(&self) -> Vec<&OrbitalElementSet> {
        self.satellites.values().collect()
    }

    pub fn into_sets(self) -> Vec<OrbitalElementSet> {
        self.satellites.into_values().collect()
    }
}

/// Parse every element set in `content`, skipping (with a warning) the ones
/// whose fields cannot be read.
pub fn parse_element_sets(content: &str, source: &str) -> Vec<OrbitalElementSet> {
    parse_multi_tle(content)
        .into_iter()
        .filter_map(|(name, line1, line2)| {
            match OrbitalElementSet::from_tle(name.clone(), &line1, &line2) {
                Ok(set) => Some(set),
                Err(e) => {
                    log::warn!(
                        "Skipping element set {} from {}: {}",
                        name.as_deref().unwrap_or(line1.get(2..7).unwrap_or("?")),
                        source,
                        e
                    );
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTENT: &str = "\
STARLINK-1007
1 44713U 19074A   24015.25000000  .00001200  00000-0  82000-4 0  9996
2 44713  53.0540 120.0000 0001400  90.0000 270.0000 15.06400000 23454
BROKEN
1 44716U 19074A   24015.25000000  .00001200
2 44716  53.0540 120.0000 0001400
";

    #[test]
    fn skips_unparseable_entries() {
        let sets = parse_element_sets(CONTENT, "inline");
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].norad_id, 44713);
    }

    #[test]
    fn loads_single_file_and_directory() {
        let dir = std::env::temp_dir().join(format!("orbit-frames-loader-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let file = dir.join("starlink.tle");
        fs::write(&file, CONTENT).unwrap();
        fs::write(dir.join("notes.md"), "not a tle").unwrap();

        let mut loader = TleLoader::new(&file);
        assert_eq!(loader.load_all().unwrap(), 1);

        let mut loader = TleLoader::new(&dir);
        assert_eq!(loader.load_all().unwrap(), 1);
        assert_eq!(loader.satellites()[0].name, "STARLINK-1007");

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn later_duplicate_replaces_earlier() {
        let dir = std::env::temp_dir().join(format!("orbit-frames-duplicates-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let lines = "\
1 44713U 19074A   24015.25000000  .00001200  00000-0  82000-4 0  9996
2 44713  53.0540 120.0000 0001400  90.0000 270.0000 15.06400000 23454
";
        fs::write(dir.join("a.tle"), format!("FIRST\n{lines}")).unwrap();
        fs::write(dir.join("b.tle"), format!("SECOND\n{lines}")).unwrap();

        let mut loader = TleLoader::new(&dir);
        assert_eq!(loader.load_all().unwrap(), 1);
        assert_eq!(loader.satellites()[0].name, "SECOND");

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_path_is_an_error() {
        let mut loader = TleLoader::new("/nonexistent/orbit-frames.tle");
        assert!(matches!(loader.load_all(), Err(ElementError::PathNotFound(_))));
    }
}
