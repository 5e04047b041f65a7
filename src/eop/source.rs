use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::eop::{ApproximateEop, EarthOrientationProvider, FinalsTable, PublishedEop};

/// Where Earth orientation comes from: the literal `approximate`, or a
/// path to a `finals2000A` file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EarthOrientationSource {
    #[default]
    Approximate,
    Published(PathBuf),
}

impl From<String> for EarthOrientationSource {
    fn from(value: String) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("approximate") {
            EarthOrientationSource::Approximate
        } else {
            EarthOrientationSource::Published(PathBuf::from(trimmed))
        }
    }
}

impl From<EarthOrientationSource> for String {
    fn from(value: EarthOrientationSource) -> Self {
        value.to_string()
    }
}

impl fmt::Display for EarthOrientationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EarthOrientationSource::Approximate => write!(f, "approximate"),
            EarthOrientationSource::Published(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Load the provider for a run. A published file that cannot be read or
/// parsed degrades to the approximate model with a warning.
pub fn load_provider(source: &EarthOrientationSource) -> Arc<dyn EarthOrientationProvider> {
    match source {
        EarthOrientationSource::Approximate => Arc::new(ApproximateEop),
        EarthOrientationSource::Published(path) => match FinalsTable::from_file(path) {
            Ok(table) => {
                let (first, last) = table.span();
                log::info!(
                    "Loaded {} EOP rows from {} (MJD {:.1} to {:.1})",
                    table.rows().len(),
                    path.display(),
                    first,
                    last
                );
                Arc::new(PublishedEop::new(table))
            }
            Err(e) => {
                log::warn!(
                    "Failed to load EOP series {}: {}; using approximate model",
                    path.display(),
                    e
                );
                Arc::new(ApproximateEop)
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eop::EopProvenance;

    #[test]
    fn parses_source_strings() {
        assert_eq!(
            EarthOrientationSource::from("approximate".to_string()),
            EarthOrientationSource::Approximate
        );
        assert_eq!(
            EarthOrientationSource::from("data/finals2000A.all".to_string()),
            EarthOrientationSource::Published(PathBuf::from("data/finals2000A.all"))
        );
    }

    #[test]
    fn unreadable_file_degrades_to_approximate() {
        let source = EarthOrientationSource::Published(PathBuf::from("/nonexistent/finals2000A.all"));
        assert_eq!(load_provider(&source).provenance(), EopProvenance::Approximated);
    }
}
