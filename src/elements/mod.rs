mod error;
mod parsing;
mod tle_loader;
mod types;

pub use error::ElementError;
pub use parsing::{checksum, parse_multi_tle};
pub use tle_loader::{parse_element_sets, TleLoader};
pub use types::{MeanElements, OrbitalElementSet};
