mod error;
mod planner;
mod resolver;

pub use error::EpochError;
pub use planner::{plan, PlannerConfig, TimeOffsetPlan};
pub use resolver::{full_year, julian_date, modified_julian_date, resolve, EpochTime};
