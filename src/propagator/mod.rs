mod deep_space;
mod error;
mod gravity;
mod kernel;
mod types;

pub use error::PropagationError;
pub use gravity::{Geopotential, GravityModel};
pub use kernel::{gstime, propagate, Propagator};
pub use types::{Frame, PropagatedState, Regime};
