//! TEME → TOD → GCRS → CIRS → TIRS → ITRS → WGS84 geodetic.

mod ellipsoid;
mod nutation;
mod rotation;
mod time_scales;
mod transform;

pub use ellipsoid::{ecef_to_geodetic, geodetic_to_ecef, GeodeticSolution, WGS84_A_M, WGS84_E2, WGS84_F};
pub use time_scales::{tai_minus_utc, TimeArguments};
pub use transform::{
    EarthFixedState, FrameConfig, FrameTransformer, GeodeticPosition, PrecisionMethod,
    EARTH_ROTATION_RAD_S,
};
