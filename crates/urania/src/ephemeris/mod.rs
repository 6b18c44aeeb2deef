pub mod adapter;
pub mod frame;
pub mod provider;
pub mod types;

pub use adapter::SwissEphemerisAdapter;
pub use frame::FrameSession;
pub use provider::{gregorian_julian_day, EphemerisProvider};
pub use types::{
    Ayanamsa, Body, BodyPosition, CalcFlags, CoordinateMode, GeoLocation, HouseCusps, HouseSystem, Instant,
};
