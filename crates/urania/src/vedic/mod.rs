pub mod graha;
pub mod nakshatra;
pub mod sidereal;

pub use graha::{rashi_lord, Graha};
pub use nakshatra::{get_nakshatra_for_longitude, nakshatra_and_pada, nakshatra_index, NakshatraPosition};
pub use sidereal::{compute_sidereal, GrahaRow, LunarNodes, NodePair, SiderealBlock, SiderealProvenance};
