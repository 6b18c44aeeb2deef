pub mod decans;
pub mod houses;
pub mod rulers;
pub mod tropical;

pub use decans::{DecanInfo, Element, get_decan_index, get_decan_info_for_sign_and_degree, get_decan_info_from_longitude};
pub use houses::{house_of, in_house_span};
pub use rulers::get_sign_ruler;
pub use tropical::{compute_tropical, SignPlacement, TropicalBlock, TropicalBody};
