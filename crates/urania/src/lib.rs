pub mod adapters;
pub mod engine;
pub mod ephemeris;
pub mod error;
pub mod gates;
pub mod health;
pub mod placements;
pub mod settings;
pub mod temporal;
pub mod vedic;
pub mod western;
pub mod worker;
pub mod zodiac;

pub use engine::Engine;
pub use ephemeris::{EphemerisProvider, Instant, SwissEphemerisAdapter};
pub use error::{ChartError, ProviderError};
pub use gates::{compute_dual_snapshot, gate_activation, gate_for_longitude, DualSnapshot, GateActivation};
pub use health::{run_health_check, HealthReport};
pub use placements::{compute_for_instant, compute_placements, PlacementAggregate};
pub use settings::EngineSettings;
pub use temporal::{design_instant, resolve_instant, BirthMoment};
pub use worker::EngineWorker;
