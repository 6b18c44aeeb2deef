//! Interfaces for the systems downstream of the placement engine.
//!
//! The engine does not implement these; it supplies their inputs. Gate numbers must come from
//! [`gate_activation`](crate::gates::gate_activation) so both gate systems share one boundary
//! definition.

use serde::{Deserialize, Serialize};

use crate::gates::{DualSnapshot, GateActivation};
use crate::temporal::BirthMoment;

/// Gate system A: type, authority and profile style readings from the dual snapshot.
pub trait GateProfileAdapter {
    type Profile;
    type Error: std::error::Error;

    fn profile(&self, snapshot: &DualSnapshot) -> Result<Self::Profile, Self::Error>;
}

/// A gate activation labelled by the adapter that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedActivation {
    pub name: String,
    #[serde(flatten)]
    pub activation: GateActivation,
}

/// Gate system B: named gate and line activations from the dual snapshot.
pub trait ActivationAdapter {
    type Error: std::error::Error;

    fn activations(&self, snapshot: &DualSnapshot) -> Result<Vec<NamedActivation>, Self::Error>;
}

/// Numerology and calendar readings; uses the name and birth data only, no planetary input.
pub trait NumerologyAdapter {
    type Reading;
    type Error: std::error::Error;

    fn reading(&self, name: &str, moment: &BirthMoment) -> Result<Self::Reading, Self::Error>;
}
