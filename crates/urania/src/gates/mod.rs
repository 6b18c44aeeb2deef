//! The 64-gate wheel and the dual longitude snapshot consumed by the gate-based systems.
//!
//! Both downstream gate systems must agree on sector boundaries, so this module is the only
//! place that maps a longitude to a gate.

use serde::{Deserialize, Serialize};

use crate::ephemeris::{Body, EphemerisProvider, FrameSession, Instant};
use crate::error::ChartError;
use crate::temporal::design_instant;
use crate::zodiac::normalize_degrees;

pub const GATE_COUNT: usize = 64;
pub const GATE_SPAN: f64 = 360.0 / 64.0; // 5.625°
pub const LINES_PER_GATE: usize = 6;
pub const LINE_SPAN: f64 = GATE_SPAN / 6.0; // 0.9375°

/// Gate numbers in wheel order, one per 5.625° sector starting at 0° Aries.
///
/// This is the traditional I Ching wheel sequence (25, 17, 21, 51, ... 22, 36) as laid around
/// the zodiac by the gate-based systems. It is not numeric and must not be regenerated from a
/// formula; any edit here moves every gate activation downstream.
pub const GATE_WHEEL: [u8; GATE_COUNT] = [
    25, 17, 21, 51, 42, 3, 27, 24,
    2, 23, 8, 20, 16, 35, 45, 12,
    15, 52, 39, 53, 62, 56, 31, 33,
    7, 4, 29, 59, 40, 64, 47, 6,
    46, 18, 48, 57, 32, 50, 28, 44,
    1, 43, 14, 34, 9, 5, 26, 11,
    10, 58, 38, 54, 61, 60, 41, 19,
    13, 49, 30, 55, 37, 63, 22, 36,
];

/// Wheel sector (0..=63) containing a longitude.
pub fn gate_sector(longitude: f64) -> usize {
    (normalize_degrees(longitude) / GATE_SPAN) as usize % GATE_COUNT
}

/// Gate number (1..=64) for a longitude.
pub fn gate_for_longitude(longitude: f64) -> u8 {
    GATE_WHEEL[gate_sector(longitude)]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GateActivation {
    pub gate: u8,
    /// 1..=6
    pub line: u8,
}

/// Gate and line for a longitude. The line comes from the offset into the same sector the
/// gate names, clamped to 1..=6.
pub fn gate_activation(longitude: f64) -> GateActivation {
    let lon = normalize_degrees(longitude);
    let sector = gate_sector(lon);
    let offset = (lon - sector as f64 * GATE_SPAN).clamp(0.0, GATE_SPAN);
    let line = ((offset / LINE_SPAN).floor() as i64 + 1).clamp(1, LINES_PER_GATE as i64) as u8;
    GateActivation {
        gate: GATE_WHEEL[sector],
        line,
    }
}

/// Bodies captured in each snapshot: Sun through Pluto plus the true node.
pub const SNAPSHOT_BODIES: [Body; 11] = [
    Body::Sun,
    Body::Moon,
    Body::Mercury,
    Body::Venus,
    Body::Mars,
    Body::Jupiter,
    Body::Saturn,
    Body::Uranus,
    Body::Neptune,
    Body::Pluto,
    Body::TrueNode,
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    pub body: Body,
    pub longitude: f64,
}

/// Tropical longitudes of [`SNAPSHOT_BODIES`] at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub instant: Instant,
    pub positions: Vec<SnapshotEntry>,
}

impl Snapshot {
    pub fn longitude(&self, body: Body) -> Option<f64> {
        self.positions
            .iter()
            .find(|entry| entry.body == body)
            .map(|entry| entry.longitude)
    }

    pub fn activations(&self) -> Vec<(Body, GateActivation)> {
        self.positions
            .iter()
            .map(|entry| (entry.body, gate_activation(entry.longitude)))
            .collect()
    }
}

/// Personality (birth) and design (88 days earlier) snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DualSnapshot {
    pub personality: Snapshot,
    pub design: Snapshot,
}

fn take_snapshot<P: EphemerisProvider + ?Sized>(
    session: &mut FrameSession<'_, P>,
    instant: Instant,
) -> Result<Snapshot, ChartError> {
    let positions = SNAPSHOT_BODIES
        .iter()
        .map(|&body| {
            session
                .body(instant, body)
                .map(|pos| SnapshotEntry {
                    body,
                    longitude: normalize_degrees(pos.longitude),
                })
                .map_err(ChartError::provider("gate snapshot"))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Snapshot { instant, positions })
}

/// Compute both snapshots for a birth instant.
pub fn compute_dual_snapshot<P: EphemerisProvider + ?Sized>(
    provider: &mut P,
    instant: Instant,
) -> Result<DualSnapshot, ChartError> {
    let mut session = FrameSession::tropical(provider);
    let personality = take_snapshot(&mut session, instant)?;
    let design = take_snapshot(&mut session, design_instant(instant))?;
    Ok(DualSnapshot {
        personality,
        design,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wheel_is_a_permutation() {
        let mut sorted = GATE_WHEEL.to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, (1..=64).collect::<Vec<u8>>());
    }

    #[test]
    fn test_gate_endpoints() {
        assert_eq!(gate_for_longitude(0.0), GATE_WHEEL[0]);
        assert_eq!(gate_for_longitude(359.999), GATE_WHEEL[63]);
        assert_eq!(gate_for_longitude(360.0), GATE_WHEEL[0]);
        assert_eq!(gate_for_longitude(-0.001), GATE_WHEEL[63]);
    }

    #[test]
    fn test_gate_sector_boundaries() {
        assert_eq!(gate_sector(GATE_SPAN - 1e-9), 0);
        assert_eq!(gate_sector(GATE_SPAN), 1);
        assert_eq!(gate_for_longitude(GATE_SPAN), 17);
        assert_eq!(gate_for_longitude(180.0), GATE_WHEEL[32]);
    }

    #[test]
    fn test_gate_lines() {
        assert_eq!(gate_activation(0.0), GateActivation { gate: 25, line: 1 });
        assert_eq!(gate_activation(LINE_SPAN * 2.5).line, 3);
        assert_eq!(gate_activation(GATE_SPAN - 1e-9).line, 6);
        for k in 0..(GATE_COUNT * LINES_PER_GATE) {
            let act = gate_activation(k as f64 * LINE_SPAN);
            assert!((1..=6).contains(&act.line));
        }
    }
}
