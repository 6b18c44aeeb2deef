use urania::ephemeris::{Ayanamsa, Body, CalcFlags, CoordinateMode, EphemerisProvider, HouseSystem};
use urania::vedic::Graha;
use urania::zodiac::Sign;
use urania::{
    compute_dual_snapshot, compute_placements, BirthMoment, Engine, EngineSettings, EngineWorker, Instant,
    SwissEphemerisAdapter,
};

#[test]
#[ignore] // Requires Swiss Ephemeris files
fn test_reference_sun_position() {
    let mut adapter = SwissEphemerisAdapter::new(None).unwrap();
    adapter.set_coordinate_mode(CoordinateMode::Tropical);
    let sun = adapter
        .calc_body(Instant(2_451_545.0), Body::Sun, CalcFlags::SWIEPH | CalcFlags::SPEED)
        .unwrap();
    // Sun at J2000.0 is about 280.37°
    assert!((sun.longitude - 280.37).abs() < 0.1, "sun at {}", sun.longitude);
    assert!(sun.speed > 0.9 && sun.speed < 1.1);
}

#[test]
#[ignore] // Requires Swiss Ephemeris files
fn test_lahiri_ayanamsa_at_j2000() {
    let mut adapter = SwissEphemerisAdapter::new(None).unwrap();
    adapter.set_coordinate_mode(CoordinateMode::Sidereal(Ayanamsa::Lahiri));
    let angle = adapter.correction_angle(Instant(2_451_545.0)).unwrap();
    assert!((angle - 23.85).abs() < 0.05, "ayanamsa {angle}");
}

#[test]
#[ignore] // Requires Swiss Ephemeris files
fn test_engine_from_swiss_adapter() {
    let adapter = SwissEphemerisAdapter::new(None).unwrap();
    let mut engine = Engine::new(adapter, EngineSettings::default()).unwrap();
    assert_eq!(engine.health().sun_sign, Sign::Capricorn);

    let moment = BirthMoment::new("1985-07-04", "14:30", "America/New_York", 40.7128, -74.0060);
    let chart = engine.compute(&moment).unwrap();
    assert_eq!(chart.tropical.sun.sign, Sign::Cancer);
    assert_eq!(chart.sidereal.sun_sign, Sign::Gemini);
    assert!(!chart.sidereal.provenance.is_degraded());

    let angle = chart.sidereal.ayanamsa.degrees;
    let tropical_moon = chart.tropical.moon.longitude;
    let expected = (tropical_moon - angle).rem_euclid(360.0);
    let diff = (chart.sidereal.moon_longitude - expected).abs();
    assert!(diff < 0.01 || (360.0 - diff) < 0.01);
}

#[test]
#[ignore] // Requires Swiss Ephemeris files
fn test_sidereal_request_does_not_leak_into_tropical() {
    let mut adapter = SwissEphemerisAdapter::new(None).unwrap();
    let settings = EngineSettings {
        house_system: HouseSystem::WholeSign,
        ayanamsa: Ayanamsa::FaganBradley,
    };
    let moment = BirthMoment::new("2000-01-01", "12:00", "UTC", 0.0, 0.0);
    compute_placements(&mut adapter, &moment, &settings).unwrap();

    let snapshot = compute_dual_snapshot(&mut adapter, Instant(2_451_545.0)).unwrap();
    let sun = snapshot.personality.longitude(Body::Sun).unwrap();
    assert!((sun - 280.37).abs() < 0.1, "sun at {sun}");
}

#[tokio::test]
#[ignore] // Requires Swiss Ephemeris files
async fn test_worker_with_swiss_adapter() {
    let worker = EngineWorker::spawn(
        || SwissEphemerisAdapter::new(None).map_err(|e| urania::ChartError::Configuration { message: e.to_string() }),
        EngineSettings::default(),
    )
    .unwrap();
    let moment = BirthMoment::new("1990-03-15", "23:59", "Australia/Sydney", -33.87, 151.21);
    let chart = worker.placements(moment).await.unwrap();
    assert!(chart.sidereal.graha(Graha::Rahu).is_some());
}
