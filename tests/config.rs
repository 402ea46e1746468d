//! JSON configuration: parsing, validation and files on disk.

use fx2d::prelude::*;
use std::error::Error;
use std::fs;

#[test]
fn test_parse_full_config() {
    let json = r#"{
        "quantity": 50,
        "emission_rate": 25,
        "seed": 9,
        "particle": {
            "x": 320, "x_range": [-10, 10],
            "y": 240, "y_range": { "low": -5, "high": 5 },
            "start_color": [1.0, 0.0, 1.0, 1.0],
            "end_color": { "r": 1.0, "g": 1.0, "b": 1.0, "a": 0.0 },
            "start_scale": 0.5, "end_scale": 3.0,
            "angle": 90, "angle_range": [-35, 10],
            "speed": 90, "speed_range": 5,
            "gravity_y": 20,
            "life_time": 7
        }
    }"#;

    let config = EmitterConfig::from_json(json).unwrap();
    assert_eq!(config.quantity, 50);
    assert_eq!(config.emission_rate, 25.0);
    assert_eq!(config.seed, Some(9));

    let p = &config.particle;
    assert_eq!(p.x, Some(320.0));
    assert_eq!(p.x_range, Some(ValueRange::new(-10.0, 10.0)));
    assert_eq!(p.y_range, Some(ValueRange::new(-5.0, 5.0)));
    assert_eq!(p.start_color, Some(Color::new(1.0, 0.0, 1.0, 1.0)));
    assert_eq!(p.end_color, Some(Color::new(1.0, 1.0, 1.0, 0.0)));
    // A bare number is an upper bound from zero.
    assert_eq!(p.speed_range, Some(ValueRange::new(0.0, 5.0)));
    assert_eq!(p.gravity_x, None);
}

#[test]
fn test_colour_spelling_and_particle_config_alias() {
    let json = r#"{
        "emission_rate": 1,
        "particle_config": {
            "start_colour": [0.5, 0.5, 1.0, 1.0],
            "end_colour": [0, 0, 0, 1]
        }
    }"#;
    let config = EmitterConfig::from_json(json).unwrap();
    assert_eq!(config.quantity, 128);
    assert_eq!(config.particle.start_color, Some(Color::new(0.5, 0.5, 1.0, 1.0)));
    assert_eq!(config.particle.end_color, Some(Color::BLACK));
}

#[test]
fn test_validation_errors() {
    let err = EmitterConfig::from_json(r#"{ "quantity": 0 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidQuantity(0)));

    let err = EmitterConfig::from_json(r#"{ "emission_rate": -3 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEmissionRate(r) if r == -3.0));

    let err = EmitterConfig::from_json("{ not json").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
    assert!(err.source().is_some());
}

#[cfg(target_pointer_width = "64")]
#[test]
fn test_huge_quantity_is_rejected() {
    let err = EmitterConfig::from_json(r#"{ "quantity": 18446744073709551615 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidQuantity(usize::MAX)));

    let config = EmitterConfig {
        quantity: u32::MAX as usize + 1,
        ..Default::default()
    };
    assert!(Emitter::from_config(config).is_err());
}

#[test]
fn test_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("smoke.json");

    let mut config = presets::white_red_smoke(Vec2::new(320.0, 360.0));
    config.seed = Some(5);
    config.save(&path).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("\"emission_rate\""));

    let loaded = EmitterConfig::load(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = EmitterConfig::load(dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
    assert!(err.to_string().contains("configuration file"));
}

#[test]
fn test_loaded_config_drives_emitter() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("burst.json");
    fs::write(
        &path,
        r#"{ "quantity": 10, "emission_rate": 10, "seed": 1,
             "particle": { "x": 100, "y": 100, "speed": 0, "life_time": 1 } }"#,
    )
    .unwrap();

    let mut emitter = Emitter::from_config(EmitterConfig::load(&path).unwrap()).unwrap();
    emitter.update(0.1);
    let particle = emitter.particles().next().unwrap();
    assert_eq!(particle.position(), Vec2::new(100.0, 100.0));
    assert!((particle.life() - 0.9).abs() < 1e-6);
}

#[test]
fn test_ranges_stay_in_bounds_through_emitter() {
    let particle = ParticleConfig::new()
        .with_position(0.0, 0.0)
        .with_position_range(-2.0..2.0, 5.0..6.0)
        .with_size(10.0)
        .with_size_range(0.0..4.0)
        .with_speed(0.0);
    let mut emitter = Emitter::builder()
        .with_quantity(64)
        .with_emission_rate(640.0)
        .with_particle_config(particle)
        .with_seed(77)
        .build()
        .unwrap();
    // The first frame only starts the backlog; the second fills the pool.
    emitter.update(0.1);
    emitter.update(0.1);
    assert_eq!(emitter.stats().active, 64);

    for p in emitter.particles() {
        assert!((-2.0..2.0).contains(&p.origin().x));
        assert!((5.0..6.0).contains(&p.origin().y));
        assert!((10.0..14.0).contains(&p.initial_size()));
    }
}
