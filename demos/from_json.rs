//! Loads an emitter configuration from JSON and runs it headless.
//!
//! Run with: `cargo run --example from_json -- demos/presets/white_red_smoke.json`

use fx2d::prelude::*;
use std::env;
use std::process;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| "demos/presets/white_red_smoke.json".to_string());

    let config = match EmitterConfig::load(&path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}: {}", path, e);
            process::exit(1);
        }
    };

    let batch = InstanceBatch::new();
    let mut emitter = match EmitterBuilder::from_config(config)
        .with_renderer_factory(batch.clone())
        .build()
    {
        Ok(emitter) => emitter,
        Err(e) => {
            eprintln!("{}: {}", path, e);
            process::exit(1);
        }
    };

    let mut clock = FrameClock::fixed(1.0 / 30.0);
    for _ in 0..300 {
        emitter.update(clock.tick());
    }

    println!("{}", emitter.stats());
    println!(
        "{} instances ready for upload ({} bytes)",
        batch.len(),
        batch.to_bytes().len()
    );
}
