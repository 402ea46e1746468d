//! Headless blue swirling smoke.
//!
//! Runs ten seconds of simulation at a fixed 60 FPS step and logs the pool
//! usage once per simulated second.
//!
//! Run with: `RUST_LOG=fx2d=debug cargo run --example swirling_smoke`

use fx2d::prelude::*;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut emitter = match Emitter::from_config(presets::blue_swirling_smoke(Vec2::new(320.0, 240.0))) {
        Ok(emitter) => emitter,
        Err(e) => {
            eprintln!("failed to build emitter: {}", e);
            std::process::exit(1);
        }
    };

    let mut clock = FrameClock::fixed(1.0 / 60.0);
    while clock.elapsed() < 10.0 {
        emitter.update(clock.tick());
        if clock.frame() % 60 == 0 {
            println!("t={:>5.2}s  {}", clock.elapsed(), emitter.stats());
        }
    }

    let (min, max) = emitter.particles().fold((Vec2::MAX, Vec2::MIN), |(min, max), p| {
        (min.min(p.position()), max.max(p.position()))
    });
    println!("bounds: {:?} .. {:?}", min, max);
}
