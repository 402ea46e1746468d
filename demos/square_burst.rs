//! Renders the square burst into a PNG with the software canvas.
//!
//! Run with: `cargo run --example square_burst --features canvas -- burst.png`

use fx2d::prelude::*;
use std::env;

const WIDTH: u32 = 640;
const HEIGHT: u32 = 480;

fn main() {
    tracing_subscriber::fmt::init();

    let path = env::args().nth(1).unwrap_or_else(|| "square_burst.png".to_string());
    let canvas = CanvasRenderer::with_background(WIDTH, HEIGHT, Color::BLACK);

    let config = presets::square_burst(Vec2::new(WIDTH as f32 / 2.0, HEIGHT as f32 - 80.0));
    let mut emitter = match EmitterBuilder::from_config(config)
        .with_renderer_factory(canvas.clone())
        .build()
    {
        Ok(emitter) => emitter,
        Err(e) => {
            eprintln!("failed to build emitter: {}", e);
            std::process::exit(1);
        }
    };

    // Four seconds of simulation, drawn every frame.
    let mut clock = FrameClock::fixed(1.0 / 60.0);
    for _ in 0..240 {
        emitter.update(clock.tick());
    }

    println!("{} after {} frames", emitter.stats(), canvas.frames());
    if let Err(e) = canvas.save(&path) {
        eprintln!("failed to save {}: {}", path, e);
        std::process::exit(1);
    }
    println!("wrote {}", path);
}
