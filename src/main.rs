//! # Voxel World Entry Point
//!
//! Runs a headless session of the engine. An optional path to a JSON world
//! configuration can be passed as the first argument.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=debug cargo run --release -- world.json
//! ```

fn main() {
    if let Err(err) = voxel_world::run() {
        log::error!("{}", err);
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}
