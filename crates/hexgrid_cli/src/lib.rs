#![forbid(unsafe_code)]

mod args;
mod generate;
mod viewer;

pub use args::{Args, Command, USAGE};
pub use generate::{default_output_stem, generate, Artifacts};
pub use viewer::{open_in_background, opener_command};

/// Install a `tracing` subscriber filtered by `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // A subscriber may already be installed (e.g. by tests); keep the existing one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
