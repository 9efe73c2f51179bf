use tracing_subscriber::EnvFilter;

use brownie_core::sim::Simulation;
use brownie_runner::args::RunnerArgs;
use brownie_runner::frame_loop::{LoopOptions, run_frame_loop};
use brownie_runner::input_source;
use brownie_world::BrownieWorld;
use brownie_world::config::BrownieConfig;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = RunnerArgs::parse(std::env::args().skip(1));

    let config = BrownieConfig::load();
    if let Err(e) = config.validate() {
        tracing::error!(error = %e, "Refusing to start");
        std::process::exit(1);
    }

    let mut input = match input_source::from_args(&args) {
        Ok(source) => source,
        Err(e) => {
            tracing::error!(error = %e, "Failed to set up input");
            std::process::exit(1);
        },
    };

    let mut world = BrownieWorld::new(&config);
    tracing::info!(
        tick_rate = world.tick_rate(),
        max_frames = ?args.frames,
        "Brownie runner starting"
    );

    let options = LoopOptions {
        max_frames: args.frames,
        json: args.json,
    };
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match run_frame_loop(&mut world, input.as_mut(), options, &mut out).await {
        Ok(summary) => tracing::info!(
            frames = summary.frames,
            jumps = summary.jumps,
            rejected_jumps = summary.rejected_jumps,
            landings = summary.landings,
            "Brownie runner stopped"
        ),
        Err(e) => {
            tracing::error!(error = %e, "Frame loop failed");
            std::process::exit(1);
        },
    }
}
