//! Smoke tests: the config and demo script shipped at the workspace root
//! parse and drive the world as documented.

use std::path::PathBuf;

use brownie_core::sim::Simulation;
use brownie_runner::frame_loop::{LoopOptions, run_frame_loop};
use brownie_runner::input_source::ScriptedInput;
use brownie_world::BrownieWorld;
use brownie_world::config::BrownieConfig;

fn workspace_file(rel: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../..")
        .join(rel)
}

#[test]
fn shipped_config_matches_defaults() {
    let content =
        std::fs::read_to_string(workspace_file("config/brownie.toml")).expect("config present");
    let config = BrownieConfig::from_toml_str(&content).expect("config parses");
    assert!(config.validate().is_ok());
    assert_eq!(config, BrownieConfig::default());
}

#[tokio::test]
async fn hop_demo_jumps_and_lands() {
    let mut script = ScriptedInput::load(&workspace_file("demos/hop.toml")).expect("demo parses");
    assert_eq!(script.len_frames(), 151);

    let config = BrownieConfig {
        tick_rate_hz: 1000.0,
        ..BrownieConfig::default()
    };
    let mut world = BrownieWorld::new(&config);
    let options = LoopOptions {
        max_frames: Some(240),
        json: false,
    };
    let summary = run_frame_loop(&mut world, &mut script, options, &mut std::io::sink())
        .await
        .expect("loop runs");

    assert_eq!(summary.frames, 240);
    assert_eq!(world.frame(), 240);
    assert_eq!(summary.jumps, 2);
    assert!(summary.landings >= 3);
    assert!(world.is_on_ground());
}
