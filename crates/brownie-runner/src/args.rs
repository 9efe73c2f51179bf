use std::path::PathBuf;

/// Command-line options: `--frames=N --seed=N --script=PATH --json`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunnerArgs {
    /// Stop after this many frames; run until Ctrl-C when unset.
    pub frames: Option<u64>,
    /// Drive the character with seeded random input.
    pub seed: Option<u64>,
    /// TOML input script; takes precedence over `seed`.
    pub script: Option<PathBuf>,
    /// Print each frame view as a JSON line on stdout.
    pub json: bool,
}

impl RunnerArgs {
    pub fn parse<I: IntoIterator<Item = String>>(args: I) -> Self {
        let mut parsed = Self::default();
        for arg in args {
            if let Some(v) = arg.strip_prefix("--frames=") {
                parsed.frames = v.parse().ok();
            } else if let Some(v) = arg.strip_prefix("--seed=") {
                parsed.seed = v.parse().ok();
            } else if let Some(v) = arg.strip_prefix("--script=") {
                parsed.script = Some(PathBuf::from(v));
            } else if arg == "--json" {
                parsed.json = true;
            } else {
                tracing::warn!(%arg, "Ignoring unknown argument");
            }
        }
        parsed
    }
}
