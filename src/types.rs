use std::fmt;
use std::time::Duration;

/// Canonical vertex identifier type used throughout the crate.
pub type VertexId = String;

/// Edge delay, in [`DelayUnit`]s.
pub type Delay = u64;

/// Unit in which edge delays are interpreted by the default edge action.
///
/// - `Seconds`: the reference behaviour (`B = 5` waits five seconds).
/// - `Millis`: handy for demos and smoke tests of large configs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum DelayUnit {
    Seconds,
    Millis,
}

impl DelayUnit {
    /// Wall-clock duration of `delay` units.
    pub fn duration(self, delay: Delay) -> Duration {
        match self {
            DelayUnit::Seconds => Duration::from_secs(delay),
            DelayUnit::Millis => Duration::from_millis(delay),
        }
    }
}

impl Default for DelayUnit {
    fn default() -> Self {
        DelayUnit::Seconds
    }
}

impl fmt::Display for DelayUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DelayUnit::Seconds => f.write_str("s"),
            DelayUnit::Millis => f.write_str("ms"),
        }
    }
}

/// Which hook a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookStage {
    Edge,
    Vertex,
}

impl fmt::Display for HookStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HookStage::Edge => f.write_str("edge"),
            HookStage::Vertex => f.write_str("vertex"),
        }
    }
}
