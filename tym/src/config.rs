/*!
Configuration of a compilation run. All tuning knobs the pipeline and CLI
need live here, constructed once by the driver and passed by value into
[crate::compile_and_solve] (and friends), mirroring how a single
configuration value threads through the rest of the crate.
*/

use std::path::PathBuf;
use std::time::Duration;

/// How a solved query's valuations should be printed.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum ModelOutput {
    #[default]
    Valuation,
    Fact,
    All,
}

#[derive(Clone, Debug)]
pub struct Config {
    /// Maximum digit width the fresh-name generators are expected to need;
    /// purely advisory (Rust's generators never truncate), kept so the CLI
    /// can warn if a run is approaching it.
    pub max_var_width: usize,

    /// Timeout passed to the external solver on `solver_begin`.
    pub solver_timeout: Duration,

    /// Path to an SMT-LIB2-speaking solver executable.
    pub solver_path: PathBuf,

    pub model_output: ModelOutput,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_var_width: 9,
            solver_timeout: Duration::from_millis(10_000),
            solver_path: PathBuf::from("z3"),
            model_output: ModelOutput::Valuation,
        }
    }
}
