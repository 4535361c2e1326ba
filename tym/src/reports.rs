/*!
The top-level report types a driver (e.g. the CLI) matches on after running
the pipeline, mirroring the tri-valued reports the rest of this crate's
family of tools report after a run.
*/

use crate::solver::SolveReport;
use std::fmt;

/// The outcome of a full compile-and-solve run.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Report {
    /// The query's valuations were exhaustively enumerated.
    Exhausted,
    /// The solver reported `unknown` at some point and enumeration stopped.
    GaveUp,
}

impl From<SolveReport> for Report {
    fn from(r: SolveReport) -> Self {
        match r {
            SolveReport::Exhausted => Report::Exhausted,
            SolveReport::GaveUp => Report::GaveUp,
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::Exhausted => write!(f, "exhausted"),
            Report::GaveUp => write!(f, "gave up"),
        }
    }
}
