/*!
The abstract solver interface (C10) and the model-enumeration loop built on
top of it. The crate depends on no particular solver; [Solver] is the whole
contract, and [crate::solver::external::ExternalSolver] is the one concrete
implementation this crate ships, talking to a subprocess over stdin/stdout.
*/

pub mod external;

use crate::ast::Term;
use crate::intern::{self, Str};
use crate::model::Model;
use crate::order::order_statements;
use crate::query::QueryBinding;
use crate::types::err::{OrderError, SolverError};
use std::fmt;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CheckResult {
    Sat,
    Unsat,
    Unknown,
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckResult::Sat => write!(f, "sat"),
            CheckResult::Unsat => write!(f, "unsat"),
            CheckResult::Unknown => write!(f, "unknown"),
        }
    }
}

/// An equivalence class the solver reports for one queried constant: every
/// constant symbol (including, possibly, other fresh query constants) the
/// model identifies with it.
#[derive(Clone, Debug)]
pub struct EquivClass {
    pub members: Vec<Str>,
}

/// The five operations every concrete solver backend must support.
pub trait Solver {
    fn begin(&mut self, timeout_ms: u64) -> Result<(), SolverError>;
    fn assert_text(&mut self, smtlib2: &str) -> Result<(), SolverError>;
    fn check(&mut self) -> Result<CheckResult, SolverError>;
    /// Returns one equivalence class per requested constant, in the same
    /// order as `consts`.
    fn get_const_interpretations(&mut self, consts: &[Str]) -> Result<Vec<EquivClass>, SolverError>;
    fn end(&mut self) -> Result<(), SolverError>;
}

/// The final outcome of a model-enumeration run.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SolveReport {
    /// Every satisfying valuation was enumerated; the solver then reported
    /// `unsat` on the model with all of them blocked.
    Exhausted,
    /// The solver reported `unknown` at some point; enumeration stopped
    /// without a guarantee of completeness.
    GaveUp,
}

/// One witness: for each query variable, the universe element it was bound
/// to in that model.
#[derive(Clone, Debug)]
pub struct Witness {
    pub bindings: Vec<(Str, Term)>,
}

/// Picks a genuine universe witness out of an equivalence class: filters
/// out every member that is itself one of the fresh query constants, then
/// falls back to the lexicographically smallest remaining member if that
/// empties the class entirely (Open Question 2, resolved in SPEC_FULL.md §11).
fn pick_witness(class: &EquivClass, fresh_consts: &[Str]) -> Term {
    let mut candidates: Vec<Str> = class
        .members
        .iter()
        .copied()
        .filter(|m| !fresh_consts.contains(m))
        .collect();
    if candidates.is_empty() {
        candidates = class.members.clone();
    }
    candidates.sort_by(|a, b| intern::cmp(*a, *b));
    Term::Const(candidates[0])
}

/// Runs the model-enumeration loop of §4.10: asserts `model`, then
/// repeatedly checks, extracts a witness for each query binding, invokes
/// `on_witness`, and adds a blocking clause, until the solver reports
/// `unsat` (every answer enumerated) or `unknown` (gives up).
///
/// A query with no free variables (`bindings` empty) performs a single
/// check and returns without any blocking-clause machinery, per the
/// boundary behavior in §8.
pub fn enumerate_models(
    solver: &mut dyn Solver,
    mut model: Model,
    bindings: &[QueryBinding],
    timeout_ms: u64,
    mut on_witness: impl FnMut(&Witness),
) -> Result<SolveReport, SolverError> {
    solver.begin(timeout_ms)?;
    let ordered = order_statements(model.statements.clone())
        .map_err(order_error_to_solver_error)?;
    model.statements = ordered;
    solver.assert_text(&model.to_string())?;

    let fresh_consts: Vec<Str> = bindings.iter().map(|b| b.fresh_const).collect();

    loop {
        let result = solver.check()?;
        log::info!("solver check => {result}");
        match result {
            CheckResult::Unsat => {
                solver.end()?;
                return Ok(SolveReport::Exhausted);
            }
            CheckResult::Unknown => {
                solver.end()?;
                return Ok(SolveReport::GaveUp);
            }
            CheckResult::Sat => {
                if bindings.is_empty() {
                    solver.end()?;
                    return Ok(SolveReport::Exhausted);
                }

                let classes = solver.get_const_interpretations(&fresh_consts)?;
                let mut witness_bindings = Vec::with_capacity(bindings.len());
                let mut equalities = Vec::with_capacity(bindings.len());
                for (binding, class) in bindings.iter().zip(&classes) {
                    let value = pick_witness(class, &fresh_consts);
                    witness_bindings.push((binding.var_name, value));
                    equalities.push(crate::formula::Fmla::Atom(crate::ast::Atom::new(
                        intern::encode_str("="),
                        vec![Term::Const(binding.fresh_const), value],
                    )));
                }
                on_witness(&Witness {
                    bindings: witness_bindings,
                });

                let blocker = crate::formula::mk_not(crate::formula::mk_ands(equalities));
                model.push(crate::model::Statement::Axiom(blocker));
                let ordered = order_statements(model.statements.clone())
                    .map_err(order_error_to_solver_error)?;
                model.statements = ordered;
                solver.assert_text(&model.to_string())?;
            }
        }
    }
}

fn order_error_to_solver_error(e: OrderError) -> SolverError {
    SolverError::Protocol(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intern::encode_str;

    struct StubSolver {
        checks: std::vec::IntoIter<CheckResult>,
        asserted: Vec<String>,
    }

    impl Solver for StubSolver {
        fn begin(&mut self, _timeout_ms: u64) -> Result<(), SolverError> {
            Ok(())
        }
        fn assert_text(&mut self, smtlib2: &str) -> Result<(), SolverError> {
            self.asserted.push(smtlib2.to_string());
            Ok(())
        }
        fn check(&mut self) -> Result<CheckResult, SolverError> {
            Ok(self.checks.next().unwrap_or(CheckResult::Unsat))
        }
        fn get_const_interpretations(
            &mut self,
            consts: &[Str],
        ) -> Result<Vec<EquivClass>, SolverError> {
            Ok(consts
                .iter()
                .map(|_| EquivClass {
                    members: vec![encode_str("a")],
                })
                .collect())
        }
        fn end(&mut self) -> Result<(), SolverError> {
            Ok(())
        }
    }

    #[test]
    fn ground_query_needs_no_blocking_clause() {
        let mut solver = StubSolver {
            checks: vec![CheckResult::Sat].into_iter(),
            asserted: Vec::new(),
        };
        let model = Model::new(vec![]);
        let report = enumerate_models(&mut solver, model, &[], 1000, |_| {}).unwrap();
        assert_eq!(report, SolveReport::Exhausted);
        assert_eq!(solver.asserted.len(), 1);
    }

    #[test]
    fn unknown_report_surfaces_as_gave_up() {
        let mut solver = StubSolver {
            checks: vec![CheckResult::Unknown].into_iter(),
            asserted: Vec::new(),
        };
        let model = Model::new(vec![]);
        let report = enumerate_models(&mut solver, model, &[], 1000, |_| {}).unwrap();
        assert_eq!(report, SolveReport::GaveUp);
    }

    #[test]
    fn sat_then_unsat_enumerates_one_witness() {
        let mut solver = StubSolver {
            checks: vec![CheckResult::Sat, CheckResult::Unsat].into_iter(),
            asserted: Vec::new(),
        };
        let model = Model::new(vec![]);
        let bindings = vec![QueryBinding {
            var_name: encode_str("X"),
            fresh_const: encode_str("c0"),
        }];
        let mut witnesses = Vec::new();
        let report =
            enumerate_models(&mut solver, model, &bindings, 1000, |w| witnesses.push(w.clone()))
                .unwrap();
        assert_eq!(report, SolveReport::Exhausted);
        assert_eq!(witnesses.len(), 1);
        // A blocking clause must have been asserted for the second round.
        assert_eq!(solver.asserted.len(), 2);
    }
}
