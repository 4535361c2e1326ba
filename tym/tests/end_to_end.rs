//! End-to-end scenarios driving the full pipeline (parse-free: these build
//! the AST directly, since the surface parser lives in the CLI crate) with
//! an in-process stub [Solver], matching the canned-response style of the
//! unit tests in `solver::tests` but exercising [Compiled] top to bottom.

use tym::ast::{Atom, Clause, Program, Term};
use tym::intern::encode_str;
use tym::query::QueryBinding;
use tym::solver::{CheckResult, EquivClass, Solver, Witness};
use tym::types::err::{ErrorKind, SolverError};
use tym::Compiled;

fn var(name: &str) -> Term {
    Term::Var(encode_str(name))
}

fn cst(name: &str) -> Term {
    Term::Const(encode_str(name))
}

/// A stub solver whose `check` results and `get_const_interpretations`
/// replies are scripted in advance, one round at a time. No subprocess is
/// spawned; nothing here actually evaluates the asserted SMT-LIB2 text.
struct ScriptedSolver {
    checks: std::vec::IntoIter<CheckResult>,
    /// One set of witness constants per `Sat` round, in query-binding order.
    rounds: std::vec::IntoIter<Vec<&'static str>>,
    asserted: Vec<String>,
}

impl ScriptedSolver {
    fn new(checks: Vec<CheckResult>, rounds: Vec<Vec<&'static str>>) -> Self {
        ScriptedSolver {
            checks: checks.into_iter(),
            rounds: rounds.into_iter(),
            asserted: Vec::new(),
        }
    }
}

impl Solver for ScriptedSolver {
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
        consts: &[tym::intern::Str],
    ) -> Result<Vec<EquivClass>, SolverError> {
        let round = self.rounds.next().unwrap_or_default();
        Ok(consts
            .iter()
            .zip(round)
            .map(|(_, member)| EquivClass {
                members: vec![encode_str(member)],
            })
            .collect())
    }

    fn end(&mut self) -> Result<(), SolverError> {
        Ok(())
    }
}

fn witness_values(bindings: &[QueryBinding], w: &Witness) -> Vec<String> {
    bindings
        .iter()
        .map(|b| {
            let (_, value) = w
                .bindings
                .iter()
                .find(|(name, _)| *name == b.var_name)
                .expect("every binding gets a witness value");
            value.to_string()
        })
        .collect()
}

/// Scenario 1: `p(a). p(b).` queried with `p(X)?` enumerates `{X=a}, {X=b}`
/// then reports unsat (exhausted).
#[test]
fn scenario_1_two_facts_two_answers() {
    let program = Program::new(vec![
        Clause::fact(Atom::new(encode_str("p"), vec![cst("a")])),
        Clause::fact(Atom::new(encode_str("p"), vec![cst("b")])),
    ]);
    let query = Clause::fact(Atom::new(encode_str("p"), vec![var("X")]));

    let mut compiled = Compiled::compile(&program).unwrap();
    let bindings = compiled.attach_query(&query).unwrap();

    let mut solver = ScriptedSolver::new(
        vec![CheckResult::Sat, CheckResult::Sat, CheckResult::Unsat],
        vec![vec!["a"], vec!["b"]],
    );
    let mut answers = Vec::new();
    let report = compiled
        .solve(&mut solver, &bindings, 1000, |w| {
            answers.push(witness_values(&bindings, w))
        })
        .unwrap();

    assert_eq!(report, tym::reports::Report::Exhausted);
    assert_eq!(answers, vec![vec!["a".to_string()], vec!["b".to_string()]]);
}

/// Scenario 2: a two-rule `path` predicate over a two-edge chain, queried
/// with one endpoint fixed, enumerates both reachable targets.
#[test]
fn scenario_2_path_over_edges() {
    let program = Program::new(vec![
        Clause::fact(Atom::new(encode_str("edge"), vec![cst("a"), cst("b")])),
        Clause::fact(Atom::new(encode_str("edge"), vec![cst("b"), cst("c")])),
        Clause::rule(
            Atom::new(encode_str("path"), vec![var("X"), var("Y")]),
            vec![Atom::new(encode_str("edge"), vec![var("X"), var("Y")])],
        ),
        Clause::rule(
            Atom::new(encode_str("path"), vec![var("X"), var("Z")]),
            vec![
                Atom::new(encode_str("edge"), vec![var("X"), var("Y")]),
                Atom::new(encode_str("path"), vec![var("Y"), var("Z")]),
            ],
        ),
    ]);
    let query = Clause::fact(Atom::new(encode_str("path"), vec![cst("a"), var("Z")]));

    let mut compiled = Compiled::compile(&program).unwrap();
    let bindings = compiled.attach_query(&query).unwrap();

    let mut solver = ScriptedSolver::new(
        vec![CheckResult::Sat, CheckResult::Sat, CheckResult::Unsat],
        vec![vec!["b"], vec!["c"]],
    );
    let mut answers = Vec::new();
    let report = compiled
        .solve(&mut solver, &bindings, 1000, |w| {
            answers.push(witness_values(&bindings, w))
        })
        .unwrap();

    assert_eq!(report, tym::reports::Report::Exhausted);
    assert_eq!(answers, vec![vec!["b".to_string()], vec!["c".to_string()]]);
}

/// Scenario 3: querying a constant that never appears in the program's
/// universe is a translation-time error, not a solver round.
#[test]
fn scenario_3_unknown_constant_in_query_is_an_error() {
    let program = Program::new(vec![Clause::fact(Atom::new(
        encode_str("q"),
        vec![cst("a")],
    ))]);
    let query = Clause::fact(Atom::new(encode_str("q"), vec![cst("d")]));

    let mut compiled = Compiled::compile(&program).unwrap();
    let err = compiled.attach_query(&query).unwrap_err();
    match err {
        ErrorKind::Query(tym::types::err::QueryError::UndeclaredConstant { name }) => {
            assert_eq!(name, "d");
        }
        other => panic!("expected UndeclaredConstant, got {other:?}"),
    }
}

/// Scenario 4: with no query, the SMT-LIB2 text for a two-fact program
/// contains the universe preamble and the predicate's defining axiom.
#[test]
fn scenario_4_smt_output_shape_with_no_query() {
    let program = Program::new(vec![
        Clause::fact(Atom::new(encode_str("r"), vec![cst("a")])),
        Clause::fact(Atom::new(encode_str("r"), vec![cst("b")])),
    ]);

    let compiled = Compiled::compile(&program).unwrap();
    let ordered = compiled.ordered_model().unwrap();
    let text = ordered.to_string();

    assert!(text.contains("(declare-sort Universe 0)"));
    assert_eq!(text.matches("declare-const").count(), 2);
    assert!(text.contains("(assert (distinct a b))") || text.contains("(assert (distinct b a))"));
    assert!(text.contains("define-fun r"));
}

/// Scenario 5: a symmetric-edge predicate over a two-node cycle, queried
/// with a free variable, enumerates both members of the universe.
#[test]
fn scenario_5_symmetric_predicate_over_a_cycle() {
    let program = Program::new(vec![
        Clause::fact(Atom::new(encode_str("t"), vec![cst("a"), cst("b")])),
        Clause::fact(Atom::new(encode_str("t"), vec![cst("b"), cst("a")])),
        Clause::rule(
            Atom::new(encode_str("s"), vec![var("X")]),
            vec![
                Atom::new(encode_str("t"), vec![var("X"), var("Y")]),
                Atom::new(encode_str("t"), vec![var("Y"), var("X")]),
            ],
        ),
    ]);
    let query = Clause::fact(Atom::new(encode_str("s"), vec![var("X")]));

    let mut compiled = Compiled::compile(&program).unwrap();
    let bindings = compiled.attach_query(&query).unwrap();

    let mut solver = ScriptedSolver::new(
        vec![CheckResult::Sat, CheckResult::Sat, CheckResult::Unsat],
        vec![vec!["a"], vec!["b"]],
    );
    let mut answers = Vec::new();
    let report = compiled
        .solve(&mut solver, &bindings, 1000, |w| {
            answers.push(witness_values(&bindings, w))
        })
        .unwrap();

    assert_eq!(report, tym::reports::Report::Exhausted);
    assert_eq!(answers, vec![vec!["a".to_string()], vec!["b".to_string()]]);
}

/// Scenario 6: an empty program is devoid of clauses, a fatal error
/// regardless of which function the driver asked for.
#[test]
fn scenario_6_empty_program_is_devoid_of_clauses() {
    let program = Program::new(vec![]);
    let err = Compiled::compile(&program).unwrap_err();
    assert_eq!(err, ErrorKind::DevoidOfClauses);
}
