/*!
Compiles a Datalog program, plus an optional query, into an equisatisfiable
first-order theory in SMT-LIB2 form, and can drive an external SMT solver to
enumerate every valuation of the query's free variables the program
entails.

```no_run
use tym::ast::{Atom, Clause, Program, Term};
use tym::intern::encode_str;
use tym::solver::external::ExternalSolver;
use tym::solver::Solver;

// p(a). p(b).
let program = Program::new(vec![
    Clause::fact(Atom::new(encode_str("p"), vec![Term::Const(encode_str("a"))])),
    Clause::fact(Atom::new(encode_str("p"), vec![Term::Const(encode_str("b"))])),
]);

// p(X)?
let query = Clause::fact(Atom::new(encode_str("p"), vec![Term::Var(encode_str("X"))]));

let mut compiled = tym::Compiled::compile(&program).unwrap();
let bindings = compiled.attach_query(&query).unwrap();

let mut solver = ExternalSolver::new("z3");
let report = compiled
    .solve(&mut solver, &bindings, 10_000, |witness| {
        println!("{witness:?}");
    })
    .unwrap();
println!("{report}");
```
*/

pub mod ast;
pub mod config;
pub mod db;
pub mod formula;
pub mod intern;
pub mod model;
pub mod order;
pub mod query;
pub mod reports;
pub mod solver;
pub mod sym_gen;
pub mod translate;
pub mod types;

use ast::Program;
use config::Config;
use db::AtomDatabase;
use model::Model;
use query::QueryBinding;
use reports::Report;
use solver::{enumerate_models, Solver};
use sym_gen::SymGen;
use types::err::ErrorKind;

/// The state produced by [Compiled::compile]: the predicate database (kept
/// around so a query can be checked against the same universe the program
/// built), the statement model under construction, and the fresh-name
/// generator the query stage continues from so its minted constants never
/// collide with any head-abstraction variable the translator already used.
pub struct Compiled {
    pub db: AtomDatabase,
    pub model: Model,
    gen: SymGen,
}

impl Compiled {
    /// Runs C2 (well, the AST is already built) through C7: registers every
    /// clause, translates each predicate, and assembles the statement model
    /// with its universe preamble. An empty program is a fatal error per
    /// §7 ("devoid of clauses").
    pub fn compile(program: &Program) -> Result<Self, ErrorKind> {
        if program.is_empty() {
            return Err(ErrorKind::DevoidOfClauses);
        }

        let mut db = AtomDatabase::new();
        for clause in &program.clauses {
            db.add_clause(clause)?;
        }

        let mut gen = SymGen::new("V");
        let axioms = translate::translate_program(&db, &mut gen)?;

        let universe = db.terms.universe().to_vec();
        let mut model = Model::new(universe).with_universe_preamble();
        for axiom in axioms {
            model.push(axiom);
        }

        Ok(Compiled { db, model, gen })
    }

    /// Runs C9: translates `query` against the already-compiled universe,
    /// appends its constant declarations and axiom to the model, and
    /// returns the variable↔constant bindings the solver loop needs.
    pub fn attach_query(&mut self, query: &ast::Clause) -> Result<Vec<QueryBinding>, ErrorKind> {
        let translated = query::translate_query(query, &self.db.terms, &mut self.gen)?;
        for decl in translated.const_decls {
            self.model.push(decl);
        }
        self.model.push(translated.axiom);
        Ok(translated.bindings)
    }

    /// Runs C8 alone: returns the statement list in declaration order,
    /// without touching a solver. Used by CLI modes that only want the
    /// SMT-LIB2 text (`smt_output`) rather than a full solve.
    pub fn ordered_model(&self) -> Result<Model, ErrorKind> {
        let mut model = self.model.clone();
        model.statements = order::order_statements(model.statements)?;
        Ok(model)
    }

    /// Runs C8 (via [solver::enumerate_models]) and C10: orders the
    /// statement list, hands it to `solver`, and enumerates every witness.
    pub fn solve(
        &self,
        solver: &mut dyn Solver,
        bindings: &[QueryBinding],
        timeout_ms: u64,
        on_witness: impl FnMut(&solver::Witness),
    ) -> Result<Report, ErrorKind> {
        let report = enumerate_models(solver, self.model.clone(), bindings, timeout_ms, on_witness)
            .map_err(ErrorKind::Solver)?;
        Ok(report.into())
    }
}

/// The whole pipeline behind one `config`: compile `program`, attach `query`
/// if given, and run the model-enumeration loop against `solver`. The single
/// entry point a driver that only wants an end-to-end answer needs, mirroring
/// `Context::from_config(Config)` in spirit — `config` supplies the solver
/// timeout here, and is otherwise threaded through by the caller (a CLI picks
/// `model_output` and `solver_path` out of the same `Config` to build
/// `solver` and format `on_witness`'s output).
pub fn compile_and_solve(
    config: &Config,
    program: &Program,
    query: Option<&ast::Clause>,
    solver: &mut dyn Solver,
    on_witness: impl FnMut(&solver::Witness),
) -> Result<Report, ErrorKind> {
    let mut compiled = Compiled::compile(program)?;
    let bindings = match query {
        Some(q) => compiled.attach_query(q)?,
        None => Vec::new(),
    };
    compiled.solve(
        solver,
        &bindings,
        config.solver_timeout.as_millis() as u64,
        on_witness,
    )
}
