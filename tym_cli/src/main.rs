//! Command-line front end: parses the arguments documented in the crate's
//! external interface, loads and parses a Datalog program (and optional
//! query), and drives one of the core's functions against it.
//!
//! This binary is pure plumbing around [tym]: the CLI itself never builds a
//! term, a formula, or a statement — it only loads text, calls into the
//! core, and prints what comes back.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::{value_parser, Arg, ArgAction, Command};

use tym::ast::{Clause, Term};
use tym::config::{Config, ModelOutput};
use tym::intern;
use tym::model::Statement;
use tym::solver::external::ExternalSolver;
use tym::solver::Witness;
use tym::types::err::ErrorKind;
use tym::{compile_and_solve, Compiled};

mod misc;
mod parser;

use misc::LoadError;

/// Exit codes documented in the external interface (§6).
mod exit {
    pub const AOK: i32 = 0;
    pub const UNRECOGNIZED_PARAMETER: i32 = 1;
    pub const NO_INPUT: i32 = 2;
    pub const INVALID_INPUT: i32 = 3;
    pub const SOLVER_GAVE_UP: i32 = 4;
    pub const TIMESTAMP_ERROR: i32 = 5;
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Function {
    Nothing,
    TestParsing,
    SmtOutput,
    SmtSolve,
    COutput,
    DumpHilbertUniverse,
    DumpAtoms,
}

impl Function {
    const NAMES: &'static [(&'static str, Function)] = &[
        ("nothing", Function::Nothing),
        ("test_parsing", Function::TestParsing),
        ("smt_output", Function::SmtOutput),
        ("smt_solve", Function::SmtSolve),
        ("c_output", Function::COutput),
        ("dump_hilbert_universe", Function::DumpHilbertUniverse),
        ("dump_atoms", Function::DumpAtoms),
    ];

    fn parse(s: &str) -> Option<Self> {
        Self::NAMES.iter().find(|(n, _)| *n == s).map(|(_, f)| *f)
    }

    fn joined_names() -> String {
        Self::NAMES
            .iter()
            .map(|(n, _)| *n)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn parse_model_output(s: &str) -> Option<ModelOutput> {
    match s {
        "valuation" => Some(ModelOutput::Valuation),
        "fact" => Some(ModelOutput::Fact),
        "all" => Some(ModelOutput::All),
        _ => None,
    }
}

fn cli() -> Command {
    Command::new("tym")
        .about("Compiles a Datalog program and query into SMT-LIB2 and, optionally, enumerates the query's answers with an external solver.")
        .arg(
            Arg::new("input_file")
                .short('i')
                .long("input_file")
                .required(true)
                .value_parser(value_parser!(PathBuf))
                .help("Datalog program source."),
        )
        .arg(
            Arg::new("query")
                .short('q')
                .long("query")
                .required(false)
                .help("Single-clause query, e.g. 'path(a, Z)'."),
        )
        .arg(
            Arg::new("function")
                .short('f')
                .long("function")
                .required(true)
                .help(format!("One of: {}", Function::joined_names())),
        )
        .arg(
            Arg::new("model_output")
                .short('m')
                .long("model_output")
                .required(false)
                .default_value("valuation")
                .help("One of: valuation, fact, all."),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .required(false),
        )
        .arg(
            Arg::new("max_var_width")
                .long("max_var_width")
                .required(false)
                .default_value("9")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("solver_timeout")
                .long("solver_timeout")
                .required(false)
                .default_value("10000")
                .value_parser(value_parser!(u64))
                .help("Milliseconds."),
        )
}

fn main() {
    #[cfg(feature = "log")]
    env_logger::init();

    let matches = match cli().try_get_matches() {
        Ok(m) => m,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(exit::UNRECOGNIZED_PARAMETER);
        }
    };

    let verbose = matches.get_flag("verbose");
    let input_file = matches.get_one::<PathBuf>("input_file").expect("required");
    let query_text = matches.get_one::<String>("query");
    let function_arg = matches.get_one::<String>("function").expect("required");
    let model_output_arg = matches
        .get_one::<String>("model_output")
        .expect("has a default");
    let max_var_width = *matches
        .get_one::<usize>("max_var_width")
        .expect("has a default");
    let solver_timeout_ms = *matches
        .get_one::<u64>("solver_timeout")
        .expect("has a default");

    let Some(function) = Function::parse(function_arg) else {
        eprintln!("Unrecognized function: {function_arg}");
        std::process::exit(exit::UNRECOGNIZED_PARAMETER);
    };
    let Some(model_output) = parse_model_output(model_output_arg) else {
        eprintln!("Unrecognized model-output: {model_output_arg}");
        std::process::exit(exit::UNRECOGNIZED_PARAMETER);
    };

    let config = Config {
        max_var_width,
        solver_timeout: std::time::Duration::from_millis(solver_timeout_ms),
        model_output,
        ..Config::default()
    };

    if verbose {
        eprintln!("input_file = {}", input_file.display());
        eprintln!("query = {:?}", query_text);
        eprintln!("function = {function_arg}");
        eprintln!("model_output = {model_output_arg}");
        eprintln!("max_var_width = {max_var_width}");
        eprintln!("solver_timeout = {solver_timeout_ms}");
        if let Err(e) = SystemTime::now().duration_since(UNIX_EPOCH) {
            eprintln!("system clock is before the Unix epoch: {e}");
            std::process::exit(exit::TIMESTAMP_ERROR);
        }
    }

    let program = match misc::load_program(input_file) {
        Ok(p) => p,
        Err(LoadError::Io(e)) => {
            eprintln!("Could not read '{}': {e}", input_file.display());
            std::process::exit(exit::NO_INPUT);
        }
        Err(LoadError::Parse(e)) => {
            eprintln!("Failed to parse '{}': {e}", input_file.display());
            std::process::exit(exit::INVALID_INPUT);
        }
    };

    let query: Option<Clause> = match query_text {
        Some(q) => match parser::parse_query(q) {
            Ok(c) => Some(c),
            Err(e) => {
                eprintln!("Failed to parse query '{q}': {e}");
                std::process::exit(exit::INVALID_INPUT);
            }
        },
        None => None,
    };

    if let Function::TestParsing = function {
        print!("{program}");
        if let Some(q) = &query {
            println!("{q}");
        }
        std::process::exit(exit::AOK);
    }

    if let Function::Nothing = function {
        std::process::exit(exit::AOK);
    }

    if let Function::SmtSolve = function {
        let mut solver = ExternalSolver::new(config.solver_path.clone());
        let result = compile_and_solve(&config, &program, query.as_ref(), &mut solver, |witness| {
            print_witness(query.as_ref(), witness, model_output);
        });

        match result {
            Ok(report) => {
                if verbose {
                    eprintln!("{report}");
                }
                match report {
                    tym::reports::Report::Exhausted => std::process::exit(exit::AOK),
                    tym::reports::Report::GaveUp => std::process::exit(exit::SOLVER_GAVE_UP),
                }
            }
            Err(e) => report_compile_error(e),
        }
    }

    // Every remaining function needs the compiled model but never drives a
    // solver, so they share one `Compiled` built once here.
    let mut compiled = match Compiled::compile(&program) {
        Ok(c) => c,
        Err(e) => report_compile_error(e),
    };

    match function {
        Function::DumpHilbertUniverse => {
            for elt in compiled.db.terms.universe() {
                println!("{elt}");
            }
            std::process::exit(exit::AOK);
        }
        Function::DumpAtoms => {
            let mut entries: Vec<_> = compiled.db.predicates().collect();
            entries.sort_by(|a, b| intern::cmp(a.name, b.name).then_with(|| a.arity.cmp(&b.arity)));
            for entry in entries {
                println!("{}/{}", intern::decode(entry.name), entry.arity);
                for clause in &entry.clauses {
                    println!("  {clause}");
                }
            }
            std::process::exit(exit::AOK);
        }
        Function::SmtOutput => {
            if let Some(q) = &query {
                if let Err(e) = compiled.attach_query(q) {
                    report_compile_error(e);
                }
            }
            match compiled.ordered_model() {
                Ok(model) => print!("{model}"),
                Err(e) => {
                    eprintln!("{e}");
                    std::process::exit(exit::INVALID_INPUT);
                }
            }
            std::process::exit(exit::AOK);
        }
        Function::COutput => {
            print_annotated_dump(&compiled);
            std::process::exit(exit::AOK);
        }
        Function::Nothing | Function::TestParsing | Function::SmtSolve => {
            unreachable!("handled above")
        }
    }
}

/// `c_output`: a human-readable, comment-annotated dump of each predicate's
/// compiled `ConstDef` axiom, paired with the source clauses it summarizes.
/// Repurposes the distilled spec's "emit as systems-language source" back-end
/// as an explain mode, since literal source-code emission has no natural
/// audience in this crate (§11, Open Question 3).
fn print_annotated_dump(compiled: &Compiled) {
    let mut entries: Vec<_> = compiled.db.predicates().collect();
    entries.sort_by(|a, b| intern::cmp(a.name, b.name).then_with(|| a.arity.cmp(&b.arity)));

    for entry in entries {
        println!(
            "; {}/{} — {} clause(s)",
            intern::decode(entry.name),
            entry.arity,
            entry.clauses.len()
        );
        for clause in &entry.clauses {
            println!(";   {clause}");
        }
        let axiom = compiled
            .model
            .statements
            .iter()
            .find(|s| matches!(s, Statement::ConstDef { name, .. } if *name == entry.name));
        match axiom {
            Some(stmt) => println!("{stmt}"),
            None => println!("; (no axiom emitted)"),
        }
        println!();
    }
}

fn report_compile_error(e: ErrorKind) -> ! {
    if let ErrorKind::DevoidOfClauses = e {
        eprintln!("program is devoid of clauses");
    } else {
        eprintln!("{e}");
    }
    std::process::exit(exit::INVALID_INPUT);
}

/// Prints one enumerated model according to `mode`: the raw valuation, the
/// query clause instantiated as a Datalog fact, or both.
fn print_witness(query: Option<&Clause>, witness: &Witness, mode: ModelOutput) {
    if matches!(mode, ModelOutput::Valuation | ModelOutput::All) {
        let rendered: Vec<String> = witness
            .bindings
            .iter()
            .map(|(var, val)| format!("{} = {val}", intern::decode(*var)))
            .collect();
        println!("{}", rendered.join(", "));
    }
    if matches!(mode, ModelOutput::Fact | ModelOutput::All) {
        if let Some(q) = query {
            let terms: Vec<Term> = q
                .head
                .terms
                .iter()
                .map(|t| match t {
                    Term::Var(name) => witness
                        .bindings
                        .iter()
                        .find(|(var, _)| var == name)
                        .map(|(_, val)| *val)
                        .unwrap_or(*t),
                    other => *other,
                })
                .collect();
            let fact = Clause::fact(tym::ast::Atom::new(q.head.pred, terms));
            println!("{fact}");
        }
    }
}
