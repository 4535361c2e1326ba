/*!
The concrete [Solver](super::Solver) backend this crate ships: a subprocess
speaking SMT-LIB2 over stdin/stdout, in the manner of `z3 -in`. No FFI
binding to a solver library is introduced; everything here is a thin text
pipe, matching the abstract interface one-for-one.
*/

use super::{CheckResult, EquivClass, Solver};
use crate::intern::{self, Str};
use crate::types::err::SolverError;
use std::collections::HashMap;
use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

pub struct ExternalSolver {
    path: std::path::PathBuf,
    process: Option<Child>,
    stdin: Option<ChildStdin>,
    stdout: Option<BufReader<ChildStdout>>,
}

impl ExternalSolver {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        ExternalSolver {
            path: path.into(),
            process: None,
            stdin: None,
            stdout: None,
        }
    }

    fn write_line(&mut self, line: &str) -> Result<(), SolverError> {
        let stdin = self.stdin.as_mut().ok_or_else(not_begun)?;
        log::trace!("solver <= {line}");
        writeln!(stdin, "{line}")?;
        stdin.flush()?;
        Ok(())
    }

    fn read_line(&mut self) -> Result<String, SolverError> {
        let stdout = self.stdout.as_mut().ok_or_else(not_begun)?;
        let mut buf = String::new();
        loop {
            buf.clear();
            let n = stdout.read_line(&mut buf)?;
            if n == 0 {
                return Err(SolverError::Protocol("solver closed its output".into()));
            }
            let trimmed = buf.trim();
            if !trimmed.is_empty() {
                log::trace!("solver => {trimmed}");
                return Ok(trimmed.to_string());
            }
        }
    }
}

fn not_begun() -> SolverError {
    SolverError::Protocol("solver session has not been begun".into())
}

impl Solver for ExternalSolver {
    fn begin(&mut self, timeout_ms: u64) -> Result<(), SolverError> {
        if self.process.is_some() {
            return Err(SolverError::AlreadyBegun);
        }
        let mut child = Command::new(&self.path)
            .arg("-in")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()?;
        let stdin = child.stdin.take().expect("piped stdin");
        let stdout = BufReader::new(child.stdout.take().expect("piped stdout"));
        self.process = Some(child);
        self.stdin = Some(stdin);
        self.stdout = Some(stdout);
        self.write_line(&format!("(set-option :timeout {timeout_ms})"))?;
        Ok(())
    }

    fn assert_text(&mut self, smtlib2: &str) -> Result<(), SolverError> {
        self.write_line(smtlib2)
    }

    fn check(&mut self) -> Result<CheckResult, SolverError> {
        self.write_line("(check-sat)")?;
        match self.read_line()?.as_str() {
            "sat" => Ok(CheckResult::Sat),
            "unsat" => Ok(CheckResult::Unsat),
            "unknown" => Ok(CheckResult::Unknown),
            other => Err(SolverError::Protocol(format!(
                "unexpected check-sat reply: {other}"
            ))),
        }
    }

    fn get_const_interpretations(&mut self, consts: &[Str]) -> Result<Vec<EquivClass>, SolverError> {
        if consts.is_empty() {
            return Ok(Vec::new());
        }
        let names: Vec<String> = consts.iter().map(|c| intern::decode(*c)).collect();
        self.write_line(&format!("(get-value ({}))", names.join(" ")))?;
        let reply = self.read_line()?;
        let values = parse_get_value_reply(&reply, &names)?;
        Ok(build_equiv_classes(consts, &values))
    }

    fn end(&mut self) -> Result<(), SolverError> {
        if let Some(mut stdin) = self.stdin.take() {
            let _ = writeln!(stdin, "(exit)");
        }
        self.stdout = None;
        if let Some(mut child) = self.process.take() {
            let _ = child.wait();
        }
        Ok(())
    }
}

impl Drop for ExternalSolver {
    fn drop(&mut self) {
        if self.process.is_some() {
            let _ = self.end();
        }
    }
}

/// Groups `consts` by their reported `values` (same index in both slices)
/// into one [EquivClass] per constant. Each class also carries the reported
/// value token itself, interned — the actual universe element the solver
/// identified the constant with — so a class still has a member once
/// [super::pick_witness] filters every fresh query constant out of it.
fn build_equiv_classes(consts: &[Str], values: &[String]) -> Vec<EquivClass> {
    let mut by_value: HashMap<&String, Vec<Str>> = HashMap::new();
    for (c, v) in consts.iter().zip(values) {
        by_value
            .entry(v)
            .or_insert_with(|| vec![intern::encode_str(v)])
            .push(*c);
    }
    consts
        .iter()
        .zip(values)
        .map(|(_, v)| EquivClass {
            members: by_value[v].clone(),
        })
        .collect()
}

/// Parses a `(get-value (...))` reply of the form
/// `((c0 a) (c1 b) ...)` into the value token for each requested name, in
/// the same order as `names`.
fn parse_get_value_reply(reply: &str, names: &[String]) -> Result<Vec<String>, SolverError> {
    let mut pairs: HashMap<String, String> = HashMap::new();
    // depth 0: outside everything; depth 1: inside the outer `(...)` list;
    // depth >= 2: inside one `(name value)` pair, where its text is collected.
    let mut depth = 0i32;
    let mut current = String::new();
    let mut entries = Vec::new();
    for ch in reply.chars() {
        match ch {
            '(' => {
                depth += 1;
                if depth > 2 {
                    current.push(ch);
                }
            }
            ')' => {
                if depth > 2 {
                    current.push(ch);
                }
                depth -= 1;
                if depth == 1 && !current.trim().is_empty() {
                    entries.push(current.trim().to_string());
                    current.clear();
                }
            }
            _ => {
                if depth >= 2 {
                    current.push(ch);
                }
            }
        }
    }
    for entry in entries {
        let mut parts = entry.splitn(2, char::is_whitespace);
        let name = parts.next().unwrap_or_default().to_string();
        let value = parts.next().unwrap_or_default().trim().to_string();
        pairs.insert(name, value);
    }
    names
        .iter()
        .map(|n| {
            pairs
                .get(n)
                .cloned()
                .ok_or_else(|| SolverError::Protocol(format!("no value reported for '{n}'")))
        })
        .collect()
}
