//! File loading helpers, in the shape of `otter_cli`'s `load_dimacs`: read
//! the whole file, hand it to the parser, map I/O and parse failures to
//! distinct outcomes so the driver can choose the right exit code.

use std::path::Path;

use tym::ast::Program;
use tym::types::err::ParseError;

/// What can go wrong loading a program file, kept distinct from
/// [tym::types::err::ErrorKind] since "the file doesn't exist" (exit code 2,
/// "no input") and "the file parsed but is malformed" (exit code 3,
/// "invalid input") are different CLI outcomes even though the core only
/// cares about the latter.
pub enum LoadError {
    Io(std::io::Error),
    Parse(ParseError),
}

pub fn load_program(path: &Path) -> Result<Program, LoadError> {
    let text = std::fs::read_to_string(path).map_err(LoadError::Io)?;
    parser::parse_program(&text).map_err(LoadError::Parse)
}

use crate::parser;
