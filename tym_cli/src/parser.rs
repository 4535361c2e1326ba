//! A small hand-written recursive-descent parser for the Datalog surface
//! syntax of the external interface: `head.` or `head :- atom1, ...` clauses,
//! one per statement, `%`-prefixed line comments, uppercase-leading
//! identifiers as variables, double-quoted literals as string terms.

use tym::ast::{Atom, Clause, Program, Term};
use tym::intern::encode_str;
use tym::types::err::ParseError;

struct Lexer<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    fn new(src: &'a str) -> Self {
        Lexer { src, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn skip_trivia(&mut self) {
        loop {
            let rest = self.rest();
            let trimmed = rest.trim_start();
            self.pos += rest.len() - trimmed.len();
            if self.rest().starts_with('%') {
                let line_end = self.rest().find('\n').unwrap_or(self.rest().len());
                self.pos += line_end;
                continue;
            }
            break;
        }
    }

    fn peek_char(&mut self) -> Option<char> {
        self.skip_trivia();
        self.rest().chars().next()
    }

    fn expect_char(&mut self, c: char) -> Result<(), ParseError> {
        self.skip_trivia();
        if self.rest().starts_with(c) {
            self.pos += c.len_utf8();
            Ok(())
        } else {
            Err(ParseError::UnexpectedToken {
                offset: self.pos,
                message: format!("expected '{c}'"),
            })
        }
    }

    fn parse_ident(&mut self) -> Result<String, ParseError> {
        self.skip_trivia();
        let rest = self.rest();
        let end = rest
            .find(|c: char| !(c.is_alphanumeric() || c == '_'))
            .unwrap_or(rest.len());
        if end == 0 {
            return Err(ParseError::UnexpectedToken {
                offset: self.pos,
                message: "expected an identifier".to_string(),
            });
        }
        let ident = rest[..end].to_string();
        self.pos += end;
        Ok(ident)
    }

    fn parse_quoted(&mut self) -> Result<String, ParseError> {
        self.expect_char('"')?;
        let rest = self.rest();
        let end = rest.find('"').ok_or_else(|| ParseError::UnexpectedEof {
            message: "unterminated string literal".to_string(),
        })?;
        let s = rest[..end].to_string();
        self.pos += end + 1;
        Ok(s)
    }

    fn parse_term(&mut self) -> Result<Term, ParseError> {
        match self.peek_char() {
            Some('"') => Ok(Term::Str(encode_str(&self.parse_quoted()?))),
            Some(c) if c.is_alphabetic() || c == '_' => {
                let ident = self.parse_ident()?;
                if ident.chars().next().unwrap().is_uppercase() {
                    Ok(Term::Var(encode_str(&ident)))
                } else {
                    Ok(Term::Const(encode_str(&ident)))
                }
            }
            Some(_) => Err(ParseError::UnexpectedToken {
                offset: self.pos,
                message: "expected a term".to_string(),
            }),
            None => Err(ParseError::UnexpectedEof {
                message: "expected a term".to_string(),
            }),
        }
    }

    fn parse_atom(&mut self) -> Result<Atom, ParseError> {
        let name = self.parse_ident()?;
        self.expect_char('(')?;
        let mut terms = Vec::new();
        if self.peek_char() != Some(')') {
            terms.push(self.parse_term()?);
            while self.peek_char() == Some(',') {
                self.expect_char(',')?;
                terms.push(self.parse_term()?);
            }
        }
        self.expect_char(')')?;
        Ok(Atom::new(encode_str(&name), terms))
    }

    fn parse_clause(&mut self) -> Result<Clause, ParseError> {
        let head = self.parse_atom()?;
        let body = if self.peek_char() == Some(':') {
            self.expect_char(':')?;
            self.expect_char('-')?;
            let mut atoms = vec![self.parse_atom()?];
            while self.peek_char() == Some(',') {
                self.expect_char(',')?;
                atoms.push(self.parse_atom()?);
            }
            atoms
        } else {
            Vec::new()
        };
        self.expect_char('.')?;
        Ok(Clause::rule(head, body))
    }
}

/// Parses a whole Datalog source file into a [Program]. An input that is
/// empty (after whitespace/comment stripping) yields a `Program` with zero
/// clauses, which the driver treats as "devoid of clauses".
pub fn parse_program(src: &str) -> Result<Program, ParseError> {
    let mut lexer = Lexer::new(src);
    let mut clauses = Vec::new();
    while lexer.peek_char().is_some() {
        clauses.push(lexer.parse_clause()?);
    }
    Ok(Program::new(clauses))
}

/// Parses a single query clause, e.g. `path(a, Z)`. The trailing `.` or `?`
/// terminator, if present, is optional and stripped before parsing so the
/// CLI can accept either Datalog-rule-style or question-style query text.
pub fn parse_query(src: &str) -> Result<Clause, ParseError> {
    let trimmed = src.trim();
    let trimmed = trimmed.trim_end_matches(['.', '?']);
    let mut lexer = Lexer::new(trimmed);
    lexer.parse_atom().map(Clause::fact)
}
