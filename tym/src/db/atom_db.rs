use super::term_db::TermDatabase;
use crate::ast::{Atom, Clause};
use crate::intern::{self, Str};
use crate::types::err::TranslateError;
use std::collections::HashMap;

/// Everything known about one predicate: its identity (name, arity) and the
/// clauses whose head matches it.
#[derive(Debug, Default, Clone)]
pub struct PredicateEntry {
    pub name: Str,
    pub arity: usize,
    pub clauses: Vec<Clause>,
}

/// The term database (Herbrand universe) plus a predicate index keyed by
/// `(name, arity)`. A predicate sharing a name with a different arity is an
/// arity conflict, reported rather than silently merged.
#[derive(Default)]
pub struct AtomDatabase {
    pub terms: TermDatabase,
    predicates: HashMap<(Str, usize), PredicateEntry>,
    /// Tracks every arity seen for a given name, to report conflicts.
    arities_by_name: HashMap<Str, usize>,
}

impl AtomDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn member(&self, pred: Str, arity: usize) -> Option<&PredicateEntry> {
        self.predicates.get(&(pred, arity))
    }

    fn check_arity(&mut self, pred: Str, arity: usize) -> Result<(), TranslateError> {
        match self.arities_by_name.get(&pred) {
            Some(&existing) if existing != arity => Err(TranslateError::ArityConflict {
                name: intern::decode(pred),
                first: existing,
                second: arity,
            }),
            Some(_) => Ok(()),
            None => {
                self.arities_by_name.insert(pred, arity);
                Ok(())
            }
        }
    }

    /// Finds or creates the predicate entry for `atom`, registering every
    /// argument term into the term database.
    pub fn add_atom(&mut self, atom: &Atom) -> Result<&mut PredicateEntry, TranslateError> {
        self.check_arity(atom.pred, atom.arity())?;
        for t in &atom.terms {
            self.terms.add(t);
        }
        Ok(self
            .predicates
            .entry((atom.pred, atom.arity()))
            .or_insert_with(|| PredicateEntry {
                name: atom.pred,
                arity: atom.arity(),
                clauses: Vec::new(),
            }))
    }

    /// Registers a clause's head predicate, appends the clause to that
    /// predicate's body list, and registers every argument term from both
    /// head and body.
    pub fn add_clause(&mut self, clause: &Clause) -> Result<(), TranslateError> {
        self.add_atom(&clause.head)?.clauses.push(clause.clone());
        for b in &clause.body {
            self.add_atom(b)?;
        }
        Ok(())
    }

    /// Every registered predicate, in an unspecified but stable order
    /// (insertion order of `(name, arity)` keys is not guaranteed by
    /// `HashMap`; callers that need a deterministic order, such as the CLI's
    /// `dump_atoms` mode, should sort by name).
    pub fn predicates(&self) -> impl Iterator<Item = &PredicateEntry> {
        self.predicates.values()
    }
}
