use super::term::Term;
use crate::intern::{self, Str};
use std::fmt;

/// A predicate application: a name plus an ordered list of terms. Two atoms
/// sharing a name but differing in arity denote *different* predicates;
/// unifying them is an error the database layer (C5) surfaces.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Atom {
    pub pred: Str,
    pub terms: Vec<Term>,
}

impl Atom {
    pub fn new(pred: Str, terms: Vec<Term>) -> Self {
        Atom { pred, terms }
    }

    pub fn arity(&self) -> usize {
        self.terms.len()
    }

    pub fn name(&self) -> String {
        intern::decode(self.pred)
    }

    /// Variables appearing anywhere in this atom's argument list, in
    /// first-occurrence order, without duplicates.
    pub fn vars(&self) -> Vec<Term> {
        let mut out = Vec::new();
        for t in &self.terms {
            if t.is_var() && !out.contains(t) {
                out.push(*t);
            }
        }
        out
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", intern::decode(self.pred))?;
        for (i, t) in self.terms.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{t}")?;
        }
        write!(f, ")")
    }
}
