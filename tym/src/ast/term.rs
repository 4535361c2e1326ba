use crate::intern::{self, Str};
use crate::types::err::TranslateError;
use std::fmt;

/// A single term appearing in an atom: a variable, a constant, or a quoted
/// string literal. All three carry an interned identifier; what varies is
/// how the identifier is interpreted.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Term {
    Var(Str),
    Const(Str),
    Str(Str),
}

impl Term {
    pub fn id(&self) -> Str {
        match self {
            Term::Var(s) | Term::Const(s) | Term::Str(s) => *s,
        }
    }

    pub fn is_var(&self) -> bool {
        matches!(self, Term::Var(_))
    }

    pub fn is_const(&self) -> bool {
        matches!(self, Term::Const(_))
    }

    /// Structural equality with a distinguished third outcome: two terms
    /// sharing an identifier but differing in kind is a malformed-input
    /// condition the caller must not silently paper over.
    pub fn eq_checked(&self, other: &Term) -> Result<bool, TranslateError> {
        if self.id() == other.id() {
            let same_kind = std::mem::discriminant(self) == std::mem::discriminant(other);
            if same_kind {
                Ok(true)
            } else {
                Err(TranslateError::TermKindConflict {
                    name: intern::decode(self.id()),
                })
            }
        } else {
            Ok(false)
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Var(s) | Term::Const(s) => write!(f, "{}", intern::decode(*s)),
            Term::Str(s) => write!(f, "\"{}\"", intern::decode(*s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_kind_same_id_is_equal() {
        let a = Term::Const(intern::encode_str("x"));
        let b = Term::Const(intern::encode_str("x"));
        assert_eq!(a.eq_checked(&b), Ok(true));
    }

    #[test]
    fn different_kind_same_id_is_a_conflict() {
        let a = Term::Var(intern::encode_str("shared"));
        let b = Term::Const(intern::encode_str("shared"));
        assert!(a.eq_checked(&b).is_err());
    }

    #[test]
    fn different_id_is_unequal() {
        let a = Term::Const(intern::encode_str("x"));
        let b = Term::Const(intern::encode_str("y"));
        assert_eq!(a.eq_checked(&b), Ok(false));
    }
}
