use crate::ast::Term;
use crate::intern::Str;
use std::collections::HashSet;

/// The Herbrand universe under construction: the distinct `Const` terms
/// seen so far, in first-insertion order. `Var` and `Str` terms are not
/// universe members and are ignored by [TermDatabase::add].
#[derive(Default, Debug)]
pub struct TermDatabase {
    seen: HashSet<Str>,
    universe: Vec<Term>,
}

impl TermDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `t`. Only `Const` terms join the universe; inserting the
    /// same constant twice is a no-op (the universe stays deduplicated).
    pub fn add(&mut self, t: &Term) {
        if let Term::Const(id) = t {
            if self.seen.insert(*id) {
                self.universe.push(*t);
            }
        }
    }

    pub fn contains(&self, t: &Term) -> bool {
        match t {
            Term::Const(id) => self.seen.contains(id),
            _ => false,
        }
    }

    /// The universe in first-insertion order.
    pub fn universe(&self) -> &[Term] {
        &self.universe
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intern::encode_str;

    #[test]
    fn universe_is_deduplicated_and_preserves_insertion_order() {
        let mut db = TermDatabase::new();
        db.add(&Term::Const(encode_str("b")));
        db.add(&Term::Const(encode_str("a")));
        db.add(&Term::Const(encode_str("b")));
        let names: Vec<String> = db.universe().iter().map(|t| t.to_string()).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn vars_and_strs_are_ignored() {
        let mut db = TermDatabase::new();
        db.add(&Term::Var(encode_str("X")));
        db.add(&Term::Str(encode_str("hi")));
        assert!(db.universe().is_empty());
    }
}
