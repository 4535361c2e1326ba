/*!
Fresh-name generation, with checkpoint/restore in place of the
pointer-shared generator-copying the original implementation used: a
[SymGen::snapshot] is a plain value, and [SymGen::restore] resets the
counter to one, so callers never hold two live mutable aliases to the same
generator.
*/

use crate::ast::Term;
use crate::intern::{self, Str};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Checkpoint(u64);

#[derive(Clone, Debug)]
pub struct SymGen {
    prefix: String,
    counter: u64,
}

impl SymGen {
    pub fn new(prefix: impl Into<String>) -> Self {
        SymGen {
            prefix: prefix.into(),
            counter: 0,
        }
    }

    /// Mints and interns a fresh name, advancing the counter.
    pub fn new_var(&mut self) -> Str {
        let name = format!("{}{}", self.prefix, self.counter);
        self.counter += 1;
        intern::encode_str(&name)
    }

    /// Mints a fresh variable `Term`.
    pub fn new_var_term(&mut self) -> Term {
        Term::Var(self.new_var())
    }

    /// Mints a fresh constant `Term` (used for query abstraction, C9).
    pub fn new_const_term(&mut self) -> Term {
        Term::Const(self.new_var())
    }

    pub fn snapshot(&self) -> Checkpoint {
        Checkpoint(self.counter)
    }

    pub fn restore(&mut self, chk: Checkpoint) {
        self.counter = chk.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn successive_names_are_distinct() {
        let mut g = SymGen::new("V");
        let a = g.new_var();
        let b = g.new_var();
        assert_ne!(a, b);
    }

    #[test]
    fn restore_replays_the_same_names() {
        let mut g = SymGen::new("V");
        let chk = g.snapshot();
        let a = g.new_var();
        g.restore(chk);
        let b = g.new_var();
        assert_eq!(a, b);
    }

    #[test]
    fn prefix_is_honored() {
        let mut g = SymGen::new("c");
        assert_eq!(intern::decode(g.new_var()), "c0");
    }
}
