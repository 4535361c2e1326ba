/*!
The abstract syntax tree for Datalog clauses and programs: terms, atoms,
clauses, and programs, all deep-owned trees (Rust's ordinary `Clone` gives
the deep-copy semantics this layer wants — there is no aliasing to worry
about).
*/

mod atom;
mod clause;
mod program;
mod term;

pub use atom::Atom;
pub use clause::Clause;
pub use program::Program;
pub use term::Term;
