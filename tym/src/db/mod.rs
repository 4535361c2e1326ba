/*!
The term and atom databases (C5): the Herbrand universe under construction,
and a predicate index keyed by `(name, arity)` holding each predicate's
clause bodies.
*/

mod atom_db;
mod term_db;

pub use atom_db::{AtomDatabase, PredicateEntry};
pub use term_db::TermDatabase;
