/*!
Query translation (C9): turns a single query clause into a ground(-ish)
axiom by replacing every free variable with a fresh constant, and records
the variable↔constant map the solver loop consumes to report witnesses.
*/

use crate::ast::{Atom, Clause, Term};
use crate::db::TermDatabase;
use crate::formula::Fmla;
use crate::intern;
use crate::model::{Sort, Statement};
use crate::sym_gen::SymGen;
use crate::types::err::QueryError;

/// One entry of the query's variable↔constant map: the user's original
/// variable name paired with the fresh constant standing in for it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QueryBinding {
    pub var_name: crate::intern::Str,
    pub fresh_const: crate::intern::Str,
}

pub struct TranslatedQuery {
    pub axiom: Statement,
    pub const_decls: Vec<Statement>,
    pub bindings: Vec<QueryBinding>,
}

/// Translates `query` (a query clause has no body — it is just the atom
/// being asked about) into an axiom, minting a fresh constant for every
/// distinct variable it mentions.
///
/// Rejects constants that do not appear anywhere in the program's universe,
/// and rejects queries mentioning existential quantifiers (queries built
/// from a single atom never do, but the check is kept since a future
/// surface-syntax extension could construct one).
pub fn translate_query(
    query: &Clause,
    universe: &TermDatabase,
    gen: &mut SymGen,
) -> Result<TranslatedQuery, QueryError> {
    log::debug!(
        "translating query {}/{}",
        intern::decode(query.head.pred),
        query.head.arity()
    );

    for t in &query.head.terms {
        if t.is_const() && !universe.contains(t) {
            let name = intern::decode(t.id());
            log::warn!("query references undeclared constant '{name}'");
            return Err(QueryError::UndeclaredConstant { name });
        }
    }

    let mut bindings = Vec::new();
    let mut const_decls = Vec::new();
    let mut substituted_terms = Vec::with_capacity(query.head.terms.len());

    for t in &query.head.terms {
        match t {
            Term::Var(var_name) => {
                if let Some(existing) = bindings
                    .iter()
                    .find(|b: &&QueryBinding| b.var_name == *var_name)
                {
                    substituted_terms.push(Term::Const(existing.fresh_const));
                } else {
                    let fresh = gen.new_var();
                    bindings.push(QueryBinding {
                        var_name: *var_name,
                        fresh_const: fresh,
                    });
                    const_decls.push(Statement::declare_const(fresh, Sort::Universe));
                    substituted_terms.push(Term::Const(fresh));
                }
            }
            other => substituted_terms.push(*other),
        }
    }

    let translated_atom = Atom::new(query.head.pred, substituted_terms);
    let axiom = Statement::Axiom(Fmla::Atom(translated_atom));

    Ok(TranslatedQuery {
        axiom,
        const_decls,
        bindings,
    })
}

/// Rejects a query formula containing an existential quantifier. Exposed
/// separately from [translate_query] for surface-syntax extensions that
/// build a query as a general formula rather than a bare atom.
pub fn reject_existentials(f: &Fmla) -> Result<(), QueryError> {
    match f {
        Fmla::Quant {
            kind: crate::formula::Quant::Exists,
            ..
        } => Err(QueryError::ExistentialInQuery),
        Fmla::Not(inner) => reject_existentials(inner),
        Fmla::And(fs) | Fmla::Or(fs) => fs.iter().try_for_each(reject_existentials),
        Fmla::If(a, c) => {
            reject_existentials(a)?;
            reject_existentials(c)
        }
        Fmla::Iff(a, b) => {
            reject_existentials(a)?;
            reject_existentials(b)
        }
        Fmla::Quant { body, .. } => reject_existentials(body),
        Fmla::Const(_) | Fmla::Atom(_) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intern::encode_str;

    #[test]
    fn undeclared_constant_is_rejected() {
        let mut universe = TermDatabase::new();
        universe.add(&Term::Const(encode_str("a")));
        let query = Clause::fact(Atom::new(encode_str("q"), vec![Term::Const(encode_str("d"))]));
        let mut gen = SymGen::new("c");
        let err = translate_query(&query, &universe, &mut gen).unwrap_err();
        assert_eq!(
            err,
            QueryError::UndeclaredConstant {
                name: "d".to_string()
            }
        );
    }

    #[test]
    fn each_distinct_variable_gets_one_fresh_constant() {
        let universe = TermDatabase::new();
        let query = Clause::fact(Atom::new(
            encode_str("p"),
            vec![Term::Var(encode_str("X")), Term::Var(encode_str("X"))],
        ));
        let mut gen = SymGen::new("c");
        let result = translate_query(&query, &universe, &mut gen).unwrap();
        assert_eq!(result.bindings.len(), 1);
        assert_eq!(result.const_decls.len(), 1);
    }

    #[test]
    fn existential_in_query_is_rejected() {
        let f = crate::formula::mk_quant(
            crate::formula::Quant::Exists,
            Term::Var(encode_str("X")),
            Fmla::Const(true),
        );
        assert_eq!(reject_existentials(&f), Err(QueryError::ExistentialInQuery));
    }
}
