/*!
Clause→formula translation (C6): turns every predicate's clause set into a
single `ConstDef` axiom with a universally-quantified-by-position head and
existentially closed body variables.
*/

use crate::ast::{Atom, Clause, Term};
use crate::db::{AtomDatabase, PredicateEntry};
use crate::formula::{mk_ands, mk_ors, mk_quants, Fmla, Quant};
use crate::model::{Sort, Statement};
use crate::sym_gen::SymGen;
use crate::types::err::TranslateError;

fn translate_atom(atom: &Atom) -> Fmla {
    Fmla::Atom(atom.clone())
}

fn translate_body(body: &[Atom]) -> Fmla {
    mk_ands(body.iter().map(translate_atom).collect())
}

/// Translates one clause of predicate `p` into a disjunct of `p`'s defining
/// axiom: abstracts the head's arguments behind fresh variables, conjoins
/// the body with equalities tying each fresh variable back to the original
/// head argument, and existentially closes over every variable the clause
/// uses — head included, not only the hidden (body-only) ones.
///
/// Closing only over the hidden variables (as a literal reading of "the
/// variables that will become existentially bound" might suggest) leaves a
/// head variable that recurs in the body — `path(X,Z) :- edge(X,Y),
/// path(Y,Z)`'s `X` and `Z` — free in the emitted formula, which is not
/// valid SMT-LIB2: a `define-fun` body may mention only its own parameters
/// (here the fresh `V`s, never the original clause variables) and bound
/// variables. So every original clause variable, head or body, is
/// closure-bound here; only the fresh `V`s stay free, which is exactly
/// what the surrounding `ConstDef` wants as its parameter list.
///
/// `gen` is advanced in place; callers wanting to roll back (there is no
/// such need in this crate, but the capability mirrors the source
/// material's per-clause checkpoint) should `snapshot`/`restore` around the
/// call themselves.
fn translate_clause(clause: &Clause, gen: &mut SymGen) -> (Vec<Term>, Fmla) {
    let closure_vars = clause.all_vars();

    let mut fresh_head_vars = Vec::with_capacity(clause.head.arity());
    for _ in &clause.head.terms {
        fresh_head_vars.push(gen.new_var_term());
    }
    let equalities: Vec<Fmla> = clause
        .head
        .terms
        .iter()
        .zip(&fresh_head_vars)
        .map(|(original, fresh)| {
            Fmla::Atom(Atom::new(
                crate::intern::encode_str("="),
                vec![*fresh, *original],
            ))
        })
        .collect();

    let body_fmla = translate_body(&clause.body);
    let conjoined = mk_ands(std::iter::once(body_fmla).chain(equalities).collect());
    let closed = mk_quants(Quant::Exists, &closure_vars, conjoined);

    (fresh_head_vars, closed)
}

/// Translates every clause of `entry` into its defining axiom. A bodyless
/// predicate (no clauses at all) defines to `false`, taking fresh
/// parameters rather than reusing any clause's head variables (there is no
/// clause to borrow them from).
pub fn translate_predicate(entry: &PredicateEntry, gen: &mut SymGen) -> Statement {
    log::debug!(
        "translating predicate {}/{}, {} clause(s)",
        crate::intern::decode(entry.name),
        entry.arity,
        entry.clauses.len()
    );
    if entry.clauses.is_empty() {
        let params: Vec<Term> = (0..entry.arity).map(|_| gen.new_var_term()).collect();
        return Statement::ConstDef {
            name: entry.name,
            params,
            body: Some(Fmla::Const(false)),
            sort: Sort::Bool,
        };
    }

    // Every disjunct must be phrased over the same parameter list, so the
    // first clause's fresh head variables become the shared parameters;
    // later clauses translate against their own snapshot and then equate
    // their own fresh head variables back to the shared ones.
    let mut disjuncts = Vec::with_capacity(entry.clauses.len());
    let mut shared_params: Option<Vec<Term>> = None;

    for clause in &entry.clauses {
        let (fresh_params, body) = translate_clause(clause, gen);
        match &shared_params {
            None => {
                shared_params = Some(fresh_params);
                disjuncts.push(body);
            }
            Some(shared) => {
                // `body`'s only free variables are this clause's own fresh
                // parameters. Tie them back to the shared parameter names
                // *inside* the scope that binds them, then quantify them
                // away — conjoining the linking equalities outside the
                // `exists` would leave them referring to nothing in scope.
                let linking: Vec<Fmla> = shared
                    .iter()
                    .zip(&fresh_params)
                    .map(|(s, f)| {
                        Fmla::Atom(Atom::new(crate::intern::encode_str("="), vec![*s, *f]))
                    })
                    .collect();
                let conjoined = mk_ands(std::iter::once(body).chain(linking).collect());
                let existential = mk_quants(Quant::Exists, &fresh_params, conjoined);
                disjuncts.push(existential);
            }
        }
    }

    Statement::ConstDef {
        name: entry.name,
        params: shared_params.unwrap_or_default(),
        body: Some(mk_ors(disjuncts)),
        sort: Sort::Bool,
    }
}

/// Translates every predicate in `db`, in a stable order (by predicate
/// name, then arity) so output is deterministic across runs.
pub fn translate_program(db: &AtomDatabase, gen: &mut SymGen) -> Result<Vec<Statement>, TranslateError> {
    let mut entries: Vec<&PredicateEntry> = db.predicates().collect();
    entries.sort_by(|a, b| {
        crate::intern::cmp(a.name, b.name).then_with(|| a.arity.cmp(&b.arity))
    });
    log::debug!("translating {} predicate(s)", entries.len());
    let statements = entries
        .into_iter()
        .map(|e| translate_predicate(e, gen))
        .collect();
    log::debug!("translation complete");
    Ok(statements)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Term;
    use crate::intern::encode_str;

    fn cst(s: &str) -> Term {
        Term::Const(encode_str(s))
    }

    #[test]
    fn fact_translates_to_true_bodied_disjunct() {
        let mut db = AtomDatabase::new();
        let clause = Clause::fact(Atom::new(encode_str("p"), vec![cst("a")]));
        db.add_clause(&clause).unwrap();
        let mut gen = SymGen::new("V");
        let entry = db.member(encode_str("p"), 1).unwrap();
        let stmt = translate_predicate(entry, &mut gen);
        match stmt {
            Statement::ConstDef { params, body, .. } => {
                assert_eq!(params.len(), 1);
                assert!(body.is_some());
            }
            _ => panic!("expected ConstDef"),
        }
    }

    #[test]
    fn bodyless_predicate_defines_to_false() {
        // A predicate that is only ever queried, never defined as a head,
        // still gets a ConstDef of false so declaration ordering sees it.
        let entry = PredicateEntry {
            name: encode_str("nope"),
            arity: 2,
            clauses: Vec::new(),
        };
        let mut gen = SymGen::new("V");
        let stmt = translate_predicate(&entry, &mut gen);
        match stmt {
            Statement::ConstDef { body, params, .. } => {
                assert_eq!(params.len(), 2);
                assert_eq!(body, Some(Fmla::Const(false)));
            }
            _ => panic!("expected ConstDef"),
        }
    }

    fn var(name: &str) -> Term {
        Term::Var(encode_str(name))
    }

    /// Peels off nested `Quant` nodes, returning the bound variables in
    /// binding order (outermost first) and the innermost un-quantified
    /// body.
    fn peel_quants(f: &Fmla) -> (Vec<Term>, &Fmla) {
        let mut bound = Vec::new();
        let mut cursor = f;
        while let Fmla::Quant { bv, body, .. } = cursor {
            bound.push(*bv);
            cursor = body;
        }
        (bound, cursor)
    }

    #[test]
    fn recursive_clause_closes_over_head_and_hidden_vars_alike() {
        // path(X,Z) :- edge(X,Y), path(Y,Z).
        // X and Z recur from the head; Y is body-only. All three must be
        // bound in the emitted disjunct, or the formula would reference a
        // free variable no `define-fun` parameter or `exists` covers.
        let head = Atom::new(encode_str("path"), vec![var("X"), var("Z")]);
        let body = vec![
            Atom::new(encode_str("edge"), vec![var("X"), var("Y")]),
            Atom::new(encode_str("path"), vec![var("Y"), var("Z")]),
        ];
        let clause = Clause::rule(head, body);
        let mut gen = SymGen::new("V");
        let (fresh_params, closed) = translate_clause(&clause, &mut gen);

        assert_eq!(fresh_params, vec![Term::Var(encode_str("V0")), Term::Var(encode_str("V1"))]);

        let (bound, _) = peel_quants(&closed);
        let mut bound_sorted = bound.clone();
        bound_sorted.sort_by_key(|t| t.to_string());
        let mut expected = vec![var("X"), var("Y"), var("Z")];
        expected.sort_by_key(|t| t.to_string());
        assert_eq!(bound_sorted, expected);

        // The fresh parameters themselves are never quantified away — they
        // are exactly what the surrounding `ConstDef` takes as parameters.
        assert!(!bound.contains(&fresh_params[0]));
        assert!(!bound.contains(&fresh_params[1]));
    }

    #[test]
    fn multi_clause_predicate_links_params_inside_the_existential_scope() {
        // p(X) :- q(X).  p(a).
        // The second clause's linking equality must sit where its own
        // fresh parameter is still in scope.
        let mut db = AtomDatabase::new();
        db.add_clause(&Clause::rule(
            Atom::new(encode_str("p"), vec![var("X")]),
            vec![Atom::new(encode_str("q"), vec![var("X")])],
        ))
        .unwrap();
        db.add_clause(&Clause::fact(Atom::new(encode_str("p"), vec![cst("a")])))
            .unwrap();
        let mut gen = SymGen::new("V");
        let entry = db.member(encode_str("p"), 1).unwrap();
        let stmt = translate_predicate(entry, &mut gen);
        let Statement::ConstDef { body: Some(body), .. } = stmt else {
            panic!("expected ConstDef");
        };
        let Fmla::Or(disjuncts) = body else {
            panic!("expected a disjunction of the two clauses");
        };
        // Second disjunct: its own fresh parameter is bound by its own
        // `exists`, and the linking equality referencing it sits inside
        // that same `exists` — i.e. the disjunct is a single quantifier
        // node wrapping an `And`, not a bare top-level `And`.
        assert!(matches!(disjuncts[1], Fmla::Quant { .. }));
    }
}
