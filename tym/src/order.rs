/*!
Statement orderer (C8): SMT-LIB2 requires every referenced symbol to be
declared before use, so this reorders a statement list into an order
satisfying that constraint, or reports a cyclic dependency.
*/

use crate::ast::Term;
use crate::intern;
use crate::model::Statement;
use crate::types::err::OrderError;
use std::collections::HashSet;

/// Reorders `statements` so that every `Const`-kind name a statement
/// references was introduced by an earlier statement in the result (or is
/// one of the built-ins `=`/`distinct`). Emit order within a "round" is
/// stable: statements placeable in the same pass keep their relative input
/// order.
///
/// A statement's own introduced name is treated as already declared when
/// checking *that statement's* refs (but not yet added to `declared` for
/// anyone else). A predicate's `ConstDef` axiom recurring through its own
/// name — `path(X,Z):-edge(X,Y),path(Y,Z).`'s second disjunct holds a
/// `path(Y,Z)` atom — is exactly this self-reference, and recursion is a
/// core Datalog feature, not a cyclic-dependency error: only a reference to
/// a name that *no* placed-or-placeable statement introduces is cyclic.
pub fn order_statements(statements: Vec<Statement>) -> Result<Vec<Statement>, OrderError> {
    log::debug!("ordering {} statements", statements.len());
    let mut declared: HashSet<Term> = HashSet::new();
    declared.insert(Term::Const(intern::encode_str("=")));
    declared.insert(Term::Const(intern::encode_str("distinct")));

    let mut cursor = statements;
    let mut waiting: Vec<Statement> = Vec::new();
    let mut ordered = Vec::new();

    loop {
        if cursor.is_empty() {
            if waiting.is_empty() {
                return Ok(ordered);
            }
            cursor = std::mem::take(&mut waiting);
        }

        let mut placed_this_pass = false;
        let round = std::mem::take(&mut cursor);
        for stmt in round {
            let refs = stmt.consts();
            let self_name = stmt.introduces();
            if refs
                .iter()
                .all(|r| declared.contains(r) || Some(*r) == self_name)
            {
                if let Some(name) = self_name {
                    declared.insert(name);
                }
                ordered.push(stmt);
                placed_this_pass = true;
            } else {
                waiting.push(stmt);
            }
        }

        if !placed_this_pass {
            if waiting.is_empty() {
                return Ok(ordered);
            }
            log::warn!("{} statements form a cyclic dependency", waiting.len());
            return Err(OrderError::CyclicDependency);
        }
    }
}
