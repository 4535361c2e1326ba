/*!
First-order formulas over [Atom](crate::ast::Atom)s, with smart constructors
that fold Boolean constants immediately. Keeping every formula tree free of
dead `And`/`Or`/`If`/`Iff` subtrees (never built with a constant operand)
makes every later pass — translation, ordering, serialization — simpler,
since they never have to special-case a redundant branch.
*/

use crate::ast::{Atom, Term};
use crate::intern;
use std::fmt;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Quant {
    Forall,
    Exists,
}

/// A first-order formula. `And`/`Or` are n-ary (a terminated list of
/// operands); `If`/`Iff` are binary. Every variant other than `Quant` is a
/// plain value type; `Quant` binds exactly one variable per node (an
/// n-variable quantification is a right-fold of single-variable nodes, see
/// [mk_quants]).
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Fmla {
    Const(bool),
    Atom(Atom),
    Not(Box<Fmla>),
    And(Vec<Fmla>),
    Or(Vec<Fmla>),
    If(Box<Fmla>, Box<Fmla>),
    Iff(Box<Fmla>, Box<Fmla>),
    Quant {
        kind: Quant,
        bv: Term,
        body: Box<Fmla>,
    },
}

pub fn mk_not(f: Fmla) -> Fmla {
    match f {
        Fmla::Const(b) => Fmla::Const(!b),
        other => Fmla::Not(Box::new(other)),
    }
}

pub fn mk_and(a: Fmla, b: Fmla) -> Fmla {
    match (a, b) {
        (Fmla::Const(true), f) | (f, Fmla::Const(true)) => f,
        (Fmla::Const(false), _) | (_, Fmla::Const(false)) => Fmla::Const(false),
        (a, b) => Fmla::And(vec![a, b]),
    }
}

pub fn mk_or(a: Fmla, b: Fmla) -> Fmla {
    match (a, b) {
        (Fmla::Const(true), _) | (_, Fmla::Const(true)) => Fmla::Const(true),
        (Fmla::Const(false), f) | (f, Fmla::Const(false)) => f,
        (a, b) => Fmla::Or(vec![a, b]),
    }
}

pub fn mk_if(antecedent: Fmla, consequent: Fmla) -> Fmla {
    match (antecedent, consequent) {
        (Fmla::Const(true), f) => f,
        (Fmla::Const(false), _) => Fmla::Const(true),
        (_, Fmla::Const(true)) => Fmla::Const(true),
        (f, Fmla::Const(false)) => mk_not(f),
        (a, c) => Fmla::If(Box::new(a), Box::new(c)),
    }
}

pub fn mk_iff(a: Fmla, b: Fmla) -> Fmla {
    match (a, b) {
        (Fmla::Const(true), f) | (f, Fmla::Const(true)) => f,
        (Fmla::Const(false), f) | (f, Fmla::Const(false)) => mk_not(f),
        (a, b) => Fmla::Iff(Box::new(a), Box::new(b)),
    }
}

/// `a => c`, defined as `¬a ∨ c`.
pub fn mk_imply(antecedent: Fmla, consequent: Fmla) -> Fmla {
    mk_or(mk_not(antecedent), consequent)
}

/// Conjoins a list of formulas, filtering out `true` operands first and
/// short-circuiting to `false` if any operand is `false`. `Ands([])` is
/// `true`. A single surviving operand is returned unwrapped, not as a
/// one-element `And`.
pub fn mk_ands(fs: Vec<Fmla>) -> Fmla {
    let mut kept = Vec::with_capacity(fs.len());
    for f in fs {
        match f {
            Fmla::Const(false) => return Fmla::Const(false),
            Fmla::Const(true) => {}
            other => kept.push(other),
        }
    }
    match kept.len() {
        0 => Fmla::Const(true),
        1 => kept.into_iter().next().unwrap(),
        _ => Fmla::And(kept),
    }
}

/// Disjoins a list of formulas, filtering out `false` operands first and
/// short-circuiting to `true` if any operand is `true`. `Ors([])` is
/// `false`.
pub fn mk_ors(fs: Vec<Fmla>) -> Fmla {
    let mut kept = Vec::with_capacity(fs.len());
    for f in fs {
        match f {
            Fmla::Const(true) => return Fmla::Const(true),
            Fmla::Const(false) => {}
            other => kept.push(other),
        }
    }
    match kept.len() {
        0 => Fmla::Const(false),
        1 => kept.into_iter().next().unwrap(),
        _ => Fmla::Or(kept),
    }
}

pub fn mk_quant(kind: Quant, bv: Term, body: Fmla) -> Fmla {
    Fmla::Quant {
        kind,
        bv,
        body: Box::new(body),
    }
}

/// Right-folds a quantifier of `kind` over each variable in `vars`, innermost
/// variable bound last in the list, outermost quantifier wrapping the whole
/// result.
pub fn mk_quants(kind: Quant, vars: &[Term], body: Fmla) -> Fmla {
    vars.iter()
        .rev()
        .fold(body, |acc, v| mk_quant(kind, *v, acc))
}

impl Fmla {
    /// Size used to decide parenthesization when serializing: constants and
    /// arity-0 atoms have size 1 (printed unparenthesized); everything else
    /// is strictly larger and is fully parenthesized.
    pub fn fmla_size(&self) -> usize {
        match self {
            Fmla::Const(_) => 1,
            Fmla::Atom(a) => 1 + a.arity(),
            Fmla::Not(f) => 1 + f.fmla_size(),
            Fmla::And(fs) | Fmla::Or(fs) => 1 + fs.iter().map(Fmla::fmla_size).sum::<usize>(),
            Fmla::If(a, c) => 1 + a.fmla_size() + c.fmla_size(),
            Fmla::Iff(a, b) => 1 + a.fmla_size() + b.fmla_size(),
            Fmla::Quant { body, .. } => 1 + body.fmla_size(),
        }
    }

    /// Every `Const`-kind term appearing in this formula. When
    /// `include_pred_const` is set, each atom also contributes a synthetic
    /// constant carrying its predicate name — the declaration orderer (C8)
    /// needs this view so predicate references look like ordinary term
    /// references.
    pub fn consts(&self, include_pred_const: bool, acc: &mut Vec<Term>) {
        match self {
            Fmla::Const(_) => {}
            Fmla::Atom(a) => {
                if include_pred_const {
                    let pc = Term::Const(a.pred);
                    if !acc.contains(&pc) {
                        acc.push(pc);
                    }
                }
                for t in &a.terms {
                    if t.is_const() && !acc.contains(t) {
                        acc.push(*t);
                    }
                }
            }
            Fmla::Not(f) => f.consts(include_pred_const, acc),
            Fmla::And(fs) | Fmla::Or(fs) => {
                for f in fs {
                    f.consts(include_pred_const, acc);
                }
            }
            Fmla::If(a, c) => {
                a.consts(include_pred_const, acc);
                c.consts(include_pred_const, acc);
            }
            Fmla::Iff(a, b) => {
                a.consts(include_pred_const, acc);
                b.consts(include_pred_const, acc);
            }
            Fmla::Quant { body, .. } => body.consts(include_pred_const, acc),
        }
    }

    fn fmt_parenthesized(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.fmla_size() == 1 {
            write!(f, "{self}")
        } else {
            write!(f, "({self})")
        }
    }
}

impl fmt::Display for Fmla {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fmla::Const(true) => write!(f, "true"),
            Fmla::Const(false) => write!(f, "false"),
            Fmla::Atom(a) => {
                if a.terms.is_empty() {
                    write!(f, "{}", intern::decode(a.pred))
                } else {
                    write!(f, "({}", intern::decode(a.pred))?;
                    for t in &a.terms {
                        write!(f, " {t}")?;
                    }
                    write!(f, ")")
                }
            }
            Fmla::Not(inner) => {
                write!(f, "(not ")?;
                inner.fmt_parenthesized(f)?;
                write!(f, ")")
            }
            Fmla::And(fs) => {
                write!(f, "(and")?;
                for x in fs {
                    write!(f, " ")?;
                    x.fmt_parenthesized(f)?;
                }
                write!(f, ")")
            }
            Fmla::Or(fs) => {
                write!(f, "(or")?;
                for x in fs {
                    write!(f, " ")?;
                    x.fmt_parenthesized(f)?;
                }
                write!(f, ")")
            }
            Fmla::If(a, c) => {
                write!(f, "(=> ")?;
                a.fmt_parenthesized(f)?;
                write!(f, " ")?;
                c.fmt_parenthesized(f)?;
                write!(f, ")")
            }
            Fmla::Iff(a, b) => {
                write!(f, "(= ")?;
                a.fmt_parenthesized(f)?;
                write!(f, " ")?;
                b.fmt_parenthesized(f)?;
                write!(f, ")")
            }
            Fmla::Quant { kind, bv, body } => {
                let kw = match kind {
                    Quant::Forall => "forall",
                    Quant::Exists => "exists",
                };
                write!(f, "({kw} (({bv} Universe)) ")?;
                body.fmt_parenthesized(f)?;
                write!(f, ")")
            }
        }
    }
}
