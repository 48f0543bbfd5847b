use thiserror::Error;
use tracing::{debug, trace};

use crate::ast::{Term, TermRef};

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum StepError {
    /// No evaluation rule applies. The term is either a value or stuck; ask
    /// [`Term::is_value`] to tell which.
    #[error("no rule applies")]
    NoRuleApplies,
    #[error("no normal form within {0} steps")]
    StepLimitExceeded(usize),
    #[error("evaluation failed: {0}")]
    Fault(String),
}
pub type Result<T> = std::result::Result<T, StepError>;

/// Picks the branch of an `if` whose condition is already a boolean.
fn select(cond: &Term, positive: &TermRef, negative: &TermRef) -> Option<TermRef> {
    match cond {
        Term::True => Some(positive.clone()),
        Term::False => Some(negative.clone()),
        _ => None,
    }
}

/// `pred nv` for a numeric value `nv`.
fn predecessor(nv: &Term) -> Option<TermRef> {
    match nv {
        Term::Zero => Some(Term::zero()),
        Term::Succ(inner) if inner.is_numeric() => Some(inner.clone()),
        _ => None,
    }
}

/// `iszero nv` for a numeric value `nv`.
fn zero_test(nv: &Term) -> Option<TermRef> {
    match nv {
        Term::Zero => Some(Term::true_()),
        Term::Succ(inner) if inner.is_numeric() => Some(Term::false_()),
        _ => None,
    }
}

/// Performs exactly one call-by-value reduction step.
///
/// Each rule either fires on its operand directly or steps that operand,
/// passing its error through untouched.
pub fn step(term: &Term) -> Result<TermRef> {
    use Term::*;
    Ok(match term {
        True | False | Zero => return Err(StepError::NoRuleApplies),
        If {
            cond,
            positive,
            negative,
        } => match select(cond, positive, negative) {
            Some(branch) => branch,
            None => Term::if_(step(cond)?, positive.clone(), negative.clone()),
        },
        // A numeric operand has no step of its own, so `succ nv` stays put.
        Succ(t) => Term::succ(step(t)?),
        Pred(t) => match predecessor(t) {
            Some(reduct) => reduct,
            None => Term::pred(step(t)?),
        },
        IsZero(t) => match zero_test(t) {
            Some(reduct) => reduct,
            None => Term::is_zero(step(t)?),
        },
    })
}

/// Applies `step` until it reports [`StepError::NoRuleApplies`], returning the
/// last term. Any other error aborts and is returned as is.
///
/// There is no step bound; see [`crate::MultiStep::evaluate_bounded`].
pub fn evaluate_with<F>(origin: &TermRef, mut step: F) -> Result<TermRef>
where
    F: FnMut(&Term) -> Result<TermRef>,
{
    let mut current = origin.clone();
    let mut count = 0usize;
    loop {
        match step(current.as_ref()) {
            Ok(next) => {
                count += 1;
                trace!(step = count, term = %next, "reduced");
                current = next;
            }
            Err(StepError::NoRuleApplies) => {
                debug!(
                    steps = count,
                    value = current.is_value(),
                    term = %current,
                    "reached normal form"
                );
                return Ok(current);
            }
            Err(e) => {
                debug!(steps = count, term = %current, error = %e, "evaluation aborted");
                return Err(e);
            }
        }
    }
}

pub fn eval_small(term: &TermRef) -> Result<TermRef> {
    evaluate_with(term, step)
}

/// Big-step evaluation. `None` if the term gets stuck somewhere.
///
/// Operands are evaluated to values first, then the same rules as [`step`]
/// apply to those values.
pub fn eval_big(term: &TermRef) -> Option<TermRef> {
    match term.as_ref() {
        Term::True | Term::False | Term::Zero => Some(term.clone()),
        Term::If {
            cond,
            positive,
            negative,
        } => {
            let cond = eval_big(cond)?;
            eval_big(&select(&cond, positive, negative)?)
        }
        Term::Succ(t) => {
            let nv = eval_big(t)?;
            nv.is_numeric().then(|| Term::succ(nv))
        }
        Term::Pred(t) => {
            let nv = eval_big(t)?;
            predecessor(&nv)
        }
        Term::IsZero(t) => {
            let nv = eval_big(t)?;
            zero_test(&nv)
        }
    }
}
