//! Small-step evaluation of the untyped arithmetic language: booleans,
//! conditionals and natural numbers.

pub mod ast;
pub mod eval;
mod multistep;

pub use ast::{Term, TermRef};
pub use eval::{StepError, step};
pub use multistep::{MultiStep, Steps};

/// What every evaluable thing offers, besides rendering through `Display`.
///
/// For a [`Term`], `reduce` is a single step. [`MultiStep`] overrides it with
/// evaluation to a normal form and delegates the rest to its origin.
pub trait Reduce: std::fmt::Display {
    /// Fails with [`StepError::NoRuleApplies`] when nothing can be done. That
    /// alone does not say whether the term is a value; ask `is_value`.
    fn reduce(&self) -> eval::Result<TermRef>;
    fn is_value(&self) -> bool;
    fn is_numeric(&self) -> bool;
}

impl Reduce for Term {
    fn reduce(&self) -> eval::Result<TermRef> {
        eval::step(self)
    }

    fn is_value(&self) -> bool {
        Term::is_value(self)
    }

    fn is_numeric(&self) -> bool {
        Term::is_numeric(self)
    }
}
