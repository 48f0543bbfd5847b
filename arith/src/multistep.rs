use std::iter::FusedIterator;

use crate::{
    ast::{Term, TermRef},
    eval::{self, Result, StepError},
    Reduce,
};

/// Drives an origin term to its normal form.
///
/// Rendering and the `is_value` / `is_numeric` predicates describe the origin,
/// not the evaluated result. Render the term returned by
/// [`MultiStep::evaluate`] to see the normal form.
#[derive(PartialEq, Eq, Clone, Debug, derive_more::Display)]
#[display(fmt = "{}", origin)]
pub struct MultiStep {
    origin: TermRef,
}

impl MultiStep {
    pub fn new(origin: TermRef) -> Self {
        Self { origin }
    }

    pub fn origin(&self) -> &TermRef {
        &self.origin
    }

    /// Steps until no rule applies. A stuck term is a successful result;
    /// only errors other than [`StepError::NoRuleApplies`] fail.
    pub fn evaluate(&self) -> Result<TermRef> {
        eval::evaluate_with(&self.origin, eval::step)
    }

    /// Like [`MultiStep::evaluate`], but gives up with
    /// [`StepError::StepLimitExceeded`] once more than `limit` steps would be
    /// taken.
    pub fn evaluate_bounded(&self, limit: usize) -> Result<TermRef> {
        let mut taken = 0;
        eval::evaluate_with(&self.origin, |term| {
            let next = eval::step(term)?;
            if taken == limit {
                return Err(StepError::StepLimitExceeded(limit));
            }
            taken += 1;
            Ok(next)
        })
    }

    pub fn steps(&self) -> Steps {
        let step: fn(&Term) -> Result<TermRef> = eval::step;
        Steps::with_step(self.origin.clone(), step)
    }
}

impl Reduce for MultiStep {
    fn reduce(&self) -> Result<TermRef> {
        self.evaluate()
    }

    fn is_value(&self) -> bool {
        self.origin.is_value()
    }

    fn is_numeric(&self) -> bool {
        self.origin.is_numeric()
    }
}

impl From<TermRef> for MultiStep {
    fn from(origin: TermRef) -> Self {
        Self::new(origin)
    }
}

/// Successive reducts of a term, origin excluded.
///
/// Ends when no rule applies. Any other error is yielded once and ends the
/// iteration as well.
pub struct Steps<F = fn(&Term) -> Result<TermRef>> {
    current: Option<TermRef>,
    step: F,
}

impl<F> Steps<F>
where
    F: FnMut(&Term) -> Result<TermRef>,
{
    pub fn with_step(origin: TermRef, step: F) -> Self {
        Self {
            current: Some(origin),
            step,
        }
    }
}

impl<F> Iterator for Steps<F>
where
    F: FnMut(&Term) -> Result<TermRef>,
{
    type Item = Result<TermRef>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current.take()?;
        match (self.step)(current.as_ref()) {
            Ok(next) => {
                self.current = Some(next.clone());
                Some(Ok(next))
            }
            Err(StepError::NoRuleApplies) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

impl<F> FusedIterator for Steps<F> where F: FnMut(&Term) -> Result<TermRef> {}

#[cfg(test)]
mod test {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(Term::is_zero(Term::zero()), Term::true_(), "true")]
    #[case(
        Term::if_(Term::is_zero(Term::zero()), Term::succ(Term::zero()), Term::zero()),
        Term::nat(1),
        "succ 0"
    )]
    #[case(Term::pred(Term::nat(2)), Term::nat(1), "succ 0")]
    #[case(Term::is_zero(Term::true_()), Term::is_zero(Term::true_()), "iszero true")]
    #[case(Term::succ(Term::pred(Term::zero())), Term::nat(1), "succ 0")]
    #[case(Term::nat(2), Term::nat(2), "succ succ 0")]
    fn test_evaluate(#[case] origin: TermRef, #[case] normal: TermRef, #[case] rendered: &str) {
        let evaluated = MultiStep::new(origin).evaluate().unwrap();
        assert_eq!(evaluated, normal);
        assert_eq!(evaluated.to_string(), rendered);
    }

    #[test]
    fn test_trace() {
        let m = MultiStep::new(Term::if_(
            Term::is_zero(Term::zero()),
            Term::succ(Term::zero()),
            Term::zero(),
        ));
        let trace = m.steps().collect::<Result<Vec<_>>>().unwrap();
        assert_eq!(
            trace,
            vec![
                Term::if_(Term::true_(), Term::succ(Term::zero()), Term::zero()),
                Term::nat(1),
            ]
        );
        assert_eq!(MultiStep::new(Term::is_zero(Term::true_())).steps().count(), 0);
    }

    #[test]
    fn test_trace_stops_after_fault() {
        let origin = Term::pred(Term::pred(Term::nat(2)));
        let mut trace = Steps::with_step(origin, |term: &Term| match term {
            Term::Pred(t) if matches!(t.as_ref(), Term::Pred(_)) => eval::step(term),
            _ => Err(StepError::Fault("unsupported".to_string())),
        });
        assert_eq!(trace.next(), Some(Ok(Term::pred(Term::nat(1)))));
        assert_eq!(
            trace.next(),
            Some(Err(StepError::Fault("unsupported".to_string())))
        );
        assert_eq!(trace.next(), None);
        assert_eq!(trace.next(), None);
    }

    #[test]
    fn test_describes_origin() {
        let m = MultiStep::new(Term::pred(Term::nat(1)));
        assert_eq!(m.to_string(), "pred succ 0");
        assert!(!Reduce::is_value(&m));
        assert!(!Reduce::is_numeric(&m));
        assert_eq!(m.reduce(), Ok(Term::zero()));
        assert_eq!(m.origin(), &Term::pred(Term::nat(1)));

        let m = MultiStep::from(Term::nat(1));
        assert!(Reduce::is_value(&m));
        assert!(Reduce::is_numeric(&m));
    }

    #[test]
    fn test_term_reduce_is_single_step() {
        let term = Term::pred(Term::succ(Term::pred(Term::zero())));
        assert_eq!(term.reduce(), Ok(Term::pred(Term::nat(1))));
        assert_eq!(MultiStep::new(term).reduce(), Ok(Term::zero()));
    }

    #[test]
    fn test_evaluate_bounded() {
        // `pred pred succ succ 0` takes two steps.
        let m = MultiStep::new(Term::pred(Term::pred(Term::nat(2))));
        assert_eq!(m.evaluate_bounded(2), Ok(Term::zero()));
        assert_eq!(m.evaluate_bounded(1), Err(StepError::StepLimitExceeded(1)));
        assert_eq!(
            MultiStep::new(Term::nat(3)).evaluate_bounded(0),
            Ok(Term::nat(3))
        );
    }
}
