use std::rc::Rc;

pub type TermRef = Rc<Term>;

/// A term of the untyped arithmetic language.
///
/// Terms are immutable. Reduction builds new nodes and shares the untouched
/// subterms through [`TermRef`].
#[derive(PartialEq, Eq, Clone, Debug, derive_more::Display)]
pub enum Term {
    #[display(fmt = "true")]
    True,
    #[display(fmt = "false")]
    False,
    #[display(fmt = "0")]
    Zero,
    /// `if cond then positive else negative`
    #[display(fmt = "if {} then {} else {}", cond, positive, negative)]
    If {
        cond: TermRef,
        positive: TermRef,
        negative: TermRef,
    },
    #[display(fmt = "succ {}", _0)]
    Succ(TermRef),
    #[display(fmt = "pred {}", _0)]
    Pred(TermRef),
    #[display(fmt = "iszero {}", _0)]
    IsZero(TermRef),
}

impl Term {
    pub fn true_() -> TermRef {
        Term::True.into()
    }

    pub fn false_() -> TermRef {
        Term::False.into()
    }

    pub fn zero() -> TermRef {
        Term::Zero.into()
    }

    pub fn if_(cond: TermRef, positive: TermRef, negative: TermRef) -> TermRef {
        Term::If {
            cond,
            positive,
            negative,
        }
        .into()
    }

    pub fn succ(t: TermRef) -> TermRef {
        Term::Succ(t).into()
    }

    pub fn pred(t: TermRef) -> TermRef {
        Term::Pred(t).into()
    }

    pub fn is_zero(t: TermRef) -> TermRef {
        Term::IsZero(t).into()
    }

    /// `succ^n 0`
    pub fn nat(n: u64) -> TermRef {
        (0..n).fold(Term::zero(), |t, _| Term::succ(t))
    }

    /// The number a numeric value denotes, `None` for anything else.
    pub fn as_nat(&self) -> Option<u64> {
        let mut n = 0;
        let mut term = self;
        loop {
            match term {
                Term::Zero => return Some(n),
                Term::Succ(t) => {
                    n += 1;
                    term = t;
                }
                _ => return None,
            }
        }
    }

    /// `0`, or `succ` of a numeric value. Only looks at the shape of the term.
    pub fn is_numeric(&self) -> bool {
        self.as_nat().is_some()
    }

    pub fn is_value(&self) -> bool {
        match self {
            Term::True | Term::False => true,
            _ => self.is_numeric(),
        }
    }

    /// Number of nodes.
    pub fn size(&self) -> usize {
        match self {
            Term::True | Term::False | Term::Zero => 1,
            Term::If {
                cond,
                positive,
                negative,
            } => 1 + cond.size() + positive.size() + negative.size(),
            Term::Succ(t) | Term::Pred(t) | Term::IsZero(t) => 1 + t.size(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Term::zero().to_string(), "0");
        assert_eq!(Term::nat(2).to_string(), "succ succ 0");
        assert_eq!(
            Term::if_(
                Term::is_zero(Term::pred(Term::zero())),
                Term::true_(),
                Term::false_()
            )
            .to_string(),
            "if iszero pred 0 then true else false"
        );
        assert_eq!(
            Term::succ(Term::if_(Term::false_(), Term::zero(), Term::nat(1))).to_string(),
            "succ if false then 0 else succ 0"
        );
    }

    #[test]
    fn test_classify() {
        assert!(Term::True.is_value());
        assert!(!Term::True.is_numeric());
        assert!(Term::nat(3).is_numeric());
        assert!(Term::nat(3).is_value());
        assert!(!Term::succ(Term::true_()).is_numeric());
        assert!(!Term::succ(Term::pred(Term::zero())).is_value());
        assert!(!Term::pred(Term::zero()).is_value());
        assert!(!Term::is_zero(Term::zero()).is_value());
        assert!(!Term::if_(Term::true_(), Term::zero(), Term::zero()).is_value());
    }

    #[test]
    fn test_nat() {
        assert_eq!(Term::nat(0), Term::zero());
        assert_eq!(Term::nat(4).as_nat(), Some(4));
        assert_eq!(Term::succ(Term::false_()).as_nat(), None);
        assert_eq!(Term::nat(4).size(), 5);
    }
}
