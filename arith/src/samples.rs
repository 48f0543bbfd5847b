use arith::{Term, TermRef};

/// Named terms the REPL can work on.
pub fn catalogue() -> Vec<(&'static str, TermRef)> {
    vec![
        ("iszero-zero", Term::is_zero(Term::zero())),
        (
            "if-iszero",
            Term::if_(Term::is_zero(Term::zero()), Term::nat(1), Term::zero()),
        ),
        ("pred-two", Term::pred(Term::nat(2))),
        ("iszero-true", Term::is_zero(Term::true_())),
        ("succ-pred-zero", Term::succ(Term::pred(Term::zero()))),
        (
            "nested-if",
            Term::if_(
                Term::is_zero(Term::pred(Term::pred(Term::nat(1)))),
                Term::if_(Term::true_(), Term::nat(1), Term::false_()),
                Term::false_(),
            ),
        ),
        (
            "pred-succ-pred",
            Term::pred(Term::succ(Term::pred(Term::zero()))),
        ),
        (
            "if-zero",
            Term::if_(Term::zero(), Term::true_(), Term::false_()),
        ),
        (
            "countdown",
            Term::if_(
                Term::is_zero(Term::pred(Term::nat(3))),
                Term::zero(),
                Term::pred(Term::pred(Term::pred(Term::nat(5)))),
            ),
        ),
    ]
}

pub fn lookup(name: &str) -> Option<TermRef> {
    catalogue()
        .into_iter()
        .find_map(|(n, term)| (n == name).then_some(term))
}
