//! Sum-of-products expressions and the evaluator interface used by the builder.
//!
//! Grammar (whitespace is ignored):
//!
//! ```text
//! expression := term ('+' term)*
//! term       := literal+
//! literal    := '!'? letter
//! ```
//!
//! Letter `A` (or `a`) is variable 0, `B` is variable 1, and so on. Upper and
//! lower case name the same, positive literal; negation is written with `!`.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use rand::Rng;

use crate::error::{Error, Result};

/// Largest number of variables a letter can name.
pub const MAX_LETTERS: usize = 26;

/// A Boolean function the builder can enumerate.
///
/// `assignment[i]` is the value of original variable `i`.
pub trait BooleanFunction {
    /// Number of variables, i.e. the length of a full assignment.
    fn num_vars(&self) -> usize;

    fn evaluate(&self, assignment: &[bool]) -> bool;
}

impl<T: BooleanFunction + ?Sized> BooleanFunction for &T {
    fn num_vars(&self) -> usize {
        (**self).num_vars()
    }

    fn evaluate(&self, assignment: &[bool]) -> bool {
        (**self).evaluate(assignment)
    }
}

/// Adapter turning a closure into a [`BooleanFunction`].
pub struct FromFn<F> {
    num_vars: usize,
    f: F,
}

/// Wrap `f` as a function of `num_vars` variables.
pub fn from_fn<F>(num_vars: usize, f: F) -> FromFn<F>
where
    F: Fn(&[bool]) -> bool,
{
    FromFn { num_vars, f }
}

impl<F> BooleanFunction for FromFn<F>
where
    F: Fn(&[bool]) -> bool,
{
    fn num_vars(&self) -> usize {
        self.num_vars
    }

    fn evaluate(&self, assignment: &[bool]) -> bool {
        (self.f)(assignment)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Literal {
    pub variable: usize,
    pub positive: bool,
}

impl Literal {
    /// Truth of the literal; variables missing from the assignment read as 0.
    pub fn holds(&self, assignment: &[bool]) -> bool {
        assignment.get(self.variable).copied().unwrap_or(false) == self.positive
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if !self.positive {
            write!(f, "!")?;
        }
        match u8::try_from(self.variable) {
            Ok(v) if self.variable < MAX_LETTERS => write!(f, "{}", (b'A' + v) as char),
            // Variables past the alphabet have no letter of their own.
            _ => write!(f, "x{}", self.variable),
        }
    }
}

/// A disjunction of product terms.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Expression {
    terms: Vec<Vec<Literal>>,
    num_vars: usize,
}

impl Expression {
    /// Build an expression from its terms. Every term must be non-empty.
    pub fn new(terms: Vec<Vec<Literal>>) -> Result<Self> {
        if terms.is_empty() {
            return Err(Error::InvalidArgument("expression is empty".to_string()));
        }
        let mut num_vars = 0;
        for term in &terms {
            if term.is_empty() {
                return Err(Error::InvalidArgument("empty product term".to_string()));
            }
            for lit in term {
                if lit.variable >= MAX_LETTERS {
                    return Err(Error::InvalidArgument(format!(
                        "variable {} has no letter",
                        lit.variable
                    )));
                }
                num_vars = num_vars.max(lit.variable + 1);
            }
        }
        Ok(Self { terms, num_vars })
    }

    pub fn terms(&self) -> &[Vec<Literal>] {
        &self.terms
    }

    /// Random expression of `num_terms` terms over the first `num_vars`
    /// letters. Each variable enters a term with probability 2/3, and every
    /// term gets at least one literal.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, num_vars: usize, num_terms: usize) -> Self {
        assert!(
            (1..=MAX_LETTERS).contains(&num_vars),
            "num_vars must be in 1..={}",
            MAX_LETTERS
        );

        let terms: Vec<Vec<Literal>> = (0..num_terms.max(1))
            .map(|_| {
                let mut term: Vec<Literal> = (0..num_vars)
                    .filter(|_| rng.random_range(0..3) > 0)
                    .map(|variable| Literal {
                        variable,
                        positive: true,
                    })
                    .collect();
                if term.is_empty() {
                    term.push(Literal {
                        variable: rng.random_range(0..num_vars),
                        positive: true,
                    });
                }
                term
            })
            .collect();

        let num_vars = terms
            .iter()
            .flatten()
            .map(|lit| lit.variable + 1)
            .max()
            .unwrap_or(0);
        Self { terms, num_vars }
    }
}

impl BooleanFunction for Expression {
    fn num_vars(&self) -> usize {
        self.num_vars
    }

    fn evaluate(&self, assignment: &[bool]) -> bool {
        self.terms
            .iter()
            .any(|term| term.iter().all(|lit| lit.holds(assignment)))
    }
}

impl FromStr for Expression {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut terms = Vec::new();
        for (i, text) in s.split('+').enumerate() {
            let mut term = Vec::new();
            let mut negated = false;
            for c in text.chars().filter(|c| !c.is_whitespace()) {
                match c {
                    '!' if !negated => negated = true,
                    c if c.is_ascii_alphabetic() => {
                        term.push(Literal {
                            variable: (c.to_ascii_uppercase() as u8 - b'A') as usize,
                            positive: !negated,
                        });
                        negated = false;
                    }
                    c => {
                        return Err(Error::InvalidArgument(format!(
                            "unexpected character {:?} in term {}",
                            c,
                            i + 1
                        )))
                    }
                }
            }
            if negated {
                return Err(Error::InvalidArgument(format!(
                    "dangling '!' in term {}",
                    i + 1
                )));
            }
            if term.is_empty() {
                return Err(Error::InvalidArgument(format!("term {} is empty", i + 1)));
            }
            terms.push(term);
        }
        Expression::new(terms)
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                write!(f, "+")?;
            }
            for lit in term {
                write!(f, "{}", lit)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use test_log::test;

    fn bits(s: &str) -> Vec<bool> {
        s.chars().map(|c| c == '1').collect()
    }

    #[test]
    fn test_parse_and_evaluate() {
        let e: Expression = "AB+C".parse().unwrap();
        assert_eq!(e.num_vars(), 3);
        assert_eq!(e.terms().len(), 2);
        assert!(!e.evaluate(&bits("000")));
        assert!(e.evaluate(&bits("001")));
        assert!(!e.evaluate(&bits("100")));
        assert!(e.evaluate(&bits("110")));
    }

    #[test]
    fn test_num_vars_is_highest_letter() {
        let e: Expression = "C".parse().unwrap();
        assert_eq!(e.num_vars(), 3);
        let e: Expression = "a + D".parse().unwrap();
        assert_eq!(e.num_vars(), 4);
    }

    #[test]
    fn test_lowercase_is_same_variable() {
        let upper: Expression = "AB".parse().unwrap();
        let lower: Expression = "ab".parse().unwrap();
        assert_eq!(upper, lower);
    }

    #[test]
    fn test_negation() {
        let e: Expression = "A!B".parse().unwrap();
        assert!(e.evaluate(&bits("10")));
        assert!(!e.evaluate(&bits("11")));
        assert_eq!(e.to_string(), "A!B");
    }

    #[test]
    fn test_parse_errors() {
        for text in ["", "A+", "+B", "A*B", "A!", "!!A", "A + 1"] {
            assert!(
                matches!(text.parse::<Expression>(), Err(Error::InvalidArgument(_))),
                "{:?} should not parse",
                text
            );
        }
    }

    #[test]
    fn test_display_roundtrip() {
        let e: Expression = "ab + !c d".parse().unwrap();
        assert_eq!(e.to_string(), "AB+!CD");
        assert_eq!(e.to_string().parse::<Expression>().unwrap(), e);
    }

    #[test]
    fn test_literal_display() {
        let lit = |variable, positive| Literal { variable, positive };
        assert_eq!(lit(0, true).to_string(), "A");
        assert_eq!(lit(25, false).to_string(), "!Z");
        assert_eq!(lit(26, true).to_string(), "x26");
        assert_eq!(lit(191, true).to_string(), "x191");
        assert_eq!(lit(usize::MAX, false).to_string(), format!("!x{}", usize::MAX));
    }

    #[test]
    fn test_random() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..50 {
            let e = Expression::random(&mut rng, 5, 3);
            assert_eq!(e.terms().len(), 3);
            assert!(e.num_vars() <= 5);
            assert!(e.terms().iter().all(|t| !t.is_empty()));
        }
    }

    #[test]
    fn test_from_fn() {
        let xor = from_fn(2, |a: &[bool]| a[0] ^ a[1]);
        assert_eq!(xor.num_vars(), 2);
        assert!(xor.evaluate(&[true, false]));
        assert!(!xor.evaluate(&[true, true]));
    }
}
