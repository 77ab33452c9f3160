//! Variable orderings and textual input assignments.

use std::fmt::{Display, Formatter};

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{Error, Result};
use crate::expr::MAX_LETTERS;

/// Sequence of variable letters, root level first.
///
/// Level `i` of a diagram tests the variable named by the `i`-th symbol.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct VarOrder {
    /// Original variable index per level.
    positions: Vec<usize>,
}

impl VarOrder {
    /// Parse an ordering for a function of `num_vars` variables.
    ///
    /// The text must consist of distinct letters, be at least `num_vars`
    /// long, and its first `num_vars` letters must name variables below
    /// `num_vars`.
    pub fn parse(text: &str, num_vars: usize) -> Result<Self> {
        if text.is_empty() {
            return Err(Error::InvalidArgument("ordering is empty".to_string()));
        }
        let positions = text
            .chars()
            .map(|c| {
                if c.is_ascii_alphabetic() {
                    Ok((c.to_ascii_uppercase() as u8 - b'A') as usize)
                } else {
                    Err(Error::InvalidArgument(format!(
                        "unexpected symbol {:?} in ordering",
                        c
                    )))
                }
            })
            .collect::<Result<Vec<_>>>()?;

        let order = Self { positions };
        order.check(num_vars)?;
        Ok(order)
    }

    /// `A`, `B`, `C`, ...
    pub fn identity(num_vars: usize) -> Self {
        assert!(num_vars <= MAX_LETTERS, "at most {} variables", MAX_LETTERS);
        Self {
            positions: (0..num_vars).collect(),
        }
    }

    /// Uniformly shuffled permutation of the first `num_vars` letters.
    pub fn random<R: Rng + ?Sized>(num_vars: usize, rng: &mut R) -> Self {
        let mut order = Self::identity(num_vars);
        order.positions.shuffle(rng);
        order
    }

    /// Verify that this ordering can drive a function of `num_vars` variables.
    pub fn check(&self, num_vars: usize) -> Result<()> {
        if self.positions.len() < num_vars {
            return Err(Error::InvalidArgument(format!(
                "ordering has {} symbols, function needs {}",
                self.positions.len(),
                num_vars
            )));
        }
        let mut seen = [false; MAX_LETTERS];
        for (level, &position) in self.positions.iter().enumerate() {
            if seen[position] {
                return Err(Error::InvalidArgument(format!(
                    "variable {} appears twice in ordering",
                    self.symbol_of(position)
                )));
            }
            seen[position] = true;
            if level < num_vars && position >= num_vars {
                return Err(Error::InvalidArgument(format!(
                    "ordering level {} names {}, outside the {} function variables",
                    level,
                    self.symbol_of(position),
                    num_vars
                )));
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Original variable tested at `level`.
    pub fn position(&self, level: usize) -> Option<usize> {
        self.positions.get(level).copied()
    }

    /// Letter of the variable tested at `level`.
    pub fn symbol(&self, level: usize) -> Option<char> {
        self.position(level).map(|p| self.symbol_of(p))
    }

    fn symbol_of(&self, position: usize) -> char {
        (b'A' + position as u8) as char
    }
}

impl Display for VarOrder {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for &p in &self.positions {
            write!(f, "{}", self.symbol_of(p))?;
        }
        Ok(())
    }
}

/// Parse a `'0'`/`'1'` string; character `i` is the value of variable `i`.
pub fn parse_assignment(text: &str) -> Result<Vec<bool>> {
    text.chars()
        .map(|c| match c {
            '0' => Ok(false),
            '1' => Ok(true),
            c => Err(Error::InvalidInput(c)),
        })
        .collect()
}

pub fn format_assignment(bits: &[bool]) -> String {
    bits.iter().map(|&b| if b { '1' } else { '0' }).collect()
}
