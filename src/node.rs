use crate::reference::Ref;
use crate::utils::{pairing3, MyHash};

/// A decision node: test `variable` (a level of the ordering) and continue to
/// `low` when the input bit is 0, to `high` when it is 1.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Node {
    pub variable: u32,
    pub low: Ref,
    pub high: Ref,
}

impl Node {
    /// Level sentinel of the terminal slots. Terminals sit below every level.
    pub const TERMINAL_VARIABLE: u32 = u32::MAX;

    pub(crate) const fn terminal(value: bool) -> Self {
        let r = Ref::terminal(value);
        Self {
            variable: Self::TERMINAL_VARIABLE,
            low: r,
            high: r,
        }
    }

    pub const fn is_terminal(&self) -> bool {
        self.variable == Self::TERMINAL_VARIABLE
    }
}

impl MyHash for Node {
    fn hash(&self) -> u64 {
        pairing3(
            self.variable as u64,
            self.low.get() as u64,
            self.high.get() as u64,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_depends_on_all_fields() {
        let a = Node {
            variable: 0,
            low: Ref::ZERO,
            high: Ref::ONE,
        };
        let b = Node { variable: 1, ..a };
        let c = Node {
            low: Ref::ONE,
            high: Ref::ZERO,
            ..a
        };
        assert_ne!(a.hash(), b.hash());
        assert_ne!(a.hash(), c.hash());
    }

    #[test]
    fn test_terminal_slot() {
        let t = Node::terminal(true);
        assert!(t.is_terminal());
        assert_eq!(t.low, Ref::ONE);
        assert_eq!(t.high, Ref::ONE);
    }
}
