use std::fmt::{Display, Formatter};

/// Handle of a node owned by a [`NodeStore`][crate::store::NodeStore].
///
/// Handles `0` and `1` are the terminals, shared by every session. Decision
/// handles start at `2` and are never handed out twice by the same store, so
/// a handle from a finished session does not name any node of a later one.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Ref(u32);

impl Ref {
    pub const ZERO: Ref = Ref(0);
    pub const ONE: Ref = Ref(1);

    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Return the terminal handle for `value`.
    pub const fn terminal(value: bool) -> Self {
        if value {
            Self::ONE
        } else {
            Self::ZERO
        }
    }

    /// Return the internal representation of the reference.
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Return the handle as a `usize`.
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub const fn is_terminal(self) -> bool {
        self.0 <= Self::ONE.0
    }
}

impl Display for Ref {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "@{}", self.0)
    }
}
