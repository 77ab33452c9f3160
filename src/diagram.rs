use std::fmt::{Debug, Formatter};

use crate::error::{Error, Result};
use crate::ordering::{parse_assignment, VarOrder};
use crate::reference::Ref;
use crate::store::NodeStore;

/// A Boolean function under one variable ordering.
///
/// The diagram borrows the [`NodeStore`] that owns its nodes. Cloning copies
/// the ordering and the root handle, never nodes.
#[derive(Clone)]
pub struct Diagram<'a> {
    store: &'a NodeStore,
    order: VarOrder,
    num_vars: usize,
    root: Ref,
    size: usize,
}

impl<'a> Diagram<'a> {
    pub(crate) fn new(store: &'a NodeStore, order: VarOrder, num_vars: usize, root: Ref) -> Self {
        let size = store.size(root);
        Self {
            store,
            order,
            num_vars,
            root,
            size,
        }
    }

    pub fn store(&self) -> &'a NodeStore {
        self.store
    }
    pub fn order(&self) -> &VarOrder {
        &self.order
    }
    pub fn num_vars(&self) -> usize {
        self.num_vars
    }
    pub fn root(&self) -> Ref {
        self.root
    }

    /// Number of distinct decision nodes reachable from the root.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Evaluate on a `'0'`/`'1'` string indexed by original variable.
    pub fn evaluate(&self, assignment: &str) -> Result<bool> {
        let bits = parse_assignment(assignment)?;
        self.evaluate_bits(&bits)
    }

    /// Evaluate on `assignment[i]` = value of original variable `i`.
    pub fn evaluate_bits(&self, assignment: &[bool]) -> Result<bool> {
        let mut current = self.root;
        while let Some(node) = self.store.node(current) {
            let level = node.variable as usize;
            let variable = self.order.position(level).ok_or(Error::OutOfRange {
                index: level,
                len: self.order.len(),
            })?;
            let bit = *assignment.get(variable).ok_or(Error::OutOfRange {
                index: variable,
                len: assignment.len(),
            })?;
            current = if bit { node.high } else { node.low };
        }
        self.store.value(current).ok_or(Error::OutOfRange {
            index: current.index(),
            len: self.store.num_nodes() + 2,
        })
    }

    /// Nested `node:(symbol, high, low)` rendering, for debugging.
    pub fn to_bracket_string(&self) -> String {
        self.bracket(self.root)
    }

    fn bracket(&self, node: Ref) -> String {
        match self.store.node(node) {
            None => match self.store.value(node) {
                Some(true) => "(1)".to_string(),
                Some(false) => "(0)".to_string(),
                None => format!("{}:?", node),
            },
            Some(n) => format!(
                "{}:({}, {}, {})",
                node,
                self.order.symbol(n.variable as usize).unwrap_or('?'),
                self.bracket(n.high),
                self.bracket(n.low)
            ),
        }
    }
}

impl Debug for Diagram<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Diagram")
            .field("order", &self.order.to_string())
            .field("num_vars", &self.num_vars)
            .field("root", &self.root)
            .field("size", &self.size)
            .finish()
    }
}
