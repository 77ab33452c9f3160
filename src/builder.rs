//! Diagram construction by minterm enumeration.
//!
//! The builder evaluates the function on all `2^n` assignments and ORs one
//! single-path diagram per satisfying assignment into an accumulator. The
//! cost is exponential in the number of variables no matter how small the
//! final diagram is, hence the [`MAX_VARIABLES`] cap.

use log::{debug, info};

use crate::diagram::Diagram;
use crate::error::{Error, Result};
use crate::expr::{BooleanFunction, Expression};
use crate::ordering::VarOrder;
use crate::reference::Ref;
use crate::store::NodeStore;

/// Largest variable count the builder enumerates.
pub const MAX_VARIABLES: usize = 20;

impl NodeStore {
    /// Single-path diagram accepting exactly `assignment`.
    ///
    /// The chain is built bottom-up, from the last level to the root, so
    /// every child exists before its parent is requested.
    pub fn minterm(&self, assignment: &[bool], order: &VarOrder) -> Result<Ref> {
        let mut current = self.terminal(true);
        for level in (0..assignment.len()).rev() {
            let variable = order.position(level).ok_or(Error::OutOfRange {
                index: level,
                len: order.len(),
            })?;
            let bit = *assignment.get(variable).ok_or(Error::OutOfRange {
                index: variable,
                len: assignment.len(),
            })?;
            current = if bit {
                self.make_node(level as u32, self.terminal(false), current)?
            } else {
                self.make_node(level as u32, current, self.terminal(false))?
            };
        }
        Ok(current)
    }

    /// Root of the diagram of `function` under `order`, in the current session.
    pub(crate) fn build_root<F>(&self, function: &F, order: &VarOrder) -> Result<Ref>
    where
        F: BooleanFunction + ?Sized,
    {
        let n = function.num_vars();
        if n > MAX_VARIABLES {
            return Err(Error::InvalidArgument(format!(
                "{} variables exceed the enumeration limit of {}",
                n, MAX_VARIABLES
            )));
        }
        order.check(n)?;

        let mut assignment = vec![false; n];
        let mut root = self.terminal(false);
        let mut minterms = 0usize;

        for combination in 0..(1u64 << n) {
            for (j, bit) in assignment.iter_mut().enumerate() {
                *bit = (combination >> j) & 1 == 1;
            }
            if function.evaluate(&assignment) {
                let m = self.minterm(&assignment, order)?;
                root = self.apply_or(root, m)?;
                minterms += 1;
            }
        }

        debug!("built root {} from {} minterms under {}", root, minterms, order);
        Ok(root)
    }

    /// Build `function` under `order` in the current session.
    ///
    /// The store is not reset, so the result shares nodes with every other
    /// diagram of this session.
    pub fn build<F>(&self, function: &F, order: &VarOrder) -> Result<Diagram<'_>>
    where
        F: BooleanFunction + ?Sized,
    {
        let root = self.build_root(function, order)?;
        let diagram = Diagram::new(self, order.clone(), function.num_vars(), root);
        info!(
            "Built diagram under {} with {} nodes",
            order,
            diagram.size()
        );
        Ok(diagram)
    }

    /// Parse `expression` and build it under `ordering` in a fresh session.
    ///
    /// On failure the session is torn down and no partial diagram survives.
    pub fn create(&mut self, expression: &str, ordering: &str) -> Result<Diagram<'_>> {
        if expression.is_empty() || ordering.is_empty() {
            return Err(Error::InvalidArgument(
                "expression and ordering must not be empty".to_string(),
            ));
        }
        let function: Expression = expression.parse()?;
        let order = VarOrder::parse(ordering, function.num_vars())?;

        let buckets = self.buckets();
        self.reset(buckets)?;
        let root = match self.build_root(&function, &order) {
            Ok(root) => root,
            Err(e) => {
                self.teardown();
                return Err(e);
            }
        };

        let diagram = Diagram::new(self, order, function.num_vars(), root);
        info!(
            "Created diagram of {} under {} with {} nodes",
            function,
            diagram.order(),
            diagram.size()
        );
        Ok(diagram)
    }
}
