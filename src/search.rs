//! Random-restart search for a small variable ordering.
//!
//! Each trial builds the function in a fresh session and only keeps the
//! ordering and its size. The identity ordering is always tried first, so
//! the result is never larger than the identity diagram. This samples a
//! handful of the `n!` orderings and gives no optimality guarantee.

use log::{debug, info, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::builder::MAX_VARIABLES;
use crate::diagram::Diagram;
use crate::error::{Error, Result};
use crate::expr::{BooleanFunction, Expression};
use crate::ordering::VarOrder;
use crate::store::NodeStore;

#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct SearchConfig {
    /// Number of orderings to try. Defaults to the number of variables.
    pub trials: Option<usize>,
    /// Seed of the ordering generator. Drawn at random when absent.
    pub seed: Option<u64>,
}

impl SearchConfig {
    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = Some(trials);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Result of [`NodeStore::best_order`].
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SearchOutcome {
    pub order: VarOrder,
    pub size: usize,
    /// Size under the identity ordering, if that trial succeeded.
    pub identity_size: Option<usize>,
    pub trials: usize,
    /// Trials whose construction failed.
    pub skipped: usize,
    pub seed: u64,
}

impl NodeStore {
    fn trial_size<F>(&mut self, function: &F, order: &VarOrder) -> Result<usize>
    where
        F: BooleanFunction + ?Sized,
    {
        let buckets = self.buckets();
        self.reset(buckets)?;
        let root = self.build_root(function, order)?;
        Ok(self.size(root))
    }

    /// Try several orderings of `function` and return the smallest one found.
    ///
    /// Every trial runs in its own session. The store is torn down afterwards.
    /// Returns `None` when no trial produced a diagram.
    pub fn best_order<F>(&mut self, function: &F, config: &SearchConfig) -> Option<SearchOutcome>
    where
        F: BooleanFunction + ?Sized,
    {
        let n = function.num_vars();
        if n > MAX_VARIABLES {
            warn!(
                "Cannot search orderings of {} variables (limit is {})",
                n, MAX_VARIABLES
            );
            return None;
        }
        let trials = config.trials.unwrap_or(n).max(1);
        let seed = config.seed.unwrap_or_else(rand::random);
        info!(
            "Searching {} orderings of {} variables (seed = {})",
            trials, n, seed
        );

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut best: Option<(VarOrder, usize)> = None;
        let mut identity_size = None;
        let mut skipped = 0;

        for trial in 0..trials {
            let order = if trial == 0 {
                VarOrder::identity(n)
            } else {
                VarOrder::random(n, &mut rng)
            };

            match self.trial_size(function, &order) {
                Ok(size) => {
                    debug!("trial {}: {} -> {} nodes", trial, order, size);
                    if trial == 0 {
                        identity_size = Some(size);
                    }
                    if best.as_ref().map_or(true, |&(_, s)| size < s) {
                        best = Some((order, size));
                    }
                }
                Err(e) => {
                    warn!("Skipping ordering {}: {}", order, e);
                    skipped += 1;
                }
            }
        }
        self.teardown();

        let (order, size) = best?;
        info!("Best ordering {} with {} nodes", order, size);
        Some(SearchOutcome {
            order,
            size,
            identity_size,
            trials,
            skipped,
            seed,
        })
    }

    /// Build `expression` under the best ordering found with the default
    /// [`SearchConfig`].
    pub fn create_with_best_order(&mut self, expression: &str) -> Result<Diagram<'_>> {
        self.create_with_search(expression, &SearchConfig::default())
    }

    /// Build `expression` under the best ordering found by a search with
    /// `config`, in a fresh session.
    pub fn create_with_search(
        &mut self,
        expression: &str,
        config: &SearchConfig,
    ) -> Result<Diagram<'_>> {
        if expression.is_empty() {
            return Err(Error::InvalidArgument("expression is empty".to_string()));
        }
        let function: Expression = expression.parse()?;
        let outcome = self
            .best_order(&function, config)
            .ok_or(Error::NoViableOrdering)?;

        let buckets = self.buckets();
        self.reset(buckets)?;
        let root = match self.build_root(&function, &outcome.order) {
            Ok(root) => root,
            Err(e) => {
                self.teardown();
                return Err(e);
            }
        };
        Ok(Diagram::new(self, outcome.order, function.num_vars(), root))
    }
}
