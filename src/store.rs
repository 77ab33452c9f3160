//! The node store: canonical owner of every diagram node of a session.
//!
//! All diagram construction goes through [`NodeStore::make_node`], which
//! applies both reduction rules (a test whose children coincide is skipped,
//! and equal `(variable, low, high)` triples are shared). Two handles of one
//! session are therefore equal exactly when they denote the same function.
//!
//! # Sessions
//!
//! [`NodeStore::reset`] starts a session with a fresh bucket table and
//! [`NodeStore::teardown`] drops every node. Both take `&mut self`, while
//! node creation only needs `&self`. A [`Diagram`][crate::diagram::Diagram]
//! borrows its store, so no session can end while one of its diagrams is
//! still alive.
//!
//! Decision handles are never reused by a store: each session numbers its
//! nodes after the last handle of the previous one. A handle kept from an
//! earlier session is therefore unknown to the current one and rejected with
//! [`Error::InvalidArgument`].

use std::cell::RefCell;
use std::cmp::min;
use std::collections::{HashSet, VecDeque};
use std::fmt::Debug;

use log::{debug, info};

use crate::cache::Cache;
use crate::error::{Error, Result};
use crate::node::Node;
use crate::reference::Ref;
use crate::table::Table;

const MAX_CACHE_BITS: usize = 24;

/// Sizing of a [`NodeStore`].
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct StoreConfig {
    /// Number of buckets of the unique table.
    pub buckets: usize,
    /// Size of the OR computed table, as `2^cache_bits` slots.
    pub cache_bits: usize,
    /// Maximum number of nodes (terminals included) held by one session.
    pub node_limit: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            buckets: 10_000,
            cache_bits: 16,
            node_limit: 1 << 22,
        }
    }
}

impl StoreConfig {
    pub fn with_buckets(mut self, buckets: usize) -> Self {
        self.buckets = buckets;
        self
    }

    pub fn with_cache_bits(mut self, cache_bits: usize) -> Self {
        self.cache_bits = cache_bits;
        self
    }

    pub fn with_node_limit(mut self, node_limit: usize) -> Self {
        self.node_limit = node_limit;
        self
    }
}

pub struct NodeStore {
    config: StoreConfig,
    table: RefCell<Option<Table<Node>>>,
    cache: RefCell<Cache<(Ref, Ref), Ref>>,
    session: u64,
    /// Offset between arena slots and decision handles of this session.
    base: u32,
}

impl NodeStore {
    pub fn new(config: StoreConfig) -> Self {
        let cache_bits = min(config.cache_bits, MAX_CACHE_BITS);
        let mut store = Self {
            table: RefCell::new(None),
            cache: RefCell::new(Cache::new(cache_bits)),
            session: 0,
            base: 0,
            config,
        };
        let buckets = store.buckets();
        if let Err(e) = store.reset(buckets) {
            debug!("initial session not started: {}", e);
        }
        store
    }
}

impl Default for NodeStore {
    fn default() -> Self {
        NodeStore::new(StoreConfig::default())
    }
}

impl Debug for NodeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let table = self.table.borrow();
        f.debug_struct("NodeStore")
            .field("session", &self.session)
            .field("buckets", &table.as_ref().map(|t| t.num_buckets()))
            .field("nodes", &self.num_nodes())
            .finish()
    }
}

impl NodeStore {
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Counter identifying the current session, bumped by every
    /// [`reset`][Self::reset] and [`teardown`][Self::teardown].
    pub fn session(&self) -> u64 {
        self.session
    }

    /// Bucket count used for new sessions. A configured zero means one.
    pub fn buckets(&self) -> usize {
        self.config.buckets.max(1)
    }

    pub fn is_initialized(&self) -> bool {
        self.table.borrow().is_some()
    }

    pub fn cache(&self) -> std::cell::Ref<'_, Cache<(Ref, Ref), Ref>> {
        self.cache.borrow()
    }

    /// Drop every node and start a new session with `buckets` buckets.
    pub fn reset(&mut self, buckets: usize) -> Result<()> {
        if buckets == 0 {
            return Err(Error::InvalidArgument(
                "the unique table needs at least one bucket".to_string(),
            ));
        }
        self.teardown();

        let mut table = Table::new(buckets, self.config.node_limit.max(2));
        // Terminal slots occupy indices 0 and 1, matching `Ref::ZERO` and `Ref::ONE`.
        let zero = table.add(Node::terminal(false))?;
        let one = table.add(Node::terminal(true))?;
        debug_assert_eq!((zero, one), (Ref::ZERO.index(), Ref::ONE.index()));

        *self.table.get_mut() = Some(table);
        info!("Started session {} with {} buckets", self.session, buckets);
        Ok(())
    }

    /// Drop every node, terminals included. Safe on an empty store.
    pub fn teardown(&mut self) {
        if let Some(table) = self.table.get_mut().take() {
            let dropped = table.len().saturating_sub(2);
            info!(
                "Tearing down session {} ({} decision nodes)",
                self.session, dropped
            );
            let dropped = u32::try_from(dropped).unwrap_or(u32::MAX);
            self.base = self.base.saturating_add(dropped);
        }
        self.cache.get_mut().clear();
        self.session += 1;
    }

    /// Number of decision nodes stored in the current session.
    pub fn num_nodes(&self) -> usize {
        self.table
            .borrow()
            .as_ref()
            .map_or(0, |t| t.len().saturating_sub(2))
    }

    /// Return the shared terminal for `value`.
    pub fn terminal(&self, value: bool) -> Ref {
        Ref::terminal(value)
    }

    pub fn is_terminal(&self, node: Ref) -> bool {
        node.is_terminal()
    }

    /// Value of a terminal, `None` for decision nodes.
    pub fn value(&self, node: Ref) -> Option<bool> {
        match node {
            Ref::ZERO => Some(false),
            Ref::ONE => Some(true),
            _ => None,
        }
    }

    /// Arena slot of `node` in the current session.
    fn slot(&self, node: Ref) -> Option<usize> {
        if node.is_terminal() {
            return Some(node.index());
        }
        match node.get().checked_sub(self.base) {
            Some(i) if i > Ref::ONE.get() => Some(i as usize),
            _ => None,
        }
    }

    /// Handle of the decision node stored at arena slot `i`.
    fn handle(&self, i: usize) -> Result<Ref> {
        u32::try_from(i)
            .ok()
            .and_then(|i| self.base.checked_add(i))
            .map(Ref::new)
            .ok_or_else(|| Error::AllocationFailure("node handles exhausted".to_string()))
    }

    /// Decision node behind `node`, `None` for terminals and unknown handles.
    pub fn node(&self, node: Ref) -> Option<Node> {
        if node.is_terminal() {
            return None;
        }
        let i = self.slot(node)?;
        self.table.borrow().as_ref()?.value(i).copied()
    }

    /// Check that `node` belongs to the current session.
    fn check(&self, node: Ref) -> Result<()> {
        if node.is_terminal() || self.node(node).is_some() {
            Ok(())
        } else {
            Err(Error::InvalidArgument(format!("unknown node {}", node)))
        }
    }

    pub fn variable(&self, node: Ref) -> Option<u32> {
        self.node(node).map(|n| n.variable)
    }
    pub fn low(&self, node: Ref) -> Option<Ref> {
        self.node(node).map(|n| n.low)
    }
    pub fn high(&self, node: Ref) -> Option<Ref> {
        self.node(node).map(|n| n.high)
    }

    /// Level of `node`, with terminals placed below every level.
    fn level_of(&self, node: Ref) -> Result<u32> {
        if node.is_terminal() {
            return Ok(Node::TERMINAL_VARIABLE);
        }
        self.node(node)
            .map(|n| n.variable)
            .ok_or_else(|| Error::InvalidArgument(format!("unknown node {}", node)))
    }

    /// Return the canonical node testing `variable` with the given children.
    pub fn make_node(&self, variable: u32, low: Ref, high: Ref) -> Result<Ref> {
        debug!("mk(v = {}, low = {}, high = {})", variable, low, high);

        if variable == Node::TERMINAL_VARIABLE {
            return Err(Error::InvalidArgument(format!(
                "variable {} is reserved for terminals",
                variable
            )));
        }
        if !self.is_initialized() {
            return Err(Error::Uninitialized);
        }
        self.check(low)?;
        self.check(high)?;

        // Redundant test
        if low == high {
            debug!("mk: redundant test {} == {}", low, high);
            return Ok(low);
        }

        let mut table = self.table.borrow_mut();
        let table = table.as_mut().ok_or(Error::Uninitialized)?;

        for child in [low, high] {
            let Some(node) = self.slot(child).and_then(|i| table.value(i)) else {
                return Err(Error::InvalidArgument(format!("unknown node {}", child)));
            };
            // Terminal slots carry the largest level, so they always pass.
            if node.variable <= variable {
                return Err(Error::InvalidArgument(format!(
                    "child {} at level {} is not below level {}",
                    child, node.variable, variable
                )));
            }
        }

        let i = table.put(Node {
            variable,
            low,
            high,
        })?;
        self.handle(i)
    }

    /// Logical OR of two diagrams of the current session.
    pub fn apply_or(&self, f: Ref, g: Ref) -> Result<Ref> {
        debug!("apply_or(f = {}, g = {})", f, g);

        self.check(f)?;
        self.check(g)?;

        if f.is_terminal() && g.is_terminal() {
            return Ok(self.terminal(f == Ref::ONE || g == Ref::ONE));
        }
        if f == Ref::ONE || g == Ref::ONE {
            debug!("or(1,G) => 1");
            return Ok(Ref::ONE);
        }
        if f == Ref::ZERO {
            debug!("or(0,G) => G");
            return Ok(g);
        }
        if g == Ref::ZERO {
            debug!("or(F,0) => F");
            return Ok(f);
        }
        if f == g {
            debug!("or(F,F) => F");
            return Ok(f);
        }

        // OR is commutative, so both operand orders share a cache entry.
        let key = if f < g { (f, g) } else { (g, f) };
        if let Some(&res) = self.cache.borrow().get(&key) {
            debug!("cache: apply_or(f = {}, g = {}) -> {}", f, g, res);
            return Ok(res);
        }

        // Determine the top variable
        let i = self.level_of(f)?;
        let j = self.level_of(g)?;
        let m = min(i, j);
        debug!("min variable = {}", m);

        let (f0, f1) = self.top_cofactors(f, m)?;
        let (g0, g1) = self.top_cofactors(g, m)?;

        let low = self.apply_or(f0, g0)?;
        let high = self.apply_or(f1, g1)?;

        let res = self.make_node(m, low, high)?;
        debug!("computed: apply_or(f = {}, g = {}) -> {}", f, g, res);
        self.cache.borrow_mut().insert(key, res);
        Ok(res)
    }

    /// OR of all `nodes`, `terminal(false)` for none.
    pub fn apply_or_many(&self, nodes: impl IntoIterator<Item = Ref>) -> Result<Ref> {
        nodes
            .into_iter()
            .try_fold(self.terminal(false), |acc, node| self.apply_or(acc, node))
    }

    /// Children of `node` for level `v`, or `node` itself twice when it does
    /// not test `v`.
    pub fn top_cofactors(&self, node: Ref, v: u32) -> Result<(Ref, Ref)> {
        match self.node(node) {
            Some(n) if n.variable == v => Ok((n.low, n.high)),
            _ if self.level_of(node)? > v => Ok((node, node)),
            _ => Err(Error::InvalidArgument(format!(
                "node {} lies above level {}",
                node, v
            ))),
        }
    }

    /// Distinct decision nodes reachable from `nodes`.
    pub fn descendants(&self, nodes: impl IntoIterator<Item = Ref>) -> HashSet<Ref> {
        let mut visited = HashSet::new();
        let mut queue = VecDeque::from_iter(nodes);

        while let Some(node) = queue.pop_front() {
            if node.is_terminal() || visited.contains(&node) {
                continue;
            }
            if let Some(n) = self.node(node) {
                visited.insert(node);
                queue.push_back(n.low);
                queue.push_back(n.high);
            }
        }

        visited
    }

    /// Number of distinct decision nodes reachable from `f`.
    pub fn size(&self, f: Ref) -> usize {
        let size = self.descendants([f]).len();
        debug!("size({}) -> {}", f, size);
        size
    }
}
