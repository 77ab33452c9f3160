//! # bdd-order: reduced ordered BDDs from sum-of-products expressions
//!
//! **`bdd-order`** builds the canonical Reduced Ordered Binary Decision Diagram
//! (ROBDD) of a Boolean function given as a textual sum of products, evaluates
//! it on input assignments, and searches random variable orderings for a
//! smaller diagram.
//!
//! ## Canonicity
//!
//! Every node is created through the [`NodeStore`][crate::store::NodeStore],
//! which never stores two nodes with the same `(variable, low, high)` triple
//! and never creates a node whose children coincide. For a fixed ordering
//! each function therefore has exactly one root handle per session, and the
//! node count of a diagram is the size of the minimal ROBDD.
//!
//! ## Basic Usage
//!
//! ```rust
//! use bdd_order::store::NodeStore;
//!
//! let mut store = NodeStore::default();
//!
//! // f = AB + C under the ordering A, B, C
//! let f = store.create("AB+C", "ABC")?;
//! assert_eq!(f.size(), 3);
//!
//! // Character i of the assignment is the value of variable 'A' + i.
//! assert!(f.evaluate("110")?);
//! assert!(!f.evaluate("100")?);
//! # Ok::<(), bdd_order::error::Error>(())
//! ```
//!
//! Ordering search keeps the smallest of several trial diagrams:
//!
//! ```rust
//! use bdd_order::search::SearchConfig;
//! use bdd_order::store::NodeStore;
//!
//! let mut store = NodeStore::default();
//! let config = SearchConfig::default().with_trials(50).with_seed(1);
//! let f = store.create_with_search("AD+BE+CF", &config)?;
//! assert!(f.size() < 14);
//! # Ok::<(), bdd_order::error::Error>(())
//! ```
//!
//! ## Scaling
//!
//! Construction enumerates all `2^n` assignments of an `n`-variable function,
//! so it is only practical for small `n` (see
//! [`MAX_VARIABLES`][crate::builder::MAX_VARIABLES]).
//!
//! ## Core Components
//!
//! - **[`store`]**: sessions, the canonical node constructor and the OR operator.
//! - **[`builder`]**: minterm enumeration into a [`Diagram`][crate::diagram::Diagram].
//! - **[`search`]**: random-restart ordering search.
//! - **[`expr`]**: the evaluator interface and sum-of-products expressions.

pub mod builder;
pub mod cache;
pub mod diagram;
pub mod error;
pub mod expr;
pub mod node;
pub mod ordering;
pub mod reference;
pub mod search;
pub mod store;
pub mod table;
pub mod utils;
