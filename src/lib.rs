//! Order-statistic AVL trees for Rust.
//!
//! This crate provides [`OSTreeMap`], an ordered map stored in a binary search tree whose
//! nodes cache the height and size of their subtrees. On top of the usual keyed
//! operations it answers rank queries in O(log n):
//!
//! - [`get_by_rank`](OSTreeMap::get_by_rank) - Get the entry at a given sorted position
//! - [`rank_of`](OSTreeMap::rank_of) - Get the sorted position of a key
//! - [`range_between`](OSTreeMap::range_between) - Collect the values between two ranks
//! - Indexing by [`Rank`] - e.g., `map[Rank(0)]` for the first value
//!
//! # Example
//!
//! ```
//! use ordstat_tree::{AvlTreeMap, Error, Rank};
//!
//! let mut scores = AvlTreeMap::new();
//! scores.insert("Alice", 100).unwrap();
//! scores.insert("Bob", 85).unwrap();
//! scores.insert("Carol", 92).unwrap();
//!
//! // Keys are unique; a second insert is rejected.
//! assert_eq!(scores.insert("Bob", 70), Err(Error::DuplicateKey));
//! assert_eq!(scores.get(&"Bob"), Some(&85));
//!
//! // Order-statistic operations (O(log n))
//! let (name, score) = scores.get_by_rank(1).unwrap();
//! assert_eq!((*name, *score), ("Bob", 85));
//! assert_eq!(scores.rank_of(&"Carol"), Some(2));
//! assert_eq!(scores[Rank(0)], 100);
//!
//! // Inclusive rank ranges
//! assert_eq!(scores.range_between(0, 1), Ok(vec![&100, &85]));
//! ```
//!
//! # Balancing
//!
//! The map is generic over a [`Balance`] policy. [`Avl`] (the default) rotates nodes on
//! the way back up from every insert and remove so that sibling subtrees never differ in
//! height by more than one. [`Unbalanced`] skips the rotations and behaves like a plain
//! binary search tree; [`BstMap`] names that configuration.
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Typed failures** - Duplicate keys, missing keys and bad rank ranges are reported as [`Error`]
//! - **Stack-safe teardown** - Dropping, clearing and consuming a map never recurse
//! - **Structured tracing** - Rotations and rejected operations emit [`tracing`] events

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![deny(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod error;
mod order_statistic;
mod raw;

pub mod ostree_map;

pub use error::{Direction, Error, Result};
pub use order_statistic::Rank;
pub use ostree_map::{AvlTreeMap, BstMap, NodeRef, OSTreeMap};
pub use raw::{Avl, Balance, Unbalanced};
