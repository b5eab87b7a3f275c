//! An order-statistic set for Rust, built on a self-adjusting (splay) tree.
//!
//! This crate provides [`SplaySet`], an ordered set of unique elements with
//! O(log n) *amortized* membership operations plus order-statistic counting
//! queries:
//!
//! - [`range_count`](SplaySet::range_count) - How many stored elements lie in
//!   the inclusive range `[a, b]`
//! - [`count_less_than`](SplaySet::count_less_than) /
//!   [`count_less_or_equal`](SplaySet::count_less_or_equal) - How many stored
//!   elements compare below a probe value
//!
//! # Example
//!
//! ```
//! use splay_ost::SplaySet;
//!
//! let mut readings = SplaySet::new();
//! readings.insert(1);
//! readings.insert(10);
//! readings.insert(3);
//! readings.insert(8);
//!
//! assert!(readings.contains(&8));
//! assert_eq!(readings.len(), 4);
//!
//! // Order-statistic query: how many readings fall in [2, 9]?
//! assert_eq!(readings.range_count(&2, &9), 2); // 3 and 8
//! ```
//!
//! # Self-adjustment
//!
//! Every operation, including lookups and counting queries, finishes by
//! splaying the last node it touched to the root. Recently accessed elements
//! therefore sit near the top of the tree, which is what gives the amortized
//! O(log n) bound and makes the structure shine under skewed access patterns.
//! It is also why the "read" operations on [`SplaySet`] take `&mut self`: a
//! lookup reshapes the tree even though it never changes the set of elements.
//!
//! The tree carries no explicit balance invariant - balance is emergent from
//! the splaying history. The invariant it does carry, and the one every
//! mutation must preserve, is the subtree-size augmentation that powers the
//! counting queries.
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library
//!   dependency
//! - **No `unsafe`** - Nodes live in an arena and link to each other by
//!   index, so parent back-references need neither raw pointers nor `Rc`
//!   cycles
//! - **O(log n) amortized** insert, remove, contains, and range counting

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod raw;

pub mod splay_set;

pub use splay_set::SplaySet;
