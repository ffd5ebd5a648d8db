//! Augmentable red-black trees over caller-owned node storage.
//!
//! Nodes live in a store the caller owns (a `Vec`, a slice, or the provided
//! [`Slab`]) and embed their own [`Links`]. The tree never allocates: it only
//! relinks nodes that already exist, addressed by [`Handle`]. Ordering is supplied
//! per call as a comparator, so one node type can be ordered by different keys.
//!
//! - [`engine`] - Free functions implementing insertion, removal, search and navigation
//! - [`RbTree`] - A thin wrapper that keeps track of the root and the node count
//! - [`RbNode::structure_fixup`] - A hook for augmented data, recomputed bottom-up
//!   after every structural change
//!
//! # Example
//!
//! ```
//! use akakuro::{Links, RbNode, RbTree, Slab};
//!
//! // A node that knows how many nodes its subtree holds.
//! struct Interval {
//!     start: u32,
//!     subtree: usize,
//!     links: Links,
//! }
//!
//! impl RbNode for Interval {
//!     fn links(&self) -> &Links {
//!         &self.links
//!     }
//!
//!     fn links_mut(&mut self) -> &mut Links {
//!         &mut self.links
//!     }
//!
//!     fn structure_fixup(&mut self, left: Option<&Self>, right: Option<&Self>) {
//!         self.subtree = 1 + left.map_or(0, |n| n.subtree) + right.map_or(0, |n| n.subtree);
//!     }
//!
//!     fn structure_validate(&self, left: Option<&Self>, right: Option<&Self>) -> bool {
//!         self.subtree == 1 + left.map_or(0, |n| n.subtree) + right.map_or(0, |n| n.subtree)
//!     }
//! }
//!
//! let mut tree = RbTree::new(Slab::new());
//! for start in [40, 10, 30, 20] {
//!     let h = tree.store_mut().insert(Interval { start, subtree: 1, links: Links::new() });
//!     tree.insert_by(h, |a, b| a.start.cmp(&b.start));
//! }
//!
//! let root = tree.root().unwrap();
//! assert_eq!(tree.store().get(root).subtree, 4);
//!
//! let at_least_25 = tree.lower_bound_by(|n| n.start.cmp(&25)).unwrap();
//! assert_eq!(tree.store().get(at_least_25).start, 30);
//!
//! assert!(tree.validate().is_ok());
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **No unsafe code** - Nodes are addressed by index, not by pointer
//! - **Allocation-free operations** - Insert and remove are O(log n) relinks
//!
//! # Diagnostics
//!
//! [`engine::validate`] and [`RbTree::validate`] check every invariant and report
//! the first defect as a [`ValidationError`]. Insertions and removals through
//! [`RbTree`] emit `tracing` events at the `TRACE` level.

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

mod handle;
mod node;
mod slab;
mod store;

pub mod engine;
pub mod tree;

pub use engine::ValidationError;
pub use handle::Handle;
pub use node::{Color, Direction, Links, RbNode};
pub use slab::Slab;
pub use store::NodeStore;
pub use tree::RbTree;
