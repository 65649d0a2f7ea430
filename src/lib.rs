//! # datrie: an immutable double-array trie dictionary index
//!
//! This crate packs a finite set of unicode strings into a double-array trie:
//! two parallel integer arrays (`base`, `check`) in which every character
//! transition is a single constant-time indexed lookup. The packed form is
//! built once and is immutable afterwards, making it safe to share across
//! threads without synchronization.
//!
//! ## Key features
//!
//! - **Exact membership**: [`DoubleArrayTrie::contains`] and
//!   [`DoubleArrayTrie::key_index`]
//! - **Prefix recognition**: [`DoubleArrayTrie::contains_prefix`]
//! - **Prefix enumeration**: [`DoubleArrayTrie::common_prefixes`]
//! - **Multi-pattern text scanning**: [`DoubleArrayTrie::scan`]
//! - **Persistence**: gzip text dumps via [`DoubleArrayTrie::dump`] and
//!   [`DoubleArrayTrie::load`]
//!
//! ## Quick start
//!
//! ```
//! use datrie::DoubleArrayTrie;
//!
//! let trie = DoubleArrayTrie::build(["apple", "app", "banana"]);
//! assert!(trie.contains("app"));
//! assert_eq!(trie.common_prefixes("apples"), vec!["app", "apple"]);
//!
//! let hits = trie.scan("bananas and apples");
//! assert_eq!(hits.len(), 3);
//! ```

#![warn(missing_docs)]

pub mod alphabet;
mod builder;
pub mod error;
mod serial;
mod trie;

pub use alphabet::Alphabet;
pub use error::{DatrieError, Result};
pub use trie::{DoubleArrayTrie, DoubleArrayTrieConfig, ScanMatch};

/// Integer type of the packed array entries and trie states.
///
/// Positive values are states (the root is 1); negative values in `base` mark
/// ends of words. Wide enough for dictionaries up to ~2 billion slots.
pub type StateId = i32;
