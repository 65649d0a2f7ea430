//! The immutable double-array trie and its query operations.
//!
//! A [`DoubleArrayTrie`] packs a dictionary into two parallel `i32` arrays so
//! that every character transition is a single indexed lookup. The slot for
//! the edge labeled `code` out of state `s` is `code + s - 2`; `check` at that
//! slot holds `s`, and `base` holds either the child's own state (positive) or
//! a negated key index (negative) marking an end of word.

use ahash::AHashSet;
use once_cell::sync::OnceCell;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::alphabet::Alphabet;
use crate::builder::Builder;
use crate::StateId;

/// Tuning knobs for array sizing during construction.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DoubleArrayTrieConfig {
    /// Minimum growth multiplier when the arrays must expand mid-placement.
    /// Values below 1.0 are clamped to 1.0.
    pub growth_factor: f64,
    /// Initial array length as a multiple of the key count. Values below 0.1
    /// are clamped to 0.1.
    pub capacity_factor: f64,
}

impl Default for DoubleArrayTrieConfig {
    fn default() -> Self {
        Self {
            growth_factor: 1.2,
            capacity_factor: 2.5,
        }
    }
}

/// A dictionary key found while scanning a text with [`DoubleArrayTrie::scan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanMatch {
    /// Index into the sorted key table; resolve with [`DoubleArrayTrie::keys`].
    pub key_index: usize,
    /// Byte offset of the match's starting position in the scanned text.
    pub offset: usize,
}

/// An immutable dictionary index over a set of strings, packed as a
/// double-array trie.
///
/// Built once with [`DoubleArrayTrie::build`]; all queries are read-only and
/// the finished value can be shared freely across threads.
///
/// # Examples
///
/// ```
/// use datrie::DoubleArrayTrie;
///
/// let trie = DoubleArrayTrie::build(["cat", "car", "card"]);
/// assert!(trie.contains("car"));
/// assert!(!trie.contains("ca"));
/// assert!(trie.contains_prefix("ca"));
/// ```
#[derive(Clone)]
pub struct DoubleArrayTrie {
    base: Vec<StateId>,
    check: Vec<StateId>,
    alphabet: Alphabet,
    keys: Vec<String>,
    vacant: OnceCell<usize>,
}

impl DoubleArrayTrie {
    /// Builds a trie from the given keys with the default configuration.
    ///
    /// The keys are copied and sorted lexicographically by code point;
    /// indexes returned by [`key_index`](Self::key_index) and
    /// [`scan`](Self::scan) refer to that sorted order. Duplicate keys are
    /// tolerated; empty keys are dropped. An empty input produces an empty
    /// trie on which every query misses.
    pub fn build<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::build_with_config(keys, &DoubleArrayTrieConfig::default())
    }

    /// Builds a trie with explicit sizing configuration.
    pub fn build_with_config<I, S>(keys: I, config: &DoubleArrayTrieConfig) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut keys: Vec<String> = keys
            .into_iter()
            .map(|k| k.as_ref().to_string())
            .filter(|k| !k.is_empty())
            .collect();
        keys.sort_unstable();

        if keys.is_empty() {
            return Self {
                base: Vec::new(),
                check: Vec::new(),
                alphabet: Alphabet::from_keys(&keys),
                keys,
                vacant: OnceCell::new(),
            };
        }

        let alphabet = Alphabet::from_keys(&keys);
        let chars: Vec<Vec<char>> = keys.iter().map(|k| k.chars().collect()).collect();
        let (base, check) = Builder::build(&chars, &alphabet, config);

        Self {
            base,
            check,
            alphabet,
            keys,
            vacant: OnceCell::new(),
        }
    }

    pub(crate) fn from_parts(
        base: Vec<StateId>,
        check: Vec<StateId>,
        alphabet: Alphabet,
        keys: Vec<String>,
    ) -> Self {
        Self {
            base,
            check,
            alphabet,
            keys,
            vacant: OnceCell::new(),
        }
    }

    /// Follows the edge labeled with `ch` out of `state`, or fails if no such
    /// edge exists.
    #[inline]
    fn step(&self, state: StateId, ch: char) -> Option<StateId> {
        let code = self.alphabet.code(ch);
        if code == 0 {
            return None;
        }
        let slot = (code + state - 2) as usize;
        if slot >= self.check.len() || self.check[slot] != state {
            return None;
        }
        Some(self.base[slot])
    }

    /// If `state` ends a dictionary key, decodes the key's index in the
    /// sorted table.
    #[inline]
    fn terminal_key(&self, state: StateId) -> Option<usize> {
        if state < 2 {
            return None;
        }
        match self.base.get((state - 2) as usize) {
            Some(&b) if b < 0 => Some((-b - 1) as usize),
            _ => None,
        }
    }

    /// Whether `word` is exactly one of the dictionary keys.
    pub fn contains(&self, word: &str) -> bool {
        self.key_index(word).is_some()
    }

    /// Looks up `word` and returns its index in the sorted key table, or
    /// `None` if the word is not a dictionary key.
    pub fn key_index(&self, word: &str) -> Option<usize> {
        if word.is_empty() {
            return None;
        }
        let mut state: StateId = 1;
        for ch in word.chars() {
            state = self.step(state, ch)?;
        }
        self.terminal_key(state)
    }

    /// Whether `word` is a prefix of at least one dictionary key. A full key
    /// is a prefix of itself.
    pub fn contains_prefix(&self, word: &str) -> bool {
        if word.is_empty() {
            return false;
        }
        let mut state: StateId = 1;
        for ch in word.chars() {
            match self.step(state, ch) {
                Some(next) => state = next,
                None => return false,
            }
        }
        true
    }

    /// Returns every dictionary key that is a prefix of `word`, ordered by
    /// increasing length.
    pub fn common_prefixes(&self, word: &str) -> Vec<&str> {
        let mut found = Vec::new();
        let mut state: StateId = 1;
        for ch in word.chars() {
            match self.step(state, ch) {
                Some(next) => state = next,
                None => break,
            }
            if let Some(index) = self.terminal_key(state) {
                found.push(self.keys[index].as_str());
            }
        }
        found
    }

    /// Scans `text` for every occurrence of every dictionary key.
    ///
    /// Each code-point position starts a fresh walk, so overlapping and
    /// nested matches are all visited; no longest-match filtering is applied.
    /// A key string is reported only once, at its first discovery, with the
    /// byte offset of that occurrence's starting position. Matches come out
    /// in discovery order.
    pub fn scan(&self, text: &str) -> Vec<ScanMatch> {
        let runes: Vec<char> = text.chars().collect();
        let mut seen = AHashSet::new();
        let mut matches = Vec::new();

        let mut offset = 0usize;
        for i in 0..runes.len() {
            let mut state: StateId = 1;
            for &ch in &runes[i..] {
                match self.step(state, ch) {
                    Some(next) => state = next,
                    None => break,
                }
                if let Some(index) = self.terminal_key(state) {
                    if seen.insert(index) {
                        matches.push(ScanMatch {
                            key_index: index,
                            offset,
                        });
                    }
                }
            }
            offset += runes[i].len_utf8();
        }
        matches
    }

    /// The length of the packed arrays.
    pub fn num_slots(&self) -> usize {
        self.base.len()
    }

    /// The number of keys stored in the dictionary.
    pub fn num_keys(&self) -> usize {
        self.keys.len()
    }

    /// Whether the dictionary holds no keys.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// The number of unused array slots, a coarse packing-density metric.
    /// Computed on first call and memoized.
    pub fn vacant_slots(&self) -> usize {
        *self
            .vacant
            .get_or_init(|| self.check.iter().filter(|&&c| c == 0).count())
    }

    /// The sorted key table.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// The character-to-code mapping used by this trie.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// The `base` array, for inspection.
    pub fn base(&self) -> &[StateId] {
        &self.base
    }

    /// The `check` array, for inspection.
    pub fn check(&self) -> &[StateId] {
        &self.check
    }
}

impl std::fmt::Debug for DoubleArrayTrie {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DoubleArrayTrie")
            .field("num_keys", &self.keys.len())
            .field("num_slots", &self.base.len())
            .field("alphabet_len", &self.alphabet.len())
            .finish()
    }
}
