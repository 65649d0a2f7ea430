//! Dense code assignment for the characters of a key set.
//!
//! Each distinct code point appearing in the keys receives a positive code,
//! assigned `1..=n` in ascending code-point order. Code 0 is reserved as the
//! end-of-word sentinel and is never assigned to a character, so a lookup
//! returning 0 means "not in the alphabet".

use ahash::{AHashMap, AHashSet};

use crate::StateId;

/// Bijection between the code points of a key set and the codes `1..=n`.
#[derive(Clone, Debug, PartialEq)]
pub struct Alphabet {
    codes: AHashMap<char, StateId>,
}

impl Alphabet {
    /// Scans the keys, collects the distinct code points, and assigns codes
    /// in ascending code-point order.
    pub(crate) fn from_keys<S: AsRef<str>>(keys: &[S]) -> Self {
        let mut chars: Vec<char> = keys
            .iter()
            .flat_map(|k| k.as_ref().chars())
            .collect::<AHashSet<_>>()
            .into_iter()
            .collect();
        chars.sort_unstable();

        let codes = chars
            .into_iter()
            .enumerate()
            .map(|(i, c)| (c, i as StateId + 1))
            .collect();
        Self { codes }
    }

    /// Rebuilds an alphabet from explicit `(char, code)` pairs, as read back
    /// from a dump.
    pub(crate) fn from_pairs(pairs: impl IntoIterator<Item = (char, StateId)>) -> Self {
        Self {
            codes: pairs.into_iter().collect(),
        }
    }

    /// Returns the code for a character, or 0 if the character is unmapped.
    #[inline]
    pub fn code(&self, ch: char) -> StateId {
        self.codes.get(&ch).copied().unwrap_or(0)
    }

    /// The number of distinct characters in the alphabet.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Whether the alphabet maps no characters at all.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// All `(char, code)` pairs in ascending code order, for serialization.
    pub(crate) fn pairs(&self) -> Vec<(char, StateId)> {
        let mut pairs: Vec<(char, StateId)> = self.codes.iter().map(|(&c, &v)| (c, v)).collect();
        pairs.sort_unstable_by_key(|&(_, code)| code);
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_follow_code_point_order() {
        let alphabet = Alphabet::from_keys(&["BEIZ", "AC", "DG"]);
        // Distinct characters sorted: A B C D E G I Z
        assert_eq!(alphabet.code('A'), 1);
        assert_eq!(alphabet.code('B'), 2);
        assert_eq!(alphabet.code('C'), 3);
        assert_eq!(alphabet.code('D'), 4);
        assert_eq!(alphabet.code('E'), 5);
        assert_eq!(alphabet.code('G'), 6);
        assert_eq!(alphabet.code('I'), 7);
        assert_eq!(alphabet.code('Z'), 8);
        assert_eq!(alphabet.len(), 8);
    }

    #[test]
    fn unmapped_char_returns_zero() {
        let alphabet = Alphabet::from_keys(&["abc"]);
        assert_eq!(alphabet.code('z'), 0);
        assert_ne!(alphabet.code('a'), 0);
    }

    #[test]
    fn empty_keys_yield_empty_alphabet() {
        let keys: [&str; 0] = [];
        let alphabet = Alphabet::from_keys(&keys);
        assert!(alphabet.is_empty());
        assert_eq!(alphabet.code('a'), 0);
    }

    #[test]
    fn multibyte_characters() {
        let alphabet = Alphabet::from_keys(&["中文", "中图"]);
        // '中' < '图' < '文' by code point
        assert_eq!(alphabet.code('中'), 1);
        assert_eq!(alphabet.code('图'), 2);
        assert_eq!(alphabet.code('文'), 3);
    }

    #[test]
    fn pairs_round_trip() {
        let alphabet = Alphabet::from_keys(&["hello", "world"]);
        let rebuilt = Alphabet::from_pairs(alphabet.pairs());
        assert_eq!(alphabet, rebuilt);
    }

    #[test]
    fn pairs_sorted_by_code() {
        let alphabet = Alphabet::from_keys(&["dcba"]);
        let pairs = alphabet.pairs();
        for w in pairs.windows(2) {
            assert!(w[0].1 < w[1].1);
        }
    }
}
