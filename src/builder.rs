//! Construction of the packed `base`/`check` arrays.
//!
//! The builder never materializes the trie. A node is a span `[left, right)`
//! of the sorted key table at a given depth; its children are derived by
//! scanning the span. For each parent it picks a state `s` such that every
//! child slot `code + s - 2` is vacant, writes the children, and recurses
//! depth-first. All mutable construction state is scoped to one [`Builder`]
//! value, so concurrent builds cannot interfere.

use ahash::AHashSet;
use log::{debug, trace};

use crate::alphabet::Alphabet;
use crate::trie::DoubleArrayTrieConfig;
use crate::StateId;

/// A conceptual trie node: the span of sorted keys it covers and the code of
/// the edge leading to it. `code` 0 marks an end-of-word child.
#[derive(Clone, Copy)]
struct Span {
    code: StateId,
    left: usize,
    right: usize,
    depth: usize,
}

pub(crate) struct Builder<'a> {
    keys: &'a [Vec<char>],
    alphabet: &'a Alphabet,
    base: Vec<StateId>,
    check: Vec<StateId>,
    /// States already handed out; a state is never assigned twice.
    used: AHashSet<StateId>,
    /// High-water mark: one past the largest slot any placed child occupies.
    size: usize,
    growth_factor: f64,
}

impl<'a> Builder<'a> {
    /// Runs the full placement over `keys` (sorted, no empty entries) and
    /// returns the finished arrays, truncated to the used length.
    pub(crate) fn build(
        keys: &'a [Vec<char>],
        alphabet: &'a Alphabet,
        config: &DoubleArrayTrieConfig,
    ) -> (Vec<StateId>, Vec<StateId>) {
        let initial = (keys.len() as f64 * config.capacity_factor.max(0.1)) as usize;
        let mut builder = Builder {
            keys,
            alphabet,
            base: vec![0; initial],
            check: vec![0; initial],
            used: AHashSet::new(),
            size: 0,
            growth_factor: config.growth_factor.max(1.0),
        };

        let root = Span {
            code: 0,
            left: 0,
            right: keys.len(),
            depth: 0,
        };
        let children = builder.fetch(&root);
        builder.place(&children);

        builder.base.truncate(builder.size);
        builder.check.truncate(builder.size);
        builder.base.shrink_to_fit();
        builder.check.shrink_to_fit();

        debug!(
            "placed {} keys into {} slots ({} states)",
            keys.len(),
            builder.size,
            builder.used.len()
        );
        (builder.base, builder.check)
    }

    /// Derives the ordered children of `parent` by scanning its key span.
    ///
    /// Keys shorter than the depth have already terminated above and are
    /// skipped; a key of exactly the parent's depth contributes the code-0
    /// end-of-word child. Sorted order guarantees such keys lead the span, so
    /// the children come out with a possible leading code 0 followed by
    /// strictly increasing positive codes.
    fn fetch(&self, parent: &Span) -> Vec<Span> {
        let mut children: Vec<Span> = Vec::new();
        let mut prev_code = 0;

        for i in parent.left..parent.right {
            let word = &self.keys[i];
            if parent.depth > word.len() {
                continue;
            }
            let code = if parent.depth == word.len() {
                0
            } else {
                self.alphabet.code(word[parent.depth])
            };

            // Open a new child on every code change; the empty-children case
            // also opens one so a leading terminal is not folded into the
            // initial prev_code of 0.
            if code != prev_code || children.is_empty() {
                if let Some(last) = children.last_mut() {
                    last.right = i;
                }
                children.push(Span {
                    code,
                    left: i,
                    right: 0,
                    depth: parent.depth + 1,
                });
            }
            prev_code = code;
        }

        if let Some(last) = children.last_mut() {
            last.right = parent.right;
        }
        children
    }

    /// Finds a state `s` so that every child slot `code + s - 2` is vacant
    /// and `s` itself is unallocated.
    ///
    /// Probing starts at the lowest candidate position `c_1 + 1` every time;
    /// together with the depth-first placement order this reproduces the
    /// packing the dump format's existing consumers expect. Growth triggered
    /// by a candidate that is later rejected is kept, never rescinded.
    fn search(&mut self, children: &[Span]) -> StateId {
        let first = children[0].code;
        let last = children[children.len() - 1].code;
        let mut pos = first + 1;

        let state = 'probe: loop {
            let state = pos - first;
            pos += 1;

            if self.used.contains(&state) {
                continue;
            }

            let max_index = (state + last - 2) as usize;
            if max_index >= self.check.len() {
                self.grow(((max_index + 1) as f64 * self.growth_factor) as usize);
            }

            if self.check[(first + state - 2) as usize] != 0 {
                continue;
            }
            for child in &children[1..] {
                if self.check[(child.code + state - 2) as usize] != 0 {
                    continue 'probe;
                }
            }
            break state;
        };

        self.used.insert(state);
        let used_size = (state + last - 1) as usize;
        if used_size > self.size {
            self.size = used_size;
        }
        state
    }

    /// Assigns `children` their shared parent state, writes their `check`
    /// entries, and recurses into each child in order. A child whose own
    /// fetch comes back empty is an end of word: its `base` records the
    /// negated key index. Otherwise `base` records the state of the child's
    /// children group.
    fn place(&mut self, children: &[Span]) -> StateId {
        let state = self.search(children);

        for child in children {
            self.check[(child.code + state - 2) as usize] = state;
        }

        for child in children {
            let grandchildren = self.fetch(child);
            let slot = (child.code + state - 2) as usize;
            if grandchildren.is_empty() {
                self.base[slot] = -(child.left as StateId) - 1;
            } else {
                let child_state = self.place(&grandchildren);
                self.base[slot] = child_state;
            }
        }
        state
    }

    fn grow(&mut self, new_len: usize) {
        trace!("growing arrays {} -> {} slots", self.check.len(), new_len);
        self.base.resize(new_len, 0);
        self.check.resize(new_len, 0);
    }
}
