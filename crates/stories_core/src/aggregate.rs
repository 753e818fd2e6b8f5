use crate::Story;

/// Total comment count over all stories.
pub fn sum_comments(items: &[Story]) -> u64 {
    items.iter().map(|story| u64::from(story.comment_count)).sum()
}

/// Single-slot cache: recomputes only when the key differs from the last one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Memo<K, V> {
    slot: Option<(K, V)>,
    computations: u64,
}

impl<K, V> Default for Memo<K, V> {
    fn default() -> Self {
        Self {
            slot: None,
            computations: 0,
        }
    }
}

impl<K: PartialEq + Clone, V> Memo<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_compute(&mut self, key: &K, compute: impl FnOnce(&K) -> V) -> &V {
        if !matches!(&self.slot, Some((cached, _)) if cached == key) {
            self.slot = None;
        }
        let computations = &mut self.computations;
        let (_, value) = self.slot.get_or_insert_with(|| {
            *computations += 1;
            (key.clone(), compute(key))
        });
        value
    }

    pub fn cached(&self) -> Option<&V> {
        self.slot.as_ref().map(|(_, value)| value)
    }

    /// Number of times the value has been (re)computed.
    pub fn computations(&self) -> u64 {
        self.computations
    }
}
