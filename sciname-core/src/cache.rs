//! Bounded result cache.
//!
//! Parsing is deterministic, so a result can be shared by every caller
//! that passes the same verbatim string. Entries are complete
//! `Arc<ParsedName>` values; a concurrent miss may parse the same string
//! twice and store either of two identical results.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::name::ParsedName;

/// Least-recently-used map from verbatim string to parse result.
#[derive(Debug)]
pub struct NameCache {
    /// `None` is unbounded, `Some(0)` stores nothing.
    capacity: Option<usize>,
    inner: Mutex<Lru>,
}

#[derive(Debug, Default)]
struct Lru {
    entries: HashMap<String, Entry>,
    /// Last-use tick → key, oldest first.
    recency: BTreeMap<u64, String>,
    tick: u64,
}

#[derive(Debug)]
struct Entry {
    name: Arc<ParsedName>,
    used: u64,
}

impl NameCache {
    pub fn new(capacity: Option<usize>) -> Self {
        Self {
            capacity,
            inner: Mutex::new(Lru::default()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.capacity != Some(0)
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    pub fn get(&self, verbatim: &str) -> Option<Arc<ParsedName>> {
        if !self.is_enabled() {
            return None;
        }
        let mut lru = self.lock();
        let tick = lru.next_tick();
        let Lru { entries, recency, .. } = &mut *lru;
        let entry = entries.get_mut(verbatim)?;
        recency.remove(&entry.used);
        entry.used = tick;
        recency.insert(tick, verbatim.to_string());
        Some(Arc::clone(&entry.name))
    }

    pub fn insert(&self, name: Arc<ParsedName>) {
        if !self.is_enabled() {
            return;
        }
        let mut lru = self.lock();
        let tick = lru.next_tick();
        let key = name.verbatim().to_string();
        if let Some(old) = lru.entries.insert(key.clone(), Entry { name, used: tick }) {
            lru.recency.remove(&old.used);
        }
        lru.recency.insert(tick, key);

        if let Some(capacity) = self.capacity {
            while lru.entries.len() > capacity {
                let Some((_, oldest)) = lru.recency.pop_first() else {
                    break;
                };
                lru.entries.remove(&oldest);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        let mut lru = self.lock();
        lru.entries.clear();
        lru.recency.clear();
    }

    // Poisoning is ignored: stored values are always complete.
    fn lock(&self) -> MutexGuard<'_, Lru> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Lru {
    fn next_tick(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }
}
