//! Prepared-statement cache (spec §4.6 "Prepared statements"): an LRU
//! keyed by exact SQL text, bounded by configured capacity, reference
//! counted so a statement still in flight is never evicted out from
//! under its caller.
//!
//! The teacher's equivalent (`sqlx-core/src/common/statement_cache.rs`)
//! wraps the `lru_cache` crate; that crate never otherwise appears in
//! this corpus, so this cache is instead built directly on `hashbrown`
//! (already part of the stack for exactly this purpose) plus an
//! explicit recency list, keeping the teacher's reference-counted
//! eviction policy rather than its dependency.

use std::collections::VecDeque;

use hashbrown::HashMap;

use crate::protocol::ColumnDefinition;

/// What `COM_STMT_PREPARE` returned for one SQL text: the server-side
/// statement id plus the parameter and result column definitions
/// (spec §3 "ColumnDefinition").
#[derive(Debug, Clone)]
pub struct ServerPrepareResult {
    pub statement_id: u32,
    pub params: Vec<ColumnDefinition>,
    pub columns: Vec<ColumnDefinition>,
}

struct Entry {
    result: ServerPrepareResult,
    ref_count: usize,
}

/// LRU cache of prepared statements for a single connection. Capacity
/// `0` disables caching: every [`install`](PrepareCache::install) is
/// handed straight back as though evicted, so the caller closes it
/// after use.
#[derive(Debug)]
pub struct PrepareCache {
    capacity: usize,
    entries: HashMap<String, Entry>,
    // Most-recently-used key at the front.
    recency: VecDeque<String>,
}

impl PrepareCache {
    pub fn new(capacity: usize) -> PrepareCache {
        PrepareCache {
            capacity,
            entries: HashMap::new(),
            recency: VecDeque::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// A cache hit: bumps the reference count and recency, returning
    /// the statement id to execute against.
    pub fn acquire(&mut self, sql: &str) -> Option<u32> {
        let statement_id = {
            let entry = self.entries.get_mut(sql)?;
            entry.ref_count += 1;
            entry.result.statement_id
        };
        self.touch(sql);
        tracing::debug!(target: "mariadb::prepare_cache", statement_id, "cache hit");
        Some(statement_id)
    }

    /// Installs a freshly prepared statement with one outstanding
    /// reference, returning an entry evicted to make room, if any
    /// (the caller must issue `COM_STMT_CLOSE` for it).
    pub fn install(&mut self, sql: &str, result: ServerPrepareResult) -> Option<ServerPrepareResult> {
        if self.capacity == 0 {
            return Some(result);
        }

        let evicted = if self.entries.len() >= self.capacity && !self.entries.contains_key(sql) {
            self.evict_one()
        } else {
            None
        };

        self.entries.insert(sql.to_owned(), Entry { result, ref_count: 1 });
        self.recency.push_front(sql.to_owned());

        if let Some(evicted) = &evicted {
            tracing::debug!(
                target: "mariadb::prepare_cache",
                statement_id = evicted.statement_id,
                "evicted lru statement to make room"
            );
        }
        tracing::debug!(target: "mariadb::prepare_cache", "installed statement in cache");

        evicted
    }

    /// Drops one outstanding reference. Does not itself evict; eviction
    /// only happens on the next [`install`](Self::install) that needs
    /// room, and only against entries with zero outstanding references.
    pub fn release(&mut self, sql: &str) {
        if let Some(entry) = self.entries.get_mut(sql) {
            entry.ref_count = entry.ref_count.saturating_sub(1);
        }
    }

    fn touch(&mut self, sql: &str) {
        if let Some(pos) = self.recency.iter().position(|k| k == sql) {
            let key = self.recency.remove(pos).unwrap();
            self.recency.push_front(key);
        }
    }

    /// Evicts the least-recently-used entry with no outstanding
    /// references. If every entry is in flight, the cache is allowed to
    /// temporarily exceed its configured capacity rather than close a
    /// statement still in use.
    fn evict_one(&mut self) -> Option<ServerPrepareResult> {
        let pos = self
            .recency
            .iter()
            .rposition(|key| self.entries.get(key).map(|e| e.ref_count == 0).unwrap_or(false))?;
        let key = self.recency.remove(pos)?;
        self.entries.remove(&key).map(|entry| entry.result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prepared(id: u32) -> ServerPrepareResult {
        ServerPrepareResult { statement_id: id, params: Vec::new(), columns: Vec::new() }
    }

    #[test]
    fn miss_then_hit_reuses_the_same_statement_id() {
        let mut cache = PrepareCache::new(2);
        assert!(cache.acquire("SELECT 1").is_none());

        let evicted = cache.install("SELECT 1", prepared(7));
        assert!(evicted.is_none());

        assert_eq!(cache.acquire("SELECT 1"), Some(7));
    }

    #[test]
    fn evicts_lru_entry_with_no_outstanding_references_when_full() {
        let mut cache = PrepareCache::new(1);
        cache.install("SELECT 1", prepared(1));
        cache.release("SELECT 1");

        let evicted = cache.install("SELECT 2", prepared(2));
        assert_eq!(evicted.unwrap().statement_id, 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn refuses_to_evict_an_entry_still_in_flight() {
        let mut cache = PrepareCache::new(1);
        cache.install("SELECT 1", prepared(1));
        // never released: ref_count stays 1

        let evicted = cache.install("SELECT 2", prepared(2));
        assert!(evicted.is_none());
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn zero_capacity_disables_caching() {
        let mut cache = PrepareCache::new(0);
        let evicted = cache.install("SELECT 1", prepared(1));
        assert_eq!(evicted.unwrap().statement_id, 1);
        assert_eq!(cache.len(), 0);
    }
}
