//! In-memory religion store.
//!
//! Process-lifetime only: nothing survives a restart. A single mutex guards
//! both sequence allocation and insertion, so ids are unique and strictly
//! increasing even under concurrent requests. Ids are never reused, including
//! after removal.

use crate::types::{Religion, StoredReligion};
use chrono::Utc;
use tokio::sync::Mutex;

/// Shared in-memory store of generated religions, in insertion order.
#[derive(Debug, Default)]
pub struct ReligionStore {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    next_seq: u64,
    entries: Vec<StoredReligion>,
}

impl ReligionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new record under a freshly allocated
    /// `<prefix>_<seq>_<timestamp>` id and return it.
    pub async fn put(
        &self,
        prefix: &str,
        religion: Religion,
        generation_time: f64,
    ) -> StoredReligion {
        let created_at = Utc::now();
        let mut inner = self.inner.lock().await;
        inner.next_seq += 1;
        let id = format!("{}_{}_{}", prefix, inner.next_seq, created_at.timestamp());
        let stored = StoredReligion {
            id,
            religion,
            created_at,
            generation_time,
        };
        inner.entries.push(stored.clone());
        stored
    }

    /// Look up a record by id.
    pub async fn get(&self, id: &str) -> Option<StoredReligion> {
        let inner = self.inner.lock().await;
        inner.entries.iter().find(|e| e.id == id).cloned()
    }

    /// All records in insertion order.
    pub async fn list(&self) -> Vec<StoredReligion> {
        let inner = self.inner.lock().await;
        inner.entries.clone()
    }

    /// Replace the religion held under an existing id, keeping its id,
    /// creation time and position. Returns the updated record.
    pub async fn update(&self, id: &str, religion: Religion) -> Option<StoredReligion> {
        let mut inner = self.inner.lock().await;
        let entry = inner.entries.iter_mut().find(|e| e.id == id)?;
        entry.religion = religion;
        Some(entry.clone())
    }

    /// Remove a record by id, returning it if present.
    pub async fn remove(&self, id: &str) -> Option<StoredReligion> {
        let mut inner = self.inner.lock().await;
        let pos = inner.entries.iter().position(|e| e.id == id)?;
        Some(inner.entries.remove(pos))
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.inner.lock().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DeityType, GenerateRequest};

    fn sample_religion(name: &str) -> Religion {
        let request = GenerateRequest {
            language: "English".into(),
            ..Default::default()
        };
        let mut religion =
            crate::assemble::assemble_religion(&serde_json::json!({}), &request).unwrap();
        religion.name = name.into();
        religion
    }

    fn seq_of(id: &str) -> u64 {
        id.split('_').nth(1).unwrap().parse().unwrap()
    }

    #[tokio::test]
    async fn ids_are_unique_and_strictly_increasing() {
        let store = ReligionStore::new();
        let mut last_seq = 0;
        for i in 0..5 {
            let stored = store.put("religion", sample_religion(&format!("R{i}")), 0.0).await;
            assert!(stored.id.starts_with("religion_"));
            let seq = seq_of(&stored.id);
            assert!(seq > last_seq);
            last_seq = seq;
        }
        assert_eq!(store.len().await, 5);
    }

    #[tokio::test]
    async fn get_after_put_returns_identical_content() {
        let store = ReligionStore::new();
        let stored = store.put("religion", sample_religion("Solara"), 1.5).await;
        let fetched = store.get(&stored.id).await.unwrap();
        assert_eq!(fetched, stored);
        assert_eq!(fetched.religion.deity_type, DeityType::Polytheistic);
        assert!(store.get("religion_999_0").await.is_none());
    }

    #[tokio::test]
    async fn list_preserves_insertion_order() {
        let store = ReligionStore::new();
        for name in ["A", "B", "C"] {
            store.put("religion", sample_religion(name), 0.0).await;
        }
        let names: Vec<String> = store
            .list()
            .await
            .iter()
            .map(|s| s.religion.name.clone())
            .collect();
        assert_eq!(names, ["A", "B", "C"]);
    }

    #[tokio::test]
    async fn update_keeps_id_and_position() {
        let store = ReligionStore::new();
        let first = store.put("religion", sample_religion("First"), 0.0).await;
        store.put("religion", sample_religion("Second"), 0.0).await;

        let updated = store
            .update(&first.id, sample_religion("First Revised"))
            .await
            .unwrap();
        assert_eq!(updated.id, first.id);
        assert_eq!(updated.created_at, first.created_at);

        let listed = store.list().await;
        assert_eq!(listed[0].religion.name, "First Revised");
        assert!(store.update("missing", sample_religion("X")).await.is_none());
    }

    #[tokio::test]
    async fn removal_never_recycles_sequence_numbers() {
        let store = ReligionStore::new();
        let a = store.put("religion", sample_religion("A"), 0.0).await;
        store.remove(&a.id).await.unwrap();
        assert!(store.is_empty().await);

        let b = store.put("religion", sample_religion("B"), 0.0).await;
        assert!(seq_of(&b.id) > seq_of(&a.id));
        assert!(store.remove(&a.id).await.is_none());
    }

    #[tokio::test]
    async fn concurrent_puts_allocate_distinct_ids() {
        let store = std::sync::Arc::new(ReligionStore::new());
        let mut handles = Vec::new();
        for i in 0..16 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.put("religion", sample_religion(&format!("R{i}")), 0.0).await.id
            }));
        }
        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        let unique: std::collections::HashSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), ids.len());
    }
}
