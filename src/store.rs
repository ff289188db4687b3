use crate::database::KvStorage;
use crate::error::{Error, Result};
use crate::id;
use crate::types::WorkoutRecord;
use std::collections::HashSet;

/// Key the whole workout list is stored under.
pub const STORAGE_KEY: &str = "workout";

/// Ordered workout collection mirrored to durable storage.
///
/// Insertion order is display order. Every `add`/`remove` rewrites the full list under
/// [`STORAGE_KEY`].
pub struct WorkoutStore<S> {
    storage: S,
    records: Vec<WorkoutRecord>,
}

impl<S: KvStorage> WorkoutStore<S> {
    /// Load whatever the storage holds. Never fails: anything unreadable becomes an
    /// empty store.
    pub fn hydrate(storage: S) -> Self {
        let records = match storage.get(STORAGE_KEY) {
            Ok(Some(text)) => match decode_records(&text) {
                Ok(records) => records,
                Err(e) => {
                    tracing::warn!(err = %e, "discarding stored workouts");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(err = %e, "could not read stored workouts; starting empty");
                Vec::new()
            }
        };

        for r in &records {
            id::observe(r.id());
        }
        tracing::info!(workouts = records.len(), "store hydrated");

        Self { storage, records }
    }

    /// Append and persist. A failed write rolls the append back.
    pub fn add(&mut self, record: WorkoutRecord) -> Result<&[WorkoutRecord]> {
        self.records.push(record);
        if let Err(e) = self.persist() {
            self.records.pop();
            return Err(e);
        }

        if let Some(r) = self.records.last() {
            tracing::info!(id = r.id(), kind = %r.workout_type(), "workout added");
        }
        Ok(&self.records)
    }

    /// Remove the workout with `id` and persist. Unknown ids are a no-op returning
    /// `Ok(None)`; nothing is written in that case.
    pub fn remove(&mut self, id: &str) -> Result<Option<WorkoutRecord>> {
        let Some(idx) = self.records.iter().position(|r| r.id() == id) else {
            crate::dlog!("remove_miss id={id}");
            return Ok(None);
        };

        let removed = self.records.remove(idx);
        if let Err(e) = self.persist() {
            self.records.insert(idx, removed);
            return Err(e);
        }

        tracing::info!(id, remaining = self.records.len(), "workout removed");
        Ok(Some(removed))
    }

    /// Bump the interaction counter in memory. Returns `false` when `id` is unknown.
    pub fn increment_interaction(&mut self, id: &str) -> bool {
        let Some(r) = self.records.iter_mut().find(|r| r.id() == id) else {
            crate::dlog!("increment_miss id={id}");
            return false;
        };
        r.bump_interaction();
        crate::dlog!("increment id={id} count={}", r.interaction_count());
        true
    }

    pub fn all(&self) -> &[WorkoutRecord] {
        &self.records
    }

    pub fn find(&self, id: &str) -> Option<&WorkoutRecord> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn get(&self, id: &str) -> Result<&WorkoutRecord> {
        self.find(id).ok_or_else(|| Error::RecordNotFound(id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drop every workout and erase the storage key.
    pub fn clear(&mut self) -> Result<()> {
        self.storage.remove(STORAGE_KEY)?;
        let n = self.records.len();
        self.records.clear();
        tracing::info!(removed = n, "store cleared");
        Ok(())
    }

    pub const fn storage(&self) -> &S {
        &self.storage
    }

    fn persist(&mut self) -> Result<()> {
        let text = encode_records(&self.records)?;
        self.storage.set(STORAGE_KEY, &text)
    }
}

pub fn encode_records(records: &[WorkoutRecord]) -> Result<String> {
    serde_json::to_string(records).map_err(Error::Encode)
}

/// Parse a stored list. Records breaking the construction invariants, or two records
/// sharing an id, make the whole payload invalid.
pub fn decode_records(text: &str) -> Result<Vec<WorkoutRecord>> {
    let records: Vec<WorkoutRecord> =
        serde_json::from_str(text).map_err(Error::StorageDeserialize)?;

    {
        let mut seen = HashSet::with_capacity(records.len());
        for r in &records {
            r.validate()?;
            if !seen.insert(r.id()) {
                return Err(Error::DuplicateId(r.id().to_string()));
            }
        }
    }
    Ok(records)
}
