//! Non-persistent checkpoint store

use crate::{Checkpoint, CheckpointStore, Result, StoreOutcome};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use tracing::debug;

/// Checkpoint store held in process memory. Contents are lost on drop.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<(String, u64), u64>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl CheckpointStore for MemoryStore {
    fn initialize(&self) -> Result<()> {
        Ok(())
    }

    fn floor_lookup(&self, file: &str, line: u64) -> Result<Option<Checkpoint>> {
        let entries = self.entries.lock();
        let found = entries
            .range((file.to_string(), 0)..=(file.to_string(), line))
            .next_back()
            .map(|((_, found_line), offset)| Checkpoint::new(file, *found_line, *offset));
        Ok(found)
    }

    fn store(&self, file: &str, line: u64, offset: u64) -> Result<StoreOutcome> {
        let mut entries = self.entries.lock();
        if let Some(&existing) = entries.get(&(file.to_string(), line)) {
            debug!(
                "Skip storing position '{}' for file '{}', line '{}'. Already contains value '{}'",
                offset, file, line, existing
            );
            return Ok(StoreOutcome::Skipped { existing });
        }

        entries.insert((file.to_string(), line), offset);
        debug!("Stored position '{}' for file '{}', line '{}'", offset, file, line);
        Ok(StoreOutcome::Stored)
    }

    fn dump(&self) -> Result<Vec<Checkpoint>> {
        Ok(self
            .entries
            .lock()
            .iter()
            .map(|((file, line), offset)| Checkpoint::new(file.clone(), *line, *offset))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_store_twice_keeps_first_offset() {
        let store = MemoryStore::new();
        assert!(store.store("f", 7, 70).unwrap().is_stored());
        assert_eq!(store.store("f", 7, 1).unwrap(), StoreOutcome::Skipped { existing: 70 });
        assert_eq!(store.floor_lookup("f", 7).unwrap().unwrap().offset, 70);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_floor_matches_brute_force() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let store = MemoryStore::new();
        let mut reference: Vec<(u64, u64)> = Vec::new();

        for _ in 0..200 {
            let line = rng.gen_range(0..5_000u64);
            let offset = line * 31;
            if store.store("f", line, offset).unwrap().is_stored() {
                reference.push((line, offset));
            }
            store.store("other", line + 1, 0).unwrap();
        }

        for _ in 0..500 {
            let query = rng.gen_range(0..6_000u64);
            let expected = reference
                .iter()
                .filter(|(line, _)| *line <= query)
                .max_by_key(|(line, _)| *line)
                .map(|&(line, offset)| Checkpoint::new("f", line, offset));
            assert_eq!(store.floor_lookup("f", query).unwrap(), expected);
        }
    }
}
