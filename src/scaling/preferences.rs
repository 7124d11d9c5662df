//! Viewer preferences
//!
//! The unit system is a per-user setting, not per recipe.

use crate::db::KeyValueStore;
use crate::measure::UnitSystem;

pub const UNIT_SYSTEM_KEY: &str = "unit-system";

/// Stored unit system, `Metric` when unset or unreadable
pub fn load_unit_system<S: KeyValueStore>(store: &S) -> UnitSystem {
    match store.get(UNIT_SYSTEM_KEY) {
        Ok(Some(raw)) => UnitSystem::from_str(&raw).unwrap_or_else(|| {
            tracing::debug!("Ignoring unknown unit system {:?}", raw);
            UnitSystem::default()
        }),
        Ok(None) => UnitSystem::default(),
        Err(e) => {
            tracing::warn!("Failed to read unit system preference: {}", e);
            UnitSystem::default()
        }
    }
}

pub fn save_unit_system<S: KeyValueStore>(store: &S, system: UnitSystem) {
    if let Err(e) = store.set(UNIT_SYSTEM_KEY, system.as_str()) {
        tracing::warn!("Failed to persist unit system preference: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;

    #[test]
    fn test_defaults_to_metric() {
        let store = MemoryStore::new();
        assert_eq!(load_unit_system(&store), UnitSystem::Metric);
    }

    #[test]
    fn test_round_trip() {
        let store = MemoryStore::new();
        save_unit_system(&store, UnitSystem::Us);
        assert_eq!(load_unit_system(&store), UnitSystem::Us);
        assert_eq!(store.get(UNIT_SYSTEM_KEY).unwrap().as_deref(), Some("us"));
    }

    #[test]
    fn test_garbage_is_ignored() {
        let store = MemoryStore::new();
        store.set(UNIT_SYSTEM_KEY, "cubits").unwrap();
        assert_eq!(load_unit_system(&store), UnitSystem::Metric);
    }
}
