//! Use Case Factory
//!
//! Creates use cases with infrastructure dependencies wired up.
//! This is the dependency injection point for the application.

use std::sync::Arc;

use crate::application::LedgerUseCase;
use crate::config::{Config, LedgerBackend};
use crate::domain::ports::LedgerStore;
use crate::error::HerbicalibResult;
use crate::infrastructure::{JsonlLedgerStore, MemoryLedgerStore, SqliteLedgerStore};

/// Open the durable store selected by `config`
pub fn create_ledger_store(config: &Config) -> HerbicalibResult<Arc<dyn LedgerStore>> {
    let path = config.ledger_path();
    tracing::debug!(backend = %config.ledger.backend, path = %path.display(), "opening ledger");

    let store: Arc<dyn LedgerStore> = match config.ledger.backend {
        LedgerBackend::File => Arc::new(JsonlLedgerStore::new(path)),
        LedgerBackend::Sqlite => Arc::new(SqliteLedgerStore::open(path)?),
    };
    Ok(store)
}

/// Create a ledger use case with all dependencies wired up
pub fn create_ledger_use_case(config: &Config) -> HerbicalibResult<LedgerUseCase> {
    let store = create_ledger_store(config)?;
    Ok(LedgerUseCase::new(store, config.delete_authorization()))
}

/// Create a ledger use case whose writes stay in memory
///
/// Starts from a snapshot of the configured store, so commands behave as
/// they would for real without persisting anything.
pub fn create_dry_run_ledger_use_case(config: &Config) -> HerbicalibResult<LedgerUseCase> {
    let snapshot = create_ledger_store(config)?.load_all()?;
    let store = Arc::new(MemoryLedgerStore::with_entries(snapshot));
    Ok(LedgerUseCase::new(store, config.delete_authorization()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::Category;
    use tempfile::tempdir;

    fn config_at(backend: LedgerBackend, path: std::path::PathBuf) -> Config {
        let mut config = Config::default();
        config.ledger.backend = backend;
        config.ledger.path = Some(path);
        config
    }

    #[test]
    fn file_backend_persists_between_use_cases() {
        let dir = tempdir().unwrap();
        let config = config_at(LedgerBackend::File, dir.path().join("ledger.jsonl"));

        create_ledger_use_case(&config)
            .unwrap()
            .record_usage(Category::Pesticide, 2.0)
            .unwrap();

        let ledger = create_ledger_use_case(&config).unwrap();
        assert_eq!(ledger.load_all().unwrap().len(), 1);
        assert!(ledger.location().ends_with("ledger.jsonl"));
    }

    #[test]
    fn sqlite_backend_persists_between_use_cases() {
        let dir = tempdir().unwrap();
        let config = config_at(LedgerBackend::Sqlite, dir.path().join("ledger.sqlite"));

        create_ledger_use_case(&config)
            .unwrap()
            .record_usage(Category::Fertilizer, 1.0)
            .unwrap();

        let ledger = create_ledger_use_case(&config).unwrap();
        assert_eq!(ledger.load_all().unwrap().len(), 1);
    }

    #[test]
    fn dry_run_does_not_touch_durable_store() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ledger.jsonl");
        let config = config_at(LedgerBackend::File, path.clone());

        create_ledger_use_case(&config)
            .unwrap()
            .record_usage(Category::Containers, 1.0)
            .unwrap();

        let dry = create_dry_run_ledger_use_case(&config).unwrap();
        dry.record_usage(Category::Containers, 2.0).unwrap();
        assert_eq!(dry.load_all().unwrap().len(), 2);

        let real = create_ledger_use_case(&config).unwrap();
        assert_eq!(real.load_all().unwrap().len(), 1);
    }
}
