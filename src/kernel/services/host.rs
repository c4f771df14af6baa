use tracing::debug;

use super::adapters::persistence::Persistence;
use super::ports::settings::Settings;
use super::ports::storage::KeyValueStore;
use crate::kernel::language::{fallback_execution_languages, ExecutionLanguage};
use crate::kernel::{Action, DispatchResult, Store, StoreError};

/// Owns the store and writes back whatever each action changed.
pub struct WorkspaceHost<S: KeyValueStore> {
    store: Store,
    persistence: Persistence<S>,
}

impl<S: KeyValueStore> WorkspaceHost<S> {
    /// Rehydrates from `storage` and settles the execution language on the
    /// fallback list until the backend provides a real one.
    pub fn open(storage: S, settings: &Settings) -> Self {
        let persistence = Persistence::new(storage);
        let store = Store::new(persistence.load_state());
        let mut host = Self { store, persistence };
        host.install_languages(fallback_execution_languages(), Some(settings.default_language_id));
        host
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn persistence(&self) -> &Persistence<S> {
        &self.persistence
    }

    /// A move that changes nothing comes back as an empty result.
    pub fn dispatch(&mut self, action: Action) -> Result<DispatchResult, StoreError> {
        match self.store.dispatch(action) {
            Ok(result) => {
                self.persistence.apply(&result.effects, self.store.state());
                Ok(result)
            }
            Err(e) if e.is_noop() => {
                debug!(error = %e, "ignoring no-op action");
                Ok(DispatchResult::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Runs direct store calls and persists what they changed.
    pub fn update<R>(&mut self, f: impl FnOnce(&mut Store) -> R) -> R {
        let out = f(&mut self.store);
        self.flush();
        out
    }

    pub fn install_languages(&mut self, languages: Vec<ExecutionLanguage>, configured: Option<u32>) {
        self.update(|store| store.set_execution_languages(languages, configured));
    }

    fn flush(&mut self) {
        let effects = self.store.take_effects();
        if !effects.is_empty() {
            self.persistence.apply(&effects, self.store.state());
        }
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/services/host.rs"]
mod tests;
