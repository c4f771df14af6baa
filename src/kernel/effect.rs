use super::services::ports::storage::StorageKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// The state behind this key changed and should be written back.
    Persist(StorageKey),
}
