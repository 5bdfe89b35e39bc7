// Error types for store operations

/// Errors returned by `TaskListStore` mutations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Index does not address a task in the current sequence
    #[error("no task at index {index} (list length {len})")]
    IndexOutOfRange { index: usize, len: usize },
}
