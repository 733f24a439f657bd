//! Error types for the text layer

/// Errors from trigger parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TriggerError {
    #[error("not a trigger character: {0:?}")]
    NotATrigger(char),
}
