use thiserror::Error;

/// Reasons an edit script cannot be replayed on a source sequence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplyError {
    #[error("operation at source position {old_pos} comes after position {cursor} was already consumed")]
    OutOfOrder { old_pos: usize, cursor: usize },

    #[error("source position {old_pos} is out of bounds for a source of length {len}")]
    OutOfBounds { old_pos: usize, len: usize },

    #[error("deleted element does not match the source element at position {old_pos}")]
    DeleteMismatch { old_pos: usize },

    #[error("insertion recorded at target position {new_pos} would land at {actual}")]
    InsertMisplaced { new_pos: usize, actual: usize },
}
