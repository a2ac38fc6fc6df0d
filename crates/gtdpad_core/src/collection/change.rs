//! Structural change events emitted by ordered collections.
//!
//! # Responsibility
//! - Describe one structural edit precisely enough for derived views to
//!   follow it without re-scanning the source.
//!
//! # Invariants
//! - Every index refers to a source position at the moment of the edit.
//! - `Move` carries the moved value; the value itself is unchanged.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub type CollectionResult<T> = Result<T, CollectionError>;

/// One structural mutation of an ordered collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionChange<T> {
    /// `value` now lives at `index`; later elements shifted right.
    Insert { index: usize, value: T },
    /// `value` moved from `from` to `to`.
    Move { from: usize, to: usize, value: T },
    /// `value` was taken out of `index`; later elements shifted left.
    Remove { index: usize, value: T },
    /// The element at `index` was overwritten.
    Replace { index: usize, old: T, new: T },
    /// Contents changed too much to describe; consumers must rescan.
    Reset,
}

impl<T> CollectionChange<T> {
    /// Short stable name used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Insert { .. } => "insert",
            Self::Move { .. } => "move",
            Self::Remove { .. } => "remove",
            Self::Replace { .. } => "replace",
            Self::Reset => "reset",
        }
    }
}

/// Errors raised by ordered collections and their derived views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionError {
    /// An index was outside `0..len` (or `0..=len` for insertion).
    OutOfRange { index: usize, len: usize },
    /// A derived window disagreed with its source and was rebuilt.
    WindowDesync { kind: &'static str },
}

impl Display for CollectionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfRange { index, len } => {
                write!(f, "index {index} out of range for length {len}")
            }
            Self::WindowDesync { kind } => write!(
                f,
                "window desynchronized from source on {kind}; window was rebuilt"
            ),
        }
    }
}

impl Error for CollectionError {}

pub(crate) fn check_index(index: usize, len: usize) -> CollectionResult<()> {
    if index < len {
        Ok(())
    } else {
        Err(CollectionError::OutOfRange { index, len })
    }
}

pub(crate) fn check_insert_index(index: usize, len: usize) -> CollectionResult<()> {
    if index <= len {
        Ok(())
    } else {
        Err(CollectionError::OutOfRange { index, len })
    }
}

#[cfg(test)]
mod tests {
    use super::{check_index, check_insert_index, CollectionChange, CollectionError};

    #[test]
    fn insert_index_may_equal_len() {
        assert!(check_insert_index(3, 3).is_ok());
        assert_eq!(
            check_insert_index(4, 3),
            Err(CollectionError::OutOfRange { index: 4, len: 3 })
        );
        assert!(check_index(3, 3).is_err());
    }

    #[test]
    fn kind_names_are_stable() {
        let change: CollectionChange<u8> = CollectionChange::Move {
            from: 1,
            to: 0,
            value: 7,
        };
        assert_eq!(change.kind(), "move");
        assert_eq!(CollectionChange::<u8>::Reset.kind(), "reset");
    }
}
