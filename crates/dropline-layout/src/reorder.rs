#![forbid(unsafe_code)]

//! Apply a drop to plain ordered id vectors.
//!
//! Hosts that keep each list's order as a `Vec` of ids (rather than a tree)
//! use these helpers to commit a placement. Positions address the target
//! sequence *after* the moved id has been removed, which is exactly what
//! [`Placement::insertion_index`](crate::Placement::insertion_index) reports.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Insertion point in a post-removal sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropPosition {
    /// Before the element currently at this index; clamped to the length.
    At(usize),
    /// After the last element.
    End,
}

impl DropPosition {
    /// Decode a signed position where any negative value means "append".
    #[must_use]
    pub fn from_signed(raw: i64) -> Self {
        usize::try_from(raw).map_or(Self::End, Self::At)
    }

    /// Concrete index for a sequence of `len` elements.
    #[must_use]
    pub fn resolve(self, len: usize) -> usize {
        match self {
            Self::At(index) => index.min(len),
            Self::End => len,
        }
    }
}

/// Failure to apply a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReorderError {
    /// The moved id is not in the source sequence.
    ItemNotFound,
}

impl fmt::Display for ReorderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ItemNotFound => write!(f, "moved item not found in source order"),
        }
    }
}

impl std::error::Error for ReorderError {}

/// Move `item` to `position` within `order`. Returns its new index.
pub fn move_within<K: PartialEq>(
    order: &mut Vec<K>,
    item: &K,
    position: DropPosition,
) -> Result<usize, ReorderError> {
    let from = order
        .iter()
        .position(|candidate| candidate == item)
        .ok_or(ReorderError::ItemNotFound)?;
    let moved = order.remove(from);
    let to = position.resolve(order.len());
    order.insert(to, moved);
    Ok(to)
}

/// Move `item` from `from` into `to` at `position`. Returns its new index
/// in `to`.
///
/// `from` is left untouched when the item is missing.
pub fn move_between<K: PartialEq>(
    from: &mut Vec<K>,
    to: &mut Vec<K>,
    item: &K,
    position: DropPosition,
) -> Result<usize, ReorderError> {
    let source = from
        .iter()
        .position(|candidate| candidate == item)
        .ok_or(ReorderError::ItemNotFound)?;
    let moved = from.remove(source);
    let index = position.resolve(to.len());
    to.insert(index, moved);
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_positions() {
        assert_eq!(DropPosition::from_signed(-1), DropPosition::End);
        assert_eq!(DropPosition::from_signed(i64::MIN), DropPosition::End);
        assert_eq!(DropPosition::from_signed(0), DropPosition::At(0));
        assert_eq!(DropPosition::from_signed(7), DropPosition::At(7));
    }

    #[test]
    fn resolve_clamps() {
        assert_eq!(DropPosition::At(2).resolve(5), 2);
        assert_eq!(DropPosition::At(9).resolve(5), 5);
        assert_eq!(DropPosition::End.resolve(5), 5);
        assert_eq!(DropPosition::End.resolve(0), 0);
    }

    #[test]
    fn within_moves_forward_using_post_removal_index() {
        let mut order = vec!["A", "B", "C", "D"];
        // Placement for "A dropped below C" reports index 2.
        let index = move_within(&mut order, &"A", DropPosition::At(2)).expect("move");
        assert_eq!(index, 2);
        assert_eq!(order, vec!["B", "C", "A", "D"]);
    }

    #[test]
    fn within_moves_backward() {
        let mut order = vec![1, 2, 3, 4];
        move_within(&mut order, &4, DropPosition::At(0)).expect("move");
        assert_eq!(order, vec![4, 1, 2, 3]);
    }

    #[test]
    fn within_end_and_clamp() {
        let mut order = vec![1, 2, 3];
        assert_eq!(move_within(&mut order, &1, DropPosition::End), Ok(2));
        assert_eq!(order, vec![2, 3, 1]);
        assert_eq!(move_within(&mut order, &2, DropPosition::At(99)), Ok(2));
        assert_eq!(order, vec![3, 1, 2]);
    }

    #[test]
    fn within_missing_item() {
        let mut order = vec![1, 2];
        assert_eq!(
            move_within(&mut order, &5, DropPosition::At(0)),
            Err(ReorderError::ItemNotFound)
        );
        assert_eq!(order, vec![1, 2]);
    }

    #[test]
    fn between_lists() {
        let mut todo = vec![10, 11, 12];
        let mut done = vec![20, 21];
        let index = move_between(&mut todo, &mut done, &11, DropPosition::At(1)).expect("move");
        assert_eq!(index, 1);
        assert_eq!(todo, vec![10, 12]);
        assert_eq!(done, vec![20, 11, 21]);
    }

    #[test]
    fn between_into_empty_list() {
        let mut todo = vec![10];
        let mut done: Vec<i32> = Vec::new();
        let index = move_between(&mut todo, &mut done, &10, DropPosition::At(3)).expect("move");
        assert_eq!(index, 0);
        assert!(todo.is_empty());
        assert_eq!(done, vec![10]);
    }

    #[test]
    fn between_missing_item_leaves_both() {
        let mut todo = vec![10];
        let mut done = vec![20];
        assert_eq!(
            move_between(&mut todo, &mut done, &99, DropPosition::End),
            Err(ReorderError::ItemNotFound)
        );
        assert_eq!(todo, vec![10]);
        assert_eq!(done, vec![20]);
    }

    #[test]
    fn error_display() {
        assert_eq!(
            ReorderError::ItemNotFound.to_string(),
            "moved item not found in source order"
        );
    }
}
