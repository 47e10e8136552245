#![forbid(unsafe_code)]

//! Canonical drag event types.
//!
//! A drag controller translates its host's pointer input into [`DragEvent`]s
//! while a drag gesture is active. Each event carries the pointer row and
//! the node under the pointer, which is where the search for an
//! enclosing list starts.
//!
//! # Design Notes
//!
//! - Rows are 0-indexed cells, the same space as [`Rect`](crate::geometry::Rect).
//!   Placement is purely vertical, so no column is carried.
//! - `target` is `None` when the pointer is over nothing the host can name.
//! - Events are generic over the host's node handle `N`.

/// Phase of a drag gesture an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragEventKind {
    /// Pointer moved while the drag is active.
    Move,
    /// The dragged item was released.
    Drop,
    /// The drag was aborted (Escape, focus loss).
    Cancel,
}

/// A pointer event observed during a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DragEvent<N> {
    /// The phase of the gesture.
    pub kind: DragEventKind,

    /// Y coordinate (0-indexed, topmost row is 0).
    pub y: u16,

    /// Node under the pointer, if any.
    pub target: Option<N>,
}

impl<N> DragEvent<N> {
    /// Create a new drag event.
    #[must_use]
    pub const fn new(kind: DragEventKind, y: u16, target: Option<N>) -> Self {
        Self { kind, y, target }
    }

    /// A pointer move over `target`.
    #[must_use]
    pub const fn moved(y: u16, target: Option<N>) -> Self {
        Self::new(DragEventKind::Move, y, target)
    }

    /// A release over `target`.
    #[must_use]
    pub const fn dropped(y: u16, target: Option<N>) -> Self {
        Self::new(DragEventKind::Drop, y, target)
    }

    /// A cancellation. Row and target are irrelevant.
    #[must_use]
    pub const fn cancelled() -> Self {
        Self::new(DragEventKind::Cancel, 0, None)
    }
}
