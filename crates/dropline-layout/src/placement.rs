#![forbid(unsafe_code)]

//! Placement decision: nearest item plus before/after.

use dropline_core::event::DragEvent;
use dropline_core::tree::{GeometryProvider, ListTree};
use serde::{Deserialize, Serialize};

use crate::reorder::DropPosition;
use crate::resolver::PlacementResolver;

/// Where a dragged item should be inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placement<N> {
    /// The list to insert into.
    pub container: N,
    /// The item the dragged item lands next to.
    pub target: N,
    /// Index into the container's items with the dragged item removed.
    pub insertion_index: usize,
    /// `true` when landing directly above `target`.
    pub place_before: bool,
}

impl<N> Placement<N> {
    /// The insertion index as a [`DropPosition`].
    #[must_use]
    pub const fn position(&self) -> DropPosition {
        DropPosition::At(self.insertion_index)
    }
}

impl PlacementResolver {
    /// Decide where the item `dragged_id` lands for `event`.
    ///
    /// Returns `None` exactly when [`resolve`](Self::resolve) does; callers
    /// should leave the list unchanged in that case.
    pub fn decide<T, G>(
        &self,
        tree: &T,
        geometry: &G,
        event: &DragEvent<T::Node>,
        dragged_id: &str,
    ) -> Option<Placement<T::Node>>
    where
        T: ListTree + ?Sized,
        G: GeometryProvider<T::Node> + ?Sized,
    {
        let nearest = self.resolve(tree, geometry, event.y, event.target, dragged_id)?;

        // Fresh read; nothing mutates layout between the two reads.
        let rect = geometry.rect(nearest.node);
        let place_before = rect.is_above_center(event.y);
        // Landing after the dragged item itself can point one past the end.
        let insertion_index = if place_before {
            nearest.index
        } else {
            (nearest.index + 1).min(nearest.item_count)
        };

        Some(Placement {
            container: nearest.container,
            target: nearest.node,
            insertion_index,
            place_before,
        })
    }
}

/// Decide a placement with the default configuration.
///
/// See [`PlacementResolver::decide`].
pub fn decide_placement<T, G>(
    tree: &T,
    geometry: &G,
    event: &DragEvent<T::Node>,
    dragged_id: &str,
) -> Option<Placement<T::Node>>
where
    T: ListTree + ?Sized,
    G: GeometryProvider<T::Node> + ?Sized,
{
    PlacementResolver::default().decide(tree, geometry, event, dragged_id)
}
