#![forbid(unsafe_code)]

//! Nearest-item resolution.
//!
//! Given a pointer row and the node under the pointer, find the enclosing
//! list and the item whose vertical center is closest to the pointer.
//!
//! # Invariants
//!
//! 1. Distance is measured on the vertical axis only, with no cutoff: a
//!    pointer far above or below the list still resolves to the first or
//!    last item.
//! 2. Ties go to the item earliest in document order.
//! 3. When the dragged item sits in the scanned list before the closest item,
//!    the returned index is reduced by one so it addresses the list with the
//!    dragged item removed.
//!
//! # Failure Modes
//!
//! - No origin, no enclosing list, or the walk exceeds
//!   [`PlacementConfig::max_ancestor_depth`]: `None`.
//! - Enclosing list without items: `None`.

use dropline_core::tree::{
    AncestorSearch, GeometryProvider, ListTree, enumerate_items, find_ancestor_or_self,
};
use dropline_core::{debug, debug_span, trace, warn};
use serde::{Deserialize, Serialize};

use crate::config::PlacementConfig;

/// The item closest to the pointer and its post-removal index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NearestItem<N> {
    /// The enclosing list.
    pub container: N,
    /// The closest item.
    pub node: N,
    /// Index of `node` among the container's items, after the same-list
    /// correction.
    pub index: usize,
    /// Number of items in the container once the dragged item is removed.
    pub item_count: usize,
}

/// Resolves nearest items and placements under a [`PlacementConfig`].
///
/// Stateless; cheap to clone and share.
#[derive(Debug, Clone, Default)]
pub struct PlacementResolver {
    config: PlacementConfig,
}

impl PlacementResolver {
    /// Create a resolver with a validated copy of `config`.
    #[must_use]
    pub fn new(config: PlacementConfig) -> Self {
        Self {
            config: config.validated(),
        }
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &PlacementConfig {
        &self.config
    }

    /// Find the list enclosing `origin` (the origin itself included).
    pub fn locate_container<T>(&self, tree: &T, origin: Option<T::Node>) -> Option<T::Node>
    where
        T: ListTree + ?Sized,
    {
        let origin = origin?;
        let max_depth = self.config.max_ancestor_depth;
        match find_ancestor_or_self(tree, origin, max_depth, |node| tree.is_container(node)) {
            AncestorSearch::Found(container) => Some(container),
            AncestorSearch::Exhausted => {
                debug!(?origin, "pointer is outside any list");
                None
            }
            AncestorSearch::DepthLimit => {
                warn!(?origin, max_depth, "list search hit the ancestor depth limit");
                None
            }
        }
    }

    /// Find the item nearest to `pointer_y` in the list enclosing `origin`.
    pub fn resolve<T, G>(
        &self,
        tree: &T,
        geometry: &G,
        pointer_y: u16,
        origin: Option<T::Node>,
        dragged_id: &str,
    ) -> Option<NearestItem<T::Node>>
    where
        T: ListTree + ?Sized,
        G: GeometryProvider<T::Node> + ?Sized,
    {
        let _span = debug_span!("dropline.resolve", pointer_y, dragged_id).entered();

        let container = self.locate_container(tree, origin)?;

        let mut closest: Option<(usize, T::Node, u32)> = None;
        let mut source_index = None;
        let mut item_count = 0;
        for (index, node) in enumerate_items(tree, container) {
            item_count += 1;
            if tree.item_id(node) == Some(dragged_id) {
                source_index = Some(index);
            }

            let distance = geometry.rect(node).center_distance2(pointer_y);
            trace!(index, distance2 = distance, "candidate item");
            match closest {
                Some((_, _, best)) if distance >= best => {}
                _ => closest = Some((index, node, distance)),
            }
        }

        let Some((mut index, node, _)) = closest else {
            debug!(?container, "list has no items");
            return None;
        };

        if let Some(source) = source_index {
            item_count -= 1;
            if source < index {
                index -= 1;
            }
        }

        debug!(?container, ?node, index, ?source_index, "resolved nearest item");
        Some(NearestItem {
            container,
            node,
            index,
            item_count,
        })
    }
}

/// Find the item nearest to `pointer_y` with the default configuration.
///
/// See [`PlacementResolver::resolve`].
pub fn resolve_nearest<T, G>(
    tree: &T,
    geometry: &G,
    pointer_y: u16,
    origin: Option<T::Node>,
    dragged_id: &str,
) -> Option<NearestItem<T::Node>>
where
    T: ListTree + ?Sized,
    G: GeometryProvider<T::Node> + ?Sized,
{
    PlacementResolver::default().resolve(tree, geometry, pointer_y, origin, dragged_id)
}
