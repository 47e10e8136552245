#![forbid(unsafe_code)]

//! Drop placement for vertically stacked lists.
//!
//! While an item is dragged over a list, hosts ask where it would land:
//! which list, which neighbouring item, before or after it, and at which
//! index once the dragged item is taken out of its current spot.
//!
//! - [`resolve_nearest`] / [`PlacementResolver::resolve`]: the list under the
//!   pointer and the item whose vertical center is closest.
//! - [`decide_placement`] / [`PlacementResolver::decide`]: the full
//!   [`Placement`] for a [`DragEvent`](dropline_core::event::DragEvent).
//! - [`DragSession`]: a per-gesture driver producing previews and a final
//!   [`DropOutcome`].
//! - [`ItemTree`], [`move_within`], [`move_between`]: ways to commit the
//!   result to a document.
//!
//! Structure and geometry come from the host through
//! [`ListTree`](dropline_core::tree::ListTree) and
//! [`GeometryProvider`](dropline_core::tree::GeometryProvider).

pub mod config;
pub mod item_tree;
pub mod placement;
pub mod reorder;
pub mod resolver;
pub mod session;

pub use dropline_core::geometry::Rect;

pub use config::{DEFAULT_MAX_ANCESTOR_DEPTH, PlacementConfig, UnplacedDrop};
pub use item_tree::{
    ITEM_TREE_SCHEMA_VERSION, ItemTree, ItemTreeError, ItemTreeSnapshot, NodeId, NodeRecord,
};
pub use placement::{Placement, decide_placement};
pub use reorder::{DropPosition, ReorderError, move_between, move_within};
pub use resolver::{NearestItem, PlacementResolver, resolve_nearest};
pub use session::{DragSession, DragStep, DropOutcome};
