#![forbid(unsafe_code)]

//! Tree and geometry capabilities.
//!
//! Placement never touches a concrete widget or document tree. It reads
//! structure through [`ListTree`] and positions through [`GeometryProvider`],
//! so any host (a TUI widget tree, a DOM bridge, a test fixture) can be
//! plugged in.
//!
//! # Invariants
//!
//! 1. Roles are exclusive: a node is a container, an item, or neither.
//! 2. `children` yields nodes in display order.
//! 3. Both capabilities are pure reads; calling them never mutates the host.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::Rect;

/// Structural classification of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeRole {
    /// An ordered list holding items.
    Container,
    /// A reorderable entry inside a container.
    Item,
    /// Anything else (decoration, headers, buttons, the root).
    #[default]
    Other,
}

/// Read-only view of a tree with parent links and ordered children.
pub trait ListTree {
    /// Host node handle.
    type Node: Copy + Eq + fmt::Debug;

    /// Parent of `node`, or `None` at the root.
    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    /// Direct children of `node` in display order.
    fn children(&self, node: Self::Node) -> impl Iterator<Item = Self::Node> + '_;

    /// Role of `node`.
    fn role(&self, node: Self::Node) -> NodeRole;

    /// Stable identifier of an item node. `None` for non-items.
    fn item_id(&self, node: Self::Node) -> Option<&str>;

    /// Whether `node` is a list container.
    fn is_container(&self, node: Self::Node) -> bool {
        self.role(node) == NodeRole::Container
    }

    /// Whether `node` is a reorderable item.
    fn is_item(&self, node: Self::Node) -> bool {
        self.role(node) == NodeRole::Item
    }
}

/// Source of on-screen rectangles, in the same space as pointer coordinates.
pub trait GeometryProvider<N> {
    /// Current rectangle of `node`.
    fn rect(&self, node: N) -> Rect;
}

impl<N, F> GeometryProvider<N> for F
where
    F: Fn(N) -> Rect,
{
    fn rect(&self, node: N) -> Rect {
        self(node)
    }
}

/// Outcome of an ancestor walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AncestorSearch<N> {
    /// The first node (starting node included) that matched.
    Found(N),
    /// Reached the root without a match.
    Exhausted,
    /// Gave up after `max_depth` parent hops.
    DepthLimit,
}

impl<N> AncestorSearch<N> {
    /// The matched node, if any.
    #[must_use]
    pub fn found(self) -> Option<N> {
        match self {
            Self::Found(node) => Some(node),
            Self::Exhausted | Self::DepthLimit => None,
        }
    }
}

/// Walk from `start` towards the root and return the first node matching
/// `predicate`, testing `start` itself first.
///
/// At most `max_depth` parent links are followed, which bounds the walk on
/// hosts whose parent links are cyclic.
pub fn find_ancestor_or_self<T, P>(
    tree: &T,
    start: T::Node,
    max_depth: usize,
    mut predicate: P,
) -> AncestorSearch<T::Node>
where
    T: ListTree + ?Sized,
    P: FnMut(T::Node) -> bool,
{
    let mut cursor = start;
    let mut hops = 0_usize;
    loop {
        if predicate(cursor) {
            return AncestorSearch::Found(cursor);
        }
        let Some(parent) = tree.parent(cursor) else {
            return AncestorSearch::Exhausted;
        };
        if hops == max_depth {
            return AncestorSearch::DepthLimit;
        }
        hops += 1;
        cursor = parent;
    }
}

/// Item children of `container` paired with their sequence index.
///
/// Non-item children are skipped and do not consume an index.
pub fn enumerate_items<T>(
    tree: &T,
    container: T::Node,
) -> impl Iterator<Item = (usize, T::Node)> + '_
where
    T: ListTree + ?Sized,
{
    tree.children(container)
        .filter(move |&child| tree.is_item(child))
        .enumerate()
}
