#![forbid(unsafe_code)]

//! Arena-backed list document.
//!
//! [`ItemTree`] is the reference host for placement: a rooted tree of
//! containers, items and decoration nodes, each with a cell-space [`Rect`].
//! It implements [`ListTree`] and [`GeometryProvider`] and can commit a
//! placement with [`ItemTree::move_item`].
//!
//! - Deterministic node identifiers (`NodeId`, never zero) suitable for replay.
//! - Explicit parent/child links in both directions.
//! - Canonical snapshots with strict validation on load.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::num::NonZeroU64;

use dropline_core::geometry::Rect;
use dropline_core::tree::{GeometryProvider, ListTree, NodeRole, enumerate_items};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::reorder::DropPosition;

/// Current item tree snapshot schema version.
pub const ITEM_TREE_SCHEMA_VERSION: u16 = 1;

/// Handle of a node in an [`ItemTree`].
///
/// Ids are handed out by the tree in creation order starting at the root's
/// `1` and never reused, so they are stable across snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(NonZeroU64);

const ROOT_ID: NodeId = NodeId(NonZeroU64::MIN);

impl NodeId {
    /// Numeric value, as written in snapshots.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0.get()
    }
}

impl TryFrom<u64> for NodeId {
    type Error = ItemTreeError;

    fn try_from(raw: u64) -> Result<Self, Self::Error> {
        NonZeroU64::new(raw)
            .map(Self)
            .ok_or(ItemTreeError::ZeroNodeId)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One node as stored in the arena and in snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    /// This node's handle.
    pub id: NodeId,
    /// `None` only for the root.
    #[serde(default)]
    pub parent: Option<NodeId>,
    /// Container, item or decoration.
    #[serde(default)]
    pub role: NodeRole,
    /// Present exactly on items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,
    /// On-screen bounds in cells.
    #[serde(default)]
    pub rect: Rect,
    /// Children in display order.
    #[serde(default)]
    pub children: Vec<NodeId>,
}

/// Serialized form of an [`ItemTree`], nodes in id order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemTreeSnapshot {
    /// Snapshot format version.
    #[serde(default = "default_schema_version")]
    pub schema_version: u16,
    /// Id of the root node.
    pub root: NodeId,
    /// Id the next inserted node will receive.
    pub next_id: NodeId,
    /// Every node, ordered by id.
    pub nodes: Vec<NodeRecord>,
}

fn default_schema_version() -> u16 {
    ITEM_TREE_SCHEMA_VERSION
}

/// Item tree operation and validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemTreeError {
    /// `0` is not a valid node id.
    ZeroNodeId,
    /// Every id up to `u64::MAX` has been handed out.
    IdSpaceExhausted,
    /// No node with this id.
    MissingNode { node_id: NodeId },
    /// Items need a non-empty id.
    EmptyItemId,
    /// Another item already uses this id.
    DuplicateItemId { item_id: String },
    /// A move was asked for a node that is not an item.
    NotAnItem { node_id: NodeId },
    /// A move targeted a node that is not a list container.
    NotAContainer { node_id: NodeId },
    /// The destination container lives inside the moved item.
    MoveIntoOwnSubtree { item: NodeId, container: NodeId },
    /// Snapshot written by an incompatible version.
    UnsupportedSchemaVersion { version: u16 },
    /// Snapshot lists a node twice, or a node is reachable twice.
    DuplicateNodeId { node_id: NodeId },
    /// Snapshot root is not among its nodes.
    MissingRoot { root: NodeId },
    /// Snapshot root claims a parent.
    RootHasParent { root: NodeId, parent: NodeId },
    /// A node points at a parent that does not exist.
    MissingParent { node_id: NodeId, parent: NodeId },
    /// A node lists a child that does not exist.
    MissingChild { parent: NodeId, child: NodeId },
    /// Parent and child links disagree.
    ParentMismatch {
        node_id: NodeId,
        expected: Option<NodeId>,
        found: Option<NodeId>,
    },
    /// An item node without an item id.
    ItemWithoutId { node_id: NodeId },
    /// A container or decoration node with an item id.
    UnexpectedItemId { node_id: NodeId },
    /// A node not connected to the root.
    UnreachableNode { node_id: NodeId },
    /// `next_id` would hand out an id already in use.
    StaleNextId { next_id: NodeId, max_id: NodeId },
}

impl fmt::Display for ItemTreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroNodeId => write!(f, "node id 0 is reserved"),
            Self::IdSpaceExhausted => write!(f, "no node ids left to allocate"),
            Self::MissingNode { node_id } => write!(f, "node {node_id} not found"),
            Self::EmptyItemId => write!(f, "item id must not be empty"),
            Self::DuplicateItemId { item_id } => write!(f, "item id {item_id:?} already in use"),
            Self::NotAnItem { node_id } => write!(f, "node {node_id} is not an item"),
            Self::NotAContainer { node_id } => write!(f, "node {node_id} is not a list container"),
            Self::MoveIntoOwnSubtree { item, container } => write!(
                f,
                "cannot move item {item} into container {container} nested inside it"
            ),
            Self::UnsupportedSchemaVersion { version } => write!(
                f,
                "unsupported item tree schema version {version} (expected {ITEM_TREE_SCHEMA_VERSION})"
            ),
            Self::DuplicateNodeId { node_id } => write!(f, "duplicate node id {node_id}"),
            Self::MissingRoot { root } => write!(f, "root node {root} not found"),
            Self::RootHasParent { root, parent } => {
                write!(f, "root node {root} must not have parent {parent}")
            }
            Self::MissingParent { node_id, parent } => {
                write!(f, "node {node_id} references missing parent {parent}")
            }
            Self::MissingChild { parent, child } => {
                write!(f, "node {parent} references missing child {child}")
            }
            Self::ParentMismatch {
                node_id,
                expected,
                found,
            } => write!(
                f,
                "node {node_id} parent mismatch: expected {expected:?}, found {found:?}"
            ),
            Self::ItemWithoutId { node_id } => write!(f, "item node {node_id} has no item id"),
            Self::UnexpectedItemId { node_id } => {
                write!(f, "non-item node {node_id} carries an item id")
            }
            Self::UnreachableNode { node_id } => {
                write!(f, "node {node_id} is not reachable from the root")
            }
            Self::StaleNextId { next_id, max_id } => write!(
                f,
                "next id {next_id} must be greater than the largest node id {max_id}"
            ),
        }
    }
}

impl std::error::Error for ItemTreeError {}

/// Rooted tree of containers, items and decoration nodes.
#[derive(Debug, Clone)]
pub struct ItemTree {
    root: NodeId,
    next_id: NodeId,
    nodes: BTreeMap<NodeId, NodeRecord>,
    items: FxHashMap<String, NodeId>,
}

impl Default for ItemTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemTree {
    /// Create a tree holding only a root node (role [`NodeRole::Other`]).
    #[must_use]
    pub fn new() -> Self {
        let root = ROOT_ID;
        let mut nodes = BTreeMap::new();
        nodes.insert(
            root,
            NodeRecord {
                id: root,
                parent: None,
                role: NodeRole::Other,
                item_id: None,
                rect: Rect::default(),
                children: Vec::new(),
            },
        );
        Self {
            root,
            next_id: NodeId(NonZeroU64::MIN.saturating_add(1)),
            nodes,
            items: FxHashMap::default(),
        }
    }

    /// The root node; never a container or item.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// Record of `id`, if present.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&NodeRecord> {
        self.nodes.get(&id)
    }

    /// All nodes in id order.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeRecord> {
        self.nodes.values()
    }

    /// Number of nodes, root included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Add an empty list container under `parent`.
    pub fn add_container(&mut self, parent: NodeId, rect: Rect) -> Result<NodeId, ItemTreeError> {
        self.insert_child(parent, NodeRole::Container, None, rect)
    }

    /// Add an item with a unique, non-empty `item_id` under `parent`.
    pub fn add_item(
        &mut self,
        parent: NodeId,
        item_id: impl Into<String>,
        rect: Rect,
    ) -> Result<NodeId, ItemTreeError> {
        let item_id = item_id.into();
        if item_id.is_empty() {
            return Err(ItemTreeError::EmptyItemId);
        }
        if self.items.contains_key(&item_id) {
            return Err(ItemTreeError::DuplicateItemId { item_id });
        }
        self.insert_child(parent, NodeRole::Item, Some(item_id), rect)
    }

    /// Add a decoration node (header, button, label) under `parent`.
    pub fn add_node(&mut self, parent: NodeId, rect: Rect) -> Result<NodeId, ItemTreeError> {
        self.insert_child(parent, NodeRole::Other, None, rect)
    }

    /// Replace the on-screen bounds of `node`.
    pub fn set_rect(&mut self, node: NodeId, rect: Rect) -> Result<(), ItemTreeError> {
        let record = self
            .nodes
            .get_mut(&node)
            .ok_or(ItemTreeError::MissingNode { node_id: node })?;
        record.rect = rect;
        Ok(())
    }

    /// Node holding `item_id`.
    #[must_use]
    pub fn find_item(&self, item_id: &str) -> Option<NodeId> {
        self.items.get(item_id).copied()
    }

    /// Item nodes of `container` in display order.
    pub fn items_of(&self, container: NodeId) -> Result<Vec<NodeId>, ItemTreeError> {
        self.require(container)?;
        Ok(enumerate_items(self, container).map(|(_, node)| node).collect())
    }

    /// Item ids of `container` in display order.
    pub fn item_ids(&self, container: NodeId) -> Result<Vec<&str>, ItemTreeError> {
        self.require(container)?;
        Ok(enumerate_items(self, container)
            .filter_map(|(_, node)| self.item_id(node))
            .collect())
    }

    /// Lay the items of `container` out as consecutive rows of `row_height`
    /// starting at `top`, spanning the container's columns.
    pub fn stack_items(
        &mut self,
        container: NodeId,
        top: u16,
        row_height: u16,
    ) -> Result<(), ItemTreeError> {
        let bounds = self.require(container)?.rect;
        let items = self.items_of(container)?;
        let mut row_top = top;
        for item in items {
            self.set_rect(item, Rect::new(bounds.x, row_top, bounds.width, row_height))?;
            row_top = row_top.saturating_add(row_height);
        }
        Ok(())
    }

    /// Move `item` into `container` at `position`, counted among the
    /// container's items with `item` already removed.
    ///
    /// `At(i)` lands directly before the `i`-th remaining item (clamped);
    /// `End` lands directly after the last item, or at the end of the
    /// container's children when it has no items. Returns the item's new
    /// index among the container's items.
    pub fn move_item(
        &mut self,
        item: NodeId,
        container: NodeId,
        position: DropPosition,
    ) -> Result<usize, ItemTreeError> {
        if self.require(item)?.role != NodeRole::Item {
            return Err(ItemTreeError::NotAnItem { node_id: item });
        }
        if self.require(container)?.role != NodeRole::Container {
            return Err(ItemTreeError::NotAContainer { node_id: container });
        }
        if self.is_ancestor_or_self(item, container) {
            return Err(ItemTreeError::MoveIntoOwnSubtree { item, container });
        }

        self.detach(item)?;

        let children = &self.require(container)?.children;
        let item_slots: Vec<usize> = children
            .iter()
            .enumerate()
            .filter(|(_, child)| self.role(**child) == NodeRole::Item)
            .map(|(slot, _)| slot)
            .collect();
        let index = position.resolve(item_slots.len());
        let slot = match item_slots.get(index) {
            Some(&slot) => slot,
            None => item_slots
                .last()
                .map_or(children.len(), |&last| last + 1),
        };

        self.require_mut(container)?.children.insert(slot, item);
        self.require_mut(item)?.parent = Some(container);
        Ok(index)
    }

    /// Canonical snapshot (nodes in id order).
    #[must_use]
    pub fn snapshot(&self) -> ItemTreeSnapshot {
        ItemTreeSnapshot {
            schema_version: ITEM_TREE_SCHEMA_VERSION,
            root: self.root,
            next_id: self.next_id,
            nodes: self.nodes.values().cloned().collect(),
        }
    }

    /// Rebuild a tree from a snapshot, rejecting malformed input.
    pub fn from_snapshot(snapshot: ItemTreeSnapshot) -> Result<Self, ItemTreeError> {
        if snapshot.schema_version != ITEM_TREE_SCHEMA_VERSION {
            return Err(ItemTreeError::UnsupportedSchemaVersion {
                version: snapshot.schema_version,
            });
        }

        let mut nodes = BTreeMap::new();
        for record in snapshot.nodes {
            let node_id = record.id;
            if nodes.insert(node_id, record).is_some() {
                return Err(ItemTreeError::DuplicateNodeId { node_id });
            }
        }

        let root = snapshot.root;
        let Some(root_record) = nodes.get(&root) else {
            return Err(ItemTreeError::MissingRoot { root });
        };
        if let Some(parent) = root_record.parent {
            return Err(ItemTreeError::RootHasParent { root, parent });
        }

        let mut items = FxHashMap::default();
        for record in nodes.values() {
            if let Some(parent) = record.parent {
                let Some(parent_record) = nodes.get(&parent) else {
                    return Err(ItemTreeError::MissingParent {
                        node_id: record.id,
                        parent,
                    });
                };
                if !parent_record.children.contains(&record.id) {
                    return Err(ItemTreeError::ParentMismatch {
                        node_id: record.id,
                        expected: Some(parent),
                        found: None,
                    });
                }
            }
            for &child in &record.children {
                let Some(child_record) = nodes.get(&child) else {
                    return Err(ItemTreeError::MissingChild {
                        parent: record.id,
                        child,
                    });
                };
                if child_record.parent != Some(record.id) {
                    return Err(ItemTreeError::ParentMismatch {
                        node_id: child,
                        expected: Some(record.id),
                        found: child_record.parent,
                    });
                }
            }
            match (record.role, &record.item_id) {
                (NodeRole::Item, None) => {
                    return Err(ItemTreeError::ItemWithoutId { node_id: record.id });
                }
                (NodeRole::Item, Some(item_id)) => {
                    if item_id.is_empty() {
                        return Err(ItemTreeError::EmptyItemId);
                    }
                    if items.insert(item_id.clone(), record.id).is_some() {
                        return Err(ItemTreeError::DuplicateItemId {
                            item_id: item_id.clone(),
                        });
                    }
                }
                (NodeRole::Container | NodeRole::Other, Some(_)) => {
                    return Err(ItemTreeError::UnexpectedItemId { node_id: record.id });
                }
                (NodeRole::Container | NodeRole::Other, None) => {}
            }
        }

        // Every node must hang off the root exactly once; with the two-way
        // link checks above this also rules out cycles and repeated children.
        let mut reached = BTreeSet::new();
        let mut stack = vec![root];
        while let Some(node_id) = stack.pop() {
            if !reached.insert(node_id) {
                return Err(ItemTreeError::DuplicateNodeId { node_id });
            }
            if let Some(record) = nodes.get(&node_id) {
                stack.extend(record.children.iter().copied());
            }
        }
        if let Some(node_id) = nodes.keys().find(|id| !reached.contains(*id)) {
            return Err(ItemTreeError::UnreachableNode { node_id: *node_id });
        }

        let max_id = nodes.keys().next_back().copied().unwrap_or(root);
        if snapshot.next_id <= max_id {
            return Err(ItemTreeError::StaleNextId {
                next_id: snapshot.next_id,
                max_id,
            });
        }

        Ok(Self {
            root,
            next_id: snapshot.next_id,
            nodes,
            items,
        })
    }

    fn insert_child(
        &mut self,
        parent: NodeId,
        role: NodeRole,
        item_id: Option<String>,
        rect: Rect,
    ) -> Result<NodeId, ItemTreeError> {
        self.require(parent)?;
        let id = self.allocate_id()?;

        if let Some(item_id) = &item_id {
            self.items.insert(item_id.clone(), id);
        }
        self.nodes.insert(
            id,
            NodeRecord {
                id,
                parent: Some(parent),
                role,
                item_id,
                rect,
                children: Vec::new(),
            },
        );
        self.require_mut(parent)?.children.push(id);
        Ok(id)
    }

    fn allocate_id(&mut self) -> Result<NodeId, ItemTreeError> {
        let id = self.next_id;
        let next = id.0.checked_add(1).ok_or(ItemTreeError::IdSpaceExhausted)?;
        self.next_id = NodeId(next);
        Ok(id)
    }

    fn detach(&mut self, node: NodeId) -> Result<(), ItemTreeError> {
        let Some(parent) = self.require(node)?.parent else {
            return Ok(());
        };
        self.require_mut(parent)?
            .children
            .retain(|child| *child != node);
        self.require_mut(node)?.parent = None;
        Ok(())
    }

    fn is_ancestor_or_self(&self, ancestor: NodeId, mut node: NodeId) -> bool {
        loop {
            if node == ancestor {
                return true;
            }
            match self.nodes.get(&node).and_then(|record| record.parent) {
                Some(parent) => node = parent,
                None => return false,
            }
        }
    }

    fn require(&self, node_id: NodeId) -> Result<&NodeRecord, ItemTreeError> {
        self.nodes
            .get(&node_id)
            .ok_or(ItemTreeError::MissingNode { node_id })
    }

    fn require_mut(&mut self, node_id: NodeId) -> Result<&mut NodeRecord, ItemTreeError> {
        self.nodes
            .get_mut(&node_id)
            .ok_or(ItemTreeError::MissingNode { node_id })
    }
}

impl ListTree for ItemTree {
    type Node = NodeId;

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(&node).and_then(|record| record.parent)
    }

    fn children(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .get(&node)
            .into_iter()
            .flat_map(|record| record.children.iter().copied())
    }

    fn role(&self, node: NodeId) -> NodeRole {
        self.nodes
            .get(&node)
            .map_or(NodeRole::Other, |record| record.role)
    }

    fn item_id(&self, node: NodeId) -> Option<&str> {
        self.nodes
            .get(&node)
            .and_then(|record| record.item_id.as_deref())
    }
}

impl GeometryProvider<NodeId> for ItemTree {
    fn rect(&self, node: NodeId) -> Rect {
        self.nodes
            .get(&node)
            .map_or_else(Rect::default, |record| record.rect)
    }
}
