#![forbid(unsafe_code)]

//! Per-gesture drag driver.
//!
//! A [`DragSession`] lives from drag start to drop or cancel. The host feeds
//! it every [`DragEvent`]; the session answers with a [`DragStep`]: a preview
//! placement while the pointer moves, a [`DropOutcome`] on release.
//!
//! # State Machine
//!
//! ```text
//!   Active ──Move──▶ Active (Preview)
//!   Active ──Drop──▶ Finished (Dropped)
//!   Active ──Cancel─▶ Finished (Cancelled)
//!   Finished ──any──▶ Finished (Finished)
//! ```
//!
//! # Coalescing
//!
//! Hosts emit many moves per cell. When a move repeats the previous pointer
//! row and target, and neither the target's rect nor the rect of the
//! previewed item has changed since, the session returns the cached preview
//! instead of re-resolving. Disable with [`PlacementConfig::coalesce_moves`].
//!
//! Edits that leave both of those rects untouched (inserting or removing
//! items, moving a different item) are not detected. Call
//! [`DragSession::invalidate`] after such edits.

use dropline_core::event::{DragEvent, DragEventKind};
use dropline_core::geometry::Rect;
use dropline_core::tree::{GeometryProvider, ListTree};
use dropline_core::{debug, debug_span};

use crate::config::{PlacementConfig, UnplacedDrop};
use crate::placement::Placement;
use crate::reorder::DropPosition;
use crate::resolver::PlacementResolver;

/// What a release does to the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropOutcome<N> {
    /// Insert at the resolved placement.
    Placed(Placement<N>),
    /// The enclosing list had no placement; insert at its end.
    Append { container: N },
    /// Nothing changes.
    Rejected,
}

impl<N: Copy> DropOutcome<N> {
    /// The list to insert into, if any.
    #[must_use]
    pub fn container(&self) -> Option<N> {
        match self {
            Self::Placed(placement) => Some(placement.container),
            Self::Append { container } => Some(*container),
            Self::Rejected => None,
        }
    }

    /// Where to insert within [`container`](Self::container).
    #[must_use]
    pub fn position(&self) -> Option<DropPosition> {
        match self {
            Self::Placed(placement) => Some(placement.position()),
            Self::Append { .. } => Some(DropPosition::End),
            Self::Rejected => None,
        }
    }
}

/// Result of feeding one event to a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragStep<N> {
    /// Pointer moved; the placement a drop here would produce.
    Preview(Option<Placement<N>>),
    /// The item was released. The session is finished.
    Dropped(DropOutcome<N>),
    /// The drag was aborted. The session is finished.
    Cancelled,
    /// The session already ended; the event was ignored.
    Finished,
}

/// Inputs a cached preview was computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MoveKey<N> {
    row: u16,
    target: Option<N>,
    target_rect: Option<Rect>,
    anchor_rect: Option<Rect>,
}

/// Drives one drag gesture.
#[derive(Debug, Clone)]
pub struct DragSession<N> {
    dragged_id: String,
    resolver: PlacementResolver,
    last_move: Option<MoveKey<N>>,
    preview: Option<Placement<N>>,
    coalesced: u64,
    finished: bool,
}

impl<N> DragSession<N>
where
    N: Copy + Eq + std::fmt::Debug,
{
    /// Start a session for the item `dragged_id`.
    #[must_use]
    pub fn begin(dragged_id: impl Into<String>, config: PlacementConfig) -> Self {
        Self {
            dragged_id: dragged_id.into(),
            resolver: PlacementResolver::new(config),
            last_move: None,
            preview: None,
            coalesced: 0,
            finished: false,
        }
    }

    /// Item id of the dragged item.
    #[must_use]
    pub fn dragged_id(&self) -> &str {
        &self.dragged_id
    }

    /// Latest preview placement.
    #[must_use]
    pub fn preview(&self) -> Option<Placement<N>> {
        self.preview
    }

    /// Number of moves answered from the cached preview.
    #[must_use]
    pub fn coalesced_moves(&self) -> u64 {
        self.coalesced
    }

    /// Whether a drop or cancel has ended the session.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Forget the cached preview so the next move is resolved again.
    ///
    /// Call after any edit to the tree or its layout while the drag is live.
    pub fn invalidate(&mut self) {
        self.last_move = None;
    }

    /// Feed one event.
    pub fn handle<T, G>(&mut self, tree: &T, geometry: &G, event: &DragEvent<N>) -> DragStep<N>
    where
        T: ListTree<Node = N> + ?Sized,
        G: GeometryProvider<N> + ?Sized,
    {
        if self.finished {
            return DragStep::Finished;
        }

        let _span = debug_span!("dropline.session", dragged_id = %self.dragged_id).entered();

        match event.kind {
            DragEventKind::Move => {
                let coalesce = self.resolver.config().coalesce_moves;
                if coalesce && self.last_move == Some(self.move_key(geometry, event)) {
                    self.coalesced += 1;
                    return DragStep::Preview(self.preview);
                }
                self.preview = self
                    .resolver
                    .decide(tree, geometry, event, &self.dragged_id);
                self.last_move = coalesce.then(|| self.move_key(geometry, event));
                DragStep::Preview(self.preview)
            }
            DragEventKind::Drop => {
                self.finished = true;
                let outcome = self.drop_outcome(tree, geometry, event);
                debug!(?outcome, "drag dropped");
                DragStep::Dropped(outcome)
            }
            DragEventKind::Cancel => {
                self.finished = true;
                self.preview = None;
                debug!("drag cancelled");
                DragStep::Cancelled
            }
        }
    }

    fn move_key<G>(&self, geometry: &G, event: &DragEvent<N>) -> MoveKey<N>
    where
        G: GeometryProvider<N> + ?Sized,
    {
        MoveKey {
            row: event.y,
            target: event.target,
            target_rect: event.target.map(|node| geometry.rect(node)),
            anchor_rect: self.preview.map(|placement| geometry.rect(placement.target)),
        }
    }

    fn drop_outcome<T, G>(&self, tree: &T, geometry: &G, event: &DragEvent<N>) -> DropOutcome<N>
    where
        T: ListTree<Node = N> + ?Sized,
        G: GeometryProvider<N> + ?Sized,
    {
        if let Some(placement) = self
            .resolver
            .decide(tree, geometry, event, &self.dragged_id)
        {
            return DropOutcome::Placed(placement);
        }
        match self.resolver.config().unplaced_drop {
            UnplacedDrop::Append => self
                .resolver
                .locate_container(tree, event.target)
                .map_or(DropOutcome::Rejected, |container| DropOutcome::Append {
                    container,
                }),
            UnplacedDrop::Reject => DropOutcome::Rejected,
        }
    }
}
