#![forbid(unsafe_code)]

//! Core: geometry, drag events, and the tree capabilities placement runs on.
//!
//! # Role in dropline
//! `dropline-core` is the input layer. It owns the cell-space [`Rect`], the
//! canonical [`DragEvent`] a drag controller feeds in, and the two
//! capabilities the placement code reads the world through:
//!
//! - **[`ListTree`]**: parent links, child enumeration, node roles, item ids.
//! - **[`GeometryProvider`]**: the on-screen rectangle of a node.
//!
//! # How it fits in the system
//! `dropline-layout` resolves placements against any `ListTree` +
//! `GeometryProvider` pair. Hosts adapt their own widget or document tree to
//! these traits; `dropline-layout::ItemTree` is the in-memory reference model.
//!
//! [`Rect`]: geometry::Rect
//! [`DragEvent`]: event::DragEvent
//! [`ListTree`]: tree::ListTree
//! [`GeometryProvider`]: tree::GeometryProvider

pub mod event;
pub mod geometry;
pub mod logging;
pub mod tree;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, trace, trace_span, warn};
