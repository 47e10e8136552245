#![forbid(unsafe_code)]

//! Placement and drag-session configuration.
//!
//! # Defaults
//!
//! | Setting | Default | Range | Description |
//! |---------|---------|-------|-------------|
//! | `max_ancestor_depth` | 1024 | 1-65535 | Parent hops before the container search gives up |
//! | `coalesce_moves` | true | - | Reuse the last preview when pointer row and target repeat |
//! | `unplaced_drop` | `Append` | - | What a drop with no placement does |
//!
//! # Environment Variables
//!
//! | Variable | Type | Default | Description |
//! |----------|------|---------|-------------|
//! | `DROPLINE_MAX_ANCESTOR_DEPTH` | usize | 1024 | Ancestor walk bound |
//! | `DROPLINE_COALESCE_MOVES` | bool | true | Coalesce repeated pointer moves |
//! | `DROPLINE_UNPLACED_DROP` | string | "append" | `append` or `reject` |
//!
//! # Example
//!
//! ```bash
//! # Deeply nested hosts
//! export DROPLINE_MAX_ANCESTOR_DEPTH=4096
//!
//! # Ignore drops that land on an empty list
//! export DROPLINE_UNPLACED_DROP=reject
//! ```

/// Default parent-hop bound for the container search.
pub const DEFAULT_MAX_ANCESTOR_DEPTH: usize = 1024;

const MAX_ANCESTOR_DEPTH_CEILING: usize = 65_535;

/// Behavior of a drop that resolves no placement inside an enclosing list
/// (the list is empty).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnplacedDrop {
    /// Insert at the end of the enclosing list.
    #[default]
    Append,
    /// Leave everything as it was.
    Reject,
}

impl UnplacedDrop {
    /// Parse a config value (`append` / `reject`, case-insensitive).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("append") {
            Some(Self::Append)
        } else if value.eq_ignore_ascii_case("reject") {
            Some(Self::Reject)
        } else {
            None
        }
    }
}

/// Tunables shared by [`PlacementResolver`](crate::PlacementResolver) and
/// [`DragSession`](crate::DragSession).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementConfig {
    /// Maximum parent hops when searching for the enclosing list.
    /// Default: 1024.
    pub max_ancestor_depth: usize,

    /// Whether a session skips re-resolving a move whose pointer row and
    /// target equal the previous move's.
    /// Default: true.
    pub coalesce_moves: bool,

    /// What a drop with no placement does.
    /// Default: [`UnplacedDrop::Append`].
    pub unplaced_drop: UnplacedDrop,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            max_ancestor_depth: DEFAULT_MAX_ANCESTOR_DEPTH,
            coalesce_moves: true,
            unplaced_drop: UnplacedDrop::Append,
        }
    }
}

impl PlacementConfig {
    /// Set the ancestor walk bound.
    #[must_use]
    pub fn with_max_ancestor_depth(mut self, depth: usize) -> Self {
        self.max_ancestor_depth = depth;
        self
    }

    /// Enable or disable move coalescing.
    #[must_use]
    pub fn with_coalesce_moves(mut self, coalesce: bool) -> Self {
        self.coalesce_moves = coalesce;
        self
    }

    /// Set the unplaced-drop behavior.
    #[must_use]
    pub fn with_unplaced_drop(mut self, unplaced_drop: UnplacedDrop) -> Self {
        self.unplaced_drop = unplaced_drop;
        self
    }

    /// Load config from environment variables.
    ///
    /// Reads:
    /// - `DROPLINE_MAX_ANCESTOR_DEPTH`: parent-hop bound
    /// - `DROPLINE_COALESCE_MOVES`: "1"/"true" or "0"/"false"
    /// - `DROPLINE_UNPLACED_DROP`: "append" or "reject"
    ///
    /// Unparseable values are ignored. The result is [`validated`](Self::validated).
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) but reads through `lookup`.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(val) = lookup("DROPLINE_MAX_ANCESTOR_DEPTH")
            && let Ok(depth) = val.trim().parse::<usize>()
        {
            config.max_ancestor_depth = depth;
        }

        if let Some(val) = lookup("DROPLINE_COALESCE_MOVES") {
            let val = val.trim();
            if val == "1" || val.eq_ignore_ascii_case("true") {
                config.coalesce_moves = true;
            } else if val == "0" || val.eq_ignore_ascii_case("false") {
                config.coalesce_moves = false;
            }
        }

        if let Some(val) = lookup("DROPLINE_UNPLACED_DROP")
            && let Some(unplaced) = UnplacedDrop::parse(&val)
        {
            config.unplaced_drop = unplaced;
        }

        config.validated()
    }

    /// Clamp `max_ancestor_depth` to 1-65535.
    #[must_use]
    pub fn validated(mut self) -> Self {
        self.max_ancestor_depth = self
            .max_ancestor_depth
            .clamp(1, MAX_ANCESTOR_DEPTH_CEILING);
        self
    }
}
