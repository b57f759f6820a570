// Layout engine for Tyle workspaces.
// An n-ary split tree with flat (horizontal / vertical) and balanced BSP tiling.

mod bsp;
mod codec;
mod focus;
mod node;
mod tree;
mod workspace;

use tyle_core::Size;

pub use bsp::build_bsp;
pub use codec::{decode_node, encode_node, encode_split, NodeRecord, SessionRecord, WorkspaceRecord, KIND_SPLIT, KIND_TILE};
pub use focus::FocusTracker;
pub use node::{Node, Split, Tile};
pub use tree::{
    detach_all, detach_subtree, find_parent_split, flatten_leaves, leaves, prune, split_at, LeafPath,
};
pub use workspace::Workspace;

// ──────────────────────────────────────────────
// Weights
// ──────────────────────────────────────────────

/// Smallest weight the engine will leave on a tile after a resize or rebuild.
pub const MIN_WEIGHT: u32 = 10;

/// Weights produced by a rebuild sum to roughly this value per split.
pub const WEIGHT_SCALE: u32 = 1000;

/// Rescale raw extents to `WEIGHT_SCALE`, each floored at `MIN_WEIGHT`.
pub fn normalize_weights(raw: &[u32]) -> Vec<u32> {
    let total: u64 = raw.iter().map(|&w| u64::from(w)).sum::<u64>().max(1);
    raw.iter()
        .map(|&w| ((u64::from(w) * u64::from(WEIGHT_SCALE) / total) as u32).max(MIN_WEIGHT))
        .collect()
}

// ──────────────────────────────────────────────
// Configuration
// ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Item given to tiles created without explicit items.
    pub default_pane_seed: String,
    /// Initial viewport used to derive on-screen extents.
    pub viewport: Size,
}

impl LayoutConfig {
    pub fn with_seed(seed: impl Into<String>) -> Self {
        Self {
            default_pane_seed: seed.into(),
            ..Self::default()
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            default_pane_seed: "about:blank".to_string(),
            viewport: Size::new(1400.0, 900.0),
        }
    }
}
