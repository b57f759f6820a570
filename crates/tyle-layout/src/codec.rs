// Record encoding of workspace trees for persistence.
// Split weights are not part of the record; decoded splits start out equal.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tyle_core::{ContentPane, Orientation, TilingMode, WorkspaceId};

use crate::node::{Node, Split, Tile};
use crate::workspace::Workspace;
use crate::{LayoutConfig, WEIGHT_SCALE};

// ──────────────────────────────────────────────
// Serializable records
// ──────────────────────────────────────────────

pub const KIND_TILE: &str = "tile";
pub const KIND_SPLIT: &str = "split";

/// One node of an encoded tree. Every field is optional on input so a
/// damaged record degrades to a default tile instead of failing the load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    #[serde(default, alias = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orientation: Option<String>,
    #[serde(default, alias = "tabs", skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeRecord>,
}

impl NodeRecord {
    pub fn tile(items: Vec<String>) -> Self {
        Self {
            kind: KIND_TILE.to_string(),
            items,
            ..Default::default()
        }
    }

    pub fn split(orientation: Orientation, children: Vec<NodeRecord>) -> Self {
        Self {
            kind: KIND_SPLIT.to_string(),
            orientation: Some(orientation.as_str().to_string()),
            children,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceRecord {
    #[serde(default)]
    pub tiling_mode: String,
    #[serde(default, alias = "active_tile_index")]
    pub active_index: usize,
    #[serde(default)]
    pub tree: Option<NodeRecord>,
}

/// A whole session: every workspace plus the one on screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    #[serde(default = "default_workspace_id", alias = "current_workspace_idx")]
    pub current_workspace: WorkspaceId,
    #[serde(default)]
    pub workspaces: BTreeMap<WorkspaceId, WorkspaceRecord>,
}

fn default_workspace_id() -> WorkspaceId {
    1
}

impl Default for SessionRecord {
    fn default() -> Self {
        Self {
            current_workspace: default_workspace_id(),
            workspaces: BTreeMap::new(),
        }
    }
}

// ──────────────────────────────────────────────
// Encoding
// ──────────────────────────────────────────────

pub fn encode_node<P: ContentPane>(node: &Node<P>) -> NodeRecord {
    match node {
        Node::Leaf(tile) => NodeRecord::tile(tile.items()),
        Node::Split(split) => encode_split(split),
    }
}

pub fn encode_split<P: ContentPane>(split: &Split<P>) -> NodeRecord {
    NodeRecord::split(split.orientation(), split.children().iter().map(encode_node).collect())
}

// ──────────────────────────────────────────────
// Decoding
// ──────────────────────────────────────────────

/// Decode a record. Unrecognized kinds become a tile seeded with `seed`;
/// tiles without items get the seed too. A split with nothing decodable
/// inside yields `None`.
pub fn decode_node<P: ContentPane>(record: &NodeRecord, seed: &[String]) -> Option<Node<P>> {
    match record.kind.as_str() {
        KIND_TILE => {
            let items = if record.items.is_empty() { seed } else { &record.items[..] };
            Some(Node::Leaf(Tile::new(items)))
        }
        KIND_SPLIT | "splitter" => {
            let orientation = record
                .orientation
                .as_deref()
                .and_then(Orientation::from_name)
                .unwrap_or(Orientation::Horizontal);
            let children: Vec<Node<P>> = record
                .children
                .iter()
                .filter_map(|child| decode_node(child, seed))
                .collect();
            if children.is_empty() {
                return None;
            }
            let weights = vec![WEIGHT_SCALE; children.len()];
            Some(Node::Split(Split::with_children(orientation, children, weights)))
        }
        other => {
            log::warn!("unrecognized node kind {:?}; using a default tile", other);
            Some(Node::Leaf(Tile::new(seed)))
        }
    }
}

impl<P: ContentPane> Workspace<P> {
    pub fn to_record(&self) -> WorkspaceRecord {
        WorkspaceRecord {
            tiling_mode: self.mode.as_str().to_string(),
            active_index: self.focus.active(),
            tree: Some(encode_split(&self.root)),
        }
    }

    /// Rebuild a workspace from its record. Never fails: anything unusable
    /// falls back to a horizontal workspace with one default tile.
    pub fn from_record(record: &WorkspaceRecord, config: LayoutConfig) -> Self {
        let mode = TilingMode::from_name(&record.tiling_mode).unwrap_or_else(|| {
            if !record.tiling_mode.is_empty() {
                log::warn!("unknown tiling mode {:?}; using horizontal", record.tiling_mode);
            }
            TilingMode::default()
        });

        let seed = vec![config.default_pane_seed.clone()];
        let root = match record.tree.as_ref().and_then(|tree| decode_node(tree, &seed)) {
            Some(Node::Split(split)) => split,
            Some(leaf) => Split::with_children(Orientation::Horizontal, vec![leaf], vec![WEIGHT_SCALE]),
            None => Split::new(Orientation::Horizontal),
        };

        let mut ws = Self::with_root(root, mode, config);
        ws.focus.focus(record.active_index, ws.leaves.len());
        ws
    }
}
