use std::fmt::Write as _;

use tyle_core::{ContentPane, Direction, FocusChange, Orientation, Rect, Size, TileId, TilingMode, Vec2};

use crate::bsp::build_bsp;
use crate::focus::FocusTracker;
use crate::node::{Node, Split, Tile};
use crate::tree::{
    detach_all, find_parent_split, find_tile, find_tile_mut, flatten_leaves, leaves, prune, split_at,
    split_at_mut,
};
use crate::{normalize_weights, LayoutConfig, MIN_WEIGHT, WEIGHT_SCALE};

// ──────────────────────────────────────────────
// Workspace
// ──────────────────────────────────────────────

/// One tiling workspace: a root split, the tiling mode, and the active tile.
///
/// Every public operation leaves at least one tile in the tree and keeps the
/// active index inside the flattened leaf list.
pub struct Workspace<P> {
    pub(crate) root: Split<P>,
    pub(crate) mode: TilingMode,
    /// Flattened leaf list, resynchronized after every structural change.
    pub(crate) leaves: Vec<TileId>,
    pub(crate) focus: FocusTracker,
    pub(crate) config: LayoutConfig,
    pub(crate) viewport: Size,
}

impl<P: ContentPane> Workspace<P> {
    /// A horizontal workspace holding one default tile.
    pub fn new(config: LayoutConfig) -> Self {
        let mut ws = Self::with_root(Split::new(Orientation::Horizontal), TilingMode::Horizontal, config);
        ws.focus.announce(ws.leaves.len());
        ws
    }

    /// Adopt an already-built tree. Empty trees receive a default tile.
    pub(crate) fn with_root(root: Split<P>, mode: TilingMode, config: LayoutConfig) -> Self {
        let viewport = config.viewport;
        let mut ws = Self {
            root,
            mode,
            leaves: Vec::new(),
            focus: FocusTracker::default(),
            config,
            viewport,
        };
        prune(&mut ws.root);
        ws.sync_leaves();
        ws
    }

    // ── Tiles ───────────────────────────────────

    /// Add a tile holding `items` (the configured seed when `None`) and make
    /// it active. An explicitly empty item list adds nothing.
    pub fn add_tile(&mut self, items: Option<&[String]>) -> Option<TileId> {
        let items = match items {
            Some([]) => return None,
            Some(items) => items.to_vec(),
            None => self.default_items(),
        };

        let tile = Tile::new(&items);
        let id = tile.id();
        self.insert_tile(tile);
        self.sync_leaves();

        if let Some(index) = self.index_of(id) {
            self.focus.focus(index, self.leaves.len());
        }
        log::debug!("added tile {} ({} tiles, {:?})", id, self.leaves.len(), self.mode);
        Some(id)
    }

    /// Destroy a tile. The last tile is replaced in place by a fresh default
    /// tile so the workspace never goes empty. Unknown ids are ignored.
    pub fn remove_tile(&mut self, id: TileId) -> bool {
        let Some(path) = find_parent_split(&self.root, id) else {
            return false;
        };

        if self.leaves.len() == 1 {
            let fresh = Tile::new(&self.default_items());
            let Some(parent) = split_at_mut(&mut self.root, &path.split) else {
                return false;
            };
            let weight = parent.weights().get(path.index).copied().unwrap_or(WEIGHT_SCALE);
            parent.remove(path.index);
            parent.insert(path.index, Node::Leaf(fresh), weight);
            self.sync_leaves();
            self.focus.focus(0, self.leaves.len());
            log::debug!("replaced last tile {} with a default tile", id);
            return true;
        }

        let Some(parent) = split_at_mut(&mut self.root, &path.split) else {
            return false;
        };
        parent.remove(path.index);
        prune(&mut self.root);
        self.sync_leaves();
        self.focus.clamp(self.leaves.len());
        log::debug!("removed tile {} ({} tiles left)", id, self.leaves.len());
        true
    }

    /// Unlink a tile without destroying it so it can be attached elsewhere.
    /// Refuses to take the only tile.
    pub fn detach_tile(&mut self, id: TileId) -> Option<Tile<P>> {
        if self.leaves.len() <= 1 {
            return None;
        }
        let path = find_parent_split(&self.root, id)?;
        let parent = split_at_mut(&mut self.root, &path.split)?;
        let tile = match parent.remove(path.index)? {
            (Node::Leaf(tile), _) => tile,
            (other, weight) => {
                parent.insert(path.index, other, weight);
                return None;
            }
        };

        prune(&mut self.root);
        self.sync_leaves();
        self.focus.clamp(self.leaves.len());
        log::debug!("detached tile {}", id);
        Some(tile)
    }

    /// Receive a tile from another workspace. Focus stays on the tile that was
    /// active before.
    pub fn attach_tile(&mut self, tile: Tile<P>) {
        let active = self.active_tile_id();
        let id = tile.id();
        self.insert_tile(tile);
        self.sync_leaves();
        match active.and_then(|a| self.index_of(a)) {
            Some(index) => self.focus.focus(index, self.leaves.len()),
            None => self.focus.clamp(self.leaves.len()),
        }
        log::debug!("attached tile {}", id);
    }

    /// Close item `index` of tile `id`. When that empties the tile, the tile
    /// is removed before returning. Returns whether the tile was removed.
    pub fn close_item(&mut self, id: TileId, index: usize) -> bool {
        let emptied = match find_tile_mut(&mut self.root, id) {
            Some(tile) => tile.close_item(index),
            None => return false,
        };
        if emptied {
            self.remove_tile(id);
        }
        emptied
    }

    /// Close the active tile's current item.
    pub fn remove_current_item(&mut self) -> bool {
        let Some(tile) = self.active_tile() else {
            return false;
        };
        let id = tile.id();
        let current = tile.pane().current_index();
        match current {
            Some(index) => self.close_item(id, index),
            None => false,
        }
    }

    fn insert_tile(&mut self, tile: Tile<P>) {
        match self.mode {
            TilingMode::Bsp => {
                // The newcomer has no on-screen extent yet; it gets the mean.
                let mut extents = self.sample_extents(Orientation::Horizontal);
                let total: u64 = extents.iter().map(|&w| u64::from(w)).sum();
                let mean = total / extents.len().max(1) as u64;
                extents.push((mean as u32).max(1));

                let mut tiles = detach_all(&mut self.root);
                tiles.push(tile);
                self.root = bsp_root(tiles, &normalize_weights(&extents));
            }
            TilingMode::Horizontal | TilingMode::Vertical => {
                let weight = match self.root.len() {
                    0 => WEIGHT_SCALE,
                    n => {
                        let total: u64 = self.root.weights().iter().map(|&w| u64::from(w)).sum();
                        (total / n as u64) as u32
                    }
                };
                self.root.push(Node::Leaf(tile), weight.max(MIN_WEIGHT));
            }
        }
    }

    // ── Geometry ────────────────────────────────

    /// Grow the active tile by `delta` weight units, borrowing the same
    /// amount from the first sibling that is still above the minimum.
    pub fn resize_active_tile(&mut self, delta: i32) -> bool {
        let Some(id) = self.active_tile_id() else {
            return false;
        };
        let Some(path) = find_parent_split(&self.root, id) else {
            return false;
        };
        let Some(parent) = split_at_mut(&mut self.root, &path.split) else {
            return false;
        };
        if parent.len() < 2 {
            return false;
        }

        let delta = i64::from(delta);
        let mut weights = parent.weights().to_vec();
        weights[path.index] = offset_weight(weights[path.index], delta);
        for j in 0..weights.len() {
            if j != path.index && weights[j] > MIN_WEIGHT {
                weights[j] = offset_weight(weights[j], -delta);
                break;
            }
        }
        parent.set_weights(&weights);
        true
    }

    /// Move the active tile one step in `direction`.
    ///
    /// Inside a split of the matching axis the tile trades places with its
    /// neighbour; weights stay with the slots, not the tiles. At the edge of
    /// its split (or in a split of the other axis) the tile is promoted into
    /// the enclosing split, just before or after the group it left.
    pub fn move_tile(&mut self, direction: Direction) -> bool {
        let Some(id) = self.active_tile_id() else {
            return false;
        };
        let Some(path) = find_parent_split(&self.root, id) else {
            return false;
        };
        let Some(parent) = split_at(&self.root, &path.split) else {
            return false;
        };

        let index = path.index;
        if parent.orientation() == direction.axis() {
            let target = if direction.is_forward() {
                (index + 1 < parent.len()).then_some(index + 1)
            } else {
                index.checked_sub(1)
            };
            if let Some(target) = target {
                if let Some(parent) = split_at_mut(&mut self.root, &path.split) {
                    parent.swap_children(index, target);
                }
                self.sync_leaves();
                self.refocus(id);
                return true;
            }
        }

        let Some((&group, grandparent_path)) = path.split.split_last() else {
            return false;
        };
        let grandparent_path = grandparent_path.to_vec();

        let Some(parent) = split_at_mut(&mut self.root, &path.split) else {
            return false;
        };
        let Some((node, _)) = parent.remove(index) else {
            return false;
        };
        let Some(grandparent) = split_at_mut(&mut self.root, &grandparent_path) else {
            return false;
        };

        let group_weight = grandparent.weights().get(group).copied().unwrap_or(WEIGHT_SCALE);
        let moved_weight = group_weight / 2;
        grandparent.set_weight(group, (group_weight - moved_weight).max(MIN_WEIGHT));
        let insert_at = if direction.is_forward() { group + 1 } else { group };
        grandparent.insert(insert_at, node, moved_weight.max(MIN_WEIGHT));

        prune(&mut self.root);
        self.sync_leaves();
        self.refocus(id);
        log::debug!("promoted tile {} {}", id, direction.as_str());
        true
    }

    /// Rebuild the tree for `mode`, keeping tile order and approximate sizes.
    /// Returns `false` when `mode` is already active.
    pub fn set_tiling_mode(&mut self, mode: TilingMode) -> bool {
        if mode == self.mode {
            return false;
        }

        // Collect: sizes along the axis the target mode lays tiles out on.
        let weights = normalize_weights(&self.sample_extents(mode.sample_axis()));

        // Teardown: tiles leave their splits before the splits are dropped.
        let tiles = detach_all(&mut self.root);

        // Rebuild.
        self.root = match mode {
            TilingMode::Horizontal => flat_root(tiles, weights, Orientation::Horizontal),
            TilingMode::Vertical => flat_root(tiles, weights, Orientation::Vertical),
            TilingMode::Bsp => bsp_root(tiles, &weights),
        };
        self.mode = mode;

        self.sync_leaves();
        self.focus.clamp(self.leaves.len());
        log::debug!("tiling mode -> {} ({} tiles)", mode.as_str(), self.leaves.len());
        true
    }

    /// Like [`Workspace::set_tiling_mode`] but by name; unknown names are ignored.
    pub fn set_tiling_mode_named(&mut self, name: &str) -> bool {
        match TilingMode::from_name(name) {
            Some(mode) => self.set_tiling_mode(mode),
            None => false,
        }
    }

    pub fn set_viewport(&mut self, size: Size) {
        self.viewport = size;
    }

    /// Rectangle of every tile for the current viewport, in leaf order.
    pub fn compute_rects(&self) -> Vec<(TileId, Rect)> {
        let mut out = Vec::new();
        let rect = Rect::new(0.0, 0.0, self.viewport.width, self.viewport.height);
        self.root.compute_rects(rect, &mut out);
        out
    }

    /// Tile whose rect contains `point`. Shared edges resolve to the earlier tile.
    pub fn tile_at(&self, point: Vec2) -> Option<TileId> {
        self.compute_rects()
            .into_iter()
            .find(|(_, rect)| rect.contains(point))
            .map(|(id, _)| id)
    }

    /// Make the tile under `point` active, as a click would.
    pub fn focus_at(&mut self, point: Vec2) -> bool {
        match self.tile_at(point) {
            Some(id) => self.set_active_tile(id),
            None => false,
        }
    }

    /// On-screen extent of each tile along `axis`, at least 1.
    fn sample_extents(&self, axis: Orientation) -> Vec<u32> {
        self.compute_rects()
            .iter()
            .map(|(_, rect)| (rect.extent(axis).round() as u32).max(1))
            .collect()
    }

    // ── Focus ───────────────────────────────────

    /// Move focus `step` tiles forward (negative: backward), wrapping.
    pub fn cycle_focus(&mut self, step: isize) {
        self.focus.cycle(step, self.leaves.len());
    }

    pub fn set_active_tile(&mut self, id: TileId) -> bool {
        match self.index_of(id) {
            Some(index) => {
                self.focus.focus(index, self.leaves.len());
                true
            }
            None => false,
        }
    }

    /// Focus notifications accumulated since the last drain.
    pub fn drain_focus_changes(&mut self) -> Vec<FocusChange> {
        self.focus.drain()
    }

    fn refocus(&mut self, id: TileId) {
        if let Some(index) = self.index_of(id) {
            self.focus.focus(index, self.leaves.len());
        }
    }

    // ── Bookkeeping ─────────────────────────────

    /// Recompute the flattened leaf list, inserting a default tile if the
    /// tree has none, and keep the active index in range.
    pub(crate) fn sync_leaves(&mut self) {
        self.leaves = flatten_leaves(&self.root);
        if self.leaves.is_empty() {
            let tile = Tile::new(&self.default_items());
            self.root.push(Node::Leaf(tile), WEIGHT_SCALE);
            self.leaves = flatten_leaves(&self.root);
        }
        self.focus.bound(self.leaves.len());
    }

    pub(crate) fn default_items(&self) -> Vec<String> {
        vec![self.config.default_pane_seed.clone()]
    }

    // ── Accessors ───────────────────────────────

    pub fn tiling_mode(&self) -> TilingMode {
        self.mode
    }

    pub fn root(&self) -> &Split<P> {
        &self.root
    }

    pub fn leaf_ids(&self) -> &[TileId] {
        &self.leaves
    }

    pub fn tile_count(&self) -> usize {
        self.leaves.len()
    }

    pub fn tiles(&self) -> Vec<&Tile<P>> {
        leaves(&self.root)
    }

    pub fn index_of(&self, id: TileId) -> Option<usize> {
        self.leaves.iter().position(|&leaf| leaf == id)
    }

    pub fn active_index(&self) -> usize {
        self.focus.active()
    }

    pub fn active_tile_id(&self) -> Option<TileId> {
        self.leaves.get(self.focus.active()).copied()
    }

    pub fn active_tile(&self) -> Option<&Tile<P>> {
        self.tile(self.active_tile_id()?)
    }

    pub fn active_tile_mut(&mut self) -> Option<&mut Tile<P>> {
        let id = self.active_tile_id()?;
        self.tile_mut(id)
    }

    pub fn tile(&self, id: TileId) -> Option<&Tile<P>> {
        find_tile(&self.root, id)
    }

    pub fn tile_mut(&mut self, id: TileId) -> Option<&mut Tile<P>> {
        find_tile_mut(&mut self.root, id)
    }

    /// Indented dump of the tree; the active tile is marked with `*`.
    pub fn describe(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "mode {}", self.mode.as_str());
        describe_split(&self.root, 0, self.active_tile_id(), &mut out);
        out
    }
}

// ──────────────────────────────────────────────
// Helpers
// ──────────────────────────────────────────────

fn offset_weight(weight: u32, delta: i64) -> u32 {
    (i64::from(weight) + delta).clamp(i64::from(MIN_WEIGHT), i64::from(u32::MAX)) as u32
}

fn flat_root<P>(tiles: Vec<Tile<P>>, weights: Vec<u32>, orientation: Orientation) -> Split<P> {
    let children = tiles.into_iter().map(Node::Leaf).collect();
    Split::with_children(orientation, children, weights)
}

/// A horizontal root holding the BSP tree as its only child, so tiles moved
/// off the edge of the tree have an enclosing split to land in.
fn bsp_root<P>(tiles: Vec<Tile<P>>, weights: &[u32]) -> Split<P> {
    match build_bsp(tiles, weights, Orientation::Horizontal) {
        Some(node) => Split::with_children(Orientation::Horizontal, vec![node], vec![WEIGHT_SCALE]),
        None => Split::new(Orientation::Horizontal),
    }
}

fn describe_split<P: ContentPane>(split: &Split<P>, depth: usize, active: Option<TileId>, out: &mut String) {
    let indent = "  ".repeat(depth);
    let _ = writeln!(out, "{}split {} {:?}", indent, split.orientation().as_str(), split.weights());
    for child in split.children() {
        match child {
            Node::Leaf(tile) => {
                let marker = if Some(tile.id()) == active { " *" } else { "" };
                let _ = writeln!(out, "{}  tile #{} {:?}{}", indent, tile.id(), tile.items(), marker);
            }
            Node::Split(inner) => describe_split(inner, depth + 1, active, out),
        }
    }
}
