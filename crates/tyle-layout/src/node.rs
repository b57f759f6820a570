use std::sync::atomic::{AtomicU64, Ordering};

use tyle_core::{ContentPane, Orientation, Rect, TileId};

// ──────────────────────────────────────────────
// Tile: a leaf's payload
// ──────────────────────────────────────────────

static NEXT_TILE_ID: AtomicU64 = AtomicU64::new(1);

/// Tile ids are unique across every workspace in the process, so a tile keeps
/// its identity when it is transferred between workspaces.
fn alloc_tile_id() -> TileId {
    NEXT_TILE_ID.fetch_add(1, Ordering::Relaxed)
}

#[derive(Debug)]
pub struct Tile<P> {
    id: TileId,
    pane: P,
    emptied: bool,
}

impl<P: ContentPane> Tile<P> {
    pub fn new(items: &[String]) -> Self {
        Self {
            id: alloc_tile_id(),
            pane: P::create(items),
            emptied: false,
        }
    }

    pub fn items(&self) -> Vec<String> {
        self.pane.items()
    }

    pub fn item_count(&self) -> usize {
        self.pane.item_count()
    }

    /// Close one of the pane's items.
    ///
    /// Returns `true` exactly once: on the call during which the item count
    /// drops to zero. That return value is the tile's empty notification.
    pub fn close_item(&mut self, index: usize) -> bool {
        let before = self.pane.item_count();
        self.pane.close_item(index);
        if before > 0 && self.pane.item_count() == 0 && !self.emptied {
            self.emptied = true;
            return true;
        }
        false
    }
}

impl<P> Tile<P> {
    pub fn id(&self) -> TileId {
        self.id
    }

    pub fn pane(&self) -> &P {
        &self.pane
    }

    /// Direct pane access. Closing items through this reference skips the
    /// empty notification; use [`Tile::close_item`] for that.
    pub fn pane_mut(&mut self) -> &mut P {
        &mut self.pane
    }
}

// ──────────────────────────────────────────────
// Node: n-ary split tree
// ──────────────────────────────────────────────

#[derive(Debug)]
pub enum Node<P> {
    Leaf(Tile<P>),
    Split(Split<P>),
}

impl<P> Node<P> {
    pub fn as_leaf(&self) -> Option<&Tile<P>> {
        match self {
            Node::Leaf(tile) => Some(tile),
            Node::Split(_) => None,
        }
    }

    pub fn as_split(&self) -> Option<&Split<P>> {
        match self {
            Node::Split(split) => Some(split),
            Node::Leaf(_) => None,
        }
    }

    pub fn tile_id(&self) -> Option<TileId> {
        self.as_leaf().map(Tile::id)
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            Node::Leaf(_) => 1,
            Node::Split(split) => split.leaf_count(),
        }
    }

    /// Number of splits on the longest root-to-leaf path. A leaf has depth 0.
    pub fn depth(&self) -> usize {
        match self {
            Node::Leaf(_) => 0,
            Node::Split(split) => split.depth(),
        }
    }

    pub(crate) fn compute_rects(&self, rect: Rect, out: &mut Vec<(TileId, Rect)>) {
        match self {
            Node::Leaf(tile) => out.push((tile.id(), rect)),
            Node::Split(split) => split.compute_rects(rect, out),
        }
    }
}

/// A container arranging its children along one axis.
///
/// `weights[i]` is child `i`'s share of the split's extent relative to the sum
/// of all weights. The two vectors always have the same length and every
/// weight is at least 1.
#[derive(Debug)]
pub struct Split<P> {
    pub(crate) orientation: Orientation,
    pub(crate) children: Vec<Node<P>>,
    pub(crate) weights: Vec<u32>,
}

impl<P> Split<P> {
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            children: Vec::new(),
            weights: Vec::new(),
        }
    }

    /// Build a split from children and weights. Missing weights default to 1
    /// and surplus weights are dropped.
    pub fn with_children(orientation: Orientation, children: Vec<Node<P>>, weights: Vec<u32>) -> Self {
        let mut weights: Vec<u32> = weights.into_iter().map(|w| w.max(1)).collect();
        weights.resize(children.len(), 1);
        Self {
            orientation,
            children,
            weights,
        }
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn children(&self) -> &[Node<P>] {
        &self.children
    }

    pub fn weights(&self) -> &[u32] {
        &self.weights
    }

    pub fn child(&self, index: usize) -> Option<&Node<P>> {
        self.children.get(index)
    }

    pub fn push(&mut self, node: Node<P>, weight: u32) {
        self.children.push(node);
        self.weights.push(weight.max(1));
    }

    /// Insert at `index`, clamped to the end of the sequence.
    pub fn insert(&mut self, index: usize, node: Node<P>, weight: u32) {
        let index = index.min(self.children.len());
        self.children.insert(index, node);
        self.weights.insert(index, weight.max(1));
    }

    pub fn remove(&mut self, index: usize) -> Option<(Node<P>, u32)> {
        if index >= self.children.len() {
            return None;
        }
        let node = self.children.remove(index);
        let weight = self.weights.remove(index);
        Some((node, weight))
    }

    /// Swap the occupants of two slots. Weights belong to the slot, so they
    /// stay where they are.
    pub fn swap_children(&mut self, a: usize, b: usize) {
        if a < self.children.len() && b < self.children.len() {
            self.children.swap(a, b);
        }
    }

    pub fn set_weight(&mut self, index: usize, weight: u32) {
        if let Some(w) = self.weights.get_mut(index) {
            *w = weight.max(1);
        }
    }

    /// Replace all weights at once; ignored unless the length matches.
    pub fn set_weights(&mut self, weights: &[u32]) {
        if weights.len() == self.weights.len() {
            for (slot, w) in self.weights.iter_mut().zip(weights) {
                *slot = (*w).max(1);
            }
        }
    }

    pub fn leaf_count(&self) -> usize {
        self.children.iter().map(Node::leaf_count).sum()
    }

    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(Node::depth).max().unwrap_or(0)
    }

    pub(crate) fn into_parts(self) -> (Orientation, Vec<Node<P>>, Vec<u32>) {
        (self.orientation, self.children, self.weights)
    }

    pub(crate) fn compute_rects(&self, rect: Rect, out: &mut Vec<(TileId, Rect)>) {
        for (child, child_rect) in self
            .children
            .iter()
            .zip(split_rect(rect, self.orientation, &self.weights))
        {
            child.compute_rects(child_rect, out);
        }
    }
}

// ──────────────────────────────────────────────
// Helpers
// ──────────────────────────────────────────────

/// Divide a rect along `orientation` proportionally to `weights`. The last
/// slot absorbs rounding so the pieces always cover the whole rect.
pub(crate) fn split_rect(rect: Rect, orientation: Orientation, weights: &[u32]) -> Vec<Rect> {
    let total: u64 = weights.iter().map(|&w| u64::from(w)).sum();
    if weights.is_empty() || total == 0 {
        return Vec::new();
    }

    let extent = rect.extent(orientation);
    let mut out = Vec::with_capacity(weights.len());
    let mut offset = 0.0;
    for (i, &w) in weights.iter().enumerate() {
        let len = if i + 1 == weights.len() {
            extent - offset
        } else {
            extent * w as f32 / total as f32
        };
        let piece = match orientation {
            Orientation::Horizontal => Rect::new(rect.x + offset, rect.y, len, rect.height),
            Orientation::Vertical => Rect::new(rect.x, rect.y + offset, rect.width, len),
        };
        out.push(piece);
        offset += len;
    }
    out
}
