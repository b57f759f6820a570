use std::collections::HashSet;

use tyle_core::TileId;

use crate::node::{Node, Split, Tile};

// ──────────────────────────────────────────────
// Addressing
// ──────────────────────────────────────────────

/// Where a leaf lives: the child-index path from the root split down to the
/// split that directly contains it, and the leaf's slot inside that split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafPath {
    pub split: Vec<usize>,
    pub index: usize,
}

/// Locate the nearest split enclosing `id`. Returns `None` when the tile is
/// not in this tree.
pub fn find_parent_split<P>(root: &Split<P>, id: TileId) -> Option<LeafPath> {
    let mut path = Vec::new();
    find_in(root, id, &mut path)
}

fn find_in<P>(split: &Split<P>, id: TileId, path: &mut Vec<usize>) -> Option<LeafPath> {
    for (i, child) in split.children.iter().enumerate() {
        match child {
            Node::Leaf(tile) if tile.id() == id => {
                return Some(LeafPath {
                    split: path.clone(),
                    index: i,
                });
            }
            Node::Leaf(_) => {}
            Node::Split(inner) => {
                path.push(i);
                if let Some(found) = find_in(inner, id, path) {
                    return Some(found);
                }
                path.pop();
            }
        }
    }
    None
}

pub fn split_at<'a, P>(root: &'a Split<P>, path: &[usize]) -> Option<&'a Split<P>> {
    let mut current = root;
    for &i in path {
        current = match current.children.get(i)? {
            Node::Split(inner) => inner,
            Node::Leaf(_) => return None,
        };
    }
    Some(current)
}

pub fn split_at_mut<'a, P>(root: &'a mut Split<P>, path: &[usize]) -> Option<&'a mut Split<P>> {
    let mut current = root;
    for &i in path {
        current = match current.children.get_mut(i)? {
            Node::Split(inner) => inner,
            Node::Leaf(_) => return None,
        };
    }
    Some(current)
}

pub fn find_tile<P>(split: &Split<P>, id: TileId) -> Option<&Tile<P>> {
    for child in &split.children {
        match child {
            Node::Leaf(tile) if tile.id() == id => return Some(tile),
            Node::Leaf(_) => {}
            Node::Split(inner) => {
                if let Some(tile) = find_tile(inner, id) {
                    return Some(tile);
                }
            }
        }
    }
    None
}

pub fn find_tile_mut<P>(split: &mut Split<P>, id: TileId) -> Option<&mut Tile<P>> {
    for child in split.children.iter_mut() {
        match child {
            Node::Leaf(tile) if tile.id() == id => return Some(tile),
            Node::Leaf(_) => {}
            Node::Split(inner) => {
                if let Some(tile) = find_tile_mut(inner, id) {
                    return Some(tile);
                }
            }
        }
    }
    None
}

// ──────────────────────────────────────────────
// Flattening
// ──────────────────────────────────────────────

/// Tile ids in pre-order, left to right. An id is reported once even if it
/// somehow appears twice.
pub fn flatten_leaves<P>(root: &Split<P>) -> Vec<TileId> {
    let mut out = Vec::new();
    let mut visited = HashSet::new();
    for child in &root.children {
        collect_ids(child, &mut out, &mut visited);
    }
    out
}

fn collect_ids<P>(node: &Node<P>, out: &mut Vec<TileId>, visited: &mut HashSet<TileId>) {
    match node {
        Node::Leaf(tile) => {
            if visited.insert(tile.id()) {
                out.push(tile.id());
            }
        }
        Node::Split(split) => {
            for child in &split.children {
                collect_ids(child, out, visited);
            }
        }
    }
}

/// Borrow every tile in pre-order.
pub fn leaves<P>(root: &Split<P>) -> Vec<&Tile<P>> {
    fn walk<'a, P>(split: &'a Split<P>, out: &mut Vec<&'a Tile<P>>) {
        for child in &split.children {
            match child {
                Node::Leaf(tile) => out.push(tile),
                Node::Split(inner) => walk(inner, out),
            }
        }
    }
    let mut out = Vec::new();
    walk(root, &mut out);
    out
}

// ──────────────────────────────────────────────
// Teardown
// ──────────────────────────────────────────────

/// Dismantle a subtree, moving every tile into `keep` in pre-order.
///
/// Children are detached before their container is dropped, so no tile is
/// ever destroyed along with the split that held it.
pub fn detach_subtree<P>(node: Node<P>, keep: &mut Vec<Tile<P>>) {
    match node {
        Node::Leaf(tile) => keep.push(tile),
        Node::Split(split) => {
            let (_, children, _) = split.into_parts();
            for child in children {
                detach_subtree(child, keep);
            }
        }
    }
}

/// Empty the root split, returning all of its tiles in pre-order. The root
/// itself survives with no children.
pub fn detach_all<P>(root: &mut Split<P>) -> Vec<Tile<P>> {
    let mut keep = Vec::new();
    for child in std::mem::take(&mut root.children) {
        detach_subtree(child, &mut keep);
    }
    root.weights.clear();
    keep
}

// ──────────────────────────────────────────────
// Normalization
// ──────────────────────────────────────────────

/// Restore structural invariants after a removal: non-root splits with one
/// child are replaced by that child (which inherits the slot's weight) and
/// empty non-root splits are dropped. The root itself is never replaced and
/// may hold a single split.
pub fn prune<P>(split: &mut Split<P>) {
    let mut i = 0;
    while i < split.children.len() {
        let remaining = match &mut split.children[i] {
            Node::Split(inner) => {
                prune(inner);
                Some(inner.children.len())
            }
            Node::Leaf(_) => None,
        };

        match remaining {
            Some(0) => {
                split.children.remove(i);
                split.weights.remove(i);
                continue;
            }
            Some(1) => {
                let only = match &mut split.children[i] {
                    Node::Split(inner) => inner.children.pop(),
                    Node::Leaf(_) => None,
                };
                if let Some(only) = only {
                    split.children[i] = only;
                }
            }
            _ => {}
        }
        i += 1;
    }
}
