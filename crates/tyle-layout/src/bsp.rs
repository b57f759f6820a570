use tyle_core::Orientation;

use crate::node::{Node, Split, Tile};

/// Build a balanced binary tree over `tiles`.
///
/// The sequence is halved by count (`len / 2`), never by weight, and the
/// orientation alternates per level starting with `orientation`. Each split
/// gets the summed weights of its two halves. A single tile comes back as a
/// bare leaf; an empty sequence yields `None`.
///
/// With `n` tiles the result has depth `ceil(log2(n))` and every split has
/// exactly two children.
pub fn build_bsp<P>(mut tiles: Vec<Tile<P>>, weights: &[u32], orientation: Orientation) -> Option<Node<P>> {
    match tiles.len() {
        0 => return None,
        1 => return tiles.pop().map(Node::Leaf),
        _ => {}
    }

    let mid = tiles.len() / 2;
    let right_tiles = tiles.split_off(mid);
    let (left_weights, right_weights) = weights.split_at(mid.min(weights.len()));

    let left = build_bsp(tiles, left_weights, orientation.flipped())?;
    let right = build_bsp(right_tiles, right_weights, orientation.flipped())?;

    Some(Node::Split(Split::with_children(
        orientation,
        vec![left, right],
        vec![sum_weights(left_weights), sum_weights(right_weights)],
    )))
}

fn sum_weights(weights: &[u32]) -> u32 {
    let total: u64 = weights.iter().map(|&w| u64::from(w)).sum();
    total.clamp(1, u64::from(u32::MAX)) as u32
}
