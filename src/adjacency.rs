use crate::error::{MosaicError, Result};
use crate::tile::{Tile, TileId};
use itertools::Itertools;
use std::collections::{BTreeMap, BTreeSet};

pub type TilesMap = BTreeMap<TileId, Tile>;
/// Tile id to the ids of every tile sharing at least one edge with it, in either direction.
pub type AdjacencyMap = BTreeMap<TileId, BTreeSet<TileId>>;

pub fn tiles_map(tiles: Vec<Tile>) -> TilesMap {
    tiles.into_iter().map(|t| (t.id(), t)).collect()
}

/// Finds candidate neighbours for every tile.
///
/// Edges of one tile are compared against both readings of the other's, so the
/// result doesn't depend on how any tile is currently oriented. Every tile gets
/// an entry, even one without neighbours.
pub fn find_candidate_neighbours(tiles: &TilesMap) -> AdjacencyMap {
    let mut neighbours: AdjacencyMap = tiles.keys().map(|id| (*id, BTreeSet::new())).collect();
    let edges = tiles
        .iter()
        .map(|(id, tile)| (*id, (tile.edges_with_reversed(), tile.edges())))
        .collect::<BTreeMap<_, _>>();

    edges
        .iter()
        .tuple_combinations()
        .filter(|((_, (edges_a, _)), (_, (_, edges_b)))| !edges_a.is_disjoint(edges_b))
        .for_each(|((a, _), (b, _))| {
            log::trace!("tiles {} and {} share an edge", a, b);
            neighbours.entry(*a).or_default().insert(*b);
            neighbours.entry(*b).or_default().insert(*a);
        });
    neighbours
}

/// Tiles with exactly two candidate neighbours, in id order.
pub fn corner_ids(neighbours: &AdjacencyMap) -> Vec<TileId> {
    neighbours
        .iter()
        .filter(|(_, n)| n.len() == 2)
        .map(|(id, _)| *id)
        .collect_vec()
}

/// Multiplies the corner ids, failing instead of wrapping when the product outgrows `u64`.
pub fn corner_product(neighbours: &AdjacencyMap) -> Result<u64> {
    let ids = corner_ids(neighbours);
    let product = ids
        .iter()
        .try_fold(1u64, |acc, id| acc.checked_mul(u64::from(*id)));
    product.ok_or(MosaicError::CornerProductOverflow { ids })
}
