use crate::adjacency::{corner_ids, AdjacencyMap, TilesMap};
use crate::error::{MosaicError, Result};
use crate::helpers::grid::{Grid, GridPos};
use crate::matcher::match_tiles;
use crate::pixel::Pixel;
use crate::tile::{EdgeSet, Side, Tile, TileId};
use derive_more::Display;
use itertools::Itertools;
use num_integer::Roots;
use std::collections::{BTreeMap, VecDeque};

pub type Bitmap = Grid<Pixel>;

/// Where each tile sits in the final mosaic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementGrid {
    ids: Grid<Option<TileId>>,
    positions: BTreeMap<TileId, GridPos>,
}

impl PlacementGrid {
    pub fn new(side: usize) -> Self {
        PlacementGrid {
            ids: Grid::filled(side, side, None),
            positions: BTreeMap::new(),
        }
    }

    pub fn side(&self) -> usize {
        self.ids.rows()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.len() == self.side() * self.side()
    }

    pub fn get(&self, pos: GridPos) -> Option<TileId> {
        self.ids.get(pos).copied().flatten()
    }

    pub fn position(&self, id: TileId) -> Option<GridPos> {
        self.positions.get(&id).copied()
    }

    pub fn contains(&self, id: TileId) -> bool {
        self.positions.contains_key(&id)
    }

    /// Puts `id` at (`row`, `col`), refusing cells outside the grid or already taken.
    pub fn place(&mut self, id: TileId, row: isize, col: isize) -> Result<GridPos> {
        let side = self.side() as isize;
        if row < 0 || col < 0 || row >= side || col >= side {
            return Err(MosaicError::PlacementOutOfBounds { id, row, col });
        }
        let pos = (row as usize, col as usize);
        if let Some(occupant) = self.get(pos) {
            return Err(MosaicError::PlacementConflict {
                id,
                occupant,
                row: pos.0,
                col: pos.1,
            });
        }
        self.ids[pos] = Some(id);
        self.positions.insert(id, pos);
        Ok(pos)
    }

    /// Tile ids row by row, `None` for cells not filled yet.
    pub fn rows(&self) -> Vec<Vec<Option<TileId>>> {
        (0..self.side()).map(|r| self.ids.row(r)).collect_vec()
    }
}

impl std::fmt::Display for PlacementGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for r in 0..self.side() {
            for c in 0..self.side() {
                match self.get((r, c)) {
                    Some(id) => write!(f, "{:5}", id)?,
                    None => write!(f, "{:>5}", "?")?,
                }
            }
            if r != self.side() - 1 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// The fixed fix-up that turns a corner's two free sides into top and left.
#[derive(Debug, Clone, Copy, Display, PartialEq, Eq)]
pub enum CornerTransform {
    #[display(fmt = "none")]
    Keep,
    #[display(fmt = "rotate once")]
    RotateOnce,
    #[display(fmt = "rotate twice")]
    RotateTwice,
    #[display(fmt = "reflect vertically")]
    ReflectVertical,
}

impl CornerTransform {
    /// `unmatched` must be in [`Side`] order.
    pub fn for_unmatched(unmatched: &[Side]) -> Option<CornerTransform> {
        match unmatched {
            [Side::Top, Side::Left] => Some(CornerTransform::Keep),
            [Side::Top, Side::Right] => Some(CornerTransform::RotateOnce),
            [Side::Bottom, Side::Right] => Some(CornerTransform::RotateTwice),
            [Side::Bottom, Side::Left] => Some(CornerTransform::ReflectVertical),
            _ => None,
        }
    }

    pub fn apply(self, tile: &mut Tile) {
        match self {
            CornerTransform::Keep => (),
            CornerTransform::RotateOnce => tile.rotate(1),
            CornerTransform::RotateTwice => tile.rotate(2),
            CornerTransform::ReflectVertical => tile.reflect_vertical(),
        }
    }
}

/// Sides of `tile` whose edge no neighbour has, read in either direction.
pub fn unmatched_sides<'a, I>(tile: &Tile, neighbours: I) -> Vec<Side>
where
    I: IntoIterator<Item = &'a Tile>,
{
    let matched: EdgeSet = neighbours
        .into_iter()
        .flat_map(|n| n.edges_with_reversed())
        .collect();
    Side::ALL
        .iter()
        .copied()
        .filter(|side| !matched.contains(&tile.edge(*side)))
        .collect_vec()
}

/// Tiles in their final orientation together with their placement.
#[derive(Debug, Clone)]
pub struct Mosaic {
    pub placement: PlacementGrid,
    pub tiles: TilesMap,
}

fn grid_side(tiles: &TilesMap) -> Result<usize> {
    if tiles.is_empty() {
        return Err(MosaicError::EmptyPuzzle);
    }
    let side = tiles.len().sqrt();
    if side * side != tiles.len() {
        return Err(MosaicError::NonSquareTileCount(tiles.len()));
    }
    Ok(side)
}

fn check_tile_sizes(tiles: &TilesMap) -> Result<usize> {
    let expected = tiles.values().next().map(Tile::size).unwrap_or_default();
    if let Some(tile) = tiles.values().find(|t| t.size() != expected) {
        return Err(MosaicError::TileSizeMismatch {
            id: tile.id(),
            expected,
            found: tile.size(),
        });
    }
    if let Some(tile) = tiles.values().find(|t| t.size() < 3) {
        return Err(MosaicError::TileTooSmall {
            id: tile.id(),
            size: tile.size(),
        });
    }
    Ok(expected)
}

/// Places every tile, starting from the lowest-numbered corner.
///
/// The corner is turned so its free sides face up and left, then tiles are
/// matched against already placed ones in breadth-first order. The result
/// holds every tile re-oriented to fit its place.
pub fn arrange(mut tiles: TilesMap, neighbours: &AdjacencyMap) -> Result<Mosaic> {
    let side = grid_side(&tiles)?;
    check_tile_sizes(&tiles)?;
    log::debug!(
        "Arranging {} tiles into a {}x{} grid",
        tiles.len(),
        side,
        side
    );

    let corner_id = corner_ids(neighbours)
        .into_iter()
        .find(|id| tiles.contains_key(id))
        .ok_or(MosaicError::NoCornerTile)?;
    let unmatched = {
        let corner = &tiles[&corner_id];
        let corner_neighbours = neighbours[&corner_id]
            .iter()
            .filter_map(|id| tiles.get(id));
        unmatched_sides(corner, corner_neighbours)
    };
    let transform = CornerTransform::for_unmatched(&unmatched).ok_or_else(|| {
        MosaicError::AmbiguousCorner {
            id: corner_id,
            unmatched: unmatched.iter().map(|s| s.index()).collect(),
        }
    })?;
    log::debug!(
        "Starting from corner {}, unmatched sides {:?}, transform: {}",
        corner_id,
        unmatched,
        transform
    );
    if let Some(corner) = tiles.get_mut(&corner_id) {
        transform.apply(corner);
    }

    let mut placement = PlacementGrid::new(side);
    placement.place(corner_id, 0, 0)?;
    let mut frontier = VecDeque::from(vec![corner_id]);

    while let Some(current_id) = frontier.pop_front() {
        let (r, c) = match placement.position(current_id) {
            Some(pos) => pos,
            None => continue,
        };
        for &neighbour_id in neighbours.get(&current_id).into_iter().flatten() {
            if placement.contains(neighbour_id) {
                continue;
            }
            let join = match (tiles.get(&current_id), tiles.get(&neighbour_id)) {
                (Some(current), Some(neighbour)) => match_tiles(current, neighbour)?,
                _ => continue,
            };
            let (dr, dc) = join.side.grid_delta();
            placement.place(neighbour_id, r as isize + dr, c as isize + dc)?;
            tiles.insert(neighbour_id, join.tile);
            frontier.push_back(neighbour_id);
        }
    }

    if !placement.is_complete() {
        return Err(MosaicError::Disconnected {
            placed: placement.len(),
            total: tiles.len(),
        });
    }
    log::debug!("Tile placement:\n{}", placement);
    Ok(Mosaic { placement, tiles })
}

impl Mosaic {
    /// Stitches the tile interiors, borders stripped, into one bitmap.
    pub fn composite(&self) -> Bitmap {
        let interior = self
            .tiles
            .values()
            .next()
            .map(|t| t.size().saturating_sub(2))
            .unwrap_or_default();
        let bitmap_side = self.placement.side() * interior;
        let mut bitmap = Bitmap::filled(bitmap_side, bitmap_side, Pixel::Empty);
        for (id, tile) in &self.tiles {
            if let Some((r, c)) = self.placement.position(*id) {
                bitmap.copy_block_from(
                    tile.pixels(),
                    (1, 1),
                    (interior, interior),
                    (r * interior, c * interior),
                );
            }
        }
        bitmap
    }
}

pub fn build_image(tiles: TilesMap, neighbours: &AdjacencyMap) -> Result<Bitmap> {
    arrange(tiles, neighbours).map(|mosaic| mosaic.composite())
}
