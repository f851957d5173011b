use crate::error::{MosaicError, Result};
use crate::tile::{Side, Tile};

/// A successful join: `tile` is the re-oriented copy of the other tile, attached
/// to `side` of the static tile after `step` steps of the orientation walk.
#[derive(Debug, Clone)]
pub struct Join {
    pub side: Side,
    pub step: usize,
    pub tile: Tile,
}

/// Finds the orientation of `other` that lets it sit next to `static_tile`.
///
/// A shared edge only counts when it lies on opposite sides of the two tiles
/// (top against bottom, left against right); coincidences on any other pair of
/// sides keep the search going. `other` is never modified, the caller commits
/// the returned copy.
pub fn match_tiles(static_tile: &Tile, other: &Tile) -> Result<Join> {
    let static_edges = static_tile.edges();
    for (candidate, step) in other.orientations() {
        if static_edges.is_disjoint(&candidate.edges()) {
            continue;
        }
        let side = Side::ALL
            .iter()
            .copied()
            .find(|side| static_tile.edge(*side) == candidate.edge(side.opposite()));
        match side {
            Some(side) => {
                log::trace!(
                    "tile {} joins {} side of {} at step {}",
                    other.id(),
                    side,
                    static_tile.id(),
                    step
                );
                return Ok(Join {
                    side,
                    step,
                    tile: candidate,
                });
            }
            None => log::trace!(
                "tiles {} and {} share an edge on non-opposite sides at step {}",
                static_tile.id(),
                other.id(),
                step
            ),
        }
    }
    Err(MosaicError::NoMatchingOrientation {
        static_id: static_tile.id(),
        other_id: other.id(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adjacency::{tiles_map, TilesMap};
    use crate::helpers;
    use crate::tile::parse_tiles;
    use anyhow::Context;

    fn sample() -> TilesMap {
        let input = helpers::get_data_from_file_res("d20_sample")
            .context("Coudn't read file contents.")
            .unwrap();
        tiles_map(parse_tiles(&input).unwrap())
    }

    #[test]
    fn test_matcher() {
        let tiles = sample();
        macro_rules! test {
            ($static_id: literal, $other_id: literal, $side: expr, $step: literal) => {
                let static_tile = &tiles[&$static_id];
                let other = &tiles[&$other_id];
                let join = match_tiles(static_tile, other).unwrap();
                assert_eq!(join.side, $side);
                assert_eq!(join.step, $step);
                assert_eq!(join.tile.id(), $other_id);
                assert_eq!(
                    static_tile.edge(join.side),
                    join.tile.edge(join.side.opposite())
                );
            };
        }

        test!(3535, 4261, Side::Right, 0);
        test!(3535, 6737, Side::Top, 1);
        test!(1934, 4073, Side::Bottom, 7);
        test!(1934, 7166, Side::Top, 4);
        test!(1934, 7376, Side::Left, 0);
        test!(4073, 9533, Side::Right, 5);
    }

    #[test]
    fn test_other_tile_is_left_alone() {
        let tiles = sample();
        let before = tiles[&4073].clone();
        let join = match_tiles(&tiles[&1934], &tiles[&4073]).unwrap();
        assert_eq!(tiles[&4073], before);
        assert_ne!(join.tile, before);
    }

    #[test]
    fn test_no_matching_orientation() {
        let tiles = sample();
        let result = match_tiles(&tiles[&3535], &tiles[&7461]);
        assert_eq!(
            result.unwrap_err(),
            MosaicError::NoMatchingOrientation {
                static_id: 3535,
                other_id: 7461
            }
        );
    }

    #[test]
    fn test_shared_edge_on_same_side_is_rejected() {
        // The first two steps line up equal edges on sides that can't touch,
        // the third puts the other tile on top.
        let static_tile = "Tile 1:\n..#\n#..\n##.".parse::<Tile>().unwrap();
        let other = "Tile 2:\n.##\n#..\n.#.".parse::<Tile>().unwrap();
        let join = match_tiles(&static_tile, &other).unwrap();
        assert_eq!(join.side, Side::Top);
        assert_eq!(join.step, 2);
        assert_eq!(
            static_tile.edge(join.side),
            join.tile.edge(join.side.opposite())
        );
    }
}
