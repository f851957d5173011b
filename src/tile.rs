use crate::helpers::grid::{Grid, GridOrientationsIter};
use crate::helpers::nom::NomError;
use crate::pixel::Pixel;
use derive_more::Display;
use itertools::Itertools;
use nom::{
    bytes::complete::{tag, take_till1},
    character::complete::{digit1, line_ending, multispace0},
    combinator::{all_consuming, map_res},
    error::{context, ErrorKind, FromExternalError},
    multi::separated_list1,
    sequence::{delimited, pair, terminated},
    IResult,
};
use std::collections::BTreeSet;
use std::convert::TryFrom;
use std::str::FromStr;

pub type TileId = u32;
pub type Pixels = Grid<Pixel>;
/// One border row or column, read left to right or top to bottom.
pub type Edge = Vec<Pixel>;
pub type EdgeSet = BTreeSet<Edge>;

/// A side of a tile. The discriminant is the side's position in [`Tile::ordered_edges`].
#[derive(Debug, Clone, Copy, Display, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Side {
    #[display(fmt = "top")]
    Top = 0,
    #[display(fmt = "bottom")]
    Bottom = 1,
    #[display(fmt = "left")]
    Left = 2,
    #[display(fmt = "right")]
    Right = 3,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Top, Side::Bottom, Side::Left, Side::Right];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn opposite(self) -> Side {
        match self {
            Side::Top => Side::Bottom,
            Side::Bottom => Side::Top,
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Offset in the placement grid of a tile attached on this side.
    pub fn grid_delta(self) -> (isize, isize) {
        match self {
            Side::Top => (-1, 0),
            Side::Bottom => (1, 0),
            Side::Left => (0, -1),
            Side::Right => (0, 1),
        }
    }
}

#[derive(Debug, Display, Clone, PartialEq, Eq)]
#[display(fmt = "Tile {}:\n{}", id, pixels)]
pub struct Tile {
    id: TileId,
    pixels: Pixels,
}

pub struct TileOrientationsIter {
    id: TileId,
    inner: GridOrientationsIter<Pixel>,
}

impl std::iter::Iterator for TileOrientationsIter {
    type Item = (Tile, usize);
    fn next(&mut self) -> Option<Self::Item> {
        let id = self.id;
        self.inner
            .next()
            .map(|(pixels, step)| (Tile::new(id, pixels), step))
    }
}

impl Tile {
    pub fn new(id: TileId, pixels: Pixels) -> Self {
        debug_assert!(pixels.is_square());
        Tile { id, pixels }
    }

    pub fn id(&self) -> TileId {
        self.id
    }

    pub fn pixels(&self) -> &Pixels {
        &self.pixels
    }

    /// Side length, border included.
    pub fn size(&self) -> usize {
        self.pixels.rows()
    }

    pub fn edge(&self, side: Side) -> Edge {
        let last = self.size() - 1;
        match side {
            Side::Top => self.pixels.row(0),
            Side::Bottom => self.pixels.row(last),
            Side::Left => self.pixels.col(0),
            Side::Right => self.pixels.col(last),
        }
    }

    /// Edges in [`Side`] order: top, bottom, left, right.
    pub fn ordered_edges(&self) -> [Edge; 4] {
        [
            self.edge(Side::Top),
            self.edge(Side::Bottom),
            self.edge(Side::Left),
            self.edge(Side::Right),
        ]
    }

    pub fn edges(&self) -> EdgeSet {
        self.ordered_edges().iter().cloned().collect()
    }

    /// The four edges plus each of them read backwards.
    pub fn edges_with_reversed(&self) -> EdgeSet {
        self.ordered_edges()
            .iter()
            .flat_map(|e| vec![e.clone(), e.iter().rev().cloned().collect_vec()])
            .collect()
    }

    pub fn side_of(&self, edge: &[Pixel]) -> Option<Side> {
        Side::ALL
            .iter()
            .copied()
            .find(|side| self.edge(*side) == edge)
    }

    pub fn reflect_vertical(&mut self) {
        self.pixels.reflect_vertical()
    }

    pub fn reflect_horizontal(&mut self) {
        self.pixels.reflect_horizontal()
    }

    /// Rotates anticlockwise one quarter turn at a time.
    pub fn rotate(&mut self, quarter_turns: usize) {
        self.pixels.rotate(quarter_turns)
    }

    pub fn orientations(&self) -> TileOrientationsIter {
        TileOrientationsIter {
            id: self.id,
            inner: self.pixels.orientations(),
        }
    }

    /// The pixels left after stripping the one pixel border.
    pub fn interior(&self) -> Pixels {
        let size = self.size().saturating_sub(2);
        let mut interior = Pixels::filled(size, size, Pixel::Empty);
        interior.copy_block_from(&self.pixels, (1, 1), (size, size), (0, 0));
        interior
    }
}

fn is_line_end(c: char) -> bool {
    c == '\n' || c == '\r'
}

fn tile_header(i: &str) -> IResult<&str, TileId, NomError<&str>> {
    context(
        "tile header",
        delimited(
            tag("Tile "),
            map_res(digit1, |s: &str| s.parse::<TileId>()),
            tag(":"),
        ),
    )(i)
}

fn pixel_row(i: &str) -> IResult<&str, Vec<Pixel>, NomError<&str>> {
    let (rest, line) = take_till1(is_line_end)(i)?;
    let row = line
        .chars()
        .map(Pixel::try_from)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| nom::Err::Failure(NomError::from_external_error(line, ErrorKind::MapRes, e)))?;
    Ok((rest, row))
}

fn tile_record(i: &str) -> IResult<&str, Tile, NomError<&str>> {
    let (rest, (id, rows)) = pair(
        terminated(tile_header, line_ending),
        separated_list1(line_ending, pixel_row),
    )(i)?;

    let size = rows.len();
    if let Some(r) = rows.iter().position(|row| row.len() != size) {
        let e = anyhow::anyhow!(
            "tile {} has {} rows but row {} is {} pixels wide",
            id,
            size,
            r,
            rows[r].len()
        );
        return Err(nom::Err::Failure(NomError::from_external_error(
            i,
            ErrorKind::Verify,
            e,
        )));
    }

    let pixels = Pixels::new(size, size, rows.into_iter().flatten().collect());
    Ok((rest, Tile::new(id, pixels)))
}

fn tile_records(i: &str) -> IResult<&str, Vec<Tile>, NomError<&str>> {
    all_consuming(delimited(
        multispace0,
        separated_list1(pair(line_ending, line_ending), tile_record),
        multispace0,
    ))(i)
}

fn finish<T>(input: &str, result: IResult<&str, T, NomError<&str>>) -> anyhow::Result<T> {
    match result {
        Ok((_, value)) => Ok(value),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(e.into_anyhow(input)),
        Err(nom::Err::Incomplete(_)) => anyhow::bail!("Incomplete tile data"),
    }
}

/// Parses every `Tile <id>:` record of a puzzle input. Records are separated by a blank line.
pub fn parse_tiles(s: &str) -> anyhow::Result<Vec<Tile>> {
    finish(s, tile_records(s))
}

impl FromStr for Tile {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        finish(s, all_consuming(tile_record)(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TILE_4261: &str = "
Tile 4261:
##.#...#..
...##.....
#.#......#
#...#.....
.......#.#
........#.
##...#....
#...#..#..
.###.#..##
..#.#....#";

    fn edge_str(edge: &[Pixel]) -> String {
        edge.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn test_parse() {
        let tile = TILE_4261.parse::<Tile>().unwrap();
        assert_eq!(tile.id(), 4261);
        assert_eq!(tile.size(), 10);
        assert_eq!(tile.pixels().count(&Pixel::Full), 29);
        assert_eq!(tile.to_string(), TILE_4261.trim());
    }

    #[test]
    fn test_parse_errors() {
        assert!("Tile x:\n#.\n.#".parse::<Tile>().is_err());
        assert!("Tile 1:\n#.\n.#.".parse::<Tile>().is_err());
        assert!("Tile 1:\n#.\n.O".parse::<Tile>().is_err());
        assert!("Tile 1\n#.\n.#".parse::<Tile>().is_err());

        let e = parse_tiles("Tile 1:\n#.\n.#\n\nTile 2:\n#.\n.x").unwrap_err();
        let message = format!("{}", e);
        assert!(message.contains("at line 7"), "{}", message);
        assert!(message.contains("Invalid pixel 'x'"), "{}", message);
    }

    #[test]
    fn test_parse_many() {
        let input = "\r\nTile 1:\r\n#.\r\n.#\r\n\r\nTile 22:\r\n..\r\n #\r\n\r\n";
        let tiles = parse_tiles(input).unwrap();
        assert_eq!(tiles.iter().map(Tile::id).collect_vec(), vec![1, 22]);
        assert_eq!(tiles[1].pixels().to_string(), "..\n.#");
    }

    #[test]
    fn test_edges() {
        let tile = TILE_4261.parse::<Tile>().unwrap();
        let edges = tile.ordered_edges().iter().map(|e| edge_str(e)).collect_vec();
        assert_eq!(
            edges,
            vec!["##.#...#..", "..#.#....#", "#.##..##..", "..#.#...##"]
        );
        assert_eq!(tile.edges().len(), 4);
        assert_eq!(tile.edges_with_reversed().len(), 8);
        assert!(tile
            .edges_with_reversed()
            .iter()
            .any(|e| edge_str(e) == "..#...#.##"));
        assert_eq!(tile.side_of(&tile.edge(Side::Left)), Some(Side::Left));
        assert_eq!(tile.side_of(&[Pixel::Full]), None);
    }

    #[test]
    fn test_transforms() {
        let tile = TILE_4261.parse::<Tile>().unwrap();
        let mut other = tile.clone();

        other.rotate(1);
        assert_eq!(other.edge(Side::Left), {
            let mut top = tile.edge(Side::Top);
            top.reverse();
            top
        });
        assert_eq!(other.edge(Side::Top), tile.edge(Side::Right));
        other.rotate(3);
        assert_eq!(other, tile);

        other.reflect_vertical();
        assert_eq!(other.edge(Side::Top), tile.edge(Side::Bottom));
        other.reflect_vertical();
        assert_eq!(other, tile);

        other.reflect_horizontal();
        assert_eq!(other.edge(Side::Left), tile.edge(Side::Right));
        other.reflect_horizontal();
        assert_eq!(other, tile);
    }

    #[test]
    fn test_orientations() {
        let tile = TILE_4261.parse::<Tile>().unwrap();
        let all = tile.orientations().collect_vec();
        assert_eq!(all.len(), 8);
        assert!(all.iter().all(|(t, _)| t.id() == 4261));
        assert_eq!(all.iter().map(|(t, _)| t.to_string()).unique().count(), 8);
        // Every orientation shares the same direction-insensitive edges.
        assert!(all
            .iter()
            .all(|(t, _)| t.edges_with_reversed() == tile.edges_with_reversed()));
    }

    #[test]
    fn test_interior() {
        let tile = "Tile 9:\n####\n#..#\n#.##\n####".parse::<Tile>().unwrap();
        assert_eq!(tile.interior().to_string(), "..\n.#");
    }
}
