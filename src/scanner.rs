use crate::builder::Bitmap;
use crate::helpers::grid::{Grid, GridPos};
use crate::pixel::Pixel;
use itertools::Itertools;
use once_cell::sync::Lazy;

const MONSTER_ROWS: [&str; 3] = [
    "                  # ",
    "#    ##    ##    ###",
    " #  #  #  #  #  #   ",
];

fn parse_monster() -> Result<Grid<Pixel>, anyhow::Error> {
    MONSTER_ROWS.join("\n").parse::<Grid<Pixel>>()
}

/// The sea monster, set pixels are `Full`.
pub fn monster() -> &'static Grid<Pixel> {
    static INSTANCE: Lazy<Grid<Pixel>> =
        Lazy::new(|| parse_monster().expect("Invalid monster"));
    &INSTANCE
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanReport {
    /// Orientation step in which the pattern was found, `None` if it never was.
    pub step: Option<usize>,
    pub monsters: usize,
    pub set_pixels: usize,
    pub roughness: usize,
}

/// Every `Full` pixel of `pattern` is also `Full` in `image` when the pattern's top left is at `pos`.
pub fn is_match_at(image: &Bitmap, pos: GridPos, pattern: &Grid<Pixel>) -> bool {
    pattern
        .pos_iter()
        .filter(|p| pattern[*p].is_full())
        .all(|(r, c)| {
            image
                .get((pos.0 + r, pos.1 + c))
                .map_or(false, Pixel::is_full)
        })
}

pub fn count_monsters(image: &Bitmap, pattern: &Grid<Pixel>) -> usize {
    let (max_r, max_c) = match (
        image.rows().checked_sub(pattern.rows()),
        image.cols().checked_sub(pattern.cols()),
    ) {
        (Some(r), Some(c)) => (r, c),
        _ => return 0,
    };
    (0..=max_r)
        .cartesian_product(0..=max_c)
        .filter(|pos| is_match_at(image, *pos, pattern))
        .count()
}

/// Walks the orientations of `bitmap` and stops at the first one holding `pattern`.
///
/// Roughness is the set pixel count minus the pattern weight for every match;
/// overlapping matches are not special-cased.
pub fn scan_with(bitmap: &Bitmap, pattern: &Grid<Pixel>) -> ScanReport {
    let weight = pattern.count(&Pixel::Full);
    for (oriented, step) in bitmap.orientations() {
        let monsters = count_monsters(&oriented, pattern);
        log::trace!("{} matches at orientation step {}", monsters, step);
        if monsters > 0 {
            let set_pixels = oriented.count(&Pixel::Full);
            log::debug!(
                "Found {} monsters at orientation step {}, {} set pixels",
                monsters,
                step,
                set_pixels
            );
            return ScanReport {
                step: Some(step),
                monsters,
                set_pixels,
                roughness: set_pixels.saturating_sub(monsters * weight),
            };
        }
    }
    let set_pixels = bitmap.count(&Pixel::Full);
    log::debug!("No monsters in any orientation, {} set pixels", set_pixels);
    ScanReport {
        step: None,
        monsters: 0,
        set_pixels,
        roughness: set_pixels,
    }
}

pub fn scan(bitmap: &Bitmap) -> ScanReport {
    scan_with(bitmap, monster())
}

pub fn water_roughness(bitmap: &Bitmap) -> usize {
    scan(bitmap).roughness
}
