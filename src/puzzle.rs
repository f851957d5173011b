use crate::adjacency::{
    corner_product as product_of_corners, find_candidate_neighbours, tiles_map, TilesMap,
};
use crate::builder::build_image;
use crate::scanner;
use crate::tile::parse_tiles;
use anyhow::{Context, Result};
use derive_more::Display;

#[derive(Debug, Clone, Copy, Display, PartialEq, Eq)]
#[display(fmt = "{}\n{}", corner_product, roughness)]
pub struct Answers {
    pub corner_product: u64,
    pub roughness: usize,
}

pub fn parse_puzzle(input: &str) -> Result<TilesMap> {
    let tiles = parse_tiles(input).context("Invalid image tiles")?;
    log::debug!("Parsed {} tiles", tiles.len());
    Ok(tiles_map(tiles))
}

pub fn corner_product(input: &str) -> Result<u64> {
    let tiles = parse_puzzle(input)?;
    product_of_corners(&find_candidate_neighbours(&tiles))
        .context("Couldn't multiply the corner tile ids")
}

pub fn water_roughness(input: &str) -> Result<usize> {
    solve(input).map(|answers| answers.roughness)
}

pub fn solve(input: &str) -> Result<Answers> {
    let tiles = parse_puzzle(input)?;
    let neighbours = find_candidate_neighbours(&tiles);
    let corner_product =
        product_of_corners(&neighbours).context("Couldn't multiply the corner tile ids")?;
    let bitmap = build_image(tiles, &neighbours).context("Couldn't assemble the image")?;
    let roughness = scanner::water_roughness(&bitmap);
    Ok(Answers {
        corner_product,
        roughness,
    })
}
