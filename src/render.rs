use crate::grid::{Grid, GroupId};
use crate::terrain::{TerrainMask, Tile};

pub type Rgba = [u8; 4];

pub const GRASS: Rgba = [0, 255, 0, 255];
pub const WATER: Rgba = [0, 0, 255, 255];

const DISEASED_ALPHA: u8 = 160;

pub fn group_color(group: GroupId) -> Rgba {
    match group {
        GroupId::Red => [255, 0, 0, 255],
        GroupId::Yellow => [255, 200, 0, 255],
        GroupId::Violet => [128, 0, 255, 255],
        GroupId::Blue => [0, 128, 255, 255],
    }
}

/// Flatten the grid over its terrain into a row-major RGBA buffer. Diseased
/// agents render with a translucent tint of their group color. The caller
/// owns everything after this point (textures, blitting, windows).
pub fn rasterize(grid: &Grid, terrain: &TerrainMask) -> Vec<u8> {
    let mut buffer = Vec::with_capacity(grid.len() * 4);
    for (cell, tile) in grid.cells().iter().zip(terrain.tiles()) {
        let pixel = match cell.person() {
            Some(person) => {
                let mut color = group_color(person.group);
                if person.disease > 0.0 {
                    color[3] = DISEASED_ALPHA;
                }
                color
            }
            None => match tile {
                Tile::Walkable => GRASS,
                Tile::Blocked => WATER,
            },
        };
        buffer.extend_from_slice(&pixel);
    }
    buffer
}
