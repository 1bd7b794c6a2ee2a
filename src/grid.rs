use std::ops::Range;

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupId {
    Red,
    Yellow,
    Violet,
    Blue,
}

impl GroupId {
    pub const ALL: [GroupId; 4] = [GroupId::Red, GroupId::Yellow, GroupId::Violet, GroupId::Blue];

    pub fn index(self) -> usize {
        match self {
            GroupId::Red => 0,
            GroupId::Yellow => 1,
            GroupId::Violet => 2,
            GroupId::Blue => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            GroupId::Red => "red",
            GroupId::Yellow => "yellow",
            GroupId::Violet => "violet",
            GroupId::Blue => "blue",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Person {
    pub group: GroupId,
    pub is_male: bool,
    /// Years of infection remaining; zero or below means healthy.
    pub disease: f32,
    /// Years until the next eligible birth; consumed only by non-male agents.
    pub reproduction: f32,
    pub age: f32,
    pub strength: i32,
}

/// One grid cell. `Arrived` holds a person placed here by movement or birth
/// during the current tick; the sweep settles it to `Occupied` without
/// processing it again.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Occupied(Person),
    Arrived(Person),
}

impl Cell {
    pub fn person(&self) -> Option<&Person> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(person) | Cell::Arrived(person) => Some(person),
        }
    }

    pub fn person_mut(&mut self) -> Option<&mut Person> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(person) | Cell::Arrived(person) => Some(person),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
}

pub struct Grid {
    width: u32,
    height: u32,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::Empty; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cell(&self, x: u32, y: u32) -> Result<&Cell, GridError> {
        let index = self.checked_index(x, y)?;
        Ok(&self.cells[index])
    }

    pub fn cell_mut(&mut self, x: u32, y: u32) -> Result<&mut Cell, GridError> {
        let index = self.checked_index(x, y)?;
        Ok(&mut self.cells[index])
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Split the flat cell index space into `parts` contiguous row-major
    /// ranges covering every cell exactly once, with lengths differing by
    /// at most one cell.
    pub fn partition(&self, parts: usize) -> Vec<Range<usize>> {
        let total = self.cells.len();
        let base = total / parts;
        let extra = total % parts;
        let mut ranges = Vec::with_capacity(parts);
        let mut start = 0;
        for i in 0..parts {
            let len = base + usize::from(i < extra);
            ranges.push(start..start + len);
            start += len;
        }
        ranges
    }

    fn checked_index(&self, x: u32, y: u32) -> Result<usize, GridError> {
        if x >= self.width || y >= self.height {
            return Err(GridError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(y as usize * self.width as usize + x as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_all_empty() {
        let grid = Grid::new(8, 4);
        assert_eq!(grid.len(), 32);
        assert!(grid.cells().iter().all(Cell::is_empty));
    }

    #[test]
    fn out_of_bounds_access_is_an_error() {
        let mut grid = Grid::new(8, 4);
        assert!(grid.cell(7, 3).is_ok());
        assert_eq!(
            grid.cell(8, 0),
            Err(GridError::OutOfBounds {
                x: 8,
                y: 0,
                width: 8,
                height: 4
            })
        );
        assert!(grid.cell_mut(0, 4).is_err());
    }

    #[test]
    fn partition_is_balanced_and_exhaustive() {
        let grid = Grid::new(10, 7);
        let ranges = grid.partition(4);
        assert_eq!(ranges.len(), 4);

        let lengths: Vec<usize> = ranges.iter().map(|r| r.len()).collect();
        let min = lengths.iter().min().unwrap();
        let max = lengths.iter().max().unwrap();
        assert!(max - min <= 1, "lengths {:?} differ by more than 1", lengths);

        let mut covered = Vec::new();
        for range in &ranges {
            covered.extend(range.clone());
        }
        assert_eq!(covered, (0..grid.len()).collect::<Vec<_>>());
    }

    #[test]
    fn partition_with_more_parts_than_cells() {
        let grid = Grid::new(2, 1);
        let ranges = grid.partition(5);
        assert_eq!(ranges.len(), 5);
        let total: usize = ranges.iter().map(|r| r.len()).sum();
        assert_eq!(total, 2);
    }
}
