use std::ops::Range;

use rand::Rng;

use crate::config::SimConfig;
use crate::grid::{Cell, Person};
use crate::stats::TickStats;
use crate::terrain::TerrainMask;

pub(crate) const MAX_AGE_YEARS: f32 = 85.0;

/// Mutable window into a contiguous run of grid cells, addressed by flat
/// grid index. The scheduler guarantees that every cell a sweep can touch
/// lies inside the window.
pub(crate) struct RangeView<'a> {
    cells: &'a mut [Cell],
    offset: usize,
}

impl<'a> RangeView<'a> {
    pub(crate) fn new(cells: &'a mut [Cell], offset: usize) -> Self {
        Self { cells, offset }
    }

    fn cell_mut(&mut self, index: usize) -> &mut Cell {
        &mut self.cells[index - self.offset]
    }
}

pub(crate) fn step_span<R: Rng>(
    view: &mut RangeView<'_>,
    span: Range<usize>,
    terrain: &TerrainMask,
    config: &SimConfig,
    rng: &mut R,
    dt: f32,
    stats: &mut TickStats,
) {
    for index in span {
        step_cell(view, index, terrain, config, rng, dt, stats);
    }
}

/// Advance one cell by one tick of `dt` years.
fn step_cell<R: Rng>(
    view: &mut RangeView<'_>,
    index: usize,
    terrain: &TerrainMask,
    config: &SimConfig,
    rng: &mut R,
    dt: f32,
    stats: &mut TickStats,
) {
    let mut person = match *view.cell_mut(index) {
        Cell::Empty => return,
        // Placed here earlier this tick; settle without processing.
        Cell::Arrived(person) => {
            *view.cell_mut(index) = Cell::Occupied(person);
            return;
        }
        Cell::Occupied(person) => person,
    };

    stats.record(&person);

    person.age += dt;
    if person.age >= person.strength as f32 || person.age >= MAX_AGE_YEARS {
        *view.cell_mut(index) = Cell::Empty;
        return;
    }

    if !person.is_male {
        person.reproduction -= dt;
    }

    if person.disease > 0.0 {
        person.age += dt * config.diseased_aging_factor;
        person.disease -= dt;
    } else if rng.gen_ratio(1, config.disease_chance.saturating_add(1)) {
        person.disease = rng.gen_range(1..=config.max_disease_years) as f32;
    }

    let target = random_neighbor(index, terrain.width(), terrain.height(), rng);
    if target != index && terrain.walkable_at(target) {
        let target_cell = view.cell_mut(target);
        if let Some(other) = target_cell.person_mut() {
            if other.group == person.group {
                if person.disease > 0.0 && rng.gen_ratio(1, 3) {
                    other.disease = person.disease;
                }
            } else if other.strength > person.strength {
                // Combat: the loser inherits the winner's strength as its
                // age and falls to its own next death check.
                person.age = other.strength as f32;
            } else {
                other.age = person.strength as f32;
            }
        } else if !person.is_male && person.reproduction <= 0.0 {
            person.reproduction =
                rng.gen_range(config.reproduce_min_years..=config.reproduce_max_years) as f32;
            *target_cell = Cell::Arrived(newborn(&person, config, rng));
        } else {
            *target_cell = Cell::Arrived(person);
            *view.cell_mut(index) = Cell::Empty;
            return;
        }
    }

    *view.cell_mut(index) = Cell::Occupied(person);
}

fn newborn<R: Rng>(parent: &Person, config: &SimConfig, rng: &mut R) -> Person {
    Person {
        group: parent.group,
        is_male: rng.gen_range(0..=2) != 0,
        disease: parent.disease,
        reproduction: rng.gen_range(config.reproduce_min_years..=config.reproduce_max_years)
            as f32,
        age: 1.0,
        strength: rng.gen_range((parent.strength - 15).max(15)..=parent.strength + 30),
    }
}

/// Uniform draw over the four Manhattan neighbors; a move past the map edge
/// clamps to "stay" rather than wrapping.
fn random_neighbor<R: Rng>(index: usize, width: u32, height: u32, rng: &mut R) -> usize {
    let width = width as usize;
    let height = height as usize;
    let x = index % width;
    let y = index / width;
    let (nx, ny) = match rng.gen_range(0..4u8) {
        0 => (if x + 1 < width { x + 1 } else { x }, y),
        1 => (x, if y + 1 < height { y + 1 } else { y }),
        2 => (x.saturating_sub(1), y),
        _ => (x, y.saturating_sub(1)),
    };
    ny * width + nx
}
