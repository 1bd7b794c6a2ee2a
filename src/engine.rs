use std::time::Instant;

use log::debug;
use rand::Rng;

use crate::config::{ConfigError, SimConfig};
use crate::grid::{Cell, Grid, Person};
use crate::rng::RngManager;
use crate::scenario::Tribe;
use crate::scheduler;
use crate::stats::TickStats;
use crate::terrain::{TerrainMask, Tile};

pub struct Engine {
    grid: Grid,
    terrain: TerrainMask,
    config: SimConfig,
    rng: RngManager,
    tick: u64,
}

impl Engine {
    /// Validates the configuration up front; a malformed config never
    /// reaches the tick loop.
    pub fn new(config: SimConfig, terrain: TerrainMask, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        if terrain.width() != config.map_width || terrain.height() != config.map_height {
            return Err(ConfigError::TerrainMismatch {
                terrain_width: terrain.width(),
                terrain_height: terrain.height(),
                map_width: config.map_width,
                map_height: config.map_height,
            });
        }
        Ok(Self {
            grid: Grid::new(config.map_width, config.map_height),
            terrain,
            config,
            rng: RngManager::new(seed),
            tick: 0,
        })
    }

    /// Seed starting populations. Each tribe gets `count` placement
    /// attempts at uniform positions inside its spawn area; attempts on
    /// blocked terrain are discarded and collisions overwrite, so the
    /// realized population may be smaller than `count`.
    pub fn populate(&mut self, tribes: &[Tribe]) {
        let mut stream = self.rng.stream();
        for tribe in tribes {
            for _ in 0..tribe.count {
                let x = tribe.area.x + stream.gen_range(0..tribe.area.width.max(1));
                let y = tribe.area.y + stream.gen_range(0..tribe.area.height.max(1));
                if self.terrain.tile(x, y) == Tile::Blocked {
                    continue;
                }
                let person = Person {
                    group: tribe.group,
                    is_male: stream.gen_range(0..=2) != 0,
                    disease: 0.0,
                    reproduction: stream.gen_range(1..=20) as f32,
                    age: stream.gen_range(1..=35) as f32,
                    strength: stream
                        .gen_range(self.config.min_start_strength..=self.config.max_start_strength),
                };
                if let Ok(cell) = self.grid.cell_mut(x, y) {
                    *cell = Cell::Occupied(person);
                }
            }
        }
    }

    /// Advance the whole grid by one tick of `dt` years. Synchronous: the
    /// parallel sweep and the stats merge have completed when this returns.
    pub fn run_tick(&mut self, dt: f32) -> TickStats {
        let started = Instant::now();
        let stats = scheduler::run_tick(
            &mut self.grid,
            &self.terrain,
            &self.config,
            &mut self.rng,
            dt,
        );
        self.tick += 1;
        debug!(
            "tick {} took {:.3}ms, {} alive",
            self.tick,
            started.elapsed().as_secs_f64() * 1_000.0,
            stats.total_alive()
        );
        stats
    }

    pub fn run(&mut self, ticks: u64, dt: f32) -> TickStats {
        let mut last = TickStats::default();
        for _ in 0..ticks {
            last = self.run_tick(dt);
        }
        last
    }

    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn terrain(&self) -> &TerrainMask {
        &self.terrain
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }
}
