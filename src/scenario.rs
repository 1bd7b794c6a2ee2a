use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::config::SimConfig;
use crate::engine::Engine;
use crate::grid::GroupId;
use crate::terrain::TerrainMask;

fn default_tick_seconds() -> f32 {
    0.01
}

fn default_workers() -> usize {
    4
}

fn default_diseased_aging_factor() -> f32 {
    16.0
}

fn default_disease_chance() -> u32 {
    20_000
}

fn default_max_disease_years() -> u32 {
    2
}

fn default_reproduce_years() -> YearRange {
    YearRange { min: 3, max: 12 }
}

fn default_start_strength() -> StrengthRange {
    StrengthRange { min: 40, max: 85 }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub description: Option<String>,
    pub seed: u64,
    #[serde(default = "default_tick_seconds")]
    pub tick_seconds: f32,
    #[serde(default)]
    pub ticks: Option<u64>,
    #[serde(default = "default_workers")]
    pub workers: usize,
    pub map: MapSection,
    #[serde(default)]
    pub rules: RuleSection,
    pub tribes: Vec<Tribe>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MapSection {
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub water: Vec<Rect>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RuleSection {
    #[serde(default = "default_diseased_aging_factor")]
    pub diseased_aging_factor: f32,
    #[serde(default = "default_disease_chance")]
    pub disease_chance: u32,
    #[serde(default = "default_max_disease_years")]
    pub max_disease_years: u32,
    #[serde(default = "default_reproduce_years")]
    pub reproduce_years: YearRange,
    #[serde(default = "default_start_strength")]
    pub start_strength: StrengthRange,
}

impl Default for RuleSection {
    fn default() -> Self {
        Self {
            diseased_aging_factor: default_diseased_aging_factor(),
            disease_chance: default_disease_chance(),
            max_disease_years: default_max_disease_years(),
            reproduce_years: default_reproduce_years(),
            start_strength: default_start_strength(),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct YearRange {
    pub min: u32,
    pub max: u32,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct StrengthRange {
    pub min: i32,
    pub max: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Tribe {
    pub group: GroupId,
    pub count: u32,
    pub area: Rect,
}

pub struct ScenarioLoader {
    base_dir: PathBuf,
}

impl ScenarioLoader {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self, file: impl AsRef<Path>) -> Result<Scenario> {
        let path = self.base_dir.join(file);
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read scenario file {}", path.display()))?;
        let scenario: Scenario = serde_yaml::from_str(&data)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(scenario)
    }
}

impl Scenario {
    pub fn sim_config(&self) -> SimConfig {
        SimConfig {
            map_width: self.map.width,
            map_height: self.map.height,
            diseased_aging_factor: self.rules.diseased_aging_factor,
            disease_chance: self.rules.disease_chance,
            max_disease_years: self.rules.max_disease_years,
            reproduce_min_years: self.rules.reproduce_years.min,
            reproduce_max_years: self.rules.reproduce_years.max,
            min_start_strength: self.rules.start_strength.min,
            max_start_strength: self.rules.start_strength.max,
            workers: self.workers,
        }
    }

    pub fn terrain(&self) -> TerrainMask {
        let mut mask = TerrainMask::walkable(self.map.width, self.map.height);
        for rect in &self.map.water {
            mask.block_rect(rect.x, rect.y, rect.width, rect.height);
        }
        mask
    }

    pub fn build_engine(&self) -> Result<Engine> {
        let mut engine = Engine::new(self.sim_config(), self.terrain(), self.seed)
            .with_context(|| format!("scenario '{}' has an invalid configuration", self.name))?;
        engine.populate(&self.tribes);
        Ok(engine)
    }

    pub fn ticks(&self, override_ticks: Option<u64>) -> u64 {
        override_ticks.or(self.ticks).unwrap_or(2_000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
name: minimal
seed: 3
map:
  width: 16
  height: 16
tribes:
  - group: red
    count: 5
    area: { x: 2, y: 2, width: 4, height: 4 }
"#;

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let scenario: Scenario = serde_yaml::from_str(MINIMAL).unwrap();
        assert_eq!(scenario.tick_seconds, 0.01);
        assert_eq!(scenario.workers, 4);

        let config = scenario.sim_config();
        assert_eq!(config.disease_chance, 20_000);
        assert_eq!(config.reproduce_min_years, 3);
        assert_eq!(config.reproduce_max_years, 12);
        assert_eq!(config.min_start_strength, 40);
    }

    #[test]
    fn water_rects_block_terrain() {
        let yaml = r#"
name: wet
seed: 1
map:
  width: 8
  height: 8
  water:
    - { x: 0, y: 0, width: 8, height: 2 }
tribes: []
"#;
        let scenario: Scenario = serde_yaml::from_str(yaml).unwrap();
        let terrain = scenario.terrain();
        assert_eq!(terrain.tile(3, 1), crate::terrain::Tile::Blocked);
        assert_eq!(terrain.tile(3, 2), crate::terrain::Tile::Walkable);
    }

    #[test]
    fn unknown_group_names_fail_to_parse() {
        let yaml = MINIMAL.replace("group: red", "group: teal");
        assert!(serde_yaml::from_str::<Scenario>(&yaml).is_err());
    }
}
