use thiserror::Error;

/// Numeric rule parameters, fixed for the lifetime of a run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    pub map_width: u32,
    pub map_height: u32,
    /// Extra aging applied per year of tick time while infected.
    pub diseased_aging_factor: f32,
    /// Infection odds are 1 in (disease_chance + 1) per healthy agent per tick.
    pub disease_chance: u32,
    pub max_disease_years: u32,
    pub reproduce_min_years: u32,
    pub reproduce_max_years: u32,
    pub min_start_strength: i32,
    pub max_start_strength: i32,
    pub workers: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            map_width: 640,
            map_height: 360,
            diseased_aging_factor: 16.0,
            disease_chance: 20_000,
            max_disease_years: 2,
            reproduce_min_years: 3,
            reproduce_max_years: 12,
            min_start_strength: 40,
            max_start_strength: 85,
            workers: 4,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("map dimensions must be non-zero (got {width}x{height})")]
    EmptyMap { width: u32, height: u32 },
    #[error("disease odds denominator must be at least 1")]
    ZeroDiseaseChance,
    #[error("maximum disease length must be at least 1 year")]
    ZeroDiseaseLength,
    #[error("reproduction interval {min}..{max} is inverted")]
    InvertedReproduction { min: u32, max: u32 },
    #[error("starting strength range {min}..{max} is inverted")]
    InvertedStrength { min: i32, max: i32 },
    #[error("starting strength must be positive (got {0})")]
    NonPositiveStrength(i32),
    #[error("worker count must be at least 1")]
    NoWorkers,
    #[error(
        "terrain mask is {terrain_width}x{terrain_height} but the map is {map_width}x{map_height}"
    )]
    TerrainMismatch {
        terrain_width: u32,
        terrain_height: u32,
        map_width: u32,
        map_height: u32,
    },
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.map_width == 0 || self.map_height == 0 {
            return Err(ConfigError::EmptyMap {
                width: self.map_width,
                height: self.map_height,
            });
        }
        if self.disease_chance == 0 {
            return Err(ConfigError::ZeroDiseaseChance);
        }
        if self.max_disease_years == 0 {
            return Err(ConfigError::ZeroDiseaseLength);
        }
        if self.reproduce_min_years > self.reproduce_max_years {
            return Err(ConfigError::InvertedReproduction {
                min: self.reproduce_min_years,
                max: self.reproduce_max_years,
            });
        }
        if self.min_start_strength > self.max_start_strength {
            return Err(ConfigError::InvertedStrength {
                min: self.min_start_strength,
                max: self.max_start_strength,
            });
        }
        if self.min_start_strength <= 0 {
            return Err(ConfigError::NonPositiveStrength(self.min_start_strength));
        }
        if self.workers == 0 {
            return Err(ConfigError::NoWorkers);
        }
        Ok(())
    }
}
