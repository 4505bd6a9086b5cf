//! Configuration loader.
//!
//! * Looks for `life_invaders.toml` in the cwd unless a path is given.
//! * Every field has a default, so the file and each key are optional.
//!
//! Distances are in grid cells, speeds in cells per frame, intervals in ms.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use log::debug;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::grid::{LifeRules, SAFE_ZONE_ROWS};
use crate::patterns::{Pattern, BOSS, LIBRARY};

pub const DEFAULT_CONFIG_FILE: &str = "life_invaders.toml";

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Frame-rate cap for the terminal loop.
    pub fps: u32,
    pub grid_width: usize,
    pub grid_height: usize,
    pub rules: LifeRules,

    pub ship_width: usize,
    pub ship_height: usize,
    /// Columns per frame while a direction is held.
    pub ship_speed: f32,

    pub bullet_speed: f32,
    pub secondary_ammo_initial: u32,
    pub ammo_refill: u32,
    pub ammo_refill_ms: u64,
    /// Outermost secondary-weapon slope: sideways cells per cell climbed.
    pub spread_angle: f32,

    pub step_interval_ms: u64,
    pub spawn_interval_ms: f64,
    pub spawn_count: usize,
    pub difficulty_interval_ms: u64,
    /// Factor applied to the spawn interval at each level-up.
    pub spawn_decay: f64,
    pub boss_spawn_score: u32,

    /// Fixed RNG seed; unseeded when absent.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fps: 60,
            grid_width: 40,
            grid_height: 40,
            rules: LifeRules::default(),
            ship_width: 3,
            ship_height: 2,
            ship_speed: 0.5,
            bullet_speed: 0.4,
            secondary_ammo_initial: 25,
            ammo_refill: 5,
            ammo_refill_ms: 5_000,
            spread_angle: 0.2,
            step_interval_ms: 1_000,
            spawn_interval_ms: 2_000.0,
            spawn_count: 1,
            difficulty_interval_ms: 30_000,
            spawn_decay: 0.99,
            boss_spawn_score: 25,
            seed: None,
        }
    }
}

impl Config {
    /// Load from `path`, or from `life_invaders.toml` in the cwd when no path
    /// is given. A missing default file means defaults; a missing explicit
    /// file, or any parse failure, is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load_file(p),
            None => Self::load_default_in(Path::new(".")),
        }
    }

    /// Look for the default file in `dir`; defaults if it isn't there.
    pub fn load_default_in(dir: &Path) -> Result<Self, ConfigError> {
        let p = dir.join(DEFAULT_CONFIG_FILE);
        match fs::read_to_string(&p) {
            Ok(text) => Self::from_toml(&text),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("no {} in {}, using defaults", DEFAULT_CONFIG_FILE, dir.display());
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Io { path: p, source }),
        }
    }

    fn load_file(p: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(p).map_err(|source| ConfigError::Io {
            path: p.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Reject settings the simulation cannot run with: mainly patterns that
    /// would not fit between the top of the grid and the safe zone.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fps == 0 {
            return Err(ConfigError::Invalid("fps must be positive".into()));
        }

        let LifeRules {
            survive_min,
            survive_max,
            born,
        } = self.rules;
        if survive_min > survive_max || survive_max > 8 || born > 8 {
            return Err(ConfigError::InvalidRules {
                min: survive_min,
                max: survive_max,
                born,
            });
        }

        for pattern in LIBRARY.iter().chain(std::iter::once(&BOSS)) {
            self.check_fits(pattern)?;
        }

        if self.ship_width == 0 || self.ship_width > self.grid_width {
            return Err(ConfigError::Invalid(format!(
                "ship width {} must be within 1..={}",
                self.ship_width, self.grid_width
            )));
        }
        if self.ship_height == 0 || self.ship_height >= self.grid_height {
            return Err(ConfigError::Invalid(format!(
                "ship height {} must be within 1..{}",
                self.ship_height, self.grid_height
            )));
        }
        if !(self.spawn_decay > 0.0 && self.spawn_decay <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "spawn decay {} must be in (0, 1]",
                self.spawn_decay
            )));
        }
        if !(self.ship_speed > 0.0 && self.bullet_speed > 0.0) {
            return Err(ConfigError::Invalid("speeds must be positive".into()));
        }
        if !(self.spawn_interval_ms > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "spawn interval {} ms must be positive",
                self.spawn_interval_ms
            )));
        }
        Ok(())
    }

    fn check_fits(&self, pattern: &Pattern) -> Result<(), ConfigError> {
        let fits = pattern.width() < self.grid_width
            && pattern.height() + SAFE_ZONE_ROWS <= self.grid_height;
        if fits {
            Ok(())
        } else {
            Err(ConfigError::PatternTooLarge {
                name: pattern.name,
                pattern_width: pattern.width(),
                pattern_height: pattern.height(),
                grid_width: self.grid_width,
                grid_height: self.grid_height,
            })
        }
    }
}
