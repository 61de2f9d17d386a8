//! Configuration models and loaders for low-thrust leg scenarios.

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// One leg scenario as written in a manifest.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct LegConfig {
    pub name: String,
    pub departure_mjd2000: f64,
    pub arrival_mjd2000: f64,
    pub initial_state: StateConfig,
    pub final_state: StateConfig,
    /// Flat cartesian throttle components, three per segment.
    pub throttles: Vec<f64>,
    /// Pseudo-time budget of the whole leg.
    pub pseudo_time: f64,
    pub mu_m3_s2: f64,
    pub spacecraft: SpacecraftConfig,
    #[serde(default)]
    pub sundmann: SundmannConfig,
    #[serde(default = "default_log10_tolerance")]
    pub log10_tolerance: i32,
    #[serde(default)]
    pub propagator: PropagatorConfig,
}

/// Cartesian boundary state.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct StateConfig {
    pub position_m: [f64; 3],
    pub velocity_m_s: [f64; 3],
    pub mass_kg: f64,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct SpacecraftConfig {
    pub mass_kg: f64,
    pub max_thrust_newtons: f64,
    pub isp_seconds: f64,
}

/// Sundmann transformation `dt = c r^alpha ds`.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct SundmannConfig {
    pub c: f64,
    pub alpha: f64,
}

impl Default for SundmannConfig {
    fn default() -> Self {
        Self { c: 1.0, alpha: 1.5 }
    }
}

/// Optional overrides of the propagator budget.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq)]
pub struct PropagatorConfig {
    #[serde(default)]
    pub max_iterations: Option<usize>,
    #[serde(default)]
    pub max_order: Option<usize>,
}

fn default_log10_tolerance() -> i32 {
    -10
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

impl LegConfig {
    pub fn n_seg(&self) -> usize {
        self.throttles.len() / 3
    }
}

/// Load leg scenarios from a YAML file, a single TOML file, or a directory of TOML files.
pub fn load_legs<P: AsRef<Path>>(path: P) -> Result<Vec<LegConfig>, ConfigError> {
    load_records(path)
}

fn load_records<T, P>(path: P) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.is_dir() {
        read_dir_records(path)
    } else if path.extension().map(|ext| ext == "toml").unwrap_or(false) {
        let contents = std::fs::read_to_string(path)?;
        let record: T = toml::from_str(&contents)?;
        Ok(vec![record])
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn read_dir_records<T>(dir: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut records = Vec::new();
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().map(|ext| ext == "toml").unwrap_or(false))
        .collect();
    entries.sort();
    for path in entries {
        let contents = std::fs::read_to_string(&path)?;
        let record: T = toml::from_str(&contents)?;
        records.push(record);
    }
    Ok(records)
}
