//! Runner configuration from environment and JSON files.

use airspace_core::{SimulationSettings, World, WorldDocument};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default)]
pub struct Config {
    /// World layout file (bare world or saved world document)
    pub world_path: Option<PathBuf>,
    /// Settings file; missing keys fall back to defaults
    pub settings_path: Option<PathBuf>,
    /// Population seed, OS entropy when unset
    pub seed: Option<u64>,
    /// Where to write the final JSON snapshot
    pub snapshot_path: Option<PathBuf>,
}

/// World files may hold a saved document or just the world.
#[derive(Deserialize)]
#[serde(untagged)]
enum WorldFile {
    Document(WorldDocument),
    Bare(World),
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            world_path: env::var_os("AIRSPACE_WORLD").map(PathBuf::from),
            settings_path: env::var_os("AIRSPACE_SETTINGS").map(PathBuf::from),
            seed: env::var("AIRSPACE_SEED").ok().and_then(|s| s.parse().ok()),
            snapshot_path: env::var_os("AIRSPACE_SNAPSHOT").map(PathBuf::from),
        }
    }

    /// Load the configured world, or the default two-zone world.
    pub fn load_world(&self) -> Result<World> {
        let Some(path) = &self.world_path else {
            return Ok(World::default());
        };
        let raw = read(path)?;
        parse_world(&raw).with_context(|| format!("invalid world file {}", path.display()))
    }

    /// Load the configured settings, or defaults.
    pub fn load_settings(&self) -> Result<SimulationSettings> {
        let Some(path) = &self.settings_path else {
            return Ok(SimulationSettings::default());
        };
        let raw = read(path)?;
        serde_json::from_str(&raw)
            .with_context(|| format!("invalid settings file {}", path.display()))
    }
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

pub fn parse_world(raw: &str) -> Result<World> {
    let world = match serde_json::from_str::<WorldFile>(raw)? {
        WorldFile::Document(doc) => doc.world,
        WorldFile::Bare(world) => world,
    };
    Ok(world)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_world() {
        let world = parse_world(
            r#"{
                "sizeMeters": 800,
                "heightMeters": 150,
                "restrictedZones": [{
                    "id": "Z1",
                    "name": "Helipad",
                    "polygon": [
                        {"x": -10, "y": -10, "z": 0},
                        {"x": 10, "y": -10, "z": 0},
                        {"x": 0, "y": 10, "z": 0}
                    ]
                }]
            }"#,
        )
        .unwrap();
        assert_eq!(world.size_meters, 800.0);
        assert_eq!(world.restricted_zones[0].name, "Helipad");
    }

    #[test]
    fn test_parse_world_document() {
        let world = parse_world(
            r#"{
                "ownerId": "ops",
                "name": "Harbor",
                "world": { "sizeMeters": 1200, "heightMeters": 90 }
            }"#,
        )
        .unwrap();
        assert_eq!(world.size_meters, 1200.0);
        assert_eq!(world.height_meters, 90.0);
    }

    #[test]
    fn test_parse_world_rejects_garbage() {
        assert!(parse_world(r#"{ "name": "nope" }"#).is_err());
    }

    #[test]
    fn test_defaults_without_paths() {
        let config = Config::default();
        assert_eq!(config.load_world().unwrap(), World::default());
        assert_eq!(
            config.load_settings().unwrap(),
            SimulationSettings::default()
        );
    }
}
