//! Turret data loading from RON files.

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::components::TurretConfig;
use super::error::DataLoadError;

const TURRETS_DIR: &str = "assets/data/turrets";

/// Turret definition loaded from RON file.
#[derive(Deserialize, Clone, Debug)]
pub struct TurretDefinition {
    pub name: String,
    /// Side length of the placeholder sprite
    #[serde(default = "default_sprite_size")]
    pub sprite_size: f32,
    #[serde(default = "default_collider_radius")]
    pub collider_radius: f32,
    #[serde(default)]
    pub config: TurretConfig,
}

fn default_sprite_size() -> f32 {
    1.0
}

fn default_collider_radius() -> f32 {
    0.45
}

impl Default for TurretDefinition {
    fn default() -> Self {
        Self {
            name: "Turret".to_string(),
            sprite_size: default_sprite_size(),
            collider_radius: default_collider_radius(),
            config: TurretConfig::default(),
        }
    }
}

/// Resource holding all loaded turret definitions.
#[derive(Resource, Default)]
pub struct TurretRegistry {
    pub definitions: HashMap<String, TurretDefinition>,
}

impl TurretRegistry {
    /// Get a turret definition by type name.
    pub fn get(&self, turret_type: &str) -> Option<&TurretDefinition> {
        self.definitions.get(turret_type)
    }
}

/// Parse and validate one definition file's contents.
pub fn parse_definition(path: &Path, contents: &str) -> Result<TurretDefinition, DataLoadError> {
    let definition =
        ron::from_str::<TurretDefinition>(contents).map_err(|e| DataLoadError::ParseError {
            path: path.display().to_string(),
            details: e.to_string(),
        })?;

    definition
        .config
        .validate()
        .map_err(|source| DataLoadError::Invalid {
            path: path.display().to_string(),
            source,
        })?;

    Ok(definition)
}

/// Read every `.ron` file in `dir`, keyed by file stem.
///
/// Broken files are logged and skipped so one bad turret doesn't take the
/// others down.
pub fn read_definitions(dir: &Path) -> Result<HashMap<String, TurretDefinition>, DataLoadError> {
    let entries = fs::read_dir(dir)
        .map_err(|_| DataLoadError::FileNotFound(dir.display().to_string()))?;

    let mut definitions = HashMap::new();

    for entry in entries.flatten() {
        let path = entry.path();

        if !path.extension().is_some_and(|ext| ext == "ron") {
            continue;
        }

        let turret_type = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown")
            .to_string();

        let loaded = fs::read_to_string(&path)
            .map_err(|e| DataLoadError::ReadError {
                path: path.display().to_string(),
                details: e.to_string(),
            })
            .and_then(|contents| parse_definition(&path, &contents));

        match loaded {
            Ok(definition) => {
                info!("Loaded turret definition: {} ({})", definition.name, turret_type);
                definitions.insert(turret_type, definition);
            }
            Err(e) => error!("{}", e),
        }
    }

    Ok(definitions)
}

/// Load all turret definitions from the assets/data/turrets/ directory.
pub fn load_turret_definitions(mut registry: ResMut<TurretRegistry>) {
    match read_definitions(Path::new(TURRETS_DIR)) {
        Ok(definitions) => registry.definitions = definitions,
        Err(e) => warn!("Turret definitions unavailable: {}", e),
    }

    info!("Loaded {} turret definitions", registry.definitions.len());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_partial_config_with_defaults() {
        let source = r#"(
            name: "Bunker Turret",
            config: (
                attack_cooldown: 2.5,
                wakeup_radius: 6.0,
                rng_seed: Some(11),
            ),
        )"#;

        let definition = parse_definition(Path::new("bunker.ron"), source).expect("valid");
        assert_eq!(definition.name, "Bunker Turret");
        assert_eq!(definition.config.attack_cooldown, 2.5);
        assert_eq!(definition.config.wakeup_radius, 6.0);
        assert_eq!(definition.config.rng_seed, Some(11));
        assert_eq!(definition.config.raycast_range, 3.0);
        assert_eq!(definition.collider_radius, 0.45);
    }

    #[test]
    fn syntax_errors_are_parse_errors() {
        let result = parse_definition(Path::new("broken.ron"), "(name: ");
        assert!(matches!(result, Err(DataLoadError::ParseError { .. })));
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let source = r#"(name: "Bad", config: (knockback_reduction_factor: 2.0))"#;
        let result = parse_definition(Path::new("bad.ron"), source);
        assert!(matches!(result, Err(DataLoadError::Invalid { .. })));
    }

    #[test]
    fn missing_directory_is_reported() {
        let result = read_definitions(Path::new("does/not/exist"));
        assert!(matches!(result, Err(DataLoadError::FileNotFound(_))));
    }

    #[test]
    fn shipped_definitions_load() {
        let definitions =
            read_definitions(&Path::new(env!("CARGO_MANIFEST_DIR")).join(TURRETS_DIR))
                .expect("assets directory present");
        assert!(definitions.contains_key("turret"));
    }
}
