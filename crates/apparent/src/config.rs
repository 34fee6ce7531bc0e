use crate::events::AppEvent;
use async_channel::Sender;
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use telltale::geometry::deg_to_rad;
use telltale::{ControllerSettings, NudgeStep, RingId, RingSeed, RingSpec};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RingConfig {
    /// Degrees clockwise from east.
    pub angle: f64,
    pub speed: f64,
    pub speed_cap: f64,
    pub min_fraction: f64,
    pub max_fraction: f64,
    pub spokes: usize,
}

impl RingConfig {
    fn from_spec(spec: RingSpec, angle: f64, speed: f64) -> Self {
        Self {
            angle,
            speed,
            speed_cap: spec.speed_cap,
            min_fraction: spec.min_fraction,
            max_fraction: spec.max_fraction,
            spokes: spec.spokes,
        }
    }

    pub fn spec(&self) -> RingSpec {
        RingSpec {
            speed_cap: self.speed_cap.max(0.0),
            min_fraction: self.min_fraction.max(0.0),
            max_fraction: self.max_fraction.max(0.0),
            spokes: self.spokes.max(1),
        }
    }

    pub fn seed(&self) -> RingSeed {
        RingSeed::new(self.spec(), deg_to_rad(self.angle), self.speed)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct InteractionConfig {
    pub hit_tolerance: f64,
    /// Degrees per arrow key press.
    pub angle_step: f64,
    pub radius_step_fraction: f64,
    /// Degrees.
    pub min_separation: f64,
    #[serde(default)]
    pub selected: Option<RingId>,
}

impl InteractionConfig {
    pub fn settings(&self) -> ControllerSettings {
        ControllerSettings {
            hit_tolerance: self.hit_tolerance.max(0.0),
            nudge: NudgeStep {
                angle: deg_to_rad(self.angle_step),
                radius_fraction: self.radius_step_fraction,
            },
            min_separation: deg_to_rad(self.min_separation.max(0.0)),
        }
    }
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            hit_tolerance: 20.0,
            angle_step: 5.0,
            radius_step_fraction: 0.05,
            min_separation: 8.0,
            selected: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    pub wind: RingConfig,
    pub boat: RingConfig,
    pub interaction: InteractionConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            wind: RingConfig::from_spec(RingSpec::WIND, 200.0, 14.0),
            boat: RingConfig::from_spec(RingSpec::BOAT, 270.0, 6.0),
            interaction: InteractionConfig::default(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

pub fn get_config_path() -> Result<std::path::PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "telltale", "apparent").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

/// Bundled defaults, then the user's file, then `APPARENT__SECTION__KEY`
/// environment variables.
pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from_str(
            DEFAULT_CONFIG,
            config::FileFormat::Toml,
        ))
        .add_source(config::File::from(config_path).required(false))
        .add_source(
            config::Environment::with_prefix("APPARENT")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn load_or_default() -> Config {
    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to load config, using defaults: {}", e);
            Config::default()
        }
    }
}

pub fn write_default_config() -> std::io::Result<std::path::PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };
    let config_dir = match config_path.parent() {
        Some(p) => p.to_path_buf(),
        None => return,
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", e);
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", e);
        return;
    }

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let touches_config = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                ) && event.paths.iter().any(|p| p == &config_path);

                if touches_config && tx.send(AppEvent::ConfigReload).await.is_err() {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_config_matches_defaults() {
        let parsed: Config = config::Config::builder()
            .add_source(config::File::from_str(
                DEFAULT_CONFIG,
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn test_ring_config_spec() {
        let config = Config::default();
        assert_eq!(config.wind.spec(), RingSpec::WIND);
        assert_eq!(config.boat.spec(), RingSpec::BOAT);
    }

    #[test]
    fn test_selected_ring_deserialization() {
        let json = r#"{
            "hit_tolerance": 12.0,
            "angle_step": 2.5,
            "radius_step_fraction": 0.1,
            "min_separation": 0.0,
            "selected": "Boat"
        }"#;
        let interaction: InteractionConfig = serde_json::from_str(json).unwrap();
        assert_eq!(interaction.selected, Some(RingId::Boat));

        let settings = interaction.settings();
        assert_eq!(settings.hit_tolerance, 12.0);
        assert_eq!(settings.min_separation, 0.0);
        assert!((settings.nudge.angle - deg_to_rad(2.5)).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_ring_values_are_sanitized() {
        let ring = RingConfig {
            angle: 0.0,
            speed: 5.0,
            speed_cap: -1.0,
            min_fraction: -0.2,
            max_fraction: 0.3,
            spokes: 0,
        };
        let spec = ring.spec();
        assert_eq!(spec.speed_cap, 0.0);
        assert_eq!(spec.min_fraction, 0.0);
        assert_eq!(spec.spokes, 1);
    }
}
