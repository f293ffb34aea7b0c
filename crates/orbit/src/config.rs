use crate::events::AppEvent;
use async_channel::Sender;
use crown::bezel::BezelConfig;
use crown::cloud::BubbleSettings;
use crown::mapper::DetentMapping;
use crown::router::OptionsGesture;
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use std::path::PathBuf;
use strum::{Display as StrumDisplay, EnumIter, EnumString};
use thiserror::Error;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum DrawerStyle {
    #[default]
    #[strum(serialize = "List", serialize = "l")]
    List,
    #[strum(serialize = "Bubble", serialize = "b", serialize = "cloud")]
    Bubble,
}

impl DrawerStyle {
    pub fn toggled(self) -> Self {
        match self {
            Self::List => Self::Bubble,
            Self::Bubble => Self::List,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DrawerConfig {
    pub style: DrawerStyle,
    pub options_gesture: OptionsGesture,
    pub row_height: f64,
}

impl Default for DrawerConfig {
    fn default() -> Self {
        Self {
            style: DrawerStyle::List,
            options_gesture: OptionsGesture::LongPress,
            row_height: 56.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct Config {
    pub bezel: BezelConfig,
    pub scroll: DetentMapping,
    pub drawer: DrawerConfig,
    pub bubble: BubbleSettings,
}

impl Config {
    /// Bubble settings with the drawer-wide options gesture applied.
    pub fn bubble_settings(&self) -> BubbleSettings {
        let mut settings = self.bubble.clone();
        settings.router.options_gesture = self.drawer.options_gesture;
        settings
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let fraction = |name: &str, v: f64| {
            (v > 0.0 && v < 1.0)
                .then_some(())
                .ok_or_else(|| ConfigError::Invalid(format!("{name} must be in (0, 1), got {v}")))
        };
        let positive = |name: &str, v: f64| {
            (v > 0.0 && v.is_finite())
                .then_some(())
                .ok_or_else(|| ConfigError::Invalid(format!("{name} must be positive, got {v}")))
        };

        fraction("bezel.edge_threshold_fraction", self.bezel.edge_threshold_fraction)?;
        fraction("bezel.sticky_inner_fraction", self.bezel.sticky_inner_fraction)?;
        positive("bezel.detent_degrees", self.bezel.detent_degrees)?;
        positive("scroll.pixels_per_detent", self.scroll.pixels_per_detent)?;
        positive("drawer.row_height", self.drawer.row_height)?;
        positive("bubble.item_size", self.bubble.item_size)?;
        if self.scroll.items_per_detent == 0 {
            return Err(ConfigError::Invalid(
                "scroll.items_per_detent must be at least 1".into(),
            ));
        }

        let zoom = &self.bubble.zoom;
        if zoom.levels.is_empty() {
            return Err(ConfigError::Invalid("bubble.zoom.levels is empty".into()));
        }
        if zoom.levels.windows(2).any(|w| w[0] >= w[1]) {
            return Err(ConfigError::Invalid(
                "bubble.zoom.levels must be strictly ascending".into(),
            ));
        }
        positive("bubble.zoom.min_scale", zoom.min_scale)?;
        if zoom.min_scale > zoom.max_scale {
            return Err(ConfigError::Invalid(format!(
                "bubble.zoom.min_scale {} exceeds max_scale {}",
                zoom.min_scale, zoom.max_scale
            )));
        }
        Ok(())
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
    #[error("Invalid config: {0}")]
    Invalid(String),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "troia", "orbit").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

type Builder = config::ConfigBuilder<config::builder::DefaultState>;

/// Layers `ORBIT_` environment overrides on top of `builder`, then validates.
fn parse(builder: Builder) -> Result<Config, ConfigError> {
    let env = config::Environment::with_prefix("ORBIT")
        .prefix_separator("_")
        .separator("__");
    let config: Config = builder
        .add_source(env)
        .build()?
        .try_deserialize()?;
    config.validate()?;
    if config.bubble.router.options_gesture != config.drawer.options_gesture {
        log::warn!(
            "bubble.router.options_gesture is ignored; drawer.options_gesture = {} applies",
            config.drawer.options_gesture
        );
    }
    Ok(config)
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;
    parse(config::Config::builder().add_source(config::File::from(config_path).required(false)))
}

pub fn load_or_default() -> Config {
    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::error!("Using default configuration: {}", e);
            Config::default()
        }
    }
}

pub fn write_default_config() -> std::io::Result<PathBuf> {
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

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };
    let Some(config_dir) = config_path.parent().map(|p| p.to_path_buf()) else {
        return;
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
            log::error!("Failed to create watcher: {}", ConfigError::from(e));
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
                let meaningful_event = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );

                if meaningful_event
                    && event.paths.iter().any(|p| p == &config_path)
                    && tx.send(AppEvent::ConfigReload).await.is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}
