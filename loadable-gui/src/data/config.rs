use std::{
    fs::{self, File},
    io,
    ops::RangeInclusive,
    path::PathBuf,
    time::Duration,
};

use loadable_core::config::{ImageViewConfig, MediaViewConfig};
use platform_dirs::AppDirs;
use serde::{Deserialize, Serialize};

const APP_NAME: &str = "Loadable";
const CONFIG_FILENAME: &str = "config.json";

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub photo_view: ImageViewConfig,
    pub media_view: MediaViewConfig,
    pub photos_per_page: usize,
    pub media_per_page: usize,
    pub media_size: i32,
    pub tile_size: f64,
    pub image_threads: usize,
    /// Simulated fetch latency, in milliseconds.
    pub min_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            photo_view: ImageViewConfig {
                rounded: true,
                ..ImageViewConfig::default()
            },
            media_view: MediaViewConfig {
                stretched: true,
                ..MediaViewConfig::default()
            },
            photos_per_page: 6,
            media_per_page: 4,
            media_size: 256,
            tile_size: 120.0,
            image_threads: 8,
            min_delay_ms: 200,
            max_delay_ms: 2000,
        }
    }
}

impl Config {
    fn app_dirs() -> Option<AppDirs> {
        const USE_XDG_ON_MACOS: bool = false;

        AppDirs::new(Some(APP_NAME), USE_XDG_ON_MACOS)
    }

    pub fn config_dir() -> Option<PathBuf> {
        Self::app_dirs().map(|dirs| dirs.config_dir)
    }

    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join(CONFIG_FILENAME))
    }

    pub fn load() -> Option<Config> {
        let path = Self::config_path()?;
        let file = File::open(&path).ok()?;
        log::info!("loading config: {:?}", &path);
        match serde_json::from_reader(file) {
            Ok(config) => Some(config),
            Err(err) => {
                log::error!("failed to read config: {err}");
                None
            }
        }
    }

    pub fn save(&self) -> io::Result<()> {
        let dir = Self::config_dir()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no config dir"))?;
        fs::create_dir_all(&dir)?;
        let file = File::create(dir.join(CONFIG_FILENAME))?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    pub fn delay_range(&self) -> RangeInclusive<Duration> {
        let min = self.min_delay_ms.min(self.max_delay_ms);
        Duration::from_millis(min)..=Duration::from_millis(self.max_delay_ms)
    }
}
