//! Game configuration.
//!
//! Settings loaded from an INI file. Every value has a default so the game
//! starts even without a config file; missing keys keep their defaults.
//!
//! # Configuration File Format
//!
//! ```ini
//! [window]
//! width = 640
//! height = 480
//! scale = 2
//! target_fps = 60
//! title = SunnyLand
//!
//! [assets]
//! map = assets/level1.json
//! tileset = assets/tileset.png
//! sprites = assets/fox.json
//! title_background = assets/back.png
//! title_middleground = assets/middle.png
//!
//! [parallax]
//! background = 6.0
//! middleground = 1.0
//!
//! [camera]
//! offset_x = 100
//! offset_y = 100
//! ```

use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

use crate::components::mapposition::MapPosition;
use crate::resources::screensize::ScreenSize;

/// Default safe values for startup
const DEFAULT_WINDOW_WIDTH: u32 = 640;
const DEFAULT_WINDOW_HEIGHT: u32 = 480;
const DEFAULT_SCALE: u32 = 2;
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_TITLE: &str = "SunnyLand";
const DEFAULT_MAP: &str = "assets/level1.json";
const DEFAULT_TILESET: &str = "assets/tileset.png";
const DEFAULT_SPRITES: &str = "assets/fox.json";
const DEFAULT_TITLE_BACKGROUND: &str = "assets/back.png";
const DEFAULT_TITLE_MIDDLEGROUND: &str = "assets/middle.png";
const DEFAULT_BACKGROUND_FACTOR: f32 = 6.0;
const DEFAULT_MIDDLEGROUND_FACTOR: f32 = 1.0;
const DEFAULT_CAMERA_OFFSET: f32 = 100.0;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Window width in screen pixels.
    pub window_width: u32,
    /// Window height in screen pixels.
    pub window_height: u32,
    /// Screen pixels per world unit.
    pub scale: u32,
    pub target_fps: u32,
    pub title: String,
    pub map_path: String,
    pub tileset_path: String,
    pub sprites_path: String,
    pub title_background: String,
    pub title_middleground: String,
    /// Travel factor of the level's far background.
    pub background_factor: f32,
    /// Travel factor of the level's middle background.
    pub middleground_factor: f32,
    /// Distance kept between the camera's top-left corner and the player.
    pub camera_offset: MapPosition,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            scale: DEFAULT_SCALE,
            target_fps: DEFAULT_TARGET_FPS,
            title: DEFAULT_TITLE.to_string(),
            map_path: DEFAULT_MAP.to_string(),
            tileset_path: DEFAULT_TILESET.to_string(),
            sprites_path: DEFAULT_SPRITES.to_string(),
            title_background: DEFAULT_TITLE_BACKGROUND.to_string(),
            title_middleground: DEFAULT_TITLE_MIDDLEGROUND.to_string(),
            background_factor: DEFAULT_BACKGROUND_FACTOR,
            middleground_factor: DEFAULT_MIDDLEGROUND_FACTOR,
            camera_offset: MapPosition::new(DEFAULT_CAMERA_OFFSET, DEFAULT_CAMERA_OFFSET),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply(&config);

        info!(
            "Loaded config: {}x{} window, scale={}, fps={}, map={}",
            self.window_width, self.window_height, self.scale, self.target_fps, self.map_path
        );

        Ok(())
    }

    /// Load configuration from INI text instead of a file.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply(&config);
        Ok(())
    }

    fn apply(&mut self, config: &Ini) {
        // [window] section
        if let Some(width) = config.getuint("window", "width").ok().flatten() {
            self.window_width = width as u32;
        }
        if let Some(height) = config.getuint("window", "height").ok().flatten() {
            self.window_height = height as u32;
        }
        if let Some(scale) = config.getuint("window", "scale").ok().flatten() {
            self.scale = (scale as u32).max(1);
        }
        if let Some(fps) = config.getuint("window", "target_fps").ok().flatten() {
            self.target_fps = (fps as u32).max(1);
        }
        if let Some(title) = config.get("window", "title") {
            self.title = title;
        }

        // [assets] section
        let assets = [
            ("map", &mut self.map_path),
            ("tileset", &mut self.tileset_path),
            ("sprites", &mut self.sprites_path),
            ("title_background", &mut self.title_background),
            ("title_middleground", &mut self.title_middleground),
        ];
        for (key, field) in assets {
            if let Some(path) = config.get("assets", key) {
                *field = path;
            }
        }

        // [parallax] section
        if let Some(factor) = config.getfloat("parallax", "background").ok().flatten() {
            self.background_factor = factor as f32;
        }
        if let Some(factor) = config.getfloat("parallax", "middleground").ok().flatten() {
            self.middleground_factor = factor as f32;
        }

        // [camera] section
        if let Some(x) = config.getfloat("camera", "offset_x").ok().flatten() {
            self.camera_offset.x = x as f32;
        }
        if let Some(y) = config.getfloat("camera", "offset_y").ok().flatten() {
            self.camera_offset.y = y as f32;
        }
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        // [window] section
        config.set("window", "width", Some(self.window_width.to_string()));
        config.set("window", "height", Some(self.window_height.to_string()));
        config.set("window", "scale", Some(self.scale.to_string()));
        config.set("window", "target_fps", Some(self.target_fps.to_string()));
        config.set("window", "title", Some(self.title.clone()));

        // [assets] section
        config.set("assets", "map", Some(self.map_path.clone()));
        config.set("assets", "tileset", Some(self.tileset_path.clone()));
        config.set("assets", "sprites", Some(self.sprites_path.clone()));
        config.set("assets", "title_background", Some(self.title_background.clone()));
        config.set("assets", "title_middleground", Some(self.title_middleground.clone()));

        // [parallax] section
        config.set("parallax", "background", Some(self.background_factor.to_string()));
        config.set("parallax", "middleground", Some(self.middleground_factor.to_string()));

        // [camera] section
        config.set("camera", "offset_x", Some(self.camera_offset.x.to_string()));
        config.set("camera", "offset_y", Some(self.camera_offset.y.to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Get the window size.
    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }

    /// Visible area in world units (window size divided by the pixel scale).
    pub fn viewport(&self) -> ScreenSize {
        let scale = self.scale.max(1);
        ScreenSize::new(
            (self.window_width / scale) as i32,
            (self.window_height / scale) as i32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::new();
        assert_eq!(config.window_size(), (640, 480));
        assert_eq!(config.scale, 2);
        assert_eq!(config.target_fps, 60);
        assert_eq!(config.viewport(), ScreenSize::new(320, 240));
        assert_eq!(config.camera_offset, MapPosition::new(100.0, 100.0));
    }

    #[test]
    fn test_load_overrides_present_keys_only() {
        let mut config = GameConfig::new();
        config
            .load_from_str(
                "[window]\nwidth = 800\nscale = 4\n\n[assets]\nmap = maps/other.json\n\n[parallax]\nbackground = 3.5\n\n[camera]\noffset_y = 60\n",
            )
            .unwrap();
        assert_eq!(config.window_width, 800);
        assert_eq!(config.window_height, 480);
        assert_eq!(config.scale, 4);
        assert_eq!(config.map_path, "maps/other.json");
        assert_eq!(config.tileset_path, DEFAULT_TILESET);
        assert_eq!(config.background_factor, 3.5);
        assert_eq!(config.middleground_factor, 1.0);
        assert_eq!(config.camera_offset, MapPosition::new(100.0, 60.0));
    }

    #[test]
    fn test_missing_file_is_error() {
        let mut config = GameConfig::with_path("./definitely/not/here.ini");
        assert!(config.load_from_file().is_err());
        assert_eq!(config, GameConfig::with_path("./definitely/not/here.ini"));
    }
}
