use serde::{Deserialize, Serialize};

/// Default window footprint (pixels), matching the documented defaults.
pub const DEFAULT_WINDOW_WIDTH: i32 = 520;
pub const DEFAULT_WINDOW_HEIGHT: i32 = 550;
pub const DEFAULT_WINDOW_X: i32 = 100;
pub const DEFAULT_WINDOW_Y: i32 = 100;

/// Display color tokens (Catppuccin Mocha) used for default and new categories.
pub mod palette {
    pub const SAPPHIRE: &str = "#74c7ec";
    pub const MAUVE: &str = "#cba6f7";
    pub const PEACH: &str = "#fab387";
    pub const BLUE: &str = "#89b4fa";
}

/// One named category (a team or project) with its display color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryConfig {
    pub name: String,
    pub color: String,
}

impl CategoryConfig {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        CategoryConfig {
            name: name.into(),
            color: color.into(),
        }
    }
}

/// Persisted application configuration (config.json).
///
/// The wire key for categories is `teams` for compatibility with existing
/// documents. Window geometry is in pixels. `presentation_mode` records the
/// last-used mode but is never auto-restored as an active state on startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(rename = "teams", default = "default_categories")]
    pub categories: Vec<CategoryConfig>,
    #[serde(default = "default_width")]
    pub window_width: i32,
    #[serde(default = "default_height")]
    pub window_height: i32,
    #[serde(default = "default_x")]
    pub window_x: i32,
    #[serde(default = "default_y")]
    pub window_y: i32,
    #[serde(default)]
    pub notes_collapsed: bool,
    #[serde(default)]
    pub presentation_mode: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            categories: default_categories(),
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            window_x: DEFAULT_WINDOW_X,
            window_y: DEFAULT_WINDOW_Y,
            notes_collapsed: false,
            presentation_mode: false,
        }
    }
}

impl AppConfig {
    /// Look up a category's color token by name.
    pub fn color_for(&self, name: &str) -> Option<&str> {
        self.categories
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.color.as_str())
    }
}

/// The three historical default categories with their fixed colors.
pub fn default_categories() -> Vec<CategoryConfig> {
    vec![
        CategoryConfig::new("Team A", palette::SAPPHIRE),
        CategoryConfig::new("Team B", palette::MAUVE),
        CategoryConfig::new("SAP Project", palette::PEACH),
    ]
}

fn default_width() -> i32 {
    DEFAULT_WINDOW_WIDTH
}

fn default_height() -> i32 {
    DEFAULT_WINDOW_HEIGHT
}

fn default_x() -> i32 {
    DEFAULT_WINDOW_X
}

fn default_y() -> i32 {
    DEFAULT_WINDOW_Y
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.categories.len(), 3);
        assert_eq!(config.categories[0].name, "Team A");
        assert_eq!(config.categories[0].color, palette::SAPPHIRE);
        assert_eq!(config.window_width, 520);
        assert_eq!(config.window_height, 550);
        assert!(!config.notes_collapsed);
        assert!(!config.presentation_mode);
    }

    #[test]
    fn test_serde_round_trip() {
        let mut config = AppConfig::default();
        config.notes_collapsed = true;
        config.window_height = 610;
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"teams\""));
        let back: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_minimal_document_fills_defaults() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_color_for() {
        let config = AppConfig::default();
        assert_eq!(config.color_for("Team B"), Some(palette::MAUVE));
        assert_eq!(config.color_for("Nope"), None);
    }
}
