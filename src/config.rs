use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct MatcherConfig {
    /// Where catalogs and saved recipes live
    #[serde(default)]
    pub data: DataConfig,
    /// Ranking output options
    #[serde(default)]
    pub search: SearchOptions,
}

/// Paths of the data files
#[derive(Debug, Deserialize, Clone)]
pub struct DataConfig {
    /// Flat list catalog (BBC Good Food)
    #[serde(default = "default_flat_recipes")]
    pub flat_recipes: PathBuf,
    /// Name-keyed catalog (Tasty)
    #[serde(default = "default_keyed_recipes")]
    pub keyed_recipes: PathBuf,
    /// Video url index for the keyed catalog
    #[serde(default = "default_video_urls")]
    pub video_urls: PathBuf,
    /// Substitution catalog
    #[serde(default = "default_substitutions")]
    pub substitutions: PathBuf,
    /// Per-user saved recipes
    #[serde(default = "default_saved_recipes")]
    pub saved_recipes: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            flat_recipes: default_flat_recipes(),
            keyed_recipes: default_keyed_recipes(),
            video_urls: default_video_urls(),
            substitutions: default_substitutions(),
            saved_recipes: default_saved_recipes(),
        }
    }
}

/// Post-ranking filters
#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Drop ranked recipes with fewer matched ingredients than this
    #[serde(default)]
    pub min_matched: usize,
    /// Keep at most this many ranked recipes
    #[serde(default)]
    pub limit: Option<usize>,
}

// Default value functions
fn default_flat_recipes() -> PathBuf {
    PathBuf::from("res/bbc.json")
}

fn default_keyed_recipes() -> PathBuf {
    PathBuf::from("res/tasty.json")
}

fn default_video_urls() -> PathBuf {
    PathBuf::from("res/url.json")
}

fn default_substitutions() -> PathBuf {
    PathBuf::from("res/subs.json")
}

fn default_saved_recipes() -> PathBuf {
    PathBuf::from("users/saved_recipes.json")
}

impl MatcherConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from file and environment variables
///
/// Configuration is loaded with the following priority (highest to lowest):
/// 1. Environment variables with RECIPE_MATCHER__ prefix
/// 2. recipe-matcher.toml file in current directory
/// 3. Default values
///
/// Environment variable format: RECIPE_MATCHER__DATA__FLAT_RECIPES
pub fn load_config() -> Result<MatcherConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("recipe-matcher").required(false))
        .add_source(
            Environment::with_prefix("RECIPE_MATCHER")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
