// Configuration module for reading Snake.toml
// Every tunable of the decision engine lives here and is passed down explicitly,
// so two games served by the same process never share mutable tuning state.

use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Rings of wall/corner weight applied from every edge
pub const CORNER_DEPTH: usize = 3;

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    pub timing: TimingConfig,
    pub strategy: StrategyConfig,
    pub weights: WeightConfig,
    pub debug: DebugConfig,
}

/// Timing and performance constants
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct TimingConfig {
    pub response_time_budget_ms: u64,
    pub network_overhead_ms: u64,
    pub polling_interval_ms: u64,
}

impl TimingConfig {
    /// Computes the effective computation budget
    pub fn effective_budget_ms(&self) -> u64 {
        self.response_time_budget_ms.saturating_sub(self.network_overhead_ms)
    }
}

/// How the selector ranks the legal moves that survive filtering
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScoringMode {
    /// Largest reachable area, ties broken by the closest food
    Space,
    /// Minimum cumulative weight over a bounded-depth path search
    WeightedPath,
}

/// Strategy selection constants
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct StrategyConfig {
    pub mode: ScoringMode,
    pub path_search_depth: usize,
    /// Seeds the per-turn tie-break RNG; entropy is used when absent
    #[serde(default)]
    pub rng_seed: Option<u64>,
}

/// Constants of the heuristic weight field
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct WeightConfig {
    /// Weight of any cell that must never be entered
    pub lethal_weight: f64,

    // Wall / corner pass. Indexed [rows from edge][cols from edge].
    pub corner_table: [[f64; CORNER_DEPTH]; CORNER_DEPTH],
    pub edge_ring_weights: [f64; CORNER_DEPTH],

    // Snake danger pass, one entry per hop (hop 0 is the source cell)
    pub body_danger: Vec<f64>,
    pub head_danger: Vec<f64>,

    // Food pass
    pub food_search_depth: usize,
    pub food_base_attraction: f64,
    pub food_hunger_scale: f64,
    pub low_health_threshold: i32,
    pub health_max: f64,
}

impl WeightConfig {
    /// Magnitude of a food cell's pull; grows as health drops
    pub fn food_attraction(&self, health: i32) -> f64 {
        let missing = (self.health_max - health as f64).max(0.0);
        let hunger = if self.health_max > 0.0 {
            missing / self.health_max
        } else {
            0.0
        };
        self.food_base_attraction + self.food_hunger_scale * hunger
    }
}

/// Debug configuration
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct DebugConfig {
    pub enabled: bool,
    pub log_file_path: String,
}

impl Config {
    /// Loads configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the Snake.toml configuration file
    ///
    /// # Returns
    /// * `Result<Config, String>` - Parsed configuration or error message
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, String> {
        let config: Config =
            toml::from_str(contents).map_err(|e| format!("Failed to parse config file: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects tunings the weight field cannot work with
    pub fn validate(&self) -> Result<(), String> {
        if self.weights.body_danger.is_empty() {
            return Err("weights.body_danger must list at least one decay step".to_string());
        }
        if self.weights.head_danger.is_empty() {
            return Err("weights.head_danger must list at least one decay step".to_string());
        }
        Ok(())
    }

    /// Loads default configuration from Snake.toml in the project root
    pub fn load_default() -> Result<Self, String> {
        Self::from_file("Snake.toml")
    }

    /// Creates a configuration with hardcoded default values as fallback
    /// This should match the constants defined in Snake.toml
    pub fn default_hardcoded() -> Self {
        Config {
            timing: TimingConfig {
                response_time_budget_ms: 400,
                network_overhead_ms: 50,
                polling_interval_ms: 5,
            },
            strategy: StrategyConfig {
                mode: ScoringMode::Space,
                path_search_depth: 6,
                rng_seed: None,
            },
            weights: WeightConfig {
                lethal_weight: 1000.0,
                corner_table: [[6.0, 5.0, 4.0], [5.0, 4.0, 3.0], [4.0, 3.0, 2.0]],
                edge_ring_weights: [3.0, 2.0, 1.0],
                body_danger: vec![2.0, 1.0],
                head_danger: vec![4.0, 2.0, 1.0],
                food_search_depth: 4,
                food_base_attraction: 4.0,
                food_hunger_scale: 6.0,
                low_health_threshold: 30,
                health_max: 100.0,
            },
            debug: DebugConfig {
                enabled: false,
                log_file_path: "contour_snake_debug.jsonl".to_string(),
            },
        }
    }

    /// Attempts to load from file, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            log::warn!(
                "Could not load Snake.toml ({}), using hardcoded defaults",
                e
            );
            Self::default_hardcoded()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_budget_calculation() {
        let config = Config::default_hardcoded();
        assert_eq!(config.timing.effective_budget_ms(), 350);
    }

    #[test]
    fn test_effective_budget_saturates() {
        let mut config = Config::default_hardcoded();
        config.timing.network_overhead_ms = 1_000;
        assert_eq!(config.timing.effective_budget_ms(), 0);
    }

    #[test]
    fn test_snake_toml_can_be_parsed() {
        let result = Config::from_file("Snake.toml");
        assert!(
            result.is_ok(),
            "Failed to parse Snake.toml: {:?}",
            result.err()
        );
    }

    #[test]
    fn test_snake_toml_matches_hardcoded_defaults() {
        let file_config = Config::from_file("Snake.toml").expect("Snake.toml should be parseable");
        assert_eq!(file_config, Config::default_hardcoded());
    }

    #[test]
    fn test_scoring_mode_parses_snake_case() {
        let mut text = fs::read_to_string("Snake.toml").expect("Snake.toml should be readable");
        text = text.replace("mode = \"space\"", "mode = \"weighted_path\"");
        let config = Config::from_toml_str(&text).expect("modified config should parse");
        assert_eq!(config.strategy.mode, ScoringMode::WeightedPath);
    }

    #[test]
    fn test_food_attraction_grows_with_hunger() {
        let weights = Config::default_hardcoded().weights;
        let full = weights.food_attraction(100);
        let starving = weights.food_attraction(5);
        assert!(starving > full);
        assert_eq!(full, weights.food_base_attraction);
    }

    #[test]
    fn test_empty_danger_decay_is_rejected() {
        let text = fs::read_to_string("Snake.toml").expect("Snake.toml should be readable");
        let body = Config::from_toml_str(&text.replace("body_danger = [2.0, 1.0]", "body_danger = []"));
        assert!(body.unwrap_err().contains("body_danger"));
        let head = Config::from_toml_str(&text.replace("head_danger = [4.0, 2.0, 1.0]", "head_danger = []"));
        assert!(head.unwrap_err().contains("head_danger"));
    }

    #[test]
    fn test_invalid_toml_returns_error() {
        assert!(Config::from_file("nonexistent.toml").is_err());
        assert!(Config::from_toml_str("[timing]\nresponse_time_budget_ms = \"soon\"").is_err());
    }
}
