//! Loading application configuration (feedback texts + generator bounds)
//! from TOML.
//!
//! See `AppConfig`, `Feedback` and `GeneratorBounds` for the expected schema.

use serde::Deserialize;
use tracing::{error, info, warn};

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
  #[serde(default)]
  pub feedback: Feedback,
  #[serde(default)]
  pub bounds: GeneratorBounds,
}

/// Feedback texts shown after quiz answers and challenge submissions.
/// Templates use `{key}` placeholders filled via `util::fill_template`.
#[derive(Clone, Debug, Deserialize)]
pub struct Feedback {
  pub quiz_correct: String,
  /// Shown for a wrong answer on a graph-style problem.
  pub quiz_wrong_graphical: String,
  /// Shown for a wrong answer on a symbolic problem; `{a}` and `{c}` are
  /// the slope coefficients.
  pub quiz_wrong_symbolic: String,
  pub challenge_solved: String,
  pub challenge_missed: String,
  pub quiz_summary_perfect: String,
  pub quiz_summary_good: String,
  pub quiz_summary_keep_practicing: String,
}

impl Default for Feedback {
  fn default() -> Self {
    Self {
      quiz_correct: "Correct! You're getting it!".into(),
      quiz_wrong_graphical:
        "Look closely at the lines. Do they cross, never touch, or overlap?".into(),
      quiz_wrong_symbolic:
        "Not quite. Look closely at the variable terms ({a}x and {c}x).".into(),
      challenge_solved: "SUCCESS! The equation now matches the goal.".into(),
      challenge_missed: "Not quite right. Try again!".into(),
      quiz_summary_perfect: "Perfect Score! You are a master!".into(),
      quiz_summary_good: "Great job! You really know your stuff.".into(),
      quiz_summary_keep_practicing: "Keep practicing! You'll get it.".into(),
    }
  }
}

/// Inclusive integer ranges the random generators draw from.
#[derive(Clone, Debug, Deserialize)]
pub struct GeneratorBounds {
  pub quiz_slope_min: i64,
  pub quiz_slope_max: i64,
  pub quiz_intercept_min: i64,
  pub quiz_intercept_max: i64,
  /// Slope offset for one-solution problems (`c = a ± offset`).
  pub quiz_offset_max: i64,
  pub challenge_slope_min: i64,
  pub challenge_slope_max: i64,
  pub challenge_intercept_min: i64,
  pub challenge_intercept_max: i64,
}

impl Default for GeneratorBounds {
  fn default() -> Self {
    Self {
      quiz_slope_min: -4,
      quiz_slope_max: 3,
      quiz_intercept_min: -5,
      quiz_intercept_max: 4,
      quiz_offset_max: 3,
      challenge_slope_min: -5,
      challenge_slope_max: 4,
      challenge_intercept_min: -10,
      challenge_intercept_max: 9,
    }
  }
}

impl GeneratorBounds {
  /// The no-solution generator redraws `d` until `d != b`; that only
  /// terminates if the intercept range holds at least two values. Reject
  /// degenerate ranges up front and fall back to defaults.
  pub fn validated(self) -> Self {
    let ranges_ok = self.quiz_slope_min <= self.quiz_slope_max
      && self.quiz_intercept_min < self.quiz_intercept_max
      && self.quiz_offset_max >= 1
      && self.challenge_slope_min <= self.challenge_slope_max
      && self.challenge_intercept_min <= self.challenge_intercept_max;
    if ranges_ok {
      self
    } else {
      warn!(target: "eqx_backend", "Configured generator bounds are degenerate; using defaults");
      Self::default()
    }
  }
}

/// Attempt to load `AppConfig` from APP_CONFIG_PATH. On any parsing/IO
/// error, returns None and the caller sticks with defaults.
pub fn load_app_config_from_env() -> Option<AppConfig> {
  let path = std::env::var("APP_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match toml::from_str::<AppConfig>(&s) {
      Ok(cfg) => {
        info!(target: "eqx_backend", %path, "Loaded app config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "eqx_backend", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "eqx_backend", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}
