//! # Settings
//!
//! Runtime configuration that is not part of a footing design: which
//! workbook evaluator to run, how long to wait for it, and layout tunables.
//!
//! Settings come from an optional JSON file, then environment overrides:
//!
//! - `FOOTING_EVALUATOR` - evaluator command line (program and arguments,
//!   whitespace separated)
//! - `FOOTING_TIMEOUT_SECS` - evaluation timeout in seconds
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "evaluator": { "program": "python3", "args": ["eval_workbook.py", "sft.xlsx"] },
//!   "evaluation_timeout_secs": 30.0,
//!   "layout": { "hook_factor": 15.0, "layer_clearance_in": 1.0 }
//! }
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::calculations::rebar_layout::LayoutOptions;
use crate::errors::{CalcError, CalcResult};
use crate::evaluation::ProcessEvaluator;

/// Environment variable holding the evaluator command line
pub const ENV_EVALUATOR: &str = "FOOTING_EVALUATOR";

/// Environment variable holding the evaluation timeout (seconds)
pub const ENV_TIMEOUT_SECS: &str = "FOOTING_TIMEOUT_SECS";

/// Default evaluation timeout (seconds)
pub const DEFAULT_TIMEOUT_SECS: f64 = 30.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// External workbook evaluator; `None` until configured
    pub evaluator: Option<ProcessEvaluator>,

    /// Upper bound on one workbook evaluation (seconds)
    pub evaluation_timeout_secs: f64,

    pub layout: LayoutOptions,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            evaluator: None,
            evaluation_timeout_secs: DEFAULT_TIMEOUT_SECS,
            layout: LayoutOptions::default(),
        }
    }
}

impl Settings {
    /// Read settings from a JSON file.
    pub fn from_file(path: &Path) -> CalcResult<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| CalcError::file_error("read settings", path.display().to_string(), e.to_string()))?;
        let settings: Settings = serde_json::from_str(&contents)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load from an optional file, then apply process environment overrides.
    pub fn load(path: Option<&Path>) -> CalcResult<Self> {
        let mut settings = match path {
            Some(path) => Settings::from_file(path)?,
            None => Settings::default(),
        };
        settings.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(settings)
    }

    /// Apply overrides from a key lookup (normally the environment).
    pub fn apply_overrides<F>(&mut self, lookup: F) -> CalcResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(command) = lookup(ENV_EVALUATOR) {
            let mut parts = command.split_whitespace();
            if let Some(program) = parts.next() {
                self.evaluator = Some(ProcessEvaluator::new(program).with_args(parts));
            }
        }

        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            self.evaluation_timeout_secs = raw
                .trim()
                .parse()
                .map_err(|_| CalcError::invalid_input(ENV_TIMEOUT_SECS, raw.clone(), "Timeout must be a number of seconds"))?;
        }

        self.validate()
    }

    pub fn validate(&self) -> CalcResult<()> {
        self.evaluation_timeout()?;
        self.layout.validate()
    }

    /// Evaluation timeout as a `Duration`; fails for non-positive or
    /// unrepresentable values.
    pub fn evaluation_timeout(&self) -> CalcResult<Duration> {
        let secs = self.evaluation_timeout_secs;
        if !(secs > 0.0) {
            return Err(CalcError::invalid_input(
                "evaluation_timeout_secs",
                secs.to_string(),
                "Timeout must be positive",
            ));
        }
        Duration::try_from_secs_f64(secs).map_err(|_| {
            CalcError::invalid_input("evaluation_timeout_secs", secs.to_string(), "Timeout is too large")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(settings.evaluator.is_none());
        assert_eq!(settings.evaluation_timeout().unwrap(), Duration::from_secs(30));
        assert_eq!(settings.layout.hook_factor, 15.0);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: Settings = serde_json::from_str(r#"{ "layout": { "layer_clearance_in": 0.5 } }"#).unwrap();
        assert_eq!(settings.layout.layer_clearance_in, 0.5);
        assert_eq!(settings.layout.hook_factor, 15.0);
        assert_eq!(settings.evaluation_timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_EVALUATOR, "python3 eval_workbook.py sft.xlsx"),
            (ENV_TIMEOUT_SECS, "2.5"),
        ]
        .into_iter()
        .collect();

        let mut settings = Settings::default();
        settings
            .apply_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        let evaluator = settings.evaluator.unwrap();
        assert_eq!(evaluator.program, "python3");
        assert_eq!(evaluator.args, vec!["eval_workbook.py", "sft.xlsx"]);
        assert_eq!(settings.evaluation_timeout_secs, 2.5);
    }

    #[test]
    fn test_bad_timeout_override() {
        let mut settings = Settings::default();
        let err = settings
            .apply_overrides(|key| (key == ENV_TIMEOUT_SECS).then(|| "soon".to_string()))
            .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");

        let mut settings = Settings::default();
        assert!(settings
            .apply_overrides(|key| (key == ENV_TIMEOUT_SECS).then(|| "0".to_string()))
            .is_err());
    }

    #[test]
    fn test_huge_timeout_rejected() {
        let mut settings = Settings::default();
        let err = settings
            .apply_overrides(|key| (key == ENV_TIMEOUT_SECS).then(|| "1e20".to_string()))
            .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");

        let settings: Settings = serde_json::from_str(r#"{ "evaluation_timeout_secs": 1e20 }"#).unwrap();
        assert!(settings.validate().is_err());
        assert!(settings.evaluation_timeout().is_err());

        let settings = Settings {
            evaluation_timeout_secs: f64::INFINITY,
            ..Settings::default()
        };
        assert!(settings.evaluation_timeout().is_err());
    }

    #[test]
    fn test_from_file() {
        let path = std::env::temp_dir().join(format!("footing_settings_{}.json", std::process::id()));
        fs::write(
            &path,
            r#"{ "evaluator": { "program": "eval-sft" }, "evaluation_timeout_secs": 10 }"#,
        )
        .unwrap();

        let settings = Settings::from_file(&path).unwrap();
        assert_eq!(settings.evaluator, Some(ProcessEvaluator::new("eval-sft")));
        assert_eq!(settings.evaluation_timeout_secs, 10.0);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_file() {
        let err = Settings::from_file(Path::new("/nonexistent/footing.json")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }
}
