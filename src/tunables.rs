// tunables.rs - Live-adjustable scene parameters backing the tweak panel
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::math::{ColorParseError, Rgb};

#[derive(Debug, Error)]
pub enum TunableError {
    #[error("unknown tunable `{0}`")]
    UnknownKey(String),
    #[error("tunable `{key}` is not a {expected}")]
    TypeMismatch { key: String, expected: &'static str },
    #[error("tunable `{key}` has an invalid range: min {min}, max {max}, step {step}")]
    InvalidRange { key: String, min: f32, max: f32, step: f32 },
    #[error("failed to read tunables from {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed tunables json")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Color(#[from] ColorParseError),
}

pub type Result<T> = std::result::Result<T, TunableError>;

/// Bounded number with a slider step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumberControl {
    pub value: f32,
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl NumberControl {
    /// Clamp to the range, then snap to `min + k * step`
    pub fn constrain(&self, value: f32) -> f32 {
        let clamped = value.clamp(self.min, self.max);
        let steps = ((clamped - self.min) / self.step).round();
        (self.min + steps * self.step).clamp(self.min, self.max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TunableValue {
    Number(NumberControl),
    Color(Rgb),
}

/// Ordered key → value registry. The registry owns the live values, the
/// scene reads them by value every frame.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Tunables {
    entries: Vec<(String, TunableValue)>,
}

impl Tunables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn get(&self, key: &str) -> Option<&TunableValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    fn get_mut(&mut self, key: &str) -> Option<&mut TunableValue> {
        self.entries.iter_mut().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Entries in registration order, for the panel
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut TunableValue)> {
        self.entries.iter_mut().map(|(k, v)| (k.as_str(), v))
    }

    /// Register a bounded number. An existing key keeps its live value.
    pub fn register_number(&mut self, key: &str, value: f32, min: f32, max: f32, step: f32) -> Result<f32> {
        if !(min <= max) || !(step > 0.0) {
            return Err(TunableError::InvalidRange {
                key: key.to_string(),
                min,
                max,
                step,
            });
        }
        if self.contains(key) {
            return self.number(key);
        }

        let control = NumberControl {
            value: value.clamp(min, max),
            min,
            max,
            step,
        };
        self.entries.push((key.to_string(), TunableValue::Number(control)));
        log::debug!("Registered tunable {} = {} [{}..{} step {}]", key, control.value, min, max, step);
        Ok(control.value)
    }

    /// Register a color. An existing key keeps its live value.
    pub fn register_color(&mut self, key: &str, value: Rgb) -> Result<Rgb> {
        if self.contains(key) {
            return self.color(key);
        }
        self.entries.push((key.to_string(), TunableValue::Color(value)));
        log::debug!("Registered tunable {} = {}", key, value);
        Ok(value)
    }

    pub fn number(&self, key: &str) -> Result<f32> {
        match self.get(key) {
            Some(TunableValue::Number(control)) => Ok(control.value),
            Some(TunableValue::Color(_)) => Err(mismatch(key, "number")),
            None => Err(TunableError::UnknownKey(key.to_string())),
        }
    }

    pub fn color(&self, key: &str) -> Result<Rgb> {
        match self.get(key) {
            Some(TunableValue::Color(color)) => Ok(*color),
            Some(TunableValue::Number(_)) => Err(mismatch(key, "color")),
            None => Err(TunableError::UnknownKey(key.to_string())),
        }
    }

    /// Store a number, clamped and snapped. Returns the stored value.
    pub fn set_number(&mut self, key: &str, value: f32) -> Result<f32> {
        match self.get_mut(key) {
            Some(TunableValue::Number(control)) => {
                control.value = control.constrain(value);
                Ok(control.value)
            }
            Some(TunableValue::Color(_)) => Err(mismatch(key, "number")),
            None => Err(TunableError::UnknownKey(key.to_string())),
        }
    }

    pub fn set_color(&mut self, key: &str, value: Rgb) -> Result<()> {
        match self.get_mut(key) {
            Some(TunableValue::Color(color)) => {
                *color = value;
                Ok(())
            }
            Some(TunableValue::Number(_)) => Err(mismatch(key, "color")),
            None => Err(TunableError::UnknownKey(key.to_string())),
        }
    }

    /// Apply a flat JSON object of overrides: numbers for number keys,
    /// color strings for color keys. Unknown keys are skipped with a warning.
    /// Returns how many values were applied.
    pub fn apply_json(&mut self, json: &str) -> Result<usize> {
        let overrides: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)?;
        let mut applied = 0;

        for (key, value) in overrides {
            if !self.contains(&key) {
                log::warn!("Ignoring override for unknown tunable `{}`", key);
                continue;
            }
            match value {
                serde_json::Value::Number(n) => {
                    let n = n.as_f64().ok_or_else(|| mismatch(&key, "number"))?;
                    self.set_number(&key, n as f32)?;
                }
                serde_json::Value::String(s) => self.set_color(&key, s.parse()?)?,
                _ => return Err(mismatch(&key, "number or color string")),
            }
            applied += 1;
        }

        Ok(applied)
    }

    pub fn load_overrides(&mut self, path: &Path) -> Result<usize> {
        let json = std::fs::read_to_string(path).map_err(|source| TunableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let applied = self.apply_json(&json)?;
        log::info!("Applied {} tunable override(s) from {}", applied, path.display());
        Ok(applied)
    }
}

fn mismatch(key: &str, expected: &'static str) -> TunableError {
    TunableError::TypeMismatch {
        key: key.to_string(),
        expected,
    }
}
