//! Exercise configuration and threshold overrides

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::error::EngineError;

/// Read-only description of the exercise being attempted
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseConfig {
    /// Human-readable identifier, e.g. `squat` (looked up first)
    #[serde(default)]
    pub slug: Option<String>,
    /// Catalogue id (looked up when the slug is unknown)
    #[serde(default)]
    pub id: Option<String>,
    /// Threshold overrides; missing entries use each analyzer's defaults
    #[serde(default)]
    pub thresholds: HashMap<String, f64>,
    /// Phase names reported by the generic fallback
    #[serde(default)]
    pub phases: Vec<String>,
}

impl ExerciseConfig {
    pub fn from_slug(slug: impl Into<String>) -> Self {
        Self {
            slug: Some(slug.into()),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_threshold(mut self, name: impl Into<String>, value: f64) -> Self {
        self.thresholds.insert(name.into(), value);
        self
    }

    pub fn with_phases<I, S>(mut self, phases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.phases = phases.into_iter().map(Into::into).collect();
        self
    }

    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Best name for logs: slug, then id
    pub fn label(&self) -> &str {
        self.slug
            .as_deref()
            .or(self.id.as_deref())
            .unwrap_or("unknown")
    }
}

/// Validated threshold map with per-analyzer defaults
#[derive(Clone, Debug, Default)]
pub struct Thresholds {
    values: HashMap<String, f64>,
}

impl Thresholds {
    /// Rejects NaN and infinite overrides
    pub fn new(values: HashMap<String, f64>) -> Result<Self, EngineError> {
        if let Some((name, value)) = values.iter().find(|(_, v)| !v.is_finite()) {
            return Err(EngineError::InvalidThreshold {
                name: name.clone(),
                value: *value,
            });
        }
        Ok(Self { values })
    }

    /// Override for `name`, or `default` when not configured
    pub fn get(&self, name: &str, default: f32) -> f32 {
        self.values.get(name).map_or(default, |&v| v as f32)
    }

    pub fn get_f64(&self, name: &str, default: f64) -> f64 {
        self.values.get(name).copied().unwrap_or(default)
    }

    pub fn is_overridden(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }
}
