//! Exercise identifier → analyzer factory

use std::collections::HashMap;

use crate::analysis::{ExerciseConfig, Thresholds};
use crate::exercises::{
    CatCamelAnalyzer, ExerciseAnalyzer, GenericAnalyzer, HipHingeAnalyzer,
    ProneExtensionAnalyzer, SideBendAnalyzer, SquatAnalyzer,
};

/// Builds a fresh analyzer for one exercise attempt
pub type AnalyzerFactory = fn(&Thresholds) -> Box<dyn ExerciseAnalyzer>;

/// Lookup form of an identifier: trimmed, lowercase, `_` and spaces as `-`
pub fn normalize_key(identifier: &str) -> String {
    identifier
        .trim()
        .chars()
        .map(|c| match c {
            '_' | ' ' => '-',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

/// Outcome of resolving a config against the registry
pub struct Resolved {
    pub analyzer: Box<dyn ExerciseAnalyzer>,
    /// Normalized key that matched; `None` for the generic fallback
    pub matched: Option<String>,
}

impl Resolved {
    pub fn is_fallback(&self) -> bool {
        self.matched.is_none()
    }
}

#[derive(Clone, Default)]
pub struct AnalyzerRegistry {
    factories: HashMap<String, AnalyzerFactory>,
}

impl AnalyzerRegistry {
    /// No exercises; everything resolves to the fallback
    pub fn empty() -> Self {
        Self::default()
    }

    /// Every built-in analyzer under its common names
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register(&["squat", "bodyweight-squat", "air-squat"], |t| {
            Box::new(SquatAnalyzer::from_thresholds(t))
        });
        registry.register(&["cat-camel", "cat-cow"], |t| {
            Box::new(CatCamelAnalyzer::from_thresholds(t))
        });
        registry.register(&["side-bend", "standing-side-bend"], |t| {
            Box::new(SideBendAnalyzer::from_thresholds(t))
        });
        registry.register(&["hip-hinge", "good-morning", "romanian-deadlift"], |t| {
            Box::new(HipHingeAnalyzer::from_thresholds(t))
        });
        registry.register(&["prone-extension", "cobra", "press-up"], |t| {
            Box::new(ProneExtensionAnalyzer::from_thresholds(t))
        });
        registry
    }

    /// Register `factory` under every alias. Later registrations win.
    pub fn register(&mut self, aliases: &[&str], factory: AnalyzerFactory) {
        for alias in aliases {
            self.factories.insert(normalize_key(alias), factory);
        }
    }

    pub fn lookup(&self, identifier: &str) -> Option<AnalyzerFactory> {
        self.factories.get(&normalize_key(identifier)).copied()
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.lookup(identifier).is_some()
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Slug first, then id, then the generic fallback
    pub fn resolve(&self, config: &ExerciseConfig, thresholds: &Thresholds) -> Resolved {
        let hit = [config.slug.as_deref(), config.id.as_deref()]
            .into_iter()
            .flatten()
            .find_map(|key| self.lookup(key).map(|factory| (normalize_key(key), factory)));

        match hit {
            Some((key, factory)) => Resolved {
                analyzer: factory(thresholds),
                matched: Some(key),
            },
            None => Resolved {
                analyzer: Box::new(GenericAnalyzer::new(&config.phases)),
                matched: None,
            },
        }
    }
}
