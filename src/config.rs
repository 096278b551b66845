//! Resolver configuration.

use crate::{CorefError, CorefResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Mentions to drop from the output after clustering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Exclusion {
    /// Mentions in single-member clusters.
    Singletons,
    /// Single-member clusters that are not names.
    NpSingletons,
    RelPronouns,
    Reflexives,
    Reciprocals,
    Appositives,
    Predicatives,
}

impl FromStr for Exclusion {
    type Err = CorefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "singletons" => Ok(Exclusion::Singletons),
            "npsingletons" => Ok(Exclusion::NpSingletons),
            "relpronouns" => Ok(Exclusion::RelPronouns),
            "reflexives" => Ok(Exclusion::Reflexives),
            "reciprocals" => Ok(Exclusion::Reciprocals),
            "appositives" => Ok(Exclusion::Appositives),
            "predicatives" => Ok(Exclusion::Predicatives),
            other => Err(CorefError::Config(format!("unknown exclusion `{}`", other))),
        }
    }
}

/// Tunable windows and filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CorefConfig {
    /// Maximum token distance between a speech-verb subject and the quotation
    /// it is attributed to.
    pub speaker_window: usize,
    /// Maximum token gap between two attributed quotations that address each
    /// other.
    pub turn_window: usize,
    /// How many sentences back pronoun resolution searches.
    pub pronoun_window: usize,
    /// Lemmas that are checked with the pleonastic oracle.
    pub pleonastic_lemmas: Vec<String>,
    pub exclude: Vec<Exclusion>,
}

impl CorefConfig {
    pub fn from_toml_str(content: &str) -> CorefResult<Self> {
        toml::from_str(content).map_err(|e| CorefError::Config(e.to_string()))
    }

    /// Load from a TOML file. A missing file yields the defaults.
    pub fn load(path: &Path) -> CorefResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|e| CorefError::Load {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn with_exclusions(mut self, exclude: Vec<Exclusion>) -> Self {
        self.exclude = exclude;
        self
    }

    pub fn is_pleonastic_candidate(&self, lemma: &str) -> bool {
        self.pleonastic_lemmas.iter().any(|l| l == lemma)
    }
}

impl Default for CorefConfig {
    fn default() -> Self {
        Self {
            speaker_window: 5,
            turn_window: 10,
            pronoun_window: 10,
            pleonastic_lemmas: vec!["het".to_string()],
            exclude: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = CorefConfig::from_toml_str("").unwrap();
        assert_eq!(config, CorefConfig::default());
        assert!(config.is_pleonastic_candidate("het"));
    }

    #[test]
    fn parses_overrides() {
        let config = CorefConfig::from_toml_str(
            r#"
speaker_window = 3
exclude = ["singletons", "relpronouns"]
"#,
        )
        .unwrap();
        assert_eq!(config.speaker_window, 3);
        assert_eq!(config.pronoun_window, 10);
        assert_eq!(
            config.exclude,
            vec![Exclusion::Singletons, Exclusion::RelPronouns]
        );
    }

    #[test]
    fn rejects_unknown_keys_and_exclusions() {
        assert!(CorefConfig::from_toml_str("speaker_windw = 3").is_err());
        assert!(CorefConfig::from_toml_str(r#"exclude = ["everything"]"#).is_err());
        assert!(matches!(
            "everything".parse::<Exclusion>(),
            Err(CorefError::Config(_))
        ));
        assert_eq!("npsingletons".parse::<Exclusion>().unwrap(), Exclusion::NpSingletons);
    }

    #[test]
    fn missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = CorefConfig::load(&dir.path().join("coref.toml")).unwrap();
        assert_eq!(config, CorefConfig::default());
    }
}
