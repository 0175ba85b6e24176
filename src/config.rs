//! Packing configuration.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Ordering applied to products before placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TieringPolicy {
    /// Sort by descending distance, split into five near-equal batches, sort
    /// each batch by descending padded volume.
    #[default]
    #[serde(rename = "distance-5-batch")]
    DistanceBatches,
    /// Three fragility bands, least fragile first, each by descending padded volume.
    #[serde(rename = "fragility-3-tier")]
    FragilityTiers,
    /// Plain first-fit in catalog order.
    #[serde(rename = "input-order")]
    InputOrder,
}

/// Coefficients of the padding factor `1 + a·fragility + b·weight [+ c·volume]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PaddingConfig {
    pub fragility_coefficient: f64,
    pub weight_coefficient: f64,
    /// Extra term over the raw volume. Disabled when `None`.
    pub volume_coefficient: Option<f64>,
}

impl Default for PaddingConfig {
    fn default() -> Self {
        Self {
            fragility_coefficient: 0.02,
            weight_coefficient: 0.005,
            volume_coefficient: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PackingConfig {
    pub padding: PaddingConfig,
    pub tiering: TieringPolicy,
}

impl PackingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a configuration; absent fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| Error::Configuration(format!("invalid packing config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_tiering(mut self, tiering: TieringPolicy) -> Self {
        self.tiering = tiering;
        self
    }

    pub fn with_padding(mut self, padding: PaddingConfig) -> Self {
        self.padding = padding;
        self
    }

    /// Enables the raw-volume term of the padding factor.
    pub fn with_volume_coefficient(mut self, coefficient: f64) -> Self {
        self.padding.volume_coefficient = Some(coefficient);
        self
    }

    pub fn validate(&self) -> Result<()> {
        let p = &self.padding;
        let coefficients = [
            ("fragility_coefficient", Some(p.fragility_coefficient)),
            ("weight_coefficient", Some(p.weight_coefficient)),
            ("volume_coefficient", p.volume_coefficient),
        ];
        for (name, value) in coefficients {
            if let Some(v) = value {
                if !v.is_finite() || v < 0.0 {
                    return Err(Error::Configuration(format!(
                        "{name} must be a non-negative finite number, got {v}"
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PackingConfig::default();
        assert_eq!(config.tiering, TieringPolicy::DistanceBatches);
        assert_eq!(config.padding.fragility_coefficient, 0.02);
        assert_eq!(config.padding.weight_coefficient, 0.005);
        assert!(config.padding.volume_coefficient.is_none());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = PackingConfig::from_json_str(r#"{"tiering":"fragility-3-tier"}"#).unwrap();
        assert_eq!(config.tiering, TieringPolicy::FragilityTiers);
        assert_eq!(config.padding, PaddingConfig::default());

        let config =
            PackingConfig::from_json_str(r#"{"padding":{"volume_coefficient":0.001}}"#).unwrap();
        assert_eq!(config.padding.volume_coefficient, Some(0.001));
        assert_eq!(config.padding.fragility_coefficient, 0.02);
    }

    #[test]
    fn test_rejects_unknown_policy_and_negative_coefficient() {
        assert!(matches!(
            PackingConfig::from_json_str(r#"{"tiering":"shelf"}"#),
            Err(Error::Configuration(_))
        ));
        assert!(PackingConfig::from_json_str(r#"{"padding":{"weight_coefficient":-1}}"#).is_err());
    }

    #[test]
    fn test_misspelled_keys_are_rejected() {
        let err = PackingConfig::from_json_str(r#"{"tierng":"fragility-3-tier"}"#).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
        assert!(matches!(
            PackingConfig::from_json_str(r#"{"padding":{"weight_coef":0.01}}"#),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn test_builder() {
        let config = PackingConfig::new()
            .with_tiering(TieringPolicy::InputOrder)
            .with_volume_coefficient(0.5);
        assert_eq!(config.tiering, TieringPolicy::InputOrder);
        assert_eq!(config.padding.volume_coefficient, Some(0.5));
    }
}
