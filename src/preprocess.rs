//! Validation and padding of catalog records.

use crate::config::PaddingConfig;
use crate::error::{Error, Result};
use crate::structs::{Dimensions, Product, ProductRecord};

pub const MIN_FRAGILITY: f64 = 0.0;
pub const MAX_FRAGILITY: f64 = 10.0;

/// Uniform scale applied to every raw dimension of a product.
pub fn padding_factor(
    padding: &PaddingConfig,
    fragility: f64,
    weight: f64,
    raw_volume: f64,
) -> f64 {
    let mut factor =
        1.0 + padding.fragility_coefficient * fragility + padding.weight_coefficient * weight;
    if let Some(c) = padding.volume_coefficient {
        factor += c * raw_volume;
    }
    factor
}

fn validate_record(record: &ProductRecord) -> Result<()> {
    let id = &record.product_id;
    let f = record.fragility_index;
    if !(MIN_FRAGILITY..=MAX_FRAGILITY).contains(&f) {
        return Err(Error::Configuration(format!(
            "product {id}: fragility_index {f} outside [{MIN_FRAGILITY}, {MAX_FRAGILITY}]"
        )));
    }
    if !record.weight.is_finite() || record.weight < 0.0 {
        return Err(Error::Configuration(format!(
            "product {id}: weight must be non-negative, got {}",
            record.weight
        )));
    }
    for (axis, value) in [
        ("length", record.length),
        ("breadth", record.breadth),
        ("height", record.height),
    ] {
        if !value.is_finite() || value <= 0.0 {
            return Err(Error::Configuration(format!(
                "product {id}: {axis} must be positive, got {value}"
            )));
        }
    }
    if !record.distance.is_finite() {
        return Err(Error::Configuration(format!(
            "product {id}: distance must be finite, got {}",
            record.distance
        )));
    }
    Ok(())
}

pub fn preprocess_product(record: &ProductRecord, padding: &PaddingConfig) -> Result<Product> {
    validate_record(record)?;
    let raw = Dimensions::new(record.length, record.breadth, record.height);
    let factor = padding_factor(padding, record.fragility_index, record.weight, raw.volume());
    Ok(Product::new(record, raw.scaled(factor)))
}

/// Pads every record. The first malformed record fails the whole batch.
pub fn preprocess_products(
    records: &[ProductRecord],
    padding: &PaddingConfig,
) -> Result<Vec<Product>> {
    records
        .iter()
        .map(|r| preprocess_product(r, padding))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(fragility: f64, weight: f64, dims: (f64, f64, f64)) -> ProductRecord {
        ProductRecord {
            product_id: "p".into(),
            product_name: "p".into(),
            fragility_index: fragility,
            weight,
            length: dims.0,
            breadth: dims.1,
            height: dims.2,
            distance: 0.0,
        }
    }

    #[test]
    fn test_padding_factor() {
        let padding = PaddingConfig::default();
        assert_eq!(padding_factor(&padding, 0.0, 0.0, 64.0), 1.0);
        assert!((padding_factor(&padding, 5.0, 20.0, 64.0) - 1.2).abs() < 1e-12);
    }

    #[test]
    fn test_volume_term_is_opt_in() {
        let padding = PaddingConfig {
            volume_coefficient: Some(0.001),
            ..PaddingConfig::default()
        };
        assert!((padding_factor(&padding, 0.0, 0.0, 1000.0) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_uniform_scaling() {
        let product =
            preprocess_product(&record(10.0, 0.0, (1.0, 2.0, 3.0)), &PaddingConfig::default())
                .unwrap();
        let padded = product.padded();
        assert!((padded.length - 1.2).abs() < 1e-12);
        assert!((padded.breadth - 2.4).abs() < 1e-12);
        assert!((padded.height - 3.6).abs() < 1e-12);
        assert!((product.padded_volume() - 6.0 * 1.2f64.powi(3)).abs() < 1e-9);
        assert_eq!(product.raw(), Dimensions::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_rejects_out_of_range_fields() {
        let padding = PaddingConfig::default();
        let bad = [
            record(11.0, 0.0, (1.0, 1.0, 1.0)),
            record(-0.5, 0.0, (1.0, 1.0, 1.0)),
            record(1.0, -1.0, (1.0, 1.0, 1.0)),
            record(1.0, 0.0, (0.0, 1.0, 1.0)),
            record(1.0, 0.0, (1.0, -2.0, 1.0)),
            record(f64::NAN, 0.0, (1.0, 1.0, 1.0)),
        ];
        for r in &bad {
            assert!(
                matches!(preprocess_product(r, &padding), Err(Error::Configuration(_))),
                "accepted {r:?}"
            );
        }
    }

    #[test]
    fn test_one_bad_record_fails_all() {
        let records = vec![
            record(1.0, 1.0, (1.0, 1.0, 1.0)),
            record(11.0, 1.0, (1.0, 1.0, 1.0)),
        ];
        assert!(preprocess_products(&records, &PaddingConfig::default()).is_err());
    }
}
