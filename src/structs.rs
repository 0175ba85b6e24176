use crate::config::TieringPolicy;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Digits kept when placements are reported outside the engine.
pub const REPORT_DECIMALS: i32 = 2;

pub fn round_report(value: f64) -> f64 {
    let scale = 10f64.powi(REPORT_DECIMALS);
    (value * scale).round() / scale
}

//---------------------identity -------------------
/// Product identifier as it appears in the catalog: either a number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductId::Number(n) => write!(f, "{n}"),
            ProductId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ProductId {
    fn from(n: i64) -> Self {
        ProductId::Number(n)
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        ProductId::Text(s.to_string())
    }
}

//---------------------geometry -------------------
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub length: f64,
    pub breadth: f64,
    pub height: f64,
}

impl Dimensions {
    pub fn new(length: f64, breadth: f64, height: f64) -> Self {
        Self {
            length,
            breadth,
            height,
        }
    }

    pub fn as_array(&self) -> [f64; 3] {
        [self.length, self.breadth, self.height]
    }

    pub fn volume(&self) -> f64 {
        self.length * self.breadth * self.height
    }

    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(
            self.length * factor,
            self.breadth * factor,
            self.height * factor,
        )
    }

    fn rounded(&self) -> Self {
        Self::new(
            round_report(self.length),
            round_report(self.breadth),
            round_report(self.height),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    fn rounded(&self) -> Self {
        Self::new(round_report(self.x), round_report(self.y), round_report(self.z))
    }
}

//---------------------input -------------------
/// One entry of the product catalog. Every field is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub product_id: ProductId,
    pub product_name: String,
    pub fragility_index: f64,
    pub weight: f64,
    pub length: f64,
    pub breadth: f64,
    pub height: f64,
    pub distance: f64,
}

/// Container extents, fixed for the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub length: f64,
    pub breadth: f64,
    pub height: f64,
}

impl Vehicle {
    pub fn new(length: f64, breadth: f64, height: f64) -> Result<Self> {
        let vehicle = Self {
            length,
            breadth,
            height,
        };
        vehicle.validate()?;
        Ok(vehicle)
    }

    pub fn validate(&self) -> Result<()> {
        for (axis, value) in [
            ("length", self.length),
            ("breadth", self.breadth),
            ("height", self.height),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::Configuration(format!(
                    "vehicle {axis} must be a positive finite number, got {value}"
                )));
            }
        }
        Ok(())
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.length, self.breadth, self.height)
    }

    pub fn volume(&self) -> f64 {
        self.dimensions().volume()
    }
}

/// A validated product with its padded size. The padded size is fixed at
/// construction and cannot be changed afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub fragility_index: f64,
    pub weight: f64,
    pub distance: f64,
    raw: Dimensions,
    padded: Dimensions,
}

impl Product {
    pub(crate) fn new(record: &ProductRecord, padded: Dimensions) -> Self {
        Self {
            id: record.product_id.clone(),
            name: record.product_name.clone(),
            fragility_index: record.fragility_index,
            weight: record.weight,
            distance: record.distance,
            raw: Dimensions::new(record.length, record.breadth, record.height),
            padded,
        }
    }

    pub fn raw(&self) -> Dimensions {
        self.raw
    }

    pub fn padded(&self) -> Dimensions {
        self.padded
    }

    pub fn padded_volume(&self) -> f64 {
        self.padded.volume()
    }
}

//---------------------free space -------------------
/// Which split of a consumed cuboid produced a free-space cuboid. Also names
/// the catalog list the cuboid lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    Right,
    Top,
    Front,
}

impl Provenance {
    /// Catalog lists in search order.
    pub const SEARCH_ORDER: [Provenance; 3] =
        [Provenance::Right, Provenance::Top, Provenance::Front];

    pub fn index(self) -> usize {
        match self {
            Provenance::Right => 0,
            Provenance::Top => 1,
            Provenance::Front => 2,
        }
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Provenance::Right => "right",
            Provenance::Top => "top",
            Provenance::Front => "front",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FreeSpaceCuboid {
    pub origin: Position,
    pub extents: Dimensions,
    pub provenance: Provenance,
}

/// One axis assignment of a product's padded size. `axes` holds, for the
/// container's length/breadth/height axes, the index of the padded dimension
/// laid along it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orientation {
    pub axes: (usize, usize, usize),
    pub dims: Dimensions,
}

//---------------------output -------------------
#[derive(Debug, Clone, PartialEq)]
pub struct PackedItem {
    pub product: Product,
    pub orientation: Orientation,
    pub position: Position,
    /// The free-space cuboid this item was carved from, as it was before removal.
    pub source: FreeSpaceCuboid,
    pub batch: usize,
}

impl PackedItem {
    /// Far corner of the placed box.
    pub fn max_corner(&self) -> Position {
        let d = self.orientation.dims;
        Position::new(
            self.position.x + d.length,
            self.position.y + d.breadth,
            self.position.z + d.height,
        )
    }

    pub fn volume(&self) -> f64 {
        self.orientation.dims.volume()
    }

    pub fn overlaps(&self, other: &PackedItem) -> bool {
        let (a_min, a_max) = (self.position, self.max_corner());
        let (b_min, b_max) = (other.position, other.max_corner());
        a_min.x < b_max.x
            && a_max.x > b_min.x
            && a_min.y < b_max.y
            && a_max.y > b_min.y
            && a_min.z < b_max.z
            && a_max.z > b_min.z
    }

    /// Wire form with sizes and positions rounded for reporting.
    pub fn to_record(&self) -> PackedItemRecord {
        PackedItemRecord {
            product_id: self.product.id.clone(),
            product_name: self.product.name.clone(),
            fragility_index: self.product.fragility_index,
            distance: self.product.distance,
            adjusted_size: self.orientation.dims.rounded(),
            position: self.position.rounded(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackedItemRecord {
    pub product_id: ProductId,
    pub product_name: String,
    pub fragility_index: f64,
    pub distance: f64,
    pub adjusted_size: Dimensions,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnplacedItem {
    pub product_id: ProductId,
    pub product_name: String,
    pub reason: String,
}

/// Packing metrics for a finished run. Volumes are padded volumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackingMetrics {
    pub placed_count: usize,
    pub total_count: usize,
    pub placement_ratio: f64,
    pub packed_volume: f64,
    pub vehicle_volume: f64,
    pub volume_utilization: f64,
}

impl PackingMetrics {
    pub fn compute(vehicle: &Vehicle, packed: &[PackedItem], total_count: usize) -> Self {
        let placed_count = packed.len();
        let placement_ratio = if total_count > 0 {
            placed_count as f64 / total_count as f64
        } else {
            0.0
        };
        let packed_volume: f64 = packed.iter().map(PackedItem::volume).sum();
        let vehicle_volume = vehicle.volume();
        Self {
            placed_count,
            total_count,
            placement_ratio,
            packed_volume,
            vehicle_volume,
            volume_utilization: packed_volume / vehicle_volume,
        }
    }
}

/// Everything one packing run produced, at full precision.
#[derive(Debug, Clone)]
pub struct PackingResult {
    pub vehicle: Vehicle,
    pub policy: TieringPolicy,
    pub packed: Vec<PackedItem>,
    pub unplaced: Vec<UnplacedItem>,
    pub metrics: PackingMetrics,
}

impl PackingResult {
    pub fn records(&self) -> Vec<PackedItemRecord> {
        self.packed.iter().map(PackedItem::to_record).collect()
    }

    /// `{packed_items: [...]}` as returned to callers of the pack operation.
    pub fn response(&self) -> PackResponse {
        PackResponse {
            packed_items: self.records(),
        }
    }

    pub fn report(&self) -> PackingReport {
        PackingReport {
            vehicle: self.vehicle,
            policy: self.policy,
            packed_items: self.records(),
            unplaced: self.unplaced.clone(),
            metrics: self.metrics.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackResponse {
    pub packed_items: Vec<PackedItemRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackingReport {
    pub vehicle: Vehicle,
    pub policy: TieringPolicy,
    pub packed_items: Vec<PackedItemRecord>,
    pub unplaced: Vec<UnplacedItem>,
    pub metrics: PackingMetrics,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vehicle_rejects_non_positive_extent() {
        assert!(Vehicle::new(10.0, 10.0, 10.0).is_ok());
        assert!(matches!(
            Vehicle::new(10.0, 0.0, 10.0),
            Err(Error::Configuration(_))
        ));
        assert!(Vehicle::new(f64::NAN, 1.0, 1.0).is_err());
    }

    #[test]
    fn test_product_id_accepts_numbers_and_strings() {
        let ids: Vec<ProductId> = serde_json::from_str(r#"[7, "SKU-9"]"#).unwrap();
        assert_eq!(ids[0], ProductId::Number(7));
        assert_eq!(ids[1], ProductId::Text("SKU-9".into()));
        assert_eq!(serde_json::to_string(&ids).unwrap(), r#"[7,"SKU-9"]"#);
    }

    #[test]
    fn test_record_requires_every_field() {
        let missing_distance = r#"{"product_id":1,"product_name":"a","fragility_index":1,
            "weight":1,"length":1,"breadth":1,"height":1}"#;
        assert!(serde_json::from_str::<ProductRecord>(missing_distance).is_err());
    }

    #[test]
    fn test_report_rounding() {
        assert_eq!(round_report(1.23456), 1.23);
        assert_eq!(round_report(4.089), 4.09);
        assert_eq!(round_report(10.0), 10.0);
    }

    #[test]
    fn test_overlap_is_open_interval() {
        let record = ProductRecord {
            product_id: ProductId::Number(1),
            product_name: "cube".into(),
            fragility_index: 0.0,
            weight: 0.0,
            length: 2.0,
            breadth: 2.0,
            height: 2.0,
            distance: 0.0,
        };
        let dims = Dimensions::new(2.0, 2.0, 2.0);
        let source = FreeSpaceCuboid {
            origin: Position::default(),
            extents: Dimensions::new(10.0, 10.0, 10.0),
            provenance: Provenance::Right,
        };
        let item = |x: f64| PackedItem {
            product: Product::new(&record, dims),
            orientation: Orientation {
                axes: (0, 1, 2),
                dims,
            },
            position: Position::new(x, 0.0, 0.0),
            source,
            batch: 0,
        };
        assert!(!item(0.0).overlaps(&item(2.0)));
        assert!(item(0.0).overlaps(&item(1.5)));
    }
}
