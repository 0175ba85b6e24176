//! Greedy packing of fragile products into one vehicle.
//!
//! Products are padded by fragility and weight, ordered into priority
//! batches, and placed first-fit into a catalog of free-space cuboids that is
//! split guillotine-style after every placement.
//!
//! ```
//! use vehiclepacker::{pack_products, PackingConfig, ProductId, ProductRecord, Vehicle};
//!
//! let vehicle = Vehicle::new(10.0, 10.0, 10.0).unwrap();
//! let catalog = vec![ProductRecord {
//!     product_id: ProductId::Number(1),
//!     product_name: "Books".into(),
//!     fragility_index: 0.0,
//!     weight: 0.0,
//!     length: 4.0,
//!     breadth: 4.0,
//!     height: 4.0,
//!     distance: 1.0,
//! }];
//! let result = pack_products(&vehicle, &catalog, &PackingConfig::default()).unwrap();
//! assert_eq!(result.packed.len(), 1);
//! ```

pub mod batch;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod preprocess;
pub mod rotation;
pub mod sink;
pub mod structs;
pub mod synthetic;
pub mod utils;

pub use config::{PackingConfig, PaddingConfig, TieringPolicy};
pub use engine::{pack_products, PlacementEngine, PlacementState};
pub use error::{CapacityError, Error, Result};
pub use structs::{
    PackResponse, PackedItem, PackedItemRecord, PackingReport, PackingResult, ProductId,
    ProductRecord, UnplacedItem, Vehicle,
};

#[cfg(feature = "python")]
use pyo3::exceptions::{PyIOError, PyRuntimeError, PyValueError};
#[cfg(feature = "python")]
use pyo3::prelude::*;

#[cfg(feature = "python")]
fn to_py_err(e: Error) -> PyErr {
    match e {
        Error::Configuration(msg) => PyValueError::new_err(msg),
        Error::SourceUnavailable(msg) => PyIOError::new_err(msg),
        Error::Serialization(msg) => PyRuntimeError::new_err(msg),
        Error::Output(msg) => PyIOError::new_err(msg),
    }
}

#[cfg(feature = "python")]
fn run_from_catalog(
    catalog_path: &str,
    length: f64,
    breadth: f64,
    height: f64,
    config_json: Option<&str>,
) -> Result<PackingResult> {
    let vehicle = Vehicle::new(length, breadth, height)?;
    let config = match config_json {
        Some(json) => PackingConfig::from_json_str(json)?,
        None => PackingConfig::default(),
    };
    let records = utils::load_catalog(catalog_path)?;
    pack_products(&vehicle, &records, &config)
}

/// Pack the catalog at `catalog_path` into the given vehicle, return
/// `{"packed_items": [...]}` as JSON.
#[cfg(feature = "python")]
#[pyfunction]
#[pyo3(signature = (catalog_path, length, breadth, height, config_json=None))]
fn pack_from_json(
    catalog_path: &str,
    length: f64,
    breadth: f64,
    height: f64,
    config_json: Option<&str>,
) -> PyResult<String> {
    let result = run_from_catalog(catalog_path, length, breadth, height, config_json)
        .map_err(to_py_err)?;
    utils::to_json_pretty(&result.response()).map_err(to_py_err)
}

/// Pack, write the full report (placements, unplaced, metrics) to `output_path`
/// and append a row to `packing_run_log.csv`.
#[cfg(feature = "python")]
#[pyfunction]
#[pyo3(signature = (catalog_path, output_path, length, breadth, height, config_json=None))]
fn pack_and_write(
    catalog_path: &str,
    output_path: &str,
    length: f64,
    breadth: f64,
    height: f64,
    config_json: Option<&str>,
) -> PyResult<()> {
    let result = run_from_catalog(catalog_path, length, breadth, height, config_json)
        .map_err(to_py_err)?;
    utils::log_placement_summary(&result.packed);
    utils::write_json(output_path, &result.report()).map_err(to_py_err)?;
    utils::log_run_to_csv("packing_run_log.csv", &result).map_err(to_py_err)
}

/// Python module definition
#[cfg(feature = "python")]
#[pymodule]
fn vehiclepacker(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(pack_from_json, m)?)?;
    m.add_function(wrap_pyfunction!(pack_and_write, m)?)?;
    Ok(())
}
