use crate::error::{Error, Result};
use crate::structs::{PackedItem, PackingResult, ProductRecord, Provenance};
use chrono::Utc;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Logs, per free-space list, which items were carved out of it.
pub fn log_placement_summary(placements: &[PackedItem]) {
    let mut by_list: BTreeMap<usize, (Provenance, Vec<&PackedItem>)> = BTreeMap::new();
    for p in placements {
        by_list
            .entry(p.source.provenance.index())
            .or_insert_with(|| (p.source.provenance, Vec::new()))
            .1
            .push(p);
    }

    for (provenance, items) in by_list.values() {
        log::info!("{} free space held {} items:", provenance, items.len());
        for p in items {
            log::info!(
                "  {} '{}' at ({:.2}, {:.2}, {:.2}), batch {}",
                p.product.id,
                p.product.name,
                p.position.x,
                p.position.y,
                p.position.z,
                p.batch
            );
        }
    }
}

const RUN_LOG_HEADER: &str = "timestamp,vehicle_length,vehicle_breadth,vehicle_height,policy,\
                              products,placed,unplaced,volume_utilization\n";

/// Appends one summary row for `result` to the CSV at `path`, writing the
/// header when the file is new or empty.
pub fn log_run_to_csv(path: impl AsRef<Path>, result: &PackingResult) -> Result<()> {
    let path = path.as_ref();
    let io_err = |e: std::io::Error| {
        Error::Output(format!("cannot write run log {}: {e}", path.display()))
    };
    let timestamp = Utc::now().to_rfc3339();

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(io_err)?;

    if file.metadata().map(|m| m.len()).unwrap_or(0) == 0 {
        file.write_all(RUN_LOG_HEADER.as_bytes()).map_err(io_err)?;
    }

    let v = &result.vehicle;
    let m = &result.metrics;
    let policy = serde_json::to_value(result.policy)
        .ok()
        .and_then(|p| p.as_str().map(str::to_string))
        .unwrap_or_default();
    let record = format!(
        "{},{},{},{},{},{},{},{},{:.4}\n",
        timestamp,
        v.length,
        v.breadth,
        v.height,
        policy,
        m.total_count,
        m.placed_count,
        result.unplaced.len(),
        m.volume_utilization
    );
    file.write_all(record.as_bytes()).map_err(io_err)
}

/// Parses a product catalog (a JSON array of records).
pub fn parse_catalog(json: &str) -> Result<Vec<ProductRecord>> {
    serde_json::from_str(json)
        .map_err(|e| Error::Configuration(format!("malformed product catalog: {e}")))
}

/// Reads and parses the product catalog at `path`.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Vec<ProductRecord>> {
    let path = path.as_ref();
    let data = fs::read_to_string(path).map_err(|e| {
        Error::SourceUnavailable(format!(
            "failed to load product data from {}: {e}",
            path.display()
        ))
    })?;
    parse_catalog(&data)
}

pub fn to_json_pretty<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| Error::Serialization(e.to_string()))
}

pub fn write_json<T: Serialize>(path: impl AsRef<Path>, value: &T) -> Result<()> {
    let path = path.as_ref();
    let json = to_json_pretty(value)?;
    fs::write(path, json)
        .map_err(|e| Error::Output(format!("failed to write {}: {e}", path.display())))
}
