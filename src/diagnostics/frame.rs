//! Observation tables with Polars
//!
//! Loads CSV/Parquet observation tables and converts DataFrame rows into
//! observations with the same validation rules as the JSON path.

use std::path::Path;

use anyhow::{Context, Result as AnyResult};
use polars::prelude::*;

use crate::diagnostics::types::{CropType, Observation};
use crate::error::{DiagnosticError, Result};

/// Columns every table must carry
pub const REQUIRED_COLUMNS: [&str; 5] = ["type", "plant", "withered_crops", "crop_yield", "net_yield"];

/// Load an observation table, picking the reader from the file extension
pub fn load_observation_table(path: &Path) -> AnyResult<DataFrame> {
    let is_parquet = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("parquet"))
        .unwrap_or(false);

    if is_parquet {
        let file = std::fs::File::open(path)
            .with_context(|| format!("Failed to open parquet file: {}", path.display()))?;
        ParquetReader::new(file)
            .finish()
            .with_context(|| format!("Failed to load parquet: {}", path.display()))
    } else {
        CsvReadOptions::default()
            .with_has_header(true)
            .try_into_reader_with_file_path(Some(path.to_path_buf()))
            .with_context(|| format!("Failed to create CSV reader: {}", path.display()))?
            .finish()
            .with_context(|| format!("Failed to load CSV: {}", path.display()))
    }
}

fn float_column(df: &DataFrame, name: &str) -> Result<Column> {
    df.column(name)
        .map_err(|_| DiagnosticError::missing(name, None))?
        .cast(&DataType::Float64)
        .map_err(|e| DiagnosticError::malformed(name, None, e.to_string()))
}

fn row_value(values: &Float64Chunked, name: &str, idx: usize) -> Result<f64> {
    match values.get(idx) {
        Some(v) if v.is_finite() => Ok(v),
        _ => Err(DiagnosticError::malformed(name, Some(idx), "missing or non-numeric value")),
    }
}

fn to_polars_err(name: &str, e: PolarsError) -> DiagnosticError {
    DiagnosticError::malformed(name, None, e.to_string())
}

/// Convert a DataFrame into observations, in row order.
///
/// Numeric columns are cast to Float64; values that fail the cast become
/// null and are reported with their row index. `planted_qty` may be absent
/// as long as no Type B row needs it.
pub fn observations_from_frame(df: &DataFrame) -> Result<Vec<Observation>> {
    for name in REQUIRED_COLUMNS {
        if df.column(name).is_err() {
            return Err(DiagnosticError::missing(name, None));
        }
    }

    let type_col = float_column(df, "type")?;
    let withered_col = float_column(df, "withered_crops")?;
    let yield_col = float_column(df, "crop_yield")?;
    let net_col = float_column(df, "net_yield")?;
    let planted_col = match df.column("planted_qty") {
        Ok(_) => Some(float_column(df, "planted_qty")?),
        Err(_) => None,
    };
    let plant_col = df
        .column("plant")
        .and_then(|c| c.cast(&DataType::String))
        .map_err(|e| to_polars_err("plant", e))?;

    let types = type_col.f64().map_err(|e| to_polars_err("type", e))?;
    let withered = withered_col.f64().map_err(|e| to_polars_err("withered_crops", e))?;
    let yields = yield_col.f64().map_err(|e| to_polars_err("crop_yield", e))?;
    let nets = net_col.f64().map_err(|e| to_polars_err("net_yield", e))?;
    let planted = match &planted_col {
        Some(c) => Some(c.f64().map_err(|e| to_polars_err("planted_qty", e))?),
        None => None,
    };
    let plants = plant_col.str().map_err(|e| to_polars_err("plant", e))?;

    let mut observations = Vec::with_capacity(df.height());

    for idx in 0..df.height() {
        let code = row_value(types, "type", idx)?;
        let crop_type = CropType::from_code(code).ok_or_else(|| DiagnosticError::UnrecognizedCategory {
            index: idx,
            value: code.to_string(),
        })?;

        let plant_name = plants
            .get(idx)
            .ok_or_else(|| DiagnosticError::missing("plant", Some(idx)))?
            .to_string();

        let planted_qty = match (crop_type, planted) {
            (CropType::TypeB, Some(values)) => Some(row_value(values, "planted_qty", idx)?),
            (CropType::TypeB, None) => return Err(DiagnosticError::missing("planted_qty", Some(idx))),
            (CropType::TypeA, Some(values)) => values.get(idx).filter(|v| v.is_finite()),
            (CropType::TypeA, None) => None,
        };

        observations.push(Observation {
            plant_name,
            crop_type,
            withered_crops: row_value(withered, "withered_crops", idx)?,
            crop_yield: row_value(yields, "crop_yield", idx)?,
            net_yield: row_value(nets, "net_yield", idx)?,
            planted_qty,
        });
    }

    tracing::debug!("Converted {} rows into observations", observations.len());
    Ok(observations)
}
