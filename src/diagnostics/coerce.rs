//! Type coercion from loosely typed JSON rows into observations
//!
//! Numeric fields accept JSON numbers or numeric strings. Everything else is
//! a MalformedInput error that names the field and row.

use serde_json::{Map, Value};

use crate::diagnostics::types::{CropType, Observation};
use crate::error::{DiagnosticError, Result};

/// Read a required numeric field
pub fn number_field(row: &Map<String, Value>, field: &str, index: Option<usize>) -> Result<f64> {
    match row.get(field) {
        None | Some(Value::Null) => Err(DiagnosticError::missing(field, index)),
        Some(value) => coerce_number(value, field, index),
    }
}

/// Read an optional numeric field; present-but-garbage is still an error
pub fn optional_number_field(row: &Map<String, Value>, field: &str, index: Option<usize>) -> Result<Option<f64>> {
    match row.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => coerce_number(value, field, index).map(Some),
    }
}

fn coerce_number(value: &Value, field: &str, index: Option<usize>) -> Result<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match parsed {
        Some(v) if v.is_finite() => Ok(v),
        _ => Err(DiagnosticError::malformed(
            field,
            index,
            format!("expected a number, got {}", value),
        )),
    }
}

/// Plant names are informational; numbers are accepted and stringified
fn plant_field(row: &Map<String, Value>, index: usize) -> Result<String> {
    match row.get("plant") {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        None | Some(Value::Null) => Err(DiagnosticError::missing("plant", Some(index))),
        Some(other) => Err(DiagnosticError::malformed(
            "plant",
            Some(index),
            format!("expected a string, got {}", other),
        )),
    }
}

/// Decode the crop type code. A value that is numeric but outside {1, 0}
/// is an unrecognized category rather than malformed input.
pub fn crop_type_field(row: &Map<String, Value>, index: usize) -> Result<CropType> {
    let code = number_field(row, "type", Some(index))?;
    CropType::from_code(code).ok_or_else(|| DiagnosticError::UnrecognizedCategory {
        index,
        value: code.to_string(),
    })
}

/// Coerce one batch row.
///
/// `planted_qty` is required only for Type B rows.
pub fn observation_from_json(index: usize, value: &Value) -> Result<Observation> {
    let row = value.as_object().ok_or_else(|| {
        DiagnosticError::malformed("observation", Some(index), "expected a JSON object")
    })?;

    let crop_type = crop_type_field(row, index)?;
    let plant_name = plant_field(row, index)?;
    let withered_crops = number_field(row, "withered_crops", Some(index))?;
    let crop_yield = number_field(row, "crop_yield", Some(index))?;
    let net_yield = number_field(row, "net_yield", Some(index))?;

    let planted_qty = match crop_type {
        CropType::TypeB => Some(number_field(row, "planted_qty", Some(index))?),
        CropType::TypeA => optional_number_field(row, "planted_qty", Some(index))?,
    };

    Ok(Observation {
        plant_name,
        crop_type,
        withered_crops,
        crop_yield,
        net_yield,
        planted_qty,
    })
}

/// Coerce a whole batch. The first bad row fails the batch.
pub fn observations_from_json(body: &Value) -> Result<Vec<Observation>> {
    let rows = body.as_array().ok_or_else(|| {
        DiagnosticError::malformed("body", None, "expected a JSON array of observations")
    })?;

    rows.iter()
        .enumerate()
        .map(|(index, row)| observation_from_json(index, row))
        .collect()
}
