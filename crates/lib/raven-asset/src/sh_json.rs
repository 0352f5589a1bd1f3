//! SH coefficients as JSON: an array of nine `[r, g, b]` arrays in basis order.

use serde_json::Value;

use raven_ibl::ShCoefficients;
use raven_math::{ColorAccess, DVec3};

use crate::ShJsonError;

pub fn to_json_string(sh: &ShCoefficients) -> String {
    let rows = sh.iter()
        .map(|c| Value::from(vec![c.r(), c.g(), c.b()]))
        .collect::<Vec<_>>();

    Value::Array(rows).to_string()
}

pub fn from_json_str(json: &str) -> Result<ShCoefficients, ShJsonError> {
    let value: Value = serde_json::from_str(json)?;

    let rows = match value.as_array() {
        Some(rows) if rows.len() == ShCoefficients::COUNT => rows,
        Some(rows) => return Err(ShJsonError::CoefficientCount(rows.len())),
        None => return Err(ShJsonError::CoefficientCount(0)),
    };

    let mut sh = ShCoefficients::zero();
    for (index, row) in rows.iter().enumerate() {
        let channels = row.as_array()
            .filter(|channels| channels.len() == 3)
            .ok_or(ShJsonError::BadCoefficient { index })?;

        let mut rgb = [0.0; 3];
        for (c, channel) in rgb.iter_mut().zip(channels) {
            *c = channel.as_f64().ok_or(ShJsonError::BadCoefficient { index })?;
        }
        sh[index] = DVec3::from_rgb(rgb[0], rgb[1], rgb[2]);
    }
    Ok(sh)
}
