//! Loader for TSPLIB-style coordinate files.
//!
//! Only the subset needed for 2-D Euclidean instances is understood:
//!
//! ```text
//! NAME : square4
//! TYPE : TSP
//! DIMENSION : 4
//! EDGE_WEIGHT_TYPE : EUC_2D
//! NODE_COORD_SECTION
//! 1 0.0 0.0
//! 2 1.0 0.0
//! 3 1.0 1.0
//! 4 0.0 1.0
//! EOF
//! ```
//!
//! The `EDGE_WEIGHT_TYPE : EUC_2D` header is required. Other header keys are
//! ignored. Header lines may use `KEY : VALUE` or `KEY VALUE`.
//! Coordinates must be finite.

use super::city::City;
use crate::error::{AcoError, AcoResult};
use std::path::Path;

/// A parsed coordinate file.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TsplibInstance {
    /// Value of the `NAME` header, if present.
    pub name: Option<String>,
    /// Cities in file order.
    pub cities: Vec<City>,
}

/// Reads and parses a coordinate file from disk.
pub fn load(path: impl AsRef<Path>) -> AcoResult<TsplibInstance> {
    let text = std::fs::read_to_string(path)?;
    parse_str(&text)
}

/// Parses coordinate-file text.
///
/// # Errors
///
/// - [`AcoError::UnsupportedEdgeWeight`] for any `EDGE_WEIGHT_TYPE` but `EUC_2D`,
///   or when the header is missing (reported with an empty value)
/// - [`AcoError::Parse`] for malformed headers or records, non-finite
///   coordinates, a missing `NODE_COORD_SECTION`, or fewer records than
///   `DIMENSION` declares
pub fn parse_str(text: &str) -> AcoResult<TsplibInstance> {
    let mut name = None;
    let mut dimension: Option<usize> = None;
    let mut cities = Vec::new();
    let mut in_coords = false;
    let mut edge_weight_seen = false;
    let mut last_line = 0;

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        last_line = line_no;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        if line == "EOF" {
            break;
        }

        if !in_coords {
            if line.starts_with("NODE_COORD_SECTION") {
                in_coords = true;
                continue;
            }
            let (key, value) = split_header(line);
            match key.as_str() {
                "NAME" => name = Some(value.to_string()),
                "DIMENSION" => {
                    let dim = value.parse::<usize>().map_err(|_| AcoError::Parse {
                        line: line_no,
                        message: format!("invalid DIMENSION `{value}`"),
                    })?;
                    dimension = Some(dim);
                }
                "EDGE_WEIGHT_TYPE" => {
                    if value != "EUC_2D" {
                        return Err(AcoError::UnsupportedEdgeWeight(value.to_string()));
                    }
                    edge_weight_seen = true;
                }
                _ => {}
            }
            continue;
        }

        if dimension.is_some_and(|d| cities.len() >= d) {
            break;
        }
        cities.push(parse_record(line, line_no)?);
    }

    if !in_coords {
        return Err(AcoError::Parse {
            line: last_line,
            message: "missing NODE_COORD_SECTION".into(),
        });
    }
    if !edge_weight_seen {
        return Err(AcoError::UnsupportedEdgeWeight(String::new()));
    }
    if let Some(d) = dimension {
        if cities.len() < d {
            return Err(AcoError::Parse {
                line: last_line,
                message: format!("DIMENSION is {d} but only {} records found", cities.len()),
            });
        }
    }

    Ok(TsplibInstance { name, cities })
}

fn split_header(line: &str) -> (String, &str) {
    match line.split_once(':') {
        Some((k, v)) => (k.trim().to_ascii_uppercase(), v.trim()),
        None => match line.split_once(char::is_whitespace) {
            Some((k, v)) => (k.trim().to_ascii_uppercase(), v.trim()),
            None => (line.to_ascii_uppercase(), ""),
        },
    }
}

fn parse_record(line: &str, line_no: usize) -> AcoResult<City> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 3 {
        return Err(AcoError::Parse {
            line: line_no,
            message: format!("expected `id x y`, got `{line}`"),
        });
    }
    let bad = |what: &str, tok: &str| AcoError::Parse {
        line: line_no,
        message: format!("invalid {what} `{tok}`"),
    };
    let id = fields[0].parse::<i64>().map_err(|_| bad("id", fields[0]))?;
    let x = fields[1].parse::<f64>().map_err(|_| bad("x coordinate", fields[1]))?;
    let y = fields[2].parse::<f64>().map_err(|_| bad("y coordinate", fields[2]))?;
    if !x.is_finite() {
        return Err(bad("x coordinate", fields[1]));
    }
    if !y.is_finite() {
        return Err(bad("y coordinate", fields[2]));
    }
    Ok(City::new(id, x, y))
}
