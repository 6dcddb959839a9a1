//! Total conversions from raw cells to numbers, names and labels.
//!
//! None of these functions fail: dirty data degrades to a default value.

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::Cell;

static NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[-+]?\d+(?:[.,]\d+)?").expect("static number pattern"));

/// Placeholder used when the single-profile flow finds no name.
pub const DEFAULT_PERSON_NAME: &str = "Person";

/// Converts a cell to a finite number.
///
/// * numbers are returned as they are (non-finite floats become 0)
/// * empty or absent cells are 0
/// * for text, the first signed integer or decimal is extracted, with `,`
///   accepted as the decimal separator. Text without any number is 0.
///
/// ```
/// use profile_match::{coerce_number, Cell};
/// assert_eq!(coerce_number(Some(&Cell::Text("80,5%".to_string()))), 80.5);
/// assert_eq!(coerce_number(None), 0.0);
/// ```
pub fn coerce_number(cell: Option<&Cell>) -> f64 {
    match cell {
        Some(Cell::Number(x)) if x.is_finite() => *x,
        Some(Cell::Number(x)) => {
            debug!("coerce_number: non-finite value {:?} replaced by 0", x);
            0.0
        }
        Some(Cell::Text(s)) => parse_first_number(s),
        Some(Cell::Empty) | None => 0.0,
    }
}

fn parse_first_number(s: &str) -> f64 {
    let m = match NUMBER_RE.find(s) {
        Some(m) => m,
        None => {
            if !s.trim().is_empty() {
                debug!("parse_first_number: no number in {:?}", s);
            }
            return 0.0;
        }
    };
    let normalized = m.as_str().replace(',', ".");
    match normalized.parse::<f64>() {
        Ok(x) if x.is_finite() => x,
        // Only reachable for absurdly long digit runs.
        _ => 0.0,
    }
}

// The trimmed text of a non-blank cell. Numbers are printed.
fn cell_text(cell: Option<&Cell>) -> Option<String> {
    match cell {
        Some(c) if c.is_blank() => None,
        Some(Cell::Text(s)) => Some(s.trim().to_string()),
        Some(Cell::Number(x)) => Some(format_number(*x)),
        _ => None,
    }
}

/// The display name of a person, or `None` when the cell is blank.
pub fn resolve_name(cell: Option<&Cell>) -> Option<String> {
    cell_text(cell)
}

/// A competency label from the header row.
///
/// `position` is 1-based; it names the placeholder `Comp <position>` used for
/// blank header cells.
pub fn resolve_label(cell: Option<&Cell>, position: usize) -> String {
    cell_text(cell).unwrap_or_else(|| format!("Comp {}", position))
}

// Integral values print without a trailing ".0".
fn format_number(x: f64) -> String {
    if x.fract() == 0.0 && x.abs() < 1e15 {
        format!("{}", x as i64)
    } else {
        x.to_string()
    }
}
