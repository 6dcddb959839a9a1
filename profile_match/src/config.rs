// ********* Input data structures ***********

use std::fmt::Display;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// A raw spreadsheet cell, before any interpretation.
///
/// The readers (CSV, Excel) produce these; the engine never sees the
/// original file format.
#[derive(PartialEq, Debug, Clone)]
pub enum Cell {
    Number(f64),
    Text(String),
    Empty,
}

impl Cell {
    /// True for empty cells and for text made only of whitespace.
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Number(_) => false,
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Cell {
        if s.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(s.to_string())
        }
    }
}

impl From<f64> for Cell {
    fn from(x: f64) -> Cell {
        Cell::Number(x)
    }
}

/// Row-major grid of cells, row 0 at the top of the sheet.
///
/// Rows may have different lengths. A cell past the end of a row is
/// treated as empty.
pub type Grid = Vec<Vec<Cell>>;

// ********* Layout **********

/// The fixed positions of the export template. All indices are 0-based.
pub struct SheetLayout;

impl SheetLayout {
    pub const HEADER_ROW: usize = 0;
    pub const REFERENCE_ROW: usize = 1;
    pub const FIRST_PERSON_ROW: usize = 2;
    pub const MIN_ROWS: usize = 3;

    pub const NAME_COL: usize = 1;
    pub const BEHAVIORAL_OBSERVED: RangeInclusive<usize> = 8..=11;
    pub const APTITUDE_OBSERVED: RangeInclusive<usize> = 12..=16;
    pub const BEHAVIORAL_MATCH_COL: usize = 20;
    pub const APTITUDE_MATCH_COL: usize = 21;
    pub const COMPETENCY_START: usize = 24;
    pub const BEHAVIORAL_IDEAL: RangeInclusive<usize> = 31..=34;
    pub const APTITUDE_IDEAL: RangeInclusive<usize> = 36..=40;
}

/// How many competency columns the template carries.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum CompetencySpan {
    Six,
    Seven,
}

impl CompetencySpan {
    pub fn count(&self) -> usize {
        match self {
            CompetencySpan::Six => 6,
            CompetencySpan::Seven => 7,
        }
    }

    pub fn columns(&self) -> RangeInclusive<usize> {
        SheetLayout::COMPETENCY_START..=SheetLayout::COMPETENCY_START + self.count() - 1
    }

    pub fn from_count(count: usize) -> Option<CompetencySpan> {
        match count {
            6 => Some(CompetencySpan::Six),
            7 => Some(CompetencySpan::Seven),
            _ => None,
        }
    }
}

/// The layout variants found in exported sheets.
///
/// The variant decides where the behavioral and aptitude ideals come from,
/// and how wide the competency block is. The competency ideal always comes
/// from the reference row.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum LayoutVariant {
    /// Every person row repeats the ideal at the ideal columns.
    PerPersonIdeal { competencies: CompetencySpan },
    /// The ideal is read once from the reference row (row 1).
    ReferenceRowIdeal { competencies: CompetencySpan },
}

impl LayoutVariant {
    pub const DEFAULT: LayoutVariant = LayoutVariant::PerPersonIdeal {
        competencies: CompetencySpan::Seven,
    };

    pub fn competencies(&self) -> CompetencySpan {
        match self {
            LayoutVariant::PerPersonIdeal { competencies } => *competencies,
            LayoutVariant::ReferenceRowIdeal { competencies } => *competencies,
        }
    }

    /// Same ideal source, different competency span.
    pub fn with_competencies(self, competencies: CompetencySpan) -> LayoutVariant {
        match self {
            LayoutVariant::PerPersonIdeal { .. } => LayoutVariant::PerPersonIdeal { competencies },
            LayoutVariant::ReferenceRowIdeal { .. } => {
                LayoutVariant::ReferenceRowIdeal { competencies }
            }
        }
    }

    /// The configuration token for the ideal source.
    pub fn ideal_source(&self) -> &'static str {
        match self {
            LayoutVariant::PerPersonIdeal { .. } => "per-person",
            LayoutVariant::ReferenceRowIdeal { .. } => "reference-row",
        }
    }
}

impl Default for LayoutVariant {
    fn default() -> Self {
        LayoutVariant::DEFAULT
    }
}

impl Display for LayoutVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({} competencies)",
            self.ideal_source(),
            self.competencies().count()
        )
    }
}

/// Parses the ideal source token. The competency span defaults to seven.
impl FromStr for LayoutVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "per-person" | "perPerson" => Ok(LayoutVariant::PerPersonIdeal {
                competencies: CompetencySpan::Seven,
            }),
            "reference-row" | "referenceRow" => Ok(LayoutVariant::ReferenceRowIdeal {
                competencies: CompetencySpan::Seven,
            }),
            x => Err(format!(
                "unknown ideal source {:?} (expected per-person or reference-row)",
                x
            )),
        }
    }
}

// ********* Dimensions **********

pub const BEHAVIORAL_LABELS: [&str; 4] = ["D", "I", "S", "C"];
pub const APTITUDE_LABELS: [&str; 5] = ["Verbal", "Spatial", "Logical", "Numerical", "Abstract"];

/// The three sub-profiles of an assessment.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Dimension {
    Behavioral,
    Aptitude,
    Competency,
}

impl Dimension {
    pub const ALL: [Dimension; 3] = [
        Dimension::Behavioral,
        Dimension::Aptitude,
        Dimension::Competency,
    ];
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum Series {
    Observed,
    Ideal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn competency_columns() {
        assert_eq!(CompetencySpan::Six.columns(), 24..=29);
        assert_eq!(CompetencySpan::Seven.columns(), 24..=30);
        assert_eq!(CompetencySpan::from_count(5), None);
    }

    #[test]
    fn variant_tokens() {
        let v: LayoutVariant = "reference-row".parse().unwrap();
        assert_eq!(
            v.with_competencies(CompetencySpan::Six),
            LayoutVariant::ReferenceRowIdeal {
                competencies: CompetencySpan::Six
            }
        );
        assert_eq!(
            "per-person".parse::<LayoutVariant>().unwrap(),
            LayoutVariant::DEFAULT
        );
        assert!("sideways".parse::<LayoutVariant>().is_err());
        assert_eq!(
            LayoutVariant::DEFAULT.to_string(),
            "per-person (7 competencies)"
        );
    }

    #[test]
    fn blank_cells() {
        assert!(Cell::Empty.is_blank());
        assert!(Cell::Text("  ".to_string()).is_blank());
        assert!(!Cell::Number(0.0).is_blank());
        assert_eq!(Cell::from(""), Cell::Empty);
    }
}
