/*!
Extraction and match scoring for psychometric assessment sheets.

The input is a sheet exported from a fixed template: a header row with the
competency names, a reference row with the ideal competency scores, and one
row per assessed person. This crate turns the raw cells of such a sheet into
[`Profile`] values and scores how closely each person matches the ideal.

```
use profile_match::*;

let mut header = vec![Cell::Empty; 41];
header[24] = Cell::from("Teamwork");
let reference = vec![Cell::Number(50.0); 41];
let mut person = vec![Cell::Number(40.0); 41];
person[1] = Cell::from("Alice");

let profiles = ingest(&vec![header, reference, person], LayoutVariant::DEFAULT)?;
assert_eq!(profiles[0].person_name, "Alice");
assert_eq!(profiles[0].competency_labels[0], "Teamwork");

let m = profiles[0].resolved_match(Dimension::Competency);
assert!((m.percentage - 80.0).abs() < 1e-9);
assert_eq!(m.tier, MatchTier::Good);
# Ok::<(), IngestError>(())
```

See the [`manual`] for the layout of the template.
*/
mod coerce;
mod config;
pub mod manual;
mod scoring;

use log::{debug, info};
use serde::{Deserialize, Serialize};
use snafu::{ensure, Snafu};
use std::ops::RangeInclusive;

pub use crate::coerce::*;
pub use crate::config::*;
pub use crate::scoring::*;

// ******** Errors *********

/// Errors that abort the ingestion of a whole sheet.
#[derive(Eq, PartialEq, Debug, Clone, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum IngestError {
    #[snafu(display(
        "file too short: expected at least {} rows (header, ideal, one person), found {rows}",
        SheetLayout::MIN_ROWS
    ))]
    TooShort { rows: usize },
    #[snafu(display("no valid profiles found"))]
    NoValidProfiles {},
}

pub type IngestResult<T> = Result<T, IngestError>;

/// Errors when overwriting a value of an existing profile.
#[derive(PartialEq, Debug, Clone, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum EditError {
    #[snafu(display("index {index} is out of range for {dimension:?} (length {len})"))]
    OutOfRange {
        dimension: Dimension,
        index: usize,
        len: usize,
    },
    #[snafu(display("value {value} is not a finite number"))]
    NotFinite { value: f64 },
}

// ******** Profile *********

/// The assessment result of one person.
///
/// Invariants (checked by [`Profile::validate`]): 4 behavioral and 5 aptitude
/// values in both series, competency labels and values of equal length, all
/// values finite.
#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub person_name: String,
    pub behavioral_observed: Vec<f64>,
    pub behavioral_ideal: Vec<f64>,
    pub aptitude_observed: Vec<f64>,
    pub aptitude_ideal: Vec<f64>,
    pub competency_labels: Vec<String>,
    pub competency_observed: Vec<f64>,
    pub competency_ideal: Vec<f64>,
    /// Match percentage found in the sheet; 0 when absent.
    pub behavioral_match_pct: f64,
    /// Match percentage found in the sheet; 0 when absent.
    pub aptitude_match_pct: f64,
}

impl Profile {
    pub fn observed(&self, dim: Dimension) -> &[f64] {
        match dim {
            Dimension::Behavioral => &self.behavioral_observed,
            Dimension::Aptitude => &self.aptitude_observed,
            Dimension::Competency => &self.competency_observed,
        }
    }

    pub fn ideal(&self, dim: Dimension) -> &[f64] {
        match dim {
            Dimension::Behavioral => &self.behavioral_ideal,
            Dimension::Aptitude => &self.aptitude_ideal,
            Dimension::Competency => &self.competency_ideal,
        }
    }

    pub fn labels(&self, dim: Dimension) -> Vec<String> {
        match dim {
            Dimension::Behavioral => BEHAVIORAL_LABELS.iter().map(|s| s.to_string()).collect(),
            Dimension::Aptitude => APTITUDE_LABELS.iter().map(|s| s.to_string()).collect(),
            Dimension::Competency => self.competency_labels.clone(),
        }
    }

    /// The match for one dimension.
    ///
    /// Behavioral and aptitude prefer the percentage found in the sheet and
    /// fall back to the computed one when the sheet had none. Competencies
    /// are always computed.
    pub fn resolved_match(&self, dim: Dimension) -> ResolvedMatch {
        let (observed, ideal) = (self.observed(dim), self.ideal(dim));
        match dim {
            Dimension::Behavioral => {
                ResolvedMatch::prefer_sheet(self.behavioral_match_pct, observed, ideal)
            }
            Dimension::Aptitude => {
                ResolvedMatch::prefer_sheet(self.aptitude_match_pct, observed, ideal)
            }
            Dimension::Competency => ResolvedMatch::computed(observed, ideal),
        }
    }

    pub fn details(&self, dim: Dimension) -> Vec<AxisDetail> {
        axis_details(&self.labels(dim), self.observed(dim), self.ideal(dim))
    }

    /// Overwrites one value in place. The lengths never change.
    pub fn set_value(
        &mut self,
        dimension: Dimension,
        series: Series,
        index: usize,
        value: f64,
    ) -> Result<(), EditError> {
        ensure!(value.is_finite(), NotFiniteSnafu { value });
        let values = match (dimension, series) {
            (Dimension::Behavioral, Series::Observed) => &mut self.behavioral_observed,
            (Dimension::Behavioral, Series::Ideal) => &mut self.behavioral_ideal,
            (Dimension::Aptitude, Series::Observed) => &mut self.aptitude_observed,
            (Dimension::Aptitude, Series::Ideal) => &mut self.aptitude_ideal,
            (Dimension::Competency, Series::Observed) => &mut self.competency_observed,
            (Dimension::Competency, Series::Ideal) => &mut self.competency_ideal,
        };
        let len = values.len();
        match values.get_mut(index) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => OutOfRangeSnafu {
                dimension,
                index,
                len,
            }
            .fail(),
        }
    }

    /// Checks the length and finiteness invariants.
    pub fn validate(&self) -> bool {
        let n = self.competency_labels.len();
        let lengths_ok = self.behavioral_observed.len() == BEHAVIORAL_LABELS.len()
            && self.behavioral_ideal.len() == BEHAVIORAL_LABELS.len()
            && self.aptitude_observed.len() == APTITUDE_LABELS.len()
            && self.aptitude_ideal.len() == APTITUDE_LABELS.len()
            && self.competency_observed.len() == n
            && self.competency_ideal.len() == n;
        let finite = Dimension::ALL.iter().all(|d| {
            self.observed(*d).iter().all(|x| x.is_finite())
                && self.ideal(*d).iter().all(|x| x.is_finite())
        }) && self.behavioral_match_pct.is_finite()
            && self.aptitude_match_pct.is_finite();
        lengths_ok && finite && !self.person_name.is_empty()
    }
}

// ******** Ingestion *********

// The parts of the sheet shared by all the person rows.
struct SheetContext {
    competency_columns: RangeInclusive<usize>,
    competency_labels: Vec<String>,
    competency_ideal: Vec<f64>,
    // Only set for the reference-row variant.
    shared_ideal: Option<(Vec<f64>, Vec<f64>)>,
}

fn read_range(row: &[Cell], cols: RangeInclusive<usize>) -> Vec<f64> {
    cols.map(|c| coerce_number(row.get(c))).collect()
}

fn sheet_context(grid: &[Vec<Cell>], variant: LayoutVariant) -> IngestResult<SheetContext> {
    ensure!(
        grid.len() >= SheetLayout::MIN_ROWS,
        TooShortSnafu { rows: grid.len() }
    );
    let header = &grid[SheetLayout::HEADER_ROW];
    let reference = &grid[SheetLayout::REFERENCE_ROW];
    let comp_cols = variant.competencies().columns();

    let competency_labels: Vec<String> = comp_cols
        .clone()
        .enumerate()
        .map(|(idx, c)| resolve_label(header.get(c), idx + 1))
        .collect();
    let competency_ideal = read_range(reference, comp_cols.clone());
    debug!(
        "sheet_context: competencies {:?} ideal {:?}",
        competency_labels, competency_ideal
    );

    let shared_ideal = match variant {
        LayoutVariant::PerPersonIdeal { .. } => None,
        LayoutVariant::ReferenceRowIdeal { .. } => Some((
            read_range(reference, SheetLayout::BEHAVIORAL_IDEAL),
            read_range(reference, SheetLayout::APTITUDE_IDEAL),
        )),
    };

    Ok(SheetContext {
        competency_columns: comp_cols,
        competency_labels,
        competency_ideal,
        shared_ideal,
    })
}

fn build_profile(ctx: &SheetContext, row: &[Cell], person_name: String) -> Profile {
    let (behavioral_ideal, aptitude_ideal) = match &ctx.shared_ideal {
        Some((b, a)) => (b.clone(), a.clone()),
        None => (
            read_range(row, SheetLayout::BEHAVIORAL_IDEAL),
            read_range(row, SheetLayout::APTITUDE_IDEAL),
        ),
    };
    Profile {
        person_name,
        behavioral_observed: read_range(row, SheetLayout::BEHAVIORAL_OBSERVED),
        behavioral_ideal,
        aptitude_observed: read_range(row, SheetLayout::APTITUDE_OBSERVED),
        aptitude_ideal,
        competency_labels: ctx.competency_labels.clone(),
        competency_observed: read_range(row, ctx.competency_columns.clone()),
        competency_ideal: ctx.competency_ideal.clone(),
        behavioral_match_pct: coerce_number(row.get(SheetLayout::BEHAVIORAL_MATCH_COL)),
        aptitude_match_pct: coerce_number(row.get(SheetLayout::APTITUDE_MATCH_COL)),
    }
}

/// Extracts one profile per person row of the sheet, in row order.
///
/// Rows with a blank name are skipped. Fails when the sheet has fewer than
/// three rows, or when no person row has a name.
pub fn ingest(grid: &[Vec<Cell>], variant: LayoutVariant) -> IngestResult<Vec<Profile>> {
    info!(
        "ingest: processing {} rows with layout {}",
        grid.len(),
        variant
    );
    let ctx = sheet_context(grid, variant)?;

    let mut res: Vec<Profile> = Vec::new();
    for (idx, row) in grid.iter().enumerate().skip(SheetLayout::FIRST_PERSON_ROW) {
        let name = match resolve_name(row.get(SheetLayout::NAME_COL)) {
            Some(name) => name,
            None => {
                debug!("ingest: row {}: blank name, skipping", idx);
                continue;
            }
        };
        let profile = build_profile(&ctx, row, name);
        debug!("ingest: row {}: {:?}", idx, profile);
        res.push(profile);
    }

    ensure!(!res.is_empty(), NoValidProfilesSnafu {});
    info!("ingest: {} profiles", res.len());
    Ok(res)
}

/// Extracts the profile of the first person row only.
///
/// A blank name is replaced by [`DEFAULT_PERSON_NAME`]; the row is never
/// skipped.
pub fn ingest_single(grid: &[Vec<Cell>], variant: LayoutVariant) -> IngestResult<Profile> {
    let ctx = sheet_context(grid, variant)?;
    let row = &grid[SheetLayout::FIRST_PERSON_ROW];
    let name = resolve_name(row.get(SheetLayout::NAME_COL))
        .unwrap_or_else(|| DEFAULT_PERSON_NAME.to_string());
    Ok(build_profile(&ctx, row, name))
}

/// Holds the profiles of the last successful upload.
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    profiles: Vec<Profile>,
}

impl Dashboard {
    pub fn new() -> Dashboard {
        Dashboard::default()
    }

    /// Replaces the current profiles with the ones of `grid`.
    ///
    /// On error the current profiles are kept as they are.
    pub fn load(&mut self, grid: &[Vec<Cell>], variant: LayoutVariant) -> IngestResult<usize> {
        let profiles = ingest(grid, variant)?;
        self.profiles = profiles;
        Ok(self.profiles.len())
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn profile_mut(&mut self, idx: usize) -> Option<&mut Profile> {
        self.profiles.get_mut(idx)
    }
}
