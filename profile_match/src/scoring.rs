//! Match scoring between an observed vector and an ideal vector.

use serde::Serialize;

/// Differences smaller than this are shown as exactly zero.
pub const DIFF_EPSILON: f64 = 0.05;

const GOOD_THRESHOLD: f64 = 80.0;
const WARNING_THRESHOLD: f64 = 60.0;

/// How closely `observed` satisfies `ideal`, as a percentage in `[0, 100]`.
///
/// Each axis contributes 1 when the ideal is 0 or when the observed value
/// reaches the ideal, and `observed / ideal` otherwise (clamped to `[0, 1]`).
/// The result is the mean contribution times 100. Empty or mismatched
/// vectors score 0.
///
/// ```
/// use profile_match::match_percentage;
/// let m = match_percentage(&[80.0, 60.0, 40.0, 90.0], &[70.0, 70.0, 50.0, 80.0]);
/// assert!((m - 91.43).abs() < 0.01);
/// ```
pub fn match_percentage(observed: &[f64], ideal: &[f64]) -> f64 {
    if observed.is_empty() || observed.len() != ideal.len() {
        return 0.0;
    }
    let total: f64 = observed
        .iter()
        .zip(ideal.iter())
        .map(|(o, i)| axis_contribution(*o, *i))
        .sum();
    let pct = total / observed.len() as f64 * 100.0;
    pct.clamp(0.0, 100.0)
}

fn axis_contribution(observed: f64, ideal: f64) -> f64 {
    if ideal == 0.0 || observed >= ideal {
        1.0
    } else {
        (observed / ideal).clamp(0.0, 1.0)
    }
}

/// Qualitative reading of a match percentage.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchTier {
    Good,
    Warning,
    Bad,
}

impl MatchTier {
    pub fn from_percentage(pct: f64) -> MatchTier {
        if pct >= GOOD_THRESHOLD {
            MatchTier::Good
        } else if pct >= WARNING_THRESHOLD {
            MatchTier::Warning
        } else {
            MatchTier::Bad
        }
    }

    /// The token used by the presentation layer as a display class.
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchTier::Good => "good",
            MatchTier::Warning => "warning",
            MatchTier::Bad => "bad",
        }
    }
}

/// Where a resolved match percentage comes from.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchSource {
    /// Pre-computed in the sheet.
    Sheet,
    /// Computed with [`match_percentage`].
    Computed,
}

#[derive(PartialEq, Debug, Clone, Copy, Serialize)]
pub struct ResolvedMatch {
    pub percentage: f64,
    pub tier: MatchTier,
    pub source: MatchSource,
}

impl ResolvedMatch {
    pub fn computed(observed: &[f64], ideal: &[f64]) -> ResolvedMatch {
        let percentage = match_percentage(observed, ideal);
        ResolvedMatch {
            percentage,
            tier: MatchTier::from_percentage(percentage),
            source: MatchSource::Computed,
        }
    }

    /// The sheet value when it is present, the computed value otherwise.
    ///
    /// A sheet value of 0 is the placeholder for a missing or unparseable
    /// cell and does not count as present. Neither does a value outside
    /// `(0, 100]`.
    pub fn prefer_sheet(sheet_pct: f64, observed: &[f64], ideal: &[f64]) -> ResolvedMatch {
        if sheet_pct > 0.0 && sheet_pct <= 100.0 {
            ResolvedMatch {
                percentage: sheet_pct,
                tier: MatchTier::from_percentage(sheet_pct),
                source: MatchSource::Sheet,
            }
        } else {
            ResolvedMatch::computed(observed, ideal)
        }
    }
}

/// One row of the per-axis comparison shown next to a chart.
#[derive(PartialEq, Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisDetail {
    pub label: String,
    pub observed: f64,
    pub ideal: f64,
    /// `observed - ideal`, snapped to 0 below [`DIFF_EPSILON`].
    pub signed_diff: f64,
    pub abs_diff: f64,
    /// The observed value reaches the ideal.
    pub favorable: bool,
    /// Per-axis match in `[0, 100]`; 100 when the ideal is 0.
    pub axis_match_pct: f64,
}

pub fn axis_detail(label: &str, observed: f64, ideal: f64) -> AxisDetail {
    let raw = observed - ideal;
    let signed_diff = if raw.abs() < DIFF_EPSILON { 0.0 } else { raw };
    let axis_match_pct = if ideal == 0.0 {
        100.0
    } else {
        (observed / ideal * 100.0).clamp(0.0, 100.0)
    };
    AxisDetail {
        label: label.to_string(),
        observed,
        ideal,
        signed_diff,
        abs_diff: signed_diff.abs(),
        favorable: signed_diff >= 0.0,
        axis_match_pct,
    }
}

/// Detail rows for parallel label / observed / ideal slices.
///
/// Missing values (shorter slices) are read as 0.
pub fn axis_details(labels: &[String], observed: &[f64], ideal: &[f64]) -> Vec<AxisDetail> {
    labels
        .iter()
        .enumerate()
        .map(|(idx, label)| {
            axis_detail(
                label,
                observed.get(idx).cloned().unwrap_or(0.0),
                ideal.get(idx).cloned().unwrap_or(0.0),
            )
        })
        .collect()
}
