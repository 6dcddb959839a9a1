use log::{debug, info, warn};

use profile_match::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::report::config_reader::*;
use crate::report::io_common::InputType;

pub mod config_reader;
mod io_common;
mod io_csv;
mod io_excel;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum AppError {
    #[snafu(display("failed to read {path}"))]
    ReadingFile {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("failed to read line {lineno} of the CSV content"))]
    CsvLineParse { source: csv::Error, lineno: usize },
    #[snafu(display("error opening workbook {path}"))]
    OpeningWorkbook {
        source: calamine::Error,
        path: String,
    },
    #[snafu(display("error opening workbook"))]
    OpeningXlsx { source: calamine::XlsxError },
    #[snafu(display("the workbook has no worksheet"))]
    EmptyWorkbook {},
    #[snafu(display("the workbook has no worksheet named {name}"))]
    MissingWorksheet { name: String },
    #[snafu(display("failed to read the configuration {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("invalid JSON"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("failed to write {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    // Structural problems of the sheet, shown as they are.
    #[snafu(display("{source}"))]
    Ingest { source: IngestError },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type AppResult<T> = Result<T, AppError>;

/// Everything needed for one run, after merging the configuration file and the flags.
#[derive(PartialEq, Debug, Clone)]
pub struct Settings {
    pub input: String,
    pub input_type: InputType,
    pub worksheet: Option<String>,
    pub variant: LayoutVariant,
    pub out: Option<String>,
    pub reference: Option<String>,
    pub single_profile: bool,
}

fn resolve_variant(
    ideal_source: Option<&str>,
    competency_columns: Option<usize>,
) -> AppResult<LayoutVariant> {
    let variant = match ideal_source {
        Some(s) => match s.parse::<LayoutVariant>() {
            Ok(v) => v,
            Err(msg) => whatever!("{}", msg),
        },
        None => LayoutVariant::DEFAULT,
    };
    match competency_columns {
        None => Ok(variant),
        Some(n) => match CompetencySpan::from_count(n) {
            Some(span) => Ok(variant.with_competencies(span)),
            None => whatever!("competency columns must be 6 or 7, got {}", n),
        },
    }
}

pub fn resolve_settings(args: &Args) -> AppResult<Settings> {
    let (config, root) = match &args.config {
        Some(p) => {
            let config = read_config(p)?;
            info!("config: {:?}", config);
            let root = Path::new(p).parent().map(|d| d.to_path_buf());
            (config, root)
        }
        None => (ProfileConfig::default(), None),
    };

    let input = match (&args.input, &config.input_file) {
        (Some(p), _) => p.clone(),
        (None, Some(p)) => {
            // Relative to the configuration file.
            let full: PathBuf = match &root {
                Some(r) => r.join(p),
                None => PathBuf::from(p),
            };
            full.display().to_string()
        }
        (None, None) => {
            whatever!("no input file: use --input or set inputFile in the configuration")
        }
    };

    let input_type = match args.input_type.as_ref().or(config.input_type.as_ref()) {
        Some(s) => match s.parse::<InputType>() {
            Ok(t) => t,
            Err(msg) => whatever!("{}", msg),
        },
        None if input == STDIN => InputType::Csv,
        None => match InputType::from_path(&input) {
            Some(t) => t,
            None => whatever!(
                "cannot guess the input type of {:?}: use --input-type",
                input
            ),
        },
    };

    let variant = resolve_variant(
        args.ideal_source
            .as_deref()
            .or(config.ideal_source.as_deref()),
        args.competency_columns.or(config.competency_columns),
    )?;

    Ok(Settings {
        input,
        input_type,
        worksheet: args
            .excel_worksheet_name
            .clone()
            .or(config.worksheet_name),
        variant,
        out: args.out.clone().or(config.output_file),
        reference: args.reference.clone(),
        single_profile: args.single || config.single_profile.unwrap_or(false),
    })
}

/// The input path that stands for the standard input.
pub const STDIN: &str = "-";

fn read_stdin() -> AppResult<Vec<u8>> {
    let mut bytes: Vec<u8> = Vec::new();
    std::io::stdin()
        .read_to_end(&mut bytes)
        .context(ReadingFileSnafu { path: "stdin" })?;
    Ok(bytes)
}

pub fn read_grid(settings: &Settings) -> AppResult<Grid> {
    info!(
        "Attempting to read {:?} as {:?}",
        settings.input, settings.input_type
    );
    let worksheet = settings.worksheet.as_deref();
    let grid = match (settings.input_type, settings.input.as_str()) {
        (InputType::Csv, STDIN) => io_csv::read_csv_bytes(&read_stdin()?)?,
        (InputType::Excel, STDIN) => io_excel::read_xlsx_bytes(read_stdin()?, worksheet)?,
        (InputType::Csv, path) => io_csv::read_csv_file(path)?,
        (InputType::Excel, path) => io_excel::read_excel_file(path, worksheet)?,
    };
    debug!("read_grid: {} rows", grid.len());
    Ok(grid)
}

fn dimension_js(p: &Profile, dim: Dimension) -> JSValue {
    let m = p.resolved_match(dim);
    json!({
        "labels": p.labels(dim),
        "observed": p.observed(dim),
        "ideal": p.ideal(dim),
        "match": m,
        "matchDisplay": format!("{:.1}%", m.percentage),
        "details": p.details(dim),
    })
}

pub fn profile_to_json(p: &Profile) -> JSValue {
    json!({
        "name": p.person_name,
        "behavioral": dimension_js(p, Dimension::Behavioral),
        "aptitude": dimension_js(p, Dimension::Aptitude),
        "competency": dimension_js(p, Dimension::Competency),
    })
}

pub fn build_summary_js(settings: &Settings, profiles: &[Profile]) -> JSValue {
    let source = io_common::simplify_file_name(&settings.input);
    json!({
        "config": {
            "source": source,
            "layout": settings.variant.ideal_source(),
            "competencyColumns": settings.variant.competencies().count(),
        },
        "profiles": profiles.iter().map(profile_to_json).collect::<Vec<JSValue>>(),
    })
}

/// Reads the sheet and builds the summary. Nothing is written.
pub fn summarize(settings: &Settings) -> AppResult<JSValue> {
    let grid = read_grid(settings)?;
    let profiles: Vec<Profile> = if settings.single_profile {
        vec![ingest_single(&grid, settings.variant).context(IngestSnafu {})?]
    } else {
        ingest(&grid, settings.variant).context(IngestSnafu {})?
    };
    for p in profiles.iter() {
        let b = p.resolved_match(Dimension::Behavioral);
        let a = p.resolved_match(Dimension::Aptitude);
        let c = p.resolved_match(Dimension::Competency);
        info!(
            "{}: behavioral {:.1}% ({}), aptitude {:.1}% ({}), competencies {:.1}% ({})",
            p.person_name,
            b.percentage,
            b.tier.as_str(),
            a.percentage,
            a.tier.as_str(),
            c.percentage,
            c.tier.as_str()
        );
    }
    Ok(build_summary_js(settings, &profiles))
}

pub fn run(args: &Args) -> AppResult<()> {
    let settings = resolve_settings(args)?;
    let summary = summarize(&settings)?;
    let pretty = serde_json::to_string_pretty(&summary).context(ParsingJsonSnafu {})?;

    match settings.out.as_deref() {
        None | Some("") | Some("stdout") => println!("{}", pretty),
        Some(path) => {
            fs::write(path, &pretty).context(WritingOutputSnafu { path })?;
            info!("Summary written to {:?}", path);
        }
    }

    // The reference summary, if provided for comparison
    if let Some(reference_p) = &settings.reference {
        let reference = read_reference(reference_p)?;
        if reference != summary {
            let pretty_reference =
                serde_json::to_string_pretty(&reference).context(ParsingJsonSnafu {})?;
            warn!("Found differences with the reference summary");
            print_diff(pretty_reference.as_str(), pretty.as_str(), "\n");
            whatever!("Difference detected between calculated summary and reference summary")
        }
        info!("Summary matches the reference {:?}", reference_p);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template_line(cells: &[(usize, &str)]) -> String {
        let mut row = vec![""; 41];
        for (idx, v) in cells.iter() {
            row[*idx] = v;
        }
        row.join(";")
    }

    fn sample_csv() -> String {
        let header = template_line(&[(1, "Nombre"), (24, "Liderazgo"), (25, "Trabajo en equipo")]);
        let ideal = template_line(&[(24, "80"), (25, "70,0 %")]);
        let alice = template_line(&[
            (1, "Alice"),
            (8, "80"),
            (9, "60"),
            (10, "40"),
            (11, "90"),
            (12, "5"),
            (13, "6"),
            (14, "7"),
            (15, "8"),
            (16, "9"),
            (20, "91,4%"),
            (24, "60"),
            (25, "70"),
            (31, "70"),
            (32, "70"),
            (33, "50"),
            (34, "80"),
            (36, "5"),
            (37, "5"),
            (38, "5"),
            (39, "5"),
            (40, "5"),
        ]);
        let blank = template_line(&[(8, "10")]);
        format!("{}\n{}\n{}\n{}\n", header, ideal, alice, blank)
    }

    fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> String {
        let p = dir.path().join(name);
        fs::write(&p, content).unwrap();
        p.display().to_string()
    }

    #[test]
    fn settings_from_flags() {
        let args = Args {
            input: Some("data/results.xlsx".to_string()),
            ideal_source: Some("reference-row".to_string()),
            competency_columns: Some(6),
            ..Args::default()
        };
        let s = resolve_settings(&args).unwrap();
        assert_eq!(s.input_type, InputType::Excel);
        assert_eq!(
            s.variant,
            LayoutVariant::ReferenceRowIdeal {
                competencies: CompetencySpan::Six
            }
        );
        assert!(!s.single_profile);
    }

    #[test]
    fn settings_errors() {
        let args = Args::default();
        assert!(resolve_settings(&args).is_err());

        let args = Args {
            input: Some("results.dat".to_string()),
            ..Args::default()
        };
        assert!(resolve_settings(&args).is_err());

        let args = Args {
            input: Some("results.csv".to_string()),
            competency_columns: Some(8),
            ..Args::default()
        };
        let e = resolve_settings(&args).unwrap_err();
        assert!(e.to_string().contains("6 or 7"));
    }

    #[test]
    fn settings_from_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_p = write_file(
            &dir,
            "config.json",
            r#"{"inputFile": "sheet.txt", "inputType": "csv",
                "idealSource": "reference-row", "singleProfile": true}"#,
        );
        let args = Args {
            config: Some(config_p),
            ..Args::default()
        };
        let s = resolve_settings(&args).unwrap();
        let expected: PathBuf = dir.path().join("sheet.txt");
        assert_eq!(s.input, expected.display().to_string());
        assert_eq!(s.input_type, InputType::Csv);
        assert_eq!(s.variant.ideal_source(), "reference-row");
        assert!(s.single_profile);
    }

    #[test]
    fn csv_summary() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_file(&dir, "sample.csv", &sample_csv());
        let settings = Settings {
            input,
            input_type: InputType::Csv,
            worksheet: None,
            variant: LayoutVariant::DEFAULT,
            out: None,
            reference: None,
            single_profile: false,
        };
        let js = summarize(&settings).unwrap();
        let profiles = js["profiles"].as_array().unwrap();
        assert_eq!(profiles.len(), 1);
        let alice = &profiles[0];
        assert_eq!(alice["name"], "Alice");
        assert_eq!(alice["behavioral"]["match"]["source"], "sheet");
        assert_eq!(alice["behavioral"]["match"]["percentage"], 91.4);
        assert_eq!(alice["behavioral"]["matchDisplay"], "91.4%");
        assert_eq!(alice["aptitude"]["match"]["percentage"], 100.0);
        assert_eq!(alice["aptitude"]["match"]["tier"], "good");
        assert_eq!(alice["competency"]["labels"][1], "Trabajo en equipo");
        assert_eq!(alice["competency"]["labels"][2], "Comp 3");
        assert_eq!(alice["competency"]["details"][0]["signedDiff"], -20.0);
    }

    #[test]
    fn reference_check() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_file(&dir, "sample.csv", &sample_csv());
        let out = dir.path().join("out.json").display().to_string();
        let args = Args {
            input: Some(input),
            out: Some(out.clone()),
            ..Args::default()
        };
        run(&args).unwrap();

        // The output is its own reference, including the non-terminating percentages.
        let saved = fs::read_to_string(&out).unwrap();
        assert!(saved.contains("96.42857142857"));
        let args = Args {
            reference: Some(out),
            out: Some(dir.path().join("out2.json").display().to_string()),
            ..args
        };
        run(&args).unwrap();

        // A different layout produces a different summary.
        let args = Args {
            competency_columns: Some(6),
            ..args
        };
        assert!(run(&args).is_err());
    }

    #[test]
    fn structural_errors_are_shown_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_file(&dir, "short.csv", "a;b\nc;d\n");
        let args = Args {
            input: Some(input),
            ..Args::default()
        };
        let e = run(&args).unwrap_err();
        assert!(e.to_string().starts_with("file too short"));

        let args = Args {
            input: Some(dir.path().join("missing.csv").display().to_string()),
            ..Args::default()
        };
        let e = run(&args).unwrap_err();
        assert!(e.to_string().starts_with("failed to read"));
    }
}
