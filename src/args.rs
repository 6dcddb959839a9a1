use clap::Parser;

/// Extracts assessment profiles from a spreadsheet and scores them against the ideal profile.
#[derive(Parser, Debug, Clone, Default)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON configuration file. See the manual of the profile_match
    /// crate for the format. The other flags take precedence over its content.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path) The spreadsheet to read (CSV with ';' separators, or an Excel workbook).
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (csv or excel) The type of the input. By default it is guessed from the file extension.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// When using an Excel file, the name of the worksheet to read. The first worksheet is
    /// read by default.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    /// (per-person or reference-row) Where the ideal behavioral and aptitude scores are read.
    #[clap(long, value_parser)]
    pub ideal_source: Option<String>,

    /// (6 or 7) The number of competency columns in the sheet.
    #[clap(long, value_parser)]
    pub competency_columns: Option<usize>,

    /// (file path, 'stdout' or empty) Where to write the JSON summary. Defaults to the
    /// standard output.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference summary in JSON format. If provided, matrixprofile checks
    /// that its output matches the reference and prints the differences otherwise.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// Only read the first person row. A missing name is replaced by a placeholder.
    #[clap(long, takes_value = false)]
    pub single: bool,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
