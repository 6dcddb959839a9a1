use crate::report::*;

use serde::{Deserialize, Serialize};

/// The JSON configuration file. All the fields are optional.
#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileConfig {
    #[serde(rename = "inputFile")]
    pub input_file: Option<String>,
    #[serde(rename = "inputType")]
    pub input_type: Option<String>,
    #[serde(rename = "worksheetName")]
    pub worksheet_name: Option<String>,
    #[serde(rename = "idealSource")]
    pub ideal_source: Option<String>,
    #[serde(rename = "competencyColumns")]
    pub competency_columns: Option<usize>,
    #[serde(rename = "outputFile")]
    pub output_file: Option<String>,
    #[serde(rename = "singleProfile")]
    pub single_profile: Option<bool>,
}

pub fn read_config(path: &str) -> AppResult<ProfileConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let config: ProfileConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(config)
}

pub fn read_reference(path: &str) -> AppResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    debug!("read_reference: {} profiles", js["profiles"].as_array().map_or(0, |a| a.len()));
    Ok(js)
}
