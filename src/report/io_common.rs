use std::path::Path;
use std::str::FromStr;

use log::debug;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum InputType {
    Csv,
    Excel,
}

impl InputType {
    /// Guesses the input type from the file extension.
    pub fn from_path(path: &str) -> Option<InputType> {
        let ext = Path::new(path).extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "csv" | "txt" => Some(InputType::Csv),
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Some(InputType::Excel),
            _ => None,
        }
    }
}

impl FromStr for InputType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "csv" => Ok(InputType::Csv),
            "excel" | "xlsx" | "xls" | "ods" => Ok(InputType::Excel),
            x => Err(format!("input type not implemented {:?}", x)),
        }
    }
}

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
        .to_string()
}

/// Decodes the raw content of a text file.
///
/// UTF-8 is tried first (without its byte order mark). Anything else is read
/// as Latin-1, the encoding of the spreadsheet exports.
pub fn decode_text(bytes: &[u8]) -> String {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(e) => {
            debug!("decode_text: not UTF-8 ({}), reading as Latin-1", e);
            bytes.iter().map(|&b| b as char).collect()
        }
    }
}
