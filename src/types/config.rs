use crate::error::GraderError;
use serde::Deserialize;
use std::path::{Component, Path};

pub const DEFAULT_COMPLETION_ENDPOINT: &str =
    "https://api.openai.com/v1/engines/davinci-codex/completions";
pub const DEFAULT_SPREADSHEET_ID: &str = "1P3o-dmyMex3yLp5M3kM7gAvG2xvyh-ii2MnBoPnrGS4";
pub const DEFAULT_SHEETS_API_BASE: &str = "https://sheets.googleapis.com";
pub const SPREADSHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GraderConfig {
    #[serde(default)]
    pub completion: CompletionConfig,
    #[serde(default)]
    pub sheets: SheetsConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub clock: ClockConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompletionConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
        }
    }
}

fn default_endpoint() -> String {
    DEFAULT_COMPLETION_ENDPOINT.to_string()
}

fn default_max_tokens() -> u32 {
    100
}

fn default_temperature() -> f32 {
    0.7
}

#[derive(Debug, Clone, Deserialize)]
pub struct SheetsConfig {
    #[serde(default = "default_spreadsheet_id")]
    pub spreadsheet_id: String,
    #[serde(default = "default_range")]
    pub range: String,
    #[serde(default = "default_value_input_option")]
    pub value_input_option: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_scope")]
    pub scope: String,
}

impl Default for SheetsConfig {
    fn default() -> Self {
        Self {
            spreadsheet_id: default_spreadsheet_id(),
            range: default_range(),
            value_input_option: default_value_input_option(),
            api_base: default_api_base(),
            scope: default_scope(),
        }
    }
}

fn default_spreadsheet_id() -> String {
    DEFAULT_SPREADSHEET_ID.to_string()
}

fn default_range() -> String {
    "Sheet1!A:L".to_string()
}

fn default_value_input_option() -> String {
    "USER_ENTERED".to_string()
}

fn default_api_base() -> String {
    DEFAULT_SHEETS_API_BASE.to_string()
}

fn default_scope() -> String {
    SPREADSHEETS_SCOPE.to_string()
}

/// Paths of the expected submission files, relative to the project root.
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutConfig {
    #[serde(default = "default_entry")]
    pub entry: String,
    #[serde(default = "default_script")]
    pub script: String,
    #[serde(default = "default_style")]
    pub style: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            entry: default_entry(),
            script: default_script(),
            style: default_style(),
        }
    }
}

fn default_entry() -> String {
    "index.html".to_string()
}

fn default_script() -> String {
    "js/script.js".to_string()
}

fn default_style() -> String {
    "css/style.css".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClockConfig {
    #[serde(default = "default_utc_offset_hours")]
    pub utc_offset_hours: i32,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            utc_offset_hours: default_utc_offset_hours(),
        }
    }
}

fn default_utc_offset_hours() -> i32 {
    7
}

impl GraderConfig {
    pub fn validate(&self) -> Result<(), GraderError> {
        if self.completion.endpoint.trim().is_empty() {
            return Err(GraderError::ConfigParse(
                "completion.endpoint must not be empty".to_string(),
            ));
        }
        if self.completion.max_tokens == 0 {
            return Err(GraderError::ConfigParse(
                "completion.max_tokens must be greater than 0".to_string(),
            ));
        }
        if !(0.0..=2.0).contains(&self.completion.temperature) {
            return Err(GraderError::ConfigParse(
                "completion.temperature must be between 0.0 and 2.0".to_string(),
            ));
        }

        for (key, value) in [
            ("sheets.spreadsheet_id", &self.sheets.spreadsheet_id),
            ("sheets.range", &self.sheets.range),
            ("sheets.value_input_option", &self.sheets.value_input_option),
            ("sheets.api_base", &self.sheets.api_base),
        ] {
            if value.trim().is_empty() {
                return Err(GraderError::ConfigParse(format!("{key} must not be empty")));
            }
        }
        if !matches!(
            self.sheets.value_input_option.as_str(),
            "USER_ENTERED" | "RAW"
        ) {
            return Err(GraderError::ConfigParse(format!(
                "unsupported sheets.value_input_option: {}",
                self.sheets.value_input_option
            )));
        }

        for (key, value) in [
            ("layout.entry", &self.layout.entry),
            ("layout.script", &self.layout.script),
            ("layout.style", &self.layout.style),
        ] {
            validate_relative_path(key, value)?;
        }

        if !(-12..=14).contains(&self.clock.utc_offset_hours) {
            return Err(GraderError::ConfigParse(format!(
                "clock.utc_offset_hours must be between -12 and 14 (found {})",
                self.clock.utc_offset_hours
            )));
        }

        Ok(())
    }
}

fn validate_relative_path(key: &str, value: &str) -> Result<(), GraderError> {
    let path = Path::new(value);
    if value.trim().is_empty() {
        return Err(GraderError::ConfigParse(format!("{key} must not be empty")));
    }
    if path.is_absolute()
        || path
            .components()
            .any(|component| !matches!(component, Component::Normal(_) | Component::CurDir))
    {
        return Err(GraderError::ConfigParse(format!(
            "{key} must be a relative path inside the project: {value}"
        )));
    }
    Ok(())
}
