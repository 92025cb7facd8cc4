pub mod json;
pub mod md;

use crate::error::GraderError;
use crate::types::row::ResultRow;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Md,
}

pub fn render(row: &ResultRow, format: OutputFormat) -> Result<String, GraderError> {
    match format {
        OutputFormat::Json => json::to_json(row).map_err(GraderError::Json),
        OutputFormat::Md => Ok(md::to_markdown(row)),
    }
}
