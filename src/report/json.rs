use crate::types::row::{ResultRow, Slot};
use serde::Serialize;

#[derive(Serialize)]
struct RowView<'a> {
    actor: &'a str,
    repo_url: &'a str,
    date: &'a str,
    time: &'a str,
    structure: &'a str,
    functions_ok: &'a str,
    functions_feedback: &'a str,
    naming_ok: &'a str,
    naming_feedback: &'a str,
    css_ok: &'a str,
    css_feedback: &'a str,
    score: &'a str,
}

impl<'a> From<&'a ResultRow> for RowView<'a> {
    fn from(row: &'a ResultRow) -> Self {
        Self {
            actor: row.get(Slot::Actor),
            repo_url: row.get(Slot::RepoUrl),
            date: row.get(Slot::Date),
            time: row.get(Slot::Time),
            structure: row.get(Slot::Structure),
            functions_ok: row.get(Slot::FunctionsOk),
            functions_feedback: row.get(Slot::FunctionsFeedback),
            naming_ok: row.get(Slot::NamingOk),
            naming_feedback: row.get(Slot::NamingFeedback),
            css_ok: row.get(Slot::CssOk),
            css_feedback: row.get(Slot::CssFeedback),
            score: row.get(Slot::Score),
        }
    }
}

pub fn to_json(row: &ResultRow) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&RowView::from(row))
}
