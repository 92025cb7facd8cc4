use crate::types::row::{ResultRow, ALL_SLOTS};

pub fn to_markdown(row: &ResultRow) -> String {
    let mut output = String::new();
    output.push_str("# Grading Result\n\n");
    output.push_str("| field | value |\n|---|---|\n");
    for slot in ALL_SLOTS {
        output.push_str(&format!("| {} | {} |\n", slot.name(), escape_cell(row.get(slot))));
    }
    output
}

fn escape_cell(value: &str) -> String {
    value.replace('|', "\\|").replace('\n', "<br>")
}
