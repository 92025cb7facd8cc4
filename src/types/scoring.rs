use crate::types::row::{ResultRow, Slot};

pub type Score = i64;

/// Yes/no slots that contribute to the final score. Feedback slots never do.
pub const SCORED_SLOTS: [Slot; 4] = [
    Slot::Structure,
    Slot::FunctionsOk,
    Slot::NamingOk,
    Slot::CssOk,
];

/// Reads the leading integer of an answer the way a lenient integer parser
/// would: surrounding whitespace and trailing text are ignored, anything
/// without leading digits counts as zero.
pub fn parse_answer(value: &str) -> Score {
    let trimmed = value.trim_start();
    let (sign, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1, &trimmed[1..]),
        Some(b'+') => (1, &trimmed[1..]),
        _ => (1, trimmed),
    };
    let end = digits
        .char_indices()
        .find(|(_, ch)| !ch.is_ascii_digit())
        .map(|(index, _)| index)
        .unwrap_or(digits.len());
    digits[..end]
        .parse::<Score>()
        .map(|number| sign * number)
        .unwrap_or(0)
}

/// Sums parsed answers, saturating at the `Score` bounds.
pub fn sum_answers<'a>(answers: impl IntoIterator<Item = &'a str>) -> Score {
    answers
        .into_iter()
        .map(parse_answer)
        .fold(0, Score::saturating_add)
}

pub fn score_row(row: &ResultRow) -> Score {
    sum_answers(SCORED_SLOTS.iter().map(|slot| row.get(*slot)))
}
