use serde::{Serialize, Serializer};

pub const ROW_WIDTH: usize = 12;

/// Positions of the exported result row. Position is the only identity a
/// value has once it reaches the spreadsheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Actor = 0,
    RepoUrl = 1,
    Date = 2,
    Time = 3,
    Structure = 4,
    FunctionsOk = 5,
    FunctionsFeedback = 6,
    NamingOk = 7,
    NamingFeedback = 8,
    CssOk = 9,
    CssFeedback = 10,
    Score = 11,
}

impl Slot {
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            Slot::Actor => "actor",
            Slot::RepoUrl => "repo_url",
            Slot::Date => "date",
            Slot::Time => "time",
            Slot::Structure => "structure",
            Slot::FunctionsOk => "functions_ok",
            Slot::FunctionsFeedback => "functions_feedback",
            Slot::NamingOk => "naming_ok",
            Slot::NamingFeedback => "naming_feedback",
            Slot::CssOk => "css_ok",
            Slot::CssFeedback => "css_feedback",
            Slot::Score => "score",
        }
    }
}

pub const ALL_SLOTS: [Slot; ROW_WIDTH] = [
    Slot::Actor,
    Slot::RepoUrl,
    Slot::Date,
    Slot::Time,
    Slot::Structure,
    Slot::FunctionsOk,
    Slot::FunctionsFeedback,
    Slot::NamingOk,
    Slot::NamingFeedback,
    Slot::CssOk,
    Slot::CssFeedback,
    Slot::Score,
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultRow {
    fields: [String; ROW_WIDTH],
}

impl ResultRow {
    pub fn new(actor: &str, repo_url: &str, date: &str, time: &str, has_entry: bool) -> Self {
        let mut row = Self::default();
        row.set(Slot::Actor, actor);
        row.set(Slot::RepoUrl, repo_url);
        row.set(Slot::Date, date);
        row.set(Slot::Time, time);
        row.set(Slot::Structure, if has_entry { "1" } else { "0" });
        row
    }

    pub fn get(&self, slot: Slot) -> &str {
        &self.fields[slot.index()]
    }

    pub fn set(&mut self, slot: Slot, value: impl Into<String>) {
        self.fields[slot.index()] = value.into();
    }

    #[cfg(test)]
    pub fn into_values(self) -> Vec<String> {
        self.fields.into()
    }
}

impl Serialize for ResultRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}
