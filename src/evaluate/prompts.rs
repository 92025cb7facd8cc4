use crate::scan::ProjectFile;
use crate::types::row::Slot;

/// One prompt variant: the file it reads, the question asked about it, and
/// the row slot that receives the answer.
#[derive(Debug, Clone, Copy)]
pub struct Evaluation {
    pub id: &'static str,
    pub requires: ProjectFile,
    pub template: &'static str,
    pub slot: Slot,
}

impl Evaluation {
    pub fn prompt(&self, content: &str) -> String {
        format!("{}\n\n{}", self.template, content)
    }
}

pub const EVALUATIONS: [Evaluation; 5] = [
    Evaluation {
        id: "functions.correctness",
        requires: ProjectFile::Script,
        template: "Will this script have any errors? Answer with 1 if it will run correctly, and 0 if not. Answer only in 1 or 0.",
        slot: Slot::FunctionsOk,
    },
    Evaluation {
        id: "functions.feedback",
        requires: ProjectFile::Script,
        template: "What's your feedback to optimize this code?",
        slot: Slot::FunctionsFeedback,
    },
    Evaluation {
        id: "naming.quality",
        requires: ProjectFile::Script,
        template: "Is this JavaScript code well-named? Answer with 1 if it has good naming, and 0 if it's not. Answer only in 1 or 0.",
        slot: Slot::NamingOk,
    },
    Evaluation {
        id: "naming.feedback",
        requires: ProjectFile::Script,
        template: "What's your feedback about the naming of this JavaScript code?",
        slot: Slot::NamingFeedback,
    },
    Evaluation {
        id: "css.quality",
        requires: ProjectFile::Style,
        template: "Is this CSS code well-written? Answer with 1 if it is, and 0 if it's not. Answer only in 1 or 0.",
        slot: Slot::CssOk,
    },
];
