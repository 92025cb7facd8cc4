pub mod prompts;

use crate::error::Result;
use crate::scan::{ProjectFile, ProjectModel};
use crate::types::row::ResultRow;
use async_trait::async_trait;
use prompts::EVALUATIONS;
use std::collections::HashMap;
use tracing::{debug, info};

/// Answers a single prompt. Implementations perform exactly one remote call
/// per invocation and never cache.
#[async_trait]
pub trait Evaluator: Send + Sync {
    async fn evaluate(&self, prompt: &str) -> Result<String>;
}

/// Runs every prompt variant whose file exists and writes the trimmed answers
/// into the row. Slots of absent files stay empty. The first failure aborts
/// the remaining evaluations.
pub async fn evaluate_project<E>(
    model: &ProjectModel,
    evaluator: &E,
    row: &mut ResultRow,
) -> Result<()>
where
    E: Evaluator + ?Sized,
{
    let mut contents: HashMap<ProjectFile, String> = HashMap::new();
    for file in [ProjectFile::Script, ProjectFile::Style] {
        if let Some(content) = model.read(file)? {
            contents.insert(file, content);
        }
    }

    let mut answered = 0usize;
    for evaluation in &EVALUATIONS {
        let Some(content) = contents.get(&evaluation.requires) else {
            debug!(evaluation = evaluation.id, "skipped: required file absent");
            continue;
        };

        debug!(
            evaluation = evaluation.id,
            slot = evaluation.slot.name(),
            content_bytes = content.len(),
            "requesting evaluation"
        );
        let answer = evaluator.evaluate(&evaluation.prompt(content)).await?;
        row.set(evaluation.slot, answer.trim());
        answered += 1;
    }

    info!(answered, "evaluations complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GraderError;
    use crate::scan::discover;
    use crate::test_support::{write_file, ScriptedEvaluator};
    use crate::types::config::LayoutConfig;
    use crate::types::row::Slot;
    use tempfile::TempDir;

    fn project(script: bool, style: bool) -> TempDir {
        let dir = TempDir::new().expect("temp dir should be created");
        write_file(dir.path(), "index.html", "<html></html>");
        if script {
            write_file(dir.path(), "js/script.js", "function add(a, b) { return a + b; }");
        }
        if style {
            write_file(dir.path(), "css/style.css", "body { margin: 0; }");
        }
        dir
    }

    fn blank_row() -> ResultRow {
        ResultRow::new("actor", "repo", "2024-01-01", "00:00:00", true)
    }

    #[tokio::test]
    async fn all_files_present_fills_every_evaluation_slot_in_order() {
        let dir = project(true, true);
        let model = discover(dir.path(), &LayoutConfig::default());
        let evaluator = ScriptedEvaluator::new(&[" 1 ", "use const", "0", "rename x", "1\n"]);
        let mut row = blank_row();

        evaluate_project(&model, &evaluator, &mut row)
            .await
            .expect("evaluation should succeed");

        assert_eq!(row.get(Slot::FunctionsOk), "1");
        assert_eq!(row.get(Slot::FunctionsFeedback), "use const");
        assert_eq!(row.get(Slot::NamingOk), "0");
        assert_eq!(row.get(Slot::NamingFeedback), "rename x");
        assert_eq!(row.get(Slot::CssOk), "1");
        assert_eq!(row.get(Slot::CssFeedback), "");

        let prompts = evaluator.prompts();
        assert_eq!(prompts.len(), 5);
        assert!(prompts[0].starts_with("Will this script have any errors?"));
        assert!(prompts[0].ends_with("function add(a, b) { return a + b; }"));
        assert!(prompts[4].ends_with("body { margin: 0; }"));
    }

    #[tokio::test]
    async fn evaluation_slots_are_empty_exactly_for_absent_files() {
        let script_slots = [
            Slot::FunctionsOk,
            Slot::FunctionsFeedback,
            Slot::NamingOk,
            Slot::NamingFeedback,
        ];
        for (script, style) in [(false, false), (false, true), (true, false), (true, true)] {
            let dir = project(script, style);
            let model = discover(dir.path(), &LayoutConfig::default());
            let evaluator = ScriptedEvaluator::new(&["a", "b", "c", "d", "e"]);
            let mut row = blank_row();

            evaluate_project(&model, &evaluator, &mut row)
                .await
                .expect("evaluation should succeed");

            for slot in script_slots {
                assert_eq!(
                    row.get(slot).is_empty(),
                    !script,
                    "{} with script={script} style={style}",
                    slot.name()
                );
            }
            assert_eq!(row.get(Slot::CssOk).is_empty(), !style);
            let expected_calls = usize::from(style) + if script { 4 } else { 0 };
            assert_eq!(evaluator.prompts().len(), expected_calls);
        }
    }

    #[tokio::test]
    async fn evaluator_failure_stops_remaining_prompts() {
        let dir = project(true, true);
        let model = discover(dir.path(), &LayoutConfig::default());
        let evaluator = ScriptedEvaluator::new(&["1", "feedback"]);
        let mut row = blank_row();

        let err = evaluate_project(&model, &evaluator, &mut row)
            .await
            .expect_err("third prompt should fail");

        assert!(matches!(err, GraderError::MalformedResponse(_)));
        assert_eq!(evaluator.prompts().len(), 3);
        assert_eq!(row.get(Slot::NamingOk), "");
    }

    #[tokio::test]
    async fn non_utf8_script_is_still_evaluated() {
        let dir = project(false, false);
        let script = dir.path().join("js/script.js");
        std::fs::create_dir_all(script.parent().expect("script has a parent")).expect("js dir");
        std::fs::write(&script, b"// caf\xe9\nlet n = 1;").expect("script should write");
        let model = discover(dir.path(), &LayoutConfig::default());
        let evaluator = ScriptedEvaluator::new(&["1", "ok", "1", "fine"]);
        let mut row = blank_row();

        evaluate_project(&model, &evaluator, &mut row)
            .await
            .expect("evaluation should succeed");

        let prompts = evaluator.prompts();
        assert_eq!(prompts.len(), 4);
        assert!(prompts[0].ends_with("// caf\u{fffd}\nlet n = 1;"));
        assert_eq!(row.get(Slot::NamingOk), "1");
    }
}
