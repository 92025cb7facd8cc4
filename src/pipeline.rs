use crate::clock;
use crate::config::RunEnv;
use crate::error::Result;
use crate::evaluate::{evaluate_project, Evaluator};
use crate::export::RowSink;
use crate::scan::{discover, ProjectModel};
use crate::types::config::GraderConfig;
use crate::types::row::{ResultRow, Slot};
use crate::types::scoring::score_row;
use chrono::{DateTime, Utc};
use std::path::Path;
use tracing::{error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Probe,
    Evaluate,
    Score,
    Export,
}

impl Stage {
    pub const fn name(self) -> &'static str {
        match self {
            Stage::Probe => "probe",
            Stage::Evaluate => "evaluate",
            Stage::Score => "score",
            Stage::Export => "export",
        }
    }
}

pub struct RunContext<'a> {
    pub root: &'a Path,
    pub config: &'a GraderConfig,
    pub env: &'a RunEnv,
    pub started_at: DateTime<Utc>,
}

/// Runs probe, evaluate, score and export in order. The first failure ends the
/// run before anything is exported. `before_export` sees the scored row first;
/// when `sink` is `None` the run stops after scoring.
pub async fn run<E, S, F>(
    ctx: &RunContext<'_>,
    evaluator: &E,
    sink: Option<&S>,
    before_export: F,
) -> Result<ResultRow>
where
    E: Evaluator + ?Sized,
    S: RowSink + ?Sized,
    F: FnOnce(&ResultRow) -> Result<()>,
{
    let mut stage = Stage::Probe;
    let result = run_stages(ctx, evaluator, sink, before_export, &mut stage).await;
    if let Err(e) = &result {
        error!(stage = stage.name(), error = %e, "run aborted");
    }
    result
}

async fn run_stages<E, S, F>(
    ctx: &RunContext<'_>,
    evaluator: &E,
    sink: Option<&S>,
    before_export: F,
    stage: &mut Stage,
) -> Result<ResultRow>
where
    E: Evaluator + ?Sized,
    S: RowSink + ?Sized,
    F: FnOnce(&ResultRow) -> Result<()>,
{
    *stage = Stage::Probe;
    info!(stage = stage.name(), root = %ctx.root.display(), "starting");
    let model = discover(ctx.root, &ctx.config.layout);
    let mut row = start_row(ctx, &model)?;

    *stage = Stage::Evaluate;
    info!(stage = stage.name(), "starting");
    evaluate_project(&model, evaluator, &mut row).await?;

    *stage = Stage::Score;
    let score = score_row(&row);
    row.set(Slot::Score, score.to_string());
    info!(stage = stage.name(), score, "scored");

    before_export(&row)?;

    if let Some(sink) = sink {
        *stage = Stage::Export;
        info!(stage = stage.name(), "starting");
        sink.append(&row).await?;
    }

    Ok(row)
}

fn start_row(ctx: &RunContext<'_>, model: &ProjectModel) -> Result<ResultRow> {
    let stamped = clock::stamp(ctx.started_at, ctx.config.clock.utc_offset_hours)?;
    Ok(ResultRow::new(
        &ctx.env.actor,
        &ctx.env.repository,
        &stamped.date,
        &stamped.time,
        model.structure.has_entry,
    ))
}
