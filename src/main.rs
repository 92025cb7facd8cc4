mod cli;
mod clock;
mod completion;
mod config;
mod error;
mod evaluate;
mod export;
mod logging;
mod pipeline;
mod report;
mod scan;
#[cfg(test)]
mod test_support;
mod types;

use crate::completion::CompletionClient;
use crate::error::GraderError;
use crate::export::sheets::SheetsExporter;
use crate::scan::ProjectFile;
use clap::Parser;
use std::path::Path;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const CONFIG_FAILURE: i32 = 2;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn exit_code_for(error: &GraderError) -> i32 {
    match error {
        GraderError::PathNotFound(_)
        | GraderError::ConfigParse(_)
        | GraderError::MissingEnv(_)
        | GraderError::Credentials(_) => exit_code::CONFIG_FAILURE,
        _ => exit_code::RUNTIME_FAILURE,
    }
}

fn ensure_project_dir(path: &Path) -> Result<(), GraderError> {
    if !path.is_dir() {
        return Err(GraderError::PathNotFound(path.display().to_string()));
    }
    Ok(())
}

fn print_row(row: &types::row::ResultRow, format: &cli::ReportFormat) -> Result<(), GraderError> {
    let output_format = match format {
        cli::ReportFormat::Json => report::OutputFormat::Json,
        cli::ReportFormat::Md => report::OutputFormat::Md,
    };
    let rendered = report::render(row, output_format)?;
    println!("{rendered}");
    Ok(())
}

fn run() -> Result<i32, GraderError> {
    let cli = cli::Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    match cli.command {
        cli::Commands::Probe(cmd) => {
            ensure_project_dir(&cmd.path)?;
            let loaded = config::load_config(&cmd.path)?;
            let model = scan::discover(&cmd.path, &loaded.layout);
            for (file, label) in [
                (ProjectFile::Entry, "entry"),
                (ProjectFile::Script, "script"),
                (ProjectFile::Style, "style"),
            ] {
                let state = if model.structure.has(file) {
                    "present"
                } else {
                    "missing"
                };
                println!("{label}: {} ({state})", model.path_of(file).display());
            }
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Preview(cmd) => {
            ensure_project_dir(&cmd.path)?;
            let loaded = config::load_config(&cmd.path)?;
            let env = config::RunEnv::from_env();
            let client = CompletionClient::new(&loaded.completion, env.require_api_key()?)?;

            let ctx = pipeline::RunContext {
                root: &cmd.path,
                config: &loaded,
                env: &env,
                started_at: chrono::Utc::now(),
            };
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(pipeline::run(
                &ctx,
                &client,
                None::<&SheetsExporter>,
                |row| print_row(row, &cmd.format),
            ))?;
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Run(cmd) => {
            ensure_project_dir(&cmd.path)?;
            let loaded = config::load_config(&cmd.path)?;
            let env = config::RunEnv::from_env();
            let client = CompletionClient::new(&loaded.completion, env.require_api_key()?)?;
            let exporter = SheetsExporter::new(loaded.sheets.clone(), env.service_account()?)?;

            let ctx = pipeline::RunContext {
                root: &cmd.path,
                config: &loaded,
                env: &env,
                started_at: chrono::Utc::now(),
            };
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(pipeline::run(&ctx, &client, Some(&exporter), |row| {
                print_row(row, &cmd.format)
            }))?;
            Ok(exit_code::SUCCESS)
        }
    }
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code_for(&e));
        }
    }
}
