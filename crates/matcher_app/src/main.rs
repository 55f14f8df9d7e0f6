mod cli;
mod config;
mod persistence;
mod render;

use std::fs;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::Parser;
use log::LevelFilter;
use matcher_core::{CandidateId, JobSearchFilter, ResumeFile, Stage, ACCEPTED_MEDIA_TYPE};
use matcher_engine::{EngineEvent, EngineHandle, ProgressSink};
use matcher_logging::{matcher_error, matcher_info};

use cli::{Cli, Command};
use config::{AppConfig, DEFAULT_CONFIG_FILE};
use persistence::{load_last_run, save_last_run, LastRun};

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            matcher_error!("{:#}", err);
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config_path = AppConfig::resolve_path(cli.config.as_deref());
    let config = AppConfig::load(config_path.as_deref())?
        .with_overrides(cli.service_url.clone(), cli.timeout_secs);

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    matcher_logging::initialize(cli.log.into(), level, &config.log_file);
    match &config_path {
        Some(path) => matcher_info!("Loaded configuration from {}", path.display()),
        None => matcher_info!("No {} found, using built-in defaults", DEFAULT_CONFIG_FILE),
    }

    let settings = config.service_settings()?;
    matcher_info!("Using service at {}", settings.service_base_address);
    let engine = EngineHandle::new(settings)?;

    match cli.command {
        Command::Jobs { query } => {
            let listing = engine.load_jobs();
            let mut filter = JobSearchFilter::new();
            filter.set_jobs(listing.jobs.clone());
            let visible = filter.search(query.as_deref());
            print!("{}", render::render_jobs(&listing, visible));
            Ok(ExitCode::SUCCESS)
        }
        Command::Upload { path, media_type } => upload(&engine, &config, &path, media_type),
        Command::Matches { candidate_id } => {
            let candidate_id = match candidate_id {
                Some(id) => CandidateId::new(id),
                None => match load_last_run(&config.state_dir) {
                    Some(last) => last.candidate_id(),
                    None => bail!("No candidate id given and no completed upload recorded"),
                },
            };
            let view = engine.matches_view(&candidate_id);
            print!("{}", render::render_matches(&view));
            Ok(if view.is_error() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            })
        }
        Command::Ping => {
            engine.ping().context("Service is not reachable")?;
            println!("Service is up.");
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn upload(
    engine: &EngineHandle,
    config: &AppConfig,
    path: &Path,
    media_type: Option<String>,
) -> Result<ExitCode> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let media_type = media_type.unwrap_or_else(|| guess_media_type(path).to_string());

    let (state, outcome) =
        engine.run_workflow(ResumeFile::new(name, media_type, bytes), Arc::new(StdoutProgress));
    print!("{}", render::render_workflow(&state.view()));

    if outcome.is_err() {
        return Ok(ExitCode::FAILURE);
    }
    if let Some(record) = LastRun::from_state(&state, Utc::now().to_rfc3339()) {
        save_last_run(&config.state_dir, &record)?;
    }
    Ok(ExitCode::SUCCESS)
}

fn guess_media_type(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("pdf") => ACCEPTED_MEDIA_TYPE,
        _ => "application/octet-stream",
    }
}

/// Prints each stage label as the workflow reaches it.
struct StdoutProgress;

impl ProgressSink for StdoutProgress {
    fn emit(&self, event: EngineEvent) {
        let EngineEvent::StageChanged { stage, status, .. } = event;
        if stage != Stage::Failed {
            println!("{status}");
        }
    }
}
