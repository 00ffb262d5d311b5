//! CLI host for the diagnosis pipeline.
//!
//! Wires config, credentials, the chat provider and speech output together and
//! plays the role of the UI shell: it echoes the query, prints the rendered
//! result or the error line, and reads the summary aloud.

mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use commands::{Cli, Command, ConfigAction, KeyAction};
use healthvoice_appcore::{AppService, SubmissionOutcome, SubmissionSource, SubmitError};
use healthvoice_core::config::AppConfig;
use healthvoice_engine::session::PipelineStage;
use healthvoice_runtime::config_store::ConfigStore;
use healthvoice_runtime::credentials::{require_api_key, resolve_api_key};
use healthvoice_runtime::secrets::{Keyring, SecretKey};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over -v.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let store = match &cli.config {
        Some(path) => ConfigStore::at_path(path),
        None => ConfigStore::default_location()?,
    };

    match &cli.command {
        Command::Diagnose {
            symptoms,
            transcript,
            json,
        } => {
            let svc = build_service(&cli, &store)?;
            let raw = symptoms.join(" ");
            let source = if *transcript {
                SubmissionSource::Spoken
            } else {
                SubmissionSource::Typed
            };
            let outcome = svc.submit_with_hook(source, &raw, report_progress).await?;

            if *json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                print_outcome(&outcome);
            }

            wait_for_speech(&svc).await;
            svc.shutdown().await?;

            if outcome.error.is_some() {
                std::process::exit(1);
            }
        }
        Command::Interactive => {
            let svc = build_service(&cli, &store)?;
            run_interactive(&svc).await?;
            svc.shutdown().await?;
        }
        Command::Key { action } => run_key(action)?,
        Command::Config { action } => run_config(action, &cli, &store)?,
    }

    Ok(())
}

fn effective_config(cli: &Cli, store: &ConfigStore) -> Result<AppConfig> {
    let mut cfg = store.load_or_default()?;
    if let Some(model) = &cli.model {
        cfg.endpoint.model = model.clone();
    }
    if let Some(url) = &cli.base_url {
        cfg.endpoint.base_url = url.clone();
    }
    if cli.no_speech {
        cfg.speech.enabled = false;
    }
    Ok(cfg)
}

fn build_service(cli: &Cli, store: &ConfigStore) -> Result<AppService> {
    let cfg = effective_config(cli, store)?;
    let credential = require_api_key()?;
    log::info!(
        "endpoint={} model={} key_source={:?}",
        cfg.endpoint.base_url,
        cfg.endpoint.model,
        credential.source
    );
    AppService::from_config(&cfg, &credential.value)
}

// Stdout carries only the result, so progress goes to stderr.
async fn report_progress(stage: PipelineStage) {
    log::debug!("stage: {}", stage.label());
    if stage == PipelineStage::Requesting {
        eprintln!("Analyzing symptoms...");
    }
}

fn print_outcome(outcome: &SubmissionOutcome) {
    for line in &outcome.status_lines {
        println!("{line}");
    }
}

async fn wait_for_speech(svc: &AppService) {
    while svc.is_speaking().await {
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
    }
}

async fn run_interactive(svc: &AppService) -> Result<()> {
    println!("Type your symptoms and press Enter. Commands: :stop, :quit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("read stdin")? {
        match line.trim() {
            ":quit" | ":q" => break,
            ":stop" => {
                svc.stop_speaking().await?;
                continue;
            }
            _ => {}
        }

        match svc
            .submit_with_hook(SubmissionSource::Typed, &line, report_progress)
            .await
        {
            Ok(outcome) => {
                print_outcome(&outcome);
                println!();
            }
            Err(SubmitError::Blank) => continue,
            Err(e) => println!("{e}"),
        }
    }
    Ok(())
}

fn run_key(action: &KeyAction) -> Result<()> {
    match action {
        KeyAction::Set { value } => {
            let value = match value {
                Some(v) => v.clone(),
                None => {
                    let mut buf = String::new();
                    std::io::stdin()
                        .read_line(&mut buf)
                        .context("read key from stdin")?;
                    buf
                }
            };
            Keyring::default().store(SecretKey::ChatApiKey, &value)?;
            println!("API key stored in the OS keyring.");
        }
        KeyAction::Clear => {
            if Keyring::default().remove(SecretKey::ChatApiKey)? {
                println!("API key removed from the OS keyring.");
            } else {
                println!("No API key was stored in the OS keyring.");
            }
        }
        KeyAction::Status => match resolve_api_key()? {
            Some(c) => println!("API key found ({:?}).", c.source),
            None => println!("No API key configured."),
        },
    }
    Ok(())
}

fn run_config(action: &ConfigAction, cli: &Cli, store: &ConfigStore) -> Result<()> {
    match action {
        ConfigAction::Path => println!("{}", store.path().display()),
        ConfigAction::Show => {
            let mut cfg = effective_config(cli, store)?;
            cfg.api_key_present = resolve_api_key()?.is_some();
            println!("{}", serde_json::to_string_pretty(&cfg)?);
        }
        ConfigAction::Init => {
            if store.path().exists() {
                println!("Config already exists at {}", store.path().display());
            } else {
                store.save(&store.load_or_default()?)?;
                println!("Wrote default config to {}", store.path().display());
            }
        }
    }
    Ok(())
}
