//! Promptwire - command-template driven LLM relay.
//!
//! CLI entry point standing in for a richer UI: builds wire requests, runs
//! them through a session, and renders buffered or streamed results.

mod cli;

use std::io::Write;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use promptwire_config::{default_path, expand_path, PresetStore};
use promptwire_protocols::{PathExpr, PortRequest, StreamEvent};
use promptwire_session::Session;

use cli::{Cli, Commands, SendArgs};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Send(args) => send(args).await,
        Commands::Presets { config } => list_presets(config),
    }
}

fn store_path(config: Option<String>) -> PathBuf {
    config
        .map(|path| PathBuf::from(expand_path(&path)))
        .unwrap_or_else(default_path)
}

fn list_presets(config: Option<String>) -> Result<()> {
    let store = PresetStore::load(&store_path(config))?;
    for preset in store.iter() {
        let streaming = if preset.streaming { " (streaming)" } else { "" };
        println!(
            "{:<16} {}{streaming}",
            preset.name,
            preset.description.as_deref().unwrap_or("")
        );
    }
    Ok(())
}

async fn send(args: SendArgs) -> Result<()> {
    let mut output_path = args.path.clone();
    let mut stream = args.stream;

    let curl_command = if let Some(curl) = args.curl.clone() {
        curl
    } else if let Some(name) = &args.preset {
        let store = PresetStore::load(&store_path(args.config.clone()))?;
        let preset = store.get(name)?;
        if output_path.is_none() {
            output_path = preset.output_path.clone();
        }
        stream = stream || preset.streaming;
        debug!(preset = %name, "resolved preset template");
        preset.resolved_curl()?
    } else {
        bail!("either --curl or --preset is required");
    };

    let form_data = read_form_data(&args)?;
    let path = output_path
        .as_deref()
        .map(PathExpr::parse)
        .filter(|expr| !expr.is_identity() && !args.raw);

    let session = Session::new();
    if stream {
        send_streaming(session, curl_command, args.message, form_data, path, args.raw).await
    } else {
        send_buffered(&session, curl_command, args.message, form_data, path).await
    }
}

fn read_form_data(args: &SendArgs) -> Result<Option<Value>> {
    if let Some(path) = &args.data_file {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading payload file {}", path.display()))?;
        let payload = serde_json::from_str(&content).context("payload file is not valid JSON")?;
        return Ok(Some(payload));
    }
    if let Some(data) = &args.data {
        let payload = serde_json::from_str(data).context("--data is not valid JSON")?;
        return Ok(Some(payload));
    }
    Ok(None)
}

async fn send_buffered(
    session: &Session,
    curl_command: String,
    message: Option<String>,
    form_data: Option<Value>,
    path: Option<PathExpr>,
) -> Result<()> {
    let request = PortRequest::MakeRequest {
        curl_command,
        message,
        form_data,
    };
    let response = session.handle_request(request).await;
    if !response.success {
        bail!(response.error.unwrap_or_else(|| "request failed".to_string()));
    }

    let data = response.data.unwrap_or(Value::Null);
    match path {
        Some(path) => match path.extract(&data) {
            Some(value) => println!("{}", render(value)),
            None => bail!("no value found at the specified path"),
        },
        None => println!("{}", serde_json::to_string_pretty(&data)?),
    }
    Ok(())
}

async fn send_streaming(
    session: Session,
    curl_command: String,
    message: Option<String>,
    form_data: Option<Value>,
    path: Option<PathExpr>,
    raw: bool,
) -> Result<()> {
    let request = PortRequest::MakeStreamingRequest {
        curl_command,
        message,
        form_data,
    };
    let (tx, mut rx) = mpsc::unbounded_channel();
    let worker = tokio::spawn(async move { session.handle_streaming(request, &tx).await });

    let mut stdout = std::io::stdout();
    let mut projected = false;
    let mut result = Ok(());
    while let Some(event) = rx.recv().await {
        match event {
            StreamEvent::Content { content } => {
                if raw {
                    println!("{content}");
                } else if let Some(path) = path.as_ref() {
                    // Chunks without the projected field are skipped, as
                    // role-only or usage-only deltas usually are.
                    if let Some(value) = path.extract(&content) {
                        write!(stdout, "{}", render(value))?;
                        stdout.flush()?;
                        projected = true;
                    }
                } else {
                    println!("{content}");
                }
            }
            StreamEvent::Error { error } => {
                result = Err(anyhow!(error));
                break;
            }
            StreamEvent::Done { .. } => break,
        }
    }
    if projected {
        writeln!(stdout)?;
    }
    worker.await.ok();
    result
}

fn render(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
