use std::rc::Rc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use futures_util::future::join_all;
use panels::fetch::HttpFetcher;
use panels::{MemoryDocument, PanelBoard, PanelConfig, PanelOutcome, StatusPanelController};
use serde_json::{Value, json};

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;

const WEBHOOK_TIMEOUT: Duration = Duration::from_secs(15);
const API_KEY_HEADER: &str = "X-API-Key";

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("missing API key; pass --api-key or set ORCHESTRATOR_API_KEY")]
    MissingApiKey,
    #[error("could not connect to {url}: {message}")]
    Connect { url: String, message: String },
    #[error("request to {url} timed out after {}s", WEBHOOK_TIMEOUT.as_secs())]
    Timeout { url: String },
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("panel {trigger} failed: {message}")]
    Panel { trigger: String, message: String },
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "orchestrator-cli", about = "Drive the audit orchestrator panels and webhook")]
struct Cli {
    #[arg(long, env = "ORCHESTRATOR_BASE_URL", default_value = "http://127.0.0.1:5000")]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the audit panel and print its final markup.
    Audit,
    /// Run the Lean panel and print its final markup.
    Lean,
    /// Run every panel concurrently.
    Panels,
    /// Send one event to `POST /webhook`.
    Webhook {
        #[arg(long, default_value = "orchestrator-cli")]
        origin: String,
        #[arg(long, default_value = "{}", help = "JSON value sent as the event payload")]
        payload: String,
        #[arg(long, env = "ORCHESTRATOR_API_KEY")]
        api_key: Option<String>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Audit => run_panels(&cli.base_url, &[panels::panel::audit::AUDIT_TRIGGER_ID]).await,
        Command::Lean => run_panels(&cli.base_url, &[panels::panel::lean::LEAN_TRIGGER_ID]).await,
        Command::Panels => {
            let triggers = [panels::panel::audit::AUDIT_TRIGGER_ID, panels::panel::lean::LEAN_TRIGGER_ID];
            run_panels(&cli.base_url, &triggers).await
        }
        Command::Webhook { origin, payload, api_key } => {
            let api_key = api_key.ok_or(CliError::MissingApiKey)?;
            let event = build_event(&origin, &payload)?;
            let receipt = send_webhook(&cli.base_url, &api_key, &event).await?;
            print_json(&receipt)
        }
    }
}

/// Activate the given triggers over an in-memory page and print each region.
async fn run_panels(base_url: &str, triggers: &[&str]) -> Result<(), CliError> {
    let configs = default_configs();
    let doc = Rc::new(page_for(&configs));
    let controller = StatusPanelController::new(doc.clone(), Rc::new(HttpFetcher::new(base_url)));
    let board = PanelBoard::with_defaults(controller);

    let runs = triggers.iter().filter_map(|trigger| board.activate(trigger).map(|run| (*trigger, run)));
    let (names, futures): (Vec<_>, Vec<_>) = runs.unzip();
    let outcomes = join_all(futures).await;

    let mut first_failure = None;
    for (trigger, outcome) in names.into_iter().zip(outcomes) {
        let Some(config) = configs.iter().find(|c| c.trigger_id == trigger) else {
            continue;
        };
        println!("[{}]", config.region_id);
        println!("{}", doc.content(&config.region_id).unwrap_or_default());
        if let PanelOutcome::Failed(err) = outcome {
            if first_failure.is_none() {
                first_failure = Some(CliError::Panel { trigger: trigger.to_owned(), message: err.to_string() });
            }
        }
    }

    first_failure.map_or(Ok(()), Err)
}

fn default_configs() -> Vec<PanelConfig> {
    use panels::Panel;
    vec![panels::AuditPanel::default_config(), panels::LeanPanel::default_config()]
}

/// A page carrying every region the given panels render into.
fn page_for(configs: &[PanelConfig]) -> MemoryDocument {
    configs.iter().fold(MemoryDocument::new(), |doc, config| doc.with_region(&config.region_id))
}

fn build_event(origin: &str, payload: &str) -> Result<Value, CliError> {
    let payload = serde_json::from_str::<Value>(payload)?;
    Ok(json!({ "origin": origin, "payload": payload }))
}

async fn send_webhook(base_url: &str, api_key: &str, event: &Value) -> Result<Value, CliError> {
    let client = reqwest::Client::builder().timeout(WEBHOOK_TIMEOUT).build()?;
    let url = format!("{}/webhook", base_url.trim_end_matches('/'));

    let response = client
        .post(&url)
        .header(API_KEY_HEADER, api_key)
        .json(event)
        .send()
        .await
        .map_err(|e| classify_send_error(&url, e))?;

    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(CliError::Status { status: status.as_u16(), body });
    }
    Ok(serde_json::from_str(&body).unwrap_or(Value::String(body)))
}

fn classify_send_error(url: &str, error: reqwest::Error) -> CliError {
    if error.is_timeout() {
        CliError::Timeout { url: url.to_owned() }
    } else if error.is_connect() {
        CliError::Connect { url: url.to_owned(), message: error.to_string() }
    } else {
        CliError::Http(error)
    }
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
