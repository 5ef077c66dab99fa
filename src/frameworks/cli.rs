use clap::{ArgAction, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use crate::frameworks::config::{DEFAULT_PAGE_SIZE, Settings};
use crate::interface_adapters::presenter;
use crate::interface_adapters::{
    AppState, BackendClient, FileTokenStore, SystemClock, TracingErrorSink,
};
use crate::use_cases::{SessionGateway, filter_tags, parse_tag_catalog};

const NO_TAGS_FOUND: &str = "No tags found";
const CATALOG_FAILED: &str = "Could not load the tag list";

const DEFAULT_GREETINGS: &str = "Hello! I have worked with this topic for a long time and can help";

#[derive(Debug, Parser)]
#[command(name = "tutor", version, about = "Tutor client for the lessons marketplace")]
pub struct Cli {
    /// Platform init data used to obtain and refresh the session token.
    #[arg(long, env = "TUTOR_INIT_DATA", hide_env_values = true, global = true)]
    pub init_data: Option<String>,

    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[arg(long, global = true)]
    pub auth_url: Option<String>,

    #[arg(long, global = true)]
    pub token_path: Option<PathBuf>,

    #[arg(long, global = true)]
    pub tags_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Exchange init data for a session token.
    Login,
    /// List available orders.
    Orders {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        size: u32,
        #[arg(long)]
        tag: Option<String>,
    },
    /// Show one order.
    Order { id: String },
    /// Respond to an order.
    Respond {
        id: String,
        #[arg(long, default_value = DEFAULT_GREETINGS)]
        message: String,
    },
    /// List your responses, newest first.
    Responses,
    Profile,
    SetName { name: String },
    SetBio { bio: String },
    SetTags { tags: Vec<String> },
    /// Browse the tag catalog.
    Tags {
        #[arg(long)]
        search: Option<String>,
    },
    /// Add a catalog tag to your profile.
    AddTag { tag: String },
    /// Remove a tag from your profile.
    RemoveTag { tag: String },
    SetActive {
        #[arg(action = ArgAction::Set)]
        active: bool,
    },
    ActivateReview { id: String },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    // Logs go to stderr; stdout carries command output.
    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

pub async fn run() -> ExitCode {
    // Load .env locally; safe to ignore when not present.
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    init_tracing();

    let mut settings = Settings::from_env();
    if let Some(api_url) = cli.api_url {
        settings.api_url = api_url;
    }
    if let Some(auth_url) = cli.auth_url {
        settings.auth_url = auth_url;
    }
    if let Some(token_path) = cli.token_path {
        settings.token_path = token_path;
    }
    if let Some(tags_path) = cli.tags_path {
        settings.tags_path = tags_path;
    }
    tracing::debug!(api_url = %settings.api_url, auth_url = %settings.auth_url, "backend configured");

    let client = match BackendClient::new(
        settings.api_url.clone(),
        settings.auth_url.clone(),
        settings.http_timeout,
    ) {
        Ok(client) => client,
        Err(error) => {
            tracing::error!(%error, "invalid backend configuration");
            return ExitCode::FAILURE;
        }
    };

    let gateway = Arc::new(SessionGateway::new(
        Arc::new(client),
        Arc::new(FileTokenStore::new(settings.token_path.clone())),
        Arc::new(SystemClock),
        Arc::new(TracingErrorSink),
    ));
    let state = AppState::new(gateway);
    let credential = cli.init_data.unwrap_or_default();

    match execute(&state, &settings, &credential, cli.command).await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

// Run one command; the error text is generic and never carries backend messages.
pub async fn execute(
    state: &AppState,
    settings: &Settings,
    credential: &str,
    command: Command,
) -> Result<String, &'static str> {
    match command {
        Command::Login => state
            .login
            .authenticate(credential)
            .await
            .then(|| "Signed in".to_string())
            .ok_or("Authentication failed"),
        Command::Orders { page, size, tag } => state
            .orders
            .list(credential, size, page, tag.as_deref())
            .await
            .map(|orders| presenter::render_order_page(&orders, page))
            .ok_or(presenter::LOAD_FAILED),
        Command::Order { id } => state
            .orders
            .details(credential, &id)
            .await
            .map(|details| presenter::render_order_details(&details))
            .ok_or(presenter::ORDER_MISSING),
        Command::Respond { id, message } => state
            .orders
            .respond(credential, &id, &message)
            .await
            .map(|response_id| format!("Responded to order: {response_id}"))
            .ok_or("Could not respond to the order"),
        Command::Responses => {
            let responses = state.responses.list(credential).await;
            Ok(presenter::render_responses(&responses))
        }
        Command::Profile => state
            .profile
            .get(credential)
            .await
            .map(|profile| presenter::render_profile(&profile))
            .ok_or(presenter::LOAD_FAILED),
        Command::SetName { name } => {
            updated(state.profile.set_name(credential, &name).await, "Name saved")
        }
        Command::SetBio { bio } => {
            updated(state.profile.set_bio(credential, &bio).await, "Bio saved")
        }
        Command::SetTags { tags } => {
            updated(state.profile.set_tags(credential, &tags).await, "Tags saved")
        }
        Command::Tags { search } => {
            let catalog = load_catalog(&settings.tags_path).await?;
            let found = filter_tags(&catalog, search.as_deref().unwrap_or_default());
            if found.is_empty() {
                Ok(NO_TAGS_FOUND.to_string())
            } else {
                Ok(found.join("\n"))
            }
        }
        Command::AddTag { tag } => {
            let catalog = load_catalog(&settings.tags_path).await?;
            if !catalog.iter().any(|known| known == tag.trim()) {
                return Err("Unknown tag");
            }
            updated(state.profile.add_tag(credential, &tag).await, "Tag added")
        }
        Command::RemoveTag { tag } => {
            updated(state.profile.remove_tag(credential, &tag).await, "Tag removed")
        }
        Command::SetActive { active } => updated(
            state.profile.set_active(credential, active).await,
            presenter::status_label(active),
        ),
        Command::ActivateReview { id } => updated(
            state.profile.activate_review(credential, &id).await,
            "Review activated",
        ),
    }
}

async fn load_catalog(path: &Path) -> Result<Vec<String>, &'static str> {
    match tokio::fs::read_to_string(path).await {
        Ok(raw) => Ok(parse_tag_catalog(&raw)),
        Err(error) => {
            tracing::warn!(path = %path.display(), %error, "tag catalog unavailable");
            Err(CATALOG_FAILED)
        }
    }
}

fn updated(ok: bool, message: &str) -> Result<String, &'static str> {
    if ok {
        Ok(message.to_string())
    } else {
        Err("Update failed")
    }
}
