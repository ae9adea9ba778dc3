//! Terminal shell for countrydeck.
//!
//! Every command loads the current records first, dispatches UI events
//! through [`handle_event`], and prints either the rendered screen or the
//! store's error message.

use clap::{Parser, Subcommand};
use countrydeck::domain::sample::sample_countries;
use countrydeck::ui::{render, render_detail};
use countrydeck::{
    handle_event, initialize, observability, Action, Backend, Config, CountryDeckError, CountryDraft,
    CountryPatch, CountryStore, Event, SyncPolicy, Toggle,
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "countrydeck")]
#[command(version, about = "Browse and edit a hosted country catalogue", long_about = None)]
struct Cli {
    /// Config file (default: <config_dir>/countrydeck/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the configured backend (rest, file, memory)
    #[arg(long, global = true)]
    backend: Option<Backend>,

    /// Override the sync policy (confirm, optimistic)
    #[arg(long, global = true)]
    policy: Option<SyncPolicy>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List countries
    List {
        /// Case-insensitive match on name or capital
        #[arg(long)]
        search: Option<String>,

        /// Group by continent instead (search does not apply)
        #[arg(long)]
        by_continent: bool,
    },
    /// Show one country
    Show { id: String },
    /// Add a country
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        capital: String,
        #[arg(long)]
        continent: String,
        #[arg(long)]
        flag: String,
    },
    /// Remove a country
    Remove { id: String },
    /// Change fields of a country
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        capital: Option<String>,
        #[arg(long)]
        continent: Option<String>,
        #[arg(long)]
        flag: Option<String>,
    },
    /// Insert the sample countries
    Seed,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    /// Message already recorded in the store's error field.
    #[error("{0}")]
    Store(String),

    #[error(transparent)]
    App(#[from] CountryDeckError),
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let mut config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };
    if let Some(backend) = cli.backend {
        config.backend = backend;
    }
    if let Some(policy) = cli.policy {
        config.sync_policy = policy;
    }

    observability::init_tracing(&config);

    let result = match initialize(&config) {
        Ok(store) => run(&store, cli.command).await,
        Err(e) => Err(e.into()),
    };

    match result {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(store: &CountryStore, command: Commands) -> Result<String, CliError> {
    dispatch(store, Event::Refresh).await?;

    match command {
        Commands::List { search, by_continent } => {
            if let Some(text) = search {
                dispatch(store, Event::SetSearchText(text)).await?;
            }
            if by_continent {
                dispatch(store, Event::SetToggle(Toggle::Continent)).await?;
            }
        }
        Commands::Show { id } => {
            let actions = dispatch(store, Event::Select(id)).await?;
            if let Some(Action::OpenDetail(detail)) = actions.into_iter().next() {
                return Ok(render_detail(&detail));
            }
        }
        Commands::Add { name, capital, continent, flag } => {
            let draft = CountryDraft::new(name, capital, continent, flag);
            dispatch(store, Event::Add(draft)).await?;
        }
        Commands::Remove { id } => {
            dispatch(store, Event::Remove(id)).await?;
        }
        Commands::Update { id, name, capital, continent, flag } => {
            let patch = CountryPatch {
                name,
                capital,
                continent,
                flag,
            };
            dispatch(store, Event::Update { id, patch }).await?;
        }
        Commands::Seed => {
            for country in sample_countries() {
                dispatch(store, Event::Add(CountryDraft::from(&country))).await?;
            }
        }
    }

    Ok(render(&store.viewmodel()))
}

/// Handles `event`, turning a surfaced store error into a command failure.
async fn dispatch(store: &CountryStore, event: Event) -> Result<Vec<Action>, CliError> {
    let (_render, actions) = handle_event(store, event).await?;

    if let Some(Action::ShowError(message)) =
        actions.iter().find(|a| matches!(a, Action::ShowError(_)))
    {
        return Err(CliError::Store(message.clone()));
    }
    Ok(actions)
}
