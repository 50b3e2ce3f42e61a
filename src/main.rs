use std::fs::OpenOptions;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use forkful::{
    api::{HttpRecipeApi, RecipeApi},
    config::AppConfig,
    controllers::restore_likes,
    state::AppState,
    storage::{KeyValueStore, MemoryStore, SqliteStore},
    tui::{
        app::{AppAction, Command, ForkfulApp},
        runtime::{Fetched, Fetcher, apply, dispatch, load_fragment},
    },
};
use log::{info, warn};
use ratatui::{Terminal, backend::Backend, backend::CrosstermBackend};
use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};

const TICK: Duration = Duration::from_millis(100);

/// Search recipes, scale them, build a shopping list and keep favourites
#[derive(Parser, Debug)]
#[command(name = "forkful", version)]
struct Args {
    /// Configuration file (defaults to forkful.toml if present)
    #[arg(long)]
    config: Option<String>,

    /// Search to run on startup
    #[arg(long)]
    query: Option<String>,

    /// Recipe id to open on startup, with or without a leading '#'
    #[arg(long)]
    recipe: Option<String>,
}

fn init_logging(path: &str) -> anyhow::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();

    Ok(())
}

async fn open_store(database_url: &str) -> Box<dyn KeyValueStore> {
    match SqliteStore::open(database_url).await {
        Ok(store) => Box::new(store),
        Err(e) => {
            warn!("Likes will only be kept for this session: {}", e);
            Box::new(MemoryStore::new())
        }
    }
}

async fn run<B: Backend>(
    terminal: &mut Terminal<B>,
    state: &mut AppState,
    store: &dyn KeyValueStore,
    fetcher: &Fetcher,
    rx: &mut UnboundedReceiver<Fetched>,
) -> anyhow::Result<()> {
    let mut app = ForkfulApp::new();

    loop {
        while let Ok(fetched) = rx.try_recv() {
            apply(state, fetched);
        }

        terminal.draw(|frame| app.render(state, frame))?;

        if !event::poll(TICK)? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        let (action, commands) = app.handle_key(key.code, state);
        for command in commands {
            dispatch(command, state, store, fetcher).await;
        }
        if matches!(action, AppAction::Quit) {
            return Ok(());
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = AppConfig::load(args.config.as_deref()).context("Failed to load configuration")?;
    init_logging(&config.log_file)?;
    info!("Starting forkful against {}", config.api_base_url);

    let store = open_store(&config.database_url).await;
    let api: Arc<dyn RecipeApi> = Arc::new(HttpRecipeApi::new(
        &config.api_base_url,
        config.request_timeout(),
    )?);
    let (tx, mut rx) = unbounded_channel();
    let fetcher = Fetcher::new(api, config.unit_table(), config.default_servings, tx);

    let mut state = AppState::new(config.results_per_page);
    restore_likes(&mut state, store.as_ref()).await;

    if let Some(fragment) = &args.recipe {
        load_fragment(&mut state, fragment, &fetcher);
    }
    if let Some(query) = args.query {
        dispatch(Command::Search(query), &mut state, store.as_ref(), &fetcher).await;
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut state, store.as_ref(), &fetcher, &mut rx).await;

    // Cleanup terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    if let Some(list) = &state.list {
        info!("Leaving with {} shopping list items", list.len());
    }

    result
}
