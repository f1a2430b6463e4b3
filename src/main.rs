mod cli;
mod render;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use cribinfo_client::config::AppConfig;
use cribinfo_client::models::CITIES;
use cribinfo_client::notify::{LogNotifier, Notifier, ToastKind, DEFAULT_TOAST_DURATION};
use cribinfo_client::search::{HttpSearchBackend, SearchBackend, SearchOrchestrator};
use cribinfo_client::store::{into_refs, SearchStore};
use cribinfo_client::theme::ThemeStore;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::from_env()?;

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .init();

    let cli = Cli::parse();

    let backend: Arc<dyn SearchBackend> = Arc::new(HttpSearchBackend::new(&config)?);
    let notifier: Arc<dyn Notifier> = Arc::new(LogNotifier);
    let store = SearchStore::new();
    store.set_city(cli.city.clone());
    store.subscribe(|state| {
        debug!(
            loading = state.is_loading,
            typing = state.is_typing,
            results = state.results.len(),
            compare = state.compare_list.len(),
            "state updated"
        );
    });

    let orchestrator =
        SearchOrchestrator::new(backend.clone(), store, notifier.clone(), config.result_limit);

    match cli.command {
        Commands::Search { query } => run_search(&orchestrator, &query).await,
        Commands::Chat => run_chat(&orchestrator).await,
        Commands::Cities => run_cities(&orchestrator).await,
        Commands::Compare { ids } => run_compare(backend.as_ref(), orchestrator.store(), &ids).await,
        Commands::Theme { toggle } => run_theme(&config, notifier.as_ref(), toggle),
    }
}

async fn run_search(orchestrator: &SearchOrchestrator, query: &str) -> Result<()> {
    let store = orchestrator.store();
    store.set_query(query);

    info!("🏠 Searching for {:?}", query);
    orchestrator.search(None, None).await;

    let state = store.snapshot();
    if let Some(error) = state.error {
        println!("{error}");
        return Ok(());
    }

    info!("✅ Found {} properties", state.results.len());
    println!();
    render::print_results(&state.results);
    Ok(())
}

const CHAT_HELP: &str = "\
Commands:
  /compare <n>   add or remove result n from the compare list
  /table         show the compare table
  /select <n>    show details for result n
  /city <name>   switch city (empty for all cities)
  /clear         clear the conversation
  /reset         clear the conversation and the compare list
  /quit          exit";

async fn run_chat(orchestrator: &SearchOrchestrator) -> Result<()> {
    let store = orchestrator.store();
    println!("Ask for a home, e.g. \"2BHK under 1Cr with gym in Whitefield\". /help for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read input")? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(command) = line.strip_prefix('/') {
            let (name, arg) = command.split_once(' ').unwrap_or((command, ""));
            let arg = arg.trim();
            match name {
                "quit" | "exit" => break,
                "help" => println!("{CHAT_HELP}"),
                "compare" => match result_at(store, arg) {
                    Some(property) => {
                        if !store.is_in_compare(&property.id) && !store.can_add_more() {
                            println!("Compare list is full");
                        }
                        store.toggle_compare(property);
                        render::print_compare(&store.snapshot().compare_list);
                    }
                    None => println!("No result {arg:?}"),
                },
                "table" => render::print_compare(&store.snapshot().compare_list),
                "select" => {
                    let selected = result_at(store, arg);
                    store.select_property(selected);
                    match store.snapshot().selected_property {
                        Some(property) => render::print_property(0, &property),
                        None => println!("No result {arg:?}"),
                    }
                }
                "city" => {
                    store.set_city(arg);
                    println!("Searching in {}", city_label(arg));
                }
                "clear" => store.clear_chat(),
                "reset" => {
                    store.clear_chat();
                    store.clear_compare();
                }
                _ => println!("Unknown command /{name}"),
            }
            continue;
        }

        orchestrator.search_with_chat(line, None).await;
        if let Some(reply) = store.snapshot().messages.last() {
            render::print_message(reply);
        }
    }

    Ok(())
}

/// Result at a 1-based position in the current result list
fn result_at(store: &SearchStore, arg: &str) -> Option<cribinfo_client::models::PropertyRef> {
    let index: usize = arg.parse().ok()?;
    store.snapshot().results.get(index.checked_sub(1)?).cloned()
}

fn city_label(name: &str) -> &str {
    if name.is_empty() {
        return "all cities";
    }
    CITIES
        .iter()
        .find(|(id, _)| *id == name)
        .map(|(_, label)| *label)
        .unwrap_or(name)
}

async fn run_cities(orchestrator: &SearchOrchestrator) -> Result<()> {
    match orchestrator.cities().await {
        Ok(cities) => {
            for city in cities {
                println!("{}", city_label(&city));
            }
        }
        Err(message) => println!("{message}"),
    }
    Ok(())
}

async fn run_compare(backend: &dyn SearchBackend, store: &SearchStore, ids: &[String]) -> Result<()> {
    match backend.compare(ids).await {
        Ok(response) => {
            for property in into_refs(response.properties) {
                store.add_to_compare(property);
            }
            render::print_compare(&store.snapshot().compare_list);
        }
        Err(err) => println!("{}", err.user_message()),
    }
    Ok(())
}

fn run_theme(config: &AppConfig, notifier: &dyn Notifier, toggle: bool) -> Result<()> {
    let path = config
        .theme_file
        .clone()
        .or_else(ThemeStore::default_path)
        .context("No config directory available for the theme preference")?;
    let mut themes = ThemeStore::open(path);

    if toggle {
        let theme = themes.toggle()?;
        notifier.show(
            ToastKind::Success,
            &format!("Switched to {theme} theme"),
            DEFAULT_TOAST_DURATION,
        );
    }
    println!("{}", themes.theme());
    Ok(())
}
