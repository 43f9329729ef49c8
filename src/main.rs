use anyhow::Context;
use clap::Parser;
use site_search::cli::Cli;
use site_search::{
    Catalog, ManualScheduler, SearchConfig, SearchSession, TerminalRenderer, TokioScheduler,
};
use std::rc::Rc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::LocalSet;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    site_search::tracing::init(cli.verbose);

    let config = cli.search_config()?;
    let catalog = Rc::new(cli.load_catalog().inspect_err(|e| {
        tracing::error!("Catalog rejected: {:#}", e);
    })?);
    let renderer = TerminalRenderer::new(std::io::stdout(), cli.format);

    match cli.query {
        Some(query) => {
            search_once(catalog, renderer, &config, &query);
            Ok(())
        }
        None => LocalSet::new()
            .run_until(search_interactive(catalog, renderer, config))
            .await,
    }
}

/// Run a single query through the session without waiting in real time.
fn search_once(
    catalog: Rc<Catalog>,
    renderer: TerminalRenderer<std::io::Stdout>,
    config: &SearchConfig,
    query: &str,
) {
    let clock = ManualScheduler::new();
    let mut session = SearchSession::with_config(catalog, clock.clone(), renderer, config);
    session.on_query_changed(query);
    clock.run_until_idle();
}

/// Treat each stdin line as one input event on a live session.
async fn search_interactive(
    catalog: Rc<Catalog>,
    renderer: TerminalRenderer<std::io::Stdout>,
    config: SearchConfig,
) -> anyhow::Result<()> {
    tracing::info!("Reading queries from stdin ({} documents)", catalog.len());

    let mut session = SearchSession::with_config(catalog, TokioScheduler, renderer, &config);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        session.on_query_changed(&line);
    }

    // Let the last search settle before exiting.
    while session.is_pending() {
        tokio::time::sleep(config.settle_delay()).await;
    }

    tracing::debug!("Input closed after {} searches", session.searches_run());
    Ok(())
}
