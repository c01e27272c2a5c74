use clap::Parser;
use directories::ProjectDirs;
use greenlab::api::GreenlabApi;
use greenlab::config::GreenlabConfig;
use greenlab::error::{GreenlabError, Result};
use greenlab::store::fs_backend::FsBackend;
use std::path::PathBuf;
use tracing::{debug, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod args;
mod cli;

use args::{Cli, Commands, VERSION};
use cli::handlers::{self, AppContext};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(mut cli: Cli) -> Result<()> {
    debug!(version = VERSION, release = env!("IS_RELEASE"), "starting greenlab");

    // Calculators need no stored state
    let command = match cli.command.take() {
        Some(Commands::Calc(calc)) => return handlers::handle_calc(calc),
        other => other,
    };

    let mut ctx = init_context(&cli)?;

    match command {
        Some(Commands::Catalog {
            search,
            category,
            care,
            sun,
        }) => handlers::handle_catalog(&ctx, search, category, care, sun),
        Some(Commands::Plant { plant }) => handlers::handle_plant(&ctx, &plant),
        Some(Commands::Fav { plant }) => handlers::handle_fav(&mut ctx, &plant),
        Some(Commands::Favs) => handlers::handle_favs(&ctx),
        Some(Commands::Project(command)) => handlers::handle_project(&mut ctx, command),
        Some(Commands::Journal(command)) => handlers::handle_journal(&mut ctx, command),
        Some(Commands::Config { key, value }) => handlers::handle_config(&mut ctx, key, value),
        Some(Commands::Reset { yes }) => handlers::handle_reset(&mut ctx, yes),
        Some(Commands::Calc(_)) => Ok(()),
        None => handlers::handle_overview(&ctx),
    }
}

fn resolve_data_dir(cli: &Cli) -> Result<PathBuf> {
    if let Some(dir) = &cli.data_dir {
        return Ok(dir.clone());
    }
    ProjectDirs::from("org", "greenlab", "greenlab")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| {
            GreenlabError::Store("Could not determine a data directory, pass --data-dir".into())
        })
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = resolve_data_dir(cli)?;
    debug!(data_dir = %data_dir.display(), "using data directory");

    let config = GreenlabConfig::load(&data_dir).unwrap_or_else(|e| {
        warn!(error = %e, "ignoring unreadable config, using defaults");
        GreenlabConfig::default()
    });
    let api = GreenlabApi::new(FsBackend::new(data_dir.clone()), config);

    Ok(AppContext { api, data_dir })
}
