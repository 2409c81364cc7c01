//! docker-captain (captain) - Docker Compose fleet management CLI
//!
//! Detects compose projects under a configured folder, lets you mark them
//! as active, and provides simple commands to start, stop, restart, or list
//! your deployments, individually or all at once.
//!
//! Exit codes: 0 on success; 1 when the projects folder is unset or the
//! compose binary is missing; 2 when the projects folder does not exist or
//! a named project is unknown; anything else is forwarded verbatim from
//! `docker compose`.

use std::{env, fs, path::PathBuf, process};

use clap::Parser;
use colored::Colorize;

mod cli;
mod commands;
mod compose;
mod config;
mod discover;

use cli::{Cli, Commands};
use commands::Context;
use compose::UpOptions;
use config::{CaptainConfig, CaptainFile, PROJECTS_FOLDER_ENV};

fn main() {
    let cli = Cli::parse();

    if !compose::probe() {
        println!("{}", "Error: 'docker compose' not found.".red());
        process::exit(1);
    }

    let ctx = match resolve_context() {
        Ok(ctx) => ctx,
        Err(code) => process::exit(code),
    };

    let code = match cli.command {
        Commands::List { verbose } => commands::list(&ctx, verbose),
        Commands::Manage => commands::manage(&ctx),
        Commands::Start {
            project,
            detach,
            remove_orphans,
        } => commands::start(
            &ctx,
            &project,
            UpOptions {
                detach,
                remove_orphans,
            },
        ),
        Commands::Stop {
            project,
            remove_orphans,
        } => commands::stop(&ctx, &project, remove_orphans),
        Commands::Restart { project } => commands::restart(&ctx, &project),
        Commands::Rally {
            detach,
            remove_orphans,
        } => commands::rally(
            &ctx,
            UpOptions {
                detach,
                remove_orphans,
            },
        ),
        Commands::Abandon { remove_orphans } => commands::abandon(&ctx, remove_orphans),
    };

    process::exit(code);
}

/// Resolve the projects folder from the environment or the persisted config.
///
/// The environment variable wins over the config file. Unset is exit 1,
/// a configured but nonexistent path is exit 2.
fn resolve_context() -> Result<Context, i32> {
    let config = CaptainConfig::load(None);

    let folder = env::var(PROJECTS_FOLDER_ENV)
        .ok()
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .or(config.projects_folder)
        .filter(|path| !path.as_os_str().is_empty());

    let Some(folder) = folder else {
        println!(
            "{} Please set the path containing your Docker Compose projects.\n\
             Either add it to the {} file, or set with:\n\n\
             \x20   export {}=/path/to/your/deployments\n",
            "Error:".red().bold(),
            CaptainConfig::default_path().display(),
            PROJECTS_FOLDER_ENV
        );
        return Err(1);
    };

    let folder = std::path::absolute(&folder).unwrap_or(folder);
    if !folder.exists() {
        println!(
            "{} The configured projects folder {} does not exist.",
            "Error:".red().bold(),
            folder.display()
        );
        return Err(2);
    }
    let _ = fs::create_dir_all(&folder);

    Ok(Context {
        projects_folder: folder,
    })
}
