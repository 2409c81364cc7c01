//! CLI command definitions for docker-captain
//!
//! This module contains all the clap-based command definitions and argument parsing.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "captain")]
#[command(about = "Manage multiple Docker Compose projects", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List discovered projects and show which are active and running
    List {
        /// Show compose file paths
        #[arg(short, long)]
        verbose: bool,
    },
    /// Interactively select which projects are active
    Manage,
    /// Start a single project with `docker compose up`
    Start {
        /// Project folder name (e.g. calibre)
        project: String,
        /// Run with --detach
        #[arg(short, long)]
        detach: bool,
        /// Include --remove-orphans
        #[arg(long)]
        remove_orphans: bool,
    },
    /// Stop a single project with `docker compose down`
    Stop {
        /// Project folder name (e.g. calibre)
        project: String,
        /// Include --remove-orphans
        #[arg(long)]
        remove_orphans: bool,
    },
    /// Restart a single project with `docker compose restart`
    Restart {
        /// Project folder name (e.g. calibre)
        project: String,
    },
    /// Start all active projects
    Rally {
        /// Run with --detach
        #[arg(short, long)]
        detach: bool,
        /// Include --remove-orphans
        #[arg(long)]
        remove_orphans: bool,
    },
    /// Stop all active projects
    Abandon {
        /// Include --remove-orphans
        #[arg(long)]
        remove_orphans: bool,
    },
}
