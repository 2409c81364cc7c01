//! User-facing commands
//!
//! Every command is a single pass: discover projects, consult the persisted
//! records as needed, act, and hand back a process exit code. Nothing is
//! cached between invocations.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use colored::Colorize;
use dialoguer::{MultiSelect, theme::ColorfulTheme};

use crate::{
    compose::{self, UpOptions},
    config::{CaptainData, CaptainFile},
    discover::discover_projects,
};

/// Per-invocation state threaded into every command.
pub struct Context {
    pub projects_folder: PathBuf,
}

/// List discovered projects with their active and running state.
pub fn list(ctx: &Context, verbose: bool) -> i32 {
    let projects = discover_projects(&ctx.projects_folder);
    let data = CaptainData::load(None);
    let running = compose::running_projects();

    println!(
        "{}",
        format!("Projects in {}", ctx.projects_folder.display()).blue()
    );
    println!();

    if verbose {
        println!(
            "  {:<28} {:^8} {:^8} {}",
            "PROJECT", "ACTIVE", "RUNNING", "COMPOSE FILE"
        );
    } else {
        println!("  {:<28} {:^8} {:^8}", "PROJECT", "ACTIVE", "RUNNING");
    }
    println!("  {}", "-".repeat(if verbose { 80 } else { 46 }));

    for (name, compose_path) in &projects {
        let active = if data.active_projects.contains(name) {
            "✓"
        } else {
            ""
        };
        let is_running = if running.contains(name) { "✓" } else { "" };

        if verbose {
            println!(
                "  {:<28} {:^8} {:^8} {}",
                name.bright_white(),
                active,
                is_running,
                compose_path.display()
            );
        } else {
            println!(
                "  {:<28} {:^8} {:^8}",
                name.bright_white(),
                active,
                is_running
            );
        }
    }

    0
}

/// Interactively replace the active-project set.
pub fn manage(ctx: &Context) -> i32 {
    let projects = discover_projects(&ctx.projects_folder);
    let names: Vec<String> = projects.keys().cloned().collect();
    let mut data = CaptainData::load(None);

    if names.is_empty() {
        println!(
            "{} No projects found in {}.",
            "⚠".yellow(),
            ctx.projects_folder.display()
        );
        return 1;
    }

    let checked: Vec<bool> = names
        .iter()
        .map(|name| data.active_projects.contains(name))
        .collect();

    let selection = MultiSelect::with_theme(&ColorfulTheme::default())
        .with_prompt("Select active projects (space to toggle, enter to confirm)")
        .items(&names)
        .defaults(&checked)
        .interact_opt();

    let indices = match selection {
        Ok(Some(indices)) => indices,
        Ok(None) => {
            println!("{}", "Aborted (no changes made).".yellow());
            return 0;
        }
        Err(err) => {
            println!("{} {}", "✗".red(), err);
            return 1;
        }
    };

    let mut active: Vec<String> = indices.into_iter().map(|i| names[i].clone()).collect();
    active.sort();
    active.dedup();

    data.active_projects = active;
    data.save(None);
    println!(
        "{} Saved {} active project(s) to {}",
        "✓".green(),
        data.active_projects.len(),
        CaptainData::default_path().display()
    );

    0
}

/// Start a single project with `docker compose up`.
pub fn start(ctx: &Context, project: &str, opts: UpOptions) -> i32 {
    let projects = discover_projects(&ctx.projects_folder);
    let Some(compose_file) = require_project(project, &projects) else {
        return 2;
    };
    compose::up(compose_file, &opts)
}

/// Stop a single project with `docker compose down`.
pub fn stop(ctx: &Context, project: &str, remove_orphans: bool) -> i32 {
    let projects = discover_projects(&ctx.projects_folder);
    let Some(compose_file) = require_project(project, &projects) else {
        return 2;
    };
    compose::down(compose_file, remove_orphans)
}

/// Restart a single project with `docker compose restart`.
pub fn restart(ctx: &Context, project: &str) -> i32 {
    let projects = discover_projects(&ctx.projects_folder);
    let Some(compose_file) = require_project(project, &projects) else {
        return 2;
    };
    compose::restart(compose_file)
}

/// Start all active projects.
pub fn rally(ctx: &Context, opts: UpOptions) -> i32 {
    let projects = discover_projects(&ctx.projects_folder);
    let data = CaptainData::load(None);

    if data.active_projects.is_empty() {
        print_empty_active_hint();
        return 0;
    }

    run_batch(&projects, &data.active_projects, |compose_file| {
        compose::up(compose_file, &opts)
    })
}

/// Stop all active projects.
pub fn abandon(ctx: &Context, remove_orphans: bool) -> i32 {
    let projects = discover_projects(&ctx.projects_folder);
    let data = CaptainData::load(None);

    if data.active_projects.is_empty() {
        print_empty_active_hint();
        return 0;
    }

    run_batch(&projects, &data.active_projects, |compose_file| {
        compose::down(compose_file, remove_orphans)
    })
}

fn print_empty_active_hint() {
    println!(
        "{}",
        format!(
            "No active projects found in {}. Run `captain manage` first.",
            CaptainData::default_path().display()
        )
        .yellow()
    );
}

fn require_project<'a>(
    project: &str,
    projects: &'a BTreeMap<String, PathBuf>,
) -> Option<&'a Path> {
    match projects.get(project) {
        Some(compose_file) => Some(compose_file.as_path()),
        None => {
            println!("{}", format!("No such project: {}", project).red());
            None
        }
    }
}

/// Run one compose action per active project, in stored order.
///
/// The exit code is the first non-zero per-project result; later results do
/// not overwrite it. A name missing from discovery is skipped, recorded as
/// a failure, and the loop carries on.
fn run_batch(
    projects: &BTreeMap<String, PathBuf>,
    active: &[String],
    mut run: impl FnMut(&Path) -> i32,
) -> i32 {
    let mut exit_code = 0;

    for name in active {
        let Some(compose_file) = projects.get(name) else {
            println!("{}", format!("Skipping {}: project not found.", name).red());
            if exit_code == 0 {
                exit_code = 1;
            }
            continue;
        };

        let rc = run(compose_file);
        if exit_code == 0 {
            exit_code = rc;
        }
    }

    exit_code
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(names: &[&str]) -> BTreeMap<String, PathBuf> {
        names
            .iter()
            .map(|name| {
                (
                    name.to_string(),
                    PathBuf::from(format!("/srv/{}/compose.yaml", name)),
                )
            })
            .collect()
    }

    #[test]
    fn test_run_batch_empty_active_runs_nothing() {
        let projects = fixture(&["a", "b"]);
        let mut calls = 0;

        let code = run_batch(&projects, &[], |_| {
            calls += 1;
            0
        });

        assert_eq!(code, 0);
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_run_batch_first_nonzero_wins() {
        let projects = fixture(&["a", "b", "c"]);
        let active = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let mut results = vec![0, 17, 3].into_iter();

        let code = run_batch(&projects, &active, |_| results.next().unwrap());

        assert_eq!(code, 17);
    }

    #[test]
    fn test_run_batch_missing_project_skips_but_continues() {
        let projects = fixture(&["y"]);
        let active = vec!["x".to_string(), "y".to_string()];
        let mut ran: Vec<PathBuf> = Vec::new();

        let code = run_batch(&projects, &active, |compose_file| {
            ran.push(compose_file.to_path_buf());
            0
        });

        // The skip is recorded as a failure even though `y` succeeds.
        assert_eq!(code, 1);
        assert_eq!(ran, vec![PathBuf::from("/srv/y/compose.yaml")]);
    }

    #[test]
    fn test_run_batch_success_then_failure_records_failure() {
        let projects = fixture(&["a", "b"]);
        let active = vec!["a".to_string(), "b".to_string()];
        let mut results = vec![0, 5].into_iter();

        let code = run_batch(&projects, &active, |_| results.next().unwrap());

        assert_eq!(code, 5);
    }
}
