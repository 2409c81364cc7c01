//! Docker Compose invocation
//!
//! Thin wrapper around the external `docker compose` binary. Each verb runs
//! against a single compose file, inherits the terminal so progress output
//! stays interactive, and reports an exit code instead of an error: 0 on
//! success, the child's own code on failure, 1 when the binary cannot be
//! launched.

use std::{io, path::Path, process::Command};

use colored::Colorize;
use serde::Deserialize;
use thiserror::Error;

/// Options forwarded to `docker compose up`.
#[derive(Debug, Default, Clone, Copy)]
pub struct UpOptions {
    pub detach: bool,
    pub remove_orphans: bool,
}

#[derive(Debug, Error)]
enum ComposeError {
    #[error("Error executing docker compose: {0}")]
    Launch(#[from] io::Error),
    #[error("Command failed with exit code {0}")]
    Exit(i32),
}

/// Check once at startup that the compose binary can be invoked at all.
pub fn probe() -> bool {
    Command::new("docker")
        .args(["compose", "version"])
        .output()
        .is_ok()
}

/// Run `docker compose up` for a single project.
pub fn up(compose_file: &Path, opts: &UpOptions) -> i32 {
    let mut flags: Vec<&str> = Vec::new();
    if opts.detach {
        flags.push("--detach");
    }
    if opts.remove_orphans {
        flags.push("--remove-orphans");
    }
    run(compose_file, "up", &flags)
}

/// Run `docker compose down` for a single project.
pub fn down(compose_file: &Path, remove_orphans: bool) -> i32 {
    let flags: &[&str] = if remove_orphans {
        &["--remove-orphans"]
    } else {
        &[]
    };
    run(compose_file, "down", flags)
}

/// Run `docker compose restart` for a single project.
pub fn restart(compose_file: &Path) -> i32 {
    run(compose_file, "restart", &[])
}

fn run(compose_file: &Path, action: &str, flags: &[&str]) -> i32 {
    let project = project_name(compose_file);
    println!(
        "{}",
        format!("──── {} {} ────", action.to_uppercase(), project)
            .blue()
            .bold()
    );

    match invoke(compose_file, action, flags) {
        Ok(()) => {
            println!(
                "{} {} succeeded for {}",
                "✓".green(),
                action,
                project.bright_white()
            );
            0
        }
        Err(ComposeError::Exit(code)) => {
            println!("{} Command failed with exit code {}", "✗".red(), code);
            code
        }
        Err(err) => {
            println!("{} {}", "✗".red(), err);
            1
        }
    }
}

fn invoke(compose_file: &Path, action: &str, flags: &[&str]) -> Result<(), ComposeError> {
    let status = Command::new("docker")
        .args(["compose", "-f"])
        .arg(compose_file)
        .arg(action)
        .args(flags)
        .status()?;

    if status.success() {
        Ok(())
    } else {
        // A signal death carries no code; treat it as a plain failure.
        Err(ComposeError::Exit(status.code().unwrap_or(1)))
    }
}

/// Projects are named after the directory holding the compose file.
fn project_name(compose_file: &Path) -> String {
    compose_file
        .parent()
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[derive(Debug, Deserialize)]
struct LsEntry {
    #[serde(rename = "Name")]
    name: Option<String>,
    #[serde(rename = "Status", default)]
    status: String,
}

/// Query `docker compose ls` for projects whose status is "running".
///
/// Any failure, whether the tool cannot be launched or the output does not
/// parse, degrades to an empty list with a warning.
pub fn running_projects() -> Vec<String> {
    let output = match Command::new("docker")
        .args(["compose", "ls", "--format", "json"])
        .output()
    {
        Ok(output) => output,
        Err(err) => {
            println!(
                "{} Warning: could not determine running projects ({})",
                "⚠".yellow(),
                err
            );
            return Vec::new();
        }
    };

    let stdout = String::from_utf8_lossy(&output.stdout);
    match parse_running(&stdout) {
        Ok(names) => names,
        Err(err) => {
            println!(
                "{} Warning: could not determine running projects ({})",
                "⚠".yellow(),
                err
            );
            Vec::new()
        }
    }
}

fn parse_running(json: &str) -> Result<Vec<String>, serde_json::Error> {
    let entries: Vec<LsEntry> = serde_json::from_str(json)?;

    Ok(entries
        .into_iter()
        .filter(|entry| entry.status.to_lowercase().starts_with("running"))
        .filter_map(|entry| entry.name)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_running_filters_by_status_prefix() {
        let json = r#"[
            {"Name": "web", "Status": "running(3)", "ConfigFiles": "/srv/web/compose.yaml"},
            {"Name": "db", "Status": "exited(1)", "ConfigFiles": "/srv/db/compose.yaml"},
            {"Name": "cache", "Status": "Running(1)", "ConfigFiles": "/srv/cache/compose.yaml"}
        ]"#;

        let running = parse_running(json).unwrap();

        assert_eq!(running, vec!["web".to_string(), "cache".to_string()]);
    }

    #[test]
    fn test_parse_running_skips_nameless_entries() {
        let json = r#"[{"Status": "running(1)"}]"#;

        let running = parse_running(json).unwrap();

        assert!(running.is_empty());
    }

    #[test]
    fn test_parse_running_rejects_malformed_output() {
        assert!(parse_running("not json at all").is_err());
        assert!(parse_running("").is_err());
    }

    #[test]
    fn test_project_name_is_parent_directory() {
        let name = project_name(Path::new("/srv/deployments/calibre/compose.yaml"));
        assert_eq!(name, "calibre");
    }
}
