use anyhow::{bail, Result};

use crate::config;
use crate::model::task::Task;
use crate::notion::{error::friendly_message, NotionClient};
use crate::sprint;

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Panel,
    List { json: bool },
    Help,
}

/// Supported forms:
///   sprint
///   sprint list [--json]
///   sprint help | -h | --help
pub fn parse_args(args: &[String]) -> Result<Command> {
    let Some(first) = args.first() else {
        return Ok(Command::Panel);
    };

    match first.as_str() {
        "help" | "-h" | "--help" => Ok(Command::Help),
        "list" => {
            let mut json = false;
            for arg in &args[1..] {
                match arg.as_str() {
                    "--json" => json = true,
                    other => bail!("Unknown option for `sprint list`: {other}"),
                }
            }
            Ok(Command::List { json })
        }
        other => bail!("Unknown command: {other}\n\nRun `sprint help` for usage."),
    }
}

/// Run one fetch cycle and print the result.
pub async fn handle_list(json: bool) -> Result<()> {
    let prefs = config::load_config()?;
    let client = NotionClient::new(&prefs);

    let tasks = match sprint::load_tasks(&client, &prefs).await {
        Ok(tasks) => tasks,
        Err(e) => {
            tracing::error!(error = %e, "list failed");
            bail!("{}", friendly_message(&e.to_string()));
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&tasks)?);
    } else {
        for task in &tasks {
            println!("{}", format_task_line(task));
        }
    }
    Ok(())
}

pub fn format_task_line(task: &Task) -> String {
    format!("{}\t{}\t{}", task.task_id, task.title, task.status)
}

pub fn print_help() {
    println!("sprint — open tasks of the current sprint, from Notion\n");
    println!("USAGE:");
    println!("  sprint               Launch the task panel");
    println!("  sprint list          Print the tasks, one per line (id, title, status)");
    println!("  sprint list --json   Print the tasks as JSON");
    println!();
    println!("PANEL KEYS:");
    println!("  type       Filter by ID, title or status");
    println!("  enter      Exit and print the selected task ID");
    println!("  ctrl+y     Copy the task ID");
    println!("  ctrl+t     Copy \"ID: title\"");
    println!("  ctrl+r     Refresh");
    println!("  esc        Clear the search, or quit");
    println!();
    println!("CONFIG (~/.sprint-tasks/config.toml, or $SPRINT_TASKS_CONFIG):");
    println!("  [notion]");
    println!("  token = \"secret_...\"");
    println!();
    println!("  [sprints]");
    println!("  database_id = \"...\"");
    println!("  status_property = \"Status\"");
    println!();
    println!("  [tasks]");
    println!("  database_id = \"...\"");
    println!("  id_property = \"ID\"");
    println!("  status_property = \"Status\"");
    println!("  sprint_property = \"Sprint\"");
    println!();
    println!("Logs go to ~/.sprint-tasks/sprint-tasks.log (level via $SPRINT_TASKS_LOG).");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(strs: &[&str]) -> Vec<String> {
        strs.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn no_args_opens_panel() {
        assert_eq!(parse_args(&args(&[])).unwrap(), Command::Panel);
    }

    #[test]
    fn list_with_and_without_json() {
        assert_eq!(parse_args(&args(&["list"])).unwrap(), Command::List { json: false });
        assert_eq!(
            parse_args(&args(&["list", "--json"])).unwrap(),
            Command::List { json: true }
        );
    }

    #[test]
    fn help_aliases() {
        for flag in ["help", "-h", "--help"] {
            assert_eq!(parse_args(&args(&[flag])).unwrap(), Command::Help);
        }
    }

    #[test]
    fn unknown_command_fails() {
        let err = parse_args(&args(&["deploy"])).unwrap_err();
        assert!(err.to_string().contains("Unknown command"));
    }

    #[test]
    fn unknown_list_option_fails() {
        let err = parse_args(&args(&["list", "--yaml"])).unwrap_err();
        assert!(err.to_string().contains("--yaml"));
    }

    #[test]
    fn task_line_is_tab_separated() {
        let task = Task {
            id: "p1".into(),
            task_id: "TASK-7".into(),
            title: "Fix login bug".into(),
            status: "Doing".into(),
            url: None,
        };
        assert_eq!(format_task_line(&task), "TASK-7\tFix login bug\tDoing");
    }
}
