mod cli;
mod i18n;

use crate::cli::{Cli, Command};
use crate::i18n::{SUPPORTED_LANGUAGES, tr};
use clap::{CommandFactory, Parser};
use flexi_logger::{Logger, LoggerHandle};
use once_cell::sync::OnceCell;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tabled::{Table, Tabled};
use taskdeck_core::config;
use taskdeck_core::confirm::{ConfirmGate, ConfirmKind, ConfirmRequest};
use taskdeck_core::error::AppError;
use taskdeck_core::model::{Task, TaskDraft, timestamp};
use taskdeck_core::storage::json_store;
use taskdeck_core::store::TaskStore;

static LOGGER: OnceCell<LoggerHandle> = OnceCell::new();

fn init_logging() {
    let _ = LOGGER.get_or_try_init(|| {
        Logger::try_with_env_or_str("warn")
            .map_err(|err| err.to_string())?
            .log_to_stderr()
            .start()
            .map_err(|err| err.to_string())
    });
}

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "id")]
    id: String,
    #[tabled(rename = "title")]
    title: String,
    #[tabled(rename = "status")]
    status: &'static str,
    #[tabled(rename = "priority")]
    priority: &'static str,
    #[tabled(rename = "due")]
    due: String,
    #[tabled(rename = "created")]
    created: String,
}

fn task_row(task: &Task) -> Result<TaskRow, AppError> {
    Ok(TaskRow {
        id: task.id.clone(),
        title: task.title.clone(),
        status: if task.completed { "completed" } else { "pending" },
        priority: task.priority.label(),
        due: match task.due_date {
            Some(date) => timestamp::format_date(date)?,
            None => "-".to_string(),
        },
        created: task.created_at.format()?,
    })
}

fn print_tasks_table(tasks: &[Task], lang: &str) -> Result<(), AppError> {
    if tasks.is_empty() {
        println!("{}", tr(lang, "tasks.empty"));
        return Ok(());
    }

    let rows = tasks.iter().map(task_row).collect::<Result<Vec<_>, _>>()?;
    println!("{}", Table::new(rows));
    Ok(())
}

fn task_json(task: &Task) -> Result<serde_json::Value, AppError> {
    serde_json::to_value(task).map_err(|err| AppError::invalid_data(err.to_string()))
}

fn print_task_json(task: &Task) -> Result<(), AppError> {
    println!("{}", task_json(task)?);
    Ok(())
}

fn print_tasks_json(tasks: &[Task]) -> Result<(), AppError> {
    let payload = tasks.iter().map(task_json).collect::<Result<Vec<_>, _>>()?;
    println!("{}", serde_json::Value::Array(payload));
    Ok(())
}

fn normalize_parse_error(err: clap::Error) -> AppError {
    let rendered = err.to_string();
    let first_line = rendered.lines().next().unwrap_or("invalid command").trim();
    let message = first_line
        .strip_prefix("error: ")
        .unwrap_or(first_line)
        .to_string();
    AppError::invalid_input(message)
}

fn split_command_line(line: &str) -> Result<Vec<String>, AppError> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut escape = false;

    for ch in line.chars() {
        if escape {
            if ch != '"' && ch != '\\' {
                current.push('\\');
            }
            current.push(ch);
            escape = false;
            continue;
        }

        if in_quotes && ch == '\\' {
            escape = true;
            continue;
        }

        if ch == '"' {
            in_quotes = !in_quotes;
            continue;
        }

        if ch.is_whitespace() && !in_quotes {
            if !current.is_empty() {
                args.push(current.clone());
                current.clear();
            }
            continue;
        }

        current.push(ch);
    }

    if in_quotes {
        return Err(AppError::invalid_input("unterminated quote in command"));
    }

    if !current.is_empty() {
        args.push(current);
    }

    Ok(args)
}

fn print_help() {
    let mut cmd = Cli::command();
    let help = cmd.render_help();
    println!("{help}");
}

/// Renders the front of the gate queue and reads a yes/no answer. With
/// `assume_yes` the front request resolves accepted without prompting.
fn prompt_confirmation(
    gate: &mut ConfirmGate,
    assume_yes: bool,
    input: &mut dyn BufRead,
) -> Result<bool, AppError> {
    if !gate.is_open() {
        return Ok(false);
    }

    if assume_yes {
        return Ok(gate.resolve(true).is_some_and(|decision| decision.accepted));
    }

    if let Some((_, request)) = gate.current() {
        println!("{}: {}", request.title, request.message);
        print!("{} / {} [y/N] ", request.confirm_label, request.cancel_label);
    }
    io::stdout()
        .flush()
        .map_err(|err| AppError::io(err.to_string()))?;

    let mut answer = String::new();
    input
        .read_line(&mut answer)
        .map_err(|err| AppError::io(err.to_string()))?;
    let accepted = matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes");

    Ok(gate
        .resolve(accepted)
        .is_some_and(|decision| decision.accepted))
}

fn run_command(
    cli: Cli,
    store: &mut TaskStore,
    lang: &str,
    input: &mut dyn BufRead,
) -> Result<(), AppError> {
    match cli.command {
        Command::Add {
            title,
            description,
            priority,
            due,
        } => {
            let due_date = due.as_deref().map(timestamp::parse_date).transpose()?;
            let draft = TaskDraft {
                title: title.unwrap_or_default(),
                description,
                priority: priority.into(),
                due_date,
            };

            let task = store.add(draft)?;
            if cli.json {
                print_task_json(&task)?;
            } else {
                println!("{}: {} ({})", tr(lang, "task.added"), task.title, task.id);
            }
        }
        Command::Edit {
            id,
            title,
            description,
            priority,
            due,
            clear_due,
        } => {
            let mut edited = store
                .tasks()
                .iter()
                .find(|task| task.id == id)
                .cloned()
                .ok_or_else(|| AppError::invalid_input(tr(lang, "task.not_found")))?;

            if let Some(title) = title {
                let trimmed = title.trim();
                if trimmed.is_empty() {
                    return Err(AppError::invalid_input("title is required"));
                }
                edited.title = trimmed.to_string();
            }
            if let Some(description) = description {
                edited.description = if description.trim().is_empty() {
                    None
                } else {
                    Some(description)
                };
            }
            if let Some(priority) = priority {
                edited.priority = priority.into();
            }
            if clear_due {
                edited.due_date = None;
            } else if let Some(due) = due.as_deref() {
                edited.due_date = Some(timestamp::parse_date(due)?);
            }

            let updated = store
                .update(edited)
                .ok_or_else(|| AppError::invalid_input(tr(lang, "task.not_found")))?;
            if cli.json {
                print_task_json(&updated)?;
            } else {
                println!(
                    "{}: {} ({})",
                    tr(lang, "task.updated"),
                    updated.title,
                    updated.id
                );
            }
        }
        Command::Toggle { id } => {
            let task = store
                .toggle(&id)
                .ok_or_else(|| AppError::invalid_input(tr(lang, "task.not_found")))?;
            if cli.json {
                print_task_json(&task)?;
            } else {
                let key = if task.completed {
                    "task.completed"
                } else {
                    "task.reopened"
                };
                println!("{}: {} ({})", tr(lang, key), task.title, task.id);
            }
        }
        Command::Delete { id } => {
            if !store.tasks().iter().any(|task| task.id == id) {
                return Err(AppError::invalid_input(tr(lang, "task.not_found")));
            }

            let mut gate = ConfirmGate::new();
            gate.request(
                ConfirmRequest::new(
                    tr(lang, "confirm.delete.title"),
                    tr(lang, "confirm.delete.message"),
                )
                .kind(ConfirmKind::Danger)
                .labels(tr(lang, "confirm.accept"), tr(lang, "confirm.cancel")),
            );

            if !prompt_confirmation(&mut gate, cli.yes, input)? {
                println!("{}", tr(lang, "action.cancelled"));
                return Ok(());
            }

            let removed = store
                .delete(&id)
                .ok_or_else(|| AppError::invalid_input(tr(lang, "task.not_found")))?;
            if cli.json {
                print_task_json(&removed)?;
            } else {
                println!(
                    "{}: {} ({})",
                    tr(lang, "task.deleted"),
                    removed.title,
                    removed.id
                );
            }
        }
        Command::Clear => {
            let mut gate = ConfirmGate::new();
            gate.request(
                ConfirmRequest::new(
                    tr(lang, "confirm.clear.title"),
                    tr(lang, "confirm.clear.message"),
                )
                .kind(ConfirmKind::Danger)
                .labels(tr(lang, "confirm.accept"), tr(lang, "confirm.cancel")),
            );

            if !prompt_confirmation(&mut gate, cli.yes, input)? {
                println!("{}", tr(lang, "action.cancelled"));
                return Ok(());
            }

            store.clear_all();
            if cli.json {
                println!("{}", serde_json::json!({ "cleared": true }));
            } else {
                println!("{}", tr(lang, "tasks.cleared"));
            }
        }
        Command::List {
            filter,
            sort,
            search,
        } => {
            store.set_filter(filter.into());
            store.set_sort(sort.into());
            store.set_search_query(search);

            let tasks = store.filtered_tasks();
            if cli.json {
                print_tasks_json(&tasks)?;
            } else {
                print_tasks_table(&tasks, lang)?;
            }
        }
        Command::Export { dir } => {
            let dir = dir.map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));
            let path = store.export_tasks(&dir)?;
            if cli.json {
                println!(
                    "{}",
                    serde_json::json!({ "exported": path.display().to_string() })
                );
            } else {
                println!("{}: {}", tr(lang, "export.done"), path.display());
            }
        }
        Command::Import { file } => {
            let count = store.import_tasks(Path::new(&file))?;
            if cli.json {
                println!("{}", serde_json::json!({ "imported": count }));
            } else {
                println!("{}: {} ({count})", tr(lang, "import.done"), file);
            }
        }
        Command::Info => {
            let info = store.storage_info();
            if cli.json {
                let last_saved = match info.last_saved {
                    Some(stamp) => serde_json::Value::String(stamp.format()?),
                    None => serde_json::Value::Null,
                };
                println!(
                    "{}",
                    serde_json::json!({
                        "lastSaved": last_saved,
                        "taskCount": info.task_count,
                    })
                );
            } else if store.has_stored_data() {
                if let Some(stamp) = info.last_saved {
                    println!("{}: {}", tr(lang, "info.last_saved"), stamp.format()?);
                }
                println!("{}: {}", tr(lang, "info.task_count"), info.task_count);
            } else {
                println!("{}", tr(lang, "info.no_data"));
            }
        }
    }

    if let Some(err) = store.last_save_error() {
        eprintln!("WARN: {} - {}", tr(lang, "warn.autosave"), err.message());
    }

    Ok(())
}

fn resolve_language(flag: Option<&str>) -> String {
    if let Some(raw) = flag {
        match config::canonical_language(raw) {
            Some(lang) => return lang,
            None => log::warn!(
                "unsupported language `{raw}`, supported: {}",
                SUPPORTED_LANGUAGES.join(", ")
            ),
        }
    }

    let load = config::load_config_with_fallback();
    if let Some(err) = load.error {
        log::warn!("config load failed: {err}");
    }
    config::language_or_default(&load.config)
}

fn run(cli: Cli) -> Result<(), AppError> {
    let lang = resolve_language(cli.lang.as_deref());
    let mut store = TaskStore::new(json_store::store_path()?);
    store.load();

    let stdin = io::stdin();
    let mut input = stdin.lock();
    run_command(cli, &mut store, &lang, &mut input)
}

fn run_interactive() -> Result<(), AppError> {
    let lang = resolve_language(None);
    let mut store = TaskStore::new(json_store::store_path()?);
    store.load();

    let mut input = String::new();
    let stdin = io::stdin();
    let mut stdin_lock = stdin.lock();

    loop {
        input.clear();
        let bytes = stdin_lock
            .read_line(&mut input)
            .map_err(|err| AppError::io(err.to_string()))?;

        if bytes == 0 {
            break;
        }

        let line = input.trim();
        if line.is_empty() {
            continue;
        }

        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            break;
        }

        if line == "help" || line == "?" {
            print_help();
            continue;
        }

        let args = match split_command_line(line) {
            Ok(args) => args,
            Err(err) => {
                eprintln!("ERROR: {}", err);
                continue;
            }
        };

        if args.is_empty() {
            continue;
        }

        let mut argv = Vec::with_capacity(args.len() + 1);
        argv.push("taskdeck".to_string());
        argv.extend(args);

        let cli = match Cli::try_parse_from(argv) {
            Ok(cli) => cli,
            Err(err) => {
                eprintln!("ERROR: {}", normalize_parse_error(err));
                continue;
            }
        };

        if let Err(err) = run_command(cli, &mut store, &lang, &mut stdin_lock) {
            eprintln!("ERROR: {}", err);
        }
    }

    Ok(())
}

fn main() {
    init_logging();

    let mut args = std::env::args_os();
    args.next();
    if args.next().is_none() {
        if let Err(err) = run_interactive() {
            eprintln!("ERROR: {}", err);
            std::process::exit(1);
        }
        return;
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            if matches!(
                err.kind(),
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion
            ) {
                print!("{err}");
                return;
            }
            eprintln!("ERROR: {}", normalize_parse_error(err));
            std::process::exit(1);
        }
    };

    if let Err(err) = run(cli) {
        eprintln!("ERROR: {}", err);
        std::process::exit(1);
    }
}
