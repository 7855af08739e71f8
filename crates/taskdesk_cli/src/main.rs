use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use std::io::{self, BufRead};
use taskdesk_cli::cli::{CONFIG_OVERRIDE_FLAG, Cli, Command, collect_config_overrides};
use taskdesk_cli::console::{ConsoleNotifier, PromptConfirmer};
use taskdesk_cli::render;
use taskdesk_core::config::{Config, ConfigLoad, ConfigOverrides, Palette};
use taskdesk_core::deletion::{DeletionOutcome, FixedAnswer};
use taskdesk_core::form::TaskForm;
use taskdesk_core::notify::desktop_notifier;
use taskdesk_core::submission::{SubmissionKind, SubmissionOutcome};
use taskdesk_core::{AppError, TaskDesk};
use tracing_subscriber::EnvFilter;

const LOG_ENV_VAR: &str = "TASKDESK_LOG";

struct Session {
    desk: TaskDesk,
    palette: Palette,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
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

fn resolve_config(base_url: Option<&str>, raw_overrides: &[String]) -> Result<Config, AppError> {
    let loaded = ConfigLoad::discover();
    if let Some(err) = loaded.error.as_ref() {
        eprintln!("WARNING: using default configuration: {err}");
    }

    let overrides = collect_config_overrides(raw_overrides).map_err(AppError::invalid_input)?;
    let mut config = loaded
        .config
        .with_overrides(&ConfigOverrides::from_env())
        .with_overrides(&overrides);
    if let Some(url) = base_url {
        config.base_url = Some(url.to_string());
    }
    Ok(config)
}

fn open_session(config: &Config) -> Result<Session, AppError> {
    let palette = config.palette();
    let notifier = ConsoleNotifier::new(
        palette.clone(),
        desktop_notifier(config.desktop_notifications),
    );
    let desk = TaskDesk::from_config(config, Box::new(notifier))?;
    tracing::debug!(base_url = ?config.base_url, "session opened");
    Ok(Session { desk, palette })
}

fn print_submission_json(outcome: &SubmissionOutcome) -> Result<(), AppError> {
    let kind = match outcome.kind {
        SubmissionKind::Created => "created",
        SubmissionKind::Updated => "updated",
    };
    let json = serde_json::json!({
        "result": kind,
        "photoUrl": outcome.photo_url,
        "task": outcome.task,
    });
    println!("{}", render::to_json(&json)?);
    Ok(())
}

async fn run_command(
    command: Command,
    json: bool,
    session: &mut Session,
    input: &mut dyn BufRead,
) -> Result<(), AppError> {
    match command {
        Command::List => {
            let tasks = session.desk.refresh_tasks().await?;
            if json {
                println!("{}", render::to_json(tasks)?);
            } else {
                println!("{}", render::task_table(tasks, &session.palette));
            }
        }
        Command::Users => {
            let users = session.desk.load_users().await?;
            if json {
                println!("{}", render::to_json(users)?);
            } else {
                println!("{}", render::user_table(users, &session.palette));
            }
        }
        Command::Show { id } => {
            let task = session.desk.show_task(id).await?;
            if json {
                println!("{}", render::to_json(&task)?);
            } else {
                println!("{}", render::task_detail(&task, &session.palette));
            }
        }
        Command::Add { fields } => {
            let mut form = TaskForm::create();
            fields.apply_to(&mut form);
            let title = form.fields.title.clone();

            let outcome = session.desk.add_task(&mut form).await?;
            if json {
                print_submission_json(&outcome)?;
            } else {
                match outcome.task.as_ref() {
                    Some(task) => println!("Added task: {} ({})", task.title, task.id),
                    None => println!("Added task: {title}"),
                }
            }
        }
        Command::Update { id, fields } => {
            let mut form = session.desk.edit_form(id).await?;
            fields.apply_to(&mut form);

            let outcome = session.desk.update_task(&mut form).await?;
            if json {
                print_submission_json(&outcome)?;
            } else {
                println!("Updated task: {} ({})", form.fields.title, id);
            }
        }
        Command::Delete { id, yes } => {
            let outcome = if yes {
                session.desk.delete_task(id, &mut FixedAnswer(true)).await?
            } else {
                let mut prompt_out = io::stderr();
                let mut confirmer = PromptConfirmer::new(input, &mut prompt_out);
                session.desk.delete_task(id, &mut confirmer).await?
            };

            let deleted = matches!(outcome, DeletionOutcome::Deleted(_));
            if json {
                let json = serde_json::json!({ "id": id, "deleted": deleted });
                println!("{}", render::to_json(&json)?);
            } else if deleted {
                println!("Deleted task: {id}");
            } else {
                println!("Delete cancelled");
            }
        }
    }

    Ok(())
}

async fn run_once(cli: Cli) -> Result<(), AppError> {
    let config = resolve_config(cli.base_url.as_deref(), &cli.config_override)?;
    let mut session = open_session(&config)?;
    let stdin = io::stdin();
    let mut input = stdin.lock();
    run_command(cli.command, cli.json, &mut session, &mut input).await
}

async fn print_tasks_after_refresh(session: &mut Session) {
    match session.desk.sync().await {
        Ok(true) => println!(
            "{}",
            render::task_table(session.desk.board().tasks(), &session.palette)
        ),
        Ok(false) => {}
        Err(err) => eprintln!("ERROR: {}", err),
    }
}

async fn run_interactive() -> Result<(), AppError> {
    let config = resolve_config(None, &[])?;
    let mut session = open_session(&config)?;

    match session.desk.refresh_tasks().await {
        Ok(tasks) => println!("{}", render::task_table(tasks, &session.palette)),
        Err(err) => eprintln!("ERROR: {}", err),
    }

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
        argv.push("taskdesk".to_string());
        argv.extend(args);

        let cli = match Cli::try_parse_from(argv) {
            Ok(cli) => cli,
            Err(err) => {
                eprintln!("ERROR: {}", normalize_parse_error(err));
                continue;
            }
        };

        if cli.base_url.is_some() || !cli.config_override.is_empty() {
            eprintln!(
                "ERROR: {}",
                AppError::invalid_input(format!(
                    "--base-url and {CONFIG_OVERRIDE_FLAG} are only accepted when starting taskdesk"
                ))
            );
            continue;
        }

        if let Err(err) = run_command(cli.command, cli.json, &mut session, &mut stdin_lock).await {
            eprintln!("ERROR: {}", err);
        }

        print_tasks_after_refresh(&mut session).await;
    }

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_tracing();

    let mut args = std::env::args_os();
    args.next();
    if args.next().is_none() {
        if let Err(err) = run_interactive().await {
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
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
            ) {
                err.exit();
            }
            eprintln!("ERROR: {}", normalize_parse_error(err));
            std::process::exit(1);
        }
    };

    if let Err(err) = run_once(cli).await {
        eprintln!("ERROR: {}", err);
        std::process::exit(1);
    }
}
