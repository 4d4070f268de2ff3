//! `municipal`: command-line front-end for the municipal records store.
//!
//! Every invocation opens the database (creating it and its schema if
//! needed), runs one command, prints a table or a confirmation line, and
//! exits. Failures are reported on stderr with a non-zero exit status and
//! nothing on stdout.

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use records::model::{
    parse_due_date, NewContact, NewPermit, NewResident, NewServiceRequest, NewTask, PermitStatus,
    RecordId, ServiceRequestStatus, TaskStatus,
};
use records::{Database, PersistenceError, Registry};

mod commands;
mod config;
mod render;

/// Top-level CLI arguments.
#[derive(Parser)]
#[command(name = "municipal", about = "Municipal back-office records")]
struct Cli {
    /// SQLite database file. Created, with its directory, if missing.
    #[arg(long, global = true, default_value_os_t = config::get_db_path())]
    db: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage residents.
    Resident {
        #[command(subcommand)]
        action: ResidentAction,
    },
    /// Manage service requests.
    Sr {
        #[command(subcommand)]
        action: ServiceRequestAction,
    },
    /// Manage permits.
    Permit {
        #[command(subcommand)]
        action: PermitAction,
    },
    /// Manage department contacts.
    Contact {
        #[command(subcommand)]
        action: ContactAction,
    },
    /// Manage follow-up tasks.
    Task {
        #[command(subcommand)]
        action: TaskAction,
    },
    /// Write every record to one JSON document.
    Export {
        /// Destination file.
        #[arg(short, long, default_value_os_t = config::get_export_path())]
        output: PathBuf,
    },
}

#[derive(Subcommand)]
enum ResidentAction {
    /// Add a resident.
    Add {
        name: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        address: Option<String>,
    },
    /// List residents.
    List,
}

#[derive(Subcommand)]
enum ServiceRequestAction {
    /// Open a service request.
    Open {
        #[arg(long)]
        category: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        resident_id: Option<RecordId>,
    },
    /// List service requests, newest first.
    List {
        /// Only show requests in this status (open, in_progress, closed).
        #[arg(long)]
        status: Option<ServiceRequestStatus>,
    },
    /// Change the status of a service request.
    Update {
        id: RecordId,
        status: ServiceRequestStatus,
    },
}

#[derive(Subcommand)]
enum PermitAction {
    /// Submit a permit application.
    Apply {
        #[arg(long = "type")]
        permit_type: String,
        #[arg(long)]
        resident_id: Option<RecordId>,
    },
    /// Record a decision. Only the outcome `approved` approves; anything
    /// else rejects.
    Decide {
        id: RecordId,
        #[arg(long)]
        outcome: String,
    },
    /// List permits, newest first.
    List {
        /// Only show permits in this status (pending, approved, rejected).
        #[arg(long)]
        status: Option<PermitStatus>,
    },
}

#[derive(Subcommand)]
enum ContactAction {
    /// Add a department contact.
    Add {
        department: String,
        name: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
    /// List contacts.
    List {
        #[arg(long)]
        department: Option<String>,
    },
}

#[derive(Subcommand)]
enum TaskAction {
    /// Add a task.
    Add {
        title: String,
        /// Due date as YYYY-MM-DD.
        #[arg(long, value_parser = parse_due_date)]
        due: Option<NaiveDate>,
        #[arg(long)]
        assigned_to: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// List tasks.
    List {
        /// Only show tasks in this status (todo, in_progress, done).
        #[arg(long)]
        status: Option<TaskStatus>,
    },
    /// Change the status of a task.
    Update { id: RecordId, status: TaskStatus },
}

/// Error type for CLI operations.
#[derive(Debug, thiserror::Error)]
enum CliError {
    /// The store rejected the operation or failed.
    #[error("{0}")]
    Records(#[from] PersistenceError),

    /// Writing to stdout failed.
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let db = Database::open(&cli.db).await?;
    let registry = Registry::new(&db);
    let mut out = std::io::stdout();

    let result = dispatch(&registry, cli.command, &mut out).await;
    db.close().await;
    result
}

async fn dispatch(
    registry: &Registry,
    command: Commands,
    out: &mut impl std::io::Write,
) -> Result<(), CliError> {
    match command {
        Commands::Resident { action } => match action {
            ResidentAction::Add {
                name,
                email,
                phone,
                address,
            } => {
                let new = NewResident {
                    name,
                    email,
                    phone,
                    address,
                };
                commands::add_resident(registry, new, out).await
            }
            ResidentAction::List => commands::list_residents(registry, out).await,
        },
        Commands::Sr { action } => match action {
            ServiceRequestAction::Open {
                category,
                description,
                resident_id,
            } => {
                let new = NewServiceRequest {
                    resident_id,
                    category,
                    description,
                };
                commands::open_request(registry, new, out).await
            }
            ServiceRequestAction::List { status } => {
                commands::list_requests(registry, status, out).await
            }
            ServiceRequestAction::Update { id, status } => {
                commands::update_request(registry, id, status, out).await
            }
        },
        Commands::Permit { action } => match action {
            PermitAction::Apply {
                permit_type,
                resident_id,
            } => {
                let new = NewPermit {
                    resident_id,
                    permit_type,
                };
                commands::apply_permit(registry, new, out).await
            }
            PermitAction::Decide { id, outcome } => {
                commands::decide_permit(registry, id, &outcome, out).await
            }
            PermitAction::List { status } => commands::list_permits(registry, status, out).await,
        },
        Commands::Contact { action } => match action {
            ContactAction::Add {
                department,
                name,
                email,
                phone,
            } => {
                let new = NewContact {
                    department,
                    name,
                    email,
                    phone,
                };
                commands::add_contact(registry, new, out).await
            }
            ContactAction::List { department } => {
                commands::list_contacts(registry, department.as_deref(), out).await
            }
        },
        Commands::Task { action } => match action {
            TaskAction::Add {
                title,
                due,
                assigned_to,
                notes,
            } => {
                let new = NewTask {
                    title,
                    due_date: due,
                    assigned_to,
                    notes,
                };
                commands::add_task(registry, new, out).await
            }
            TaskAction::List { status } => commands::list_tasks(registry, status, out).await,
            TaskAction::Update { id, status } => {
                commands::update_task(registry, id, status, out).await
            }
        },
        Commands::Export { output } => commands::export(registry, &output, out).await,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr so stdout carries only command output.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(config::DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    tracing::debug!(db = %cli.db.display(), "opening database");

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = ?err, "command failed");
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_task_add_with_due_date() {
        let cli = Cli::try_parse_from([
            "municipal",
            "task",
            "add",
            "Inspect hydrant",
            "--due",
            "2024-07-01",
            "--assigned-to",
            "J. Ortiz",
        ])
        .unwrap();
        match cli.command {
            Commands::Task {
                action:
                    TaskAction::Add {
                        title,
                        due,
                        assigned_to,
                        notes,
                    },
            } => {
                assert_eq!(title, "Inspect hydrant");
                assert_eq!(due, NaiveDate::from_ymd_opt(2024, 7, 1));
                assert_eq!(assigned_to.as_deref(), Some("J. Ortiz"));
                assert_eq!(notes, None);
            }
            _ => panic!("expected task add"),
        }
        assert_eq!(cli.db, config::get_db_path());
    }

    #[test]
    fn test_rejects_malformed_due_date() {
        let result = Cli::try_parse_from(["municipal", "task", "add", "Paint", "--due", "07/01/2024"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_unknown_status() {
        assert!(Cli::try_parse_from(["municipal", "sr", "update", "1", "reopened"]).is_err());
        assert!(Cli::try_parse_from(["municipal", "permit", "list", "--status", "maybe"]).is_err());
    }

    #[test]
    fn test_parses_permit_apply_type_flag_and_global_db() {
        let cli = Cli::try_parse_from([
            "municipal",
            "permit",
            "apply",
            "--type",
            "fence",
            "--db",
            "/tmp/records.db",
        ])
        .unwrap();
        assert_eq!(cli.db, PathBuf::from("/tmp/records.db"));
        assert!(matches!(
            cli.command,
            Commands::Permit {
                action: PermitAction::Apply { ref permit_type, resident_id: None }
            } if permit_type == "fence"
        ));
    }

    #[test]
    fn test_export_output_defaults() {
        let cli = Cli::try_parse_from(["municipal", "export"]).unwrap();
        match cli.command {
            Commands::Export { output } => assert_eq!(output, config::get_export_path()),
            _ => panic!("expected export"),
        }

        let cli = Cli::try_parse_from(["municipal", "export", "-o", "out.json"]).unwrap();
        match cli.command {
            Commands::Export { output } => assert_eq!(output, PathBuf::from("out.json")),
            _ => panic!("expected export"),
        }
    }

    #[tokio::test]
    async fn test_dispatch_runs_against_file_database() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("data").join("municipal.db");
        let db_arg = db_path.to_str().unwrap();

        for args in [
            vec!["municipal", "--db", db_arg, "resident", "add", "A. Smith"],
            vec!["municipal", "--db", db_arg, "resident", "list"],
        ] {
            let cli = Cli::try_parse_from(args).unwrap();
            let db = Database::open(&cli.db).await.unwrap();
            let registry = Registry::new(&db);
            let mut out = Vec::new();
            dispatch(&registry, cli.command, &mut out).await.unwrap();
            assert!(!out.is_empty());
            db.close().await;
        }
        assert!(db_path.exists());
    }
}
