use std::path::PathBuf;

use chrono::Local;
use clap::{Args, Parser, Subcommand};
use homeschool::net::types::{Assignment, AssignmentStatus, NewAssignment, NewSubject, StudentProfile, Subject};
use homeschool::state::admin::{DeleteOutcome, normalized_for_save, sort_subjects};
use homeschool::state::student::{grade_label, sort_by_due_date};
use homeschool::state::teacher::GRADE_LEVELS;
use homeschool::storage::FileStorage;
use homeschool::util::dates::{DateFilter, format_date, parse_date_input};
use homeschool::{ApiClient, ApiError, AppRoute, ClientConfig, GuardDecision, Role, RouteGuard, Session, SessionStore};

#[cfg(test)]
#[path = "main_test.rs"]
mod main_test;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] homeschool::config::ConfigError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("not logged in; run `homeschool login` first")]
    NotLoggedIn,
    #[error("this command needs the {0} view, which your role cannot open")]
    Forbidden(AppRoute),
    #[error("no config directory found; pass --session-file")]
    NoSessionDir,
    #[error("invalid date `{0}`; expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("subject {0} is used by an assignment and cannot be deleted")]
    SubjectInUse(i64),
    #[error("{0}")]
    Failed(String),
    #[error("the session file could not be updated; later commands will not see this change")]
    NotPersisted,
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

type Store = SessionStore<ApiClient, FileStorage>;

#[derive(Parser, Debug)]
#[command(name = "homeschool", about = "Homeschool Interactive command-line client")]
struct Cli {
    #[arg(long, env = homeschool::config::API_URL_VAR)]
    api_url: Option<String>,

    /// Where the login session is kept between invocations.
    #[arg(long, env = "HOMESCHOOL_SESSION_FILE")]
    session_file: Option<PathBuf>,

    /// Print raw JSON instead of tables.
    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Login(CredentialArgs),
    Logout,
    Status,
    Register(CredentialArgs),
    Subjects(SubjectsCommand),
    Assignments(AssignmentsCommand),
    Student(StudentCommand),
}

#[derive(Args, Debug)]
struct CredentialArgs {
    #[arg(short, long)]
    username: String,

    #[arg(short, long, env = "HOMESCHOOL_PASSWORD", hide_env_values = true)]
    password: String,
}

#[derive(Args, Debug)]
struct SubjectsCommand {
    #[command(subcommand)]
    command: SubjectsSubcommand,
}

#[derive(Subcommand, Debug)]
enum SubjectsSubcommand {
    List,
    Add {
        name: Option<String>,
    },
    Rename {
        subject_id: i64,
        name: String,
    },
    Delete {
        subject_id: i64,
    },
}

#[derive(Args, Debug)]
struct AssignmentsCommand {
    #[command(subcommand)]
    command: AssignmentsSubcommand,
}

#[derive(Subcommand, Debug)]
enum AssignmentsSubcommand {
    List {
        /// today, week or month; everything when omitted.
        #[arg(long)]
        filter: Option<DateFilter>,
    },
    Status {
        assignment_id: i64,
        status: AssignmentStatus,
    },
    Add {
        #[arg(long)]
        subject: i64,
        #[arg(long)]
        due: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        link: Option<String>,
    },
    Delete {
        assignment_id: i64,
    },
}

#[derive(Args, Debug)]
struct StudentCommand {
    #[command(subcommand)]
    command: StudentSubcommand,
}

#[derive(Subcommand, Debug)]
enum StudentSubcommand {
    Show {
        student_id: Option<i64>,
    },
    Update {
        student_id: Option<i64>,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long, value_parser = parse_grade_level)]
        grade_level: Option<u8>,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let _ = dotenvy::dotenv();
    homeschool::logging::init();
    let cli = Cli::parse();

    let mut config = ClientConfig::from_env()?;
    if let Some(url) = &cli.api_url {
        config.api_base_url = url.trim().trim_end_matches('/').to_owned();
    }
    let path = session_path(cli.session_file.clone(), dirs::config_dir())?;
    tracing::debug!(path = %path.display(), api = %config.api_base_url, "starting");

    let store = SessionStore::new(ApiClient::new(&config)?, FileStorage::new(path));
    run(&cli, &store, &config).await
}

async fn run(cli: &Cli, store: &Store, config: &ClientConfig) -> Result<(), CliError> {
    if let Some(route) = route_for(&cli.command) {
        authorize(&RouteGuard::default(), &store.snapshot(), route)?;
    }

    match &cli.command {
        Command::Login(creds) => {
            store.login(&creds.username, &creds.password).await?;
            ensure_persisted(store)?;
            println!("{}", describe_session(&store.snapshot()));
            Ok(())
        }
        Command::Logout => {
            store.logout();
            ensure_persisted(store)?;
            println!("logged out");
            Ok(())
        }
        Command::Status => {
            println!("{}", describe_session(&store.snapshot()));
            Ok(())
        }
        Command::Register(creds) => {
            store.register(&creds.username, &creds.password).await?;
            println!("registered {}", creds.username);
            Ok(())
        }
        Command::Subjects(cmd) => run_subjects(store.api(), &cmd.command, cli.json).await,
        Command::Assignments(cmd) => run_assignments(store.api(), &cmd.command, cli.json).await,
        Command::Student(cmd) => {
            let own_id = default_student_id(&store.snapshot(), config.student_id);
            run_student(store.api(), &cmd.command, own_id, config.student_id, cli.json).await
        }
    }
}

async fn run_subjects(api: &ApiClient, command: &SubjectsSubcommand, json: bool) -> Result<(), CliError> {
    match command {
        SubjectsSubcommand::List => {
            let mut subjects = api.list_subjects().await?;
            sort_subjects(&mut subjects);
            if json {
                return print_json(&subjects);
            }
            for subject in &subjects {
                println!("{:>6}  {}", subject.subject_id, subject.display_name());
            }
            Ok(())
        }
        SubjectsSubcommand::Add { name } => {
            let body = match name {
                Some(name) => NewSubject { name: Some(name.clone()) },
                None => homeschool::state::admin::new_subject(),
            };
            let created = api.create_subject(&body).await?;
            println!("created subject {} ({})", created.subject_id, created.display_name());
            Ok(())
        }
        SubjectsSubcommand::Rename { subject_id, name } => {
            let subject = normalized_for_save(&Subject { subject_id: *subject_id, name: Some(name.clone()) });
            api.update_subject(&subject).await?;
            println!("renamed subject {subject_id}");
            Ok(())
        }
        SubjectsSubcommand::Delete { subject_id } => {
            match DeleteOutcome::from_result(&api.delete_subject(*subject_id).await) {
                DeleteOutcome::Deleted => {
                    println!("deleted subject {subject_id}");
                    Ok(())
                }
                DeleteOutcome::InUse => Err(CliError::SubjectInUse(*subject_id)),
                DeleteOutcome::Failed(message) => Err(CliError::Failed(message)),
            }
        }
    }
}

async fn run_assignments(api: &ApiClient, command: &AssignmentsSubcommand, json: bool) -> Result<(), CliError> {
    match command {
        AssignmentsSubcommand::List { filter } => {
            let mut assignments = match filter {
                Some(filter) => {
                    let range = filter.range(&Local, Local::now().date_naive());
                    api.assignments_in_range(&range).await?
                }
                None => api.list_assignments().await?,
            };
            sort_by_due_date(&mut assignments);
            if json {
                return print_json(&assignments);
            }
            for assignment in &assignments {
                println!("{}", assignment_line(assignment));
            }
            Ok(())
        }
        AssignmentsSubcommand::Status { assignment_id, status } => {
            api.update_assignment_status(*assignment_id, *status).await?;
            println!("assignment {assignment_id} is now {status}");
            Ok(())
        }
        AssignmentsSubcommand::Add { subject, due, description, link } => {
            let body = NewAssignment {
                due_date: due_date_from_input(due)?,
                subject_id: *subject,
                description: description.clone(),
                status: AssignmentStatus::default(),
                link: link.clone().filter(|l| !l.trim().is_empty()),
            };
            let created = api.create_assignment(&body).await?;
            println!("created assignment {}", created.assignment_id);
            Ok(())
        }
        AssignmentsSubcommand::Delete { assignment_id } => {
            api.delete_assignment(*assignment_id).await?;
            println!("deleted assignment {assignment_id}");
            Ok(())
        }
    }
}

async fn run_student(
    api: &ApiClient,
    command: &StudentSubcommand,
    own_id: i64,
    configured_id: i64,
    json: bool,
) -> Result<(), CliError> {
    match command {
        StudentSubcommand::Show { student_id } => {
            let profile = api.get_student(student_id.unwrap_or(own_id)).await?;
            if json {
                return print_json(&profile);
            }
            println!("{}", profile.full_name());
            println!("{}", grade_label(&profile));
            Ok(())
        }
        StudentSubcommand::Update { student_id, first_name, last_name, grade_level } => {
            let id = student_id.unwrap_or(configured_id);
            let current = api.get_student(id).await?;
            let updated = merged_profile(current, first_name.clone(), last_name.clone(), *grade_level);
            api.update_student(id, &updated).await?;
            println!("updated student {id}: {}", updated.full_name());
            Ok(())
        }
    }
}

// =============================================================================
// HELPERS
// =============================================================================

/// Explicit path wins; otherwise `<config dir>/homeschool/session.json`.
fn session_path(explicit: Option<PathBuf>, config_dir: Option<PathBuf>) -> Result<PathBuf, CliError> {
    if let Some(path) = explicit {
        return Ok(path);
    }
    config_dir
        .map(|dir| dir.join("homeschool").join("session.json"))
        .ok_or(CliError::NoSessionDir)
}

fn parse_grade_level(raw: &str) -> Result<u8, String> {
    raw.trim()
        .parse::<u8>()
        .ok()
        .filter(|grade| GRADE_LEVELS.contains(grade))
        .ok_or_else(|| format!("grade level must be {}-{}", GRADE_LEVELS.start(), GRADE_LEVELS.end()))
}

fn ensure_persisted(store: &Store) -> Result<(), CliError> {
    if store.is_persisted() { Ok(()) } else { Err(CliError::NotPersisted) }
}

/// View whose access rules gate the command. Session commands are open.
fn route_for(command: &Command) -> Option<AppRoute> {
    match command {
        Command::Login(_) | Command::Logout | Command::Status => None,
        Command::Register(_) => Some(AppRoute::Register),
        Command::Subjects(_) => Some(AppRoute::Admin),
        Command::Assignments(cmd) => match cmd.command {
            AssignmentsSubcommand::Status { .. } => Some(AppRoute::Student),
            _ => Some(AppRoute::Teacher),
        },
        Command::Student(cmd) => match cmd.command {
            StudentSubcommand::Show { .. } => Some(AppRoute::Student),
            StudentSubcommand::Update { .. } => Some(AppRoute::Teacher),
        },
    }
}

fn authorize(guard: &RouteGuard, session: &Session, route: AppRoute) -> Result<(), CliError> {
    match guard.check_route(session, route) {
        GuardDecision::Allow => Ok(()),
        GuardDecision::Redirect { from: Some(_), .. } => Err(CliError::NotLoggedIn),
        GuardDecision::Redirect { from: None, .. } => Err(CliError::Forbidden(route)),
    }
}

/// A student reads their own record; staff work on the configured student.
fn default_student_id(session: &Session, configured: i64) -> i64 {
    match (session.role(), session.user_id()) {
        (Some(Role::Student), Some(user_id)) => user_id,
        _ => configured,
    }
}

fn describe_session(session: &Session) -> String {
    match (session.role(), session.user_id()) {
        (Some(role), Some(user_id)) if session.is_logged_in() => {
            format!("logged in as {role} (user {user_id}); home view {}", AppRoute::home_for(role).path())
        }
        _ => match session.login_error() {
            Some(error) => format!("not logged in: {error}"),
            None => "not logged in".to_owned(),
        },
    }
}

fn assignment_line(assignment: &Assignment) -> String {
    format!(
        "{:>6}  {}  {:<10}  {:<12}  {}",
        assignment.assignment_id,
        format_date(&assignment.due_date),
        assignment.status,
        assignment.subject_name(),
        assignment.description
    )
}

fn due_date_from_input(raw: &str) -> Result<chrono::DateTime<chrono::Utc>, CliError> {
    parse_date_input(raw)
        .map(|day| day.and_time(chrono::NaiveTime::MIN).and_utc())
        .ok_or_else(|| CliError::InvalidDate(raw.to_owned()))
}

fn merged_profile(
    current: StudentProfile,
    first_name: Option<String>,
    last_name: Option<String>,
    grade_level: Option<u8>,
) -> StudentProfile {
    StudentProfile {
        first_name: first_name.unwrap_or(current.first_name),
        last_name: last_name.unwrap_or(current.last_name),
        grade_level: grade_level.or(current.grade_level),
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
