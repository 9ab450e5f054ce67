use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use goals_core::model::StudentId;
use goals_core::progress::GoalsOverview;
use services::{AppServices, DeletePolicy, GoalBackend, GoalsApiConfig, GoalsService};
use tracing::info;
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context, window_title};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidStudentId { raw: String },
    InvalidApiUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidStudentId { raw } => write!(f, "invalid --student value: {raw}"),
            ArgsError::InvalidApiUrl { raw } => write!(f, "invalid --api value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    services: AppServices,
}

impl UiApp for DesktopApp {
    fn student_id(&self) -> StudentId {
        self.services.student_id()
    }

    fn goals_service(&self) -> Arc<GoalsService> {
        self.services.goals()
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- ui     [--api <url>] [--token <token>] [--student <id>]");
    eprintln!("  cargo run -p app -- demo   [--student <id>]");
    eprintln!("  cargo run -p app -- status [--api <url>] [--token <token>] [--student <id>]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --invalidate-progress   also refetch progress counters after a delete");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --api http://localhost:8000/api");
    eprintln!("  --student 1");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  GOALS_API_URL, GOALS_API_TOKEN, GOALS_STUDENT_ID, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Demo,
    Status,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "demo" => Some(Self::Demo),
            "status" => Some(Self::Status),
            _ => None,
        }
    }
}

struct Args {
    api_url: Option<String>,
    token: Option<String>,
    student_id: StudentId,
    policy: DeletePolicy,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut student_id = std::env::var("GOALS_STUDENT_ID")
            .ok()
            .and_then(|value| value.parse::<StudentId>().ok())
            .unwrap_or(StudentId::new(1));
        let mut api_url = None;
        let mut token = None;
        let mut policy = DeletePolicy::default();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--api" => {
                    let value = require_value(args, "--api")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidApiUrl { raw: value });
                    }
                    api_url = Some(value);
                }
                "--token" => token = Some(require_value(args, "--token")?),
                "--student" => {
                    let value = require_value(args, "--student")?;
                    student_id = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidStudentId { raw: value.clone() })?;
                }
                "--invalidate-progress" => policy.invalidate_progress = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            api_url,
            token,
            student_id,
            policy,
        })
    }

    fn api_config(&self) -> Result<GoalsApiConfig, Box<dyn std::error::Error>> {
        let config = match &self.api_url {
            Some(url) => GoalsApiConfig::new(url, std::env::var("GOALS_API_TOKEN").ok())?,
            None => GoalsApiConfig::from_env()?,
        };
        Ok(match &self.token {
            Some(token) => config.with_token(Some(token.clone())),
            None => config,
        })
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn print_overview(student: StudentId, overview: &GoalsOverview) {
    println!("Goals for student {student}");
    if overview.is_empty() {
        println!("  No goals set yet.");
        return;
    }
    for card in overview.cards() {
        let goal = &card.goal;
        println!(
            "  {:<7} {:>4} / {:<4} {:>3}%  {}",
            goal.kind(),
            card.progress,
            goal.target(),
            card.classification.percentage,
            card.classification.status.label()
        );
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // Launching the UI is the default when no subcommand is given.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Ui,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Ui,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let parsed = Args::parse(&mut iter).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let backend = match cmd {
        Command::Demo => GoalBackend::Demo,
        Command::Ui | Command::Status => GoalBackend::Http(parsed.api_config()?),
    };
    if let GoalBackend::Http(config) = &backend {
        info!(api = %config.base_url(), student = %parsed.student_id, "using goals api");
    } else {
        info!(student = %parsed.student_id, "using demo data");
    }
    let services = AppServices::new(backend, parsed.student_id, parsed.policy);

    if cmd == Command::Status {
        let overview = services.goals().overview(services.student_id()).await?;
        print_overview(services.student_id(), &overview);
        return Ok(());
    }

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp { services });
    let context = build_app_context(&app);

    let desktop_cfg = DesktopConfig::new()
        .with_window(WindowBuilder::new().with_title(window_title(parsed.student_id)));

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        // Binary glue: report once and exit.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
