use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{
    ApiConfig, AppServices, Clock, QuestionAdminService, ResultsService, TestSessionService,
    TestSettings,
};
use tracing::info;
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

#[derive(Debug, PartialEq, Eq)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidApiUrl { raw: String },
    InvalidDuration { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidApiUrl { raw } => write!(f, "invalid --api value: {raw}"),
            ArgsError::InvalidDuration { raw } => write!(f, "invalid --duration value: {raw}"),
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
    fn test_sessions(&self) -> Arc<TestSessionService> {
        self.services.test_sessions()
    }

    fn results(&self) -> Arc<ResultsService> {
        self.services.results()
    }

    fn admin(&self) -> Arc<QuestionAdminService> {
        self.services.admin()
    }
}

#[derive(Debug)]
struct Args {
    api: ApiConfig,
    settings: TestSettings,
}

enum Parsed {
    Run(Args),
    Help,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--api <base_url>] [--duration <secs>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --api http://localhost:5000/api");
    eprintln!("  --duration 3600");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  MOCKTEST_API_URL, MOCKTEST_TIMEOUT_SECS, MOCKTEST_DURATION_SECS, RUST_LOG");
}

impl Args {
    /// Flags override whatever the environment already configured.
    fn parse(
        args: &mut impl Iterator<Item = String>,
        mut api: ApiConfig,
        mut settings: TestSettings,
    ) -> Result<Parsed, ArgsError> {
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--api" => {
                    let value = require_value(args, "--api")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidApiUrl { raw: value });
                    }
                    api = api.with_base_url(value.trim());
                }
                "--duration" => {
                    let value = require_value(args, "--duration")?;
                    settings = value
                        .parse::<u32>()
                        .ok()
                        .and_then(|secs| TestSettings::with_duration_secs(secs).ok())
                        .ok_or_else(|| ArgsError::InvalidDuration { raw: value.clone() })?;
                }
                "--help" | "-h" => return Ok(Parsed::Help),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }
        Ok(Parsed::Run(Self { api, settings }))
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let api = ApiConfig::from_env()?;
    let settings = TestSettings::from_env()?;
    let mut argv = std::env::args().skip(1);
    let parsed = Args::parse(&mut argv, api, settings).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;
    let args = match parsed {
        Parsed::Run(args) => args,
        Parsed::Help => {
            print_usage();
            return Ok(());
        }
    };

    info!(
        api = %args.api.base_url,
        duration_secs = args.settings.duration_secs(),
        "starting mock test"
    );
    let services = AppServices::new_http(&args.api, args.settings, Clock::default_clock())?;
    let app: Arc<dyn UiApp> = Arc::new(DesktopApp { services });
    let context = build_app_context(&app);

    // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("IELTS Mock Test")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
