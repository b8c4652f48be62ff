use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{ModelConfig, SimilarService, SolveService, TutorServices};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

const MATHJAX_HEAD: &str = r#"
<script>
window.MathJax = {
    tex: {
        inlineMath: [['\\(', '\\)']],
        displayMath: [['\\[', '\\]']],
        processEscapes: true
    },
    svg: { fontCache: 'global' },
    startup: { typeset: false }
};
</script>
<script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-svg.js"></script>
"#;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidModel { raw: String },
    InvalidBaseUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidModel { raw } => write!(f, "invalid --model value: {raw:?}"),
            ArgsError::InvalidBaseUrl { raw } => write!(f, "invalid --base-url value: {raw}"),
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
    services: TutorServices,
}

impl UiApp for DesktopApp {
    fn solve_service(&self) -> Arc<SolveService> {
        self.services.solve()
    }

    fn similar_service(&self) -> Arc<SimilarService> {
        self.services.similar()
    }

    fn model_configured(&self) -> bool {
        self.services.is_configured()
    }
}

/// Command-line overrides on top of the `TUTOR_AI_*` environment.
#[derive(Debug, Default, PartialEq, Eq)]
struct Args {
    model: Option<String>,
    base_url: Option<String>,
}

enum Parsed {
    Run(Args),
    Help,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--model <name>] [--base-url <url>]");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  TUTOR_AI_API_KEY   model API key (falls back to API_KEY)");
    eprintln!("  TUTOR_AI_MODEL     default {}", services::config::DEFAULT_MODEL);
    eprintln!("  TUTOR_AI_BASE_URL  default {}", services::config::DEFAULT_BASE_URL);
    eprintln!("  RUST_LOG           log filter, default info");
}

impl Args {
    fn parse(args: impl IntoIterator<Item = String>) -> Result<Parsed, ArgsError> {
        let mut args = args.into_iter();
        let mut parsed = Self::default();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--model" => {
                    let value = require_value(&mut args, "--model")?;
                    if value.trim().is_empty() || value.contains('/') {
                        return Err(ArgsError::InvalidModel { raw: value });
                    }
                    parsed.model = Some(value);
                }
                "--base-url" => {
                    let value = require_value(&mut args, "--base-url")?;
                    if !(value.starts_with("http://") || value.starts_with("https://")) {
                        return Err(ArgsError::InvalidBaseUrl { raw: value });
                    }
                    parsed.base_url = Some(value);
                }
                "--help" | "-h" => return Ok(Parsed::Help),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Parsed::Run(parsed))
    }

    fn apply(self, config: Option<ModelConfig>) -> Option<ModelConfig> {
        let Some(mut config) = config else {
            if self.model.is_some() || self.base_url.is_some() {
                warn!("--model/--base-url ignored: no API key is configured");
            }
            return None;
        };
        if let Some(model) = self.model {
            config = config.with_model(model);
        }
        if let Some(base_url) = self.base_url {
            config = config.with_base_url(base_url);
        }
        Some(config)
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let parsed = Args::parse(std::env::args().skip(1)).map_err(|e| {
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

    init_tracing();

    let config = args.apply(ModelConfig::from_env());
    if config.is_none() {
        warn!("TUTOR_AI_API_KEY is not set; every model request will fail");
    }
    let services = TutorServices::from_config(config);

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp { services });
    let context = build_app_context(&app);

    let desktop_cfg = DesktopConfig::new()
        .with_custom_head(MATHJAX_HEAD.to_string())
        .with_window(
            WindowBuilder::new()
                .with_title("Math Tutor")
                .with_always_on_top(false),
        );

    info!("launching tutor window");
    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|item| (*item).to_string()).collect()
    }

    #[test]
    fn parses_overrides() {
        let Ok(Parsed::Run(parsed)) =
            Args::parse(args(&["--model", "gemini-2.5-pro", "--base-url", "http://localhost:8080"]))
        else {
            panic!("expected run");
        };
        assert_eq!(parsed.model.as_deref(), Some("gemini-2.5-pro"));
        assert_eq!(parsed.base_url.as_deref(), Some("http://localhost:8080"));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(
            Args::parse(args(&["--model"])),
            Err(ArgsError::MissingValue { flag: "--model" })
        ));
        assert!(matches!(
            Args::parse(args(&["--base-url", "ftp://x"])),
            Err(ArgsError::InvalidBaseUrl { .. })
        ));
        assert!(matches!(
            Args::parse(args(&["--deck-id", "1"])),
            Err(ArgsError::UnknownArg(_))
        ));
        assert!(matches!(Args::parse(args(&["-h"])), Ok(Parsed::Help)));
    }

    #[test]
    fn overrides_apply_only_with_a_key() {
        let overrides = Args {
            model: Some("m".into()),
            base_url: None,
        };
        assert!(overrides.apply(None).is_none());

        let overrides = Args {
            model: Some("m".into()),
            base_url: Some("http://local".into()),
        };
        let config = overrides.apply(Some(ModelConfig::new("key"))).unwrap();
        assert_eq!(config.model, "m");
        assert_eq!(config.base_url, "http://local");
    }
}
