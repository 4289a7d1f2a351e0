use crate::demo::{run_demo, DemoArgs};
use crate::infra::load_pipeline;
use crate::server;
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use loan_screen::config::{AppConfig, ArtifactConfig};
use loan_screen::error::AppError;
use loan_screen::screening::{ClassifierKind, LoanApplicationRequest, PredictionResponse};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Loan Pre-Screening",
    about = "Serve and exercise the loan pre-screening decision pipeline",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Decide a single application read from a JSON file
    Decide(DecideArgs),
    /// Run decisions over canned applications with built-in artifacts
    Demo(DemoArgs),
}

/// Overrides for where the fitted artifacts live.
#[derive(Args, Debug, Default)]
pub(crate) struct ArtifactArgs {
    /// Directory holding encoder.json, scaler.json and the model file
    #[arg(long)]
    pub(crate) model_dir: Option<PathBuf>,
    /// Classifier to load: logistic or random_forest
    #[arg(long, value_parser = parse_classifier)]
    pub(crate) classifier: Option<ClassifierKind>,
}

impl ArtifactArgs {
    pub(crate) fn apply(self, config: &mut ArtifactConfig) {
        if let Some(model_dir) = self.model_dir {
            config.model_dir = model_dir;
        }
        if let Some(classifier) = self.classifier {
            config.classifier = classifier;
        }
    }
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    #[command(flatten)]
    pub(crate) artifacts: ArtifactArgs,
}

#[derive(Args, Debug)]
pub(crate) struct DecideArgs {
    /// Application JSON file, or `-` for stdin
    #[arg(long)]
    pub(crate) application: PathBuf,
    #[command(flatten)]
    pub(crate) artifacts: ArtifactArgs,
}

fn parse_classifier(raw: &str) -> Result<ClassifierKind, String> {
    ClassifierKind::parse(raw)
        .ok_or_else(|| format!("unknown classifier '{raw}' (expected logistic or random_forest)"))
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Decide(args) => run_decide(args),
        Command::Demo(args) => run_demo(args),
    }
}

fn run_decide(args: DecideArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;
    args.artifacts.apply(&mut config.artifacts);

    let raw = if args.application.as_os_str() == "-" {
        std::io::read_to_string(std::io::stdin())?
    } else {
        std::fs::read_to_string(&args.application)?
    };
    let request: LoanApplicationRequest = serde_json::from_str(&raw)?;
    let application = request.into_application()?;

    let pipeline = load_pipeline(&config.artifacts)?;
    let decision = pipeline.decide(&application)?;

    let body = PredictionResponse::from_decision(&decision, Utc::now());
    println!("{}", serde_json::to_string_pretty(&body)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decide_accepts_artifact_overrides() {
        let cli = Cli::try_parse_from([
            "loan-screen-api",
            "decide",
            "--application",
            "applicant.json",
            "--model-dir",
            "/srv/model",
            "--classifier",
            "random_forest",
        ])
        .expect("arguments parse");

        let Some(Command::Decide(args)) = cli.command else {
            panic!("expected decide command");
        };
        assert_eq!(args.application, PathBuf::from("applicant.json"));

        let mut config = ArtifactConfig {
            model_dir: PathBuf::from("model"),
            classifier: ClassifierKind::Logistic,
        };
        args.artifacts.apply(&mut config);
        assert_eq!(config.model_dir, PathBuf::from("/srv/model"));
        assert_eq!(config.classifier, ClassifierKind::RandomForest);
    }

    #[test]
    fn unknown_classifier_is_a_usage_error() {
        let result = Cli::try_parse_from(["loan-screen-api", "serve", "--classifier", "svm"]);
        assert!(result.is_err());
    }

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["loan-screen-api"]).expect("no arguments parse");
        assert!(cli.command.is_none());
    }
}
