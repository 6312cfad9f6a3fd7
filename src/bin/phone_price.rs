//! Mobile price predictor command-line front-end

use clap::Parser;
use phone_price::config::DEFAULT_ARTIFACT_PATH;
use phone_price::terminal::{render_prediction_colored, TerminalUi};
use phone_price::{cached_artifacts, AppConfig, FeatureRecord, PriceError, Session};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Predict a phone's price tier from its hardware features
#[derive(Parser, Debug)]
#[command(name = "phone-price", version, about)]
struct Args {
    /// Artifact bundle (model plus optional scaler)
    #[arg(long, default_value = DEFAULT_ARTIFACT_PATH)]
    artifact: PathBuf,

    /// Disable colored tier labels
    #[arg(long)]
    no_color: bool,

    /// Print the record sent to the model after scaling
    #[arg(long)]
    show_model_input: bool,

    /// Run the low-cost reference check and exit
    #[arg(long, conflicts_with = "input")]
    diagnose: bool,

    /// Predict one record read from a JSON file and exit
    #[arg(long, value_name = "JSON")]
    input: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    if args.no_color {
        colored::control::set_override(false);
    }
    let config = AppConfig {
        artifact_path: args.artifact.clone(),
        color: !args.no_color,
        show_model_input: args.show_model_input,
    };

    let session = Session::start(cached_artifacts(&config.artifact_path));

    let outcome = if args.diagnose {
        diagnose(&session)
    } else if let Some(path) = &args.input {
        predict_file(session, &config, path)
    } else {
        let stdin = io::stdin();
        let mut ui = TerminalUi::new(stdin.lock(), io::stdout(), config, session);
        ui.run().map_err(PriceError::from)
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn diagnose(session: &Session<'_>) -> Result<(), PriceError> {
    let report = session.diagnose()?;
    println!("{}", report.render());
    report.outcome.map(|_| ())
}

fn predict_file(
    mut session: Session<'_>,
    config: &AppConfig,
    path: &Path,
) -> Result<(), PriceError> {
    let text = fs::read_to_string(path)
        .map_err(|e| PriceError::Io(format!("{}: {}", path.display(), e)))?;
    let record: FeatureRecord = serde_json::from_str(&text)?;

    session.open_form();
    let prediction = session.submit(&record)?;
    if config.show_model_input {
        println!(
            "Input sent to model: {}",
            serde_json::to_string(&prediction.model_input)?
        );
    }
    println!("{}", render_prediction_colored(&prediction, config.color));
    Ok(())
}
