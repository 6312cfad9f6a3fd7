//! Line-oriented terminal front-end
//!
//! One page: the title, the form, a command prompt, and a diagnostic panel
//! opened on demand. Errors are printed inline and the loop keeps going.

use crate::config::AppConfig;
use crate::error::PriceError;
use crate::form::{FormEvent, InputForm};
use crate::prediction::{render_prediction, Prediction, PriceTier};
use crate::session::{Session, SessionState};
use colored::Colorize;
use std::io::{self, BufRead, Write};

/// Page title
pub const TITLE: &str = "📱 Mobile Price Predictor Pro";

const HELP: &str = "\
Commands:
  set <field> <value>   change a field (e.g. `set ram 3072`, `set wifi yes`)
  show                  show the form
  reset                 restore default values
  predict               submit the form and predict the price tier
  diagnose              run the low-cost reference check
  help                  show this help
  quit                  exit";

/// One line of user input
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `set <field> <value>`
    Set {
        /// Feature name as typed
        field: String,
        /// Value as typed
        value: String,
    },
    /// `show`
    Show,
    /// `reset`
    Reset,
    /// `predict`
    Predict,
    /// `diagnose`
    Diagnose,
    /// `help`
    Help,
    /// `quit`
    Quit,
}

/// Parse one input line
pub fn parse_command(line: &str) -> Result<Command, PriceError> {
    let mut parts = line.split_whitespace();
    let verb = parts.next().unwrap_or("").to_ascii_lowercase();
    let command = match verb.as_str() {
        "set" => {
            let field = parts.next();
            let value = parts.next();
            match (field, value) {
                (Some(field), Some(value)) => Command::Set {
                    field: field.to_string(),
                    value: value.to_string(),
                },
                _ => {
                    return Err(PriceError::InvalidInput(
                        "usage: set <field> <value>".to_string(),
                    ))
                }
            }
        }
        "show" => Command::Show,
        "reset" => Command::Reset,
        "predict" | "submit" => Command::Predict,
        "diagnose" | "diag" => Command::Diagnose,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        "" => Command::Help,
        other => {
            return Err(PriceError::InvalidInput(format!(
                "unknown command '{}', type `help`",
                other
            )))
        }
    };
    if parts.next().is_some() {
        return Err(PriceError::InvalidInput(format!(
            "too many arguments for '{}'",
            verb
        )));
    }
    Ok(command)
}

/// Render a prediction, coloring the tier label if enabled
pub fn render_prediction_colored(prediction: &Prediction, color: bool) -> String {
    let text = render_prediction(prediction);
    if !color {
        return text;
    }
    let label = prediction.tier.label();
    text.replacen(label, &paint(label, prediction.tier), 1)
}

fn paint(text: &str, tier: PriceTier) -> String {
    let (r, g, b) = tier.color().rgb();
    text.truecolor(r, g, b).bold().to_string()
}

/// Interactive form session over any reader/writer pair
pub struct TerminalUi<'a, R, W> {
    input: R,
    output: W,
    config: AppConfig,
    session: Session<'a>,
    form: InputForm,
}

impl<'a, R: BufRead, W: Write> TerminalUi<'a, R, W> {
    /// Front-end over an already-started session
    pub fn new(input: R, output: W, config: AppConfig, session: Session<'a>) -> Self {
        Self {
            input,
            output,
            config,
            session,
            form: InputForm::new(),
        }
    }

    /// Current form state
    pub fn form(&self) -> &InputForm {
        &self.form
    }

    /// Underlying session
    pub fn session(&self) -> &Session<'a> {
        &self.session
    }

    /// Give back the writer (used by tests to inspect output)
    pub fn into_output(self) -> W {
        self.output
    }

    /// Run until `quit` or end of input
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "{}", TITLE)?;
        match self.session.state().clone() {
            SessionState::Unavailable(reason) => {
                writeln!(self.output, "Model load error: {}", reason)?;
                writeln!(self.output, "Prediction is disabled for this session.")?;
            }
            _ => {
                if let Some(artifacts) = self.session.artifacts() {
                    writeln!(self.output, "Model: {}", artifacts.describe())?;
                }
            }
        }
        self.session.open_form();
        writeln!(self.output)?;
        write!(self.output, "{}", self.form.render())?;
        writeln!(self.output, "\n{}", HELP)?;

        let mut line = String::new();
        loop {
            write!(self.output, "> ")?;
            self.output.flush()?;
            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                break;
            }
            match parse_command(&line) {
                Ok(Command::Quit) => break,
                Ok(command) => self.execute(command)?,
                Err(e) => writeln!(self.output, "Error: {}", e)?,
            }
        }
        log::debug!("Terminal session finished");
        Ok(())
    }

    /// Run one command
    pub fn execute(&mut self, command: Command) -> io::Result<()> {
        match command {
            Command::Set { field, value } => match self.form.set_text(&field, &value) {
                Ok(feature) => {
                    let spec = crate::form::field(feature);
                    writeln!(
                        self.output,
                        "{} = {}",
                        spec.label,
                        spec.format_value(self.form.get(feature))
                    )?;
                }
                Err(e) => writeln!(self.output, "Error: {}", e)?,
            },
            Command::Show => write!(self.output, "{}", self.form.render())?,
            Command::Reset => {
                self.apply(FormEvent::Reset)?;
                writeln!(self.output, "Form reset to defaults.")?;
            }
            Command::Predict => self.apply(FormEvent::Submit)?,
            Command::Diagnose => self.diagnose()?,
            Command::Help => writeln!(self.output, "{}", HELP)?,
            Command::Quit => {}
        }
        Ok(())
    }

    fn apply(&mut self, event: FormEvent) -> io::Result<()> {
        let record = match self.form.handle(event) {
            Ok(Some(record)) => record,
            Ok(None) => return Ok(()),
            Err(e) => return writeln!(self.output, "Error: {}", e),
        };

        if self.session.can_predict() {
            writeln!(self.output, "Analyzing...")?;
        }
        match self.session.submit(&record) {
            Ok(prediction) => {
                if self.config.show_model_input {
                    let json = serde_json::to_string(&prediction.model_input)
                        .unwrap_or_else(|e| format!("<unprintable: {}>", e));
                    writeln!(self.output, "Input sent to model: {}", json)?;
                }
                writeln!(
                    self.output,
                    "{}",
                    render_prediction_colored(&prediction, self.config.color)
                )
            }
            Err(e) => writeln!(self.output, "Error: {}", e),
        }
    }

    fn diagnose(&mut self) -> io::Result<()> {
        writeln!(self.output, "--- Advanced diagnostic: low-cost reference phone ---")?;
        match self.session.diagnose() {
            Ok(report) => writeln!(self.output, "{}", report.render()),
            Err(e) => writeln!(self.output, "Error: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::LoadedArtifacts;
    use crate::model::{Model, NearestCentroid};
    use crate::schema::{FeatureName, FEATURE_COUNT};
    use std::io::Cursor;
    use std::path::PathBuf;

    /// Four centroids split on RAM only: 256, 1024, 2048, 4096 MB
    fn artifacts() -> LoadedArtifacts {
        let centroids = [256.0, 1024.0, 2048.0, 4096.0]
            .iter()
            .map(|ram| {
                let mut c = vec![0.0; FEATURE_COUNT];
                c[FeatureName::Ram.index()] = *ram;
                c
            })
            .collect();
        LoadedArtifacts {
            model: Model::NearestCentroid(NearestCentroid { centroids }),
            scaler: None,
            source: PathBuf::from("test.json"),
        }
    }

    fn plain_config() -> AppConfig {
        AppConfig {
            color: false,
            ..AppConfig::default()
        }
    }

    fn run_script(session: Session<'_>, config: AppConfig, script: &str) -> String {
        let mut ui = TerminalUi::new(Cursor::new(script.as_bytes()), Vec::new(), config, session);
        ui.run().unwrap();
        String::from_utf8(ui.into_output()).unwrap()
    }

    #[test]
    fn test_parse_command() {
        assert_eq!(
            parse_command("set ram 3072\n").unwrap(),
            Command::Set {
                field: "ram".to_string(),
                value: "3072".to_string()
            }
        );
        assert_eq!(parse_command("PREDICT").unwrap(), Command::Predict);
        assert_eq!(parse_command("quit").unwrap(), Command::Quit);
        assert!(parse_command("set ram").is_err());
        assert!(parse_command("show me").is_err());
        assert!(parse_command("launch").is_err());
    }

    #[test]
    fn test_predict_default_form() {
        let loaded = artifacts();
        let out = run_script(Session::start(Ok(&loaded)), plain_config(), "predict\nquit\n");
        assert!(out.starts_with(TITLE));
        assert!(out.contains("Model: nearest_centroid model (4 classes), no scaler"));
        assert!(out.contains("Prediction: 💰💰💰 High Cost"));
        assert!(!out.contains("Probabilities:"));
    }

    #[test]
    fn test_edit_then_predict() {
        let loaded = artifacts();
        let out = run_script(
            Session::start(Ok(&loaded)),
            plain_config(),
            "set ram 300\npredict\n",
        );
        assert!(out.contains("RAM (MB) = 300"));
        assert!(out.contains("Prediction: 💰 Low Cost"));
    }

    #[test]
    fn test_edits_do_not_predict() {
        let loaded = artifacts();
        let out = run_script(
            Session::start(Ok(&loaded)),
            plain_config(),
            "set ram 300\nset wifi yes\nreset\n",
        );
        assert!(!out.contains("Prediction:"));
        assert!(out.contains("Form reset to defaults."));
    }

    #[test]
    fn test_bad_input_keeps_running() {
        let loaded = artifacts();
        let out = run_script(
            Session::start(Ok(&loaded)),
            plain_config(),
            "set ram 99999\nfly\npredict\n",
        );
        assert!(out.contains("Error: Invalid input"));
        assert!(out.contains("Error: Invalid input: unknown command 'fly'"));
        assert!(out.contains("Prediction: 💰💰💰 High Cost"));
    }

    #[test]
    fn test_unavailable_model() {
        let failure = PriceError::Io("mobile_price_classifier.json: not found".to_string());
        let out = run_script(Session::start(Err(&failure)), plain_config(), "predict\ndiagnose\n");
        assert!(out.contains("Model load error: I/O error: mobile_price_classifier.json"));
        assert!(out.contains("Error: Prediction disabled"));
        assert!(!out.contains("Analyzing..."));
    }

    #[test]
    fn test_show_model_input() {
        let loaded = artifacts();
        let config = AppConfig {
            show_model_input: true,
            ..plain_config()
        };
        let out = run_script(Session::start(Ok(&loaded)), config, "predict\n");
        assert!(out.contains("Input sent to model: {\"battery_power\":1000.0"));
    }

    #[test]
    fn test_diagnose_panel() {
        let loaded = artifacts();
        let out = run_script(Session::start(Ok(&loaded)), plain_config(), "diagnose\n");
        assert!(out.contains("Result: Low Cost (expected: Low Cost)"));
    }

    #[test]
    fn test_plain_rendering_has_no_escapes() {
        let loaded = artifacts();
        let mut session = Session::start(Ok(&loaded));
        session.open_form();
        let prediction = session.submit(&InputForm::new().to_record().unwrap()).unwrap();
        let text = render_prediction_colored(&prediction, false);
        assert!(!text.contains('\u{1b}'));
        assert_eq!(text, render_prediction(&prediction));
    }
}
