use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info, warn};

use tg_ocr::{EngineConfig, ExtractOutcome, OcrError, PaddleEngine, TextRecognizer, extract_text};
use tg_settings::{EmptyPolicy, Settings};

/// Message printed when recognition succeeds but finds no text
/// (only under [`EmptyPolicy::Announce`]).
pub const NO_TEXT_MESSAGE: &str = "No text extracted from the image";

#[derive(Parser, Debug)]
#[command(name = "textgrab", version)]
#[command(about = "Extract text from an image using an external OCR engine")]
pub struct Cli {
    /// Image file to recognize.
    pub image: PathBuf,

    /// Keep only fragments whose confidence strictly exceeds this value.
    #[arg(long, value_name = "SCORE")]
    pub min_confidence: Option<f32>,

    /// Recognition language (models for it must be present).
    #[arg(long)]
    pub language: Option<String>,

    /// Directory containing the engine's model files.
    #[arg(long, value_name = "DIR")]
    pub models_dir: Option<PathBuf>,

    /// Print an explanatory message instead of nothing when no text is found.
    #[arg(long)]
    pub announce_empty: bool,

    /// Load settings from this file instead of the default location.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Set up the tracing subscriber. Logs go to stderr so stdout stays
/// reserved for extracted text.
pub fn init_tracing() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Apply command-line overrides on top of loaded settings.
pub fn apply_cli_overrides(settings: &mut Settings, cli: &Cli) {
    if let Some(dir) = &cli.models_dir {
        settings.models_dir = dir.display().to_string();
    }
    if let Some(language) = &cli.language {
        settings.ocr_language = language.clone();
    }
    if let Some(threshold) = cli.min_confidence {
        settings.confidence_threshold = Some(threshold);
    }
    if cli.announce_empty {
        settings.on_empty = EmptyPolicy::Announce;
    }
}

/// Merge persisted settings with command-line overrides.
fn load_settings(cli: &Cli) -> anyhow::Result<Settings> {
    let mut settings = match &cli.config {
        Some(path) => Settings::load_from(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => Settings::load(),
    };

    apply_cli_overrides(&mut settings, cli);
    Ok(settings)
}

/// Decide what, if anything, goes to stdout for an extraction outcome.
pub fn render_outcome(outcome: &ExtractOutcome, policy: EmptyPolicy) -> Option<String> {
    match outcome {
        ExtractOutcome::Text(text) => Some(text.clone()),
        ExtractOutcome::Empty => match policy {
            EmptyPolicy::Announce => Some(NO_TEXT_MESSAGE.to_string()),
            EmptyPolicy::Quiet => None,
        },
    }
}

/// Recognize one image and reduce the result to an extraction outcome.
pub fn process_image(
    recognizer: &dyn TextRecognizer,
    image: &Path,
    settings: &Settings,
) -> Result<ExtractOutcome, OcrError> {
    let raw = recognizer.recognize_file(image)?;
    let detections = raw.into_flat();
    debug!(detections = detections.len(), "recognition finished");
    Ok(extract_text(&detections, settings.confidence_threshold))
}

pub fn run() -> anyhow::Result<ExitCode> {
    init_tracing();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // clap routes --help/--version to stdout and real usage errors
            // to stderr on print().
            let _ = e.print();
            return Ok(if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            });
        }
    };

    let settings = load_settings(&cli)?;

    let mut config = EngineConfig::new(&settings.models_dir, &settings.ocr_language);
    config.use_angle_cls = settings.use_angle_cls;

    let engine = PaddleEngine::initialize(&config).context("failed to initialize OCR engine")?;
    info!(image = %cli.image.display(), "running recognition");

    let outcome = process_image(&engine, &cli.image, &settings)
        .with_context(|| format!("failed to process {}", cli.image.display()))?;

    if outcome == ExtractOutcome::Empty {
        warn!("no text detected in the image");
    }
    if let Some(output) = render_outcome(&outcome, settings.on_empty) {
        println!("{output}");
    }

    Ok(ExitCode::SUCCESS)
}
