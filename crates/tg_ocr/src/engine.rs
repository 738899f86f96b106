use std::fs;
use std::path::{Path, PathBuf};

use ocr_rs::OcrEngine;
use tracing::{debug, warn};

use crate::types::{Detection, OcrError, RawDetections};

/// A text recognizer the CLI can drive.
///
/// The concrete engine lives behind this trait so callers (and tests)
/// never touch `ocr-rs` directly.
pub trait TextRecognizer {
    /// Recognize text in the image at `path`.
    ///
    /// An image with no text is a successful, empty result; only loading
    /// or engine faults surface as errors.
    fn recognize_file(&self, path: &Path) -> Result<RawDetections, OcrError>;
}

/// Recognition language information.
#[derive(Debug, Clone)]
pub struct OcrLanguageInfo {
    /// Language identifier (e.g. "english", "chinese").
    pub id: String,
    /// Recognition model filename.
    pub rec_model: String,
    /// Charset filename.
    pub charset_file: String,
}

/// Engine initialization parameters.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Directory containing the model files.
    pub models_dir: PathBuf,
    /// Language identifier.
    pub language: String,
    /// Request rotated-text correction where the engine supports it.
    pub use_angle_cls: bool,
}

impl EngineConfig {
    pub fn new(models_dir: impl Into<PathBuf>, language: impl Into<String>) -> Self {
        Self {
            models_dir: models_dir.into(),
            language: language.into(),
            use_angle_cls: true,
        }
    }
}

/// Resolve detection/recognition/charset model paths for the given config.
pub fn resolve_model_paths(config: &EngineConfig) -> Result<(PathBuf, PathBuf, PathBuf), OcrError> {
    let language = config.language.as_str();

    // Detection model (shared by all languages).
    let det_path = config.models_dir.join("PP-OCRv5_mobile_det.mnn");

    let available = available_languages(&config.models_dir);
    let lang_info = match available.iter().find(|l| l.id == language) {
        Some(info) => info,
        None => {
            let fallback = available.first().ok_or_else(|| {
                OcrError::MissingModel(format!(
                    "no recognition models for any language under {}",
                    config.models_dir.display()
                ))
            })?;
            warn!(
                requested = language,
                substituted = %fallback.id,
                "no models for requested language; falling back"
            );
            fallback
        }
    };

    let rec_path = config.models_dir.join(&lang_info.rec_model);
    let charset_path = config.models_dir.join(&lang_info.charset_file);

    if !det_path.exists() {
        return Err(OcrError::MissingModel(det_path.display().to_string()));
    }
    if !rec_path.exists() {
        return Err(OcrError::MissingModel(rec_path.display().to_string()));
    }
    if !charset_path.exists() {
        return Err(OcrError::MissingModel(charset_path.display().to_string()));
    }

    Ok((det_path, rec_path, charset_path))
}

/// Detect available recognition languages by inspecting the models directory.
///
/// Only languages whose recognition model and charset are both present
/// are listed.
pub fn available_languages(models_dir: &Path) -> Vec<OcrLanguageInfo> {
    // (id, rec_model, charset)
    let lang_configs = [
        (
            "english",
            "en_PP-OCRv5_mobile_rec_infer.mnn",
            "ppocr_keys_en.txt",
        ),
        ("chinese", "PP-OCRv5_mobile_rec.mnn", "ppocr_keys_v5.txt"),
        (
            "korean",
            "korean_PP-OCRv5_mobile_rec_infer.mnn",
            "ppocr_keys_korean.txt",
        ),
        (
            "latin",
            "latin_PP-OCRv5_mobile_rec_infer.mnn",
            "ppocr_keys_latin.txt",
        ),
        (
            "cyrillic",
            "cyrillic_PP-OCRv5_mobile_rec_infer.mnn",
            "ppocr_keys_cyrillic.txt",
        ),
    ];

    let mut languages = Vec::new();
    for (id, rec_model, charset) in lang_configs {
        if models_dir.join(rec_model).exists() && models_dir.join(charset).exists() {
            languages.push(OcrLanguageInfo {
                id: id.to_string(),
                rec_model: rec_model.to_string(),
                charset_file: charset.to_string(),
            });
        }
    }

    languages
}

/// The PaddleOCR-family engine, backed by `ocr-rs`.
pub struct PaddleEngine {
    engine: OcrEngine,
}

impl PaddleEngine {
    /// Resolve model files and bring up the engine.
    pub fn initialize(config: &EngineConfig) -> Result<Self, OcrError> {
        let (det_path, rec_path, charset_path) = resolve_model_paths(config)?;

        debug!(
            language = %config.language,
            use_angle_cls = config.use_angle_cls,
            "initializing OCR engine"
        );

        // The PP-OCRv5 recognition models handle rotated text internally,
        // so `use_angle_cls` needs no separate classifier model here.
        let engine = OcrEngine::new(&det_path, &rec_path, &charset_path, None)
            .map_err(|e| OcrError::EngineInit(e.to_string()))?;

        Ok(Self { engine })
    }
}

impl TextRecognizer for PaddleEngine {
    fn recognize_file(&self, path: &Path) -> Result<RawDetections, OcrError> {
        let bytes = fs::read(path)
            .map_err(|e| OcrError::ImageLoad(format!("{}: {}", path.display(), e)))?;
        let img = image::load_from_memory(&bytes)
            .map_err(|e| OcrError::ImageLoad(format!("{}: {}", path.display(), e)))?;

        let raw_results = self
            .engine
            .recognize(&img)
            .map_err(|e| OcrError::Recognition(e.to_string()))?;

        // Engines occasionally emit whitespace-only blocks; drop them at
        // the boundary so extraction only sees real fragments.
        let detections: Vec<Detection> = raw_results
            .into_iter()
            .filter(|r| !r.text.trim().is_empty())
            .map(|r| Detection {
                text: r.text,
                confidence: r.confidence,
            })
            .collect();

        Ok(RawDetections::Flat(detections))
    }
}
