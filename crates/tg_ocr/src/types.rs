/// A single recognized text fragment.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub text: String,
    /// Engine-assigned probability in [0, 1] that `text` is correct.
    pub confidence: f32,
}

impl Detection {
    pub fn new(text: impl Into<String>, confidence: f32) -> Self {
        Self {
            text: text.into(),
            confidence,
        }
    }
}

/// Raw recognition payload as handed back by an OCR engine.
///
/// Engines disagree on shape: some return a flat list of detections,
/// others group detections per page or per detected region. Both shapes
/// normalize to one flat, order-preserving sequence via [`RawDetections::into_flat`].
#[derive(Debug, Clone)]
pub enum RawDetections {
    Flat(Vec<Detection>),
    Grouped(Vec<Vec<Detection>>),
}

impl RawDetections {
    /// Flatten to a single sequence, preserving detection order.
    pub fn into_flat(self) -> Vec<Detection> {
        match self {
            RawDetections::Flat(detections) => detections,
            RawDetections::Grouped(groups) => groups.into_iter().flatten().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            RawDetections::Flat(detections) => detections.is_empty(),
            RawDetections::Grouped(groups) => groups.iter().all(|g| g.is_empty()),
        }
    }
}

/// Outcome of one extraction run.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractOutcome {
    /// Recognition found text.
    Text(String),
    /// Recognition ran but nothing survived (no detections, or all filtered out).
    Empty,
}

impl ExtractOutcome {
    pub fn has_text(&self) -> bool {
        matches!(self, ExtractOutcome::Text(_))
    }

    pub fn text(&self) -> &str {
        match self {
            ExtractOutcome::Text(text) => text,
            ExtractOutcome::Empty => "",
        }
    }
}

/// Errors at the OCR engine boundary.
#[derive(Debug, thiserror::Error)]
pub enum OcrError {
    #[error("missing model file: {0}")]
    MissingModel(String),
    #[error("engine init failed: {0}")]
    EngineInit(String),
    #[error("failed to load image: {0}")]
    ImageLoad(String),
    #[error("recognition failed: {0}")]
    Recognition(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_detections_flatten_in_order() {
        let raw = RawDetections::Flat(vec![
            Detection::new("first", 0.9),
            Detection::new("second", 0.7),
        ]);
        let flat = raw.into_flat();
        assert_eq!(flat[0].text, "first");
        assert_eq!(flat[1].text, "second");
    }

    #[test]
    fn grouped_detections_flatten_across_groups_in_order() {
        let raw = RawDetections::Grouped(vec![
            vec![Detection::new("a", 0.9), Detection::new("b", 0.8)],
            vec![Detection::new("c", 0.7)],
        ]);
        let flat = raw.into_flat();
        let texts: Vec<&str> = flat.iter().map(|d| d.text.as_str()).collect();
        assert_eq!(texts, ["a", "b", "c"]);
    }

    #[test]
    fn empty_shapes_are_empty() {
        assert!(RawDetections::Flat(Vec::new()).is_empty());
        assert!(RawDetections::Grouped(Vec::new()).is_empty());
        // A grouped result holding only empty groups counts as empty too.
        assert!(RawDetections::Grouped(vec![Vec::new()]).is_empty());
        assert!(RawDetections::Grouped(vec![Vec::new()]).into_flat().is_empty());
    }

    #[test]
    fn outcome_accessors() {
        let outcome = ExtractOutcome::Text("hi".to_string());
        assert!(outcome.has_text());
        assert_eq!(outcome.text(), "hi");

        assert!(!ExtractOutcome::Empty.has_text());
        assert_eq!(ExtractOutcome::Empty.text(), "");
    }
}
