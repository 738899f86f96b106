use crate::types::{Detection, ExtractOutcome};

/// Join detections into plain text.
///
/// When `threshold` is set, only detections whose confidence strictly
/// exceeds it are kept; otherwise every detection is kept. Order follows
/// detection order, one fragment per line, trailing whitespace trimmed.
pub fn extract_text(detections: &[Detection], threshold: Option<f32>) -> ExtractOutcome {
    let joined = detections
        .iter()
        .filter(|d| threshold.is_none_or(|t| d.confidence > t))
        .map(|d| d.text.trim_end())
        .collect::<Vec<_>>()
        .join("\n");

    let joined = joined.trim_end();
    if joined.is_empty() {
        ExtractOutcome::Empty
    } else {
        ExtractOutcome::Text(joined.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Detection> {
        vec![Detection::new("Hello", 0.95), Detection::new("world", 0.5)]
    }

    #[test]
    fn unfiltered_join_keeps_everything_in_order() {
        assert_eq!(
            extract_text(&sample(), None),
            ExtractOutcome::Text("Hello\nworld".to_string())
        );
    }

    #[test]
    fn threshold_keeps_only_strictly_higher_confidence() {
        assert_eq!(
            extract_text(&sample(), Some(0.8)),
            ExtractOutcome::Text("Hello".to_string())
        );
        // Exactly at the threshold does not pass.
        let at_threshold = vec![Detection::new("edge", 0.8)];
        assert_eq!(extract_text(&at_threshold, Some(0.8)), ExtractOutcome::Empty);
    }

    #[test]
    fn no_detections_is_empty() {
        assert_eq!(extract_text(&[], None), ExtractOutcome::Empty);
        assert_eq!(extract_text(&[], Some(0.8)), ExtractOutcome::Empty);
    }

    #[test]
    fn everything_filtered_out_is_empty() {
        let low = vec![Detection::new("faint", 0.1)];
        assert_eq!(extract_text(&low, Some(0.8)), ExtractOutcome::Empty);
    }

    #[test]
    fn trailing_whitespace_is_trimmed() {
        let padded = vec![
            Detection::new("line one  ", 0.9),
            Detection::new("line two\t", 0.9),
        ];
        assert_eq!(
            extract_text(&padded, None),
            ExtractOutcome::Text("line one\nline two".to_string())
        );
    }

    #[test]
    fn extraction_is_deterministic() {
        let detections = sample();
        let first = extract_text(&detections, Some(0.4));
        let second = extract_text(&detections, Some(0.4));
        assert_eq!(first, second);
    }
}
