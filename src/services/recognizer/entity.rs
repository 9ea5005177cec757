use crate::models::{Entity, RecognizedIntent};

/// Returns the first entity of the given type, if the recognizer reported one.
pub fn find_entity<'a>(intent: &'a RecognizedIntent, kind: &str) -> Option<&'a Entity> {
    intent.entities.iter().find(|e| e.kind == kind)
}

/// Returns the first resolved value for the given entity type. An entity
/// with no resolution, or an empty value list, counts as absent.
pub fn resolved_value(intent: &RecognizedIntent, kind: &str) -> Option<String> {
    find_entity(intent, kind)
        .and_then(|e| e.resolution.as_ref())
        .and_then(|r| r.values.first())
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Intent, Resolution};

    fn entity(kind: &str, text: &str, values: Option<Vec<&str>>) -> Entity {
        Entity {
            entity: text.to_string(),
            kind: kind.to_string(),
            resolution: values.map(|v| Resolution {
                values: v.into_iter().map(String::from).collect(),
            }),
        }
    }

    fn intent(entities: Vec<Entity>) -> RecognizedIntent {
        RecognizedIntent {
            intent: Intent::SubmitTicket,
            score: 0.9,
            entities,
        }
    }

    #[test]
    fn test_first_resolved_value() {
        let intent = intent(vec![entity("category", "printer", Some(vec!["hardware", "printing"]))]);
        assert_eq!(resolved_value(&intent, "category").as_deref(), Some("hardware"));
    }

    #[test]
    fn test_missing_entity_is_absent() {
        let intent = intent(vec![entity("category", "printer", Some(vec!["hardware"]))]);
        assert_eq!(resolved_value(&intent, "severity"), None);
    }

    #[test]
    fn test_empty_resolution_is_absent() {
        let intent = intent(vec![
            entity("severity", "urgent", Some(vec![])),
            entity("category", "wifi", None),
        ]);
        assert_eq!(resolved_value(&intent, "severity"), None);
        assert_eq!(resolved_value(&intent, "category"), None);
        // The entity itself is still visible to callers that need the raw text.
        assert_eq!(find_entity(&intent, "category").map(|e| e.entity.as_str()), Some("wifi"));
    }

    #[test]
    fn test_first_matching_entity_wins() {
        let intent = intent(vec![
            entity("severity", "urgent", Some(vec![])),
            entity("severity", "low", Some(vec!["low"])),
        ]);
        assert_eq!(resolved_value(&intent, "severity"), None);
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let intent = intent(vec![entity("severity", "asap", Some(vec!["high"]))]);
        let before = intent.clone();
        let first = resolved_value(&intent, "severity");
        let second = resolved_value(&intent, "severity");
        assert_eq!(first, second);
        assert_eq!(intent, before);
    }
}
