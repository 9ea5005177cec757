use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    SubmitTicket,
    ExploreKnowledgeBase,
    Help,
    Unknown,
}

impl Intent {
    pub fn parse(s: &str) -> Self {
        match s {
            "SubmitTicket" => Intent::SubmitTicket,
            "ExploreKnowledgeBase" => Intent::ExploreKnowledgeBase,
            "Help" => Intent::Help,
            _ => Intent::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::SubmitTicket => "SubmitTicket",
            Intent::ExploreKnowledgeBase => "ExploreKnowledgeBase",
            Intent::Help => "Help",
            Intent::Unknown => "None",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Resolution {
    #[serde(default)]
    pub values: Vec<String>,
}

/// An entity as reported by the language service. `entity` is the matched
/// text; `resolution.values` holds the canonical list values, if any.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Entity {
    pub entity: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub resolution: Option<Resolution>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecognizedIntent {
    pub intent: Intent,
    pub score: f64,
    pub entities: Vec<Entity>,
}

impl RecognizedIntent {
    pub fn unknown() -> Self {
        Self {
            intent: Intent::Unknown,
            score: 0.0,
            entities: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_parse_known_names() {
        assert_eq!(Intent::parse("SubmitTicket"), Intent::SubmitTicket);
        assert_eq!(Intent::parse("ExploreKnowledgeBase"), Intent::ExploreKnowledgeBase);
        assert_eq!(Intent::parse("Help"), Intent::Help);
    }

    #[test]
    fn test_intent_parse_falls_back_to_unknown() {
        assert_eq!(Intent::parse("None"), Intent::Unknown);
        assert_eq!(Intent::parse("submitticket"), Intent::Unknown);
    }

    #[test]
    fn test_entity_without_resolution() {
        let json = r#"{"entity":"printer","type":"category","startIndex":0,"endIndex":6}"#;
        let entity: Entity = serde_json::from_str(json).unwrap();
        assert_eq!(entity.kind, "category");
        assert!(entity.resolution.is_none());
    }
}
