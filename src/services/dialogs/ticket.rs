//! Submit-ticket dialog.
//!
//! The dialog is a value (`TicketDialog`: the stage it is suspended at plus
//! the collected slots) that moves through pure transition functions. Each
//! transition either suspends on a prompt, or ends the dialog by submitting
//! or declining. Persisting the suspended value between turns, and running
//! the submission, is the caller's job.

use crate::models::{
    RecognizedIntent, Reply, SlotSet, TicketDialog, TicketRequest, TicketStage, SEVERITY_CHOICES,
};
use crate::services::dialogs::prompts::{
    parse_choice, parse_confirm, CHOICE_RETRY, CONFIRM_BUTTONS, CONFIRM_RETRY,
};
use crate::services::recognizer::entity::resolved_value;

pub const SEVERITY_PROMPT: &str = "which is the severity of this problem?";
pub const CATEGORY_PROMPT: &str =
    "Which would be the category for this ticket (software, hardware, network, and so on)?";
pub const DECLINED_MESSAGE: &str =
    "Ok. The ticket was not created. You can start again if you want.";

#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Suspended until the user answers `reply`.
    Prompt { dialog: TicketDialog, reply: Reply },
    /// Confirmed. The dialog is over; the request still has to be submitted.
    Submit(TicketRequest),
    /// Declined. The dialog is over and the slots are dropped.
    Declined(Reply),
}

/// Enters the dialog from a message recognized as `SubmitTicket`.
pub fn begin(message: &str, intent: &RecognizedIntent) -> Step {
    let slots = SlotSet {
        category: resolved_value(intent, "category"),
        severity: resolved_value(intent, "severity"),
        description: message.to_string(),
    };

    collect_missing(slots)
}

/// Resumes a suspended dialog with the user's reply.
pub fn resume(dialog: TicketDialog, reply: &str) -> Step {
    let TicketDialog { stage, mut slots } = dialog;

    match stage {
        TicketStage::CollectSeverity => {
            let Some(choice) = parse_choice(reply, &SEVERITY_CHOICES) else {
                return prompt(
                    TicketStage::CollectSeverity,
                    slots,
                    Reply::with_buttons(CHOICE_RETRY, &SEVERITY_CHOICES),
                );
            };
            if slots.severity.is_none() {
                slots.severity = Some(choice);
            }
            check_category(slots)
        }
        TicketStage::CollectCategory => {
            if slots.category.is_none() {
                slots.category = Some(reply.to_string());
            }
            confirm(slots)
        }
        TicketStage::Confirm => match parse_confirm(reply) {
            Some(true) => match slots.to_request() {
                Some(request) => Step::Submit(request),
                None => collect_missing(slots),
            },
            Some(false) => Step::Declined(Reply::text(DECLINED_MESSAGE)),
            None => prompt(
                TicketStage::Confirm,
                slots,
                Reply::with_buttons(CONFIRM_RETRY, &CONFIRM_BUTTONS),
            ),
        },
    }
}

pub fn confirmation_message(slots: &SlotSet) -> String {
    format!(
        "Great! I'm going to create a \"{}\" severity ticket in the \"{}\" category. \
         The description I will use is \"{}\". Can you please confirm that this information is correct?",
        slots.severity.as_deref().unwrap_or_default(),
        slots.category.as_deref().unwrap_or_default(),
        slots.description,
    )
}

fn collect_missing(slots: SlotSet) -> Step {
    if slots.severity.is_none() {
        return prompt(
            TicketStage::CollectSeverity,
            slots,
            Reply::with_buttons(SEVERITY_PROMPT, &SEVERITY_CHOICES),
        );
    }
    check_category(slots)
}

fn check_category(slots: SlotSet) -> Step {
    if slots.category.is_none() {
        return prompt(TicketStage::CollectCategory, slots, Reply::text(CATEGORY_PROMPT));
    }
    confirm(slots)
}

fn confirm(slots: SlotSet) -> Step {
    let message = confirmation_message(&slots);
    prompt(
        TicketStage::Confirm,
        slots,
        Reply::with_buttons(message, &CONFIRM_BUTTONS),
    )
}

fn prompt(stage: TicketStage, slots: SlotSet, reply: Reply) -> Step {
    Step::Prompt {
        dialog: TicketDialog { stage, slots },
        reply,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Entity, Intent, Resolution};

    fn entity(kind: &str, values: &[&str]) -> Entity {
        Entity {
            entity: values.first().copied().unwrap_or("something").to_string(),
            kind: kind.to_string(),
            resolution: Some(Resolution {
                values: values.iter().map(|v| v.to_string()).collect(),
            }),
        }
    }

    fn submit_intent(entities: Vec<Entity>) -> RecognizedIntent {
        RecognizedIntent {
            intent: Intent::SubmitTicket,
            score: 0.95,
            entities,
        }
    }

    fn expect_prompt(step: Step) -> (TicketDialog, Reply) {
        match step {
            Step::Prompt { dialog, reply } => (dialog, reply),
            other => panic!("expected prompt, got {other:?}"),
        }
    }

    #[test]
    fn test_full_walkthrough_without_entities() {
        let (dialog, reply) = expect_prompt(begin("I cannot print", &submit_intent(vec![])));
        assert_eq!(dialog.stage, TicketStage::CollectSeverity);
        assert_eq!(reply.text, SEVERITY_PROMPT);
        assert_eq!(reply.buttons, vec!["high", "normal", "low"]);

        let (dialog, reply) = expect_prompt(resume(dialog, "normal"));
        assert_eq!(dialog.stage, TicketStage::CollectCategory);
        assert_eq!(reply.text, CATEGORY_PROMPT);
        assert!(reply.buttons.is_empty());

        let (dialog, reply) = expect_prompt(resume(dialog, "hardware"));
        assert_eq!(dialog.stage, TicketStage::Confirm);
        assert!(reply.text.contains("\"normal\" severity"));
        assert!(reply.text.contains("\"hardware\" category"));
        assert!(reply.text.contains("\"I cannot print\""));
        assert_eq!(reply.buttons, vec!["Yes", "No"]);

        assert_eq!(
            resume(dialog, "yes"),
            Step::Submit(TicketRequest {
                category: "hardware".to_string(),
                severity: "normal".to_string(),
                description: "I cannot print".to_string(),
            })
        );
    }

    #[test]
    fn test_resolved_severity_skips_severity_prompt() {
        let intent = submit_intent(vec![entity("severity", &["high"])]);
        let (dialog, reply) = expect_prompt(begin("my laptop is on fire", &intent));
        assert_eq!(dialog.stage, TicketStage::CollectCategory);
        assert_eq!(reply.text, CATEGORY_PROMPT);
        assert_eq!(dialog.slots.severity.as_deref(), Some("high"));
    }

    #[test]
    fn test_all_entities_resolved_goes_straight_to_confirm() {
        let intent = submit_intent(vec![
            entity("category", &["network"]),
            entity("severity", &["low"]),
        ]);
        let (dialog, reply) = expect_prompt(begin("wifi is slow on the network", &intent));
        assert_eq!(dialog.stage, TicketStage::Confirm);
        // Description is the whole message, not stripped of entity text.
        assert_eq!(dialog.slots.description, "wifi is slow on the network");
        assert!(reply.text.contains("\"low\" severity ticket in the \"network\" category"));
    }

    #[test]
    fn test_category_resolved_skips_category_prompt() {
        let intent = submit_intent(vec![entity("category", &["software"])]);
        let (dialog, _) = expect_prompt(begin("excel crashes", &intent));
        assert_eq!(dialog.stage, TicketStage::CollectSeverity);

        let (dialog, reply) = expect_prompt(resume(dialog, "low"));
        assert_eq!(dialog.stage, TicketStage::Confirm);
        assert!(reply.text.contains("\"software\" category"));
    }

    #[test]
    fn test_empty_resolution_treated_as_absent() {
        let intent = submit_intent(vec![entity("severity", &[]), entity("category", &[])]);
        let (dialog, _) = expect_prompt(begin("help me", &intent));
        assert_eq!(dialog.stage, TicketStage::CollectSeverity);
        assert!(dialog.slots.category.is_none());
    }

    #[test]
    fn test_severity_reply_does_not_overwrite_existing_value() {
        let dialog = TicketDialog {
            stage: TicketStage::CollectSeverity,
            slots: SlotSet {
                category: None,
                severity: Some("high".to_string()),
                description: "x".to_string(),
            },
        };
        let (dialog, _) = expect_prompt(resume(dialog, "low"));
        assert_eq!(dialog.slots.severity.as_deref(), Some("high"));
    }

    #[test]
    fn test_unrecognized_severity_reprompts() {
        let (dialog, _) = expect_prompt(begin("I cannot print", &submit_intent(vec![])));
        let (dialog, reply) = expect_prompt(resume(dialog, "whenever"));
        assert_eq!(dialog.stage, TicketStage::CollectSeverity);
        assert!(dialog.slots.severity.is_none());
        assert_eq!(reply.text, CHOICE_RETRY);
        assert_eq!(reply.buttons.len(), 3);
    }

    #[test]
    fn test_empty_category_is_accepted() {
        let intent = submit_intent(vec![entity("severity", &["normal"])]);
        let (dialog, _) = expect_prompt(begin("broken", &intent));
        let (dialog, reply) = expect_prompt(resume(dialog, ""));
        assert_eq!(dialog.stage, TicketStage::Confirm);
        assert_eq!(dialog.slots.category.as_deref(), Some(""));
        assert!(reply.text.contains("in the \"\" category"));
    }

    #[test]
    fn test_decline_ends_dialog() {
        let intent = submit_intent(vec![
            entity("category", &["network"]),
            entity("severity", &["high"]),
        ]);
        let (dialog, _) = expect_prompt(begin("no wifi", &intent));
        assert_eq!(resume(dialog, "no"), Step::Declined(Reply::text(DECLINED_MESSAGE)));
    }

    #[test]
    fn test_unclear_confirmation_reprompts() {
        let intent = submit_intent(vec![
            entity("category", &["network"]),
            entity("severity", &["high"]),
        ]);
        let (dialog, _) = expect_prompt(begin("no wifi", &intent));
        let (dialog, reply) = expect_prompt(resume(dialog, "hmm"));
        assert_eq!(dialog.stage, TicketStage::Confirm);
        assert_eq!(reply.text, CONFIRM_RETRY);
    }

    #[test]
    fn test_confirm_with_missing_slot_collects_it_again() {
        let dialog = TicketDialog {
            stage: TicketStage::Confirm,
            slots: SlotSet {
                category: Some("network".to_string()),
                severity: None,
                description: "no wifi".to_string(),
            },
        };
        let (dialog, _) = expect_prompt(resume(dialog, "yes"));
        assert_eq!(dialog.stage, TicketStage::CollectSeverity);
    }
}
