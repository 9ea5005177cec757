//! Reply parsing for choice and yes/no prompts.

pub const CHOICE_RETRY: &str = "I didn't understand. Please choose an option from the list.";
pub const CONFIRM_RETRY: &str = "I didn't understand. Please answer 'yes' or 'no'.";
pub const CONFIRM_BUTTONS: [&str; 2] = ["Yes", "No"];

/// Matches a reply against the offered choices, by value (case-insensitive),
/// by 1-based position, or by a reply that names exactly one of the choices
/// among other words ("normal severity").
pub fn parse_choice(reply: &str, choices: &[&str]) -> Option<String> {
    let reply = reply.trim();

    if let Some(choice) = choices.iter().find(|c| c.eq_ignore_ascii_case(reply)) {
        return Some(choice.to_string());
    }

    if let Some(choice) = reply
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| choices.get(i))
    {
        return Some(choice.to_string());
    }

    let words: Vec<&str> = reply
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();
    let mut named = choices
        .iter()
        .filter(|c| words.iter().any(|w| w.eq_ignore_ascii_case(c)));

    match (named.next(), named.next()) {
        (Some(choice), None) => Some(choice.to_string()),
        _ => None,
    }
}

pub fn parse_confirm(reply: &str) -> Option<bool> {
    let normalized = reply
        .trim()
        .trim_end_matches(['.', '!'])
        .to_lowercase();

    match normalized.as_str() {
        "yes" | "y" | "yep" | "yeah" | "sure" | "ok" | "okay" | "true" | "1" | "correct" => {
            Some(true)
        }
        "no" | "n" | "nope" | "nah" | "false" | "2" | "cancel" => Some(false),
        _ => None,
    }
}
