pub mod card;
pub mod conversation;
pub mod dialogs;
pub mod messaging;
pub mod recognizer;
pub mod search;
pub mod tickets;
