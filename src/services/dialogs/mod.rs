pub mod knowledge_base;
pub mod prompts;
pub mod ticket;

pub const HELP_MESSAGE: &str = "I'm the help desk bot and I can help you create a ticket.\n\
You can tell me things like _I need to reset my password_ or _I cannot print_.";

pub fn not_understood(text: &str) -> String {
    format!("I'm sorry, I did not understand '{text}'. Type 'help' to know more about me :)")
}
