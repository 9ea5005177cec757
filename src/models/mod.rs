pub mod activity;
pub mod conversation;
pub mod intent;
pub mod ticket;

pub use activity::{Activity, Attachment, ChannelAccount, ConversationAccount, Reply};
pub use conversation::{Conversation, TicketDialog, TicketStage};
pub use intent::{Entity, Intent, RecognizedIntent, Resolution};
pub use ticket::{SlotSet, Ticket, TicketRequest, TicketResult, SEVERITY_CHOICES};
