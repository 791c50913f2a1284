//! Row models for the `users` and `messages` tables and the derived query rows.

mod dialog;
mod message_record;
mod user_record;

pub use dialog::{DialogPartner, HistoryEntry};
pub use message_record::MessageRecord;
pub use user_record::UserRecord;
