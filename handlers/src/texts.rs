//! Text shown to users and the administrator.

use chrono::{DateTime, Local, Utc};
use storage::{DialogPartner, HistoryEntry, UserRecord};

pub const WELCOME: &str = "👋 Welcome to the feedback system!\nChoose an action from the menu below:";
pub const ASK_MESSAGE: &str = "📝 Enter your message:";
pub const MESSAGE_SENT: &str = "✅ Message sent to the administrator";
pub const YOU_ARE_BLOCKED: &str = "You are blocked";
pub const HISTORY_EMPTY: &str = "Dialog history is empty";
pub const DIALOG_EMPTY: &str = "Dialog is empty";
pub const INSUFFICIENT_RIGHTS: &str = "Insufficient rights";
pub const USERS_ONLY: &str = "This action is only available to users";
pub const ASK_REPLY: &str = "✍️ Enter your reply:";
pub const REPLY_SENT: &str = "✅ Reply sent";
pub const INBOX_TITLE: &str = "📋 Dialogs:";
pub const ASK_BLOCK_TARGET: &str = "🚫 Enter the ID of the user to block:";
pub const INVALID_USER_ID: &str = "❌ That is not a user ID. Enter a numeric ID:";
pub const CANNOT_BLOCK_SELF: &str = "❌ You cannot block yourself. Enter another ID:";

/// Placeholder for a missing handle.
pub const NO_HANDLE: &str = "none";

/// Telegram rejects messages longer than this many UTF-16 code units.
pub const MAX_MESSAGE_UTF16: usize = 4096;

const SEPARATOR: &str = "➖➖➖➖➖➖➖➖";

/// `@handle`, or `none` when the user has no handle.
pub fn handle_label(username: Option<&str>) -> String {
    match username.filter(|u| !u.is_empty()) {
        Some(u) => format!("@{}", u),
        None => NO_HANDLE.to_string(),
    }
}

/// Local time, second precision.
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

/// Cuts `text` to [`MAX_MESSAGE_UTF16`] UTF-16 code units, marking the cut with an ellipsis.
/// Never splits a surrogate pair.
pub fn truncate(text: &str) -> String {
    if text.encode_utf16().count() <= MAX_MESSAGE_UTF16 {
        return text.to_string();
    }
    let budget = MAX_MESSAGE_UTF16 - '…'.len_utf16();
    let mut used = 0;
    let mut cut = String::new();
    for c in text.chars() {
        used += c.len_utf16();
        if used > budget {
            break;
        }
        cut.push(c);
    }
    cut.push('…');
    cut
}

pub fn profile(user: &UserRecord) -> String {
    format!(
        "👤 Your profile:\n\n📌 ID: {}\n👤 Name: {}\n🔗 Username: {}\n📅 Registered: {}",
        user.user_id,
        user.full_name,
        handle_label(user.username.as_deref()),
        format_date(&user.registration_date)
    )
}

pub fn new_message_for_admin(username: Option<&str>, user_id: i64, body: &str) -> String {
    let handle = username.filter(|u| !u.is_empty()).unwrap_or(NO_HANDLE);
    format!("📨 New message from @{} (ID: {}):\n\n{}", handle, user_id, body)
}

pub fn reply_for_user(body: &str) -> String {
    format!("📨 Reply from administrator:\n\n{}", body)
}

/// Inbox button label: `"{name} (@{handle or none})"`.
pub fn partner_label(partner: &DialogPartner) -> String {
    let handle = partner
        .username
        .as_deref()
        .filter(|u| !u.is_empty())
        .unwrap_or(NO_HANDLE);
    format!("{} (@{})", partner.full_name, handle)
}

/// The user's own view: 📤 for what they sent, 📥 for replies.
pub fn user_history(entries: &[HistoryEntry], user_id: i64) -> String {
    let mut text = String::from("📋 Dialog history:\n\n");
    for entry in entries {
        let direction = if entry.from_id == user_id { "📤" } else { "📥" };
        push_entry(&mut text, direction, entry);
    }
    text
}

/// The administrator's view of one dialog.
pub fn admin_dialog(entries: &[HistoryEntry], user_id: i64, admin_id: i64) -> String {
    let mut text = format!("📋 Dialog with user {}:\n\n", user_id);
    for entry in entries {
        let direction = if entry.from_id == admin_id { "Admin:" } else { "User:" };
        push_entry(&mut text, direction, entry);
    }
    text
}

fn push_entry(text: &mut String, direction: &str, entry: &HistoryEntry) {
    text.push_str(&format!(
        "{} {}\nDate: {}\n{}\n",
        direction,
        entry.body,
        format_date(&entry.created_at),
        SEPARATOR
    ));
}

pub fn block_result(user_id: i64, found: bool) -> String {
    if found {
        format!("✅ User {} has been blocked", user_id)
    } else {
        format!("❌ User {} not found", user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: i64, from_id: i64, to_id: i64, body: &str) -> HistoryEntry {
        HistoryEntry {
            id,
            from_id,
            to_id,
            body: body.to_string(),
            created_at: Utc::now(),
            is_read: false,
            username: None,
            full_name: None,
        }
    }

    #[test]
    fn test_handle_label() {
        assert_eq!(handle_label(Some("ada")), "@ada");
        assert_eq!(handle_label(Some("")), "none");
        assert_eq!(handle_label(None), "none");
    }

    #[test]
    fn test_new_message_for_admin_without_handle() {
        assert_eq!(
            new_message_for_admin(None, 42, "hi"),
            "📨 New message from @none (ID: 42):\n\nhi"
        );
        assert!(new_message_for_admin(Some("ada"), 42, "hi").starts_with("📨 New message from @ada (ID: 42)"));
    }

    #[test]
    fn test_partner_label() {
        let partner = DialogPartner {
            user_id: 1,
            username: None,
            full_name: "Ada Lovelace".to_string(),
        };
        assert_eq!(partner_label(&partner), "Ada Lovelace (@none)");
    }

    #[test]
    fn test_user_history_marks_direction() {
        let text = user_history(&[entry(2, 100, 5, "reply"), entry(1, 5, 100, "question")], 5);
        assert!(text.contains("📥 reply"));
        assert!(text.contains("📤 question"));
        assert!(text.find("reply").unwrap() < text.find("question").unwrap());
    }

    #[test]
    fn test_admin_dialog_labels_sides() {
        let text = admin_dialog(&[entry(2, 100, 5, "answer"), entry(1, 5, 100, "ask")], 5, 100);
        assert!(text.starts_with("📋 Dialog with user 5:"));
        assert!(text.contains("Admin: answer"));
        assert!(text.contains("User: ask"));
    }

    #[test]
    fn test_format_date_shape() {
        let formatted = format_date(&Utc::now());
        assert_eq!(formatted.len(), 19);
        assert_eq!(&formatted[4..5], "-");
        assert_eq!(&formatted[10..11], " ");
    }

    #[test]
    fn test_truncate_long_text() {
        let long = "я".repeat(MAX_MESSAGE_UTF16 + 10);
        let cut = truncate(&long);
        assert_eq!(cut.encode_utf16().count(), MAX_MESSAGE_UTF16);
        assert!(cut.ends_with('…'));
        assert_eq!(truncate("short"), "short");
    }

    #[test]
    fn test_truncate_counts_utf16_units() {
        // 3000 emoji: 3000 chars but 6000 UTF-16 units.
        let emoji = "😀".repeat(3000);
        let cut = truncate(&emoji);
        assert!(cut.encode_utf16().count() <= MAX_MESSAGE_UTF16);
        assert_eq!(cut.chars().filter(|c| *c == '😀').count(), 2047);
        assert!(cut.ends_with('…'));

        let exact = "😀".repeat(MAX_MESSAGE_UTF16 / 2);
        assert_eq!(truncate(&exact), exact);
    }

    #[test]
    fn test_block_result() {
        assert_eq!(block_result(7, true), "✅ User 7 has been blocked");
        assert_eq!(block_result(7, false), "❌ User 7 not found");
    }
}
