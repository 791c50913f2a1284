//! Inline keyboards for the user and administrator menus.

use relay_core::{InlineButton, InlineKeyboard};
use storage::DialogPartner;

use crate::callback_data::CallbackAction;
use crate::pagination::Page;
use crate::texts;

fn button(text: &str, action: CallbackAction) -> InlineButton {
    InlineButton::callback(text, action.to_data())
}

/// User: [write, history] / [profile]. Administrator: [profile] / [all dialogs, block user].
pub fn main_keyboard(is_admin: bool) -> InlineKeyboard {
    let profile = vec![button("👤 My profile", CallbackAction::Profile)];
    if is_admin {
        InlineKeyboard::new().row(profile).row(vec![
            button("👥 All dialogs", CallbackAction::AllDialogs),
            button("🚫 Block user", CallbackAction::BlockUser),
        ])
    } else {
        InlineKeyboard::new()
            .row(vec![
                button("📝 Write message", CallbackAction::WriteMessage),
                button("📋 Dialog history", CallbackAction::DialogHistory),
            ])
            .row(profile)
    }
}

/// One row per dialog partner, then `⬅️ p/t ➡️` when there is more than one page, then a
/// way back to the main menu.
pub fn inbox_keyboard(page: &Page<'_, DialogPartner>) -> InlineKeyboard {
    let mut keyboard = InlineKeyboard::new();
    for partner in page.items {
        keyboard = keyboard.row(vec![button(
            &texts::partner_label(partner),
            CallbackAction::Dialog(partner.user_id),
        )]);
    }

    if page.has_navigation() {
        let mut nav = Vec::with_capacity(3);
        if page.has_prev() {
            nav.push(button("⬅️", CallbackAction::Page(page.number - 1)));
        }
        nav.push(button(
            &format!("{}/{}", page.number, page.total_pages),
            CallbackAction::Ignore,
        ));
        if page.has_next() {
            nav.push(button("➡️", CallbackAction::Page(page.number + 1)));
        }
        keyboard = keyboard.row(nav);
    }

    keyboard.row(vec![button("🔙 Main menu", CallbackAction::MainMenu)])
}

/// Attached to each message relayed to the administrator.
pub fn admin_message_keyboard(user_id: i64) -> InlineKeyboard {
    InlineKeyboard::new().row(vec![button("✍️ Reply", CallbackAction::Reply(user_id))])
}

pub fn dialog_keyboard(user_id: i64) -> InlineKeyboard {
    InlineKeyboard::new()
        .row(vec![
            button("✍️ Reply", CallbackAction::Reply(user_id)),
            button("🚫 Block", CallbackAction::Block(user_id)),
        ])
        .row(vec![button("🔙 All dialogs", CallbackAction::AllDialogs)])
}
