//! Inline button payloads.

use relay_core::{Callback, Event};

/// A parsed callback payload. Unknown or malformed payloads parse to `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackAction {
    WriteMessage,
    DialogHistory,
    Profile,
    AllDialogs,
    BlockUser,
    MainMenu,
    Ignore,
    Page(i64),
    Dialog(i64),
    Reply(i64),
    Block(i64),
}

impl CallbackAction {
    pub fn parse(data: &str) -> Option<Self> {
        let action = match data {
            "write_message" => Self::WriteMessage,
            "dialog_history" => Self::DialogHistory,
            "profile" => Self::Profile,
            "all_dialogs" => Self::AllDialogs,
            "block_user" => Self::BlockUser,
            "main_menu" => Self::MainMenu,
            "ignore" => Self::Ignore,
            _ => {
                let (prefix, arg) = data.split_once('_')?;
                let arg: i64 = arg.parse().ok()?;
                match prefix {
                    "page" => Self::Page(arg),
                    "dialog" => Self::Dialog(arg),
                    "reply" => Self::Reply(arg),
                    "block" => Self::Block(arg),
                    _ => return None,
                }
            }
        };
        Some(action)
    }

    pub fn to_data(&self) -> String {
        match self {
            Self::WriteMessage => "write_message".to_string(),
            Self::DialogHistory => "dialog_history".to_string(),
            Self::Profile => "profile".to_string(),
            Self::AllDialogs => "all_dialogs".to_string(),
            Self::BlockUser => "block_user".to_string(),
            Self::MainMenu => "main_menu".to_string(),
            Self::Ignore => "ignore".to_string(),
            Self::Page(n) => format!("page_{}", n),
            Self::Dialog(id) => format!("dialog_{}", id),
            Self::Reply(id) => format!("reply_{}", id),
            Self::Block(id) => format!("block_{}", id),
        }
    }

    /// Buttons that only the administrator's keyboards carry.
    pub fn is_admin_only(&self) -> bool {
        matches!(
            self,
            Self::AllDialogs
                | Self::BlockUser
                | Self::Page(_)
                | Self::Dialog(_)
                | Self::Reply(_)
                | Self::Block(_)
        )
    }

    /// Buttons that only make sense for a regular user talking to the administrator.
    pub fn is_user_only(&self) -> bool {
        matches!(self, Self::WriteMessage | Self::DialogHistory)
    }
}

/// The pressed button and its parsed payload, if `event` is a recognised button press.
pub fn callback_action(event: &Event) -> Option<(&Callback, CallbackAction)> {
    let callback = event.callback()?;
    CallbackAction::parse(&callback.data).map(|action| (callback, action))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fixed_payloads() {
        assert_eq!(CallbackAction::parse("write_message"), Some(CallbackAction::WriteMessage));
        assert_eq!(CallbackAction::parse("block_user"), Some(CallbackAction::BlockUser));
        assert_eq!(CallbackAction::parse("ignore"), Some(CallbackAction::Ignore));
        assert_eq!(CallbackAction::parse("main_menu"), Some(CallbackAction::MainMenu));
    }

    #[test]
    fn test_parse_numbered_payloads() {
        assert_eq!(CallbackAction::parse("page_3"), Some(CallbackAction::Page(3)));
        assert_eq!(CallbackAction::parse("page_-1"), Some(CallbackAction::Page(-1)));
        assert_eq!(CallbackAction::parse("dialog_42"), Some(CallbackAction::Dialog(42)));
        assert_eq!(CallbackAction::parse("reply_7"), Some(CallbackAction::Reply(7)));
        assert_eq!(CallbackAction::parse("block_9"), Some(CallbackAction::Block(9)));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(CallbackAction::parse(""), None);
        assert_eq!(CallbackAction::parse("page_"), None);
        assert_eq!(CallbackAction::parse("page_two"), None);
        assert_eq!(CallbackAction::parse("reply_99999999999999999999"), None);
        assert_eq!(CallbackAction::parse("current_page"), None);
        assert_eq!(CallbackAction::parse("unknown_1"), None);
    }

    #[test]
    fn test_to_data_parses_back() {
        let actions = [
            CallbackAction::Profile,
            CallbackAction::Page(2),
            CallbackAction::Dialog(5),
            CallbackAction::Block(5),
        ];
        for action in actions {
            assert_eq!(CallbackAction::parse(&action.to_data()), Some(action));
        }
    }

    #[test]
    fn test_role_restrictions() {
        assert!(CallbackAction::Reply(1).is_admin_only());
        assert!(CallbackAction::Page(1).is_admin_only());
        assert!(!CallbackAction::Profile.is_admin_only());
        assert!(!CallbackAction::Ignore.is_admin_only());
        assert!(CallbackAction::WriteMessage.is_user_only());
        assert!(!CallbackAction::MainMenu.is_user_only());
    }
}
