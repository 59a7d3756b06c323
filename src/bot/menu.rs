use teloxide::types::{ InlineKeyboardButton, InlineKeyboardMarkup };
use teloxide::utils::command::BotCommands;
use crate::config::prompt;

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
    #[command(description = "show the main menu")]
    Start,
    #[command(description = "show the main menu")]
    Menu,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuAction {
    Ask,
    Upload,
    Clear,
    About,
}

impl MenuAction {
    pub const ALL: [MenuAction; 4] = [
        MenuAction::Ask,
        MenuAction::Upload,
        MenuAction::Clear,
        MenuAction::About,
    ];

    pub fn callback_data(self) -> &'static str {
        match self {
            MenuAction::Ask => "ask",
            MenuAction::Upload => "upload",
            MenuAction::Clear => "clear",
            MenuAction::About => "about",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuAction::Ask => prompt::MENU_ASK,
            MenuAction::Upload => prompt::MENU_UPLOAD,
            MenuAction::Clear => prompt::MENU_CLEAR,
            MenuAction::About => prompt::MENU_ABOUT,
        }
    }

    pub fn from_callback_data(data: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.callback_data() == data)
    }
}

/// One button per row, in menu order.
pub fn menu_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(
        MenuAction::ALL.into_iter().map(|action| {
            vec![InlineKeyboardButton::callback(action.label(), action.callback_data())]
        })
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use teloxide::types::InlineKeyboardButtonKind;

    #[test]
    fn keyboard_lists_four_options_in_order() {
        let keyboard = menu_keyboard();
        assert_eq!(keyboard.inline_keyboard.len(), 4);
        let data: Vec<String> = keyboard.inline_keyboard
            .iter()
            .map(|row| {
                assert_eq!(row.len(), 1);
                match &row[0].kind {
                    InlineKeyboardButtonKind::CallbackData(data) => data.clone(),
                    other => panic!("unexpected button kind: {:?}", other),
                }
            })
            .collect();
        assert_eq!(data, vec!["ask", "upload", "clear", "about"]);
    }

    #[test]
    fn callback_data_round_trips_known_actions() {
        assert_eq!(MenuAction::from_callback_data("clear"), Some(MenuAction::Clear));
        assert_eq!(MenuAction::from_callback_data("about"), Some(MenuAction::About));
        assert_eq!(MenuAction::from_callback_data("something"), None);
    }

    #[test]
    fn start_and_menu_commands_parse() {
        assert_eq!(Command::parse("/start", "relay_bot").unwrap(), Command::Start);
        assert_eq!(Command::parse("/menu", "relay_bot").unwrap(), Command::Menu);
        assert!(Command::parse("/unknown", "relay_bot").is_err());
    }

    #[test]
    fn start_with_deep_link_payload_still_opens_menu() {
        assert_eq!(Command::parse("/start ref123", "relay_bot").unwrap(), Command::Start);
    }
}
