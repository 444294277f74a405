//! Display strings and icon paths shared by every blueprint kind.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::data::locstring::LocstringTable;
use crate::data::tree::{last_segment, str_at, value_at};

/// UI block of a blueprint. Every field defaults to an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiData {
    pub icon_name: String,
    pub symbol_icon_name: String,
    pub screen_name: String,
    pub help_text: String,
    pub brief_text: String,
    /// Often unset in the exports (`$0`).
    pub extra_text: String,
    /// Armor type icon name, vehicles only.
    pub armor_icon: String,
}

impl UiData {
    /// Read an `info`/`ui_info` node: icon paths copied, text fields resolved
    /// through the locstring table, armor icon reduced to its file name.
    pub fn from_info(info: &Value, locstrings: &LocstringTable) -> UiData {
        let armor_icon = str_at(info, &["ui_armor_info", "armor_icon"]);
        UiData {
            icon_name: str_at(info, &["icon_name"]).to_string(),
            symbol_icon_name: str_at(info, &["symbol_icon_name"]).to_string(),
            screen_name: locstrings.resolve(value_at(info, &["screen_name"])),
            help_text: locstrings.resolve(value_at(info, &["help_text"])),
            brief_text: locstrings.resolve(value_at(info, &["brief_text"])),
            extra_text: locstrings.resolve(value_at(info, &["extra_text"])),
            armor_icon: if armor_icon.is_empty() {
                String::new()
            } else {
                last_segment(armor_icon).to_string()
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == UiData::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_icons_locstrings_and_armor_icon() {
        let locstrings = LocstringTable::from_document(&json!({ "1": "Panther", "2": "Medium tank" }));
        let info = json!({
            "icon_name": "races/german/symbols/panther_ger",
            "screen_name": "$1",
            "help_text": "$2",
            "extra_text": "$0",
            "ui_armor_info": { "armor_icon": "armor_types/heavy_armor" }
        });
        let ui = UiData::from_info(&info, &locstrings);
        assert_eq!(ui.icon_name, "races/german/symbols/panther_ger");
        assert_eq!(ui.symbol_icon_name, "");
        assert_eq!(ui.screen_name, "Panther");
        assert_eq!(ui.help_text, "Medium tank");
        assert_eq!(ui.extra_text, "");
        assert_eq!(ui.brief_text, "");
        assert_eq!(ui.armor_icon, "heavy_armor");
    }

    #[test]
    fn empty_info_is_all_default() {
        let ui = UiData::from_info(&json!({}), &LocstringTable::default());
        assert!(ui.is_empty());
    }
}
