//! The four playable factions. Matched exactly against the `races/<faction>/...`
//! folder of each blueprint tree; anything else is not a base faction.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Faction {
    German,
    American,
    AfrikaKorps,
    British,
}

impl Faction {
    pub const ALL: [Faction; 4] = [
        Faction::American,
        Faction::British,
        Faction::German,
        Faction::AfrikaKorps,
    ];

    /// Exact match on a blueprint tree folder name.
    pub fn from_folder(folder: &str) -> Option<Faction> {
        Faction::ALL.into_iter().find(|faction| faction.as_str() == folder)
    }

    /// Parse a route slug or CLI argument, case-insensitively. `dak` is
    /// accepted for the Afrika Korps.
    pub fn parse(value: &str) -> Option<Faction> {
        match value.trim().to_ascii_lowercase().as_str() {
            "german" => Some(Faction::German),
            "american" => Some(Faction::American),
            "afrika_korps" | "dak" => Some(Faction::AfrikaKorps),
            "british" => Some(Faction::British),
            _ => None,
        }
    }

    /// Folder name used in the blueprint trees.
    pub fn as_str(&self) -> &'static str {
        match self {
            Faction::German => "german",
            Faction::American => "american",
            Faction::AfrikaKorps => "afrika_korps",
            Faction::British => "british",
        }
    }

    /// Short slug used in explorer routes.
    pub fn route_slug(&self) -> &'static str {
        match self {
            Faction::AfrikaKorps => "dak",
            other => other.as_str(),
        }
    }

    pub fn localized_name(&self) -> &'static str {
        match self {
            Faction::German => "Wehrmacht",
            Faction::American => "US Forces",
            Faction::AfrikaKorps => "Deutsches Afrikakorps",
            Faction::British => "British Forces",
        }
    }

    /// In-game faction blurb (locstrings $11234530, $11234529, $11220490, $11234532).
    pub fn description(&self) -> &'static str {
        match self {
            Faction::German => {
                "A steadfast and elite force that can hold against even the most stubborn foe. Unlock unique arsenals to specialize your forces."
            }
            Faction::American => {
                "Versatile infantry and weaponry that can displace any opponent. Experience is key to improving your forces for the fight ahead."
            }
            Faction::AfrikaKorps => {
                "A combined-arms force of aggressive vehicles, plentiful reinforcements and stubborn tanks that can break down any enemy line."
            }
            Faction::British => {
                "Infantry and team weapons form a backbone that is tough to break. Myriad vehicles will create the opening you need to seize the day."
            }
        }
    }
}

impl fmt::Display for Faction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::Faction;

    #[test]
    fn parses_folder_names_and_dak_alias() {
        assert_eq!(Faction::parse("german"), Some(Faction::German));
        assert_eq!(Faction::parse("afrika_korps"), Some(Faction::AfrikaKorps));
        assert_eq!(Faction::parse("DAK"), Some(Faction::AfrikaKorps));
        assert_eq!(Faction::parse("british"), Some(Faction::British));
        assert_eq!(Faction::parse("common"), None);
        assert_eq!(Faction::parse(""), None);
    }

    #[test]
    fn folders_match_exactly() {
        assert_eq!(Faction::from_folder("afrika_korps"), Some(Faction::AfrikaKorps));
        assert_eq!(Faction::from_folder("british"), Some(Faction::British));
        assert_eq!(Faction::from_folder("dak"), None);
        assert_eq!(Faction::from_folder("German"), None);
        assert_eq!(Faction::from_folder(" german"), None);
    }

    #[test]
    fn afrika_korps_routes_as_dak() {
        assert_eq!(Faction::AfrikaKorps.route_slug(), "dak");
        assert_eq!(Faction::AfrikaKorps.as_str(), "afrika_korps");
        assert_eq!(Faction::American.route_slug(), "american");
    }

    #[test]
    fn serializes_as_folder_name() {
        let json = serde_json::to_string(&Faction::AfrikaKorps).unwrap();
        assert_eq!(json, "\"afrika_korps\"");
    }
}
