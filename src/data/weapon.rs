//! Weapon blueprints, keyed by their `weapon_bag`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::data::diagnostics::{Diagnostics, MappedTable};
use crate::data::faction::Faction;
use crate::data::locstring::LocstringTable;
use crate::data::mapping::{map_document, BlueprintKind};
use crate::data::tree::{number_at, slash, str_at, value_at, NodeContext};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MinMax {
    pub min: f64,
    pub max: f64,
}

impl MinMax {
    fn read(node: &Value, path: &[&str]) -> MinMax {
        let block = value_at(node, path).unwrap_or(&Value::Null);
        MinMax {
            min: number_at(block, &["min"]),
            max: number_at(block, &["max"]),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Accuracy {
    pub near: f64,
    pub mid: f64,
    pub far: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponRecord {
    pub id: String,
    pub path: String,
    pub faction: Faction,
    /// Folder the weapon sits in, e.g. `small_arms`.
    pub unit_type: String,
    pub screen_name: String,
    pub icon_name: String,
    pub damage: MinMax,
    pub range: MinMax,
    pub accuracy: Accuracy,
    /// Cooldown between shots, seconds.
    pub cooldown: MinMax,
    /// Reload duration, seconds.
    pub reload: MinMax,
}

impl WeaponRecord {
    /// Smoke launchers, flares and the like.
    pub fn deals_damage(&self) -> bool {
        self.damage.max > 0.0
    }
}

pub struct Weapons;

impl BlueprintKind for Weapons {
    type Record = WeaponRecord;

    const NAME: &'static str = "weapon";
    const CONTAINER_KEY: &'static str = "weapon_bag";
    const UNIT_TYPES: Option<&'static [&'static str]> = None;

    fn map_node(
        ctx: &NodeContext,
        faction: Faction,
        node: &Map<String, Value>,
        locstrings: &LocstringTable,
        _diagnostics: &mut Diagnostics,
    ) -> WeaponRecord {
        let bag = node.get(Self::CONTAINER_KEY).unwrap_or(&Value::Null);
        let accuracy = value_at(bag, &["accuracy"]).unwrap_or(&Value::Null);
        WeaponRecord {
            id: ctx.key.clone(),
            path: slash(&ctx.path),
            faction,
            unit_type: ctx.parent.clone(),
            screen_name: locstrings.resolve(bag.get("ui_name")),
            icon_name: str_at(bag, &["icon_name"]).to_string(),
            damage: MinMax::read(bag, &["damage"]),
            range: MinMax::read(bag, &["range"]),
            accuracy: Accuracy {
                near: number_at(accuracy, &["near"]),
                mid: number_at(accuracy, &["mid"]),
                far: number_at(accuracy, &["far"]),
            },
            cooldown: MinMax::read(bag, &["cooldown", "duration"]),
            reload: MinMax::read(bag, &["reload", "duration"]),
        }
    }
}

/// Map the `weapon` dataset.
pub fn map_weapons(document: &Value, locstrings: &LocstringTable) -> MappedTable<WeaponRecord> {
    map_document::<Weapons>(document, locstrings)
}
