//! Upgrade blueprints, keyed by their `upgrade_bag`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::data::cost::ResourceCost;
use crate::data::diagnostics::{Diagnostics, MappedTable};
use crate::data::faction::Faction;
use crate::data::locstring::LocstringTable;
use crate::data::mapping::{map_document, BlueprintKind};
use crate::data::tree::{slash, value_at, NodeContext};
use crate::data::ui::UiData;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpgradeRecord {
    pub id: String,
    pub path: String,
    pub faction: Faction,
    pub unit_type: String,
    pub ui: UiData,
    pub cost: ResourceCost,
}

pub struct Upgrades;

impl BlueprintKind for Upgrades {
    type Record = UpgradeRecord;

    const NAME: &'static str = "upgrade";
    const CONTAINER_KEY: &'static str = "upgrade_bag";
    const UNIT_TYPES: Option<&'static [&'static str]> = None;

    fn map_node(
        ctx: &NodeContext,
        faction: Faction,
        node: &Map<String, Value>,
        locstrings: &LocstringTable,
        _diagnostics: &mut Diagnostics,
    ) -> UpgradeRecord {
        let bag = node.get(Self::CONTAINER_KEY).unwrap_or(&Value::Null);
        UpgradeRecord {
            id: ctx.key.clone(),
            path: slash(&ctx.path),
            faction,
            unit_type: ctx.parent.clone(),
            ui: UiData::from_info(value_at(bag, &["ui_info"]).unwrap_or(&Value::Null), locstrings),
            cost: ResourceCost::from_time_cost(value_at(bag, &["time_cost"]).unwrap_or(&Value::Null)),
        }
    }
}

/// Map the `upgrade` dataset.
pub fn map_upgrades(document: &Value, locstrings: &LocstringTable) -> MappedTable<UpgradeRecord> {
    map_document::<Upgrades>(document, locstrings)
}
