//! Squad blueprints (sbps): a squad's loadout of entities, its UI block, base
//! population and the upgrades it can buy.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::data::diagnostics::{DiagnosticKind, Diagnostics, MappedTable};
use crate::data::faction::Faction;
use crate::data::locstring::LocstringTable;
use crate::data::mapping::{map_document, BlueprintKind};
use crate::data::tree::{
    array_at, extension_wrappers, last_segment, number_at, slash, str_at, value_at, NodeContext,
};
use crate::data::ui::UiData;

/// Unit types kept in the squad table.
pub const SQUAD_UNIT_TYPES: &[&str] = &["infantry", "team_weapons", "vehicles"];

/// One `{entity, count}` reference of a squad loadout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadoutEntry {
    /// Short id of the referenced entity (last segment of `type`).
    pub id: String,
    /// Full entity instance reference.
    #[serde(rename = "type")]
    pub entity_type: String,
    pub num: u32,
    pub is_default_unit: bool,
}

/// `squad_population_ext`: base popcap of the squad, stacked on top of its entities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PopulationExt {
    pub personnel_pop: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SquadRecord {
    /// Source filename, e.g. `panzergrenadier_ak`.
    pub id: String,
    /// Resolved UI screen name, or the id when the squad has none.
    pub screen_name: String,
    pub path: String,
    pub faction: Faction,
    /// Parent folder in the tree: `infantry`, `team_weapons`, `vehicles`.
    pub unit_type: String,
    pub loadout: Vec<LoadoutEntry>,
    pub ui: UiData,
    /// Upgrade instance references from `squad_upgrade_ext`.
    pub upgrades: Vec<String>,
    pub population: PopulationExt,
}

/// Count used when a loadout entry omits `num`.
pub fn default_loadout_count(unit_type: &str) -> u32 {
    match unit_type {
        "vehicles" => 1,
        "infantry" | "team_weapons" => 4,
        _ => 5,
    }
}

enum SquadExtension<'a> {
    Loadout(&'a Value),
    Population(&'a Value),
    Ui(&'a Value),
    Upgrade(&'a Value),
    Ignored,
}

impl<'a> SquadExtension<'a> {
    fn classify(kind: &str, wrapper: &'a Value) -> Self {
        match kind {
            "squad_loadout_ext" => SquadExtension::Loadout(wrapper),
            "squad_population_ext" => SquadExtension::Population(wrapper),
            "squad_ui_ext" => SquadExtension::Ui(wrapper),
            "squad_upgrade_ext" => SquadExtension::Upgrade(wrapper),
            _ => SquadExtension::Ignored,
        }
    }
}

pub struct Squads;

impl BlueprintKind for Squads {
    type Record = SquadRecord;

    const NAME: &'static str = "sbps";
    const CONTAINER_KEY: &'static str = "extensions";
    const UNIT_TYPES: Option<&'static [&'static str]> = Some(SQUAD_UNIT_TYPES);

    fn map_node(
        ctx: &NodeContext,
        faction: Faction,
        node: &Map<String, Value>,
        locstrings: &LocstringTable,
        diagnostics: &mut Diagnostics,
    ) -> SquadRecord {
        let mut squad = SquadRecord {
            id: ctx.key.clone(),
            screen_name: ctx.key.clone(),
            path: slash(&ctx.path),
            faction,
            unit_type: ctx.parent.clone(),
            loadout: Vec::new(),
            ui: UiData::default(),
            upgrades: Vec::new(),
            population: PopulationExt::default(),
        };

        for (kind, wrapper) in extension_wrappers(node) {
            match SquadExtension::classify(kind, wrapper) {
                SquadExtension::Loadout(ext) => map_loadout(&mut squad, ext, diagnostics),
                SquadExtension::Population(ext) => {
                    squad.population.personnel_pop = number_at(ext, &["personnel_pop"]);
                }
                SquadExtension::Ui(ext) => map_ui(&mut squad, ext, locstrings),
                SquadExtension::Upgrade(ext) => map_upgrades(&mut squad, ext, diagnostics),
                SquadExtension::Ignored => {}
            }
        }

        if !squad.ui.screen_name.is_empty() {
            squad.screen_name = squad.ui.screen_name.clone();
        }
        squad
    }
}

fn map_loadout(squad: &mut SquadRecord, ext: &Value, diagnostics: &mut Diagnostics) {
    for unit in array_at(ext, &["unit_list"]) {
        let loadout_data = unit.get("loadout_data").unwrap_or(&Value::Null);
        // Missing, null and zero counts all mean "not exported".
        let num = loadout_data
            .get("num")
            .and_then(Value::as_f64)
            .filter(|num| *num > 0.0)
            .map(|num| num.round() as u32)
            .unwrap_or_else(|| default_loadout_count(&squad.unit_type));

        let reference = loadout_data
            .get("type")
            .map(|entity_type| str_at(entity_type, &["instance_reference"]))
            .unwrap_or("");
        if reference.is_empty() {
            diagnostics.push(
                DiagnosticKind::MissingLoadoutType,
                &squad.id,
                "loadout entry has no type",
            );
            continue;
        }
        squad.loadout.push(LoadoutEntry {
            id: last_segment(reference).to_string(),
            entity_type: reference.to_string(),
            num,
            is_default_unit: true,
        });
    }
}

fn map_ui(squad: &mut SquadRecord, ext: &Value, locstrings: &LocstringTable) {
    // At most one race entry per squad.
    let Some(race) = array_at(ext, &["race_list"]).first() else {
        return;
    };
    let info = value_at(race, &["race_data", "info"]).unwrap_or(&Value::Null);
    squad.ui = UiData::from_info(info, locstrings);
}

fn map_upgrades(squad: &mut SquadRecord, ext: &Value, diagnostics: &mut Diagnostics) {
    for entry in array_at(ext, &["upgrades"]) {
        let reference = str_at(entry, &["upgrade", "instance_reference"]);
        if reference.is_empty() {
            diagnostics.push(
                DiagnosticKind::MissingUpgradeReference,
                &squad.id,
                "upgrade entry has no instance reference",
            );
            continue;
        }
        squad.upgrades.push(reference.to_string());
    }
}

/// Map the `sbps` dataset.
pub fn map_squads(document: &Value, locstrings: &LocstringTable) -> MappedTable<SquadRecord> {
    map_document::<Squads>(document, locstrings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn squad_doc(unit_type: &str, extensions: Value) -> Value {
        json!({
            "races": {
                "german": {
                    (unit_type): {
                        "grenadier_ger": { "extensions": extensions }
                    }
                }
            }
        })
    }

    fn ext(kind: &str, body: Value) -> Value {
        let mut body = body;
        body["template_reference"] = json!({ "name": "", "value": format!("sbpextensions\\{kind}") });
        json!({ "squadexts": body })
    }

    #[test]
    fn default_counts_follow_unit_type() {
        assert_eq!(default_loadout_count("vehicles"), 1);
        assert_eq!(default_loadout_count("infantry"), 4);
        assert_eq!(default_loadout_count("team_weapons"), 4);
        assert_eq!(default_loadout_count("production"), 5);
    }

    #[test]
    fn loadout_entries_take_short_id_and_default_count() {
        let doc = squad_doc(
            "infantry",
            json!({
                "0": ext("squad_loadout_ext", json!({
                    "unit_list": [
                        { "loadout_data": { "num": 2, "type": { "instance_reference": "ebps/races/german/infantry/grenadier_ger" } } },
                        { "loadout_data": { "type": { "instance_reference": "ebps/races/german/infantry/grenadier_nco_ger" } } }
                    ]
                }))
            }),
        );
        let table = map_squads(&doc, &LocstringTable::default());
        let squad = &table.records[0];
        assert_eq!(squad.loadout.len(), 2);
        assert_eq!(squad.loadout[0].id, "grenadier_ger");
        assert_eq!(squad.loadout[0].num, 2);
        assert_eq!(squad.loadout[1].id, "grenadier_nco_ger");
        assert_eq!(squad.loadout[1].num, 4);
        assert!(squad.loadout[1].is_default_unit);
        assert_eq!(
            squad.loadout[1].entity_type,
            "ebps/races/german/infantry/grenadier_nco_ger"
        );
    }

    #[test]
    fn loadout_entry_without_type_is_skipped_with_diagnostic() {
        let doc = squad_doc(
            "vehicles",
            json!({
                "0": ext("squad_loadout_ext", json!({
                    "unit_list": [ { "loadout_data": { "num": 1 } } ]
                }))
            }),
        );
        let table = map_squads(&doc, &LocstringTable::default());
        assert!(table.records[0].loadout.is_empty());
        let missing: Vec<_> = table
            .diagnostics
            .of_kind(DiagnosticKind::MissingLoadoutType)
            .collect();
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].record_id, "grenadier_ger");
    }

    #[test]
    fn empty_race_list_leaves_ui_default() {
        let doc = squad_doc(
            "infantry",
            json!({ "0": ext("squad_ui_ext", json!({ "race_list": [] })) }),
        );
        let table = map_squads(&doc, &LocstringTable::default());
        assert!(table.records[0].ui.is_empty());
        assert_eq!(table.records[0].screen_name, "grenadier_ger");
        assert!(table.diagnostics.is_empty());
    }

    #[test]
    fn ui_population_and_upgrades_are_read() {
        let locstrings = LocstringTable::from_document(&json!({ "100": "Grenadier Squad" }));
        let doc = squad_doc(
            "infantry",
            json!({
                "0": ext("squad_ui_ext", json!({
                    "race_list": [ { "race_data": { "info": {
                        "screen_name": "$100",
                        "icon_name": "races/german/infantry/grenadier_ger"
                    } } } ]
                })),
                "1": ext("squad_population_ext", json!({ "personnel_pop": 7 })),
                "2": ext("squad_upgrade_ext", json!({
                    "upgrades": [
                        { "upgrade": { "instance_reference": "upgrade/german/squad/lmg_mg34_ger" } },
                        { "upgrade": {} }
                    ]
                })),
                "3": ext("squad_veterancy_ext", json!({ "anything": true }))
            }),
        );
        let table = map_squads(&doc, &locstrings);
        let squad = &table.records[0];
        assert_eq!(squad.ui.screen_name, "Grenadier Squad");
        assert_eq!(squad.screen_name, "Grenadier Squad");
        assert_eq!(squad.ui.icon_name, "races/german/infantry/grenadier_ger");
        assert_eq!(squad.population.personnel_pop, 7.0);
        assert_eq!(squad.upgrades, vec!["upgrade/german/squad/lmg_mg34_ger".to_string()]);
        assert_eq!(
            table
                .diagnostics
                .of_kind(DiagnosticKind::MissingUpgradeReference)
                .count(),
            1
        );
    }

    #[test]
    fn non_base_factions_and_unit_types_are_dropped() {
        let doc = json!({
            "races": {
                "common": { "infantry": { "partisan": { "extensions": {} } } },
                "german": {
                    "buildings": { "bunker_ger": { "extensions": {} } },
                    "infantry": { "grenadier_ger": { "extensions": {} } }
                }
            }
        });
        let table = map_squads(&doc, &LocstringTable::default());
        let ids: Vec<&str> = table.records.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["grenadier_ger"]);
        assert_eq!(table.diagnostics.of_kind(DiagnosticKind::DroppedFaction).count(), 1);
        assert_eq!(table.diagnostics.of_kind(DiagnosticKind::DroppedUnitType).count(), 1);
    }
}
