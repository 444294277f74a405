//! Entity blueprints (ebps): the soldiers, vehicles and buildings that squads
//! are made of. Costs and upkeep live here, not on the squad.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::data::cost::ResourceCost;
use crate::data::diagnostics::{Diagnostics, MappedTable};
use crate::data::faction::Faction;
use crate::data::locstring::LocstringTable;
use crate::data::mapping::{map_document, BlueprintKind};
use crate::data::tree::{
    array_at, extension_wrappers, number_at, slash, str_at, value_at, NodeContext,
};
use crate::data::ui::UiData;

/// Unit types kept in the entity table. `production` holds the buildings.
pub const ENTITY_UNIT_TYPES: &[&str] = &["infantry", "team_weapons", "vehicles", "production"];

pub const BUILDING_UNIT_TYPE: &str = "production";

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ArmorLayout {
    pub armor: f64,
    pub front_armor: f64,
    pub side_armor: f64,
    pub rear_armor: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthData {
    pub hitpoints: f64,
    pub target_size: f64,
    pub armor_layout: ArmorLayout,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SightData {
    pub cone_angle: f64,
    pub outer_radius: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MovingData {
    pub default_speed: f64,
    pub max_speed: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRecord {
    pub id: String,
    pub path: String,
    pub faction: Faction,
    pub unit_type: String,
    /// `type_ext.unit_type_list`, e.g. `hq`, `production1`.
    pub unit_types: Vec<String>,
    pub ui: UiData,
    pub cost: ResourceCost,
    /// Upkeep per minute.
    pub upkeep: ResourceCost,
    pub health: HealthData,
    pub sight: SightData,
    pub moving: MovingData,
    /// Squad instance references this entity can produce.
    pub spawn_items: Vec<String>,
    /// Weapon instance references across all hardpoints.
    pub weapons: Vec<String>,
}

impl EntityRecord {
    pub fn is_building(&self) -> bool {
        self.unit_type == BUILDING_UNIT_TYPE
    }
}

enum EntityExtension<'a> {
    Cost(&'a Value),
    Upkeep(&'a Value),
    Health(&'a Value),
    Ui(&'a Value),
    Spawner(&'a Value),
    Type(&'a Value),
    Combat(&'a Value),
    Sight(&'a Value),
    Moving(&'a Value),
    Ignored,
}

impl<'a> EntityExtension<'a> {
    fn classify(kind: &str, wrapper: &'a Value) -> Self {
        match kind {
            "cost_ext" => EntityExtension::Cost(wrapper),
            "upkeep_ext" => EntityExtension::Upkeep(wrapper),
            "health_ext" => EntityExtension::Health(wrapper),
            "ui_ext" => EntityExtension::Ui(wrapper),
            "spawner_ext" => EntityExtension::Spawner(wrapper),
            "type_ext" => EntityExtension::Type(wrapper),
            "combat_ext" => EntityExtension::Combat(wrapper),
            "sight_ext" => EntityExtension::Sight(wrapper),
            "moving_ext" => EntityExtension::Moving(wrapper),
            _ => EntityExtension::Ignored,
        }
    }
}

pub struct Entities;

impl BlueprintKind for Entities {
    type Record = EntityRecord;

    const NAME: &'static str = "ebps";
    const CONTAINER_KEY: &'static str = "extensions";
    const UNIT_TYPES: Option<&'static [&'static str]> = Some(ENTITY_UNIT_TYPES);

    fn map_node(
        ctx: &NodeContext,
        faction: Faction,
        node: &Map<String, Value>,
        locstrings: &LocstringTable,
        _diagnostics: &mut Diagnostics,
    ) -> EntityRecord {
        let mut entity = EntityRecord {
            id: ctx.key.clone(),
            path: slash(&ctx.path),
            faction,
            unit_type: ctx.parent.clone(),
            unit_types: Vec::new(),
            ui: UiData::default(),
            cost: ResourceCost::default(),
            upkeep: ResourceCost::default(),
            health: HealthData::default(),
            sight: SightData::default(),
            moving: MovingData::default(),
            spawn_items: Vec::new(),
            weapons: Vec::new(),
        };

        for (kind, wrapper) in extension_wrappers(node) {
            match EntityExtension::classify(kind, wrapper) {
                EntityExtension::Cost(ext) => {
                    let time_cost = ext.get("time_cost").unwrap_or(&Value::Null);
                    entity.cost = ResourceCost::from_time_cost(time_cost);
                }
                EntityExtension::Upkeep(ext) => {
                    let upkeep = ext.get("per_minute_upkeep").unwrap_or(&Value::Null);
                    entity.upkeep = ResourceCost::from_resources(upkeep);
                }
                EntityExtension::Health(ext) => {
                    let layout = ext.get("armor_layout_option").unwrap_or(&Value::Null);
                    entity.health = HealthData {
                        hitpoints: number_at(ext, &["hitpoints"]),
                        target_size: number_at(ext, &["target_size"]),
                        armor_layout: ArmorLayout {
                            armor: number_at(layout, &["armor"]),
                            front_armor: number_at(layout, &["front_armor"]),
                            side_armor: number_at(layout, &["side_armor"]),
                            rear_armor: number_at(layout, &["rear_armor"]),
                        },
                    };
                }
                EntityExtension::Ui(ext) => {
                    let info = ext.get("ui_info").unwrap_or(&Value::Null);
                    entity.ui = UiData::from_info(info, locstrings);
                }
                EntityExtension::Spawner(ext) => {
                    entity.spawn_items.extend(
                        array_at(ext, &["spawn_items"])
                            .iter()
                            .map(|item| str_at(item, &["spawn_item", "squad", "instance_reference"]))
                            .filter(|reference| !reference.is_empty())
                            .map(str::to_string),
                    );
                }
                EntityExtension::Type(ext) => {
                    entity.unit_types.extend(
                        array_at(ext, &["unit_type_list"])
                            .iter()
                            .filter_map(Value::as_str)
                            .map(str::to_string),
                    );
                }
                EntityExtension::Combat(ext) => {
                    for hardpoint in array_at(ext, &["hardpoints"]) {
                        let weapons = array_at(hardpoint, &["hardpoint", "weapon_table"])
                            .iter()
                            .map(|slot| str_at(slot, &["weapon", "weapon", "instance_reference"]))
                            .filter(|reference| !reference.is_empty())
                            .map(str::to_string);
                        entity.weapons.extend(weapons);
                    }
                }
                EntityExtension::Sight(ext) => {
                    let package = value_at(ext, &["sight_package"]).unwrap_or(&Value::Null);
                    entity.sight = SightData {
                        cone_angle: number_at(package, &["cone_angle"]),
                        outer_radius: number_at(package, &["outer_radius"]),
                    };
                }
                EntityExtension::Moving(ext) => {
                    let table = value_at(ext, &["speed_scaling_table"]).unwrap_or(&Value::Null);
                    entity.moving = MovingData {
                        default_speed: number_at(table, &["default_speed"]),
                        max_speed: number_at(table, &["max_speed"]),
                    };
                }
                EntityExtension::Ignored => {}
            }
        }
        entity
    }
}

/// Map the `ebps` dataset.
pub fn map_entities(document: &Value, locstrings: &LocstringTable) -> MappedTable<EntityRecord> {
    map_document::<Entities>(document, locstrings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ext(kind: &str, body: Value) -> Value {
        let mut body = body;
        body["template_reference"] = json!({ "value": format!("ebpextensions\\{kind}") });
        json!({ "exts": body })
    }

    #[test]
    fn maps_cost_upkeep_health_and_references() {
        let doc = json!({
            "races": { "afrika_korps": { "infantry": { "pschreck_ak": { "extensions": [
                ext("cost_ext", json!({ "time_cost": {
                    "cost": { "fuel": 0, "munition": 15, "manpower": 30, "popcap": 1 },
                    "time_seconds": 10
                } })),
                ext("upkeep_ext", json!({ "per_minute_upkeep": { "manpower": 2.5 } })),
                ext("health_ext", json!({
                    "hitpoints": 80,
                    "target_size": 1,
                    "armor_layout_option": { "armor": 1 }
                })),
                ext("combat_ext", json!({ "hardpoints": [
                    { "hardpoint": { "weapon_table": [
                        { "weapon": { "weapon": { "instance_reference": "weapon/afrika_korps/small_arms/panzerschreck_ak" } } },
                        { "weapon": {} }
                    ] } }
                ] })),
                ext("type_ext", json!({ "unit_type_list": ["infantry", 3] })),
                ext("decorator_ext", json!({}))
            ] } } } }
        });
        let table = map_entities(&doc, &LocstringTable::default());
        assert_eq!(table.len(), 1);
        let entity = &table.records[0];
        assert_eq!(entity.id, "pschreck_ak");
        assert_eq!(entity.faction, Faction::AfrikaKorps);
        assert_eq!(entity.cost.munition, 15.0);
        assert_eq!(entity.cost.time, 10.0);
        assert_eq!(entity.upkeep.manpower, 2.5);
        assert_eq!(entity.upkeep.time, 0.0);
        assert_eq!(entity.health.hitpoints, 80.0);
        assert_eq!(entity.health.armor_layout.armor, 1.0);
        assert_eq!(
            entity.weapons,
            vec!["weapon/afrika_korps/small_arms/panzerschreck_ak".to_string()]
        );
        assert_eq!(entity.unit_types, vec!["infantry".to_string()]);
        assert!(!entity.is_building());
    }

    #[test]
    fn production_buildings_keep_spawn_items() {
        let doc = json!({
            "races": { "british": { "production": { "hq_uk": { "extensions": [
                ext("spawner_ext", json!({ "spawn_items": [
                    { "spawn_item": { "squad": { "instance_reference": "sbps/races/british/infantry/tommy_uk" } } },
                    { "spawn_item": {} }
                ] })),
                ext("type_ext", json!({ "unit_type_list": ["hq"] }))
            ] } } } }
        });
        let table = map_entities(&doc, &LocstringTable::default());
        let building = &table.records[0];
        assert!(building.is_building());
        assert_eq!(building.unit_types, vec!["hq".to_string()]);
        assert_eq!(
            building.spawn_items,
            vec!["sbps/races/british/infantry/tommy_uk".to_string()]
        );
    }
}
