use serde::Serialize;

use crate::data::cost::ResourceCost;
use crate::data::diagnostics::{DiagnosticKind, Diagnostics};
use crate::data::ebps::EntityRecord;
use crate::data::faction::Faction;
use crate::data::sbps::SquadRecord;
use crate::data::tree::last_segment;
use crate::data::ui::UiData;
use crate::explorer::cost::squad_total_cost;
use crate::explorer::Resolved;

/// In-game build menu order.
pub const BUILDING_CATEGORIES: [&str; 6] = [
    "support_center",
    "hq",
    "production1",
    "production2",
    "production3",
    "production4",
];

/// Production entities that never appear in a multiplayer build menu.
fn hidden_buildings(faction: Faction) -> &'static [&'static str] {
    match faction {
        Faction::AfrikaKorps => &["halftrack_deployment_ak", "heavy_weapon_kompanie_ak"],
        Faction::American => &["safe_house_partisan"],
        Faction::German | Faction::British => &[],
    }
}

fn menu_position(building: &EntityRecord) -> Option<usize> {
    BUILDING_CATEGORIES
        .iter()
        .position(|category| building.unit_types.iter().any(|t| t == category))
}

/// Buildings of `faction` in build menu order. Hidden buildings and buildings
/// without a menu category are left out.
pub fn production_buildings(faction: Faction, entities: &[EntityRecord]) -> Vec<&EntityRecord> {
    let hidden = hidden_buildings(faction);
    let mut buildings: Vec<(usize, &EntityRecord)> = entities
        .iter()
        .filter(|entity| entity.faction == faction && entity.is_building())
        .filter(|building| !hidden.contains(&building.id.as_str()))
        .filter_map(|building| menu_position(building).map(|position| (position, building)))
        .collect();
    buildings.sort_by_key(|(position, _)| *position);
    buildings.into_iter().map(|(_, building)| building).collect()
}

/// A squad a building can produce, with its total cost.
#[derive(Debug, Clone, Serialize)]
pub struct TrainableUnit {
    pub id: String,
    pub ui: UiData,
    pub time_cost: ResourceCost,
}

/// Resolve a building's spawn references to squads. References that do not
/// name a squad are skipped and reported against the building.
pub fn trainable_units(
    building: &EntityRecord,
    squads: &[SquadRecord],
    entities: &[EntityRecord],
) -> Resolved<Vec<TrainableUnit>> {
    let mut diagnostics = Diagnostics::default();
    let mut units = Vec::with_capacity(building.spawn_items.len());
    for reference in &building.spawn_items {
        let unit_id = last_segment(reference);
        let Some(squad) = squads.iter().find(|squad| squad.id == unit_id) else {
            diagnostics.push(
                DiagnosticKind::DanglingReference,
                &building.id,
                format!("spawned squad '{unit_id}' not found"),
            );
            continue;
        };
        let cost = squad_total_cost(squad, entities);
        diagnostics.extend(cost.diagnostics);
        units.push(TrainableUnit {
            id: unit_id.to_string(),
            ui: squad.ui.clone(),
            time_cost: cost.value,
        });
    }
    Resolved::new(units, diagnostics)
}
