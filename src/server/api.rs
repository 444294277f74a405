//! JSON payloads for the explorer API. Each function renders one response
//! body from the loaded [GameData]; the route layer picks the status code.

use serde::Serialize;

use crate::data::cost::ResourceCost;
use crate::data::data_registry::GameData;
use crate::data::ebps::EntityRecord;
use crate::data::faction::Faction;
use crate::data::ui::UiData;
use crate::error::ApiError;
use crate::explorer::{production_buildings, squad_detail, squad_total_cost, trainable_units, TrainableUnit};

pub fn health_payload(data: &GameData) -> Result<String, ApiError> {
    Ok(serde_json::to_string_pretty(&serde_json::json!({
        "status": "ok",
        "service": "coh3-explorer",
        "version": env!("CARGO_PKG_VERSION"),
        "datasets": data.provenance,
    }))?)
}

#[derive(Debug, Clone, Serialize)]
pub struct FactionSummary {
    pub id: Faction,
    pub slug: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub squads: usize,
}

pub fn factions_payload(data: &GameData) -> Result<String, ApiError> {
    let factions: Vec<FactionSummary> = Faction::ALL
        .iter()
        .map(|&faction| FactionSummary {
            id: faction,
            slug: faction.route_slug(),
            name: faction.localized_name(),
            description: faction.description(),
            squads: data.squads_for(faction).count(),
        })
        .collect();
    Ok(serde_json::to_string_pretty(&serde_json::json!({ "factions": factions }))?)
}

fn parse_faction(slug: &str) -> Result<Faction, ApiError> {
    Faction::parse(slug).ok_or_else(|| ApiError::UnknownFaction(slug.to_string()))
}

#[derive(Debug, Clone, Serialize)]
pub struct SquadListItem<'a> {
    pub id: &'a str,
    pub unit_type: &'a str,
    pub ui: &'a UiData,
    pub time_cost: ResourceCost,
}

pub fn faction_squads_payload(data: &GameData, slug: &str) -> Result<String, ApiError> {
    let faction = parse_faction(slug)?;
    let squads: Vec<SquadListItem> = data
        .squads_for(faction)
        .map(|squad| SquadListItem {
            id: &squad.id,
            unit_type: &squad.unit_type,
            ui: &squad.ui,
            time_cost: squad_total_cost(squad, data.entities()).value,
        })
        .collect();
    Ok(serde_json::to_string_pretty(&serde_json::json!({
        "faction": faction,
        "squads": squads,
    }))?)
}

#[derive(Debug, Clone, Serialize)]
pub struct BuildingCard<'a> {
    pub id: &'a str,
    pub types: &'a [String],
    pub ui: &'a UiData,
    pub time_cost: ResourceCost,
    pub hitpoints: f64,
    pub units: Vec<TrainableUnit>,
}

fn building_card<'a>(building: &'a EntityRecord, data: &GameData) -> BuildingCard<'a> {
    BuildingCard {
        id: &building.id,
        types: &building.unit_types,
        ui: &building.ui,
        time_cost: building.cost,
        hitpoints: building.health.hitpoints,
        units: trainable_units(building, data.squads(), data.entities()).into_value(),
    }
}

pub fn faction_buildings_payload(data: &GameData, slug: &str) -> Result<String, ApiError> {
    let faction = parse_faction(slug)?;
    let buildings: Vec<BuildingCard> = production_buildings(faction, data.entities())
        .into_iter()
        .map(|building| building_card(building, data))
        .collect();
    Ok(serde_json::to_string_pretty(&serde_json::json!({
        "faction": faction,
        "buildings": buildings,
    }))?)
}

pub fn squad_payload(data: &GameData, id: &str) -> Result<String, ApiError> {
    let detail = squad_detail(id, data).ok_or_else(|| ApiError::UnitNotFound(id.to_string()))?;
    Ok(serde_json::to_string_pretty(&detail)?)
}

pub fn weapons_payload(data: &GameData) -> Result<String, ApiError> {
    Ok(serde_json::to_string_pretty(&serde_json::json!({ "weapons": data.weapons() }))?)
}

pub fn upgrades_payload(data: &GameData) -> Result<String, ApiError> {
    Ok(serde_json::to_string_pretty(&serde_json::json!({ "upgrades": data.upgrades() }))?)
}

#[derive(Debug, Clone, Serialize)]
struct DiagnosticItem<'a> {
    dataset: &'static str,
    #[serde(flatten)]
    diagnostic: &'a crate::data::diagnostics::MappingDiagnostic,
}

pub fn diagnostics_payload(data: &GameData) -> Result<String, ApiError> {
    let diagnostics: Vec<DiagnosticItem> = data
        .diagnostics()
        .into_iter()
        .map(|(dataset, diagnostic)| DiagnosticItem { dataset, diagnostic })
        .collect();
    Ok(serde_json::to_string_pretty(&serde_json::json!({
        "count": diagnostics.len(),
        "diagnostics": diagnostics,
    }))?)
}
