//! Squad cost sheet as CSV: one row per squad with total cost and upkeep.

use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::data::data_registry::GameData;
use crate::error::ExportError;
use crate::explorer::cost::{squad_total_cost, squad_total_upkeep};

#[derive(Debug, Serialize)]
struct SquadCostRow<'a> {
    id: &'a str,
    faction: &'a str,
    unit_type: &'a str,
    screen_name: &'a str,
    fuel: f64,
    munition: f64,
    manpower: f64,
    popcap: f64,
    time_seconds: f64,
    upkeep_fuel: f64,
    upkeep_munition: f64,
    upkeep_manpower: f64,
}

/// Write every squad of `data` to `writer`. Returns the number of rows written.
pub fn write_squad_costs<W: Write>(data: &GameData, writer: W) -> Result<usize, ExportError> {
    let mut csv = csv::Writer::from_writer(writer);
    let mut rows = 0;
    for squad in data.squads() {
        let cost = squad_total_cost(squad, data.entities()).value;
        let upkeep = squad_total_upkeep(squad, data.entities()).value;
        csv.serialize(SquadCostRow {
            id: &squad.id,
            faction: squad.faction.as_str(),
            unit_type: &squad.unit_type,
            screen_name: &squad.ui.screen_name,
            fuel: cost.fuel,
            munition: cost.munition,
            manpower: cost.manpower,
            popcap: cost.popcap,
            time_seconds: cost.time,
            upkeep_fuel: upkeep.fuel,
            upkeep_munition: upkeep.munition,
            upkeep_manpower: upkeep.manpower,
        })?;
        rows += 1;
    }
    csv.flush()?;
    Ok(rows)
}

/// Write the cost sheet to a file at `path`.
pub fn export_squad_costs(data: &GameData, path: &Path) -> Result<usize, ExportError> {
    let file = std::fs::File::create(path)?;
    let rows = write_squad_costs(data, file)?;
    tracing::info!(path = %path.display(), rows, "exported squad costs");
    Ok(rows)
}
