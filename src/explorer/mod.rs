//! Cross-table resolution over the mapped tables: squad cost and upkeep,
//! upgrades, weapons, production buildings and the per-squad detail view.
//!
//! References resolve lazily, at call time, by short id. A reference that
//! does not resolve is skipped and reported in the returned diagnostics.

pub mod buildings;
pub mod cost;
pub mod detail;
pub mod export_csv;
pub mod upgrades;
pub mod weapons;

use serde::Serialize;

use crate::data::diagnostics::Diagnostics;

pub use buildings::{production_buildings, trainable_units, TrainableUnit};
pub use cost::{resolve_loadout, squad_total_cost, squad_total_upkeep};
pub use detail::{squad_detail, SquadDetail};
pub use export_csv::{export_squad_costs, write_squad_costs};
pub use upgrades::resolve_upgrades;
pub use weapons::{
    carried_weapons, default_squad_member, resolve_squad_entities, squad_weapons, SquadWeapon,
};

/// A resolved value plus the references that failed to resolve.
#[derive(Debug, Clone, Serialize)]
pub struct Resolved<T> {
    pub value: T,
    pub diagnostics: Diagnostics,
}

impl<T> Resolved<T> {
    pub fn new(value: T, diagnostics: Diagnostics) -> Self {
        Resolved { value, diagnostics }
    }

    pub fn into_value(self) -> T {
        self.value
    }
}
