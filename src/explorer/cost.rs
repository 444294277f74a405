//! Squad cost: a squad costs what its loadout of entities costs.

use crate::data::cost::ResourceCost;
use crate::data::diagnostics::{DiagnosticKind, Diagnostics};
use crate::data::ebps::EntityRecord;
use crate::data::sbps::{LoadoutEntry, SquadRecord};
use crate::data::tree::last_segment;
use crate::explorer::Resolved;

/// Loadout entries paired with the entity each one references, in loadout order.
/// Entries whose entity is not in `entities` are skipped and reported.
pub fn resolve_loadout<'a>(
    squad: &'a SquadRecord,
    entities: &'a [EntityRecord],
) -> Resolved<Vec<(&'a LoadoutEntry, &'a EntityRecord)>> {
    let mut diagnostics = Diagnostics::default();
    let mut resolved = Vec::with_capacity(squad.loadout.len());
    for entry in &squad.loadout {
        let entity_id = last_segment(&entry.entity_type);
        match entities.iter().find(|entity| entity.id == entity_id) {
            Some(entity) => resolved.push((entry, entity)),
            None => diagnostics.push(
                DiagnosticKind::DanglingReference,
                &squad.id,
                format!("loadout entity '{entity_id}' not found"),
            ),
        }
    }
    Resolved::new(resolved, diagnostics)
}

/// Total build cost: each resolved entity's cost times its loadout count,
/// plus the squad's own `personnel_pop` on the popcap.
pub fn squad_total_cost(squad: &SquadRecord, entities: &[EntityRecord]) -> Resolved<ResourceCost> {
    let loadout = resolve_loadout(squad, entities);
    let mut total = loadout
        .value
        .iter()
        .fold(ResourceCost::ZERO, |sum, (entry, entity)| sum + entity.cost.scaled(entry.num));
    total.popcap += squad.population.personnel_pop;
    Resolved::new(total, loadout.diagnostics)
}

/// Upkeep per minute: each resolved entity's upkeep times its loadout count.
pub fn squad_total_upkeep(squad: &SquadRecord, entities: &[EntityRecord]) -> Resolved<ResourceCost> {
    let loadout = resolve_loadout(squad, entities);
    let total = loadout
        .value
        .iter()
        .fold(ResourceCost::ZERO, |sum, (entry, entity)| sum + entity.upkeep.scaled(entry.num));
    Resolved::new(total, loadout.diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::explorer::test_support::{entity, squad};

    #[test]
    fn empty_loadout_costs_nothing() {
        let squad = squad("empty", "infantry", &[]);
        let total = squad_total_cost(&squad, &[]);
        assert!(total.value.is_zero());
        assert!(total.diagnostics.is_empty());
    }

    #[test]
    fn personnel_pop_is_added_once() {
        let mut squad = squad("mg42", "team_weapons", &[("mg42_gunner", 2)]);
        squad.population.personnel_pop = 2.0;
        let mut gunner = entity("mg42_gunner", "team_weapons");
        gunner.cost.popcap = 1.0;
        let total = squad_total_cost(&squad, &[gunner]);
        assert_eq!(total.value.popcap, 4.0);
    }

    #[test]
    fn upkeep_scales_with_count_and_ignores_time() {
        let squad = squad("tommies", "infantry", &[("tommy_uk", 5)]);
        let mut tommy = entity("tommy_uk", "infantry");
        tommy.upkeep.manpower = 1.5;
        tommy.cost.time = 12.0;
        let upkeep = squad_total_upkeep(&squad, &[tommy]);
        assert_eq!(upkeep.value.manpower, 7.5);
        assert_eq!(upkeep.value.time, 0.0);
    }
}
