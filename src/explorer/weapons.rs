use indexmap::IndexMap;
use serde::Serialize;

use crate::data::diagnostics::{DiagnosticKind, Diagnostics};
use crate::data::ebps::EntityRecord;
use crate::data::sbps::{LoadoutEntry, SquadRecord};
use crate::data::tree::last_segment;
use crate::data::weapon::WeaponRecord;
use crate::explorer::cost::resolve_loadout;
use crate::explorer::Resolved;

/// A weapon carried by a squad and how many members carry it.
#[derive(Debug, Clone, Serialize)]
pub struct SquadWeapon {
    pub weapon_id: String,
    pub weapon: WeaponRecord,
    pub num: u32,
}

/// Entities of the squad's loadout that resolve, in loadout order.
pub fn resolve_squad_entities<'a>(
    squad: &'a SquadRecord,
    entities: &'a [EntityRecord],
) -> Resolved<Vec<&'a EntityRecord>> {
    let loadout = resolve_loadout(squad, entities);
    let members = loadout.value.iter().map(|(_, entity)| *entity).collect();
    Resolved::new(members, loadout.diagnostics)
}

/// The entity shown as representative of the squad. Crewed team weapons list
/// the gun last; everything else leads with it.
pub fn default_squad_member<'a>(
    squad: &SquadRecord,
    members: &[&'a EntityRecord],
) -> Option<&'a EntityRecord> {
    if squad.unit_type == "team_weapons" && squad.loadout.len() > 1 {
        members.last().copied()
    } else {
        members.first().copied()
    }
}

/// Damage-dealing weapons of the squad, grouped by weapon id in first-seen
/// order, with `num` summed over the loadout counts of the carrying entities.
pub fn squad_weapons(
    squad: &SquadRecord,
    entities: &[EntityRecord],
    weapons: &[WeaponRecord],
) -> Resolved<Vec<SquadWeapon>> {
    let loadout = resolve_loadout(squad, entities);
    let mut diagnostics = loadout.diagnostics;
    let carried = carried_weapons(&loadout.value, weapons);
    diagnostics.extend(carried.diagnostics);
    Resolved::new(carried.value, diagnostics)
}

/// Weapons of an already resolved loadout. Only weapon references that fail to
/// resolve are reported, against the entity carrying them.
pub fn carried_weapons(
    loadout: &[(&LoadoutEntry, &EntityRecord)],
    weapons: &[WeaponRecord],
) -> Resolved<Vec<SquadWeapon>> {
    let mut diagnostics = Diagnostics::default();
    let mut grouped: IndexMap<&str, SquadWeapon> = IndexMap::new();

    for (entry, entity) in loadout {
        for reference in &entity.weapons {
            let weapon_id = last_segment(reference);
            let Some(weapon) = weapons.iter().find(|weapon| weapon.id == weapon_id) else {
                diagnostics.push(
                    DiagnosticKind::DanglingReference,
                    &entity.id,
                    format!("weapon '{weapon_id}' not found"),
                );
                continue;
            };
            if !weapon.deals_damage() {
                continue;
            }
            grouped
                .entry(weapon_id)
                .and_modify(|carried| carried.num = carried.num.saturating_add(entry.num))
                .or_insert_with(|| SquadWeapon {
                    weapon_id: weapon_id.to_string(),
                    weapon: weapon.clone(),
                    num: entry.num,
                });
        }
    }

    Resolved::new(grouped.into_values().collect(), diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::explorer::test_support::{entity, squad, weapon};

    #[test]
    fn team_weapon_default_member_is_the_last_entity() {
        let mg = squad("mg42", "team_weapons", &[("gunner", 2), ("mg42_gun", 1)]);
        let entities = vec![entity("gunner", "team_weapons"), entity("mg42_gun", "team_weapons")];
        let members = resolve_squad_entities(&mg, &entities).into_value();
        assert_eq!(default_squad_member(&mg, &members).map(|e| e.id.as_str()), Some("mg42_gun"));

        let rifles = squad("grens", "infantry", &[("gren", 4), ("gren_nco", 1)]);
        let entities = vec![entity("gren", "infantry"), entity("gren_nco", "infantry")];
        let members = resolve_squad_entities(&rifles, &entities).into_value();
        assert_eq!(default_squad_member(&rifles, &members).map(|e| e.id.as_str()), Some("gren"));
    }

    #[test]
    fn weapons_are_grouped_and_non_damage_weapons_skipped() {
        let grens = squad("grens", "infantry", &[("gren", 3), ("gren_nco", 1)]);
        let mut gren = entity("gren", "infantry");
        gren.weapons = vec![
            "weapon/german/small_arms/kar98k".to_string(),
            "weapon/german/smoke/smoke_grenade".to_string(),
        ];
        let mut nco = entity("gren_nco", "infantry");
        nco.weapons = vec!["weapon/german/small_arms/kar98k".to_string()];
        let weapons = vec![weapon("kar98k", 16.0), weapon("smoke_grenade", 0.0)];

        let carried = squad_weapons(&grens, &[gren, nco], &weapons);
        assert_eq!(carried.value.len(), 1);
        assert_eq!(carried.value[0].weapon_id, "kar98k");
        assert_eq!(carried.value[0].num, 4);
        assert!(carried.diagnostics.is_empty());
    }

    #[test]
    fn unknown_weapon_is_reported_against_its_entity() {
        let grens = squad("grens", "infantry", &[("gren", 4)]);
        let mut gren = entity("gren", "infantry");
        gren.weapons = vec!["weapon/german/small_arms/missing".to_string()];
        let carried = squad_weapons(&grens, &[gren], &[]);
        assert!(carried.value.is_empty());
        assert_eq!(carried.diagnostics.entries[0].record_id, "gren");
    }

    #[test]
    fn carried_counts_saturate() {
        let crowd = squad("crowd", "infantry", &[("gren", u32::MAX), ("gren_nco", u32::MAX)]);
        let mut gren = entity("gren", "infantry");
        gren.weapons = vec!["weapon/german/small_arms/kar98k".to_string()];
        let mut nco = entity("gren_nco", "infantry");
        nco.weapons = vec!["weapon/german/small_arms/kar98k".to_string()];

        let carried = squad_weapons(&crowd, &[gren, nco], &[weapon("kar98k", 16.0)]);
        assert_eq!(carried.value[0].num, u32::MAX);
    }

    #[test]
    fn carried_weapons_report_only_weapon_gaps() {
        let grens = squad("grens", "infantry", &[("gren", 4), ("missing", 1)]);
        let mut gren = entity("gren", "infantry");
        gren.weapons = vec!["weapon/german/small_arms/missing".to_string()];
        let entities = vec![gren];
        let loadout = resolve_loadout(&grens, &entities);
        assert_eq!(loadout.diagnostics.len(), 1);

        let carried = carried_weapons(&loadout.value, &[]);
        assert_eq!(carried.diagnostics.len(), 1);
        assert_eq!(carried.diagnostics.entries[0].record_id, "gren");
    }
}
