use indexmap::IndexMap;
use serde::Serialize;

use crate::data::cost::ResourceCost;
use crate::data::data_registry::GameData;
use crate::data::diagnostics::Diagnostics;
use crate::data::ebps::EntityRecord;
use crate::data::sbps::SquadRecord;
use crate::data::upgrade::UpgradeRecord;
use crate::explorer::cost::{resolve_loadout, squad_total_cost, squad_total_upkeep};
use crate::explorer::upgrades::resolve_upgrades;
use crate::explorer::weapons::{carried_weapons, default_squad_member, SquadWeapon};

/// Everything the unit page shows for one squad.
#[derive(Debug, Clone, Serialize)]
pub struct SquadDetail {
    pub squad: SquadRecord,
    pub entities: Vec<EntityRecord>,
    pub default_member: EntityRecord,
    pub cost: ResourceCost,
    pub upkeep: ResourceCost,
    pub upgrades: IndexMap<String, UpgradeRecord>,
    pub weapons: Vec<SquadWeapon>,
    pub diagnostics: Diagnostics,
}

/// Build the detail view of squad `id`. `None` when the squad is unknown or
/// none of its loadout resolves.
pub fn squad_detail(id: &str, data: &GameData) -> Option<SquadDetail> {
    let squad = data.squad(id)?;
    let loadout = resolve_loadout(squad, data.entities());
    let members: Vec<&EntityRecord> = loadout.value.iter().map(|(_, entity)| *entity).collect();
    let default_member = default_squad_member(squad, &members)?.clone();

    let mut diagnostics = loadout.diagnostics;
    let cost = squad_total_cost(squad, data.entities()).value;
    let upkeep = squad_total_upkeep(squad, data.entities()).value;
    let upgrades = resolve_upgrades(&squad.id, &squad.upgrades, data.upgrades());
    diagnostics.extend(upgrades.diagnostics);
    let weapons = carried_weapons(&loadout.value, data.weapons());
    diagnostics.extend(weapons.diagnostics);

    Some(SquadDetail {
        squad: squad.clone(),
        entities: members.into_iter().cloned().collect(),
        default_member,
        cost,
        upkeep,
        upgrades: upgrades
            .value
            .into_iter()
            .map(|(upgrade_id, upgrade)| (upgrade_id, upgrade.clone()))
            .collect(),
        weapons: weapons.value,
        diagnostics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::explorer::test_support::{entity, squad, upgrade, weapon};

    #[test]
    fn unknown_or_unresolvable_squads_have_no_detail() {
        let data = GameData::from_records(
            vec![squad("ghosts", "infantry", &[("ghost", 4)])],
            Vec::new(),
            Vec::new(),
            Vec::new(),
        );
        assert!(squad_detail("nobody", &data).is_none());
        assert!(squad_detail("ghosts", &data).is_none());
    }

    #[test]
    fn detail_bundles_cost_upkeep_and_upgrades() {
        let mut grens = squad("grens", "infantry", &[("gren", 4), ("missing", 1)]);
        grens.upgrades = vec!["upgrade/german/squad/mg34_ger".to_string()];
        let mut gren = entity("gren", "infantry");
        gren.cost.manpower = 70.0;
        gren.upkeep.manpower = 2.0;
        let data = GameData::from_records(vec![grens], vec![gren], Vec::new(), vec![upgrade("mg34_ger")]);

        let detail = squad_detail("grens", &data).expect("detail");
        assert_eq!(detail.default_member.id, "gren");
        assert_eq!(detail.cost.manpower, 280.0);
        assert_eq!(detail.upkeep.manpower, 8.0);
        assert!(detail.upgrades.contains_key("mg34_ger"));
        assert_eq!(detail.diagnostics.len(), 1);
    }

    #[test]
    fn weapon_gaps_are_listed_when_entity_shares_the_squad_id() {
        let schrecks = squad("pschreck_ak", "infantry", &[("pschreck_ak", 4), ("missing", 1)]);
        let mut member = entity("pschreck_ak", "infantry");
        member.weapons = vec![
            "weapon/afrika_korps/small_arms/missing_weapon".to_string(),
            "weapon/afrika_korps/small_arms/panzerschreck".to_string(),
        ];
        let data = GameData::from_records(
            vec![schrecks],
            vec![member],
            vec![weapon("panzerschreck", 120.0)],
            Vec::new(),
        );

        let detail = squad_detail("pschreck_ak", &data).expect("detail");
        assert_eq!(detail.weapons.len(), 1);
        assert_eq!(detail.weapons[0].num, 4);
        let messages: Vec<&str> = detail.diagnostics.entries.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(
            messages,
            vec!["loadout entity 'missing' not found", "weapon 'missing_weapon' not found"]
        );
    }
}
