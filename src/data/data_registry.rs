//! Startup-loaded game data (GameData) for the server and CLI.
//! Built once by the loader and passed via Arc; read-only afterwards.

use std::collections::HashMap;
use std::sync::Arc;

use crate::data::diagnostics::{MappedTable, MappingDiagnostic};
use crate::data::ebps::EntityRecord;
use crate::data::faction::Faction;
use crate::data::locstring::LocstringTable;
use crate::data::registry::Registry;
use crate::data::sbps::SquadRecord;
use crate::data::upgrade::UpgradeRecord;
use crate::data::weapon::WeaponRecord;

fn index_by_id<T>(records: &[T], id: impl Fn(&T) -> &str) -> HashMap<String, usize> {
    let mut index = HashMap::with_capacity(records.len());
    for (position, record) in records.iter().enumerate() {
        // First match wins, like a linear search would.
        index.entry(id(record).to_string()).or_insert(position);
    }
    index
}

/// Every mapped table plus id indexes.
#[derive(Debug)]
pub struct GameData {
    pub locstrings: Arc<LocstringTable>,
    pub squads: Arc<MappedTable<SquadRecord>>,
    pub entities: Arc<MappedTable<EntityRecord>>,
    pub weapons: Arc<MappedTable<WeaponRecord>>,
    pub upgrades: Arc<MappedTable<UpgradeRecord>>,
    pub provenance: Registry,
    squad_index: HashMap<String, usize>,
    entity_index: HashMap<String, usize>,
    weapon_index: HashMap<String, usize>,
    upgrade_index: HashMap<String, usize>,
}

impl GameData {
    pub fn new(
        locstrings: Arc<LocstringTable>,
        squads: Arc<MappedTable<SquadRecord>>,
        entities: Arc<MappedTable<EntityRecord>>,
        weapons: Arc<MappedTable<WeaponRecord>>,
        upgrades: Arc<MappedTable<UpgradeRecord>>,
        provenance: Registry,
    ) -> Self {
        GameData {
            squad_index: index_by_id(&squads.records, |s| &s.id),
            entity_index: index_by_id(&entities.records, |e| &e.id),
            weapon_index: index_by_id(&weapons.records, |w| &w.id),
            upgrade_index: index_by_id(&upgrades.records, |u| &u.id),
            locstrings,
            squads,
            entities,
            weapons,
            upgrades,
            provenance,
        }
    }

    /// Build from bare record lists, without diagnostics or provenance.
    pub fn from_records(
        squads: Vec<SquadRecord>,
        entities: Vec<EntityRecord>,
        weapons: Vec<WeaponRecord>,
        upgrades: Vec<UpgradeRecord>,
    ) -> Self {
        fn table<T>(records: Vec<T>) -> Arc<MappedTable<T>> {
            Arc::new(MappedTable {
                records,
                ..MappedTable::default()
            })
        }
        GameData::new(
            Arc::new(LocstringTable::default()),
            table(squads),
            table(entities),
            table(weapons),
            table(upgrades),
            Registry::new(),
        )
    }

    pub fn squads(&self) -> &[SquadRecord] {
        &self.squads.records
    }

    pub fn entities(&self) -> &[EntityRecord] {
        &self.entities.records
    }

    pub fn weapons(&self) -> &[WeaponRecord] {
        &self.weapons.records
    }

    pub fn upgrades(&self) -> &[UpgradeRecord] {
        &self.upgrades.records
    }

    pub fn squad(&self, id: &str) -> Option<&SquadRecord> {
        self.squad_index.get(id).map(|&i| &self.squads.records[i])
    }

    pub fn entity(&self, id: &str) -> Option<&EntityRecord> {
        self.entity_index.get(id).map(|&i| &self.entities.records[i])
    }

    pub fn weapon(&self, id: &str) -> Option<&WeaponRecord> {
        self.weapon_index.get(id).map(|&i| &self.weapons.records[i])
    }

    pub fn upgrade(&self, id: &str) -> Option<&UpgradeRecord> {
        self.upgrade_index.get(id).map(|&i| &self.upgrades.records[i])
    }

    pub fn squads_for(&self, faction: Faction) -> impl Iterator<Item = &SquadRecord> {
        self.squads().iter().filter(move |s| s.faction == faction)
    }

    pub fn buildings(&self) -> impl Iterator<Item = &EntityRecord> {
        self.entities().iter().filter(|e| e.is_building())
    }

    /// Mapping diagnostics of every table, tagged with the dataset name.
    pub fn diagnostics(&self) -> Vec<(&'static str, &MappingDiagnostic)> {
        fn tagged<'a>(
            name: &'static str,
            entries: &'a [MappingDiagnostic],
        ) -> impl Iterator<Item = (&'static str, &'a MappingDiagnostic)> + 'a {
            entries.iter().map(move |d| (name, d))
        }
        tagged("sbps", &self.squads.diagnostics.entries)
            .chain(tagged("ebps", &self.entities.diagnostics.entries))
            .chain(tagged("weapon", &self.weapons.diagnostics.entries))
            .chain(tagged("upgrade", &self.upgrades.diagnostics.entries))
            .collect()
    }
}
