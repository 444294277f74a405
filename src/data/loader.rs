//! Memoizing loader for the mapped tables.
//!
//! Construct one loader at startup and share it by reference. Each table is
//! fetched and mapped on first request; later callers get the cached `Arc`.
//! A failed load leaves its table uncached, so the next caller fetches again.

use std::sync::{Arc, Mutex};

use serde_json::Value;
use tokio::sync::OnceCell;

use crate::data::data_registry::GameData;
use crate::data::diagnostics::MappedTable;
use crate::data::ebps::{map_entities, EntityRecord};
use crate::data::locstring::LocstringTable;
use crate::data::registry::{DataSetEntry, Registry};
use crate::data::sbps::{map_squads, SquadRecord};
use crate::data::source::{Dataset, SnapshotSource};
use crate::data::upgrade::{map_upgrades, UpgradeRecord};
use crate::data::weapon::{map_weapons, WeaponRecord};
use crate::error::LoadError;

type Mapper<T> = fn(&Value, &LocstringTable) -> MappedTable<T>;

#[derive(Debug, Default)]
struct TableCache {
    locstrings: OnceCell<Arc<LocstringTable>>,
    squads: OnceCell<Arc<MappedTable<SquadRecord>>>,
    entities: OnceCell<Arc<MappedTable<EntityRecord>>>,
    weapons: OnceCell<Arc<MappedTable<WeaponRecord>>>,
    upgrades: OnceCell<Arc<MappedTable<UpgradeRecord>>>,
    provenance: Mutex<Registry>,
}

#[derive(Debug)]
pub struct GameDataLoader {
    source: SnapshotSource,
    cache: TableCache,
}

impl GameDataLoader {
    pub fn new(source: SnapshotSource) -> Self {
        GameDataLoader {
            source,
            cache: TableCache::default(),
        }
    }

    pub fn source(&self) -> &SnapshotSource {
        &self.source
    }

    pub async fn locstrings(&self) -> Result<Arc<LocstringTable>, LoadError> {
        self.cache
            .locstrings
            .get_or_try_init(|| async {
                let document = self.source.fetch(Dataset::Locstring).await?;
                let table = LocstringTable::from_document(&document);
                self.record_provenance(Dataset::Locstring, table.len());
                Ok(Arc::new(table))
            })
            .await
            .map(Arc::clone)
    }

    pub async fn squads(&self) -> Result<Arc<MappedTable<SquadRecord>>, LoadError> {
        self.table(&self.cache.squads, Dataset::Sbps, map_squads).await
    }

    /// Entities of every kept unit type, buildings included.
    pub async fn entities(&self) -> Result<Arc<MappedTable<EntityRecord>>, LoadError> {
        self.table(&self.cache.entities, Dataset::Ebps, map_entities).await
    }

    /// Production buildings, a view over the entity table.
    pub async fn buildings(&self) -> Result<Vec<EntityRecord>, LoadError> {
        let entities = self.entities().await?;
        Ok(entities
            .records
            .iter()
            .filter(|entity| entity.is_building())
            .cloned()
            .collect())
    }

    pub async fn weapons(&self) -> Result<Arc<MappedTable<WeaponRecord>>, LoadError> {
        self.table(&self.cache.weapons, Dataset::Weapon, map_weapons).await
    }

    pub async fn upgrades(&self) -> Result<Arc<MappedTable<UpgradeRecord>>, LoadError> {
        self.table(&self.cache.upgrades, Dataset::Upgrade, map_upgrades).await
    }

    /// Load every table and bundle them into a read-only [GameData].
    pub async fn initialize(&self) -> Result<Arc<GameData>, LoadError> {
        let locstrings = self.locstrings().await?;
        let squads = self.squads().await?;
        let entities = self.entities().await?;
        let weapons = self.weapons().await?;
        let upgrades = self.upgrades().await?;
        tracing::info!(
            squads = squads.len(),
            entities = entities.len(),
            weapons = weapons.len(),
            upgrades = upgrades.len(),
            "game data ready"
        );
        Ok(Arc::new(GameData::new(
            locstrings,
            squads,
            entities,
            weapons,
            upgrades,
            self.provenance(),
        )))
    }

    /// Drop every cached table; the next request fetches a fresh snapshot.
    pub fn reset(&mut self) {
        self.cache = TableCache::default();
    }

    /// Whether `dataset` has been loaded since construction or the last reset.
    pub fn is_cached(&self, dataset: Dataset) -> bool {
        match dataset {
            Dataset::Locstring => self.cache.locstrings.initialized(),
            Dataset::Sbps => self.cache.squads.initialized(),
            Dataset::Ebps => self.cache.entities.initialized(),
            Dataset::Weapon => self.cache.weapons.initialized(),
            Dataset::Upgrade => self.cache.upgrades.initialized(),
        }
    }

    pub fn provenance(&self) -> Registry {
        self.cache
            .provenance
            .lock()
            .map(|registry| registry.clone())
            .unwrap_or_default()
    }

    async fn table<T>(
        &self,
        cell: &OnceCell<Arc<MappedTable<T>>>,
        dataset: Dataset,
        map: Mapper<T>,
    ) -> Result<Arc<MappedTable<T>>, LoadError> {
        cell.get_or_try_init(|| async {
            let locstrings = self.locstrings().await?;
            let document = self.source.fetch(dataset).await?;
            let table = map(&document, &locstrings);
            self.record_provenance(dataset, table.len());
            Ok(Arc::new(table))
        })
        .await
        .map(Arc::clone)
    }

    fn record_provenance(&self, dataset: Dataset, records: usize) {
        if let Ok(mut registry) = self.cache.provenance.lock() {
            registry.insert(
                dataset.as_str().to_string(),
                DataSetEntry::now(self.source.location(dataset), records),
            );
        }
    }
}
