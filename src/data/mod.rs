//! Game data: snapshot sources, the blueprint tree mapper and the mapped tables.

pub mod cost;
pub mod data_registry;
pub mod diagnostics;
pub mod ebps;
pub mod faction;
pub mod loader;
pub mod locstring;
pub mod mapping;
pub mod registry;
pub mod sbps;
pub mod source;
pub mod tree;
pub mod ui;
pub mod upgrade;
pub mod weapon;

pub use cost::ResourceCost;
pub use data_registry::GameData;
pub use diagnostics::{DiagnosticKind, Diagnostics, MappedTable, MappingDiagnostic};
pub use ebps::EntityRecord;
pub use faction::Faction;
pub use loader::GameDataLoader;
pub use locstring::LocstringTable;
pub use sbps::{LoadoutEntry, SquadRecord};
pub use source::{Dataset, SnapshotSource};
pub use upgrade::UpgradeRecord;
pub use weapon::WeaponRecord;
