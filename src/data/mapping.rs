//! Generic tree -> table mapping shared by every blueprint kind.

use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::data::diagnostics::{DiagnosticKind, Diagnostics, MappedTable};
use crate::data::faction::Faction;
use crate::data::locstring::LocstringTable;
use crate::data::tree::{walk_document, NodeContext};

/// One blueprint kind (squads, entities, weapons, upgrades).
pub trait BlueprintKind {
    type Record;

    /// Used in logs.
    const NAME: &'static str;

    /// Key whose presence marks a blueprint node.
    const CONTAINER_KEY: &'static str;

    /// Folder names kept in the final table. `None` keeps every unit type.
    const UNIT_TYPES: Option<&'static [&'static str]>;

    fn map_node(
        ctx: &NodeContext,
        faction: Faction,
        node: &Map<String, Value>,
        locstrings: &LocstringTable,
        diagnostics: &mut Diagnostics,
    ) -> Self::Record;
}

/// Map every blueprint node of `document` into a flat table.
///
/// Nodes outside the base factions or the kind's unit types are dropped, as is
/// any second node reusing an id already mapped. Each drop is recorded as a
/// diagnostic; nothing here fails.
pub fn map_document<K: BlueprintKind>(
    document: &Value,
    locstrings: &LocstringTable,
) -> MappedTable<K::Record> {
    let mut table = MappedTable::default();
    let mut seen_ids = HashSet::new();

    walk_document(document, K::CONTAINER_KEY, |ctx, node| {
        let Some(faction) = Faction::from_folder(ctx.faction_segment()) else {
            table.diagnostics.push(
                DiagnosticKind::DroppedFaction,
                &ctx.key,
                format!("'{}' is not a base faction", ctx.faction_segment()),
            );
            return;
        };
        if let Some(allowed) = K::UNIT_TYPES {
            if !allowed.contains(&ctx.parent.as_str()) {
                table.diagnostics.push(
                    DiagnosticKind::DroppedUnitType,
                    &ctx.key,
                    format!("unit type '{}' is not listed for {}", ctx.parent, K::NAME),
                );
                return;
            }
        }
        if !seen_ids.insert(ctx.key.clone()) {
            table.diagnostics.push(
                DiagnosticKind::DuplicateId,
                &ctx.key,
                format!("already mapped; skipping copy under '{}'", ctx.path),
            );
            return;
        }
        let record = K::map_node(&ctx, faction, node, locstrings, &mut table.diagnostics);
        table.records.push(record);
    });

    tracing::info!(
        kind = K::NAME,
        records = table.records.len(),
        diagnostics = table.diagnostics.len(),
        "mapped blueprint table"
    );
    table
}
