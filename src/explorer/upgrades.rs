use indexmap::IndexMap;

use crate::data::diagnostics::{DiagnosticKind, Diagnostics};
use crate::data::tree::last_segment;
use crate::data::upgrade::UpgradeRecord;
use crate::explorer::Resolved;

/// Resolve upgrade references to their records, keyed by short id.
///
/// References reducing to the same id collapse to one entry; the last one
/// wins. Unresolved references are skipped and reported against `owner_id`.
pub fn resolve_upgrades<'a>(
    owner_id: &str,
    references: &[String],
    upgrades: &'a [UpgradeRecord],
) -> Resolved<IndexMap<String, &'a UpgradeRecord>> {
    let mut diagnostics = Diagnostics::default();
    let mut resolved = IndexMap::new();
    for reference in references {
        let upgrade_id = last_segment(reference);
        match upgrades.iter().find(|upgrade| upgrade.id == upgrade_id) {
            Some(upgrade) => {
                resolved.insert(upgrade_id.to_string(), upgrade);
            }
            None => diagnostics.push(
                DiagnosticKind::DanglingReference,
                owner_id,
                format!("upgrade '{upgrade_id}' not found"),
            ),
        }
    }
    Resolved::new(resolved, diagnostics)
}
