//! Structured diagnostics gathered while mapping and resolving.
//!
//! Nothing here is an error: every diagnostic marks data that was skipped or
//! dropped and returned alongside the result, so callers and tests can see
//! exactly what went missing.

use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A loadout unit had no `loadout_data.type`; the entry was skipped.
    MissingLoadoutType,
    /// An upgrade entry had no `upgrade.instance_reference`; the entry was skipped.
    MissingUpgradeReference,
    /// The blueprint sits outside the four base factions.
    DroppedFaction,
    /// The blueprint's folder is not one of the kind's unit types.
    DroppedUnitType,
    /// A second blueprint reused an id already in the table.
    DuplicateId,
    /// A loadout, upgrade or spawn reference did not resolve against its table.
    DanglingReference,
}

impl DiagnosticKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingLoadoutType => "missing_loadout_type",
            Self::MissingUpgradeReference => "missing_upgrade_reference",
            Self::DroppedFaction => "dropped_faction",
            Self::DroppedUnitType => "dropped_unit_type",
            Self::DuplicateId => "duplicate_id",
            Self::DanglingReference => "dangling_reference",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MappingDiagnostic {
    pub kind: DiagnosticKind,
    /// Id of the record being mapped or resolved.
    pub record_id: String,
    pub message: String,
}

impl fmt::Display for MappingDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]: {}", self.record_id, self.kind, self.message)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Diagnostics {
    pub entries: Vec<MappingDiagnostic>,
}

impl Diagnostics {
    pub fn push(
        &mut self,
        kind: DiagnosticKind,
        record_id: impl Into<String>,
        message: impl Into<String>,
    ) {
        let diagnostic = MappingDiagnostic {
            kind,
            record_id: record_id.into(),
            message: message.into(),
        };
        match diagnostic.kind {
            DiagnosticKind::DroppedFaction | DiagnosticKind::DroppedUnitType => tracing::debug!(
                kind = %diagnostic.kind,
                record_id = %diagnostic.record_id,
                "{}",
                diagnostic.message
            ),
            _ => tracing::warn!(
                kind = %diagnostic.kind,
                record_id = %diagnostic.record_id,
                "{}",
                diagnostic.message
            ),
        }
        self.entries.push(diagnostic);
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.entries.extend(other.entries);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MappingDiagnostic> {
        self.entries.iter()
    }

    pub fn of_kind(&self, kind: DiagnosticKind) -> impl Iterator<Item = &MappingDiagnostic> {
        self.entries.iter().filter(move |d| d.kind == kind)
    }
}

/// A mapped table together with what was skipped while building it.
#[derive(Debug, Clone, Serialize)]
pub struct MappedTable<T> {
    pub records: Vec<T>,
    pub diagnostics: Diagnostics,
}

impl<T> Default for MappedTable<T> {
    fn default() -> Self {
        MappedTable {
            records: Vec::new(),
            diagnostics: Diagnostics::default(),
        }
    }
}

impl<T> MappedTable<T> {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
