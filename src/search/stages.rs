//! The ordered search stage table.

use crate::model::{is_blank, DefendantObservation};

/// Whether a stage's hits are authoritative or need human review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageKind {
    Exact,
    Partial,
}

impl StageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StageKind::Exact => "exact",
            StageKind::Partial => "partial",
        }
    }
}

/// Identifying attribute of a defendant that a stage can search on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    PncId,
    CroNumber,
    LastName,
    FirstName,
    DateOfBirth,
    AddressLine1,
}

impl Attribute {
    /// Trimmed value of the attribute, or `None` if it is blank.
    pub fn value(&self, observation: &DefendantObservation) -> Option<String> {
        let person = observation.person.as_ref();
        let raw = match self {
            Attribute::PncId => observation.pnc_id.clone(),
            Attribute::CroNumber => observation.cro_number.clone(),
            Attribute::LastName => person.and_then(|p| p.last_name.clone()),
            Attribute::FirstName => person.and_then(|p| p.first_name.clone()),
            Attribute::DateOfBirth => person
                .and_then(|p| p.date_of_birth)
                .map(|d| d.format("%Y-%m-%d").to_string()),
            Attribute::AddressLine1 => person.and_then(|p| p.address_line1.clone()),
        };
        if is_blank(raw.as_deref()) {
            None
        } else {
            raw.map(|v| v.trim().to_string())
        }
    }
}

/// One step of the escalation.
///
/// A stage runs only when every attribute in `attributes` is present on the
/// observation; the same attributes make up its query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchStage {
    pub name: &'static str,
    pub kind: StageKind,
    pub attributes: &'static [Attribute],
}

impl SearchStage {
    pub const fn new(name: &'static str, kind: StageKind, attributes: &'static [Attribute]) -> Self {
        Self {
            name,
            kind,
            attributes,
        }
    }

    /// Whether every attribute this stage needs is present.
    pub fn applies_to(&self, observation: &DefendantObservation) -> bool {
        self.attributes
            .iter()
            .all(|a| a.value(observation).is_some())
    }
}

const NAME_DOB_ADDRESS: &[Attribute] = &[
    Attribute::LastName,
    Attribute::FirstName,
    Attribute::DateOfBirth,
    Attribute::AddressLine1,
];

const NAME_DOB: &[Attribute] = &[
    Attribute::LastName,
    Attribute::FirstName,
    Attribute::DateOfBirth,
];

/// Exact stages before partial; within each kind, most specific first.
pub const STAGES: &[SearchStage] = &[
    SearchStage::new("exact-pnc", StageKind::Exact, &[Attribute::PncId]),
    SearchStage::new("exact-cro", StageKind::Exact, &[Attribute::CroNumber]),
    SearchStage::new("exact-name-dob-address", StageKind::Exact, NAME_DOB_ADDRESS),
    SearchStage::new("partial-pnc", StageKind::Partial, &[Attribute::PncId]),
    SearchStage::new("partial-cro", StageKind::Partial, &[Attribute::CroNumber]),
    SearchStage::new("partial-name-dob-address", StageKind::Partial, NAME_DOB_ADDRESS),
    SearchStage::new("partial-name-dob", StageKind::Partial, NAME_DOB),
];
