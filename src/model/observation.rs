//! The defendant observation that triggers a resolution run.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One defendant as known from the case currently being processed.
///
/// Supplied by the caller per invocation and never mutated by a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefendantObservation {
    /// Case whose event stream receives the outcome.
    pub case_id: Uuid,
    pub defendant_id: Uuid,
    #[serde(default)]
    pub pnc_id: Option<String>,
    #[serde(default)]
    pub cro_number: Option<String>,
    /// Person-level details. `None` for defendants that are not people
    /// (organisations), which are never searched.
    #[serde(default)]
    pub person: Option<PersonDetails>,
    #[serde(default)]
    pub proceedings_concluded: bool,
    #[serde(default)]
    pub crown_or_magistrates: bool,
}

/// Person-level identifying details of a defendant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonDetails {
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub address_line1: Option<String>,
}

impl DefendantObservation {
    /// Create an observation with no identifying attributes.
    pub fn new(case_id: Uuid, defendant_id: Uuid) -> Self {
        Self {
            case_id,
            defendant_id,
            pnc_id: None,
            cro_number: None,
            person: None,
            proceedings_concluded: false,
            crown_or_magistrates: false,
        }
    }

    pub fn with_pnc_id(mut self, pnc_id: impl Into<String>) -> Self {
        self.pnc_id = Some(pnc_id.into());
        self
    }

    pub fn with_cro_number(mut self, cro_number: impl Into<String>) -> Self {
        self.cro_number = Some(cro_number.into());
        self
    }

    pub fn with_person(mut self, person: PersonDetails) -> Self {
        self.person = Some(person);
        self
    }

    pub fn with_proceedings_concluded(mut self, concluded: bool) -> Self {
        self.proceedings_concluded = concluded;
        self
    }

    pub fn with_crown_or_magistrates(mut self, crown_or_magistrates: bool) -> Self {
        self.crown_or_magistrates = crown_or_magistrates;
        self
    }

    /// Whether the defendant carries any person-level details at all.
    pub fn is_searchable(&self) -> bool {
        self.person.is_some()
    }
}

/// True when a value is absent or contains only whitespace.
pub fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}
