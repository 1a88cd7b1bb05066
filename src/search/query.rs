//! Query Builder: concrete search parameters for one stage.

use serde::Serialize;

use super::stages::{Attribute, SearchStage, StageKind};
use crate::model::DefendantObservation;

/// Parameters for one unified search call.
///
/// Serializes to the service's query string; `kind` selects the endpoint
/// and is not sent as a parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryParameters {
    #[serde(skip)]
    pub kind: StageKind,
    pub page_size: u32,
    pub start_from: u32,
    pub proceedings_concluded: bool,
    pub crown_or_magistrates: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pnc_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cro_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line1: Option<String>,
}

impl QueryParameters {
    /// Same query, positioned at another offset.
    pub fn at_offset(&self, start_from: u32) -> Self {
        Self {
            start_from,
            ..self.clone()
        }
    }

    /// Identifying attributes carried by this query, in table order.
    pub fn attributes(&self) -> Vec<Attribute> {
        [
            (Attribute::PncId, &self.pnc_id),
            (Attribute::CroNumber, &self.cro_number),
            (Attribute::LastName, &self.last_name),
            (Attribute::FirstName, &self.first_name),
            (Attribute::DateOfBirth, &self.date_of_birth),
            (Attribute::AddressLine1, &self.address_line1),
        ]
        .into_iter()
        .filter(|(_, v)| v.is_some())
        .map(|(a, _)| a)
        .collect()
    }

    fn set(&mut self, attribute: Attribute, value: String) {
        let slot = match attribute {
            Attribute::PncId => &mut self.pnc_id,
            Attribute::CroNumber => &mut self.cro_number,
            Attribute::LastName => &mut self.last_name,
            Attribute::FirstName => &mut self.first_name,
            Attribute::DateOfBirth => &mut self.date_of_birth,
            Attribute::AddressLine1 => &mut self.address_line1,
        };
        *slot = Some(value);
    }
}

/// Build the first-page parameters for `stage`.
///
/// Returns `None` when any attribute the stage needs is blank, in which case
/// the stage is skipped. Pure: no I/O.
pub fn build(
    observation: &DefendantObservation,
    stage: &SearchStage,
    page_size: u32,
) -> Option<QueryParameters> {
    let mut params = QueryParameters {
        kind: stage.kind,
        page_size,
        start_from: 0,
        proceedings_concluded: observation.proceedings_concluded,
        crown_or_magistrates: observation.crown_or_magistrates,
        pnc_id: None,
        cro_number: None,
        last_name: None,
        first_name: None,
        date_of_birth: None,
        address_line1: None,
    };

    for attribute in stage.attributes {
        params.set(*attribute, attribute.value(observation)?);
    }

    Some(params)
}
