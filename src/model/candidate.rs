//! Unified search response types and candidate matches.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One page of results from the unified search service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchPage {
    /// Total results across all pages for the query, not just this page.
    pub total_results: u32,
    pub cases: Vec<CaseResult>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseResult {
    #[serde(default)]
    pub case_reference: Option<String>,
    pub prosecution_case_id: Uuid,
    #[serde(default)]
    pub defendants: Vec<DefendantResult>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefendantResult {
    pub defendant_id: Uuid,
    #[serde(default)]
    pub master_defendant_id: Option<Uuid>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub middle_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub pnc_id: Option<String>,
    #[serde(default)]
    pub cro_number: Option<String>,
    #[serde(default)]
    pub address: Option<Address>,
    #[serde(default)]
    pub court_proceedings_initiated: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub address3: Option<String>,
    pub address4: Option<String>,
    pub address5: Option<String>,
    pub postcode: Option<String>,
}

impl SearchPage {
    /// Page with the given total and no cases.
    pub fn empty(total_results: u32) -> Self {
        Self {
            total_results,
            cases: Vec::new(),
        }
    }

    /// True when the page carries no case/defendant pairs.
    pub fn is_empty(&self) -> bool {
        self.cases.iter().all(|c| c.defendants.is_empty())
    }

    /// Flatten the page into candidates in returned order, tagged with the
    /// stage that requested it.
    pub fn into_candidates(self, stage: &str) -> Vec<CandidateMatch> {
        self.cases
            .into_iter()
            .flat_map(|case| {
                let CaseResult {
                    case_reference,
                    prosecution_case_id,
                    defendants,
                } = case;
                defendants.into_iter().map(move |defendant| CandidateMatch {
                    prosecution_case_id,
                    case_reference: case_reference.clone(),
                    defendant,
                    stage: stage.to_string(),
                })
            })
            .collect()
    }
}

/// A case/defendant pair returned as a possible identity match.
///
/// Identity is `(prosecution_case_id, defendant_id)`; the stage tag and the
/// attribute payload do not take part in equality of identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateMatch {
    pub prosecution_case_id: Uuid,
    pub case_reference: Option<String>,
    pub defendant: DefendantResult,
    /// Name of the search stage that first surfaced this candidate.
    pub stage: String,
}

impl CandidateMatch {
    pub fn identity(&self) -> (Uuid, Uuid) {
        (self.prosecution_case_id, self.defendant.defendant_id)
    }
}

impl DefendantResult {
    /// Defendant with only an id set.
    pub fn with_id(defendant_id: Uuid) -> Self {
        Self {
            defendant_id,
            master_defendant_id: None,
            first_name: None,
            middle_name: None,
            last_name: None,
            date_of_birth: None,
            pnc_id: None,
            cro_number: None,
            address: None,
            court_proceedings_initiated: None,
        }
    }
}
