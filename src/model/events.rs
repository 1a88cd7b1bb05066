//! Domain events recorded on a case stream.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Address, CandidateMatch};

/// Event stream domain that match outcomes are appended to.
pub const CASE_DOMAIN: &str = "case";

const EXACT_MATCH_FOUND: &str = "casematch.DefendantExactMatchFound";
const PARTIAL_MATCHES_STORED: &str = "casematch.DefendantPartialMatchesStored";

/// One persisted event in a stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventPage {
    pub sequence: u32,
    pub event_type: String,
    pub payload: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

/// A matched case/defendant as carried in event payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedDefendant {
    pub prosecution_case_id: Uuid,
    pub case_reference: Option<String>,
    pub defendant_id: Uuid,
    pub master_defendant_id: Option<Uuid>,
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub pnc_id: Option<String>,
    pub cro_number: Option<String>,
    pub address: Option<Address>,
    pub court_proceedings_initiated: Option<DateTime<Utc>>,
    pub matched_by: String,
}

impl From<CandidateMatch> for MatchedDefendant {
    fn from(candidate: CandidateMatch) -> Self {
        let d = candidate.defendant;
        Self {
            prosecution_case_id: candidate.prosecution_case_id,
            case_reference: candidate.case_reference,
            defendant_id: d.defendant_id,
            master_defendant_id: d.master_defendant_id,
            first_name: d.first_name,
            middle_name: d.middle_name,
            last_name: d.last_name,
            date_of_birth: d.date_of_birth,
            pnc_id: d.pnc_id,
            cro_number: d.cro_number,
            address: d.address,
            court_proceedings_initiated: d.court_proceedings_initiated,
            matched_by: candidate.stage,
        }
    }
}

/// Events produced by defendant matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MatchEvent {
    #[serde(rename_all = "camelCase")]
    ExactMatchFound {
        case_id: Uuid,
        defendant_id: Uuid,
        matched: MatchedDefendant,
    },
    #[serde(rename_all = "camelCase")]
    PartialMatchesStored {
        case_id: Uuid,
        defendant_id: Uuid,
        candidates: Vec<MatchedDefendant>,
    },
}

impl MatchEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            MatchEvent::ExactMatchFound { .. } => EXACT_MATCH_FOUND,
            MatchEvent::PartialMatchesStored { .. } => PARTIAL_MATCHES_STORED,
        }
    }

    pub fn defendant_id(&self) -> Uuid {
        match self {
            MatchEvent::ExactMatchFound { defendant_id, .. }
            | MatchEvent::PartialMatchesStored { defendant_id, .. } => *defendant_id,
        }
    }

    /// Wrap the event in a page at the given stream sequence.
    pub fn to_page(&self, sequence: u32) -> Result<EventPage, serde_json::Error> {
        Ok(EventPage {
            sequence,
            event_type: self.event_type().to_string(),
            payload: serde_json::to_value(self)?,
            created_at: Utc::now(),
        })
    }

    /// Decode a page written by [`MatchEvent::to_page`].
    ///
    /// Returns `Ok(None)` for event types this crate does not produce.
    pub fn from_page(page: &EventPage) -> Result<Option<Self>, serde_json::Error> {
        match page.event_type.as_str() {
            EXACT_MATCH_FOUND | PARTIAL_MATCHES_STORED => {
                serde_json::from_value(page.payload.clone()).map(Some)
            }
            _ => Ok(None),
        }
    }
}
