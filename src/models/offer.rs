use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "offer_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OfferStatus {
    Pending,
    Accepted,
    Rejected,
    Cancelled,
    Completed,
}

impl OfferStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OfferStatus::Pending => "pending",
            OfferStatus::Accepted => "accepted",
            OfferStatus::Rejected => "rejected",
            OfferStatus::Cancelled => "cancelled",
            OfferStatus::Completed => "completed",
        }
    }

    /// Accepted and completed offers hold the job; only one may exist per job.
    pub fn is_active(&self) -> bool {
        matches!(self, OfferStatus::Accepted | OfferStatus::Completed)
    }
}

impl std::fmt::Display for OfferStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Offer {
    pub job_id: Uuid,
    pub candidate_id: Uuid,
    pub status: OfferStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OfferAction {
    Accept,
    Cancel,
    Complete,
}

impl OfferAction {
    fn required_status(self) -> OfferStatus {
        match self {
            OfferAction::Accept => OfferStatus::Pending,
            OfferAction::Cancel | OfferAction::Complete => OfferStatus::Accepted,
        }
    }

    fn resulting_status(self) -> OfferStatus {
        match self {
            OfferAction::Accept => OfferStatus::Accepted,
            OfferAction::Cancel => OfferStatus::Cancelled,
            OfferAction::Complete => OfferStatus::Completed,
        }
    }

    /// Status change applied to every other offer on the job, as `(from, to)`.
    fn sibling_transition(self) -> Option<(OfferStatus, OfferStatus)> {
        match self {
            OfferAction::Accept => Some((OfferStatus::Pending, OfferStatus::Rejected)),
            OfferAction::Cancel => Some((OfferStatus::Rejected, OfferStatus::Pending)),
            OfferAction::Complete => None,
        }
    }

    fn verb(self) -> &'static str {
        match self {
            OfferAction::Accept => "accepted",
            OfferAction::Cancel => "cancelled",
            OfferAction::Complete => "completed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusChange {
    pub candidate_id: Uuid,
    pub from: OfferStatus,
    pub to: OfferStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionPlan {
    pub target: StatusChange,
    pub siblings: Vec<StatusChange>,
}

impl TransitionPlan {
    pub fn sibling_ids(&self) -> Vec<Uuid> {
        self.siblings.iter().map(|c| c.candidate_id).collect()
    }

    /// The single status every sibling moves to, if any sibling moves.
    pub fn sibling_status(&self) -> Option<OfferStatus> {
        self.siblings.first().map(|c| c.to)
    }
}

/// Computes every status change `action` on `candidate_id`'s offer causes,
/// given all offers currently recorded for the job.
pub fn plan_transition(
    offers: &[Offer],
    candidate_id: Uuid,
    action: OfferAction,
) -> Result<TransitionPlan> {
    let target = offers
        .iter()
        .find(|o| o.candidate_id == candidate_id)
        .ok_or_else(|| Error::NotFound("Offer not found for this job and user".to_string()))?;

    let required = action.required_status();
    if target.status != required {
        return Err(Error::InvalidOperation(format!(
            "Only {} offers can be {}, this offer is {}",
            required,
            action.verb(),
            target.status
        )));
    }

    if action == OfferAction::Accept
        && offers
            .iter()
            .any(|o| o.candidate_id != candidate_id && o.status.is_active())
    {
        return Err(Error::InvalidOperation(
            "This job already has an accepted offer".to_string(),
        ));
    }

    let siblings = match action.sibling_transition() {
        Some((from, to)) => offers
            .iter()
            .filter(|o| o.candidate_id != candidate_id && o.status == from)
            .map(|o| StatusChange {
                candidate_id: o.candidate_id,
                from,
                to,
            })
            .collect(),
        None => Vec::new(),
    };

    Ok(TransitionPlan {
        target: StatusChange {
            candidate_id,
            from: target.status,
            to: action.resulting_status(),
        },
        siblings,
    })
}
