//! Result tags for accepted mutations.
//!
//! Every accepted mutation says which kind of change it made, so a screen can
//! pick its message without comparing the store before and after.

use serde::Serialize;

/// What an accepted mutation did.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// A new member was registered.
    Created {
        /// Id of the new member, shown to the user.
        id: String,
    },
    /// An existing member record was replaced.
    Updated {
        /// Id of the replaced member.
        id: String,
    },
    /// A scheme grant was added to a member's history.
    SchemeApproved {
        /// Id of the member.
        id: String,
    },
    /// A donation was added to a member's history.
    DonationRecorded {
        /// Id of the member.
        id: String,
    },
}

impl Outcome {
    /// Id of the member the mutation touched.
    #[must_use]
    pub fn member_id(&self) -> &str {
        match self {
            Self::Created { id }
            | Self::Updated { id }
            | Self::SchemeApproved { id }
            | Self::DonationRecorded { id } => id,
        }
    }

    /// Short machine-readable name of the outcome.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Created { .. } => "created",
            Self::Updated { .. } => "updated",
            Self::SchemeApproved { .. } => "scheme_approved",
            Self::DonationRecorded { .. } => "donation_recorded",
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.kind(), self.member_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_id() {
        let outcome = Outcome::Created {
            id: "1000".to_string(),
        };
        assert_eq!(outcome.member_id(), "1000");
        assert_eq!(outcome.kind(), "created");
    }

    #[test]
    fn test_display() {
        let outcome = Outcome::SchemeApproved {
            id: "3321".to_string(),
        };
        assert_eq!(outcome.to_string(), "scheme_approved (3321)");
    }

    #[test]
    fn test_serialize_tagged() {
        let outcome = Outcome::DonationRecorded {
            id: "4092".to_string(),
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["outcome"], "donation_recorded");
        assert_eq!(json["id"], "4092");
    }
}
