use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier assigned to a lead on ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeadId(Uuid);

impl LeadId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for LeadId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for LeadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A sales prospect.
///
/// Every text field is expected to be filled in. Blank or whitespace-only
/// values are kept as-is and only lower the completeness bucket of the rule
/// score; they never make ingestion fail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    #[serde(default = "LeadId::generate")]
    pub id: LeadId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, alias = "linkedin_bio")]
    pub bio: String,
}

impl Lead {
    pub fn new(
        name: impl Into<String>,
        role: impl Into<String>,
        company: impl Into<String>,
        industry: impl Into<String>,
        location: impl Into<String>,
        bio: impl Into<String>,
    ) -> Self {
        Self {
            id: LeadId::generate(),
            name: name.into(),
            role: role.into(),
            company: company.into(),
            industry: industry.into(),
            location: location.into(),
            bio: bio.into(),
        }
    }

    /// The six required fields, in declaration order.
    pub fn required_fields(&self) -> [&str; 6] {
        [
            self.name.as_str(),
            self.role.as_str(),
            self.company.as_str(),
            self.industry.as_str(),
            self.location.as_str(),
            self.bio.as_str(),
        ]
    }

    /// Returns `true` if no required field is empty after trimming.
    pub fn is_complete(&self) -> bool {
        self.required_fields()
            .iter()
            .all(|field| !field.trim().is_empty())
    }
}
