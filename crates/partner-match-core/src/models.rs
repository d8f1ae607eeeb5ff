//! Data model shared by every stage of the matching pipeline.
//!
//! Wire names are camelCase to match the JSON the web client consumes.
//! On input, snake_case aliases are accepted as well so rows coming from
//! a snake_case database table decode without a mapping layer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::score::ScoreExplanation;

/// Category an organization registers as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrganizationType {
    #[serde(rename = "NGO", alias = "ngo")]
    Ngo,
    #[serde(rename = "Foundation", alias = "foundation")]
    Foundation,
    #[serde(rename = "Incubator", alias = "incubator")]
    Incubator,
    #[serde(rename = "CSR", alias = "csr")]
    Csr,
    #[serde(
        rename = "Social Enterprise",
        alias = "social_enterprise",
        alias = "social enterprise"
    )]
    SocialEnterprise,
}

impl OrganizationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrganizationType::Ngo => "NGO",
            OrganizationType::Foundation => "Foundation",
            OrganizationType::Incubator => "Incubator",
            OrganizationType::Csr => "CSR",
            OrganizationType::SocialEnterprise => "Social Enterprise",
        }
    }
}

impl fmt::Display for OrganizationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether an organization's submitted data has been externally confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    Verified,
    Unverified,
    Pending,
}

impl VerificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationStatus::Verified => "verified",
            VerificationStatus::Unverified => "unverified",
            VerificationStatus::Pending => "pending",
        }
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VerificationStatus {
    type Err = String;

    /// Exact match on the lowercase wire names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "verified" => Ok(VerificationStatus::Verified),
            "unverified" => Ok(VerificationStatus::Unverified),
            "pending" => Ok(VerificationStatus::Pending),
            other => Err(format!(
                "unknown verification status: '{}'. Use verified, unverified, or pending.",
                other
            )),
        }
    }
}

/// A requested verification status.
///
/// A value naming no known status stays a filter and rejects every
/// organization, so a miscased `Verified` never widens the result set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationFilter {
    Is(VerificationStatus),
    Unrecognized(String),
}

impl VerificationFilter {
    pub fn parse(raw: &str) -> Self {
        match raw.parse::<VerificationStatus>() {
            Ok(status) => VerificationFilter::Is(status),
            Err(_) => VerificationFilter::Unrecognized(raw.to_string()),
        }
    }

    pub fn admits(&self, status: VerificationStatus) -> bool {
        match self {
            VerificationFilter::Is(wanted) => *wanted == status,
            VerificationFilter::Unrecognized(_) => false,
        }
    }
}

impl From<VerificationStatus> for VerificationFilter {
    fn from(status: VerificationStatus) -> Self {
        VerificationFilter::Is(status)
    }
}

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub org_type: OrganizationType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default)]
    pub mission: String,
    #[serde(default)]
    pub description: String,
    /// Displayed in submission order; matching ignores order.
    #[serde(alias = "focus_areas")]
    pub focus_areas: Vec<String>,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub headquarters: String,
    /// Open set: `grant`, `mixed`, `investment`, ...
    #[serde(alias = "funding_type")]
    pub funding_type: String,
    #[serde(alias = "verification_status")]
    pub verification_status: VerificationStatus,
    /// Data-quality score in `[0, 100]`, assigned at ingestion.
    pub confidence: f64,
    #[serde(default)]
    pub projects: Vec<String>,
    #[serde(default, alias = "partner_history")]
    pub partner_history: Vec<String>,
    #[serde(default, alias = "target_beneficiaries")]
    pub target_beneficiaries: Vec<String>,
}

/// Violation of an [`Organization`] invariant.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("organization id must not be empty")]
    EmptyId,
    #[error("organization '{id}': confidence {value} is outside [0, 100]")]
    ConfidenceOutOfRange { id: String, value: f64 },
    #[error("organization '{id}': focus areas must not be empty")]
    NoFocusAreas { id: String },
}

impl Organization {
    /// Check the invariants a submitted (non-draft) record must satisfy.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::EmptyId);
        }
        if !self.confidence.is_finite() || !(0.0..=100.0).contains(&self.confidence) {
            return Err(ValidationError::ConfidenceOutOfRange {
                id: self.id.clone(),
                value: self.confidence,
            });
        }
        if self.focus_areas.iter().all(|a| a.trim().is_empty()) {
            return Err(ValidationError::NoFocusAreas {
                id: self.id.clone(),
            });
        }
        Ok(())
    }
}

/// Result ordering requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    #[default]
    Alignment,
    Recency,
    Confidence,
    Name,
}

impl SortBy {
    /// Parse a caller-supplied value, falling back to [`SortBy::Alignment`]
    /// for anything unrecognized.
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }
}

impl FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "alignment" => Ok(SortBy::Alignment),
            "recency" => Ok(SortBy::Recency),
            "confidence" => Ok(SortBy::Confidence),
            "name" => Ok(SortBy::Name),
            other => Err(format!(
                "unknown sort key: '{}'. Use alignment, recency, confidence, or name.",
                other
            )),
        }
    }
}

/// Typed search query. `None` means "no constraint".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchParams {
    pub query: Option<String>,
    pub focus_area: Option<String>,
    pub region: Option<String>,
    pub funding_type: Option<String>,
    pub verification_status: Option<VerificationFilter>,
    pub sort_by: SortBy,
    /// Attach a [`ScoreExplanation`] to every result.
    pub explain: bool,
}

/// Raw query-string form of a search. Every field is an optional string so
/// that extraction never rejects a request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub query: Option<String>,
    pub focus_area: Option<String>,
    pub region: Option<String>,
    pub funding_type: Option<String>,
    pub verification_status: Option<String>,
    pub sort_by: Option<String>,
    pub explain: Option<String>,
}

/// Blank values mean "no constraint"; anything else passes through as sent.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl SearchQuery {
    /// Convert to [`SearchParams`]. Never fails: blank values impose no
    /// constraint and an unknown sort key falls back to the default.
    pub fn into_params(self) -> SearchParams {
        let verification_status = non_empty(self.verification_status).map(|v| {
            let filter = VerificationFilter::parse(&v);
            if let VerificationFilter::Unrecognized(ref raw) = filter {
                tracing::debug!(value = %raw, "unrecognized verificationStatus matches nothing");
            }
            filter
        });

        let sort_by = non_empty(self.sort_by)
            .map(|s| SortBy::parse_lenient(&s))
            .unwrap_or_default();

        let explain = non_empty(self.explain)
            .map(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "yes"))
            .unwrap_or(false);

        SearchParams {
            query: non_empty(self.query),
            focus_area: non_empty(self.focus_area),
            region: non_empty(self.region),
            funding_type: non_empty(self.funding_type),
            verification_status,
            sort_by,
            explain,
        }
    }
}

impl From<SearchQuery> for SearchParams {
    fn from(query: SearchQuery) -> Self {
        query.into_params()
    }
}

/// An organization annotated with its alignment score for one query.
///
/// Ephemeral: built, scored, and discarded within a single request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    #[serde(flatten)]
    pub organization: Organization,
    pub alignment_score: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explain: Option<ScoreExplanation>,
}

/// Response shape of the search endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub organizations: Vec<SearchResult>,
    pub total: usize,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// The reference organization used throughout the scoring examples.
    pub fn education_org(confidence: f64) -> Organization {
        Organization {
            id: "org-edu".to_string(),
            name: "Northern Learning Trust".to_string(),
            org_type: OrganizationType::Ngo,
            website: None,
            mission: "Education initiatives for rural children".to_string(),
            description: "Runs community schools".to_string(),
            focus_areas: vec!["Education".to_string()],
            region: "Northern India".to_string(),
            headquarters: "Lucknow".to_string(),
            funding_type: "grant".to_string(),
            verification_status: VerificationStatus::Verified,
            confidence,
            projects: Vec::new(),
            partner_history: Vec::new(),
            target_beneficiaries: Vec::new(),
        }
    }

    pub fn org(id: &str, name: &str, focus: &[&str], region: &str, confidence: f64) -> Organization {
        Organization {
            id: id.to_string(),
            name: name.to_string(),
            org_type: OrganizationType::Ngo,
            website: None,
            mission: String::new(),
            description: String::new(),
            focus_areas: focus.iter().map(|s| s.to_string()).collect(),
            region: region.to_string(),
            headquarters: String::new(),
            funding_type: "grant".to_string(),
            verification_status: VerificationStatus::Unverified,
            confidence,
            projects: Vec::new(),
            partner_history: Vec::new(),
            target_beneficiaries: Vec::new(),
        }
    }
}
