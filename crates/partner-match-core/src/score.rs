//! Alignment scorer: a fixed-weight heuristic producing a 0–100 score.
//!
//! # Algorithm
//!
//! 1. Start at [`BASE_SCORE`].
//! 2. `+`[`FOCUS_AREA_BONUS`] if the requested focus area matches one of the
//!    organization's focus areas exactly (ignoring case).
//! 3. `+`[`REGION_BONUS`] if the organization's region contains the requested region.
//! 4. `+`[`FUNDING_TYPE_BONUS`] if the funding types are equal (ignoring case).
//! 5. `+`[`VERIFIED_BONUS`] if the organization is verified.
//! 6. Multiply by `confidence / 100`.
//! 7. Clamp to `[0, MAX_SCORE]` and round half away from zero.
//!
//! Each organization is scored independently of the rest of the result
//! set, so the score is a pure function of `(organization, params)`.

use serde::{Deserialize, Serialize};

use crate::filter::{funding_type_matches, has_focus_area, region_matches};
use crate::models::{Organization, SearchParams, VerificationStatus};

pub const BASE_SCORE: f64 = 50.0;
pub const FOCUS_AREA_BONUS: f64 = 20.0;
pub const REGION_BONUS: f64 = 15.0;
pub const FUNDING_TYPE_BONUS: f64 = 10.0;
pub const VERIFIED_BONUS: f64 = 5.0;
pub const MAX_SCORE: f64 = 100.0;

/// Scoring breakdown for one organization against one query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreExplanation {
    pub base: f64,
    pub focus_area_bonus: f64,
    pub region_bonus: f64,
    pub funding_type_bonus: f64,
    pub verified_bonus: f64,
    /// Sum of the base and all bonuses, before the confidence discount.
    pub raw_score: f64,
    /// `confidence / 100`, with non-finite confidence treated as 0.
    pub confidence_multiplier: f64,
    pub final_score: u8,
}

/// Computes a compatibility score between a query and an organization.
///
/// The filter and ranking stages only consume the resulting number, so a
/// different scoring model can be swapped in without touching them.
pub trait AlignmentScorer: Send + Sync {
    /// Score in `[0, 100]`.
    fn score(&self, org: &Organization, params: &SearchParams) -> u8 {
        self.explain(org, params).final_score
    }

    /// Score together with the contribution of each component.
    fn explain(&self, org: &Organization, params: &SearchParams) -> ScoreExplanation;
}

/// The fixed-weight linear rule described in the module docs.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicScorer;

impl AlignmentScorer for HeuristicScorer {
    fn explain(&self, org: &Organization, params: &SearchParams) -> ScoreExplanation {
        let focus_area_bonus = match params.focus_area {
            Some(ref area) if has_focus_area(org, area) => FOCUS_AREA_BONUS,
            _ => 0.0,
        };
        let region_bonus = match params.region {
            Some(ref region) if region_matches(org, region) => REGION_BONUS,
            _ => 0.0,
        };
        let funding_type_bonus = match params.funding_type {
            Some(ref funding) if funding_type_matches(org, funding) => FUNDING_TYPE_BONUS,
            _ => 0.0,
        };
        let verified_bonus = if org.verification_status == VerificationStatus::Verified {
            VERIFIED_BONUS
        } else {
            0.0
        };

        let raw_score =
            BASE_SCORE + focus_area_bonus + region_bonus + funding_type_bonus + verified_bonus;
        let confidence_multiplier = confidence_multiplier(org.confidence);

        ScoreExplanation {
            base: BASE_SCORE,
            focus_area_bonus,
            region_bonus,
            funding_type_bonus,
            verified_bonus,
            raw_score,
            confidence_multiplier,
            final_score: finalize(raw_score * confidence_multiplier),
        }
    }
}

fn confidence_multiplier(confidence: f64) -> f64 {
    if confidence.is_finite() {
        confidence / 100.0
    } else {
        0.0
    }
}

/// Clamp to `[0, MAX_SCORE]` and round half away from zero.
fn finalize(score: f64) -> u8 {
    if !score.is_finite() {
        return 0;
    }
    score.clamp(0.0, MAX_SCORE).round() as u8
}

/// Score with the default [`HeuristicScorer`].
pub fn alignment_score(org: &Organization, params: &SearchParams) -> u8 {
    HeuristicScorer.score(org, params)
}
