//! Ensemble scoring and verdict determination
//!
//! Combines the component engines into one score, estimates confidence
//! from cross-engine agreement, and walks a fixed escalation ladder to a
//! verdict. The ladder is ordered: concrete impersonation evidence first,
//! accumulation of critical indicators second, categorical risk last,
//! with a majority vote as the fallback when nothing escalates.
//!
//! Four components carry ensemble weight: heuristics, ML, brand and TLD.
//! The redirect-pattern engine is deliberately not a fifth: its verdict
//! is a feature of the ML model, so `ml_probability` arrives here with
//! redirect intent already priced in, and the raw redirect score is
//! reported in the assessment breakdown instead.

use crate::brand::{BrandMatchType, BrandResult};
use crate::heuristics::HeuristicResult;
use crate::tld::TldResult;
use url_shield_core::{AnalysisConfig, Verdict};

/// Heuristic contribution treated as a critical indicator.
const CRITICAL_INDICATOR_MIN: usize = 2;
/// Heuristic score that escalates on its own.
const HEURISTIC_ESCALATION_SCORE: f64 = 60.0;
/// Static brand score that promotes a match straight to malicious.
const BRAND_ESCALATION_SCORE: f64 = 50.0;

/// Everything the verdict ladder consumes
pub struct EnsembleInputs<'a> {
    pub heuristic: &'a HeuristicResult,
    pub ml_probability: f64,
    pub brand: &'a BrandResult,
    /// max(static, dynamic) brand component, 0..=100
    pub brand_component: f64,
    pub tld: &'a TldResult,
}

/// Weighted combination of component scores
pub struct ScoreCalculator<'a> {
    config: &'a AnalysisConfig,
}

impl<'a> ScoreCalculator<'a> {
    pub fn new(config: &'a AnalysisConfig) -> Self {
        Self { config }
    }

    /// Combined score: weighted sum of the normalized components,
    /// rounded and clamped to 0..=100.
    ///
    /// The ML probability is normalized to an integral 0..=100 value
    /// before weighting, like the other components, so borderline URLs
    /// land on the same side of the verdict thresholds as the reported
    /// `ml_score_scaled`.
    pub fn combined_score(&self, inputs: &EnsembleInputs<'_>) -> u8 {
        let c = self.config;
        let ml_n = (inputs.ml_probability * 100.0).round();
        let combined = c.heuristic_weight * inputs.heuristic.score
            + c.ml_weight * ml_n
            + c.brand_weight * inputs.brand_component
            + c.tld_weight * inputs.tld.score;
        combined.round().clamp(0.0, 100.0) as u8
    }

    /// Confidence from cross-engine agreement plus evidence volume.
    pub fn confidence(&self, inputs: &EnsembleInputs<'_>) -> f32 {
        let c = self.config;
        let agreement = 1.0 - (inputs.heuristic.score / 100.0 - inputs.ml_probability).abs();
        let mut conf = c.base_confidence + agreement * 0.20;
        if inputs.brand.matched.is_some() {
            conf += 0.15;
        }
        conf += (inputs.heuristic.flags.len().min(5) as f64) * 0.02;
        conf.clamp(c.min_confidence, c.max_confidence) as f32
    }
}

/// Escalation ladder and majority-vote fallback
pub struct VerdictDeterminer<'a> {
    config: &'a AnalysisConfig,
}

impl<'a> VerdictDeterminer<'a> {
    pub fn new(config: &'a AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn determine(&self, inputs: &EnsembleInputs<'_>, combined: u8) -> Verdict {
        let c = self.config;
        let combined = combined as f64;
        let suspicious = c.suspicious_threshold as f64;
        let safe = c.safe_threshold as f64;

        // 1-2. Concrete impersonation evidence.
        if let Some(matched) = &inputs.brand.matched {
            if matched.match_type == BrandMatchType::Homograph {
                return Verdict::Malicious;
            }
            return if combined > suspicious || inputs.brand.score >= BRAND_ESCALATION_SCORE {
                Verdict::Malicious
            } else {
                Verdict::Suspicious
            };
        }

        // 3. Several critical indicators plus a non-trivial score.
        if inputs.heuristic.critical_indicator_count() >= CRITICAL_INDICATOR_MIN
            && combined > safe
        {
            return Verdict::Malicious;
        }

        // 4. Destination masking is never safe.
        if inputs
            .heuristic
            .flags
            .iter()
            .any(|f| f.to_lowercase().contains("@ symbol"))
        {
            return Verdict::Suspicious;
        }

        // 5. High-risk TLD.
        if inputs.tld.is_high_risk {
            return if combined > suspicious {
                Verdict::Malicious
            } else {
                Verdict::Suspicious
            };
        }

        // 6. Heuristics alone.
        if inputs.heuristic.score > HEURISTIC_ESCALATION_SCORE {
            return if combined > suspicious {
                Verdict::Malicious
            } else {
                Verdict::Suspicious
            };
        }

        // 7. Majority vote.
        self.majority_vote(inputs)
    }

    fn majority_vote(&self, inputs: &EnsembleInputs<'_>) -> Verdict {
        let votes = [
            Self::vote(inputs.heuristic.score, 10.0, 25.0),
            Self::vote(inputs.ml_probability, 0.30, 0.60),
            Self::vote(inputs.brand_component, 5.0, 15.0),
            Self::vote(inputs.tld.score, 3.0, 7.0),
        ];

        let count = |v: Verdict| votes.iter().filter(|x| **x == v).count();
        let safe = count(Verdict::Safe);
        let malicious = count(Verdict::Malicious);
        let suspicious = count(Verdict::Suspicious);

        if safe >= 3 {
            Verdict::Safe
        } else if malicious >= 2 {
            Verdict::Malicious
        } else if suspicious >= 2 {
            Verdict::Suspicious
        } else if safe >= 2 {
            Verdict::Safe
        } else {
            Verdict::Suspicious
        }
    }

    fn vote(value: f64, safe_max: f64, suspicious_max: f64) -> Verdict {
        if value <= safe_max {
            Verdict::Safe
        } else if value <= suspicious_max {
            Verdict::Suspicious
        } else {
            Verdict::Malicious
        }
    }
}
