//! Preference Scoring Module
//!
//! Maps instruments and a three-axis user preference (risk appetite, time
//! horizon, sector) to a bounded [0, 100] relevance score, with a sector
//! membership filter and a dispersion-penalized certainty statistic over a
//! scored set. Scoring weights risk and horizon alignment 50/50.

use std::str::FromStr;

use ranking_core::sectors::sector_keywords;
use ranking_core::{Instrument, RankingError, ScoredInstrument};
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

/// User's appetite for short-term price movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskProfile {
    Low,
    Medium,
    High,
}

impl RiskProfile {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskProfile::Low => "low",
            RiskProfile::Medium => "medium",
            RiskProfile::High => "high",
        }
    }
}

impl FromStr for RiskProfile {
    type Err = RankingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(RiskProfile::Low),
            "medium" => Ok(RiskProfile::Medium),
            "high" => Ok(RiskProfile::High),
            other => Err(RankingError::InvalidPreference(format!(
                "unknown risk profile '{other}'"
            ))),
        }
    }
}

/// How long the user intends to hold a position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeHorizon {
    Short,
    Medium,
    Long,
}

impl TimeHorizon {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeHorizon::Short => "short",
            TimeHorizon::Medium => "medium",
            TimeHorizon::Long => "long",
        }
    }
}

impl FromStr for TimeHorizon {
    type Err = RankingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "short" => Ok(TimeHorizon::Short),
            "medium" => Ok(TimeHorizon::Medium),
            "long" => Ok(TimeHorizon::Long),
            other => Err(RankingError::InvalidPreference(format!(
                "unknown time horizon '{other}'"
            ))),
        }
    }
}

/// One ranked recommendation handed to the presentation layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    /// Preference score in [0, 100]
    pub score: f64,
    pub instrument: Instrument,
    /// Set-level certainty in [0, 100], identical across one result set
    pub certainty: f64,
}

/// Scores instruments against a fixed three-axis user preference.
///
/// Pure and stateless once configured: the same instrument always gets the
/// same score, so independent ranking calls can share one scorer.
#[derive(Debug, Clone)]
pub struct PreferenceScorer {
    risk_profile: RiskProfile,
    time_horizon: TimeHorizon,
    sector_preference: String,
}

impl PreferenceScorer {
    pub fn new(
        risk_profile: RiskProfile,
        time_horizon: TimeHorizon,
        sector_preference: impl Into<String>,
    ) -> Self {
        Self {
            risk_profile,
            time_horizon,
            sector_preference: sector_preference.into().to_lowercase(),
        }
    }

    pub fn sector_preference(&self) -> &str {
        &self.sector_preference
    }

    /// Combined preference score, 50% risk alignment + 50% horizon
    /// alignment, clamped to [0, 100]
    pub fn score(&self, instrument: &Instrument) -> f64 {
        let score =
            self.risk_score(instrument) * 0.50 + self.time_score(instrument) * 0.50;
        score.clamp(0.0, 100.0)
    }

    /// Risk alignment from the day-over-day move.
    ///
    /// Low risk rewards stability, high risk rewards movement, medium
    /// peaks at a 5% move.
    pub fn risk_score(&self, instrument: &Instrument) -> f64 {
        let percent_change = instrument.percent_change().abs();

        match self.risk_profile {
            RiskProfile::Low => (100.0 - percent_change * 2.0).max(0.0),
            RiskProfile::Medium => (100.0 - (percent_change - 5.0).abs() * 5.0).max(0.0),
            RiskProfile::High => (percent_change * 2.0).min(100.0),
        }
    }

    /// Horizon alignment from the one-year price change; shorter horizons
    /// weight the change more heavily around a neutral 50.
    pub fn time_score(&self, instrument: &Instrument) -> f64 {
        let change = instrument.year_change();

        let raw = match self.time_horizon {
            TimeHorizon::Short => 50.0 + change * 2.0,
            TimeHorizon::Medium => 50.0 + change,
            TimeHorizon::Long => 50.0 + change * 0.5,
        };
        raw.clamp(0.0, 100.0)
    }

    /// Keep instruments whose industry tag matches the configured sector's
    /// keyword set. An unknown sector matches nothing, which surfaces as
    /// an empty result downstream rather than an error.
    pub fn filter_by_sector(&self, instruments: &[Instrument]) -> Vec<Instrument> {
        let keywords = sector_keywords(&self.sector_preference);

        instruments
            .iter()
            .filter(|instrument| {
                keywords.contains(&instrument.industry_tag.to_lowercase().as_str())
            })
            .cloned()
            .collect()
    }

    /// Score every instrument and sort descending by score. The sort is
    /// stable, so tied scores keep their original relative order.
    pub fn score_all(&self, instruments: &[Instrument]) -> Vec<ScoredInstrument> {
        let mut scored: Vec<ScoredInstrument> = instruments
            .iter()
            .map(|instrument| ScoredInstrument::new(self.score(instrument), instrument.clone()))
            .collect();

        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        scored
    }

    /// Top-k ranked recommendations with the set-level certainty attached
    /// to each entry
    pub fn recommend(&self, instruments: &[Instrument], k: usize) -> Vec<Recommendation> {
        let sector_instruments = self.filter_by_sector(instruments);
        if sector_instruments.is_empty() {
            return Vec::new();
        }

        let mut scored = self.score_all(&sector_instruments);
        scored.truncate(k);

        let certainty = certainty(&scored);
        scored
            .into_iter()
            .map(|entry| Recommendation {
                score: entry.score,
                instrument: entry.instrument,
                certainty,
            })
            .collect()
    }
}

/// Dispersion-penalized confidence over a scored set.
///
/// `avg * (1 - var / 10000)` clamped to [0, 100]: a high average with low
/// variance yields high certainty, high variance erodes it regardless of
/// the average. Empty input yields 0.
pub fn certainty(scored: &[ScoredInstrument]) -> f64 {
    if scored.is_empty() {
        return 0.0;
    }

    let scores: Vec<f64> = scored.iter().map(|entry| entry.score).collect();
    let avg = scores.as_slice().mean();
    let variance = scores.as_slice().population_variance();

    (avg * (1.0 - variance / 10000.0)).clamp(0.0, 100.0)
}
