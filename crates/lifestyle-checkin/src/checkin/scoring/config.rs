use serde::{Deserialize, Serialize};

use super::super::domain::Pillar;

/// Per-pillar share of the 100 point lifestyle score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PillarWeights {
    pub diet: u32,
    pub activity: u32,
    pub sleep: u32,
    pub stress: u32,
}

impl PillarWeights {
    pub const fn weight(&self, pillar: Pillar) -> u32 {
        match pillar {
            Pillar::Diet => self.diet,
            Pillar::Activity => self.activity,
            Pillar::Sleep => self.sleep,
            Pillar::Stress => self.stress,
            Pillar::General => 0,
        }
    }

    /// Sum of all weights; widened to `u64` so four `u32` weights never overflow.
    pub fn total(&self) -> u64 {
        [self.diet, self.activity, self.sleep, self.stress]
            .into_iter()
            .map(u64::from)
            .sum()
    }
}

impl Default for PillarWeights {
    fn default() -> Self {
        Self {
            diet: 25,
            activity: 25,
            sleep: 25,
            stress: 25,
        }
    }
}

/// Weights and insight thresholds applied by the scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub weights: PillarWeights,
    pub min_vegetable_servings: i64,
    pub low_sleep_quality_threshold: i64,
    pub high_stress_threshold: i64,
    pub low_energy_threshold: i64,
    /// Live previews stay hidden until more than this many answers exist.
    pub preview_min_answers: usize,
}

impl ScoringConfig {
    pub fn validate(&self) -> Result<(), ScoringConfigError> {
        match self.weights.total() {
            100 => Ok(()),
            total => Err(ScoringConfigError::WeightsMustTotal100(total)),
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: PillarWeights::default(),
            min_vegetable_servings: 3,
            low_sleep_quality_threshold: 2,
            high_stress_threshold: 4,
            low_energy_threshold: 2,
            preview_min_answers: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScoringConfigError {
    #[error("pillar weights must total 100, got {0}")]
    WeightsMustTotal100(u64),
    #[error("pillar {0:?} carries weight but has no scorable questions")]
    EmptyPillar(Pillar),
}
