//! Difficulty-tier progression driven by cumulative correct answers.

use quizrush_core::{IntensityTier, SessionConfig};

/// Effects a single correct answer can have on the tier progression.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum IntensityOutcome {
    /// The session advanced to the provided tier.
    Promoted(IntensityTier),
    /// A tier-three cadence milestone earned an extra power-up tile.
    BonusPowerUp,
    /// The tier-three completion count was reached; the session is won.
    Completed,
}

/// Tracks cumulative correct answers and promotes through ordered tiers.
///
/// At most one promotion fires per answer. The tier-three counters only
/// count answers given *after* entering tier three, so the promoting
/// answer itself contributes to neither.
#[derive(Clone, Debug)]
pub(crate) struct IntensityProgress {
    tier: IntensityTier,
    correct_total: u32,
    tier_three_correct: u32,
    power_up_counter: u32,
}

impl IntensityProgress {
    pub(crate) fn new() -> Self {
        Self {
            tier: IntensityTier::One,
            correct_total: 0,
            tier_three_correct: 0,
            power_up_counter: 0,
        }
    }

    pub(crate) fn tier(&self) -> IntensityTier {
        self.tier
    }

    pub(crate) fn tier_three_correct(&self) -> u32 {
        self.tier_three_correct
    }

    pub(crate) fn on_correct_answer(&mut self, config: &SessionConfig) -> Vec<IntensityOutcome> {
        self.correct_total = self.correct_total.saturating_add(1);
        let mut outcomes = Vec::new();

        let was_tier_three = self.tier == IntensityTier::Three;
        let threshold = match self.tier {
            IntensityTier::One => Some(config.tier_two_threshold),
            IntensityTier::Two => Some(config.tier_three_threshold),
            IntensityTier::Three => None,
        };
        if let (Some(threshold), Some(next)) = (threshold, self.tier.next()) {
            if self.correct_total >= threshold {
                self.tier = next;
                outcomes.push(IntensityOutcome::Promoted(next));
            }
        }

        if was_tier_three {
            self.tier_three_correct = self.tier_three_correct.saturating_add(1);
            if self.tier_three_correct >= config.tier_three_completion_count {
                outcomes.push(IntensityOutcome::Completed);
                return outcomes;
            }

            self.power_up_counter = self.power_up_counter.saturating_add(1);
            if self.power_up_counter >= config.tier_three_power_up_cadence {
                self.power_up_counter = 0;
                outcomes.push(IntensityOutcome::BonusPowerUp);
            }
        }

        outcomes
    }
}
