//! Applied power-up flags and their transition rules.

use quizrush_core::PowerUpEffect;

const SPEED_BONUS_PER_STREAK: f32 = 0.2;
const SPEED_MULTIPLIER_CAP: f32 = 2.0;

/// Read-only copy of the applied power-up flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PowerUpSnapshot {
    /// One wrong answer will be absorbed without resetting the streak.
    pub streak_protection: bool,
    /// Hazard immunity is armed and waiting for a correct answer.
    pub goblin_immunity_ready: bool,
    /// The next hazard strike will be absorbed without a time penalty.
    pub goblin_immunity_active: bool,
    /// Effective speed scales with the current streak.
    pub speed_boost: bool,
}

/// Mutable record of the four power-up flags. Every transition here is
/// idempotent to re-application.
#[derive(Clone, Debug, Default)]
pub(crate) struct PowerUpState {
    streak_protection: bool,
    goblin_immunity_ready: bool,
    goblin_immunity_active: bool,
    speed_boost: bool,
}

impl PowerUpState {
    pub(crate) fn apply(&mut self, effect: PowerUpEffect) {
        match effect {
            PowerUpEffect::StreakProtection => self.streak_protection = true,
            PowerUpEffect::GoblinImmunity => self.goblin_immunity_ready = true,
            PowerUpEffect::SpeedBoost => self.speed_boost = true,
        }
    }

    /// A correct answer converts armed immunity into active immunity.
    pub(crate) fn on_correct_answer(&mut self) {
        if self.goblin_immunity_ready {
            self.goblin_immunity_ready = false;
            self.goblin_immunity_active = true;
        }
    }

    /// A wrong answer clears both immunity flags and may consume streak
    /// protection. Returns `true` when the streak was protected.
    pub(crate) fn on_wrong_answer(&mut self) -> bool {
        self.goblin_immunity_ready = false;
        self.goblin_immunity_active = false;
        if self.streak_protection {
            self.streak_protection = false;
            return true;
        }
        false
    }

    /// Consumes active immunity for one hazard strike, when present.
    pub(crate) fn absorb_hazard(&mut self) -> bool {
        if self.goblin_immunity_active {
            self.goblin_immunity_active = false;
            return true;
        }
        false
    }

    pub(crate) fn effective_speed(&self, base: f32, streak: u32) -> f32 {
        if !self.speed_boost {
            return base;
        }
        let multiplier =
            (1.0 + SPEED_BONUS_PER_STREAK * streak as f32).min(SPEED_MULTIPLIER_CAP);
        base * multiplier
    }

    pub(crate) fn snapshot(&self) -> PowerUpSnapshot {
        PowerUpSnapshot {
            streak_protection: self.streak_protection,
            goblin_immunity_ready: self.goblin_immunity_ready,
            goblin_immunity_active: self.goblin_immunity_active,
            speed_boost: self.speed_boost,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn application_is_idempotent() {
        let mut state = PowerUpState::default();
        state.apply(PowerUpEffect::StreakProtection);
        state.apply(PowerUpEffect::StreakProtection);
        assert!(state.snapshot().streak_protection);
        assert!(state.on_wrong_answer());
        assert!(!state.snapshot().streak_protection);
        assert!(!state.on_wrong_answer());
    }

    #[test]
    fn immunity_arms_then_activates_on_correct_answer() {
        let mut state = PowerUpState::default();
        state.apply(PowerUpEffect::GoblinImmunity);
        let snapshot = state.snapshot();
        assert!(snapshot.goblin_immunity_ready);
        assert!(!snapshot.goblin_immunity_active);

        state.on_correct_answer();
        let snapshot = state.snapshot();
        assert!(!snapshot.goblin_immunity_ready);
        assert!(snapshot.goblin_immunity_active);

        assert!(state.absorb_hazard());
        assert!(!state.snapshot().goblin_immunity_active);
        assert!(!state.absorb_hazard());
    }

    #[test]
    fn wrong_answer_clears_both_immunity_flags() {
        let mut state = PowerUpState::default();
        state.apply(PowerUpEffect::GoblinImmunity);
        state.on_correct_answer();
        assert!(!state.on_wrong_answer());
        let snapshot = state.snapshot();
        assert!(!snapshot.goblin_immunity_ready);
        assert!(!snapshot.goblin_immunity_active);
    }

    #[test]
    fn speed_scales_with_streak_up_to_cap() {
        let mut state = PowerUpState::default();
        assert!((state.effective_speed(100.0, 4) - 100.0).abs() < f32::EPSILON);

        state.apply(PowerUpEffect::SpeedBoost);
        assert!((state.effective_speed(100.0, 0) - 100.0).abs() < f32::EPSILON);
        assert!((state.effective_speed(100.0, 2) - 140.0).abs() < f32::EPSILON);
        assert!((state.effective_speed(100.0, 5) - 200.0).abs() < f32::EPSILON);
        assert!((state.effective_speed(100.0, 50) - 200.0).abs() < f32::EPSILON);
    }
}
