//! Per-tier, per-kind deduplication ledger of answered questions.

use std::collections::{HashMap, HashSet};

use quizrush_core::{IntensityTier, QuestionId, QuestionKind, QuestionRecord};

/// Append-only record of every question identifier the player has seen,
/// keyed by the tier it was asked at and the question's kind. Tier three
/// additionally feeds a tier-wide combined set so the quiz collaborator
/// can cycle across kinds there.
#[derive(Clone, Debug, Default)]
pub(crate) struct QuestionLedger {
    buckets: HashMap<(IntensityTier, QuestionKind), HashSet<QuestionId>>,
    tier_three_combined: HashSet<QuestionId>,
}

impl QuestionLedger {
    /// Records an answered question. Returns `true` when the identifier
    /// was new to its bucket.
    pub(crate) fn record(&mut self, tier: IntensityTier, question: &QuestionRecord) -> bool {
        let bucket = self
            .buckets
            .entry((tier, question.kind.clone()))
            .or_default();
        let inserted = bucket.insert(question.id);
        if tier == IntensityTier::Three {
            let _ = self.tier_three_combined.insert(question.id);
        }
        inserted
    }

    /// Identifiers to exclude when selecting the next question at `tier`.
    ///
    /// For tiers one and two this is the union of that tier's kind
    /// buckets; tier three uses the combined cross-kind set.
    pub(crate) fn excluded_for(&self, tier: IntensityTier) -> HashSet<QuestionId> {
        if tier == IntensityTier::Three {
            return self.tier_three_combined.clone();
        }
        let mut excluded = HashSet::new();
        for ((bucket_tier, _), ids) in &self.buckets {
            if *bucket_tier == tier {
                excluded.extend(ids.iter().copied());
            }
        }
        excluded
    }

    #[cfg(test)]
    pub(crate) fn bucket_len(&self, tier: IntensityTier, kind: &QuestionKind) -> usize {
        self.buckets
            .get(&(tier, kind.clone()))
            .map_or(0, HashSet::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(text: &str, kind: &str) -> QuestionRecord {
        QuestionRecord {
            id: QuestionId::from_text(text),
            kind: QuestionKind::new(kind),
        }
    }

    #[test]
    fn recording_twice_leaves_bucket_size_unchanged() {
        let mut ledger = QuestionLedger::default();
        let record = question("what is a borrow checker?", "concepts");

        assert!(ledger.record(IntensityTier::One, &record));
        assert!(!ledger.record(IntensityTier::One, &record));
        assert_eq!(
            ledger.bucket_len(IntensityTier::One, &QuestionKind::new("concepts")),
            1
        );
    }

    #[test]
    fn buckets_are_keyed_by_tier_and_kind() {
        let mut ledger = QuestionLedger::default();
        let record = question("what is a loop?", "syntax");

        assert!(ledger.record(IntensityTier::One, &record));
        assert!(ledger.record(IntensityTier::Two, &record));
        assert_eq!(ledger.excluded_for(IntensityTier::One).len(), 1);
        assert_eq!(ledger.excluded_for(IntensityTier::Two).len(), 1);
        assert!(ledger.excluded_for(IntensityTier::Three).is_empty());
    }

    #[test]
    fn exclusion_unions_kinds_within_a_tier() {
        let mut ledger = QuestionLedger::default();
        let _ = ledger.record(IntensityTier::Two, &question("q1", "syntax"));
        let _ = ledger.record(IntensityTier::Two, &question("q2", "concepts"));
        assert_eq!(ledger.excluded_for(IntensityTier::Two).len(), 2);
    }

    #[test]
    fn tier_three_feeds_the_combined_set() {
        let mut ledger = QuestionLedger::default();
        let _ = ledger.record(IntensityTier::Three, &question("q1", "syntax"));
        let _ = ledger.record(IntensityTier::Three, &question("q2", "concepts"));
        let _ = ledger.record(IntensityTier::Three, &question("q3", "debugging"));

        let excluded = ledger.excluded_for(IntensityTier::Three);
        assert_eq!(excluded.len(), 3);
        assert!(excluded.contains(&QuestionId::from_text("q2")));
    }
}
