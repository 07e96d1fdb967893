//! Keyword-based symptom triage.
//!
//! [`TriageEngine::analyze`] lower-cases the input once and scores every condition by the share
//! of its keywords found as literal substrings. Matching is substring containment, not
//! word-boundary matching: "cold" matches inside "colder".
//!
//! Scoring walks the knowledge base in definition order and only replaces the current best on a
//! strictly greater confidence, so on a tie the earliest condition wins.
//!
//! The engine is a pure function of its input and an immutable knowledge base. It performs no
//! I/O, no logging and never fails; input that matches nothing yields
//! [`AnalysisResult::fallback`]. Empty input is the caller's concern to reject, and if it does
//! reach the engine it simply matches nothing.

use crate::analysis::AnalysisResult;
use crate::constants::MAX_CONFIDENCE;
use crate::knowledge_base::{ConditionRecord, KnowledgeBase};
use std::sync::Arc;

/// Stateless triage engine over a shared knowledge base.
///
/// Cheap to clone and safe to call from any number of threads at once.
#[derive(Clone, Debug)]
pub struct TriageEngine {
    knowledge_base: Arc<KnowledgeBase>,
}

impl TriageEngine {
    pub fn new(knowledge_base: Arc<KnowledgeBase>) -> Self {
        Self { knowledge_base }
    }

    /// Engine over the built-in condition table.
    pub fn builtin() -> Self {
        Self::new(KnowledgeBase::builtin())
    }

    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.knowledge_base
    }

    /// Suggest the best-matching condition for a symptom description.
    pub fn analyze(&self, symptoms: &str) -> AnalysisResult {
        let lowered = symptoms.to_lowercase();

        let mut best: Option<(&ConditionRecord, u8)> = None;
        for record in self.knowledge_base.iter() {
            let matches = record.match_count(&lowered);
            if matches == 0 {
                continue;
            }

            let confidence = confidence_percent(matches, record.keywords().len());
            let best_confidence = best.map_or(0, |(_, c)| c);
            if confidence > best_confidence {
                best = Some((record, confidence));
            }
        }

        match best {
            Some((record, confidence)) => AnalysisResult::from_record(record, confidence),
            None => AnalysisResult::fallback(),
        }
    }
}

impl Default for TriageEngine {
    fn default() -> Self {
        Self::builtin()
    }
}

/// `round(100 * matches / keyword_count)` with half-up rounding, in integer arithmetic.
///
/// Clamped to `0..=100`; a zero `keyword_count` yields 0.
pub fn confidence_percent(matches: usize, keyword_count: usize) -> u8 {
    if keyword_count == 0 {
        return 0;
    }
    let matches = matches.min(keyword_count);
    let rounded = (200 * matches + keyword_count) / (2 * keyword_count);
    u8::try_from(rounded).map_or(MAX_CONFIDENCE, |c| c.min(MAX_CONFIDENCE))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine_with(records: Vec<ConditionRecord>) -> TriageEngine {
        TriageEngine::new(Arc::new(KnowledgeBase::new(records).unwrap()))
    }

    fn record(phrase: &str, illness: &str) -> ConditionRecord {
        ConditionRecord::new(phrase, illness, "desc", "Mild", "rest").unwrap()
    }

    #[test]
    fn test_confidence_percent_rounding() {
        assert_eq!(confidence_percent(3, 3), 100);
        assert_eq!(confidence_percent(1, 2), 50);
        assert_eq!(confidence_percent(1, 3), 33);
        assert_eq!(confidence_percent(2, 3), 67);
        assert_eq!(confidence_percent(1, 8), 13);
        assert_eq!(confidence_percent(0, 4), 0);
    }

    #[test]
    fn test_confidence_percent_bounds() {
        assert_eq!(confidence_percent(5, 0), 0);
        assert_eq!(confidence_percent(9, 3), 100);
        for n in 1..=12 {
            for m in 0..=n {
                let c = confidence_percent(m, n);
                assert!(c <= 100);
                let exact = 100.0 * m as f64 / n as f64;
                assert!((c as f64 - exact).abs() <= 0.5, "m={m} n={n} c={c}");
            }
        }
    }

    #[test]
    fn test_all_keywords_of_cold_matched() {
        let result = TriageEngine::builtin().analyze("I have fever, cough, cold");
        assert_eq!(result.illness, "Common Cold/Flu");
        assert_eq!(result.confidence_score, 100);
    }

    #[test]
    fn test_partial_cardiac_match() {
        let result = TriageEngine::builtin().analyze("chest pain only");
        assert_eq!(result.illness, "Possible Cardiac Issue");
        assert_eq!(result.confidence_score, 50);
        assert_eq!(result.severity, "High - Seek immediate medical attention");
    }

    #[test]
    fn test_no_match_returns_fallback() {
        let result = TriageEngine::builtin().analyze("I feel great today");
        assert_eq!(result, AnalysisResult::fallback());
        assert_eq!(result.illness, "Unknown Condition");
        assert_eq!(result.confidence_score, 0);
    }

    #[test]
    fn test_higher_confidence_later_record_wins() {
        let result = TriageEngine::builtin().analyze("headache and dizziness and fever");
        assert_eq!(result.illness, "Migraine/Tension Headache");
        assert_eq!(result.confidence_score, 100);
    }

    #[test]
    fn test_input_is_case_folded() {
        let result = TriageEngine::builtin().analyze("SKIN RASH and Itching");
        assert_eq!(result.illness, "Dermatitis/Allergy");
        assert_eq!(result.confidence_score, 100);
    }

    #[test]
    fn test_substring_match_inside_other_word() {
        let result = TriageEngine::builtin().analyze("colder nights lately");
        assert_eq!(result.illness, "Common Cold/Flu");
        assert_eq!(result.confidence_score, 33);
    }

    #[test]
    fn test_empty_input_returns_fallback() {
        assert!(TriageEngine::builtin().analyze("").is_fallback());
    }

    #[test]
    fn test_tie_keeps_first_record() {
        let engine = engine_with(vec![
            record("alpha, beta", "First"),
            record("gamma, delta", "Second"),
        ]);
        let result = engine.analyze("beta and gamma");
        assert_eq!(result.illness, "First");
        assert_eq!(result.confidence_score, 50);

        let engine = engine_with(vec![
            record("gamma, delta", "Second"),
            record("alpha, beta", "First"),
        ]);
        assert_eq!(engine.analyze("beta and gamma").illness, "Second");
    }

    #[test]
    fn test_single_keyword_records_tie_at_full_confidence() {
        let engine = engine_with(vec![record("wheeze", "One"), record("rash", "Two")]);
        let result = engine.analyze("rash and wheeze");
        assert_eq!(result.illness, "One");
        assert_eq!(result.confidence_score, 100);
    }

    #[test]
    fn test_single_keyword_record_beats_partial_overlap() {
        let result = TriageEngine::builtin().analyze("A persistent cough for weeks");
        assert_eq!(result.illness, "Bronchitis/Asthma");
        assert_eq!(result.confidence_score, 100);
        assert_eq!(result.severity, "Moderate");
    }

    #[test]
    fn test_single_keyword_record_alone_scores_full() {
        let engine = engine_with(vec![
            record("fever, chills", "Infection"),
            record("wheeze", "Asthma"),
        ]);
        let result = engine.analyze("a slight wheeze at night");
        assert_eq!(result.illness, "Asthma");
        assert_eq!(result.confidence_score, 100);
    }

    #[test]
    fn test_analyze_is_deterministic() {
        let engine = TriageEngine::builtin();
        let inputs = [
            "stomach pain since lunch",
            "nausea, stomach pain and a sore throat",
            "joint pain",
            "",
            "persistent cough with fever",
        ];
        for input in inputs {
            let first = engine.analyze(input);
            let second = engine.analyze(input);
            assert_eq!(first, second);
            assert!(first.confidence_score <= 100);
        }
    }

    #[test]
    fn test_concurrent_callers_see_same_results() {
        let engine = TriageEngine::builtin();
        let expected = engine.analyze("sore throat and fever");

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    let engine = engine.clone();
                    scope.spawn(move || engine.analyze("sore throat and fever"))
                })
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), expected);
            }
        });

        assert_eq!(expected.illness, "Pharyngitis/Strep Throat");
        assert_eq!(expected.confidence_score, 100);
    }
}
