//! Symptom analysis requests.
//!
//! [`SymptomService`] is the boundary a request handler calls. It validates caller input (the
//! engine assumes non-empty text), runs the triage engine, and hands back an
//! [`AnalysisRecord`] ready for the caller to persist together with the raw input, the
//! analysis type tag, a timestamp and the owning user. Storing the record is the caller's job.

use crate::analysis::AnalysisResult;
use crate::config::CoreConfig;
use crate::triage::TriageEngine;
use crate::{TriageError, TriageResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Body of an analysis request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    #[serde(default)]
    pub symptoms: String,
    /// Free-form label such as `"text"` or `"voice"`. Stored, never interpreted.
    #[serde(default)]
    pub analysis_type: Option<String>,
}

impl AnalysisRequest {
    pub fn new(symptoms: impl Into<String>) -> Self {
        Self {
            symptoms: symptoms.into(),
            analysis_type: None,
        }
    }

    pub fn with_analysis_type(mut self, analysis_type: impl Into<String>) -> Self {
        self.analysis_type = Some(analysis_type.into());
        self
    }
}

/// One completed analysis, shaped for storage by the caller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub user_id: i64,
    /// The symptom text exactly as supplied.
    pub symptoms: String,
    pub analysis_result: AnalysisResult,
    pub confidence_score: u8,
    pub analysis_type: String,
    pub created_at: DateTime<Utc>,
}

impl AnalysisRecord {
    /// JSON blob of the analysis result, as persisted alongside the record.
    pub fn result_json(&self) -> TriageResult<String> {
        serde_json::to_string(&self.analysis_result).map_err(TriageError::Serialization)
    }
}

/// Request-facing wrapper around the triage engine.
#[derive(Clone, Debug)]
pub struct SymptomService {
    cfg: Arc<CoreConfig>,
    engine: TriageEngine,
}

impl SymptomService {
    pub fn new(cfg: Arc<CoreConfig>, engine: TriageEngine) -> Self {
        Self { cfg, engine }
    }

    /// Service whose engine uses the configured knowledge base.
    pub fn from_config(cfg: Arc<CoreConfig>) -> Self {
        let engine = TriageEngine::new(Arc::clone(cfg.knowledge_base()));
        Self::new(cfg, engine)
    }

    pub fn engine(&self) -> &TriageEngine {
        &self.engine
    }

    /// Analyse a request on behalf of `user_id`, stamped with the current time.
    ///
    /// Whitespace-only text is accepted and yields the fallback result. The analysis type is
    /// stored exactly as given; the configured default applies only when it is absent.
    ///
    /// # Errors
    ///
    /// Returns `TriageError::InvalidInput` if the symptom text is missing or empty.
    pub fn analyze(&self, user_id: i64, request: AnalysisRequest) -> TriageResult<AnalysisRecord> {
        self.analyze_at(user_id, request, Utc::now())
    }

    /// As [`SymptomService::analyze`], with an explicit timestamp.
    pub fn analyze_at(
        &self,
        user_id: i64,
        request: AnalysisRequest,
        created_at: DateTime<Utc>,
    ) -> TriageResult<AnalysisRecord> {
        if request.symptoms.is_empty() {
            return Err(TriageError::InvalidInput("symptoms are required".into()));
        }

        let analysis_type = request
            .analysis_type
            .unwrap_or_else(|| self.cfg.default_analysis_type().to_string());

        let result = self.engine.analyze(&request.symptoms);
        tracing::debug!(
            user_id,
            analysis_type = %analysis_type,
            illness = %result.illness,
            confidence = result.confidence_score,
            "symptom analysis completed"
        );

        Ok(AnalysisRecord {
            user_id,
            symptoms: request.symptoms,
            confidence_score: result.confidence_score,
            analysis_result: result,
            analysis_type,
            created_at,
        })
    }

    /// The most recent analyses of `user_id`, newest first, up to the configured limit.
    pub fn recent_history<'a>(
        &self,
        records: &'a [AnalysisRecord],
        user_id: i64,
    ) -> Vec<&'a AnalysisRecord> {
        recent_history(records, user_id, self.cfg.history_limit())
    }
}

/// Records of `user_id` ordered by `created_at` descending and truncated to `limit`.
///
/// Records with equal timestamps keep their input order.
pub fn recent_history(
    records: &[AnalysisRecord],
    user_id: i64,
    limit: usize,
) -> Vec<&AnalysisRecord> {
    let mut history: Vec<&AnalysisRecord> =
        records.iter().filter(|r| r.user_id == user_id).collect();
    history.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    history.truncate(limit);
    history
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::KnowledgeBase;
    use chrono::{Duration, TimeZone};

    fn service() -> SymptomService {
        SymptomService::from_config(Arc::new(CoreConfig::default()))
    }

    fn at(minutes: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap() + Duration::minutes(minutes)
    }

    #[test]
    fn test_analyze_builds_record() {
        let record = service()
            .analyze_at(7, AnalysisRequest::new("I have fever, cough, cold"), at(0))
            .unwrap();

        assert_eq!(record.user_id, 7);
        assert_eq!(record.symptoms, "I have fever, cough, cold");
        assert_eq!(record.analysis_result.illness, "Common Cold/Flu");
        assert_eq!(record.confidence_score, 100);
        assert_eq!(record.analysis_type, "text");
        assert_eq!(record.created_at, at(0));
    }

    #[test]
    fn test_analyze_rejects_empty_symptoms() {
        let err = service().analyze(1, AnalysisRequest::new("")).unwrap_err();
        assert!(matches!(err, TriageError::InvalidInput(ref msg) if msg == "symptoms are required"));

        let req: AnalysisRequest = serde_json::from_str(r#"{"analysisType":"text"}"#).unwrap();
        assert!(service().analyze(1, req).is_err());
    }

    #[test]
    fn test_whitespace_symptoms_yield_fallback() {
        let record = service().analyze(1, AnalysisRequest::new("   ")).unwrap();
        assert_eq!(record.symptoms, "   ");
        assert!(record.analysis_result.is_fallback());
        assert_eq!(record.confidence_score, 0);
    }

    #[test]
    fn test_analyze_keeps_raw_symptoms() {
        let record = service()
            .analyze(2, AnalysisRequest::new("  chest pain only  "))
            .unwrap();
        assert_eq!(record.symptoms, "  chest pain only  ");
        assert_eq!(record.analysis_result.illness, "Possible Cardiac Issue");
        assert_eq!(record.confidence_score, 50);
    }

    #[test]
    fn test_analysis_type_passes_through() {
        let svc = service();
        let record = svc
            .analyze(3, AnalysisRequest::new("skin rash").with_analysis_type("voice"))
            .unwrap();
        assert_eq!(record.analysis_type, "voice");

        let record = svc
            .analyze(3, AnalysisRequest::new("fever").with_analysis_type(" Voice "))
            .unwrap();
        assert_eq!(record.analysis_type, " Voice ");

        let record = svc.analyze(3, AnalysisRequest::new("fever")).unwrap();
        assert_eq!(record.analysis_type, "text");
    }

    #[test]
    fn test_configured_default_analysis_type() {
        let cfg = CoreConfig::new(KnowledgeBase::builtin(), "voice".into(), 10).unwrap();
        let svc = SymptomService::from_config(Arc::new(cfg));
        let record = svc.analyze(3, AnalysisRequest::new("nausea")).unwrap();
        assert_eq!(record.analysis_type, "voice");
    }

    #[test]
    fn test_unmatched_symptoms_yield_fallback_record() {
        let record = service()
            .analyze(4, AnalysisRequest::new("I feel great today"))
            .unwrap();
        assert!(record.analysis_result.is_fallback());
        assert_eq!(record.confidence_score, 0);
    }

    #[test]
    fn test_request_deserializes_camel_case() {
        let req: AnalysisRequest =
            serde_json::from_str(r#"{"symptoms":"headache","analysisType":"voice"}"#).unwrap();
        assert_eq!(req.symptoms, "headache");
        assert_eq!(req.analysis_type.as_deref(), Some("voice"));

        let req: AnalysisRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req, AnalysisRequest::default());
    }

    #[test]
    fn test_result_json_round_trips_fields() {
        let record = service()
            .analyze_at(5, AnalysisRequest::new("headache, dizziness"), at(0))
            .unwrap();
        let json = record.result_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["illness"], "Migraine/Tension Headache");
        assert_eq!(value["confidence_score"], 100);
    }

    #[test]
    fn test_recent_history_orders_and_filters() {
        let svc = service();
        let records = vec![
            svc.analyze_at(1, AnalysisRequest::new("fever"), at(0)).unwrap(),
            svc.analyze_at(2, AnalysisRequest::new("nausea"), at(5)).unwrap(),
            svc.analyze_at(1, AnalysisRequest::new("headache"), at(10)).unwrap(),
            svc.analyze_at(1, AnalysisRequest::new("skin rash"), at(3)).unwrap(),
        ];

        let history = svc.recent_history(&records, 1);
        let symptoms: Vec<&str> = history.iter().map(|r| r.symptoms.as_str()).collect();
        assert_eq!(symptoms, vec!["headache", "skin rash", "fever"]);
        assert!(svc.recent_history(&records, 99).is_empty());
    }

    #[test]
    fn test_recent_history_truncates_to_limit() {
        let svc = service();
        let records: Vec<AnalysisRecord> = (0..15)
            .map(|i| {
                svc.analyze_at(1, AnalysisRequest::new("joint pain"), at(i))
                    .unwrap()
            })
            .collect();

        let history = svc.recent_history(&records, 1);
        assert_eq!(history.len(), 10);
        assert_eq!(history[0].created_at, at(14));
        assert_eq!(history[9].created_at, at(5));

        assert_eq!(recent_history(&records, 1, 3).len(), 3);
    }
}
