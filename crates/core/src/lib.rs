//! # CuraLink Core
//!
//! Symptom triage for the CuraLink telehealth service.
//!
//! This crate contains the decision-making logic and nothing else:
//! - the condition knowledge base (built-in or loaded from YAML at startup)
//! - the keyword triage engine that turns symptom text into a suggested condition
//! - severity banding for presenting results
//! - the request-facing service that validates input and shapes records for storage
//!
//! **No transport or storage concerns**: HTTP routing, sessions and persisting records belong
//! to the caller.

pub mod analysis;
pub mod config;
pub mod constants;
pub mod error;
pub mod knowledge_base;
pub mod service;
pub mod severity;
pub mod triage;

pub use analysis::AnalysisResult;
pub use config::CoreConfig;
pub use error::{TriageError, TriageResult};
pub use knowledge_base::{ConditionRecord, KnowledgeBase};
pub use service::{AnalysisRecord, AnalysisRequest, SymptomService};
pub use severity::SeverityBand;
pub use triage::TriageEngine;
