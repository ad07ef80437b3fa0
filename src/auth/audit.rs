//! Audit records for classification outcomes

use super::types::{AuthCategory, ClassificationResult};
use crate::utils::logging::AUDIT_TARGET;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::info;

/// One classified request, with the minimum identity needed to trace it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEvent {
    pub timestamp: DateTime<Utc>,
    pub request_id: String,
    pub route: String,
    pub category: AuthCategory,
    pub authenticated: bool,
    pub subject_id: Option<String>,
    pub email: Option<String>,
}

impl AuditEvent {
    pub fn from_result(
        result: &ClassificationResult,
        request_id: impl Into<String>,
        route: impl Into<String>,
    ) -> Self {
        let identity = result.identity();
        Self {
            timestamp: Utc::now(),
            request_id: request_id.into(),
            route: route.into(),
            category: result.category(),
            authenticated: result.authenticated(),
            subject_id: identity.map(|i| i.subject_id.clone()),
            email: identity.and_then(|i| i.email.clone()),
        }
    }
}

/// Destination for audit events. Recording never fails from the caller's view.
pub trait AuditSink: Send + Sync {
    fn record(&self, event: &AuditEvent);
}

/// Writes audit events as structured `tracing` records
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn record(&self, event: &AuditEvent) {
        info!(
            target: AUDIT_TARGET,
            timestamp = %event.timestamp.to_rfc3339(),
            request_id = %event.request_id,
            route = %event.route,
            category = %event.category,
            authenticated = event.authenticated,
            subject_id = event.subject_id.as_deref().unwrap_or("-"),
            email = event.email.as_deref().unwrap_or("-"),
            "Request classified"
        );
    }
}

/// Keeps events in memory; used by tests
#[derive(Debug, Default)]
pub struct MemoryAuditSink {
    events: Mutex<Vec<AuditEvent>>,
}

impl MemoryAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<AuditEvent> {
        self.events.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl AuditSink for MemoryAuditSink {
    fn record(&self, event: &AuditEvent) {
        self.events.lock().push(event.clone());
    }
}
