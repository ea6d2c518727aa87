use ad_applicability::directives::{ApplicabilityEvaluator, DirectiveStore};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Evaluation dependencies shared across request handlers. The store is
/// injected as a trait object so routes run identically against the on-disk
/// library and the in-memory store used in tests.
pub(crate) struct DirectiveContext {
    pub(crate) store: Arc<dyn DirectiveStore>,
    pub(crate) evaluator: ApplicabilityEvaluator,
}

impl DirectiveContext {
    pub(crate) fn new(store: Arc<dyn DirectiveStore>) -> Self {
        Self {
            store,
            evaluator: ApplicabilityEvaluator::new(),
        }
    }
}
