//! Airworthiness Directive applicability: domain records, the evaluation
//! engine, and the storage/import glue around it.

pub mod domain;
pub mod evaluation;
pub mod fleet;
pub mod library;
pub mod verification;

pub use domain::{
    AdDocument, AircraftConfiguration, ApplicabilityRules, EvaluationKey, EvaluationResult,
    ExemptingModification, MsnConstraint,
};
pub use evaluation::ApplicabilityEvaluator;
pub use fleet::{FleetImportError, FleetImporter};
pub use library::{
    DirectiveStore, DirectiveStoreError, FileDirectiveStore, InMemoryDirectiveStore,
};
pub use verification::{all_passed, verify_result, ValidationKey, VerificationResult};
