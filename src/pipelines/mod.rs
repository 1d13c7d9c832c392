//! Workflow pipelines orchestrating stateless services.

pub mod sign;

pub use sign::{CadesSignWorkflow, SignOutcome, SignRequest, SignatureProvider};
