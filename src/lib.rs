//! Client-side controller for a price prediction form.
//!
//! [`FormController`] owns the submit workflow (idle, loading, then success
//! or failure) and renders it into a [`ResultPanel`]. [`InputValidator`]
//! gives per-field validity feedback independently of submission.

pub mod client;
pub mod config;
pub mod controller;
pub mod form;
pub mod models;
pub mod render;
pub mod state;
pub mod validator;

pub use client::{HttpPredictionClient, PredictError, PredictionClient};
pub use config::ControllerConfig;
pub use controller::{CompletionOrder, FormController, Submission, SubmissionOutcome};
pub use form::{Constraints, Form, NumberInput, Step, SubmitEvent, ValidityState};
pub use models::{FormSnapshot, PredictionResult};
pub use state::{FailureKind, ResultPanel, UiState};
pub use validator::{FieldRule, InputValidator, INVALID_CLASS};
