//! Registration module.
//!
//! Validates the five fields of the registration form, keeps the confirmation
//! in step with the password and posts a valid form once to the registration
//! service over HTTPS.

#![forbid(unsafe_code)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

// === PUBLIC CONTRACT ===
// Only the SDK is the public API, re-exported for convenience
pub use registration_sdk::{
    FieldId, NewRegistration, RegistrationClientV1, RegistrationError, RegistrationInput,
    SubmissionStatus,
};

pub mod module;
pub use module::RegistrationModule;

pub mod api;
pub mod config;
pub mod domain;
pub mod infra;
pub mod local_client;

pub use config::RegistrationConfig;

#[cfg(test)]
mod config_tests;
