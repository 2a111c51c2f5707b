//! Registration SDK
//!
//! This crate provides the public API for the `registration` module:
//! - `RegistrationClientV1` trait
//! - Model types for the form input, the request body and the submission status
//! - Error type (`RegistrationError`)
//!
//! ## Usage
//!
//! ```ignore
//! use registration_sdk::{RegistrationClientV1, RegistrationInput};
//!
//! let status = client.register(input).await?;
//! if status.failed {
//!     eprintln!("{}", status.message);
//! }
//! ```

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

pub mod api;
pub mod errors;
pub mod models;

pub use api::RegistrationClientV1;
pub use errors::RegistrationError;
pub use models::{FieldId, NewRegistration, RegistrationInput, SubmissionStatus};
