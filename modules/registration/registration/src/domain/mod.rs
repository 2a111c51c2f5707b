pub mod error;
pub mod field;
pub mod form;
pub mod ports;
pub mod service;
pub mod session;
pub mod validators;

#[cfg(test)]
mod service_test;
