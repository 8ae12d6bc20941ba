pub mod config;
pub mod domain;
pub mod error;
pub mod infra;
pub mod keys;
pub mod otp;
pub mod state;
pub mod tracing;
pub mod usecase;
