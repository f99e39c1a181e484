//! # reform-contracts
//!
//! Shared record types, display directives, and errors for the hospital
//! reform dashboard.
//!
//! All crates in the workspace import from here. No generation or layout
//! logic lives in this crate: only data definitions, a few pure derivations
//! on them, and the error type.

pub mod directive;
pub mod error;
pub mod hospital;
pub mod overview;
pub mod planning;
pub mod quality;
pub mod reference;
pub mod status;
pub mod verify;
