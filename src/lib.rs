//! Clinic Desk
//!
//! A small clinic-management toolset: patient registration, appointment
//! scheduling with doctor/time conflict checks, and a mock payment processor,
//! all backed by a local SQLite store.
//!
//! # Architecture
//!
//! - [`core::config`] - `clinic.toml` workspace configuration and the
//!   immutable doctor roster
//! - [`core::engine`] - the operation surface the CLI talks to
//! - [`core::store`] - SQLite persistence for patients, appointments, and
//!   payments
//! - [`core::error`] - the domain error taxonomy
//! - [`builders::validator`] - pure field-format checks, including the card
//!   Luhn checksum
//! - [`builders::scheduler`] - conflict-checked appointment booking
//! - [`builders::payments`] - the three mock authorization strategies
//! - [`builders::reporter`] - console listings and the status report
//!
//! Payment outcomes are mock authorizations decided locally: the fixed test
//! card approves, any other Luhn-valid card declines, PayPal approves on a
//! plausible email, and bank transfers always stay pending.

pub mod builders;
pub mod core;
pub mod utils;

pub use builders::records::{
    Appointment, Patient, Payment, PaymentKind, PaymentMethod, PaymentOutcome, PaymentReceipt,
};
pub use core::engine::ClinicEngine;
pub use core::error::ClinicError;

#[cfg(test)]
mod tests;
