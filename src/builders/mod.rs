// This file is the module declaration file for the `builders` module.
// It declares and makes public all the sub-modules within the `src/builders`
// directory. These modules encapsulate the domain logic of the clinic desk.

// The `pub mod payments;` declaration exposes the `payments` module.
//
// `payments` module:
// The mock payment processor. It routes a payment request to one of three
// authorization strategies (card, PayPal, bank transfer), applies the
// method-specific validation, and records exactly one payment row per
// attempt that passes validation, whatever the outcome.
pub mod payments;

// The `pub mod records;` declaration exposes the `records` module.
//
// `records` module:
// This is a fundamental module that defines the core data structures of the
// clinic: `Patient`, `Appointment`, and `Payment`, along with the payment
// method and outcome enums. These are the transient in-memory copies of
// rows owned by the store.
pub mod records;

// The `pub mod reporter;` declaration exposes the `reporter` module.
//
// `reporter` module:
// This module is responsible for generating human-readable listings and
// status updates. It defines a `StatusReporter` trait and its
// `ConsoleReporter` implementation, which displays the roster and a summary
// of the stored records.
pub mod reporter;

// The `pub mod scheduler;` declaration exposes the `scheduler` module.
//
// `scheduler` module:
// Appointment booking. It validates a booking request against the doctor
// roster, then inserts relying on the store's slot uniqueness constraint,
// mapping a violation to a conflict error.
pub mod scheduler;

// The `pub mod validator;` declaration exposes the `validator` module.
//
// `validator` module:
// Pure field-level format checks: national id, phone, date, time, the card
// Luhn checksum, and the (deliberately weak) email shape check.
pub mod validator;
