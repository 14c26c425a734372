// This file is the module declaration file for the `core` module.
// In Rust, a `mod.rs` file within a directory (e.g., `src/core/`)
// serves two main purposes:
//
// 1. It declares the submodules contained within that directory.
// 2. It exposes these submodules to the parent module (`src/` in this case),
//    making them accessible to the entire crate.

// `config` module:
// This module is responsible for managing the workspace configuration. It
// defines the data structures for the configuration file (`ClinicConfig`,
// including the immutable doctor roster), provides a `ConfigProvider` trait
// for abstracting configuration access, and includes a `ConfigManager` to
// handle file I/O operations like loading, saving, and validating the
// configuration.
pub mod config;

// `engine` module:
// The `ClinicEngine` is the operation surface the presentation layer talks
// to: patient registration, appointment scheduling, payment processing, and
// record export. It wires the validators, scheduler, and payment processor
// to scoped store handles.
pub mod engine;

// `error` module:
// The domain error taxonomy (`ClinicError`): validation failures, slot
// conflicts, and fatal persistence errors.
pub mod error;

// `store` module:
// The SQLite persistence layer. It bootstraps the schema, maps rows to the
// record structs, and enforces the appointment slot uniqueness constraint.
pub mod store;
