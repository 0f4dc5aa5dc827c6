#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

/// Core domain models for break-even analytics.
///
/// This module contains the data structures exchanged between the report
/// builders, the storage adapters and the API layer. Apart from validation on
/// construction, the models carry no business logic.
pub mod models;

/// Interface traits for the analytics backend.
///
/// These are the "ports" of the hexagonal architecture: storage and transport
/// crates implement them, and the API layer is written against them, so the
/// domain core never depends on a database or on a particular token scheme.
pub mod ports;

/// Pure financial formulas.
pub mod formulas;

/// Report builders combining business parameters with campaign history.
pub mod report;

/// CSV rendering of the administrative rollup.
pub mod export;

mod error;
pub use error::ValidationError;
