//! Core estimation and scheduling logic for Mandap.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Every operation is a synchronous function over immutable inputs; the rate and
//! ceremony tables are plain values built once and passed by reference.
//!
//! # Modules
//!
//! - `pricing` - Cost multipliers, refined cost ranges, and line item estimates
//! - `ceremony` - Ceremony dates derived from the wedding date
//! - `budget` - Spending totals, usage percentage, and budget health

pub mod budget;
pub mod ceremony;
pub mod pricing;
