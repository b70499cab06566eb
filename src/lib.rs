//! Query runner for Device42's DOQL endpoint.
//!
//! Turns a DOQL query string into an authenticated HTTP request, decodes the
//! comma-delimited response into keyed rows, and layers best-effort schema
//! discovery on top of the same pipeline. Usable as a library (drive
//! [`runner::doql::DoqlRunner`] through the [`runner::QueryRunner`] trait)
//! or through the `doql` CLI.

pub mod cli;
pub mod config;
pub mod error;
pub mod normalize;
pub mod output;
pub mod runner;
pub mod sanitize;
pub mod verbose;
