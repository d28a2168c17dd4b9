// src/lib.rs
//! Kaohsiung Architects Association notice board, as data.
//!
//! Two pipelines over one model:
//! - scrape: notice page HTML → [`model::RawDocument`]s → published [`model::Snapshot`]
//! - view: snapshot → [`data::DocumentCollection`] (enriched against a reference
//!   date) → [`data::DocumentView`] under a [`query::FilterState`]

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod cli;
pub mod config;
pub mod core;
pub mod csv;
pub mod data;
pub mod dates;
pub mod enrich;
pub mod error;
pub mod model;
pub mod progress;
pub mod query;
pub mod runner;
pub mod specs;
pub mod store;

pub use error::{Error, Result};
