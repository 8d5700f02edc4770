//! Client side of the ruprojectgames translation catalogue.
//!
//! The remote API owns persistence and enforces the admin password. This crate
//! holds everything a front end needs around it: the listing store, the
//! filter, the admin session and the submission gateway, each modelled as an
//! explicit state machine that is advanced in two steps (`begin_*` before a
//! request is sent, `finish_*` once its result arrives). [`Catalog`] wires
//! them to a [`Backend`] for front ends that simply want to `await` a flow.

pub mod api;
pub mod catalog;
pub mod config;
pub mod filter;
pub mod fs;
pub mod gateway;
pub mod model;
pub mod notify;
pub mod session;
pub mod store;

mod error;

pub use api::{Backend, HttpBackend};
pub use catalog::Catalog;
pub use error::{Error, Field, Result, ValidationError};
pub use model::{Game, NewTranslation, TranslationId, TranslationRecord};
