//! Client for the CribInfo natural-language property search service.
//!
//! The [`store::SearchStore`] owns search, chat and compare state;
//! [`search::SearchOrchestrator`] drives the backend and feeds results into it.

pub mod compare;
pub mod config;
pub mod format;
pub mod models;
pub mod notify;
pub mod search;
pub mod store;
pub mod theme;
