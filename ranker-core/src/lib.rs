//! # Ranker Core
//!
//! Core library for Ranker, a catalog of creative works (albums, books and
//! movies) that logged-in users can curate and upvote.
//!
//! ## Overview
//!
//! `ranker-core` owns everything below the HTTP surface:
//!
//! - **Domain**: [`domain::work::Work`], the closed [`domain::work::Category`]
//!   set, votes, users and session tokens
//! - **Validation**: candidate payloads are turned into validated values at the
//!   boundary, see [`domain::work::WorkDraft`]
//! - **Listings**: category-bucketed, vote-ranked shelves for the root and
//!   index pages in [`domain::catalog`]
//! - **Persistence**: repository ports with PostgreSQL and in-memory adapters
//! - **Application services**: work lifecycle, upvoting and session login
//!
//! ## Architecture
//!
//! - [`database::ports`]: repository traits used by application code
//! - [`database::infrastructure`]: PostgreSQL (sqlx) and in-memory adapters
//! - [`application::unit_of_work`]: bundles the ports for the services
//! - [`application`]: `CatalogService`, `VotingService`, `AccountService`

#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(missing_docs)]

/// Route constants shared by the server and its tests
pub mod api;

/// Application services and the unit of work
pub mod application;

/// Repository ports and adapters
pub mod database;

/// Domain types and business rules
pub mod domain;

/// Error types and error handling utilities
pub mod error;

pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

pub use error::{RankerError, Result};
