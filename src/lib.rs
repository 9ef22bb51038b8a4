//! Project Tracker - Administrative backend for research project tracking
//!
//! Staff members, their roles and projects, project partnerships, SDG
//! contributions, expenditures, and sampling documentation, with a public
//! read API for staff and descriptors for the admin interface.

pub mod adapters;
pub mod admin;
pub mod config;
pub mod domain;
pub mod ports;
