//! nbia-cart - shared carts for the NBIA imaging catalog
//!
//! Extracts DICOM series identifiers from uploaded lists, TCIA manifests and
//! spreadsheets, then submits them to the NBIA REST API as a named shared
//! cart.

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod nbia;
pub mod session;
pub mod submit;
pub mod types;
