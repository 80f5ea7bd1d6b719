//! Reference data for lodging estimates.
//!
//! Everything here is read-only once loaded and safe to share between
//! concurrent sessions:
//! - **Datasets:** keyed tables of fuels, grid regions, geographies,
//!   lodging classes, properties, and CBECS survey responses
//! - **Cohorts:** greedy criterion relaxation over survey records
//! - **Fuzzy inference:** membership-weighted estimates over a cohort
//! - **Geocoding:** the collaborator that turns a place description into
//!   a location

pub mod cohort;
pub mod dataset;
pub mod error;
pub mod fuzzy;
pub mod geocode;
pub mod records;

pub use cohort::{narrow, Attributes, Criterion};
pub use dataset::ReferenceData;
pub use error::{ReferenceError, Result};
pub use geocode::{Geocode, Geocoder, StaticGeocoder};
