//! Estimation engine for lodging impact models.
//!
//! A model is a set of named quantities. Each derivable quantity has a
//! [`Committee`]: an ordered list of [`Quorum`]s, the alternative methods
//! for computing it, most preferred first. A [`Session`] resolves a
//! requested quantity against a [`Characteristics`] store by recursively
//! resolving whatever the first applicable, compliant quorum needs.
//!
//! # Architecture
//!
//! - **Registry**: quantity declarations and committees, built once and
//!   shared read-only between sessions.
//! - **Session**: one per estimation request. Holds the client facts, the
//!   timeframe and requested compliance, a memo of resolved quantities,
//!   and the provenance log.
//! - **Report**: the audit view of a finished session: values, methods
//!   used, and the standards the answer actually complies with.

pub mod characteristics;
pub mod committee;
pub mod compliance;
pub mod error;
pub mod provenance;
pub mod quantity;
pub mod quorum;
pub mod registry;
pub mod report;
pub mod session;
pub mod timeframe;
pub mod value;

// Re-exports for convenience.
pub use characteristics::Characteristics;
pub use committee::Committee;
pub use compliance::{complies, ComplianceSet, Standard};
pub use error::{EngineError, Result};
pub use provenance::{Method, Provenance};
pub use quantity::{Quantity, QuantityKind};
pub use quorum::{Inputs, Quorum};
pub use registry::Registry;
pub use report::Report;
pub use session::{Session, SessionStats};
pub use timeframe::{Context, Timeframe};
pub use value::{EntityRef, Value};
