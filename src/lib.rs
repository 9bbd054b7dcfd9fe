//! Complex impedance of AC circuits assembled from ideal and real
//! (parasitic-bearing) resistors, inductors and capacitors.
//!
//! Components live in an append-only [`ComponentCatalogue`] and are
//! referenced by [`ComponentId`] handles. A [`Circuit`] runs at one
//! frequency and accumulates series batches and parallel groups into a
//! running total; a [`CircuitSet`] chains circuits in series.

pub mod error;
pub mod imped_math;
pub mod component;
pub mod catalogue;
pub mod circuit;
pub mod report;
pub mod session;
pub mod shell;

pub use catalogue::{ComponentCatalogue, ComponentId};
pub use circuit::{combine_all, Circuit, CircuitSet};
pub use component::{Build, Component, ComponentKind, ComponentRequest};
pub use error::{DomainError, Result};
pub use imped_math::Cplx;
pub use report::ImpedanceReport;
pub use session::Session;
