//! The lifetime sample: one service type registered under three roles.
//!
//! [`SampleService`] carries a random identifier. It is registered as
//! [`TransientService`], [`ScopedService`] and [`SingletonService`], each with
//! the matching lifetime, and [`SampleController`] resolves every role twice
//! so the identifiers show which lifetime shares what.

mod controller;
mod service;

pub use controller::{LifetimeReport, PairReport, SampleController};
pub use service::{LifetimeSamplesModule, SampleService, ScopedService, SingletonService, TransientService};
