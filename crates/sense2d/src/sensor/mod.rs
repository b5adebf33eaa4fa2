//! Proximity sensing subsystem
//!
//! Based on Game Engine Architecture 3rd Edition, Chapter 13:
//! "The collision detection system is typically split into two phases:
//! broad-phase and narrow-phase."
//!
//! # Module Organization
//!
//! - [`shape`] - Footprint overrides attached to registrations
//! - [`probe`] - Per-cycle test geometry with continuous-motion expansion
//! - [`hit_test`] - Narrow-phase overlap dispatch
//! - [`tracker`] - Double-buffered begin/end transition state
//! - [`throttle`] - Check-frequency gating on the scheduler's frame counter
//! - [`engine`] - Registration and per-cycle orchestration (the root)

pub mod engine;
pub mod probe;
pub mod shape;
pub mod throttle;
pub mod tracker;

pub use engine::{
    ActiveKey, ActiveShape, HitCallback, PassiveKey, SensorEngine, SensorHit, SensorOps,
};
pub use hit_test::hit_test;
pub use probe::{Probe, SENSING_DISTANCE};
pub use shape::Footprint;
pub use throttle::FrequencyThrottle;
pub use tracker::CollisionTracker;
