//! # sense2d
//!
//! A per-frame, many-to-many proximity sensing engine for 2D scenes.
//!
//! ## Features
//!
//! - **Grid Broad Phase**: per-category spatial hash rebuilt each check cycle
//! - **Shape Dispatch**: boxes, oriented polygons, and circle footprints
//!   tested through one narrow-phase entry point
//! - **Begin/End Transitions**: double-buffered pair state turns per-cycle
//!   overlap into discrete enter and exit notifications
//! - **Tunneling Mitigation**: fast movers are tested as the union of two
//!   sampled boundaries
//! - **Frequency Throttling**: check cycles run every N scheduler ticks
//!
//! The engine never owns shapes. Owners register stable ids and the host's
//! scene layer serves world-space boundaries through [`BoundarySource`];
//! the host's frame scheduler drives [`SensorEngine::update`] once per tick.
//!
//! ## Quick Start
//!
//! ```no_run
//! use sense2d::prelude::*;
//!
//! struct Scene;
//!
//! impl BoundarySource for Scene {
//!     fn boundary(&self, _entity: EntityId) -> Option<Boundary> {
//!         Some(Boundary::axis_aligned(Rect::new(0.0, 10.0, 0.0, 10.0)))
//!     }
//! }
//!
//! let mut engine = SensorEngine::new(SensorConfig::default());
//! engine.add_passive(EntityId::new(1), "pickup");
//! engine.add_active(ActiveShape::new(
//!     EntityId::new(2),
//!     "pickup",
//!     |hit, _ops| println!("entered {:?}", hit.target),
//!     |hit, _ops| println!("left {:?}", hit.target),
//! ));
//! engine.start();
//!
//! let scene = Scene;
//! for frame in 0..60 {
//!     engine.update(frame, &scene);
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod foundation;
pub mod scene;
pub mod sensor;
pub mod spatial;

pub use config::{Config, ConfigError, SensorConfig};
pub use scene::{Boundary, BoundarySource, EntityId, Rect};
pub use sensor::{ActiveShape, Footprint, SensorEngine, SensorHit, SensorOps};

/// Common imports for engine users
pub mod prelude {
    pub use crate::config::SensorConfig;
    pub use crate::scene::{Boundary, BoundarySource, EntityId, Rect};
    pub use crate::sensor::{
        ActiveShape, Footprint, SensorEngine, SensorHit, SensorOps,
    };
}
