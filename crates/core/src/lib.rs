//! Impact Effects Core Library
//!
//! Estimates the physical consequences of an asteroid or comet striking
//! Earth from a handful of inputs: diameter, density, velocity, impact
//! angle, target (land or water) and burst altitude.
//!
//! ## Pipeline
//!
//! 1. Kinetic energy (relativistic above 30 km/s)
//! 2. Crater geometry from π-scaling
//! 3. Fireball, thermal radiation, blast overpressure/wind, seismic
//!    magnitude/intensity and tsunami estimates, each an independent model
//! 4. Effect-to-crater ratio checks
//!
//! Every model is a pure function of its inputs; the pipeline keeps no
//! state between runs and is safe to share across threads.
//!
//! ```
//! use impact_effects_core::{ImpactEffectsPipeline, ImpactorParameters};
//!
//! let params = ImpactorParameters::new(100.0, 3000.0, 17_000.0);
//! let report = ImpactEffectsPipeline::default().run("Custom input", &params).unwrap();
//! assert!(*report.energy_megatons() > 54.0);
//! ```

// Core types and utilities
pub mod core_types;
pub mod error;

// Physics models and orchestration
pub mod config;
pub mod physics;
pub mod pipeline;

// Parameter source and presentation
pub mod catalog;
pub mod report;

// Re-export core types
pub use core_types::{ImpactSite, ImpactorParameters, SoilType, TargetType};
pub use core_types::{Joules, Kilometers, Megatons, Meters};
pub use error::{ImpactError, ImpactErrorCode, Result};

// Re-export pipeline types
pub use catalog::{DateWindow, NeoCatalog, NeoFeed, NeoRecord};
pub use config::{PipelineConfig, ScalingFactors};
pub use pipeline::{ImpactEffectsPipeline, ImpactReport, CUSTOM_INPUT_NAME};
pub use report::ReportView;
