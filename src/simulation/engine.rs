//! High-level runtime engine settings
//!
//! Selects the integration scheme, the velocity seeding mode and the
//! coordinate conventions used when building and running a `Scenario`

use super::states::NVec3;
use crate::configuration::config::{IntegratorConfig, SeedingConfig};

#[derive(Debug, Clone)]
pub struct Engine {
    pub integrator: IntegratorConfig, // euler or velocity verlet
    pub seeding: SeedingConfig, // all pairs or explicit hierarchy
    pub up: NVec3, // unit axis crossed with separations to get orbital tangents
}
