pub mod error;
pub mod field;
pub mod config;
pub mod stencil;
pub mod reaction;
pub mod init;
pub mod sim;
pub mod pattern;
pub mod io;

pub use error::RdError;
pub use sim::RdSystem;

// Flat re-exports for front ends
pub mod types {
    pub use crate::config::{RdConfig, RdConfigBuilder};
    pub use crate::field::{Component, Field, FieldStats};
    pub use crate::pattern::{Layout, PatternParams};
    pub use crate::sim::State;
}

pub mod integrator {
    pub use crate::sim::integrator::{euler_step, Kinetics, Workspace};
    pub use crate::sim::runner::{evolve, record, record_with};
}
