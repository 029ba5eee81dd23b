pub mod state;
pub mod integrator;
pub mod system;
pub mod runner;
pub mod event;

pub use state::State;
pub use system::RdSystem;
pub use runner::{evolve, record, record_with, Recording};
pub use integrator::euler_step;
