pub mod model;
pub mod coefficient;
pub mod presets;

pub use model::Reaction;
pub use coefficient::Coefficient;
pub use presets::{Activator, Inhibitor, NoReaction};
