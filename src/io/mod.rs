pub mod csv;
pub mod json;
pub mod naming;
pub mod render;

pub use naming::artifact_name;
pub use render::RenderOptions;
