pub mod common;
pub mod project_config;
pub mod project_structure;
pub mod template;

pub use project_config::{EntryPoint, ProjectConfig};
pub use project_structure::ProjectStructure;
pub use template::{RenderContext, Template};
