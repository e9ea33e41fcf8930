mod archive;
mod builder;
mod paths;
pub mod pipeline;
pub mod source;
pub mod tool;

pub use builder::Builder;
pub use paths::{Layout, base_path_from_config};
