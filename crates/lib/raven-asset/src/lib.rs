//! Containers read and written by the tools: DDS cubemaps and SH coefficient JSON.

mod error;
pub mod dds;
pub mod sh_json;

pub use error::{DdsError, ShJsonError};
pub use dds::DdsCubemap;
