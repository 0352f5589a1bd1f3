//! Bake the diffuse irradiance of a cubemap into nine SH coefficients.

pub mod console;
mod driver;

pub use driver::{Driver, Job, NO_INPUT_MESSAGE};
