//! Cubemap addressing and second order spherical harmonics projection for image based lighting.

mod image;
mod cubemap;
mod sh;

pub use image::{ImagePlane, TEXEL_SIZE, read_texel, write_texel};
pub use cubemap::{Cubemap, CubeGeometry, Face, Address};
pub use sh::{
    ShCoefficients, ShKernel, ShKernelParseError,
    solid_angle, project, project_with_kernel, reconstruct,
};
