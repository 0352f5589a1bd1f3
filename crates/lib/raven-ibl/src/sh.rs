use std::{fmt, ops::{Index, IndexMut}, str::FromStr, time::Instant};
use std::f64::consts::PI;

use thiserror::Error;

use raven_math::{DVec3, SHBasis9, truncated_cosine};
use raven_thread::TaskGroup;

use crate::cubemap::{Cubemap, Face};
use crate::image::{ImagePlane, TEXEL_SIZE, read_texel, write_texel};

/// Nine RGB coefficients of bands 0 to 2, in [`SHBasis9`] order.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ShCoefficients([DVec3; 9]);

impl Default for ShCoefficients {
    fn default() -> Self {
        Self::zero()
    }
}

impl ShCoefficients {
    pub const COUNT: usize = SHBasis9::COUNT;

    pub fn zero() -> Self {
        Self([DVec3::ZERO; 9])
    }

    pub fn from_array(coefficients: [DVec3; 9]) -> Self {
        Self(coefficients)
    }

    pub fn from_rows(rows: [[f64; 3]; 9]) -> Self {
        Self(rows.map(DVec3::from_array))
    }

    pub fn to_rows(&self) -> [[f64; 3]; 9] {
        self.0.map(|c| c.to_array())
    }

    pub fn as_slice(&self) -> &[DVec3] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &DVec3> {
        self.0.iter()
    }

    /// Reconstructed value in `direction` (a unit vector).
    pub fn evaluate(&self, direction: DVec3) -> DVec3 {
        let basis = SHBasis9::from_direction_polynomial(direction).to_array();

        let mut c = DVec3::ZERO;
        for (coefficient, b) in self.0.iter().zip(basis) {
            c += *coefficient * b;
        }
        c
    }
}

impl Index<usize> for ShCoefficients {
    type Output = DVec3;

    fn index(&self, index: usize) -> &DVec3 {
        &self.0[index]
    }
}

impl IndexMut<usize> for ShCoefficients {
    fn index_mut(&mut self, index: usize) -> &mut DVec3 {
        &mut self.0[index]
    }
}

#[derive(Debug, Error)]
#[error("Unknown SH kernel {0:?}! (please choose from radiance, irradiance, prescaled)")]
pub struct ShKernelParseError(String);

/// Convolution applied while projecting.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ShKernel {
    /// No convolution. Reconstruction approximates the input radiance.
    Radiance,
    /// Clamped-cosine convolution. Reconstruction gives irradiance.
    Irradiance,
    /// Irradiance divided by pi, the radiance leaving a white diffuse surface.
    PreScaledIrradiance,
}

impl ShKernel {
    /// Factor applied to every term of band `l`.
    pub fn band_factor(self, l: usize) -> f64 {
        match self {
            ShKernel::Radiance => 1.0,
            ShKernel::Irradiance => truncated_cosine(l),
            ShKernel::PreScaledIrradiance => truncated_cosine(l) / PI,
        }
    }

    /// Per-term projection weights: basis normalization times the band factor.
    pub fn weights(self) -> SHBasis9 {
        SHBasis9::normalization().mul_bands(|l| self.band_factor(l))
    }

    pub fn name(self) -> &'static str {
        match self {
            ShKernel::Radiance => "radiance",
            ShKernel::Irradiance => "irradiance",
            ShKernel::PreScaledIrradiance => "prescaled",
        }
    }
}

impl fmt::Display for ShKernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShKernel {
    type Err = ShKernelParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().trim() {
            "radiance" => Ok(ShKernel::Radiance),
            "irradiance" => Ok(ShKernel::Irradiance),
            "prescaled" | "prescaled-irradiance" => Ok(ShKernel::PreScaledIrradiance),
            _ => Err(ShKernelParseError(s.to_owned())),
        }
    }
}

#[inline]
fn sphere_quadrant_area(x: f64, y: f64) -> f64 {
    (x * y).atan2((x * x + y * y + 1.0).sqrt())
}

/// Exact solid angle subtended by texel (u, v) of a face with `dim` texels per side.
pub fn solid_angle(dim: usize, u: usize, v: usize) -> f64 {
    let inv_dim = 1.0 / dim as f64;
    let s = ((u as f64 + 0.5) * 2.0 * inv_dim) - 1.0;
    let t = ((v as f64 + 0.5) * 2.0 * inv_dim) - 1.0;
    let x0 = s - inv_dim;
    let y0 = t - inv_dim;
    let x1 = s + inv_dim;
    let y1 = t + inv_dim;

    sphere_quadrant_area(x0, y0)
        - sphere_quadrant_area(x0, y1)
        - sphere_quadrant_area(x1, y0)
        + sphere_quadrant_area(x1, y1)
}

/// Project the cubemap onto the irradiance SH basis.
pub fn project(cm: &Cubemap) -> ShCoefficients {
    project_with_kernel(cm, ShKernel::Irradiance)
}

/// Project the cubemap onto bands 0 to 2, one task per face.
pub fn project_with_kernel(cm: &Cubemap, kernel: ShKernel) -> ShCoefficients {
    debug_assert!(cm.is_complete(), "Projecting an incomplete cubemap!");

    let now = Instant::now();
    let weights = kernel.weights();
    let geometry = *cm.geometry();
    let dim = geometry.dimension();

    let project_face = |face: Face, image: &ImagePlane<'_>| {
        let mut sh = [DVec3::ZERO; 9];

        for y in 0..dim {
            for (x, texel) in image.row(y).chunks_exact(TEXEL_SIZE).enumerate() {
                let s = geometry.direction_for(face, x, y);

                // take solid angle into account
                let color = read_texel(texel).as_dvec3() * solid_angle(dim, x, y);

                let basis = SHBasis9::from_direction_polynomial(s).mul_basis(&weights).to_array();
                for (acc, b) in sh.iter_mut().zip(basis) {
                    *acc += color * b;
                }
            }
        }

        log::trace!("face {} projected", face);
        sh
    };

    let partials = TaskGroup::new("SH Projection")
        .fan_out(cm.faces(), |_, (face, image)| project_face(face, image));

    let mut result = ShCoefficients::zero();
    for partial in partials {
        for (i, c) in partial.into_iter().enumerate() {
            result[i] += c;
        }
    }

    log::debug!("{} SH projection of a {}x{} cubemap took {:.3} ms",
        kernel, dim, dim, now.elapsed().as_secs_f64() * 1000.0);
    result
}

/// Overwrite every texel with the SH reconstruction in its direction, one task per face.
pub fn reconstruct(cm: &mut Cubemap, sh: &ShCoefficients) {
    debug_assert!(cm.is_complete(), "Reconstructing into an incomplete cubemap!");

    let now = Instant::now();
    let geometry = *cm.geometry();
    let dim = geometry.dimension();

    TaskGroup::new("SH Reconstruction").fan_out(cm.faces_mut(), |_, (face, image)| {
        assert!(image.is_writable(), "Face {} is read-only!", face);

        for y in 0..dim {
            for (x, texel) in image.row_mut(y).chunks_exact_mut(TEXEL_SIZE).enumerate() {
                let s = geometry.direction_for(face, x, y);
                write_texel(texel, sh.evaluate(s).as_vec3());
            }
        }

        log::trace!("face {} reconstructed", face);
    });

    log::debug!("SH reconstruction of a {}x{} cubemap took {:.3} ms",
        dim, dim, now.elapsed().as_secs_f64() * 1000.0);
}
