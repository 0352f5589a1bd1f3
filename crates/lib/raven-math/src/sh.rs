use std::f64::consts::PI;

use glam::DVec3;

/// The nine real spherical harmonics terms of bands 0, 1 and 2.
///
/// Field order is the storage and serialization order:
/// `1, y, z, x, yx, yz, 3z^2 - 1, zx, x^2 - y^2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SHBasis9 {
    y00  : f64,
    y1_1 : f64,
    y10  : f64,
    y11  : f64,
    y2_2 : f64,
    y2_1 : f64,
    y20  : f64,
    y21  : f64,
    y22  : f64
}

impl SHBasis9 {
    pub const COUNT: usize = 9;

    pub fn splat(v: f64) -> SHBasis9 {
        Self::from_array([v; Self::COUNT])
    }

    /// Band (l) of the term stored at `index`.
    #[inline]
    pub fn band_of(index: usize) -> usize {
        match index {
            0 => 0,
            1..=3 => 1,
            4..=8 => 2,
            _ => panic!("SH basis index {} out of range!", index),
        }
    }

    /// Normalization constants K of the real SH basis, such that `K * polynomial` is orthonormal.
    pub fn coefficients() -> SHBasis9 {
        let y1n = 0.5 * (3.0 / PI).sqrt();
        let y2n = 0.5 * (15.0 / PI).sqrt();

        Self {
            y00  : 0.5 * (1.0 / PI).sqrt(),
            y1_1 : y1n,
            y10  : y1n,
            y11  : y1n,
            y2_2 : y2n,
            y2_1 : y2n,
            y20  : 0.25 * (5.0 / PI).sqrt(),
            y21  : y2n,
            y22  : 0.25 * (15.0 / PI).sqrt(),
        }
    }

    /// Squared normalization constants:
    /// 1/4pi, 3/4pi (x3), 15/4pi (xy, yz, zx), 5/16pi (3z^2 - 1) and 15/16pi (x^2 - y^2).
    pub fn normalization() -> SHBasis9 {
        let k = Self::coefficients();
        k.mul_basis(&k)
    }

    /// The unnormalized basis polynomials evaluated at a unit direction.
    #[inline]
    pub fn from_direction_polynomial(direction: DVec3) -> SHBasis9 {
        // assume that r = 1.0
        SHBasis9 {
            y00  : 1.0,
            y1_1 : direction.y,
            y10  : direction.z,
            y11  : direction.x,
            y2_2 : direction.y * direction.x,
            y2_1 : direction.y * direction.z,
            y20  : (3.0 * direction.z * direction.z) - 1.0,
            y21  : direction.z * direction.x,
            y22  : (direction.x * direction.x) - (direction.y * direction.y)
        }
    }

    /// The orthonormal basis evaluated at a unit direction.
    pub fn from_direction_cartesian(direction: DVec3) -> SHBasis9 {
        assert!(direction.is_normalized());

        Self::coefficients().mul_basis(&Self::from_direction_polynomial(direction))
    }

    pub fn mul_basis(&self, basis: &SHBasis9) -> SHBasis9 {
        SHBasis9 {
            y00  : self.y00 * basis.y00,
            y1_1 : self.y1_1 * basis.y1_1,
            y10  : self.y10 * basis.y10,
            y11  : self.y11 * basis.y11,
            y2_2 : self.y2_2 * basis.y2_2,
            y2_1 : self.y2_1 * basis.y2_1,
            y20  : self.y20 * basis.y20,
            y21  : self.y21 * basis.y21,
            y22  : self.y22 * basis.y22
        }
    }

    /// Scale every term by a factor chosen per band.
    pub fn mul_bands(&self, band_factor: impl Fn(usize) -> f64) -> SHBasis9 {
        let mut values = self.to_array();
        for (i, v) in values.iter_mut().enumerate() {
            *v *= band_factor(Self::band_of(i));
        }
        Self::from_array(values)
    }

    pub fn from_array(values: [f64; 9]) -> SHBasis9 {
        let [y00, y1_1, y10, y11, y2_2, y2_1, y20, y21, y22] = values;
        Self { y00, y1_1, y10, y11, y2_2, y2_1, y20, y21, y22 }
    }

    pub fn to_array(&self) -> [f64; 9] {
        [
            self.y00,
            self.y1_1,
            self.y10,
            self.y11,
            self.y2_2,
            self.y2_1,
            self.y20,
            self.y21,
            self.y22
        ]
    }
}

/// `n! / d!`, with both arguments clamped to at least one.
pub fn factorial(n: usize, d: usize) -> f64 {
    let mut n = n.max(1);
    let mut d = d.max(1);

    let mut r = 1.0;
    if n > d {
        while n > d {
            r *= n as f64;
            n -= 1;
        }
    } else if d > n {
        while d > n {
            r *= d as f64;
            d -= 1;
        }
        r = 1.0 / r;
    }
    r
}

/// SH coefficient of band `l` of the clamped cosine lobe `max(cos(theta), 0)`,
/// before the basis normalization is applied.
pub fn truncated_cosine(l: usize) -> f64 {
    match l {
        0 => PI,
        1 => 2.0 * PI / 3.0,
        l if l & 1 == 1 => 0.0,
        l => {
            let l_2 = l / 2;
            let sign = if l_2 & 1 == 1 { 1.0 } else { -1.0 };
            let a0 = sign / ((l + 2) * (l - 1)) as f64;
            let a1 = factorial(l, l_2) / (factorial(l_2, 1) * (1u64 << l) as f64);
            2.0 * PI * a0 * a1
        }
    }
}
