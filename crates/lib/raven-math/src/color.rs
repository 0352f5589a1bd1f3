use glam::{Vec3, DVec3};

/// Read a 3-vector as a color.
pub trait ColorAccess {
    type Scalar;

    fn from_rgb(r: Self::Scalar, g: Self::Scalar, b: Self::Scalar) -> Self;

    fn r(&self) -> Self::Scalar;
    fn g(&self) -> Self::Scalar;
    fn b(&self) -> Self::Scalar;
}

impl ColorAccess for Vec3 {
    type Scalar = f32;

    #[inline]
    fn from_rgb(r: f32, g: f32, b: f32) -> Self {
        Vec3::new(r, g, b)
    }

    #[inline]
    fn r(&self) -> f32 { self.x }
    #[inline]
    fn g(&self) -> f32 { self.y }
    #[inline]
    fn b(&self) -> f32 { self.z }
}

impl ColorAccess for DVec3 {
    type Scalar = f64;

    #[inline]
    fn from_rgb(r: f64, g: f64, b: f64) -> Self {
        DVec3::new(r, g, b)
    }

    #[inline]
    fn r(&self) -> f64 { self.x }
    #[inline]
    fn g(&self) -> f64 { self.y }
    #[inline]
    fn b(&self) -> f64 { self.z }
}
