use std::fmt;

use raven_math::{DVec3, Vec3, next_below};

use crate::image::ImagePlane;

/// Cube face, in the standard container order.
///
/// ```text
///           +----+
///           | PY |
///      +----+----+----+----+
///      | NX | PZ | PX | NZ |
///      +----+----+----+----+
///           | NY |
///           +----+
/// ```
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Face {
    PX = 0,
    NX,
    PY,
    NY,
    PZ,
    NZ,
}

impl Face {
    pub const COUNT: usize = 6;

    pub const ALL: [Face; 6] = [Face::PX, Face::NX, Face::PY, Face::NY, Face::PZ, Face::NZ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Face> {
        Self::ALL.get(index).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Face::PX => "+X",
            Face::NX => "-X",
            Face::PY => "+Y",
            Face::NY => "-Y",
            Face::PZ => "+Z",
            Face::NZ => "-Z",
        }
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Location of a direction on the cube: a face and normalized face coordinates in [0, 1].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Address {
    pub face: Face,
    pub s: f64,
    pub t: f64,
}

/// Addressing math of a cube with square faces of `dimension` texels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CubeGeometry {
    dimension: usize,
    scale: f64,
    upper_bound: f64,
}

impl CubeGeometry {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            scale: 2.0 / dimension as f64,
            upper_bound: next_below(dimension as f64),
        }
    }

    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Size of one texel in [-1, 1] face space.
    #[inline]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Largest texel coordinate that still floors into the face.
    #[inline]
    pub fn upper_bound(&self) -> f64 {
        self.upper_bound
    }

    /// Unit direction through the center of texel (x, y).
    #[inline]
    pub fn direction_for(&self, face: Face, x: usize, y: usize) -> DVec3 {
        self.direction_at(face, x as f64 + 0.5, y as f64 + 0.5)
    }

    /// Unit direction through the fractional texel coordinate (x, y).
    pub fn direction_at(&self, face: Face, x: f64, y: f64) -> DVec3 {
        // map [0, dim] to [-1, 1] with (-1, -1) at bottom left
        let cx = (x * self.scale) - 1.0;
        let cy = 1.0 - (y * self.scale);

        let l = (cx * cx + cy * cy + 1.0).sqrt();
        let dir = match face {
            Face::PX => DVec3::new( 1.0,  cy, -cx),
            Face::NX => DVec3::new(-1.0,  cy,  cx),
            Face::PY => DVec3::new(  cx, 1.0, -cy),
            Face::NY => DVec3::new(  cx,-1.0,  cy),
            Face::PZ => DVec3::new(  cx,  cy, 1.0),
            Face::NZ => DVec3::new( -cx,  cy,-1.0),
        };
        dir * (1.0 / l)
    }

    /// Face and face coordinates hit by `r`.
    ///
    /// The face is picked by the largest absolute component, ties resolved in X, Y, Z order.
    pub fn address_for(r: DVec3) -> Address {
        let rx = r.x.abs();
        let ry = r.y.abs();
        let rz = r.z.abs();

        let (face, sc, tc, ma) = if rx >= ry && rx >= rz {
            if r.x >= 0.0 {
                (Face::PX, -r.z, -r.y, rx)
            } else {
                (Face::NX,  r.z, -r.y, rx)
            }
        } else if ry >= rx && ry >= rz {
            if r.y >= 0.0 {
                (Face::PY,  r.x,  r.z, ry)
            } else {
                (Face::NY,  r.x, -r.z, ry)
            }
        } else if r.z >= 0.0 {
            (Face::PZ,  r.x, -r.y, rz)
        } else {
            (Face::NZ, -r.x, -r.y, rz)
        };

        // ma is guaranteed to be >= |sc| and |tc|
        Address {
            face,
            s: (sc / ma + 1.0) * 0.5,
            t: (tc / ma + 1.0) * 0.5,
        }
    }

    /// Nearest texel of an address, clamped so that s or t of 1.0 stays on the face.
    #[inline]
    pub fn texel_for(&self, address: &Address) -> (usize, usize) {
        let dim = self.dimension as f64;
        let x = (address.s * dim).min(self.upper_bound) as usize;
        let y = (address.t * dim).min(self.upper_bound) as usize;
        (x, y)
    }
}

/// Six square face planes sharing one dimension.
///
/// The cubemap never owns face pixels when built from a decoded container:
/// faces alias the container's buffers, which must outlive the cubemap.
pub struct Cubemap<'a> {
    geometry: CubeGeometry,
    faces: [ImagePlane<'a>; 6],
}

impl<'a> Cubemap<'a> {
    pub fn new(dimension: usize) -> Self {
        Self {
            geometry: CubeGeometry::new(dimension),
            faces: Default::default(),
        }
    }

    /// A cubemap whose six faces are owned, zeroed planes.
    pub fn new_owned(dimension: usize) -> Self {
        let mut cubemap = Self::new(dimension);
        for face in Face::ALL {
            cubemap.set_face(face, ImagePlane::create(dimension, dimension, 0));
        }
        cubemap
    }

    /// Change the dimension. Every face is cleared and must be set again before use.
    pub fn resize(&mut self, dimension: usize) {
        self.geometry = CubeGeometry::new(dimension);
        for face in self.faces.iter_mut() {
            face.reset();
        }
    }

    pub fn set_face(&mut self, face: Face, image: ImagePlane<'a>) {
        debug_assert!(
            image.width() == self.dimension() && image.height() == self.dimension(),
            "Face {} is {}x{}, expected {}x{}!", face, image.width(), image.height(), self.dimension(), self.dimension()
        );

        self.faces[face.index()] = image;
    }

    #[inline]
    pub fn face(&self, face: Face) -> &ImagePlane<'a> {
        &self.faces[face.index()]
    }

    #[inline]
    pub fn face_mut(&mut self, face: Face) -> &mut ImagePlane<'a> {
        &mut self.faces[face.index()]
    }

    pub fn faces(&self) -> impl Iterator<Item = (Face, &ImagePlane<'a>)> + '_ {
        Face::ALL.into_iter().zip(self.faces.iter())
    }

    pub fn faces_mut(&mut self) -> impl Iterator<Item = (Face, &mut ImagePlane<'a>)> + '_ {
        Face::ALL.into_iter().zip(self.faces.iter_mut())
    }

    /// Every face is populated with a `dimension` x `dimension` plane.
    pub fn is_complete(&self) -> bool {
        self.faces.iter().all(|face| {
            face.is_valid() && face.width() == self.dimension() && face.height() == self.dimension()
        })
    }

    #[inline]
    pub fn geometry(&self) -> &CubeGeometry {
        &self.geometry
    }

    #[inline]
    pub fn dimension(&self) -> usize {
        self.geometry.dimension()
    }

    #[inline]
    pub fn direction_for(&self, face: Face, x: usize, y: usize) -> DVec3 {
        self.geometry.direction_for(face, x, y)
    }

    #[inline]
    pub fn direction_at(&self, face: Face, x: f64, y: f64) -> DVec3 {
        self.geometry.direction_at(face, x, y)
    }

    #[inline]
    pub fn address_for(direction: DVec3) -> Address {
        CubeGeometry::address_for(direction)
    }

    /// Nearest texel in `direction`.
    pub fn sample_at(&self, direction: DVec3) -> Vec3 {
        let address = CubeGeometry::address_for(direction);
        let (x, y) = self.geometry.texel_for(&address);
        self.face(address.face).texel(x, y)
    }
}
