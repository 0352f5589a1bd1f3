use byteorder::{ByteOrder, LittleEndian};

use raven_math::Vec3;

/// Size in bytes of one texel (three 32-bit floats).
pub const TEXEL_SIZE: usize = std::mem::size_of::<[f32; 3]>();

/// Backing storage of an [`ImagePlane`].
///
/// Only the `Owned` variant frees memory on drop. Borrowed variants alias a buffer
/// owned elsewhere (a decoded container, or the parent plane of a subset).
enum PlaneData<'a> {
    Empty,
    Owned(Box<[u8]>),
    Borrowed(&'a [u8]),
    BorrowedMut(&'a mut [u8]),
}

/// One face of a cubemap: a 2D grid of RGB f32 texels with an arbitrary row pitch.
pub struct ImagePlane<'a> {
    width: usize,
    height: usize,
    bytes_per_row: usize,
    data: PlaneData<'a>,
}

impl<'a> Default for ImagePlane<'a> {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            bytes_per_row: 0,
            data: PlaneData::Empty,
        }
    }
}

impl<'a> ImagePlane<'a> {
    /// An empty, invalid plane.
    pub fn new() -> Self {
        Default::default()
    }

    /// Allocate an owned, zeroed plane. `stride` is in texels, zero means tightly packed.
    pub fn create(width: usize, height: usize, stride: usize) -> Self {
        let bytes_per_row = (if stride > 0 { stride } else { width }) * TEXEL_SIZE;
        assert!(bytes_per_row >= width * TEXEL_SIZE, "Stride {} is smaller than width {}!", stride, width);

        Self {
            width,
            height,
            bytes_per_row,
            data: PlaneData::Owned(vec![0u8; bytes_per_row * height].into_boxed_slice()),
        }
    }

    /// Alias a tightly packed, read-only external buffer.
    pub fn wrap(data: &'a [u8], width: usize, height: usize) -> Self {
        let bytes_per_row = width * TEXEL_SIZE;
        assert!(data.len() >= bytes_per_row * height, "Buffer too small for a {}x{} plane!", width, height);

        Self {
            width,
            height,
            bytes_per_row,
            data: PlaneData::Borrowed(data),
        }
    }

    /// Alias a tightly packed, writable external buffer.
    pub fn wrap_mut(data: &'a mut [u8], width: usize, height: usize) -> Self {
        let bytes_per_row = width * TEXEL_SIZE;
        assert!(data.len() >= bytes_per_row * height, "Buffer too small for a {}x{} plane!", width, height);

        Self {
            width,
            height,
            bytes_per_row,
            data: PlaneData::BorrowedMut(data),
        }
    }

    /// Read-only window into this plane. The row pitch of the parent is kept.
    pub fn subset(&self, x: usize, y: usize, w: usize, h: usize) -> ImagePlane<'_> {
        let range = self.window_range(x, y, w, h);

        ImagePlane {
            width: w,
            height: h,
            bytes_per_row: self.bytes_per_row,
            data: PlaneData::Borrowed(&self.data()[range]),
        }
    }

    /// Writable window into this plane. The row pitch of the parent is kept.
    pub fn subset_mut(&mut self, x: usize, y: usize, w: usize, h: usize) -> ImagePlane<'_> {
        let range = self.window_range(x, y, w, h);
        let bytes_per_row = self.bytes_per_row;

        ImagePlane {
            width: w,
            height: h,
            bytes_per_row,
            data: PlaneData::BorrowedMut(&mut self.data_mut()[range]),
        }
    }

    /// Drop any owned storage and become an empty plane.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn is_valid(&self) -> bool {
        !matches!(self.data, PlaneData::Empty)
    }

    pub fn is_writable(&self) -> bool {
        matches!(self.data, PlaneData::Owned(_) | PlaneData::BorrowedMut(_))
    }

    pub fn owns_data(&self) -> bool {
        matches!(self.data, PlaneData::Owned(_))
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn bytes_per_row(&self) -> usize {
        self.bytes_per_row
    }

    #[inline]
    pub fn bytes_per_pixel(&self) -> usize {
        TEXEL_SIZE
    }

    pub fn data(&self) -> &[u8] {
        match &self.data {
            PlaneData::Empty => &[],
            PlaneData::Owned(bytes) => &bytes[..],
            PlaneData::Borrowed(bytes) => &bytes[..],
            PlaneData::BorrowedMut(bytes) => &bytes[..],
        }
    }

    /// Panics if the plane aliases read-only memory.
    pub fn data_mut(&mut self) -> &mut [u8] {
        match &mut self.data {
            PlaneData::Empty => &mut [],
            PlaneData::Owned(bytes) => &mut bytes[..],
            PlaneData::BorrowedMut(bytes) => &mut bytes[..],
            PlaneData::Borrowed(_) => panic!("Trying to write into a read-only image plane!"),
        }
    }

    /// Byte offset of texel (x, y). Not bounds checked against width and height.
    #[inline]
    pub fn pixel_ref(&self, x: usize, y: usize) -> usize {
        y * self.bytes_per_row + x * TEXEL_SIZE
    }

    #[inline]
    pub fn texel(&self, x: usize, y: usize) -> Vec3 {
        let offset = self.pixel_ref(x, y);
        read_texel(&self.data()[offset..offset + TEXEL_SIZE])
    }

    #[inline]
    pub fn write_texel(&mut self, x: usize, y: usize, texel: Vec3) {
        let offset = self.pixel_ref(x, y);
        write_texel(&mut self.data_mut()[offset..offset + TEXEL_SIZE], texel);
    }

    /// The `width` texels of row `y`, skipping any row padding.
    pub fn row(&self, y: usize) -> &[u8] {
        let offset = self.pixel_ref(0, y);
        &self.data()[offset..offset + self.width * TEXEL_SIZE]
    }

    pub fn row_mut(&mut self, y: usize) -> &mut [u8] {
        let offset = self.pixel_ref(0, y);
        let len = self.width * TEXEL_SIZE;
        &mut self.data_mut()[offset..offset + len]
    }

    /// Set every texel to `texel`.
    pub fn fill(&mut self, texel: Vec3) {
        for y in 0..self.height {
            for chunk in self.row_mut(y).chunks_exact_mut(TEXEL_SIZE) {
                write_texel(chunk, texel);
            }
        }
    }

    fn window_range(&self, x: usize, y: usize, w: usize, h: usize) -> std::ops::Range<usize> {
        assert!(x + w <= self.width && y + h <= self.height,
            "Subset [{}, {}, {}, {}] is outside of a {}x{} plane!", x, y, w, h, self.width, self.height);

        let start = self.pixel_ref(x, y);
        let len = if h == 0 { 0 } else { (h - 1) * self.bytes_per_row + w * TEXEL_SIZE };
        start..start + len
    }
}

/// Decode one little-endian RGB f32 texel.
#[inline]
pub fn read_texel(bytes: &[u8]) -> Vec3 {
    Vec3::new(
        LittleEndian::read_f32(&bytes[0..4]),
        LittleEndian::read_f32(&bytes[4..8]),
        LittleEndian::read_f32(&bytes[8..12]),
    )
}

/// Encode one little-endian RGB f32 texel.
#[inline]
pub fn write_texel(bytes: &mut [u8], texel: Vec3) {
    LittleEndian::write_f32(&mut bytes[0..4], texel.x);
    LittleEndian::write_f32(&mut bytes[4..8], texel.y);
    LittleEndian::write_f32(&mut bytes[8..12], texel.z);
}
