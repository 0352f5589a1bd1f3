//! DDS container for `DXGI_FORMAT_R32G32B32_FLOAT` cubemaps.
//!
//! ```text
//! | "DDS " | DDS_HEADER (124) | DDS_HEADER_DXT10 (20) | PX mips | NX mips | PY mips | NY mips | PZ mips | NZ mips |
//! ```

use byteorder::{ByteOrder, LittleEndian};

use raven_ibl::{Cubemap, Face, ImagePlane, TEXEL_SIZE};

use crate::DdsError;

const DDS_MAGIC: u32 = 0x2053_4444; // "DDS "
const DX10_FOURCC: u32 = 0x3031_5844; // "DX10"
pub const DXGI_FORMAT_R32G32B32_FLOAT: u32 = 6;

const HEADER_SIZE: u32 = 124;
const PIXEL_FORMAT_SIZE: u32 = 32;
const PAYLOAD_OFFSET: usize = 4 + HEADER_SIZE as usize + 20;

// byte offsets from the start of the file
const OFFSET_HEADER_SIZE: usize = 4;
const OFFSET_FLAGS: usize = 8;
const OFFSET_HEIGHT: usize = 12;
const OFFSET_WIDTH: usize = 16;
const OFFSET_PITCH: usize = 20;
const OFFSET_MIP_COUNT: usize = 28;
const OFFSET_PF_SIZE: usize = 76;
const OFFSET_PF_FLAGS: usize = 80;
const OFFSET_PF_FOURCC: usize = 84;
const OFFSET_CAPS: usize = 108;
const OFFSET_CAPS2: usize = 112;
const OFFSET_DXGI_FORMAT: usize = 128;
const OFFSET_RESOURCE_DIMENSION: usize = 132;
const OFFSET_MISC_FLAG: usize = 136;
const OFFSET_ARRAY_SIZE: usize = 140;

const DDSD_CAPS: u32 = 0x1;
const DDSD_HEIGHT: u32 = 0x2;
const DDSD_WIDTH: u32 = 0x4;
const DDSD_PITCH: u32 = 0x8;
const DDSD_PIXELFORMAT: u32 = 0x1000;
const DDSD_MIPMAPCOUNT: u32 = 0x20000;
const DDPF_FOURCC: u32 = 0x4;
const DDSCAPS_COMPLEX: u32 = 0x8;
const DDSCAPS_TEXTURE: u32 = 0x1000;
const DDSCAPS2_CUBEMAP: u32 = 0x200;
const DDSCAPS2_CUBEMAP_ALLFACES: u32 = 0xFC00;
const RESOURCE_DIMENSION_TEXTURE2D: u32 = 3;
const RESOURCE_MISC_TEXTURECUBE: u32 = 0x4;

/// A decoded cube texture. Only mip 0 of each face is exposed, the rest of the
/// file is kept untouched so that saving reproduces it.
#[derive(Debug, Clone)]
pub struct DdsCubemap {
    bytes: Vec<u8>,
    dimension: usize,
    mip_count: usize,
    face_stride: usize,
}

#[inline]
fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    LittleEndian::read_u32(&bytes[offset..offset + 4])
}

#[inline]
fn write_u32(bytes: &mut [u8], offset: usize, value: u32) {
    LittleEndian::write_u32(&mut bytes[offset..offset + 4], value);
}

/// Number of levels of a full mip chain, `floor(log2(dimension)) + 1`.
#[inline]
fn max_mip_count(dimension: usize) -> usize {
    (usize::BITS - dimension.leading_zeros()) as usize
}

/// Bytes of one face including its whole mip chain, `None` on overflow.
/// `mip_count` must not exceed [`max_mip_count`].
fn face_stride(dimension: usize, mip_count: usize) -> Option<usize> {
    (0..mip_count)
        .map(|level| (dimension >> level).max(1))
        .try_fold(0usize, |sum, d| {
            d.checked_mul(d)?.checked_mul(TEXEL_SIZE)?.checked_add(sum)
        })
}

/// Size of the whole file, `None` on overflow.
fn file_size(face_stride: usize) -> Option<usize> {
    face_stride.checked_mul(Face::COUNT)?.checked_add(PAYLOAD_OFFSET)
}

impl DdsCubemap {
    /// A fresh single-mip cube with every texel zeroed.
    pub fn new(dimension: usize) -> Self {
        let face_stride = face_stride(dimension, 1)
            .unwrap_or_else(|| panic!("Cubemap dimension {} is too large!", dimension));
        let size = file_size(face_stride)
            .unwrap_or_else(|| panic!("Cubemap dimension {} is too large!", dimension));
        let mut bytes = vec![0u8; size];

        write_u32(&mut bytes, 0, DDS_MAGIC);
        write_u32(&mut bytes, OFFSET_HEADER_SIZE, HEADER_SIZE);
        write_u32(&mut bytes, OFFSET_FLAGS, DDSD_CAPS | DDSD_HEIGHT | DDSD_WIDTH | DDSD_PITCH | DDSD_PIXELFORMAT | DDSD_MIPMAPCOUNT);
        write_u32(&mut bytes, OFFSET_HEIGHT, dimension as u32);
        write_u32(&mut bytes, OFFSET_WIDTH, dimension as u32);
        write_u32(&mut bytes, OFFSET_PITCH, (dimension * TEXEL_SIZE) as u32);
        write_u32(&mut bytes, OFFSET_MIP_COUNT, 1);
        write_u32(&mut bytes, OFFSET_PF_SIZE, PIXEL_FORMAT_SIZE);
        write_u32(&mut bytes, OFFSET_PF_FLAGS, DDPF_FOURCC);
        write_u32(&mut bytes, OFFSET_PF_FOURCC, DX10_FOURCC);
        write_u32(&mut bytes, OFFSET_CAPS, DDSCAPS_TEXTURE | DDSCAPS_COMPLEX);
        write_u32(&mut bytes, OFFSET_CAPS2, DDSCAPS2_CUBEMAP | DDSCAPS2_CUBEMAP_ALLFACES);
        write_u32(&mut bytes, OFFSET_DXGI_FORMAT, DXGI_FORMAT_R32G32B32_FLOAT);
        write_u32(&mut bytes, OFFSET_RESOURCE_DIMENSION, RESOURCE_DIMENSION_TEXTURE2D);
        write_u32(&mut bytes, OFFSET_MISC_FLAG, RESOURCE_MISC_TEXTURECUBE);
        write_u32(&mut bytes, OFFSET_ARRAY_SIZE, 1);

        Self {
            bytes,
            dimension,
            mip_count: 1,
            face_stride,
        }
    }

    /// Validate and copy a DDS file.
    pub fn parse(bytes: &[u8]) -> Result<Self, DdsError> {
        if bytes.len() < PAYLOAD_OFFSET {
            // a short foreign file is reported by its magic
            if bytes.len() >= 4 && read_u32(bytes, 0) != DDS_MAGIC {
                return Err(DdsError::BadMagic(read_u32(bytes, 0)));
            }
            return Err(DdsError::TooShort(bytes.len()));
        }

        let magic = read_u32(bytes, 0);
        if magic != DDS_MAGIC {
            return Err(DdsError::BadMagic(magic));
        }

        let header_size = read_u32(bytes, OFFSET_HEADER_SIZE);
        if header_size != HEADER_SIZE {
            return Err(DdsError::BadHeaderSize(header_size));
        }

        if read_u32(bytes, OFFSET_PF_FLAGS) & DDPF_FOURCC == 0 || read_u32(bytes, OFFSET_PF_FOURCC) != DX10_FOURCC {
            return Err(DdsError::NotDx10);
        }

        let format = read_u32(bytes, OFFSET_DXGI_FORMAT);
        if format != DXGI_FORMAT_R32G32B32_FLOAT {
            return Err(DdsError::UnsupportedFormat(format));
        }

        let caps2 = read_u32(bytes, OFFSET_CAPS2);
        let cube_in_caps = caps2 & DDSCAPS2_CUBEMAP != 0 && caps2 & DDSCAPS2_CUBEMAP_ALLFACES == DDSCAPS2_CUBEMAP_ALLFACES;
        let cube_in_misc = read_u32(bytes, OFFSET_MISC_FLAG) & RESOURCE_MISC_TEXTURECUBE != 0;
        if read_u32(bytes, OFFSET_RESOURCE_DIMENSION) != RESOURCE_DIMENSION_TEXTURE2D || !(cube_in_caps || cube_in_misc) {
            return Err(DdsError::NotCubemap);
        }

        let width = read_u32(bytes, OFFSET_WIDTH);
        let height = read_u32(bytes, OFFSET_HEIGHT);
        if width != height || width == 0 {
            return Err(DdsError::NotSquare { width, height });
        }

        let array_size = read_u32(bytes, OFFSET_ARRAY_SIZE);
        if array_size != 1 {
            return Err(DdsError::UnsupportedArraySize(array_size));
        }

        let dimension = width as usize;
        let mip_count = if read_u32(bytes, OFFSET_FLAGS) & DDSD_MIPMAPCOUNT != 0 {
            (read_u32(bytes, OFFSET_MIP_COUNT) as usize).max(1)
        } else {
            1
        };

        let max_mips = max_mip_count(dimension);
        if mip_count > max_mips {
            return Err(DdsError::TooManyMips { mip_count, max: max_mips });
        }

        let face_stride = face_stride(dimension, mip_count)
            .ok_or(DdsError::SizeOverflow { dimension, mip_count })?;
        let expected = file_size(face_stride)
            .ok_or(DdsError::SizeOverflow { dimension, mip_count })?;
        if bytes.len() < expected {
            return Err(DdsError::Truncated { expected, actual: bytes.len() });
        }

        log::debug!("DDS cubemap {}x{} with {} mip level(s)", dimension, dimension, mip_count);

        Ok(Self {
            bytes: bytes.to_vec(),
            dimension,
            mip_count,
            face_stride,
        })
    }

    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    #[inline]
    pub fn mip_count(&self) -> usize {
        self.mip_count
    }

    /// The whole file, header and every mip level included.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Mip 0 of `face`, tightly packed.
    pub fn face_bytes(&self, face: Face) -> &[u8] {
        let start = self.face_offset(face);
        &self.bytes[start..start + self.face_size()]
    }

    /// Read-only cubemap whose faces alias mip 0 of this container.
    pub fn cubemap(&self) -> Cubemap<'_> {
        let mut cubemap = Cubemap::new(self.dimension);
        for face in Face::ALL {
            cubemap.set_face(face, ImagePlane::wrap(self.face_bytes(face), self.dimension, self.dimension));
        }
        cubemap
    }

    /// Writable cubemap whose faces alias mip 0 of this container.
    pub fn cubemap_mut(&mut self) -> Cubemap<'_> {
        let dimension = self.dimension;
        let face_size = self.face_size();
        let stride = self.face_stride;

        let mut cubemap = Cubemap::new(dimension);
        let payload = &mut self.bytes[PAYLOAD_OFFSET..];
        for (face, chunk) in Face::ALL.into_iter().zip(payload.chunks_exact_mut(stride)) {
            cubemap.set_face(face, ImagePlane::wrap_mut(&mut chunk[..face_size], dimension, dimension));
        }
        cubemap
    }

    #[inline]
    fn face_size(&self) -> usize {
        self.dimension * self.dimension * TEXEL_SIZE
    }

    #[inline]
    fn face_offset(&self, face: Face) -> usize {
        PAYLOAD_OFFSET + face.index() * self.face_stride
    }
}
