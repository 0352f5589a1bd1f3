use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DdsError {
    #[error("File is too short to be a DDS file ({0} bytes)!")]
    TooShort(usize),

    #[error("Bad DDS magic number {0:#010x}!")]
    BadMagic(u32),

    #[error("Bad DDS header size {0}, expected 124!")]
    BadHeaderSize(u32),

    #[error("DDS file has no DX10 extension header!")]
    NotDx10,

    #[error("Given cubemap format must be DXGI_FORMAT_R32G32B32_FLOAT, found DXGI format {0}!")]
    UnsupportedFormat(u32),

    #[error("DDS texture is not a cubemap!")]
    NotCubemap,

    #[error("Cubemap faces must be square, found {width}x{height}!")]
    NotSquare { width: u32, height: u32 },

    #[error("Cubemap arrays are not supported (array size {0})!")]
    UnsupportedArraySize(u32),

    #[error("DDS file declares {mip_count} mip levels, a {max} level chain is the most its size allows!")]
    TooManyMips { mip_count: usize, max: usize },

    #[error("DDS cubemap of {dimension}x{dimension} with {mip_count} mip level(s) is too large!")]
    SizeOverflow { dimension: usize, mip_count: usize },

    #[error("DDS payload is truncated: {actual} bytes, expected {expected}!")]
    Truncated { expected: usize, actual: usize },
}

#[derive(Debug, Error)]
pub enum ShJsonError {
    #[error("Failed to parse SH coefficients: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Expected 9 SH coefficients, found {0}!")]
    CoefficientCount(usize),

    #[error("SH coefficient {index} must be 3 numbers!")]
    BadCoefficient { index: usize },
}
