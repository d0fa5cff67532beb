//! Static byte-layout knowledge for every supported pixel format.

/// Color model a format stores its channels in. Sampling only copies between
/// formats of the same family; the engine declines cross-family pairs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatFamily {
    Yuv,
    Rgb,
}

/// Byte layout of a packed (single-plane, interleaved) format.
///
/// `channels` holds the byte offset of each color channel within one pixel,
/// in family order: Y,U,V for [`FormatFamily::Yuv`], R,G,B for
/// [`FormatFamily::Rgb`]. `pad` marks a don't-care byte (the `x` in e.g.
/// xRGB) that is written as 0xFF.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PackedLayout {
    pub bytes_per_pixel: usize,
    pub alpha: Option<usize>,
    pub pad: Option<usize>,
    pub channels: [usize; 3],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum PixelFormat {
    /// Planar 4:2:0 YUV: full-resolution luma plane, then quarter-size U and
    /// V planes.
    I420,
    /// Packed 4:4:4 YUV with alpha, one A,Y,U,V quad per pixel.
    Ayuv,
    Argb,
    Abgr,
    Bgra,
    Rgba,
    /// Like ARGB with the alpha byte unused.
    Xrgb,
    Xbgr,
    Rgbx,
    Bgrx,
    /// Packed 24-bit B,G,R.
    Bgr,
}

// Strides follow the 4-byte row alignment raw video buffers conventionally
// carry for planar layouts.
fn round_up_2(v: usize) -> usize {
    v.div_ceil(2) * 2
}

fn round_up_4(v: usize) -> usize {
    v.div_ceil(4) * 4
}

impl PixelFormat {
    pub fn family(self) -> FormatFamily {
        match self {
            Self::I420 | Self::Ayuv => FormatFamily::Yuv,
            _ => FormatFamily::Rgb,
        }
    }

    pub fn plane_count(self) -> usize {
        match self {
            Self::I420 => 3,
            _ => 1,
        }
    }

    /// Chroma subsampling shift: source/destination coordinates are divided
    /// by `2^shift` when addressing chroma planes.
    pub fn chroma_shift(self) -> u32 {
        match self {
            Self::I420 => 1,
            _ => 0,
        }
    }

    pub fn packed_layout(self) -> Option<PackedLayout> {
        let layout = match self {
            Self::I420 => return None,
            Self::Ayuv => PackedLayout {
                bytes_per_pixel: 4,
                alpha: Some(0),
                pad: None,
                channels: [1, 2, 3],
            },
            Self::Argb => PackedLayout {
                bytes_per_pixel: 4,
                alpha: Some(0),
                pad: None,
                channels: [1, 2, 3],
            },
            Self::Abgr => PackedLayout {
                bytes_per_pixel: 4,
                alpha: Some(0),
                pad: None,
                channels: [3, 2, 1],
            },
            Self::Bgra => PackedLayout {
                bytes_per_pixel: 4,
                alpha: Some(3),
                pad: None,
                channels: [2, 1, 0],
            },
            Self::Rgba => PackedLayout {
                bytes_per_pixel: 4,
                alpha: Some(3),
                pad: None,
                channels: [0, 1, 2],
            },
            Self::Xrgb => PackedLayout {
                bytes_per_pixel: 4,
                alpha: None,
                pad: Some(0),
                channels: [1, 2, 3],
            },
            Self::Xbgr => PackedLayout {
                bytes_per_pixel: 4,
                alpha: None,
                pad: Some(0),
                channels: [3, 2, 1],
            },
            Self::Rgbx => PackedLayout {
                bytes_per_pixel: 4,
                alpha: None,
                pad: Some(3),
                channels: [0, 1, 2],
            },
            Self::Bgrx => PackedLayout {
                bytes_per_pixel: 4,
                alpha: None,
                pad: Some(3),
                channels: [2, 1, 0],
            },
            Self::Bgr => PackedLayout {
                bytes_per_pixel: 3,
                alpha: None,
                pad: None,
                channels: [2, 1, 0],
            },
        };
        Some(layout)
    }

    /// Row stride in bytes for the given plane at the given image width.
    pub fn stride(self, plane: usize, width: usize) -> usize {
        match self {
            Self::I420 => {
                if plane == 0 {
                    round_up_4(width)
                } else {
                    round_up_4(round_up_2(width) / 2)
                }
            }
            _ => {
                let bpp = self
                    .packed_layout()
                    .map(|l| l.bytes_per_pixel)
                    .unwrap_or(0);
                width * bpp
            }
        }
    }

    /// Byte offset of the given plane from the start of the frame buffer.
    pub fn plane_offset(self, plane: usize, width: usize, height: usize) -> usize {
        match self {
            Self::I420 => {
                let luma = self.stride(0, width) * round_up_2(height);
                let chroma = self.stride(1, width) * (round_up_2(height) / 2);
                match plane {
                    0 => 0,
                    1 => luma,
                    _ => luma + chroma,
                }
            }
            _ => 0,
        }
    }

    /// Total buffer size in bytes for a frame of the given dimensions.
    pub fn frame_size(self, width: usize, height: usize) -> usize {
        match self {
            Self::I420 => {
                self.plane_offset(2, width, height) + self.stride(2, width) * (round_up_2(height) / 2)
            }
            _ => self.stride(0, width) * height,
        }
    }
}
