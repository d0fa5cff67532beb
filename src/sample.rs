//! Per-pixel fetch/store across the supported byte layouts, with background
//! fill for missed pixels.

use crate::{
    error::{ZoompanError, ZoompanResult},
    format::{FormatFamily, PackedLayout, PixelFormat},
};

/// One pixel in family channel order: Y,U,V for YUV formats, R,G,B for RGB
/// formats. `a` is 0xFF when the source format has no alpha.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChannelPixel {
    pub a: u8,
    pub c0: u8,
    pub c1: u8,
    pub c2: u8,
}

fn clamp_u8(v: i32) -> u8 {
    v.clamp(0, 255) as u8
}

// Fixed BT.601-derived integer coefficients, per-term >>16 before summing.
pub fn bt601_y(r: u8, g: u8, b: u8) -> u8 {
    let (r, g, b) = (i32::from(r), i32::from(g), i32::from(b));
    clamp_u8(((19595 * r) >> 16) + ((38470 * g) >> 16) + ((7471 * b) >> 16))
}

pub fn bt601_u(r: u8, g: u8, b: u8) -> u8 {
    let (r, g, b) = (i32::from(r), i32::from(g), i32::from(b));
    clamp_u8(-((11059 * r) >> 16) - ((21709 * g) >> 16) + ((32768 * b) >> 16) + 128)
}

pub fn bt601_v(r: u8, g: u8, b: u8) -> u8 {
    let (r, g, b) = (i32::from(r), i32::from(g), i32::from(b));
    clamp_u8(((32768 * r) >> 16) - ((27439 * g) >> 16) - ((5329 * b) >> 16) + 128)
}

/// Cached layout state for one (source format, destination format) pair.
///
/// Construction fails when the formats store different color models; the
/// engine surfaces that as a declined frame before touching the output.
#[derive(Clone, Copy, Debug)]
pub struct Sampler {
    src_fmt: PixelFormat,
    dst_fmt: PixelFormat,
    src_w: usize,
    src_h: usize,
    dst_w: usize,
    dst_h: usize,
    border: i64,
    bg: ChannelPixel,

    src_packed: Option<PackedLayout>,
    dst_packed: Option<PackedLayout>,
    src_stride: usize,
    dst_stride: usize,
    src_stride_c: usize,
    dst_stride_c: usize,
    src_off_u: usize,
    src_off_v: usize,
    dst_off_u: usize,
    dst_off_v: usize,
}

impl Sampler {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        src_fmt: PixelFormat,
        src_w: usize,
        src_h: usize,
        dst_fmt: PixelFormat,
        dst_w: usize,
        dst_h: usize,
        bgcolor_argb: (u8, u8, u8, u8),
        border: u32,
    ) -> ZoompanResult<Self> {
        if src_fmt.family() != dst_fmt.family() {
            return Err(ZoompanError::UnsupportedFormats {
                src: src_fmt,
                dst: dst_fmt,
            });
        }

        let (a, r, g, b) = bgcolor_argb;
        // The background is the only pixel that crosses color spaces; hits
        // are copied without conversion.
        let bg = match dst_fmt.family() {
            FormatFamily::Yuv => ChannelPixel {
                a,
                c0: bt601_y(r, g, b),
                c1: bt601_u(r, g, b),
                c2: bt601_v(r, g, b),
            },
            FormatFamily::Rgb => ChannelPixel { a, c0: r, c1: g, c2: b },
        };

        Ok(Self {
            src_fmt,
            dst_fmt,
            src_w,
            src_h,
            dst_w,
            dst_h,
            border: i64::from(border),
            bg,
            src_packed: src_fmt.packed_layout(),
            dst_packed: dst_fmt.packed_layout(),
            src_stride: src_fmt.stride(0, src_w),
            dst_stride: dst_fmt.stride(0, dst_w),
            src_stride_c: src_fmt.stride(1, src_w),
            dst_stride_c: dst_fmt.stride(1, dst_w),
            src_off_u: src_fmt.plane_offset(1, src_w, src_h),
            src_off_v: src_fmt.plane_offset(2, src_w, src_h),
            dst_off_u: dst_fmt.plane_offset(1, dst_w, dst_h),
            dst_off_v: dst_fmt.plane_offset(2, dst_w, dst_h),
        })
    }

    pub fn background(&self) -> ChannelPixel {
        self.bg
    }

    /// Single source of truth for "this destination pixel gets background":
    /// projected coordinate off the source raster, or destination coordinate
    /// inside the border margin.
    pub fn is_miss(&self, xsrc: i64, ysrc: i64, xdst: usize, ydst: usize) -> bool {
        let (xdst, ydst) = (xdst as i64, ydst as i64);
        xsrc < 0
            || xsrc >= self.src_w as i64
            || ysrc < 0
            || ysrc >= self.src_h as i64
            || xdst < self.border
            || xdst >= self.dst_w as i64 - self.border
            || ydst < self.border
            || ydst >= self.dst_h as i64 - self.border
    }

    /// Writes one destination pixel: the source pixel on a hit, the
    /// converted background on a miss. No source byte is read on a miss.
    pub fn sample(
        &self,
        src: &[u8],
        dst: &mut [u8],
        xsrc: i64,
        ysrc: i64,
        xdst: usize,
        ydst: usize,
    ) {
        if self.is_miss(xsrc, ysrc, xdst, ydst) {
            self.write_pixel(dst, xdst, ydst, self.bg);
            return;
        }
        let (xsrc, ysrc) = (xsrc as usize, ysrc as usize);

        // Identical packed layouts copy straight through.
        if self.src_fmt == self.dst_fmt
            && let Some(layout) = self.src_packed
        {
            let bpp = layout.bytes_per_pixel;
            let ps = xsrc * bpp + ysrc * self.src_stride;
            let pd = xdst * bpp + ydst * self.dst_stride;
            dst[pd..pd + bpp].copy_from_slice(&src[ps..ps + bpp]);
            return;
        }

        let px = self.read_pixel(src, xsrc, ysrc);
        self.write_pixel(dst, xdst, ydst, px);
    }

    fn read_pixel(&self, src: &[u8], x: usize, y: usize) -> ChannelPixel {
        match self.src_packed {
            Some(layout) => {
                let base = x * layout.bytes_per_pixel + y * self.src_stride;
                ChannelPixel {
                    a: layout.alpha.map_or(0xFF, |o| src[base + o]),
                    c0: src[base + layout.channels[0]],
                    c1: src[base + layout.channels[1]],
                    c2: src[base + layout.channels[2]],
                }
            }
            None => {
                let shift = self.src_fmt.chroma_shift();
                let pos_y = x + y * self.src_stride;
                let pos_c = (x >> shift) + (y >> shift) * self.src_stride_c;
                ChannelPixel {
                    a: 0xFF,
                    c0: src[pos_y],
                    c1: src[self.src_off_u + pos_c],
                    c2: src[self.src_off_v + pos_c],
                }
            }
        }
    }

    fn write_pixel(&self, dst: &mut [u8], x: usize, y: usize, px: ChannelPixel) {
        match self.dst_packed {
            Some(layout) => {
                let base = x * layout.bytes_per_pixel + y * self.dst_stride;
                if let Some(o) = layout.alpha {
                    dst[base + o] = px.a;
                }
                if let Some(o) = layout.pad {
                    dst[base + o] = 0xFF;
                }
                dst[base + layout.channels[0]] = px.c0;
                dst[base + layout.channels[1]] = px.c1;
                dst[base + layout.channels[2]] = px.c2;
            }
            None => {
                // Chroma lands at the subsampled offset; neighboring
                // destination pixels rewrite the same chroma byte.
                let shift = self.dst_fmt.chroma_shift();
                let pos_y = x + y * self.dst_stride;
                let pos_c = (x >> shift) + (y >> shift) * self.dst_stride_c;
                dst[pos_y] = px.c0;
                dst[self.dst_off_u + pos_c] = px.c1;
                dst[self.dst_off_v + pos_c] = px.c2;
            }
        }
    }
}
