//! Raster frame containers: an owned buffer plus borrowed read/write views.

use crate::{
    error::{ZoompanError, ZoompanResult},
    format::PixelFormat,
};

fn check_dims(format: PixelFormat, width: usize, height: usize, len: usize) -> ZoompanResult<()> {
    if width == 0 || height == 0 {
        return Err(ZoompanError::frame("frame dimensions must be non-zero"));
    }
    let need = format.frame_size(width, height);
    if len < need {
        return Err(ZoompanError::frame(format!(
            "buffer too small for {format:?} {width}x{height}: have {len} bytes, need {need}"
        )));
    }
    Ok(())
}

/// A frame that owns its storage. Buffers start zeroed.
#[derive(Clone, Debug)]
pub struct Frame {
    format: PixelFormat,
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl Frame {
    pub fn new(format: PixelFormat, width: usize, height: usize) -> ZoompanResult<Self> {
        if width == 0 || height == 0 {
            return Err(ZoompanError::frame("frame dimensions must be non-zero"));
        }
        Ok(Self {
            format,
            width,
            height,
            data: vec![0; format.frame_size(width, height)],
        })
    }

    pub fn from_vec(
        format: PixelFormat,
        width: usize,
        height: usize,
        data: Vec<u8>,
    ) -> ZoompanResult<Self> {
        check_dims(format, width, height, data.len())?;
        Ok(Self {
            format,
            width,
            height,
            data,
        })
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    pub fn as_ref(&self) -> FrameRef<'_> {
        FrameRef {
            format: self.format,
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }

    pub fn as_mut(&mut self) -> FrameRefMut<'_> {
        FrameRefMut {
            format: self.format,
            width: self.width,
            height: self.height,
            data: &mut self.data,
        }
    }
}

/// Read-only view over caller-owned frame bytes.
#[derive(Clone, Copy, Debug)]
pub struct FrameRef<'a> {
    format: PixelFormat,
    width: usize,
    height: usize,
    data: &'a [u8],
}

impl<'a> FrameRef<'a> {
    pub fn new(
        format: PixelFormat,
        width: usize,
        height: usize,
        data: &'a [u8],
    ) -> ZoompanResult<Self> {
        check_dims(format, width, height, data.len())?;
        Ok(Self {
            format,
            width,
            height,
            data,
        })
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
    }
}

/// Mutable view over caller-owned frame bytes; the transform overwrites every
/// pixel it owns.
#[derive(Debug)]
pub struct FrameRefMut<'a> {
    format: PixelFormat,
    width: usize,
    height: usize,
    data: &'a mut [u8],
}

impl<'a> FrameRefMut<'a> {
    pub fn new(
        format: PixelFormat,
        width: usize,
        height: usize,
        data: &'a mut [u8],
    ) -> ZoompanResult<Self> {
        check_dims(format, width, height, data.len())?;
        Ok(Self {
            format,
            width,
            height,
            data,
        })
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn data(&mut self) -> &mut [u8] {
        self.data
    }
}
