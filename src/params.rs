//! Typed parameter structs for the two motion modes, with validation and the
//! derived crop-rectangle geometry.

use std::time::Duration;

use crate::{
    ease::PanMethod,
    error::{ZoompanError, ZoompanResult},
};

/// Simulated camera: viewport offset, zoom, three-axis rotation, field of
/// view, plus output border and background fill.
///
/// `xpos`/`ypos` are fractions of half the letterboxed source dimension;
/// `zpos` scales the visible source extent (1.0 = letterboxed fit, values
/// below 1 zoom in). Rotations and `fov` are in degrees. `bgcolor` is
/// ARGB-packed.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CameraParams {
    pub xpos: f64,
    pub ypos: f64,
    pub zpos: f64,
    pub xrot: f64,
    pub yrot: f64,
    pub zrot: f64,
    pub fov: f64,
    pub border: u32,
    pub bgcolor: u32,
}

impl Default for CameraParams {
    fn default() -> Self {
        Self {
            xpos: 0.0,
            ypos: 0.0,
            zpos: 1.0,
            xrot: 0.0,
            yrot: 0.0,
            zrot: 0.0,
            fov: 60.0,
            border: 0,
            bgcolor: 0x0000_0000,
        }
    }
}

impl CameraParams {
    pub fn validate(&self) -> ZoompanResult<()> {
        for (name, v) in [
            ("xpos", self.xpos),
            ("ypos", self.ypos),
            ("zpos", self.zpos),
            ("xrot", self.xrot),
            ("yrot", self.yrot),
            ("zrot", self.zrot),
            ("fov", self.fov),
        ] {
            if !v.is_finite() {
                return Err(ZoompanError::validation(format!("{name} must be finite")));
            }
        }
        if self.zpos <= 0.0 {
            return Err(ZoompanError::validation("zpos must be > 0"));
        }
        if self.fov <= 0.0 || self.fov >= 180.0 {
            return Err(ZoompanError::validation("fov must be in (0, 180) degrees"));
        }
        Ok(())
    }

    pub fn has_rotation(&self) -> bool {
        self.xrot != 0.0 || self.yrot != 0.0 || self.zrot != 0.0
    }

    /// Splits the ARGB-packed background color into (a, r, g, b) bytes.
    pub fn bgcolor_argb(&self) -> (u8, u8, u8, u8) {
        (
            (self.bgcolor >> 24) as u8,
            (self.bgcolor >> 16) as u8,
            (self.bgcolor >> 8) as u8,
            self.bgcolor as u8,
        )
    }
}

/// Duration-driven pan/zoom clip: start and end crop geometry interpolated
/// over `duration` under the selected timing curve.
///
/// Zooms are the fraction of the binding source dimension visible; centers
/// are fractions of the full source dimensions (0.5, 0.5 = image center).
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MotionClip {
    pub zoom_start: f64,
    pub zoom_end: f64,
    pub center_start: (f64, f64),
    pub center_end: (f64, f64),
    pub duration: Duration,
    pub pan_method: PanMethod,
    pub pan_accel: f64,
}

impl Default for MotionClip {
    fn default() -> Self {
        Self {
            zoom_start: 1.0,
            zoom_end: 1.0,
            center_start: (0.5, 0.5),
            center_end: (0.5, 0.5),
            duration: Duration::ZERO,
            pan_method: PanMethod::Linear,
            pan_accel: 0.0,
        }
    }
}

impl MotionClip {
    pub fn validate(&self) -> ZoompanResult<()> {
        for (name, v) in [
            ("zoom_start", self.zoom_start),
            ("zoom_end", self.zoom_end),
            ("xcenter_start", self.center_start.0),
            ("ycenter_start", self.center_start.1),
            ("xcenter_end", self.center_end.0),
            ("ycenter_end", self.center_end.1),
            ("pan_accel", self.pan_accel),
        ] {
            if !v.is_finite() {
                return Err(ZoompanError::validation(format!("{name} must be finite")));
            }
        }
        if self.zoom_start <= 0.0 || self.zoom_end <= 0.0 {
            return Err(ZoompanError::validation("zoom must be > 0"));
        }
        if !(0.0..=1.0).contains(&self.pan_accel) {
            return Err(ZoompanError::validation("pan_accel must be in [0, 1]"));
        }
        Ok(())
    }

    /// Eased progress through the clip at the given presentation time.
    /// Timestamps past the end clamp; a zero-duration clip sits at 0.
    pub fn progress(&self, pts: Duration) -> f64 {
        let t = if self.duration.is_zero() {
            0.0
        } else {
            pts.min(self.duration).as_secs_f64() / self.duration.as_secs_f64()
        };
        self.pan_method.apply(t, self.pan_accel)
    }

    /// Start and end crop rectangles in source pixel coordinates, each sized
    /// to the destination aspect ratio against the binding source dimension.
    pub fn crop_rects(
        &self,
        src_w: usize,
        src_h: usize,
        dst_w: usize,
        dst_h: usize,
    ) -> (CropRect, CropRect) {
        (
            CropRect::from_zoom_center(self.zoom_start, self.center_start, src_w, src_h, dst_w, dst_h),
            CropRect::from_zoom_center(self.zoom_end, self.center_end, src_w, src_h, dst_w, dst_h),
        )
    }
}

/// Axis-aligned source region mapped onto the full destination frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CropRect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl CropRect {
    pub fn from_zoom_center(
        zoom: f64,
        center: (f64, f64),
        src_w: usize,
        src_h: usize,
        dst_w: usize,
        dst_h: usize,
    ) -> Self {
        let src_ratio = src_w as f64 / src_h as f64;
        let dst_ratio = dst_w as f64 / dst_h as f64;
        // The dimension that limits a dst-aspect window inside the source is
        // the one the zoom fraction applies to.
        let (w, h) = if src_ratio > dst_ratio {
            let h = zoom * src_h as f64;
            (h * dst_ratio, h)
        } else {
            let w = zoom * src_w as f64;
            (w, w / dst_ratio)
        };
        let cx = center.0 * src_w as f64;
        let cy = center.1 * src_h as f64;
        Self {
            x0: cx - w / 2.0,
            y0: cy - h / 2.0,
            x1: cx + w / 2.0,
            y1: cy + h / 2.0,
        }
    }

    pub fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            x0: a.x0 + (b.x0 - a.x0) * t,
            y0: a.y0 + (b.y0 - a.y0) * t,
            x1: a.x1 + (b.x1 - a.x1) * t,
            y1: a.y1 + (b.y1 - a.y1) * t,
        }
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camera_defaults_are_valid() {
        CameraParams::default().validate().unwrap();
    }

    #[test]
    fn camera_rejects_bad_ranges() {
        let p = CameraParams {
            zpos: 0.0,
            ..CameraParams::default()
        };
        assert!(p.validate().is_err());

        let p = CameraParams {
            fov: 180.0,
            ..CameraParams::default()
        };
        assert!(p.validate().is_err());

        let p = CameraParams {
            xrot: f64::NAN,
            ..CameraParams::default()
        };
        assert!(p.validate().is_err());
    }

    #[test]
    fn partial_camera_json_fills_defaults() {
        let p: CameraParams = serde_json::from_str(r#"{"zpos": 0.5}"#).unwrap();
        assert_eq!(p.zpos, 0.5);
        assert_eq!(p.fov, 60.0);
        assert_eq!(p.xpos, 0.0);
        assert_eq!(p.border, 0);
    }

    #[test]
    fn partial_clip_json_fills_defaults() {
        let c: MotionClip =
            serde_json::from_str(r#"{"zoom_end": 0.25, "pan_method": "power"}"#).unwrap();
        assert_eq!(c.zoom_end, 0.25);
        assert_eq!(c.pan_method, PanMethod::Power);
        assert_eq!(c.zoom_start, 1.0);
        assert_eq!(c.center_start, (0.5, 0.5));
        assert_eq!(c.pan_accel, 0.0);
        assert!(c.duration.is_zero());
    }

    #[test]
    fn bgcolor_unpacks_argb() {
        let p = CameraParams {
            bgcolor: 0x80FF7310,
            ..CameraParams::default()
        };
        assert_eq!(p.bgcolor_argb(), (0x80, 0xFF, 0x73, 0x10));
    }

    #[test]
    fn clip_rejects_bad_accel_and_zoom() {
        let c = MotionClip {
            pan_accel: 1.5,
            ..MotionClip::default()
        };
        assert!(c.validate().is_err());

        let c = MotionClip {
            zoom_end: 0.0,
            ..MotionClip::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn full_zoom_crop_covers_matching_aspect_source() {
        let r = CropRect::from_zoom_center(1.0, (0.5, 0.5), 100, 100, 50, 50);
        assert_eq!(r, CropRect { x0: 0.0, y0: 0.0, x1: 100.0, y1: 100.0 });
    }

    #[test]
    fn wide_source_is_letterboxed_against_height() {
        // 200x100 source into a square output: height binds, width crops.
        let r = CropRect::from_zoom_center(1.0, (0.5, 0.5), 200, 100, 64, 64);
        assert_eq!(r.height(), 100.0);
        assert_eq!(r.width(), 100.0);
        assert_eq!(r.x0, 50.0);
    }

    #[test]
    fn lerp_midpoint_is_edgewise_mean() {
        let a = CropRect { x0: 0.0, y0: 0.0, x1: 100.0, y1: 100.0 };
        let b = CropRect { x0: 25.0, y0: 25.0, x1: 75.0, y1: 75.0 };
        let mid = CropRect::lerp(&a, &b, 0.5);
        assert_eq!(mid, CropRect { x0: 12.5, y0: 12.5, x1: 87.5, y1: 87.5 });
    }
}
