//! Destination-to-source coordinate mapping under the simulated camera.
//!
//! All per-frame constants (letterbox geometry, zoom factors, trig, focal
//! distance) are computed once in [`Projection::new`]; [`Projection::map`]
//! is then pure per-pixel math.

use crate::params::CameraParams;

/// Substituted for perspective denominators that land exactly on zero.
const DENOM_EPS: f64 = 1e-12;

fn guard(d: f64) -> f64 {
    if d == 0.0 { DENOM_EPS } else { d }
}

#[derive(Clone, Copy, Debug)]
pub struct Projection {
    wsrc: f64,
    hsrc: f64,
    zoomx: f64,
    zoomy: f64,
    xd0: f64,
    yd0: f64,
    z0: f64,
    sin_x: f64,
    cos_x: f64,
    tan_x: f64,
    sin_y: f64,
    cos_y: f64,
    tan_y: f64,
    sin_z: f64,
    cos_z: f64,
    rotated: bool,
    xpos: f64,
    ypos: f64,
    zpos: f64,
}

impl Projection {
    pub fn new(
        params: &CameraParams,
        src_w: usize,
        src_h: usize,
        dst_w: usize,
        dst_h: usize,
    ) -> Self {
        let src_ratio = src_w as f64 / src_h as f64;
        let dst_ratio = dst_w as f64 / dst_h as f64;

        // Letterbox dimensions: the source scaled so it covers the
        // destination aspect ratio exactly in one axis.
        let (wsrc, hsrc) = if src_ratio > dst_ratio {
            let w = src_w as f64;
            (w, w / dst_ratio)
        } else {
            let h = src_h as f64;
            (h * dst_ratio, h)
        };
        let zoomx = wsrc / dst_w as f64;
        let zoomy = hsrc / dst_h as f64;

        let theta_x = params.xrot.to_radians();
        let theta_y = params.yrot.to_radians();
        let theta_z = params.zrot.to_radians();

        let xd0 = 0.5 - dst_w as f64 / 2.0 - (wsrc - src_w as f64) / 2.0 / zoomx / params.zpos;
        let yd0 = 0.5 - dst_h as f64 / 2.0 - (hsrc - src_h as f64) / 2.0 / zoomy / params.zpos;

        // Focal distance from the viewing angle across the larger letterbox
        // dimension.
        let z0 = wsrc.max(hsrc) / 2.0 / (params.fov / 2.0).to_radians().tan();

        Self {
            wsrc,
            hsrc,
            zoomx,
            zoomy,
            xd0,
            yd0,
            z0,
            sin_x: theta_x.sin(),
            cos_x: theta_x.cos(),
            tan_x: theta_x.tan(),
            sin_y: theta_y.sin(),
            cos_y: theta_y.cos(),
            tan_y: theta_y.tan(),
            sin_z: theta_z.sin(),
            cos_z: theta_z.cos(),
            rotated: params.has_rotation(),
            xpos: params.xpos,
            ypos: params.ypos,
            zpos: params.zpos,
        }
    }

    /// Maps a destination pixel to fractional source coordinates. The caller
    /// floors the result for nearest-neighbor lookup.
    pub fn map(&self, xdst: f64, ydst: f64) -> (f64, f64) {
        if self.rotated {
            self.map_perspective(xdst, ydst)
        } else {
            self.map_affine(xdst, ydst)
        }
    }

    fn map_affine(&self, xdst: f64, ydst: f64) -> (f64, f64) {
        let x0 = (xdst + self.xd0) * self.zoomx;
        let y0 = (ydst + self.yd0) * self.zoomy;
        self.finish(x0, y0)
    }

    fn map_perspective(&self, xdst: f64, ydst: f64) -> (f64, f64) {
        // Destination pixel in centered source-plane coordinates.
        let x0 = (xdst + self.xd0) * self.zoomx;
        let y0 = (ydst + self.yd0) * self.zoomy;

        // In-plane z-axis rotation first.
        let x1 = x0 * self.cos_z + y0 * self.sin_z;
        let y1 = -x0 * self.sin_z + y0 * self.cos_z;
        let z1 = self.z0;

        // Perspective division onto the y-tilted focal plane, then the
        // x-tilted one. The scale factors collapse to exactly 1.0 at zero
        // rotation, which keeps this path bit-identical to the affine one.
        let ky = z1 / guard(z1 + y1 * self.tan_y);
        let x2 = x1 * ky;
        let y2 = y1 * ky;
        let z2 = z1 * ky;

        let kx = z2 / guard(z2 + x2 * self.tan_x);
        let x3 = x2 * kx;
        let y3 = y2 * kx;
        let z3 = z2 * kx;

        // Rotate back into the untilted source-image plane.
        let x4 = x3 * self.cos_x - (z3 - z1) * self.sin_x;
        let y4 = x3 * self.sin_x * self.sin_y + y3 * self.cos_y
            - (z3 - z1) * self.sin_y * self.cos_x;

        self.finish(x4, y4)
    }

    fn finish(&self, x: f64, y: f64) -> (f64, f64) {
        // Zoom and pan, then translate back to top-left-origin pixels.
        let xsrc = (x + self.xpos * self.wsrc / 2.0) * self.zpos + self.wsrc / 2.0;
        let ysrc = (y + self.ypos * self.hsrc / 2.0) * self.zpos + self.hsrc / 2.0;
        (xsrc, ysrc)
    }
}
