//! Whole-frame orchestration: parameter snapshot, mode selection, pixel loop.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use crate::{
    error::ZoompanResult,
    frame::{FrameRef, FrameRefMut},
    params::{CameraParams, CropRect, MotionClip},
    project::Projection,
    sample::Sampler,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct FrameGeometry {
    src_w: usize,
    src_h: usize,
    dst_w: usize,
    dst_h: usize,
}

struct EngineState {
    camera: CameraParams,
    clip: Option<MotionClip>,
    // Crop rectangles derived from the clip, keyed by the geometry they were
    // computed for. Refreshed on clip changes and on geometry changes.
    crops: Option<(FrameGeometry, CropRect, CropRect)>,
}

impl EngineState {
    fn crops_for(&mut self, clip: &MotionClip, geom: FrameGeometry) -> (CropRect, CropRect) {
        if let Some((cached_geom, start, end)) = self.crops
            && cached_geom == geom
        {
            return (start, end);
        }
        let (start, end) = clip.crop_rects(geom.src_w, geom.src_h, geom.dst_w, geom.dst_h);
        self.crops = Some((geom, start, end));
        (start, end)
    }
}

/// The transform engine. One instance per stream; parameter updates and
/// frame transforms serialize behind an internal lock, so every frame sees
/// a single consistent parameter snapshot.
pub struct TransformEngine {
    state: Mutex<EngineState>,
}

impl TransformEngine {
    pub fn new(camera: CameraParams) -> ZoompanResult<Self> {
        camera.validate()?;
        Ok(Self {
            state: Mutex::new(EngineState {
                camera,
                clip: None,
                crops: None,
            }),
        })
    }

    pub fn with_clip(camera: CameraParams, clip: MotionClip) -> ZoompanResult<Self> {
        let engine = Self::new(camera)?;
        engine.set_clip(clip)?;
        Ok(engine)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, EngineState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn camera(&self) -> CameraParams {
        self.lock().camera
    }

    pub fn clip(&self) -> Option<MotionClip> {
        self.lock().clip
    }

    pub fn set_camera(&self, camera: CameraParams) -> ZoompanResult<()> {
        camera.validate()?;
        self.lock().camera = camera;
        Ok(())
    }

    /// Installs a motion clip; the engine runs in duration-driven crop mode
    /// until [`Self::clear_clip`]. Derived crop geometry is recomputed now.
    pub fn set_clip(&self, clip: MotionClip) -> ZoompanResult<()> {
        clip.validate()?;
        let mut state = self.lock();
        state.clip = Some(clip);
        state.crops = None;
        Ok(())
    }

    pub fn clear_clip(&self) {
        let mut state = self.lock();
        state.clip = None;
        state.crops = None;
    }

    /// Transforms one frame. Synchronous; runs to completion. Declines
    /// (error, no output bytes written) on an unsupported format pair.
    #[tracing::instrument(skip(self, src, dst))]
    pub fn transform(
        &self,
        src: FrameRef<'_>,
        dst: &mut FrameRefMut<'_>,
        pts: Duration,
    ) -> ZoompanResult<()> {
        let mut state = self.lock();

        let geom = FrameGeometry {
            src_w: src.width(),
            src_h: src.height(),
            dst_w: dst.width(),
            dst_h: dst.height(),
        };
        let sampler = Sampler::new(
            src.format(),
            geom.src_w,
            geom.src_h,
            dst.format(),
            geom.dst_w,
            geom.dst_h,
            state.camera.bgcolor_argb(),
            state.camera.border,
        )?;

        match state.clip {
            Some(clip) => {
                let (start, end) = state.crops_for(&clip, geom);
                let rect = CropRect::lerp(&start, &end, clip.progress(pts));
                tracing::debug!(?rect, "clip crop");
                transform_crop(&sampler, src, dst, rect);
            }
            None => {
                let proj = Projection::new(&state.camera, geom.src_w, geom.src_h, geom.dst_w, geom.dst_h);
                transform_camera(&sampler, src, dst, &proj);
            }
        }
        Ok(())
    }
}

// Non-finite projections (possible under extreme tilt) count as misses.
fn floor_coord(v: f64) -> i64 {
    if v.is_finite() { v.floor() as i64 } else { i64::MIN }
}

fn transform_camera(
    sampler: &Sampler,
    src: FrameRef<'_>,
    dst: &mut FrameRefMut<'_>,
    proj: &Projection,
) {
    let (dst_w, dst_h) = (dst.width(), dst.height());
    let src_data = src.data();
    let dst_data = dst.data();
    for ydst in 0..dst_h {
        for xdst in 0..dst_w {
            let (xs, ys) = proj.map(xdst as f64, ydst as f64);
            sampler.sample(src_data, dst_data, floor_coord(xs), floor_coord(ys), xdst, ydst);
        }
    }
}

fn transform_crop(sampler: &Sampler, src: FrameRef<'_>, dst: &mut FrameRefMut<'_>, rect: CropRect) {
    let (dst_w, dst_h) = (dst.width(), dst.height());
    let sx = rect.width() / dst_w as f64;
    let sy = rect.height() / dst_h as f64;
    let src_data = src.data();
    let dst_data = dst.data();
    for ydst in 0..dst_h {
        let ys = floor_coord(rect.y0 + (ydst as f64 + 0.5) * sy);
        for xdst in 0..dst_w {
            let xs = floor_coord(rect.x0 + (xdst as f64 + 0.5) * sx);
            sampler.sample(src_data, dst_data, xs, ys, xdst, ydst);
        }
    }
}
