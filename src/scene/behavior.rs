use crate::frame::FrameInfo;
use crate::math::Rgb;
use crate::tunables::Tunables;

use super::object::{SceneObject, Shape};

/// Everything a frame callback may read
pub struct FrameContext<'a> {
    pub frame: FrameInfo,
    pub tunables: &'a Tunables,
}

/// Per-frame mutation of a single owned object
pub trait FrameCallback {
    fn on_frame(&mut self, object: &mut SceneObject, ctx: &FrameContext<'_>);
}

impl<F> FrameCallback for F
where
    F: FnMut(&mut SceneObject, &FrameContext<'_>),
{
    fn on_frame(&mut self, object: &mut SceneObject, ctx: &FrameContext<'_>) {
        self(object, ctx)
    }
}

/// Tumbling cube: spins on X and Y, swings along Z with elapsed time
#[derive(Debug, Clone, Copy)]
pub struct CubeMotion {
    pub z_amplitude: f32,
}

impl Default for CubeMotion {
    fn default() -> Self {
        Self { z_amplitude: 1.0 }
    }
}

impl FrameCallback for CubeMotion {
    fn on_frame(&mut self, object: &mut SceneObject, ctx: &FrameContext<'_>) {
        let delta = ctx.frame.delta;
        object.transform.rotation.x += delta;
        object.transform.rotation.y += delta * 2.0;
        object.transform.position.z = ctx.frame.time.sin() * self.z_amplitude;
    }
}

/// Sphere that spins faster and recolors while hovered, and grows while clicked
#[derive(Debug, Clone, Copy)]
pub struct HoverSpin {
    pub hovered_speed: f32,
    pub idle_speed: f32,
    pub hovered_color: Rgb,
    pub idle_color: Rgb,
    pub clicked_scale: f32,
}

impl Default for HoverSpin {
    fn default() -> Self {
        Self {
            hovered_speed: 1.0,
            idle_speed: 0.2,
            hovered_color: Rgb::from_hex(0xffa500),
            idle_color: Rgb::from_hex(0xadd8e6),
            clicked_scale: 1.5,
        }
    }
}

impl HoverSpin {
    pub fn speed(&self, hovered: bool) -> f32 {
        if hovered {
            self.hovered_speed
        } else {
            self.idle_speed
        }
    }
}

impl FrameCallback for HoverSpin {
    fn on_frame(&mut self, object: &mut SceneObject, ctx: &FrameContext<'_>) {
        let hovered = object.is_hovered();
        object.transform.rotation.y += ctx.frame.delta * self.speed(hovered);
        object.material.color = if hovered { self.hovered_color } else { self.idle_color };
        object.transform.scale = glam::Vec3::splat(if object.is_clicked() { self.clicked_scale } else { 1.0 });
    }
}

/// Torus knot whose color and radius follow two tunables
#[derive(Debug, Clone)]
pub struct TunedKnot {
    pub color_key: String,
    pub radius_key: String,
}

impl FrameCallback for TunedKnot {
    fn on_frame(&mut self, object: &mut SceneObject, ctx: &FrameContext<'_>) {
        if let Ok(color) = ctx.tunables.color(&self.color_key) {
            object.material.color = color;
        }
        if let (Ok(radius), Shape::TorusKnot { tube, tubular_segments, radial_segments, p, q, .. }) =
            (ctx.tunables.number(&self.radius_key), *object.shape())
        {
            object.set_shape(Shape::TorusKnot {
                radius,
                tube,
                tubular_segments,
                radial_segments,
                p,
                q,
            });
        }
    }
}
