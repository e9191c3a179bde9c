//! Flat scene graph: typed object records, the frame callbacks that own
//! their per-frame mutation, lights, and pointer dispatch.

mod behavior;
mod light;
mod object;

pub use behavior::{CubeMotion, FrameCallback, FrameContext, HoverSpin, TunedKnot};
pub use light::{AmbientLight, DirectionalLight, LightTuning, Lighting};
pub use object::{Interaction, Material, ObjectId, SceneObject, Shape, Transform, Wobble};

use std::sync::atomic::{AtomicU32, Ordering};

use crate::frame::FrameInfo;
use crate::math::Ray;
use crate::tunables::Tunables;

/// Shared by every scene: an id is never handed out twice in a process
static NEXT_OBJECT_ID: AtomicU32 = AtomicU32::new(0);

/// Pointer hit on an interactive object
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerHit {
    pub id: ObjectId,
    pub distance: f32,
}

#[derive(Default)]
pub struct Scene {
    objects: Vec<SceneObject>,
    callbacks: Vec<(ObjectId, Box<dyn FrameCallback>)>,
    hovered: Vec<ObjectId>,
    pub lighting: Lighting,
    pub light_tuning: Option<LightTuning>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an object without per-frame behavior
    pub fn spawn(&mut self, mut object: SceneObject) -> ObjectId {
        let id = ObjectId(NEXT_OBJECT_ID.fetch_add(1, Ordering::Relaxed));
        object.id = id;
        log::debug!("Spawned {} '{}' as {:?}", object.shape().kind(), object.name, id);
        self.objects.push(object);
        id
    }

    /// Insert an object and register its frame callback
    pub fn spawn_with<C: FrameCallback + 'static>(&mut self, object: SceneObject, callback: C) -> ObjectId {
        let id = self.spawn(object);
        self.callbacks.push((id, Box::new(callback)));
        id
    }

    /// Remove an object together with its callbacks and pointer state
    pub fn despawn(&mut self, id: ObjectId) -> Option<SceneObject> {
        let index = self.objects.iter().position(|o| o.id == id)?;
        self.callbacks.retain(|(owner, _)| *owner != id);
        self.hovered.retain(|h| *h != id);
        Some(self.objects.remove(index))
    }

    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.iter_mut().find(|o| o.id == id)
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn callback_count(&self) -> usize {
        self.callbacks.len()
    }

    /// Objects currently under the pointer, in hit order
    pub fn hovered(&self) -> &[ObjectId] {
        &self.hovered
    }

    /// Run every frame callback once, in registration order, then apply light tuning
    pub fn tick(&mut self, frame: &FrameInfo, tunables: &Tunables) {
        let ctx = FrameContext {
            frame: *frame,
            tunables,
        };

        for (owner, callback) in self.callbacks.iter_mut() {
            if let Some(object) = self.objects.iter_mut().find(|o| o.id == *owner) {
                callback.on_frame(object, &ctx);
            }
        }

        if let Some(tuning) = &self.light_tuning {
            tuning.apply(&mut self.lighting.directional, tunables);
        }
    }

    /// Interactive objects hit by the ray, nearest first
    pub fn raycast(&self, ray: &Ray) -> Vec<PointerHit> {
        let mut hits: Vec<PointerHit> = self
            .objects
            .iter()
            .filter(|o| o.interaction.is_some())
            .filter_map(|o| o.raycast(ray).map(|distance| PointerHit { id: o.id, distance }))
            .collect();
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }

    /// Hit prefix that receives an event: stops after the first object that
    /// blocks propagation
    fn receivers(&self, hits: &[PointerHit]) -> Vec<ObjectId> {
        let mut receivers = Vec::with_capacity(hits.len());
        for hit in hits {
            receivers.push(hit.id);
            if self.get(hit.id).and_then(|o| o.interaction).is_some_and(|i| i.stop_propagation) {
                break;
            }
        }
        receivers
    }

    /// Re-evaluate hover for a new pointer ray: leave for objects no longer
    /// under the pointer, enter for new ones
    pub fn pointer_move(&mut self, ray: &Ray) {
        let hits = self.raycast(ray);
        let now_hovered = self.receivers(&hits);
        self.set_hovered(now_hovered);
    }

    /// Pointer left the viewport
    pub fn pointer_leave(&mut self) {
        self.set_hovered(Vec::new());
    }

    /// Toggle `clicked` on each receiving object. Returns the toggled ids.
    pub fn pointer_click(&mut self, ray: &Ray) -> Vec<ObjectId> {
        let hits = self.raycast(ray);
        let receivers = self.receivers(&hits);

        for id in &receivers {
            if let Some(interaction) = self.get_mut(*id).and_then(|o| o.interaction.as_mut()) {
                interaction.clicked = !interaction.clicked;
                log::debug!("Click on {:?}, clicked = {}", id, interaction.clicked);
            }
        }
        receivers
    }

    fn set_hovered(&mut self, now_hovered: Vec<ObjectId>) {
        let previous = std::mem::take(&mut self.hovered);

        for id in previous.iter().filter(|id| !now_hovered.contains(id)) {
            if let Some(interaction) = self.get_mut(*id).and_then(|o| o.interaction.as_mut()) {
                interaction.hovered = false;
                log::debug!("Pointer left {:?}", id);
            }
        }
        for id in now_hovered.iter().filter(|id| !previous.contains(id)) {
            if let Some(interaction) = self.get_mut(*id).and_then(|o| o.interaction.as_mut()) {
                interaction.hovered = true;
                log::debug!("Pointer entered {:?}", id);
            }
        }

        self.hovered = now_hovered;
    }
}
