//! Rendering collaborators.
//!
//! The simulation never draws. Each pooled particle carries a
//! [`RendererPeer`] that is shown when the particle is emitted, synced every
//! live frame, and hidden when the particle returns to the pool. Peers are
//! created once per pool slot by a [`RendererFactory`].
//!
//! Two strategies are supported:
//!
//! | Strategy | Factory returns | Example |
//! |----------|-----------------|---------|
//! | Per-particle | a fresh peer per slot (e.g. one sprite each) | a closure |
//! | Shared surface | the same peer for every slot | [`SharedRenderer`], [`InstanceBatch`], `CanvasRenderer` |
//!
//! Shared renderers receive the particle's pool slot in every
//! [`ParticleInstance`], which is enough for their own bookkeeping.

use crate::particle::{Particle, ParticleInstance};
use std::cell::RefCell;
use std::rc::Rc;

/// Visual representation of one particle (or of all of them, when shared).
pub trait RendererPeer {
    /// The particle was emitted and should become visible.
    fn show(&mut self, particle: &ParticleInstance);

    /// The particle returned to the pool and should disappear.
    fn hide(&mut self, particle: &ParticleInstance);

    /// The particle moved; update position, size and color from `particle`.
    fn sync(&mut self, particle: &ParticleInstance);
}

/// Creates the [`RendererPeer`] for each pool slot of an emitter.
pub trait RendererFactory {
    /// Called once per pool slot when the emitter is built.
    fn create_for(&mut self, particle: &Particle) -> Box<dyn RendererPeer>;

    /// Called before the simulation pass of every update.
    ///
    /// A shared surface can clear itself here.
    fn on_update_start(&mut self) {}

    /// Called after the simulation pass of every update.
    ///
    /// A shared surface can present or commit here.
    fn on_update_end(&mut self) {}
}

impl<R: RendererPeer + ?Sized> RendererPeer for Rc<RefCell<R>> {
    fn show(&mut self, particle: &ParticleInstance) {
        self.borrow_mut().show(particle);
    }

    fn hide(&mut self, particle: &ParticleInstance) {
        self.borrow_mut().hide(particle);
    }

    fn sync(&mut self, particle: &ParticleInstance) {
        self.borrow_mut().sync(particle);
    }
}

impl<F> RendererFactory for F
where
    F: FnMut(&Particle) -> Box<dyn RendererPeer>,
{
    fn create_for(&mut self, particle: &Particle) -> Box<dyn RendererPeer> {
        self(particle)
    }
}

/// Factory handing every slot the same renderer.
///
/// Keep a clone of [`SharedRenderer::handle`] to inspect the renderer after
/// the emitter takes ownership of the factory.
pub struct SharedRenderer<R> {
    renderer: Rc<RefCell<R>>,
}

impl<R: RendererPeer + 'static> SharedRenderer<R> {
    pub fn new(renderer: R) -> Self {
        Self {
            renderer: Rc::new(RefCell::new(renderer)),
        }
    }

    pub fn from_rc(renderer: Rc<RefCell<R>>) -> Self {
        Self { renderer }
    }

    pub fn handle(&self) -> Rc<RefCell<R>> {
        Rc::clone(&self.renderer)
    }
}

impl<R: RendererPeer + 'static> RendererFactory for SharedRenderer<R> {
    fn create_for(&mut self, _particle: &Particle) -> Box<dyn RendererPeer> {
        Box::new(Rc::clone(&self.renderer))
    }
}

/// Shared renderer that collects one [`ParticleInstance`] per synced
/// particle each frame, ready for a GPU instance buffer.
///
/// Use it through an emitter with
/// [`EmitterBuilder::with_renderer_factory`](crate::EmitterBuilder::with_renderer_factory):
/// the batch is cleared at the start of each update and holds the live
/// particles afterwards.
#[derive(Clone, Default)]
pub struct InstanceBatch {
    batch: Rc<RefCell<Batch>>,
}

#[derive(Default)]
struct Batch {
    instances: Vec<ParticleInstance>,
    visible: usize,
}

impl InstanceBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Instances synced during the last update.
    pub fn instances(&self) -> Vec<ParticleInstance> {
        self.batch.borrow().instances.clone()
    }

    /// Number of instances synced during the last update.
    pub fn len(&self) -> usize {
        self.batch.borrow().instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of particles currently shown.
    pub fn visible(&self) -> usize {
        self.batch.borrow().visible
    }

    /// Raw bytes of the batch, laid out as consecutive `ParticleInstance`s.
    pub fn to_bytes(&self) -> Vec<u8> {
        bytemuck::cast_slice(&self.batch.borrow().instances).to_vec()
    }
}

impl RendererPeer for InstanceBatch {
    fn show(&mut self, _particle: &ParticleInstance) {
        self.batch.borrow_mut().visible += 1;
    }

    fn hide(&mut self, _particle: &ParticleInstance) {
        let mut batch = self.batch.borrow_mut();
        batch.visible = batch.visible.saturating_sub(1);
    }

    fn sync(&mut self, particle: &ParticleInstance) {
        self.batch.borrow_mut().instances.push(*particle);
    }
}

impl RendererFactory for InstanceBatch {
    fn create_for(&mut self, _particle: &Particle) -> Box<dyn RendererPeer> {
        Box::new(self.clone())
    }

    fn on_update_start(&mut self) {
        self.batch.borrow_mut().instances.clear();
    }
}
