//! The ribbon sketch: scene bootstrap, routing and the per-frame update.
//!
//! [`Sketch::new`] builds the renderer, camera and lights once and hooks the
//! pointer and resize listeners onto the window. [`Sketch::go_to`] fills the
//! scene for a route and starts the frame loop, after which every
//! [`Sketch::render_frame`] advances the animation and draws.

use std::cell::{Cell, RefCell};
use std::convert::Infallible;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::window::Window;

use crate::animation::{AnimationState, FrameUpdate};
use crate::camera::Camera;
use crate::config::SketchConfig;
use crate::events::{EventHub, EventKind, SketchEvent, Subscription};
use crate::frame::{Clock, FpsCounter};
use crate::input::{translate_event, PointerTracker};
use crate::renderer::{DebugSettings, RibbonRenderer};
use crate::ribbon::{build_ribbon, MaterialSlot, RandomPerturbations};
use crate::scene::{RibbonObject, Scene};
use crate::texture::TextureImage;

/// Named entry points of the sketch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    /// Anything else; renders an empty scene
    Other(String),
}

impl FromStr for Route {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "home" => Route::Home,
            _ => Route::Other(s.to_string()),
        })
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Home => write!(f, "home"),
            Route::Other(name) => write!(f, "{name}"),
        }
    }
}

/// Ribbon for the home route: random control points, seeded when the
/// config carries a seed
pub fn home_ribbon(config: &SketchConfig) -> Result<RibbonObject> {
    let rng = match config.ribbon.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut perturbations = RandomPerturbations::new(rng, config.ribbon.polar_jitter);

    let ribbon = build_ribbon(&config.ribbon.params, &mut perturbations)
        .context("failed to build ribbon geometry")?;

    log::info!(
        "Built ribbon: {} control points, {} samples, closure twist {:.4} rad",
        config.ribbon.params.control_points,
        ribbon.mesh.samples(),
        ribbon.frames.closure_twist()
    );

    Ok(RibbonObject::new(ribbon.mesh, config.material))
}

/// Write one animation step into the scene
pub fn apply_update(scene: &mut Scene, update: &FrameUpdate) {
    if let Some(ribbon) = scene.ribbon.as_mut() {
        ribbon.rotation = update.rotation;
        ribbon.materials[MaterialSlot::Front as usize].set_offset_x(update.front_offset);
        ribbon.materials[MaterialSlot::Back as usize].set_offset_x(update.back_offset);
    }
}

pub struct Sketch {
    window: Arc<Window>,
    config: SketchConfig,
    renderer: RibbonRenderer,
    scene: Scene,
    events: EventHub,
    pointer: Rc<RefCell<PointerTracker>>,
    pending_resize: Rc<Cell<Option<PhysicalSize<u32>>>>,
    _subscriptions: Vec<Subscription>,
    animation: AnimationState,
    clock: Clock,
    fps: FpsCounter,
    debug: DebugSettings,
    route: Option<Route>,
}

impl Sketch {
    pub fn new(window: Arc<Window>, config: SketchConfig) -> Result<Self> {
        let textures = [
            TextureImage::load(config.textures.front.as_deref(), MaterialSlot::Front)?,
            TextureImage::load(config.textures.back.as_deref(), MaterialSlot::Back)?,
        ];

        let renderer = pollster::block_on(RibbonRenderer::new(
            window.clone(),
            &config.renderer,
            textures,
        ))
        .context("failed to initialize renderer")?;

        let size = renderer.size();
        let camera = Camera::new(&config.camera, size.width, size.height);
        let scene = Scene::new(camera, &config.lights);

        let events = EventHub::new();
        let pointer = Rc::new(RefCell::new(PointerTracker::new(size.width, size.height)));
        let pending_resize = Rc::new(Cell::new(None));

        let tracker = pointer.clone();
        let on_pointer = events.subscribe(EventKind::PointerMove, move |event| {
            tracker.borrow_mut().process(event);
        });

        let tracker = pointer.clone();
        let resize = pending_resize.clone();
        let on_resize = events.subscribe(EventKind::Resize, move |event| {
            tracker.borrow_mut().process(event);
            if let SketchEvent::Resized { width, height } = *event {
                resize.set(Some(PhysicalSize::new(width, height)));
            }
        });

        Ok(Self {
            window,
            config,
            renderer,
            scene,
            events,
            pointer,
            pending_resize,
            _subscriptions: vec![on_pointer, on_resize],
            animation: AnimationState::default(),
            clock: Clock::new(),
            fps: FpsCounter::new(),
            debug: DebugSettings::default(),
            route: None,
        })
    }

    /// Populate the scene for `route` and start the frame loop
    pub fn go_to(&mut self, route: &Route) -> Result<()> {
        match route {
            Route::Home => {
                let ribbon = home_ribbon(&self.config)?;
                self.renderer.upload_ribbon(&ribbon.mesh);
                self.scene.add_ribbon(ribbon);
            }
            Route::Other(name) => {
                log::warn!("No scene for route '{name}', rendering an empty scene");
            }
        }

        log::info!("Entered route '{route}'");
        self.route = Some(route.clone());
        self.animation = AnimationState::default();
        self.clock.reset();
        Ok(())
    }

    pub fn route(&self) -> Option<&Route> {
        self.route.as_ref()
    }

    pub fn is_running(&self) -> bool {
        self.route.is_some()
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Route a window event to the overlay and the sketch listeners. Returns
    /// true when the overlay consumed it.
    pub fn handle_window_event(&mut self, event: &WindowEvent) -> bool {
        let consumed = self.renderer.handle_event(&self.window, event);

        if let Some(event) = translate_event(event) {
            self.events.dispatch(&event);
        }
        if let Some(size) = self.pending_resize.take() {
            self.resize(size);
        }

        consumed
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        self.renderer.resize(size);
        self.scene.camera.set_viewport(size.width, size.height);
    }

    /// Advance the animation and draw one frame
    pub fn render_frame(&mut self) -> Result<()> {
        if !self.is_running() {
            return Ok(());
        }

        let frame = self.clock.tick();
        if let Some(fps) = self.fps.record(frame.delta) {
            log::debug!("FPS: {:.1}", fps);
        }

        let pointer = self.pointer.borrow().pointer();
        let update = self
            .animation
            .advance(frame.elapsed, pointer, &self.config.animation);
        apply_update(&mut self.scene, &update);

        match self
            .renderer
            .render(&self.scene, &self.window, &mut self.debug, self.fps.fps())
        {
            Ok(()) => Ok(()),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost or outdated, reconfiguring");
                self.renderer.reconfigure();
                Ok(())
            }
            Err(wgpu::SurfaceError::OutOfMemory) => Err(anyhow!("GPU out of memory")),
            Err(e) => {
                log::warn!("Render error: {e}");
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::CameraParams;
    use crate::scene::LightParams;
    use glam::Vec2;

    fn seeded_config(seed: u64) -> SketchConfig {
        let mut config = SketchConfig::default();
        config.ribbon.seed = Some(seed);
        config.ribbon.params.samples = 64;
        config
    }

    #[test]
    fn test_route_parsing() {
        assert_eq!("home".parse::<Route>().unwrap(), Route::Home);
        assert_eq!(" Home ".parse::<Route>().unwrap(), Route::Home);
        assert_eq!(
            "about".parse::<Route>().unwrap(),
            Route::Other("about".to_string())
        );
        assert_eq!(Route::Home.to_string(), "home");
    }

    #[test]
    fn test_seeded_home_ribbon_is_reproducible() {
        let a = home_ribbon(&seeded_config(11)).unwrap();
        let b = home_ribbon(&seeded_config(11)).unwrap();
        let c = home_ribbon(&seeded_config(12)).unwrap();

        assert_eq!(a.mesh.positions, b.mesh.positions);
        assert_ne!(a.mesh.positions, c.mesh.positions);
        assert_eq!(a.mesh.vertex_count(), 2 * 65);
    }

    #[test]
    fn test_home_ribbon_rejects_invalid_params() {
        let mut config = seeded_config(1);
        config.ribbon.params.samples = 0;
        assert!(home_ribbon(&config).is_err());
    }

    #[test]
    fn test_apply_update_moves_ribbon_and_textures() {
        let camera = Camera::new(&CameraParams::default(), 800, 600);
        let mut scene = Scene::new(camera, &LightParams::default());
        scene.add_ribbon(home_ribbon(&seeded_config(3)).unwrap());

        let update = FrameUpdate {
            rotation: Vec2::new(-0.1, 0.4),
            front_offset: 0.25,
            back_offset: -0.25,
        };
        apply_update(&mut scene, &update);

        let ribbon = scene.ribbon.as_ref().unwrap();
        assert_eq!(ribbon.rotation, Vec2::new(-0.1, 0.4));
        assert_eq!(ribbon.material(MaterialSlot::Front).transform.offset.x, 0.25);
        assert_eq!(ribbon.material(MaterialSlot::Back).transform.offset.x, -0.25);
    }

    #[test]
    fn test_apply_update_without_ribbon_is_noop() {
        let camera = Camera::new(&CameraParams::default(), 800, 600);
        let mut scene = Scene::new(camera, &LightParams::default());
        let update = FrameUpdate {
            rotation: Vec2::ONE,
            front_offset: 1.0,
            back_offset: -1.0,
        };
        apply_update(&mut scene, &update);
        assert!(scene.ribbon.is_none());
    }
}
