use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use ribbon_sketch::cli::Cli;
use ribbon_sketch::config::SketchConfig;
use ribbon_sketch::sketch::{Route, Sketch};

struct App {
    config: SketchConfig,
    route: Route,
    window: Option<Arc<Window>>,
    sketch: Option<Sketch>,
}

impl App {
    fn new(config: SketchConfig, route: Route) -> Self {
        Self {
            config,
            route,
            window: None,
            sketch: None,
        }
    }

    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window = Arc::new(
            event_loop.create_window(
                Window::default_attributes()
                    .with_title(self.config.window.title.clone())
                    .with_inner_size(winit::dpi::LogicalSize::new(
                        self.config.window.width,
                        self.config.window.height,
                    )),
            )?,
        );

        let mut sketch = Sketch::new(window.clone(), self.config.clone())?;
        sketch.go_to(&self.route)?;

        self.window = Some(window);
        self.sketch = Some(sketch);
        Ok(())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.start(event_loop) {
                log::error!("Failed to start sketch: {e:#}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(sketch) = &mut self.sketch else {
            return;
        };

        // Let the sketch and its overlay see the event first
        if sketch.handle_window_event(&event) {
            return;
        }

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::RedrawRequested => {
                if let Err(e) = sketch.render_frame() {
                    log::error!("Render error: {e:#}");
                    event_loop.exit();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = cli.resolve_config()?;
    let route: Route = cli.route.parse()?;

    let event_loop = EventLoop::new()?;
    let mut app = App::new(config, route);

    log::info!("Ribbon sketch - move the pointer to steer, Escape to quit");
    event_loop.run_app(&mut app)?;

    Ok(())
}
