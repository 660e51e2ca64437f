pub mod animation;
pub mod camera;
pub mod cli;
pub mod config;
pub mod events;
pub mod frame;
pub mod input;
pub mod material;
pub mod math;
pub mod renderer;
pub mod ribbon;
pub mod scene;
pub mod sketch;
pub mod texture;
pub mod types;

pub use ribbon::{build_ribbon, Ribbon, RibbonError, RibbonMesh, RibbonParams};
pub use sketch::{Route, Sketch};
