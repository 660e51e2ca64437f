mod catmull_rom;
mod color;
mod frames;
mod spherical;

pub use catmull_rom::{ArcLengthTable, CatmullRomCurve, CurveType};
pub use color::{hex_to_rgb, srgb_to_linear};
pub use frames::{Frame, FrameSet};
pub use spherical::from_spherical;
