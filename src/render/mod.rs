pub mod renderer;

pub use renderer::{Palette, Renderer};
