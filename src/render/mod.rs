pub mod renderer;

pub use renderer::{GameOverNotice, Renderer};
