pub mod renderer;

pub use renderer::SqlRenderer;
