mod axes;
mod core;
mod cube;
mod depth;
mod gui;
mod uniform;

pub use self::core::Renderer;
