mod app;
mod keymap;
mod renderer;
mod textures;

pub use app::run_gui;
