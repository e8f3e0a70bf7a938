pub mod config;
pub mod converter;
pub mod effects;
pub mod engine;
pub mod loader;
pub mod menubar;
pub mod monitor;
pub mod motion;
pub mod pet;
pub mod player;
pub mod renderer;
pub mod types;
