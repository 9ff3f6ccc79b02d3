//! Particle field library
//!
//! An adaptive, pointer-reactive particle background: ambient particles drift
//! and pulse inside the viewport, get pushed away by the pointer, burst on
//! click, and are joined by faint edges when close.  The field measures its
//! own frame rate and sheds particles (and edges) when the display cannot
//! keep up.

pub mod animation;
pub mod config;
pub mod constants;
pub mod error;
pub mod field;
pub mod input;
pub mod particle;
pub mod plugin;
pub mod rendering;
pub mod settings;
pub mod spatial_partition;
pub mod surface;
pub mod theme;
pub mod tier;
pub mod variant;

pub use field::ParticleField;
pub use plugin::ParticleFieldPlugin;
