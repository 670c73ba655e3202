//! Core gesture/breath-driven heart particle engine.
//!
//! Pure simulation logic shared by the native and (eventual) web frontends:
//! no windowing, GPU, or audio-device code lives here. Frontends feed
//! gesture frames and a microphone loudness estimate in, call
//! [`engine::HeartEngine::frame`] once per displayed frame, and read
//! transforms back out for drawing.

pub mod ambient;
pub mod burst;
pub mod config;
pub mod constants;
pub mod engine;
pub mod geometry;
pub mod gesture;
pub mod particles;
pub mod projection;
pub mod tracked;
pub mod trail;

pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");

pub use ambient::{AmbientField, Drifter};
pub use burst::BurstController;
pub use config::EngineConfig;
pub use constants::*;
pub use engine::{FrameTimer, HeartEngine};
pub use geometry::{GeometryError, HeartTemplate, Vertex};
pub use gesture::{GestureFrame, HandDetection, HandSide, InputSlot};
pub use particles::{Color, Particle, ParticleSystem};
pub use projection::Projector;
pub use tracked::TrackedObject;
pub use trail::TrailEmitter;
