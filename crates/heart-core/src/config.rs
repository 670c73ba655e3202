//! Engine configuration.
//!
//! The single- and dual-heart experiences are one engine with different
//! knobs, not separate code paths. `EngineConfig::dual()` is the two-hand
//! fusion toy; `EngineConfig::solo()` is the calmer one-hand variant.

use crate::constants::*;

#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Number of hand-tracked hearts (1 or 2).
    pub heart_count: usize,
    /// Scale range the pinch gesture maps into.
    pub scale_min: f32,
    pub scale_max: f32,
    /// Relaxed size used for hide/respawn and burst size ratios.
    pub neutral_scale: f32,
    /// Pinch-distance calibration band in normalized screen space.
    pub pinch_low: f32,
    pub pinch_high: f32,
    /// Per-frame one-pole smoothing weight for position and scale.
    pub smoothing_alpha: f32,
    /// When no hand is detected: reset scale targets to neutral (dual)
    /// or hold the last known target (solo).
    pub relax_scale_on_idle: bool,
    /// Whether the two-heart fusion rule is active.
    pub fusion_enabled: bool,
    /// Z of the fixed depth plane gestures are projected onto.
    pub plane_z: f32,
    /// Exponent on `1 - life_fraction` for particle opacity falloff.
    pub opacity_falloff: f32,
    /// Hard cap on live particles (inclusive).
    pub max_particles: usize,
    /// RMS loudness above which a blow burst triggers.
    pub blow_threshold: f32,
    /// Particles per burst, per color.
    pub burst_count: usize,
}

impl EngineConfig {
    /// Two hearts, fusion scoring, full-size scale range.
    pub fn dual() -> Self {
        Self {
            heart_count: 2,
            scale_min: 0.18,
            scale_max: 1.35,
            neutral_scale: NEUTRAL_SCALE,
            pinch_low: PINCH_BAND_LOW,
            pinch_high: PINCH_BAND_HIGH,
            smoothing_alpha: SMOOTHING_ALPHA,
            relax_scale_on_idle: true,
            fusion_enabled: true,
            plane_z: 0.0,
            opacity_falloff: 1.0,
            max_particles: MAX_PARTICLES,
            blow_threshold: BLOW_THRESHOLD,
            burst_count: BURST_COUNT,
        }
    }

    /// One heart, no fusion, smaller scale range, squared opacity falloff.
    pub fn solo() -> Self {
        Self {
            heart_count: 1,
            scale_min: 0.1,
            scale_max: 0.5,
            // Mid-band rest size; the neutral must stay reachable by the
            // pinch mapping.
            neutral_scale: 0.3,
            relax_scale_on_idle: false,
            fusion_enabled: false,
            plane_z: 0.2,
            opacity_falloff: 2.0,
            ..Self::dual()
        }
    }

    /// Linearly map a normalized pinch amount in [0,1] into the scale range.
    #[inline]
    pub fn scale_for(&self, pinch_norm: f32) -> f32 {
        self.scale_min + (self.scale_max - self.scale_min) * pinch_norm.clamp(0.0, 1.0)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::dual()
    }
}
