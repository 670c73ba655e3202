// Shared simulation/visual tuning constants used by the engine and frontends.

// Camera and projection
pub const CAMERA_Z: f32 = 4.2; // camera eye distance from the origin
pub const CAMERA_FOVY_DEG: f32 = 55.0;
pub const CAMERA_ZNEAR: f32 = 0.01;
pub const CAMERA_ZFAR: f32 = 50.0;

// Frame loop
pub const DT_CLAMP_SEC: f32 = 0.033; // stability clamp on a single integration step

// Gesture calibration: thumb-tip/index-tip distance band in normalized screen space
pub const PINCH_BAND_LOW: f32 = 0.02;
pub const PINCH_BAND_HIGH: f32 = 0.18;

// Tracked-heart smoothing and sizing
pub const SMOOTHING_ALPHA: f32 = 0.18; // one-pole low-pass weight, applied once per frame
pub const NEUTRAL_SCALE: f32 = 0.55; // relaxed heart size when no hand is tracked
pub const HEART_PITCH_RAD: f32 = 0.25; // fixed forward tilt of the main hearts

// Trail emission (distance-gated)
pub const TRAIL_SPACING: f32 = 0.11; // world units of travel per spawned trail particle
pub const TRAIL_BACK_OFFSET: f32 = 0.14; // how far behind the direction of travel to spawn
pub const TRAIL_BACK_SPEED: f32 = 0.10; // velocity component opposing the direction of travel

// Particles
pub const MAX_PARTICLES: usize = 1400; // hard cap, inclusive; spawns beyond it are dropped
pub const PARTICLE_BASE_SCALE_MIN: f32 = 0.26;
pub const PARTICLE_BASE_SCALE_SPAN: f32 = 0.12;
pub const PARTICLE_TTL_MIN: f32 = 0.55;
pub const PARTICLE_TTL_SPAN: f32 = 0.45;
pub const PARTICLE_SHRINK: f32 = 0.55; // scale loss over a full lifetime

// Audio-blow burst
pub const BLOW_THRESHOLD: f32 = 0.06; // RMS loudness that counts as a blow
pub const BURST_COOLDOWN_SEC: f32 = 0.7;
pub const BURST_COUNT: usize = 320;
pub const BURST_HIDE_SEC: f32 = 2.0;
pub const BURST_SHRINK_FACTOR: f32 = 0.65; // scale target after a blow, relative to neutral
pub const BURST_SIZE_MUL_MIN: f32 = 0.7;
pub const BURST_SIZE_MUL_MAX: f32 = 2.6;

// Fusion burst (dual-heart configuration)
pub const MERGE_DISTANCE: f32 = 0.45;
pub const MERGE_HIDE_SEC: f32 = 1.0;
pub const MERGE_COOLDOWN_MARGIN: f32 = 0.35; // added to the hide time so respawn cannot retrigger
pub const FUSION_SIZE_MUL_MIN: f32 = 0.8;
pub const FUSION_SIZE_MUL_MAX: f32 = 3.6;
pub const FUSION_SCORE_INCREMENT: u32 = 10;

// Ambient drifter hearts
pub const MAX_DRIFTERS: usize = 18;
pub const DRIFTER_SPAWN_RATE_HZ: f32 = 1.6; // expected spawns per second while below the cap
pub const DRIFTER_SPAWN_X: f32 = 1.45; // spawn box half-extents
pub const DRIFTER_SPAWN_Y: f32 = 0.95;
pub const DRIFTER_BOUNCE_X: f32 = 1.55; // reflection walls, slightly outside the spawn box
pub const DRIFTER_BOUNCE_Y: f32 = 0.95;
pub const DRIFTER_SPEED_X: f32 = 0.16; // velocity component spans
pub const DRIFTER_SPEED_Y: f32 = 0.12;
pub const DRIFTER_SCALE_MIN: f32 = 0.08;
pub const DRIFTER_SCALE_SPAN: f32 = 0.05;

// Default palette for the two main hearts and their trails
pub const HEART_COLOR_LEFT: [f32; 3] = [1.0, 0.184, 0.427]; // 0xff2f6d
pub const HEART_COLOR_RIGHT: [f32; 3] = [1.0, 0.373, 0.827]; // 0xff5fd3
pub const DRIFTER_COLOR_PINK: [f32; 3] = [1.0, 0.753, 0.851]; // 0xffc0d9
pub const DRIFTER_COLOR_LILAC: [f32; 3] = [0.839, 0.780, 1.0]; // 0xd6c7ff
