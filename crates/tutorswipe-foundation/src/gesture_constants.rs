//! Shared gesture constants.
//!
//! All distances are logical pixels, all velocities are logical pixels per
//! millisecond unless the name says otherwise.

/// Maximum fling velocity in logical pixels per second.
pub const MAX_FLING_VELOCITY: f32 = 8_000.0;

/// Discovery card: movement before a direction is considered intentional.
pub const CARD_DEAD_ZONE: f32 = 40.0;

/// Discovery card: releases inside this square count as taps.
pub const CARD_TAP_MAX_DISPLACEMENT: f32 = 15.0;

/// Discovery card: horizontal commit distance as a fraction of the width.
pub const CARD_COMMIT_FRACTION: f32 = 0.25;

/// Discovery card: vertical swipes need only this share of the horizontal
/// commit distance.
pub const CARD_SECONDARY_AXIS_FACTOR: f32 = 0.8;

/// Discovery card: flick velocity that commits regardless of distance.
pub const CARD_FLICK_VELOCITY: f32 = 0.5;

/// Inbox row: commit distance as a fraction of the width.
pub const ROW_COMMIT_FRACTION: f32 = 0.15;

/// Inbox row: dead zone (and haptic edge) as a fraction of the width.
pub const ROW_DEAD_ZONE_FRACTION: f32 = 0.12;

/// Inbox row: haptic re-arm point relative to the dead zone (0.08 / 0.12).
pub const ROW_REARM_FRACTION: f32 = 2.0 / 3.0;

/// Inbox row: visual drag limit as a fraction of the width.
pub const ROW_MAX_DRAG_FRACTION: f32 = 0.25;

/// Off-screen fling distance as a multiple of the viewport extent.
pub const FLING_OVERSHOOT_FRACTION: f32 = 1.5;

/// Off-screen fling duration.
pub const FLING_DURATION_MS: u64 = 300;
