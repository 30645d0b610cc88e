//! Debug visualization sink for probe rays and sweeps.
//!
//! Resolvers report every ray and sweep they cast. Nothing is ever read
//! back, so swapping the sink cannot change simulation results.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Color tag for a debug segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DebugColor {
    /// Vertical collision rays.
    Red,
    /// Horizontal collision rays.
    Blue,
    /// Shape sweeps.
    Green,
    /// Interaction probe.
    Yellow,
}

/// A line segment emitted during a step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DebugSegment {
    pub start: Vec2,
    pub end: Vec2,
    pub color: DebugColor,
}

/// Receiver for transient debug geometry.
pub trait DebugSink {
    fn line(&mut self, start: Vec2, end: Vec2, color: DebugColor);

    /// Draw a ray given origin, direction and length.
    fn ray(&mut self, origin: Vec2, direction: Vec2, length: f32, color: DebugColor) {
        self.line(origin, origin + direction * length, color);
    }
}

/// Sink that drops everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDebug;

impl DebugSink for NoDebug {
    #[inline]
    fn line(&mut self, _start: Vec2, _end: Vec2, _color: DebugColor) {}
}

/// Sink that records segments, cleared by the owner between frames.
#[derive(Debug, Clone, Default)]
pub struct DebugLines {
    pub segments: Vec<DebugSegment>,
}

impl DebugLines {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.segments.clear();
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of segments with the given color.
    pub fn count(&self, color: DebugColor) -> usize {
        self.segments.iter().filter(|s| s.color == color).count()
    }
}

impl DebugSink for DebugLines {
    fn line(&mut self, start: Vec2, end: Vec2, color: DebugColor) {
        self.segments.push(DebugSegment { start, end, color });
    }
}
