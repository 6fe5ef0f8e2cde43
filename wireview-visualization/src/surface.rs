//! The drawing surface a frame loop renders into
//!
//! [`RenderSurface`] is the seam between the frame loop and the windowing
//! backend. [`WindowSurface`](crate::window::WindowSurface) draws to a real
//! window; [`RecordingSurface`] records every call, which is what the loop
//! tests run against.

use crate::camera::{Camera, InputState};
use std::collections::VecDeque;
use wireview_core::{Color, Point3f};

/// Immediate-mode drawing operations, polled once per frame
///
/// Calls between [`begin_frame`](Self::begin_frame) and
/// [`end_frame`](Self::end_frame) describe a single frame; 3D primitives are
/// only valid between [`begin_mode_3d`](Self::begin_mode_3d) and
/// [`end_mode_3d`](Self::end_mode_3d).
pub trait RenderSurface {
    /// Cap the presentation rate; `0` leaves it uncapped
    fn set_target_fps(&mut self, fps: u32);

    /// Process pending window events and report whether the user asked to close
    fn should_close(&mut self) -> bool;

    /// Keyboard state as of the last [`should_close`](Self::should_close)
    fn input(&self) -> InputState;

    fn begin_frame(&mut self);

    fn clear(&mut self, color: Color);

    fn begin_mode_3d(&mut self, camera: &Camera);

    fn draw_line_3d(&mut self, start: Point3f, end: Point3f, color: Color);

    fn draw_sphere(&mut self, center: Point3f, radius: f32, color: Color);

    fn end_mode_3d(&mut self);

    /// Present the frame, waiting out the rest of the frame budget if capped
    fn end_frame(&mut self);

    /// Release the window; no other call is valid afterwards
    fn close(&mut self);
}

/// One call made against a [`RecordingSurface`]
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    SetTargetFps(u32),
    BeginFrame,
    Clear(Color),
    /// Camera position at the time 3D mode was entered
    BeginMode3d(Point3f),
    Line {
        start: Point3f,
        end: Point3f,
        color: Color,
    },
    Sphere {
        center: Point3f,
        radius: f32,
        color: Color,
    },
    EndMode3d,
    EndFrame,
    Close,
}

impl SurfaceCall {
    pub fn is_draw(&self) -> bool {
        matches!(self, SurfaceCall::Line { .. } | SurfaceCall::Sphere { .. })
    }
}

/// Headless surface that records calls and replays scripted input
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    calls: Vec<SurfaceCall>,
    script: VecDeque<InputState>,
    input: InputState,
    close_after: Option<u64>,
    polls: u64,
    closed: bool,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report a close request on the poll after `frames` frames
    pub fn close_after(mut self, frames: u64) -> Self {
        self.close_after = Some(frames);
        self
    }

    /// Input reported on successive polls; once exhausted, no keys are held
    pub fn with_input<I>(mut self, inputs: I) -> Self
    where
        I: IntoIterator<Item = InputState>,
    {
        self.script.extend(inputs);
        self
    }

    pub fn calls(&self) -> &[SurfaceCall] {
        &self.calls
    }

    /// Number of completed frames
    pub fn frames(&self) -> usize {
        self.calls.iter().filter(|c| **c == SurfaceCall::EndFrame).count()
    }

    /// Number of line and sphere calls
    pub fn draw_calls(&self) -> usize {
        self.calls.iter().filter(|c| c.is_draw()).count()
    }

    /// Camera positions seen by each frame, in order
    pub fn camera_positions(&self) -> Vec<Point3f> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                SurfaceCall::BeginMode3d(position) => Some(*position),
                _ => None,
            })
            .collect()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl RenderSurface for RecordingSurface {
    fn set_target_fps(&mut self, fps: u32) {
        self.calls.push(SurfaceCall::SetTargetFps(fps));
    }

    fn should_close(&mut self) -> bool {
        if self.close_after.is_some_and(|limit| self.polls >= limit) {
            return true;
        }
        self.polls += 1;
        self.input = self.script.pop_front().unwrap_or_default();
        false
    }

    fn input(&self) -> InputState {
        self.input
    }

    fn begin_frame(&mut self) {
        self.calls.push(SurfaceCall::BeginFrame);
    }

    fn clear(&mut self, color: Color) {
        self.calls.push(SurfaceCall::Clear(color));
    }

    fn begin_mode_3d(&mut self, camera: &Camera) {
        self.calls.push(SurfaceCall::BeginMode3d(camera.position));
    }

    fn draw_line_3d(&mut self, start: Point3f, end: Point3f, color: Color) {
        self.calls.push(SurfaceCall::Line { start, end, color });
    }

    fn draw_sphere(&mut self, center: Point3f, radius: f32, color: Color) {
        self.calls.push(SurfaceCall::Sphere { center, radius, color });
    }

    fn end_mode_3d(&mut self) {
        self.calls.push(SurfaceCall::EndMode3d);
    }

    fn end_frame(&mut self) {
        self.calls.push(SurfaceCall::EndFrame);
    }

    fn close(&mut self) {
        self.closed = true;
        self.calls.push(SurfaceCall::Close);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_close_after_frames() {
        let mut surface = RecordingSurface::new().close_after(2);
        assert!(!surface.should_close());
        assert!(!surface.should_close());
        assert!(surface.should_close());
        assert!(surface.should_close());
    }

    #[test]
    fn test_scripted_input() {
        let mut surface = RecordingSurface::new().with_input([InputState::new(true, false)]);
        assert!(!surface.should_close());
        assert_eq!(surface.input(), InputState::new(true, false));
        assert!(!surface.should_close());
        assert_eq!(surface.input(), InputState::default());
    }

    #[test]
    fn test_counts() {
        let mut surface = RecordingSurface::new();
        surface.begin_frame();
        surface.draw_line_3d(Point3f::origin(), Point3f::new(1.0, 0.0, 0.0), Color::GRAY);
        surface.draw_sphere(Point3f::origin(), 0.5, Color::BLUE);
        surface.end_frame();
        surface.close();

        assert_eq!(surface.frames(), 1);
        assert_eq!(surface.draw_calls(), 2);
        assert!(surface.is_closed());
        assert_eq!(surface.calls().last(), Some(&SurfaceCall::Close));
    }
}
