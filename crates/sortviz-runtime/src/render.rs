#![forbid(unsafe_code)]

//! The rendering collaborator interface.
//!
//! The engine never draws anything itself. At every suspend point it hands the
//! current sequence and a [`HighlightSet`] to a [`Renderer`]; the renderer only
//! reads them.

use std::fmt;

use sortviz_core::{AlgorithmId, HighlightSet};

/// Lifecycle notifications for a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// A fresh sequence was generated or loaded.
    Generated { size: usize },
    /// A run started.
    Sorting(AlgorithmId),
    /// A run finished and the completion sweep played.
    Completed(AlgorithmId),
    /// A run was stopped before finishing.
    Stopped(AlgorithmId),
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generated { size } => write!(f, "Array generated ({size} values)"),
            Self::Sorting(algo) => write!(f, "Sorting with {}...", algo.info().name),
            Self::Completed(algo) => write!(f, "{} completed!", algo.info().name),
            Self::Stopped(algo) => write!(f, "{} stopped", algo.info().name),
        }
    }
}

/// Draws the sequence.
pub trait Renderer {
    /// Draw `sequence` with `highlights` applied. Any previous highlights are
    /// replaced.
    fn render(&mut self, sequence: &[u32], highlights: &HighlightSet);

    /// Remove every highlight from the last drawn state.
    fn clear_highlights(&mut self);

    /// Lifecycle notification. Ignored by default.
    fn status(&mut self, _status: &Status) {}
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn render(&mut self, sequence: &[u32], highlights: &HighlightSet) {
        (**self).render(sequence, highlights);
    }

    fn clear_highlights(&mut self) {
        (**self).clear_highlights();
    }

    fn status(&mut self, status: &Status) {
        (**self).status(status);
    }
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn render(&mut self, sequence: &[u32], highlights: &HighlightSet) {
        (**self).render(sequence, highlights);
    }

    fn clear_highlights(&mut self) {
        (**self).clear_highlights();
    }

    fn status(&mut self, status: &Status) {
        (**self).status(status);
    }
}

/// Renderer that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _sequence: &[u32], _highlights: &HighlightSet) {}

    fn clear_highlights(&mut self) {}
}

// ---------------------------------------------------------------------------
// Recording renderer
// ---------------------------------------------------------------------------

/// One captured render call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFrame {
    pub values: Vec<u32>,
    pub highlights: HighlightSet,
}

/// Renderer that keeps everything it is shown, for headless assertions.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    frames: Vec<RenderedFrame>,
    statuses: Vec<Status>,
    current: HighlightSet,
    render_calls: usize,
    clears: usize,
    capture_frames: bool,
}

impl RecordingRenderer {
    /// Record statuses, highlights and counts, and keep a copy of every frame.
    pub fn new() -> Self {
        Self {
            capture_frames: true,
            ..Self::default()
        }
    }

    /// Record statuses and counts only. Cheap enough for long runs.
    pub fn counting() -> Self {
        Self::default()
    }

    /// Captured frames (empty for a counting renderer).
    pub fn frames(&self) -> &[RenderedFrame] {
        &self.frames
    }

    /// Most recent captured frame.
    pub fn last_frame(&self) -> Option<&RenderedFrame> {
        self.frames.last()
    }

    /// Status notifications, oldest first.
    pub fn statuses(&self) -> &[Status] {
        &self.statuses
    }

    /// Most recent status notification.
    pub fn last_status(&self) -> Option<&Status> {
        self.statuses.last()
    }

    /// Highlights currently displayed.
    pub fn current_highlights(&self) -> &HighlightSet {
        &self.current
    }

    /// Number of `render` calls.
    pub fn render_calls(&self) -> usize {
        self.render_calls
    }

    /// Number of `clear_highlights` calls.
    pub fn clears(&self) -> usize {
        self.clears
    }

    /// Forget everything recorded so far.
    pub fn reset(&mut self) {
        self.frames.clear();
        self.statuses.clear();
        self.current.clear();
        self.render_calls = 0;
        self.clears = 0;
    }
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, sequence: &[u32], highlights: &HighlightSet) {
        self.render_calls += 1;
        self.current = highlights.clone();
        if self.capture_frames {
            self.frames.push(RenderedFrame {
                values: sequence.to_vec(),
                highlights: highlights.clone(),
            });
        }
    }

    fn clear_highlights(&mut self) {
        self.clears += 1;
        self.current.clear();
    }

    fn status(&mut self, status: &Status) {
        self.statuses.push(*status);
    }
}
