use std::sync::Arc;
use std::time::{Duration, Instant};

use singlish_core::Engine;
use tracing::debug;

use crate::Rendered;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerState {
    Idle,
    /// An edit is waiting for its debounce window to close.
    Recomputing {
        generation: u64,
        buffer: String,
        due: Instant,
    },
}

/// Debounced whole-buffer recomputation driven by an explicit clock.
///
/// Every `edit` supersedes whatever was pending; `poll` converts only once
/// the debounce window since the latest edit has elapsed. The controller
/// never diffs against a previous buffer.
pub struct Controller {
    engine: Arc<Engine>,
    debounce: Duration,
    state: ControllerState,
    generation: u64,
    current: Option<Rendered>,
}

impl Controller {
    /// Debounce window taken from the engine's `[controller]` settings.
    pub fn new(engine: Arc<Engine>) -> Self {
        let debounce = engine.settings().controller.debounce();
        Self::with_debounce(engine, debounce)
    }

    pub fn with_debounce(engine: Arc<Engine>, debounce: Duration) -> Self {
        Self {
            engine,
            debounce,
            state: ControllerState::Idle,
            generation: 0,
            current: None,
        }
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == ControllerState::Idle
    }

    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    /// Latest completed conversion, if any.
    pub fn current(&self) -> Option<&Rendered> {
        self.current.as_ref()
    }

    /// Record a buffer change. Returns the generation assigned to it.
    pub fn edit(&mut self, buffer: impl Into<String>, now: Instant) -> u64 {
        self.generation += 1;
        if let ControllerState::Recomputing { generation, .. } = &self.state {
            debug!(superseded = *generation, by = self.generation, "edit superseded");
        }
        self.state = ControllerState::Recomputing {
            generation: self.generation,
            buffer: buffer.into(),
            due: now + self.debounce,
        };
        self.generation
    }

    /// Convert the pending buffer if its debounce window has closed.
    ///
    /// Returns the fresh result only on the call that produced it.
    pub fn poll(&mut self, now: Instant) -> Option<&Rendered> {
        let ready = matches!(&self.state, ControllerState::Recomputing { due, .. } if now >= *due);
        if ready {
            self.finish()
        } else {
            None
        }
    }

    /// Convert the pending buffer immediately, ignoring the debounce window.
    pub fn flush(&mut self) -> Option<&Rendered> {
        self.finish()
    }

    /// Abandon pending work. The last completed result stays current.
    pub fn cancel(&mut self) {
        if let ControllerState::Recomputing { generation, .. } = &self.state {
            debug!(generation = *generation, "recomputation cancelled");
        }
        self.state = ControllerState::Idle;
    }

    fn finish(&mut self) -> Option<&Rendered> {
        let ControllerState::Recomputing {
            generation, buffer, ..
        } = std::mem::replace(&mut self.state, ControllerState::Idle)
        else {
            return None;
        };
        let text = self.engine.convert(&buffer);
        self.current = Some(Rendered { generation, text });
        self.current.as_ref()
    }
}
