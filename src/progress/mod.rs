//! Progress reporting for integration runs

mod console;
mod handler;
mod logging;

pub use console::ConsoleHandler;
pub use handler::{NoOpHandler, ProgressEvent, ProgressHandler};
pub use logging::LoggingHandler;

/// Forwards every event to each inner handler in order
pub struct CompositeHandler {
    handlers: Vec<Box<dyn ProgressHandler>>,
}

impl CompositeHandler {
    pub fn new(handlers: Vec<Box<dyn ProgressHandler>>) -> Self {
        Self { handlers }
    }
}

impl ProgressHandler for CompositeHandler {
    fn on_progress(&self, event: &ProgressEvent) {
        for handler in &self.handlers {
            handler.on_progress(event);
        }
    }
}
