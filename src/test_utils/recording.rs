//! A template engine stand-in that records its inputs.

use std::sync::Mutex;

use crate::core::Result;
use crate::templating::{Assigns, RenderingContext, TemplateEngine};

/// One call received by a [`RecordingEngine`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRender {
    /// Qualified template name passed by the renderer
    pub qualified_name: String,
    /// Variables the template would have seen
    pub assigns: Assigns,
    /// `controller_path` of the rendering context
    pub controller_path: String,
}

/// Engine that renders `"<qualified name>"` and remembers every call.
#[derive(Debug, Default)]
pub struct RecordingEngine {
    calls: Mutex<Vec<RecordedRender>>,
}

impl RecordingEngine {
    /// Engine with no recorded calls.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call so far, oldest first.
    pub fn calls(&self) -> Vec<RecordedRender> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    /// The most recent call.
    pub fn last(&self) -> Option<RecordedRender> {
        self.calls().pop()
    }
}

impl TemplateEngine for RecordingEngine {
    fn render(&self, qualified_name: &str, view: &dyn RenderingContext) -> Result<String> {
        let call = RecordedRender {
            qualified_name: qualified_name.to_string(),
            assigns: view.assigns().clone(),
            controller_path: view.controller_path().to_string(),
        };
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
        Ok(qualified_name.to_string())
    }
}
