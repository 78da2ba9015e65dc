//! Built-in JSON renderer
//!
//! Keeps only the latest frame per view, so rendering the same inputs
//! twice leaves it unchanged. Used by the command line tool and by tests to
//! observe what every chart would draw.

use crate::error::{RenderError, RenderResult};
use crate::view::{Renderer, ViewData};
use crossview_selection::SelectionState;
use serde::Serialize;

/// What one view last drew
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub view: String,
    pub data: ViewData,
    pub selection: SelectionState,
}

/// Renderer that records frames instead of drawing
#[derive(Debug, Default)]
pub struct JsonRenderer {
    frames: Vec<Frame>,
    render_calls: usize,
}

impl JsonRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest frame of a view
    pub fn frame(&self, view: &str) -> Option<&Frame> {
        self.frames.iter().find(|f| f.view == view)
    }

    /// Latest frames in first-render order
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Total number of `render` calls received
    pub fn render_calls(&self) -> usize {
        self.render_calls
    }

    /// All latest frames as pretty JSON
    pub fn to_json(&self) -> RenderResult<String> {
        serde_json::to_string_pretty(&self.frames).map_err(|e| RenderError::Serialization {
            message: e.to_string(),
        })
    }
}

impl Renderer for JsonRenderer {
    fn render(&mut self, view: &str, data: &ViewData, state: &SelectionState) -> RenderResult<()> {
        self.render_calls += 1;
        let frame = Frame {
            view: view.to_string(),
            data: data.clone(),
            selection: state.clone(),
        };
        match self.frames.iter_mut().find(|f| f.view == view) {
            Some(existing) => *existing = frame,
            None => self.frames.push(frame),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::YearSelectorData;

    fn data(all: bool) -> ViewData {
        ViewData::YearSelector(YearSelectorData {
            years: Vec::new(),
            all_selected: all,
        })
    }

    #[test]
    fn test_keeps_latest_frame() {
        let mut renderer = JsonRenderer::new();
        let state = SelectionState::default();

        renderer.render("years", &data(true), &state).unwrap();
        renderer.render("years", &data(false), &state).unwrap();

        assert_eq!(renderer.frames().len(), 1);
        assert_eq!(renderer.render_calls(), 2);
        assert_eq!(renderer.frame("years").map(|f| &f.data), Some(&data(false)));
    }

    #[test]
    fn test_to_json() {
        let mut renderer = JsonRenderer::new();
        renderer.render("years", &data(true), &SelectionState::default()).unwrap();

        let json = renderer.to_json().unwrap();
        assert!(json.contains("\"kind\": \"year_selector\""));
        assert!(json.contains("\"all_selected\": true"));
    }
}
