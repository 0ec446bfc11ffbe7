//! Highlight rectangle handed to the rendering collaborator.
//!
//! Question coordinates are the *center* of the region in the image's natural
//! pixel space. The renderer draws with a top-left origin on the displayed
//! image, so the rectangle is scaled by `display / natural` per axis and then
//! shifted by half its size.

use serde::{Deserialize, Serialize};

use crate::quiz_engine::models::Question;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Size { width, height }
    }
}

/// Top-left based rectangle in display pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HighlightRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Rectangle to draw over the displayed image for `question`.
///
/// `None` while the natural size is unknown (zero), i.e. the image has not loaded.
pub fn highlight_rect(question: &Question, natural: Size, display: Size) -> Option<HighlightRect> {
    if natural.width <= 0.0 || natural.height <= 0.0 {
        return None;
    }
    let scale_x = display.width / natural.width;
    let scale_y = display.height / natural.height;

    let width = question.width * scale_x;
    let height = question.height * scale_y;
    Some(HighlightRect {
        x: question.x * scale_x - width / 2.0,
        y: question.y * scale_y - height / 2.0,
        width,
        height,
    })
}
