//! SVG rendering of signature strokes for the capture surface.

use super::capture::SignatureSession;
use crate::model::signature::SignatureData;

/// Window width from which the layout switches to tablet sizing.
pub const TABLET_MIN_WIDTH: f64 = 768.0;

/// Hint shown on the capture surface while no stroke exists.
pub const PLACEHOLDER_TEXT: &str = "Tap and drag to sign";

const PHONE_CANVAS_HEIGHT: f64 = 200.0;
const TABLET_CANVAS_HEIGHT: f64 = 300.0;

/// Stroke appearance: unfilled, round caps and joins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub width: f64,
    pub color: &'static str,
}

impl StrokeStyle {
    /// Black strokes, 3px on tablets and 2px on phones.
    pub fn for_device(is_tablet: bool) -> Self {
        Self {
            width: if is_tablet { 3.0 } else { 2.0 },
            color: "#000",
        }
    }
}

/// Capture surface size derived from the window size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasGeometry {
    pub width: f64,
    pub height: f64,
    pub is_tablet: bool,
}

impl CanvasGeometry {
    pub fn for_window(window_width: f64, window_height: f64) -> Self {
        let is_tablet = window_width >= TABLET_MIN_WIDTH;
        let is_landscape = window_width > window_height;
        let width = match (is_tablet, is_landscape) {
            (true, true) => window_width * 0.7,
            (true, false) => window_width * 0.8,
            (false, _) => window_width * 0.9,
        };
        let height = if is_tablet {
            TABLET_CANVAS_HEIGHT
        } else {
            PHONE_CANVAS_HEIGHT
        };
        Self {
            width,
            height,
            is_tablet,
        }
    }

    pub fn stroke_style(&self) -> StrokeStyle {
        StrokeStyle::for_device(self.is_tablet)
    }
}

impl SignatureSession {
    /// Renders committed and in-progress strokes as one SVG document.
    pub fn render_svg(&self, geometry: &CanvasGeometry) -> String {
        render_paths(self.visible_paths(), geometry)
    }
}

impl SignatureData {
    /// Renders stored strokes for redisplay on the same surface size.
    pub fn render_svg(&self, geometry: &CanvasGeometry) -> String {
        render_paths(self.paths.iter().map(String::as_str), geometry)
    }
}

fn render_paths<'a>(paths: impl Iterator<Item = &'a str>, geometry: &CanvasGeometry) -> String {
    let style = geometry.stroke_style();
    let mut svg = String::new();
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = geometry.width,
        h = geometry.height
    ));
    for path in paths.filter(|path| !path.trim().is_empty()) {
        svg.push_str(&format!(
            r#"<path d="{path}" stroke="{color}" stroke-width="{width}" stroke-linecap="round" stroke-linejoin="round" fill="none"/>"#,
            color = style.color,
            width = style.width
        ));
    }
    svg.push_str("</svg>");
    svg
}
