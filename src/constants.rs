/// Page wiring for the web front-end. Element ids and classes must match
/// `index.html`.
pub const CANVAS_SELECTOR: &str = "canvas.webgl";
pub const LABELS_CONTAINER_ID: &str = "labels";
pub const LABEL_CLASS: &str = "label";
pub const LABEL_VISIBLE_CLASS: &str = "visible";

// Wheel deltas reported in lines/pages are converted to pixels
pub const WHEEL_LINE_PX: f32 = 16.0;

pub const HINT_ID: &str = "hint";
pub const HIDDEN_CLASS: &str = "hidden";
