use crate::config::OutputFormat;
use orbit_layout::{Bounds, ItemIndex};
use serde::Serialize;
use std::fmt::Write;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemReport {
    pub index: ItemIndex,
    pub rotation: f64,
    pub scale: f64,
    pub bounds: Bounds,
}

/// State of the carousel after one step, children in traversal order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub step: String,
    pub offset: f64,
    pub max_offset: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consumed: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frames: Option<usize>,
    pub items: Vec<ItemReport>,
}

pub fn render(frame: &Frame, format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Text => Ok(render_text(frame)),
        OutputFormat::Json => serde_json::to_string(frame),
    }
}

pub fn render_text(frame: &Frame) -> String {
    let mut out = format!(
        "{}: offset {:.2}/{:.2}",
        frame.step, frame.offset, frame.max_offset
    );
    if let Some(consumed) = frame.consumed {
        let _ = write!(out, ", consumed {consumed:.2}");
    }
    if let Some(frames) = frame.frames {
        let _ = write!(out, " over {frames} frames");
    }

    if frame.items.is_empty() {
        out.push_str("\n  (no items attached)");
    }
    for item in &frame.items {
        let b = &item.bounds;
        let _ = write!(
            out,
            "\n  #{:<3} rot {:>8.2}  scale {:.3}  at ({:.1}, {:.1})-({:.1}, {:.1})",
            item.index, item.rotation, item.scale, b.left, b.top, b.right, b.bottom
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> Frame {
        Frame {
            step: "drag=-40".to_string(),
            offset: 0.0,
            max_offset: 150.0,
            consumed: Some(0.0),
            frames: None,
            items: vec![ItemReport {
                index: ItemIndex::new(0),
                rotation: 0.0,
                scale: 1.4,
                bounds: Bounds {
                    left: 208.0,
                    top: 100.0,
                    right: 272.0,
                    bottom: 196.0,
                },
            }],
        }
    }

    #[test]
    fn test_text_report() {
        let text = render(&frame(), OutputFormat::Text).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("drag=-40: offset 0.00/150.00, consumed 0.00")
        );
        let item = lines.next().unwrap();
        assert!(item.contains("#0"));
        assert!(item.contains("scale 1.400"));
        assert!(item.contains("(208.0, 100.0)-(272.0, 196.0)"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_text_report_empty() {
        let mut f = frame();
        f.items.clear();
        assert!(render_text(&f).ends_with("(no items attached)"));
    }

    #[test]
    fn test_json_report() {
        let json = render(&frame(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["step"], "drag=-40");
        assert_eq!(value["consumed"], 0.0);
        assert!(value.get("frames").is_none());
        assert_eq!(value["items"][0]["index"], 0);
        assert_eq!(value["items"][0]["bounds"]["right"], 272.0);
    }
}
