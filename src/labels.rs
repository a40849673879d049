use crate::constants::{LABEL_CLASS, LABEL_VISIBLE_CLASS};
use crate::input::label_transform;
use viewer_core::{Camera, HotspotRegistry, LabelOverlay, Viewport};
use wasm_bindgen::JsCast;
use web_sys as web;

struct LabelNode {
    el: web::HtmlElement,
    shown: bool,
    transform: String,
}

/// One absolutely positioned `div` per labeled hotspot, in registry order.
pub struct DomLabels {
    nodes: Vec<Option<LabelNode>>,
}

impl DomLabels {
    pub fn new(
        document: &web::Document,
        container_id: &str,
        hotspots: &HotspotRegistry,
    ) -> anyhow::Result<Self> {
        let container = document
            .get_element_by_id(container_id)
            .ok_or_else(|| anyhow::anyhow!("missing #{}", container_id))?;
        let mut nodes = Vec::with_capacity(hotspots.len());
        for h in hotspots.iter() {
            let Some(label) = h.label() else {
                nodes.push(None);
                continue;
            };
            let el = document
                .create_element("div")
                .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?
                .dyn_into::<web::HtmlElement>()
                .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
            el.set_class_name(LABEL_CLASS);
            el.set_text_content(Some(label.text()));
            _ = el.set_attribute("data-hotspot", h.name());
            container
                .append_child(&el)
                .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
            nodes.push(Some(LabelNode {
                el,
                shown: false,
                transform: String::new(),
            }));
        }
        log::info!(
            "[labels] created {}",
            nodes.iter().filter(|n| n.is_some()).count()
        );
        Ok(Self { nodes })
    }
}

impl LabelOverlay for DomLabels {
    fn sync(&mut self, hotspots: &HotspotRegistry, camera: &Camera, viewport: &Viewport) {
        for (h, node) in hotspots.iter().zip(self.nodes.iter_mut()) {
            let (Some(label), Some(node)) = (h.label(), node.as_mut()) else {
                continue;
            };
            let anchor = camera.project(h.position(), viewport);
            let shown = label.visible() && anchor.is_some();
            if shown != node.shown {
                let classes = node.el.class_list();
                _ = if shown {
                    classes.add_1(LABEL_VISIBLE_CLASS)
                } else {
                    classes.remove_1(LABEL_VISIBLE_CLASS)
                };
                node.shown = shown;
            }
            if let (true, Some(px)) = (shown, anchor) {
                let transform = label_transform(px);
                if transform != node.transform {
                    _ = node.el.style().set_property("transform", &transform);
                    node.transform = transform;
                }
            }
        }
    }
}
