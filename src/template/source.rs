use std::collections::HashMap;

use image::imageops::FilterType;

use crate::foundation::core::RgbaImage;
use crate::foundation::error::{CardError, CardResult};
use crate::template::document::DocumentNode;

/// Supplies document node trees by id.
pub trait GeometrySource {
    fn node(&self, id: &str) -> CardResult<DocumentNode>;
}

/// Supplies a rasterized frame at a requested scale.
pub trait FrameRasterSource {
    fn render_frame(&self, frame_id: &str, scale: f64) -> CardResult<RgbaImage>;
}

/// Node trees held in memory, addressable by the id of any node they contain.
#[derive(Clone, Debug, Default)]
pub struct InMemoryDocument {
    nodes: HashMap<String, DocumentNode>,
}

#[derive(serde::Deserialize)]
struct NodesResponse {
    nodes: HashMap<String, Option<NodeEntry>>,
}

#[derive(serde::Deserialize)]
struct NodeEntry {
    document: DocumentNode,
}

impl InMemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index `root` and all of its descendants by id.
    pub fn insert(&mut self, root: DocumentNode) {
        let mut stack = vec![&root];
        let mut found = Vec::new();
        while let Some(node) = stack.pop() {
            if !node.id.is_empty() {
                found.push(node.clone());
            }
            stack.extend(node.children.iter());
        }
        for node in found {
            self.nodes.entry(node.id.clone()).or_insert(node);
        }
    }

    pub fn with_node(mut self, root: DocumentNode) -> Self {
        self.insert(root);
        self
    }

    /// Parse a `{"nodes": {"<id>": {"document": {...}}}}` payload.
    pub fn from_nodes_json(json: &str) -> CardResult<Self> {
        let response: NodesResponse = serde_json::from_str(json)?;
        let mut doc = Self::new();
        for (id, entry) in response.nodes {
            let Some(entry) = entry else {
                tracing::debug!(%id, "node entry is null");
                continue;
            };
            doc.insert(entry.document);
        }
        Ok(doc)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl GeometrySource for InMemoryDocument {
    fn node(&self, id: &str) -> CardResult<DocumentNode> {
        self.nodes
            .get(id)
            .cloned()
            .ok_or_else(|| CardError::layout(format!("node {id} not found in document")))
    }
}

/// Frame raster backed by one pre-rendered image at scale 1.0.
#[derive(Clone, Debug)]
pub struct StaticFrame {
    image: RgbaImage,
}

impl StaticFrame {
    pub fn new(image: RgbaImage) -> Self {
        Self { image }
    }
}

impl FrameRasterSource for StaticFrame {
    fn render_frame(&self, _frame_id: &str, scale: f64) -> CardResult<RgbaImage> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(CardError::validation(format!(
                "frame scale must be > 0, got {scale}"
            )));
        }
        if scale == 1.0 {
            return Ok(self.image.clone());
        }
        let w = (f64::from(self.image.width()) * scale).round().max(1.0) as u32;
        let h = (f64::from(self.image.height()) * scale).round().max(1.0) as u32;
        Ok(image::imageops::resize(&self.image, w, h, FilterType::Lanczos3))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/template/source.rs"]
mod tests;
