use crate::foundation::error::{CardError, CardResult};
use crate::template::bounds::NodeBounds;

/// Deepest level (the searched node is level 0) visited by name lookups.
pub const MAX_SEARCH_DEPTH: usize = 256;

/// Absolute rectangle of a node in document coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// One node of a design document tree, as delivered by the document service.
///
/// Unknown keys are ignored; only identity, geometry and children are kept.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DocumentNode {
    pub id: String,
    pub name: String,
    pub absolute_bounding_box: Option<BoundingBox>,
    pub children: Vec<DocumentNode>,
}

impl DocumentNode {
    pub fn from_json(json: &str) -> CardResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Geometry of this node. A node without an id is identified by its name.
    pub fn bounds(&self) -> CardResult<NodeBounds> {
        let bbox = self.absolute_bounding_box.ok_or_else(|| {
            let label = if self.id.is_empty() { "<unknown>" } else { &self.id };
            CardError::layout(format!("node {label} has no absoluteBoundingBox"))
        })?;
        let id = if self.id.is_empty() {
            self.name.clone()
        } else {
            self.id.clone()
        };
        Ok(NodeBounds {
            id,
            name: self.name.clone(),
            x: bbox.x,
            y: bbox.y,
            width: bbox.width,
            height: bbox.height,
        })
    }

    /// First node in pre-order whose trimmed name equals the trimmed `target`.
    ///
    /// The node itself is only considered when `include_self` is set. Nodes deeper than
    /// [`MAX_SEARCH_DEPTH`] are never visited.
    pub fn find_by_name(&self, target: &str, include_self: bool) -> Option<&DocumentNode> {
        let target = target.trim();
        let mut stack: Vec<(&DocumentNode, usize)> = vec![(self, 0)];
        while let Some((node, depth)) = stack.pop() {
            if (depth > 0 || include_self) && node.name.trim() == target {
                return Some(node);
            }
            if depth < MAX_SEARCH_DEPTH {
                stack.extend(node.children.iter().rev().map(|child| (child, depth + 1)));
            }
        }
        None
    }
}

/// How a slot's node is located in the document.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotLocator {
    /// Fetch the node directly by id.
    ById(String),
    /// Search the frame subtree by layer name.
    ByName(String),
}

#[cfg(test)]
#[path = "../../tests/unit/template/document.rs"]
mod tests;
