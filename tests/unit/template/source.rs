use super::*;
use crate::foundation::core::Rgba;

const NODES_JSON: &str = r#"{
    "name": "card file",
    "nodes": {
        "1:2": {
            "document": {
                "id": "1:2",
                "name": "Card",
                "absoluteBoundingBox": {"x": 0, "y": 0, "width": 100, "height": 100},
                "children": [
                    {"id": "1:3", "name": "Title", "absoluteBoundingBox": {"x": 10, "y": 10, "width": 80, "height": 20}}
                ]
            }
        },
        "9:9": null
    }
}"#;

#[test]
fn nodes_payload_indexes_nested_ids() {
    let doc = InMemoryDocument::from_nodes_json(NODES_JSON).unwrap();
    assert_eq!(doc.len(), 2);
    assert_eq!(doc.node("1:3").unwrap().name, "Title");
    assert_eq!(doc.node("1:2").unwrap().children.len(), 1);
}

#[test]
fn unknown_node_is_a_layout_error() {
    let doc = InMemoryDocument::new();
    assert!(doc.is_empty());
    assert!(matches!(doc.node("nope"), Err(CardError::Layout(_))));
}

#[test]
fn malformed_payload_is_a_serde_error() {
    assert!(matches!(
        InMemoryDocument::from_nodes_json("{\"nodes\": 3}"),
        Err(CardError::Serde(_))
    ));
}

#[test]
fn static_frame_scales_its_image() {
    let frame = StaticFrame::new(RgbaImage::from_pixel(10, 6, Rgba([1, 2, 3, 255])));
    assert_eq!(frame.render_frame("1:2", 1.0).unwrap().dimensions(), (10, 6));
    assert_eq!(frame.render_frame("1:2", 2.0).unwrap().dimensions(), (20, 12));
    assert!(frame.render_frame("1:2", 0.0).is_err());
}
