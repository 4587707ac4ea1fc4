use super::*;

const FRAME_JSON: &str = r#"{
    "id": "1:2",
    "name": "Card",
    "type": "FRAME",
    "absoluteBoundingBox": {"x": 100, "y": 50, "width": 540, "height": 540},
    "children": [
        {
            "id": "1:3",
            "name": "Header",
            "children": [
                {"id": "1:4", "name": " Title ", "absoluteBoundingBox": {"x": 120, "y": 70, "width": 500, "height": 90}}
            ]
        },
        {"id": "1:5", "name": "Title", "absoluteBoundingBox": {"x": 0, "y": 0, "width": 1, "height": 1}},
        {"id": "1:6", "name": "Footer"}
    ]
}"#;

fn chain(depth: usize) -> DocumentNode {
    let mut node = DocumentNode {
        name: format!("n{depth}"),
        ..Default::default()
    };
    for level in (0..depth).rev() {
        node = DocumentNode {
            name: format!("n{level}"),
            children: vec![node],
            ..Default::default()
        };
    }
    node
}

#[test]
fn parses_camel_case_and_ignores_unknown_keys() {
    let frame = DocumentNode::from_json(FRAME_JSON).unwrap();
    assert_eq!(frame.children.len(), 3);
    let bounds = frame.bounds().unwrap();
    assert_eq!((bounds.x, bounds.y, bounds.width, bounds.height), (100.0, 50.0, 540.0, 540.0));
    assert_eq!(bounds.id, "1:2");
}

#[test]
fn name_search_is_pre_order_and_trims() {
    let frame = DocumentNode::from_json(FRAME_JSON).unwrap();
    // The nested " Title " comes before the sibling "Title" in pre-order.
    assert_eq!(frame.find_by_name("Title", false).map(|n| n.id.as_str()), Some("1:4"));
    assert_eq!(frame.find_by_name("  Footer", false).map(|n| n.id.as_str()), Some("1:6"));
    assert!(frame.find_by_name("Missing", false).is_none());
}

#[test]
fn self_match_only_when_requested() {
    let frame = DocumentNode::from_json(FRAME_JSON).unwrap();
    assert!(frame.find_by_name("Card", false).is_none());
    assert_eq!(frame.find_by_name("Card", true).map(|n| n.id.as_str()), Some("1:2"));
}

#[test]
fn search_stops_at_depth_limit() {
    let root = chain(MAX_SEARCH_DEPTH + 4);
    let limit = format!("n{MAX_SEARCH_DEPTH}");
    let beyond = format!("n{}", MAX_SEARCH_DEPTH + 1);
    assert!(root.find_by_name(&limit, false).is_some());
    assert!(root.find_by_name(&beyond, false).is_none());
}

#[test]
fn missing_geometry_is_a_layout_error() {
    let frame = DocumentNode::from_json(FRAME_JSON).unwrap();
    let footer = frame.find_by_name("Footer", false).unwrap();
    assert!(matches!(footer.bounds(), Err(CardError::Layout(_))));
}

#[test]
fn node_without_id_is_identified_by_name() {
    let node = DocumentNode {
        name: "Badge".to_string(),
        absolute_bounding_box: Some(BoundingBox::default()),
        ..Default::default()
    };
    assert_eq!(node.bounds().unwrap().id, "Badge");
}

#[test]
fn locator_round_trips_through_json() {
    let loc: SlotLocator = serde_json::from_str(r#"{"by_name": "Title"}"#).unwrap();
    assert_eq!(loc, SlotLocator::ByName("Title".to_string()));
}
