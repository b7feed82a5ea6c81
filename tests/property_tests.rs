use proptest::{collection::vec, prelude::*};
use taltree::{
    Attributes, CommentNode, ElementNode, Located, Node, NodeTree, ParsePosition, TextNode,
    XmlnsState,
};

/// Shape of a generated tree: a leaf text, a leaf comment, or an element with children.
#[derive(Debug, Clone)]
enum Shape {
    Text(String),
    Comment,
    Element(Vec<Shape>),
}

fn shape_strategy() -> impl Strategy<Value = Shape> {
    let leaf = prop_oneof![
        "[a-z ]{0,8}".prop_map(Shape::Text),
        Just(Shape::Comment),
    ];
    leaf.prop_recursive(4, 48, 6, |inner| vec(inner, 0..6).prop_map(Shape::Element))
}

/// Build the tree, numbering nodes in pre-order through their source line.
fn build(shape: &Shape, next_line: &mut usize) -> Node {
    let position = ParsePosition::new("gen.html", *next_line);
    *next_line += 1;

    match shape {
        Shape::Text(value) => TextNode::new(&position, value.as_str()).into(),
        Shape::Comment => CommentNode::new(&position, "<!-- -->").into(),
        Shape::Element(children) => {
            let mut element = ElementNode::new(&position, "e", Attributes::new());
            for child in children {
                element.add_child(build(child, next_line));
            }
            element.into()
        }
    }
}

fn attribute_name_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z]{1,6}",
        "(t|m|x):[a-z]{1,6}",
    ]
}

proptest! {
    #[test]
    fn test_traversal_visits_every_node_once_in_order(shapes in vec(shape_strategy(), 0..6)) {
        let mut next_line = 1;
        let mut tree = NodeTree::new(&ParsePosition::new("gen.html", 1));
        for shape in &shapes {
            tree.add_child(build(shape, &mut next_line));
        }

        prop_assert_eq!(tree.len(), shapes.len());

        let lines: Vec<usize> = tree.descendants().map(|n| n.source_line()).collect();
        let expected: Vec<usize> = (1..next_line).collect();
        prop_assert_eq!(lines, expected);
    }

    #[test]
    fn test_attribute_queries_are_idempotent(
        names in vec(attribute_name_strategy(), 0..8),
        query in attribute_name_strategy(),
        block in any::<bool>(),
    ) {
        let xmlns = XmlnsState::new().with_alias("t", "tal").with_alias("m", "metal");
        let position = ParsePosition::new("gen.html", 1).with_xmlns(xmlns);
        let attributes: Attributes = names.iter().map(|n| (n.as_str(), "v")).collect();
        let name = if block { "t:block" } else { "div" };
        let element = ElementNode::new(&position, name, attributes);

        let has = element.has_attribute(&query);
        let value = element.get_attribute(&query);
        prop_assert_eq!(has, value.is_some());

        for _ in 0..3 {
            prop_assert_eq!(element.has_attribute(&query), has);
            prop_assert_eq!(element.get_attribute(&query), value);
            prop_assert!(!element.has_real_content());
        }
    }

    #[test]
    fn test_single_text_child_content(value in "[a-z ]{0,4}") {
        let position = ParsePosition::new("gen.html", 1);
        let mut element = ElementNode::new(&position, "p", Attributes::new());
        element.add_child(TextNode::new(&position, value.as_str()));

        prop_assert_eq!(element.has_real_content(), !value.is_empty());
    }
}
