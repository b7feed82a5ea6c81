use taltree::{ElementNode, Located, Node, NodeTree, ParseOptions, Parser};

const SRC: &str = include_str!("page.html");

fn parse_page() -> NodeTree {
    let parser = Parser::new(ParseOptions::default().with_source_file("page.html"));
    match parser.parse_str(SRC) {
        Ok(tree) => tree,
        Err(e) => panic!("{e}"),
    }
}

fn element<'a>(tree: &'a NodeTree, name: &str) -> &'a ElementNode {
    match tree
        .descendants()
        .filter_map(Node::as_element)
        .find(|e| e.name() == name)
    {
        Some(element) => element,
        None => panic!("no <{name}> in template"),
    }
}

#[test]
fn test_document_structure() {
    let tree = parse_page();

    let kinds: Vec<&str> = tree.children().iter().map(Node::kind_name).collect();
    assert_eq!(kinds, ["xml declaration", "doctype", "element", "text"]);
    assert!(tree.children()[3].as_text().unwrap().is_whitespace());

    let Node::Doctype(doctype) = &tree.children()[1] else {
        panic!("expected a doctype");
    };
    assert!(doctype.value().starts_with("<!DOCTYPE html PUBLIC"));
    assert!(doctype.value().ends_with("strict.dtd\">"));

    assert!(tree.descendants().all(|n| n.source_file() == "page.html"));
}

#[test]
fn test_source_lines() {
    let tree = parse_page();

    let lines: Vec<(&str, usize)> = tree
        .descendants()
        .filter_map(Node::as_element)
        .map(|e| (e.name(), e.source_line()))
        .collect();

    assert_eq!(
        lines,
        [
            ("html", 3),
            ("head", 7),
            ("title", 8),
            ("body", 11),
            ("div", 12),
            ("ul", 13),
            ("li", 14),
            ("tal:block", 16),
            ("p", 17),
            ("br", 18),
        ]
    );

    let comment = tree
        .descendants()
        .find_map(|n| match n {
            Node::Comment(c) => Some(c),
            _ => None,
        })
        .unwrap();
    assert_eq!(comment.value(), "<!-- styles -->");
    assert_eq!(comment.source_line(), 9);
}

#[test]
fn test_template_attributes() {
    let tree = parse_page();

    let title = element(&tree, "title");
    assert_eq!(title.get_attribute("tal:content"), Some("page/title"));

    let body = element(&tree, "body");
    assert_eq!(
        body.get_attribute("metal:use-macro"),
        Some("layout.html/main")
    );
    assert!(!body.has_attribute("m:use-macro"));

    let div = element(&tree, "div");
    assert_eq!(div.get_attribute("metal:fill-slot"), Some("content"));
    assert_eq!(div.get_attribute("i18n:domain"), Some("site"));

    let li = element(&tree, "li");
    assert_eq!(li.get_attribute("tal:repeat"), Some("item items"));
    assert_eq!(li.get_attribute("tal:content"), Some("item/name"));

    let block = element(&tree, "tal:block");
    assert_eq!(block.get_attribute("tal:replace"), Some("structure footer"));
}

#[test]
fn test_real_content() {
    let tree = parse_page();

    assert!(element(&tree, "title").has_real_content());
    assert!(element(&tree, "ul").has_real_content());
    assert!(!element(&tree, "li").has_real_content());
    assert!(!element(&tree, "tal:block").has_real_content());
    assert!(!element(&tree, "p").has_real_content());
    assert!(!element(&tree, "br").has_real_content());
}

#[test]
fn test_macro_library_fragment() {
    let library = concat!(
        "<div xmlns:m=\"http://xml.zope.org/namespaces/metal\" m:define-macro=\"header\">h</div>\n",
        "<div metal:define-macro=\"footer\">f</div>\n",
    );
    let tree = Parser::default().parse_str(library).unwrap();

    let macros: Vec<(&str, usize)> = tree
        .children()
        .iter()
        .filter_map(Node::as_element)
        .filter_map(|e| Some((e.get_attribute("metal:define-macro")?, e.source_line())))
        .collect();
    assert_eq!(macros, [("header", 1), ("footer", 2)]);
}

#[test]
fn test_error_reports_line() {
    let broken = SRC.replace("</ul>", "</ol>");
    let err = Parser::default().parse_str(&broken).unwrap_err();

    assert_eq!(err.line(), Some(15));
    assert!(err.to_string().contains("expected </ul>, found </ol>"));
}
