use alloc::{string::ToString, vec, vec::Vec};

use super::utils::{drive, events_of, tree_of, Ev};
use crate::{Node, ParseStatus, Parser, ScalarKind, TreeBuilder};

fn object(entries: &[(&str, Node)]) -> Node {
    Node::Object(
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect(),
    )
}

#[test]
fn object_with_comma_separated_key_and_value() {
    let root = tree_of(&["{ \"a\" , 1 }"]).unwrap();
    assert_eq!(root, object(&[("a", Node::Number(1.0))]));
}

#[test]
fn object_with_colon_separated_key_and_value() {
    let root = tree_of(&["{ \"a\" : 1 }"]).unwrap();
    assert_eq!(root, object(&[("a", Node::Number(1.0))]));
}

#[test]
fn separators_may_be_mixed_within_one_object() {
    let root = tree_of(&["{ \"a\" , 1, \"b\" : 2 }"]).unwrap();
    assert_eq!(
        root,
        object(&[("a", Node::Number(1.0)), ("b", Node::Number(2.0))])
    );
}

#[test]
fn array_split_mid_token_and_mid_separator() {
    let root = tree_of(&["[", "null", ", true, false", "]"]).unwrap();
    assert_eq!(
        root,
        Node::Array(vec![Node::Null, Node::Bool(true), Node::Bool(false)])
    );
}

#[test]
fn string_split_across_a_chunk_boundary() {
    let root = tree_of(&["{ \"h", "i\" , \"v\" }"]).unwrap();
    assert_eq!(root, object(&[("hi", Node::String("v".to_string()))]));
}

#[test]
fn number_split_across_a_chunk_boundary() {
    let root = tree_of(&["{ \"k\" , 1.", "e+1 }"]).unwrap();
    assert_eq!(root, object(&[("k", Node::Number(10.0))]));
}

#[test]
fn empty_object_needs_closure_to_flush_the_trailing_brace() {
    let root = tree_of(&["{}"]).unwrap();
    assert_eq!(root, Node::Object(Vec::new()));
}

#[test]
fn empty_array() {
    let root = tree_of(&["[]"]).unwrap();
    assert_eq!(root, Node::Array(Vec::new()));
}

#[test]
fn surrounding_whitespace_is_transparent() {
    let root = tree_of(&["  \t\n { \"a\" , 1 } \r\n "]).unwrap();
    assert_eq!(root, object(&[("a", Node::Number(1.0))]));
}

#[test]
fn whitespace_does_not_change_the_event_sequence() {
    let dense = events_of(&["{\"a\",1,\"b\",[true]}"]);
    let airy = events_of(&[" {\t\"a\"\n,  1 ,\r \"b\" , [ true ] } "]);
    assert_eq!(dense, airy);
}

#[test]
fn event_sequence_for_a_small_object() {
    assert_eq!(
        events_of(&["{ \"a\" , 1 }"]),
        vec![
            Ev::ObjectStart,
            Ev::Key("a".to_string()),
            Ev::ObjectValue("1".to_string(), ScalarKind::Literal),
            Ev::ObjectEnd,
        ]
    );
}

#[test]
fn quoted_and_bare_literals_are_not_conflated() {
    let root = tree_of(&["{ \"a\" : \"true\", \"b\" : true, \"c\" : \"1\" }"]).unwrap();
    assert_eq!(root.get("a").and_then(Node::as_str), Some("true"));
    assert_eq!(root.get("b").and_then(Node::as_bool), Some(true));
    assert_eq!(root.get("c").and_then(Node::as_str), Some("1"));

    let events = events_of(&["{ \"a\" : \"true\", \"b\" : true }"]);
    assert_eq!(
        events[2],
        Ev::ObjectValue("true".to_string(), ScalarKind::String)
    );
    assert_eq!(
        events[4],
        Ev::ObjectValue("true".to_string(), ScalarKind::Literal)
    );
}

#[test]
fn keyword_values_are_case_insensitive() {
    let root = tree_of(&["[True, FALSE, Null]"]).unwrap();
    assert_eq!(
        root,
        Node::Array(vec![Node::Bool(true), Node::Bool(false), Node::Null])
    );
}

#[test]
fn number_forms() {
    let root = tree_of(&["[0, 1e-1, .8, -.3, 0., +1.3e+1, -1.3e+1]"]).unwrap();
    let numbers: Vec<f64> = root
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n.as_f64().unwrap())
        .collect();
    assert_eq!(numbers, [0.0, 0.1, 0.8, -0.3, 0.0, 13.0, -13.0]);
}

#[test]
fn nested_composites() {
    let root = tree_of(&["[[], [[1]], {\"a\" : [{}]}]"]).unwrap();
    assert_eq!(
        root,
        Node::Array(vec![
            Node::Array(vec![]),
            Node::Array(vec![Node::Array(vec![Node::Number(1.0)])]),
            object(&[("a", Node::Array(vec![Node::Object(Vec::new())]))]),
        ])
    );
}

// A key carrying every escape form, split right inside an escape sequence,
// followed by whitespace-only chunks before the closing brace.
#[test]
fn escape_heavy_key_split_inside_an_escape() {
    let root = tree_of(&["{ \"h\\\"\\\\e\\/a\\", "\"a\" : 1.3", "    ", " ", "}"]).unwrap();
    assert_eq!(root, object(&[("h\"\\e/a\"a", Node::Number(1.3))]));
}

#[test]
fn large_document_in_one_chunk() {
    let text = r#"{ "h\"\\e\/a\"a" : 1.3e+1, "obj" : {}, "xi" : {"phi" : "omega"},
        "" : [null, true, false], "null" : [true], "dolly" : [],
        "a" : 0, "b" : 0., "c" : 0.0, "d" : 1e-1,
        "e" : ["done"], "f" : "ok",
        "g" : [{"h" : 2, "i" : null, "j" : false, "k" : true}, null, {}, .8]} "#;
    let root = tree_of(&[text]).unwrap();

    assert_eq!(root.get("h\"\\e/a\"a").and_then(Node::as_f64), Some(13.0));
    assert_eq!(root.get("obj"), Some(&Node::Object(Vec::new())));
    assert_eq!(
        root.get("xi").and_then(|n| n.get("phi")).and_then(Node::as_str),
        Some("omega")
    );
    assert_eq!(
        root.get(""),
        Some(&Node::Array(vec![
            Node::Null,
            Node::Bool(true),
            Node::Bool(false)
        ]))
    );
    assert_eq!(root.get("b").and_then(Node::as_f64), Some(0.0));
    assert_eq!(root.get("d").and_then(Node::as_f64), Some(0.1));
    let g = root.get("g").and_then(Node::as_array).unwrap();
    assert_eq!(g.len(), 4);
    assert_eq!(g[3].as_f64(), Some(0.8));
}

#[test]
fn feeding_one_character_at_a_time() {
    let text = "{ \"key\" , [1.5, {\"n\" : null}] }";
    let chunks: Vec<alloc::string::String> = text.chars().map(|c| c.to_string()).collect();
    let chunk_refs: Vec<&str> = chunks.iter().map(alloc::string::String::as_str).collect();
    let root = tree_of(&chunk_refs).unwrap();
    assert_eq!(
        root,
        object(&[(
            "key",
            Node::Array(vec![
                Node::Number(1.5),
                object(&[("n", Node::Null)]),
            ])
        )])
    );
}

#[test]
fn parse_without_new_input_stays_pending() {
    let mut parser = Parser::new();
    let mut tree = TreeBuilder::new();
    parser.feed("{ \"a\" , ");
    assert_eq!(parser.parse(&mut tree).unwrap(), ParseStatus::Pending);
    // No progress is possible, but no commitment is made either.
    assert_eq!(parser.parse(&mut tree).unwrap(), ParseStatus::Pending);
    parser.feed("1 }");
    parser.close();
    loop {
        match parser.parse(&mut tree).unwrap() {
            ParseStatus::Pending => {}
            ParseStatus::Complete => break,
        }
    }
    assert_eq!(
        tree.into_root().unwrap(),
        object(&[("a", Node::Number(1.0))])
    );
}

#[test]
fn builder_stack_returns_to_its_preparse_depth() {
    let mut tree = TreeBuilder::new();
    let before = tree.depth();
    drive(&["{ \"a\" , [1, {\"b\" , 2}] }"], &mut tree).unwrap();
    assert_eq!(tree.depth(), before);
    assert!(tree.root().is_some());
}

#[test]
fn round_trip_preserves_shape_and_values() {
    let text = "{ \"a\" , 1, \"b\" : [true, null, \"x\\ny\"], \"a\" : 2 }";
    let first: Node = text.parse().unwrap();
    let second: Node = first.to_string().parse().unwrap();
    assert_eq!(first, second);
}
