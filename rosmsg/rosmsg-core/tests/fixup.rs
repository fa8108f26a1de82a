use rosmsg_core::{Definition, Field, ParseError, complex_type_names, fixup_types};

fn named(name: &str, fields: Vec<Field>) -> Definition {
    Definition::new(Some(name.to_string()), fields)
}

#[test]
fn short_names_resolve_to_sibling_definitions() {
    let mut defs = vec![
        Definition::new(
            None,
            vec![
                Field::variable("Point", "position"),
                Field::variable("std_msgs/Header", "header"),
            ],
        ),
        named("geometry_msgs/Point", vec![Field::variable("float64", "x")]),
        named("std_msgs/Header", vec![Field::variable("uint32", "seq")]),
    ];
    fixup_types(&mut defs).expect("fixup should succeed");
    assert_eq!(defs[0].fields[0].ty, "geometry_msgs/Point");
    assert_eq!(defs[0].fields[1].ty, "std_msgs/Header");
}

#[test]
fn fixup_rewrites_nested_definitions_too() {
    let mut defs = vec![
        Definition::new(None, vec![Field::variable("Outer", "outer")]),
        named("pkg/Outer", vec![Field::variable("Inner", "inner")]),
        named("pkg/msg/Inner", vec![Field::variable("int8", "v")]),
    ];
    fixup_types(&mut defs).unwrap();
    assert_eq!(defs[0].fields[0].ty, "pkg/Outer");
    assert_eq!(defs[1].fields[0].ty, "pkg/msg/Inner");
}

#[test]
fn missing_definition_is_reported() {
    let mut defs = vec![Definition::new(None, vec![Field::variable("Missing", "m")])];
    let err = fixup_types(&mut defs).expect_err("no sibling named Missing");
    assert_eq!(
        err,
        ParseError::UnresolvedType {
            type_name: "Missing".into()
        }
    );
    assert_eq!(err.to_string(), "missing type definition for Missing");
}

#[test]
fn multiple_matches_are_an_error() {
    let mut defs = vec![
        Definition::new(None, vec![Field::variable("Point", "p")]),
        named("a/Point", vec![Field::variable("int8", "x")]),
        named("b/Point", vec![Field::variable("int8", "x")]),
    ];
    match fixup_types(&mut defs) {
        Err(ParseError::AmbiguousType { candidates, .. }) => {
            assert_eq!(candidates, vec!["a/Point", "b/Point"]);
        }
        other => panic!("expected ambiguity error, got {other:?}"),
    }
}

#[test]
fn partial_segment_does_not_match() {
    let mut defs = vec![
        Definition::new(None, vec![Field::variable("Point", "p")]),
        named("geometry_msgs/MyPoint", vec![Field::variable("int8", "x")]),
    ];
    assert!(matches!(
        fixup_types(&mut defs),
        Err(ParseError::UnresolvedType { .. })
    ));
}

#[test]
fn complex_type_names_are_unique_in_first_seen_order() {
    let defs = vec![
        Definition::new(
            None,
            vec![
                Field::variable("B", "b"),
                Field::variable("int8", "i"),
                Field::variable("A", "a"),
                Field::variable("B", "b2"),
            ],
        ),
        named("x/B", vec![Field::variable("C", "c")]),
    ];
    assert_eq!(complex_type_names(&defs), vec!["B", "A", "C"]);
}
