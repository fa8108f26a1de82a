use rosmsg_core::{Dialect, Field, NameKind, ParseError, Value};
use rosmsg_msg::parse_msg;

fn parse(text: &str) -> Vec<rosmsg_core::Definition> {
    parse_msg(text, Dialect::Ros2Msg).unwrap()
}

fn root_fields(text: &str) -> Vec<Field> {
    let mut defs = parse(text);
    assert_eq!(defs.len(), 1);
    defs.remove(0).fields
}

#[test]
fn parse_single_field() {
    let defs = parse("string name");
    assert_eq!(defs.len(), 1);
    assert_eq!(defs[0].name, None);
    assert_eq!(defs[0].fields, vec![Field::variable("string", "name")]);
    assert!(!defs[0].fields[0].is_complex);
    assert!(!defs[0].fields[0].is_array);
}

#[test]
fn complex_types_are_kept_as_written() {
    let text = "
      Point[] points
      ============
      MSG: geometry_msgs/Point
      float64 x
    ";
    let defs = parse(text);
    assert_eq!(defs.len(), 2);
    let points = &defs[0].fields[0];
    assert_eq!(points.ty, "Point");
    assert!(points.is_complex);
    assert!(points.is_array);
    assert_eq!(defs[1].name.as_deref(), Some("geometry_msgs/Point"));
    assert_eq!(defs[1].fields, vec![Field::variable("float64", "x")]);
}

#[test]
fn parse_normalizes_aliases() {
    let fields = root_fields("char x\nbyte y");
    assert_eq!(fields[0].ty, "uint8");
    assert_eq!(fields[1].ty, "int8");
}

#[test]
fn parse_ignores_comment_lines() {
    let text = "
    # your first name goes here
    string first_name

    # last name here
    ### foo bar baz?
    string last_name
    ";
    let names: Vec<String> = root_fields(text).into_iter().map(|f| f.name).collect();
    assert_eq!(names, vec!["first_name", "last_name"]);
}

#[test]
fn parse_array_shapes() {
    let fields = root_fields(
        "string[] names\nstring[3] fixed\nint32[<=5] bounded\nstring<=10[<=2] short_names",
    );
    assert_eq!(fields[0], Field::variable("string", "names").with_array(None, None));
    assert_eq!(fields[1], Field::variable("string", "fixed").with_array(Some(3), None));
    assert_eq!(fields[2], Field::variable("int32", "bounded").with_array(None, Some(5)));
    assert_eq!(fields[3].upper_bound, Some(10));
    assert_eq!(fields[3].array_upper_bound, Some(2));
}

#[test]
fn parse_nested_header_names_following_block() {
    let text = "
    string username
    Account account
    ============
    MSG: custom_type/Account # trailing comment
    string name
    uint16 id
    ";
    let defs = parse(text);
    assert_eq!(defs[1].name.as_deref(), Some("custom_type/Account"));
    assert_eq!(defs[1].fields.len(), 2);
    assert_eq!(defs[1].fields[1].ty, "uint16");
}

#[test]
fn parse_constants() {
    let text = "
      uint32 FOO = 55
      int32 BAR=-11 # Comment! # another comment
      float32 BAZ= \t -32.25
      bool SOME_BOOLEAN = 0
      string FOO_STR = 'Foo'
      string EXAMPLE=\"#comments\" # are handled properly
    ";
    let fields = root_fields(text);
    let values: Vec<(&str, &Value)> = fields
        .iter()
        .map(|f| (f.name.as_str(), f.value.as_ref().unwrap()))
        .collect();
    assert_eq!(
        values,
        vec![
            ("FOO", &Value::UInt(55)),
            ("BAR", &Value::Int(-11)),
            ("BAZ", &Value::Float(-32.25)),
            ("SOME_BOOLEAN", &Value::Bool(false)),
            ("FOO_STR", &Value::String("Foo".into())),
            ("EXAMPLE", &Value::String("#comments".into())),
        ]
    );
    assert!(fields.iter().all(|f| f.is_constant));
    assert_eq!(fields[1].value_text.as_deref(), Some("-11"));
    assert_eq!(fields[4].value_text.as_deref(), Some("'Foo'"));
    assert_eq!(fields[5].value_text.as_deref(), Some("\"#comments\""));
}

#[test]
fn parse_python_booleans() {
    let fields = root_fields("bool ALIVE=True\nbool DEAD=False");
    assert_eq!(fields[0].value, Some(Value::Bool(true)));
    assert_eq!(fields[1].value, Some(Value::Bool(false)));
}

#[test]
fn parse_default_values() {
    let text = r#"
      int8 a 0
      int8 b -1
      bool c false
      bool d False
      bool e true
      bool f True
      string g "hello"
      string h 'hello'
      string i "'hello'"
      string j '"hello"'
      string k "\"hello\""
      string l '\'hello\''
    "#;
    let defaults: Vec<Value> = root_fields(text)
        .into_iter()
        .map(|f| f.default_value.unwrap())
        .collect();
    assert_eq!(
        defaults,
        vec![
            Value::Int(0),
            Value::Int(-1),
            Value::Bool(false),
            Value::Bool(false),
            Value::Bool(true),
            Value::Bool(true),
            Value::String("hello".into()),
            Value::String("hello".into()),
            Value::String("'hello'".into()),
            Value::String("\"hello\"".into()),
            Value::String("\"hello\"".into()),
            Value::String("'hello'".into()),
        ]
    );
}

#[test]
fn parse_array_defaults() {
    let fields = root_fields(
        "int8[<=2] arr1 [ 1 ,-1 ]\nstring[] names [\"a, b\", 'c', d]\nfloat64[2] xy [1.5, 2]",
    );
    assert_eq!(
        fields[0].default_value,
        Some(Value::Array(vec![Value::Int(1), Value::Int(-1)]))
    );
    assert_eq!(fields[0].array_upper_bound, Some(2));
    assert_eq!(
        fields[1].default_value,
        Some(Value::Array(vec![
            Value::String("a, b".into()),
            Value::String("c".into()),
            Value::String("d".into()),
        ]))
    );
    assert_eq!(
        fields[2].default_value,
        Some(Value::Array(vec![Value::Float(1.5), Value::Float(2.0)]))
    );
}

#[test]
fn naming_rules_are_enforced() {
    for (line, kind) in [
        ("int32 Bad", NameKind::Field),
        ("int32 bad__name", NameKind::Field),
        ("int32 trailing_", NameKind::Field),
        ("int32 lower = 1", NameKind::Constant),
        ("int32 MIXED_case = 1", NameKind::Constant),
    ] {
        let err = parse_msg(line, Dialect::Ros2Msg).expect_err(line);
        assert!(
            matches!(err.innermost(), ParseError::Naming { kind: k, .. } if *k == kind),
            "{line}: {err}"
        );
    }
}

#[test]
fn string_bound_requires_string_type() {
    let err = parse_msg("int32<=5 x", Dialect::Ros2Msg).unwrap_err();
    assert!(matches!(err, ParseError::Syntax { .. }), "{err}");
}

#[test]
fn constants_must_be_scalar_primitives() {
    for line in ["int32[] FOO = 1", "Point ORIGIN = 0"] {
        let err = parse_msg(line, Dialect::Ros2Msg).expect_err(line);
        assert!(matches!(err, ParseError::Syntax { .. }), "{line}: {err}");
    }
}

#[test]
fn unmatched_line_is_a_syntax_error() {
    for line in ["this is not a field", "Point p 1", "time stamp 0"] {
        let err = parse_msg(line, Dialect::Ros2Msg).unwrap_err();
        assert_eq!(
            err,
            ParseError::Syntax {
                context: "line".into(),
                text: line.into(),
            }
        );
    }
}

#[test]
fn time_constants_are_rejected() {
    let err = parse_msg("time EPOCH = 0", Dialect::Ros2Msg).unwrap_err();
    assert!(matches!(err, ParseError::Syntax { .. }), "{err}");
}

#[test]
fn literal_errors_carry_the_line() {
    let err = parse_msg("uint8 x 256", Dialect::Ros2Msg).unwrap_err();
    assert!(matches!(err, ParseError::AtLine { ref line, .. } if line == "uint8 x 256"));
    assert!(matches!(err.innermost(), ParseError::Range { min: 0, max: 255, .. }));

    let err = parse_msg(r#"string s "\q""#, Dialect::Ros2Msg).unwrap_err();
    assert!(matches!(err.innermost(), ParseError::LiteralFormat { .. }), "{err}");
}

#[test]
fn every_separator_closes_a_block() {
    let defs = parse("int32 a\n===\n===\nMSG: pkg/B\nint32 b");
    assert_eq!(defs.len(), 3);
    assert!(defs[1].fields.is_empty());
}

#[test]
fn idl_dialect_is_rejected() {
    let err = parse_msg("int32 a", Dialect::Ros2Idl).unwrap_err();
    assert!(matches!(err, ParseError::UnsupportedDialect { .. }));
}
