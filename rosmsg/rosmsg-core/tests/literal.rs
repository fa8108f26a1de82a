use rosmsg_core::{ParseError, Value, coerce_value, decode_array, decode_scalar, decode_string};

#[test]
fn integer_range_is_enforced_per_width() {
    assert_eq!(decode_scalar("uint8", "255").unwrap(), Value::UInt(255));
    assert_eq!(decode_scalar("int8", "-128").unwrap(), Value::Int(-128));

    let err = decode_scalar("uint8", "256").expect_err("256 does not fit uint8");
    assert_eq!(
        err,
        ParseError::Range {
            value: "256".to_string(),
            min: 0,
            max: 255,
        }
    );
    assert_eq!(err.to_string(), "number 256 out of range [0, 255]");

    assert!(matches!(
        decode_scalar("int8", "-129"),
        Err(ParseError::Range { min: -128, max: 127, .. })
    ));
}

#[test]
fn sixty_four_bit_integers_are_exact() {
    assert_eq!(
        decode_scalar("uint64", "18446744073709551615").unwrap(),
        Value::UInt(u64::MAX)
    );
    assert_eq!(
        decode_scalar("int64", "-9223372036854775808").unwrap(),
        Value::Int(i64::MIN)
    );
    assert!(matches!(
        decode_scalar("uint64", "18446744073709551616"),
        Err(ParseError::Range { .. })
    ));
    assert!(matches!(
        decode_scalar("int64", "99999999999999999999999999999999999999999"),
        Err(ParseError::Range { .. })
    ));
    assert!(matches!(
        decode_scalar("uint32", "-1"),
        Err(ParseError::Range { .. })
    ));
}

#[test]
fn aliases_decode_as_their_primitive() {
    assert_eq!(decode_scalar("char", "200").unwrap(), Value::UInt(200));
    assert!(matches!(
        decode_scalar("byte", "200"),
        Err(ParseError::Range { max: 127, .. })
    ));
}

#[test]
fn non_integer_text_is_a_format_error() {
    for text in ["1.5", "0x10", "", "ten", "--1"] {
        assert!(
            matches!(
                decode_scalar("int32", text),
                Err(ParseError::LiteralFormat { .. })
            ),
            "{text:?} should be rejected"
        );
    }
}

#[test]
fn booleans_accept_python_and_numeric_spellings() {
    for text in ["true", "True", "1"] {
        assert_eq!(decode_scalar("bool", text).unwrap(), Value::Bool(true));
    }
    for text in ["false", "False", "0"] {
        assert_eq!(decode_scalar("bool", text).unwrap(), Value::Bool(false));
    }
    assert!(decode_scalar("bool", "TRUE").is_err());
    assert!(decode_scalar("bool", "yes").is_err());
}

#[test]
fn floats_parse_decimal_and_exponent_forms() {
    assert_eq!(decode_scalar("float32", " -32.25 ").unwrap(), Value::Float(-32.25));
    assert_eq!(decode_scalar("float64", "1e3").unwrap(), Value::Float(1000.0));
    assert_eq!(decode_scalar("float64", ".5").unwrap(), Value::Float(0.5));
    assert_eq!(decode_scalar("float64", "42").unwrap(), Value::Float(42.0));
    for text in ["abc", "1e", "nan", "inf", "1.5x"] {
        assert!(
            matches!(
                decode_scalar("float64", text),
                Err(ParseError::LiteralFormat { .. })
            ),
            "{text:?} should be rejected"
        );
    }
}

#[test]
fn literals_of_time_or_complex_types_are_rejected() {
    assert!(decode_scalar("time", "0").is_err());
    assert!(decode_scalar("geometry_msgs/Point", "0").is_err());
}

#[test]
fn quoted_strings_unescape_their_enclosing_quote() {
    assert_eq!(decode_string(r#""\"hello\"""#).unwrap(), "\"hello\"");
    assert_eq!(decode_string(r"'\'hello\''").unwrap(), "'hello'");
    assert_eq!(decode_string(r#""'hello'""#).unwrap(), "'hello'");
    assert_eq!(decode_string(r#"'"hello"'"#).unwrap(), "\"hello\"");
    assert_eq!(decode_string("Foo").unwrap(), "Foo");
}

#[test]
fn escape_sequences_map_to_code_points() {
    assert_eq!(
        decode_string(r#""\a\b\f\n\r\t\v\\""#).unwrap(),
        "\x07\x08\x0c\n\r\t\x0b\\"
    );
    assert_eq!(decode_string(r#""\101\7\0""#).unwrap(), "A\x07\0");
    assert_eq!(decode_string(r#""\x41é\U0001F600""#).unwrap(), "Aé😀");
}

#[test]
fn malformed_strings_are_rejected() {
    for text in [r#""abc"#, r#"""#, r#""a"b""#, r#""\q""#, r#""\x4""#, r#""abc\"#] {
        assert!(
            matches!(decode_string(text), Err(ParseError::LiteralFormat { .. })),
            "{text:?} should be rejected"
        );
    }
    assert!(decode_string(r#""\UFFFFFFFF""#).is_err());
}

#[test]
fn numeric_arrays_split_on_commas() {
    assert_eq!(
        decode_array("int8", "[ 1 ,-1 ]").unwrap(),
        Value::Array(vec![Value::Int(1), Value::Int(-1)])
    );
    assert_eq!(decode_array("float64", "[]").unwrap(), Value::Array(vec![]));
    assert!(matches!(
        decode_array("uint8", "[1, 300]"),
        Err(ParseError::Range { .. })
    ));
    assert!(decode_array("int8", "1, 2").is_err());
    assert!(decode_array("int8", "[1,,2]").is_err());
}

#[test]
fn string_arrays_scan_quoted_and_bare_elements() {
    assert_eq!(
        decode_array("string", r#"["a,b", 'c', d , "e\"f"]"#).unwrap(),
        Value::Array(vec![
            Value::String("a,b".into()),
            Value::String("c".into()),
            Value::String("d".into()),
            Value::String("e\"f".into()),
        ])
    );
    assert_eq!(decode_array("wstring", "[]").unwrap(), Value::Array(vec![]));
}

#[test]
fn string_array_errors_name_the_problem() {
    let err = decode_array("string", "[,a]").unwrap_err();
    assert!(err.to_string().contains("expected array element before comma"));

    let err = decode_array("string", r#"["a" "b"]"#).unwrap_err();
    assert!(err.to_string().contains("expected comma or end of array"));

    assert!(decode_array("string", r#"["a]"#).is_err());
}

#[test]
fn coercion_applies_declared_type_rules() {
    assert_eq!(
        coerce_value("int8", false, Value::Int(40)).unwrap(),
        Value::Int(40)
    );
    assert_eq!(
        coerce_value("uint16", false, Value::Int(40)).unwrap(),
        Value::UInt(40)
    );
    assert_eq!(
        coerce_value("float64", false, Value::Int(2)).unwrap(),
        Value::Float(2.0)
    );
    assert!(matches!(
        coerce_value("uint8", false, Value::Int(300)),
        Err(ParseError::Range { .. })
    ));
    assert!(coerce_value("int32", false, Value::String("1".into())).is_err());
    assert_eq!(
        coerce_value("int32", true, Value::String("[1, 2]".into())).unwrap(),
        Value::Array(vec![Value::Int(1), Value::Int(2)])
    );
}
