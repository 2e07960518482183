use std::collections::HashMap;

use routedoc_core::meta::{ParamLocation, Parameter};
use routedoc_core::validation::{coerce_parameter, validate_parameters, ErrorKind, ParamValue};

// ── Coercion ────────────────────────────────────────────────────────────────

#[test]
fn string_passes_through() {
    assert_eq!(
        coerce_parameter("hello", "string"),
        Ok(ParamValue::String("hello".to_string()))
    );
}

#[test]
fn integer_parses() {
    assert_eq!(coerce_parameter("42", "integer"), Ok(ParamValue::Integer(42)));
    assert_eq!(coerce_parameter("-7", "int"), Ok(ParamValue::Integer(-7)));
    assert!(coerce_parameter("42.5", "integer").is_err());
    assert!(coerce_parameter("abc", "integer").is_err());
}

#[test]
fn number_parses_floats_and_integers() {
    assert_eq!(coerce_parameter("3.25", "number"), Ok(ParamValue::Number(3.25)));
    assert_eq!(coerce_parameter("10", "float"), Ok(ParamValue::Number(10.0)));
    assert_eq!(coerce_parameter("-0.5", "double"), Ok(ParamValue::Number(-0.5)));
    assert!(coerce_parameter("abc", "number").is_err());
}

#[test]
fn boolean_parses_lowercase_literals_only() {
    assert_eq!(coerce_parameter("true", "boolean"), Ok(ParamValue::Boolean(true)));
    assert_eq!(coerce_parameter("false", "bool"), Ok(ParamValue::Boolean(false)));
    assert!(coerce_parameter("True", "boolean").is_err());
    assert!(coerce_parameter("1", "boolean").is_err());
}

#[test]
fn type_names_match_case_insensitively() {
    assert_eq!(coerce_parameter("5", "Integer"), Ok(ParamValue::Integer(5)));
    assert_eq!(coerce_parameter("true", "BOOLEAN"), Ok(ParamValue::Boolean(true)));
}

#[test]
fn unknown_type_degrades_to_string() {
    assert_eq!(
        coerce_parameter("anything", "uuid"),
        Ok(ParamValue::String("anything".to_string()))
    );
}

// ── Request-side validation ─────────────────────────────────────────────────

fn lookup_from<'a>(values: &'a HashMap<&'a str, &'a str>) -> impl Fn(&Parameter) -> Option<String> + 'a {
    move |param: &Parameter| values.get(param.name.as_str()).map(|v| v.to_string())
}

#[test]
fn all_parameters_valid() {
    let params = vec![
        Parameter::new("id", ParamLocation::Path, "integer", true),
        Parameter::new("verbose", ParamLocation::Query, "boolean", false),
    ];
    let values = HashMap::from([("id", "42"), ("verbose", "true")]);
    assert!(validate_parameters(&params, lookup_from(&values)).is_empty());
}

#[test]
fn missing_required_parameter() {
    let params = vec![Parameter::new("id", ParamLocation::Path, "integer", true)];
    let values = HashMap::new();
    let errors = validate_parameters(&params, lookup_from(&values));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, "id");
    assert_eq!(errors[0].kind, ErrorKind::Required);
    assert_eq!(errors[0].message, "Required parameter 'id' is missing");
}

#[test]
fn empty_string_counts_as_missing() {
    let params = vec![Parameter::new("id", ParamLocation::Query, "integer", true)];
    let values = HashMap::from([("id", "")]);
    let errors = validate_parameters(&params, lookup_from(&values));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, ErrorKind::Required);
}

#[test]
fn missing_optional_parameter_is_fine() {
    let params = vec![Parameter::new("page", ParamLocation::Query, "integer", false)];
    let values = HashMap::new();
    assert!(validate_parameters(&params, lookup_from(&values)).is_empty());
}

#[test]
fn wrong_type_reports_declared_type_name() {
    let params = vec![Parameter::new("page", ParamLocation::Query, "integer", false)];
    let values = HashMap::from([("page", "two")]);
    let errors = validate_parameters(&params, lookup_from(&values));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, "page");
    assert_eq!(errors[0].kind, ErrorKind::TypeError);
    assert_eq!(errors[0].message, "Parameter 'page' must be of type integer");
}

#[test]
fn unknown_declared_type_never_fails() {
    let params = vec![Parameter::new("token", ParamLocation::Header, "opaque", true)];
    let values = HashMap::from([("token", "whatever")]);
    assert!(validate_parameters(&params, lookup_from(&values)).is_empty());
}

#[test]
fn multiple_parameter_errors_collected() {
    let params = vec![
        Parameter::new("id", ParamLocation::Path, "integer", true),
        Parameter::new("flag", ParamLocation::Query, "boolean", true),
    ];
    let values = HashMap::from([("flag", "maybe")]);
    let errors = validate_parameters(&params, lookup_from(&values));
    assert_eq!(errors.len(), 2);
}
