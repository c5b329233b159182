//! String-to-number normalization of API mappings.

use etrade_chains::normalize::parse_literal;
use etrade_chains::strvals_to_real;
use etrade_chains::types::market::RawMap;
use serde_json::{Value, json};

fn map(v: Value) -> RawMap {
    match v {
        Value::Object(m) => m,
        other => panic!("not an object: {other}"),
    }
}

#[test]
fn converts_numeric_boolean_and_null_literals() {
    let input = map(json!({
        "bid": "1.5",
        "volume": "1200",
        "change": "-0.25",
        "adjustedFlag": "False",
        "inTheMoney": "True",
        "earningsDate": "None",
        "tiny": "1e-3",
    }));
    let out = strvals_to_real(&input);
    assert_eq!(
        Value::Object(out),
        json!({
            "bid": 1.5,
            "volume": 1200,
            "change": -0.25,
            "adjustedFlag": false,
            "inTheMoney": true,
            "earningsDate": null,
            "tiny": 0.001,
        })
    );
}

#[test]
fn unparsable_strings_are_kept() {
    let input = map(json!({
        "ask": "bad",
        "symbol": "IBM",
        "optionType": "CALL",
        "lowercase": "true",
        "padded": "007",
        "infinity": "inf",
        "nan": "nan",
        "empty": "",
        "quoted": "'abc'",
        "tuple": "(1, 2)",
        "parenthesized": "(1)",
        "list": "[1, 2]",
        "date": "06/21/2024",
    }));
    let out = strvals_to_real(&input);
    assert_eq!(out, input);
}

#[test]
fn integer_and_float_types_are_distinguished() {
    assert_eq!(parse_literal("42"), Some(json!(42)));
    assert!(parse_literal("42").unwrap().is_i64());
    assert!(parse_literal("42.0").unwrap().is_f64());
    assert!(parse_literal("1e5").unwrap().is_f64());
    assert_eq!(parse_literal("5."), Some(json!(5.0)));
    assert_eq!(parse_literal(".5"), Some(json!(0.5)));
}

#[test]
fn python_integer_forms() {
    assert_eq!(parse_literal("1_000"), Some(json!(1000)));
    assert_eq!(parse_literal("0x1F"), Some(json!(31)));
    assert_eq!(parse_literal("0o17"), Some(json!(15)));
    assert_eq!(parse_literal("0b101"), Some(json!(5)));
    assert_eq!(parse_literal("-0x10"), Some(json!(-16)));
    assert_eq!(parse_literal("0"), Some(json!(0)));
    assert_eq!(parse_literal("000"), Some(json!(0)));
    assert_eq!(parse_literal("+7"), Some(json!(7)));
    assert_eq!(parse_literal("  12\t"), Some(json!(12)));
    assert_eq!(parse_literal("1\n"), Some(json!(1)));
    assert_eq!(parse_literal("\n1"), Some(json!(1)));
    assert_eq!(parse_literal("1\r\n"), Some(json!(1)));
    assert_eq!(parse_literal("\t1\n"), Some(json!(1)));
    assert_eq!(parse_literal("- 3"), Some(json!(-3)));

    assert_eq!(parse_literal("1__000"), None);
    assert_eq!(parse_literal("_1"), None);
    assert_eq!(parse_literal("1_"), None);
    assert_eq!(parse_literal("0x"), None);
    assert_eq!(parse_literal("--5"), None);
    assert_eq!(parse_literal("-"), None);
    assert_eq!(parse_literal("-True"), None);
    assert_eq!(parse_literal("-\n3"), None);
}

#[test]
fn surrounding_line_breaks_are_trimmed() {
    let input = map(json!({ "bid": "1.5\r\n", "open": "\n2", "flag": " True\n" }));
    assert_eq!(
        Value::Object(strvals_to_real(&input)),
        json!({ "bid": 1.5, "open": 2, "flag": true })
    );
}

#[test]
fn out_of_range_values_stay_strings() {
    assert_eq!(parse_literal("18446744073709551615"), Some(json!(u64::MAX)));
    assert_eq!(parse_literal("99999999999999999999999"), None);
    assert_eq!(parse_literal("1e400"), None);
}

#[test]
fn nested_mappings_are_walked_but_sequences_are_not() {
    let input = map(json!({
        "OptionGreeks": { "delta": "0.52", "iv": "0.31", "currentValue": "False" },
        "list": ["1", "2"],
        "already": 3.5,
        "flag": true,
    }));
    let out = strvals_to_real(&input);
    assert_eq!(
        Value::Object(out),
        json!({
            "OptionGreeks": { "delta": 0.52, "iv": 0.31, "currentValue": false },
            "list": ["1", "2"],
            "already": 3.5,
            "flag": true,
        })
    );
}

#[test]
fn normalization_is_idempotent() {
    let input = map(json!({
        "a": "1", "b": "2.5", "c": "x", "d": "None", "e": { "f": "True", "g": "0x10", "h": "y" },
        "i": [ "3" ], "j": null, "k": "1_0.0_1",
    }));
    let once = strvals_to_real(&input);
    let twice = strvals_to_real(&once);
    assert_eq!(once, twice);
}

#[test]
fn key_order_is_preserved() {
    let input = map(json!({ "zeta": "1", "alpha": "2", "mid": "3" }));
    let keys: Vec<_> = strvals_to_real(&input).keys().cloned().collect();
    assert_eq!(keys, ["zeta", "alpha", "mid"]);
}
