use killfeed_relay::decoder::{decode_batch, scalar_to_string};
use serde_json::json;

#[test]
fn mixed_batch_keeps_the_valid_records() {
    let body = r#"[
        {"killTime": "2024-01-01 02:30:00", "solarSystemID": "30000142"},
        {"killID": "42", "killTime": "2024-01-01 02:45:00", "solarSystemID": "30000142"}
    ]"#;

    let records = decode_batch(body).expect("batch should decode");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].kill_id, "42");
}

#[test]
fn identifiers_tolerate_numeric_encodings() {
    let body = r#"[
        {"killID": "88", "killTime": "2024-01-01 02:00:00"},
        {"killID": 77, "killTime": "2024-01-01 02:00:00"},
        {"killID": 42.9, "killTime": "2024-01-01 02:00:00"}
    ]"#;

    let records = decode_batch(body).expect("batch should decode");
    let ids: Vec<&str> = records.iter().map(|r| r.kill_id.as_str()).collect();
    // Floats truncate toward zero rather than rounding.
    assert_eq!(ids, vec!["88", "77", "42"]);
}

#[test]
fn unconvertible_required_fields_drop_the_record() {
    let body = r#"[
        {"killID": true, "killTime": "2024-01-01 02:00:00"},
        {"killID": "1", "killTime": ["2024-01-01"]},
        {"killID": "2", "killTime": "yesterday"},
        {"killID": "3", "killTime": "2024-01-01 02:00:00"}
    ]"#;

    let records = decode_batch(body).expect("batch should decode");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].kill_id, "3");
}

#[test]
fn missing_location_leaves_the_record_intact() {
    let body = r#"[{"killID": "9", "killTime": "2024-01-01 02:00:00"}]"#;

    let records = decode_batch(body).expect("batch should decode");
    assert_eq!(records[0].system_id, None);
}

#[test]
fn numeric_location_is_converted_like_the_id() {
    let body = r#"[
        {"killID": "9", "killTime": "2024-01-01 02:00:00", "solarSystemID": 30000142}
    ]"#;

    let records = decode_batch(body).expect("batch should decode");
    assert_eq!(records[0].system_id.as_deref(), Some("30000142"));
}

#[test]
fn kill_value_degrades_to_zero_on_every_failure_mode() {
    let body = r#"[
        {"killID": "1", "killTime": "2024-01-01 02:00:00",
         "zkb": {"totalValue": 1500000000.5}},
        {"killID": "2", "killTime": "2024-01-01 02:00:00",
         "zkb": {"totalValue": "2500000000"}},
        {"killID": "3", "killTime": "2024-01-01 02:00:00",
         "zkb": {"totalValue": "lots"}},
        {"killID": "4", "killTime": "2024-01-01 02:00:00", "zkb": {}},
        {"killID": "5", "killTime": "2024-01-01 02:00:00", "zkb": [1, 2]},
        {"killID": "6", "killTime": "2024-01-01 02:00:00"}
    ]"#;

    let records = decode_batch(body).expect("batch should decode");
    assert_eq!(records.len(), 6);
    assert_eq!(records[0].value, 1500000000.5);
    assert_eq!(records[1].value, 2500000000.0);
    assert_eq!(records[2].value, 0.0);
    assert_eq!(records[3].value, 0.0);
    assert_eq!(records[4].value, 0.0);
    assert_eq!(records[5].value, 0.0);
}

#[test]
fn malformed_envelope_fails_the_whole_batch() {
    assert!(decode_batch("not json").is_err());
    assert!(decode_batch(r#"{"killID": "1"}"#).is_err());
    assert!(decode_batch(r#"[1, 2, 3]"#).is_err());
}

#[test]
fn empty_feed_decodes_to_no_records() {
    let records = decode_batch("[]").expect("empty array should decode");
    assert!(records.is_empty());
}

#[test]
fn scalar_conversion_rejects_non_scalar_shapes() {
    assert_eq!(scalar_to_string(&json!("abc")).as_deref(), Some("abc"));
    assert_eq!(scalar_to_string(&json!(12)).as_deref(), Some("12"));
    assert_eq!(scalar_to_string(&json!(-7.9)).as_deref(), Some("-7"));
    assert_eq!(scalar_to_string(&json!(true)), None);
    assert_eq!(scalar_to_string(&json!(null)), None);
    assert_eq!(scalar_to_string(&json!({"a": 1})), None);
}
