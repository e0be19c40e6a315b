use super::*;
use rust_decimal::dec;

// =============================================================================
// format_money
// =============================================================================

#[test]
fn format_money_pads_cents() {
    assert_eq!(format_money(dec!(1234.5)), "$1,234.50");
}

#[test]
fn format_money_small_values() {
    assert_eq!(format_money(dec!(0)), "$0.00");
    assert_eq!(format_money(dec!(7.1)), "$7.10");
    assert_eq!(format_money(dec!(999.99)), "$999.99");
}

#[test]
fn format_money_groups_thousands() {
    assert_eq!(format_money(dec!(1000000)), "$1,000,000.00");
}

#[test]
fn format_money_negative() {
    assert_eq!(format_money(dec!(-30.5)), "-$30.50");
}

// =============================================================================
// BalanceForm
// =============================================================================

#[test]
fn balance_form_picks_known_fields() {
    let fields = HashMap::from([
        ("csrfmiddlewaretoken".to_owned(), "tok".to_owned()),
        ("password".to_owned(), "engine".to_owned()),
        ("account_type".to_owned(), "savings".to_owned()),
    ]);
    let form = BalanceForm::from_fields(fields);
    assert_eq!(form, BalanceForm { password: "engine".into(), account_type: "savings".into() });
}

#[test]
fn balance_form_defaults_missing_fields() {
    assert_eq!(BalanceForm::from_fields(HashMap::new()), BalanceForm::default());
}

// =============================================================================
// wire shapes
// =============================================================================

#[test]
fn balance_body_is_numeric() {
    let json = serde_json::to_value(BalanceBody { balance: dec!(1234.50) }).unwrap();
    assert_eq!(json, serde_json::json!({ "balance": 1234.5 }));
}

#[test]
fn send_money_request_deserializes() {
    let body: SendMoneyRequest =
        serde_json::from_str(r#"{"amount":"12.00","account_type":"chequing","email":"b@x.com"}"#).unwrap();
    assert_eq!(body.amount, "12.00");
    assert_eq!(body.email, "b@x.com");
}

#[test]
fn async_request_header_detection() {
    let mut headers = HeaderMap::new();
    assert!(!is_async_request(&headers));
    headers.insert("x-requested-with", "xmlhttprequest".parse().unwrap());
    assert!(is_async_request(&headers));
}
