use super::*;

fn request(amount: Option<i64>, currency: Option<&str>, frequency: Option<&str>) -> CreatePaymentIntentRequest {
    CreatePaymentIntentRequest {
        amount,
        currency: currency.map(str::to_owned),
        frequency: frequency.map(str::to_owned),
    }
}

#[test]
fn minimum_amount_is_accepted() {
    let params = request(Some(100), None, None).validate().unwrap();
    assert_eq!(params.amount, 100);
    assert_eq!(params.currency, "usd");
    assert!(params.metadata.is_empty());
}

#[test]
fn below_minimum_is_rejected() {
    for amount in [Some(99), Some(0), Some(-500), None] {
        let err = request(amount, None, None).validate().unwrap_err();
        assert!(matches!(err, PaymentError::InvalidAmount), "{amount:?}");
    }
}

#[test]
fn invalid_amount_message_matches_form_copy() {
    assert_eq!(PaymentError::InvalidAmount.to_string(), "Invalid amount. Minimum donation is $1.00");
}

#[test]
fn currency_is_normalized() {
    assert_eq!(request(Some(500), Some(" EUR "), None).validate().unwrap().currency, "eur");
    assert_eq!(request(Some(500), Some(""), None).validate().unwrap().currency, "usd");
}

#[test]
fn one_time_frequency_is_recorded() {
    let params = request(Some(2500), None, Some("one-time")).validate().unwrap();
    assert_eq!(params.metadata.get("donation_type").map(String::as_str), Some("one-time"));
    assert!(!params.metadata.contains_key("recurring"));
}

#[test]
fn monthly_frequency_marks_recurring() {
    let params = request(Some(2500), None, Some("monthly")).validate().unwrap();
    assert_eq!(params.metadata.get("donation_type").map(String::as_str), Some("monthly"));
    assert_eq!(params.metadata.get("recurring").map(String::as_str), Some("true"));
}

#[test]
fn request_deserializes_with_missing_fields() {
    let req: CreatePaymentIntentRequest = serde_json::from_str(r#"{"amount":1000}"#).unwrap();
    assert_eq!(req.amount, Some(1000));
    assert!(req.currency.is_none());
    let empty: CreatePaymentIntentRequest = serde_json::from_str("{}").unwrap();
    assert!(empty.amount.is_none());
}

#[test]
fn response_uses_camel_case() {
    let json = serde_json::to_value(CreatePaymentIntentResponse { client_secret: "pi_1_secret".into() }).unwrap();
    assert_eq!(json["clientSecret"], "pi_1_secret");
}
