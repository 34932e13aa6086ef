//! Verify request building and response interpretation against the JSON
//! vectors stored in `test-vectors/`.
//!
//! Bodies are compared as parsed JSON, not raw strings, so field order in the
//! vectors does not matter.

use procuret_core::{
    ApiRequest, Error, HttpMethod, HttpResponse, QueryString, QueryTerm, QueryValue, Session,
};
use serde_json::Value;

fn parse_method(s: &str) -> HttpMethod {
    s.parse()
        .unwrap_or_else(|_| panic!("unknown method: {s}"))
}

fn query_value(value: &Value) -> QueryValue {
    match value {
        Value::String(text) => QueryValue::from(text.as_str()),
        Value::Bool(flag) => QueryValue::from(*flag),
        Value::Number(number) => match number.as_i64() {
            Some(integer) => QueryValue::from(integer),
            None => QueryValue::from(number.as_f64().unwrap()),
        },
        other => panic!("unsupported query value: {other}"),
    }
}

fn flag(case: &Value, name: &str) -> bool {
    case[name].as_bool().unwrap_or(false)
}

#[test]
fn request_test_vectors() {
    let raw = include_str!("../../test-vectors/requests.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();
    let endpoint = vectors["endpoint"].as_str().unwrap();
    let session = Session::new(
        vectors["session"]["api_key"].as_str().unwrap(),
        vectors["session"]["session_id"].as_str().unwrap(),
    );

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input = &case["input"];
        let expected = &case["expected_request"];

        let mut request = ApiRequest::new(
            input["path"].as_str().unwrap(),
            parse_method(input["method"].as_str().unwrap()),
        )
        .without_auth(flag(input, "without_auth"))
        .optional_auth(flag(input, "optional_auth"));
        if !flag(input, "without_session") {
            request = request.session(Some(session.clone()));
        }
        if let Some(parameters) = input["parameters"].as_array() {
            let terms = parameters
                .iter()
                .map(|pair| QueryTerm::new(pair[0].as_str().unwrap(), query_value(&pair[1])))
                .collect::<QueryString>();
            request = request.parameters(terms);
        }
        if let Some(body) = input.get("body") {
            request = request.body(body.clone());
        }

        let built = request.build(endpoint).unwrap();
        assert_eq!(
            built.method,
            parse_method(expected["method"].as_str().unwrap()),
            "{name}: method"
        );
        assert_eq!(
            built.url,
            format!("{endpoint}{}", expected["url"].as_str().unwrap()),
            "{name}: url"
        );

        let expected_headers: Vec<(String, String)> = expected["headers"]
            .as_array()
            .unwrap()
            .iter()
            .map(|h| {
                let pair = h.as_array().unwrap();
                (
                    pair[0].as_str().unwrap().to_string(),
                    pair[1].as_str().unwrap().to_string(),
                )
            })
            .collect();
        assert_eq!(built.headers, expected_headers, "{name}: headers");

        match &expected["body"] {
            Value::Null => assert!(built.body.is_none(), "{name}: body should be absent"),
            body => {
                let sent: Value = serde_json::from_str(built.body.as_deref().unwrap()).unwrap();
                assert_eq!(&sent, body, "{name}: body");
            }
        }
    }
}

#[test]
fn response_test_vectors() {
    let raw = include_str!("../../test-vectors/responses.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let request = ApiRequest::new("/vector", parse_method(case["method"].as_str().unwrap()))
            .do_not_escape_int(flag(case, "do_not_escape_int"))
            .throw_on_get_404(flag(case, "throw_on_get_404"));
        let response = HttpResponse::new(
            case["response"]["status"].as_u64().unwrap() as u16,
            case["response"]["body"].as_str().unwrap(),
        );

        let outcome = request.interpret(response);
        let expected = &case["expected"];
        match expected.get("error") {
            None => {
                let value = outcome.unwrap_or_else(|e| panic!("{name}: unexpected error {e}"));
                match &expected["value"] {
                    Value::Null => assert!(value.is_none(), "{name}: expected no value"),
                    wanted => assert_eq!(value.as_ref(), Some(wanted), "{name}: value"),
                }
            }
            Some(error) => {
                let Err(Error::Api(api_error)) = outcome else {
                    panic!("{name}: expected an API error, got {outcome:?}");
                };
                assert_eq!(
                    u64::from(api_error.code()),
                    error["code"].as_u64().unwrap(),
                    "{name}: code"
                );
                assert_eq!(
                    api_error.technical_description(),
                    error["technical"].as_str().unwrap(),
                    "{name}: technical description"
                );
                let summary = api_error.request_summary().unwrap();
                assert_eq!(summary.request_path, "/vector", "{name}: summary path");
            }
        }
    }
}
