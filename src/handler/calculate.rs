//! Arithmetic route
//!
//! Parses and validates operands, runs the dispatcher, and turns the
//! outcome into a JSON response plus one log entry.

use hyper::{Response, StatusCode};

use super::types::{ErrorBody, SuccessBody};
use super::ServiceError;
use crate::arithmetic::{self, Operation};
use crate::config::{AppState, HttpConfig};
use crate::http::{self, ResponseBody};

/// Raw operand query parameters. The first occurrence of a key wins.
#[derive(Debug, Default)]
struct OperandQuery {
    n1: Option<String>,
    n2: Option<String>,
}

impl OperandQuery {
    fn parse(query: &str) -> Result<Self, serde_urlencoded::de::Error> {
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query)?;
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "n1" => &mut params.n1,
                "n2" => &mut params.n2,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        Ok(params)
    }
}

/// A completed computation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calculation {
    pub operation: Operation,
    pub n1: f64,
    /// NaN when the operation takes a single operand and none was given
    pub n2: f64,
    pub result: f64,
}

/// Parse one operand. Missing, empty, unparsable and NaN values are rejected.
pub fn parse_operand(raw: Option<&str>) -> Option<f64> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|n| !n.is_nan())
}

const fn invalid_input(operation: Operation) -> ServiceError {
    if operation.arity() == 1 {
        ServiceError::InvalidInput(ServiceError::ONE_OPERAND_REQUIRED)
    } else {
        ServiceError::InvalidInput(ServiceError::TWO_OPERANDS_REQUIRED)
    }
}

/// Validate the request and compute the result
pub fn evaluate(segment: &str, query: Option<&str>) -> Result<Calculation, ServiceError> {
    let operation: Operation = segment.parse()?;

    let params = match query {
        Some(q) => OperandQuery::parse(q).map_err(|_| invalid_input(operation))?,
        None => OperandQuery::default(),
    };

    let n1 = parse_operand(params.n1.as_deref()).ok_or_else(|| invalid_input(operation))?;
    // Only operands the operation consumes are validated
    let n2 = if operation.arity() == 1 {
        parse_operand(params.n2.as_deref()).unwrap_or(f64::NAN)
    } else {
        parse_operand(params.n2.as_deref()).ok_or_else(|| invalid_input(operation))?
    };

    let result = arithmetic::perform(operation, n1, n2)?;
    Ok(Calculation {
        operation,
        n1,
        n2,
        result,
    })
}

/// Handle `/{segment}?{query}` end to end
pub fn respond(segment: &str, query: Option<&str>, state: &AppState) -> Response<ResponseBody> {
    let http_config = &state.config.http;

    let outcome = evaluate(segment, query).and_then(|calc| {
        let body = SuccessBody {
            status_code: StatusCode::OK.as_u16(),
            result: calc.result,
        };
        let resp = http::build_json_response(StatusCode::OK, &body, http_config)
            .map_err(|e| ServiceError::Unexpected(format!("Failed to serialize response: {e}")))?;
        Ok((calc, resp))
    });

    match outcome {
        Ok((calc, resp)) => {
            state
                .logger
                .log_operation_performed(calc.operation.as_str(), calc.n1, calc.n2, calc.result);
            resp
        }
        Err(err) => {
            state.logger.log_operation_failed(segment, &err.to_string());
            error_response(&err, http_config)
        }
    }
}

/// Render a `ServiceError` as `{statusCode, message}`
pub fn error_response(err: &ServiceError, http_config: &HttpConfig) -> Response<ResponseBody> {
    let status = err.status_code();
    let message = err.to_string();
    let body = ErrorBody {
        status_code: status.as_u16(),
        message: &message,
    };
    http::build_json_response(status, &body, http_config)
        .unwrap_or_else(|_| http::build_500_response(http_config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arithmetic::ArithmeticError;
    use crate::config::Config;
    use crate::logger::Logger;
    use http_body_util::BodyExt;
    use std::path::Path;
    use std::sync::Arc;

    fn test_state(dir: &Path) -> AppState {
        let mut config = Config::load_from("does-not-exist/config").unwrap();
        config.logging.console = false;
        config.logging.error_log_file = Some(dir.join("error.log").to_string_lossy().into_owned());
        config.logging.combined_log_file =
            Some(dir.join("combined.log").to_string_lossy().into_owned());
        let logger = Arc::new(Logger::from_config(&config.logging).unwrap());
        AppState::new(config, logger)
    }

    async fn body_text(resp: Response<ResponseBody>) -> String {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn body_json(resp: Response<ResponseBody>) -> serde_json::Value {
        serde_json::from_str(&body_text(resp).await).unwrap()
    }

    #[test]
    fn test_parse_operand() {
        assert_eq!(parse_operand(Some("2")), Some(2.0));
        assert_eq!(parse_operand(Some(" -3.5 ")), Some(-3.5));
        assert_eq!(parse_operand(Some("1e3")), Some(1000.0));
        assert_eq!(parse_operand(Some("inf")), Some(f64::INFINITY));
        assert_eq!(parse_operand(Some("abc")), None);
        assert_eq!(parse_operand(Some("NaN")), None);
        assert_eq!(parse_operand(Some("")), None);
        assert_eq!(parse_operand(None), None);
    }

    #[test]
    fn test_evaluate_two_operands() {
        let calc = evaluate("add", Some("n1=2&n2=3")).unwrap();
        assert_eq!(calc.operation, Operation::Add);
        assert_eq!(calc.result, 5.0);

        let calc = evaluate("divide", Some("n1=10&n2=2")).unwrap();
        assert_eq!(calc.result, 5.0);
    }

    #[test]
    fn test_evaluate_url_encoded_operand() {
        let calc = evaluate("subtract", Some("n1=%2D4&n2=+1")).unwrap();
        assert_eq!(calc.result, -5.0);
    }

    #[test]
    fn test_evaluate_sqrt_single_operand() {
        let calc = evaluate("sqrt", Some("n1=81")).unwrap();
        assert_eq!(calc.result, 9.0);
        assert!(calc.n2.is_nan());

        // A second operand is accepted and ignored
        let calc = evaluate("sqrt", Some("n1=4&n2=junk")).unwrap();
        assert_eq!(calc.result, 2.0);
    }

    #[test]
    fn test_evaluate_sqrt_ignores_repeated_second_operand() {
        let calc = evaluate("sqrt", Some("n1=4&n2=1&n2=2")).unwrap();
        assert_eq!(calc.result, 2.0);
        assert_eq!(calc.n2, 1.0);
    }

    #[test]
    fn test_evaluate_repeated_keys_use_first_value() {
        let calc = evaluate("subtract", Some("n1=10&n1=99&n2=3&n2=x")).unwrap();
        assert_eq!(calc.n1, 10.0);
        assert_eq!(calc.n2, 3.0);
        assert_eq!(calc.result, 7.0);

        // Unrelated keys are ignored
        let calc = evaluate("add", Some("debug=1&n1=1&n2=2")).unwrap();
        assert_eq!(calc.result, 3.0);
    }

    #[test]
    fn test_evaluate_invalid_input() {
        let err = evaluate("add", Some("n1=2")).unwrap_err();
        assert_eq!(err.to_string(), ServiceError::TWO_OPERANDS_REQUIRED);

        let err = evaluate("multiply", Some("n1=x&n2=2")).unwrap_err();
        assert_eq!(err.to_string(), ServiceError::TWO_OPERANDS_REQUIRED);

        let err = evaluate("sqrt", None).unwrap_err();
        assert_eq!(err.to_string(), ServiceError::ONE_OPERAND_REQUIRED);

        let err = evaluate("add", Some("n1=1&n2=abc")).unwrap_err();
        assert_eq!(err.to_string(), ServiceError::TWO_OPERANDS_REQUIRED);

        // A repeated key whose first value is invalid stays invalid
        let err = evaluate("add", Some("n1=abc&n1=2&n2=3")).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_evaluate_domain_errors() {
        assert!(matches!(
            evaluate("divide", Some("n1=5&n2=0")),
            Err(ServiceError::Arithmetic(ArithmeticError::DivisionByZero))
        ));
        assert!(matches!(
            evaluate("modulo", Some("n1=5&n2=0")),
            Err(ServiceError::Arithmetic(ArithmeticError::ModuloByZero))
        ));
        assert!(matches!(
            evaluate("sqrt", Some("n1=-4")),
            Err(ServiceError::Arithmetic(ArithmeticError::NegativeOperand))
        ));
        assert!(matches!(
            evaluate("foo", Some("n1=1&n2=2")),
            Err(ServiceError::Arithmetic(ArithmeticError::UnsupportedOperation(_)))
        ));
    }

    #[tokio::test]
    async fn test_respond_success_body_and_log() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path());

        let resp = respond("add", Some("n1=2&n2=3"), &state);
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_text(resp).await, r#"{"statusCode":200,"result":5}"#);

        let combined = std::fs::read_to_string(dir.path().join("combined.log")).unwrap();
        assert!(combined.contains("Operation performed: add with n1: 2, n2: 3, result: 5"));
        assert!(!dir.path().join("error.log").exists()
            || std::fs::read_to_string(dir.path().join("error.log")).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_respond_division_by_zero() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path());

        let resp = respond("divide", Some("n1=5&n2=0"), &state);
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = body_json(resp).await;
        assert_eq!(
            body,
            serde_json::json!({"statusCode": 400, "message": "Division by zero is not allowed."})
        );

        let errors = std::fs::read_to_string(dir.path().join("error.log")).unwrap();
        assert!(errors.contains(
            "Error performing operation: divide. Error: Division by zero is not allowed."
        ));
    }

    #[tokio::test]
    async fn test_respond_unknown_operation() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path());

        let resp = respond("foo", Some("n1=1&n2=2"), &state);
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = body_json(resp).await;
        assert_eq!(body["message"], "Invalid operation");
    }

    #[tokio::test]
    async fn test_respond_non_finite_result_is_null() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path());

        let resp = respond("exponentiation", Some("n1=10&n2=1000"), &state);
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_text(resp).await, r#"{"statusCode":200,"result":null}"#);
    }

    #[tokio::test]
    async fn test_unexpected_error_maps_to_500() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path());

        let err = ServiceError::Unexpected("boom".to_string());
        let resp = error_response(&err, &state.config.http);
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(resp).await;
        assert_eq!(body, serde_json::json!({"statusCode": 500, "message": "boom"}));
    }
}
