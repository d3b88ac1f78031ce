// Response body types for the arithmetic route

use serde::{Serialize, Serializer};

/// Successful computation
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuccessBody {
    pub status_code: u16,
    #[serde(serialize_with = "serialize_number")]
    pub result: f64,
}

/// Failed computation
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody<'a> {
    pub status_code: u16,
    pub message: &'a str,
}

/// 2^63, the first whole `f64` outside the `i64` range
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// Whole numbers in `i64` range as integers (`5`, not `5.0`),
/// other finite values as floats, non-finite values as `null`.
#[allow(clippy::cast_possible_truncation, clippy::trivially_copy_pass_by_ref)]
fn serialize_number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    let n = *value;
    if !n.is_finite() {
        serializer.serialize_none()
    } else if n.fract() == 0.0 && (-I64_BOUND..I64_BOUND).contains(&n) {
        serializer.serialize_i64(n as i64)
    } else {
        serializer.serialize_f64(n)
    }
}
