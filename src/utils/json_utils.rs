//! # JSON 필드 접근 유틸리티
//!
//! 프로바이더 응답은 같은 필드를 문자열로 줄 때도, 숫자로 줄 때도 있습니다.
//! 어댑터가 응답 형식 차이를 신경 쓰지 않도록 느슨한 접근자를 제공합니다.

use serde_json::Value;
use crate::utils::string_utils::clean_optional_string;

/// 필드를 문자열로 읽습니다.
///
/// 문자열은 그대로, 숫자와 불리언은 문자열로 변환합니다.
/// 필드가 없거나 `null`이거나 공백뿐이면 `None`입니다.
pub fn str_field(object: &Value, key: &str) -> Option<String> {
    object.get(key).and_then(value_as_string)
}

/// 값 자체를 문자열로 읽습니다. 규칙은 [`str_field`]와 같습니다.
pub fn value_as_string(value: &Value) -> Option<String> {
    let raw = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    clean_optional_string(Some(raw))
}

/// 필드를 정수로 읽습니다. 없거나 해석할 수 없으면 0입니다.
///
/// `"7200"`처럼 문자열로 온 숫자도 받아들입니다.
pub fn int_field(object: &Value, key: &str) -> i64 {
    match object.get(key) {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

/// 필드가 존재하는지 확인합니다. 값이 `null`이어도 키가 있으면 `true`입니다.
pub fn has_field(object: &Value, key: &str) -> bool {
    object.as_object().is_some_and(|map| map.contains_key(key))
}
