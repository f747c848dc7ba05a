//! # URL 빌더
//!
//! 프로바이더 엔드포인트 URL에 쿼리 파라미터를 붙이는 빌더입니다.
//!
//! - 파라미터는 **삽입 순서 그대로** 붙습니다. 일부 프로바이더는 쿼리 문자열 원문으로
//!   서명을 검증하므로 정렬하지 않습니다.
//! - [`UrlBuilder::query_param_opt`]에 `None`을 주면 파라미터 자체를 생략합니다 (`key=`를 만들지 않음).
//!   빈 문자열은 값이 있는 것으로 보고 `key=`로 남깁니다.
//! - 값은 `urlencoding`으로 퍼센트 인코딩됩니다. 이미 인코딩된 값을 그대로 넘겨야 하는
//!   경우 [`UrlBuilder::query_param_encoded`]를 사용합니다.
//!
//! ```rust,ignore
//! let url = UrlBuilder::from_base_url("https://provider.example/oauth/authorize")
//!     .query_param("response_type", "code")
//!     .query_param("client_id", &config.client_id)
//!     .query_param_encoded("scope", "https%3A%2F%2Fprovider.example%2Fprofile")
//!     .query_param("state", state)
//!     .build();
//! ```

use std::fmt::Display;

/// 순서 보존 쿼리 문자열 빌더
#[derive(Debug, Clone)]
pub struct UrlBuilder {
    base_url: String,
    params: Vec<(String, String)>,
}

impl UrlBuilder {
    pub fn from_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            params: Vec::new(),
        }
    }

    /// 파라미터를 인코딩하여 추가합니다.
    pub fn query_param<K, V>(mut self, key: K, value: V) -> Self
    where
        K: AsRef<str>,
        V: Display,
    {
        let encoded = urlencoding::encode(&value.to_string()).into_owned();
        self.params.push((urlencoding::encode(key.as_ref()).into_owned(), encoded));
        self
    }

    /// 값이 있을 때만 파라미터를 추가합니다. `None`이면 키 자체를 생략합니다.
    pub fn query_param_opt<K, V>(self, key: K, value: Option<V>) -> Self
    where
        K: AsRef<str>,
        V: Display,
    {
        match value {
            Some(value) => self.query_param(key, value),
            None => self,
        }
    }

    /// 이미 퍼센트 인코딩된 값을 다시 인코딩하지 않고 그대로 추가합니다.
    pub fn query_param_encoded<K, V>(mut self, key: K, value: V) -> Self
    where
        K: AsRef<str>,
        V: Display,
    {
        self.params.push((urlencoding::encode(key.as_ref()).into_owned(), value.to_string()));
        self
    }

    pub fn build(&self) -> String {
        if self.params.is_empty() {
            return self.base_url.clone();
        }

        let query_string = self
            .params
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&");

        let separator = if !self.base_url.contains('?') {
            "?"
        } else if self.base_url.ends_with('?') || self.base_url.ends_with('&') {
            ""
        } else {
            "&"
        };

        format!("{}{}{}", self.base_url, separator, query_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Url;

    fn query_pairs(url: &str) -> Vec<(String, String)> {
        Url::parse(url)
            .unwrap()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    #[test]
    fn test_params_keep_insertion_order() {
        let url = UrlBuilder::from_base_url("https://example.com/authorize")
            .query_param("state", "xyz")
            .query_param("client_id", "abc")
            .query_param("response_type", "code")
            .build();

        assert_eq!(url, "https://example.com/authorize?state=xyz&client_id=abc&response_type=code");
    }

    #[test]
    fn test_round_trip_recovers_pairs() {
        let pairs = vec![
            ("redirect_uri", "https://app.example.com/callback?x=1&y=2"),
            ("scope", "r_liteprofile r_emailaddress"),
            ("name", "홍길동"),
            ("plus", "a+b=c"),
            ("empty", ""),
        ];

        let mut builder = UrlBuilder::from_base_url("https://example.com/authorize");
        for (k, v) in &pairs {
            builder = builder.query_param(*k, *v);
        }

        let expected: Vec<(String, String)> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        assert_eq!(query_pairs(&builder.build()), expected);
    }

    #[test]
    fn test_none_values_are_omitted() {
        let url = UrlBuilder::from_base_url("https://example.com/token")
            .query_param("code", "abc")
            .query_param_opt("open_id", None::<String>)
            .query_param_opt("grant_type", Some("authorization_code"))
            .build();

        assert_eq!(url, "https://example.com/token?code=abc&grant_type=authorization_code");
        assert!(!url.contains("open_id"));
    }

    #[test]
    fn test_empty_string_is_kept() {
        let url = UrlBuilder::from_base_url("https://example.com/authorize")
            .query_param("scope", "")
            .build();

        assert_eq!(url, "https://example.com/authorize?scope=");
    }

    #[test]
    fn test_pre_encoded_value_is_not_encoded_again() {
        let scope = "https%3A%2F%2Fwww.huawei.com%2Fauth%2Faccount%2Fbase.profile";
        let url = UrlBuilder::from_base_url("https://example.com/authorize")
            .query_param_encoded("scope", scope)
            .build();

        assert!(url.ends_with(&format!("scope={}", scope)));
        assert!(!url.contains("%253A"));
    }

    #[test]
    fn test_base_url_with_existing_query() {
        let url = UrlBuilder::from_base_url("https://example.com/rest.php?v=2")
            .query_param("access_token", "t")
            .build();

        assert_eq!(url, "https://example.com/rest.php?v=2&access_token=t");
    }

    #[test]
    fn test_numeric_values() {
        let url = UrlBuilder::from_base_url("https://example.com/userinfo")
            .query_param("nsp_ts", 1700000000000_i64)
            .build();

        assert_eq!(url, "https://example.com/userinfo?nsp_ts=1700000000000");
    }

    #[test]
    fn test_no_params_returns_base() {
        let url = UrlBuilder::from_base_url("https://example.com/me").build();

        assert_eq!(url, "https://example.com/me");
    }
}
