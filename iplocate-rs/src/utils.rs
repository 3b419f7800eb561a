use crate::errors::{IpLocateError, RATE_LIMIT_MESSAGE};
use crate::response::LookupResponse;
use crate::types::Config;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::{Client, Response, Url};
use serde_json::Value;
use std::borrow::Cow;
use std::net::IpAddr;

#[cfg(feature = "tracing")]
use tracing::{debug, error, info, instrument};

pub const USER_AGENT_VALUE: &str = concat!("iplocate-rs/", env!("CARGO_PKG_VERSION"));

const APIKEY_PARAM: &str = "apikey";

/// True for any IPv4 or IPv6 textual address.
pub fn is_valid_ip(ip: &str) -> bool {
    ip.parse::<IpAddr>().is_ok()
}

/// Percent-encodes an address for use as a path segment, so `::1` becomes `%3A%3A1`.
pub fn encode_ip(ip: &str) -> Cow<'_, str> {
    urlencoding::encode(ip)
}

pub(crate) fn build_url(
    base_url: &str,
    path: &str,
    api_key: &str,
    extra_query: &[(String, String)],
) -> Result<Url, IpLocateError> {
    let mut url = Url::parse(&format!("{base_url}{path}"))
        .map_err(|e| IpLocateError::Client(format!("Request failed: {e}")))?;

    let existing: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != APIKEY_PARAM)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    url.query_pairs_mut()
        .clear()
        .extend_pairs(
            existing
                .iter()
                .chain(extra_query)
                .filter(|(key, _)| key != APIKEY_PARAM),
        )
        .append_pair(APIKEY_PARAM, api_key);

    Ok(url)
}

pub(crate) fn request_headers(overrides: &HeaderMap) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

    for name in overrides.keys() {
        headers.remove(name);
    }
    for (name, value) in overrides {
        headers.append(name, value.clone());
    }
    headers
}

#[cfg_attr(feature = "tracing", instrument(skip(client, config, api_key)))]
pub async fn send_request(
    client: &Client,
    config: &Config,
    api_key: &str,
    path: &str,
) -> Result<LookupResponse, IpLocateError> {
    let options = &config.http_client_options;
    let url = build_url(&config.base_url, path, api_key, &options.query)?;
    let headers = request_headers(&options.headers);
    #[cfg(feature = "tracing")]
    debug!(base_url = %config.base_url, path, "Sending request to IPLocate");

    let result = match tokio::time::timeout(config.timeout, execute(client, url, headers)).await {
        Ok(result) => result,
        Err(_) => Err(IpLocateError::Client(format!(
            "Request timeout after {}ms",
            config.timeout.as_millis()
        ))),
    };

    #[cfg(feature = "tracing")]
    match &result {
        Ok(lookup) => info!(ip = %lookup.ip, "IPLocate lookup successful"),
        Err(err) => error!(kind = ?err.kind(), error = %err, "IPLocate lookup failed"),
    }

    result
}

async fn execute(
    client: &Client,
    url: Url,
    headers: HeaderMap,
) -> Result<LookupResponse, IpLocateError> {
    let res = client.get(url).headers(headers).send().await?;

    let status = res.status();
    if !status.is_success() {
        return Err(error_from_response(res).await);
    }

    let body = res.bytes().await?;
    serde_json::from_slice(&body)
        .map_err(|e| IpLocateError::Client(format!("Invalid response body: {e}")))
}

async fn error_from_response(res: Response) -> IpLocateError {
    let status = res.status();
    let reported = res
        .json::<Value>()
        .await
        .ok()
        .and_then(|body| body.get("error").and_then(error_message));

    let message = match reported {
        Some(message) => message,
        None if status.as_u16() == 429 => RATE_LIMIT_MESSAGE.to_string(),
        None => format!(
            "HTTP {}: {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or_default()
        )
        .trim_end()
        .to_string(),
    };

    IpLocateError::from_status(status.as_u16(), message)
}

/// Text of a body's `error` field. Empty, null, false and zero count as absent.
fn error_message(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderName;
    use serde_json::json;

    #[test]
    fn accepts_ipv4_and_ipv6() {
        for ip in [
            "8.8.8.8",
            "192.168.1.1",
            "0.0.0.0",
            "::1",
            "::",
            "2001:4860:4860::8888",
            "2001:4860:4860:0000:0000:0000:0000:8888",
            "::ffff:192.0.2.1",
        ] {
            assert!(is_valid_ip(ip), "{ip}");
        }
    }

    #[test]
    fn rejects_malformed_addresses() {
        for ip in [
            "",
            "invalid-ip",
            "256.256.256.256",
            "192.168.1",
            "192.168.1.1.1",
            " 8.8.8.8",
            "8.8.8.8/24",
            "2001:4860:4860::8888::1",
            "gggg::1",
        ] {
            assert!(!is_valid_ip(ip), "{ip}");
        }
    }

    #[test]
    fn encodes_like_a_uri_component() {
        assert_eq!(encode_ip("8.8.8.8"), "8.8.8.8");
        assert_eq!(encode_ip("::1"), "%3A%3A1");
        assert_eq!(
            encode_ip("2001:4860:4860::8888"),
            "2001%3A4860%3A4860%3A%3A8888"
        );
    }

    #[test]
    fn url_keeps_encoded_path_and_sets_apikey() {
        let path = format!("/lookup/{}", encode_ip("2001:4860:4860::8888"));
        let url = build_url("https://iplocate.io/api", &path, "secret", &[]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://iplocate.io/api/lookup/2001%3A4860%3A4860%3A%3A8888?apikey=secret"
        );
    }

    #[test]
    fn configured_apikey_beats_every_other_source() {
        let extra = vec![
            ("apikey".to_string(), "spoofed".to_string()),
            ("lang".to_string(), "en".to_string()),
        ];
        let url = build_url("https://example.com/api", "/lookup/", "secret", &extra).unwrap();

        let keys: Vec<_> = url
            .query_pairs()
            .filter(|(key, _)| key == "apikey")
            .map(|(_, value)| value.into_owned())
            .collect();
        assert_eq!(keys, vec!["secret".to_string()]);
        assert!(url.query_pairs().any(|(k, v)| k == "lang" && v == "en"));
    }

    #[test]
    fn self_lookup_path_has_no_address_segment() {
        let url = build_url("https://iplocate.io/api", "/lookup/", "k", &[]).unwrap();
        assert_eq!(url.path(), "/api/lookup/");
    }

    #[test]
    fn unparsable_target_is_a_client_error() {
        let err = build_url("not a url", "/lookup/", "k", &[]).unwrap_err();
        assert_eq!(err.kind(), crate::errors::ErrorKind::Client);
    }

    #[test]
    fn error_field_of_any_json_type_becomes_the_message() {
        assert_eq!(
            error_message(&json!("Invalid API key")).as_deref(),
            Some("Invalid API key")
        );
        assert_eq!(error_message(&json!(1234)).as_deref(), Some("1234"));
        assert_eq!(error_message(&json!(true)).as_deref(), Some("true"));
        assert_eq!(error_message(&json!("")), None);
        assert_eq!(error_message(&json!(null)), None);
        assert_eq!(error_message(&json!(false)), None);
        assert_eq!(error_message(&json!(0)), None);
    }

    #[test]
    fn caller_headers_override_defaults() {
        let mut overrides = HeaderMap::new();
        overrides.insert(USER_AGENT, HeaderValue::from_static("my-app/1.0"));
        overrides.insert(
            HeaderName::from_static("x-trace"),
            HeaderValue::from_static("abc"),
        );

        let headers = request_headers(&overrides);
        assert_eq!(headers[ACCEPT], "application/json");
        assert_eq!(headers[USER_AGENT], "my-app/1.0");
        assert_eq!(headers.get_all(USER_AGENT).iter().count(), 1);
        assert_eq!(headers["x-trace"], "abc");
    }

    #[test]
    fn default_headers_without_overrides() {
        let headers = request_headers(&HeaderMap::new());
        assert_eq!(headers[ACCEPT], "application/json");
        assert_eq!(headers[USER_AGENT], USER_AGENT_VALUE);
        assert!(USER_AGENT_VALUE.starts_with("iplocate-rs/"));
    }
}
