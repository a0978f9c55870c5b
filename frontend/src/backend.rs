//! REST client for the hosted backend.

use gloo_net::http::{Request, RequestBuilder, Response};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::config::AppConfig;

/// The characters `encodeURIComponent` leaves alone.
pub const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("network error: {0}")]
    Network(String),

    #[error("request rejected ({status}): {message}")]
    Status { status: u16, message: String },

    #[error("unexpected response: {0}")]
    Decode(String),
}

impl From<gloo_net::Error> for BackendError {
    fn from(err: gloo_net::Error) -> Self {
        BackendError::Network(err.to_string())
    }
}

/// Query-string builder for table requests.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Query {
    params: Vec<(String, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(mut self, columns: &str) -> Self {
        self.params.push(("select".into(), columns.into()));
        self
    }

    pub fn eq(mut self, column: &str, value: &str) -> Self {
        self.params.push((column.into(), format!("eq.{}", value)));
        self
    }

    pub fn order(mut self, column: &str, ascending: bool) -> Self {
        let direction = if ascending { "asc" } else { "desc" };
        self.params
            .push(("order".into(), format!("{}.{}", column, direction)));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.params.push(("limit".into(), limit.to_string()));
        self
    }

    pub fn to_query_string(&self) -> String {
        self.params
            .iter()
            .map(|(key, value)| {
                format!(
                    "{}={}",
                    utf8_percent_encode(key, URI_COMPONENT),
                    utf8_percent_encode(value, URI_COMPONENT)
                )
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BackendClient {
    base_url: String,
    api_key: String,
}

impl BackendClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            base_url: config.api_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    pub fn table_url(&self, table: &str, query: &Query) -> String {
        let qs = query.to_query_string();
        if qs.is_empty() {
            format!("{}/rest/v1/{}", self.base_url, table)
        } else {
            format!("{}/rest/v1/{}?{}", self.base_url, table, qs)
        }
    }

    pub fn rpc_url(&self, name: &str) -> String {
        format!("{}/rest/v1/rpc/{}", self.base_url, name)
    }

    pub fn public_object_url(&self, bucket: &str, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url, bucket, path
        )
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.api_key)
            .header("Authorization", &format!("Bearer {}", self.api_key))
    }

    pub async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &Query,
    ) -> Result<Vec<T>, BackendError> {
        let url = self.table_url(table, query);
        let resp = self.authorize(Request::get(&url)).send().await?;
        let body = read_body(resp).await?;
        Ok(decode_body::<Vec<T>>(&body)?.unwrap_or_default())
    }

    /// First row matching `query`, or `None` when nothing matches.
    pub async fn select_one<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &Query,
    ) -> Result<Option<T>, BackendError> {
        let rows = self.select::<T>(table, &query.clone().limit(1)).await?;
        Ok(rows.into_iter().next())
    }

    pub async fn count(&self, table: &str, query: &Query) -> Result<u64, BackendError> {
        let url = self.table_url(table, &query.clone().select("id").limit(1));
        let resp = self
            .authorize(Request::get(&url))
            .header("Prefer", "count=exact")
            .send()
            .await?;
        let range = resp.headers().get("Content-Range");
        read_body(resp).await?;
        range
            .as_deref()
            .and_then(parse_content_range_total)
            .ok_or_else(|| BackendError::Decode("missing Content-Range total".into()))
    }

    pub async fn insert<B, T>(&self, table: &str, row: &B) -> Result<T, BackendError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.table_url(table, &Query::new());
        let req = self
            .authorize(Request::post(&url))
            .header("Prefer", "return=representation")
            .json(row)?;
        let body = read_body(req.send().await?).await?;
        decode_body::<Vec<T>>(&body)?
            .and_then(|rows| rows.into_iter().next())
            .ok_or_else(|| BackendError::Decode(format!("insert into {} returned no row", table)))
    }

    pub async fn update<B>(&self, table: &str, query: &Query, changes: &B) -> Result<(), BackendError>
    where
        B: Serialize + ?Sized,
    {
        let url = self.table_url(table, query);
        let req = self.authorize(Request::patch(&url)).json(changes)?;
        read_body(req.send().await?).await?;
        Ok(())
    }

    pub async fn delete(&self, table: &str, query: &Query) -> Result<(), BackendError> {
        let url = self.table_url(table, query);
        read_body(self.authorize(Request::delete(&url)).send().await?).await?;
        Ok(())
    }

    /// Calls a remote procedure. A `null` or empty result is `Ok(None)`.
    pub async fn rpc<A, T>(&self, name: &str, args: &A) -> Result<Option<T>, BackendError>
    where
        A: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.rpc_url(name);
        let req = self.authorize(Request::post(&url)).json(args)?;
        let body = read_body(req.send().await?).await?;
        decode_body(&body)
    }

    /// Uploads a file under a fresh name and returns its public URL.
    pub async fn upload(&self, bucket: &str, file: &web_sys::File) -> Result<String, BackendError> {
        let path = object_name(&file.name());
        let url = format!("{}/storage/v1/object/{}/{}", self.base_url, bucket, path);
        let content_type = file.type_();
        let mut builder = self.authorize(Request::post(&url));
        if !content_type.is_empty() {
            builder = builder.header("Content-Type", &content_type);
        }
        let req = builder.body(file.clone())?;
        read_body(req.send().await?).await?;
        tracing::info!(bucket, path = %path, "uploaded file");
        Ok(self.public_object_url(bucket, &path))
    }
}

async fn read_body(resp: Response) -> Result<String, BackendError> {
    let status = resp.status();
    let ok = resp.ok();
    let body = resp.text().await?;
    if ok {
        Ok(body)
    } else {
        let message = error_message(&body);
        tracing::warn!(status, %message, "backend rejected request");
        Err(BackendError::Status { status, message })
    }
}

/// Decodes a response body, treating an empty body or `null` as `None`.
pub fn decode_body<T: DeserializeOwned>(body: &str) -> Result<Option<T>, BackendError> {
    let trimmed = body.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(None);
    }
    serde_json::from_str(trimmed)
        .map(Some)
        .map_err(|e| BackendError::Decode(e.to_string()))
}

/// Pulls `message` out of an error payload, falling back to the raw text.
pub fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| {
            json.get("message")
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.trim().to_string())
}

/// Total from a `Content-Range` header such as `0-0/42` or `*/0`.
pub fn parse_content_range_total(header: &str) -> Option<u64> {
    header.rsplit_once('/')?.1.trim().parse().ok()
}

fn object_name(original: &str) -> String {
    let id = uuid::Uuid::new_v4();
    match original.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()) => {
            format!("{}.{}", id, ext.to_ascii_lowercase())
        }
        _ => id.to_string(),
    }
}

/// Reads an explicit `null` as the field type's default.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// A row count that may arrive as a number or as a numeric string.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Count(pub u64);

impl<'de> Deserialize<'de> for Count {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        lenient_count(deserializer).map(Count)
    }
}

pub fn lenient_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Unsigned(u64),
        Signed(i64),
        Float(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Unsigned(n) => Ok(n),
        Raw::Signed(n) => Ok(n.max(0) as u64),
        Raw::Float(f) if f.is_finite() && f > 0.0 => Ok(f as u64),
        Raw::Float(_) => Ok(0),
        Raw::Text(s) => s.trim().parse::<u64>().map_err(D::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> BackendClient {
        BackendClient::new(&AppConfig {
            api_url: "https://example.test/".into(),
            api_key: "anon".into(),
            whatsapp_phone: "5511900000000".into(),
            store_name: "Store".into(),
        })
    }

    #[test]
    fn builds_table_urls() {
        let query = Query::new()
            .select("*,categories(name)")
            .eq("email", "a+b@x.com")
            .order("created_at", false);
        assert_eq!(
            client().table_url("users", &query),
            "https://example.test/rest/v1/users?select=*%2Ccategories(name)&email=eq.a%2Bb%40x.com&order=created_at.desc"
        );
        assert_eq!(
            client().table_url("products", &Query::new()),
            "https://example.test/rest/v1/products"
        );
    }

    #[test]
    fn builds_rpc_and_public_urls() {
        assert_eq!(
            client().rpc_url("get_total_users"),
            "https://example.test/rest/v1/rpc/get_total_users"
        );
        assert_eq!(
            client().public_object_url("product-images", "a.png"),
            "https://example.test/storage/v1/object/public/product-images/a.png"
        );
    }

    #[test]
    fn parses_content_range() {
        assert_eq!(parse_content_range_total("0-0/42"), Some(42));
        assert_eq!(parse_content_range_total("*/0"), Some(0));
        assert_eq!(parse_content_range_total("0-0/*"), None);
        assert_eq!(parse_content_range_total("garbage"), None);
    }

    #[test]
    fn decodes_null_and_empty_as_none() {
        assert_eq!(decode_body::<u64>("").unwrap(), None);
        assert_eq!(decode_body::<u64>(" null ").unwrap(), None);
        assert_eq!(decode_body::<u64>("7").unwrap(), Some(7));
        assert!(matches!(
            decode_body::<u64>("{"),
            Err(BackendError::Decode(_))
        ));
    }

    #[test]
    fn extracts_error_messages() {
        assert_eq!(
            error_message(r#"{"message":"duplicate key","code":"23505"}"#),
            "duplicate key"
        );
        assert_eq!(error_message("Bad Gateway"), "Bad Gateway");
    }

    #[test]
    fn counts_accept_numbers_and_strings() {
        let counts: Vec<Count> = serde_json::from_str(r#"[3, "12", 4.0, -1]"#).unwrap();
        assert_eq!(counts, vec![Count(3), Count(12), Count(4), Count(0)]);
        assert!(serde_json::from_str::<Count>(r#""many""#).is_err());
    }

    #[test]
    fn object_names_keep_a_clean_extension() {
        assert!(object_name("Photo.PNG").ends_with(".png"));
        assert!(!object_name("no-extension").contains('.'));
    }

    #[derive(Deserialize)]
    struct Row {
        #[serde(default, deserialize_with = "null_as_default")]
        description: String,
    }

    #[test]
    fn null_fields_fall_back_to_default() {
        let row: Row = serde_json::from_str(r#"{"description":null}"#).unwrap();
        assert_eq!(row.description, "");
        let row: Row = serde_json::from_str("{}").unwrap();
        assert_eq!(row.description, "");
    }
}
