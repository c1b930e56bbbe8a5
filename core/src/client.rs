//! Generic REST client for the library API.
//!
//! # Design
//! `ApiClient` holds a `base_url` and a `Transport`. Each verb is split into
//! a `build_*` method that produces an `HttpRequest` and a `parse_*` method
//! that consumes an `HttpResponse`; the executing verbs (`get`, `post`,
//! `put`, `delete`) glue the two halves around `Transport::execute`.
//!
//! Write bodies are `application/x-www-form-urlencoded`. Fields whose value
//! is absent are left out of the body entirely.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::http::{
    HttpMethod, HttpRequest, HttpResponse, Transport, CONTENT_TYPE, FORM_URLENCODED,
};

#[derive(Debug, Clone)]
pub struct ApiClient<T> {
    base_url: String,
    transport: T,
}

impl<T> ApiClient<T> {
    pub fn new(base_url: &str, transport: T) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    pub fn build_get(&self, path: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: self.url(path),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Build a POST. The form content type is always declared; without
    /// `data` the request has no body.
    pub fn build_post<B: Serialize>(
        &self,
        path: &str,
        data: Option<&B>,
    ) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: self.url(path),
            headers: vec![(CONTENT_TYPE.to_string(), FORM_URLENCODED.to_string())],
            body: data.map(encode_form).transpose()?,
        })
    }

    pub fn build_put<B: Serialize>(&self, path: &str, data: &B) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Put,
            url: self.url(path),
            headers: vec![(CONTENT_TYPE.to_string(), FORM_URLENCODED.to_string())],
            body: Some(encode_form(data)?),
        })
    }

    pub fn build_delete(&self, path: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            url: self.url(path),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Decode the JSON body of a 2xx response.
    pub fn parse_json<R: DeserializeOwned>(&self, response: HttpResponse) -> Result<R, ApiError> {
        check_status(&response)?;
        serde_json::from_str(&response.body)
            .map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    /// 204 yields `None`; any other 2xx body is decoded.
    pub fn parse_delete<R: DeserializeOwned>(
        &self,
        response: HttpResponse,
    ) -> Result<Option<R>, ApiError> {
        check_status(&response)?;
        if response.status == 204 {
            return Ok(None);
        }
        serde_json::from_str(&response.body)
            .map(Some)
            .map_err(|e| ApiError::Deserialization(e.to_string()))
    }
}

impl<T: Transport> ApiClient<T> {
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        let req = self.build_get(path);
        let response = self.send(req)?;
        self.parse_json(response)
    }

    #[tracing::instrument(level = "debug", skip(self, data))]
    pub fn post<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        data: Option<&B>,
    ) -> Result<R, ApiError> {
        let req = self.build_post(path, data)?;
        let response = self.send(req)?;
        self.parse_json(response)
    }

    #[tracing::instrument(level = "debug", skip(self, data))]
    pub fn put<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        data: &B,
    ) -> Result<R, ApiError> {
        let req = self.build_put(path, data)?;
        let response = self.send(req)?;
        self.parse_json(response)
    }

    #[tracing::instrument(level = "debug", skip(self))]
    pub fn delete<R: DeserializeOwned>(&self, path: &str) -> Result<Option<R>, ApiError> {
        let req = self.build_delete(path);
        let response = self.send(req)?;
        self.parse_delete(response)
    }

    fn send(&self, req: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = req.method.as_str(), url = %req.url, "sending request");
        let response = self.transport.execute(req)?;
        if !response.is_success() {
            warn!(status = response.status, "request failed");
        }
        Ok(response)
    }
}

/// Encode a write payload as `key=value&...`, skipping absent fields.
pub fn encode_form<B: Serialize>(data: &B) -> Result<String, ApiError> {
    serde_urlencoded::to_string(data).map_err(|e| ApiError::Serialization(e.to_string()))
}

fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::Http {
        status: response.status,
    })
}
