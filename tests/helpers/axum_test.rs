// ABOUTME: In-process request driver for the Pantry router used by the HTTP test suites
// ABOUTME: Builds a request, runs it through the router with oneshot, and buffers the reply
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Food API

use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, Response, StatusCode},
    Router,
};
use serde::{de::DeserializeOwned, Serialize};
use tower::ServiceExt;

/// A request waiting to be sent to the router
pub struct AxumTestRequest {
    method: Method,
    uri: String,
    headers: Vec<(String, String)>,
    body: Option<String>,
}

impl AxumTestRequest {
    fn new(method: Method, uri: &str) -> Self {
        Self {
            method,
            uri: uri.to_owned(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// GET `uri`
    pub fn get(uri: &str) -> Self {
        Self::new(Method::GET, uri)
    }

    /// POST `uri`, usually followed by [`Self::json`] or [`Self::raw_json`]
    pub fn post(uri: &str) -> Self {
        Self::new(Method::POST, uri)
    }

    pub fn header(mut self, key: &str, value: &str) -> Self {
        self.headers.push((key.to_owned(), value.to_owned()));
        self
    }

    /// Serialize `data` as the body
    pub fn json<T: Serialize>(self, data: &T) -> Self {
        let body = serde_json::to_string(data).expect("request body should serialize");
        self.with_json_body(body)
    }

    /// Send `body` verbatim under a JSON content type, so handlers see it unparsed
    pub fn raw_json(self, body: &str) -> Self {
        self.with_json_body(body.to_owned())
    }

    fn with_json_body(mut self, body: String) -> Self {
        self.body = Some(body);
        self.headers.push((
            header::CONTENT_TYPE.as_str().to_owned(),
            "application/json".to_owned(),
        ));
        self
    }

    /// Run the request through `app` and collect the full reply
    pub async fn send(self, app: Router) -> AxumTestResponse {
        let mut builder = Request::builder().method(self.method).uri(self.uri);
        for (key, value) in self.headers {
            builder = builder.header(key, value);
        }

        let request = builder
            .body(Body::from(self.body.unwrap_or_default()))
            .expect("request should build");
        let response = app.oneshot(request).await.expect("router is infallible");

        AxumTestResponse::collect(response).await
    }
}

/// Status, headers, and the fully buffered body of a router reply
pub struct AxumTestResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl AxumTestResponse {
    async fn collect(response: Response<Body>) -> Self {
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("response body should be readable")
            .to_vec();
        Self {
            status,
            headers,
            body,
        }
    }

    /// Numeric status, so assertions can compare against plain integers
    pub const fn status(&self) -> u16 {
        self.status.as_u16()
    }

    pub fn header(&self, name: &str) -> Option<String> {
        self.headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(ToOwned::to_owned)
    }

    /// Decode the body, panicking with the raw text when it is not the expected shape
    pub fn json<T: DeserializeOwned>(self) -> T {
        serde_json::from_slice(&self.body).unwrap_or_else(|e| {
            panic!(
                "response body is not the expected JSON ({e}): {}",
                String::from_utf8_lossy(&self.body)
            )
        })
    }
}
