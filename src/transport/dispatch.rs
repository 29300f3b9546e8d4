// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Dispatch entry points backed by reqwest
//!
//! A dispatcher owns an HTTP client and turns a [`Request`] into a fully
//! buffered [`Response`]. Dispatchers add no retry, caching, or timeout
//! policy; per-request timeouts set by the caller pass through unchanged.

use std::time::{Duration, Instant};

use async_trait::async_trait;

use crate::error::Result;
use crate::http::{Request, Response, DEFAULT_USER_AGENT};

/// Idle connections kept per host by the pool stack
const POOL_MAX_IDLE_PER_HOST: usize = 32;

/// Idle timeout for pooled connections
const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);

/// Single dispatch entry point of an asynchronous transport stack
#[async_trait]
pub trait Dispatch: Send + Sync {
    /// Send a request and return the buffered response
    async fn dispatch(&self, request: Request) -> Result<Response>;
}

/// Single dispatch entry point of the blocking transport stack
#[cfg(feature = "blocking")]
pub trait BlockingDispatch: Send + Sync {
    /// Send a request and return the buffered response
    fn dispatch(&self, request: Request) -> Result<Response>;
}

/// Async dispatcher over a shared `reqwest::Client`
pub struct ClientDispatch {
    client: reqwest::Client,
}

impl ClientDispatch {
    /// Create a dispatcher with default client settings
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(DEFAULT_USER_AGENT)
            .build()?;
        Ok(Self { client })
    }

    /// Create a dispatcher acting as a low-level connection pool manager
    pub fn pooled() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(DEFAULT_USER_AGENT)
            .pool_max_idle_per_host(POOL_MAX_IDLE_PER_HOST)
            .pool_idle_timeout(POOL_IDLE_TIMEOUT)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Dispatch for ClientDispatch {
    async fn dispatch(&self, request: Request) -> Result<Response> {
        let start = Instant::now();

        let mut builder = self
            .client
            .request(request.method.clone(), request.url.clone());
        for (name, value) in request.headers.iter() {
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await?;

        let final_url = response.url().clone();
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;
        let elapsed_ms = start.elapsed().as_millis() as u64;

        Ok(Response::new(status, headers, body, final_url, elapsed_ms))
    }
}

/// Blocking dispatcher over a shared `reqwest::blocking::Client`
#[cfg(feature = "blocking")]
pub struct BlockingClientDispatch {
    client: reqwest::blocking::Client,
}

#[cfg(feature = "blocking")]
impl BlockingClientDispatch {
    /// Create a dispatcher with default client settings
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(DEFAULT_USER_AGENT)
            .build()?;
        Ok(Self { client })
    }
}

#[cfg(feature = "blocking")]
impl BlockingDispatch for BlockingClientDispatch {
    fn dispatch(&self, request: Request) -> Result<Response> {
        let start = Instant::now();

        let mut builder = self
            .client
            .request(request.method.clone(), request.url.clone());
        for (name, value) in request.headers.iter() {
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body.to_vec());
        }
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send()?;

        let final_url = response.url().clone();
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes()?;
        let elapsed_ms = start.elapsed().as_millis() as u64;

        Ok(Response::new(status, headers, body, final_url, elapsed_ms))
    }
}
