// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Process-wide transport stacks
//!
//! Three shared stacks, each with a single swappable dispatch slot:
//! the general async stack, a pool-tuned async stack for high-fanout
//! connection reuse, and the blocking stack (feature `blocking`).
//! Application code issues traffic through these; the instrumentation
//! controller swaps interceptors in and out of the slots.

use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use lazy_static::lazy_static;
use parking_lot::RwLock;

use crate::error::Result;
use crate::http::{Request, Response};
use crate::transport::dispatch::{ClientDispatch, Dispatch};

#[cfg(feature = "blocking")]
use crate::transport::dispatch::{BlockingClientDispatch, BlockingDispatch};

/// Identifies a transport stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StackKind {
    /// General-purpose async client stack
    Async,
    /// Connection-pool-tuned async stack
    Pool,
    /// Blocking client stack
    #[cfg(feature = "blocking")]
    Blocking,
}

impl fmt::Display for StackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StackKind::Async => write!(f, "async"),
            StackKind::Pool => write!(f, "pool"),
            #[cfg(feature = "blocking")]
            StackKind::Blocking => write!(f, "blocking"),
        }
    }
}

/// An asynchronous transport stack with a swappable dispatch slot
pub struct AsyncTransport {
    kind: StackKind,
    slot: RwLock<Arc<dyn Dispatch>>,
}

impl AsyncTransport {
    fn new(kind: StackKind, dispatch: Arc<dyn Dispatch>) -> Self {
        Self {
            kind,
            slot: RwLock::new(dispatch),
        }
    }

    /// Which stack this is
    pub fn kind(&self) -> StackKind {
        self.kind
    }

    /// Execute a request through the stack's current entry point
    pub async fn execute(&self, request: Request) -> Result<Response> {
        let dispatch = self.current();
        dispatch.dispatch(request).await
    }

    /// Execute a GET request
    pub async fn get(&self, url: impl AsRef<str>) -> Result<Response> {
        self.execute(Request::get(url)?).await
    }

    /// Execute a POST request
    pub async fn post(&self, url: impl AsRef<str>, body: impl Into<Bytes>) -> Result<Response> {
        self.execute(Request::post(url)?.body(body)).await
    }

    /// Execute multiple requests concurrently
    pub async fn execute_all(&self, requests: Vec<Request>) -> Vec<Result<Response>> {
        let futures: Vec<_> = requests.into_iter().map(|r| self.execute(r)).collect();
        futures::future::join_all(futures).await
    }

    /// Current entry point; in-flight calls keep their own clone
    pub(crate) fn current(&self) -> Arc<dyn Dispatch> {
        self.slot.read().clone()
    }

    /// Swap the entry point, returning the previous one
    pub(crate) fn install(&self, dispatch: Arc<dyn Dispatch>) -> Arc<dyn Dispatch> {
        std::mem::replace(&mut *self.slot.write(), dispatch)
    }
}

/// The blocking transport stack with a swappable dispatch slot
#[cfg(feature = "blocking")]
pub struct BlockingTransport {
    slot: RwLock<Arc<dyn BlockingDispatch>>,
}

#[cfg(feature = "blocking")]
impl BlockingTransport {
    fn new(dispatch: Arc<dyn BlockingDispatch>) -> Self {
        Self {
            slot: RwLock::new(dispatch),
        }
    }

    /// Execute a request through the stack's current entry point
    pub fn execute(&self, request: Request) -> Result<Response> {
        let dispatch = self.current();
        dispatch.dispatch(request)
    }

    /// Execute a GET request
    pub fn get(&self, url: impl AsRef<str>) -> Result<Response> {
        self.execute(Request::get(url)?)
    }

    /// Execute a POST request
    pub fn post(&self, url: impl AsRef<str>, body: impl Into<Bytes>) -> Result<Response> {
        self.execute(Request::post(url)?.body(body))
    }

    pub(crate) fn current(&self) -> Arc<dyn BlockingDispatch> {
        self.slot.read().clone()
    }

    pub(crate) fn install(&self, dispatch: Arc<dyn BlockingDispatch>) -> Arc<dyn BlockingDispatch> {
        std::mem::replace(&mut *self.slot.write(), dispatch)
    }
}

lazy_static! {
    static ref ASYNC_STACK: AsyncTransport = AsyncTransport::new(
        StackKind::Async,
        Arc::new(ClientDispatch::new().expect("failed to initialize async HTTP stack")),
    );
    static ref POOL_STACK: AsyncTransport = AsyncTransport::new(
        StackKind::Pool,
        Arc::new(ClientDispatch::pooled().expect("failed to initialize pooled HTTP stack")),
    );
}

#[cfg(feature = "blocking")]
lazy_static! {
    // Built on a dedicated thread: reqwest's blocking client constructor
    // panics when run inside an async runtime, and this lazy init may
    // first be reached from async code.
    static ref BLOCKING_STACK: BlockingTransport = BlockingTransport::new(Arc::new(
        std::thread::spawn(BlockingClientDispatch::new)
            .join()
            .expect("blocking HTTP stack init thread panicked")
            .expect("failed to initialize blocking HTTP stack")
    ));
}

/// The process-wide async client stack
pub fn async_stack() -> &'static AsyncTransport {
    &ASYNC_STACK
}

/// The process-wide connection-pool stack
pub fn pool_stack() -> &'static AsyncTransport {
    &POOL_STACK
}

/// The process-wide blocking client stack
#[cfg(feature = "blocking")]
pub fn blocking_stack() -> &'static BlockingTransport {
    &BLOCKING_STACK
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_stack_kinds_distinct() {
        assert_ne!(async_stack().kind(), pool_stack().kind());
        assert_eq!(StackKind::Pool.to_string(), "pool");
    }

    #[tokio::test]
    async fn test_execute_all_concurrent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/item"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .mount(&server)
            .await;

        let url = format!("{}/item", server.uri());
        let requests = (0..8)
            .map(|_| Request::get(&url).unwrap())
            .collect::<Vec<_>>();

        let results = async_stack().execute_all(requests).await;
        assert_eq!(results.len(), 8);
        for result in results {
            assert_eq!(result.unwrap().status_code(), 200);
        }
    }
}
