//! Canned-response invoker for unit tests

use super::{Invoker, RequestConfig};
use crate::error::{Error, Result};
use crate::types::Query;
use async_trait::async_trait;
use reqwest::Method;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Replays queued bodies in order and records every call
#[derive(Debug, Default)]
pub(crate) struct ScriptedInvoker {
    bodies: Mutex<VecDeque<String>>,
    calls: Mutex<Vec<(String, Query)>>,
}

impl ScriptedInvoker {
    pub(crate) fn new<S: ToString>(bodies: impl IntoIterator<Item = S>) -> Self {
        Self {
            bodies: Mutex::new(bodies.into_iter().map(|b| b.to_string()).collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Calls made so far, as (url, query)
    pub(crate) fn calls(&self) -> Vec<(String, Query)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Invoker for ScriptedInvoker {
    async fn invoke(&self, _method: Method, url: &str, request: &RequestConfig) -> Result<String> {
        self.calls
            .lock()
            .unwrap()
            .push((url.to_string(), request.query.clone()));
        self.bodies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| Error::Other(format!("no scripted response left for {url}")))
    }
}
