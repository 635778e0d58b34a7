//! Test utilities for dispatcher tests.
//!
//! Scripted drivers that never touch the network, and a clock the test
//! controls.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use paperclip_core::{Completion, PromptContext, Provider, ProviderType};
use paperclip_error::{ProviderError, ProviderErrorKind};
use paperclip_interface::{CallResult, Clock, ProviderDriver};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// Driver answering from per-provider scripts and recording every call.
///
/// When a provider's script is empty the call succeeds with
/// `"answer from {id}"`.
#[derive(Default)]
pub struct ScriptedDriver {
    scripts: Mutex<HashMap<String, VecDeque<CallResult>>>,
    calls: Mutex<Vec<(String, PromptContext)>>,
}

impl ScriptedDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `result` for the next call to `provider_id`.
    pub fn push(&self, provider_id: &str, result: CallResult) -> &Self {
        self.scripts
            .lock()
            .unwrap()
            .entry(provider_id.to_string())
            .or_default()
            .push_back(result);
        self
    }

    pub fn push_rate_limit(&self, provider_id: &str, retry_after_secs: u64) -> &Self {
        self.push(provider_id, Err(rate_limited(retry_after_secs)))
    }

    pub fn push_transient(&self, provider_id: &str) -> &Self {
        self.push(provider_id, Err(transient()))
    }

    pub fn push_success(&self, provider_id: &str, text: &str) -> &Self {
        self.push(
            provider_id,
            Ok(Completion::new(text, serde_json::json!({"text": text}))),
        )
    }

    /// Provider ids in call order.
    pub fn call_order(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(id, _)| id.clone())
            .collect()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Context handed to the n-th call.
    pub fn context_of(&self, index: usize) -> PromptContext {
        self.calls.lock().unwrap()[index].1.clone()
    }
}

#[async_trait]
impl ProviderDriver for ScriptedDriver {
    async fn call(&self, provider: &Provider, context: &PromptContext) -> CallResult {
        let id = provider.id().clone();
        self.calls
            .lock()
            .unwrap()
            .push((id.clone(), context.clone()));
        let scripted = self
            .scripts
            .lock()
            .unwrap()
            .get_mut(&id)
            .and_then(VecDeque::pop_front);
        scripted.unwrap_or_else(|| {
            Ok(Completion::new(
                format!("answer from {}", id),
                serde_json::Value::Null,
            ))
        })
    }

    fn driver_name(&self) -> &'static str {
        "scripted"
    }
}

/// Driver whose calls never complete.
pub struct PendingDriver;

#[async_trait]
impl ProviderDriver for PendingDriver {
    async fn call(&self, _provider: &Provider, _context: &PromptContext) -> CallResult {
        std::future::pending().await
    }

    fn driver_name(&self) -> &'static str {
        "pending"
    }
}

/// Clock that only moves when told to.
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Mutex::new(Utc.timestamp_opt(1_700_000_000, 0).unwrap()),
        }
    }

    pub fn advance(&self, seconds: i64) {
        let mut now = self.now.lock().unwrap();
        *now += Duration::seconds(seconds);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

pub fn rate_limited(retry_after_secs: u64) -> ProviderError {
    ProviderError::new(ProviderErrorKind::RateLimited {
        retry_after_secs,
        message: "quota exhausted".to_string(),
    })
}

pub fn transient() -> ProviderError {
    ProviderError::new(ProviderErrorKind::HttpStatus {
        status_code: 500,
        body: "internal error".to_string(),
    })
}

pub fn provider(id: &str, kind: ProviderType, priority: i32) -> Provider {
    Provider::builder()
        .id(id)
        .kind(kind)
        .model("m")
        .priority(priority)
        .build()
        .unwrap()
}

pub fn type_a() -> ProviderType {
    ProviderType::Other("a".to_string())
}

pub fn type_b() -> ProviderType {
    ProviderType::Other("b".to_string())
}
