#![allow(dead_code)]

use async_trait::async_trait;
use domain::{Oid, RawSample, WireValue};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use ups_catalog::{Catalog, CatalogKind};
use ups_collector::CollectionEngine;
use ups_protocol::{ProtocolClient, ProtocolError, ProtocolSession, SnmpConfig};

pub const TARGET: &str = "10.0.0.5";

/// 假设备的行为。
#[derive(Clone)]
pub enum Behavior {
    Respond(Vec<RawSample>),
    FailOpen,
    FailRead,
}

/// 记录打开与关闭次数的内存客户端。
pub struct MockClient {
    behavior: Behavior,
    pub opened: Arc<AtomicUsize>,
    pub closed: Arc<AtomicUsize>,
    pub requested: Arc<AtomicUsize>,
}

impl MockClient {
    pub fn new(behavior: Behavior) -> Self {
        Self {
            behavior,
            opened: Arc::new(AtomicUsize::new(0)),
            closed: Arc::new(AtomicUsize::new(0)),
            requested: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }
}

struct MockSession {
    behavior: Behavior,
    closed: Arc<AtomicUsize>,
    requested: Arc<AtomicUsize>,
}

#[async_trait]
impl ProtocolClient for MockClient {
    async fn open(&self, _config: &SnmpConfig) -> Result<Box<dyn ProtocolSession>, ProtocolError> {
        if matches!(self.behavior, Behavior::FailOpen) {
            return Err(ProtocolError::Connection("unreachable".to_string()));
        }
        self.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MockSession {
            behavior: self.behavior.clone(),
            closed: self.closed.clone(),
            requested: self.requested.clone(),
        }))
    }
}

#[async_trait]
impl ProtocolSession for MockSession {
    async fn get(&mut self, ids: &[Oid]) -> Result<Vec<RawSample>, ProtocolError> {
        self.requested.store(ids.len(), Ordering::SeqCst);
        match &self.behavior {
            Behavior::Respond(samples) => Ok(samples.clone()),
            _ => Err(ProtocolError::Timeout("no response".to_string())),
        }
    }

    fn close(self: Box<Self>) {
        self.closed.fetch_add(1, Ordering::SeqCst);
    }
}

pub fn oid(text: &str) -> Oid {
    text.parse().expect("oid")
}

pub fn raw(text: &str, value: WireValue) -> RawSample {
    RawSample::new(oid(text), value)
}

pub fn engine(kind: CatalogKind, client: Arc<MockClient>) -> CollectionEngine {
    let catalog = Arc::new(Catalog::for_kind(kind).expect("catalog"));
    CollectionEngine::new(client, catalog, SnmpConfig::new(TARGET))
}
