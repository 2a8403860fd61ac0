//! 测试辅助模块
//!
//! 提供 mock `ZoneProvider` 和便捷的测试工厂方法。

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::time::Instant;
use zone_purge_provider::{ProviderError, Result, Zone, ZoneDeletion, ZoneProvider};

use crate::services::BatchDeleteService;
use crate::types::{BatchEvent, BatchReport, EventSink, LogLine, ProgressSnapshot};

/// Scripted behaviour for one domain.
#[derive(Debug, Clone)]
pub enum MockZone {
    /// Zone exists and deletes cleanly
    Exists(String),
    /// Zone exists but the API refuses the deletion
    Refused(String, String),
    /// Lookup fails with this error
    LookupFails(ProviderError),
    /// Lookup succeeds, delete fails with this error
    DeleteFails(String, ProviderError),
    /// Lookup panics
    Panics,
}

/// A recorded provider call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Find(String),
    Delete(String),
}

// ===== MockZoneProvider =====

pub struct MockZoneProvider {
    zones: HashMap<String, MockZone>,
    /// Simulated latency per call
    latency: Duration,
    calls: RwLock<Vec<(Call, Instant)>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockZoneProvider {
    pub fn new() -> Self {
        Self {
            zones: HashMap::new(),
            latency: Duration::ZERO,
            calls: RwLock::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    #[must_use]
    pub fn with_zone(mut self, domain: &str, zone: MockZone) -> Self {
        self.zones.insert(domain.to_string(), zone);
        self
    }

    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub async fn calls(&self) -> Vec<Call> {
        self.calls.read().await.iter().map(|(c, _)| c.clone()).collect()
    }

    /// Instants at which each `find_zone` call started.
    pub async fn lookup_starts(&self) -> Vec<Instant> {
        self.calls
            .read()
            .await
            .iter()
            .filter(|(c, _)| matches!(c, Call::Find(_)))
            .map(|(_, at)| *at)
            .collect()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    async fn enter(&self, call: Call) {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        self.calls.write().await.push((call, Instant::now()));
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    fn leave(&self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }

    fn zone_by_id(&self, zone_id: &str) -> Option<&MockZone> {
        self.zones.values().find(|z| match z {
            MockZone::Exists(id) | MockZone::Refused(id, _) | MockZone::DeleteFails(id, _) => {
                id == zone_id
            }
            _ => false,
        })
    }
}

#[async_trait]
impl ZoneProvider for MockZoneProvider {
    fn id(&self) -> &'static str {
        "mock"
    }

    async fn find_zone(&self, domain: &str) -> Result<Option<Zone>> {
        self.enter(Call::Find(domain.to_string())).await;
        let result = match self.zones.get(domain) {
            None => Ok(None),
            Some(MockZone::LookupFails(e)) => Err(e.clone()),
            Some(MockZone::Panics) => {
                self.leave();
                panic!("mock provider panicked on {domain}");
            }
            Some(
                MockZone::Exists(id) | MockZone::Refused(id, _) | MockZone::DeleteFails(id, _),
            ) => Ok(Some(Zone {
                id: id.clone(),
                name: domain.to_string(),
            })),
        };
        self.leave();
        result
    }

    async fn delete_zone(&self, zone_id: &str) -> Result<ZoneDeletion> {
        self.enter(Call::Delete(zone_id.to_string())).await;
        let result = match self.zone_by_id(zone_id) {
            Some(MockZone::Refused(_, reason)) => Ok(ZoneDeletion::rejected(reason.clone())),
            Some(MockZone::DeleteFails(_, e)) => Err(e.clone()),
            _ => Ok(ZoneDeletion::deleted()),
        };
        self.leave();
        result
    }
}

// ===== Factories =====

pub fn api_error(status: u16, message: &str) -> ProviderError {
    ProviderError::ApiError {
        provider: "mock".to_string(),
        status,
        method: "GET".to_string(),
        path: "/zones".to_string(),
        message: message.to_string(),
    }
}

pub fn network_error(detail: &str) -> ProviderError {
    ProviderError::NetworkError {
        provider: "mock".to_string(),
        detail: detail.to_string(),
    }
}

pub fn service(provider: &Arc<MockZoneProvider>) -> BatchDeleteService {
    BatchDeleteService::new(Arc::clone(provider) as Arc<dyn ZoneProvider>)
}

/// Everything a finished batch emitted, split by kind.
#[derive(Debug, Default)]
pub struct Collected {
    pub logs: Vec<LogLine>,
    pub progress: Vec<ProgressSnapshot>,
    pub outcomes: usize,
    pub finished: Option<BatchReport>,
    pub order: Vec<&'static str>,
}

impl Collected {
    pub fn messages(&self) -> Vec<&str> {
        self.logs.iter().map(|l| l.message.as_str()).collect()
    }
}

/// Drain a closed or finished event stream.
pub fn drain(rx: &mut tokio::sync::mpsc::UnboundedReceiver<BatchEvent>) -> Collected {
    let mut collected = Collected::default();
    while let Ok(event) = rx.try_recv() {
        match event {
            BatchEvent::Log(line) => {
                collected.order.push("log");
                collected.logs.push(line);
            }
            BatchEvent::Progress(p) => {
                collected.order.push("progress");
                collected.progress.push(p);
            }
            BatchEvent::Outcome(_) => {
                collected.order.push("outcome");
                collected.outcomes += 1;
            }
            BatchEvent::Finished(report) => {
                collected.order.push("finished");
                collected.finished = Some(report);
            }
        }
    }
    collected
}

/// Run a batch to completion and collect its events.
pub async fn run_collect(
    service: &BatchDeleteService,
    domains: &[&str],
) -> (BatchReport, Collected) {
    let request = crate::types::BatchRequest::new(domains).expect("valid batch");
    let (sink, mut rx) = EventSink::channel();
    let cancel = tokio_util::sync::CancellationToken::new();
    let report = service.run(&request, &sink, &cancel).await;
    (report, drain(&mut rx))
}
