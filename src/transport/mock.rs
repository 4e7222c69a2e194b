//! In-memory agent for testing.

use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::Mutex;
use std::time::Duration;

use crate::error::{Error, ErrorStatus, Result};
use crate::oid::Oid;
use crate::varbind::{RawValue, VarBind};

use super::Transport;

/// Kind of request seen by a [`MockAgent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Get,
    GetNext,
}

/// A request recorded by a [`MockAgent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockRequest {
    pub kind: RequestKind,
    pub oids: Vec<Oid>,
}

/// Failure injected by a [`MockAgent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockFailure {
    /// Agent returns an error status for the first var-bind.
    Status(ErrorStatus),
    /// Request times out.
    Timeout,
}

impl MockFailure {
    fn into_error(self) -> Error {
        match self {
            Self::Status(status) => Error::Snmp { status, index: 1 },
            Self::Timeout => Error::Timeout {
                elapsed: Duration::from_secs(5),
                retries: 0,
            },
        }
    }
}

/// In-memory SNMP agent over an ordered OID tree.
///
/// GET answers `noSuchObject` for unknown OIDs; GETNEXT answers
/// `endOfMibView` past the last OID. Every request is recorded, and a failure
/// can be injected for a given request number.
///
/// # Example
///
/// ```
/// use snmp_mibs::oid;
/// use snmp_mibs::transport::MockAgent;
///
/// let agent = MockAgent::new()
///     .with(oid!(1, 3, 6, 1, 2, 1, 1, 5, 0), "router1")
///     .with(oid!(1, 3, 6, 1, 2, 1, 2, 1, 0), 4);
/// assert_eq!(agent.len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct MockAgent {
    data: BTreeMap<Oid, RawValue>,
    requests: Mutex<Vec<MockRequest>>,
    failures: BTreeMap<usize, MockFailure>,
    latency: Option<Duration>,
}

impl MockAgent {
    /// Create an empty agent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an instance.
    pub fn with(mut self, oid: Oid, value: impl Into<RawValue>) -> Self {
        self.data.insert(oid, value.into());
        self
    }

    /// Add instances from var-binds.
    pub fn with_varbinds(mut self, varbinds: impl IntoIterator<Item = VarBind>) -> Self {
        self.data
            .extend(varbinds.into_iter().map(|vb| (vb.oid, vb.value)));
        self
    }

    /// Fail request number `request` (counting from 0).
    pub fn fail_on(mut self, request: usize, failure: MockFailure) -> Self {
        self.failures.insert(request, failure);
        self
    }

    /// Delay every response.
    pub fn latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Number of instances.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the agent holds no instances.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Requests seen so far, in order.
    pub fn requests(&self) -> Vec<MockRequest> {
        self.lock_requests().clone()
    }

    fn lock_requests(&self) -> std::sync::MutexGuard<'_, Vec<MockRequest>> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Record a request; returns the injected failure for it, if any.
    fn record(&self, kind: RequestKind, oids: &[Oid]) -> Option<MockFailure> {
        let mut requests = self.lock_requests();
        let number = requests.len();
        requests.push(MockRequest {
            kind,
            oids: oids.to_vec(),
        });
        self.failures.get(&number).copied()
    }

    async fn respond(&self, failure: Option<MockFailure>, varbinds: Vec<VarBind>) -> Result<Vec<VarBind>> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        match failure {
            Some(failure) => Err(failure.into_error()),
            None => Ok(varbinds),
        }
    }

    fn lookup(&self, oid: &Oid) -> VarBind {
        match self.data.get(oid) {
            Some(value) => VarBind::new(oid.clone(), value.clone()),
            None => VarBind::new(oid.clone(), RawValue::NoSuchObject),
        }
    }

    fn lookup_next(&self, oid: &Oid) -> VarBind {
        match self
            .data
            .range((Bound::Excluded(oid), Bound::Unbounded))
            .next()
        {
            Some((next, value)) => VarBind::new(next.clone(), value.clone()),
            None => VarBind::new(oid.clone(), RawValue::EndOfMibView),
        }
    }
}

impl Transport for MockAgent {
    async fn get(&self, oids: &[Oid]) -> Result<Vec<VarBind>> {
        let failure = self.record(RequestKind::Get, oids);
        let varbinds = oids.iter().map(|oid| self.lookup(oid)).collect();
        self.respond(failure, varbinds).await
    }

    async fn get_next(&self, oids: &[Oid]) -> Result<Vec<VarBind>> {
        let failure = self.record(RequestKind::GetNext, oids);
        let varbinds = oids.iter().map(|oid| self.lookup_next(oid)).collect();
        self.respond(failure, varbinds).await
    }
}
