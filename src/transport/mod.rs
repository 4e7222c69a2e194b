//! Transport abstraction.
//!
//! A [`Transport`] is the SNMP session the client layer sequences requests
//! over: PDU encoding, retries, timeouts and protocol versions all live behind
//! it. This crate only consumes its three primitives.

#[cfg(any(test, feature = "testing"))]
mod mock;

#[cfg(any(test, feature = "testing"))]
pub use mock::*;

use std::future::Future;

use crate::error::{Error, Result};
use crate::oid::Oid;
use crate::varbind::{RawValue, VarBind};

/// Request/response primitives of an SNMP session.
///
/// `get` and `get_next` issue exactly one request each and return one var-bind
/// per requested OID, in request order. Implementations should fail with
/// [`Error::ResponseLength`] rather than return a short response, but callers
/// in this crate check the length again.
///
/// Errors are returned verbatim to the caller; nothing in this crate retries.
pub trait Transport: Send + Sync {
    /// GET: the value of each OID.
    fn get(&self, oids: &[Oid]) -> impl Future<Output = Result<Vec<VarBind>>> + Send;

    /// GETNEXT: the lexicographically next var-bind after each OID.
    fn get_next(&self, oids: &[Oid]) -> impl Future<Output = Result<Vec<VarBind>>> + Send;

    /// Walk the subtrees under `oids` in lock-step.
    ///
    /// Each round issues one GETNEXT for every column still in scope and passes
    /// the in-scope var-binds to `callback`. A column drops out when the agent
    /// reports `endOfMibView` or returns an OID outside the column's subtree.
    /// The walk ends when every column has dropped out, and stops early with
    /// the first error from the transport or from `callback`.
    ///
    /// The default implementation fails with [`Error::NonIncreasingOid`] when a
    /// column does not advance, which would otherwise loop forever.
    fn walk<F>(&self, oids: &[Oid], mut callback: F) -> impl Future<Output = Result<()>> + Send
    where
        F: FnMut(&[VarBind]) -> Result<()> + Send,
    {
        async move {
            let mut current: Vec<Oid> = oids.to_vec();
            let mut active: Vec<usize> = (0..oids.len()).collect();
            let mut round = 0usize;

            while !active.is_empty() {
                let request: Vec<Oid> = active.iter().map(|&col| current[col].clone()).collect();
                let response = self.get_next(&request).await?;
                check_response_length(request.len(), &response)?;

                let mut batch = Vec::with_capacity(response.len());
                let mut still_active = Vec::with_capacity(active.len());

                for (&col, vb) in active.iter().zip(response) {
                    if matches!(vb.value, RawValue::EndOfMibView) || oids[col].index(&vb.oid).is_none() {
                        continue;
                    }

                    if vb.oid <= current[col] {
                        tracing::warn!(
                            snmp.previous = %current[col],
                            snmp.oid = %vb.oid,
                            "walk detected non-increasing OID"
                        );
                        return Err(Error::NonIncreasingOid {
                            previous: current[col].clone(),
                            current: vb.oid,
                        });
                    }

                    current[col] = vb.oid.clone();
                    still_active.push(col);
                    batch.push(vb);
                }

                if batch.is_empty() {
                    break;
                }

                round += 1;
                tracing::trace!(
                    snmp.round = round,
                    snmp.varbind_count = batch.len(),
                    "walk round"
                );

                callback(&batch)?;
                active = still_active;
            }

            Ok(())
        }
    }
}

/// Fail with [`Error::ResponseLength`] unless `response` has `expected` var-binds.
pub fn check_response_length(expected: usize, response: &[VarBind]) -> Result<()> {
    if response.len() == expected {
        Ok(())
    } else {
        Err(Error::ResponseLength {
            expected,
            actual: response.len(),
        })
    }
}

impl<T: Transport> Transport for &T {
    fn get(&self, oids: &[Oid]) -> impl Future<Output = Result<Vec<VarBind>>> + Send {
        (**self).get(oids)
    }

    fn get_next(&self, oids: &[Oid]) -> impl Future<Output = Result<Vec<VarBind>>> + Send {
        (**self).get_next(oids)
    }

    fn walk<F>(&self, oids: &[Oid], callback: F) -> impl Future<Output = Result<()>> + Send
    where
        F: FnMut(&[VarBind]) -> Result<()> + Send,
    {
        (**self).walk(oids, callback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oid;

    fn agent() -> MockAgent {
        MockAgent::new()
            .with(oid!(1, 3, 6, 1, 9, 1, 1), 11)
            .with(oid!(1, 3, 6, 1, 9, 1, 2), 12)
            .with(oid!(1, 3, 6, 1, 9, 1, 3), 13)
            .with(oid!(1, 3, 6, 1, 9, 2, 1), "a")
            .with(oid!(1, 3, 6, 1, 9, 2, 2), "b")
            .with(oid!(1, 3, 6, 1, 10, 0), 99)
    }

    #[tokio::test]
    async fn test_walk_lock_step() {
        let agent = agent();
        let mut batches = Vec::new();
        agent
            .walk(&[oid!(1, 3, 6, 1, 9, 1), oid!(1, 3, 6, 1, 9, 2)], |batch| {
                batches.push(batch.iter().map(|vb| vb.oid.clone()).collect::<Vec<_>>());
                Ok(())
            })
            .await
            .unwrap();

        assert_eq!(
            batches,
            vec![
                vec![oid!(1, 3, 6, 1, 9, 1, 1), oid!(1, 3, 6, 1, 9, 2, 1)],
                vec![oid!(1, 3, 6, 1, 9, 1, 2), oid!(1, 3, 6, 1, 9, 2, 2)],
                vec![oid!(1, 3, 6, 1, 9, 1, 3)],
            ]
        );
        // Three rounds with data, plus one that walked both remaining columns out
        assert_eq!(agent.requests().len(), 4);
        assert_eq!(agent.requests()[3].oids.len(), 1);
    }

    #[tokio::test]
    async fn test_walk_end_of_mib_view() {
        let agent = MockAgent::new().with(oid!(1, 3, 6, 1, 9, 1, 1), 1);
        let mut count = 0;
        agent
            .walk(&[oid!(1, 3, 6, 1, 9, 1)], |batch| {
                count += batch.len();
                Ok(())
            })
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_walk_empty_subtree() {
        let agent = agent();
        let mut called = false;
        agent
            .walk(&[oid!(1, 3, 6, 1, 9, 5)], |_| {
                called = true;
                Ok(())
            })
            .await
            .unwrap();
        assert!(!called);
        assert_eq!(agent.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_walk_callback_error_stops() {
        let agent = agent();
        let err = agent
            .walk(&[oid!(1, 3, 6, 1, 9, 1)], |_| Err(Error::callback("stop")))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Callback { .. }));
        assert_eq!(agent.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_walk_transport_error() {
        let agent = agent().fail_on(1, MockFailure::Timeout);
        let mut batches = 0;
        let err = agent
            .walk(&[oid!(1, 3, 6, 1, 9, 1)], |_| {
                batches += 1;
                Ok(())
            })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Timeout { .. }));
        assert_eq!(batches, 1);
    }

    /// Agent that always answers with the same OID.
    struct StuckAgent;

    impl Transport for StuckAgent {
        async fn get(&self, oids: &[Oid]) -> Result<Vec<VarBind>> {
            Ok(oids.iter().map(|oid| VarBind::null(oid.clone())).collect())
        }

        async fn get_next(&self, oids: &[Oid]) -> Result<Vec<VarBind>> {
            Ok(oids.iter().map(|_| VarBind::new(oid!(1, 3, 6, 1, 9, 1, 1), 1)).collect())
        }
    }

    #[tokio::test]
    async fn test_walk_non_increasing() {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_test_writer()
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let mut rounds = 0;
        let err = StuckAgent
            .walk(&[oid!(1, 3, 6, 1, 9, 1)], |_| {
                rounds += 1;
                Ok(())
            })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NonIncreasingOid { .. }));
        assert_eq!(rounds, 1);
    }

    #[test]
    fn test_check_response_length() {
        let vbs = vec![VarBind::null(oid!(1, 3))];
        assert!(check_response_length(1, &vbs).is_ok());
        assert!(matches!(
            check_response_length(2, &vbs),
            Err(Error::ResponseLength {
                expected: 2,
                actual: 1
            })
        ));
    }
}
