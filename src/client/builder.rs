//! Client builder.
//!
//! ```
//! use snmp_mibs::Client;
//! use snmp_mibs::transport::Transport;
//!
//! fn poller<T: Transport>(transport: T) -> Client<T> {
//!     Client::builder().max_oids_per_request(25).build(transport)
//! }
//! ```

use crate::transport::Transport;

use super::{Client, ClientConfig};

/// Builder for [`Client`].
#[derive(Debug, Clone, Default)]
pub struct ClientBuilder {
    config: ClientConfig,
}

impl ClientBuilder {
    /// Create a builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum OIDs per request issued by multi-OID operations.
    ///
    /// `0` removes the limit.
    pub fn max_oids_per_request(mut self, max: usize) -> Self {
        self.config.max_oids_per_request = max;
        self
    }

    /// Build a client over `transport`.
    pub fn build<T: Transport>(self, transport: T) -> Client<T> {
        Client::new(transport, self.config)
    }
}
