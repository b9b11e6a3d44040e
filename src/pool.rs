//! Connection pooling
//!
//! Bounds the number of concurrently live connections, pre-warms a
//! minimum, and evicts connections that sit idle past their timeout.
//!
//! ## Checkout Discipline
//! The semaphore is the bounded queue: an acquire beyond `max` suspends
//! until a connection is released or the acquire timeout elapses.
//! Released connections park LIFO so the freshest one is lent out next,
//! while eviction trims the stale end and never drops below `min`.
//! Connections are not health-checked on borrow, and destroying one is a
//! no-op hook: the underlying transport owns its own teardown.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use futures_util::future::try_join_all;
use parking_lot::Mutex;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

use crate::client::StoreClient;
use crate::config::Config;
use crate::error::{Result, StoreError};
use crate::transport::{Connector, Transport};

/// A parked connection awaiting its next checkout
struct IdleConnection {
    transport: Arc<dyn Transport>,
    parked_at: Instant,
}

struct PoolInner {
    connector: Arc<dyn Connector>,
    config: Config,
    semaphore: Arc<Semaphore>,
    idle: Mutex<Vec<IdleConnection>>,
    closed: AtomicBool,
}

impl PoolInner {
    /// Trim stale connections from the oldest end, keeping `min` parked
    fn evict_stale(&self, idle: &mut Vec<IdleConnection>) {
        while idle.len() > self.config.min_connections {
            match idle.first() {
                Some(parked) if parked.parked_at.elapsed() >= self.config.idle_timeout => {
                    idle.remove(0);
                    tracing::debug!("evicted idle connection");
                }
                _ => break,
            }
        }
    }
}

/// Bounded pool of live store connections
#[derive(Clone)]
pub struct ConnectionPool {
    inner: Arc<PoolInner>,
}

impl ConnectionPool {
    /// Create a pool and pre-warm `min_connections` connections
    pub async fn new(connector: Arc<dyn Connector>, config: Config) -> Result<Self> {
        config.validate()?;

        let warmup = try_join_all((0..config.min_connections).map(|_| connector.connect())).await?;
        tracing::debug!(connections = warmup.len(), "pool pre-warmed");

        let idle = warmup
            .into_iter()
            .map(|transport| IdleConnection {
                transport,
                parked_at: Instant::now(),
            })
            .collect();

        Ok(Self {
            inner: Arc::new(PoolInner {
                connector,
                semaphore: Arc::new(Semaphore::new(config.max_connections)),
                config,
                idle: Mutex::new(idle),
                closed: AtomicBool::new(false),
            }),
        })
    }

    /// Borrow a connection, wrapped in a ready-to-use client facade.
    ///
    /// Suspends while the pool is at capacity; fails with
    /// [`StoreError::PoolExhausted`] once the acquire timeout elapses and
    /// with [`StoreError::PoolClosed`] after shutdown. Dropping the
    /// returned [`PooledClient`] releases the connection.
    pub async fn acquire(&self) -> Result<PooledClient> {
        if self.inner.closed.load(Ordering::Acquire) {
            return Err(StoreError::PoolClosed);
        }

        let timeout = self.inner.config.acquire_timeout;
        let acquired =
            tokio::time::timeout(timeout, Arc::clone(&self.inner.semaphore).acquire_owned()).await;
        let permit = match acquired {
            Ok(Ok(permit)) => permit,
            // The semaphore only closes at shutdown
            Ok(Err(_)) => return Err(StoreError::PoolClosed),
            Err(_) => return Err(StoreError::PoolExhausted { timeout }),
        };

        let transport = match self.checkout_idle() {
            Some(transport) => transport,
            None => self.inner.connector.connect().await?,
        };

        Ok(PooledClient {
            client: StoreClient::new(Arc::clone(&transport), self.inner.config.clone()),
            transport,
            pool: Arc::clone(&self.inner),
            _permit: permit,
        })
    }

    /// Shut the pool down: refuse new acquires and drain parked
    /// connections.
    ///
    /// Draining just drops the handles; connection destruction is a no-op
    /// because the transport is expected to be long-lived and reused.
    pub fn shutdown(&self) {
        self.inner.closed.store(true, Ordering::Release);
        self.inner.semaphore.close();

        let drained = {
            let mut idle = self.inner.idle.lock();
            idle.drain(..).count()
        };
        tracing::debug!(connections = drained, "pool shut down");
    }

    /// Number of connections currently parked
    pub fn idle_count(&self) -> usize {
        self.inner.idle.lock().len()
    }

    fn checkout_idle(&self) -> Option<Arc<dyn Transport>> {
        let mut idle = self.inner.idle.lock();
        self.inner.evict_stale(&mut idle);
        idle.pop().map(|parked| parked.transport)
    }
}

/// A checked-out connection wrapped in the client facade.
///
/// Derefs to [`StoreClient`]; dropping it returns the connection to the
/// pool and wakes one suspended acquire.
pub struct PooledClient {
    client: StoreClient,
    transport: Arc<dyn Transport>,
    pool: Arc<PoolInner>,
    _permit: OwnedSemaphorePermit,
}

impl PooledClient {
    /// Return the connection to the pool.
    ///
    /// Equivalent to dropping the client; provided so call sites can make
    /// the hand-back explicit.
    pub fn release(self) {}
}

impl std::fmt::Debug for PooledClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PooledClient").finish_non_exhaustive()
    }
}

impl std::ops::Deref for PooledClient {
    type Target = StoreClient;

    fn deref(&self) -> &Self::Target {
        &self.client
    }
}

impl Drop for PooledClient {
    fn drop(&mut self) {
        if self.pool.closed.load(Ordering::Acquire) {
            return;
        }

        let mut idle = self.pool.idle.lock();
        idle.push(IdleConnection {
            transport: Arc::clone(&self.transport),
            parked_at: Instant::now(),
        });
        self.pool.evict_stale(&mut idle);
        // The permit drops after the connection is parked, so the woken
        // waiter always finds it
    }
}
