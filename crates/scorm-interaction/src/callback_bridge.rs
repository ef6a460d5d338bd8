//! Bridge to an asynchronous host API.
//!
//! Each request is handed to the host together with a [`RequestId`]. The host
//! answers later by calling [`CallbackBridge::deliver`] with a
//! `"<value>|<request>"` payload. Only one request may be outstanding at a
//! time.

use async_trait::async_trait;
use scorm_core::{
    BridgeCall, BridgeError, BridgeResult, EngineConfig, HostRequest, RequestId, RuntimeBridge,
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio_util::sync::CancellationToken;

/// The host side of the bridge.
///
/// `dispatch` only has to accept the request; the reply arrives through
/// [`CallbackBridge::deliver`], possibly before `dispatch` returns.
pub trait HostApi: Send + Sync {
    fn dispatch(&self, request: HostRequest) -> BridgeResult<()>;
}

impl HostApi for mpsc::UnboundedSender<HostRequest> {
    fn dispatch(&self, request: HostRequest) -> BridgeResult<()> {
        self.send(request).map_err(|err| {
            BridgeError::host(format!(
                "host channel closed before request {} was sent",
                err.0.id
            ))
        })
    }
}

struct Pending {
    id: RequestId,
    reply: oneshot::Sender<String>,
    cancel: CancellationToken,
}

pub struct CallbackBridge {
    host: Arc<dyn HostApi>,
    pending: Mutex<Option<Pending>>,
    next_id: AtomicU64,
    request_timeout: Option<Duration>,
    shutdown: CancellationToken,
}

impl CallbackBridge {
    /// Creates a bridge over `host`.
    ///
    /// # Arguments
    ///
    /// * `host` - Receives every outgoing request
    /// * `request_timeout` - How long to wait for each reply; `None` waits forever
    pub fn new(host: Arc<dyn HostApi>, request_timeout: Option<Duration>) -> Self {
        Self {
            host,
            pending: Mutex::new(None),
            next_id: AtomicU64::new(1),
            request_timeout,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn from_config(host: Arc<dyn HostApi>, config: &EngineConfig) -> Self {
        Self::new(host, config.request_timeout())
    }

    /// Creates a bridge whose host is an unbounded channel.
    pub fn channel(
        request_timeout: Option<Duration>,
    ) -> (Arc<Self>, mpsc::UnboundedReceiver<HostRequest>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Arc::new(Self::new(Arc::new(tx), request_timeout)), rx)
    }

    /// Ties every request to `token`. Cancelling it aborts the outstanding
    /// request and fails all later ones with `Cancelled`.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Id of the request currently awaiting a reply.
    pub fn pending_request(&self) -> Option<RequestId> {
        self.lock_pending().as_ref().map(|p| p.id)
    }

    /// Aborts the outstanding request, if any. Returns whether one was pending.
    pub fn cancel_pending(&self) -> bool {
        match self.lock_pending().as_ref() {
            Some(pending) => {
                tracing::info!("[CallbackBridge] Cancelling request {}", pending.id);
                pending.cancel.cancel();
                true
            }
            None => false,
        }
    }

    /// Accepts a host reply of the form `"<value>|<request>"`.
    ///
    /// # Returns
    ///
    /// - `Ok(())`: The reply resolved the outstanding request
    /// - `Err(MalformedCallback)`: The payload has no parseable request id
    /// - `Err(UnexpectedResponse)`: The id does not match the outstanding request
    pub fn deliver(&self, raw: &str) -> BridgeResult<()> {
        let (value, id) = parse_callback(raw)?;

        let mut slot = self.lock_pending();
        match slot.take() {
            Some(pending) if pending.id == id => {
                drop(slot);
                // The awaiting side may already have given up.
                let _ = pending.reply.send(value.to_string());
                Ok(())
            }
            other => {
                let outstanding = other.as_ref().map(|p| p.id.value());
                *slot = other;
                tracing::warn!(
                    "[CallbackBridge] Reply for request {} does not match outstanding {:?}",
                    id,
                    outstanding
                );
                Err(BridgeError::UnexpectedResponse {
                    request: id.value(),
                    outstanding,
                })
            }
        }
    }

    fn lock_pending(&self) -> MutexGuard<'_, Option<Pending>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn request(&self, call: BridgeCall) -> BridgeResult<String> {
        let label = call.to_string();
        let id = RequestId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let (reply_tx, reply_rx) = oneshot::channel();
        let cancel = self.shutdown.child_token();

        if cancel.is_cancelled() {
            return Err(BridgeError::Cancelled { request: label });
        }

        {
            let mut slot = self.lock_pending();
            if let Some(pending) = slot.as_ref() {
                return Err(BridgeError::RequestInFlight {
                    pending: pending.id.value(),
                });
            }
            *slot = Some(Pending {
                id,
                reply: reply_tx,
                cancel: cancel.clone(),
            });
        }
        let _slot = SlotGuard {
            pending: &self.pending,
            id,
        };

        tracing::debug!("[CallbackBridge] #{} -> {}", id, label);
        self.host.dispatch(HostRequest { id, call })?;

        let reply = async {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => Err(BridgeError::Cancelled { request: label.clone() }),
                reply = reply_rx => reply.map_err(|_| BridgeError::Disconnected {
                    request: label.clone(),
                }),
            }
        };

        let outcome = match self.request_timeout {
            Some(after) => match tokio::time::timeout(after, reply).await {
                Ok(outcome) => outcome,
                Err(_) => Err(BridgeError::Timeout {
                    request: label.clone(),
                    after,
                }),
            },
            None => reply.await,
        };

        match &outcome {
            Ok(value) => tracing::debug!("[CallbackBridge] #{} <- {:?}", id, value),
            Err(e) => tracing::warn!("[CallbackBridge] #{} failed: {}", id, e),
        }
        outcome
    }

    async fn request_accepted(&self, call: BridgeCall) -> BridgeResult<()> {
        let label = call.to_string();
        if parse_bool(&self.request(call).await?) {
            Ok(())
        } else {
            Err(BridgeError::rejected(label))
        }
    }
}

/// Clears the pending slot when the awaiting request finishes or is dropped.
struct SlotGuard<'a> {
    pending: &'a Mutex<Option<Pending>>,
    id: RequestId,
}

impl Drop for SlotGuard<'_> {
    fn drop(&mut self) {
        let mut slot = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.as_ref().is_some_and(|p| p.id == self.id) {
            *slot = None;
        }
    }
}

#[async_trait]
impl RuntimeBridge for CallbackBridge {
    async fn initialize(&self) -> BridgeResult<bool> {
        self.request(BridgeCall::Initialize)
            .await
            .map(|v| parse_bool(&v))
    }

    async fn is_v2004(&self) -> BridgeResult<bool> {
        self.request(BridgeCall::IsV2004)
            .await
            .map(|v| parse_bool(&v))
    }

    async fn get_value(&self, key: &str) -> BridgeResult<String> {
        self.request(BridgeCall::get(key)).await
    }

    async fn set_value(&self, key: &str, value: &str) -> BridgeResult<bool> {
        self.request(BridgeCall::set(key, value))
            .await
            .map(|v| parse_bool(&v))
    }

    async fn commit(&self) -> BridgeResult<()> {
        self.request_accepted(BridgeCall::Commit).await
    }

    async fn terminate(&self) -> BridgeResult<()> {
        self.request_accepted(BridgeCall::Terminate).await
    }
}

/// Splits on the last `|`, so values may themselves contain `|`.
fn parse_callback(raw: &str) -> BridgeResult<(&str, RequestId)> {
    let malformed = || BridgeError::MalformedCallback {
        payload: raw.to_string(),
    };
    let (value, id) = raw.rsplit_once('|').ok_or_else(malformed)?;
    let id = id.trim().parse::<u64>().map_err(|_| malformed())?;
    Ok((value, RequestId(id)))
}

fn parse_bool(raw: &str) -> bool {
    let raw = raw.trim();
    raw.eq_ignore_ascii_case("true") || raw == "1"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn callback_splits_on_last_pipe() {
        assert_eq!(parse_callback("abc|7").unwrap(), ("abc", RequestId(7)));
        assert_eq!(parse_callback("a|b|12").unwrap(), ("a|b", RequestId(12)));
        assert_eq!(parse_callback("|3").unwrap(), ("", RequestId(3)));
    }

    #[test]
    fn callback_without_id_is_malformed() {
        for raw in ["no separator", "value|", "value|x1", ""] {
            assert!(
                matches!(parse_callback(raw), Err(BridgeError::MalformedCallback { .. })),
                "{raw:?}"
            );
        }
    }

    #[test]
    fn booleans() {
        assert!(parse_bool("true"));
        assert!(parse_bool("TRUE"));
        assert!(parse_bool("1"));
        assert!(!parse_bool("false"));
        assert!(!parse_bool("0"));
        assert!(!parse_bool(""));
    }
}
