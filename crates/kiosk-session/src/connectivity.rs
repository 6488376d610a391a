// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Connectivity capability: reports online/offline changes.
//
// The desktop implementation probes a TCP endpoint on an interval. A probe
// that connects within the timeout means online; anything else means offline.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use kiosk_core::KioskConfig;
use tokio::net::TcpStream;
use tokio::runtime::Handle;
use tracing::{debug, info};

use crate::scheduler::ScheduleHandle;

/// Callback invoked with the new status whenever it changes.
pub type StatusCallback = Box<dyn FnMut(bool) + Send + 'static>;

/// "Invoke this callback on status change."
pub trait ConnectivityNotifier: Send + Sync {
    /// Last known status.
    fn is_online(&self) -> bool;

    fn subscribe(&self, callback: StatusCallback) -> ScheduleHandle;
}

/// Polls `host:port` and reports transitions.
///
/// Starts out offline; the first successful probe reports the transition to
/// online.
#[derive(Debug, Clone)]
pub struct ProbeConnectivity {
    target: String,
    interval: Duration,
    timeout: Duration,
    online: Arc<AtomicBool>,
    runtime: Handle,
}

impl ProbeConnectivity {
    pub fn new(target: impl Into<String>, interval: Duration, timeout: Duration, runtime: Handle) -> Self {
        Self {
            target: target.into(),
            interval,
            timeout,
            online: Arc::new(AtomicBool::new(false)),
            runtime,
        }
    }

    pub fn from_config(config: &KioskConfig, runtime: Handle) -> Self {
        Self::new(
            format!("{}:{}", config.probe_host, config.probe_port),
            config.probe_interval(),
            config.probe_timeout(),
            runtime,
        )
    }

    /// One connection attempt.
    pub async fn probe(target: &str, timeout: Duration) -> bool {
        matches!(
            tokio::time::timeout(timeout, TcpStream::connect(target)).await,
            Ok(Ok(_))
        )
    }
}

impl ConnectivityNotifier for ProbeConnectivity {
    fn is_online(&self) -> bool {
        self.online.load(Ordering::SeqCst)
    }

    fn subscribe(&self, mut callback: StatusCallback) -> ScheduleHandle {
        let target = self.target.clone();
        let interval = self.interval;
        let timeout = self.timeout;
        let online = Arc::clone(&self.online);

        let task = self.runtime.spawn(async move {
            loop {
                let now_online = Self::probe(&target, timeout).await;
                let was_online = online.swap(now_online, Ordering::SeqCst);
                if was_online != now_online {
                    info!(%target, online = now_online, "connectivity changed");
                    callback(now_online);
                } else {
                    debug!(%target, online = now_online, "connectivity unchanged");
                }
                tokio::time::sleep(interval).await;
            }
        });
        ScheduleHandle::new(move || task.abort())
    }
}

#[cfg(test)]
mod tests {
    use tokio::net::TcpListener;
    use tokio::sync::mpsc;

    use super::*;

    #[tokio::test]
    async fn probe_reports_up_then_down() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let notifier = ProbeConnectivity::new(
            addr.to_string(),
            Duration::from_millis(20),
            Duration::from_millis(500),
            Handle::current(),
        );
        assert!(!notifier.is_online());

        let (tx, mut rx) = mpsc::unbounded_channel();
        let _handle = notifier.subscribe(Box::new(move |online| {
            let _ = tx.send(online);
        }));

        let first = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("first transition");
        assert_eq!(first, Some(true));
        assert!(notifier.is_online());

        drop(listener);
        let second = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("second transition");
        assert_eq!(second, Some(false));
        assert!(!notifier.is_online());
    }

    #[tokio::test]
    async fn probe_fails_on_closed_port() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        assert!(!ProbeConnectivity::probe(&addr.to_string(), Duration::from_millis(500)).await);
    }
}
