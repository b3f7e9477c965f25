//! Connection lifecycle of the live result stream.
//!
//! The lifecycle is a pure state machine: callers feed transport events and
//! get back the new status plus an optional reconnect delay. Timers and
//! sockets live outside the domain.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamStatus {
    Disabled,
    Disconnected,
    Connecting,
    Authenticating,
    Live,
    Failed,
}

impl fmt::Display for StreamStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StreamStatus::Disabled => "disabled",
            StreamStatus::Disconnected => "disconnected",
            StreamStatus::Connecting => "connecting",
            StreamStatus::Authenticating => "authenticating",
            StreamStatus::Live => "live",
            StreamStatus::Failed => "failed",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamEvent {
    Connect,
    Opened { requires_auth: bool },
    Authenticated,
    AuthRejected,
    Closed,
    Disconnect,
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReconnectPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
    pub factor: f64,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            max_retries: 5,
            base_delay: Duration::from_millis(3_000),
            factor: 1.5,
        }
    }
}

impl ReconnectPolicy {
    /// Delay before reconnect attempt `retry + 1`, or `None` once retries are
    /// exhausted.
    pub fn delay_for(&self, retry: u32) -> Option<Duration> {
        if retry >= self.max_retries {
            return None;
        }
        let exponent = i32::try_from(retry).unwrap_or(i32::MAX);
        let secs = self.base_delay.as_secs_f64() * self.factor.powi(exponent);
        Duration::try_from_secs_f64(secs).ok()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub from: StreamStatus,
    pub to: StreamStatus,
    pub reconnect_after: Option<Duration>,
}

#[derive(Debug, Clone)]
pub struct ConnectionLifecycle {
    status: StreamStatus,
    policy: ReconnectPolicy,
    retries: u32,
}

impl ConnectionLifecycle {
    pub fn new(policy: ReconnectPolicy) -> Self {
        Self {
            status: StreamStatus::Disconnected,
            policy,
            retries: 0,
        }
    }

    pub fn disabled() -> Self {
        Self {
            status: StreamStatus::Disabled,
            policy: ReconnectPolicy::default(),
            retries: 0,
        }
    }

    pub fn status(&self) -> StreamStatus {
        self.status
    }

    pub fn retries(&self) -> u32 {
        self.retries
    }

    pub fn policy(&self) -> &ReconnectPolicy {
        &self.policy
    }

    pub fn is_live(&self) -> bool {
        self.status == StreamStatus::Live
    }

    pub fn apply(&mut self, event: StreamEvent) -> Result<Transition, String> {
        use StreamEvent as E;
        use StreamStatus as S;

        let from = self.status;
        let mut reconnect_after = None;

        let to = match (from, event) {
            (S::Disabled, _) => {
                return Err(format!("stream is disabled; rejected event {event:?}"));
            }
            (_, E::Disconnect) => {
                self.retries = 0;
                S::Disconnected
            }
            (S::Disconnected, E::Connect) => S::Connecting,
            (S::Connecting, E::Opened { requires_auth: true }) => S::Authenticating,
            (S::Connecting, E::Opened { requires_auth: false })
            | (S::Authenticating, E::Authenticated) => {
                self.retries = 0;
                S::Live
            }
            (S::Authenticating, E::AuthRejected) => S::Failed,
            (S::Connecting | S::Authenticating | S::Live, E::Closed) => {
                match self.policy.delay_for(self.retries) {
                    Some(delay) => {
                        self.retries = self.retries.saturating_add(1);
                        reconnect_after = Some(delay);
                        S::Disconnected
                    }
                    None => S::Failed,
                }
            }
            (S::Failed | S::Disconnected, E::Reset) => {
                self.retries = 0;
                S::Disconnected
            }
            (status, event) => {
                return Err(format!("invalid stream transition: {event:?} while {status}"));
            }
        };

        self.status = to;
        Ok(Transition {
            from,
            to,
            reconnect_after,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lifecycle(max_retries: u32) -> ConnectionLifecycle {
        ConnectionLifecycle::new(ReconnectPolicy {
            max_retries,
            ..ReconnectPolicy::default()
        })
    }

    #[test]
    fn backoff_grows_geometrically() {
        let policy = ReconnectPolicy::default();
        assert_eq!(policy.delay_for(0), Some(Duration::from_millis(3_000)));
        assert_eq!(policy.delay_for(1), Some(Duration::from_millis(4_500)));
        assert_eq!(policy.delay_for(2), Some(Duration::from_millis(6_750)));
        assert_eq!(policy.delay_for(5), None);
    }

    #[test]
    fn connects_with_auth() {
        let mut lc = lifecycle(5);
        lc.apply(StreamEvent::Connect).expect("connect");
        let t = lc
            .apply(StreamEvent::Opened { requires_auth: true })
            .expect("open");
        assert_eq!(t.to, StreamStatus::Authenticating);
        let t = lc.apply(StreamEvent::Authenticated).expect("auth");
        assert_eq!(t.from, StreamStatus::Authenticating);
        assert!(lc.is_live());
    }

    #[test]
    fn auth_rejection_fails_without_reconnect() {
        let mut lc = lifecycle(5);
        lc.apply(StreamEvent::Connect).expect("connect");
        lc.apply(StreamEvent::Opened { requires_auth: true })
            .expect("open");
        let t = lc.apply(StreamEvent::AuthRejected).expect("reject");
        assert_eq!(t.to, StreamStatus::Failed);
        assert!(t.reconnect_after.is_none());
        assert!(lc.apply(StreamEvent::Connect).is_err());
    }

    #[test]
    fn closing_schedules_reconnect_until_exhausted() {
        let mut lc = lifecycle(2);
        lc.apply(StreamEvent::Connect).expect("connect");
        let first = lc.apply(StreamEvent::Closed).expect("close");
        assert_eq!(first.to, StreamStatus::Disconnected);
        assert_eq!(first.reconnect_after, Some(Duration::from_millis(3_000)));
        assert_eq!(lc.retries(), 1);

        lc.apply(StreamEvent::Connect).expect("connect");
        let second = lc.apply(StreamEvent::Closed).expect("close");
        assert_eq!(second.reconnect_after, Some(Duration::from_millis(4_500)));

        lc.apply(StreamEvent::Connect).expect("connect");
        let last = lc.apply(StreamEvent::Closed).expect("close");
        assert_eq!(last.to, StreamStatus::Failed);
        assert!(last.reconnect_after.is_none());

        lc.apply(StreamEvent::Reset).expect("reset");
        assert_eq!(lc.status(), StreamStatus::Disconnected);
        assert_eq!(lc.retries(), 0);
    }

    #[test]
    fn going_live_resets_retries() {
        let mut lc = lifecycle(5);
        lc.apply(StreamEvent::Connect).expect("connect");
        lc.apply(StreamEvent::Closed).expect("close");
        lc.apply(StreamEvent::Connect).expect("connect");
        lc.apply(StreamEvent::Opened {
            requires_auth: false,
        })
        .expect("open");
        assert_eq!(lc.retries(), 0);
    }

    #[test]
    fn manual_disconnect_resets_from_any_state() {
        let mut lc = lifecycle(5);
        lc.apply(StreamEvent::Connect).expect("connect");
        lc.apply(StreamEvent::Closed).expect("close");
        lc.apply(StreamEvent::Connect).expect("connect");
        let t = lc.apply(StreamEvent::Disconnect).expect("disconnect");
        assert_eq!(t.to, StreamStatus::Disconnected);
        assert_eq!(lc.retries(), 0);
    }

    #[test]
    fn invalid_transitions_are_rejected() {
        let mut lc = lifecycle(5);
        let err = lc.apply(StreamEvent::Authenticated).expect_err("not connecting");
        assert!(err.contains("invalid stream transition"));
        assert_eq!(lc.status(), StreamStatus::Disconnected);
        lc.apply(StreamEvent::Connect).expect("connect");
        assert!(lc.apply(StreamEvent::Connect).is_err());
        assert!(lc.apply(StreamEvent::Reset).is_err());
    }

    #[test]
    fn disabled_rejects_everything() {
        let mut lc = ConnectionLifecycle::disabled();
        for event in [
            StreamEvent::Connect,
            StreamEvent::Disconnect,
            StreamEvent::Reset,
            StreamEvent::Closed,
        ] {
            assert!(lc.apply(event).is_err());
        }
        assert_eq!(lc.status(), StreamStatus::Disabled);
    }
}
