//! Input debouncing on an explicit clock.
//!
//! Each keystroke replaces the pending request and pushes its deadline out by one
//! interval. Nothing is run until the host polls past the deadline, so a burst of input
//! produces one search for the last query typed.

use std::time::{Duration, Instant};

/// Identifies one input event. Later inputs have larger ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

/// A search the debouncer has released.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// The input event this request came from.
    pub id: RequestId,
    /// Query text exactly as the host supplied it.
    pub query: String,
}

/// The request waiting for its deadline.
#[derive(Debug, Clone)]
struct Pending {
    /// Request to release.
    request: SearchRequest,
    /// Earliest time it may be released; `None` when the interval runs past the clock's
    /// range, so only [`Debouncer::flush`] releases it.
    deadline: Option<Instant>,
}

/// Last-input-wins debouncer.
#[derive(Debug, Clone)]
pub struct Debouncer {
    /// Quiet period required after the last input.
    interval: Duration,
    /// Request waiting for its deadline.
    pending: Option<Pending>,
    /// Id handed to the next input.
    next_id: u64,
}

impl Debouncer {
    /// Creates a debouncer with the given quiet period.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            pending: None,
            next_id: 0,
        }
    }

    /// The quiet period.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Records an input event at `now`, superseding any pending request.
    pub fn on_input(&mut self, query: impl Into<String>, now: Instant) -> RequestId {
        let id = RequestId(self.next_id);
        self.next_id += 1;
        self.pending = Some(Pending {
            request: SearchRequest {
                id,
                query: query.into(),
            },
            deadline: now.checked_add(self.interval),
        });
        id
    }

    /// Releases the pending request if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<SearchRequest> {
        if self.pending.as_ref()?.deadline.is_none_or(|deadline| deadline > now) {
            return None;
        }
        self.pending.take().map(|pending| pending.request)
    }

    /// Releases the pending request without waiting.
    pub fn flush(&mut self) -> Option<SearchRequest> {
        self.pending.take().map(|pending| pending.request)
    }

    /// When the pending request becomes due, if there is one.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().and_then(|pending| pending.deadline)
    }

    /// Returns true if no input has arrived since `id`.
    pub fn is_latest(&self, id: RequestId) -> bool {
        id.0 + 1 == self.next_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(200);

    #[test]
    fn waits_for_quiet_period() {
        let t0 = Instant::now();
        let mut debouncer = Debouncer::new(INTERVAL);
        debouncer.on_input("g", t0);

        assert_eq!(debouncer.poll(t0 + Duration::from_millis(199)), None);
        let request = debouncer.poll(t0 + INTERVAL).unwrap();
        assert_eq!(request.query, "g");
        assert_eq!(debouncer.poll(t0 + INTERVAL * 2), None);
    }

    #[test]
    fn newer_input_supersedes_pending() {
        let t0 = Instant::now();
        let mut debouncer = Debouncer::new(INTERVAL);
        let first = debouncer.on_input("g", t0);
        let second = debouncer.on_input("ge", t0 + Duration::from_millis(150));
        assert!(first < second);

        // The first deadline has passed but the request was replaced.
        assert_eq!(debouncer.poll(t0 + Duration::from_millis(250)), None);
        let request = debouncer.poll(t0 + Duration::from_millis(350)).unwrap();
        assert_eq!(request.id, second);
        assert_eq!(request.query, "ge");
    }

    #[test]
    fn latest_tracks_inputs_not_releases() {
        let t0 = Instant::now();
        let mut debouncer = Debouncer::new(INTERVAL);
        let first = debouncer.on_input("a", t0);
        let released = debouncer.poll(t0 + INTERVAL).unwrap();
        assert!(debouncer.is_latest(released.id));

        debouncer.on_input("ab", t0 + INTERVAL);
        assert!(!debouncer.is_latest(first));
    }

    #[test]
    fn zero_interval_releases_immediately() {
        let t0 = Instant::now();
        let mut debouncer = Debouncer::new(Duration::ZERO);
        debouncer.on_input("x", t0);
        assert!(debouncer.poll(t0).is_some());
    }

    #[test]
    fn flush_and_deadline() {
        let t0 = Instant::now();
        let mut debouncer = Debouncer::new(INTERVAL);
        assert_eq!(debouncer.deadline(), None);
        debouncer.on_input("x", t0);
        assert_eq!(debouncer.deadline(), Some(t0 + INTERVAL));
        assert_eq!(debouncer.flush().map(|r| r.query), Some("x".to_string()));
        assert_eq!(debouncer.deadline(), None);
    }

    #[test]
    fn oversized_interval_waits_for_flush() {
        let t0 = Instant::now();
        let mut debouncer = Debouncer::new(Duration::MAX);
        let id = debouncer.on_input("get", t0);

        assert_eq!(debouncer.deadline(), None);
        assert_eq!(debouncer.poll(t0 + Duration::from_secs(3600)), None);
        let request = debouncer.flush().unwrap();
        assert_eq!(request.id, id);
        assert_eq!(request.query, "get");
    }
}
