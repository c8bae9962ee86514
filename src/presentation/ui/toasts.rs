//! Toasts raised by gallery outcomes.
//!
//! Only the front toast is visible. Its lifetime starts on the first tick it
//! spends at the front, so queued toasts are never expired unseen.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::domain::GalleryEvent;

const MAX_QUEUED: usize = 4;

/// Gallery outcomes that surface as a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    NoResults,
    EndOfResults,
    Failed,
}

impl ToastKind {
    /// Maps a gallery signal to the toast it raises, if any.
    #[must_use]
    pub const fn from_event(event: &GalleryEvent) -> Option<Self> {
        match event {
            GalleryEvent::NoResults => Some(Self::NoResults),
            GalleryEvent::EndOfResults => Some(Self::EndOfResults),
            GalleryEvent::Failed { .. } => Some(Self::Failed),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_error(self) -> bool {
        !matches!(self, Self::EndOfResults)
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::NoResults => "No results",
            Self::EndOfResults => "End of results",
            Self::Failed => "Error",
        }
    }

    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::NoResults => "Sorry, no images found. Try another query!",
            Self::EndOfResults => "You've reached the end of the results.",
            Self::Failed => "Something went wrong. Please try again later.",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Toast {
    kind: ToastKind,
    shown_at: Option<Instant>,
}

impl Toast {
    #[must_use]
    pub const fn kind(&self) -> ToastKind {
        self.kind
    }

    #[must_use]
    pub const fn is_shown(&self) -> bool {
        self.shown_at.is_some()
    }
}

#[derive(Debug)]
pub struct ToastQueue {
    queue: VecDeque<Toast>,
    ttl: Duration,
}

impl ToastQueue {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            queue: VecDeque::with_capacity(MAX_QUEUED),
            ttl,
        }
    }

    /// Queues a toast. A repeat of the last queued kind is dropped. On a full
    /// queue the oldest toast not yet on screen makes room.
    pub fn push(&mut self, kind: ToastKind) {
        if self.queue.back().is_some_and(|t| t.kind == kind && !t.is_shown()) {
            return;
        }

        if self.queue.len() >= MAX_QUEUED {
            let victim = self.queue.iter().position(|t| !t.is_shown()).unwrap_or(0);
            self.queue.remove(victim);
        }

        self.queue.push_back(Toast {
            kind,
            shown_at: None,
        });
    }

    /// Starts the front toast's clock and drops it once expired.
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    pub(crate) fn tick_at(&mut self, now: Instant) {
        let Some(front) = self.queue.front_mut() else {
            return;
        };

        match front.shown_at {
            None => front.shown_at = Some(now),
            Some(start) if now.saturating_duration_since(start) > self.ttl => {
                self.queue.pop_front();
                if let Some(next) = self.queue.front_mut() {
                    next.shown_at = Some(now);
                }
            }
            Some(_) => {}
        }
    }

    #[must_use]
    pub fn current(&self) -> Option<&Toast> {
        self.queue.front()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    const TTL: Duration = Duration::from_secs(4);

    fn kinds(queue: &ToastQueue) -> Vec<ToastKind> {
        queue.queue.iter().map(Toast::kind).collect()
    }

    #[test_case(GalleryEvent::NoResults, Some(ToastKind::NoResults) ; "no_results")]
    #[test_case(GalleryEvent::EndOfResults, Some(ToastKind::EndOfResults) ; "end_of_results")]
    #[test_case(GalleryEvent::Failed { reason: "timeout".into(), transient: true }, Some(ToastKind::Failed) ; "failed")]
    #[test_case(GalleryEvent::LoadingDone, None ; "loading_done")]
    #[test_case(GalleryEvent::MoreAvailable { shown: 3, total: 9 }, None ; "more_available")]
    fn test_from_event(event: GalleryEvent, expected: Option<ToastKind>) {
        assert_eq!(ToastKind::from_event(&event), expected);
    }

    #[test]
    fn test_only_end_of_results_is_informational() {
        assert!(ToastKind::NoResults.is_error());
        assert!(ToastKind::Failed.is_error());
        assert!(!ToastKind::EndOfResults.is_error());
    }

    #[test]
    fn test_clock_starts_when_toast_reaches_front() {
        let mut queue = ToastQueue::new(TTL);
        let t0 = Instant::now();
        queue.push(ToastKind::Failed);
        queue.push(ToastKind::EndOfResults);

        queue.tick_at(t0);
        assert!(queue.current().unwrap().is_shown());
        assert!(!queue.queue[1].is_shown());

        queue.tick_at(t0 + TTL);
        assert_eq!(queue.current().unwrap().kind(), ToastKind::Failed);

        queue.tick_at(t0 + TTL * 2);
        assert_eq!(queue.current().unwrap().kind(), ToastKind::EndOfResults);
        assert!(queue.current().unwrap().is_shown());

        queue.tick_at(t0 + TTL * 4);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_repeated_kind_is_coalesced() {
        let mut queue = ToastQueue::new(TTL);
        queue.push(ToastKind::Failed);
        queue.push(ToastKind::Failed);

        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_full_queue_keeps_newest_and_visible() {
        let mut queue = ToastQueue::new(TTL);
        queue.push(ToastKind::NoResults);
        queue.tick_at(Instant::now());
        queue.push(ToastKind::Failed);
        queue.push(ToastKind::EndOfResults);
        queue.push(ToastKind::NoResults);
        assert_eq!(queue.len(), MAX_QUEUED);

        queue.push(ToastKind::Failed);

        assert_eq!(
            kinds(&queue),
            vec![
                ToastKind::NoResults,
                ToastKind::EndOfResults,
                ToastKind::NoResults,
                ToastKind::Failed,
            ]
        );
        assert!(queue.current().unwrap().is_shown());
    }
}
