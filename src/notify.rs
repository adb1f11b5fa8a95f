use std::time::{Duration, Instant};

pub const TOAST_TTL: Duration = Duration::from_secs(3);

pub trait Notifier {
    fn notify(&mut self, title: &str);
}

pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&mut self, title: &str) {
        eprintln!("{title}");
    }
}

/// Single expiring status line shown at the bottom of the window.
#[derive(Debug)]
pub struct Toasts {
    current: Option<(String, Instant)>,
    ttl: Duration,
}

impl Default for Toasts {
    fn default() -> Self {
        Self::new(TOAST_TTL)
    }
}

impl Toasts {
    pub fn new(ttl: Duration) -> Self {
        Self { current: None, ttl }
    }

    pub fn show(&mut self, title: impl Into<String>, now: Instant) {
        self.current = Some((title.into(), now + self.ttl));
    }

    /// Drops the toast once expired and returns whatever is still visible.
    pub fn active(&mut self, now: Instant) -> Option<&str> {
        if let Some((_, expires_at)) = &self.current
            && now >= *expires_at
        {
            self.current = None;
        }
        self.current.as_ref().map(|(title, _)| title.as_str())
    }

    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.current
            .as_ref()
            .map(|(_, expires_at)| expires_at.saturating_duration_since(now))
    }
}

impl Notifier for Toasts {
    fn notify(&mut self, title: &str) {
        self.show(title, Instant::now());
    }
}
