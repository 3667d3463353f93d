//! Transient status banner.
//!
//! Only the latest message is kept. Its phase is derived from how long ago it
//! was posted, so a newer call simply restarts the clock.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::debug;

use crate::config::NotificationConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

impl NoticeKind {
    pub fn css_class(&self) -> &'static str {
        match self {
            NoticeKind::Info => "notice-info",
            NoticeKind::Success => "notice-success",
            NoticeKind::Error => "notice-error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Visible,
    Fading,
    Hidden,
}

impl Phase {
    pub fn css_class(&self) -> &'static str {
        match self {
            Phase::Visible => "banner-visible",
            Phase::Fading => "banner-fading",
            Phase::Hidden => "banner-hidden",
        }
    }
}

/// What the banner area shows right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub message: String,
    pub kind: NoticeKind,
    pub phase: Phase,
    /// Time left before the banner starts fading.
    pub remaining: Duration,
}

impl Banner {
    pub fn kind_class(&self) -> &'static str {
        self.kind.css_class()
    }

    pub fn phase_class(&self) -> &'static str {
        self.phase.css_class()
    }

    pub fn remaining_ms(&self) -> u128 {
        self.remaining.as_millis()
    }
}

#[derive(Debug, Clone)]
struct Notice {
    message: String,
    kind: NoticeKind,
    posted_at: Instant,
}

#[derive(Clone)]
pub struct Notifier {
    visible_for: Duration,
    fade_for: Duration,
    current: Arc<RwLock<Option<Notice>>>,
}

impl Notifier {
    pub fn new(visible_for: Duration, fade_for: Duration) -> Self {
        Self {
            visible_for,
            fade_for,
            current: Arc::new(RwLock::new(None)),
        }
    }

    pub fn from_config(config: &NotificationConfig) -> Self {
        Self::new(
            Duration::from_secs(config.visible_secs),
            Duration::from_millis(config.fade_millis),
        )
    }

    pub async fn notify(&self, message: impl Into<String>, kind: NoticeKind) {
        let message = message.into();
        debug!("Notice ({:?}): {}", kind, message);
        *self.current.write().await = Some(Notice {
            message,
            kind,
            posted_at: Instant::now(),
        });
    }

    pub async fn info(&self, message: impl Into<String>) {
        self.notify(message, NoticeKind::Info).await;
    }

    pub async fn success(&self, message: impl Into<String>) {
        self.notify(message, NoticeKind::Success).await;
    }

    pub async fn error(&self, message: impl Into<String>) {
        self.notify(message, NoticeKind::Error).await;
    }

    /// The banner as it should be drawn now, or `None` if nothing was ever posted.
    pub async fn banner(&self) -> Option<Banner> {
        let current = self.current.read().await;
        let notice = current.as_ref()?;
        let elapsed = notice.posted_at.elapsed();

        Some(Banner {
            message: notice.message.clone(),
            kind: notice.kind,
            phase: self.phase_after(elapsed),
            remaining: self.visible_for.saturating_sub(elapsed),
        })
    }

    pub fn phase_after(&self, elapsed: Duration) -> Phase {
        if elapsed < self.visible_for {
            Phase::Visible
        } else if elapsed < self.visible_for + self.fade_for {
            Phase::Fading
        } else {
            Phase::Hidden
        }
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::from_config(&NotificationConfig::default())
    }
}
