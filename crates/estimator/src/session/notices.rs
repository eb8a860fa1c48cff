//! User-facing notices, the session's equivalent of toast messages.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Success,
    Error,
}

#[derive(Event, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }
}

/// Notices received so far, oldest first, trimmed to `max_notices`.
#[derive(Resource, Debug, Clone)]
pub struct NoticeLog {
    notices: Vec<Notice>,
    pub max_notices: usize,
    /// Total ever received, including trimmed ones.
    received: usize,
}

impl Default for NoticeLog {
    fn default() -> Self {
        Self {
            notices: Vec::new(),
            max_notices: 200,
            received: 0,
        }
    }
}

impl NoticeLog {
    pub fn push(&mut self, notice: Notice) {
        self.notices.push(notice);
        self.received += 1;
        if self.notices.len() > self.max_notices {
            let excess = self.notices.len() - self.max_notices;
            self.notices.drain(0..excess);
        }
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn last(&self) -> Option<&Notice> {
        self.notices.last()
    }

    pub fn received(&self) -> usize {
        self.received
    }

    /// Notices received after the first `seen` ones that are still kept.
    pub fn since(&self, seen: usize) -> &[Notice] {
        let trimmed = self.received - self.notices.len();
        let start = seen.saturating_sub(trimmed).min(self.notices.len());
        &self.notices[start..]
    }
}

/// Collects `Notice` events into the `NoticeLog`.
pub fn collect_notices(mut events: EventReader<Notice>, mut log: ResMut<NoticeLog>) {
    for notice in events.read() {
        log.push(notice.clone());
    }
}
