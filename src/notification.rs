//! Non-fatal findings collected while decoding a drawing.
//!
//! Anything that does not invalidate later file positions (an absent
//! preview, a zero handle delta, a repeated handle) is recorded here and
//! returned with the document instead of failing the open. Every
//! notification is also forwarded to the `log` facade.

use std::fmt;

use log::{info, warn};

/// Category of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationType {
    /// Present in the file but deliberately not decoded.
    NotImplemented,
    /// Informational: an optional part of the file is absent.
    Absent,
    /// Suspicious but decodable data.
    Warning,
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotImplemented => write!(f, "NotImplemented"),
            Self::Absent => write!(f, "Absent"),
            Self::Warning => write!(f, "Warning"),
        }
    }
}

/// One finding, tagged with the section it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub notification_type: NotificationType,
    /// Section name, e.g. `AcDb:Handles`.
    pub section: &'static str,
    pub message: String,
}

impl Notification {
    pub fn new(
        notification_type: NotificationType,
        section: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            notification_type,
            section,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.notification_type, self.section, self.message)
    }
}

/// Notifications of one open operation, in the order they were raised.
#[derive(Debug, Clone, Default)]
pub struct NotificationCollection {
    items: Vec<Notification>,
}

impl NotificationCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a notification and log it.
    pub fn notify(
        &mut self,
        notification_type: NotificationType,
        section: &'static str,
        message: impl Into<String>,
    ) {
        let n = Notification::new(notification_type, section, message);
        match n.notification_type {
            NotificationType::Warning => warn!("{n}"),
            _ => info!("{n}"),
        }
        self.items.push(n);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Notification> {
        self.items.iter()
    }

    /// All notifications of a specific type.
    pub fn of_type(&self, nt: NotificationType) -> Vec<&Notification> {
        self.items.iter().filter(|n| n.notification_type == nt).collect()
    }

    pub fn has_type(&self, nt: NotificationType) -> bool {
        self.items.iter().any(|n| n.notification_type == nt)
    }

    /// All notifications raised by one section.
    pub fn for_section(&self, section: &str) -> Vec<&Notification> {
        self.items.iter().filter(|n| n.section == section).collect()
    }

    pub fn into_vec(self) -> Vec<Notification> {
        self.items
    }
}

impl IntoIterator for NotificationCollection {
    type Item = Notification;
    type IntoIter = std::vec::IntoIter<Notification>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a NotificationCollection {
    type Item = &'a Notification;
    type IntoIter = std::slice::Iter<'a, Notification>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
