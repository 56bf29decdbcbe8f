//! Severity-tagged status messages accumulated per command.

use serde::{Deserialize, Serialize};

/// Message severity, ordered so that `Command` outranks `Error` outranks
/// `Warn` and so on down to `Ok`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Ok,
    Info,
    Warn,
    Error,
    Command,
}

/// One status message produced during a command round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub severity: Severity,
    pub message: String,
}

impl Status {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Status {
            severity,
            message: message.into(),
        }
    }
}

/// The per-command status collection, iterated in descending severity then
/// ascending message order.
///
/// Cleared by the dispatcher before every command and flushed to the host
/// afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusList {
    items: Vec<Status>,
}

impl StatusList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert keeping the (descending severity, ascending message) order.
    pub fn add(&mut self, severity: Severity, message: impl Into<String>) {
        let item = Status::new(severity, message);
        let idx = self.items.partition_point(|existing| {
            (std::cmp::Reverse(existing.severity), &existing.message)
                <= (std::cmp::Reverse(item.severity), &item.message)
        });
        self.items.insert(idx, item);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if any accumulated message is `Error` severity or above.
    pub fn has_errors(&self) -> bool {
        self.items
            .iter()
            .any(|item| item.severity >= Severity::Error)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Status> {
        self.items.iter()
    }
}

impl<'a> IntoIterator for &'a StatusList {
    type Item = &'a Status;
    type IntoIter = std::slice::Iter<'a, Status>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_descending_severity_then_message() {
        let mut list = StatusList::new();
        list.add(Severity::Info, "b");
        list.add(Severity::Error, "a");
        list.add(Severity::Info, "a");

        let collected: Vec<(Severity, &str)> = list
            .iter()
            .map(|s| (s.severity, s.message.as_str()))
            .collect();
        assert_eq!(
            collected,
            vec![
                (Severity::Error, "a"),
                (Severity::Info, "a"),
                (Severity::Info, "b"),
            ]
        );
    }

    #[test]
    fn test_has_errors() {
        let mut list = StatusList::new();
        list.add(Severity::Warn, "soft");
        assert!(!list.has_errors());
        list.add(Severity::Error, "hard");
        assert!(list.has_errors());
    }

    #[test]
    fn test_clear() {
        let mut list = StatusList::new();
        list.add(Severity::Ok, "done");
        list.clear();
        assert!(list.is_empty());
    }
}
