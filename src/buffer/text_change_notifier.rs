// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Notifications from the editor host.
//!
//! Hosts report editor activity by pushing [`HostEvent`]s into the [`EventSink`]
//! handed to them at subscription time. The highlighter drains the matching
//! receiver on its own thread and decides when to re-run.

use crossbeam_channel::{Receiver, Sender};

/// Host-assigned identifier of an open document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(pub u64);

/// Host-assigned identifier of a subscription, used to dispose of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub u64);

/// Kind of notification a sink subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    /// The focused document changed
    ActiveDocumentChanged,
    /// The text of some open document changed
    DocumentTextChanged,
}

/// Something happened in the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    /// Another document (or none) became active
    ActiveDocumentChanged(Option<DocumentId>),
    /// The text of a document changed; it need not be the active one
    DocumentTextChanged(DocumentId),
}

impl HostEvent {
    /// Returns the topic this event is published under.
    pub fn topic(&self) -> Topic {
        match self {
            HostEvent::ActiveDocumentChanged(_) => Topic::ActiveDocumentChanged,
            HostEvent::DocumentTextChanged(_) => Topic::DocumentTextChanged,
        }
    }
}

/// Sending half of a subscription, owned by the host.
#[derive(Debug, Clone)]
pub struct EventSink {
    topic: Topic,
    sender: Sender<HostEvent>,
}

impl EventSink {
    pub(crate) fn new(topic: Topic, sender: Sender<HostEvent>) -> Self {
        Self { topic, sender }
    }

    /// Returns the topic this sink was subscribed for.
    pub fn topic(&self) -> Topic {
        self.topic
    }

    /// Delivers `event` if it belongs to this sink's topic.
    ///
    /// Returns false if the event was filtered out or the highlighter is gone.
    pub fn notify(&self, event: HostEvent) -> bool {
        if event.topic() != self.topic {
            return false;
        }
        self.sender.send(event).is_ok()
    }
}

/// Creates the channel connecting host sinks to the highlighter.
pub(crate) fn event_channel() -> (Sender<HostEvent>, Receiver<HostEvent>) {
    crossbeam_channel::unbounded()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_topics() {
        assert_eq!(HostEvent::ActiveDocumentChanged(None).topic(), Topic::ActiveDocumentChanged);
        assert_eq!(HostEvent::DocumentTextChanged(DocumentId(1)).topic(), Topic::DocumentTextChanged);
    }

    #[test]
    fn test_sink_filters_by_topic() {
        let (sender, receiver) = event_channel();
        let sink = EventSink::new(Topic::DocumentTextChanged, sender);

        assert!(sink.notify(HostEvent::DocumentTextChanged(DocumentId(4))));
        assert!(!sink.notify(HostEvent::ActiveDocumentChanged(Some(DocumentId(4)))));

        assert_eq!(receiver.try_recv(), Ok(HostEvent::DocumentTextChanged(DocumentId(4))));
        assert!(receiver.try_recv().is_err());
    }

    #[test]
    fn test_sink_after_receiver_dropped() {
        let (sender, receiver) = event_channel();
        let sink = EventSink::new(Topic::ActiveDocumentChanged, sender);
        drop(receiver);
        assert!(!sink.notify(HostEvent::ActiveDocumentChanged(None)));
    }
}
