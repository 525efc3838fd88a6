// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Lifecycle of the date highlighter inside an editor host.
//!
//! [`DateHighlighter::activate`] subscribes to host notifications and paints
//! the active document. From then on the host's event loop calls
//! [`DateHighlighter::pump`] (or [`DateHighlighter::wait_and_pump`]), which
//! turns notifications into immediate or debounced runs.
//! [`DateHighlighter::deactivate`] cancels the timer, disposes of the
//! subscriptions and hands every style handle back to the host.

use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, select};

use crate::buffer::text_change_notifier::event_channel;
use crate::buffer::{EventSink, HostEvent, SubscriptionId, Topic};
use crate::config::HighlightConfig;
use crate::error::Result;
use crate::highlight::{HighlightEngine, PipelineMetrics};
use crate::host::EditorHost;
use crate::scheduler::UpdateScheduler;

/// An activated date highlighter bound to one host.
pub struct DateHighlighter<H: EditorHost> {
    engine: HighlightEngine<H::Style>,
    scheduler: UpdateScheduler,
    events: Receiver<HostEvent>,
    subscriptions: Vec<SubscriptionId>,
    active: bool,
}

impl<H: EditorHost> DateHighlighter<H> {
    /// Validates `config`, subscribes to the host and highlights the active
    /// document, if there is one.
    ///
    /// If the first pass fails, everything acquired so far is released again
    /// before the error is returned.
    pub fn activate(config: HighlightConfig, host: &mut H) -> Result<Self> {
        config.validate()?;

        let (sender, events) = event_channel();
        let subscriptions = [Topic::ActiveDocumentChanged, Topic::DocumentTextChanged]
            .into_iter()
            .map(|topic| host.subscribe(topic, EventSink::new(topic, sender.clone())))
            .collect();

        let mut highlighter = Self {
            engine: HighlightEngine::new(&config),
            scheduler: UpdateScheduler::new(config.quiet_period()),
            events,
            subscriptions,
            active: true,
        };
        tracing::info!(
            boundary = ?config.boundary,
            distance = ?config.distance,
            quiet_period_ms = config.quiet_period_ms,
            "date highlighter activated"
        );

        if host.active_document().is_some() {
            if let Err(e) = highlighter.refresh(host) {
                highlighter.deactivate(host);
                return Err(e);
            }
        }
        Ok(highlighter)
    }

    /// Tears down: cancels any pending run, disposes of the subscriptions and
    /// releases every style handle. Calling it again has no effect.
    pub fn deactivate(&mut self, host: &mut H) {
        if !self.active {
            return;
        }
        self.active = false;
        self.scheduler.cancel();
        for subscription in self.subscriptions.drain(..) {
            host.unsubscribe(subscription);
        }
        while self.events.try_recv().is_ok() {}
        self.engine.release_all(host);
        tracing::info!(runs = self.engine.metrics().runs, "date highlighter deactivated");
    }

    /// Re-highlights the active document now. This is the manual refresh command.
    pub fn refresh(&mut self, host: &mut H) -> Result<()> {
        self.request_update(host, true).map(|_| ())
    }

    /// Requests a pipeline run, see [`DateHighlighter::request_update_at`].
    pub fn request_update(&mut self, host: &mut H, immediate: bool) -> Result<bool> {
        self.request_update_at(host, immediate, Instant::now())
    }

    /// Requests a pipeline run at time `now`: immediately, or after the quiet
    /// period. A pending run is superseded either way. Returns true if a
    /// document was highlighted.
    pub fn request_update_at(&mut self, host: &mut H, immediate: bool, now: Instant) -> Result<bool> {
        if !self.active {
            return Ok(false);
        }
        if self.scheduler.request_at(immediate, now) {
            return Ok(self.engine.run(host)?.is_some());
        }
        Ok(false)
    }

    /// Reacts to a host notification, see [`DateHighlighter::handle_event_at`].
    pub fn handle_event(&mut self, host: &mut H, event: HostEvent) -> Result<bool> {
        self.handle_event_at(host, event, Instant::now())
    }

    /// Reacts to a host notification at time `now`.
    ///
    /// A document switch runs at once. A text change in the active document is
    /// debounced; changes to other documents are ignored.
    pub fn handle_event_at(&mut self, host: &mut H, event: HostEvent, now: Instant) -> Result<bool> {
        match event {
            HostEvent::ActiveDocumentChanged(_) => self.request_update_at(host, true, now),
            HostEvent::DocumentTextChanged(document) => {
                if host.active_document() == Some(document) {
                    self.request_update_at(host, false, now)
                } else {
                    Ok(false)
                }
            }
        }
    }

    /// Handles queued notifications and a due timer without blocking.
    /// Returns the number of documents highlighted.
    pub fn pump(&mut self, host: &mut H) -> Result<usize> {
        self.pump_at(host, Instant::now())
    }

    /// Like [`DateHighlighter::pump`], treating `now` as the current time.
    pub fn pump_at(&mut self, host: &mut H, now: Instant) -> Result<usize> {
        let mut runs = 0;
        while let Ok(event) = self.events.try_recv() {
            if self.handle_event_at(host, event, now)? {
                runs += 1;
            }
        }
        if self.active && self.scheduler.poll_at(now) && self.engine.run(host)?.is_some() {
            runs += 1;
        }
        Ok(runs)
    }

    /// Blocks until a notification arrives, the armed timer fires or `timeout`
    /// elapses, then pumps. Returns the number of documents highlighted.
    pub fn wait_and_pump(&mut self, host: &mut H, timeout: Duration) -> Result<usize> {
        if !self.active {
            return Ok(0);
        }
        let events = self.events.clone();
        let timer = self.scheduler.timer().cloned().unwrap_or_else(crossbeam_channel::never);

        let mut runs = 0;
        select! {
            recv(events) -> event => {
                if let Ok(event) = event {
                    if self.handle_event(host, event)? {
                        runs += 1;
                    }
                }
            }
            recv(timer) -> _ => {}
            default(timeout) => {}
        }
        Ok(runs + self.pump(host)?)
    }

    /// Returns true between activation and deactivation.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Returns the engine.
    pub fn engine(&self) -> &HighlightEngine<H::Style> {
        &self.engine
    }

    /// Returns the scheduler.
    pub fn scheduler(&self) -> &UpdateScheduler {
        &self.scheduler
    }

    /// Returns the pipeline metrics.
    pub fn metrics(&self) -> &PipelineMetrics {
        self.engine.metrics()
    }

    /// Returns the live subscriptions.
    pub fn subscriptions(&self) -> &[SubscriptionId] {
        &self.subscriptions
    }
}
