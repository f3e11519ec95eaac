//! # Event Reconciler Service
//!
//! Each reconciler session is identified by an epoch. A poll captures the
//! epoch when it starts and re-checks it after every await; once the session
//! is torn down (or replaced) the poll discards its results.

use std::collections::BTreeMap;
use std::sync::{Arc, Weak};

use cs_telemetry::{EVENTS_EMITTED, POLLS_TOTAL, POLL_DURATION, WATERMARK_BLOCK};
use parking_lot::Mutex;
use shared_types::{BlockNumber, ChainEvent};
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, trace, warn};

use crate::config::ReconcilerConfig;
use crate::domain::{PollCycle, PollOutcome, PollPlan, PollState, ReconcilerError};
use crate::ports::LedgerEventSource;

/// Subscriber callback.
pub type EventCallback = Arc<dyn Fn(&ChainEvent) + Send + Sync>;

struct Inner {
    subscribers: BTreeMap<u64, EventCallback>,
    next_subscriber: u64,
    /// Present while at least one subscriber exists.
    cycle: Option<PollCycle>,
    epoch: u64,
    shutdown: Option<watch::Sender<bool>>,
}

impl Inner {
    fn live_cycle(&mut self, epoch: u64) -> Option<&mut PollCycle> {
        if self.epoch == epoch {
            self.cycle.as_mut()
        } else {
            None
        }
    }
}

struct Shared<S> {
    source: Arc<S>,
    config: ReconcilerConfig,
    inner: Mutex<Inner>,
}

/// Removal side of the subscriber table, independent of the source type.
trait SubscriberRegistry: Send + Sync {
    fn remove(&self, id: u64);
}

impl<S: LedgerEventSource + 'static> SubscriberRegistry for Shared<S> {
    fn remove(&self, id: u64) {
        let mut inner = self.inner.lock();
        if inner.subscribers.remove(&id).is_none() {
            return;
        }
        debug!(subscriber = id, "[cs-04] Subscriber removed");

        if inner.subscribers.is_empty() && inner.cycle.is_some() {
            inner.cycle = None;
            inner.epoch += 1;
            if let Some(shutdown) = inner.shutdown.take() {
                let _ = shutdown.send(true);
            }
            info!("[cs-04] Last subscriber left, polling stopped");
        }
    }
}

impl<S: LedgerEventSource + 'static> Shared<S> {
    async fn poll(&self, epoch: u64) -> PollOutcome {
        let timer = POLL_DURATION.start_timer();
        let outcome = self.run_poll(epoch).await;
        timer.observe_duration();
        if outcome != PollOutcome::Inactive {
            POLLS_TOTAL.with_label_values(&[outcome.label()]).inc();
        }
        outcome
    }

    async fn run_poll(&self, epoch: u64) -> PollOutcome {
        {
            let mut inner = self.inner.lock();
            let Some(cycle) = inner.live_cycle(epoch) else {
                return PollOutcome::Inactive;
            };
            if !cycle.try_begin() {
                debug!("[cs-04] Poll in progress, tick suppressed");
                return PollOutcome::Skipped;
            }
        }

        let latest = match self.source.latest_block().await {
            Ok(block) => block,
            Err(e) => return self.fail(epoch, "latest block lookup", &e),
        };

        let (from, to) = {
            let mut inner = self.inner.lock();
            let Some(cycle) = inner.live_cycle(epoch) else {
                return PollOutcome::Discarded;
            };
            match cycle.plan(latest) {
                PollPlan::UpToDate => {
                    trace!(block = latest, "[cs-04] No new blocks");
                    return PollOutcome::NoNewBlocks;
                }
                PollPlan::Read { from, to } => (from, to),
            }
        };

        let raw = match self
            .source
            .events(from, to, &self.config.event_name)
            .await
        {
            Ok(raw) => raw,
            Err(e) => return self.fail(epoch, "event query", &e),
        };

        let (events, subscribers) = {
            let mut inner = self.inner.lock();
            let Some(cycle) = inner.live_cycle(epoch) else {
                debug!(from, to, "[cs-04] Session ended mid-poll, discarding results");
                return PollOutcome::Discarded;
            };
            let events = cycle.accept(raw);
            cycle.complete(latest);
            let subscribers: Vec<(u64, EventCallback)> = inner
                .subscribers
                .iter()
                .map(|(id, callback)| (*id, Arc::clone(callback)))
                .collect();
            (events, subscribers)
        };
        WATERMARK_BLOCK.set(latest as f64);

        // An unsubscribe during delivery takes effect from the next event.
        let mut emitted = 0;
        for event in &events {
            let live: Vec<EventCallback> = {
                let inner = self.inner.lock();
                if inner.epoch != epoch {
                    break;
                }
                subscribers
                    .iter()
                    .filter(|(id, _)| inner.subscribers.contains_key(id))
                    .map(|(_, callback)| Arc::clone(callback))
                    .collect()
            };
            for callback in &live {
                callback(event);
            }
            emitted += 1;
        }
        EVENTS_EMITTED.inc_by(emitted as u64);

        if emitted > 0 {
            info!(from, to, emitted, "[cs-04] Delivered ledger events");
        } else {
            debug!(from, to, "[cs-04] Poll advanced with no new events");
        }
        PollOutcome::Advanced { from, to, emitted }
    }

    fn fail(&self, epoch: u64, stage: &str, error: &ReconcilerError) -> PollOutcome {
        let mut inner = self.inner.lock();
        match inner.live_cycle(epoch) {
            Some(cycle) => {
                warn!("[cs-04] Poll failed during {}: {}", stage, error);
                cycle.abort();
                PollOutcome::Failed
            }
            None => PollOutcome::Discarded,
        }
    }
}

/// Event Reconciler - polls the ledger and fans events out to subscribers.
///
/// Cloning yields another handle to the same reconciler.
pub struct EventReconciler<S: LedgerEventSource + 'static> {
    shared: Arc<Shared<S>>,
}

impl<S: LedgerEventSource + 'static> Clone for EventReconciler<S> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<S: LedgerEventSource + 'static> EventReconciler<S> {
    /// Create a reconciler; no timer runs until the first subscription.
    pub fn new(source: Arc<S>, config: ReconcilerConfig) -> Result<Self, ReconcilerError> {
        config.validate()?;
        Ok(Self {
            shared: Arc::new(Shared {
                source,
                config,
                inner: Mutex::new(Inner {
                    subscribers: BTreeMap::new(),
                    next_subscriber: 0,
                    cycle: None,
                    epoch: 0,
                    shutdown: None,
                }),
            }),
        })
    }

    /// Active configuration.
    pub fn config(&self) -> &ReconcilerConfig {
        &self.shared.config
    }

    /// Register a callback. The first subscriber starts the poll timer,
    /// which needs a running tokio runtime.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&ChainEvent) + Send + Sync + 'static,
    {
        let mut inner = self.shared.inner.lock();
        let id = inner.next_subscriber;
        inner.next_subscriber += 1;
        inner.subscribers.insert(id, Arc::new(callback));

        if inner.cycle.is_none() {
            inner.epoch += 1;
            inner.cycle = Some(PollCycle::new(&self.shared.config));
            let (shutdown_tx, shutdown_rx) = watch::channel(false);
            inner.shutdown = Some(shutdown_tx);
            self.spawn_timer(inner.epoch, shutdown_rx);
            info!(
                interval_secs = self.shared.config.poll_interval_secs,
                event = %self.shared.config.event_name,
                "[cs-04] Polling started"
            );
        }
        debug!(subscriber = id, "[cs-04] Subscriber added");

        let registry: Arc<dyn SubscriberRegistry> = self.shared.clone();
        Subscription {
            registry: Arc::downgrade(&registry),
            id,
            active: true,
        }
    }

    fn spawn_timer(&self, epoch: u64, mut shutdown: watch::Receiver<bool>) {
        let shared = Arc::clone(&self.shared);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(shared.config.poll_interval());
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let shared = Arc::clone(&shared);
                        tokio::spawn(async move {
                            shared.poll(epoch).await;
                        });
                    }
                    _ = shutdown.changed() => {
                        debug!(epoch, "[cs-04] Poll timer stopped");
                        break;
                    }
                }
            }
        });
    }

    /// Run one poll now against the active session.
    pub async fn poll_now(&self) -> PollOutcome {
        let epoch = {
            let inner = self.shared.inner.lock();
            if inner.cycle.is_none() {
                return PollOutcome::Inactive;
            }
            inner.epoch
        };
        self.shared.poll(epoch).await
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.shared.inner.lock().subscribers.len()
    }

    /// True while a session (and its timer) is active.
    pub fn is_running(&self) -> bool {
        self.shared.inner.lock().cycle.is_some()
    }

    /// Watermark of the active session.
    pub fn watermark(&self) -> Option<BlockNumber> {
        self.shared.inner.lock().cycle.as_ref().map(PollCycle::watermark)
    }

    /// Poll state of the active session.
    pub fn state(&self) -> Option<PollState> {
        self.shared.inner.lock().cycle.as_ref().map(PollCycle::state)
    }
}

/// Handle returned by `subscribe`. Dropping it unsubscribes.
pub struct Subscription {
    registry: Weak<dyn SubscriberRegistry>,
    id: u64,
    active: bool,
}

impl Subscription {
    /// Subscriber id, unique per reconciler.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Remove this subscriber now.
    pub fn unsubscribe(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        if let Some(registry) = self.registry.upgrade() {
            registry.remove(self.id);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}
