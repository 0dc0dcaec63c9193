//! Background requests.
//!
//! Requests run on tokio tasks and report back as [`NetEvent`]s; the event
//! loop is the only place that touches screen state. Every event carries the
//! [`ScreenId`] of the screen that issued it, and a screen's tasks are aborted
//! when its [`ScreenLifetime`] is dropped, so a response can never land on a
//! screen that is gone.

use api_types::transaction::{Transaction, TransactionNew};
use screens::{Backend, ClientError};
use tokio::{
    sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel},
    task::AbortHandle,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScreenId(u64);

#[derive(Debug)]
pub enum NetEvent {
    FeedLoaded {
        screen: ScreenId,
        result: Result<Vec<Transaction>, ClientError>,
    },
    Submitted {
        screen: ScreenId,
        result: Result<(), ClientError>,
    },
}

impl NetEvent {
    pub fn screen(&self) -> ScreenId {
        match self {
            Self::FeedLoaded { screen, .. } | Self::Submitted { screen, .. } => *screen,
        }
    }
}

/// In-flight work of one mounted screen. Dropping it aborts that work.
#[derive(Debug)]
pub struct ScreenLifetime {
    id: ScreenId,
    handles: Vec<AbortHandle>,
}

impl ScreenLifetime {
    pub fn id(&self) -> ScreenId {
        self.id
    }

    fn track(&mut self, handle: AbortHandle) {
        self.handles.retain(|handle| !handle.is_finished());
        self.handles.push(handle);
    }
}

impl Drop for ScreenLifetime {
    fn drop(&mut self) {
        for handle in &self.handles {
            handle.abort();
        }
    }
}

pub struct Dispatcher<B> {
    backend: B,
    tx: UnboundedSender<NetEvent>,
    next_id: u64,
}

impl<B> Dispatcher<B>
where
    B: Backend + Clone + Send + Sync + 'static,
{
    pub fn new(backend: B) -> (Self, UnboundedReceiver<NetEvent>) {
        let (tx, rx) = unbounded_channel();
        let dispatcher = Self {
            backend,
            tx,
            next_id: 0,
        };
        (dispatcher, rx)
    }

    /// Starts the lifetime of a newly shown screen.
    pub fn mount(&mut self) -> ScreenLifetime {
        self.next_id += 1;
        ScreenLifetime {
            id: ScreenId(self.next_id),
            handles: Vec::new(),
        }
    }

    pub fn load_feed(&self, lifetime: &mut ScreenLifetime) {
        let backend = self.backend.clone();
        let tx = self.tx.clone();
        let screen = lifetime.id();

        let handle = tokio::spawn(async move {
            let result = backend.list_transactions().await;
            if tx.send(NetEvent::FeedLoaded { screen, result }).is_err() {
                tracing::debug!("event loop gone, dropping transaction list");
            }
        });
        lifetime.track(handle.abort_handle());
    }

    pub fn submit(&self, lifetime: &mut ScreenLifetime, payload: TransactionNew) {
        let backend = self.backend.clone();
        let tx = self.tx.clone();
        let screen = lifetime.id();

        let handle = tokio::spawn(async move {
            let result = backend.create_transaction(payload).await;
            if tx.send(NetEvent::Submitted { screen, result }).is_err() {
                tracing::debug!("event loop gone, dropping submit result");
            }
        });
        lifetime.track(handle.abort_handle());
    }
}
