//! Runs API requests off the UI thread.
//!
//! The event loop hands `Request`s to `submit` and polls `drain` once per
//! tick. Requests run concurrently on a small tokio runtime and report back
//! over an unbounded channel, so the UI never blocks on the network.
//! Completions arrive in finishing order: the last response wins.

use tokio::runtime::{Builder, Runtime};
use tokio::sync::mpsc;

use crate::api::{Completion, QuoteClient, Request};

pub struct Dispatcher {
    runtime: Runtime,
    client: QuoteClient,
    tx: mpsc::UnboundedSender<Completion>,
    rx: mpsc::UnboundedReceiver<Completion>,
    in_flight: usize,
}

impl Dispatcher {
    pub fn new(client: QuoteClient) -> std::io::Result<Self> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("quotedesk-net")
            .enable_all()
            .build()?;
        let (tx, rx) = mpsc::unbounded_channel();
        Ok(Dispatcher {
            runtime,
            client,
            tx,
            rx,
            in_flight: 0,
        })
    }

    /// Start a request. Never blocks.
    pub fn submit(&mut self, request: Request) {
        log::debug!("dispatching: {}", request.describe());
        let client = self.client.clone();
        let tx = self.tx.clone();
        self.in_flight += 1;
        self.runtime.spawn(async move {
            let completion = client.execute(request).await;
            if tx.send(completion).is_err() {
                log::debug!("completion dropped: dispatcher is gone");
            }
        });
    }

    /// Collect every completion that has arrived since the last call.
    pub fn drain(&mut self) -> Vec<Completion> {
        let mut done = Vec::new();
        while let Ok(completion) = self.rx.try_recv() {
            done.push(completion);
        }
        self.in_flight = self.in_flight.saturating_sub(done.len());
        done
    }

    /// Requests submitted but not yet drained
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }
}
