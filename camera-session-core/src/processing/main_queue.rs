use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};

use crate::traits::main_context::{MainContext, MainTask};

/// A [`MainContext`] backed by a channel the host drains on its UI thread.
///
/// Tasks run in dispatch order, only when the owner calls one of the
/// `run_*` methods.
pub struct MainQueue {
    sender: Sender<MainTask>,
    receiver: Receiver<MainTask>,
}

impl MainQueue {
    pub fn new() -> Self {
        let (sender, receiver) = crossbeam_channel::unbounded();
        Self { sender, receiver }
    }

    /// Run every task queued so far. Returns how many ran.
    pub fn run_pending(&self) -> usize {
        let mut ran = 0;
        while let Ok(task) = self.receiver.try_recv() {
            task();
            ran += 1;
        }
        ran
    }

    /// Wait up to `timeout` for one task and run it.
    pub fn run_next_timeout(&self, timeout: Duration) -> bool {
        match self.receiver.recv_timeout(timeout) {
            Ok(task) => {
                task();
                true
            }
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => false,
        }
    }

    /// Run tasks until `done` holds or no task arrives within `timeout`.
    pub fn run_until(&self, timeout: Duration, mut done: impl FnMut() -> bool) -> bool {
        loop {
            self.run_pending();
            if done() {
                return true;
            }
            if !self.run_next_timeout(timeout) {
                return done();
            }
        }
    }

    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }
}

impl Default for MainQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl MainContext for MainQueue {
    fn dispatch(&self, task: MainTask) {
        // The receiver lives in `self`, so the channel cannot be disconnected.
        let _ = self.sender.send(task);
    }
}
