//! Console event sink adapter.
//!
//! Implements [`EventSink`] by rendering each [`BoardEvent`] as its
//! diagnostic line and queueing it.  The tick context only formats into a
//! fixed-capacity queue; the foreground loop drains it to the serial
//! console, so nothing prints while the shared state is locked.

use heapless::Deque;

use crate::app::events::BoardEvent;
use crate::app::ports::EventSink;
use crate::diagnostics::{self, Line};

/// Lines held between foreground drains.
pub const CONSOLE_QUEUE_DEPTH: usize = 8;

/// Adapter that queues every [`BoardEvent`] as a console line.
#[derive(Default)]
pub struct ConsoleSink {
    pending: Deque<Line, CONSOLE_QUEUE_DEPTH>,
    dropped: u32,
}

impl ConsoleSink {
    pub const fn new() -> Self {
        Self {
            pending: Deque::new(),
            dropped: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Lines discarded because the queue was full.
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    /// Move every queued line out, oldest first, together with the number
    /// of lines evicted since the previous call.  Both are reset.
    pub fn take_lines(&mut self) -> (Deque<Line, CONSOLE_QUEUE_DEPTH>, u32) {
        let dropped = core::mem::take(&mut self.dropped);
        (core::mem::take(&mut self.pending), dropped)
    }
}

impl EventSink for ConsoleSink {
    fn emit(&mut self, event: &BoardEvent) {
        // Oldest line is evicted; the newest event is the one that matters.
        if self.pending.is_full() {
            let _ = self.pending.pop_front();
            self.dropped = self.dropped.saturating_add(1);
        }
        let _ = self.pending.push_back(diagnostics::format_event(event));
    }
}
