use crate::jssp::Time;

use csv::Writer;
use serde::Serialize;
use std::io::{sink, Sink, Write};
use std::sync::mpsc;
use std::sync::mpsc::{Receiver, Sender};
use std::time::Duration;

/// Statistics of one instance over one epoch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    pub instance: usize,
    pub engine: &'static str,
    pub epoch: usize,
    pub epoch_iterations: usize,
    pub ran_iterations: usize,
    pub cpu_time_ms: f64,
    pub best_makespan: Option<Time>,
    pub improved: bool,
    /// Set by the supervisor once the epoch's termination decisions are known.
    pub running: bool,
}

impl Message {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        instance: usize,
        engine: &'static str,
        epoch: usize,
        epoch_iterations: usize,
        ran_iterations: usize,
        cpu_time: Duration,
        best_makespan: Option<Time>,
        improved: bool,
    ) -> Self {
        Message {
            instance,
            engine,
            epoch,
            epoch_iterations,
            ran_iterations,
            cpu_time_ms: cpu_time.as_micros() as f64 / 1000.0,
            best_makespan,
            improved,
            running: true,
        }
    }
}

/// Collects the messages sent by the workers and writes them as csv rows.
pub struct Supervisor<W: Write> {
    sender: Sender<Message>,
    receiver: Receiver<Message>,
    writer: Writer<W>,
    received: usize,
}

impl<W: Write> Supervisor<W> {
    pub fn new(writer: Writer<W>) -> Self {
        let (tx, rx) = mpsc::channel();
        Supervisor {
            sender: tx,
            receiver: rx,
            writer,
            received: 0,
        }
    }

    pub fn sender(&self) -> Sender<Message> {
        self.sender.clone()
    }

    /// Writes every message that is waiting in the channel.
    /// Instances listed in `stopped` are marked as no longer running.
    pub fn aggregate_receive(&mut self, stopped: &[usize]) -> Result<usize, csv::Error> {
        let mut count = 0;
        while let Ok(mut message) = self.receiver.try_recv() {
            message.running = !stopped.contains(&message.instance);
            self.writer.serialize(&message)?;
            count += 1;
        }
        self.writer.flush()?;
        self.received += count;

        Ok(count)
    }

    /// Returns the number of messages written so far.
    pub fn received(&self) -> usize {
        self.received
    }

    pub fn into_writer(self) -> Writer<W> {
        self.writer
    }
}

impl Default for Supervisor<Sink> {
    fn default() -> Self {
        Supervisor::new(Writer::from_writer(sink()))
    }
}
