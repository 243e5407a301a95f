//! Rendezvous between the simulation thread and its consumer.
//!
//! The producer hands over one [`Message`] at a time and then blocks until the
//! consumer asks for the next one. Nothing is buffered: after each exchange the
//! simulation is paused at a well defined point, which is also where host
//! requests such as switching sides are applied.
//!
//! ```no_run
//! use cs_core::message_sync::MessageSync;
//!
//! let (sync, receiver) = MessageSync::channel();
//! std::thread::spawn(move || {
//!     let mut sync = sync;
//!     if sync.wait() {
//!         let _ = sync.send_update(cs_core::messages::Message::Initialized);
//!     }
//! });
//! while let Some(message) = receiver.get_update() {
//!     println!("{}", message.kind());
//! }
//! ```

use std::sync::mpsc::{sync_channel, Receiver, SyncSender};
use tracing::trace;

use crate::messages::Message;

/// Request sent from the consumer to the producer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Produce the next message.
    Continue,
    /// Swap the sides the player sees. The producer keeps waiting.
    SwitchSides,
    /// End the simulation.
    Stop,
}

#[derive(Debug)]
enum Mode {
    Channel {
        updates: SyncSender<Message>,
        control: Receiver<Control>,
    },
    Collecting(Vec<Message>),
}

/// Producer half, owned by the simulation.
#[derive(Debug)]
pub struct MessageSync {
    mode: Mode,
    stopped: bool,
    pending_switches: u32,
}

/// Consumer half, owned by the host.
#[derive(Debug)]
pub struct MessageReceiver {
    updates: Receiver<Message>,
    control: SyncSender<Control>,
}

impl MessageSync {
    /// Connected producer and consumer halves.
    #[must_use]
    pub fn channel() -> (Self, MessageReceiver) {
        let (update_tx, update_rx) = sync_channel(0);
        let (control_tx, control_rx) = sync_channel(0);
        (
            Self {
                mode: Mode::Channel {
                    updates: update_tx,
                    control: control_rx,
                },
                stopped: false,
                pending_switches: 0,
            },
            MessageReceiver {
                updates: update_rx,
                control: control_tx,
            },
        )
    }

    /// A producer without a consumer. Every message is recorded and the
    /// simulation always continues.
    #[must_use]
    pub const fn collecting() -> Self {
        Self {
            mode: Mode::Collecting(Vec::new()),
            stopped: false,
            pending_switches: 0,
        }
    }

    /// Block until the consumer asks for the first message. Returns false if
    /// the consumer stopped or went away.
    pub fn wait(&mut self) -> bool {
        self.await_continue()
    }

    /// Hand `message` to the consumer and wait until it asks for the next
    /// one. Returns false once the consumer has stopped.
    pub fn send_update(&mut self, message: Message) -> bool {
        if self.stopped {
            return false;
        }
        trace!(kind = message.kind(), "message");
        match &mut self.mode {
            Mode::Collecting(messages) => {
                messages.push(message);
                true
            }
            Mode::Channel { updates, .. } => {
                if updates.send(message).is_err() {
                    self.stopped = true;
                    return false;
                }
                self.await_continue()
            }
        }
    }

    fn await_continue(&mut self) -> bool {
        if self.stopped {
            return false;
        }
        let Mode::Channel { control, .. } = &self.mode else {
            return true;
        };
        loop {
            match control.recv() {
                Ok(Control::Continue) => return true,
                Ok(Control::SwitchSides) => self.pending_switches += 1,
                Ok(Control::Stop) | Err(_) => {
                    self.stopped = true;
                    return false;
                }
            }
        }
    }

    /// Number of side switches requested since the last call.
    pub fn take_side_switches(&mut self) -> u32 {
        std::mem::take(&mut self.pending_switches)
    }

    /// Whether the consumer has stopped the simulation.
    #[must_use]
    pub const fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Messages recorded by a collecting producer since the last call.
    pub fn take_collected(&mut self) -> Vec<Message> {
        match &mut self.mode {
            Mode::Collecting(messages) => std::mem::take(messages),
            Mode::Channel { .. } => Vec::new(),
        }
    }
}

impl MessageReceiver {
    /// Ask for the next message and wait for it. Returns `None` once the
    /// simulation has finished.
    #[must_use]
    pub fn get_update(&self) -> Option<Message> {
        self.control.send(Control::Continue).ok()?;
        self.updates.recv().ok()
    }

    /// Stop the simulation. Its next send fails.
    pub fn stop(&self) {
        let _ = self.control.send(Control::Stop);
    }

    /// Swap the sides the player sees before the next message is produced.
    pub fn switch_sides(&self) {
        let _ = self.control.send(Control::SwitchSides);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_collecting_records_messages() {
        let mut sync = MessageSync::collecting();
        assert!(sync.wait());
        assert!(sync.send_update(Message::Initialized));
        assert!(sync.send_update(Message::TimeChanged));
        assert_eq!(
            sync.take_collected(),
            vec![Message::Initialized, Message::TimeChanged]
        );
        assert!(sync.take_collected().is_empty());
    }

    #[test]
    fn test_channel_delivers_in_order() {
        let (mut sync, receiver) = MessageSync::channel();
        let producer = thread::spawn(move || {
            if !sync.wait() {
                return 0;
            }
            let mut sent = 0;
            for message in [Message::Initialized, Message::TimeChanged, Message::GameOver] {
                if !sync.send_update(message) {
                    break;
                }
                sent += 1;
            }
            sent
        });
        assert_eq!(receiver.get_update(), Some(Message::Initialized));
        assert_eq!(receiver.get_update(), Some(Message::TimeChanged));
        assert_eq!(receiver.get_update(), Some(Message::GameOver));
        assert_eq!(receiver.get_update(), None);
        assert_eq!(producer.join().unwrap(), 3);
    }

    #[test]
    fn test_stop_ends_producer() {
        let (mut sync, receiver) = MessageSync::channel();
        let producer = thread::spawn(move || {
            let mut sent = 0;
            if sync.wait() {
                while sync.send_update(Message::TimeChanged) {
                    sent += 1;
                }
            }
            (sent, sync.is_stopped())
        });
        assert_eq!(receiver.get_update(), Some(Message::TimeChanged));
        assert_eq!(receiver.get_update(), Some(Message::TimeChanged));
        receiver.stop();
        assert_eq!(producer.join().unwrap(), (1, true));
    }

    #[test]
    fn test_switch_sides_is_applied_at_sync_point() {
        let (mut sync, receiver) = MessageSync::channel();
        let producer = thread::spawn(move || {
            assert!(sync.wait());
            assert!(sync.send_update(Message::TimeChanged));
            let switches = sync.take_side_switches();
            let _ = sync.send_update(Message::GameOver);
            switches
        });
        assert_eq!(receiver.get_update(), Some(Message::TimeChanged));
        receiver.switch_sides();
        assert_eq!(receiver.get_update(), Some(Message::GameOver));
        drop(receiver);
        assert_eq!(producer.join().unwrap(), 1);
    }
}
