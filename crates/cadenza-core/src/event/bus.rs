// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Fan-out channel for fire-and-forget notifications.

use std::sync::Mutex;

/// The receiving end handed to a subscriber.
pub type Subscription<T> = flume::Receiver<T>;

/// Multi-subscriber broadcast channel.
///
/// The channel is owned by the publishing component rather than living in
/// any shared ambient namespace: whoever wants notifications asks the
/// publisher for a [`Subscription`]. Publishing is fire-and-forget; each
/// live subscriber receives its own clone of the event, and subscribers
/// whose receiving end was dropped are pruned on the next publish.
#[derive(Debug)]
pub struct Broadcast<T: Clone + Send + 'static> {
    senders: Mutex<Vec<flume::Sender<T>>>,
}

impl<T: Clone + Send + 'static> Broadcast<T> {
    /// Creates a broadcast channel with no subscribers.
    pub fn new() -> Self {
        Self {
            senders: Mutex::new(Vec::new()),
        }
    }

    /// Registers a new subscriber and returns its receiving end.
    pub fn subscribe(&self) -> Subscription<T> {
        let (sender, receiver) = flume::unbounded();
        self.senders.lock().unwrap().push(sender);
        receiver
    }

    /// Number of subscribers still holding a live receiver.
    ///
    /// Dropped subscribers are only pruned by `publish`, so this may
    /// briefly overcount between publishes.
    pub fn subscriber_count(&self) -> usize {
        self.senders.lock().unwrap().len()
    }

    /// Delivers a clone of `event` to every live subscriber.
    pub fn publish(&self, event: &T) {
        let mut senders = self.senders.lock().unwrap();
        senders.retain(|sender| sender.send(event.clone()).is_ok());
        log::trace!("Broadcast: delivered to {} subscriber(s).", senders.len());
    }
}

impl<T: Clone + Send + 'static> Default for Broadcast<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_subscriber_receives_a_copy() {
        let bus = Broadcast::<u32>::new();
        let first = bus.subscribe();
        let second = bus.subscribe();

        bus.publish(&7);

        assert_eq!(first.try_recv(), Ok(7));
        assert_eq!(second.try_recv(), Ok(7));
    }

    #[test]
    fn test_publish_without_subscribers_is_a_no_op() {
        let bus = Broadcast::<u32>::new();
        bus.publish(&1);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn test_dropped_subscribers_are_pruned() {
        let bus = Broadcast::<u32>::new();
        let keep = bus.subscribe();
        let gone = bus.subscribe();
        drop(gone);

        bus.publish(&3);

        assert_eq!(bus.subscriber_count(), 1);
        assert_eq!(keep.try_recv(), Ok(3));
    }

    #[test]
    fn test_subscribers_buffer_events_until_read() {
        let bus = Broadcast::<u32>::new();
        let receiver = bus.subscribe();

        bus.publish(&1);
        bus.publish(&2);

        let received: Vec<u32> = receiver.try_iter().collect();
        assert_eq!(received, vec![1, 2]);
    }
}
