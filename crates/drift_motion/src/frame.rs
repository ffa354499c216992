//! Host-driven frame loop
//!
//! The host calls [`FrameLoop::tick`] once per animation frame; every
//! subscription runs in registration order with the frame's delta time.
//! [`FrameLoop::stop`] is the only cancellation primitive: it releases
//! every subscription, may be called any number of times, and leaves the
//! loop permanently stopped.

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle to a frame subscription
    pub struct SubscriptionId;
}

/// Callback invoked every frame with the delta time in seconds
pub type TickCallback = Box<dyn FnMut(f32)>;

pub struct FrameLoop {
    subscriptions: SlotMap<SubscriptionId, TickCallback>,
    order: Vec<SubscriptionId>,
    frame: u64,
    stopped: bool,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self {
            subscriptions: SlotMap::with_key(),
            order: Vec::new(),
            frame: 0,
            stopped: false,
        }
    }

    /// Register a per-frame callback
    ///
    /// Returns `None` once the loop has been stopped.
    pub fn subscribe<F>(&mut self, callback: F) -> Option<SubscriptionId>
    where
        F: FnMut(f32) + 'static,
    {
        if self.stopped {
            tracing::debug!("FrameLoop: subscribe after stop ignored");
            return None;
        }
        let id = self.subscriptions.insert(Box::new(callback));
        self.order.push(id);
        tracing::debug!("FrameLoop: subscribed {:?}", id);
        Some(id)
    }

    /// Remove a subscription, returning false if it did not exist
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        if self.subscriptions.remove(id).is_none() {
            tracing::warn!("FrameLoop: unsubscribe of unknown subscription {:?}", id);
            return false;
        }
        self.order.retain(|&other| other != id);
        tracing::debug!("FrameLoop: unsubscribed {:?}", id);
        true
    }

    /// Run one frame
    ///
    /// Returns true if any subscription ran.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.stopped || self.order.is_empty() {
            return false;
        }
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        for id in &self.order {
            if let Some(callback) = self.subscriptions.get_mut(*id) {
                callback(dt);
            }
        }
        self.frame += 1;
        true
    }

    /// Stop the loop and release all subscriptions
    pub fn stop(&mut self) {
        if self.stopped {
            return;
        }
        tracing::debug!(
            "FrameLoop: stopping after {} frames, releasing {} subscriptions",
            self.frame,
            self.subscriptions.len()
        );
        self.stopped = true;
        self.subscriptions.clear();
        self.order.clear();
    }

    pub fn is_running(&self) -> bool {
        !self.stopped
    }

    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    /// Frames ticked so far
    pub fn frame_count(&self) -> u64 {
        self.frame
    }
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.stop();
    }
}
