//! Frame loop for one route view.
//!
//! Mirrors the request/cancel animation-frame pattern of a display host:
//! a frame is *requested* while the animator runs, the host calls
//! [`Playback::on_frame`] on each display tick, and [`Playback::cancel`]
//! withdraws the pending frame so nothing is delivered after teardown.

use log::debug;

use crate::animator::{AnimationState, Animator, Clock, Snapshot};
use crate::path::Locate;

pub type SubscriptionId = u64;

type Listener<P> = Box<dyn FnMut(&Snapshot<P>)>;

pub struct Playback<P, C> {
    animator: Option<Animator<P, C>>,
    listeners: Vec<(SubscriptionId, Listener<P>)>,
    next_id: SubscriptionId,
    frame_pending: bool,
}

impl<P: Locate, C: Clock> Playback<P, C> {
    pub fn new() -> Self {
        Self {
            animator: None,
            listeners: Vec::new(),
            next_id: 0,
            frame_pending: false,
        }
    }

    /// Replace the current route. Any pending frame for the old route is
    /// withdrawn before the new animator is installed.
    pub fn load(&mut self, animator: Animator<P, C>) {
        self.frame_pending = false;
        debug!(
            "Loading route with {} points, {:.0} ms",
            animator.path().points().len(),
            animator.duration_ms()
        );
        self.animator = Some(animator);
    }

    pub fn animator(&self) -> Option<&Animator<P, C>> {
        self.animator.as_ref()
    }

    pub fn snapshot(&self) -> Option<Snapshot<P>> {
        self.animator.as_ref().map(Animator::snapshot)
    }

    pub fn frame_pending(&self) -> bool {
        self.frame_pending
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&Snapshot<P>) + 'static,
    {
        let id = self.next_id;
        self.next_id += 1;
        let listener: Listener<P> = Box::new(listener);
        self.listeners.push((id, listener));
        id
    }

    /// Returns false if the id was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    /// Start from the beginning.
    pub fn play(&mut self) {
        if let Some(animator) = self.animator.as_mut() {
            animator.start();
            self.frame_pending = true;
        }
    }

    /// Freeze playback. If the time credited on pause finishes the
    /// route, listeners get the completed snapshot since no further
    /// frame will be requested.
    pub fn pause(&mut self) {
        self.frame_pending = false;
        let Some(animator) = self.animator.as_mut() else {
            return;
        };
        animator.pause();
        if animator.state() == AnimationState::Completed {
            let snapshot = animator.snapshot();
            self.notify(&snapshot);
        }
    }

    pub fn resume(&mut self) {
        if let Some(animator) = self.animator.as_mut() {
            animator.resume();
            self.frame_pending = animator.is_running();
        }
    }

    /// Back to the start; listeners get one idle snapshot so the marker
    /// can be redrawn at the first point.
    pub fn reset(&mut self) {
        self.frame_pending = false;
        let Some(animator) = self.animator.as_mut() else {
            return;
        };
        animator.reset();
        let snapshot = animator.snapshot();
        self.notify(&snapshot);
    }

    /// Called by the host once per display tick.
    ///
    /// Returns true if a snapshot was delivered.
    pub fn on_frame(&mut self) -> bool {
        if !self.frame_pending {
            return false;
        }
        self.frame_pending = false;

        let Some(animator) = self.animator.as_mut() else {
            return false;
        };
        let Some(snapshot) = animator.tick() else {
            return false;
        };

        self.frame_pending = snapshot.state == AnimationState::Running;
        self.notify(&snapshot);
        true
    }

    /// Tear down: withdraw the pending frame, drop the route and every
    /// listener.
    pub fn cancel(&mut self) {
        self.frame_pending = false;
        if self.animator.take().is_some() {
            debug!("Route playback cancelled");
        }
        self.listeners.clear();
    }

    fn notify(&mut self, snapshot: &Snapshot<P>) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(snapshot);
        }
    }
}

impl<P: Locate, C: Clock> Default for Playback<P, C> {
    fn default() -> Self {
        Self::new()
    }
}
