//! Pointer trail sampling
//!
//! Turns press/move/release/leave signals into a bounded, ordered list of
//! recent pointer positions. The trail does no collision work itself.

use std::collections::VecDeque;

use glam::Vec2;

use crate::consts::TRAIL_LEN_LIMIT;

/// Handle to a scheduled trail clear
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearToken(u64);

#[derive(Debug, Clone, Copy)]
struct PendingClear {
    token: ClearToken,
    due_ms: f64,
}

/// Fixed-capacity FIFO of pointer positions (oldest first)
#[derive(Debug, Clone)]
pub struct Trail {
    points: VecDeque<Vec2>,
    capacity: usize,
    release_grace_ms: f64,
    pressed: bool,
    pending_clear: Option<PendingClear>,
    next_token: u64,
}

impl Trail {
    pub fn new(capacity: usize, release_grace_ms: f64) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity.min(TRAIL_LEN_LIMIT) + 1),
            capacity,
            release_grace_ms,
            pressed: false,
            pending_clear: None,
            next_token: 1,
        }
    }

    /// Pointer pressed: restart the trail at `point`
    pub fn begin(&mut self, point: Vec2) {
        self.pending_clear = None;
        self.pressed = true;
        self.points.clear();
        self.points.push_back(point);
    }

    /// Pointer moved: append, evicting the oldest point past capacity.
    /// Ignored while the pointer is up.
    pub fn extend(&mut self, point: Vec2) {
        if !self.pressed {
            return;
        }
        self.points.push_back(point);
        while self.points.len() > self.capacity {
            self.points.pop_front();
        }
    }

    /// Pointer released: keep the trail for the grace period, then clear it
    pub fn end(&mut self, now_ms: f64) -> ClearToken {
        self.pressed = false;
        let token = ClearToken(self.next_token);
        self.next_token += 1;
        self.pending_clear = Some(PendingClear {
            token,
            due_ms: now_ms + self.release_grace_ms,
        });
        token
    }

    /// Pointer left the surface: clear immediately
    pub fn cancel(&mut self) {
        self.pressed = false;
        self.pending_clear = None;
        self.points.clear();
    }

    /// Cancel a specific scheduled clear. Returns false if it already ran or
    /// was superseded.
    pub fn cancel_clear(&mut self, token: ClearToken) -> bool {
        match self.pending_clear {
            Some(pending) if pending.token == token => {
                self.pending_clear = None;
                true
            }
            _ => false,
        }
    }

    /// Run the scheduled clear if it is due. Returns true if the trail was
    /// cleared by this call.
    pub fn poll(&mut self, now_ms: f64) -> bool {
        match self.pending_clear {
            Some(pending) if now_ms >= pending.due_ms => {
                self.pending_clear = None;
                self.points.clear();
                true
            }
            _ => false,
        }
    }

    /// Drop all points and any scheduled clear (new run)
    pub fn reset(&mut self) {
        self.cancel();
    }

    /// Token of the currently scheduled clear, if any
    pub fn pending_clear(&self) -> Option<ClearToken> {
        self.pending_clear.map(|p| p.token)
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Enough points to form at least one segment
    pub fn can_slice(&self) -> bool {
        self.points.len() >= 2
    }

    /// Points, oldest first
    pub fn points(&self) -> impl ExactSizeIterator<Item = Vec2> + '_ {
        self.points.iter().copied()
    }

    /// Consecutive point pairs, oldest first
    pub fn segments(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        self.points.iter().zip(self.points.iter().skip(1)).map(|(a, b)| (*a, *b))
    }

    pub fn newest(&self) -> Option<Vec2> {
        self.points.back().copied()
    }

    pub fn oldest(&self) -> Option<Vec2> {
        self.points.front().copied()
    }
}
