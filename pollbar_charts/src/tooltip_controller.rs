// Copyright 2025 the Pollbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tooltip visibility over pointer and scroll events.

use alloc::rc::Rc;
use core::cell::{Cell, RefCell};

use crate::config::TooltipConfig;
use crate::events::{EventKind, Phase, Subscription, ViewportEvents};
use crate::tooltip::{TooltipContent, TooltipPlacement, TooltipPositioner, TooltipRequest};

/// Shows, moves and hides one widget's tooltip.
///
/// Time is passed in by the host as milliseconds from any monotonic origin.
/// A pointer-leave only schedules the hide; a new pointer-enter before the
/// deadline cancels it, so a stale hide never clobbers a fresh show.
///
/// A scroll seen while the controller is borrowed is recorded in a shared flag
/// and takes effect on the next access.
#[derive(Debug, Default)]
pub struct TooltipController {
    config: TooltipConfig,
    positioner: TooltipPositioner,
    content: Option<TooltipContent>,
    placement: Option<TooltipPlacement>,
    hide_at_ms: Option<u64>,
    scrolled: Rc<Cell<bool>>,
}

impl Clone for TooltipController {
    fn clone(&self) -> Self {
        // The clone gets its own flag; listeners stay bound to the original.
        Self {
            config: self.config,
            positioner: self.positioner,
            content: self.content.clone(),
            placement: self.placement,
            hide_at_ms: self.hide_at_ms,
            scrolled: Rc::new(Cell::new(self.scrolled.get())),
        }
    }
}

impl TooltipController {
    /// Creates a hidden tooltip using `config`.
    pub fn new(config: TooltipConfig) -> Self {
        Self {
            config,
            positioner: TooltipPositioner::new(config),
            content: None,
            placement: None,
            hide_at_ms: None,
            scrolled: Rc::default(),
        }
    }

    /// Whether the tooltip is shown.
    pub fn is_visible(&self) -> bool {
        self.content.is_some() && !self.scrolled.get()
    }

    /// The content being shown.
    pub fn content(&self) -> Option<&TooltipContent> {
        self.content.as_ref().filter(|_| !self.scrolled.get())
    }

    /// The current placement.
    pub fn placement(&self) -> Option<TooltipPlacement> {
        self.placement.filter(|_| !self.scrolled.get())
    }

    /// Whether a hide is scheduled.
    pub fn hide_pending(&self) -> bool {
        self.hide_at_ms.is_some() && !self.scrolled.get()
    }

    /// The pointer entered a bar: show `content` next to the cursor.
    pub fn pointer_enter(&mut self, content: TooltipContent, request: &TooltipRequest) {
        self.apply_deferred_scroll();
        if self.hide_at_ms.take().is_some() {
            tracing::trace!("pending tooltip hide cancelled");
        }
        self.placement = Some(self.positioner.position(request));
        self.content = Some(content);
    }

    /// The pointer moved over the bar: follow the cursor.
    pub fn pointer_move(&mut self, request: &TooltipRequest) {
        self.apply_deferred_scroll();
        if self.is_visible() {
            self.placement = Some(self.positioner.position(request));
        }
    }

    /// The pointer left the bar: hide after the configured delay.
    pub fn pointer_leave(&mut self, now_ms: u64) {
        self.apply_deferred_scroll();
        if self.is_visible() {
            self.hide_at_ms = Some(now_ms.saturating_add(self.config.hide_delay_ms));
        }
    }

    /// Applies a scheduled hide whose deadline has passed, or a scroll that
    /// arrived while the controller was borrowed. Returns whether the tooltip
    /// was hidden.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if self.apply_deferred_scroll() {
            return true;
        }
        match self.hide_at_ms {
            Some(deadline) if now_ms >= deadline => {
                self.hide();
                true
            }
            _ => false,
        }
    }

    /// Something scrolled: hide immediately.
    pub fn on_scroll(&mut self) {
        if self.content.is_some() {
            tracing::trace!("tooltip hidden by scroll");
        }
        self.hide();
    }

    /// Hides the tooltip and drops any pending hide.
    pub fn hide(&mut self) {
        self.scrolled.set(false);
        self.content = None;
        self.placement = None;
        self.hide_at_ms = None;
    }

    /// Hides the tooltip if a scroll was flagged. Returns whether it was shown.
    fn apply_deferred_scroll(&mut self) -> bool {
        if !self.scrolled.get() {
            return false;
        }
        let was_shown = self.content.is_some();
        self.on_scroll();
        was_shown
    }

    /// Hides `controller` on every scroll, including scrolls of nested containers.
    ///
    /// The listener holds the controller weakly; it stops acting once the
    /// controller is dropped and is removed when the subscription is. If the
    /// controller is borrowed when a scroll arrives, the hide is flagged and
    /// applied on its next access.
    ///
    /// # Panics
    ///
    /// Panics if `controller` is mutably borrowed when subscribing.
    #[must_use = "dropping the subscription removes the listener immediately"]
    pub fn hide_on_scroll(
        controller: &Rc<RefCell<Self>>,
        events: &ViewportEvents,
    ) -> Subscription {
        let weak = Rc::downgrade(controller);
        let scrolled = Rc::clone(&controller.borrow().scrolled);
        events.subscribe(EventKind::Scroll, Phase::Capture, move |_| {
            let Some(controller) = weak.upgrade() else {
                return;
            };
            scrolled.set(true);
            match controller.try_borrow_mut() {
                Ok(mut controller) => controller.on_scroll(),
                Err(_) => tracing::trace!("tooltip busy, scroll hide deferred"),
            }
        })
    }
}
