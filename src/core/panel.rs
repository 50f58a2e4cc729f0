//! Shared Stacking Panel
//!
//! One stacking panel is shared by every popup feature of the host; each
//! feature contributes a view to a named stack and asks for its stack to
//! be shown. Features must check membership before mutating the stack and
//! must drop their listener subscriptions when they stop owning a visible
//! view, so a feature never acts on a stack it no longer owns.

use std::fmt;

/// Identity of a view registered with the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewId(u64);

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "view#{}", self.0)
    }
}

/// Anchor point for popup placement, in host cell coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Anchor {
    pub x: u16,
    pub y: u16,
}

/// Axis-aligned popup rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    /// Place a popup of the given size just below an anchor point
    pub fn below_anchor(anchor: Anchor, width: u16, height: u16) -> Self {
        Self {
            x: anchor.x,
            y: anchor.y.saturating_add(1),
            width,
            height,
        }
    }

    /// Point-in-rect test (used for click-outside detection)
    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x
            && x < self.x.saturating_add(self.width)
            && y >= self.y
            && y < self.y.saturating_add(self.height)
    }
}

/// Handle for one listener registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Registry of live listener subscriptions.
///
/// Subscribers get an id on subscribe and must hand it back on
/// unsubscribe; the host consults `is_active` before delivering a
/// notification to a listener.
#[derive(Debug, Default)]
pub struct SubscriberSet {
    next: u64,
    active: Vec<SubscriptionId>,
}

impl SubscriberSet {
    pub fn new() -> Self {
        Self {
            next: 0,
            active: Vec::new(),
        }
    }

    pub fn subscribe(&mut self) -> SubscriptionId {
        let id = SubscriptionId(self.next);
        self.next += 1;
        self.active.push(id);
        id
    }

    /// Returns false when the id was not subscribed (double unsubscribe)
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.active.len();
        self.active.retain(|&s| s != id);
        before != self.active.len()
    }

    pub fn is_active(&self, id: SubscriptionId) -> bool {
        self.active.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

struct StackEntry {
    view: ViewId,
    stack: String,
    rect: Rect,
}

/// The shared panel: a set of registered views grouped into named stacks,
/// with at most one stack visible at a time
pub struct StackedPanel {
    next_view: u64,
    entries: Vec<StackEntry>,
    visible_stack: Option<String>,
    /// Listeners for visibility changes
    pub visibility: SubscriberSet,
}

impl StackedPanel {
    pub fn new() -> Self {
        Self {
            next_view: 0,
            entries: Vec::new(),
            visible_stack: None,
            visibility: SubscriberSet::new(),
        }
    }

    /// Allocate an identity for a feature's view. Done once per feature,
    /// at plugin initialization.
    pub fn allocate_view(&mut self) -> ViewId {
        let id = ViewId(self.next_view);
        self.next_view += 1;
        id
    }

    /// Add a view to a named stack.
    ///
    /// No-op returning false when the view is already a member; callers
    /// rely on this to make repeated open triggers idempotent.
    pub fn add(&mut self, view: ViewId, stack: &str, rect: Rect) -> bool {
        if self.has_view(view) {
            return false;
        }
        self.entries.push(StackEntry {
            view,
            stack: stack.to_string(),
            rect,
        });
        true
    }

    /// Remove a view. No-op returning false when it is not a member.
    pub fn remove(&mut self, view: ViewId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.view != view);
        before != self.entries.len()
    }

    pub fn has_view(&self, view: ViewId) -> bool {
        self.entries.iter().any(|e| e.view == view)
    }

    /// Make a named stack the visible one. Returns true when visibility
    /// actually changed.
    pub fn show_stack(&mut self, stack: &str) -> bool {
        if self.visible_stack.as_deref() == Some(stack) {
            return false;
        }
        self.visible_stack = Some(stack.to_string());
        true
    }

    /// Hide the panel entirely. Returns true when it was visible.
    pub fn hide(&mut self) -> bool {
        self.visible_stack.take().is_some()
    }

    /// The view currently presented: the top (most recently added) view
    /// of the visible stack
    pub fn visible_view(&self) -> Option<ViewId> {
        let stack = self.visible_stack.as_deref()?;
        self.entries
            .iter()
            .rev()
            .find(|e| e.stack == stack)
            .map(|e| e.view)
    }

    /// Placement rectangle of a member view
    pub fn view_rect(&self, view: ViewId) -> Option<Rect> {
        self.entries
            .iter()
            .find(|e| e.view == view)
            .map(|e| e.rect)
    }
}

impl Default for StackedPanel {
    fn default() -> Self {
        Self::new()
    }
}
