//! Pointer-down-outside detection.
//!
//! The host routes every mouse event through [`OutsidePointer::dispatch`] after the focused
//! control has seen it. Controls that care about presses landing outside themselves (menus,
//! popovers) hold an [`OutsideSubscription`] for exactly as long as they are expanded.
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! use panelkit_core::input::{MouseButton, MouseEvent, MouseEventKind};
//! use panelkit_core::outside::OutsidePointer;
//! use ratatui::layout::Rect;
//!
//! let hub = OutsidePointer::new();
//! let hits = Rc::new(Cell::new(0));
//! let counter = hits.clone();
//! let sub = hub.subscribe(Rect::new(0, 0, 10, 1), move |_| counter.set(counter.get() + 1));
//!
//! hub.dispatch(&MouseEvent::new(20, 5, MouseEventKind::Down(MouseButton::Left)));
//! assert_eq!(hits.get(), 1);
//!
//! drop(sub);
//! hub.dispatch(&MouseEvent::new(20, 5, MouseEventKind::Down(MouseButton::Left)));
//! assert_eq!(hits.get(), 1);
//! ```
use std::cell::Cell;
use std::cell::RefCell;
use std::rc::Rc;
use std::rc::Weak;

use ratatui::layout::Position;
use ratatui::layout::Rect;

use crate::input::MouseEvent;

/// The region a subscriber considers "inside".
pub trait Boundary {
    fn contains(&self, position: Position) -> bool;
}

impl Boundary for Rect {
    fn contains(&self, position: Position) -> bool {
        Rect::contains(*self, position)
    }
}

impl<F> Boundary for F
where
    F: Fn(Position) -> bool,
{
    fn contains(&self, position: Position) -> bool {
        self(position)
    }
}

type Callback = Box<dyn FnMut(&MouseEvent)>;

struct Listener {
    id: u64,
    active: Cell<bool>,
    boundary: Box<dyn Boundary>,
    callback: RefCell<Callback>,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<Rc<Listener>>,
}

/// A document-level pointer-down listener shared by every control of one UI tree.
///
/// Cloning yields another handle to the same listener set.
#[derive(Clone, Default)]
pub struct OutsidePointer {
    registry: Rc<RefCell<Registry>>,
}

impl OutsidePointer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `callback` to run for pointer-downs outside `boundary`.
    ///
    /// The listener stays attached until the returned subscription is disposed or dropped.
    pub fn subscribe(
        &self,
        boundary: impl Boundary + 'static,
        callback: impl FnMut(&MouseEvent) + 'static,
    ) -> OutsideSubscription {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        let listener = Rc::new(Listener {
            id,
            active: Cell::new(true),
            boundary: Box::new(boundary),
            callback: RefCell::new(Box::new(callback)),
        });
        let handle = Rc::downgrade(&listener);
        registry.listeners.push(listener);
        log::trace!("outside-pointer: subscribed listener {id}");

        OutsideSubscription {
            id,
            listener: handle,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Delivers `event` to every active listener whose boundary does not contain it.
    ///
    /// Only pointer-downs qualify. Each listener fires at most once per call; listeners disposed
    /// by an earlier callback in the same dispatch are skipped. Returns the number of callbacks
    /// invoked.
    pub fn dispatch(&self, event: &MouseEvent) -> usize {
        if !event.is_pointer_down() {
            return 0;
        }

        let snapshot: Vec<Rc<Listener>> = self.registry.borrow().listeners.clone();
        let position = event.position();
        let mut fired = 0;
        for listener in snapshot {
            if !listener.active.get() || listener.boundary.contains(position) {
                continue;
            }
            // A callback dispatching again from inside itself does not recurse into itself.
            let Ok(mut callback) = listener.callback.try_borrow_mut() else {
                continue;
            };
            (*callback)(event);
            fired += 1;
        }
        if fired > 0 {
            log::trace!(
                "outside-pointer: press at ({}, {}) fired {fired} listener(s)",
                event.x,
                event.y
            );
        }
        fired
    }

    /// Number of attached listeners.
    pub fn len(&self) -> usize {
        self.registry.borrow().listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Handle that keeps one outside-pointer listener attached.
///
/// Disposing is idempotent and also happens on drop, so a control torn down on any path leaves
/// no callback behind.
pub struct OutsideSubscription {
    id: u64,
    listener: Weak<Listener>,
    registry: Weak<RefCell<Registry>>,
}

impl OutsideSubscription {
    pub fn is_active(&self) -> bool {
        self.listener
            .upgrade()
            .is_some_and(|listener| listener.active.get())
    }

    pub fn dispose(&mut self) {
        if let Some(listener) = self.listener.upgrade() {
            listener.active.set(false);
        }
        self.listener = Weak::new();

        if let Some(registry) = self.registry.upgrade() {
            registry
                .borrow_mut()
                .listeners
                .retain(|listener| listener.id != self.id);
            log::trace!("outside-pointer: disposed listener {}", self.id);
        }
        self.registry = Weak::new();
    }
}

impl Drop for OutsideSubscription {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl std::fmt::Debug for OutsideSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutsideSubscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::MouseButton;
    use crate::input::MouseEventKind;

    fn press(x: u16, y: u16) -> MouseEvent {
        MouseEvent::new(x, y, MouseEventKind::Down(MouseButton::Left))
    }

    fn counter() -> (Rc<Cell<usize>>, impl FnMut(&MouseEvent) + 'static) {
        let hits = Rc::new(Cell::new(0));
        let c = hits.clone();
        (hits, move |_: &MouseEvent| c.set(c.get() + 1))
    }

    #[test]
    fn fires_only_outside_boundary() {
        let hub = OutsidePointer::new();
        let (hits, cb) = counter();
        let _sub = hub.subscribe(Rect::new(2, 2, 4, 2), cb);

        assert_eq!(hub.dispatch(&press(3, 3)), 0);
        assert_eq!(hub.dispatch(&press(0, 0)), 1);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn rect_boundary_excludes_right_and_bottom_edges() {
        let area = Rect::new(2, 2, 4, 2);
        assert!(Boundary::contains(&area, Position::new(2, 2)));
        assert!(Boundary::contains(&area, Position::new(5, 3)));
        assert!(!Boundary::contains(&area, Position::new(6, 3)));
        assert!(!Boundary::contains(&area, Position::new(5, 4)));
    }

    #[test]
    fn ignores_non_press_events() {
        let hub = OutsidePointer::new();
        let (hits, cb) = counter();
        let _sub = hub.subscribe(Rect::new(0, 0, 1, 1), cb);

        hub.dispatch(&MouseEvent::new(9, 9, MouseEventKind::Moved));
        hub.dispatch(&MouseEvent::new(9, 9, MouseEventKind::Up(MouseButton::Left)));
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn dispose_detaches_and_is_idempotent() {
        let hub = OutsidePointer::new();
        let (hits, cb) = counter();
        let mut sub = hub.subscribe(Rect::default(), cb);
        assert!(sub.is_active());
        assert_eq!(hub.len(), 1);

        sub.dispose();
        sub.dispose();
        assert!(!sub.is_active());
        assert!(hub.is_empty());
        hub.dispatch(&press(5, 5));
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn callback_may_dispose_another_listener_mid_dispatch() {
        let hub = OutsidePointer::new();
        let (second_hits, second_cb) = counter();
        let slot: Rc<RefCell<Option<OutsideSubscription>>> = Rc::new(RefCell::new(None));

        let victim = slot.clone();
        let _first = hub.subscribe(Rect::default(), move |_: &MouseEvent| {
            victim.borrow_mut().take();
        });
        *slot.borrow_mut() = Some(hub.subscribe(Rect::default(), second_cb));

        assert_eq!(hub.dispatch(&press(1, 1)), 1);
        assert_eq!(second_hits.get(), 0);
        assert_eq!(hub.len(), 1);
    }

    #[test]
    fn closure_boundaries_are_supported() {
        let hub = OutsidePointer::new();
        let (hits, cb) = counter();
        let _sub = hub.subscribe(|p: Position| p.y == 0, cb);

        hub.dispatch(&press(7, 0));
        hub.dispatch(&press(7, 1));
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn subscription_outliving_hub_is_harmless() {
        let hub = OutsidePointer::new();
        let (_hits, cb) = counter();
        let sub = hub.subscribe(Rect::default(), cb);
        drop(hub);
        drop(sub);
    }
}
