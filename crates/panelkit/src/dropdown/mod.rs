//! Single-select dropdown.
//!
//! The control is long-lived and owns only its visibility and highlighted row. The option list
//! and the current value belong to the caller and arrive as [`DropdownProps`] with every call,
//! so they may change between frames; nothing indexed from a previous list survives a close.
//!
//! Event flow for one pointer-down, in order:
//! 1. the host passes the event to [`Dropdown::handle_event`]; presses on the open panel are
//!    consumed there and never count as a press on the anchor;
//! 2. the host passes the same event to [`OutsidePointer::dispatch`], which closes the menu when
//!    the press landed outside both the anchor and the panel.
mod bindings;
mod layout;
mod navigation;
mod option;
mod props;
mod view;

use std::cell::RefCell;
use std::fmt::Display;
use std::rc::Rc;
use std::rc::Weak;

use panelkit_core::input::InputEvent;
use panelkit_core::input::KeyEvent;
use panelkit_core::input::MouseButton;
use panelkit_core::input::MouseEvent;
use panelkit_core::input::MouseEventKind;
use panelkit_core::outside::OutsidePointer;
use panelkit_core::outside::OutsideSubscription;
use ratatui::layout::Position;
use ratatui::layout::Rect;

pub use bindings::DropdownBindings;
pub use bindings::DropdownKeyAction;
pub use layout::MenuLayout;
pub use layout::PanelMetrics;
pub use layout::RowMetrics;
pub use layout::compute_menu_layout;
pub use layout::scroll_row_into_view;
pub use navigation::NavDirection;
pub use navigation::NavRow;
pub use option::DropdownOption;
pub use option::OptionId;
pub use option::OptionKind;
pub use option::classify;
pub use option::display_label;
pub use option::index_of_value;
pub use option::selectable_ids;
pub use props::ChangeEvent;
pub use props::ChangeHandler;
pub use props::DropdownProps;
pub use props::DropdownVariant;
pub use props::Icon;
pub use props::NoopHandler;
pub use props::OnValueChange;
pub use view::DropdownViewOptions;
pub use view::MenuRow;
pub use view::menu_rows;

use crate::error::DropdownError;
use crate::error::Result;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MenuState {
    #[default]
    Closed,
    Open {
        highlighted: Option<OptionId>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropdownAction {
    None,
    Redraw,
    Opened,
    /// Closed without a new value; focus should leave the control.
    Closed,
    /// Closed after proposing the option with this id to the change handler.
    Committed(OptionId),
}

#[derive(Debug, Default)]
struct Inner {
    state: MenuState,
    layout: Option<MenuLayout>,
    anchor: Rect,
    bounds: Rect,
    /// Row under the last press on the panel; a release on the same row is a click.
    pressed: Option<OptionId>,
    subscription: Option<OutsideSubscription>,
}

impl Inner {
    fn contains(&self, position: Position) -> bool {
        self.anchor.contains(position)
            || self
                .layout
                .is_some_and(|layout| layout.contains(position))
    }

    fn close(&mut self, reason: &str) {
        if self.state == MenuState::Closed {
            return;
        }
        log::debug!("dropdown: closed ({reason})");
        self.state = MenuState::Closed;
        self.layout = None;
        self.pressed = None;
        if let Some(mut subscription) = self.subscription.take() {
            subscription.dispose();
        }
    }
}

/// Keyboard- and pointer-driven single-select menu.
///
/// Dropping the control detaches its outside-pointer listener, whether or not the menu was open.
pub struct Dropdown {
    inner: Rc<RefCell<Inner>>,
    outside: OutsidePointer,
    options: DropdownViewOptions,
    bindings: DropdownBindings,
}

impl Dropdown {
    /// Creates a closed dropdown that will listen for outside presses on `outside` while open.
    pub fn new(outside: OutsidePointer) -> Self {
        Self::with_options(outside, DropdownViewOptions::default())
    }

    pub fn with_options(outside: OutsidePointer, options: DropdownViewOptions) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner::default())),
            outside,
            options,
            bindings: DropdownBindings::default(),
        }
    }

    pub fn options(&self) -> &DropdownViewOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: DropdownViewOptions) {
        self.options = options;
    }

    pub fn bindings(&self) -> &DropdownBindings {
        &self.bindings
    }

    pub fn set_bindings(&mut self, bindings: DropdownBindings) {
        self.bindings = bindings;
    }

    /// Records where the anchor sits and the screen area the panel must stay within.
    ///
    /// [`Dropdown::render`] does this too. The panel is only re-aligned when the menu opens.
    pub fn set_geometry(&mut self, anchor: Rect, bounds: Rect) {
        let mut inner = self.inner.borrow_mut();
        inner.anchor = anchor;
        inner.bounds = bounds;
    }

    pub fn state(&self) -> MenuState {
        self.inner.borrow().state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state(), MenuState::Open { .. })
    }

    pub fn highlighted(&self) -> Option<OptionId> {
        match self.state() {
            MenuState::Open { highlighted } => highlighted,
            MenuState::Closed => None,
        }
    }

    /// Current panel placement, `None` while closed.
    pub fn menu_layout(&self) -> Option<MenuLayout> {
        self.inner.borrow().layout
    }

    /// Focus arrived at the control: open the menu on the current value.
    ///
    /// Re-validates the value against the options passed now, not those of an earlier frame.
    pub fn focus<V>(&mut self, props: &DropdownProps<'_, V>) -> Result<DropdownAction>
    where
        V: PartialEq + Display,
    {
        if props.is_disabled() || self.is_open() {
            return Ok(DropdownAction::None);
        }

        let options = props.options();
        let highlighted = props
            .validate_value()?
            .filter(|&id| options[id].is_selectable());

        let subscription = self.subscribe_outside();
        let mut inner = self.inner.borrow_mut();
        let anchor = view::value_row(inner.anchor, props.variant());
        let bounds = view::menu_bounds(inner.bounds, &self.options);
        let panel = view::panel_metrics(options, &self.options, bounds);
        let target = highlighted.map(|id| RowMetrics::single(row_offset(id)));
        inner.layout = Some(compute_menu_layout(anchor, panel, target, bounds));
        inner.state = MenuState::Open { highlighted };
        inner.pressed = None;
        inner.subscription = Some(subscription);
        log::debug!("dropdown: opened, highlighted={highlighted:?}");
        Ok(DropdownAction::Opened)
    }

    /// Focus left the control for a reason the control did not see (host focus change).
    pub fn blur(&mut self) -> DropdownAction {
        if !self.is_open() {
            return DropdownAction::None;
        }
        self.inner.borrow_mut().close("blur");
        DropdownAction::Closed
    }

    /// Finalizes the option `id` and closes the menu.
    ///
    /// Both Enter and a row click end up here. The menu is already closed when the change handler
    /// runs. Re-selecting the current value only closes the menu; the handler is not called.
    /// A closed menu has nothing to commit and ignores the call.
    pub fn commit<V>(
        &mut self,
        props: &mut DropdownProps<'_, V>,
        id: OptionId,
    ) -> Result<DropdownAction>
    where
        V: PartialEq + Display,
    {
        if !self.is_open() {
            return Ok(DropdownAction::None);
        }
        let option = props.options().get(id);
        self.inner.borrow_mut().close("commit");

        let value = match option {
            Some(DropdownOption::Value {
                value,
                disabled: false,
                ..
            }) => value,
            _ => return Err(DropdownError::InvariantViolation { id }),
        };

        if props.value() == Some(value) {
            log::debug!("dropdown: option {id} is already the value");
            return Ok(DropdownAction::Closed);
        }

        log::debug!("dropdown: committing option {id} ({value})");
        props.notify_commit(id, value);
        Ok(DropdownAction::Committed(id))
    }

    /// Routes one input event to the control.
    ///
    /// While the menu is open every key event is consumed, whatever action comes back:
    /// `DropdownAction::None` then only means nothing visible changed (an unbound key, or a move
    /// past the last row). Hosts should check [`Dropdown::is_open`] before giving keys to anything
    /// else. A closed menu consumes no keys.
    pub fn handle_event<V>(
        &mut self,
        props: &mut DropdownProps<'_, V>,
        event: InputEvent,
    ) -> Result<DropdownAction>
    where
        V: PartialEq + Display,
    {
        if props.is_disabled() {
            return Ok(DropdownAction::None);
        }
        match event {
            InputEvent::Key(key) => self.handle_key(props, key),
            InputEvent::Mouse(mouse) => self.handle_mouse(props, mouse),
            InputEvent::Paste(_) => Ok(DropdownAction::None),
        }
    }

    fn handle_key<V>(
        &mut self,
        props: &mut DropdownProps<'_, V>,
        key: KeyEvent,
    ) -> Result<DropdownAction>
    where
        V: PartialEq + Display,
    {
        let MenuState::Open { highlighted } = self.state() else {
            return Ok(DropdownAction::None);
        };

        match self.bindings.action_for(&key) {
            Some(DropdownKeyAction::Cancel) => {
                self.inner.borrow_mut().close("cancel");
                Ok(DropdownAction::Closed)
            }
            Some(DropdownKeyAction::Commit) => match highlighted {
                Some(id) => self.commit(props, id),
                None => {
                    self.inner.borrow_mut().close("enter without highlight");
                    Ok(DropdownAction::Closed)
                }
            },
            Some(DropdownKeyAction::Up) => Ok(self.navigate(props, NavDirection::Up)),
            Some(DropdownKeyAction::Down) => Ok(self.navigate(props, NavDirection::Down)),
            None => Ok(DropdownAction::None),
        }
    }

    fn handle_mouse<V>(
        &mut self,
        props: &mut DropdownProps<'_, V>,
        mouse: MouseEvent,
    ) -> Result<DropdownAction>
    where
        V: PartialEq + Display,
    {
        let position = mouse.position();
        let (open, on_panel, on_anchor, row) = {
            let inner = self.inner.borrow();
            let layout = inner.layout.filter(|_| inner.state != MenuState::Closed);
            (
                layout.is_some(),
                layout.is_some_and(|l| l.contains(position)),
                inner.anchor.contains(position),
                layout.and_then(|l| l.row_at(position)).map(|r| r as OptionId),
            )
        };

        match mouse.kind {
            MouseEventKind::Down(button) => {
                if on_panel {
                    // Swallowed here so it never reaches the anchor's close-on-press.
                    if button == MouseButton::Left {
                        self.inner.borrow_mut().pressed = row;
                    }
                    return Ok(DropdownAction::None);
                }
                if !on_anchor {
                    return Ok(DropdownAction::None);
                }
                if open {
                    self.inner.borrow_mut().close("anchor pressed");
                    Ok(DropdownAction::Closed)
                } else {
                    self.focus(props)
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let pressed = self.inner.borrow_mut().pressed.take();
                match row {
                    Some(id) if on_panel && pressed == Some(id) => {
                        let selectable =
                            props.options().get(id).is_some_and(|o| o.is_selectable());
                        if selectable {
                            self.commit(props, id)
                        } else {
                            Ok(DropdownAction::None)
                        }
                    }
                    _ => Ok(DropdownAction::None),
                }
            }
            MouseEventKind::Moved | MouseEventKind::Drag(MouseButton::Left) => match row {
                Some(id) if on_panel => Ok(self.hover(props, id)),
                _ => Ok(DropdownAction::None),
            },
            MouseEventKind::ScrollUp | MouseEventKind::ScrollDown if on_panel => {
                let delta = if mouse.kind == MouseEventKind::ScrollUp { -1 } else { 1 };
                let mut inner = self.inner.borrow_mut();
                let Some(layout) = inner.layout.as_mut() else {
                    return Ok(DropdownAction::None);
                };
                let before = layout.scroll.y;
                layout.scroll.scroll_y_by(delta);
                Ok(if layout.scroll.y == before {
                    DropdownAction::None
                } else {
                    DropdownAction::Redraw
                })
            }
            _ => Ok(DropdownAction::None),
        }
    }

    fn navigate<V>(
        &mut self,
        props: &DropdownProps<'_, V>,
        direction: NavDirection,
    ) -> DropdownAction {
        let rows = navigation::nav_rows(props.options());
        let current = self.highlighted();
        self.set_highlight(navigation::step(&rows, current, direction))
    }

    fn hover<V>(&mut self, props: &DropdownProps<'_, V>, id: OptionId) -> DropdownAction {
        let rows = navigation::nav_rows(props.options());
        let current = self.highlighted();
        self.set_highlight(navigation::hover(&rows, current, id))
    }

    fn set_highlight(&mut self, next: Option<OptionId>) -> DropdownAction {
        let mut inner = self.inner.borrow_mut();
        let MenuState::Open { highlighted } = inner.state else {
            return DropdownAction::None;
        };
        if next == highlighted {
            return DropdownAction::None;
        }
        log::trace!("dropdown: highlight {highlighted:?} -> {next:?}");
        inner.state = MenuState::Open { highlighted: next };
        if let (Some(id), Some(layout)) = (next, inner.layout) {
            inner.layout = Some(scroll_row_into_view(layout, RowMetrics::single(row_offset(id))));
        }
        DropdownAction::Redraw
    }

    fn subscribe_outside(&self) -> OutsideSubscription {
        let boundary: Weak<RefCell<Inner>> = Rc::downgrade(&self.inner);
        let target: Weak<RefCell<Inner>> = Rc::downgrade(&self.inner);

        self.outside.subscribe(
            move |position: Position| {
                let Some(inner) = boundary.upgrade() else {
                    return false;
                };
                match inner.try_borrow() {
                    Ok(inner) => inner.contains(position),
                    Err(_) => true,
                }
            },
            move |_: &MouseEvent| {
                let Some(inner) = target.upgrade() else {
                    return;
                };
                if let Ok(mut inner) = inner.try_borrow_mut() {
                    inner.close("outside pointer-down");
                }
            },
        )
    }
}

impl std::fmt::Debug for Dropdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dropdown")
            .field("inner", &self.inner)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

fn row_offset(id: OptionId) -> u16 {
    id.min(u16::MAX as usize) as u16
}
