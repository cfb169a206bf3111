//! Placement of the floating menu panel.
//!
//! Everything here is a pure function of plain geometry so it can be tested without a
//! terminal. The panel is aligned once when the menu opens ([`compute_menu_layout`]) and after
//! that only scrolled ([`scroll_row_into_view`]); re-running the alignment on every highlight
//! move would make the panel jump under the pointer.
use panelkit_core::viewport::ViewportState;
use ratatui::layout::Position;
use ratatui::layout::Rect;

/// Intrinsic size of the panel content.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PanelMetrics {
    /// Preferred width; the panel is never narrower than its anchor.
    pub width: u16,
    /// Total height of all rows.
    pub scroll_height: u16,
    /// Height of the visible window before clamping to the screen.
    pub client_height: u16,
}

/// A row's vertical extent inside the panel content.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowMetrics {
    pub offset: u16,
    pub height: u16,
}

impl RowMetrics {
    /// Menus render one option per terminal row.
    pub fn single(offset: u16) -> Self {
        Self { offset, height: 1 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MenuLayout {
    /// Where the panel is drawn, in screen cells.
    pub area: Rect,
    /// Scroll position of the rows inside `area`.
    pub scroll: ViewportState,
}

impl MenuLayout {
    pub fn scroll_top(&self) -> u16 {
        self.scroll.y
    }

    pub fn contains(&self, position: Position) -> bool {
        self.area.contains(position)
    }

    /// Content row under `position`, if the position is on the panel.
    pub fn row_at(&self, position: Position) -> Option<u16> {
        if !self.area.contains(position) {
            return None;
        }
        let row = position.y - self.area.y + self.scroll.y;
        (row < self.scroll.content_h).then_some(row)
    }
}

/// Positions the panel against `anchor`, inside `bounds`.
///
/// Without a target row the panel's top edge sits on the anchor's top edge and the content is
/// unscrolled. With a target the panel is shifted so the row's top edge lines up with the
/// anchor's; whatever the screen cannot absorb is taken up by scrolling, clamped to
/// `[0, scroll_height - client_height]`, and the row always ends up visible.
pub fn compute_menu_layout(
    anchor: Rect,
    panel: PanelMetrics,
    target: Option<RowMetrics>,
    bounds: Rect,
) -> MenuLayout {
    let width = panel.width.max(anchor.width).min(bounds.width);
    let left = anchor
        .x
        .min(bounds.right().saturating_sub(width))
        .max(bounds.x);

    let height = panel.client_height.min(panel.scroll_height).min(bounds.height);
    let mut scroll = ViewportState::new(height, panel.scroll_height);

    let min_top = bounds.y as i32;
    let max_top = bounds.bottom().saturating_sub(height) as i32;
    let top = match target {
        None => (anchor.y as i32).clamp(min_top, max_top),
        Some(row) => {
            let desired = anchor.y as i32 - row.offset as i32;
            let top = desired.clamp(min_top, max_top);
            scroll.scroll_to(top - desired);
            scroll.ensure_visible(row.offset, row.height);
            top
        }
    };

    MenuLayout {
        area: Rect::new(left, top as u16, width, height),
        scroll,
    }
}

/// Keeps the panel where it is and scrolls just enough for `row` to be visible.
pub fn scroll_row_into_view(layout: MenuLayout, row: RowMetrics) -> MenuLayout {
    let mut layout = layout;
    layout.scroll.ensure_visible(row.offset, row.height);
    layout
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: Rect = Rect {
        x: 0,
        y: 0,
        width: 80,
        height: 24,
    };

    fn panel(rows: u16, visible: u16) -> PanelMetrics {
        PanelMetrics {
            width: 12,
            scroll_height: rows,
            client_height: visible,
        }
    }

    #[test]
    fn no_target_sits_flush_with_anchor() {
        let anchor = Rect::new(4, 6, 20, 1);
        let l = compute_menu_layout(anchor, panel(5, 5), None, SCREEN);
        assert_eq!(l.area, Rect::new(4, 6, 20, 5));
        assert_eq!(l.scroll_top(), 0);
    }

    #[test]
    fn target_row_lines_up_with_anchor() {
        let anchor = Rect::new(4, 10, 20, 1);
        let l = compute_menu_layout(anchor, panel(6, 6), Some(RowMetrics::single(3)), SCREEN);
        assert_eq!(l.area.y, 7);
        assert_eq!(l.scroll_top(), 0);
        assert_eq!(l.area.y + 3 - l.scroll_top(), anchor.y);
    }

    #[test]
    fn screen_top_is_absorbed_by_scrolling() {
        let anchor = Rect::new(0, 2, 10, 1);
        let l = compute_menu_layout(anchor, panel(20, 8), Some(RowMetrics::single(10)), SCREEN);
        assert_eq!(l.area.y, 0);
        assert_eq!(l.scroll_top(), 8);
        assert_eq!(l.area.y + 10 - l.scroll_top(), anchor.y);
    }

    #[test]
    fn scroll_never_passes_content_end() {
        let anchor = Rect::new(0, 0, 10, 1);
        let l = compute_menu_layout(anchor, panel(10, 4), Some(RowMetrics::single(9)), SCREEN);
        assert_eq!(l.area.y, 0);
        assert_eq!(l.scroll_top(), 6);
        assert!(l.scroll.is_visible(9, 1));
    }

    #[test]
    fn panel_near_screen_bottom_is_pushed_up() {
        let anchor = Rect::new(0, 22, 10, 1);
        let l = compute_menu_layout(anchor, panel(5, 5), None, SCREEN);
        assert_eq!(l.area.y, 19);
        assert_eq!(l.area.bottom(), SCREEN.bottom());
    }

    #[test]
    fn tall_menu_keeps_target_visible() {
        let screen = Rect::new(0, 0, 40, 6);
        let anchor = Rect::new(0, 5, 10, 1);
        let l = compute_menu_layout(anchor, panel(30, 30), Some(RowMetrics::single(2)), screen);
        assert_eq!(l.area.height, 6);
        assert_eq!(l.area.y, 0);
        assert!(l.scroll.is_visible(2, 1));
    }

    #[test]
    fn panel_is_kept_on_screen_horizontally() {
        let anchor = Rect::new(75, 3, 4, 1);
        let l = compute_menu_layout(anchor, panel(3, 3), None, SCREEN);
        assert_eq!(l.area.width, 12);
        assert_eq!(l.area.right(), SCREEN.right());
    }

    #[test]
    fn scrolling_into_view_keeps_placement() {
        let anchor = Rect::new(0, 0, 10, 1);
        let l = compute_menu_layout(anchor, panel(10, 3), None, SCREEN);
        let moved = scroll_row_into_view(l, RowMetrics::single(5));
        assert_eq!(moved.area, l.area);
        assert_eq!(moved.scroll_top(), 3);
        assert_eq!(moved.row_at(Position::new(0, 2)), Some(5));
        assert_eq!(moved.row_at(Position::new(0, 3)), None);
    }
}
