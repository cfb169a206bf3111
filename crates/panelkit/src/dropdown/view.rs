use std::fmt::Display;

use panelkit_core::render;
use panelkit_core::theme::Theme;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::widgets::Clear;
use ratatui::widgets::Widget;

use super::Dropdown;
use super::MenuState;
use super::layout::MenuLayout;
use super::layout::PanelMetrics;
use super::option::DropdownOption;
use super::option::OptionId;
use super::option::display_label;
use super::props::DropdownProps;
use super::props::DropdownVariant;
use super::props::Icon;

/// Columns reserved left of a value label for the check mark.
const CHECK_COLS: u16 = 2;

#[derive(Clone, Debug)]
pub struct DropdownViewOptions {
    pub show_scrollbar: bool,
    /// Rows shown before the panel scrolls.
    pub max_menu_height: u16,
    /// Rows kept free above and below the panel at the screen edges.
    pub viewport_margin: u16,
    pub chevron: char,
    pub check: char,
    pub separator: char,
    pub style: Style,
    pub menu_style: Style,
    pub cursor_style: Style,
    pub header_style: Style,
    pub disabled_style: Style,
    pub placeholder_style: Style,
    pub scrollbar_style: Style,
}

impl Default for DropdownViewOptions {
    fn default() -> Self {
        Self {
            show_scrollbar: true,
            max_menu_height: 12,
            viewport_margin: 0,
            chevron: '▾',
            check: '✓',
            separator: '─',
            style: Style::default(),
            menu_style: Style::default(),
            cursor_style: Style::default().add_modifier(Modifier::REVERSED),
            header_style: Style::default(),
            disabled_style: Style::default(),
            placeholder_style: Style::default(),
            scrollbar_style: Style::default(),
        }
    }
}

/// One rendered line of the menu panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MenuRow {
    /// Not interactive.
    Header { id: OptionId, label: String },
    /// Purely visual.
    Separator { id: OptionId },
    Value {
        id: OptionId,
        label: String,
        /// Carries the current value.
        checked: bool,
        disabled: bool,
        highlighted: bool,
    },
}

impl MenuRow {
    pub fn id(&self) -> OptionId {
        match self {
            Self::Header { id, .. } | Self::Separator { id } | Self::Value { id, .. } => *id,
        }
    }
}

/// Describes every option as a row, flagged with the current value and highlight.
pub fn menu_rows<V>(props: &DropdownProps<'_, V>, highlighted: Option<OptionId>) -> Vec<MenuRow>
where
    V: PartialEq + Display,
{
    let current = props.value();
    props
        .options()
        .iter()
        .enumerate()
        .map(|(id, option)| match option {
            DropdownOption::Header { label } => MenuRow::Header {
                id,
                label: label.clone(),
            },
            DropdownOption::Separator => MenuRow::Separator { id },
            DropdownOption::Value {
                value, disabled, ..
            } => MenuRow::Value {
                id,
                label: display_label(option).into_owned(),
                checked: current == Some(value),
                disabled: *disabled,
                highlighted: !*disabled && highlighted == Some(id),
            },
        })
        .collect()
}

/// The anchor row the panel aligns with: the text row inside any variant decoration.
pub(crate) fn value_row(area: Rect, variant: Option<DropdownVariant>) -> Rect {
    match variant {
        Some(DropdownVariant::Border) if area.height >= 3 => {
            Rect::new(area.x, area.y + 1, area.width, 1)
        }
        _ => Rect::new(area.x, area.y, area.width, area.height.min(1)),
    }
}

/// The part of `bounds` the panel may occupy.
pub(crate) fn menu_bounds(bounds: Rect, view: &DropdownViewOptions) -> Rect {
    let margin = view.viewport_margin.min(bounds.height / 2);
    Rect::new(
        bounds.x,
        bounds.y + margin,
        bounds.width,
        bounds.height - 2 * margin,
    )
}

pub(crate) fn panel_metrics<V: Display>(
    options: &[DropdownOption<V>],
    view: &DropdownViewOptions,
    bounds: Rect,
) -> PanelMetrics {
    let rows = options.len().min(u16::MAX as usize) as u16;
    let client_height = rows.min(view.max_menu_height.max(1)).min(bounds.height);
    let label_w = options
        .iter()
        .map(|option| render::str_width(&display_label(option)))
        .max()
        .unwrap_or(0);
    let scrollbar = u16::from(view.show_scrollbar && rows > client_height);

    PanelMetrics {
        width: label_w
            .saturating_add(CHECK_COLS + 2)
            .saturating_add(scrollbar),
        scroll_height: rows,
        client_height,
    }
}

fn pick(style: Style, fallback: Style) -> Style {
    if style == Style::default() {
        fallback
    } else {
        style
    }
}

impl Dropdown {
    /// Draws the anchor into `area` and, while open, the menu panel on top of everything else in
    /// `buf`. Render the dropdown after its surroundings so the panel stays on top.
    ///
    /// Records `area` as the anchor and the buffer area as the screen bounds; an open panel keeps
    /// the placement it got when it opened.
    pub fn render<V>(
        &mut self,
        area: Rect,
        buf: &mut Buffer,
        theme: &Theme,
        props: &DropdownProps<'_, V>,
    ) where
        V: PartialEq + Display,
    {
        let bounds = *buf.area();
        self.set_geometry(area, bounds);
        if area.width == 0 || area.height == 0 {
            return;
        }

        self.render_anchor(area, buf, theme, props);

        let (state, layout) = {
            let inner = self.inner.borrow();
            (inner.state, inner.layout)
        };
        if let (MenuState::Open { highlighted }, Some(layout)) = (state, layout)
            && !props.is_disabled()
        {
            self.render_menu(layout, buf, theme, props, highlighted);
        }
    }

    fn render_anchor<V>(
        &self,
        area: Rect,
        buf: &mut Buffer,
        theme: &Theme,
        props: &DropdownProps<'_, V>,
    ) where
        V: PartialEq + Display,
    {
        let o = &self.options;
        let base = if props.is_disabled() {
            pick(o.disabled_style, theme.disabled)
        } else {
            pick(o.style, theme.text_primary)
        };
        buf.set_style(area, base);

        match props.variant() {
            Some(DropdownVariant::Border) if area.height >= 3 => {
                Block::bordered().border_style(theme.border).render(area, buf);
            }
            Some(DropdownVariant::Underline) if area.height >= 2 => {
                render::fill_row(area, area.bottom() - 1, buf, "▔", theme.border);
            }
            _ => {}
        }

        let row = value_row(area, props.variant());
        let row = if props.variant() == Some(DropdownVariant::Border) && area.height >= 3 {
            Rect::new(row.x + 1, row.y, row.width.saturating_sub(2), 1)
        } else {
            row
        };
        if row.width == 0 {
            return;
        }

        let chevron_style = if self.is_open() { theme.accent } else { base };
        let mut tmp = [0u8; 4];
        let chevron = o.chevron.encode_utf8(&mut tmp);
        let text_w = row.width.saturating_sub(2);
        render::render_str_clipped(row.right() - 1, row.y, 1, buf, chevron, chevron_style);

        let mut x = row.x;
        match props.icon() {
            Some(Icon::Glyph(glyph)) => {
                x += render::render_str_clipped(x, row.y, text_w, buf, glyph, base);
                x += 1;
            }
            Some(Icon::Styled(span)) => {
                x += render::render_str_clipped(x, row.y, text_w, buf, &span.content, span.style);
                x += 1;
            }
            None => {}
        }

        let remaining = (row.x + text_w).saturating_sub(x);
        let selected = props
            .validate_value()
            .ok()
            .flatten()
            .and_then(|id| props.options().get(id));
        match (selected, props.placeholder()) {
            (Some(option), _) => {
                render::render_str_clipped(x, row.y, remaining, buf, &display_label(option), base);
            }
            (None, Some(placeholder)) => {
                let style = pick(o.placeholder_style, theme.text_muted);
                render::render_str_clipped(x, row.y, remaining, buf, placeholder, style);
            }
            (None, None) => {}
        }
    }

    fn render_menu<V>(
        &self,
        layout: MenuLayout,
        buf: &mut Buffer,
        theme: &Theme,
        props: &DropdownProps<'_, V>,
        highlighted: Option<OptionId>,
    ) where
        V: PartialEq + Display,
    {
        let area = layout.area.intersection(*buf.area());
        if area.width == 0 || area.height == 0 {
            return;
        }
        let o = &self.options;
        let menu_style = pick(o.menu_style, theme.surface);
        let header_style = pick(o.header_style, theme.text_muted);
        let disabled_style = pick(o.disabled_style, theme.disabled);
        let cursor_style = o.cursor_style.patch(theme.accent);

        Clear.render(area, buf);
        buf.set_style(area, menu_style);

        let (rows_area, scrollbar_x) =
            if o.show_scrollbar && layout.scroll.overflows() && area.width >= 2 {
                (
                    Rect::new(area.x, area.y, area.width - 1, area.height),
                    Some(area.right() - 1),
                )
            } else {
                (area, None)
            };

        let rows = menu_rows(props, highlighted);
        let mut tmp = [0u8; 4];
        let check = o.check.encode_utf8(&mut tmp).to_string();
        let separator = o.separator.encode_utf8(&mut tmp).to_string();

        for dy in 0..rows_area.height {
            let y = rows_area.y + dy;
            let idx = layout.scroll.y as usize + dy as usize;
            let Some(row) = rows.get(idx) else {
                break;
            };
            let line = Rect::new(rows_area.x, y, rows_area.width, 1);
            match row {
                MenuRow::Header { label, .. } => {
                    render::render_str_clipped(
                        line.x + 1,
                        y,
                        line.width.saturating_sub(1),
                        buf,
                        label,
                        header_style,
                    );
                }
                MenuRow::Separator { .. } => {
                    render::fill_row(line, y, buf, &separator, header_style);
                }
                MenuRow::Value {
                    label,
                    checked,
                    disabled,
                    highlighted,
                    ..
                } => {
                    let style = if *disabled {
                        disabled_style
                    } else if *highlighted {
                        cursor_style
                    } else {
                        menu_style
                    };
                    buf.set_style(line, style);
                    if *checked {
                        render::render_str_clipped(line.x, y, line.width, buf, &check, style);
                    }
                    render::render_str_clipped(
                        line.x + CHECK_COLS,
                        y,
                        line.width.saturating_sub(CHECK_COLS),
                        buf,
                        label,
                        style,
                    );
                }
            }
        }

        if let Some(sb_x) = scrollbar_x {
            render::render_scrollbar(
                Rect::new(sb_x, area.y, 1, area.height),
                buf,
                &layout.scroll,
                pick(o.scrollbar_style, theme.text_muted),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use panelkit_core::outside::OutsidePointer;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (buf.area.x..buf.area.right())
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect::<String>()
            .trim_end()
            .to_string()
    }

    fn options() -> Vec<DropdownOption<&'static str>> {
        vec![
            DropdownOption::header("Align"),
            DropdownOption::value("left").with_text("Left"),
            DropdownOption::separator(),
            DropdownOption::value("center").with_disabled(true),
            DropdownOption::value("right"),
        ]
    }

    #[test]
    fn rows_carry_checked_disabled_and_highlight_flags() {
        let options = options();
        let props = DropdownProps::new(&options, Some(&"right")).unwrap();
        let rows = menu_rows(&props, Some(4));
        assert_eq!(
            rows[0],
            MenuRow::Header {
                id: 0,
                label: "Align".to_string()
            }
        );
        assert_eq!(rows[2], MenuRow::Separator { id: 2 });
        assert_eq!(
            rows[3],
            MenuRow::Value {
                id: 3,
                label: "center".to_string(),
                checked: false,
                disabled: true,
                highlighted: false,
            }
        );
        assert_eq!(
            rows[4],
            MenuRow::Value {
                id: 4,
                label: "right".to_string(),
                checked: true,
                disabled: false,
                highlighted: true,
            }
        );
        assert_eq!(rows.iter().map(MenuRow::id).collect::<Vec<_>>(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn anchor_shows_placeholder_then_label() {
        let options = options();
        let theme = Theme::default();
        let mut d = Dropdown::new(OutsidePointer::new());
        let area = Rect::new(0, 0, 12, 1);

        let mut buf = Buffer::empty(Rect::new(0, 0, 12, 1));
        let props = DropdownProps::new(&options, None)
            .unwrap()
            .with_placeholder("Pick…");
        d.render(area, &mut buf, &theme, &props);
        assert_eq!(row_text(&buf, 0), "Pick…      ▾");

        let mut buf = Buffer::empty(Rect::new(0, 0, 12, 1));
        let props = DropdownProps::new(&options, Some(&"left"))
            .unwrap()
            .with_icon(Icon::glyph("≡"))
            .unwrap();
        d.render(area, &mut buf, &theme, &props);
        assert_eq!(row_text(&buf, 0), "≡ Left     ▾");
    }

    #[test]
    fn open_panel_overlays_rows_from_the_anchor() {
        let options = options();
        let theme = Theme::default();
        let mut d = Dropdown::new(OutsidePointer::new());
        let screen = Rect::new(0, 0, 16, 8);
        let mut buf = Buffer::empty(screen);
        let props = DropdownProps::new(&options, Some(&"left")).unwrap();

        d.render(Rect::new(0, 2, 12, 1), &mut buf, &theme, &props);
        d.focus(&props).unwrap();
        let mut buf = Buffer::empty(screen);
        d.render(Rect::new(0, 2, 12, 1), &mut buf, &theme, &props);

        let layout = d.menu_layout().unwrap();
        assert_eq!(layout.area.y, 1);
        assert_eq!(row_text(&buf, 1), " Align");
        assert_eq!(row_text(&buf, 2), "✓ Left");
        assert_eq!(row_text(&buf, 3), "────────────");
        assert_eq!(row_text(&buf, 5), "  right");
    }

    #[test]
    fn panel_width_covers_longest_label() {
        let options = options();
        let m = panel_metrics(&options, &DropdownViewOptions::default(), Rect::new(0, 0, 80, 3));
        assert_eq!(m.scroll_height, 5);
        assert_eq!(m.client_height, 3);
        assert_eq!(m.width, 6 + CHECK_COLS + 2 + 1);
    }

    #[test]
    fn panel_width_uses_display_columns() {
        let options = vec![DropdownOption::value("x").with_text("你好")];
        let m = panel_metrics(&options, &DropdownViewOptions::default(), Rect::new(0, 0, 80, 24));
        assert_eq!(m.width, 4 + CHECK_COLS + 2);
    }

    #[test]
    fn margin_shrinks_menu_bounds() {
        let view = DropdownViewOptions {
            viewport_margin: 2,
            ..Default::default()
        };
        assert_eq!(menu_bounds(Rect::new(0, 0, 30, 10), &view), Rect::new(0, 2, 30, 6));
        assert_eq!(menu_bounds(Rect::new(0, 0, 30, 3), &view), Rect::new(0, 1, 30, 1));
    }
}
