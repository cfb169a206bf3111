use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

use crate::viewport::ViewportState;

/// Draws a one-column scrollbar for `state` in the first column of `area`.
///
/// The track stays blank while nothing overflows.
pub fn render_scrollbar(area: Rect, buf: &mut Buffer, state: &ViewportState, style: Style) {
    buf.set_style(area, style);
    let (thumb_top, thumb_h) = if state.overflows() && state.content_h > 0 {
        thumb_span(area.height as u32, state)
    } else {
        (0, 0)
    };
    for dy in 0..area.height {
        let thumb = (thumb_top..thumb_top + thumb_h).contains(&(dy as u32));
        if let Some(cell) = buf.cell_mut((area.x, area.y + dy)) {
            cell.set_symbol(if thumb { "█" } else { " " });
        }
    }
}

/// Thumb offset and length on a track of `track` rows, rounded to the nearest row.
fn thumb_span(track: u32, state: &ViewportState) -> (u32, u32) {
    let content = state.content_h as u32;
    let thumb = ((state.viewport_h as u32 * track + content / 2) / content).clamp(1, track.max(1));
    let room = track.saturating_sub(thumb);
    let max_y = (state.max_y() as u32).max(1);
    let top = ((state.y as u32 * room + max_y / 2) / max_y).min(room);
    (top, thumb)
}

/// Writes `input` starting at `(x, y)`, stopping before a character would exceed `max_cols`.
///
/// Wide characters that do not fit are dropped rather than split. Returns the number of columns
/// written.
pub fn render_str_clipped(
    x: u16,
    y: u16,
    max_cols: u16,
    buf: &mut Buffer,
    input: &str,
    style: Style,
) -> u16 {
    let mut dx = 0u16;
    let mut tmp = [0u8; 4];

    for ch in input.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0) as u16;
        if w == 0 {
            continue;
        }
        if dx + w > max_cols {
            break;
        }
        let s = ch.encode_utf8(&mut tmp);
        if let Some(cell) = buf.cell_mut((x + dx, y)) {
            cell.set_style(style);
            cell.set_symbol(s);
        }
        if w == 2 {
            if let Some(cell) = buf.cell_mut((x + dx + 1, y)) {
                cell.set_style(style);
                cell.set_symbol("");
            }
        }
        dx += w;
    }
    dx
}

/// Fills one row of `area` with `symbol`, applying `style`.
pub fn fill_row(area: Rect, y: u16, buf: &mut Buffer, symbol: &str, style: Style) {
    for x in area.left()..area.right() {
        if let Some(cell) = buf.cell_mut((x, y)) {
            cell.set_style(style);
            cell.set_symbol(symbol);
        }
    }
}

/// Terminal columns taken by `s`, saturating at `u16::MAX`.
pub fn str_width(s: &str) -> u16 {
    UnicodeWidthStr::width(s).min(u16::MAX as usize) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn clipped_text_drops_wide_char_that_does_not_fit() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 5, 1));
        let written = render_str_clipped(0, 0, 3, &mut buf, "a你好", Style::default());
        assert_eq!(written, 3);
        assert_eq!(row(&buf, 0), "a你  ");
    }

    #[test]
    fn width_counts_columns_not_chars() {
        assert_eq!(str_width("abc"), 3);
        assert_eq!(str_width("你好"), 4);
        assert_eq!(str_width(""), 0);
    }

    #[test]
    fn scrollbar_thumb_tracks_offset() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 1, 4));
        let mut state = ViewportState::new(4, 8);
        state.scroll_to(4);
        render_scrollbar(Rect::new(0, 0, 1, 4), &mut buf, &state, Style::default());
        let col: Vec<&str> = (0..4).map(|y| buf[(0, y)].symbol()).collect();
        assert_eq!(col, vec![" ", " ", "█", "█"]);
    }

    #[test]
    fn scrollbar_is_blank_without_overflow() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 1, 3));
        let state = ViewportState::new(3, 3);
        render_scrollbar(Rect::new(0, 0, 1, 3), &mut buf, &state, Style::default());
        assert_eq!(row(&buf, 0) + &row(&buf, 1) + &row(&buf, 2), "   ");
    }
}
