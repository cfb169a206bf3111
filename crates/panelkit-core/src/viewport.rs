/// Vertical scroll state of a fixed-height viewport over taller content.
///
/// `content_h` plays the role of a scroll height and `viewport_h` of a client height; `y` is kept
/// in `[0, content_h - viewport_h]` by every mutator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ViewportState {
    pub y: u16,
    pub viewport_h: u16,
    pub content_h: u16,
}

impl ViewportState {
    pub fn new(viewport_h: u16, content_h: u16) -> Self {
        Self {
            y: 0,
            viewport_h,
            content_h,
        }
    }

    pub fn clamp(&mut self) {
        self.y = self.y.min(self.max_y());
    }

    /// Sets `y` to `offset`, clamped into range. Negative offsets land on `0`.
    pub fn scroll_to(&mut self, offset: i32) {
        self.y = offset.clamp(0, self.max_y() as i32) as u16;
    }

    pub fn scroll_y_by(&mut self, delta: i32) {
        self.scroll_to(self.y as i32 + delta);
    }

    /// Scrolls the least amount needed for `[offset, offset + height)` to be fully visible.
    pub fn ensure_visible(&mut self, offset: u16, height: u16) {
        let bottom = offset.saturating_add(height);
        if offset < self.y {
            self.y = offset;
        } else if bottom > self.y.saturating_add(self.viewport_h) {
            self.y = bottom.saturating_sub(self.viewport_h);
        }
        self.clamp();
    }

    pub fn is_visible(&self, offset: u16, height: u16) -> bool {
        offset >= self.y && offset.saturating_add(height) <= self.y.saturating_add(self.viewport_h)
    }

    pub fn overflows(&self) -> bool {
        self.content_h > self.viewport_h
    }

    pub fn max_y(&self) -> u16 {
        self.content_h.saturating_sub(self.viewport_h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_is_clamped_to_content() {
        let mut s = ViewportState::new(5, 12);
        s.scroll_to(99);
        assert_eq!(s.y, 7);
        s.scroll_to(-3);
        assert_eq!(s.y, 0);
        s.y = 7;
        s.content_h = 8;
        s.clamp();
        assert_eq!(s.y, 3);
    }

    #[test]
    fn ensure_visible_moves_minimally() {
        let mut s = ViewportState::new(3, 10);
        s.ensure_visible(4, 1);
        assert_eq!(s.y, 2);
        assert!(s.is_visible(4, 1));
        s.ensure_visible(3, 1);
        assert_eq!(s.y, 2);
        s.ensure_visible(0, 1);
        assert_eq!(s.y, 0);
    }

    #[test]
    fn short_content_never_scrolls() {
        let mut s = ViewportState::new(10, 4);
        s.scroll_y_by(3);
        assert_eq!(s.y, 0);
        assert!(!s.overflows());
    }
}
