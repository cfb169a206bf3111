use panelkit_core::input::KeyCode;
use panelkit_core::input::KeyEvent;
use panelkit_core::keymap;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropdownKeyAction {
    Up,
    Down,
    /// Commit the highlighted row, or just close when nothing is highlighted.
    Commit,
    /// Close without committing.
    Cancel,
}

/// Keys understood by an open dropdown.
///
/// Defaults: arrows move, `Enter` commits, `Esc` and `Tab`/`Shift+Tab` cancel.
#[derive(Clone, Debug)]
pub struct DropdownBindings {
    pub up: Vec<KeyEvent>,
    pub down: Vec<KeyEvent>,
    pub commit: Vec<KeyEvent>,
    pub cancel: Vec<KeyEvent>,
}

impl Default for DropdownBindings {
    fn default() -> Self {
        Self {
            up: vec![keymap::key(KeyCode::Up)],
            down: vec![keymap::key(KeyCode::Down)],
            commit: vec![keymap::key(KeyCode::Enter)],
            cancel: vec![
                keymap::key(KeyCode::Esc),
                keymap::key(KeyCode::Tab),
                keymap::key(KeyCode::BackTab),
                keymap::key_shift(KeyCode::BackTab),
            ],
        }
    }
}

impl DropdownBindings {
    pub fn action_for(&self, key: &KeyEvent) -> Option<DropdownKeyAction> {
        if keymap::matches_any(&self.cancel, key) {
            return Some(DropdownKeyAction::Cancel);
        }
        if keymap::matches_any(&self.commit, key) {
            return Some(DropdownKeyAction::Commit);
        }
        if keymap::matches_any(&self.up, key) {
            return Some(DropdownKeyAction::Up);
        }
        if keymap::matches_any(&self.down, key) {
            return Some(DropdownKeyAction::Down);
        }
        None
    }
}
