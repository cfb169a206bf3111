//! Highlight movement over a menu's value rows.
//!
//! Movement clamps at both ends instead of wrapping, and never lands on a disabled row.
use super::option::DropdownOption;
use super::option::OptionId;

/// A candidate row as seen by the navigation controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavRow {
    pub id: OptionId,
    pub disabled: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavDirection {
    Up,
    Down,
}

/// Value rows of `options`, headers and separators left out.
pub fn nav_rows<V>(options: &[DropdownOption<V>]) -> Vec<NavRow> {
    options
        .iter()
        .enumerate()
        .filter_map(|(id, option)| match option {
            DropdownOption::Value { disabled, .. } => Some(NavRow {
                id,
                disabled: *disabled,
            }),
            _ => None,
        })
        .collect()
}

/// Moves the highlight one enabled row in `direction`.
///
/// With no current highlight, `Down` picks the first enabled row and `Up` the last one. When
/// there is nothing further in that direction the current highlight is returned unchanged.
pub fn step(
    rows: &[NavRow],
    current: Option<OptionId>,
    direction: NavDirection,
) -> Option<OptionId> {
    let mut enabled = rows.iter().filter(|row| !row.disabled).map(|row| row.id);
    let next = match (direction, current) {
        (NavDirection::Down, None) => enabled.next(),
        (NavDirection::Up, None) => enabled.last(),
        (NavDirection::Down, Some(cur)) => enabled.find(|&id| id > cur),
        (NavDirection::Up, Some(cur)) => enabled.filter(|&id| id < cur).last(),
    };
    next.or(current)
}

/// Highlight after the pointer moves over row `id`.
///
/// Hovering an enabled value row takes the highlight from wherever the keyboard left it;
/// anything else keeps the current highlight.
pub fn hover(rows: &[NavRow], current: Option<OptionId>, id: OptionId) -> Option<OptionId> {
    match rows.iter().find(|row| row.id == id) {
        Some(row) if !row.disabled => Some(id),
        _ => current,
    }
}
