use ratatui::style::Style;

/// Base palette shared by panelkit controls.
///
/// Controls patch their own option styles on top of these; a default `Style` in an options
/// struct means "use the theme".
#[derive(Clone, Debug)]
pub struct Theme {
    pub text_primary: Style,
    pub text_muted: Style,
    pub accent: Style,
    pub border: Style,
    pub surface: Style,
    pub disabled: Style,
}

impl Default for Theme {
    fn default() -> Self {
        use ratatui::style::Stylize;

        Self {
            text_primary: Style::default(),
            text_muted: Style::default().dark_gray(),
            accent: Style::default().cyan(),
            border: Style::default().gray(),
            surface: Style::default().on_black(),
            disabled: Style::default().dark_gray(),
        }
    }
}
