use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableMouseCapture;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use panelkit::crossterm_input::input_event_from_crossterm;
use panelkit::dropdown::Dropdown;
use panelkit::dropdown::DropdownAction;
use panelkit::dropdown::DropdownOption;
use panelkit::dropdown::DropdownProps;
use panelkit::dropdown::DropdownVariant;
use panelkit::dropdown::Icon;
use panelkit::input::InputEvent;
use panelkit::input::KeyCode;
use panelkit::outside::OutsidePointer;
use panelkit::theme::Theme;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Constraint;
use ratatui::layout::Direction;
use ratatui::layout::Layout;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use std::io;
use std::time::Duration;

/// App-owned state behind one dropdown.
struct FieldData {
    label: &'static str,
    icon: &'static str,
    variant: Option<DropdownVariant>,
    options: Vec<DropdownOption<&'static str>>,
    value: Option<&'static str>,
}

impl FieldData {
    fn props(&self) -> io::Result<DropdownProps<'_, &'static str>> {
        let mut props = DropdownProps::new(&self.options, self.value.as_ref())
            .map_err(io::Error::other)?
            .with_name(self.label)
            .with_icon(Icon::glyph(self.icon))
            .map_err(io::Error::other)?
            .with_placeholder("Choose…");
        if let Some(variant) = self.variant {
            props = props.with_variant(variant);
        }
        Ok(props)
    }

    fn height(&self) -> u16 {
        match self.variant {
            Some(DropdownVariant::Border) => 3,
            Some(DropdownVariant::Underline) => 2,
            None => 1,
        }
    }
}

struct Field {
    data: FieldData,
    dropdown: Dropdown,
}

impl Field {
    fn handle_event(&mut self, ev: InputEvent) -> io::Result<DropdownAction> {
        let mut picked = None;
        let action = {
            let mut props = self
                .data
                .props()?
                .on_value_change(|value: &&'static str, _| picked = Some(*value));
            self.dropdown
                .handle_event(&mut props, ev)
                .map_err(io::Error::other)?
        };
        if picked.is_some() {
            self.data.value = picked;
        }
        Ok(action)
    }

    fn focus(&mut self) -> io::Result<DropdownAction> {
        let props = self.data.props()?;
        self.dropdown.focus(&props).map_err(io::Error::other)
    }
}

fn main() -> io::Result<()> {
    let mut stdout = io::stdout();
    enable_raw_mode()?;
    crossterm::execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let theme = Theme::default();
    let hub = OutsidePointer::new();
    let mut fields = vec![
        Field {
            data: FieldData {
                label: "Font",
                icon: "¶",
                variant: Some(DropdownVariant::Underline),
                options: vec![
                    DropdownOption::header("Sans"),
                    DropdownOption::value("inter").with_text("Inter"),
                    DropdownOption::value("roboto").with_text("Roboto"),
                    DropdownOption::separator(),
                    DropdownOption::header("Serif"),
                    DropdownOption::value("merriweather").with_text("Merriweather"),
                    DropdownOption::value("garamond")
                        .with_text("Garamond (licensed)")
                        .with_disabled(true),
                    DropdownOption::separator(),
                    DropdownOption::header("Mono"),
                    DropdownOption::value("jetbrains").with_text("JetBrains Mono"),
                ],
                value: Some("roboto"),
            },
            dropdown: Dropdown::new(hub.clone()),
        },
        Field {
            data: FieldData {
                label: "Size",
                icon: "↕",
                variant: Some(DropdownVariant::Border),
                options: (8..=72)
                    .step_by(2)
                    .map(|pt| DropdownOption::value(pt_label(pt)))
                    .collect(),
                value: None,
            },
            dropdown: Dropdown::new(hub.clone()),
        },
    ];

    let res = run(&mut terminal, &theme, &hub, &mut fields);

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    res
}

fn pt_label(pt: u32) -> &'static str {
    Box::leak(format!("{pt}pt").into_boxed_str())
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    theme: &Theme,
    hub: &OutsidePointer,
    fields: &mut [Field],
) -> io::Result<()> {
    let mut focused = 0usize;
    let mut last = DropdownAction::None;

    loop {
        let mut draw_err = None;
        terminal.draw(|f| {
            let [main, status] = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(1)])
                .areas(f.area());
            let [panel, _] = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(28), Constraint::Min(0)])
                .areas(main);

            let block = Block::default()
                .title("Typography (Tab, ↑/↓, Enter, Esc, q)")
                .borders(Borders::ALL);
            let inner = block.inner(panel);
            f.render_widget(block, panel);

            let buf = f.buffer_mut();
            let mut anchors = Vec::with_capacity(fields.len());
            let mut y = inner.y;
            for field in fields.iter() {
                let height = field.data.height();
                let label = field.data.label;
                buf.set_stringn(inner.x, y, label, inner.width as usize, theme.text_muted);
                anchors.push(Rect::new(inner.x, y + 1, inner.width, height).intersection(inner));
                y += height + 2;
            }

            // The open field draws last so its panel covers its neighbours.
            let mut order: Vec<usize> = (0..fields.len()).collect();
            order.sort_by_key(|&i| fields[i].dropdown.is_open());
            for i in order {
                let Field { data, dropdown } = &mut fields[i];
                match data.props() {
                    Ok(props) => dropdown.render(anchors[i], buf, theme, &props),
                    Err(err) => draw_err = Some(err),
                }
            }

            let values: Vec<String> = fields
                .iter()
                .map(|f| format!("{}={}", f.data.label, f.data.value.unwrap_or("-")))
                .collect();
            let status_line = format!("{}  last={last:?}", values.join("  "));
            let status_span = Span::styled(status_line, Style::default());
            buf.set_span(status.x, status.y, &status_span, status.width);
        })?;
        if let Some(err) = draw_err {
            return Err(err);
        }

        if !crossterm::event::poll(Duration::from_millis(50))? {
            continue;
        }
        let Some(ev) = input_event_from_crossterm(crossterm::event::read()?) else {
            continue;
        };

        match ev {
            InputEvent::Mouse(mouse) => {
                // An open menu sees pointer events alone; its panel may cover other anchors.
                let targets: Vec<usize> = if fields[focused].dropdown.is_open() {
                    vec![focused]
                } else {
                    (0..fields.len()).collect()
                };
                for i in targets {
                    let action = fields[i].handle_event(InputEvent::Mouse(mouse))?;
                    if action == DropdownAction::Opened {
                        focused = i;
                    }
                    if action != DropdownAction::None {
                        last = action;
                    }
                }
                hub.dispatch(&mouse);
            }
            InputEvent::Key(key) if !fields[focused].dropdown.is_open() => match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Tab => {
                    focused = (focused + 1) % fields.len();
                    last = fields[focused].focus()?;
                }
                KeyCode::BackTab => {
                    focused = (focused + fields.len() - 1) % fields.len();
                    last = fields[focused].focus()?;
                }
                KeyCode::Enter | KeyCode::Down | KeyCode::Char(' ') => {
                    last = fields[focused].focus()?;
                }
                _ => {}
            },
            ev => {
                let action = fields[focused].handle_event(ev)?;
                if action != DropdownAction::None {
                    last = action;
                }
            }
        }
    }
}
