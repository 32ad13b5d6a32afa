mod list_picker;
mod logger;

use crate::list_picker::ListPicker;
use crossterm::cursor::{Hide, Show};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use picker_field::{
    active_theme_name, apply_theme_name, next_theme_name, theme_option, AccessorConfig,
    PickerField, SelectableItem, ThemeName,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use ratatui::Terminal;
use serde_json::Value;
use std::cell::Cell;
use std::time::Duration;

const MOUSE_ENV: &str = "PICKER_FIELD_MOUSE";
const FIELD_MAX_WIDTH: u16 = 40;
const PICKER_MAX_HEIGHT: u16 = 8;
const POLL_INTERVAL: Duration = Duration::from_millis(100);
const HELP: &str = "Tab focus · Enter/click open · e toggle error · t theme · q quit";

const COUNTRIES_JSON: &str = r#"[
    {"id": 1, "name": "Argentina"},
    {"id": 2, "name": "Brazil"},
    {"id": 3, "name": "Chile"},
    {"id": 4, "name": "Colombia"},
    {"id": 5, "name": "Ecuador"},
    {"id": 6, "name": "Paraguay"},
    {"id": 7, "name": "Peru"},
    {"id": 8, "name": "Saint Vincent and the Grenadines"},
    {"id": 9, "name": "Uruguay"},
    {"id": 10, "name": "Venezuela"}
]"#;

fn env_truthy(key: &str) -> bool {
    std::env::var(key)
        .ok()
        .as_deref()
        .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

fn load_options(source: &str) -> Result<Vec<SelectableItem>, serde_json::Error> {
    let values: Vec<Value> = serde_json::from_str(source)?;
    Ok(values.into_iter().map(SelectableItem::from).collect())
}

fn help_line(theme: ThemeName) -> String {
    format!("{HELP} · {theme}: {}", theme_option(theme).preview)
}

fn field_rect(screen: Rect, height: u16) -> Rect {
    let rect = Rect {
        x: screen.x.saturating_add(2),
        y: screen.y.saturating_add(1),
        width: screen.width.saturating_sub(4).min(FIELD_MAX_WIDTH),
        height,
    };
    rect.intersection(screen)
}

struct TerminalRestoreGuard {
    mouse_capture: bool,
}

impl Drop for TerminalRestoreGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = std::io::stdout();
        if self.mouse_capture {
            let _ = stdout.execute(DisableMouseCapture);
        }
        let _ = stdout.execute(LeaveAlternateScreen);
        let _ = stdout.execute(Show);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logger::init_from_env();

    let options = load_options(COUNTRIES_JSON)?;
    let accessors = AccessorConfig::new().display("name").key("id");
    let open_requested = Cell::new(false);
    let mut field = PickerField::new("Country", || open_requested.set(true))
        .options(options.iter().cloned())
        .accessors(accessors.clone())
        .on_focus(|| log::info!("country field focused"))
        .on_blur(|| log::info!("country field blurred"));
    let mut picker: Option<ListPicker> = None;

    let mouse_capture = env_truthy(MOUSE_ENV);
    let _restore_guard = TerminalRestoreGuard { mouse_capture };
    let mut stdout = std::io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(Hide)?;
    enable_raw_mode()?;
    if mouse_capture {
        stdout.execute(EnableMouseCapture)?;
    }
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    field.focus();

    let mut field_area = Rect::default();
    loop {
        let view = field.view()?;
        terminal.draw(|f| {
            let screen = f.area();
            field_area = field_rect(screen, view.height());
            f.render_widget(&view, field_area);

            if let Some(active) = picker.as_ref() {
                let top = field_area.bottom();
                let picker_area = Rect {
                    x: field_area.x,
                    y: top,
                    width: field_area.width,
                    height: screen.bottom().saturating_sub(top).min(PICKER_MAX_HEIGHT),
                };
                f.render_widget(active, picker_area.intersection(screen));
            }

            if screen.height > 0 {
                let help_area = Rect {
                    y: screen.bottom() - 1,
                    height: 1,
                    ..screen
                };
                let help = Line::styled(
                    help_line(active_theme_name()),
                    Style::default().add_modifier(Modifier::DIM),
                );
                f.render_widget(Paragraph::new(help), help_area);
            }
        })?;

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        let event = event::read()?;

        if let Some(active) = picker.as_mut() {
            let Event::Key(key) = &event else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Up => active.move_up(),
                KeyCode::Down => active.move_down(),
                KeyCode::Enter => {
                    if let Some(record) = active.chosen_record() {
                        log::info!("picked {}", Value::Object(record.clone()));
                        field.set_item_value(record);
                    }
                    picker = None;
                }
                KeyCode::Esc => picker = None,
                _ => {}
            }
            continue;
        }

        if let Event::Key(key) = &event {
            if key.kind == KeyEventKind::Press {
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Tab | KeyCode::BackTab => {
                        if field.is_focused() {
                            field.blur();
                        } else {
                            field.focus();
                        }
                        continue;
                    }
                    KeyCode::Char('t') => {
                        let next = next_theme_name(active_theme_name());
                        log::info!("switching theme to {next}");
                        apply_theme_name(next);
                        continue;
                    }
                    KeyCode::Char('e') => {
                        if field.has_error() {
                            field.set_error(None::<String>);
                        } else {
                            field.set_error(Some("Required"));
                        }
                        continue;
                    }
                    _ => {}
                }
            }
        }

        field.handle_event(&event, field_area);
        if open_requested.replace(false) {
            picker = Some(
                ListPicker::from_options("Select country", &options, &accessors)
                    .with_current(field.item()),
            );
        }
    }

    Ok(())
}
