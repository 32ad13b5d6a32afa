use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Widget};

use crate::text::{single_line, truncate_to_width};
use crate::visual::{FieldVisualCategory, LabelMode};

/// Rows taken by the bordered field itself; the error message adds one more.
pub const FIELD_HEIGHT: u16 = 3;
/// Columns reserved at the trailing edge for the picker icon.
pub const ICON_GUTTER: u16 = 2;
pub const PICKER_ICON: &str = "▾";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FieldStyles {
    pub container: Style,
    pub border: Style,
    pub label: Style,
    pub input: Style,
    pub icon: Style,
    pub message: Style,
}

/// Everything needed to draw a picker field for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldView {
    pub label: String,
    pub display: Option<String>,
    pub category: FieldVisualCategory,
    pub label_mode: LabelMode,
    pub error_message: Option<String>,
    pub styles: FieldStyles,
}

impl FieldView {
    pub fn height(&self) -> u16 {
        if self.error_message.is_some() {
            FIELD_HEIGHT + 1
        } else {
            FIELD_HEIGHT
        }
    }

    pub fn border_color(&self) -> Option<Color> {
        self.styles.border.fg
    }

    /// The cell holding the picker icon when drawn into `area`.
    pub fn icon_position(area: Rect) -> Option<(u16, u16)> {
        if area.width < 3 || area.height < FIELD_HEIGHT {
            return None;
        }
        Some((area.right() - 2, area.y + 1))
    }

    fn value_line(&self, width: usize) -> Span<'_> {
        match (&self.display, self.label_mode) {
            (Some(value), _) => Span::styled(
                truncate_to_width(&single_line(value), width),
                self.styles.input,
            ),
            (None, LabelMode::Resting) => Span::styled(
                truncate_to_width(&single_line(&self.label), width),
                self.styles.label,
            ),
            (None, LabelMode::Floating) => Span::raw(""),
        }
    }
}

impl Widget for &FieldView {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        buf.set_style(area, self.styles.container);

        let field_area = Rect {
            height: area.height.min(FIELD_HEIGHT),
            ..area
        };
        let mut block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(self.styles.border);
        if self.label_mode == LabelMode::Floating {
            let title = format!(" {} ", single_line(&self.label));
            block = block.title(Line::from(Span::styled(title, self.styles.label)));
        }
        let inner = block.inner(field_area);
        block.render(field_area, buf);

        if inner.width > 0 && inner.height > 0 {
            let text_width = inner.width.saturating_sub(ICON_GUTTER) as usize;
            let value = self.value_line(text_width);
            buf.set_span(inner.x, inner.y, &value, inner.width);
            if let Some((x, y)) = FieldView::icon_position(field_area) {
                buf.set_string(x, y, PICKER_ICON, self.styles.icon);
            }
        }

        if let Some(message) = self.error_message.as_deref() {
            if area.height > FIELD_HEIGHT {
                let text = truncate_to_width(&single_line(message), area.width as usize);
                buf.set_string(area.x, area.y + FIELD_HEIGHT, text, self.styles.message);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{FieldView, PICKER_ICON};
    use crate::field::PickerField;
    use crate::item::AccessorConfig;
    use crate::theme::{Palette, ThemeName};
    use ratatui::buffer::Buffer;
    use ratatui::layout::Rect;
    use ratatui::widgets::Widget;
    use serde_json::json;

    fn row(buf: &Buffer, y: u16) -> String {
        (buf.area.left()..buf.area.right())
            .map(|x| buf[(x, y)].symbol())
            .collect()
    }

    fn draw(view: &FieldView, width: u16, height: u16) -> Buffer {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        view.render(area, &mut buf);
        buf
    }

    fn country_field() -> PickerField<'static> {
        PickerField::new("Country", || {}).palette(Palette::for_theme(ThemeName::Default))
    }

    #[test]
    fn empty_field_draws_label_inside_and_icon_at_trailing_edge() {
        let view = country_field().view().expect("view");
        let buf = draw(&view, 20, 3);

        assert_eq!(row(&buf, 0), "╭──────────────────╮");
        assert_eq!(row(&buf, 1), "│Country          ▾│");
        assert_eq!(row(&buf, 2), "╰──────────────────╯");
        let palette = Palette::for_theme(ThemeName::Default);
        assert_eq!(buf[(0, 0)].fg, palette.neutral_empty);
        assert_eq!(buf[(1, 1)].fg, palette.label);
    }

    #[test]
    fn selected_value_floats_label_into_border() {
        let view = country_field()
            .accessors(AccessorConfig::new().display("name"))
            .item_value(json!({"id": 7, "name": "Peru"}))
            .view()
            .expect("view");
        let buf = draw(&view, 20, 3);

        assert!(row(&buf, 0).contains(" Country "));
        assert!(row(&buf, 1).starts_with("│Peru "));
        let palette = Palette::for_theme(ThemeName::Default);
        assert_eq!(buf[(0, 1)].fg, palette.neutral_filled);
        assert_eq!(buf[(1, 1)].fg, palette.text);
    }

    #[test]
    fn long_values_leave_room_for_the_icon() {
        let view = country_field()
            .item_value("Saint Vincent and the Grenadines")
            .view()
            .expect("view");
        let buf = draw(&view, 16, 3);

        assert_eq!(row(&buf, 1), "│Saint Vince… ▾│");
        assert_eq!(
            FieldView::icon_position(Rect::new(0, 0, 16, 3)),
            Some((14, 1))
        );
        assert_eq!(buf[(14, 1)].symbol(), PICKER_ICON);
    }

    #[test]
    fn error_message_goes_below_the_field() {
        let view = country_field().error("Required").view().expect("view");
        assert_eq!(view.height(), 4);
        let buf = draw(&view, 20, view.height());

        assert!(row(&buf, 3).starts_with("Required"));
        let palette = Palette::for_theme(ThemeName::Default);
        assert_eq!(buf[(0, 3)].fg, palette.error);
        assert_eq!(buf[(0, 0)].fg, palette.error);
        assert_eq!(buf[(0, 0)].bg, palette.light_error);
    }

    #[test]
    fn suppressed_message_leaves_the_row_blank() {
        let view = country_field()
            .error("Required")
            .disable_error_message(true)
            .view()
            .expect("view");
        assert_eq!(view.height(), 3);
        let buf = draw(&view, 20, 4);

        assert_eq!(row(&buf, 3).trim(), "");
        assert_eq!(buf[(0, 0)].fg, Palette::for_theme(ThemeName::Default).error);
    }

    #[test]
    fn focused_empty_field_floats_label_with_blank_value() {
        let mut field = country_field();
        field.focus();
        let buf = draw(&field.view().expect("view"), 20, 3);

        assert!(row(&buf, 0).contains(" Country "));
        assert_eq!(row(&buf, 1), "│                 ▾│");
        assert_eq!(buf[(0, 0)].fg, Palette::for_theme(ThemeName::Default).primary);
    }

    #[test]
    fn tiny_areas_do_not_panic() {
        let view = country_field().item_value("Chile").error("Required").view().expect("view");
        for (width, height) in [(0, 0), (1, 1), (2, 2), (3, 1), (4, 5)] {
            draw(&view, width, height);
        }
    }
}
