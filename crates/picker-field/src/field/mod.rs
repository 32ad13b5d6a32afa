mod events;
mod view;

use ratatui::style::Style;
use std::fmt;

use crate::item::{AccessorConfig, SelectableItem};
use crate::resolve::{resolve_display_value, ResolveError};
use crate::theme::{palette, Palette};
use crate::visual::{border_token, classify, ring_token, LabelMode};

pub use view::{FieldStyles, FieldView, FIELD_HEIGHT, ICON_GUTTER, PICKER_ICON};

pub type Callback<'a> = Box<dyn FnMut() + 'a>;

/// Focus flag with guarded transitions; each method reports whether anything changed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct FocusState {
    focused: bool,
}

impl FocusState {
    fn gain(&mut self) -> bool {
        if self.focused {
            return false;
        }
        self.focused = true;
        true
    }

    fn lose(&mut self) -> bool {
        if !self.focused {
            return false;
        }
        self.focused = false;
        true
    }
}

/// A read-only form field showing the current selection.
///
/// The field never opens a picker or changes its own value: pressing it calls `on_press`,
/// and the owner pushes the new selection back with [`PickerField::set_item_value`].
pub struct PickerField<'a> {
    label: String,
    on_press: Callback<'a>,
    on_focus: Option<Callback<'a>>,
    on_blur: Option<Callback<'a>>,
    item_value: SelectableItem,
    options: Option<Vec<SelectableItem>>,
    accessors: AccessorConfig,
    error: Option<String>,
    disable_error_message: bool,
    container_style: Style,
    input_style: Style,
    palette: Option<Palette>,
    focus: FocusState,
}

impl<'a> PickerField<'a> {
    pub fn new(label: impl Into<String>, on_press: impl FnMut() + 'a) -> Self {
        Self {
            label: label.into(),
            on_press: Box::new(on_press),
            on_focus: None,
            on_blur: None,
            item_value: SelectableItem::Empty,
            options: None,
            accessors: AccessorConfig::default(),
            error: None,
            disable_error_message: false,
            container_style: Style::default(),
            input_style: Style::default(),
            palette: None,
            focus: FocusState::default(),
        }
    }

    pub fn on_focus(mut self, callback: impl FnMut() + 'a) -> Self {
        self.on_focus = Some(Box::new(callback));
        self
    }

    pub fn on_blur(mut self, callback: impl FnMut() + 'a) -> Self {
        self.on_blur = Some(Box::new(callback));
        self
    }

    pub fn item_value(mut self, item: impl Into<SelectableItem>) -> Self {
        self.set_item_value(item);
        self
    }

    pub fn options(mut self, options: impl IntoIterator<Item = SelectableItem>) -> Self {
        self.set_options(options);
        self
    }

    pub fn accessors(mut self, accessors: AccessorConfig) -> Self {
        self.accessors = accessors;
        self
    }

    pub fn error(mut self, error: impl Into<String>) -> Self {
        self.set_error(Some(error));
        self
    }

    pub fn disable_error_message(mut self, disable: bool) -> Self {
        self.disable_error_message = disable;
        self
    }

    /// Patched over the base container style; the caller wins on conflicts.
    pub fn container_style(mut self, style: Style) -> Self {
        self.container_style = style;
        self
    }

    /// Patched over the base value style; the caller wins on conflicts.
    pub fn input_style(mut self, style: Style) -> Self {
        self.input_style = style;
        self
    }

    pub fn palette(mut self, palette: Palette) -> Self {
        self.palette = Some(palette);
        self
    }

    pub fn set_item_value(&mut self, item: impl Into<SelectableItem>) {
        self.item_value = item.into();
    }

    /// Supplied options are a lookup table even when empty: a key-only selection that
    /// matches none of them is an error.
    pub fn set_options(&mut self, options: impl IntoIterator<Item = SelectableItem>) {
        self.options = Some(options.into_iter().collect());
    }

    pub fn clear_options(&mut self) {
        self.options = None;
    }

    /// An empty message counts as no error.
    pub fn set_error<S: Into<String>>(&mut self, error: Option<S>) {
        self.error = error.map(Into::into).filter(|message| !message.is_empty());
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn item(&self) -> &SelectableItem {
        &self.item_value
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn is_focused(&self) -> bool {
        self.focus.focused
    }

    /// Asks the owner to open its picker.
    pub fn press(&mut self) {
        log::debug!("picker field {:?} pressed", self.label);
        (self.on_press)();
    }

    pub fn focus(&mut self) {
        if !self.focus.gain() {
            return;
        }
        log::debug!("picker field {:?} focused", self.label);
        if let Some(on_focus) = self.on_focus.as_mut() {
            on_focus();
        }
    }

    pub fn blur(&mut self) {
        if !self.focus.lose() {
            return;
        }
        log::debug!("picker field {:?} blurred", self.label);
        if let Some(on_blur) = self.on_blur.as_mut() {
            on_blur();
        }
    }

    /// Builds the snapshot drawn for the current props and focus.
    pub fn view(&self) -> Result<FieldView, ResolveError> {
        let options = self.options.as_deref();
        let display = resolve_display_value(&self.item_value, &self.accessors, options)?
            .filter(|value| !value.is_empty());
        let is_focused = self.focus.focused;
        let has_error = self.error.is_some();
        let has_value = display.is_some();
        let category = classify(is_focused, has_error, has_value);
        let palette = self.palette.unwrap_or_else(palette);

        let mut border = Style::default().fg(palette.border(border_token(category)));
        if let Some(ring) = ring_token(is_focused, has_error) {
            border = border.bg(palette.ring(ring));
        }
        let label = Style::default().fg(palette.label);
        let styles = FieldStyles {
            container: Style::default().patch(self.container_style),
            border,
            label,
            input: Style::default().fg(palette.text).patch(self.input_style),
            icon: label,
            message: Style::default().fg(palette.error),
        };

        let error_message = if self.disable_error_message {
            None
        } else {
            self.error.clone()
        };

        Ok(FieldView {
            label: self.label.clone(),
            display,
            category,
            label_mode: LabelMode::for_state(is_focused, has_value),
            error_message,
            styles,
        })
    }
}

impl fmt::Debug for PickerField<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PickerField")
            .field("label", &self.label)
            .field("item_value", &self.item_value)
            .field("options", &self.options.as_ref().map(Vec::len))
            .field("accessors", &self.accessors)
            .field("error", &self.error)
            .field("disable_error_message", &self.disable_error_message)
            .field("focused", &self.focus.focused)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::PickerField;
    use crate::item::{AccessorConfig, SelectableItem};
    use crate::resolve::ResolveError;
    use crate::theme::{Palette, ThemeName};
    use crate::visual::{FieldVisualCategory, LabelMode};
    use ratatui::style::{Color, Modifier, Style};
    use serde_json::json;
    use std::cell::Cell;

    fn field<'a>(presses: &'a Cell<usize>) -> PickerField<'a> {
        PickerField::new("Country", move || presses.set(presses.get() + 1))
            .palette(Palette::for_theme(ThemeName::Default))
    }

    #[test]
    fn fresh_field_shows_label_only() {
        let presses = Cell::new(0);
        let view = field(&presses).view().expect("view");

        assert_eq!(view.display, None);
        assert_eq!(view.category, FieldVisualCategory::Empty);
        assert_eq!(view.label_mode, LabelMode::Resting);
        assert_eq!(view.error_message, None);
        assert_eq!(
            view.border_color(),
            Some(Palette::for_theme(ThemeName::Default).neutral_empty)
        );
    }

    #[test]
    fn press_fires_callback_once_without_touching_value() {
        let presses = Cell::new(0);
        let mut field = field(&presses);

        field.press();

        assert_eq!(presses.get(), 1);
        assert_eq!(field.item(), &SelectableItem::Empty);
        assert_eq!(field.view().expect("view").display, None);
    }

    #[test]
    fn focus_is_dispatched_once_per_transition() {
        let presses = Cell::new(0);
        let focuses = Cell::new(0);
        let blurs = Cell::new(0);
        let mut field = field(&presses)
            .on_focus(|| focuses.set(focuses.get() + 1))
            .on_blur(|| blurs.set(blurs.get() + 1));

        field.blur();
        assert_eq!(blurs.get(), 0);

        field.focus();
        field.focus();
        assert!(field.is_focused());
        assert_eq!(focuses.get(), 1);

        field.blur();
        field.blur();
        assert!(!field.is_focused());
        assert_eq!(blurs.get(), 1);

        field.focus();
        assert_eq!(focuses.get(), 2);
    }

    #[test]
    fn focus_without_callbacks_still_changes_state() {
        let presses = Cell::new(0);
        let mut field = field(&presses);
        field.focus();
        assert_eq!(
            field.view().expect("view").category,
            FieldVisualCategory::Focused
        );
        assert_eq!(presses.get(), 0);
    }

    #[test]
    fn suppressed_error_message_keeps_error_border() {
        let presses = Cell::new(0);
        let palette = Palette::for_theme(ThemeName::Default);
        let mut field = field(&presses)
            .error("Required")
            .disable_error_message(true);

        let view = field.view().expect("view");
        assert_eq!(view.error_message, None);
        assert_eq!(view.category, FieldVisualCategory::ErrorPresent);
        assert_eq!(view.border_color(), Some(palette.error));

        field.focus();
        let view = field.view().expect("view");
        assert_eq!(view.category, FieldVisualCategory::Focused);
        assert_eq!(view.border_color(), Some(palette.primary));
    }

    #[test]
    fn error_message_is_shown_unless_disabled() {
        let presses = Cell::new(0);
        let view = field(&presses).error("Required").view().expect("view");
        assert_eq!(view.error_message.as_deref(), Some("Required"));
    }

    #[test]
    fn empty_error_counts_as_none() {
        let presses = Cell::new(0);
        let mut field = field(&presses).error("");
        assert!(!field.has_error());
        field.set_error(Some("Pick one"));
        assert!(field.has_error());
        field.set_error(None::<String>);
        assert_eq!(
            field.view().expect("view").category,
            FieldVisualCategory::Empty
        );
    }

    #[test]
    fn selected_key_is_resolved_through_options() {
        let presses = Cell::new(0);
        let mut field = field(&presses)
            .accessors(AccessorConfig::new().display("name").key("id"))
            .options([
                SelectableItem::from(json!({"id": 1, "name": "A"})),
                SelectableItem::from(json!({"id": 2, "name": "B"})),
            ])
            .item_value(json!({"id": 2}));

        let view = field.view().expect("view");
        assert_eq!(view.display.as_deref(), Some("B"));
        assert_eq!(view.category, FieldVisualCategory::HasValue);
        assert_eq!(view.label_mode, LabelMode::Floating);

        field.set_item_value(json!({"id": 99}));
        assert!(matches!(
            field.view(),
            Err(ResolveError::OptionNotFound { .. })
        ));
    }

    #[test]
    fn empty_supplied_options_fail_a_key_only_selection() {
        let presses = Cell::new(0);
        let mut field = field(&presses)
            .accessors(AccessorConfig::new().display("name").key("id"))
            .options(Vec::new())
            .item_value(json!({"id": 2}));

        assert_eq!(
            field.view(),
            Err(ResolveError::OptionNotFound {
                key_property: "id".to_string(),
                key: "2".to_string(),
            })
        );

        field.clear_options();
        let view = field.view().expect("view");
        assert_eq!(view.display, None);
        assert_eq!(view.category, FieldVisualCategory::Empty);
    }

    #[test]
    fn caller_styles_win_over_base_styles() {
        let presses = Cell::new(0);
        let view = field(&presses)
            .item_value("Chile")
            .input_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            .container_style(Style::default().bg(Color::Black))
            .view()
            .expect("view");

        assert_eq!(view.styles.input.fg, Some(Color::Yellow));
        assert!(view.styles.input.add_modifier.contains(Modifier::BOLD));
        assert_eq!(view.styles.container.bg, Some(Color::Black));
    }

    #[test]
    fn focused_and_erroring_fields_get_a_ring() {
        let presses = Cell::new(0);
        let palette = Palette::for_theme(ThemeName::Default);
        let mut field = field(&presses);
        assert_eq!(field.view().expect("view").styles.border.bg, None);

        field.set_error(Some("Required"));
        assert_eq!(
            field.view().expect("view").styles.border.bg,
            Some(palette.light_error)
        );

        field.focus();
        assert_eq!(
            field.view().expect("view").styles.border.bg,
            Some(palette.light_accent)
        );
    }
}
