use picker_field::{AccessorConfig, SelectableItem};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Paragraph, Widget};
use serde_json::{Map, Value};

#[derive(Clone, Debug, PartialEq)]
pub struct PickerEntry {
    pub key: Value,
    pub label: String,
}

/// The owner-side picker the demo opens when the field is pressed.
#[derive(Clone, Debug, PartialEq)]
pub struct ListPicker {
    title: String,
    key_property: String,
    entries: Vec<PickerEntry>,
    selected: usize,
    current: Option<Value>,
}

impl ListPicker {
    /// Lists the structured options that carry both accessor fields.
    pub fn from_options(
        title: impl Into<String>,
        options: &[SelectableItem],
        accessors: &AccessorConfig,
    ) -> Self {
        let key_property = accessors.key_property.clone().unwrap_or_default();
        let display_property = accessors.display_property.as_deref().unwrap_or_default();
        let entries = options
            .iter()
            .filter_map(|option| {
                let key = option.field(&key_property)?;
                let label = match option.field(display_property)? {
                    Value::String(text) => text.clone(),
                    other => other.to_string(),
                };
                Some(PickerEntry {
                    key: key.clone(),
                    label,
                })
            })
            .collect();
        Self {
            title: title.into(),
            key_property,
            entries,
            selected: 0,
            current: None,
        }
    }

    /// Marks the entry for the field's current selection and moves the cursor onto it.
    pub fn with_current(mut self, item: &SelectableItem) -> Self {
        self.current = item.field(&self.key_property).cloned();
        if let Some(index) = self
            .entries
            .iter()
            .position(|entry| Some(&entry.key) == self.current.as_ref())
        {
            self.selected = index;
        }
        self
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.selected + 1 < self.entries.len() {
            self.selected += 1;
        }
    }

    pub fn chosen(&self) -> Option<&PickerEntry> {
        self.entries.get(self.selected)
    }

    /// The record pushed back into the field: only the key, so the field looks the
    /// label up in its options.
    pub fn chosen_record(&self) -> Option<Map<String, Value>> {
        let entry = self.chosen()?;
        let mut record = Map::new();
        record.insert(self.key_property.clone(), entry.key.clone());
        Some(record)
    }

    fn lines(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|entry| {
                let is_current = self.current.as_ref() == Some(&entry.key);
                let marker = if is_current { "*" } else { " " };
                format!("{marker} {}", entry.label)
            })
            .collect()
    }
}

impl Widget for &ListPicker {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title(format!(" {} ", self.title));
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height == 0 {
            return;
        }

        let visible = inner.height as usize;
        let start = (self.selected + 1).saturating_sub(visible);
        let lines: Vec<Line> = self
            .lines()
            .into_iter()
            .enumerate()
            .skip(start)
            .take(visible)
            .map(|(index, text)| {
                if index == self.selected {
                    Line::styled(text, Style::default().add_modifier(Modifier::REVERSED))
                } else {
                    Line::raw(text)
                }
            })
            .collect();
        Paragraph::new(lines).render(inner, buf);
    }
}
