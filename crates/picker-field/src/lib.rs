//! A read-only terminal form field that shows the current selection and asks its owner to
//! open a picker when pressed.

pub mod field;
pub mod item;
pub mod resolve;
pub mod theme;
pub mod visual;

mod text;

pub use field::{FieldStyles, FieldView, PickerField};
pub use item::{AccessorConfig, SelectableItem};
pub use resolve::{resolve_display_value, ResolveError};
pub use theme::{
    active_theme_name, apply_theme_name, next_theme_name, palette, parse_theme_name, theme_option,
    Palette, ThemeName,
};
pub use visual::{
    border_token, classify, ring_token, BorderColorToken, FieldVisualCategory, LabelMode,
    RingToken,
};
