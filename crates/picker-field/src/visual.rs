#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldVisualCategory {
    Focused,
    ErrorPresent,
    HasValue,
    Empty,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BorderColorToken {
    Primary,
    Error,
    NeutralFilled,
    NeutralEmpty,
}

/// Highlight drawn behind the border when the field needs attention.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RingToken {
    LightAccent,
    LightError,
}

/// Where the label sits: inside the field like a placeholder, or shrunk into the top border.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelMode {
    Resting,
    Floating,
}

/// Focus wins over an error, an error wins over a value.
pub fn classify(is_focused: bool, has_error: bool, has_value: bool) -> FieldVisualCategory {
    if is_focused {
        FieldVisualCategory::Focused
    } else if has_error {
        FieldVisualCategory::ErrorPresent
    } else if has_value {
        FieldVisualCategory::HasValue
    } else {
        FieldVisualCategory::Empty
    }
}

pub fn border_token(category: FieldVisualCategory) -> BorderColorToken {
    match category {
        FieldVisualCategory::Focused => BorderColorToken::Primary,
        FieldVisualCategory::ErrorPresent => BorderColorToken::Error,
        FieldVisualCategory::HasValue => BorderColorToken::NeutralFilled,
        FieldVisualCategory::Empty => BorderColorToken::NeutralEmpty,
    }
}

pub fn ring_token(is_focused: bool, has_error: bool) -> Option<RingToken> {
    if is_focused {
        Some(RingToken::LightAccent)
    } else if has_error {
        Some(RingToken::LightError)
    } else {
        None
    }
}

impl LabelMode {
    pub fn for_state(is_focused: bool, has_value: bool) -> Self {
        if is_focused || has_value {
            Self::Floating
        } else {
            Self::Resting
        }
    }
}
