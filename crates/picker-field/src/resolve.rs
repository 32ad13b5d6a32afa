use serde_json::Value;
use thiserror::Error;

use crate::item::{stringify_value, AccessorConfig, SelectableItem};

/// The selected item is inconsistent with the options it is supposed to come from.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("no option has `{key_property}` equal to {key}")]
    OptionNotFound { key_property: String, key: String },
    #[error("selected item has no `{key_property}` field to look up its option")]
    MissingKey { key_property: String },
}

/// Computes the text shown for `item`.
///
/// A record's own display field always wins. When the record only carries its key, the
/// matching entry of `options` supplies the text; once options are supplied, a key that
/// matches nothing is an error rather than a blank field, even when the list is empty.
/// Primitive items are shown as-is.
pub fn resolve_display_value(
    item: &SelectableItem,
    accessors: &AccessorConfig,
    options: Option<&[SelectableItem]>,
) -> Result<Option<String>, ResolveError> {
    let record = match item {
        SelectableItem::Empty => return Ok(None),
        SelectableItem::Primitive(text) => return Ok(Some(text.clone())),
        SelectableItem::Structured(record) => record,
    };

    let Some(display_property) = accessors.display_property.as_deref() else {
        log::warn!("structured item has no display property configured; showing nothing");
        return Ok(None);
    };

    if let Some(value) = record.get(display_property) {
        return Ok(Some(stringify_value(value)));
    }

    let Some(key_property) = accessors.key_property.as_deref() else {
        log::warn!("structured item lacks `{display_property}` and no key property is set");
        return Ok(None);
    };
    let Some(options) = options else {
        log::warn!("structured item lacks `{display_property}` and no options were supplied");
        return Ok(None);
    };

    let key = record
        .get(key_property)
        .ok_or_else(|| ResolveError::MissingKey {
            key_property: key_property.to_string(),
        })?;
    let matched = find_option(options, key_property, key).ok_or_else(|| {
        log::error!("selected key {key} for `{key_property}` matches no option");
        ResolveError::OptionNotFound {
            key_property: key_property.to_string(),
            key: key.to_string(),
        }
    })?;

    Ok(matched.field(display_property).map(stringify_value))
}

fn find_option<'o>(
    options: &'o [SelectableItem],
    key_property: &str,
    key: &Value,
) -> Option<&'o SelectableItem> {
    options
        .iter()
        .find(|option| option.field(key_property) == Some(key))
}
