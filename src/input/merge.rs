use std::fs;
use std::path::Path;

use serde_json::Value;
use serde_json::map::Entry;

use crate::input::{DatasetError, reader};

/// Folds an updates document into a base document of the keyed layout.
/// Models only present in the updates are added whole; for models present
/// in both, keys merge one level deep (temperatures merge per-temperature,
/// any other value overwrites wholesale). Operates on raw JSON so documents
/// that do not validate as datasets still merge.
pub fn merge_documents(base: &mut Value, updates: Value) -> Result<(), DatasetError> {
    let Some(base_map) = base.as_object_mut() else {
        return Err(DatasetError::InvalidInput(
            "base document is not a JSON object".to_string(),
        ));
    };
    let Value::Object(updates_map) = updates else {
        return Err(DatasetError::InvalidInput(
            "updates document is not a JSON object".to_string(),
        ));
    };

    for (model, update) in updates_map {
        match base_map.entry(model) {
            Entry::Vacant(slot) => {
                slot.insert(update);
            }
            Entry::Occupied(mut slot) => merge_model(slot.get_mut(), update),
        }
    }

    Ok(())
}

fn merge_model(existing: &mut Value, update: Value) {
    let update_obj = match update {
        Value::Object(obj) => obj,
        other => {
            *existing = other;
            return;
        }
    };
    let Some(existing_obj) = existing.as_object_mut() else {
        *existing = Value::Object(update_obj);
        return;
    };
    for (key, val) in update_obj {
        let nested = val.is_object() && existing_obj.get(&key).is_some_and(Value::is_object);
        if nested {
            if let (Some(Value::Object(target)), Value::Object(sub)) =
                (existing_obj.get_mut(&key), val)
            {
                for (sub_key, sub_val) in sub {
                    target.insert(sub_key, sub_val);
                }
            }
        } else {
            existing_obj.insert(key, val);
        }
    }
}

pub fn merge_files(base: &Path, updates: &Path, out: &Path) -> Result<(), DatasetError> {
    let mut base_doc: Value = serde_json::from_reader(reader::open_maybe_gz(base)?)
        .map_err(|e| DatasetError::Parse(format!("{}: {}", base.display(), e)))?;
    let updates_doc: Value = serde_json::from_reader(reader::open_maybe_gz(updates)?)
        .map_err(|e| DatasetError::Parse(format!("{}: {}", updates.display(), e)))?;

    merge_documents(&mut base_doc, updates_doc)?;

    let mut text = serde_json::to_string_pretty(&base_doc)
        .map_err(|e| DatasetError::InvalidInput(format!("merged document: {}", e)))?;
    text.push('\n');
    fs::write(out, text)?;

    tracing::info!(
        "merged {} into {} -> {}",
        updates.display(),
        base.display(),
        out.display()
    );
    Ok(())
}
