use crate::commands::CmdResult;
use crate::error::{CommandError, Result};
use crate::store::{Backend, Storage};
use crate::syntax::{Args, Payload};
use serde_json::Value;
use tracing::debug;

use super::helpers::{require_id, require_kind};

/// Sets one attribute, or every pair of an inline object, then persists.
///
/// Values are coerced through [`Kind::coerce`](crate::model::Kind::coerce).
/// Protected names (`id`, timestamps, `__class__`) are skipped silently.
pub fn run<B: Backend>(storage: &mut Storage<B>, args: &Args) -> Result<CmdResult> {
    let kind = require_kind(args)?;
    let id = require_id(args)?;
    if storage.get(kind, id).is_none() {
        return Err(CommandError::InstanceNotFound.into());
    }

    let changes: Vec<(String, Value)> = match &args.payload {
        Payload::Object(object) => object
            .iter()
            .map(|(name, value)| (name.clone(), kind.coerce(name, &value_text(value))))
            .collect(),
        Payload::Attribute { name, value } => {
            let name = name.as_deref().ok_or(CommandError::MissingAttributeName)?;
            let value = value.as_deref().ok_or(CommandError::MissingValue)?;
            vec![(name.to_string(), kind.coerce(name, value))]
        }
    };

    let record = storage
        .get_mut(kind, id)
        .ok_or(CommandError::InstanceNotFound)?;
    for (name, value) in changes {
        if !record.set(&name, value) {
            debug!(attribute = %name, "refusing to overwrite protected attribute");
        }
    }
    record.touch();
    let record = record.clone();

    storage.persist()?;
    debug!(key = %record.key(), "record updated");

    Ok(CmdResult::default().with_affected_records(vec![record]))
}

/// Inline-object values go through the same coercion as typed text.
fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
