//! Shared argument validation.
//!
//! The order is fixed: class name, class, id, instance, attribute name,
//! value. Commands call these in that order and stop at the first failure.

use crate::error::{CommandError, Result};
use crate::model::{Kind, Record};
use crate::store::{Backend, Storage};
use crate::syntax::Args;

pub fn require_kind(args: &Args) -> Result<Kind> {
    let name = args.kind.as_deref().ok_or(CommandError::MissingClassName)?;
    Ok(name.parse::<Kind>()?)
}

/// Like [`require_kind`], but an absent class name means "every kind".
pub fn optional_kind(args: &Args) -> Result<Option<Kind>> {
    Ok(args.kind.as_deref().map(str::parse::<Kind>).transpose()?)
}

pub fn require_id(args: &Args) -> Result<&str> {
    Ok(args.id.as_deref().ok_or(CommandError::MissingId)?)
}

/// Resolves class, id and instance, in that order.
pub fn require_record<'s, B: Backend>(
    storage: &'s Storage<B>,
    args: &Args,
) -> Result<&'s Record> {
    let kind = require_kind(args)?;
    let id = require_id(args)?;
    Ok(storage
        .get(kind, id)
        .ok_or(CommandError::InstanceNotFound)?)
}
