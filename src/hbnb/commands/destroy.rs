use crate::commands::CmdResult;
use crate::error::{CommandError, Result};
use crate::store::{Backend, Storage};
use crate::syntax::Args;
use tracing::debug;

use super::helpers::{require_id, require_kind};

pub fn run<B: Backend>(storage: &mut Storage<B>, args: &Args) -> Result<CmdResult> {
    let kind = require_kind(args)?;
    let id = require_id(args)?;

    let record = storage
        .remove(kind, id)
        .ok_or(CommandError::InstanceNotFound)?;
    storage.persist()?;
    debug!(key = %record.key(), "record destroyed");

    Ok(CmdResult::default().with_affected_records(vec![record]))
}
