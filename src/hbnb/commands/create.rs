use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::Record;
use crate::store::{Backend, Storage};
use crate::syntax::Args;
use tracing::debug;

use super::helpers::require_kind;

pub fn run<B: Backend>(storage: &mut Storage<B>, args: &Args) -> Result<CmdResult> {
    let kind = require_kind(args)?;

    let record = Record::new(kind);
    let id = record.id().to_string();
    storage.register(record.clone());
    storage.persist()?;
    debug!(key = %record.key(), "record created");

    Ok(CmdResult::default()
        .with_line(id)
        .with_affected_records(vec![record]))
}
