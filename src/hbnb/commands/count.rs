use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::{Backend, Storage};
use crate::syntax::Args;

use super::helpers::require_kind;

/// Class name that counts every kind.
pub const ALL_KINDS: &str = "all";

pub fn run<B: Backend>(storage: &Storage<B>, args: &Args) -> Result<CmdResult> {
    let kind = match args.kind.as_deref() {
        Some(ALL_KINDS) => None,
        _ => Some(require_kind(args)?),
    };
    Ok(CmdResult::default().with_line(storage.count(kind).to_string()))
}
