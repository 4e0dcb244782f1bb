use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::{Backend, Storage};
use crate::syntax::Args;

use super::helpers::optional_kind;

/// Prints every record, or every record of one kind, as one list line:
/// `[<repr>, <repr>]`, `[]` when there is nothing to show.
pub fn run<B: Backend>(storage: &Storage<B>, args: &Args) -> Result<CmdResult> {
    let kind = optional_kind(args)?;
    let records: Vec<_> = storage.of_kind(kind).cloned().collect();

    let rendered = records
        .iter()
        .map(|record| record.to_string())
        .collect::<Vec<_>>()
        .join(", ");

    Ok(CmdResult::default()
        .with_line(format!("[{}]", rendered))
        .with_affected_records(records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CommandError, HbnbError};
    use crate::model::Kind;
    use crate::store::memory::fixtures::StoreFixture;

    fn args(kind: Option<&str>) -> Args {
        Args {
            kind: kind.map(String::from),
            ..Args::default()
        }
    }

    #[test]
    fn empty_registry_prints_empty_list() {
        let fixture = StoreFixture::new();
        let result = run(&fixture.storage, &args(None)).unwrap();
        assert_eq!(result.output, vec!["[]".to_string()]);
    }

    #[test]
    fn lists_every_record() {
        let fixture = StoreFixture::new()
            .with_records(Kind::User, 2)
            .with_records(Kind::City, 1);
        let result = run(&fixture.storage, &args(None)).unwrap();
        assert_eq!(result.affected_records.len(), 3);

        let line = &result.output[0];
        assert!(line.starts_with("[[City] ("));
        assert!(line.ends_with("}]"));
        assert_eq!(line.matches("[User] (").count(), 2);
    }

    #[test]
    fn filters_by_kind() {
        let fixture = StoreFixture::new()
            .with_records(Kind::User, 2)
            .with_records(Kind::City, 1);
        let result = run(&fixture.storage, &args(Some("City"))).unwrap();
        assert_eq!(result.affected_records.len(), 1);
        assert!(!result.output[0].contains("[User]"));

        let result = run(&fixture.storage, &args(Some("Review"))).unwrap();
        assert_eq!(result.output, vec!["[]".to_string()]);
    }

    #[test]
    fn unknown_kind() {
        let fixture = StoreFixture::new();
        assert!(matches!(
            run(&fixture.storage, &args(Some("Spaceship"))),
            Err(HbnbError::Command(CommandError::UnknownClass))
        ));
    }
}
