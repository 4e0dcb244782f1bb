use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::{Backend, Storage};
use crate::syntax::Args;

use super::helpers::require_record;

pub fn run<B: Backend>(storage: &Storage<B>, args: &Args) -> Result<CmdResult> {
    let record = require_record(storage, args)?;
    Ok(CmdResult::default()
        .with_line(record.to_string())
        .with_affected_records(vec![record.clone()]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CommandError, HbnbError};
    use crate::model::{Kind, Record};
    use crate::store::memory::fixtures::StoreFixture;
    use serde_json::json;

    fn args(kind: &str, id: Option<&str>) -> Args {
        Args {
            kind: Some(kind.to_string()),
            id: id.map(String::from),
            ..Args::default()
        }
    }

    #[test]
    fn prints_the_record_representation() {
        let mut fixture = StoreFixture::new();
        let id = fixture.insert(Kind::User, &[("first_name", json!("Ann"))]);

        let result = run(&fixture.storage, &args("User", Some(&id))).unwrap();
        let record = fixture.storage.get(Kind::User, &id).unwrap();
        assert_eq!(result.output, vec![record.to_string()]);
        assert!(result.output[0].starts_with(&format!("[User] ({})", id)));
    }

    #[test]
    fn kind_must_match() {
        let mut fixture = StoreFixture::new();
        let id = fixture.insert(Kind::User, &[]);
        assert!(matches!(
            run(&fixture.storage, &args("City", Some(&id))),
            Err(HbnbError::Command(CommandError::InstanceNotFound))
        ));
    }

    #[test]
    fn reports_the_shown_record() {
        let mut place = Record::new(Kind::Place);
        place.set("max_guest", json!(4));
        let fixture = StoreFixture::new()
            .with_records(Kind::Place, 2)
            .with_record(place.clone());

        let result = run(&fixture.storage, &args("Place", Some(place.id()))).unwrap();
        assert_eq!(result.affected_records, vec![place]);
    }

    #[test]
    fn missing_id() {
        let fixture = StoreFixture::new();
        assert!(matches!(
            run(&fixture.storage, &args("BaseModel", None)),
            Err(HbnbError::Command(CommandError::MissingId))
        ));
    }
}
