//! Part-level and metadata operations.
//!
//! Parts are only ever appended or removed from the end, so a test edited
//! through these operations keeps the ordinal sequence 1..N.

use std::sync::Arc;

use exam_model::{Part, PartOrdinal, Test};
use tracing::debug;

use super::{part_index, with_part};
use crate::error::{EditError, Result};
use crate::patch::MetadataPatch;

/// Append the part after the current last one, empty and shaped by policy.
pub fn add_part(test: &Test) -> Result<Test> {
    let ordinal = match test.last_ordinal() {
        None => PartOrdinal::FIRST,
        Some(last) => last
            .next()
            .ok_or(EditError::PartLimitReached(PartOrdinal::LAST.get()))?,
    };
    let mut next = test.clone();
    next.parts.push(Arc::new(Part::new(ordinal)));
    debug!(part = ordinal.get(), kind = %ordinal.shape().kind, "added part");
    Ok(next)
}

/// Append every missing part up to and including `ordinal`.
///
/// Returns an equal test when the part already exists.
pub fn ensure_parts_through(test: &Test, ordinal: PartOrdinal) -> Result<Test> {
    let mut next = test.clone();
    while next.last_ordinal().is_none_or(|last| last < ordinal) {
        next = add_part(&next)?;
    }
    Ok(next)
}

/// Change the display name of a part. Names reading "Part N" must use the
/// part's own number.
pub fn rename_part(test: &Test, part: PartOrdinal, name: impl Into<String>) -> Result<Test> {
    let index = part_index(test, part)?;
    let name = name.into();
    if part.name_conflicts(&name) {
        return Err(EditError::PartNameMismatch {
            part: part.get(),
            name,
        });
    }
    with_part(test, index, |node| {
        node.name = name;
        Ok(())
    })
}

/// Remove the last part with all of its content.
pub fn remove_last_part(test: &Test) -> Result<Test> {
    let mut next = test.clone();
    let removed = next.parts.pop().ok_or(EditError::NoParts)?;
    debug!(part = removed.ordinal.get(), "removed last part");
    Ok(next)
}

/// Update title, kind, duration or declared counts.
pub fn update_metadata(test: &Test, patch: &MetadataPatch) -> Result<Test> {
    let mut next = test.clone();
    patch.apply_to(&mut next)?;
    Ok(next)
}

#[cfg(test)]
mod tests {
    use exam_model::PartKind;

    use super::*;

    #[test]
    fn parts_are_appended_in_order() {
        let test = Test::new("Sample", 120).unwrap();
        let test = add_part(&test).unwrap();
        let test = add_part(&test).unwrap();
        let ordinals: Vec<u8> = test.parts.iter().map(|part| part.ordinal.get()).collect();
        assert_eq!(ordinals, vec![1, 2]);
        assert_eq!(test.parts[1].name, "Part 2");
    }

    #[test]
    fn ensure_parts_is_idempotent_and_bounded() {
        let test = Test::new("Sample", 120).unwrap();
        let full = ensure_parts_through(&test, PartOrdinal::LAST).unwrap();
        assert_eq!(full.parts.len(), 7);
        assert_eq!(full.parts[5].kind(), PartKind::Grouped);
        assert_eq!(
            ensure_parts_through(&full, PartOrdinal::new(3).unwrap()).unwrap(),
            full
        );
        assert_eq!(add_part(&full), Err(EditError::PartLimitReached(7)));
    }

    #[test]
    fn remove_last_part_on_empty_test() {
        let test = Test::new("Sample", 120).unwrap();
        assert_eq!(remove_last_part(&test), Err(EditError::NoParts));
        let one = add_part(&test).unwrap();
        assert_eq!(remove_last_part(&one).unwrap(), test);
    }

    #[test]
    fn rename_keeps_ordinal() {
        let test = ensure_parts_through(
            &Test::new("Sample", 120).unwrap(),
            PartOrdinal::new(2).unwrap(),
        )
        .unwrap();
        let renamed =
            rename_part(&test, PartOrdinal::new(2).unwrap(), "Question-Response").unwrap();
        assert_eq!(renamed.parts[1].name, "Question-Response");
        assert_eq!(renamed.parts[1].ordinal.get(), 2);
        assert!(Arc::ptr_eq(&test.parts[0], &renamed.parts[0]));
    }

    #[test]
    fn rename_rejects_another_part_number() {
        let test = ensure_parts_through(
            &Test::new("Sample", 120).unwrap(),
            PartOrdinal::new(2).unwrap(),
        )
        .unwrap();
        assert_eq!(
            rename_part(&test, PartOrdinal::new(2).unwrap(), "Part 5"),
            Err(EditError::PartNameMismatch {
                part: 2,
                name: "Part 5".into(),
            })
        );
        let renamed =
            rename_part(&test, PartOrdinal::new(2).unwrap(), "Part 2: Responses").unwrap();
        assert_eq!(renamed.parts[1].name, "Part 2: Responses");
    }
}
