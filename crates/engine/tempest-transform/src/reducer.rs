//! Single dispatch point from a configured [`Transform`] to its operator.

use tempest_core::{Error, Field, Result, Selection};

use crate::ops;
use crate::transform::{BeamMode, Transform};

/// Apply `transform` to `field`, resolving anchor and target from
/// `selection` (the oldest selected index).
///
/// Parameters are clamped into range first. On error the input field is
/// untouched, since operators never mutate it.
pub fn apply(field: &Field, transform: &Transform, selection: &Selection) -> Result<Field> {
    let transform = transform.clamped();

    let required = transform.required_selection();
    let chosen = if required > 0 {
        let index = selection.first().ok_or(Error::MissingSelection {
            transform: transform.kind(),
            required,
        })?;
        field.check_index(index)?;
        Some(index)
    } else {
        None
    };

    match (transform, chosen) {
        (Transform::Stabilize { strength }, _) => Ok(ops::stabilize(field, strength)),
        (Transform::Beam { mode: BeamMode::Auto }, _) => Ok(ops::beam_auto(field)),
        (
            Transform::Beam {
                mode: BeamMode::Selected,
            },
            Some(target),
        ) => ops::beam_selected(field, target),
        (Transform::Magnetize { pull }, Some(anchor)) => ops::magnetize(field, anchor, pull),
        (Transform::Rotate { degrees }, _) => Ok(ops::rotate(field, degrees)),
        (Transform::Spread { amount }, Some(anchor)) => ops::spread(field, anchor, amount),
        (t, None) => Err(Error::MissingSelection {
            transform: t.kind(),
            required,
        }),
    }
}
