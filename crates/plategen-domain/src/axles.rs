//! Fixed four-slot axle layout of the plate.

use serde::Serialize;

use crate::error::{PayloadError, Result};
use crate::field::{format_field, AxleLeaf};
use crate::vehicle::Axle;

/// Number of axle slots printed on a plate.
pub const AXLE_SLOTS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AxleWeightLeaves {
    pub gb_weight: AxleLeaf,
    pub eec_weight: AxleLeaf,
    pub design_weight: AxleLeaf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AxleTyreLeaves {
    pub tyre_size: AxleLeaf,
    pub ply_rating: AxleLeaf,
    pub fitment_code: AxleLeaf,
}

/// One `AxleN` group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AxleGroup {
    pub weights: AxleWeightLeaves,
    pub tyres: AxleTyreLeaves,
}

impl AxleGroup {
    /// A padding group: every leaf is an empty string.
    pub fn empty() -> Self {
        Self {
            weights: AxleWeightLeaves {
                gb_weight: AxleLeaf::Empty,
                eec_weight: AxleLeaf::Empty,
                design_weight: AxleLeaf::Empty,
            },
            tyres: AxleTyreLeaves {
                tyre_size: AxleLeaf::Empty,
                ply_rating: AxleLeaf::Empty,
                fitment_code: AxleLeaf::Empty,
            },
        }
    }

    fn from_axle(axle: &Axle) -> Self {
        Self {
            weights: AxleWeightLeaves {
                gb_weight: AxleLeaf::of(&axle.weights.gb_weight),
                eec_weight: format_field(axle.weights.eec_weight.as_ref()).into(),
                design_weight: AxleLeaf::of(&axle.weights.design_weight),
            },
            tyres: AxleTyreLeaves {
                tyre_size: AxleLeaf::of(&axle.tyres.tyre_size),
                ply_rating: AxleLeaf::of(&axle.tyres.ply_rating),
                fitment_code: AxleLeaf::of(&axle.tyres.fitment_code),
            },
        }
    }

    pub fn leaves(&self) -> [&AxleLeaf; 6] {
        [
            &self.weights.gb_weight,
            &self.weights.eec_weight,
            &self.weights.design_weight,
            &self.tyres.tyre_size,
            &self.tyres.ply_rating,
            &self.tyres.fitment_code,
        ]
    }

    pub fn is_padding(&self) -> bool {
        self.leaves().iter().all(|leaf| leaf.is_empty())
    }
}

/// The `Axles` block: always exactly four groups, in slot order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AxleGroups {
    pub axle1: AxleGroup,
    pub axle2: AxleGroup,
    pub axle3: AxleGroup,
    pub axle4: AxleGroup,
}

impl AxleGroups {
    pub fn slots(&self) -> [&AxleGroup; AXLE_SLOTS] {
        [&self.axle1, &self.axle2, &self.axle3, &self.axle4]
    }
}

/// Lay `axles` out over the four plate slots, padding unused ones.
///
/// Fails with [`PayloadError::TooManyAxles`] rather than dropping axles that
/// do not fit.
pub fn map_axles(axles: &[Axle]) -> Result<AxleGroups> {
    if axles.len() > AXLE_SLOTS {
        return Err(PayloadError::TooManyAxles {
            count: axles.len(),
            max: AXLE_SLOTS,
        });
    }

    let [axle1, axle2, axle3, axle4]: [AxleGroup; AXLE_SLOTS] = std::array::from_fn(|slot| {
        axles
            .get(slot)
            .map(AxleGroup::from_axle)
            .unwrap_or_else(AxleGroup::empty)
    });

    Ok(AxleGroups {
        axle1,
        axle2,
        axle3,
        axle4,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn axle(eec: Option<i64>) -> Axle {
        serde_json::from_value(json!({
            "axleNumber": 1,
            "weights": {"gbWeight": 7100, "eecWeight": eec, "designWeight": 7500},
            "tyres": {"tyreSize": "295/80-22.5", "plyRating": "A", "fitmentCode": "single"}
        }))
        .unwrap()
    }

    #[test]
    fn always_four_groups() {
        for k in 0..=AXLE_SLOTS {
            let axles = vec![axle(Some(7000)); k];
            let groups = map_axles(&axles).unwrap();
            let padded = groups.slots().iter().filter(|g| g.is_padding()).count();
            assert_eq!(padded, AXLE_SLOTS - k, "with {} axles", k);
            for group in &groups.slots()[..k] {
                assert!(group.leaves().iter().all(|leaf| !leaf.is_empty()));
            }
        }
    }

    #[test]
    fn populated_slot_renders_strings() {
        let groups = map_axles(&[axle(Some(7000))]).unwrap();
        assert_eq!(
            serde_json::to_value(&groups.axle1).unwrap(),
            json!({
                "Weights": {"GbWeight": "7100", "EecWeight": "7000", "DesignWeight": "7500"},
                "Tyres": {"TyreSize": "295/80-22.5", "PlyRating": "A", "FitmentCode": "single"}
            })
        );
    }

    #[test]
    fn missing_eec_weight_is_an_empty_leaf() {
        let groups = map_axles(&[axle(None)]).unwrap();
        assert_eq!(groups.axle1.weights.eec_weight, AxleLeaf::Empty);
        assert_eq!(
            serde_json::to_value(&groups.axle1.weights).unwrap()["EecWeight"],
            json!("")
        );
    }

    #[test]
    fn padding_keeps_every_key() {
        let groups = map_axles(&[]).unwrap();
        assert_eq!(
            serde_json::to_value(&groups.axle4).unwrap(),
            json!({
                "Weights": {"GbWeight": "", "EecWeight": "", "DesignWeight": ""},
                "Tyres": {"TyreSize": "", "PlyRating": "", "FitmentCode": ""}
            })
        );
    }

    #[test]
    fn more_than_four_axles_is_rejected() {
        let axles = vec![axle(Some(1)); 5];
        let err = map_axles(&axles).unwrap_err();
        assert!(matches!(
            err,
            PayloadError::TooManyAxles { count: 5, max: 4 }
        ));
    }
}
