//! Vehicle-type gated field visibility.
//!
//! Some plate fields only mean something for one vehicle type. The
//! applicability of each is declared once in [`GatedField::applies_to`];
//! everything else goes through [`map_field`].

use crate::field::{format_field, Field};
use crate::vehicle::{Scalar, TechRecord, VehicleType};

/// Plate fields whose visibility depends on the vehicle type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GatedField {
    SpeedLimiterMrk,
    FrontAxleTo5thWheelCouplingMin,
    FrontAxleTo5thWheelCouplingMax,
    MaxLoadOnCoupling,
    CouplingCenterToRearTrlMin,
    CouplingCenterToRearTrlMax,
}

impl GatedField {
    pub const ALL: [GatedField; 6] = [
        GatedField::SpeedLimiterMrk,
        GatedField::FrontAxleTo5thWheelCouplingMin,
        GatedField::FrontAxleTo5thWheelCouplingMax,
        GatedField::MaxLoadOnCoupling,
        GatedField::CouplingCenterToRearTrlMin,
        GatedField::CouplingCenterToRearTrlMax,
    ];

    /// The only vehicle type this field is printed for.
    pub const fn applies_to(self) -> VehicleType {
        match self {
            GatedField::SpeedLimiterMrk
            | GatedField::FrontAxleTo5thWheelCouplingMin
            | GatedField::FrontAxleTo5thWheelCouplingMax => VehicleType::Hgv,
            GatedField::MaxLoadOnCoupling
            | GatedField::CouplingCenterToRearTrlMin
            | GatedField::CouplingCenterToRearTrlMax => VehicleType::Trl,
        }
    }

    /// Key of the field inside `PLATES_DATA`.
    pub const fn payload_key(self) -> &'static str {
        match self {
            GatedField::SpeedLimiterMrk => "SpeedLimiterMrk",
            GatedField::FrontAxleTo5thWheelCouplingMin => "FrontAxleTo5thWheelCouplingMin",
            GatedField::FrontAxleTo5thWheelCouplingMax => "FrontAxleTo5thWheelCouplingMax",
            GatedField::MaxLoadOnCoupling => "MaxLoadOnCoupling",
            GatedField::CouplingCenterToRearTrlMin => "CouplingCenterToRearTrlMin",
            GatedField::CouplingCenterToRearTrlMax => "CouplingCenterToRearTrlMax",
        }
    }

    /// Render this field's value for `record`, gated by vehicle type.
    pub fn resolve(self, record: &TechRecord) -> Field {
        let value = match self {
            GatedField::SpeedLimiterMrk => speed_limiter_marking(record.speed_limiter_mrk),
            GatedField::FrontAxleTo5thWheelCouplingMin => {
                scalar(&record.front_axle_to_5th_wheel_coupling_min)
            }
            GatedField::FrontAxleTo5thWheelCouplingMax => {
                scalar(&record.front_axle_to_5th_wheel_coupling_max)
            }
            GatedField::MaxLoadOnCoupling => scalar(&record.max_load_on_coupling),
            GatedField::CouplingCenterToRearTrlMin => scalar(&record.coupling_center_to_rear_trl_min),
            GatedField::CouplingCenterToRearTrlMax => scalar(&record.coupling_center_to_rear_trl_max),
        };
        map_field(record.vehicle_type, self.applies_to(), value)
    }
}

fn scalar(value: &Option<Scalar>) -> Field {
    format_field(value.as_ref())
}

/// Keep `value` only when the record's type is `target`.
pub fn map_field(record_type: VehicleType, target: VehicleType, value: Field) -> Field {
    if record_type == target {
        value
    } else {
        Field::Omitted
    }
}

/// Speed limiter marking is printed as "Yes"/"No"; a missing flag reads "No".
pub fn speed_limiter_marking(flag: Option<bool>) -> Field {
    let text = if flag.unwrap_or(false) { "Yes" } else { "No" };
    Field::Value(text.to_string())
}
