//! VTG6/VTG7 plate payload derivation.

use serde::Serialize;

use crate::axles::{map_axles, AxleGroups};
use crate::error::Result;
use crate::field::{format_field, Field};
use crate::policy::GatedField;
use crate::vehicle::{Scalar, VehicleRecord};

/// Watermark printed on every certificate generated outside production.
pub const WATERMARK_NOT_VALID: &str = "NOT VALID";

/// Branch name that identifies the production deployment.
pub const PRODUCTION_BRANCH: &str = "prod";

/// Deployment the service runs in. Drives the certificate watermark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Deployment {
    Production,
    #[default]
    NonProduction,
}

impl Deployment {
    pub fn from_branch(branch: Option<&str>) -> Self {
        match branch {
            Some(PRODUCTION_BRANCH) => Deployment::Production,
            _ => Deployment::NonProduction,
        }
    }

    pub fn watermark(self) -> &'static str {
        match self {
            Deployment::Production => "",
            Deployment::NonProduction => WATERMARK_NOT_VALID,
        }
    }
}

/// The document service request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CertificatePayload {
    #[serde(rename = "Watermark")]
    pub watermark: String,
    #[serde(rename = "PLATES_DATA")]
    pub plates_data: PlatesData,
}

/// Flat plate fields. Omitted fields never reach the serialized payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PlatesData {
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub plate_serial_number: Field,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub dtp_number: Field,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub primary_vrm: Field,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub vin: Field,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub variant_number: Field,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub approval_type_number: Field,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub make: Field,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub model: Field,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub speed_limiter_mrk: Field,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub function_code: Field,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub regn_date: Field,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub manufacture_year: Field,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub gross_gb_weight: Field,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub gross_eec_weight: Field,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub gross_design_weight: Field,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub train_gb_weight: Field,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub train_eec_weight: Field,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub train_design_weight: Field,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub max_train_gb_weight: Field,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub max_train_eec_weight: Field,
    pub axles: AxleGroups,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub max_load_on_coupling: Field,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub dimension_length: Field,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub dimension_width: Field,
    #[serde(
        rename = "FrontAxleTo5thWheelCouplingMin",
        skip_serializing_if = "Field::is_omitted"
    )]
    pub front_axle_to_5th_wheel_coupling_min: Field,
    #[serde(
        rename = "FrontAxleTo5thWheelCouplingMax",
        skip_serializing_if = "Field::is_omitted"
    )]
    pub front_axle_to_5th_wheel_coupling_max: Field,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub coupling_center_to_rear_trl_max: Field,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub coupling_center_to_rear_trl_min: Field,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub plate_issue_date: Field,
    #[serde(skip_serializing_if = "Field::is_omitted")]
    pub tyre_use_code: Field,
}

fn scalar(value: &Option<Scalar>) -> Field {
    format_field(value.as_ref())
}

fn text(value: Option<&str>) -> Field {
    format_field(value)
}

/// Builds plate payloads for one deployment.
#[derive(Debug, Clone, Copy, Default)]
pub struct PayloadBuilder {
    deployment: Deployment,
}

impl PayloadBuilder {
    pub fn new(deployment: Deployment) -> Self {
        Self { deployment }
    }

    pub fn deployment(&self) -> Deployment {
        self.deployment
    }

    /// Derive the payload from the vehicle's current technical record.
    pub fn build(&self, vehicle: &VehicleRecord) -> Result<CertificatePayload> {
        let record = vehicle.current()?;

        let plates_data = PlatesData {
            plate_serial_number: text(Some(record.plates.plate_serial_number.as_str())),
            dtp_number: scalar(&record.brakes.dtp_number),
            primary_vrm: text(vehicle.primary_vrm.as_deref()),
            vin: text(Some(vehicle.vin.as_str())),
            variant_number: scalar(&record.variant_number),
            approval_type_number: scalar(&record.approval_type_number),
            make: scalar(&record.make),
            model: scalar(&record.model),
            speed_limiter_mrk: GatedField::SpeedLimiterMrk.resolve(record),
            function_code: scalar(&record.function_code),
            regn_date: scalar(&record.regn_date),
            manufacture_year: scalar(&record.manufacture_year),
            gross_gb_weight: scalar(&record.gross_gb_weight),
            gross_eec_weight: scalar(&record.gross_eec_weight),
            gross_design_weight: scalar(&record.gross_design_weight),
            train_gb_weight: scalar(&record.train_gb_weight),
            train_eec_weight: scalar(&record.train_eec_weight),
            train_design_weight: scalar(&record.train_design_weight),
            max_train_gb_weight: scalar(&record.max_train_gb_weight),
            max_train_eec_weight: scalar(&record.max_train_eec_weight),
            axles: map_axles(&record.axles)?,
            max_load_on_coupling: GatedField::MaxLoadOnCoupling.resolve(record),
            dimension_length: scalar(&record.dimensions.length),
            dimension_width: scalar(&record.dimensions.width),
            front_axle_to_5th_wheel_coupling_min: GatedField::FrontAxleTo5thWheelCouplingMin
                .resolve(record),
            front_axle_to_5th_wheel_coupling_max: GatedField::FrontAxleTo5thWheelCouplingMax
                .resolve(record),
            coupling_center_to_rear_trl_max: GatedField::CouplingCenterToRearTrlMax.resolve(record),
            coupling_center_to_rear_trl_min: GatedField::CouplingCenterToRearTrlMin.resolve(record),
            plate_issue_date: text(Some(record.plates.plate_issue_date.as_str())),
            tyre_use_code: scalar(&record.tyre_use_code),
        };

        Ok(CertificatePayload {
            watermark: self.deployment.watermark().to_string(),
            plates_data,
        })
    }

    /// Build and serialize the payload as the document service expects it.
    pub fn build_json(&self, vehicle: &VehicleRecord) -> Result<String> {
        let payload = self.build(vehicle)?;
        Ok(serde_json::to_string(&payload)?)
    }
}
