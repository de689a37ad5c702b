//! Vehicle technical record model.
//!
//! Records arrive as loosely typed JSON from the technical records service.
//! Scalars that the plate layout only ever prints are kept as [`Scalar`] so
//! that numbers, strings and booleans all survive ingestion untouched.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::error::{PayloadError, Result};

/// A loosely typed scalar as it appears in a technical record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Number(Number),
    Text(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Number(n) => fmt_number(n, f),
            Scalar::Text(s) => f.write_str(s),
        }
    }
}

/// Integral floats print without a fractional part (`6.0` prints as `6`).
fn fmt_number(n: &Number, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if let Some(i) = n.as_i64() {
        return write!(f, "{}", i);
    }
    if let Some(u) = n.as_u64() {
        return write!(f, "{}", u);
    }
    match n.as_f64() {
        Some(x) if x == 0.0 => f.write_str("0"),
        Some(x) if x.fract() == 0.0 && x.abs() < 1e21 => write!(f, "{:.0}", x),
        Some(x) => write!(f, "{}", x),
        None => write!(f, "{}", n),
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Text(s.to_string())
    }
}

impl From<i64> for Scalar {
    fn from(i: i64) -> Self {
        Scalar::Number(i.into())
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Bool(b)
    }
}

/// Vehicle classification carried on every technical record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    /// Heavy goods vehicle
    Hgv,
    /// Trailer
    Trl,
    Psv,
    Lgv,
    Car,
    Motorcycle,
}

impl VehicleType {
    pub fn as_str(self) -> &'static str {
        match self {
            VehicleType::Hgv => "hgv",
            VehicleType::Trl => "trl",
            VehicleType::Psv => "psv",
            VehicleType::Lgv => "lgv",
            VehicleType::Car => "car",
            VehicleType::Motorcycle => "motorcycle",
        }
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A vehicle with its technical record history, newest version first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRecord {
    pub vin: String,
    #[serde(default)]
    pub primary_vrm: Option<String>,
    #[serde(default)]
    pub secondary_vrms: Vec<String>,
    #[serde(default)]
    pub system_number: Option<String>,
    #[serde(default)]
    pub partial_vin: Option<String>,
    #[serde(default)]
    pub trailer_id: Option<String>,
    pub tech_record: Vec<TechRecord>,
}

impl VehicleRecord {
    /// The current technical record version.
    pub fn current(&self) -> Result<&TechRecord> {
        self.tech_record
            .first()
            .ok_or_else(|| PayloadError::MissingTechRecord {
                vin: self.vin.clone(),
            })
    }

    /// Registration shown on the certificate: the primary VRM, or the
    /// trailer id for vehicles that have none.
    pub fn registration_mark(&self) -> Option<&str> {
        non_empty(self.primary_vrm.as_deref()).or_else(|| non_empty(self.trailer_id.as_deref()))
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

/// One version of a vehicle's technical record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechRecord {
    pub vehicle_type: VehicleType,
    #[serde(default)]
    pub status_code: Option<String>,
    pub plates: Plates,
    pub brakes: Brakes,
    #[serde(default)]
    pub axles: Vec<Axle>,
    pub dimensions: Dimensions,
    pub approval_type_number: Option<Scalar>,
    pub variant_number: Option<Scalar>,
    pub make: Option<Scalar>,
    pub model: Option<Scalar>,
    pub speed_limiter_mrk: Option<bool>,
    pub function_code: Option<Scalar>,
    pub regn_date: Option<Scalar>,
    pub manufacture_year: Option<Scalar>,
    pub gross_gb_weight: Option<Scalar>,
    pub gross_eec_weight: Option<Scalar>,
    pub gross_design_weight: Option<Scalar>,
    pub train_gb_weight: Option<Scalar>,
    pub train_eec_weight: Option<Scalar>,
    pub train_design_weight: Option<Scalar>,
    pub max_train_gb_weight: Option<Scalar>,
    pub max_train_eec_weight: Option<Scalar>,
    pub max_train_design_weight: Option<Scalar>,
    pub tyre_use_code: Option<Scalar>,
    pub max_load_on_coupling: Option<Scalar>,
    #[serde(rename = "frontAxleTo5thWheelCouplingMin")]
    pub front_axle_to_5th_wheel_coupling_min: Option<Scalar>,
    #[serde(rename = "frontAxleTo5thWheelCouplingMax")]
    pub front_axle_to_5th_wheel_coupling_max: Option<Scalar>,
    pub coupling_center_to_rear_trl_min: Option<Scalar>,
    pub coupling_center_to_rear_trl_max: Option<Scalar>,
}

/// Plate issuance details for the technical record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plates {
    pub plate_serial_number: String,
    pub plate_issue_date: String,
    #[serde(default)]
    pub plate_reason_for_issue: Option<String>,
    #[serde(default)]
    pub plate_issuer: Option<String>,
    pub to_email_address: String,
}

impl Plates {
    /// Issue date rendered as `DD Month YYYY`, e.g. `13 December 2200`.
    pub fn formatted_issue_date(&self) -> Result<String> {
        parse_issue_date(&self.plate_issue_date)
            .map(|date| date.format("%d %B %Y").to_string())
            .ok_or_else(|| PayloadError::InvalidIssueDate(self.plate_issue_date.clone()))
    }
}

/// Timestamps carrying an offset, besides RFC 3339.
const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%dT%H:%M:%S%.f%:z"];

/// Local timestamps, read as UTC.
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Calendar date of an ISO 8601 date or timestamp, taken in UTC.
fn parse_issue_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    let with_offset = DateTime::parse_from_rfc3339(raw).ok().or_else(|| {
        OFFSET_FORMATS
            .iter()
            .find_map(|format| DateTime::parse_from_str(raw, format).ok())
    });
    if let Some(dt) = with_offset {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|dt| dt.date())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Brakes {
    #[serde(default)]
    pub brake_code: Option<String>,
    /// Type approval number of the brake installation, printed verbatim.
    pub dtp_number: Option<Scalar>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimensions {
    pub length: Option<Scalar>,
    pub width: Option<Scalar>,
    #[serde(default)]
    pub height: Option<Scalar>,
}

/// A single axle. GB and design weights and all tyre fields are mandatory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Axle {
    #[serde(default)]
    pub axle_number: Option<u32>,
    #[serde(default)]
    pub parking_brake_mrk: Option<bool>,
    pub weights: AxleWeights,
    pub tyres: AxleTyres,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxleWeights {
    pub gb_weight: Scalar,
    pub design_weight: Scalar,
    #[serde(default)]
    pub eec_weight: Option<Scalar>,
    #[serde(default)]
    pub kerb_weight: Option<Scalar>,
    #[serde(default)]
    pub laden_weight: Option<Scalar>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxleTyres {
    pub tyre_size: Scalar,
    pub ply_rating: Scalar,
    pub fitment_code: Scalar,
    #[serde(default)]
    pub tyre_code: Option<Scalar>,
}
