//! Plategen Domain: plate payload derivation for vehicle technical records
//!
//! Turns a loosely typed technical record into the strictly shaped VTG6/VTG7
//! payload consumed by the document service, and classifies the service's
//! responses.
//!
//! ## Key Components
//!
//! - `VehicleRecord`: the technical record message as received from the queue
//! - `PayloadBuilder`: vehicle record to `CertificatePayload`
//! - `GatedField`: which plate fields apply to which vehicle type
//! - `map_axles`: fixed four-slot axle layout
//! - `validate_invocation_response`: document service response classification

pub mod axles;
mod error;
pub mod field;
pub mod invocation;
pub mod payload;
pub mod policy;
pub mod vehicle;

pub use axles::{map_axles, AxleGroup, AxleGroups, AXLE_SLOTS};
pub use error::{FailureKind, InvocationFailure, PayloadError, Result};
pub use field::{format_field, AxleLeaf, Field};
pub use invocation::{
    validate_invocation_response, DocumentEnvelope, DocumentTemplate, InvocationBody,
    InvocationRequest, InvocationResponse, PathParameters,
};
pub use payload::{
    CertificatePayload, Deployment, PayloadBuilder, PlatesData, PRODUCTION_BRANCH,
    WATERMARK_NOT_VALID,
};
pub use policy::{map_field, speed_limiter_marking, GatedField};
pub use vehicle::{
    Axle, AxleTyres, AxleWeights, Brakes, Dimensions, Plates, Scalar, TechRecord, VehicleRecord,
    VehicleType,
};
