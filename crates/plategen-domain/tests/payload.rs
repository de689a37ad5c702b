//! Payload derivation against a realistic technical record.

use plategen_domain::{
    Deployment, GatedField, PayloadBuilder, PayloadError, VehicleRecord, VehicleType,
};
use serde_json::{json, Value};

fn vehicle() -> VehicleRecord {
    serde_json::from_str(include_str!("fixtures/vehicle.json")).expect("fixture parses")
}

fn payload_json(builder: &PayloadBuilder, vehicle: &VehicleRecord) -> Value {
    serde_json::to_value(builder.build(vehicle).expect("payload builds")).expect("serializes")
}

fn empty_axle() -> Value {
    json!({
        "Weights": {"GbWeight": "", "EecWeight": "", "DesignWeight": ""},
        "Tyres": {"TyreSize": "", "PlyRating": "", "FitmentCode": ""}
    })
}

fn expected_hgv_payload() -> Value {
    json!({
        "Watermark": "NOT VALID",
        "PLATES_DATA": {
            "PlateSerialNumber": "123449",
            "DtpNumber": "DTPNUM",
            "PrimaryVrm": "BBBB333",
            "Vin": "ABCDEFGH444444",
            "VariantNumber": "22",
            "ApprovalTypeNumber": "string",
            "Make": "string",
            "Model": "string",
            "SpeedLimiterMrk": "Yes",
            "FunctionCode": "A",
            "RegnDate": "2019-12-13",
            "ManufactureYear": "0",
            "GrossGbWeight": "6",
            "GrossEecWeight": "0",
            "GrossDesignWeight": "0",
            "TrainGbWeight": "0",
            "TrainEecWeight": "0",
            "TrainDesignWeight": "0",
            "MaxTrainGbWeight": "0",
            "MaxTrainEecWeight": "0",
            "Axles": {
                "Axle1": {
                    "Weights": {"GbWeight": "0", "EecWeight": "0", "DesignWeight": "0"},
                    "Tyres": {"TyreSize": "string", "PlyRating": "a", "FitmentCode": "double"}
                },
                "Axle2": empty_axle(),
                "Axle3": empty_axle(),
                "Axle4": empty_axle()
            },
            "DimensionLength": "0",
            "DimensionWidth": "0",
            "FrontAxleTo5thWheelCouplingMin": "0",
            "FrontAxleTo5thWheelCouplingMax": "0",
            "PlateIssueDate": "2200-12-13",
            "TyreUseCode": "2"
        }
    })
}

#[test]
fn hgv_payload_matches_plate_layout() {
    let builder = PayloadBuilder::new(Deployment::NonProduction);
    assert_eq!(payload_json(&builder, &vehicle()), expected_hgv_payload());
}

#[test]
fn hgv_payload_never_carries_trailer_fields() {
    let builder = PayloadBuilder::default();
    let mut vehicle = vehicle();
    for flag in [Some(true), Some(false), None] {
        vehicle.tech_record[0].speed_limiter_mrk = flag;
        let plates = payload_json(&builder, &vehicle)["PLATES_DATA"].clone();

        for field in GatedField::ALL {
            let present = plates.get(field.payload_key()).is_some();
            assert_eq!(
                present,
                field.applies_to() == VehicleType::Hgv,
                "{}",
                field.payload_key()
            );
        }
        let marking = plates["SpeedLimiterMrk"].as_str().unwrap();
        assert!(marking == "Yes" || marking == "No");
    }
}

#[test]
fn trailer_payload_swaps_gated_fields() {
    let builder = PayloadBuilder::default();
    let mut vehicle = vehicle();
    vehicle.tech_record[0].vehicle_type = VehicleType::Trl;
    vehicle.tech_record[0].max_load_on_coupling = Some(1200i64.into());
    let plates = payload_json(&builder, &vehicle)["PLATES_DATA"].clone();

    assert!(plates.get("SpeedLimiterMrk").is_none());
    assert!(plates.get("FrontAxleTo5thWheelCouplingMin").is_none());
    assert!(plates.get("FrontAxleTo5thWheelCouplingMax").is_none());
    assert_eq!(plates["MaxLoadOnCoupling"], json!("1200"));
    assert_eq!(plates["CouplingCenterToRearTrlMin"], json!("0"));
    assert_eq!(plates["CouplingCenterToRearTrlMax"], json!("0"));
}

#[test]
fn other_vehicle_types_get_no_gated_fields() {
    let builder = PayloadBuilder::default();
    let mut vehicle = vehicle();
    vehicle.tech_record[0].vehicle_type = VehicleType::Psv;
    let plates = payload_json(&builder, &vehicle)["PLATES_DATA"].clone();

    for field in GatedField::ALL {
        assert!(plates.get(field.payload_key()).is_none());
    }
}

#[test]
fn absent_fields_are_stripped_not_nulled() {
    let builder = PayloadBuilder::default();
    let mut vehicle = vehicle();
    vehicle.primary_vrm = None;
    vehicle.tech_record[0].make = None;
    vehicle.tech_record[0].dimensions.width = None;
    let json = builder.build_json(&vehicle).unwrap();

    assert!(!json.contains("PrimaryVrm"));
    assert!(!json.contains("\"Make\""));
    assert!(!json.contains("DimensionWidth"));
    assert!(!json.contains("null"));
    // padding leaves survive the strip
    assert!(json.contains(r#""Axle4":{"Weights":{"GbWeight":"""#));
}

#[test]
fn production_has_no_watermark() {
    let builder = PayloadBuilder::new(Deployment::Production);
    assert_eq!(payload_json(&builder, &vehicle())["Watermark"], json!(""));
}

#[test]
fn payload_keys_keep_plate_order() {
    let payload = payload_json(&PayloadBuilder::default(), &vehicle());
    let keys: Vec<&str> = payload["PLATES_DATA"]
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(
        keys,
        vec![
            "PlateSerialNumber",
            "DtpNumber",
            "PrimaryVrm",
            "Vin",
            "VariantNumber",
            "ApprovalTypeNumber",
            "Make",
            "Model",
            "SpeedLimiterMrk",
            "FunctionCode",
            "RegnDate",
            "ManufactureYear",
            "GrossGbWeight",
            "GrossEecWeight",
            "GrossDesignWeight",
            "TrainGbWeight",
            "TrainEecWeight",
            "TrainDesignWeight",
            "MaxTrainGbWeight",
            "MaxTrainEecWeight",
            "Axles",
            "DimensionLength",
            "DimensionWidth",
            "FrontAxleTo5thWheelCouplingMin",
            "FrontAxleTo5thWheelCouplingMax",
            "PlateIssueDate",
            "TyreUseCode",
        ]
    );
}

#[test]
fn axle_count_fills_slots_in_order() {
    let builder = PayloadBuilder::default();
    let mut vehicle = vehicle();
    let axle = vehicle.tech_record[0].axles[0].clone();
    vehicle.tech_record[0].axles.push(axle.clone());
    vehicle.tech_record[0].axles.push(axle);

    let axles = payload_json(&builder, &vehicle)["PLATES_DATA"]["Axles"].clone();
    for slot in ["Axle1", "Axle2", "Axle3"] {
        assert_eq!(axles[slot]["Tyres"]["FitmentCode"], json!("double"));
    }
    assert_eq!(axles["Axle4"], empty_axle());
}

#[test]
fn five_axles_are_rejected() {
    let builder = PayloadBuilder::default();
    let mut vehicle = vehicle();
    let axle = vehicle.tech_record[0].axles[0].clone();
    vehicle.tech_record[0].axles = vec![axle; 5];

    assert!(matches!(
        builder.build(&vehicle),
        Err(PayloadError::TooManyAxles { count: 5, .. })
    ));
}

#[test]
fn building_is_deterministic() {
    let builder = PayloadBuilder::default();
    let vehicle = vehicle();
    assert_eq!(
        builder.build_json(&vehicle).unwrap(),
        builder.build_json(&vehicle).unwrap()
    );
}

#[test]
fn only_the_current_tech_record_is_used() {
    let builder = PayloadBuilder::default();
    let mut vehicle = vehicle();
    let mut archived = vehicle.tech_record[0].clone();
    archived.make = Some("archived".into());
    vehicle.tech_record.push(archived);

    assert_eq!(
        payload_json(&builder, &vehicle)["PLATES_DATA"]["Make"],
        json!("string")
    );
}
