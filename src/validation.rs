//! Pure range checks on request inputs. No side effects; every violated
//! constraint is reported, not just the first.

use crate::config::EngineConfig;
use crate::error::{InvalidInput, ValidationIssue};
use crate::models::prediction::{AreaSpec, GeoPoint};

pub fn validate_geo(point: &GeoPoint) -> Result<(), InvalidInput> {
    let mut issues = Vec::new();
    if !(-90.0..=90.0).contains(&point.latitude) || point.latitude.is_nan() {
        issues.push(ValidationIssue::LatitudeOutOfRange(point.latitude));
    }
    if !(-180.0..=180.0).contains(&point.longitude) || point.longitude.is_nan() {
        issues.push(ValidationIssue::LongitudeOutOfRange(point.longitude));
    }
    if issues.is_empty() {
        Ok(())
    } else {
        Err(InvalidInput::new(issues))
    }
}

pub fn validate_area(spec: &AreaSpec, config: &EngineConfig) -> Result<(), InvalidInput> {
    let mut issues = Vec::new();
    if spec.value <= 0.0 || spec.value.is_nan() {
        issues.push(ValidationIssue::AreaNotPositive(spec.value));
    }
    let converted = spec.as_m2();
    if converted > config.max_area_m2 {
        issues.push(ValidationIssue::AreaExceedsMaximum {
            converted_m2: converted,
            max_m2: config.max_area_m2,
        });
    }
    if issues.is_empty() {
        Ok(())
    } else {
        Err(InvalidInput::new(issues))
    }
}

/// Validate both request inputs, combining all issues into one error.
pub fn validate_request(
    point: &GeoPoint,
    spec: &AreaSpec,
    config: &EngineConfig,
) -> Result<(), InvalidInput> {
    let mut issues = Vec::new();
    if let Err(e) = validate_geo(point) {
        issues.extend(e.issues);
    }
    if let Err(e) = validate_area(spec, config) {
        issues.extend(e.issues);
    }
    if issues.is_empty() {
        Ok(())
    } else {
        Err(InvalidInput::new(issues))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::prediction::AreaUnit;

    #[test]
    fn valid_inputs_pass() {
        let config = EngineConfig::default();
        assert!(validate_geo(&GeoPoint::new(45.07, 7.33)).is_ok());
        assert!(validate_area(&AreaSpec::square_meters(200.0), &config).is_ok());
    }

    #[test]
    fn boundary_coordinates_pass() {
        assert!(validate_geo(&GeoPoint::new(90.0, -180.0)).is_ok());
        assert!(validate_geo(&GeoPoint::new(-90.0, 180.0)).is_ok());
    }

    #[test]
    fn every_violation_is_reported() {
        let err = validate_geo(&GeoPoint::new(91.0, 200.0)).unwrap_err();
        assert_eq!(err.issues.len(), 2);
        assert!(matches!(err.issues[0], ValidationIssue::LatitudeOutOfRange(_)));
        assert!(matches!(err.issues[1], ValidationIssue::LongitudeOutOfRange(_)));
    }

    #[test]
    fn area_must_be_positive_and_bounded() {
        let config = EngineConfig::default();
        let err = validate_area(&AreaSpec::square_meters(0.0), &config).unwrap_err();
        assert!(matches!(err.issues[0], ValidationIssue::AreaNotPositive(_)));

        // 11 hectares converts over the 100,000 m² ceiling
        let err = validate_area(&AreaSpec::new(11.0, AreaUnit::Hectares), &config).unwrap_err();
        assert!(matches!(err.issues[0], ValidationIssue::AreaExceedsMaximum { .. }));
    }

    #[test]
    fn combined_validation_collects_across_inputs() {
        let config = EngineConfig::default();
        let err = validate_request(
            &GeoPoint::new(100.0, 0.0),
            &AreaSpec::square_meters(-1.0),
            &config,
        )
        .unwrap_err();
        assert_eq!(err.issues.len(), 2);
    }
}
