use approx::assert_abs_diff_eq;
use fever_dose::core::calculator::IBUPROFEN_ADOLESCENT_MAX_MG;
use fever_dose::utils::rounding::{format_mass, format_volume};
use fever_dose::{
    compute_doses, Advisory, AgeBracket, DoseCalculator, DosingLimits, Drug, ValidationError,
    WeightUnit,
};

#[test]
fn test_older_child_20kg() {
    let doses = compute_doses(Some(AgeBracket::SixMonthsAndUp), 20.0, WeightUnit::Kg).unwrap();
    assert_eq!(doses.len(), 2);

    let aceta = &doses[0];
    assert_eq!(aceta.drug, Drug::Acetaminophen);
    assert_abs_diff_eq!(aceta.dose_mg, 300.0, epsilon = 1e-9);
    assert!(!aceta.capped);
    assert_eq!(aceta.interval_hours, 6);
    assert_eq!(format_volume(aceta.volume_ml()), "9.4");

    let ibu = &doses[1];
    assert_eq!(ibu.drug, Drug::Ibuprofen);
    assert_abs_diff_eq!(ibu.dose_mg, 200.0, epsilon = 1e-9);
    assert!(!ibu.capped);
    assert_eq!(ibu.interval_hours, 6);
    assert_eq!(ibu.volumes.len(), 2);
    assert_eq!(format_volume(ibu.volumes[0].ml), "5.0");
    assert_eq!(format_volume(ibu.volumes[1].ml), "10.0");
}

#[test]
fn test_infant_15kg_is_capped() {
    let doses = compute_doses(Some(AgeBracket::From2To6Months), 15.0, WeightUnit::Kg).unwrap();
    assert_eq!(doses.len(), 1);

    let aceta = &doses[0];
    assert_abs_diff_eq!(aceta.uncapped_mg, 187.5, epsilon = 1e-9);
    assert!(aceta.capped);
    assert_eq!(aceta.dose_mg, 160.0);
    assert_eq!(aceta.interval_hours, 4);
    assert_eq!(format_volume(aceta.volume_ml()), "5.0");
    assert_eq!(format_mass(aceta.dose_mg), "160");
}

#[test]
fn test_missing_age_any_weight() {
    for w in [3.0, 20.0, -1.0, f64::NAN] {
        assert_eq!(
            compute_doses(None, w, WeightUnit::Lbs),
            Err(ValidationError::MissingAge)
        );
    }
}

#[test]
fn test_invalid_weight() {
    for w in [0.0, -5.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        assert_eq!(
            compute_doses(Some(AgeBracket::SixMonthsAndUp), w, WeightUnit::Kg),
            Err(ValidationError::InvalidWeight)
        );
    }
}

#[test]
fn test_under_two_months_never_doses() {
    for w in [0.1, 2.0, 4.5, 10.0, 100.0] {
        for unit in [WeightUnit::Kg, WeightUnit::Lbs] {
            let doses = compute_doses(Some(AgeBracket::Under2Months), w, unit).unwrap();
            assert!(doses.is_empty());
        }
    }
}

#[test]
fn test_infant_volume_monotonic_then_flat() {
    let mut previous = 0.0;
    let mut kg = 0.5;
    while kg <= 25.0 {
        let doses = compute_doses(Some(AgeBracket::From2To6Months), kg, WeightUnit::Kg).unwrap();
        let volume = doses[0].volume_ml();
        let expected = (12.5 * kg).min(160.0) / 160.0 * 5.0;
        assert_abs_diff_eq!(volume, expected, epsilon = 1e-12);
        assert!(volume >= previous);
        if 12.5 * kg > 160.0 {
            assert_abs_diff_eq!(volume, 5.0, epsilon = 1e-12);
        }
        previous = volume;
        kg += 0.25;
    }
}

#[test]
fn test_capped_flag_boundary() {
    // 10 mg/kg at 40 kg lands exactly on the 400 mg ceiling
    let at = compute_doses(Some(AgeBracket::SixMonthsAndUp), 40.0, WeightUnit::Kg).unwrap();
    assert_eq!(at[1].dose_mg, 400.0);
    assert!(!at[1].capped);

    let over = compute_doses(Some(AgeBracket::SixMonthsAndUp), 40.5, WeightUnit::Kg).unwrap();
    assert_eq!(over[1].dose_mg, 400.0);
    assert!(over[1].capped);
}

#[test]
fn test_heavy_child_caps_both_drugs() {
    let doses = compute_doses(Some(AgeBracket::SixMonthsAndUp), 80.0, WeightUnit::Kg).unwrap();
    assert_eq!(doses[0].dose_mg, 1000.0);
    assert!(doses[0].capped);
    assert_eq!(format_volume(doses[0].volume_ml()), "31.3");
    assert_eq!(doses[1].dose_mg, 400.0);
    assert!(doses[1].capped);
}

#[test]
fn test_pounds_input() {
    let doses = compute_doses(Some(AgeBracket::From2To6Months), 11.0, WeightUnit::Lbs).unwrap();
    // 11 lbs = 4.9895 kg
    assert_abs_diff_eq!(doses[0].dose_mg, 12.5 * 11.0 / 2.20462, epsilon = 1e-9);
    assert_eq!(format_mass(doses[0].dose_mg), "62");
    assert_eq!(format_volume(doses[0].volume_ml()), "1.9");
}

#[test]
fn test_adolescent_ceiling_configuration() {
    let calc = DoseCalculator::new(DosingLimits::default().with_ibuprofen_max(IBUPROFEN_ADOLESCENT_MAX_MG));
    let assessment = calc
        .assess(Some(AgeBracket::SixMonthsAndUp), 90.0, WeightUnit::Kg)
        .unwrap();

    let ibu = assessment.dose_for(Drug::Ibuprofen).unwrap();
    assert_eq!(ibu.dose_mg, 800.0);
    assert!(ibu.capped);
    assert!(assessment.advisories.contains(&Advisory::DoseSpacing {
        acetaminophen_max_mg: 1000.0,
        ibuprofen_max_mg: 800.0,
        min_hours: 6,
    }));
}

#[test]
fn test_assessment_advisories_order() {
    let assessment = DoseCalculator::default()
        .assess(Some(AgeBracket::From2To6Months), 15.0, WeightUnit::Kg)
        .unwrap();
    assert_eq!(
        assessment.advisories,
        vec![
            Advisory::MaximumDoseReached {
                drug: Drug::Acetaminophen,
                max_single_dose_mg: 160.0,
            },
            Advisory::Contraindicated {
                drug: Drug::Ibuprofen,
                bracket: AgeBracket::From2To6Months,
            },
        ]
    );
    let patient = assessment.patient.unwrap();
    assert_abs_diff_eq!(patient.lbs, 33.0693, epsilon = 1e-9);
}

#[test]
fn test_emergency_assessment() {
    let assessment = DoseCalculator::default()
        .assess(Some(AgeBracket::Under2Months), 4.0, WeightUnit::Kg)
        .unwrap();
    assert!(assessment.is_emergency());
    assert!(assessment.doses.is_empty());
    assert!(assessment.patient.is_none());
}
