use doghealth_core::classify::classify_optional;
use doghealth_core::{classify, MedicalEventType};

#[test]
fn canonical_labels_classify_to_their_category() {
    for category in MedicalEventType::ALL {
        assert_eq!(classify(category.label()), category);
    }
}

#[test]
fn classification_ignores_case_and_separators() {
    assert_eq!(classify("vaccine"), MedicalEventType::Vaccine);
    assert_eq!(classify("  VET VISIT "), MedicalEventType::VetVisit);
    assert_eq!(classify("heartworm_treatment"), MedicalEventType::HeartwormTreatment);
    assert_eq!(classify("Flea-Preventative"), MedicalEventType::FleaPreventative);
}

#[test]
fn legacy_aliases_are_accepted() {
    assert_eq!(classify("Vaccination"), MedicalEventType::Vaccine);
    assert_eq!(classify("Heartworm"), MedicalEventType::HeartwormTreatment);
    assert_eq!(classify("Flea Treatment"), MedicalEventType::FleaPreventative);
    assert_eq!(classify("flea preventive"), MedicalEventType::FleaPreventative);
    assert_eq!(classify("Checkup"), MedicalEventType::VetVisit);
}

#[test]
fn unknown_and_empty_labels_fall_back_to_other() {
    assert_eq!(classify(""), MedicalEventType::Other);
    assert_eq!(classify("   "), MedicalEventType::Other);
    assert_eq!(classify("Grooming"), MedicalEventType::Other);
    assert_eq!(classify("Vaccine!"), MedicalEventType::Other);
    assert_eq!(classify_optional(None), MedicalEventType::Other);
    assert_eq!(classify_optional(Some("Vet")), MedicalEventType::VetVisit);
}

#[test]
fn from_str_and_serde_route_through_the_classifier() {
    let parsed: MedicalEventType = "heartworm treatment".parse().unwrap();
    assert_eq!(parsed, MedicalEventType::HeartwormTreatment);

    let decoded: MedicalEventType = serde_json::from_str("\"Flea Treatment\"").unwrap();
    assert_eq!(decoded, MedicalEventType::FleaPreventative);
    let unknown: MedicalEventType = serde_json::from_str("\"Bath\"").unwrap();
    assert_eq!(unknown, MedicalEventType::Other);

    assert_eq!(
        serde_json::to_string(&MedicalEventType::VetVisit).unwrap(),
        "\"Vet Visit\""
    );
}

#[test]
fn only_vaccine_flea_and_heartworm_are_protective() {
    let protective: Vec<MedicalEventType> = MedicalEventType::ALL
        .into_iter()
        .filter(|category| category.is_protective())
        .collect();
    assert_eq!(
        protective,
        vec![
            MedicalEventType::Vaccine,
            MedicalEventType::HeartwormTreatment,
            MedicalEventType::FleaPreventative,
        ]
    );
}
