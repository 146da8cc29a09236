use super::*;

#[test]
fn test_intent_label_parses_case_insensitively() {
    assert_eq!("High".parse::<IntentLabel>(), Ok(IntentLabel::High));
    assert_eq!(" medium ".parse::<IntentLabel>(), Ok(IntentLabel::Medium));
    assert_eq!("LOW".parse::<IntentLabel>(), Ok(IntentLabel::Low));
}

#[test]
fn test_intent_label_rejects_anything_else() {
    for raw in ["Unknown", "", "hi", "High intent", "none"] {
        assert!(raw.parse::<IntentLabel>().is_err(), "{raw:?} must be rejected");
    }
}

#[test]
fn test_intent_label_serializes_capitalized() {
    let json = serde_json::to_string(&IntentLabel::Medium).unwrap();
    assert_eq!(json, "\"Medium\"");
}

#[test]
fn test_lead_completeness_treats_whitespace_as_missing() {
    let mut lead = Lead::new("Ava", "CEO", "Acme", "software", "SF", "bio");
    assert!(lead.is_complete());

    lead.location = "   ".to_string();
    assert!(!lead.is_complete());
}

#[test]
fn test_lead_deserialize_generates_id_and_accepts_linkedin_bio() {
    let lead: Lead = serde_json::from_value(serde_json::json!({
        "name": "Ava Patel",
        "role": "Head of Growth",
        "company": "FlowMetrics",
        "industry": "software",
        "location": "San Francisco",
        "linkedin_bio": "Scaling outreach."
    }))
    .unwrap();

    assert_eq!(lead.bio, "Scaling outreach.");
    assert!(!lead.id.as_uuid().is_nil());
}

#[test]
fn test_offer_new_drops_blank_entries() {
    let offer = Offer::new(
        " Outreach ",
        vec!["24/7 outreach", "  ", ""],
        vec![" B2B SaaS ", ""],
    );

    assert_eq!(offer.name, "Outreach");
    assert_eq!(offer.value_props, vec!["24/7 outreach"]);
    assert_eq!(offer.ideal_use_cases, vec!["B2B SaaS"]);
}
