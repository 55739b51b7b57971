use fever_dose::domain::ports::Renderer;
use fever_dose::{
    AgeBracket, DoseCalculator, FormSnapshot, HtmlRenderer, JsonRenderer, Outcome, TextRenderer,
    Theme, ValidationError, WeightUnit,
};

fn assess(age: Option<AgeBracket>, weight: f64) -> Outcome {
    DoseCalculator::default().assess(age, weight, WeightUnit::Kg)
}

#[test]
fn test_html_infant_capped_with_contraindication() {
    let html = HtmlRenderer::default()
        .render(&assess(Some(AgeBracket::From2To6Months), 15.0))
        .unwrap();

    assert!(html.starts_with(r#"<p class="result-weight">"#));
    assert!(html.contains("<strong>15.0 kg (33.1 lbs)</strong>"));
    assert!(html.contains("<h3>Acetaminophen (160 mg / 5 mL)</h3>"));
    assert!(html.contains("<p>Give 5.0 mL (160 mg) every 4 hours as needed for fever/pain.</p>"));
    assert!(html.contains("Maximum single dose for this age group is 160 mg.</p>"));
    assert!(html.contains(
        r#"<div class="warning-card warning-card--orange"><strong>Maximum dose reached</strong>"#
    ));
    assert!(html.contains(
        r#"<div class="warning-card warning-card--red-soft"><em>Ibuprofen is not recommended for infants under six months."#
    ));
    assert!(!html.contains("Ibuprofen (oral)"));
}

#[test]
fn test_html_older_child_two_formulations() {
    let html = HtmlRenderer::default()
        .render(&assess(Some(AgeBracket::SixMonthsAndUp), 20.0))
        .unwrap();

    assert!(html.contains("<h3>Ibuprofen (oral)</h3>"));
    assert!(html.contains(
        "<p><strong>Infant's 50 mg / 1.25 mL:</strong> Give 5.0 mL (200 mg) every 6 hours as needed for fever/pain.</p>"
    ));
    assert!(html.contains(
        "<p><strong>Children's 100 mg / 5 mL:</strong> Give 10.0 mL (200 mg) every 6 hours as needed for fever/pain.</p>"
    ));
    assert!(html.contains("Maximum single dose for this age group is 1000 mg of acetaminophen every 6 hours."));
    assert!(html.contains(r#"<strong>Dose spacing reminder</strong> Never exceed 1000 mg of acetaminophen or 400 mg of ibuprofen"#));
    assert!(!html.contains("warning-card--orange"));
}

#[test]
fn test_html_emergency_has_no_dose_cards() {
    let html = HtmlRenderer::default()
        .render(&assess(Some(AgeBracket::Under2Months), 5.0))
        .unwrap();
    assert!(html.contains("alert--critical"));
    assert!(html.contains("<strong>Seek immediate medical care.</strong>"));
    assert!(!html.contains("result-card"));
}

#[test]
fn test_html_validation_messages() {
    let html = HtmlRenderer::new(None).render(&Err(ValidationError::MissingAge)).unwrap();
    assert_eq!(
        html,
        r#"<div class="warning-card warning-card--teal"><strong>Age required</strong> Please select an age group to continue.</div>"#
    );

    let html = HtmlRenderer::new(None).render(&Err(ValidationError::InvalidWeight)).unwrap();
    assert!(html.contains("<strong>Weight required</strong> Please enter a valid weight to calculate dosing."));
}

#[test]
fn test_html_theme_is_passed_in() {
    let theme = Theme::from_hex("#12312b", "#30c39e").unwrap();
    let html = HtmlRenderer::new(Some(theme)).render(&Err(ValidationError::MissingAge)).unwrap();
    assert!(html.starts_with("<style>\n:root {\n  --theme-dark: #12312b;\n"));
    assert!(html.contains("  --theme-bright: #30c39e;\n"));
    assert!(html.contains("warning-card--teal"));
}

#[test]
fn test_text_output() {
    let text = TextRenderer.render(&assess(Some(AgeBracket::SixMonthsAndUp), 20.0)).unwrap();
    assert!(text.starts_with("Patient weight: 20.0 kg (44.1 lbs)\n"));
    assert!(text.contains("Acetaminophen (160 mg / 5 mL)\n  Give 9.4 mL (300 mg) every 6 hours"));
    assert!(text.contains("Infant's 50 mg / 1.25 mL: Give 5.0 mL (200 mg)"));
    assert!(text.contains("Children's 100 mg / 5 mL: Give 10.0 mL (200 mg)"));
    assert!(text.contains("Dose spacing reminder: Never exceed 1000 mg of acetaminophen or 400 mg of ibuprofen"));

    let text = TextRenderer.render(&Err(ValidationError::MissingAge)).unwrap();
    assert_eq!(text, "❌ Age required: Please select an age group to continue.\n");
}

#[test]
fn test_json_output() {
    let json = JsonRenderer::default()
        .render(&assess(Some(AgeBracket::From2To6Months), 15.0))
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["status"], "ok");
    assert_eq!(value["assessment"]["age"], "2-to-6-months");
    assert_eq!(value["assessment"]["doses"][0]["drug"], "acetaminophen");
    assert_eq!(value["assessment"]["doses"][0]["capped"], true);
    assert_eq!(value["assessment"]["doses"][0]["dose_mg"], 160.0);
    assert_eq!(value["assessment"]["advisories"][1]["kind"], "contraindicated");
    assert_eq!(value["assessment"]["advisories"][1]["drug"], "ibuprofen");

    let json = JsonRenderer::compact().render(&Err(ValidationError::InvalidWeight)).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["status"], "invalid");
    assert_eq!(value["message"], "Please enter a valid weight to calculate dosing.");
    assert_eq!(value["error"], "invalid_weight");
    assert_eq!(value["title"], "Weight required");
}

#[test]
fn test_form_submission_renders_through_adapter() {
    let calc = DoseCalculator::default();
    let outcome = FormSnapshot::new("6+", "44.0924", "lbs").submit(&calc).unwrap();
    let text = TextRenderer.render(&outcome).unwrap();
    assert!(text.starts_with("Patient weight: 20.0 kg (44.1 lbs)\n"));
}

#[test]
fn test_json_figures_match_printed_rounding() {
    let outcome = DoseCalculator::default().assess(
        Some(AgeBracket::From2To6Months),
        11.0,
        WeightUnit::Lbs,
    );
    let json = JsonRenderer::default().render(&outcome).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    let dose = &value["assessment"]["doses"][0];
    assert_eq!(dose["drug"], "acetaminophen");
    assert_eq!(dose["dose_mg"], 62.0);
    assert_eq!(dose["volumes"][0]["ml"], 1.9);
    assert_eq!(value["assessment"]["patient"]["kg"], 5.0);
    assert_eq!(value["assessment"]["patient"]["lbs"], 11.0);

    let text = TextRenderer.render(&outcome).unwrap();
    assert!(text.contains("Give 1.9 mL (62 mg)"));
}
