use super::{
    contraindication_text, give_line, max_dose_note, spacing_text, EMERGENCY_BODY,
    EMERGENCY_TITLE, MAX_DOSE_BODY, MAX_DOSE_TITLE, SPACING_TITLE,
};
use crate::core::theme::Theme;
use crate::domain::model::{Advisory, Assessment, DoseResult, Outcome};
use crate::domain::ports::Renderer;
use crate::utils::error::Result;
use crate::utils::rounding::format_weight;

/// Card color modifiers used by the page stylesheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardTone {
    Teal,
    Orange,
    RedSoft,
}

impl CardTone {
    fn class(&self) -> &'static str {
        match self {
            CardTone::Teal => "warning-card--teal",
            CardTone::Orange => "warning-card--orange",
            CardTone::RedSoft => "warning-card--red-soft",
        }
    }
}

pub fn escape_html(text: &str) -> String {
    html_escape::encode_double_quoted_attribute(text).into_owned()
}

/// `body` is trusted markup; `title` is escaped.
pub fn warning_card(title: &str, body: &str, tone: CardTone) -> String {
    let label = if title.is_empty() {
        String::new()
    } else {
        format!("<strong>{}</strong> ", escape_html(title))
    };
    format!(
        r#"<div class="warning-card {}">{}{}</div>"#,
        tone.class(),
        label,
        body
    )
}

/// Renders the markup the results panel of the page expects.
#[derive(Debug, Clone, Default)]
pub struct HtmlRenderer {
    theme: Option<Theme>,
}

impl HtmlRenderer {
    pub fn new(theme: Option<Theme>) -> Self {
        Self { theme }
    }

    fn style_block(&self) -> String {
        match &self.theme {
            Some(theme) => format!("<style>\n{}</style>\n", theme.css_root_block()),
            None => String::new(),
        }
    }

    fn dose_card(&self, dose: &DoseResult, assessment: &Assessment) -> String {
        let mut card = String::from(r#"<article class="result-card">"#);

        if let [only] = dose.volumes.as_slice() {
            card.push_str(&format!(
                "<h3>{} ({})</h3>",
                escape_html(dose.drug.display_name()),
                escape_html(only.concentration.label)
            ));
            card.push_str(&format!("<p>{}</p>", escape_html(&give_line(only.ml, dose))));
        } else {
            card.push_str(&format!(
                "<h3>{} (oral)</h3>",
                escape_html(dose.drug.display_name())
            ));
            for volume in &dose.volumes {
                card.push_str(&format!(
                    "<p><strong>{}:</strong> {}</p>",
                    escape_html(volume.concentration.label),
                    escape_html(&give_line(volume.ml, dose))
                ));
            }
        }

        card.push_str(&format!(
            r#"<p class="dose-note">{}</p>"#,
            escape_html(&max_dose_note(dose, assessment.age))
        ));

        let reached = assessment.advisories.iter().any(|a| {
            matches!(a, Advisory::MaximumDoseReached { drug, .. } if *drug == dose.drug)
        });
        if reached {
            card.push_str(&warning_card(MAX_DOSE_TITLE, MAX_DOSE_BODY, CardTone::Orange));
        }

        card.push_str("</article>");
        card
    }

    fn render_assessment(&self, assessment: &Assessment) -> String {
        if assessment.is_emergency() {
            return format!(
                r#"<div class="alert alert--critical" role="alert"><strong>{}</strong> {}</div>"#,
                EMERGENCY_TITLE, EMERGENCY_BODY
            );
        }

        let mut blocks = Vec::new();
        if let Some(patient) = &assessment.patient {
            blocks.push(format!(
                r#"<p class="result-weight"><span>Patient weight</span><br><strong>{} kg ({} lbs)</strong></p>"#,
                format_weight(patient.kg),
                format_weight(patient.lbs)
            ));
        }

        let mut group: Vec<String> = assessment
            .doses
            .iter()
            .map(|dose| self.dose_card(dose, assessment))
            .collect();

        for advisory in &assessment.advisories {
            if let Some(text) = contraindication_text(advisory) {
                group.push(warning_card(
                    "",
                    &format!("<em>{}</em>", escape_html(&text)),
                    CardTone::RedSoft,
                ));
            } else if let Some(text) = spacing_text(advisory) {
                group.push(warning_card(SPACING_TITLE, &escape_html(&text), CardTone::Teal));
            }
        }

        blocks.push(format!(r#"<div class="result-group">{}</div>"#, group.join("")));
        blocks.join("")
    }
}

impl Renderer for HtmlRenderer {
    fn render(&self, outcome: &Outcome) -> Result<String> {
        let body = match outcome {
            Ok(assessment) => self.render_assessment(assessment),
            Err(e) => warning_card(e.title(), &escape_html(&e.to_string()), CardTone::Teal),
        };
        Ok(format!("{}{}", self.style_block(), body))
    }
}
