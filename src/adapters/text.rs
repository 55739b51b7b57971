use super::{
    contraindication_text, give_line, max_dose_note, spacing_text, EMERGENCY_BODY,
    EMERGENCY_TITLE, MAX_DOSE_BODY, MAX_DOSE_TITLE, SPACING_TITLE,
};
use crate::domain::model::{Advisory, Assessment, Outcome};
use crate::domain::ports::Renderer;
use crate::utils::error::Result;
use crate::utils::rounding::format_weight;

/// Plain terminal output.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer;

impl TextRenderer {
    fn render_assessment(&self, assessment: &Assessment) -> String {
        if assessment.is_emergency() {
            return format!("🚨 {}\n{}\n", EMERGENCY_TITLE, EMERGENCY_BODY);
        }

        let mut lines = Vec::new();
        if let Some(patient) = &assessment.patient {
            lines.push(format!(
                "Patient weight: {} kg ({} lbs)",
                format_weight(patient.kg),
                format_weight(patient.lbs)
            ));
        }

        for dose in &assessment.doses {
            lines.push(String::new());
            if let [only] = dose.volumes.as_slice() {
                lines.push(format!("{} ({})", dose.drug, only.concentration.label));
                lines.push(format!("  {}", give_line(only.ml, dose)));
            } else {
                lines.push(format!("{} (oral)", dose.drug));
                for volume in &dose.volumes {
                    lines.push(format!(
                        "  {}: {}",
                        volume.concentration.label,
                        give_line(volume.ml, dose)
                    ));
                }
            }
            lines.push(format!("  {}", max_dose_note(dose, assessment.age)));

            let reached = assessment.advisories.iter().any(|a| {
                matches!(a, Advisory::MaximumDoseReached { drug, .. } if *drug == dose.drug)
            });
            if reached {
                lines.push(format!("  ⚠️  {}: {}", MAX_DOSE_TITLE, MAX_DOSE_BODY));
            }
        }

        for advisory in &assessment.advisories {
            if let Some(text) = contraindication_text(advisory) {
                lines.push(String::new());
                lines.push(format!("⛔ {}", text));
            } else if let Some(text) = spacing_text(advisory) {
                lines.push(String::new());
                lines.push(format!("💡 {}: {}", SPACING_TITLE, text));
            }
        }

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}

impl Renderer for TextRenderer {
    fn render(&self, outcome: &Outcome) -> Result<String> {
        Ok(match outcome {
            Ok(assessment) => self.render_assessment(assessment),
            Err(e) => format!("❌ {}: {}\n", e.title(), e),
        })
    }
}
