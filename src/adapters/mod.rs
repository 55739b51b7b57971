// Adapters layer: renderers that turn an outcome into HTML, text or JSON.

pub mod html;
pub mod json;
pub mod text;

use crate::core::theme::Theme;
use crate::domain::model::{Advisory, AgeBracket, DoseResult, OutputFormat};
use crate::domain::ports::Renderer;
use crate::utils::rounding::{format_mass, format_volume};

pub use html::HtmlRenderer;
pub use json::JsonRenderer;
pub use text::TextRenderer;

pub const EMERGENCY_TITLE: &str = "Seek immediate medical care.";
pub const EMERGENCY_BODY: &str = "If a child less than 60 days old has a fever it is a medical emergency. \
Please contact your pediatrician or seek care with a healthcare provider immediately.";
pub const MAX_DOSE_TITLE: &str = "Maximum dose reached";
pub const MAX_DOSE_BODY: &str =
    "Weight-based dose was limited to this maximum. Consider discussing dosing with your pediatrician.";
pub const SPACING_TITLE: &str = "Dose spacing reminder";

pub fn renderer_for(format: OutputFormat, theme: Option<Theme>) -> Box<dyn Renderer> {
    match format {
        OutputFormat::Text => Box::new(TextRenderer),
        OutputFormat::Html => Box::new(HtmlRenderer::new(theme)),
        OutputFormat::Json => Box::new(JsonRenderer::default()),
    }
}

/// "Give 5.9 mL (188 mg) every 6 hours as needed for fever/pain."
pub(crate) fn give_line(ml: f64, dose: &DoseResult) -> String {
    format!(
        "Give {} mL ({} mg) every {} hours as needed for fever/pain.",
        format_volume(ml),
        format_mass(dose.dose_mg),
        dose.interval_hours
    )
}

pub(crate) fn max_dose_note(dose: &DoseResult, age: AgeBracket) -> String {
    match age {
        AgeBracket::SixMonthsAndUp => format!(
            "Maximum single dose for this age group is {} mg of {} every {} hours.",
            format_mass(dose.max_single_dose_mg),
            dose.drug.display_name().to_lowercase(),
            dose.interval_hours
        ),
        _ => format!(
            "Maximum single dose for this age group is {} mg.",
            format_mass(dose.max_single_dose_mg)
        ),
    }
}

pub(crate) fn contraindication_text(advisory: &Advisory) -> Option<String> {
    match advisory {
        Advisory::Contraindicated { drug, .. } => Some(format!(
            "{} is not recommended for infants under six months. Consult your pediatrician before using {} for this age group.",
            drug.display_name(),
            drug.display_name().to_lowercase()
        )),
        _ => None,
    }
}

pub(crate) fn spacing_text(advisory: &Advisory) -> Option<String> {
    match advisory {
        Advisory::DoseSpacing {
            acetaminophen_max_mg,
            ibuprofen_max_mg,
            min_hours,
        } => Some(format!(
            "Never exceed {} mg of acetaminophen or {} mg of ibuprofen in a single dose, and allow at least {} hours between doses.",
            format_mass(*acetaminophen_max_mg),
            format_mass(*ibuprofen_max_mg),
            min_hours
        )),
        _ => None,
    }
}
