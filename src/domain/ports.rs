use crate::domain::model::{OutputFormat, Outcome};
use crate::utils::error::Result;

/// Turns a calculation outcome into something a user reads. The calculator
/// never sees a renderer; renderers never compute doses.
pub trait Renderer {
    fn render(&self, outcome: &Outcome) -> Result<String>;
}

pub trait ConfigProvider {
    fn ibuprofen_max_single_dose_mg(&self) -> f64;
    fn output_format(&self) -> OutputFormat;
}
