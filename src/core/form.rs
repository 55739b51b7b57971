use crate::core::calculator::DoseCalculator;
use crate::domain::model::{AgeBracket, Outcome, Weight, WeightUnit};
use crate::utils::error::{UnknownAgeBracket, ValidationError};

/// Form states; transitions come only from the age selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    NoAgeSelected,
    EmergencyAge,
    NormalAge(AgeBracket),
}

/// Which controls are usable in a given state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub weight_input: bool,
    pub unit_select: bool,
    pub calculate: bool,
    pub critical_alert: bool,
}

impl FormState {
    pub fn from_selection(age: Option<AgeBracket>) -> Self {
        match age {
            None => FormState::NoAgeSelected,
            Some(AgeBracket::Under2Months) => FormState::EmergencyAge,
            Some(bracket) => FormState::NormalAge(bracket),
        }
    }

    pub fn controls(&self) -> Controls {
        let enabled = !matches!(self, FormState::EmergencyAge);
        Controls {
            weight_input: enabled,
            unit_select: enabled,
            calculate: enabled,
            critical_alert: !enabled,
        }
    }
}

/// Raw field values as read off the form at submit time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSnapshot {
    pub age: String,
    pub weight: String,
    pub unit: String,
}

impl FormSnapshot {
    pub fn new(age: impl Into<String>, weight: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            age: age.into(),
            weight: weight.into(),
            unit: unit.into(),
        }
    }

    pub fn state(&self) -> Result<FormState, UnknownAgeBracket> {
        AgeBracket::parse_selection(&self.age).map(FormState::from_selection)
    }

    /// Runs the calculation for this snapshot. An emergency-age snapshot
    /// yields the emergency assessment whatever the weight field holds; any
    /// unit other than `lbs` is read as kilograms, like the page did.
    pub fn submit(&self, calculator: &DoseCalculator) -> Result<Outcome, UnknownAgeBracket> {
        let age = AgeBracket::parse_selection(&self.age)?;
        let unit = self.unit.parse().unwrap_or(WeightUnit::Kg);

        let outcome = match FormState::from_selection(age) {
            FormState::NoAgeSelected => Err(ValidationError::MissingAge),
            FormState::EmergencyAge => calculator.assess(age, f64::NAN, unit),
            FormState::NormalAge(_) => match Weight::parse(&self.weight, unit) {
                Ok(weight) => calculator.assess(age, weight.value(), unit),
                Err(e) => Err(e),
            },
        };
        Ok(outcome)
    }
}
