use crate::utils::error::{UnknownAgeBracket, UnknownWeightUnit, ValidationError};
use crate::utils::rounding;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const LBS_PER_KG: f64 = 2.20462;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgeBracket {
    #[serde(rename = "under-2-months")]
    Under2Months,
    #[serde(rename = "2-to-6-months")]
    From2To6Months,
    #[serde(rename = "6-months-and-up")]
    SixMonthsAndUp,
}

impl AgeBracket {
    pub const ALL: [AgeBracket; 3] = [
        AgeBracket::Under2Months,
        AgeBracket::From2To6Months,
        AgeBracket::SixMonthsAndUp,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AgeBracket::Under2Months => "under-2-months",
            AgeBracket::From2To6Months => "2-to-6-months",
            AgeBracket::SixMonthsAndUp => "6-months-and-up",
        }
    }

    /// 空字串代表尚未選擇年齡
    pub fn parse_selection(raw: &str) -> Result<Option<AgeBracket>, UnknownAgeBracket> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        trimmed.parse().map(Some)
    }
}

impl fmt::Display for AgeBracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgeBracket {
    type Err = UnknownAgeBracket;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // the short values are what the page's <select> submits
        match s.trim() {
            "under-2-months" | "0-2" => Ok(AgeBracket::Under2Months),
            "2-to-6-months" | "2-6" => Ok(AgeBracket::From2To6Months),
            "6-months-and-up" | "6+" => Ok(AgeBracket::SixMonthsAndUp),
            other => Err(UnknownAgeBracket(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    Kg,
    Lbs,
}

impl WeightUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeightUnit::Kg => "kg",
            WeightUnit::Lbs => "lbs",
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WeightUnit {
    type Err = UnknownWeightUnit;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "kg" => Ok(WeightUnit::Kg),
            "lbs" | "lb" => Ok(WeightUnit::Lbs),
            other => Err(UnknownWeightUnit(other.to_string())),
        }
    }
}

/// A validated, strictly positive body weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Weight {
    value: f64,
    unit: WeightUnit,
}

impl Weight {
    pub fn new(value: f64, unit: WeightUnit) -> Result<Self, ValidationError> {
        if !value.is_finite() || value <= 0.0 {
            return Err(ValidationError::InvalidWeight);
        }
        Ok(Self { value, unit })
    }

    /// Parses free-form field input the way a numeric form field would.
    pub fn parse(raw: &str, unit: WeightUnit) -> Result<Self, ValidationError> {
        let value: f64 = raw
            .trim()
            .parse()
            .map_err(|_| ValidationError::InvalidWeight)?;
        Self::new(value, unit)
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn unit(&self) -> WeightUnit {
        self.unit
    }

    pub fn kg(&self) -> f64 {
        match self.unit {
            WeightUnit::Kg => self.value,
            WeightUnit::Lbs => lbs_to_kg(self.value),
        }
    }

    pub fn lbs(&self) -> f64 {
        match self.unit {
            WeightUnit::Kg => kg_to_lbs(self.value),
            WeightUnit::Lbs => self.value,
        }
    }
}

pub fn kg_to_lbs(kg: f64) -> f64 {
    kg * LBS_PER_KG
}

pub fn lbs_to_kg(lbs: f64) -> f64 {
    lbs / LBS_PER_KG
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Drug {
    Acetaminophen,
    Ibuprofen,
}

impl Drug {
    pub fn display_name(&self) -> &'static str {
        match self {
            Drug::Acetaminophen => "Acetaminophen",
            Drug::Ibuprofen => "Ibuprofen",
        }
    }
}

impl fmt::Display for Drug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A liquid formulation: `mg` of drug per `ml` of suspension.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Concentration {
    pub label: &'static str,
    pub mg: f64,
    pub ml: f64,
}

impl Concentration {
    pub const ACETAMINOPHEN_160_PER_5: Concentration = Concentration {
        label: "160 mg / 5 mL",
        mg: 160.0,
        ml: 5.0,
    };
    pub const IBUPROFEN_INFANT_50_PER_1_25: Concentration = Concentration {
        label: "Infant's 50 mg / 1.25 mL",
        mg: 50.0,
        ml: 1.25,
    };
    pub const IBUPROFEN_CHILDREN_100_PER_5: Concentration = Concentration {
        label: "Children's 100 mg / 5 mL",
        mg: 100.0,
        ml: 5.0,
    };

    pub fn volume_for(&self, dose_mg: f64) -> f64 {
        dose_mg / self.mg * self.ml
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Volume {
    pub concentration: Concentration,
    #[serde(serialize_with = "rounding::serialize_volume")]
    pub ml: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DoseResult {
    pub drug: Drug,
    /// Weight-based dose after the ceiling was applied.
    #[serde(serialize_with = "rounding::serialize_mass")]
    pub dose_mg: f64,
    #[serde(serialize_with = "rounding::serialize_mass")]
    pub uncapped_mg: f64,
    #[serde(serialize_with = "rounding::serialize_mass")]
    pub max_single_dose_mg: f64,
    /// One entry per formulation, in display order.
    pub volumes: Vec<Volume>,
    pub interval_hours: u32,
    pub capped: bool,
}

impl DoseResult {
    /// Volume in the first (primary) formulation.
    pub fn volume_ml(&self) -> f64 {
        self.volumes.first().map(|v| v.ml).unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Advisory {
    /// Under two months: fever is an emergency, no dose is offered.
    SeekEmergencyCare,
    Contraindicated { drug: Drug, bracket: AgeBracket },
    MaximumDoseReached { drug: Drug, max_single_dose_mg: f64 },
    DoseSpacing {
        acetaminophen_max_mg: f64,
        ibuprofen_max_mg: f64,
        min_hours: u32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PatientWeight {
    #[serde(serialize_with = "rounding::serialize_volume")]
    pub kg: f64,
    #[serde(serialize_with = "rounding::serialize_volume")]
    pub lbs: f64,
}

impl From<Weight> for PatientWeight {
    fn from(weight: Weight) -> Self {
        Self {
            kg: weight.kg(),
            lbs: weight.lbs(),
        }
    }
}

/// Everything shown after a calculation: doses plus the advisories that
/// must accompany them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    pub age: AgeBracket,
    /// Absent when the bracket never reads the weight.
    pub patient: Option<PatientWeight>,
    pub doses: Vec<DoseResult>,
    pub advisories: Vec<Advisory>,
}

impl Assessment {
    pub fn is_emergency(&self) -> bool {
        self.advisories.contains(&Advisory::SeekEmergencyCare)
    }

    pub fn dose_for(&self, drug: Drug) -> Option<&DoseResult> {
        self.doses.iter().find(|d| d.drug == drug)
    }
}

/// The result of one calculation as handed to a renderer.
pub type Outcome = Result<Assessment, ValidationError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    #[default]
    Text,
    Html,
    Json,
}
