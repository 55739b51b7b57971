use crate::domain::model::{
    Advisory, AgeBracket, Assessment, Concentration, DoseResult, Drug, Outcome, PatientWeight,
    Volume, Weight, WeightUnit,
};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::ValidationError;

pub const ACETAMINOPHEN_INFANT_MAX_MG: f64 = 160.0;
pub const ACETAMINOPHEN_MAX_MG: f64 = 1000.0;
/// Pediatric fever ceiling for ibuprofen (10 mg/kg, at most 400 mg per dose).
pub const IBUPROFEN_PEDIATRIC_MAX_MG: f64 = 400.0;
/// Adult-weight ceiling used by the later revision of the page.
pub const IBUPROFEN_ADOLESCENT_MAX_MG: f64 = 800.0;
pub const ACCEPTED_IBUPROFEN_CEILINGS: [u32; 2] = [400, 800];

/// One weight-based dosing rule: `mg_per_kg` clamped to `max_mg`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DosingRule {
    pub drug: Drug,
    pub mg_per_kg: f64,
    pub max_mg: f64,
    pub interval_hours: u32,
    pub formulations: &'static [Concentration],
}

const ACETAMINOPHEN_ONLY: &[Concentration] = &[Concentration::ACETAMINOPHEN_160_PER_5];
const IBUPROFEN_SUSPENSIONS: &[Concentration] = &[
    Concentration::IBUPROFEN_INFANT_50_PER_1_25,
    Concentration::IBUPROFEN_CHILDREN_100_PER_5,
];

impl DosingRule {
    pub fn apply(&self, weight_kg: f64) -> DoseResult {
        let uncapped_mg = self.mg_per_kg * weight_kg;
        let dose_mg = uncapped_mg.min(self.max_mg);
        let volumes = self
            .formulations
            .iter()
            .map(|c| Volume {
                concentration: *c,
                ml: c.volume_for(dose_mg),
            })
            .collect();

        DoseResult {
            drug: self.drug,
            dose_mg,
            uncapped_mg,
            max_single_dose_mg: self.max_mg,
            volumes,
            interval_hours: self.interval_hours,
            // exactly at the ceiling is not a cap
            capped: uncapped_mg > self.max_mg,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DosingLimits {
    pub acetaminophen_infant_max_mg: f64,
    pub acetaminophen_max_mg: f64,
    pub ibuprofen_max_mg: f64,
}

impl Default for DosingLimits {
    fn default() -> Self {
        Self {
            acetaminophen_infant_max_mg: ACETAMINOPHEN_INFANT_MAX_MG,
            acetaminophen_max_mg: ACETAMINOPHEN_MAX_MG,
            ibuprofen_max_mg: IBUPROFEN_PEDIATRIC_MAX_MG,
        }
    }
}

impl DosingLimits {
    pub fn with_ibuprofen_max(mut self, max_mg: f64) -> Self {
        self.ibuprofen_max_mg = max_mg;
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct DoseCalculator {
    limits: DosingLimits,
}

impl DoseCalculator {
    pub fn new(limits: DosingLimits) -> Self {
        Self { limits }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self::new(DosingLimits::default().with_ibuprofen_max(config.ibuprofen_max_single_dose_mg()))
    }

    pub fn limits(&self) -> &DosingLimits {
        &self.limits
    }

    /// Rules applied for a bracket, in display order. Empty for infants
    /// under two months.
    pub fn rules_for(&self, age: AgeBracket) -> Vec<DosingRule> {
        match age {
            AgeBracket::Under2Months => Vec::new(),
            AgeBracket::From2To6Months => vec![DosingRule {
                drug: Drug::Acetaminophen,
                mg_per_kg: 12.5,
                max_mg: self.limits.acetaminophen_infant_max_mg,
                interval_hours: 4,
                formulations: ACETAMINOPHEN_ONLY,
            }],
            AgeBracket::SixMonthsAndUp => vec![
                DosingRule {
                    drug: Drug::Acetaminophen,
                    mg_per_kg: 15.0,
                    max_mg: self.limits.acetaminophen_max_mg,
                    interval_hours: 6,
                    formulations: ACETAMINOPHEN_ONLY,
                },
                DosingRule {
                    drug: Drug::Ibuprofen,
                    mg_per_kg: 10.0,
                    max_mg: self.limits.ibuprofen_max_mg,
                    interval_hours: 6,
                    formulations: IBUPROFEN_SUSPENSIONS,
                },
            ],
        }
    }

    /// Pure dose computation. The under-2-months bracket is checked before
    /// the weight so that no weight value can ever produce a dose for it.
    pub fn compute_doses(
        &self,
        age: Option<AgeBracket>,
        weight_value: f64,
        unit: WeightUnit,
    ) -> Result<Vec<DoseResult>, ValidationError> {
        let age = age.ok_or(ValidationError::MissingAge)?;
        if age == AgeBracket::Under2Months {
            return Ok(Vec::new());
        }

        let weight = Weight::new(weight_value, unit)?;
        let kg = weight.kg();
        Ok(self.rules_for(age).iter().map(|rule| rule.apply(kg)).collect())
    }

    /// Doses plus every advisory that has to be shown with them.
    pub fn assess(&self, age: Option<AgeBracket>, weight_value: f64, unit: WeightUnit) -> Outcome {
        let doses = self.compute_doses(age, weight_value, unit)?;
        let age = age.ok_or(ValidationError::MissingAge)?;

        if age == AgeBracket::Under2Months {
            tracing::debug!("age {} requires emergency care; no dose computed", age);
            return Ok(Assessment {
                age,
                patient: None,
                doses,
                advisories: vec![Advisory::SeekEmergencyCare],
            });
        }

        let patient = PatientWeight::from(Weight::new(weight_value, unit)?);
        let mut advisories: Vec<Advisory> = doses
            .iter()
            .filter(|d| d.capped)
            .map(|d| Advisory::MaximumDoseReached {
                drug: d.drug,
                max_single_dose_mg: d.max_single_dose_mg,
            })
            .collect();

        match age {
            AgeBracket::From2To6Months => advisories.push(Advisory::Contraindicated {
                drug: Drug::Ibuprofen,
                bracket: age,
            }),
            AgeBracket::SixMonthsAndUp => advisories.push(Advisory::DoseSpacing {
                acetaminophen_max_mg: self.limits.acetaminophen_max_mg,
                ibuprofen_max_mg: self.limits.ibuprofen_max_mg,
                min_hours: 6,
            }),
            AgeBracket::Under2Months => {}
        }

        for dose in &doses {
            tracing::debug!(
                drug = %dose.drug,
                dose_mg = dose.dose_mg,
                uncapped_mg = dose.uncapped_mg,
                capped = dose.capped,
                "computed dose"
            );
        }

        Ok(Assessment {
            age,
            patient: Some(patient),
            doses,
            advisories,
        })
    }
}

/// Dose computation with the default limits.
pub fn compute_doses(
    age: Option<AgeBracket>,
    weight_value: f64,
    unit: WeightUnit,
) -> Result<Vec<DoseResult>, ValidationError> {
    DoseCalculator::default().compute_doses(age, weight_value, unit)
}
