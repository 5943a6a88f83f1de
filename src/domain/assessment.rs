//! Assessment form: field constraints, editable buffers and the typed request body.
//!
//! Field set follows the UCI heart-disease features expected by `/api/predict`.

use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use super::wizard::Step;

/// Identifier of one of the 13 assessment fields, in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    Age,
    Sex,
    ChestPainType,
    RestingBloodPressure,
    Cholesterol,
    FastingBloodSugar,
    RestingEcg,
    MaxHeartRate,
    ExerciseInducedAngina,
    StDepression,
    StSlope,
    MajorVessels,
    Thalassemia,
}

/// Option of a select field: submitted value and display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectOption {
    pub value: i64,
    pub label: &'static str,
}

const fn opt(value: i64, label: &'static str) -> SelectOption {
    SelectOption { value, label }
}

const SEX_OPTIONS: &[SelectOption] = &[opt(0, "Female"), opt(1, "Male")];
const CHEST_PAIN_OPTIONS: &[SelectOption] = &[
    opt(0, "Typical angina"),
    opt(1, "Atypical angina"),
    opt(2, "Non-anginal pain"),
    opt(3, "Asymptomatic"),
];
const YES_NO_OPTIONS: &[SelectOption] = &[opt(0, "No"), opt(1, "Yes")];
const FASTING_SUGAR_OPTIONS: &[SelectOption] = &[opt(0, "<= 120 mg/dl"), opt(1, "> 120 mg/dl")];
const ECG_OPTIONS: &[SelectOption] = &[
    opt(0, "Normal"),
    opt(1, "ST-T abnormality"),
    opt(2, "LV hypertrophy"),
];
const SLOPE_OPTIONS: &[SelectOption] = &[opt(0, "Upsloping"), opt(1, "Flat"), opt(2, "Downsloping")];
const VESSEL_OPTIONS: &[SelectOption] = &[opt(0, "0"), opt(1, "1"), opt(2, "2"), opt(3, "3")];
const THAL_OPTIONS: &[SelectOption] = &[
    opt(0, "Unknown"),
    opt(1, "Normal"),
    opt(2, "Fixed defect"),
    opt(3, "Reversible defect"),
];

/// Input kind of a field and its native constraints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    Integer { min: i64, max: i64 },
    Decimal { min: f64, max: f64 },
    Select(&'static [SelectOption]),
}

/// Static definition of a form field.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub id: FieldId,
    pub label: &'static str,
    pub hint: &'static str,
    pub kind: FieldKind,
    pub step: Step,
}

/// All fields, grouped by wizard step.
pub const FIELD_SPECS: [FieldSpec; 13] = [
    FieldSpec {
        id: FieldId::Age,
        label: "Age",
        hint: "years (1-120)",
        kind: FieldKind::Integer { min: 1, max: 120 },
        step: Step::One,
    },
    FieldSpec {
        id: FieldId::Sex,
        label: "Sex",
        hint: "select",
        kind: FieldKind::Select(SEX_OPTIONS),
        step: Step::One,
    },
    FieldSpec {
        id: FieldId::ChestPainType,
        label: "Chest Pain Type",
        hint: "select",
        kind: FieldKind::Select(CHEST_PAIN_OPTIONS),
        step: Step::One,
    },
    FieldSpec {
        id: FieldId::RestingBloodPressure,
        label: "Resting Blood Pressure",
        hint: "mmHg (50-250)",
        kind: FieldKind::Integer { min: 50, max: 250 },
        step: Step::One,
    },
    FieldSpec {
        id: FieldId::Cholesterol,
        label: "Cholesterol",
        hint: "mg/dl (100-600)",
        kind: FieldKind::Integer { min: 100, max: 600 },
        step: Step::Two,
    },
    FieldSpec {
        id: FieldId::FastingBloodSugar,
        label: "Fasting Blood Sugar",
        hint: "select",
        kind: FieldKind::Select(FASTING_SUGAR_OPTIONS),
        step: Step::Two,
    },
    FieldSpec {
        id: FieldId::RestingEcg,
        label: "Resting ECG",
        hint: "select",
        kind: FieldKind::Select(ECG_OPTIONS),
        step: Step::Two,
    },
    FieldSpec {
        id: FieldId::MaxHeartRate,
        label: "Max Heart Rate",
        hint: "bpm (60-250)",
        kind: FieldKind::Integer { min: 60, max: 250 },
        step: Step::Two,
    },
    FieldSpec {
        id: FieldId::ExerciseInducedAngina,
        label: "Exercise Induced Angina",
        hint: "select",
        kind: FieldKind::Select(YES_NO_OPTIONS),
        step: Step::Two,
    },
    FieldSpec {
        id: FieldId::StDepression,
        label: "ST Depression",
        hint: "oldpeak (0-10)",
        kind: FieldKind::Decimal { min: 0.0, max: 10.0 },
        step: Step::Three,
    },
    FieldSpec {
        id: FieldId::StSlope,
        label: "ST Slope",
        hint: "select",
        kind: FieldKind::Select(SLOPE_OPTIONS),
        step: Step::Three,
    },
    FieldSpec {
        id: FieldId::MajorVessels,
        label: "Major Vessels",
        hint: "select",
        kind: FieldKind::Select(VESSEL_OPTIONS),
        step: Step::Three,
    },
    FieldSpec {
        id: FieldId::Thalassemia,
        label: "Thalassemia",
        hint: "select",
        kind: FieldKind::Select(THAL_OPTIONS),
        step: Step::Three,
    },
];

impl FieldId {
    /// Position of the field in wire order.
    #[must_use]
    pub fn index(self) -> usize {
        FIELD_SPECS
            .iter()
            .position(|spec| spec.id == self)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn spec(self) -> &'static FieldSpec {
        &FIELD_SPECS[self.index()]
    }
}

/// Fields shown on the given wizard step, in display order.
pub fn fields_for_step(step: Step) -> impl Iterator<Item = &'static FieldSpec> {
    FIELD_SPECS.iter().filter(move |spec| spec.step == step)
}

/// A field that failed its native constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidField {
    pub field: FieldId,
    pub message: String,
}

impl std::fmt::Display for InvalidField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field.spec().label, self.message)
    }
}

impl std::error::Error for InvalidField {}

/// Check a raw buffer against the field's constraints, mirroring native
/// form validation (required, numeric type, inclusive range, select options).
pub fn validate_field(spec: &FieldSpec, raw: &str) -> Result<(), InvalidField> {
    let invalid = |message: String| InvalidField {
        field: spec.id,
        message,
    };
    let value = raw.trim();

    match spec.kind {
        FieldKind::Select(options) => {
            let selected = value.parse::<i64>().ok();
            if value.is_empty() || !options.iter().any(|o| Some(o.value) == selected) {
                return Err(invalid("Please select an item in the list.".to_string()));
            }
        }
        FieldKind::Integer { min, max } => {
            if value.is_empty() {
                return Err(invalid("Please fill out this field.".to_string()));
            }
            let n: i64 = value
                .parse()
                .map_err(|_| invalid("Please enter a whole number.".to_string()))?;
            check_range(n as f64, min as f64, max as f64).map_err(invalid)?;
        }
        FieldKind::Decimal { min, max } => {
            if value.is_empty() {
                return Err(invalid("Please fill out this field.".to_string()));
            }
            let n: f64 = value
                .parse()
                .ok()
                .filter(|n: &f64| n.is_finite())
                .ok_or_else(|| invalid("Please enter a number.".to_string()))?;
            check_range(n, min, max).map_err(invalid)?;
        }
    }

    Ok(())
}

fn check_range(n: f64, min: f64, max: f64) -> Result<(), String> {
    if n < min {
        return Err(format!("Value must be greater than or equal to {}.", min));
    }
    if n > max {
        return Err(format!("Value must be less than or equal to {}.", max));
    }
    Ok(())
}

/// Editable form buffers, one per field.
#[derive(Debug, Clone, Default)]
pub struct AssessmentForm {
    values: [String; 13],
}

impl AssessmentForm {
    #[must_use]
    pub fn value(&self, field: FieldId) -> &str {
        &self.values[field.index()]
    }

    pub fn set_value(&mut self, field: FieldId, value: impl Into<String>) {
        self.values[field.index()] = value.into();
    }

    /// Append a typed character. Numeric fields accept digits, `.` and `-`.
    pub fn input_char(&mut self, field: FieldId, c: char) {
        let accepted = match field.spec().kind {
            FieldKind::Integer { .. } => c.is_ascii_digit() || c == '-',
            FieldKind::Decimal { .. } => c.is_ascii_digit() || c == '.' || c == '-',
            FieldKind::Select(_) => false,
        };
        if accepted {
            self.values[field.index()].push(c);
        }
    }

    pub fn delete_char(&mut self, field: FieldId) {
        self.values[field.index()].pop();
    }

    /// Move a select field to the next (or previous) option, wrapping around.
    /// An empty selection starts at the first option.
    pub fn cycle_option(&mut self, field: FieldId, forward: bool) {
        let FieldKind::Select(options) = field.spec().kind else {
            return;
        };
        if options.is_empty() {
            return;
        }
        let current = self
            .value(field)
            .parse::<i64>()
            .ok()
            .and_then(|v| options.iter().position(|o| o.value == v));
        let next = match (current, forward) {
            (None, _) => 0,
            (Some(i), true) => (i + 1) % options.len(),
            (Some(0), false) => options.len() - 1,
            (Some(i), false) => i - 1,
        };
        self.set_value(field, options[next].value.to_string());
    }

    /// Label of the currently selected option, if the field is a select with a valid value.
    #[must_use]
    pub fn selected_label(&self, field: FieldId) -> Option<&'static str> {
        let FieldKind::Select(options) = field.spec().kind else {
            return None;
        };
        let v = self.value(field).parse::<i64>().ok()?;
        options.iter().find(|o| o.value == v).map(|o| o.label)
    }

    /// First field of `step` that fails validation, in display order.
    #[must_use]
    pub fn first_invalid(&self, step: Step) -> Option<InvalidField> {
        fields_for_step(step).find_map(|spec| validate_field(spec, self.value(spec.id)).err())
    }

    /// Wipe all buffers.
    pub fn clear(&mut self) {
        for value in self.values.iter_mut() {
            value.zeroize();
        }
    }

    /// Build the request body with explicit integer/float coercion.
    ///
    /// # Errors
    /// Returns the first field whose buffer cannot be coerced.
    pub fn to_input(&self) -> Result<AssessmentInput, InvalidField> {
        let int = |field: FieldId| -> Result<i64, InvalidField> {
            self.value(field).trim().parse().map_err(|_| InvalidField {
                field,
                message: "Please enter a whole number.".to_string(),
            })
        };
        let st_depression: f64 = self
            .value(FieldId::StDepression)
            .trim()
            .parse()
            .map_err(|_| InvalidField {
                field: FieldId::StDepression,
                message: "Please enter a number.".to_string(),
            })?;

        Ok(AssessmentInput {
            age: int(FieldId::Age)?,
            sex: int(FieldId::Sex)?,
            chest_pain_type: int(FieldId::ChestPainType)?,
            resting_blood_pressure: int(FieldId::RestingBloodPressure)?,
            cholesterol: int(FieldId::Cholesterol)?,
            fasting_blood_sugar: int(FieldId::FastingBloodSugar)?,
            resting_ecg: int(FieldId::RestingEcg)?,
            max_heart_rate: int(FieldId::MaxHeartRate)?,
            exercise_induced_angina: int(FieldId::ExerciseInducedAngina)?,
            st_depression,
            st_slope: int(FieldId::StSlope)?,
            major_vessels: int(FieldId::MajorVessels)?,
            thalassemia: int(FieldId::Thalassemia)?,
        })
    }

    /// Fill every field with a typical moderate-risk patient.
    pub fn load_sample_data(&mut self) {
        let sample = [
            (FieldId::Age, "57"),
            (FieldId::Sex, "1"),
            (FieldId::ChestPainType, "2"),
            (FieldId::RestingBloodPressure, "140"),
            (FieldId::Cholesterol, "241"),
            (FieldId::FastingBloodSugar, "0"),
            (FieldId::RestingEcg, "1"),
            (FieldId::MaxHeartRate, "123"),
            (FieldId::ExerciseInducedAngina, "1"),
            (FieldId::StDepression, "0.2"),
            (FieldId::StSlope, "1"),
            (FieldId::MajorVessels, "0"),
            (FieldId::Thalassemia, "3"),
        ];
        for (field, value) in sample {
            self.set_value(field, value);
        }
    }
}

/// Request body of `/api/predict`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentInput {
    pub age: i64,
    pub sex: i64,
    pub chest_pain_type: i64,
    pub resting_blood_pressure: i64,
    pub cholesterol: i64,
    pub fasting_blood_sugar: i64,
    pub resting_ecg: i64,
    pub max_heart_rate: i64,
    pub exercise_induced_angina: i64,
    pub st_depression: f64,
    pub st_slope: i64,
    pub major_vessels: i64,
    pub thalassemia: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_step_has_fields() {
        assert_eq!(fields_for_step(Step::One).count(), 4);
        assert_eq!(fields_for_step(Step::Two).count(), 5);
        assert_eq!(fields_for_step(Step::Three).count(), 4);
    }

    #[test]
    fn test_field_index_matches_table() {
        for (i, spec) in FIELD_SPECS.iter().enumerate() {
            assert_eq!(spec.id.index(), i);
        }
    }

    #[test]
    fn test_validate_required_and_range() {
        let age = FieldId::Age.spec();
        assert!(validate_field(age, "").is_err());
        assert!(validate_field(age, "0").is_err());
        assert!(validate_field(age, "121").is_err());
        assert!(validate_field(age, "4.5").is_err());
        assert!(validate_field(age, "45").is_ok());

        let st = FieldId::StDepression.spec();
        assert!(validate_field(st, "1.4").is_ok());
        assert!(validate_field(st, "-0.1").is_err());
        assert!(validate_field(st, "abc").is_err());
    }

    #[test]
    fn test_validate_select() {
        let sex = FieldId::Sex.spec();
        assert!(validate_field(sex, "").is_err());
        assert!(validate_field(sex, "2").is_err());
        assert!(validate_field(sex, "1").is_ok());
    }

    #[test]
    fn test_first_invalid_is_in_display_order() {
        let mut form = AssessmentForm::default();
        let err = form.first_invalid(Step::One).expect("empty form is invalid");
        assert_eq!(err.field, FieldId::Age);

        form.set_value(FieldId::Age, "50");
        let err = form.first_invalid(Step::One).expect("sex still missing");
        assert_eq!(err.field, FieldId::Sex);
    }

    #[test]
    fn test_sample_data_is_valid_and_coerces() {
        let mut form = AssessmentForm::default();
        form.load_sample_data();
        for step in [Step::One, Step::Two, Step::Three] {
            assert!(form.first_invalid(step).is_none());
        }

        let input = form.to_input().expect("Should coerce");
        assert_eq!(input.age, 57);
        assert_eq!(input.resting_blood_pressure, 140);
        assert!((input.st_depression - 0.2).abs() < f64::EPSILON);
    }

    #[test]
    fn test_input_serializes_wire_names() {
        let mut form = AssessmentForm::default();
        form.load_sample_data();
        let json = serde_json::to_value(form.to_input().expect("Should coerce")).expect("json");
        assert_eq!(json.as_object().map(|o| o.len()), Some(13));
        assert_eq!(json["exercise_induced_angina"], 1);
        assert_eq!(json["st_depression"], 0.2);
    }

    #[test]
    fn test_cycle_option_wraps() {
        let mut form = AssessmentForm::default();
        form.cycle_option(FieldId::RestingEcg, true);
        assert_eq!(form.value(FieldId::RestingEcg), "0");
        form.cycle_option(FieldId::RestingEcg, false);
        assert_eq!(form.value(FieldId::RestingEcg), "2");
        form.cycle_option(FieldId::RestingEcg, true);
        assert_eq!(form.value(FieldId::RestingEcg), "0");
        assert_eq!(form.selected_label(FieldId::RestingEcg), Some("Normal"));
    }

    #[test]
    fn test_input_char_filters_by_kind() {
        let mut form = AssessmentForm::default();
        form.input_char(FieldId::Age, '4');
        form.input_char(FieldId::Age, '.');
        form.input_char(FieldId::Age, 'x');
        assert_eq!(form.value(FieldId::Age), "4");

        form.input_char(FieldId::StDepression, '1');
        form.input_char(FieldId::StDepression, '.');
        form.input_char(FieldId::StDepression, '5');
        assert_eq!(form.value(FieldId::StDepression), "1.5");

        form.input_char(FieldId::Sex, '1');
        assert_eq!(form.value(FieldId::Sex), "");
    }

    #[test]
    fn test_clear_wipes_all() {
        let mut form = AssessmentForm::default();
        form.load_sample_data();
        form.clear();
        assert!(FIELD_SPECS.iter().all(|s| form.value(s.id).is_empty()));
    }
}
