//! In-memory model of the page contract: a form of named numeric inputs.

use crate::models::{parse_float, FormSnapshot};

/// Allowed granularity of a number input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    Any,
    Value(f64),
}

impl Default for Step {
    fn default() -> Self {
        Step::Value(1.0)
    }
}

/// Native constraints of an `<input type="number">`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Constraints {
    pub required: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub step: Step,
}

impl Constraints {
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    pub fn step(mut self, step: Step) -> Self {
        self.step = step;
        self
    }
}

/// Result of constraint validation, one flag per native check. `custom_error`
/// is set by [`crate::validator::InputValidator`] when a field rule fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidityState {
    pub value_missing: bool,
    pub bad_input: bool,
    pub range_underflow: bool,
    pub range_overflow: bool,
    pub step_mismatch: bool,
    pub custom_error: bool,
}

impl ValidityState {
    pub fn valid(&self) -> bool {
        !(self.value_missing
            || self.bad_input
            || self.range_underflow
            || self.range_overflow
            || self.step_mismatch
            || self.custom_error)
    }
}

/// Set of CSS classes on an element. Order is kept, duplicates are not.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList(Vec<String>);

impl ClassList {
    pub fn add(&mut self, class: &str) {
        if !self.contains(class) {
            self.0.push(class.to_string());
        }
    }

    pub fn remove(&mut self, class: &str) {
        self.0.retain(|c| c != class);
    }

    pub fn toggle(&mut self, class: &str, on: bool) {
        if on {
            self.add(class);
        } else {
            self.remove(class);
        }
    }

    pub fn contains(&self, class: &str) -> bool {
        self.0.iter().any(|c| c == class)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NumberInput {
    pub name: String,
    /// Raw text as typed.
    pub value: String,
    pub constraints: Constraints,
    pub class_list: ClassList,
}

impl NumberInput {
    pub fn new(name: impl Into<String>, constraints: Constraints) -> Self {
        Self {
            name: name.into(),
            value: String::new(),
            constraints,
            class_list: ClassList::default(),
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Replaces the raw text, as a keystroke or paste would.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// The value a submission sends for this field.
    pub fn numeric_value(&self) -> f64 {
        parse_float(&self.value)
    }

    pub fn validity(&self) -> ValidityState {
        let mut state = ValidityState::default();

        if self.value.is_empty() {
            state.value_missing = self.constraints.required;
            return state;
        }
        let Some(value) = parse_valid_float(&self.value) else {
            state.bad_input = true;
            return state;
        };

        let Constraints { min, max, step, .. } = &self.constraints;
        state.range_underflow = min.is_some_and(|min| value < min);
        state.range_overflow = max.is_some_and(|max| value > max);
        if let Step::Value(step) = *step {
            // A zero, negative or non-finite step falls back to the default of 1.
            let step = if step.is_finite() && step > 0.0 { step } else { 1.0 };
            let base = min.unwrap_or(0.0);
            let steps = (value - base) / step;
            state.step_mismatch = (steps - steps.round()).abs() > 1e-9 * steps.abs().max(1.0);
        }
        state
    }
}

/// Parses text only if it is an HTML "valid floating-point number":
/// optional `-`, digits and/or `.digits`, optional exponent. No `+`, no
/// surrounding whitespace.
pub fn parse_valid_float(text: &str) -> Option<f64> {
    let bytes = text.as_bytes();
    let len = bytes.len();
    let mut i = 0;

    if bytes.first() == Some(&b'-') {
        i = 1;
    }
    let int_start = i;
    while i < len && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let int_digits = i - int_start;

    let mut frac_digits = 0;
    if i < len && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < len && bytes[i].is_ascii_digit() {
            i += 1;
        }
        frac_digits = i - frac_start;
        if frac_digits == 0 {
            return None;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if i < len && (bytes[i] == b'e' || bytes[i] == b'E') {
        i += 1;
        if i < len && (bytes[i] == b'+' || bytes[i] == b'-') {
            i += 1;
        }
        let exp_start = i;
        while i < len && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return None;
        }
    }

    if i != len {
        return None;
    }
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Event handed to the submit handler.
#[derive(Debug, Default)]
pub struct SubmitEvent {
    default_prevented: bool,
}

impl SubmitEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Form {
    inputs: Vec<NumberInput>,
}

impl Form {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input(mut self, input: NumberInput) -> Self {
        self.inputs.push(input);
        self
    }

    pub fn push(&mut self, input: NumberInput) {
        self.inputs.push(input);
    }

    pub fn input(&self, name: &str) -> Option<&NumberInput> {
        self.inputs.iter().find(|input| input.name == name)
    }

    pub fn input_mut(&mut self, name: &str) -> Option<&mut NumberInput> {
        self.inputs.iter_mut().find(|input| input.name == name)
    }

    pub fn inputs(&self) -> &[NumberInput] {
        &self.inputs
    }

    pub fn inputs_mut(&mut self) -> &mut [NumberInput] {
        &mut self.inputs
    }

    /// Captures every field, unparseable ones included as NaN.
    pub fn snapshot(&self) -> FormSnapshot {
        self.inputs
            .iter()
            .map(|input| (input.name.clone(), input.numeric_value()))
            .collect()
    }

    /// Inputs expected by the house price service, in its feature order.
    pub fn house_prices() -> Self {
        let count = || Constraints::default().required().min(0.0).step(Step::Any);
        Form::new()
            .with_input(NumberInput::new(
                "longitude",
                Constraints::default().required().min(-180.0).max(180.0).step(Step::Any),
            ))
            .with_input(NumberInput::new(
                "latitude",
                Constraints::default().required().min(-90.0).max(90.0).step(Step::Any),
            ))
            .with_input(NumberInput::new(
                "housing_median_age",
                Constraints::default().required().min(0.0).max(100.0),
            ))
            .with_input(NumberInput::new("total_rooms", count()))
            .with_input(NumberInput::new("total_bedrooms", count()))
            .with_input(NumberInput::new("population", count()))
            .with_input(NumberInput::new("households", count()))
            .with_input(NumberInput::new("median_income", count()))
    }
}
