//! Live validity feedback for number inputs.
//!
//! Purely advisory: the validator only toggles a marker class. It never edits
//! values and the controller never asks it anything.

use log::debug;

use crate::form::{Form, NumberInput, ValidityState};

/// Class added to an input whose current text fails validation.
pub const INVALID_CLASS: &str = "border-red-500";

/// Extra check layered on top of the native constraints.
pub trait FieldRule {
    fn accepts(&self, value: f64) -> bool;
}

impl<F: Fn(f64) -> bool> FieldRule for F {
    fn accepts(&self, value: f64) -> bool {
        self(value)
    }
}

/// Rejects zero and negative values.
pub struct Positive;

impl FieldRule for Positive {
    fn accepts(&self, value: f64) -> bool {
        value > 0.0
    }
}

#[derive(Default)]
pub struct InputValidator {
    rules: Vec<(String, Box<dyn FieldRule>)>,
}

impl InputValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule for the field called `name`.
    pub fn with_rule(mut self, name: impl Into<String>, rule: impl FieldRule + 'static) -> Self {
        self.rules.push((name.into(), Box::new(rule)));
        self
    }

    /// Native validity, with `custom_error` set when a rule registered for
    /// this field rejects the value. Rules only run against non-empty text
    /// that already passed the native checks.
    pub fn validity(&self, input: &NumberInput) -> ValidityState {
        let mut state = input.validity();
        if !state.valid() || input.value.is_empty() {
            return state;
        }
        let value = input.numeric_value();
        state.custom_error = self
            .rules
            .iter()
            .filter(|(name, _)| *name == input.name)
            .any(|(_, rule)| !rule.accepts(value));
        state
    }

    pub fn is_valid(&self, input: &NumberInput) -> bool {
        self.validity(input).valid()
    }

    /// Input event handler: recompute validity and update the marker.
    pub fn on_input(&self, input: &mut NumberInput) {
        let valid = self.is_valid(input);
        debug!("input {} = {:?} valid={}", input.name, input.value, valid);
        input.class_list.toggle(INVALID_CLASS, !valid);
    }

    /// Runs the handler once over every field of the form.
    pub fn attach(&self, form: &mut Form) {
        for input in form.inputs_mut() {
            self.on_input(input);
        }
    }
}
