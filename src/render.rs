//! Projection of [`UiState`] onto result panel markup.
//!
//! Rendering is a pure function of the state: no clock, no I/O, no knowledge
//! of which request produced it.

use num_format::{Locale, ToFormattedString};

use crate::state::UiState;

pub const LOADING_LABEL: &str = "Calculating...";
pub const SUCCESS_HEADING: &str = "ESTIMATED PROPERTY VALUE";
pub const RETRY_HINT: &str = "Please try again later";

pub fn render(state: &UiState) -> String {
    match state {
        UiState::Idle => String::new(),
        UiState::Loading => format!(
            "<div class=\"result-value\">\n    \
             <i class=\"fas fa-spinner fa-spin\"></i>\n    \
             <p>{LOADING_LABEL}</p>\n\
             </div>"
        ),
        UiState::Success { value } => format!(
            "<div class=\"result-value fade-in\">\n    \
             <h3>{SUCCESS_HEADING}</h3>\n    \
             <p>{}</p>\n\
             </div>",
            format_price(*value)
        ),
        UiState::Failure { message, .. } => format!(
            "<div class=\"result-value\">\n    \
             <i class=\"fas fa-exclamation-triangle\"></i>\n    \
             <p>{}</p>\n    \
             <p class=\"text-sm mt-2\">{RETRY_HINT}</p>\n\
             </div>",
            html_escape::encode_text(message)
        ),
    }
}

/// `$` followed by the value in US English number format.
pub fn format_price(value: f64) -> String {
    format!("${}", format_number(value))
}

/// Formats a number the way `Intl.NumberFormat('en-US')` does by default:
/// comma grouping and at most three fraction digits without trailing zeros.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    let sign = if value.is_sign_negative() { "-" } else { "" };
    let abs = value.abs();
    if abs.is_infinite() {
        return format!("{sign}∞");
    }

    let (whole, millis) = if abs >= 1e15 {
        (abs.round(), 0)
    } else {
        let scaled = (abs * 1000.0).round() as u64;
        ((scaled / 1000) as f64, scaled % 1000)
    };

    let grouped = if whole < u128::MAX as f64 {
        (whole as u128).to_formatted_string(&Locale::en)
    } else {
        format!("{whole:.0}")
    };

    if millis == 0 {
        format!("{sign}{grouped}")
    } else {
        let fraction = format!("{millis:03}");
        format!("{sign}{grouped}.{}", fraction.trim_end_matches('0'))
    }
}
