//! Request validation
//!
//! Each field has an ordered list of rules; the first one that fails gives the
//! field's message. All failing fields are reported together.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::dto::customer::CustomerRequest;

static NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-ZáéíóúÁÉÍÓÚñÑ ]+$").expect("name pattern is valid"));

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*$")
        .expect("email pattern is valid")
});

/// Field name to message
pub type ValidationErrors = BTreeMap<String, String>;

/// One check applied to an optional field value
struct Rule {
    check: fn(Option<&str>) -> bool,
    message: &'static str,
}

const NAME_RULES: &[Rule] = &[
    Rule {
        check: not_blank,
        message: "El nombre no puede estar vacío",
    },
    Rule {
        check: name_length,
        message: "El nombre debe tener entre 2 y 100 caracteres",
    },
    Rule {
        check: name_characters,
        message: "El nombre solo puede contener letras y espacios",
    },
];

const EMAIL_RULES: &[Rule] = &[
    Rule {
        check: not_blank,
        message: "El email no puede estar vacío",
    },
    Rule {
        check: email_format,
        message: "El email debe ser válido",
    },
];

const PHONE_RULES: &[Rule] = &[Rule {
    check: phone_length,
    message: "El teléfono no puede exceder 15 caracteres",
}];

fn not_blank(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

// The remaining rules only judge values that are present.

fn name_length(value: Option<&str>) -> bool {
    value.map_or(true, |v| (2..=100).contains(&v.chars().count()))
}

fn name_characters(value: Option<&str>) -> bool {
    value.map_or(true, |v| NAME_PATTERN.is_match(v))
}

/// Longest local part accepted before the `@`
const EMAIL_LOCAL_MAX: usize = 64;

/// Width of the `email` column
const EMAIL_MAX: usize = 255;

fn email_format(value: Option<&str>) -> bool {
    value.map_or(true, |v| {
        let local_fits = v
            .rsplit_once('@')
            .is_some_and(|(local, _)| local.len() <= EMAIL_LOCAL_MAX);

        v.chars().count() <= EMAIL_MAX && local_fits && EMAIL_PATTERN.is_match(v)
    })
}

fn phone_length(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.chars().count() <= 15)
}

fn first_failure(rules: &[Rule], value: Option<&str>) -> Option<&'static str> {
    rules
        .iter()
        .find(|rule| !(rule.check)(value))
        .map(|rule| rule.message)
}

/// Validate a create/update body
pub fn validate_customer(request: &CustomerRequest) -> Result<(), ValidationErrors> {
    let fields = [
        ("nombre", NAME_RULES, request.nombre.as_deref()),
        ("email", EMAIL_RULES, request.email.as_deref()),
        ("telefono", PHONE_RULES, request.telefono.as_deref()),
    ];

    let errors: ValidationErrors = fields
        .into_iter()
        .filter_map(|(field, rules, value)| {
            first_failure(rules, value).map(|message| (field.to_string(), message.to_string()))
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
