//! Kubernetes resource quantity syntax, e.g. `500m`, `1.5Gi`, `2e3`.

use std::sync::OnceLock;

use regex::Regex;

use crate::domain::workload::error::{GatewayError, GatewayResult};

static QUANTITY: OnceLock<Regex> = OnceLock::new();

fn quantity_regex() -> &'static Regex {
    QUANTITY.get_or_init(|| {
        // number, then one of: binary SI, decimal SI, decimal exponent, nothing
        Regex::new(
            r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:Ki|Mi|Gi|Ti|Pi|Ei|[numkMGTPE]|[eE][+-]?[0-9]+)?$",
        )
        .expect("quantity pattern is valid")
    })
}

pub fn is_valid_quantity(value: &str) -> bool {
    quantity_regex().is_match(value)
}

/// Rejects a malformed quantity for `resource` ("cpu" or "memory").
pub fn validate_quantity(resource: &'static str, value: &str) -> GatewayResult<()> {
    if is_valid_quantity(value) {
        Ok(())
    } else {
        Err(GatewayError::InvalidResourceQuantity {
            resource,
            value: value.to_string(),
        })
    }
}
