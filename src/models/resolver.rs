//! Parameter resolution.
//!
//! Every call site that needs a model goes through [`resolve`]:
//!
//! - `Default` / `None`-like inputs give the default record
//! - an existing record is passed through unchanged
//! - a mapping overrides default values key by key
//! - a name is accepted only when it names the default model
//!
//! Unknown keys and unknown names are errors; nothing is silently substituted.
//! Flatness is *not* enforced: an explicit `Ode0` is kept as given and a
//! warning is logged when `Om0 + Ode0 != 1`.

use serde_json::Value;
use tracing::warn;

use crate::domain::{CosmologyParameters, CosmologySpec, DEFAULT_MODEL_NAME, ResolvedModel};
use crate::error::CosmoError;

/// Names accepted by [`CosmologySpec::Named`] (compared case-insensitively).
const DEFAULT_ALIASES: [&str; 2] = ["default", DEFAULT_MODEL_NAME];

/// Resolve a specification to a canonical parameter record.
pub fn resolve(spec: &CosmologySpec) -> Result<CosmologyParameters, CosmoError> {
    resolve_model(spec).map(|model| model.params)
}

/// Resolve a specification to parameters plus a display name.
pub fn resolve_model(spec: &CosmologySpec) -> Result<ResolvedModel, CosmoError> {
    let model = match spec {
        CosmologySpec::Default => default_model(),
        CosmologySpec::Params(params) => {
            params.validate()?;
            ResolvedModel {
                name: params.to_string(),
                params: *params,
            }
        }
        CosmologySpec::Mapping(entries) => {
            let mut params = CosmologyParameters::default();
            for (key, &value) in entries {
                match key.as_str() {
                    "H0" => params.h0 = value,
                    "Om0" => params.om0 = value,
                    "Ode0" => params.ode0 = value,
                    _ => return Err(CosmoError::UnknownParameter { key: key.clone() }),
                }
            }
            params.validate()?;
            ResolvedModel {
                name: params.to_string(),
                params,
            }
        }
        CosmologySpec::Named(name) => {
            let known = DEFAULT_ALIASES
                .iter()
                .any(|alias| alias.eq_ignore_ascii_case(name.trim()));
            if !known {
                return Err(CosmoError::UnknownName {
                    name: name.clone(),
                    expected: DEFAULT_MODEL_NAME.to_string(),
                });
            }
            default_model()
        }
    };

    if !model.params.is_flat() {
        warn!(
            om0 = model.params.om0,
            ode0 = model.params.ode0,
            "Om0 + Ode0 != 1; volume and age use the flat-universe formulas"
        );
    }
    Ok(model)
}

/// Interpret a loosely typed (JSON) specification.
///
/// `null` → default, string → name, object → mapping of numbers. Anything
/// else is an unsupported specification type.
pub fn spec_from_json(value: &Value) -> Result<CosmologySpec, CosmoError> {
    match value {
        Value::Null => Ok(CosmologySpec::Default),
        Value::String(name) => Ok(CosmologySpec::Named(name.clone())),
        Value::Object(map) => {
            let mut entries = std::collections::BTreeMap::new();
            for (key, v) in map {
                let Some(number) = v.as_f64() else {
                    return Err(CosmoError::UnsupportedSpec {
                        found: format!("non-numeric value for '{key}': {v}"),
                    });
                };
                entries.insert(key.clone(), number);
            }
            Ok(CosmologySpec::Mapping(entries))
        }
        Value::Bool(_) => Err(unsupported("boolean")),
        Value::Number(_) => Err(unsupported("number")),
        Value::Array(_) => Err(unsupported("array")),
    }
}

fn unsupported(found: &str) -> CosmoError {
    CosmoError::UnsupportedSpec {
        found: found.to_string(),
    }
}

pub(crate) fn default_model() -> ResolvedModel {
    ResolvedModel {
        name: DEFAULT_MODEL_NAME.to_string(),
        params: CosmologyParameters::default(),
    }
}
