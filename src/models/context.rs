//! Caller-owned "current model".
//!
//! There is no process-wide default: code that wants a mutable current model
//! owns a `CosmologyContext` and passes it around explicitly.

use crate::domain::{CosmologyParameters, CosmologySpec, ResolvedModel};
use crate::error::CosmoError;
use crate::models::resolver::{default_model, resolve_model};

#[derive(Debug, Clone, PartialEq)]
pub struct CosmologyContext {
    current: ResolvedModel,
}

impl Default for CosmologyContext {
    fn default() -> Self {
        Self {
            current: default_model(),
        }
    }
}

impl CosmologyContext {
    /// Start from an explicit specification.
    pub fn new(spec: &CosmologySpec) -> Result<Self, CosmoError> {
        Ok(Self {
            current: resolve_model(spec)?,
        })
    }

    pub fn params(&self) -> CosmologyParameters {
        self.current.params
    }

    pub fn name(&self) -> &str {
        &self.current.name
    }

    pub fn model(&self) -> &ResolvedModel {
        &self.current
    }

    /// Resolve `spec` and make it current. On error the context is unchanged.
    pub fn set(&mut self, spec: &CosmologySpec) -> Result<&ResolvedModel, CosmoError> {
        self.current = resolve_model(spec)?;
        Ok(&self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_replaces_current_model() {
        let mut ctx = CosmologyContext::default();
        assert_eq!(ctx.name(), "FlatLambdaCDM");

        let custom = CosmologyParameters::flat(70.0, 0.3);
        ctx.set(&CosmologySpec::Params(custom)).unwrap();
        assert_eq!(ctx.params(), custom);
        assert!(ctx.name().contains("H0=70"));
    }

    #[test]
    fn default_context_matches_the_resolved_default() {
        let ctx = CosmologyContext::default();
        let resolved = resolve_model(&CosmologySpec::Default).unwrap();
        assert_eq!(ctx.model(), &resolved);
        assert_eq!(ctx, CosmologyContext::new(&CosmologySpec::Default).unwrap());
    }

    #[test]
    fn failed_set_keeps_previous_model() {
        let mut ctx = CosmologyContext::default();
        let before = ctx.clone();
        assert!(ctx.set(&CosmologySpec::Named("WMAP9".to_string())).is_err());
        assert_eq!(ctx, before);
    }

    #[test]
    fn resolving_does_not_touch_other_contexts() {
        let a = CosmologyContext::default();
        let mut b = CosmologyContext::default();
        b.set(&CosmologySpec::Params(CosmologyParameters::flat(80.0, 0.2)))
            .unwrap();
        assert_eq!(a.params(), CosmologyParameters::default());
    }
}
