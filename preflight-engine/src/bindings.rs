use job_model::JobConfiguration;

use crate::error::Result;

/// Seam for the external binding/substitution engine.
///
/// Transforms registered with the gate run during populate, after hook
/// attachment and before default injection, in registration order. The gate
/// treats them as opaque: a transform that fails aborts populate with the
/// error it returns.
pub trait ConfigTransform: Send + Sync {
    fn apply(&self, config: &mut JobConfiguration) -> Result<()>;
}

impl<F> ConfigTransform for F
where
    F: Fn(&mut JobConfiguration) -> Result<()> + Send + Sync,
{
    fn apply(&self, config: &mut JobConfiguration) -> Result<()> {
        self(config)
    }
}
