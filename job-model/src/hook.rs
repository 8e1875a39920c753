use std::sync::Arc;

use crate::job::JobConfiguration;

/// Transformation/validation callable supplied by the hosting application.
///
/// Hooks are attached to a document while it is being populated and consumed
/// later by the submission layer; this crate never invokes them itself. A
/// failing hook reports through `anyhow` since its error surface belongs to
/// the host, not to the model.
pub type JobHook = Arc<dyn Fn(&mut JobConfiguration) -> anyhow::Result<()> + Send + Sync>;
