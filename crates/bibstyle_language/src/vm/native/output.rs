//! The output buffer and warnings.

use bibstyle_foundation::Result;
use tracing::warn;

use crate::vm::Context;

/// `write$`: appends text to the output.
pub(crate) fn native_write(ctx: &mut Context) -> Result<()> {
    let s = ctx.pop_text("write$")?;
    ctx.write(&s);
    Ok(())
}

/// `newline$`
#[allow(clippy::unnecessary_wraps)]
pub(crate) fn native_newline(ctx: &mut Context) -> Result<()> {
    ctx.write("\n");
    Ok(())
}

/// `warning$`: logs a message and records it on the context.
pub(crate) fn native_warning(ctx: &mut Context) -> Result<()> {
    let message = ctx.pop_text("warning$")?;
    let key = ctx.current_entry().map(|e| e.citation_key().to_string());
    warn!(entry = key.as_deref().unwrap_or("-"), "{message}");
    ctx.record_warning(message);
    Ok(())
}
