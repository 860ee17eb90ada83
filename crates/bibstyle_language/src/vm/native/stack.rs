//! Operand stack manipulation and diagnostics.

use bibstyle_foundation::Result;
use tracing::info;

use crate::vm::Context;

/// `duplicate$`
pub(crate) fn native_duplicate(ctx: &mut Context) -> Result<()> {
    let top = ctx.peek("duplicate$")?.clone();
    ctx.push(top);
    Ok(())
}

/// `pop$`
pub(crate) fn native_pop(ctx: &mut Context) -> Result<()> {
    ctx.pop("pop$").map(drop)
}

/// `swap$`: exchanges the top two values.
pub(crate) fn native_swap(ctx: &mut Context) -> Result<()> {
    let top = ctx.pop("swap$")?;
    let below = ctx.pop("swap$")?;
    ctx.push(top);
    ctx.push(below);
    Ok(())
}

/// `skip$`
#[allow(clippy::unnecessary_wraps)]
pub(crate) fn native_skip(_ctx: &mut Context) -> Result<()> {
    Ok(())
}

/// `top$`: pops and logs the top value.
pub(crate) fn native_top(ctx: &mut Context) -> Result<()> {
    let value = ctx.pop("top$")?;
    info!(value = %value, "top$");
    Ok(())
}

/// `stack$`: drains and logs the stack, top first.
#[allow(clippy::unnecessary_wraps)]
pub(crate) fn native_stack(ctx: &mut Context) -> Result<()> {
    let values = ctx.take_stack();
    for (depth, value) in values.iter().rev().enumerate() {
        info!(depth, value = %value, "stack$");
    }
    Ok(())
}
