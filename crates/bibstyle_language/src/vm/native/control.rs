//! Control constructs: conditionals, loops, assignment, and type dispatch.

use bibstyle_foundation::{Error, Result};
use tracing::trace;

use crate::value::FunctionRef;
use crate::vm::Context;

/// Function `call.type$` falls back to when no function matches the type.
pub(crate) const DEFAULT_TYPE: &str = "default.type";

/// `if$`: pops else-branch, then-branch, and an integer condition.
pub(crate) fn native_if(ctx: &mut Context) -> Result<()> {
    let otherwise = ctx.pop("if$")?;
    let then = ctx.pop("if$")?;
    let condition = ctx.pop_integer("if$")?;
    ctx.run_branch(if condition == 0 { otherwise } else { then })
}

/// `while$`: pops a body and a condition, both functions.
pub(crate) fn native_while(ctx: &mut Context) -> Result<()> {
    let body = ctx.pop_function("while$")?;
    let condition = ctx.pop_function("while$")?;
    loop {
        ctx.call(&condition)?;
        if ctx.pop_integer("while$")? == 0 {
            return Ok(());
        }
        ctx.call(&body)?;
    }
}

/// `:=`: pops a quoted variable name, then the value to store.
pub(crate) fn native_assign(ctx: &mut Context) -> Result<()> {
    let target = ctx.pop_function(":=")?;
    let value = ctx.pop(":=")?;
    match target {
        FunctionRef::Named(name) => ctx.assign(&name, value),
        FunctionRef::Block(_) => Err(Error::invalid_argument(
            ":=",
            "assignment target must be a quoted name",
        )),
    }
}

/// `call.type$`: runs the function named after the current entry's type.
pub(crate) fn native_call_type(ctx: &mut Context) -> Result<()> {
    let entry_type = ctx.require_entry("call.type$")?.source().type_name();
    let target = if ctx.function(&entry_type).is_some() {
        entry_type
    } else if ctx.function(DEFAULT_TYPE).is_some() {
        DEFAULT_TYPE.to_string()
    } else {
        return Err(Error::dispatch(entry_type));
    };
    trace!(function = %target, "call.type$");
    ctx.invoke(&target)
}
