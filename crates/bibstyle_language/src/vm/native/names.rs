//! Name-list builtins.

use bibstyle_foundation::{Error, Result};

use crate::text;
use crate::vm::Context;

/// `format.name$`: pops a pattern, a 1-based index, and a name list.
pub(crate) fn native_format_name(ctx: &mut Context) -> Result<()> {
    let pattern = ctx.pop_text("format.name$")?;
    let index = ctx.pop_integer("format.name$")?;
    let names = ctx.pop_text("format.name$")?;

    let list = text::split_names(&names);
    let name = usize::try_from(index)
        .ok()
        .and_then(|i| i.checked_sub(1))
        .and_then(|i| list.get(i))
        .ok_or_else(|| {
            Error::invalid_argument(
                "format.name$",
                format!("name {index} out of range, list has {}", list.len()),
            )
        })?;

    let formatted = text::format_name(&text::parse_name(name), &pattern);
    ctx.push(formatted);
    Ok(())
}

/// `num.names$`
pub(crate) fn native_num_names(ctx: &mut Context) -> Result<()> {
    let names = ctx.pop_text("num.names$")?;
    ctx.push(i32::try_from(text::count_names(&names)).unwrap_or(i32::MAX));
    Ok(())
}
