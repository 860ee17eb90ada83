//! Entry accessors and limits.

use bibstyle_foundation::Result;

use crate::value::StackValue;
use crate::vm::{Context, SORT_KEY};

/// `cite$`: the current entry's citation key.
pub(crate) fn native_cite(ctx: &mut Context) -> Result<()> {
    let key = ctx.require_entry("cite$")?.citation_key().to_string();
    ctx.push(key);
    Ok(())
}

/// `type$`: the current entry's type, lowercased.
pub(crate) fn native_type(ctx: &mut Context) -> Result<()> {
    let entry_type = ctx.require_entry("type$")?.source().type_name();
    ctx.push(entry_type);
    Ok(())
}

/// `sort.key$`: the current entry's sort key, missing until assigned.
pub(crate) fn native_sort_key(ctx: &mut Context) -> Result<()> {
    let key = ctx
        .require_entry(SORT_KEY)?
        .string(SORT_KEY)
        .unwrap_or(StackValue::Missing);
    ctx.push(key);
    Ok(())
}

/// `preamble$`: the bibliography preamble, empty if there is none.
#[allow(clippy::unnecessary_wraps)]
pub(crate) fn native_preamble(ctx: &mut Context) -> Result<()> {
    let preamble = ctx.preamble().to_string();
    ctx.push(preamble);
    Ok(())
}

/// `global.max$`
#[allow(clippy::unnecessary_wraps)]
pub(crate) fn native_global_max(ctx: &mut Context) -> Result<()> {
    ctx.push(i32::MAX);
    Ok(())
}

/// `entry.max$`
#[allow(clippy::unnecessary_wraps)]
pub(crate) fn native_entry_max(ctx: &mut Context) -> Result<()> {
    let max = ctx.config().entry_max;
    ctx.push(max);
    Ok(())
}
