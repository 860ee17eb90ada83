//! Text manipulation functions for the VM.

use bibstyle_foundation::{Error, Result};

use crate::text::{self, CaseMode};
use crate::value::StackValue;
use crate::vm::Context;

/// `*`: appends the top text to the one below it.
pub(crate) fn native_concat(ctx: &mut Context) -> Result<()> {
    let right = ctx.pop_text("*")?;
    let mut left = ctx.pop_text("*")?;
    left.push_str(&right);
    ctx.push(left);
    Ok(())
}

/// `substring$`: pops length, start, and text.
pub(crate) fn native_substring(ctx: &mut Context) -> Result<()> {
    let len = ctx.pop_integer("substring$")?;
    let start = ctx.pop_integer("substring$")?;
    let s = ctx.pop_text("substring$")?;
    ctx.push(text::substring(&s, start, len));
    Ok(())
}

/// `text.length$`
pub(crate) fn native_text_length(ctx: &mut Context) -> Result<()> {
    let s = ctx.pop_text("text.length$")?;
    ctx.push(i32::try_from(text::text_length(&s)).unwrap_or(i32::MAX));
    Ok(())
}

/// `text.prefix$`: pops a count and text.
pub(crate) fn native_text_prefix(ctx: &mut Context) -> Result<()> {
    let n = ctx.pop_integer("text.prefix$")?;
    let s = ctx.pop_text("text.prefix$")?;
    ctx.push(text::text_prefix(&s, n));
    Ok(())
}

/// `add.period$`
pub(crate) fn native_add_period(ctx: &mut Context) -> Result<()> {
    let s = ctx.pop_text("add.period$")?;
    ctx.push(text::add_period(&s));
    Ok(())
}

/// `chr.to.int$`: code point of a one-character text.
pub(crate) fn native_chr_to_int(ctx: &mut Context) -> Result<()> {
    let s = ctx.pop_text("chr.to.int$")?;
    let mut chars = s.chars();
    let (Some(c), None) = (chars.next(), chars.next()) else {
        return Err(Error::invalid_argument(
            "chr.to.int$",
            format!("expected a single character, got {s:?}"),
        ));
    };
    // Every char fits: the largest code point is 0x10FFFF.
    ctx.push(i32::try_from(u32::from(c)).unwrap_or(i32::MAX));
    Ok(())
}

/// `int.to.chr$`
pub(crate) fn native_int_to_chr(ctx: &mut Context) -> Result<()> {
    let n = ctx.pop_integer("int.to.chr$")?;
    let c = u32::try_from(n)
        .ok()
        .and_then(char::from_u32)
        .ok_or_else(|| {
            Error::invalid_argument("int.to.chr$", format!("{n} is not a character code"))
        })?;
    ctx.push(c.to_string());
    Ok(())
}

/// `int.to.str$`
pub(crate) fn native_int_to_str(ctx: &mut Context) -> Result<()> {
    let n = ctx.pop_integer("int.to.str$")?;
    ctx.push(n.to_string());
    Ok(())
}

/// `empty$`: true for missing or whitespace-only text.
pub(crate) fn native_empty(ctx: &mut Context) -> Result<()> {
    let empty = match ctx.pop("empty$")? {
        StackValue::Missing => true,
        StackValue::Text(s) => s.trim().is_empty(),
        StackValue::Integer(_) | StackValue::Function(_) => false,
    };
    ctx.push(StackValue::boolean(empty));
    Ok(())
}

/// `missing$`
pub(crate) fn native_missing(ctx: &mut Context) -> Result<()> {
    let missing = ctx.pop("missing$")?.is_missing();
    ctx.push(StackValue::boolean(missing));
    Ok(())
}

/// `quote$`: pushes a double quote.
pub(crate) fn native_quote(ctx: &mut Context) -> Result<()> {
    ctx.push("\"");
    Ok(())
}

/// `purify$`
pub(crate) fn native_purify(ctx: &mut Context) -> Result<()> {
    let s = ctx.pop_text("purify$")?;
    ctx.push(text::purify(&s));
    Ok(())
}

/// `width$`
pub(crate) fn native_width(ctx: &mut Context) -> Result<()> {
    let s = ctx.pop_text("width$")?;
    ctx.push(text::text_width(&s));
    Ok(())
}

/// `change.case$`: pops a mode specifier and text.
pub(crate) fn native_change_case(ctx: &mut Context) -> Result<()> {
    let spec = ctx.pop_text("change.case$")?;
    let s = ctx.pop_text("change.case$")?;
    let mode = CaseMode::parse(&spec).ok_or_else(|| {
        Error::invalid_argument("change.case$", format!("unknown case mode {spec:?}"))
    })?;
    ctx.push(text::change_case(&s, mode));
    Ok(())
}
