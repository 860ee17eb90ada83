//! Integer arithmetic and comparison.
//!
//! Operands are popped right then left, so `#5 #3 -` computes `5 - 3`.

use bibstyle_foundation::{Error, Result, ValueKind};

use crate::value::StackValue;
use crate::vm::Context;

fn pop_operands(ctx: &mut Context, operation: &str) -> Result<(i32, i32)> {
    let right = ctx.pop_integer(operation)?;
    let left = ctx.pop_integer(operation)?;
    Ok((left, right))
}

/// `+`: wrapping sum.
pub(crate) fn native_add(ctx: &mut Context) -> Result<()> {
    let (a, b) = pop_operands(ctx, "+")?;
    ctx.push(a.wrapping_add(b));
    Ok(())
}

/// `-`: wrapping difference.
pub(crate) fn native_sub(ctx: &mut Context) -> Result<()> {
    let (a, b) = pop_operands(ctx, "-")?;
    ctx.push(a.wrapping_sub(b));
    Ok(())
}

/// `<`
pub(crate) fn native_lt(ctx: &mut Context) -> Result<()> {
    let (a, b) = pop_operands(ctx, "<")?;
    ctx.push(StackValue::boolean(a < b));
    Ok(())
}

/// `>`
pub(crate) fn native_gt(ctx: &mut Context) -> Result<()> {
    let (a, b) = pop_operands(ctx, ">")?;
    ctx.push(StackValue::boolean(a > b));
    Ok(())
}

/// `=`: equality of two integers or two texts.
///
/// Missing equals only Missing and is unequal to any text.
pub(crate) fn native_eq(ctx: &mut Context) -> Result<()> {
    let right = ctx.pop("=")?;
    let left = ctx.pop("=")?;
    let equal = match (&left, &right) {
        (StackValue::Integer(a), StackValue::Integer(b)) => a == b,
        (StackValue::Text(a), StackValue::Text(b)) => a == b,
        (StackValue::Missing, StackValue::Missing) => true,
        (StackValue::Missing, StackValue::Text(_)) | (StackValue::Text(_), StackValue::Missing) => {
            false
        }
        (StackValue::Integer(_), other) => {
            return Err(Error::type_mismatch("=", ValueKind::Integer, other.kind()));
        }
        (StackValue::Text(_) | StackValue::Missing, other) => {
            return Err(Error::type_mismatch("=", ValueKind::Text, other.kind()));
        }
        (StackValue::Function(_), _) => {
            return Err(Error::type_mismatch("=", ValueKind::Integer, ValueKind::Function));
        }
    };
    ctx.push(StackValue::boolean(equal));
    Ok(())
}
