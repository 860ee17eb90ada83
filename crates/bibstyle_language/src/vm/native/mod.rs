//! Native function implementations for the VM.
//!
//! Builtins are organized by category:
//! - `arithmetic`: Integer arithmetic and comparison
//! - `stack`: Operand stack manipulation and diagnostics
//! - `string`: Text manipulation and predicates
//! - `names`: Person-name parsing and formatting
//! - `control`: Conditionals, loops, assignment, and type dispatch
//! - `entry`: Entry accessors and limits
//! - `output`: The output buffer and warnings

mod arithmetic;
mod control;
mod entry;
mod names;
mod output;
mod stack;
#[allow(clippy::unnecessary_wraps)]
mod string;

#[allow(clippy::wildcard_imports)]
use arithmetic::*;
#[allow(clippy::wildcard_imports)]
use control::*;
#[allow(clippy::wildcard_imports)]
use entry::*;
#[allow(clippy::wildcard_imports)]
use names::*;
#[allow(clippy::wildcard_imports)]
use output::*;
#[allow(clippy::wildcard_imports)]
use stack::*;
#[allow(clippy::wildcard_imports)]
use string::*;

use bibstyle_foundation::Result;

use super::context::Context;

/// Signature shared by every builtin.
pub type NativeFn = fn(&mut Context) -> Result<()>;

/// Names of every builtin, in the order they are documented.
pub const BUILTIN_NAMES: &[&str] = &[
    "+",
    "-",
    "<",
    ">",
    "=",
    "*",
    ":=",
    "add.period$",
    "call.type$",
    "change.case$",
    "chr.to.int$",
    "cite$",
    "duplicate$",
    "empty$",
    "entry.max$",
    "format.name$",
    "global.max$",
    "if$",
    "int.to.chr$",
    "int.to.str$",
    "missing$",
    "newline$",
    "num.names$",
    "pop$",
    "preamble$",
    "purify$",
    "quote$",
    "skip$",
    "sort.key$",
    "stack$",
    "substring$",
    "swap$",
    "text.length$",
    "text.prefix$",
    "top$",
    "type$",
    "warning$",
    "while$",
    "width$",
    "write$",
];

/// Looks up a builtin by name.
pub(crate) fn lookup(name: &str) -> Option<NativeFn> {
    let f: NativeFn = match name {
        "+" => native_add,
        "-" => native_sub,
        "<" => native_lt,
        ">" => native_gt,
        "=" => native_eq,
        "*" => native_concat,
        ":=" => native_assign,
        "add.period$" => native_add_period,
        "call.type$" => native_call_type,
        "change.case$" => native_change_case,
        "chr.to.int$" => native_chr_to_int,
        "cite$" => native_cite,
        "duplicate$" => native_duplicate,
        "empty$" => native_empty,
        "entry.max$" => native_entry_max,
        "format.name$" => native_format_name,
        "global.max$" => native_global_max,
        "if$" => native_if,
        "int.to.chr$" => native_int_to_chr,
        "int.to.str$" => native_int_to_str,
        "missing$" => native_missing,
        "newline$" => native_newline,
        "num.names$" => native_num_names,
        "pop$" => native_pop,
        "preamble$" => native_preamble,
        "purify$" => native_purify,
        "quote$" => native_quote,
        "skip$" => native_skip,
        "sort.key$" => native_sort_key,
        "stack$" => native_stack,
        "substring$" => native_substring,
        "swap$" => native_swap,
        "text.length$" => native_text_length,
        "text.prefix$" => native_text_prefix,
        "top$" => native_top,
        "type$" => native_type,
        "warning$" => native_warning,
        "while$" => native_while,
        "width$" => native_width,
        "write$" => native_write,
        _ => return None,
    };
    Some(f)
}
