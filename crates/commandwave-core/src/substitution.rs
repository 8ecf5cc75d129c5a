//! The substitution engine.
//!
//! Pure, total transforms from `(template, variables)` to rendered text.
//! Slots whose value trims to the empty string never substitute; their
//! placeholder token stays literally in the output. Slots are processed in
//! [`VariableSlot::ALL`] order.
//!
//! Applying a renderer to its own output is not idempotent: a substituted
//! value can itself contain another slot's placeholder token and would be
//! replaced on a second pass. That matches the original controller and is
//! accepted behavior; callers render from the raw template every time.

use crate::variable::{VariableSet, VariableSlot};

/// CSS class wrapped around substituted values in the marked rendering.
pub const SUBSTITUTED_CLASS: &str = "substituted-var";

/// Escapes text for safe embedding in HTML (`& < > " '`).
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Renders a template for copy/execute payloads.
///
/// Every occurrence of a slot's placeholder token is replaced with the
/// slot's trimmed value; slots with empty (after trim) values are left
/// untouched. The result is plain text, safe to hand to a terminal.
pub fn render_plain(template: &str, variables: &VariableSet) -> String {
    let mut out = template.to_string();
    for slot in VariableSlot::ALL {
        let value = variables.get(slot).trim();
        if value.is_empty() {
            continue;
        }
        out = out.replace(slot.placeholder(), value);
    }
    out
}

/// Renders a template for display.
///
/// The template is HTML-escaped first, then the same matching as
/// [`render_plain`] runs over the escaped text, wrapping each
/// independently-escaped value in a `<span class="substituted-var">`
/// highlight. Never use this output as an execute or clipboard payload.
pub fn render_marked(template: &str, variables: &VariableSet) -> String {
    // Placeholder tokens contain no HTML metacharacters, so they survive
    // escaping verbatim and can be matched in the escaped text.
    let mut out = escape_html(template);
    for slot in VariableSlot::ALL {
        let value = variables.get(slot).trim();
        if value.is_empty() {
            continue;
        }
        let replacement = format!(
            "<span class=\"{SUBSTITUTED_CLASS}\">{}</span>",
            escape_html(value)
        );
        out = out.replace(slot.placeholder(), &replacement);
    }
    out
}
