use std::io::Write;

use crossterm::{queue, style};

use crate::config::{KeyBindings, Toggles};

/// Key hints for the bottom bar. Switches that are on get a `*`.
pub fn hint_items(bindings: &KeyBindings, toggles: &Toggles) -> Vec<String> {
    let mark = |on: bool| if on { "*" } else { "" };
    vec![
        format!("[{}] color{}", bindings.toggle_color, mark(toggles.show_color)),
        format!("[{}] glitch{}", bindings.toggle_glitch, mark(toggles.show_glitch)),
        format!("[{}] float{}", bindings.toggle_animation, mark(toggles.show_animation)),
        format!("[{}] monitor{}", bindings.toggle_monitor, mark(toggles.show_monitor)),
        format!("[{}] reload", bindings.reload),
        format!("[{}] quit", bindings.quit),
    ]
}

/// Print a menu item string, bolding any text inside `[...]` brackets.
/// Text outside brackets is printed dim.
pub fn print_menu_item<W: Write>(out: &mut W, item: &str) -> anyhow::Result<()> {
    let mut rest = item;
    while !rest.is_empty() {
        let Some(open) = rest.find('[') else {
            print_dim(out, rest)?;
            break;
        };
        if open > 0 {
            print_dim(out, &rest[..open])?;
        }
        rest = &rest[open..];
        match rest.find(']') {
            Some(close) => {
                queue!(
                    out,
                    style::SetAttribute(style::Attribute::Bold),
                    style::Print(&rest[..=close]),
                    style::SetAttribute(style::Attribute::Reset),
                )?;
                rest = &rest[close + 1..];
            }
            None => {
                queue!(out, style::Print(rest))?;
                break;
            }
        }
    }
    Ok(())
}

fn print_dim<W: Write>(out: &mut W, text: &str) -> anyhow::Result<()> {
    queue!(
        out,
        style::SetAttribute(style::Attribute::Dim),
        style::Print(text),
        style::SetAttribute(style::Attribute::Reset),
    )?;
    Ok(())
}
