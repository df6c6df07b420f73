//! Usage and help text.

use std::fmt::Write;

use crate::{Argument, Parser};

macro_rules! w {
    ($($tt:tt)*) => {
        write!($($tt)*).unwrap()
    };
}

const MIN_HELP_WIDTH: usize = 20;

pub(crate) fn render(p: &Parser) -> String {
    let width = p.display_width();
    let mut buf = String::new();

    buf.push_str(&usage(p, width));
    buf.push('\n');

    if !p.description_text().is_empty() {
        blank_line(&mut buf);
        write_wrapped(&mut buf, p.description_text(), width, 0);
    }

    let (positional, optional): (Vec<&Argument>, Vec<&Argument>) =
        p.arguments().iter().partition(|it| it.is_positional());
    let column = p.arguments().iter().map(|it| entry_name(it).len()).max().unwrap_or(0) + 4;

    if !positional.is_empty() {
        blank_line(&mut buf);
        buf.push_str("positional arguments:\n");
        for arg in positional {
            write_entry(&mut buf, &entry_name(arg), arg.help_text(), column, width);
        }
    }
    if !optional.is_empty() {
        blank_line(&mut buf);
        buf.push_str("optional arguments:\n");
        for arg in optional {
            write_entry(&mut buf, &arg.display_name(), arg.help_text(), column, width);
        }
    }

    let commands = p.command_names().collect::<Vec<_>>();
    if !commands.is_empty() {
        blank_line(&mut buf);
        buf.push_str("commands:\n");
        w!(buf, "  {{{}}}\n", commands.join(","));
    }

    if !p.epilog_text().is_empty() {
        blank_line(&mut buf);
        write_wrapped(&mut buf, p.epilog_text(), width, 0);
    }
    buf
}

/// `usage: prog [opts...] [positionals...]`, continuation lines aligned
/// under the first fragment.
fn usage(p: &Parser, width: usize) -> String {
    let mut frags = Vec::new();
    frags.extend(p.arguments().iter().filter(|it| !it.is_positional()).map(Argument::usage));
    frags.extend(p.arguments().iter().filter(|it| it.is_positional()).map(Argument::usage));
    let commands = p.command_names().collect::<Vec<_>>();
    if !commands.is_empty() {
        frags.push(format!("{{{}}} ...", commands.join(",")));
    }

    let mut buf = format!("usage: {}", p.prog());
    let indent = buf.len() + 1;
    let mut line_len = buf.len();
    for frag in frags {
        if line_len > indent && line_len + 1 + frag.len() > width {
            w!(buf, "\n{:indent$}", "");
            line_len = indent;
        } else {
            buf.push(' ');
            line_len += 1;
        }
        line_len += frag.len();
        buf.push_str(&frag);
    }
    buf
}

/// Positionals are listed by their usage fragment so the arity shows,
/// everything else by its dashed names.
fn entry_name(arg: &Argument) -> String {
    if arg.is_positional() {
        arg.usage()
    } else {
        arg.display_name()
    }
}

fn write_entry(buf: &mut String, name: &str, help: &str, column: usize, width: usize) {
    w!(buf, "  {name}");
    let lines = wrap(help, width.saturating_sub(column).max(MIN_HELP_WIDTH));
    let mut lines = lines.iter();
    if let Some(first) = lines.next() {
        if first.is_empty() {
            buf.push('\n');
        } else {
            w!(buf, "{:pad$}{first}\n", "", pad = column.saturating_sub(name.len() + 2));
        }
    }
    for line in lines {
        w!(buf, "{:column$}{line}\n", "");
    }
}

fn write_wrapped(buf: &mut String, text: &str, width: usize, indent: usize) {
    for paragraph in text.split('\n') {
        for line in wrap(paragraph, width.saturating_sub(indent).max(MIN_HELP_WIDTH)) {
            if line.is_empty() {
                buf.push('\n');
            } else {
                w!(buf, "{:indent$}{line}\n", "");
            }
        }
    }
}

/// Greedy word wrap. Words longer than `max` get a line of their own.
pub(crate) fn wrap(text: &str, max: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if !line.is_empty() && line.len() + 1 + word.len() > max {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() || lines.is_empty() {
        lines.push(line);
    }
    lines
}

fn blank_line(buf: &mut String) {
    buf.push('\n');
}
