//! Renders module templates into the text shown on the bar.
//!
//! The supported syntax is a small subset of the py3status format language:
//!
//! - `{name}` is replaced by the bound value of `name`
//! - `[...]` is an optional block, dropped unless something inside it is shown
//!   or it only holds static text
//! - `|` separates alternatives, the first one that is shown wins
//! - `\?if=name ` / `\?if=!name ` at the start of an alternative only keeps it
//!   when `name` is truthy / falsy, `\?show ` always keeps it, `\?soft ` keeps
//!   its text without counting as shown content. Commands can be joined with
//!   `&`, unknown ones (e.g. `color=`) are ignored.
//! - `\x` is a literal `x`
//!
//! `true` booleans render as `True` and `false` ones as nothing, like py3status.

use std::{iter::Peekable, str::Chars};

use crate::{Fields, Value};

pub trait Formatter {
    fn format(&self, template: &str, fields: &Fields) -> String;
}

/// Never fails: malformed templates render as much as can be made sense of.
#[derive(Debug, Default, Clone, Copy)]
pub struct SafeFormatter;

impl Formatter for SafeFormatter {
    fn format(&self, template: &str, fields: &Fields) -> String {
        let mut chars = template.chars().peekable();
        let root = parse_block(&mut chars, true);
        root.alternatives
            .iter()
            .find_map(|alternative| render_alternative(alternative, fields, true))
            .map(|rendered| rendered.text)
            .unwrap_or_default()
    }
}

#[derive(Debug)]
enum Node {
    Text(String),
    Placeholder(String),
    Block(Block),
}

#[derive(Debug, Default)]
struct Commands {
    condition: Option<(String, bool)>,
    show: bool,
    soft: bool,
}

#[derive(Debug)]
struct Alternative {
    commands: Commands,
    nodes: Vec<Node>,
}

#[derive(Debug)]
struct Block {
    alternatives: Vec<Alternative>,
}

struct Rendered {
    text: String,
    soft: bool,
}

fn parse_block(chars: &mut Peekable<Chars<'_>>, top_level: bool) -> Block {
    let mut alternatives = vec![parse_alternative(chars, top_level)];
    loop {
        match chars.peek() {
            Some('|') => {
                chars.next();
                alternatives.push(parse_alternative(chars, top_level));
            }
            Some(']') => {
                chars.next();
                break;
            }
            _ => break,
        }
    }
    Block { alternatives }
}

fn parse_alternative(chars: &mut Peekable<Chars<'_>>, top_level: bool) -> Alternative {
    let mut commands = Commands::default();
    if chars.clone().take(2).eq(['\\', '?']) {
        chars.next();
        chars.next();
        commands = parse_commands(chars);
    }

    let mut nodes = Vec::new();
    let mut text = String::new();
    while let Some(&c) = chars.peek() {
        match c {
            '|' => break,
            ']' if !top_level => break,
            '\\' => {
                chars.next();
                if let Some(escaped) = chars.next() {
                    text.push(escaped);
                }
            }
            '{' => {
                chars.next();
                let mut name = String::new();
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == '}' {
                        closed = true;
                        break;
                    }
                    name.push(c);
                }
                if closed {
                    flush_text(&mut text, &mut nodes);
                    nodes.push(Node::Placeholder(name));
                } else {
                    text.push('{');
                    text.push_str(&name);
                }
            }
            '[' => {
                chars.next();
                flush_text(&mut text, &mut nodes);
                nodes.push(Node::Block(parse_block(chars, false)));
            }
            _ => {
                chars.next();
                text.push(c);
            }
        }
    }
    flush_text(&mut text, &mut nodes);

    Alternative { commands, nodes }
}

fn flush_text(text: &mut String, nodes: &mut Vec<Node>) {
    if !text.is_empty() {
        nodes.push(Node::Text(std::mem::take(text)));
    }
}

/// Reads `\?` commands up to and including the terminating space.
fn parse_commands(chars: &mut Peekable<Chars<'_>>) -> Commands {
    let mut raw = String::new();
    while let Some(&c) = chars.peek() {
        match c {
            ' ' => {
                chars.next();
                break;
            }
            '[' | ']' | '|' => break,
            _ => {
                chars.next();
                raw.push(c);
            }
        }
    }

    let mut commands = Commands::default();
    for token in raw.split('&') {
        match token {
            "show" => commands.show = true,
            "soft" => commands.soft = true,
            _ => {
                if let Some(name) = token.strip_prefix("if=") {
                    commands.condition = Some(match name.strip_prefix('!') {
                        Some(name) => (name.to_string(), false),
                        None => (name.to_string(), true),
                    });
                }
            }
        }
    }
    commands
}

fn render_block(block: &Block, fields: &Fields) -> Option<Rendered> {
    block
        .alternatives
        .iter()
        .find_map(|alternative| render_alternative(alternative, fields, false))
}

fn render_alternative(
    alternative: &Alternative,
    fields: &Fields,
    force_show: bool,
) -> Option<Rendered> {
    let commands = &alternative.commands;
    if let Some((name, expected)) = &commands.condition {
        let truthy = fields.get(name).is_some_and(Value::is_truthy);
        if truthy != *expected {
            return None;
        }
    }

    let mut text = String::new();
    let mut has_content = false;
    for node in &alternative.nodes {
        match node {
            Node::Text(literal) => text.push_str(literal),
            Node::Placeholder(name) => {
                if let Some(value) = fields.get(name).and_then(Value::as_text) {
                    text.push_str(&value);
                    has_content = true;
                }
            }
            Node::Block(block) => {
                if let Some(rendered) = render_block(block, fields) {
                    text.push_str(&rendered.text);
                    has_content |= !rendered.soft;
                }
            }
        }
    }

    let is_static = alternative
        .nodes
        .iter()
        .all(|node| matches!(node, Node::Text(_)));
    has_content |= is_static && !commands.soft;

    let shown = force_show
        || has_content
        || commands.show
        || commands.soft
        || commands.condition.is_some();
    shown.then_some(Rendered {
        text,
        soft: commands.soft && !has_content,
    })
}
