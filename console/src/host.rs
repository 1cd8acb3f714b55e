//! Line commands for driving a `Console` from a terminal.
//!
//! Each stdin line becomes one `Command`, which maps onto exactly one
//! `dispatch` (or a plain field read/write). Replies go to the given writer;
//! the panel itself writes through its own sink.

use std::io::{self, Write};

use escola_core::FieldState;

use crate::wiring::{Console, Event, Outcome};

pub const USAGE: &str = "\
comandos:
  set <campo> <valor...>   preenche um campo
  blur <campo>             valida um campo de email
  submit <formulário>      envia createUserForm ou createProfessorForm
  click <elemento>         aciona um botão de consulta ou clearResults
  show <campo>             mostra o valor atual de um campo
  quit                     encerra";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Empty,
    Set { field: String, value: String },
    Blur(String),
    Submit(String),
    Click(String),
    Show(String),
    Quit,
}

impl Command {
    /// `None` means the line is not a valid command.
    ///
    /// Words are whitespace-separated, except that a `set` value is the rest
    /// of the line after the field name and its one separator, kept verbatim.
    pub fn parse(line: &str) -> Option<Command> {
        if line.trim().is_empty() {
            return Some(Command::Empty);
        }
        let (verb, rest) = next_word(line);
        match verb {
            "quit" | "exit" if rest.trim().is_empty() => Some(Command::Quit),
            "set" => {
                let (field, value) = next_word(rest);
                (!field.is_empty()).then(|| Command::Set {
                    field: field.to_string(),
                    value: value.to_string(),
                })
            }
            "blur" => single(rest).map(Command::Blur),
            "submit" => single(rest).map(Command::Submit),
            "click" => single(rest).map(Command::Click),
            "show" => single(rest).map(Command::Show),
            _ => None,
        }
    }
}

/// Split off the first word; the remainder starts right after the one
/// separator that ended it.
fn next_word(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.split_once(char::is_whitespace) {
        Some((head, tail)) => (head, tail),
        None => (s, ""),
    }
}

fn single(rest: &str) -> Option<String> {
    let mut words = rest.split_whitespace();
    match (words.next(), words.next()) {
        (Some(word), None) => Some(word.to_string()),
        _ => None,
    }
}

/// Run one command. Returns `false` once the session should end.
pub fn run_command(
    console: &Console,
    command: Command,
    out: &mut impl Write,
) -> io::Result<bool> {
    match command {
        Command::Empty => {}
        Command::Quit => return Ok(false),
        Command::Set { field, value } => {
            console.fields().set(&field, value);
            if let Outcome::Masked(masked) = console.dispatch(&field, Event::Input) {
                writeln!(out, "{field} = {masked}")?;
            }
        }
        Command::Blur(field) => match console.dispatch(&field, Event::Blur) {
            Outcome::Checked(FieldState::Normal) => writeln!(out, "{field}: ok")?,
            Outcome::Checked(FieldState::Flagged) => writeln!(out, "{field}: email inválido")?,
            _ => writeln!(out, "{field} não é validado")?,
        },
        Command::Submit(form) => {
            if console.dispatch(&form, Event::Submit) == Outcome::Unbound {
                writeln!(out, "formulário desconhecido: {form}")?;
            }
        }
        Command::Click(element) => {
            if console.dispatch(&element, Event::Click) == Outcome::Unbound {
                writeln!(out, "elemento desconhecido: {element}")?;
            }
        }
        Command::Show(field) => writeln!(out, "{field} = {}", console.fields().get(&field))?,
    }
    Ok(true)
}
