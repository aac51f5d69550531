//! Text rendering of the two client views.

use crate::client::state::{ClientState, Session};
use std::fmt::Write;

const FORM_HELP: &str = "\
commands:
  login <username> <password>
  register <username> <password>
  switch        toggle between the login and registration forms
  help | quit";

const LIST_HELP: &str = "\
commands:
  add <title>   add a todo
  toggle <id>   mark done / not done
  edit <id>     edit a title inline, then `save <title>` or `cancel`
  delete <id>   remove a todo
  refresh | logout | help | quit";

pub fn help_text(state: &ClientState) -> &'static str {
    if state.is_authenticated() {
        LIST_HELP
    } else {
        FORM_HELP
    }
}

pub fn render(state: &ClientState) -> String {
    match &state.session {
        Some(session) => render_list(state, session),
        None => render_form(state),
    }
}

fn render_form(state: &ClientState) -> String {
    let mode = state.auth_form.mode;
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", mode.label());
    let _ = writeln!(
        out,
        "`{} <username> <password>` to continue, `switch` for {}",
        mode.label().to_lowercase(),
        mode.toggled().label()
    );
    out
}

fn render_list(state: &ClientState, session: &Session) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== To-Do List ({}) ==", session.username);

    if state.todos.is_empty() {
        let _ = writeln!(out, "  (nothing yet, `add <title>` to start)");
    }

    for todo in &state.todos {
        let checkbox = if todo.completed { "[x]" } else { "[ ]" };
        match &state.editing {
            Some(editing) if editing.id == todo.id => {
                let _ = writeln!(
                    out,
                    "  {} {:>3}  > {}    (`save <title>` / `cancel`)",
                    checkbox, todo.id, editing.title
                );
            }
            _ if todo.completed => {
                let _ = writeln!(out, "  {} {:>3}  {} (done)", checkbox, todo.id, todo.title);
            }
            _ => {
                let _ = writeln!(out, "  {} {:>3}  {}", checkbox, todo.id, todo.title);
            }
        }
    }
    out
}
