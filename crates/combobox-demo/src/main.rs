#![forbid(unsafe_code)]

//! # Combobox demo
//!
//! Binds the combobox controller to in-memory surfaces and drives it from a
//! raw-mode terminal, playing the role of the host environment: key presses
//! are delivered before the default text edit, key releases after, and
//! deferred commands run once the dispatch turn is over.
//!
//! Keys: type to filter, Up/Down to navigate, Enter to commit, Esc to reset,
//! Ctrl+O to click the toggle, Ctrl+W to simulate a pointer-down elsewhere,
//! Ctrl+C to quit.

use std::cell::RefCell;
use std::io::{Stdout, Write, stdout};
use std::rc::Rc;

use anyhow::Result;
use combobox::combobox::Combobox;
use combobox::event::{Key, PointerTarget};
use combobox::mem::{MemListbox, MemTextField, MemToggle};
use combobox::surface::{ARIA_AUTOCOMPLETE, TextField, ToggleControl};
use crossterm::cursor::MoveTo;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
    enable_raw_mode,
};
use crossterm::{execute, queue, style::Print};

const STATES: [&str; 20] = [
    "Alabama",
    "Alaska",
    "Arizona",
    "Arkansas",
    "California",
    "Colorado",
    "Connecticut",
    "Delaware",
    "Florida",
    "Georgia",
    "Hawaii",
    "Idaho",
    "Illinois",
    "Indiana",
    "Iowa",
    "Kansas",
    "Kentucky",
    "Louisiana",
    "Maine",
    "Maryland",
];

type DemoCombobox = Combobox<&'static str, MemTextField, MemListbox, MemToggle>;

fn build(log: Rc<RefCell<Vec<String>>>) -> DemoCombobox {
    let field = MemTextField::with_attribute(ARIA_AUTOCOMPLETE, "both");
    let listbox = MemListbox::new("states");

    let shown = log.clone();
    let hidden = log.clone();
    let selected = log.clone();
    let errored = log;

    Combobox::new(field, listbox, STATES.to_vec())
        .with_toggle(MemToggle::new("Show state options"))
        .with_initial_value("California")
        .on_shown(move || shown.borrow_mut().push("showing items".to_string()))
        .on_hidden(move || hidden.borrow_mut().push("hiding items".to_string()))
        .on_select(move |c: Option<&&'static str>| {
            let what = c.map_or_else(|| "(cleared)".to_string(), |s| (*s).to_string());
            selected.borrow_mut().push(format!("selected {what}"));
        })
        .on_error(move |_lb: &MemListbox| {
            errored.borrow_mut().push("no matching options".to_string());
        })
}

fn main() -> Result<()> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut cb = build(log.clone());

    enable_raw_mode()?;
    let mut out = stdout();
    execute!(out, EnterAlternateScreen)?;

    let result = run(&mut cb, &log, &mut out);

    execute!(out, LeaveAlternateScreen)?;
    disable_raw_mode()?;
    result
}

fn run(cb: &mut DemoCombobox, log: &Rc<RefCell<Vec<String>>>, out: &mut Stdout) -> Result<()> {
    // Landing on the page focuses the field.
    cb.focus();
    draw(cb, log, out)?;

    loop {
        let Event::Key(key_event) = event::read()? else {
            continue;
        };
        if key_event.kind != KeyEventKind::Press {
            continue;
        }

        let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);
        match (key_event.code, ctrl) {
            (KeyCode::Char('c'), true) => break,
            (KeyCode::Char('o'), true) => cb.toggle_click(),
            (KeyCode::Char('w'), true) => {
                cb.pointer_down(PointerTarget::Elsewhere);
            }
            (code, _) => {
                if let Some(key) = translate(code) {
                    dispatch(cb, key);
                }
            }
        }

        draw(cb, log, out)?;
    }

    Ok(())
}

fn translate(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Tab => Some(Key::Tab),
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::Char(c) => Some(Key::Char(c)),
        _ => None,
    }
}

/// Delivers one key the way an event-driven host would: press first, then the
/// default text edit (unless the press consumed the key), then the release.
/// Deferred commands run after the whole turn.
fn dispatch(cb: &mut DemoCombobox, key: Key) {
    let press = cb.key_down(key);

    if !press.consumed {
        match key {
            Key::Char(c) => {
                let mut value = cb.input().value();
                value.push(c);
                cb.input_mut().set_value(&value);
            }
            Key::Backspace => {
                let mut value = cb.input().value();
                value.pop();
                cb.input_mut().set_value(&value);
            }
            _ => {}
        }
    }

    let release = cb.key_up(key);

    for cmd in [press.cmd, release.cmd].into_iter().flatten() {
        cb.run(cmd);
    }
}

fn draw(cb: &DemoCombobox, log: &Rc<RefCell<Vec<String>>>, out: &mut Stdout) -> Result<()> {
    queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;

    let toggle_label = cb
        .toggle()
        .and_then(MemToggle::label)
        .unwrap_or_default();
    queue!(
        out,
        Print("US state combobox"),
        MoveTo(0, 1),
        Print(format!("State: [{}]  ({toggle_label}: Ctrl+O)", cb.input().value())),
    )?;

    let mut row = 2;
    if cb.listbox().visible() {
        if cb.listbox().options().is_empty() {
            queue!(out, MoveTo(2, row), Print("(no results)"))?;
            row += 1;
        }
        for option in cb.listbox().options() {
            let marker = if option.selected { "> " } else { "  " };
            queue!(out, MoveTo(2, row), Print(format!("{marker}{}", option.label)))?;
            row += 1;
        }
    }

    row += 1;
    for line in log.borrow().iter().rev().take(4) {
        queue!(out, MoveTo(0, row), Print(format!("* {line}")))?;
        row += 1;
    }

    queue!(
        out,
        MoveTo(0, row + 1),
        Print("type to filter | up/down navigate | enter commit | esc reset | ctrl+c quit"),
    )?;

    out.flush()?;
    Ok(())
}
