//! # Interactive Shell
//!
//! The console layer. Prints the menu, reads choices and note text, and
//! turns them into `NoteStore` calls.
//!
//! This is the only module that reads stdin or writes stdout. It is generic
//! over `BufRead`/`Write` so tests can drive it with scripted input.
//!
//! ## Loop
//!
//! One state, `menu-wait`. Each pass prints the menu, reads a choice, runs
//! the matching action to completion, and comes back. Exit (or end of input
//! at any prompt) prints a farewell and returns.

mod menu;
mod prompt;
mod render;

use std::io::{self, BufRead, Write};

use log::{debug, info};

use crate::core::note::NoteMatch;
use crate::core::storage::NoteStorage;
use crate::core::store::{NoteStore, StoreError};

pub use menu::{MENU, MenuChoice};
pub use prompt::Prompter;
pub use render::{numbered_notes, parse_selection};

/// What the loop should do after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Effect {
    None,
    Quit,
}

/// Reads a line or quits the action when input is exhausted.
macro_rules! ask_or_quit {
    ($io:expr, $prompt:expr) => {
        match $io.ask($prompt)? {
            Some(line) => line,
            None => return Ok(Effect::Quit),
        }
    };
}

struct Shell<'a, S: NoteStorage, R, W> {
    store: &'a mut NoteStore<S>,
    io: Prompter<R, W>,
}

/// Runs the menu loop until Exit or end of input.
///
/// Errors are console I/O failures only; storage failures are reported to
/// the user and the loop carries on.
pub fn run<S, R, W>(store: &mut NoteStore<S>, input: R, output: W) -> io::Result<()>
where
    S: NoteStorage,
    R: BufRead,
    W: Write,
{
    let mut shell = Shell {
        store,
        io: Prompter::new(input, output),
    };
    shell.run_loop()
}

impl<S: NoteStorage, R: BufRead, W: Write> Shell<'_, S, R, W> {
    fn run_loop(&mut self) -> io::Result<()> {
        loop {
            self.io.write(MENU)?;
            let choice = match self.io.ask("Enter your choice: ")? {
                Some(choice) => choice,
                None => break,
            };

            let effect = match MenuChoice::parse(&choice) {
                Some(action) => {
                    debug!("Menu choice: {:?}", action);
                    self.dispatch(action)?
                }
                None => {
                    debug!("Invalid menu choice: {:?}", choice);
                    self.io.say("Invalid choice. Please try again.")?;
                    Effect::None
                }
            };

            if effect == Effect::Quit {
                break;
            }
        }

        info!("Shell exiting");
        self.io.say("Goodbye!")?;
        self.io.flush()
    }

    fn dispatch(&mut self, choice: MenuChoice) -> io::Result<Effect> {
        match choice {
            MenuChoice::Add => self.add_note(),
            MenuChoice::List => self.list_notes().map(|_| Effect::None),
            MenuChoice::Read => self.view_notes().map(|(effect, _)| effect),
            MenuChoice::Update => self.update_note(),
            MenuChoice::Delete => self.delete_note(),
            MenuChoice::Exit => Ok(Effect::Quit),
        }
    }

    fn add_note(&mut self) -> io::Result<Effect> {
        let title = ask_or_quit!(self.io, "Enter note title: ");
        let body = ask_or_quit!(self.io, "Enter note body: ");

        let result = self.store.add(&title, &body);
        self.report_save(result)?;
        self.io.say("Note added successfully!")?;
        Ok(Effect::None)
    }

    fn list_notes(&mut self) -> io::Result<()> {
        if self.store.is_empty() {
            return self.io.say("No notes found.");
        }
        self.io.say("\nYour Notes:\n")?;
        self.io.write(&numbered_notes(self.store.notes()))
    }

    /// Searches by title and prints the hits numbered from 1.
    fn view_notes(&mut self) -> io::Result<(Effect, Vec<NoteMatch>)> {
        let query = match self.io.ask("Enter note title: ")? {
            Some(query) => query,
            None => return Ok((Effect::Quit, Vec::new())),
        };

        let matches = self.store.search(&query);
        if matches.is_empty() {
            self.io.say(&format!(
                "\nNo notes found with the title containing \"{query}\"."
            ))?;
        } else {
            self.io.say("\nMatching Notes:\n")?;
            self.io
                .write(&numbered_notes(matches.iter().map(|m| &m.note)))?;
        }
        Ok((Effect::None, matches))
    }

    /// Search, display, then read a 1-based pick among the displayed hits.
    ///
    /// `Ok(Err(effect))` means there is nothing to act on.
    fn select_note(&mut self, prompt: &str) -> io::Result<Result<NoteMatch, Effect>> {
        let (effect, mut matches) = self.view_notes()?;
        if effect == Effect::Quit || matches.is_empty() {
            return Ok(Err(effect));
        }

        let answer = match self.io.ask(prompt)? {
            Some(answer) => answer,
            None => return Ok(Err(Effect::Quit)),
        };
        match parse_selection(&answer, matches.len()) {
            Some(index) => Ok(Ok(matches.swap_remove(index))),
            None => {
                debug!("Rejected selection {:?} of {}", answer, matches.len());
                self.io.say("Invalid note number. Please try again.")?;
                Ok(Err(Effect::None))
            }
        }
    }

    fn update_note(&mut self) -> io::Result<Effect> {
        let selected = match self.select_note("Enter the number of the note to update: ")? {
            Ok(selected) => selected,
            Err(effect) => return Ok(effect),
        };

        self.io.say(&format!(
            "\nYou are updating the note titled: \"{}\"\n",
            selected.note.title
        ))?;
        let new_title = ask_or_quit!(
            self.io,
            "Enter the new title (or press Enter to keep the current title): "
        );
        let new_body = ask_or_quit!(
            self.io,
            "Enter the new body (or press Enter to keep the current body): "
        );

        let result = self
            .store
            .update(selected.position, Some(&new_title), Some(&new_body));
        if !self.report_save(result)? {
            return Ok(Effect::None);
        }
        self.io.say("\nNote updated successfully!\n")?;
        Ok(Effect::None)
    }

    fn delete_note(&mut self) -> io::Result<Effect> {
        let selected = match self.select_note("Enter the number of the note to delete: ")? {
            Ok(selected) => selected,
            Err(effect) => return Ok(effect),
        };

        let result = self.store.delete(selected.position).map(|_| ());
        if !self.report_save(result)? {
            return Ok(Effect::None);
        }
        self.io.say(&format!(
            "\nNote titled \"{}\" deleted successfully!\n",
            selected.note.title
        ))?;
        Ok(Effect::None)
    }

    /// Prints the outcome of a mutation's save.
    ///
    /// Returns `false` only when the mutation itself was rejected. A failed
    /// save still counts as applied: the change lives in memory.
    fn report_save(&mut self, result: Result<(), StoreError>) -> io::Result<bool> {
        match result {
            Ok(()) => {
                self.io.say("Notes saved successfully!")?;
                Ok(true)
            }
            Err(StoreError::Storage(e)) => {
                self.io.say(&format!("Error saving notes: {e}"))?;
                Ok(true)
            }
            Err(e @ StoreError::InvalidPosition { .. }) => {
                debug!("Mutation rejected: {}", e);
                self.io.say("Invalid note number. Please try again.")?;
                Ok(false)
            }
        }
    }
}
