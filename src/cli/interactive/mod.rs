pub mod command;

use console::style;
use rustyline::error::ReadlineError;

use crate::prelude::{Config, IbResult, ProcHost, Session};

use self::command::{default_actions, Interactive};

pub enum CallbackKind {
    None,
}

pub fn default_interactive_callback(s: &str, _kind: CallbackKind) -> IbResult<()> {
    print!("{}", s);
    Ok(())
}

pub fn command_line(_cfg: &Config, session: Session<ProcHost>) -> IbResult<()> {
    let mut rl = rustyline::DefaultEditor::new().expect("Unable to init interactive mode");
    let actions = default_actions();
    let mut interactive = Interactive { actions, session };
    loop {
        let readline = rl.readline(">> ");
        match readline {
            Ok(line) => {
                rl.add_history_entry(line.as_str()).expect("History error");
                if let Err(err) = interactive.execute(default_interactive_callback, &line) {
                    eprintln!("{}", style(format!("{:?}", err)).red());
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => return Ok(()),
            Err(err) => eprintln!("{}", style(format!("{:?}", err)).red()),
        }
    }
}
