use std::path::Path;

use crate::prelude::{Error, Host, IbResult, Session};

use super::CallbackKind;

pub fn default_actions() -> ActionList {
    ActionList {
        actions: vec![
            Action::new(
                "?",
                vec![Param::with_default("command", "")],
                help_parser,
                "Display help",
            ),
            Action::new(
                "idb_load",
                vec![Param::new("path")],
                load_parser,
                "Load function names from an analysis database",
            ),
            Action::new(
                "idb_list",
                vec![],
                list_parser,
                "List all loaded names and their runtime addresses",
            ),
            Action::new(
                "idb_solve",
                vec![Param::new("name")],
                solve_parser,
                "Solve a name to its runtime address",
            ),
            Action::new(
                "idb_break",
                vec![Param::new("name")],
                break_parser,
                "Set a breakpoint on a name",
            ),
            Action::new(
                "idb_clean",
                vec![],
                clean_parser,
                "Delete all loaded names",
            ),
            Action::new(
                "idb",
                vec![Param::new("name")],
                solve_parser,
                "Solve a name, expression style",
            ),
            Action::new("q", vec![], exit_parser, "Quit the program"),
        ],
    }
}

/// Command loop state: the action table and the session every command runs
/// against.
pub struct Interactive<H: Host> {
    pub actions: ActionList,
    pub session: Session<H>,
}

impl<H: Host> Interactive<H> {
    pub fn execute(
        &mut self,
        f: impl FnMut(&str, CallbackKind) -> IbResult<()>,
        input: &str,
    ) -> IbResult<()> {
        let Self { actions, session } = self;
        actions.eval(input)?.execute(f, session, actions)
    }
}

/// Command syntax:
/// An action name followed by its parameters, for example:
/// idb_solve main
pub struct ActionList {
    actions: Vec<Action>,
}

impl ActionList {
    pub fn eval(&self, input: &str) -> IbResult<Commands> {
        // tokenize the input
        let words = shell_words::split(input)?;
        let cmd = words.first().map(String::as_str).unwrap_or("");
        let args: Vec<&str> = words.iter().skip(1).map(String::as_str).collect();
        let action = self
            .actions
            .iter()
            .find(|x| x.name == cmd)
            .ok_or(Error::UnknownCommand(cmd.into()))?;

        action.eval(&args)
    }

    fn help(
        &self,
        f: &mut dyn FnMut(&str, CallbackKind) -> IbResult<()>,
        cmd: &str,
    ) -> IbResult<()> {
        let mut printed = false;
        for action in &self.actions {
            if action.name.starts_with(cmd) {
                printed = true;
                action.help(f)?;
            }
        }
        if printed {
            Ok(())
        } else {
            Err(Error::UnknownCommand(cmd.into()))
        }
    }
}

#[derive(Default)]
pub struct Param {
    name: String,
    default_value: Option<String>,
}

impl Param {
    fn new(name: &str) -> Self {
        Self {
            name: name.into(),
            default_value: None,
        }
    }

    fn with_default(name: &str, default_value: &str) -> Self {
        Self {
            name: name.into(),
            default_value: Some(default_value.into()),
        }
    }
}

type CommandParser = fn(&[&str], &[Param]) -> IbResult<Commands>;

pub struct Action {
    help: String,
    name: String,
    params: Vec<Param>,
    parser: CommandParser,
}

impl Action {
    fn new(name: &str, params: Vec<Param>, parser: CommandParser, help: &str) -> Self {
        Self {
            name: name.into(),
            help: help.into(),
            params,
            parser,
        }
    }

    fn eval(&self, args: &[&str]) -> IbResult<Commands> {
        (self.parser)(args, &self.params)
    }

    fn help(&self, f: &mut dyn FnMut(&str, CallbackKind) -> IbResult<()>) -> IbResult<()> {
        f(&self.name, CallbackKind::None)?;
        self.params.iter().try_for_each(|x| {
            if let Some(default_value) = &x.default_value {
                f(
                    &format!(" [{}='{}']", x.name, default_value),
                    CallbackKind::None,
                )
            } else {
                f(&format!(" [{}]", x.name), CallbackKind::None)
            }
        })?;
        f(&format!(" {}\n", self.help), CallbackKind::None)?;
        Ok(())
    }
}

pub enum Commands {
    Exit,
    Help(String),
    Load(String),
    List,
    Solve(String),
    Break(String),
    Clean,
}

impl Commands {
    pub fn execute<H: Host>(
        &self,
        mut f: impl FnMut(&str, CallbackKind) -> IbResult<()>,
        session: &mut Session<H>,
        actions: &ActionList,
    ) -> IbResult<()> {
        match self {
            Commands::Exit => std::process::exit(0),
            Commands::Help(cmd) => actions.help(&mut f, cmd),
            Commands::Load(path) => {
                let path = shellexpand::tilde(path);
                let loaded = session.load(Path::new(&*path))?;
                f(&format!("{} names loaded\n", loaded), CallbackKind::None)
            }
            Commands::List => {
                session.list(&mut |line| f(&format!("{}\n", line), CallbackKind::None))
            }
            Commands::Solve(name) => match session.solve(name) {
                Ok(addr) => f(&format!("0x{:x}\n", addr), CallbackKind::None),
                Err(err) => not_found(&mut f, err),
            },
            Commands::Break(name) => match session.breakpoint(name) {
                Ok(addr) => f(&format!("breakpoint at 0x{:x}\n", addr), CallbackKind::None),
                Err(err) => not_found(&mut f, err),
            },
            Commands::Clean => {
                session.clean();
                Ok(())
            }
        }
    }
}

fn not_found(
    f: &mut dyn FnMut(&str, CallbackKind) -> IbResult<()>,
    err: Error,
) -> IbResult<()> {
    match err {
        Error::NameNotFound(name) => f(
            &format!("error: name {} not found\n", name),
            CallbackKind::None,
        ),
        err => Err(err),
    }
}

/* Command parsers */

fn get_arg_or(args: &[&str], params: &[Param], index: usize) -> IbResult<String> {
    let arg = args.get(index);
    let param = params.get(index);

    match (arg, param) {
        (Some(arg), Some(_param)) => Ok(arg.to_string()),
        (None, Some(param)) => {
            if let Some(def) = &param.default_value {
                Ok(def.into())
            } else {
                Err(Error::InsufficientArguments)
            }
        }
        _ => Err(Error::InsufficientArguments),
    }
}

fn has_too_many_args(args: &[&str], params: &[Param]) -> IbResult<()> {
    if args.len() > params.len() {
        Err(Error::TooManyArguments)
    } else {
        Ok(())
    }
}

fn help_parser(args: &[&str], params: &[Param]) -> IbResult<Commands> {
    has_too_many_args(args, params)?;

    let cmd = get_arg_or(args, params, 0)?;

    Ok(Commands::Help(cmd))
}

fn load_parser(args: &[&str], params: &[Param]) -> IbResult<Commands> {
    has_too_many_args(args, params)?;
    Ok(Commands::Load(get_arg_or(args, params, 0)?))
}

fn list_parser(args: &[&str], params: &[Param]) -> IbResult<Commands> {
    has_too_many_args(args, params)?;
    Ok(Commands::List)
}

fn solve_parser(args: &[&str], params: &[Param]) -> IbResult<Commands> {
    has_too_many_args(args, params)?;
    Ok(Commands::Solve(get_arg_or(args, params, 0)?))
}

fn break_parser(args: &[&str], params: &[Param]) -> IbResult<Commands> {
    has_too_many_args(args, params)?;
    Ok(Commands::Break(get_arg_or(args, params, 0)?))
}

fn clean_parser(args: &[&str], params: &[Param]) -> IbResult<Commands> {
    has_too_many_args(args, params)?;
    Ok(Commands::Clean)
}

fn exit_parser(args: &[&str], params: &[Param]) -> IbResult<Commands> {
    has_too_many_args(args, params)?;
    Ok(Commands::Exit)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::prelude::Address;

    struct MockHost;

    impl Host for MockHost {
        fn image_base(&self) -> IbResult<Address> {
            Ok(0x5550000)
        }

        fn addr_width(&self) -> usize {
            8
        }

        fn set_breakpoint(&mut self, _addr: Address) -> IbResult<()> {
            Ok(())
        }
    }

    fn interactive() -> Interactive<MockHost> {
        let mut session = Session::new(MockHost);
        session.names.def_name("main".into(), 0x1000);
        Interactive {
            actions: default_actions(),
            session,
        }
    }

    fn run(interactive: &mut Interactive<MockHost>, input: &str) -> IbResult<String> {
        let mut out = String::new();
        interactive.execute(
            |s, _kind| {
                out.push_str(s);
                Ok(())
            },
            input,
        )?;
        Ok(out)
    }

    #[test]
    fn eval_dispatches_by_action_name() {
        let actions = default_actions();
        assert!(matches!(
            actions.eval("idb_solve main"),
            Ok(Commands::Solve(name)) if name == "main"
        ));
        assert!(matches!(actions.eval("idb_list"), Ok(Commands::List)));
        assert!(matches!(actions.eval("idb_clean"), Ok(Commands::Clean)));
        assert!(matches!(
            actions.eval("idb main"),
            Ok(Commands::Solve(name)) if name == "main"
        ));
    }

    #[test]
    fn eval_rejects_unknown_commands() {
        let actions = default_actions();
        assert!(matches!(
            actions.eval("bogus"),
            Err(Error::UnknownCommand(cmd)) if cmd == "bogus"
        ));
    }

    #[test]
    fn eval_checks_arity() {
        let actions = default_actions();
        assert!(matches!(
            actions.eval("idb_solve"),
            Err(Error::InsufficientArguments)
        ));
        assert!(matches!(
            actions.eval("idb_list extra"),
            Err(Error::TooManyArguments)
        ));
    }

    #[test]
    fn eval_keeps_quoted_names_whole() {
        let actions = default_actions();
        assert!(matches!(
            actions.eval("idb_solve \"a name\""),
            Ok(Commands::Solve(name)) if name == "a name"
        ));
    }

    #[test]
    fn solve_prints_the_address() {
        let mut interactive = interactive();
        assert_eq!("0x5551000\n", run(&mut interactive, "idb_solve main").unwrap());
    }

    #[test]
    fn missing_name_prints_a_report_instead_of_failing() {
        let mut interactive = interactive();
        assert_eq!(
            "error: name ghost not found\n",
            run(&mut interactive, "idb_solve ghost").unwrap()
        );
        assert_eq!(
            "error: name ghost not found\n",
            run(&mut interactive, "idb_break ghost").unwrap()
        );
    }

    #[test]
    fn clean_then_list_is_silent() {
        let mut interactive = interactive();
        assert_eq!("", run(&mut interactive, "idb_clean").unwrap());
        assert_eq!("", run(&mut interactive, "idb_list").unwrap());
    }

    #[test]
    fn help_lists_matching_actions() {
        let mut interactive = interactive();
        let out = run(&mut interactive, "? idb_solve").unwrap();
        assert!(out.contains("idb_solve"));
        assert!(out.contains("[name]"));
    }
}
