pub mod interactive;

use crate::{
    core::config::generate_completion,
    prelude::{Commands, Config, Error, IbResult, ProcHost, Session},
};

pub fn init(cfg: &Config) -> IbResult<()> {
    if let Some(shell) = cfg.completions {
        generate_completion(shell);
        std::process::exit(0);
    }

    #[cfg(feature = "log")]
    init_log(cfg);

    let mut session = Session::new(ProcHost::new(cfg.pid));
    if let Some(path) = &cfg.db {
        session.load(path)?;
    }

    match cfg.command.clone().unwrap_or_default() {
        Commands::Interactive => interactive::command_line(cfg, session),
        Commands::List => list(cfg, &session),
        Commands::Solve { name } => solve(cfg, &session, &name),
        Commands::Break { name } => brk(cfg, &mut session, &name),
    }
}

#[cfg(feature = "log")]
fn init_log(cfg: &Config) {
    let level = match cfg.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    simple_logger::SimpleLogger::new()
        .with_level(level)
        .init()
        .expect("Unable to init logger");
}

fn list(_cfg: &Config, session: &Session<ProcHost>) -> IbResult<()> {
    session.list(&mut |line| {
        println!("{}", line);
        Ok(())
    })
}

fn solve(_cfg: &Config, session: &Session<ProcHost>, name: &str) -> IbResult<()> {
    match session.solve(name) {
        Ok(addr) => println!("0x{:x}", addr),
        Err(Error::NameNotFound(name)) => println!("error: name {} not found", name),
        Err(err) => return Err(err),
    }
    Ok(())
}

fn brk(_cfg: &Config, session: &mut Session<ProcHost>, name: &str) -> IbResult<()> {
    match session.breakpoint(name) {
        Ok(addr) => println!("breakpoint at 0x{:x}", addr),
        Err(Error::NameNotFound(name)) => println!("error: name {} not found", name),
        Err(err) => return Err(err),
    }
    Ok(())
}
