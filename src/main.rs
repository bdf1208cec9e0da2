mod log;

use std::path::PathBuf;

use psi::{Interpreter, Reply, MAX_INPUT};
use rustyline::Editor;
use rustyline::error::ReadlineError;
use structopt::StructOpt;

#[derive(StructOpt, Debug)]
struct Opt {
    #[structopt(short = "d", long = "debug", help = "log each parsed expression")]
    debug: bool,

    #[structopt(long = "max-input", default_value = "1023", help = "lines must be shorter than this many bytes")]
    max_input: usize,

    #[structopt(name = "SCRIPT", parse(from_os_str), help = "psi file to run on startup")]
    script: Option<PathBuf>,
}

const HISTFILE: &str = ".psi_hist";

fn main() {
    let opt = Opt::from_args();
    if opt.debug {
        log::debug(format!("set options: {:?}", opt))
    }
    if opt.max_input != MAX_INPUT {
        log::info(format!("input limit set to {} bytes", opt.max_input));
    }

    let interpreter = Interpreter {
        debug: opt.debug,
        max_input: opt.max_input,
    };

    if let Some(script) = &opt.script {
        match interpreter.run_file(script) {
            Ok(true) => return,
            Ok(false) => {}
            Err(why) => log::warn(why),
        }
    }

    let mut rl = Editor::<()>::new();
    if let Err(err) = rl.load_history(HISTFILE) {
        log::warn(format!("error opening history file: {}", err));
    }

    let prompt = format!("{}psi>{} ", "\x1b[1;94m", log::RESET);

    loop {
        match rl.readline(&prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    rl.add_history_entry(line.as_str());
                }

                match interpreter.run(&line) {
                    Reply::Output(text) => println!("{}", text),
                    Reply::Quit => {
                        println!("Quitting...");
                        break;
                    }
                }
            }

            Err(ReadlineError::Interrupted) => {
                println!("^C");
            }

            Err(ReadlineError::Eof) => {
                println!("Quitting...");
                break;
            }

            Err(err) => {
                log::error(err);
                break;
            }
        }
    }

    if let Err(err) = rl.save_history(HISTFILE) {
        log::warn(format!("error saving history file: {}", err));
    }
}
