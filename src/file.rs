use failure::Error;

use std::fmt::Debug;
use std::fs::File;
use std::io::prelude::*;
use std::io::BufReader;
use std::path::Path;

use crate::log;
use crate::{Interpreter, Reply};

impl Interpreter {
    /// run each line of a file, printing what it produces. stops early
    /// at a line that quits and reports whether it did.
    pub fn run_file<P>(&self, path: P) -> Result<bool, Error>
        where P: AsRef<Path> + Debug
    {
        log::info(format!("running {:?}...", path));

        let file = File::open(path)?;
        let stdout = std::io::stdout();
        let quit = self.run_lines(BufReader::new(file), &mut stdout.lock())?;

        log::info("run_file: done");
        Ok(quit)
    }

    /// feed every line of `input` through `run`, writing replies to `out`.
    /// returns whether the input asked to quit.
    pub fn run_lines<R, W>(&self, input: R, out: &mut W) -> Result<bool, Error>
        where R: BufRead, W: Write
    {
        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            match self.run(&line) {
                Reply::Output(text) => writeln!(out, "{}", text)?,
                Reply::Quit => {
                    writeln!(out, "Quitting...")?;
                    return Ok(true);
                }
            }
        }

        Ok(false)
    }
}
