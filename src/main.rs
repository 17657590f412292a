use anyhow::{Context, Result};
use codelang::{Args, Handler, Input};
use rustyline::{error::ReadlineError, Editor};
use std::{
    fs::{self, File},
    io::{self, BufReader, Write},
    path::Path,
};

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::new();
    let mut prompt = Prompt::new();
    let mut scan_file = match &args.input {
        Some(path) => Some(BufReader::new(
            File::open(path).with_context(|| format!("cannot open {}", path.display()))?,
        )),
        None => None,
    };

    if let Some(file_name) = &args.file_name {
        let input: &mut dyn Input = match &mut scan_file {
            Some(f) => f,
            None => &mut prompt,
        };
        if !run_file(file_name, input)? {
            std::process::exit(1);
        }
    } else {
        while let Some(src) = prompt.read_program()? {
            let input: &mut dyn Input = match &mut scan_file {
                Some(f) => f,
                None => &mut prompt,
            };
            execute(&src, input);
        }
    }
    Ok(())
}

fn run_file(file_name: &Path, input: &mut dyn Input) -> Result<bool> {
    let src = fs::read_to_string(file_name)
        .with_context(|| format!("cannot read {}", file_name.display()))?;
    Ok(execute(&src, input))
}

fn execute(src: &str, input: &mut dyn Input) -> bool {
    match codelang::run(src, input, &mut io::stdout()) {
        Ok(()) => {
            println!();
            true
        }
        Err(e) => {
            Handler::new(src).report(&e);
            false
        }
    }
}

/// Terminal line editor, used both for typing programs and for `SCAN`.
struct Prompt {
    editor: Editor<()>,
}

impl Prompt {
    fn new() -> Self {
        Self {
            editor: Editor::<()>::new(),
        }
    }

    fn line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        io::stdout().flush()?;
        match self.editor.readline(prompt) {
            Ok(line) => Ok(Some(line)),
            Err(ReadlineError::Eof) | Err(ReadlineError::Interrupted) => Ok(None),
            Err(ReadlineError::Io(e)) => Err(e),
            Err(e) => Err(io::Error::new(io::ErrorKind::Other, e.to_string())),
        }
    }

    /// Collects lines up to and including `END CODE`. Returns `None` once the
    /// terminal is closed.
    fn read_program(&mut self) -> Result<Option<String>> {
        let mut src = String::new();
        let mut prompt = "$ ";
        while let Some(line) = self.line(prompt)? {
            self.editor.add_history_entry(line.as_str());
            src.push_str(&line);
            src.push('\n');
            if line.trim() == "END CODE" {
                return Ok(Some(src));
            }
            prompt = ". ";
        }
        Ok(None)
    }
}

impl Input for Prompt {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        self.line("")
    }
}
