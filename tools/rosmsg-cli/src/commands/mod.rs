pub mod canonical;
pub mod deps;
pub mod parse;

use std::{
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Args;
use rosmsg::{Dialect, ParseOptions};

/// Input selection shared by every subcommand.
#[derive(Args)]
pub struct InputArgs {
    /// Path to the definition file (`-` for stdin)
    input: PathBuf,

    /// Input dialect: ros1msg | ros2msg | ros2idl (guessed from the extension if omitted)
    #[arg(short, long)]
    dialect: Option<Dialect>,

    /// Output file path (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl InputArgs {
    pub fn read(&self) -> Result<String> {
        if self.input == Path::new("-") {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            return Ok(text);
        }
        fs::read_to_string(&self.input)
            .with_context(|| format!("failed to read {}", self.input.display()))
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect.unwrap_or_else(|| guess_dialect(&self.input))
    }

    pub fn options(&self) -> ParseOptions {
        ParseOptions::from(self.dialect())
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn write(&self, text: &str) -> Result<()> {
        match &self.output {
            Some(path) => fs::write(path, format!("{text}\n"))
                .with_context(|| format!("failed to write {}", path.display()))?,
            None => println!("{text}"),
        }
        Ok(())
    }
}

fn guess_dialect(path: &Path) -> Dialect {
    match path.extension().and_then(|e| e.to_str()) {
        Some("idl") => Dialect::Ros2Idl,
        _ => Dialect::Ros1Msg,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idl_extension_selects_idl() {
        assert_eq!(guess_dialect(Path::new("a/B.idl")), Dialect::Ros2Idl);
        assert_eq!(guess_dialect(Path::new("a/B.msg")), Dialect::Ros1Msg);
        assert_eq!(guess_dialect(Path::new("-")), Dialect::Ros1Msg);
    }
}
