use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use super::InputArgs;
use crate::provider::DirectoryProvider;

#[derive(Args)]
pub struct DepsArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Directory holding one sub-directory per package
    #[arg(short, long)]
    root: PathBuf,

    /// Package of the input definition (defaults to the input's grandparent directory name)
    #[arg(short, long)]
    package: Option<String>,
}

impl DepsArgs {
    pub fn run(self) -> Result<()> {
        let text = self.input.read()?;
        let package = match self.package {
            Some(package) => package,
            None => package_from_path(&self.input)?,
        };
        let mut provider = DirectoryProvider::new(self.root);
        let bundle =
            rosmsg::bundle_definitions(&text, &package, self.input.dialect(), &mut provider)?;
        self.input.write(bundle.trim_end())
    }
}

/// `<package>/msg/<Type>.msg` -> `<package>`.
fn package_from_path(input: &InputArgs) -> Result<String> {
    input
        .input()
        .canonicalize()
        .ok()
        .and_then(|path| {
            let dir = path.parent()?;
            let dir = if dir.file_name()? == "msg" { dir.parent()? } else { dir };
            Some(dir.file_name()?.to_string_lossy().into_owned())
        })
        .context("cannot infer the package from the input path, pass --package")
}
