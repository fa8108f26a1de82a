use anyhow::Result;
use clap::Args;

use super::InputArgs;

#[derive(Args)]
pub struct ParseArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Keep complex type names as written
    #[arg(long)]
    skip_type_fixup: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

impl ParseArgs {
    pub fn run(self) -> Result<()> {
        let text = self.input.read()?;
        let options = self
            .input
            .options()
            .with_skip_type_fixup(self.skip_type_fixup);
        let definitions = rosmsg::parse(&text, options)?;

        let json = if self.pretty {
            serde_json::to_string_pretty(&definitions)?
        } else {
            serde_json::to_string(&definitions)?
        };
        self.input.write(&json)
    }
}
