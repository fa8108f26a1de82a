use anyhow::Result;
use clap::Args;

use super::InputArgs;

#[derive(Args)]
pub struct CanonicalArgs {
    #[command(flatten)]
    input: InputArgs,
}

impl CanonicalArgs {
    pub fn run(self) -> Result<()> {
        let text = self.input.read()?;
        let definitions = rosmsg::parse(&text, self.input.options())?;
        self.input.write(&rosmsg::stringify(&definitions))
    }
}
