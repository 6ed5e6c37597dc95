use clap::Command;
use clap_complete::Shell;
use focusbreak_core::error::Result;

pub fn run(shell: Shell, mut cmd: Command) -> Result<()> {
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
    Ok(())
}
