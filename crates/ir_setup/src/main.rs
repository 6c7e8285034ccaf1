use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::exit;

use clap::Parser;

use ir_setup::wizard::collect_settings;

#[derive(Parser)]
#[command(
    name = "ir_setup",
    about = "Interactive setup wizard for the incident-response stacks"
)]
struct Cli {
    /// Where to write the collected deployment settings
    #[arg(long, default_value = "setup-config.json")]
    output: PathBuf,
}

fn main() {
    let cli = Cli::parse();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut input = stdin.lock();
    let mut output = stdout.lock();

    match run(&cli, &mut input, &mut output) {
        Ok(()) => {}
        Err(error) => {
            eprintln!("setup failed: {error}");
            exit(1);
        }
    }
}

fn run(cli: &Cli, input: &mut impl BufRead, output: &mut impl Write) -> io::Result<()> {
    match collect_settings(input, output)? {
        Some(config) => {
            config.write_json(&cli.output)?;
            writeln!(output, "Wrote {}", cli.output.display())
        }
        None => writeln!(output, "Aborted, nothing written"),
    }
}
