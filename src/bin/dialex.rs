//! dialex command-line binary

fn main() -> anyhow::Result<()> {
    dialex::cli::run_cli()
}
