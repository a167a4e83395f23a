use clap::Parser;

fn main() -> anyhow::Result<()> {
    swapdesk_lib::run(swapdesk_lib::settings::Cli::parse())
}
