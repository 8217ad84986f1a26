use super::args::{Cli, Command};

pub mod combine;
pub mod label;
pub mod merge;

pub async fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    match cli.cmd {
        Command::Label(args) => label::run(args).await,
        Command::Merge(args) => merge::run(args).await,
        Command::Combine => combine::run().await,
    }
}
