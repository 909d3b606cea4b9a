// src/main.rs
use clap::Parser;
use std::process::ExitCode;
use titans_fixtures::app::{run, user_message};
use titans_fixtures::cli::Args;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", user_message(&e));
            ExitCode::FAILURE
        }
    }
}
