use std::process::ExitCode;

const USAGE: &str = "usage: portfolio [serve | preview <base-url>]";

#[tokio::main]
async fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let result = match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        [] | ["serve"] => portfolio_lib::run().await,
        ["preview", base_url] => portfolio_lib::preview(base_url).await.map(|css| print!("{}", css)),
        _ => Err(USAGE.to_string()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{}", error);
            ExitCode::FAILURE
        }
    }
}
