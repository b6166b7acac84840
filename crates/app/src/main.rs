use std::process;

mod driver;
mod logging;
mod plan;
mod session;
mod source;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let parsed = match driver::parse_args(&args) {
        Ok(parsed) => parsed,
        Err(err) => {
            eprintln!("{err}");
            process::exit(2);
        }
    };

    logging::setup_tracing(parsed.log_level);
    tracing::info!("anchora starting");

    match driver::run(&parsed) {
        Ok(report) => {
            if parsed.print {
                match serde_json::to_string_pretty(&report) {
                    Ok(json) => println!("{json}"),
                    Err(err) => eprintln!("report serialization failed: {err}"),
                }
            }
        }
        Err(err) => {
            eprintln!("session error: {err}");
            process::exit(1);
        }
    }
}
