#![forbid(unsafe_code)]

fn main() {
    if let Err(error) = wagersim::cli::run_from_env() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}
