use std::process::ExitCode;

fn main() -> ExitCode {
    polytracker_version::cli::run()
}
