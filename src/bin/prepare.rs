use std::process::ExitCode;

fn main() -> ExitCode {
    match nutriprep::example_apps::run_prepare() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("prepare failed: {err}");
            ExitCode::FAILURE
        }
    }
}
