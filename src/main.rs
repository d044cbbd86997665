use std::process::ExitCode;

fn main() -> ExitCode {
    match cosmo_distances::app::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("cosmo: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}
