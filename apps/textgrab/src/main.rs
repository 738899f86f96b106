use std::process::ExitCode;

fn main() -> ExitCode {
    match textgrab::run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error processing image: {e:#}");
            ExitCode::FAILURE
        }
    }
}
