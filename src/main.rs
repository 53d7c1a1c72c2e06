use std::process::ExitCode;

/// Exit status used when the player interrupts with Ctrl-C.
const INTERRUPTED_EXIT: i32 = 130;

#[tokio::main]
async fn main() -> ExitCode {
    // The quiz blocks on stdin, so a signal cannot be observed by the game
    // loop itself. Statistics of finished sessions are already on disk.
    tokio::spawn(async {
        shutdown_signal().await;
        eprintln!("\nInterrupted, see you next time!");
        std::process::exit(INTERRUPTED_EXIT);
    });

    match langquiz::cli::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(langquiz::errors::get_exit_code(&e))
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();

    #[cfg(unix)]
    {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => {},
                    _ = sigterm.recv() => {},
                }
            }
            Err(_) => {
                ctrl_c.await.ok();
            }
        }
    }

    #[cfg(not(unix))]
    {
        ctrl_c.await.ok();
    }
}
