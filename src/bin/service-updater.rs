use std::process::ExitCode;

use tracing::{error, info, warn};

use service_updater::{
    cli::Cli,
    command::ProcessRunner,
    config::ConfigLoader,
    executor::{ProcessDirectory, UpdateExecutor},
    logging::Logging,
    supervisor::ServiceManager,
    updater::Updater,
};

fn main() -> ExitCode {
    let cli = Cli::init_updater_cli();

    // init logging singleton
    if let Err(e) = Logging::try_init(cli.log_level()) {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    if cli.print_debug_info() {
        println!("Printing debug info");
        println!("CLI: {:#?}", cli);
        return ExitCode::SUCCESS;
    }

    // Restarting supervised services normally requires root, but other commands may not
    #[cfg(unix)]
    if !nix::unistd::Uid::effective().is_root() {
        warn!("Not running as root, service restarts may fail");
    }

    let Some(path) = cli.path() else {
        error!("No configuration path provided");
        return ExitCode::FAILURE;
    };

    let updater = Updater::new(
        ConfigLoader::default(),
        UpdateExecutor::new(
            ProcessRunner::new(),
            ProcessDirectory,
            ServiceManager::new(cli.service_manager()),
        ),
    );

    match updater.run(path, cli.is_directory()) {
        // failed services are already logged, they never change the exit code
        Ok(report) if report.is_success() => {
            info!("Update finished: {} succeeded, 0 failed", report.succeeded.len());
            ExitCode::SUCCESS
        }
        Ok(report) => {
            let failed = report
                .failed
                .iter()
                .map(|(service, _)| service.as_str())
                .collect::<Vec<_>>();
            warn!(
                "Update finished: {} succeeded, {} failed ({})",
                report.succeeded.len(),
                failed.len(),
                failed.join(", ")
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
