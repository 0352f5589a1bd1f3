use std::process::exit;

use raven_filesystem::NativeFileSystem;
use raven_log::LogConfig;

use shgen::{Driver, console};

fn main() {
    let (console_vars, ignored) = match console::from_args() {
        Ok(parsed) => parsed,
        // prints help and version too
        Err(err) => err.exit(),
    };

    if let Err(err) = raven_log::init_log(LogConfig {
        level: console_vars.level,
        file: console_vars.log_file.clone(),
    }) {
        eprintln!("{:?}", err);
        exit(1);
    }

    for arg in &ignored {
        log::warn!("Unknown setting or insufficient parameters: {}", arg);
    }
    if !ignored.is_empty() {
        log::warn!("Use --help for more information.");
    }

    let fs = NativeFileSystem;
    let driver = Driver::new(&fs);

    let jobs = match driver.plan(&console_vars) {
        Ok(jobs) => jobs,
        Err(err) => {
            log::error!("{:#}", err);
            exit(1);
        }
    };

    let mut failed = 0;
    for job in &jobs {
        if let Err(err) = driver.run_job(job, console_vars.kernel, console_vars.verbose) {
            log::error!("{:#}", err);
            failed += 1;
        }
    }

    if failed > 0 {
        log::error!("{} of {} cubemap(s) failed!", failed, jobs.len());
        exit(1);
    }
}
