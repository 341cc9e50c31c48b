use std::process::ExitCode;

use configs::AppConfig;
use tokio::runtime::Runtime;
use tracing::{error, info};
use uuid::Uuid;

/// Identity attached to every lifecycle event of this process.
#[derive(Clone, Copy)]
struct Instance {
    id: Uuid,
    pid: u32,
}

fn install_panic_hook(instance: Instance) {
    std::panic::set_hook(Box::new(move |panic| {
        error!(
            service = "homemgmt",
            event = "panic",
            service_id = %instance.id,
            pid = instance.pid,
            message = %panic,
            "unhandled panic"
        );
    }));
}

fn build_runtime(cfg: &AppConfig) -> std::io::Result<Runtime> {
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(workers) = cfg.server.worker_threads {
        builder.worker_threads(workers);
    }
    builder.build()
}

fn main() -> ExitCode {
    // .env first so RUST_LOG, LOG_FORMAT and config overrides apply
    dotenvy::dotenv().ok();
    common::utils::logging::init_logging_from_env();

    let instance = Instance { id: Uuid::new_v4(), pid: std::process::id() };
    install_panic_hook(instance);

    let cfg = match AppConfig::load_and_validate() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(service = "homemgmt", event = "config_invalid", error = %format!("{e:#}"), "cannot load configuration");
            return ExitCode::FAILURE;
        }
    };

    let rt = match build_runtime(&cfg) {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "homemgmt", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(
        service = "homemgmt",
        event = "start",
        service_id = %instance.id,
        pid = instance.pid,
        version = env!("CARGO_PKG_VERSION"),
        workers = cfg.server.worker_threads.unwrap_or_default(),
        "homemgmt starting"
    );

    rt.block_on(async move {
        tokio::select! {
            res = server::run(cfg) => match res {
                Ok(()) => {
                    info!(service = "homemgmt", event = "stop", service_id = %instance.id, pid = instance.pid, "server stopped");
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    error!(service = "homemgmt", event = "run_failed", service_id = %instance.id, error = %format!("{e:#}"), "server exited with error");
                    ExitCode::FAILURE
                }
            },
            _ = tokio::signal::ctrl_c() => {
                info!(service = "homemgmt", event = "shutdown_signal", service_id = %instance.id, pid = instance.pid, "Ctrl+C received, shutting down");
                ExitCode::SUCCESS
            }
        }
    })
}
