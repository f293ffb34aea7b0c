use crate::apps;
use crate::events::AppEvent;
use async_channel::Sender;
use std::thread;
use tokio::runtime::Runtime;

/// Runs the control socket, the config watcher and the initial desktop entry
/// scan on a tokio runtime off the GTK thread.
pub fn start_background_services(tx: Sender<AppEvent>) {
    let spawned = thread::Builder::new()
        .name("orbit-services".into())
        .spawn(move || {
            let rt = match Runtime::new() {
                Ok(rt) => rt,
                Err(e) => {
                    log::error!("Failed to create Tokio runtime: {}", e);
                    return;
                }
            };

            rt.block_on(async move {
                tokio::spawn(crate::sys::server::run_server(tx.clone()));
                tokio::spawn(crate::config::run_async_watcher(tx.clone()));

                match tokio::task::spawn_blocking(apps::refresh_cache).await {
                    Ok(()) => {
                        let _ = tx.send(AppEvent::EntriesChanged).await;
                    }
                    Err(e) => log::error!("Desktop entry scan failed: {}", e),
                }

                std::future::pending::<()>().await;
            });
        });

    if let Err(e) = spawned {
        log::error!("Failed to start background services: {}", e);
    }
}
