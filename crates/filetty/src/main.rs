use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::debug;

use filetty::app::{App, DownloadManager};
use filetty::infra::source::{DataSource, FsDataSource};
use filetty::infra::transport::{DownloadsDirTarget, FsTransport};

#[tokio::main]
async fn main() -> io::Result<()> {
    let home = filetty_home();
    init_logging(&home)?;

    let root = std::env::args()
        .nth(1)
        .map_or_else(
            || std::env::current_dir().unwrap_or_else(|_| PathBuf::from("/")),
            PathBuf::from,
        );

    let source: Arc<dyn DataSource> = Arc::new(FsDataSource::new(root));
    let download = DownloadManager::new(
        Arc::new(FsTransport),
        Arc::new(DownloadsDirTarget::for_user()),
    );

    // Host notifications: the standalone binary is its own host, so click
    // events only land in the diagnostic log.
    let (notifications_tx, mut notifications_rx) = mpsc::unbounded_channel();
    tokio::spawn(async move {
        while let Some(notification) = notifications_rx.recv().await {
            debug!(?notification, "host notification");
        }
    });

    let mut app = App::new(download, notifications_tx);

    filetty::runtime::run(&mut app, source).await
}

/// Returns the filetty home directory (`~/.filetty`).
fn filetty_home() -> PathBuf {
    if let Some(home_dir) = dirs::home_dir() {
        return home_dir.join(".filetty");
    }

    PathBuf::from(".filetty")
}

/// Routes diagnostics to a log file so they never corrupt the alternate
/// screen.
fn init_logging(home: &std::path::Path) -> io::Result<()> {
    std::fs::create_dir_all(home)?;
    let log_file = std::fs::File::create(home.join("filetty.log"))?;

    tracing_subscriber::fmt()
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .init();

    Ok(())
}
