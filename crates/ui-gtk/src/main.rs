#[cfg(all(target_os = "linux", feature = "gtk"))]
mod ui;

#[cfg(all(target_os = "linux", feature = "gtk"))]
fn main() {
    use chdgui_core::logging::{self, default_log_path, LogDestination};

    logging::initialize(
        LogDestination::Both(default_log_path()),
        log::LevelFilter::Info,
    );
    if let Err(err) = ui::run() {
        eprintln!("error: {err}");
        std::process::exit(2);
    }
}

#[cfg(not(all(target_os = "linux", feature = "gtk")))]
fn main() {
    println!("chdgui-ui-gtk stub. On Ubuntu: install GTK4 and libadwaita dev packages and build with `--features gtk`.");
}
