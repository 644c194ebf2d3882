pub(crate) mod add;
pub(crate) mod log;
pub(crate) mod search;
pub(crate) mod show;

use indicatif::{ProgressBar, ProgressStyle};

/// Spinner shown while a network call is in flight.
pub(crate) fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("  {spinner:.cyan} {msg}")
            .expect("static pattern")
            .tick_chars("/-\\|"),
    );
    pb.set_message(msg.to_owned());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}
