use crate::identify::Index;
use crate::monitor::Monitor;

use nix::fcntl;
use nix::fcntl::OFlag;
use nix::sys::stat::Mode;
use nix::unistd;

use std::path::Path;
use std::path::PathBuf;

/// Publishes a one-line summary of monitors and desktops to a named pipe.
pub struct Status {
    fifo: Option<PathBuf>,
}

impl Status {
    pub fn new(fifo: Option<&str>) -> Self {
        let fifo = fifo.map(PathBuf::from);

        if let Some(path) = &fifo {
            if !path.exists() {
                if let Err(err) = unistd::mkfifo(path.as_path(), Mode::S_IRUSR | Mode::S_IWUSR) {
                    warn!("unable to create status fifo {}: {}", path.display(), err);
                }
            }
        }

        Self {
            fifo,
        }
    }

    /// `W`, then one token per monitor (`M` selected, `m` otherwise)
    /// followed by one token per desktop on it: `U`/`u` urgent, `O`/`o`
    /// occupied, `F`/`f` free, capitalized for the monitor's active one.
    pub fn format(
        monitors: &[Monitor],
        selected: Index,
    ) -> String {
        let mut tokens = Vec::new();

        for monitor in monitors {
            tokens.push(format!(
                "{}{}",
                if monitor.index() == selected { 'M' } else { 'm' },
                monitor.index()
            ));

            for (i, desktop) in monitor.desktops().iter().enumerate() {
                let symbol = if desktop.is_urgent() {
                    'u'
                } else if desktop.is_occupied() {
                    'o'
                } else {
                    'f'
                };

                let symbol = if i == monitor.active_desktop() {
                    symbol.to_ascii_uppercase()
                } else {
                    symbol
                };

                tokens.push(format!("{}{}", symbol, desktop.name()));
            }
        }

        format!("W{}", tokens.join(":"))
    }

    pub fn publish(
        &self,
        line: &str,
    ) {
        debug!("status: {}", line);

        if let Some(path) = &self.fifo {
            Self::write_nonblocking(path, line);
        }
    }

    fn write_nonblocking(
        path: &Path,
        line: &str,
    ) {
        match fcntl::open(path, OFlag::O_WRONLY | OFlag::O_NONBLOCK, Mode::empty()) {
            Ok(fd) => {
                let line = format!("{}\n", line);

                if let Err(err) = unistd::write(fd, line.as_bytes()) {
                    trace!("unable to write status: {}", err);
                }

                drop(unistd::close(fd));
            },
            // no reader on the other end
            Err(err) => trace!("unable to open status fifo: {}", err),
        }
    }
}
