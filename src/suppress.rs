//! Scoped suppression of stdout and stderr.
//!
//! Model backends and native libraries print progress bars, warnings and
//! banners straight to the process file descriptors. While an
//! [`OutputSuppressor`] is alive both descriptors point at the null device,
//! so the JSON record emitted afterwards is the only thing a caller sees on
//! stdout.
//!
//! Redirection happens at the descriptor level (`dup`/`dup2`), which also
//! silences output from C++ code that never goes through Rust's `std::io`.
//! On non-Unix targets the guard does nothing.

use std::io::{self, Write};
use tracing::debug;

/// Guard that keeps stdout and stderr redirected until dropped.
///
/// Restoration happens in `Drop`, so it runs on every exit path, including
/// early returns and unwinding.
#[derive(Debug)]
pub struct OutputSuppressor {
    #[cfg(unix)]
    saved: Vec<(libc::c_int, libc::c_int)>,
}

#[cfg(unix)]
impl OutputSuppressor {
    /// Flush both streams and point them at `/dev/null`.
    pub fn acquire() -> io::Result<Self> {
        use std::os::fd::AsRawFd;

        flush_std_streams();
        let devnull = std::fs::OpenOptions::new().write(true).open("/dev/null")?;

        let mut guard = Self { saved: Vec::with_capacity(2) };
        for fd in [libc::STDOUT_FILENO, libc::STDERR_FILENO] {
            // SAFETY: `fd` is a standard descriptor; `dup` has no memory-safety preconditions.
            let saved = unsafe { libc::dup(fd) };
            if saved < 0 {
                // Dropping `guard` restores whatever was already redirected.
                return Err(io::Error::last_os_error());
            }
            // SAFETY: both descriptors are open for the duration of the call.
            if unsafe { libc::dup2(devnull.as_raw_fd(), fd) } < 0 {
                let err = io::Error::last_os_error();
                // SAFETY: `saved` was returned by `dup` above and is owned here.
                unsafe { libc::close(saved) };
                return Err(err);
            }
            guard.saved.push((fd, saved));
        }
        debug!("stdout and stderr suppressed");
        Ok(guard)
    }
}

#[cfg(unix)]
impl Drop for OutputSuppressor {
    fn drop(&mut self) {
        flush_std_streams();
        for (fd, saved) in self.saved.drain(..).rev() {
            // SAFETY: `saved` is a descriptor we duplicated and still own.
            unsafe {
                libc::dup2(saved, fd);
                libc::close(saved);
            }
        }
    }
}

#[cfg(not(unix))]
impl OutputSuppressor {
    pub fn acquire() -> io::Result<Self> {
        Ok(Self {})
    }
}

fn flush_std_streams() {
    let _ = io::stdout().flush();
    let _ = io::stderr().flush();
}
