use std::ffi::OsString;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use pdfpreview_application::{
    ApplicationError, RasterArgument, RasterizationEngine, RasterizeRequest,
};
use tracing::debug;

const POLL_INTERVAL: Duration = Duration::from_millis(20);
/// How long stderr may stay open after the converter itself has exited.
const STDERR_GRACE: Duration = Duration::from_millis(500);
const PARTIAL_SUFFIX: &str = "part";

/// Runs ImageMagick's `convert` (or `magick`) as a child process.
///
/// Every option value is its own argv element and no shell is involved.
/// Output goes to a sibling `.part` file that is renamed into place on
/// success, so readers never observe a half-written preview.
#[derive(Debug, Clone)]
pub struct ImageMagickRasterizer {
    binary: PathBuf,
    timeout: Duration,
}

impl ImageMagickRasterizer {
    pub fn new(binary: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            binary: binary.into(),
            timeout,
        }
    }
}

impl RasterizationEngine for ImageMagickRasterizer {
    fn rasterize(&self, request: &RasterizeRequest) -> Result<(), ApplicationError> {
        let partial_path = partial_path(&request.output_path);
        let args = command_arguments(request, &partial_path);
        debug!(binary = %self.binary.display(), ?args, "running rasterizer");

        let mut command = Command::new(&self.binary);
        command
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());
        own_process_group(&mut command);
        let mut child = command.spawn().map_err(|error| {
            ApplicationError::Rasterization(format!(
                "failed to run {}: {error}",
                self.binary.display()
            ))
        })?;

        // Delegates such as ghostscript inherit the pipe, so reading stderr
        // must never be what the call waits on.
        let stderr = child.stderr.take();
        let (sender, receiver) = mpsc::channel();
        thread::spawn(move || {
            let mut buffer = String::new();
            if let Some(mut stderr) = stderr {
                let _ = stderr.read_to_string(&mut buffer);
            }
            let _ = sender.send(buffer);
        });

        let status = wait_with_timeout(&mut child, self.timeout);
        let status = match status {
            Ok(status) => status,
            Err(error) => {
                let _ = fs::remove_file(&partial_path);
                return Err(error);
            }
        };
        let stderr = receiver.recv_timeout(STDERR_GRACE).unwrap_or_default();
        if !status.success() {
            let _ = fs::remove_file(&partial_path);
            return Err(ApplicationError::Rasterization(format!(
                "{} exited with {status}: {}",
                self.binary.display(),
                stderr.trim()
            )));
        }

        fs::rename(&partial_path, &request.output_path).map_err(|error| {
            ApplicationError::Rasterization(format!(
                "no output at {}: {error}",
                partial_path.display()
            ))
        })
    }
}

/// `FORMAT:source[frame] <options...> FORMAT:output`
pub fn command_arguments(request: &RasterizeRequest, output_path: &Path) -> Vec<OsString> {
    let mut input = OsString::from(format!("{}:", request.source_format.tag()));
    input.push(request.source_path.as_os_str());
    input.push(format!("[{}]", request.frame));

    let mut args = vec![input];
    for argument in &request.arguments {
        match argument {
            RasterArgument::Background(color) => {
                args.push("-background".into());
                args.push(color.into());
            }
            RasterArgument::Flatten => args.push("-flatten".into()),
            RasterArgument::Resize(geometry) => {
                args.push("-resize".into());
                args.push(geometry.into());
            }
            RasterArgument::Quality(quality) => {
                args.push("-quality".into());
                args.push(quality.into());
            }
        }
    }

    let mut output = OsString::from(format!("{}:", request.output_format.tag()));
    output.push(output_path.as_os_str());
    args.push(output);
    args
}

fn partial_path(output_path: &Path) -> PathBuf {
    let mut name = output_path.as_os_str().to_os_string();
    name.push(".");
    name.push(PARTIAL_SUFFIX);
    PathBuf::from(name)
}

#[cfg(unix)]
fn own_process_group(command: &mut Command) {
    use std::os::unix::process::CommandExt;
    command.process_group(0);
}

#[cfg(not(unix))]
fn own_process_group(_command: &mut Command) {}

/// Kill `child` together with anything it started in its process group.
fn terminate(child: &mut Child) {
    #[cfg(unix)]
    {
        if let Ok(pid) = libc::pid_t::try_from(child.id()) {
            // SAFETY: kill(2) only takes integers. A negative pid addresses
            // the group led by the child; ESRCH is ignored when it has none.
            unsafe {
                libc::kill(-pid, libc::SIGKILL);
            }
        }
    }
    let _ = child.kill();
    let _ = child.wait();
}

/// Wait for `child`, killing its process group once `timeout` has passed.
pub fn wait_with_timeout(child: &mut Child, timeout: Duration) -> Result<ExitStatus, ApplicationError> {
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(status) = child
            .try_wait()
            .map_err(|error| ApplicationError::Io(error.to_string()))?
        {
            return Ok(status);
        }
        if Instant::now() >= deadline {
            terminate(child);
            return Err(ApplicationError::Timeout(timeout));
        }
        thread::sleep(POLL_INTERVAL);
    }
}
