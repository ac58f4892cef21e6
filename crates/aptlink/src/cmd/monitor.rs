use std::io::{Read, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use aptlink_device::AptDevice;
use tracing::{debug, info, warn};

use crate::cmd::{open_device, parse_message_id, MonitorArgs};
use crate::exit::{device_error, CliError, CliResult, SUCCESS};
use crate::output::{print_frame, OutputFormat};

pub fn run(args: MonitorArgs, format: OutputFormat) -> CliResult<i32> {
    let only: Option<Vec<u16>> = args
        .only
        .as_deref()
        .map(|names| names.iter().map(|name| parse_message_id(name)).collect())
        .transpose()?;

    let mut device = open_device(&args.link)?;

    let running = Arc::new(AtomicBool::new(true));
    install_ctrlc_handler(running.clone())?;

    if args.start_updates {
        device
            .start_update_messages(args.dest)
            .map_err(|err| device_error("start updates failed", err))?;
        info!(dest = format_args!("{:#04x}", args.dest), "status updates requested");
    }

    let mut printed = 0usize;
    while running.load(Ordering::SeqCst) {
        let frame = match device.read_message() {
            Ok(frame) => frame,
            Err(err) if err.is_timeout() => {
                debug!("no frame within read timeout");
                continue;
            }
            Err(err) => return Err(device_error("receive failed", err)),
        };

        if let Some(ids) = &only {
            if !ids.contains(&frame.id) {
                continue;
            }
        }

        print_frame(&frame, format);
        printed = printed.saturating_add(1);

        if let Some(count) = args.count {
            if printed >= count {
                break;
            }
        }
    }

    if args.start_updates {
        stop_updates(&mut device, args.dest);
    }

    Ok(SUCCESS)
}

/// Ask the controller to stop status updates; the link may already be gone.
fn stop_updates<C: Read + Write>(device: &mut AptDevice<C>, dest: u8) -> bool {
    match device.stop_update_messages(dest) {
        Ok(()) => true,
        Err(err) => {
            warn!(
                dest = format_args!("{dest:#04x}"),
                error = %err,
                "failed to stop status updates"
            );
            false
        }
    }
}

fn install_ctrlc_handler(running: Arc<AtomicBool>) -> CliResult<()> {
    ctrlc::set_handler(move || {
        running.store(false, Ordering::SeqCst);
    })
    .map_err(|err| {
        CliError::new(
            crate::exit::INTERNAL,
            format!("signal handler setup failed: {err}"),
        )
    })
}

#[cfg(test)]
mod tests {
    use std::io::{self, Cursor};

    use super::*;

    struct ClosedLink;

    impl Read for ClosedLink {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Ok(0)
        }
    }

    impl Write for ClosedLink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn stop_updates_sends_request() {
        let mut device = AptDevice::new(Cursor::new(Vec::new()));
        assert!(stop_updates(&mut device, 0x50));
        assert_eq!(
            device.into_inner().into_inner(),
            vec![0x12, 0x00, 0x00, 0x00, 0x50, 0x01]
        );
    }

    #[test]
    fn stop_updates_reports_failure_without_error() {
        let mut device = AptDevice::new(ClosedLink);
        assert!(!stop_updates(&mut device, 0x50));
    }
}
