use crate::cmd::{open_device, parse_duration, InfoArgs};
use crate::exit::{device_error, CliResult, SUCCESS};
use crate::output::{print_hardware_info, OutputFormat};

pub fn run(args: InfoArgs, format: OutputFormat) -> CliResult<i32> {
    let timeout = parse_duration(&args.timeout)?;
    let mut device = open_device(&args.link)?;

    let info = device
        .hardware_info(args.dest, Some(timeout))
        .map_err(|err| device_error("hardware info failed", err))?;

    print_hardware_info(&info, format);
    Ok(SUCCESS)
}
