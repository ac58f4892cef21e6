use aptlink_device::Query;
use aptlink_frame::Frame;
use tracing::info;

use crate::cmd::{open_device, parse_duration, parse_message_id, parse_values, QueryArgs};
use crate::exit::{codec_error, device_error, CliResult, SUCCESS};
use crate::output::{print_frame, OutputFormat};

pub fn run(args: QueryArgs, format: OutputFormat) -> CliResult<i32> {
    let request_id = parse_message_id(&args.request)?;
    let expected_id = parse_message_id(&args.response)?;
    let timeout = args.timeout.as_deref().map(parse_duration).transpose()?;

    let mut device = open_device(&args.link)?;

    let mut request = Frame::new(request_id)
        .with_dest(args.address.dest)
        .with_source(args.address.source);
    request = if args.values.is_empty() {
        request.with_params(args.param1, args.param2)
    } else {
        let desc = device
            .registry()
            .lookup(request_id)
            .map_err(|err| codec_error("query failed", err))?;
        request.with_payload(parse_values(desc, &args.values)?)
    };

    let mut query = Query::new(request, expected_id);
    if let Some(timeout) = timeout {
        query = query.with_timeout(timeout);
    }

    info!(
        request = format_args!("{request_id:#06x}"),
        expected = format_args!("{expected_id:#06x}"),
        "sending query"
    );
    let response = device
        .query(query)
        .map_err(|err| device_error("query failed", err))?;

    print_frame(&response, format);
    Ok(SUCCESS)
}
