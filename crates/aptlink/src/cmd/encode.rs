use aptlink_codec::MessageRegistry;
use aptlink_frame::{encode_frame, Frame};
use bytes::BytesMut;

use crate::cmd::{parse_message_id, parse_values, EncodeArgs};
use crate::exit::{codec_error, frame_error, CliResult, SUCCESS};
use crate::output::{print_wire, OutputFormat};

pub fn run(args: EncodeArgs, format: OutputFormat) -> CliResult<i32> {
    let registry = MessageRegistry::global();
    let id = parse_message_id(&args.id)?;

    let frame = build_frame(registry, id, &args)?;
    let mut wire = BytesMut::new();
    encode_frame(&frame, registry, &mut wire).map_err(|err| frame_error("encode failed", err))?;

    print_wire(&frame, &wire, format);
    Ok(SUCCESS)
}

fn build_frame(registry: &MessageRegistry, id: u16, args: &EncodeArgs) -> CliResult<Frame> {
    let frame = Frame::new(id)
        .with_dest(args.address.dest)
        .with_source(args.address.source);

    if args.values.is_empty() {
        return Ok(frame.with_params(args.param1, args.param2));
    }

    let desc = registry
        .lookup(id)
        .map_err(|err| codec_error("encode failed", err))?;
    Ok(frame.with_payload(parse_values(desc, &args.values)?))
}
