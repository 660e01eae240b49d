use serlink_frame::decode_frame;

use crate::cmd::send::parse_hex;
use crate::cmd::DecodeArgs;
use crate::exit::{frame_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::{print_frame, OutputFormat};

pub fn run(args: DecodeArgs, format: OutputFormat) -> CliResult<i32> {
    let candidate = parse_hex(&args.hex).map_err(|err| CliError::new(USAGE, err))?;
    let frame = decode_frame(&candidate).map_err(|err| frame_error("decode failed", err))?;

    print_frame(&frame, format);
    Ok(SUCCESS)
}
