use std::{
    fs::File,
    io::{self, BufRead, BufReader, BufWriter, Read},
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::{Context, bail};
use bmpdump::{
    BmpPermissiveness, ByteSource, Channels, DumpOutput, DumpRequest, Limits, ReaderSource,
    SliceSource, Unstoppable, format_stream_length,
};
use clap::{ArgAction, Parser, ValueEnum};

/// Exit status when the input file cannot be opened or read.
const EXIT_OPEN_FAILURE: u8 = 2;

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
enum ChannelArg {
    /// Blue, green and red
    All,
    /// Blue only
    Blue,
}

impl From<ChannelArg> for Channels {
    fn from(arg: ChannelArg) -> Self {
        match arg {
            ChannelArg::All => Channels::All,
            ChannelArg::Blue => Channels::Blue,
        }
    }
}

/// Dump every pixel of an uncompressed 24-bit BMP as text
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// A path to the bmp file
    input: PathBuf,

    /// Where to write the pixel dump [default: INPUT with a .txt extension]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Color channels written on each pixel line
    #[arg(long, value_enum, default_value_t = ChannelArg::All)]
    channels: ChannelArg,

    /// Reject headers with bad magic, planes, bit depth or compression
    #[arg(long)]
    strict: bool,

    /// Read the file incrementally instead of loading it into memory
    #[arg(long)]
    streaming: bool,

    /// Refuse images wider than this
    #[arg(long, value_name = "N")]
    max_width: Option<u64>,

    /// Refuse images taller than this (raw unsigned height)
    #[arg(long, value_name = "N")]
    max_height: Option<u64>,

    /// Refuse images with more than this many pixels
    #[arg(long, value_name = "N")]
    max_pixels: Option<u64>,

    /// Log more (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn limits(&self) -> Limits {
        Limits {
            max_width: self.max_width,
            max_height: self.max_height,
            max_pixels: self.max_pixels,
        }
    }
}

/// An input file that has been opened and found readable.
enum Input {
    Memory(Vec<u8>),
    Streaming(ReaderSource<BufReader<File>>),
}

impl Input {
    fn open(args: &Args) -> io::Result<Self> {
        let mut file = File::open(&args.input)?;
        if args.streaming {
            let mut reader = BufReader::new(file);
            // Directories open fine on Unix and only fail here.
            reader.fill_buf()?;
            Ok(Input::Streaming(ReaderSource::from_seekable(reader)?))
        } else {
            let mut data = Vec::new();
            file.read_to_end(&mut data)?;
            Ok(Input::Memory(data))
        }
    }

    fn len(&self) -> Option<u64> {
        match self {
            Input::Memory(data) => Some(data.len() as u64),
            Input::Streaming(source) => source.len_hint(),
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = match args.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let input = match Input::open(&args) {
        Ok(input) => input,
        Err(e) => {
            println!("Failed to open file {}: {e}", args.input.display());
            return ExitCode::from(EXIT_OPEN_FAILURE);
        }
    };
    println!("{}", format_stream_length(input.len()));

    match run(&args, input) {
        Ok(output) => {
            println!("{}", output.report_body());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args, input: Input) -> anyhow::Result<DumpOutput> {
    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| args.input.with_extension("txt"));
    if same_file(&args.input, &output_path) {
        bail!(
            "output path {} would overwrite the input",
            output_path.display()
        );
    }

    let mut request = DumpRequest::new()
        .channels(args.channels.into())
        .permissiveness(if args.strict {
            BmpPermissiveness::Strict
        } else {
            BmpPermissiveness::Permissive
        });
    let limits = args.limits();
    if !limits.is_unlimited() {
        log::debug!("geometry limits: {limits:?}");
        request = request.limits(limits);
    }

    match input {
        Input::Memory(data) => dump_to(&request, &mut SliceSource::new(&data), &output_path),
        Input::Streaming(mut source) => dump_to(&request, &mut source, &output_path),
    }
}

/// Accept the headers first so a rejected input never touches `output_path`.
fn dump_to<S>(
    request: &DumpRequest,
    source: &mut S,
    output_path: &Path,
) -> anyhow::Result<DumpOutput>
where
    S: ByteSource,
{
    let headers = request.read_headers(source)?;

    let mut out = BufWriter::new(
        File::create(output_path)
            .with_context(|| format!("creating {}", output_path.display()))?,
    );
    log::debug!("writing pixel dump to {}", output_path.display());

    Ok(request.dump_rows(source, headers, &mut out, Unstoppable)?)
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_parse_defaults() {
        let args = Args::try_parse_from(["bmpdump", "in.bmp"]).unwrap();
        assert_eq!(args.input, PathBuf::from("in.bmp"));
        assert_eq!(args.channels, ChannelArg::All);
        assert!(!args.strict && !args.streaming);
        assert_eq!(args.verbose, 0);
    }

    #[test]
    fn args_parse_flags() {
        let args = Args::try_parse_from([
            "bmpdump", "in.bmp", "-o", "px.txt", "--channels", "blue", "--strict", "-vv",
        ])
        .unwrap();
        assert_eq!(args.output, Some(PathBuf::from("px.txt")));
        assert_eq!(Channels::from(args.channels), Channels::Blue);
        assert!(args.strict);
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn limit_flags_map_onto_limits() {
        let args = Args::try_parse_from(["bmpdump", "in.bmp"]).unwrap();
        assert!(args.limits().is_unlimited());

        let args =
            Args::try_parse_from(["bmpdump", "in.bmp", "--max-pixels", "64", "--max-width", "8"])
                .unwrap();
        assert_eq!(args.limits(), Limits {
            max_width: Some(8),
            max_height: None,
            max_pixels: Some(64),
        });
    }

    #[test]
    fn input_is_required() {
        assert!(Args::try_parse_from(["bmpdump"]).is_err());
    }
}
