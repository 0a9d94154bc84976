use std::{fs::File, path::PathBuf};

use clap::{Parser, ValueEnum};
use stream_reader::{FileReader, StreamDecoder};

#[derive(Parser)]
#[command(about = "Inspect binary files")]
pub enum Args {
    /// Print size and machine byte order
    Info { path: PathBuf },

    /// Hex view of `how_much` bytes, starting at the row containing `offset`
    Hex {
        path: PathBuf,
        #[arg(value_parser = parse_number, allow_hyphen_values = true)]
        offset: i64,
        #[arg(value_parser = parse_number)]
        how_much: i64,
    },

    /// Decode a sequence of values starting at `offset`
    Read {
        path: PathBuf,
        #[arg(value_parser = parse_number, allow_hyphen_values = true)]
        offset: i64,
        #[arg(required = true)]
        kinds: Vec<Kind>,
    },
}

/// The value types understood by `read`
#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum Kind {
    I8,
    U8,
    I16le,
    I16be,
    U16le,
    U16be,
    I24le,
    I24be,
    U24le,
    U24be,
    I32le,
    I32be,
    U32le,
    U32be,
    I64le,
    I64be,
    U64le,
    U64be,
    F32le,
    F32be,
    F64le,
    F64be,
    Guid,
}

/// Parses a decimal or `0x` prefixed hexadecimal number, either of which may be negative
fn parse_number(value: &str) -> Result<i64, String> {
    let (negative, digits) = match value.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, value),
    };

    let number = match digits.strip_prefix("0x") {
        Some(hex) => i64::from_str_radix(hex, 16),
        None => digits.parse::<i64>(),
    }
    .map_err(|err| format!("invalid number {value:?}: {err}"))?;

    Ok(if negative { -number } else { number })
}

fn decode(reader: &mut StreamDecoder<File>, kind: Kind) -> stream_reader::Result<String> {
    Ok(match kind {
        Kind::I8 => reader.read_int8()?.to_string(),
        Kind::U8 => reader.read_uint8()?.to_string(),
        Kind::I16le => reader.read_int16_le()?.to_string(),
        Kind::I16be => reader.read_int16_be()?.to_string(),
        Kind::U16le => reader.read_uint16_le()?.to_string(),
        Kind::U16be => reader.read_uint16_be()?.to_string(),
        Kind::I24le => reader.read_int24_le()?.to_string(),
        Kind::I24be => reader.read_int24_be()?.to_string(),
        Kind::U24le => reader.read_uint24_le()?.to_string(),
        Kind::U24be => reader.read_uint24_be()?.to_string(),
        Kind::I32le => reader.read_int32_le()?.to_string(),
        Kind::I32be => reader.read_int32_be()?.to_string(),
        Kind::U32le => reader.read_uint32_le()?.to_string(),
        Kind::U32be => reader.read_uint32_be()?.to_string(),
        Kind::I64le => reader.read_int64_le()?.to_string(),
        Kind::I64be => reader.read_int64_be()?.to_string(),
        Kind::U64le => reader.read_uint64_le()?.to_string(),
        Kind::U64be => reader.read_uint64_be()?.to_string(),
        Kind::F32le => reader.read_float_le()?.to_string(),
        Kind::F32be => reader.read_float_be()?.to_string(),
        Kind::F64le => reader.read_double_le()?.to_string(),
        Kind::F64be => reader.read_double_be()?.to_string(),
        Kind::Guid => reader.read_guid()?,
    })
}

/// Widens a `how_much` byte view at `offset` to start on its 16-byte row
///
/// Returns the row start and the number of bytes to print from there.
fn hex_span(offset: u64, how_much: i64) -> (u64, i64) {
    (offset & !0xF, how_much.saturating_add((offset & 0xF) as i64))
}

/// Formats one row of the hex view, with a gap after the eighth byte
fn hex_row(pos: u64, buffer: &[u8]) -> String {
    let mut line = format!("0x{pos:0>10X} | ");

    for byte in buffer.iter().take(8) {
        line.push_str(&format!("{byte:02X} "));
    }

    line.push_str("  ");

    for byte in buffer.iter().skip(8) {
        line.push_str(&format!("{byte:02X} "));
    }

    line
}

fn print_hex_values(
    reader: &mut StreamDecoder<File>,
    offset: i64,
    how_much: i64,
) -> stream_reader::Result<()> {
    reader.set_offset(offset)?;
    let (offset_aligned, mut amount) = hex_span(reader.offset()?, how_much);

    reader.set_offset(offset_aligned as i64)?;

    println!("             | 00 01 02 03 04 05 06 07   08 09 0A 0B 0C 0D 0E 0F");

    while amount > 0 {
        let pos = reader.offset()?;

        let buffer = reader.read(amount.min(16))?;
        if buffer.is_empty() {
            break;
        }
        amount -= buffer.len() as i64;

        println!("{}", hex_row(pos, &buffer));
    }

    Ok(())
}

fn main() -> stream_reader::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    match args {
        Args::Info { path } => {
            let reader = FileReader::open(&path)?;
            println!("{}", path.display());
            println!("  size:       {:#x} ({} bytes)", reader.size(), reader.size());
            println!("  byte order: {:?}", reader.endianness());
        }
        Args::Hex {
            path,
            offset,
            how_much,
        } => {
            let mut reader = FileReader::open(&path)?;
            print_hex_values(&mut reader, offset, how_much)?;
        }
        Args::Read {
            path,
            offset,
            kinds,
        } => {
            let mut reader = FileReader::open(&path)?;
            reader.set_offset(offset)?;

            for kind in kinds {
                let pos = reader.offset()?;
                let value = decode(&mut reader, kind)?;
                println!("0x{pos:0>10X} {kind:?}: {value}");
            }

            log::info!("stopped at {:#x} of {:#x}", reader.offset()?, reader.size());
        }
    }

    Ok(())
}
