use std::fs::read;
use std::io::Read as _;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use bencodex::{decoding::Decoder, Value};
use clap::Parser;

/// Deeper input is rejected instead of risking the stack of the printer.
const MAX_DEPTH: usize = 512;

#[derive(Debug, Clone, Parser)]
#[command(version, about="bencodex-pretty\n\n\
    Debug-friendly formatter for Bencodex provided either through stdin or as a list of file paths.\n\
    Each input must hold exactly one value.")]
struct Args {
    /// Expect hexadecimal text instead of binary data. Whitespace and the
    /// characters `.,:;_-` between digits are ignored.
    #[arg(short = 'x', long)]
    hex_input: bool,

    /// List of file paths to read bencodex from.
    /// Listens to stdin if no file paths are provided.
    file_paths: Vec<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    if args.file_paths.is_empty() {
        let mut input = Vec::new();
        std::io::stdin().lock().read_to_end(&mut input)?;
        pretty_print(&input, args.hex_input, "stdin")?;
    } else {
        for p in args.file_paths {
            let contents = read(&p).context(format!("Could not read file from path: {:?}", &p))?;
            pretty_print(&contents, args.hex_input, p.display().to_string().as_str())?;
        }
    }

    Ok(())
}

fn pretty_print(input: &[u8], hex_input: bool, source: &str) -> Result<()> {
    let data = if hex_input {
        hex_to_bin(input).context(format!("Could not read {:?} as hexadecimal", source))?
    } else {
        input.to_vec()
    };
    let value = Decoder::new(data.as_slice())
        .with_max_depth(MAX_DEPTH)
        .decode()
        .context(format!("Could not parse {:?} as bencodex", source))?;

    let mut out = String::new();
    render(&value, 0, &mut out);
    println!("{}", out);
    Ok(())
}

fn hex_to_bin(text: &[u8]) -> Result<Vec<u8>> {
    let digits: Vec<u8> = text
        .iter()
        .copied()
        .filter(|b| !b.is_ascii_whitespace() && !b".,:;_-".contains(b))
        .collect();
    if digits.len() % 2 != 0 {
        bail!("odd number of hexadecimal digits");
    }
    digits
        .chunks(2)
        .map(|pair| match (hex_digit(pair[0]), hex_digit(pair[1])) {
            (Some(high), Some(low)) => Ok(high << 4 | low),
            _ => bail!(
                "invalid hexadecimal digits {:?}",
                String::from_utf8_lossy(pair)
            ),
        })
        .collect()
}

fn hex_digit(byte: u8) -> Option<u8> {
    (byte as char).to_digit(16).map(|digit| digit as u8)
}

/// Writes `value` as an indented tree; dictionaries in canonical key order.
fn render(value: &Value, depth: usize, out: &mut String) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(true) => out.push_str("true"),
        Value::Bool(false) => out.push_str("false"),
        Value::Integer(int) => out.push_str(&int.to_string()),
        Value::Bytes(bytes) => out.push_str(&format!("b\"{}\"", bytes.escape_ascii())),
        Value::Text(text) => out.push_str(&format!("{:?}", text)),
        Value::List(items) if items.is_empty() => out.push_str("[]"),
        Value::List(items) => {
            out.push_str("[\n");
            for item in items {
                indent(depth + 1, out);
                render(item, depth + 1, out);
                out.push('\n');
            }
            indent(depth, out);
            out.push(']');
        },
        Value::Dict(dict) if dict.is_empty() => out.push_str("{}"),
        Value::Dict(dict) => {
            let mut entries: Vec<_> = dict.iter().collect();
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));

            out.push_str("{\n");
            for (key, value) in entries {
                indent(depth + 1, out);
                render(&Value::from(key.clone()), depth + 1, out);
                out.push_str(": ");
                render(value, depth + 1, out);
                out.push('\n');
            }
            indent(depth, out);
            out.push('}');
        },
    }
}

fn indent(depth: usize, out: &mut String) {
    for _ in 0..depth {
        out.push('\t');
    }
}
