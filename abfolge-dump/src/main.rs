mod layout;
mod parser;

use abfolge::ByteView;
use std::io::{self, Read};
use anyhow::{anyhow, Context, Result};
use structopt::StructOpt;
use tracing::{debug, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

/// Decode and print abfolge buffers
#[derive(StructOpt)]
#[structopt(name = "aq")]
struct Opt {
    /// shape of the encoded value, for instance `(u32, [str], {u8: [f64; 3]})`
    shape: String,
    /// the input is base64 text instead of raw bytes
    #[structopt(short, long)]
    base64: bool,
    /// only validate the input and print the number of bytes the value occupies
    #[structopt(short, long)]
    check: bool,
    /// skip this many bytes at the start of the input
    #[structopt(short, long, default_value = "0")]
    offset: usize,
    /// log what is going on to stderr
    #[structopt(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let opt = Opt::from_args();
    init_logging(opt.verbose)?;
    let layout = parser::parse(&opt.shape)?;
    debug!(category = %layout.category(), static_size = ?layout.static_size(), "parsed shape");

    let mut buffer = Vec::new();
    io::stdin().read_to_end(&mut buffer).context("Failed to read stdin")?;
    if opt.base64 {
        let text: Vec<u8> = buffer.into_iter().filter(|b| !b.is_ascii_whitespace()).collect();
        buffer = base64::decode(&text).context("Input is not valid base64")?;
    }
    debug!(len = buffer.len(), offset = opt.offset, "read input");
    let input = buffer.get(opt.offset..)
        .ok_or_else(|| anyhow!("Offset {} is past the end of the {} byte input", opt.offset, buffer.len()))?;

    let size = layout.try_size_of(input)
        .ok_or_else(|| anyhow!("Input does not hold a complete value of shape `{}`", opt.shape.trim()))?;
    if size < input.len() {
        warn!(trailing = input.len() - size, "input continues after the value");
    }
    if opt.check {
        println!("{}", size);
        return Ok(());
    }

    let mut view = ByteView::new(input);
    let value = layout.decode(&mut view)
        .map_err(|e| e.at(opt.offset + view.position()))
        .context("Decoding error")?;
    println!("{}", value);
    println!("{} bytes", view.position());
    Ok(())
}

fn init_logging(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let subscriber = Registry::default()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr).with_target(false));
    tracing::subscriber::set_global_default(subscriber).context("Failed to install logger")?;
    Ok(())
}
