//! pastebin CLI Client
//!
//! Command-line interface for interacting with a pastebin server.

use std::io::{self, Read, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use pastebin::network::Client;
use pastebin::render::{TEXT_HTML, TEXT_PLAIN};

/// pastebin CLI
#[derive(Parser, Debug)]
#[command(name = "pastebin-cli")]
#[command(about = "CLI for the pastebin service")]
struct Args {
    /// Server address
    #[arg(short, long, env = "PASTEBIN_SERVER", default_value = "127.0.0.1:8000")]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Paste standard input and print the new id
    Paste,

    /// Print a paste
    View {
        /// The paste id
        id: String,

        /// Render as escaped HTML instead of plain text
        #[arg(long)]
        html: bool,
    },

    /// Save a paste to a file named after its id
    Download {
        /// The paste id
        id: String,

        /// Directory to write into
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
    },

    /// Delete a paste
    Delete {
        /// The paste id
        id: String,
    },

    /// Ping the server
    Ping,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> pastebin::Result<()> {
    let mut client = Client::connect(&args.server)?;

    match args.command {
        Commands::Paste => {
            let mut blob = Vec::new();
            io::stdin().read_to_end(&mut blob)?;
            let id = client.paste(blob, TEXT_PLAIN)?;
            println!("{}", id);
        }
        Commands::View { id, html } => {
            let accept = if html { TEXT_HTML } else { TEXT_PLAIN };
            match client.view(&id, accept)? {
                Some(body) => io::stdout().write_all(&body)?,
                None => not_found(&id),
            }
        }
        Commands::Download { id, out_dir } => match client.download_to(&id, &out_dir)? {
            Some(path) => println!("{}", path.display()),
            None => not_found(&id),
        },
        Commands::Delete { id } => {
            if client.delete(&id)? {
                println!("Deleted");
            } else {
                not_found(&id);
            }
        }
        Commands::Ping => {
            client.ping()?;
            println!("PONG");
        }
    }

    Ok(())
}

fn not_found(id: &str) -> ! {
    eprintln!("{}: not found", id);
    std::process::exit(2);
}
