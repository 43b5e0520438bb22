//! emojify - rewrite emoji in HTML fragments

use std::fs;
use std::io::{self, Read, Write};
use std::process::ExitCode;

use clap::Parser;

use emojify::{EmojiTable, Rewriter};

#[derive(Parser)]
#[command(name = "emojify")]
#[command(version, about = "Rewrite emoji shortcodes and glyphs in HTML", long_about = None)]
#[command(after_help = "EXAMPLES:
    emojify post.html -o out.html          Rewrite a file
    echo ':fire:' | emojify                Rewrite stdin to stdout
    emojify --skip pre post.html           Also leave <pre> alone
    emojify --list                         Show known shortcodes")]
struct Cli {
    /// Input HTML fragment (reads stdin when omitted)
    #[arg(value_name = "INPUT")]
    input: Option<String>,

    /// Output file (writes stdout when omitted)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<String>,

    /// Extra tag to leave untouched, in addition to <code> (repeatable)
    #[arg(long = "skip", value_name = "TAG")]
    skip: Vec<String>,

    /// Print the emoji table and exit
    #[arg(short, long)]
    list: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let result = if cli.list {
        list_table()
    } else {
        rewrite(&cli)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn list_table() -> Result<(), String> {
    let mut out = io::stdout().lock();
    for emoji in EmojiTable::bundled().iter() {
        writeln!(out, "{}\t:{}:\t{}", emoji.glyph(), emoji.shortcode(), emoji.title())
            .map_err(|e| e.to_string())?;
    }
    Ok(())
}

fn rewrite(cli: &Cli) -> Result<(), String> {
    let bytes = match &cli.input {
        Some(path) => fs::read(path).map_err(|e| format!("{path}: {e}"))?,
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .map_err(|e| e.to_string())?;
            buf
        }
    };

    let rewriter = cli
        .skip
        .iter()
        .fold(Rewriter::new(EmojiTable::bundled()), |r, tag| {
            r.with_opaque_tag(tag.as_str())
        });
    let html = rewriter
        .replace_html_bytes(&bytes)
        .map_err(|e| e.to_string())?;

    match &cli.output {
        Some(path) => fs::write(path, html).map_err(|e| format!("{path}: {e}")),
        None => io::stdout()
            .write_all(html.as_bytes())
            .map_err(|e| e.to_string()),
    }
}
