use std::path::PathBuf;

use anyhow::{Context, Result};
use bytebox::{RunOptions, TemplateGame};
use bytebox_common::key::Key;
use bytebox_core::{ConsoleConfig, MemoryViewer, SCREEN_HEIGHT, SCREEN_WIDTH};

const USAGE: &str = "Usage: bytebox <out_rgb24_path> [frames] [held_keys] [--realtime] [--view=ADDR]\n\
                     held_keys is a comma separated list, e.g. right,z\n\
                     --view prints 256 bytes of memory from ADDR (4 hex digits) after the run";

fn main() -> Result<()> {
    env_logger::init();

    let mut realtime = false;
    let mut memory_view = None;
    let mut positional = Vec::new();
    for arg in std::env::args().skip(1) {
        if let Some(addr) = arg.strip_prefix("--view=") {
            let base = MemoryViewer::default()
                .set_base_hex(addr)
                .with_context(|| format!("Invalid view address '{addr}'"))?;
            memory_view = Some(base);
            continue;
        }
        match arg.as_str() {
            "--realtime" => realtime = true,
            "-h" | "--help" => {
                println!("{USAGE}");
                return Ok(());
            }
            _ => positional.push(arg),
        }
    }

    let mut positional = positional.into_iter();
    let out_path: PathBuf = positional.next().map(PathBuf::from).unwrap_or_else(|| {
        eprintln!("{USAGE}");
        std::process::exit(2);
    });
    let frames: u32 = match positional.next() {
        Some(frames) => frames
            .parse()
            .with_context(|| format!("Invalid frame count '{frames}'"))?,
        None => 120,
    };
    let held_keys: Vec<Key> = positional
        .next()
        .unwrap_or_default()
        .split(',')
        .filter(|name| !name.trim().is_empty())
        .map(|name| {
            let key = Key::from_name(name.trim());
            if key == Key::None {
                log::warn!("Ignoring unknown key '{}'", name);
            }
            key
        })
        .filter(|key| *key != Key::None)
        .collect();

    let options = RunOptions {
        frames,
        held_keys,
        realtime,
        wram_path: Some(out_path.with_extension("wram")),
        memory_view,
    };
    let output = bytebox::run(
        ConsoleConfig::default(),
        Box::new(TemplateGame::default()),
        &options,
    )?;

    std::fs::write(&out_path, &output.screen)
        .with_context(|| format!("Failed to write '{}'", out_path.display()))?;

    println!(
        "Wrote {} bytes ({}x{} rgb24) after {} frames to '{}'",
        output.screen.len(),
        SCREEN_WIDTH,
        SCREEN_HEIGHT,
        output.frames,
        out_path.display()
    );
    for row in &output.memory_view {
        println!("{row}");
    }
    Ok(())
}
