// Desktop simulator for the 400x300 1-bit panel.
// • SPACE cycles demo scenes, 1-4 jumps to one.
// • S saves a PNG of what is on screen. Q/ESC quits.
// • `--screenshot out.png` renders a single frame headless and exits.

mod demo;

use std::path::{Path, PathBuf};

use clap::Parser;
use demo::{ClockTime, Demo, Mode};
use log::{debug, info, warn};
use rlcd_render::draw::{DisplaySink, Drawer, HeadlessSink};
use rlcd_render::dirty::{dirty_rows, is_clean};
use rlcd_render::{Error, Framebuffer, HEIGHT, WIDTH};

#[derive(Parser, Debug)]
#[command(author, version, about = "1-bit reflective LCD simulator")]
struct Args {
    /// Window pixels per panel pixel
    #[arg(short, long, default_value_t = 2)]
    scale: usize,

    /// Scene to start in
    #[arg(short, long, value_enum, default_value_t = Mode::Patterns)]
    mode: Mode,

    /// Render one frame to this PNG and exit
    #[arg(long)]
    screenshot: Option<PathBuf>,
}

const PANEL_W: usize = WIDTH as usize;
const PANEL_H: usize = HEIGHT as usize;

fn main() -> Result<(), Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if let Some(path) = args.screenshot {
        return render_once(args.mode, args.scale, &path);
    }
    run(args.mode, args.scale)
}

fn render_once(mode: Mode, scale: usize, path: &Path) -> Result<(), Error> {
    let demo = Demo::new(mode, false);
    let mut fb = Framebuffer::new();
    demo.draw(&mut fb, ClockTime::now());

    let mut sink = HeadlessSink::new();
    sink.present(fb.as_bytes(), PANEL_W, PANEL_H, scale)?;
    sink.save_screenshot(path)
}

fn run(mode: Mode, scale: usize) -> Result<(), Error> {
    let mut drawer = Drawer::new("RLCD Simulator", PANEL_W, PANEL_H, scale)?;
    drawer.set_target_fps(30);

    let mut demo = Demo::new(mode, true);
    let mut fb = Framebuffer::new();
    let mut previous = Framebuffer::new();
    let mut shots = 0u32;
    let mut first_frame = true;

    info!("showing {}", demo.mode().name());

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.quit_pressed() {
        if drawer.next_pressed_once() {
            demo.next_mode();
            info!("showing {}", demo.mode().name());
        }
        if let Some(index) = drawer.mode_key_pressed() {
            demo.set_mode(index);
            info!("showing {}", demo.mode().name());
        }

        demo.draw(&mut fb, ClockTime::now());

        // A real panel would only be sent these rows.
        if first_frame || !is_clean(&fb, &previous) {
            let regions = dirty_rows(&fb, &previous, 8);
            debug!("{} dirty region(s) this frame", regions.len());
            previous.clone_from(&fb);
            first_frame = false;
        }

        drawer.present(fb.as_bytes(), PANEL_W, PANEL_H, scale)?;

        if drawer.screenshot_pressed_once() {
            shots += 1;
            let path = PathBuf::from(format!("rlcd_{:?}_{shots:03}.png", demo.mode()).to_lowercase());
            if let Err(e) = drawer.save_screenshot(&path) {
                warn!("{e}");
            }
        }
    }

    Ok(())
}
