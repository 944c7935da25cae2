// What you SEE:
// • A gold card sits in the middle of the window. Hold Left Mouse and drag to scratch it off.
// • Once enough of it is gone the rest fades away and the hidden picture is fully shown.
// • R or the RESET button repaints the cover (new game). ESC quits. Resize the window and the card follows.

use clap::Parser;
use scratch_reveal::draw::{
    draw_artwork, draw_button, draw_cover, draw_spinner, draw_text_5x7, draw_text_centered, fill_card,
    layout, Drawer, Layout, CARD_BG, HEADING_COLOR, PAGE_BG, SUBTITLE_COLOR,
};
use scratch_reveal::fade::Fade;
use scratch_reveal::input::{Button, PointerTracker};
use scratch_reveal::loader::{scale_to_cover, ImageLoader, LoadState};
use scratch_reveal::types::FrameBuffer;
use scratch_reveal::{Config, Error, ScratchCard};
use std::path::{Path, PathBuf};
use std::time::Instant;

const DEFAULT_CONFIG: &str = "scratch-reveal.toml";
const CARD_MARGIN: usize = 24;

#[derive(Parser, Debug)]
#[command(name = "scratch-reveal", about = "Scratch off the gold to reveal a hidden picture")]
struct Args {
    /// TOML config file (defaults to ./scratch-reveal.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Image to hide under the cover; overrides `image_path` from the config
    #[arg(long)]
    image: Option<PathBuf>,
}

fn load_config(args: &Args) -> Result<Config, Error> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None if Path::new(DEFAULT_CONFIG).exists() => Config::load_or_default(Path::new(DEFAULT_CONFIG)),
        None => Config::default(),
    };
    if let Some(image) = &args.image {
        config.image_path = image.clone();
    }
    Ok(config)
}

fn main() -> Result<(), Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    let config = load_config(&args)?;
    log::debug!("config: {config:?}");

    /* --- Window + screen buffer --- */
    let mut drawer = Drawer::new("Scratch & Reveal", config.window_width, config.window_height)?;
    let (mut win_w, mut win_h) = drawer.size();
    let mut screen = FrameBuffer::new(win_w, win_h);

    /* --- The card, sized to its box in the window --- */
    let mut page: Layout = layout(win_w, win_h, CARD_MARGIN);
    let mut card = ScratchCard::new(config);
    let (cw, ch) = page.card.pixel_size();
    card.resize(cw, ch);
    let mut reset_button = Button::new(page.reset_button);

    /* --- Hidden artwork: decoded in the background, scaled per card size --- */
    let mut loader = ImageLoader::spawn(card.config().image_path.clone());
    let mut artwork: Option<FrameBuffer> = None;
    let mut artwork_fade = Fade::new(card.config().image_fade());

    let mut pointer = PointerTracker::new();
    let started = Instant::now();
    let mut last_frame_time = Instant::now();

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        let now = Instant::now();
        let dt = now - last_frame_time;
        last_frame_time = now;

        /* 1) Resize notifier: window size changed → new layout, fresh cover. */
        let (w, h) = drawer.size();
        if (w, h) != (win_w, win_h) {
            (win_w, win_h) = (w, h);
            screen.resize(w, h);
            let next = layout(w, h, CARD_MARGIN);
            if next.card.pixel_size() != page.card.pixel_size() {
                let (cw, ch) = next.card.pixel_size();
                card.resize(cw, ch);
                artwork = None;
            }
            reset_button.bounds = next.reset_button;
            page = next;
        }

        /* 2) Inputs: R or the reset button start over; the mouse scratches. */
        let mouse = drawer.mouse_pos();
        let mouse_down = drawer.left_mouse_down();
        if drawer.reset_pressed_once() | reset_button.poll(mouse, mouse_down) {
            card.reset();
        }
        for event in pointer.poll(mouse, mouse_down, &page.card) {
            card.handle_input(&event, &page.card);
        }

        /* 3) Time-driven effects: cover fade, artwork fade-in. */
        card.tick(dt);
        if let LoadState::Ready(img) = loader.poll() {
            let (cw, ch) = page.card.pixel_size();
            if artwork.as_ref().is_none_or(|a| (a.width, a.height) != (cw, ch)) {
                artwork = Some(scale_to_cover(img, cw, ch));
            }
            artwork_fade.advance(dt);
        }

        /* 4) Compose the frame. */
        screen.fill(PAGE_BG);
        let center_x = (w / 2) as i32;
        draw_text_centered(&mut screen, center_x, page.heading_y, &card.config().heading, 4, HEADING_COLOR);
        draw_text_centered(&mut screen, center_x, page.subtitle_y, &card.config().subtitle, 1, SUBTITLE_COLOR);

        fill_card(&mut screen, &page.card, CARD_BG);
        if let Some(art) = &artwork {
            draw_artwork(&mut screen, &page.card, art, artwork_fade.eased());
        } else {
            draw_spinner(&mut screen, &page.card, started.elapsed().as_secs_f32() * 6.0);
        }
        draw_cover(&mut screen, &page.card, card.surface(), card.opacity());

        let status = if card.is_revealed() { " | REVEALED" } else { "" };
        let hud = format!("COVERAGE {:.1}%{} | R: RESET", card.coverage_percent(), status);
        draw_text_5x7(&mut screen, page.card.left as i32, page.hud_y, &hud, 0x00_FF_FF_FF);
        draw_button(&mut screen, &page.reset_button, "RESET", reset_button.hovered());

        /* 5) Present to the window. */
        drawer.present(&screen)?;
    }

    Ok(())
}
