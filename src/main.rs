// Copyright (c) 2026 rezky_nightky

mod bitmap;
mod cell;
mod config;
mod export;
mod faces;
mod frame;
mod grid;
mod palette;
mod place;
mod runtime;
mod session;
mod terminal;
mod view;

use std::env;
use std::time::{Duration, Instant};

#[cfg(unix)]
use std::thread;

use anyhow::Context;
use clap::builder::styling::{AnsiColor as ClapAnsiColor, Color as ClapColor};
use clap::builder::styling::{Effects as ClapEffects, Style as ClapStyle};
use clap::builder::Styles as ClapStyles;
use clap::{CommandFactory, FromArgMatches};
use crossterm::event::{Event, KeyEventKind, KeyCode, MouseButton, MouseEventKind};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[cfg(unix)]
use signal_hook::consts::{SIGHUP, SIGINT, SIGTERM};
#[cfg(unix)]
use signal_hook::iterator::Signals;

use crate::bitmap::FaceLibrary;
use crate::config::{
    color_enabled_stdout, default_params_usage_for_help, print_help_detail, print_list_faces,
    Args, ColorBg, Profile,
};
use crate::frame::Frame;
use crate::palette::build_palette;
use crate::runtime::{ColorMode, ColorScheme};
use crate::session::Session;
use crate::terminal::{restore_terminal_best_effort, Terminal};
use crate::view::Layout;

const HELP_TEMPLATE_PLAIN: &str = "\
{before-help}{about-with-newline}
USAGE:
  {usage}

{all-args}{after-help}";

const HELP_TEMPLATE_COLOR: &str = "\
{before-help}{about-with-newline}
\x1b[1;36mUSAGE:\x1b[0m
  {usage}

{all-args}{after-help}";

// poll timeout while nothing is scheduled (rotation paused, no animation)
const IDLE_POLL: Duration = Duration::from_millis(500);

fn build_info() -> &'static str {
    env!("PIXELFACE_BUILD")
}

fn clap_styles() -> ClapStyles {
    ClapStyles::styled()
        .header(
            ClapStyle::new()
                .effects(ClapEffects::BOLD)
                .fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Cyan))),
        )
        .usage(
            ClapStyle::new()
                .effects(ClapEffects::BOLD)
                .fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Green))),
        )
        .literal(ClapStyle::new().fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Yellow))))
        .placeholder(ClapStyle::new().fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Magenta))))
}

fn require_f64_range(name: &str, v: f64, min: f64, max: f64) -> f64 {
    if !v.is_finite() {
        eprintln!("failed to apply {} {} (must be a finite number)", name, v);
        std::process::exit(1);
    }
    if v < min || v > max {
        eprintln!("failed to apply {} {} (min {} max {})", name, v, min, max);
        std::process::exit(1);
    }
    v
}

fn require_f32_range(name: &str, v: f32, min: f32, max: f32) -> f32 {
    if !v.is_finite() {
        eprintln!("failed to apply {} {} (must be a finite number)", name, v);
        std::process::exit(1);
    }
    if v < min || v > max {
        eprintln!("failed to apply {} {} (min {} max {})", name, v, min, max);
        std::process::exit(1);
    }
    v
}

fn require_u16_range(name: &str, v: u16, min: u16, max: u16) -> u16 {
    if v < min || v > max {
        eprintln!("failed to apply {} {} (min {} max {})", name, v, min, max);
        std::process::exit(1);
    }
    v
}

fn require_u32_range(name: &str, v: u32, min: u32, max: u32) -> u32 {
    if v < min || v > max {
        eprintln!("failed to apply {} {} (min {} max {})", name, v, min, max);
        std::process::exit(1);
    }
    v
}

fn require_u64_range(name: &str, v: u64, min: u64, max: u64) -> u64 {
    if v < min || v > max {
        eprintln!("failed to apply {} {} (min {} max {})", name, v, min, max);
        std::process::exit(1);
    }
    v
}

fn detect_color_mode_auto() -> ColorMode {
    let colorterm = env::var("COLORTERM")
        .unwrap_or_default()
        .to_ascii_lowercase();
    if colorterm.contains("truecolor") || colorterm.contains("24bit") {
        return ColorMode::TrueColor;
    }

    let term = env::var("TERM").unwrap_or_default().to_ascii_lowercase();
    if term == "dumb" {
        return ColorMode::Mono;
    }

    ColorMode::Color256
}

fn detect_color_mode(args: &Args) -> ColorMode {
    if let Some(m) = args.colormode {
        return match m {
            0 => ColorMode::Mono,
            8 => ColorMode::Color256,
            24 => ColorMode::TrueColor,
            _ => {
                eprintln!("invalid --colormode: {} (allowed: 0,8,24)", m);
                std::process::exit(1);
            }
        };
    }

    detect_color_mode_auto()
}

fn color_mode_label(m: ColorMode) -> &'static str {
    match m {
        ColorMode::TrueColor => "24-bit truecolor",
        ColorMode::Color256 => "8-bit (256-color)",
        ColorMode::Mono => "mono",
    }
}

fn parse_color_scheme(s: &str) -> Result<ColorScheme, String> {
    match s.trim().to_ascii_lowercase().as_str() {
        "pink" | "rina" => Ok(ColorScheme::Pink),
        "green" => Ok(ColorScheme::Green),
        "amber" | "orange" => Ok(ColorScheme::Amber),
        "cyan" => Ok(ColorScheme::Cyan),
        "white" | "mono" => Ok(ColorScheme::White),
        _ => Err(format!(
            "invalid color: {} (allowed: pink, green, amber, cyan, white)",
            s
        )),
    }
}

fn main() -> anyhow::Result<()> {
    std::panic::set_hook(Box::new(|info| {
        restore_terminal_best_effort();
        eprintln!("{}", info);
    }));

    #[cfg(unix)]
    {
        if let Ok(mut signals) = Signals::new([SIGINT, SIGTERM, SIGHUP]) {
            thread::spawn(move || {
                if let Some(sig) = signals.forever().next() {
                    restore_terminal_best_effort();
                    std::process::exit(128 + sig);
                }
            });
        }
    }

    #[cfg(windows)]
    {
        if let Err(e) = ctrlc::set_handler(|| {
            restore_terminal_best_effort();
            std::process::exit(130);
        }) {
            eprintln!("failed to install Ctrl-C handler: {}", e);
        }
    }

    let mut cmd = Args::command();
    cmd = cmd.styles(clap_styles());
    cmd = cmd.before_help(default_params_usage_for_help());
    let help_template = if color_enabled_stdout() {
        HELP_TEMPLATE_COLOR
    } else {
        HELP_TEMPLATE_PLAIN
    };
    cmd = cmd.help_template(help_template);
    cmd.build();

    if cmd.get_arguments().any(|a| a.get_id().as_str() == "help") {
        cmd = cmd.mut_arg("help", |a| a.help_heading("HELP"));
    }
    cmd.build();

    let matches = cmd.get_matches();
    let args = Args::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    if args.list_faces {
        print_list_faces();
        return Ok(());
    }

    if args.help_detail {
        print_help_detail();
        return Ok(());
    }

    if args.check_bitcolor {
        let colorterm = env::var("COLORTERM").unwrap_or_default();
        let term = env::var("TERM").unwrap_or_default();
        let auto = detect_color_mode_auto();
        let effective = detect_color_mode(&args);

        println!("BITCOLOR CHECK:");
        println!(
            "  COLORTERM: {}",
            if colorterm.is_empty() {
                "(unset)"
            } else {
                &colorterm
            }
        );
        println!(
            "  TERM: {}",
            if term.is_empty() { "(unset)" } else { &term }
        );
        println!("  auto_detected: {}", color_mode_label(auto));
        if args.colormode.is_some() {
            println!("  forced: {}", color_mode_label(effective));
        }
        println!("  effective: {}", color_mode_label(effective));
        return Ok(());
    }

    if args.version {
        println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    if args.info {
        println!("Version: v{}", env!("CARGO_PKG_VERSION"));
        println!("Build: {}", build_info());
        println!("Copyright: (c) 2026 {}", env!("CARGO_PKG_AUTHORS"));
        println!("License: {}", env!("CARGO_PKG_LICENSE"));
        println!("Source: {}", env!("CARGO_PKG_REPOSITORY"));
        return Ok(());
    }

    let width = require_u16_range("--width", args.width, 1, 500);
    let height = require_u16_range("--height", args.height, 1, 500);
    let frames = require_u32_range("--frames", args.frames, 1, 60);
    let frame_delay = require_u64_range("--frame-delay", args.frame_delay, 1, 5000);
    let noisepct = require_f32_range("--noisepct", args.noisepct, 0.0, 100.0);
    let rotate_s = require_f64_range("--rotate", args.rotate, 0.5, 86400.0);
    let duration_s = args.duration.map(|s| {
        if !s.is_finite() {
            eprintln!("failed to apply --duration {} (must be a finite number)", s);
            std::process::exit(1);
        }
        if s > 0.0 {
            return require_f64_range("--duration", s, 0.1, 86400.0);
        }
        s
    });

    let color_scheme = match parse_color_scheme(&args.color) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let color_mode = detect_color_mode(&args);
    let palette = build_palette(
        color_scheme,
        color_mode,
        matches!(
            args.color_bg,
            ColorBg::DefaultBackground | ColorBg::Transparent
        ),
    );

    let faces = FaceLibrary::builtin();
    if let Some(name) = &args.face {
        if faces.lookup(name).is_none() {
            eprintln!("unknown face: {} (see --list-faces)", name);
            std::process::exit(1);
        }
    }

    let profile = Profile {
        width,
        height,
        frames,
        frame_delay: Duration::from_millis(frame_delay),
        noise_chance: noisepct / 100.0,
        rotate_every: if args.no_rotate {
            None
        } else {
            Some(Duration::from_secs_f64(rotate_s))
        },
    };

    let mut session = Session::new(faces, profile, StdRng::from_os_rng());

    let start_time = Instant::now();
    match &args.face {
        Some(name) => session
            .show_face(name, start_time)
            .map_err(|e| anyhow::anyhow!("{}", e))?,
        None => session
            .show_random_face(start_time)
            .map_err(|e| anyhow::anyhow!("{}", e))?,
    }

    let mut term = Terminal::new().context("failed to initialize terminal")?;
    let (w, h) = term.size().context("failed to query terminal size")?;

    let mut layout = Layout::new(w, h, profile.width as usize, profile.height as usize);
    let mut frame = Frame::new(w, h, palette.bg);

    let end_time = duration_s.and_then(|s| {
        if s <= 0.0 {
            return None;
        }
        Some(start_time + Duration::from_secs_f64(s))
    });

    while session.running {
        if end_time.is_some_and(|end| Instant::now() >= end) {
            break;
        }
        let mut pending_resize: Option<(u16, u16)> = None;

        loop {
            let mut acted = false;
            while Terminal::poll_event(Duration::from_millis(0))? {
                let ev = Terminal::read_event()?;
                match ev {
                    Event::Resize(nw, nh) => {
                        pending_resize = Some((nw, nh));
                    }
                    Event::Mouse(m) => {
                        if m.kind == MouseEventKind::Down(MouseButton::Left) {
                            if let Some((row, col)) = layout.cell_at(m.column, m.row) {
                                if session.toggle_cell(row, col) {
                                    acted = true;
                                }
                            }
                        }
                    }
                    Event::Key(k) if k.kind == KeyEventKind::Press => {
                        acted = true;

                        if args.screensaver {
                            session.running = false;
                            break;
                        }

                        let now = Instant::now();
                        match k.code {
                            KeyCode::Esc | KeyCode::Char('q') => session.running = false,
                            KeyCode::Char(' ') => {
                                if let Err(e) = session.show_random_face(now) {
                                    session.warn(e.to_string());
                                }
                            }
                            KeyCode::Char('n') | KeyCode::Tab => {
                                if let Err(e) = session.show_next_face(now) {
                                    session.warn(e.to_string());
                                }
                            }
                            KeyCode::Char('i') => {
                                if let Err(e) = session.initialize(now) {
                                    session.warn(e.to_string());
                                }
                            }
                            _ => {}
                        }
                    }
                    _ => {}
                }
            }

            if !session.running || pending_resize.is_some() || acted {
                break;
            }

            let now = Instant::now();
            if session.next_deadline().is_some_and(|d| now >= d) {
                break;
            }

            let mut timeout = session
                .next_deadline()
                .map(|d| d.saturating_duration_since(now))
                .unwrap_or(IDLE_POLL);
            if let Some(end) = end_time {
                if now >= end {
                    break;
                }
                timeout = timeout.min(end - now);
            }
            let _ = Terminal::poll_event(timeout)?;
        }

        if !session.running {
            break;
        }

        if let Some((nw, nh)) = pending_resize {
            layout = Layout::new(nw, nh, profile.width as usize, profile.height as usize);
            frame = Frame::new(nw, nh, palette.bg);
        }

        session.tick(Instant::now());

        view::draw(&session, &layout, &palette, &mut frame);
        if frame.has_changes() {
            term.draw(&mut frame).context("failed to draw frame")?;
        }
    }

    drop(term);

    if let Some(rows) = session.last_export() {
        if rows.is_empty() {
            println!("DRAWN PATTERN: (empty board)");
        } else {
            println!("DRAWN PATTERN ({} rows, faces.rs format):", rows.len());
            for row in rows {
                println!("\"{}\",", row);
            }
        }
    }

    Ok(())
}
