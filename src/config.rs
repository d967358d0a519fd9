// Copyright (c) 2026 rezky_nightky

use std::io::IsTerminal;
use std::time::Duration;

use clap::Parser;

use crate::bitmap::FaceLibrary;

pub const DEFAULT_PARAMS_USAGE: &str = "DEFAULT PARAMS USAGE:\n  pixelface --width 35 --height 26 --frames 8 --frame-delay 30 --noisepct 10 --rotate 5 --color pink --color-bg black";

/// The tunables of one running board. The upstream script shipped as two
/// near-identical copies differing only in these constants; here they are
/// one profile filled in from the CLI.
#[derive(Clone, Copy, Debug)]
pub struct Profile {
    pub width: u16,
    pub height: u16,
    pub frames: u32,
    pub frame_delay: Duration,
    pub noise_chance: f32,
    /// `None` disables automatic rotation entirely.
    pub rotate_every: Option<Duration>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            width: 35,
            height: 26,
            frames: 8,
            frame_delay: Duration::from_millis(30),
            noise_chance: 0.1,
            rotate_every: Some(Duration::from_secs(5)),
        }
    }
}

pub fn color_enabled_stdout() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if matches!(std::env::var("CLICOLOR").ok().as_deref(), Some("0")) {
        return false;
    }
    std::io::stdout().is_terminal()
}

fn colorize_help_detail(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 64);
    for chunk in text.split_inclusive('\n') {
        let (line, nl) = chunk
            .strip_suffix('\n')
            .map(|l| (l, "\n"))
            .unwrap_or((chunk, ""));

        let is_heading =
            !line.starts_with(' ') && line.ends_with(':') && line == line.to_ascii_uppercase();

        if is_heading {
            out.push_str("\x1b[1;36m");
            out.push_str(line);
            out.push_str("\x1b[0m");
            out.push_str(nl);
            continue;
        }

        if let Some(rest) = line.strip_prefix("      Example:") {
            out.push_str("      \x1b[32mExample:\x1b[0m");
            out.push_str(rest);
            out.push_str(nl);
            continue;
        }

        if let Some(rest) = line.strip_prefix("  pixelface") {
            out.push_str("  \x1b[1;34mpixelface\x1b[0m");
            out.push_str(rest);
            out.push_str(nl);
            continue;
        }

        if let Some(rest) = line.strip_prefix("  -") {
            out.push_str("  \x1b[33m-");
            out.push_str(rest);
            out.push_str("\x1b[0m");
            out.push_str(nl);
            continue;
        }

        out.push_str(line);
        out.push_str(nl);
    }
    out
}

pub fn default_params_usage_for_help() -> String {
    if color_enabled_stdout() {
        colorize_help_detail(DEFAULT_PARAMS_USAGE)
    } else {
        DEFAULT_PARAMS_USAGE.to_string()
    }
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorBg {
    #[value(name = "black")]
    Black,
    #[value(name = "default-background")]
    DefaultBackground,
    #[value(name = "transparent")]
    Transparent,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "pixelface", version, disable_version_flag = true)]
pub struct Args {
    #[arg(
        short = 'W',
        long = "width",
        default_value_t = 35,
        help_heading = "BOARD",
        help = "Board width in cells (min 1 max 500)"
    )]
    pub width: u16,

    #[arg(
        short = 'H',
        long = "height",
        default_value_t = 26,
        help_heading = "BOARD",
        help = "Board height in cells (min 1 max 500)"
    )]
    pub height: u16,

    #[arg(
        long = "face",
        help_heading = "BOARD",
        help = "Face to show first instead of a random one (see --list-faces)"
    )]
    pub face: Option<String>,

    #[arg(
        short = 'n',
        long = "frames",
        default_value_t = 8,
        help_heading = "ANIMATION",
        help = "Noise frames per face change (min 1 max 60)"
    )]
    pub frames: u32,

    #[arg(
        short = 'D',
        long = "frame-delay",
        default_value_t = 30,
        help_heading = "ANIMATION",
        help = "Delay between noise frames in ms (min 1 max 5000)"
    )]
    pub frame_delay: u64,

    #[arg(
        short = 'N',
        long = "noisepct",
        default_value_t = 10.0,
        help_heading = "ANIMATION",
        help = "Chance a cell lights up during a noise frame, in percent (min 0 max 100)"
    )]
    pub noisepct: f32,

    #[arg(
        short = 'r',
        long = "rotate",
        default_value_t = 5.0,
        help_heading = "ANIMATION",
        help = "Seconds between automatic face changes (min 0.5 max 86400)"
    )]
    pub rotate: f64,

    #[arg(
        long = "no-rotate",
        help_heading = "ANIMATION",
        help = "Never change faces automatically"
    )]
    pub no_rotate: bool,

    #[arg(
        short = 'c',
        long = "color",
        default_value = "pink",
        help_heading = "APPEARANCE",
        help = "Color scheme (allowed: pink, green, amber, cyan, white)"
    )]
    pub color: String,

    #[arg(
        long = "color-bg",
        default_value_t = ColorBg::Black,
        value_enum,
        help_heading = "APPEARANCE",
        help = "Background mode (black, default-background, transparent)"
    )]
    pub color_bg: ColorBg,

    #[arg(
        long = "colormode",
        help_heading = "APPEARANCE",
        help = "Force color mode (allowed: 0,8,24). Default: 24-bit if supported (COLORTERM), else 8-bit"
    )]
    pub colormode: Option<u16>,

    #[arg(
        long = "duration",
        help_heading = "GENERAL",
        help = "Stop after N seconds (min 0.1 max 86400; <=0 disables)"
    )]
    pub duration: Option<f64>,

    #[arg(
        short = 's',
        long = "screensaver",
        help_heading = "GENERAL",
        help = "Screensaver mode (exit on any keypress)"
    )]
    pub screensaver: bool,

    #[arg(
        long = "check-bitcolor",
        help_heading = "HELP",
        help = "Print detected terminal color capability and exit"
    )]
    pub check_bitcolor: bool,

    #[arg(
        long = "help-detail",
        help_heading = "HELP",
        help = "Show detailed help for all parameters and exit"
    )]
    pub help_detail: bool,

    #[arg(
        long = "list-faces",
        help_heading = "HELP",
        help = "List built-in faces and exit"
    )]
    pub list_faces: bool,

    #[arg(
        long = "info",
        short = 'i',
        help_heading = "HELP",
        help = "Print version info and exit"
    )]
    pub info: bool,

    #[arg(
        long = "version",
        short = 'v',
        help_heading = "HELP",
        help = "Print version and exit"
    )]
    pub version: bool,
}

pub fn print_list_faces() {
    if color_enabled_stdout() {
        println!("\x1b[1;36mBUILT-IN FACES:\x1b[0m");
        println!("\x1b[2mNOTE: Use the VALUE (left side) with --face.\x1b[0m");
    } else {
        println!("BUILT-IN FACES:");
        println!("NOTE: Use the VALUE (left side) with --face.");
    }
    println!();
    println!("VALUE        SIZE (WxH)");
    let lib = FaceLibrary::builtin();
    for name in lib.names() {
        let face = lib.lookup(name).expect("name came from the library");
        println!("{:<12} {}x{}", name, face.width(), face.height());
    }
}

pub fn print_help_detail() {
    let block = format!(
        "{}\n\nUSAGE:\n  pixelface [OPTIONS]\n\nBOARD:\n  -W, --width <cells>\n      Board width in cells (min 1 max 500).\n      Example: pixelface -W 48\n\n  -H, --height <cells>\n      Board height in cells (min 1 max 500).\n      Example: pixelface -H 32\n\n  --face <name>\n      Face to show first (see --list-faces).\n      Example: pixelface --face wink\n\nANIMATION:\n  -n, --frames <count>\n      Noise frames per face change (min 1 max 60).\n      Example: pixelface --frames 5\n\n  -D, --frame-delay <ms>\n      Delay between noise frames (min 1 max 5000).\n      Example: pixelface --frame-delay 50\n\n  -N, --noisepct <percent>\n      Chance a cell lights up during noise (min 0 max 100).\n      Example: pixelface --noisepct 15\n\n  -r, --rotate <seconds>\n      Seconds between automatic face changes (min 0.5 max 86400).\n      Example: pixelface --rotate 10\n\n  --no-rotate\n      Never change faces automatically.\n      Example: pixelface --no-rotate\n\nAPPEARANCE:\n  -c, --color <name>\n      Color scheme (pink, green, amber, cyan, white).\n      Example: pixelface --color cyan\n\n  --colormode <0|8|24>\n      Force color mode; otherwise auto-detected from COLORTERM/TERM.\n      Example: pixelface --colormode 24\n\n  --color-bg <black|default-background|transparent>\n      Background mode.\n      Example: pixelface --color-bg transparent\n\nGENERAL:\n  --duration <seconds>\n      Stop after N seconds (min 0.1 max 86400).\n      Example: pixelface --duration 30\n\n  -s, --screensaver\n      Exit on any keypress.\n      Example: pixelface -s\n\nCONTROLS:\n  mouse        toggle a cell (pauses rotation)\n  space        random face\n  n / tab      next face (sorted order)\n  i            reinitialize the board\n  q / esc      quit (prints the drawn pattern, if any)\n\nHELP:\n  --help\n      Show short help.\n\n  --help-detail\n      Show this detailed help.\n\n  --list-faces\n      List built-in faces and exit.\n\n  --check-bitcolor\n      Print detected terminal color capability and exit.\n\n  -v, --version\n      Print version and exit.\n\n  -i, --info\n      Print version info and exit.\n",
        DEFAULT_PARAMS_USAGE
    );

    if color_enabled_stdout() {
        print!("{}", colorize_help_detail(&block));
    } else {
        print!("{}", block);
    }

    println!();
    print_list_faces();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_matches_the_upstream_constants() {
        let p = Profile::default();
        assert_eq!(p.width, 35);
        assert_eq!(p.height, 26);
        assert_eq!(p.frames, 8);
        assert_eq!(p.frame_delay, Duration::from_millis(30));
        assert!((p.noise_chance - 0.1).abs() < f32::EPSILON);
        assert_eq!(p.rotate_every, Some(Duration::from_secs(5)));
    }

    #[test]
    fn args_parse_with_defaults() {
        let args = Args::parse_from(["pixelface"]);
        assert_eq!(args.width, 35);
        assert_eq!(args.height, 26);
        assert_eq!(args.frames, 8);
        assert_eq!(args.color, "pink");
        assert!(!args.no_rotate);
        assert!(args.face.is_none());
    }

    #[test]
    fn args_accept_overrides() {
        let args = Args::parse_from([
            "pixelface",
            "--width",
            "20",
            "--face",
            "wink",
            "--no-rotate",
            "--noisepct",
            "25",
        ]);
        assert_eq!(args.width, 20);
        assert_eq!(args.face.as_deref(), Some("wink"));
        assert!(args.no_rotate);
        assert!((args.noisepct - 25.0).abs() < f32::EPSILON);
    }
}
