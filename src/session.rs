// Copyright (c) 2026 rezky_nightky

use std::fmt;
use std::time::Instant;

use rand::{
    distr::{Distribution, Uniform},
    rngs::StdRng,
};

use crate::bitmap::FaceLibrary;
use crate::config::Profile;
use crate::export::export_pattern;
use crate::grid::Grid;
use crate::place::place;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    AnimationInFlight,
    UnknownFace(String),
    NoFaces,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::AnimationInFlight => write!(f, "already animating, request ignored"),
            SessionError::UnknownFace(name) => write!(f, "unknown face: {}", name),
            SessionError::NoFaces => write!(f, "face library is empty"),
        }
    }
}

impl std::error::Error for SessionError {}

/// Animation state. `Settling` from the design notes is transient: the
/// frame that completes the count places the target and drops straight
/// back to `Idle` within the same tick.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Phase {
    Idle,
    Animating {
        frames_done: u32,
        next_frame_at: Instant,
        target: String,
    },
}

/// One running board: grid, face cycling, the noise-frame sequencer and
/// the rotation deadline. All mutation happens on the caller's thread;
/// timers are plain deadlines inspected by `tick`.
pub struct Session {
    pub grid: Grid,
    faces: FaceLibrary,
    profile: Profile,

    phase: Phase,
    current_face: usize,
    rotation_due: Option<Instant>,

    shown_face: Option<String>,
    last_export: Option<Vec<String>>,
    warning: Option<String>,
    pub running: bool,

    rng: StdRng,
    rand_chance: Uniform<f32>,
}

impl Session {
    pub fn new(faces: FaceLibrary, profile: Profile, rng: StdRng) -> Self {
        Self {
            grid: Grid::new(profile.width as usize, profile.height as usize),
            faces,
            profile,
            phase: Phase::Idle,
            current_face: 0,
            rotation_due: None,
            shown_face: None,
            last_export: None,
            warning: None,
            running: true,
            rng,
            rand_chance: Uniform::new(0.0f32, 1.0).expect("valid range"),
        }
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.phase, Phase::Animating { .. })
    }

    pub fn shown_face(&self) -> Option<&str> {
        self.shown_face.as_deref()
    }

    pub fn last_export(&self) -> Option<&[String]> {
        self.last_export.as_deref()
    }

    pub fn warning(&self) -> Option<&str> {
        self.warning.as_deref()
    }

    pub fn warn(&mut self, msg: String) {
        self.warning = Some(msg);
    }

    pub fn rotation_armed(&self) -> bool {
        self.rotation_due.is_some()
    }

    /// Rebuild the board and kick off the first face, as on startup.
    pub fn initialize(&mut self, now: Instant) -> Result<(), SessionError> {
        self.grid = Grid::new(self.profile.width as usize, self.profile.height as usize);
        self.phase = Phase::Idle;
        self.rotation_due = None;
        self.shown_face = None;
        self.last_export = None;
        self.warning = None;
        self.current_face = 0;
        self.show_random_face(now)
    }

    pub fn show_random_face(&mut self, now: Instant) -> Result<(), SessionError> {
        if self.faces.is_empty() {
            return Err(SessionError::NoFaces);
        }
        let dist = Uniform::new(0, self.faces.len()).expect("valid range");
        let idx = dist.sample(&mut self.rng);
        let name = self
            .faces
            .name_at(idx)
            .ok_or(SessionError::NoFaces)?
            .to_string();
        self.start_animation(name, now)
    }

    /// Cycles through the library in sorted-name order.
    pub fn show_next_face(&mut self, now: Instant) -> Result<(), SessionError> {
        if self.faces.is_empty() {
            return Err(SessionError::NoFaces);
        }
        let name = self
            .faces
            .name_at(self.current_face)
            .ok_or(SessionError::NoFaces)?
            .to_string();
        // only advance the cycle once the request is actually accepted
        self.start_animation(name, now)?;
        self.current_face = (self.current_face + 1) % self.faces.len();
        Ok(())
    }

    pub fn show_face(&mut self, name: &str, now: Instant) -> Result<(), SessionError> {
        self.start_animation(name.to_string(), now)
    }

    fn start_animation(&mut self, target: String, now: Instant) -> Result<(), SessionError> {
        if self.is_animating() {
            return Err(SessionError::AnimationInFlight);
        }
        if self.faces.lookup(&target).is_none() {
            return Err(SessionError::UnknownFace(target));
        }

        self.rotation_due = None;
        self.warning = None;
        self.phase = Phase::Animating {
            frames_done: 0,
            next_frame_at: now,
            target,
        };
        Ok(())
    }

    /// Manual cell toggle. Ignored mid-animation so noise frames stay
    /// atomic; otherwise disarms rotation and refreshes the export
    /// snapshot. Returns whether the board changed.
    pub fn toggle_cell(&mut self, row: usize, col: usize) -> bool {
        if self.is_animating() {
            return false;
        }
        if row >= self.grid.height() || col >= self.grid.width() {
            return false;
        }

        self.rotation_due = None;
        self.grid.toggle(row, col);
        self.last_export = Some(export_pattern(&self.grid));
        true
    }

    /// The next instant `tick` has work to do, for the event-poll timeout.
    pub fn next_deadline(&self) -> Option<Instant> {
        match &self.phase {
            Phase::Animating { next_frame_at, .. } => Some(*next_frame_at),
            Phase::Idle => self.rotation_due,
        }
    }

    /// Drives due timers: noise frames while animating, otherwise the
    /// rotation deadline. Returns whether the board changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = false;

        while let Phase::Animating {
            frames_done,
            next_frame_at,
            target,
        } = &self.phase
        {
            if now < *next_frame_at {
                break;
            }
            let frames_done = *frames_done;
            let due = *next_frame_at;
            let target = target.clone();

            if frames_done < self.profile.frames {
                self.apply_noise_frame();
                self.phase = Phase::Animating {
                    frames_done: frames_done + 1,
                    next_frame_at: due + self.profile.frame_delay,
                    target,
                };
            } else {
                self.settle(&target, now);
            }
            changed = true;
        }

        if matches!(self.phase, Phase::Idle) {
            if let Some(due) = self.rotation_due {
                if now >= due {
                    self.rotation_due = None;
                    if let Err(e) = self.show_random_face(now) {
                        self.warning = Some(e.to_string());
                    }
                    changed = true;
                }
            }
        }

        changed
    }

    fn apply_noise_frame(&mut self) {
        for row in 0..self.grid.height() {
            for col in 0..self.grid.width() {
                let on = self.rand_chance.sample(&mut self.rng) < self.profile.noise_chance;
                self.grid.set_active(row, col, on);
            }
        }
    }

    fn settle(&mut self, target: &str, now: Instant) {
        let outcome = match self.faces.lookup(target) {
            Some(face) => place(&mut self.grid, face),
            None => {
                // library cannot shrink mid-run, but stay defensive here
                self.grid.clear();
                self.phase = Phase::Idle;
                self.warning = Some(SessionError::UnknownFace(target.to_string()).to_string());
                return;
            }
        };

        match outcome {
            Ok(warnings) => {
                if let Some(w) = warnings.first() {
                    self.warning = Some(match warnings.len() {
                        1 => format!("face {}: {}", target, w),
                        n => format!("face {}: {} (and {} more)", target, w, n - 1),
                    });
                }
                self.shown_face = Some(target.to_string());
            }
            Err(e) => {
                self.warning = Some(format!("face {}: {}", target, e));
            }
        }

        self.phase = Phase::Idle;
        self.rotation_due = self.profile.rotate_every.map(|d| now + d);
    }
}
