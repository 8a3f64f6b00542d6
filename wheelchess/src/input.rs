//! Edge-triggered button input.
//!
//! The debounce interrupt owns the producer side of [`PressFlags`] and sets a
//! bit per detected press. The main loop takes the bits once per tick. Taking
//! is a single atomic read-and-clear, so a press landing mid-tick is never
//! lost or seen twice.

use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;

/// The four compass switches and the centre confirm switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    East,
    West,
    South,
    North,
    Center,
}

impl Button {
    /// Processing order within one tick: cursor moves first, confirm last.
    pub const ALL: [Button; 5] = [
        Button::East,
        Button::West,
        Button::South,
        Button::North,
        Button::Center,
    ];

    const fn bit(self) -> u8 {
        match self {
            Self::East => 1 << 0,
            Self::West => 1 << 1,
            Self::South => 1 << 2,
            Self::North => 1 << 3,
            Self::Center => 1 << 4,
        }
    }

    /// Cursor step as (file, rank) delta. North is toward rank 0.
    pub fn cursor_step(self) -> Option<(i8, i8)> {
        match self {
            Self::East => Some((1, 0)),
            Self::West => Some((-1, 0)),
            Self::South => Some((0, 1)),
            Self::North => Some((0, -1)),
            Self::Center => None,
        }
    }
}

/// Set of buttons pressed during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Presses(u8);

impl Presses {
    pub const NONE: Presses = Presses(0);
    const MASK: u8 = 0b1_1111;

    pub fn single(button: Button) -> Self {
        Self(button.bit())
    }

    pub fn with(self, button: Button) -> Self {
        Self(self.0 | button.bit())
    }

    pub fn contains(self, button: Button) -> bool {
        self.0 & button.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Pressed buttons in processing order.
    pub fn iter(self) -> impl Iterator<Item = Button> {
        Button::ALL.into_iter().filter(move |b| self.contains(*b))
    }

    fn from_bits(bits: u8) -> Self {
        Self(bits & Self::MASK)
    }
}

impl From<Button> for Presses {
    fn from(button: Button) -> Self {
        Self::single(button)
    }
}

impl FromIterator<Button> for Presses {
    fn from_iter<I: IntoIterator<Item = Button>>(iter: I) -> Self {
        iter.into_iter().fold(Self::NONE, Self::with)
    }
}

impl std::ops::BitOr for Presses {
    type Output = Presses;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

/// Single-producer / single-consumer press flags shared with the interrupt.
#[derive(Debug, Default)]
pub struct PressFlags {
    bits: AtomicU8,
    closed: AtomicBool,
}

impl PressFlags {
    pub const fn new() -> Self {
        Self {
            bits: AtomicU8::new(0),
            closed: AtomicBool::new(false),
        }
    }

    /// Record a press edge. Called from the interrupt side.
    pub fn press(&self, button: Button) {
        self.bits.fetch_or(button.bit(), Ordering::Release);
    }

    pub fn press_all(&self, presses: Presses) {
        self.bits.fetch_or(presses.0, Ordering::Release);
    }

    /// Read and clear the buttons in `mask`, leaving the rest pending.
    pub fn take(&self, mask: Presses) -> Presses {
        Presses::from_bits(self.bits.fetch_and(!mask.0, Ordering::AcqRel) & mask.0)
    }

    /// Read and clear every pending press.
    pub fn take_all(&self) -> Presses {
        Presses::from_bits(self.bits.swap(0, Ordering::AcqRel))
    }

    /// Pending presses without clearing them.
    pub fn peek(&self) -> Presses {
        Presses::from_bits(self.bits.load(Ordering::Acquire))
    }

    /// Producer side signals that no further presses will arrive.
    pub fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}

/// Source of press events, polled once per logic tick.
pub trait InputSource {
    /// Presses since the previous poll. Each press is reported once.
    fn poll(&mut self) -> Presses;

    /// True once the source can never report another press.
    fn is_exhausted(&self) -> bool {
        false
    }
}

impl InputSource for Arc<PressFlags> {
    fn poll(&mut self) -> Presses {
        self.take_all()
    }

    fn is_exhausted(&self) -> bool {
        self.is_closed() && self.peek().is_empty()
    }
}

/// Pre-recorded presses, one entry per tick.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    ticks: std::collections::VecDeque<Presses>,
}

impl ScriptedInput {
    pub fn new(ticks: impl IntoIterator<Item = Presses>) -> Self {
        Self {
            ticks: ticks.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.ticks.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> Presses {
        self.ticks.pop_front().unwrap_or_default()
    }

    fn is_exhausted(&self) -> bool {
        self.ticks.is_empty()
    }
}
