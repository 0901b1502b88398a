use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Ear {
    Right,
    Left,
}

impl Ear {
    pub const BOTH: [Ear; 2] = [Ear::Right, Ear::Left];

    /// Chart/report abbreviation ("RE" / "LE").
    pub fn short_label(self) -> &'static str {
        match self {
            Ear::Right => "RE",
            Ear::Left => "LE",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Ear::Right => "Right",
            Ear::Left => "Left",
        }
    }
}

/// A value held once per ear.
///
/// Stored sessions use both `right`/`left` and `re`/`le` keys; either is
/// accepted on input, `right`/`left` is written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct PerEar<T> {
    #[serde(alias = "re")]
    pub right: T,
    #[serde(alias = "le")]
    pub left: T,
}

impl<T> PerEar<T> {
    pub fn new(right: T, left: T) -> Self {
        Self { right, left }
    }

    pub fn get(&self, ear: Ear) -> &T {
        match ear {
            Ear::Right => &self.right,
            Ear::Left => &self.left,
        }
    }

    pub fn get_mut(&mut self, ear: Ear) -> &mut T {
        match ear {
            Ear::Right => &mut self.right,
            Ear::Left => &mut self.left,
        }
    }

    pub fn map<U>(self, mut f: impl FnMut(Ear, T) -> U) -> PerEar<U> {
        PerEar {
            right: f(Ear::Right, self.right),
            left: f(Ear::Left, self.left),
        }
    }

    pub fn as_ref(&self) -> PerEar<&T> {
        PerEar {
            right: &self.right,
            left: &self.left,
        }
    }
}

impl<T: Clone> PerEar<T> {
    pub fn both(value: T) -> Self {
        Self {
            right: value.clone(),
            left: value,
        }
    }
}
