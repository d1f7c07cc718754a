use crate::error::{KeyForgeError, KfResult};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

pub const KEY_COUNT: usize = 30;
pub const ROW_LEN: usize = 10;
/// First column served by the right hand.
pub const HAND_SPLIT: usize = 5;
/// Slots nearest the hand split in each row.
pub const INNER_SLOTS: [usize; 6] = [4, 5, 14, 15, 24, 25];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Hand {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotInfo {
    pub hand: Hand,
    pub row: u8, // 0=Top, 1=Home, 2=Bottom
    pub col: u8, // 0..9, left to right
}

impl SlotInfo {
    pub fn of(slot: usize) -> Self {
        let col = slot % ROW_LEN;
        SlotInfo {
            hand: if col < HAND_SPLIT {
                Hand::Left
            } else {
                Hand::Right
            },
            row: (slot / ROW_LEN) as u8,
            col: col as u8,
        }
    }

    pub fn is_inner(&self) -> bool {
        self.col as usize == HAND_SPLIT - 1 || self.col as usize == HAND_SPLIT
    }
}

/// A validated assignment of 30 distinct, lowercased characters to slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Layout {
    keys: [char; KEY_COUNT],
}

impl Layout {
    pub fn parse(s: &str) -> KfResult<Self> {
        let invalid = |reason: String| KeyForgeError::InvalidLayout {
            layout: s.to_string(),
            reason,
        };

        let chars: Vec<char> = s.chars().flat_map(char::to_lowercase).collect();
        if chars.len() != KEY_COUNT {
            return Err(invalid(format!(
                "expected {} keys, found {}",
                KEY_COUNT,
                chars.len()
            )));
        }

        let mut seen = BTreeSet::new();
        for &c in &chars {
            if !seen.insert(c) {
                return Err(invalid(format!("key {:?} appears more than once", c)));
            }
        }

        let mut keys = [' '; KEY_COUNT];
        keys.copy_from_slice(&chars);
        Ok(Layout { keys })
    }

    pub fn keys(&self) -> &[char; KEY_COUNT] {
        &self.keys
    }

    pub fn key_at(&self, slot: usize) -> char {
        self.keys[slot]
    }

    pub fn slot_of(&self, key: char) -> Option<usize> {
        self.keys.iter().position(|&k| k == key)
    }

    /// Returns a new layout with the keys at `a` and `b` exchanged.
    pub fn swap(&self, a: usize, b: usize) -> Layout {
        let mut keys = self.keys;
        keys.swap(a, b);
        Layout { keys }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[char]> {
        self.keys.chunks(ROW_LEN)
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.keys {
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

impl FromStr for Layout {
    type Err = KeyForgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Layout::parse(s)
    }
}

impl TryFrom<String> for Layout {
    type Error = KeyForgeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Layout::parse(&s)
    }
}

impl From<Layout> for String {
    fn from(layout: Layout) -> String {
        layout.to_string()
    }
}

/// Ergonomic cost of reaching each slot, independent of what sits there.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffortGrid([f64; KEY_COUNT]);

impl EffortGrid {
    pub fn new(weights: [f64; KEY_COUNT]) -> KfResult<Self> {
        if let Some((slot, w)) = weights
            .iter()
            .enumerate()
            .find(|(_, w)| !w.is_finite() || **w < 0.0)
        {
            return Err(KeyForgeError::Config(format!(
                "effort weight for slot {} must be finite and non-negative, got {}",
                slot, w
            )));
        }
        Ok(EffortGrid(weights))
    }

    /// Parses a comma-separated list of exactly 30 weights.
    pub fn parse(s: &str) -> KfResult<Self> {
        let parts: Vec<&str> = s
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();
        if parts.len() != KEY_COUNT {
            return Err(KeyForgeError::Config(format!(
                "--effort-grid requires {} values, got {}",
                KEY_COUNT,
                parts.len()
            )));
        }

        let mut weights = [0.0; KEY_COUNT];
        for (i, p) in parts.iter().enumerate() {
            weights[i] = p.parse().map_err(|_| {
                KeyForgeError::Config(format!("Invalid number '{}' in effort grid", p))
            })?;
        }
        EffortGrid::new(weights)
    }

    pub fn weight(&self, slot: usize) -> f64 {
        self.0[slot]
    }

    pub fn weights(&self) -> &[f64; KEY_COUNT] {
        &self.0
    }
}

impl Default for EffortGrid {
    fn default() -> Self {
        EffortGrid([
            3.0, 2.4, 2.0, 2.2, 3.2, 3.2, 2.2, 2.0, 2.4, 3.0, // Top
            1.6, 1.3, 1.1, 1.0, 2.9, 2.9, 1.0, 1.1, 1.3, 1.6, // Home
            3.2, 2.6, 2.3, 1.6, 3.0, 3.0, 1.6, 2.3, 2.6, 3.2, // Bottom
        ])
    }
}

/// Hand, row and column structure of one layout.
///
/// A pure function of the layout and effort grid; recomputed rather than
/// mutated when the layout changes.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    pub all_keys: BTreeSet<char>,
    pub top_row: BTreeSet<char>,
    pub bottom_row: BTreeSet<char>,
    pub left_hand: BTreeSet<char>,
    pub right_hand: BTreeSet<char>,
    pub inner_columns: BTreeSet<char>,
    /// Keys sharing a column, and therefore assumed to share a finger.
    pub columns: [BTreeSet<char>; ROW_LEN],
    pub effort: BTreeMap<char, f64>,
    slots: BTreeMap<char, usize>,
}

impl Geometry {
    pub fn derive(layout: &Layout, grid: &EffortGrid) -> Self {
        let mut geom = Geometry {
            all_keys: BTreeSet::new(),
            top_row: BTreeSet::new(),
            bottom_row: BTreeSet::new(),
            left_hand: BTreeSet::new(),
            right_hand: BTreeSet::new(),
            inner_columns: BTreeSet::new(),
            columns: Default::default(),
            effort: BTreeMap::new(),
            slots: BTreeMap::new(),
        };

        for (slot, &key) in layout.keys().iter().enumerate() {
            let info = SlotInfo::of(slot);

            geom.all_keys.insert(key);
            geom.slots.insert(key, slot);
            geom.effort.insert(key, grid.weight(slot));
            geom.columns[info.col as usize].insert(key);

            match info.row {
                0 => {
                    geom.top_row.insert(key);
                }
                2 => {
                    geom.bottom_row.insert(key);
                }
                _ => {}
            }
            match info.hand {
                Hand::Left => geom.left_hand.insert(key),
                Hand::Right => geom.right_hand.insert(key),
            };
            if info.is_inner() {
                geom.inner_columns.insert(key);
            }
        }

        geom
    }

    /// Validates `layout` before deriving; no partial geometry is ever returned.
    pub fn derive_str(layout: &str, grid: &EffortGrid) -> KfResult<Self> {
        let layout = Layout::parse(layout)?;
        Ok(Geometry::derive(&layout, grid))
    }

    pub fn contains(&self, key: char) -> bool {
        self.all_keys.contains(&key)
    }

    pub fn slot_of(&self, key: char) -> Option<usize> {
        self.slots.get(&key).copied()
    }

    pub fn hand_of(&self, key: char) -> Option<Hand> {
        self.slot_of(key).map(|s| SlotInfo::of(s).hand)
    }

    pub fn column_of(&self, key: char) -> Option<usize> {
        self.slot_of(key).map(|s| s % ROW_LEN)
    }

    pub fn effort_of(&self, key: char) -> Option<f64> {
        self.effort.get(&key).copied()
    }

    pub fn same_hand(&self, a: char, b: char) -> bool {
        (self.left_hand.contains(&a) && self.left_hand.contains(&b))
            || (self.right_hand.contains(&a) && self.right_hand.contains(&b))
    }

    pub fn same_column(&self, a: char, b: char) -> bool {
        self.columns
            .iter()
            .any(|column| column.contains(&a) && column.contains(&b))
    }
}
