//! Player intents, decoded from whatever input device the host uses.

/// A decoded player command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    MoveLeft,
    MoveRight,
    RotateCw,
    RotateCcw,
    Flip,
    SoftDrop,
    /// Set the piece in place as an obstacle.
    HardCommit,
}

impl Intent {
    /// Application order within one tick. Committing intents come last.
    pub const ALL: [Self; 7] = [
        Self::MoveLeft,
        Self::MoveRight,
        Self::RotateCw,
        Self::RotateCcw,
        Self::Flip,
        Self::SoftDrop,
        Self::HardCommit,
    ];

    #[inline]
    fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// Intents gathered during one tick. Each kind is held at most once, however many
/// raw input events produced it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntentSet(u8);

impl IntentSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an intent. Returns false if it was already present.
    pub fn insert(&mut self, intent: Intent) -> bool {
        let fresh = !self.contains(intent);
        self.0 |= intent.bit();
        fresh
    }

    pub fn contains(&self, intent: Intent) -> bool {
        self.0 & intent.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }

    /// Empty the set, returning what it held.
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }

    /// Held intents in application order.
    pub fn iter(&self) -> impl Iterator<Item = Intent> + use<> {
        let set = *self;
        Intent::ALL.into_iter().filter(move |&i| set.contains(i))
    }
}

impl FromIterator<Intent> for IntentSet {
    fn from_iter<I: IntoIterator<Item = Intent>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl Extend<Intent> for IntentSet {
    fn extend<I: IntoIterator<Item = Intent>>(&mut self, iter: I) {
        for intent in iter {
            self.insert(intent);
        }
    }
}
