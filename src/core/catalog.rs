//! Static keyword tables used by the estimator.
//!
//! Both tables are ordered lists of literal, lowercase phrases. Matching is
//! plain substring search, so overlapping keywords ("bed" and "king bed")
//! each contribute on their own.

/// Volume every move starts from, in cubic feet.
pub const BASE_CUBIC_FEET: u64 = 200;

/// Cubic feet per box when a box count is given.
pub const CUBIC_FEET_PER_BOX: u64 = 3;

/// A home size and the phrases that signal it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomSize {
    pub phrases: &'static [&'static str],
    pub cubic_feet: u64,
}

pub const ROOM_SIZES: &[RoomSize] = &[
    RoomSize {
        phrases: &["studio"],
        cubic_feet: 300,
    },
    RoomSize {
        phrases: &["1 bed", "one bed"],
        cubic_feet: 500,
    },
    RoomSize {
        phrases: &["2 bed", "two bed"],
        cubic_feet: 800,
    },
    RoomSize {
        phrases: &["3 bed", "three bed"],
        cubic_feet: 1200,
    },
    RoomSize {
        phrases: &["4 bed", "four bed"],
        cubic_feet: 1600,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FurnitureItem {
    pub keyword: &'static str,
    pub cubic_feet: u64,
}

const fn item(keyword: &'static str, cubic_feet: u64) -> FurnitureItem {
    FurnitureItem {
        keyword,
        cubic_feet,
    }
}

pub const FURNITURE: &[FurnitureItem] = &[
    item("sofa", 80),
    item("couch", 80),
    item("bed", 100),
    item("king bed", 120),
    item("queen bed", 100),
    item("mattress", 70),
    item("dresser", 50),
    item("desk", 40),
    item("dining table", 60),
    item("table", 40),
    item("chair", 10),
    item("bookshelf", 35),
    item("tv", 20),
    item("piano", 150),
    item("washer", 30),
    item("dryer", 30),
    item("refrigerator", 60),
    item("fridge", 60),
];

/// Volume from home-size phrases. Sizes are not exclusive: "studio" and
/// "2 bed" in the same text both add.
pub fn room_volume(normalized: &str) -> u64 {
    ROOM_SIZES
        .iter()
        .filter(|size| size.phrases.iter().any(|phrase| normalized.contains(phrase)))
        .map(|size| size.cubic_feet)
        .sum()
}

/// Volume from furniture keywords, counting every non-overlapping occurrence.
pub fn furniture_volume(normalized: &str) -> u64 {
    FURNITURE
        .iter()
        .map(|item| item.cubic_feet * normalized.matches(item.keyword).count() as u64)
        .sum()
}
