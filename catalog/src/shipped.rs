//! Level table that ships with the game.

/// Generation parameters for one shipped level.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ShippedLevel {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) seed: u64,
    pub(crate) slack: f64,
    pub(crate) label: &'static str,
}

const fn level(width: u32, height: u32, seed: u64, slack: f64, label: &'static str) -> ShippedLevel {
    ShippedLevel {
        width,
        height,
        seed,
        slack,
        label,
    }
}

/// Thirty levels in six tiers of growing maze size and shrinking slack.
///
/// Labels and seeds match the web release, but mazes here are carved from a
/// ChaCha8 stream, so each label names a different layout than it does there.
pub(crate) const SHIPPED_LEVELS: [ShippedLevel; 30] = [
    // Small: 5x5 rooms.
    level(5, 5, 42, 0.60, "First Steps"),
    level(5, 5, 137, 0.50, "Easy Path"),
    level(5, 5, 256, 0.40, "Gentle Curves"),
    level(5, 5, 389, 0.35, "Warming Up"),
    level(5, 5, 512, 0.30, "Open Field"),
    // Medium: 6x6 rooms.
    level(6, 6, 623, 0.30, "The Garden"),
    level(6, 6, 741, 0.25, "Winding Way"),
    level(6, 6, 867, 0.20, "Fork Road"),
    level(6, 6, 933, 0.15, "Twisted Path"),
    level(6, 6, 1042, 0.12, "Narrow Escape"),
    // Large: 7x7 rooms.
    level(7, 7, 1111, 0.15, "The Labyrinth"),
    level(7, 7, 1234, 0.12, "Deep Tunnels"),
    level(7, 7, 1389, 0.10, "Dark Corridors"),
    level(7, 7, 1456, 0.08, "Lost Passage"),
    level(7, 7, 1567, 0.05, "Ancient Ruins"),
    // Expert: 8x8 rooms.
    level(8, 8, 1678, 0.10, "The Dungeon"),
    level(8, 8, 1789, 0.07, "Crystal Cave"),
    level(8, 8, 1890, 0.05, "Iron Maze"),
    level(8, 8, 1945, 0.03, "Shadow Keep"),
    level(8, 8, 2020, 0.01, "Precision"),
    // Master: 9x9 rooms.
    level(9, 9, 2111, 0.06, "Expert Trial"),
    level(9, 9, 2222, 0.04, "Mind Bender"),
    level(9, 9, 2345, 0.02, "Razor Edge"),
    level(9, 9, 2456, 0.01, "No Mercy"),
    level(9, 9, 2567, 0.00, "Perfect Path"),
    // Grandmaster: 10x10 rooms.
    level(10, 10, 2678, 0.03, "Master Class"),
    level(10, 10, 2789, 0.02, "Grand Maze"),
    level(10, 10, 2890, 0.01, "Final Frontier"),
    level(10, 10, 2945, 0.00, "Omega"),
    level(10, 10, 3000, 0.00, "Serpent Master"),
];
