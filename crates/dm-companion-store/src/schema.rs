//! Store database schema.
//!
//! `seq` columns record insertion order: the catalog is listed in creation
//! order and rosters in join order.

/// SQL to create the characters table.
pub const CREATE_CHARACTERS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS characters (
    seq         INTEGER PRIMARY KEY AUTOINCREMENT,
    id          TEXT NOT NULL UNIQUE,
    name        TEXT NOT NULL,
    class       TEXT NOT NULL,
    race        TEXT NOT NULL,
    background  TEXT,
    level       INTEGER NOT NULL,
    experience  INTEGER NOT NULL,
    hit_points  INTEGER NOT NULL,
    armor_class INTEGER NOT NULL,
    notes       TEXT NOT NULL,
    created_at  TEXT NOT NULL
);
";

/// SQL to create the encounters table.
pub const CREATE_ENCOUNTERS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS encounters (
    seq        INTEGER PRIMARY KEY AUTOINCREMENT,
    id         TEXT NOT NULL UNIQUE,
    title      TEXT NOT NULL,
    created_at TEXT NOT NULL
);
";

/// SQL to create the encounter participants table.
///
/// `character_id` carries no foreign key. Roster validation reports ids that
/// no longer resolve.
pub const CREATE_ENCOUNTER_CHARACTERS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS encounter_characters (
    seq                INTEGER PRIMARY KEY AUTOINCREMENT,
    id                 TEXT NOT NULL UNIQUE,
    encounter_id       TEXT NOT NULL REFERENCES encounters (id),
    character_id       TEXT NOT NULL,
    initiative         INTEGER,
    current_hit_points INTEGER NOT NULL,
    hit_points         INTEGER NOT NULL,
    UNIQUE (encounter_id, character_id)
);
";

/// All schema statements, in creation order.
pub const SCHEMA: [&str; 3] = [
    CREATE_CHARACTERS_TABLE,
    CREATE_ENCOUNTERS_TABLE,
    CREATE_ENCOUNTER_CHARACTERS_TABLE,
];
