pub mod content;
pub mod domain;
pub mod geo;
pub mod matcher;
pub mod namaz;
pub mod ports;
pub mod prayer;

pub use content::ContentTables;
pub use domain::{
    DailyTimings, DuaEntry, DuaSource, LocationRecord, NamazStep, PrayerTimingSet,
    Recommendation, StoredDua, SurahExcerpt,
};
pub use matcher::{best_match, KeywordMatch};
pub use ports::{
    CompletionReply, DuaCompletionService, PortError, PortResult, PrayerTimingsProvider,
    StorageService,
};
pub use prayer::{next_prayer, NextPrayer};
