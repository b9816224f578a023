//! crates/guidance_core/src/namaz.rs
//!
//! The static step-by-step namaz guides, one list per daily prayer.

use crate::domain::NamazStep;

fn step(title: &str, text: &str) -> NamazStep {
    NamazStep {
        title: title.to_string(),
        text: text.to_string(),
    }
}

/// The guide for one prayer, looked up by its lowercase key
/// ("fajr", "dhuhr", "asr", "maghrib", "isha").
pub fn namaz_guide(prayer: &str) -> Option<Vec<NamazStep>> {
    let steps = match prayer {
        "fajr" => vec![
            step("Niyyah", "Make intention for 2 Rak'ah Fajr Salah."),
            step("Takbir", "Raise hands and say Allahu Akbar."),
            step("Al-Fatihah", "Recite Surah Al-Fatihah and a short surah."),
            step("Ruku", "Bow and say Subhana Rabbiyal Adheem 3 times."),
            step("Sujood", "Prostrate and say Subhana Rabbiyal A'la 3 times."),
            step("Tashahhud", "Sit and recite At-Tahiyyat."),
            step("Tasleem", "End with Salam to the right and left."),
        ],
        "dhuhr" => vec![
            step("Niyyah", "Intend 4 Rak'ah Dhuhr Salah."),
            step("First Two Rak'ah", "Recite Al-Fatihah + another surah."),
            step("Second Two Rak'ah", "Recite only Al-Fatihah."),
            step("Final Tashahhud", "Complete At-Tahiyyat, Durood & Dua."),
        ],
        "asr" => vec![
            step("Niyyah", "Intend 4 Rak'ah Asr Salah."),
            step("All Rak'ah", "Recite Al-Fatihah in each, no audible surah."),
            step("Final Tashahhud", "Complete At-Tahiyyat, Durood & Dua."),
        ],
        "maghrib" => vec![
            step("Niyyah", "Intend 3 Rak'ah Maghrib Salah."),
            step("First Two Rak'ah", "Al-Fatihah + another surah."),
            step("Third Rak'ah", "Recite only Al-Fatihah quietly."),
            step("Final Tashahhud", "Complete At-Tahiyyat, Durood & Dua."),
        ],
        "isha" => vec![
            step("Niyyah", "Intend 4 Rak'ah Isha Salah."),
            step("First Two Rak'ah", "Al-Fatihah + another surah (audible)."),
            step("Next Two Rak'ah", "Recite only Al-Fatihah quietly."),
            step("Final Tashahhud", "Complete At-Tahiyyat, Durood & Dua."),
        ],
        _ => return None,
    };
    Some(steps)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_prayer_has_a_guide() {
        for key in ["fajr", "dhuhr", "asr", "maghrib", "isha"] {
            let steps = namaz_guide(key).unwrap();
            assert!(!steps.is_empty(), "no steps for {key}");
        }
    }

    #[test]
    fn unknown_prayer_has_none() {
        assert!(namaz_guide("tahajjud").is_none());
        assert!(namaz_guide("").is_none());
    }
}
