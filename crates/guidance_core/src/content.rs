//! crates/guidance_core/src/content.rs
//!
//! The curated, read-only content tables: the predefined dua list, the five
//! fixed Quranic excerpts, and the generic fallback entry. Loaded once at
//! startup into the service context; there are no ambient statics.

use crate::domain::{DuaEntry, DuaSource, SurahExcerpt};

/// All read-only content the recommendation pipeline needs.
#[derive(Debug, Clone)]
pub struct ContentTables {
    pub duas: Vec<DuaEntry>,
    pub excerpts: Vec<SurahExcerpt>,
    pub generic_fallback: DuaEntry,
}

impl ContentTables {
    pub fn load() -> Self {
        Self {
            duas: predefined_duas(),
            excerpts: surah_excerpts(),
            generic_fallback: generic_fallback(),
        }
    }
}

fn dua(
    title: &str,
    category: &str,
    arabic: &str,
    transliteration: &str,
    translation: &str,
    meaning: &str,
    keywords: &[&str],
) -> DuaEntry {
    DuaEntry {
        title: title.to_string(),
        category: category.to_string(),
        arabic: arabic.to_string(),
        transliteration: transliteration.to_string(),
        translation: translation.to_string(),
        meaning: meaning.to_string(),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        source: DuaSource::Predefined,
    }
}

fn excerpt(
    name: &str,
    number: u32,
    arabic: &str,
    transliteration: &str,
    translation: &str,
    meaning: &str,
    keywords: &[&str],
) -> SurahExcerpt {
    SurahExcerpt {
        name: name.to_string(),
        number,
        arabic: arabic.to_string(),
        transliteration: transliteration.to_string(),
        translation: translation.to_string(),
        meaning: meaning.to_string(),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
    }
}

/// The fixed default entry returned when every pipeline stage misses.
pub fn generic_fallback() -> DuaEntry {
    dua(
        "Healing and Health",
        "Health",
        "اللَّهُمَّ رَبَّ النَّاسِ أَذْهِبِ الْبَاسَ، اشْفِ أَنْتَ الشَّافِي",
        "Allahumma rabban-naasi, adhhibi al-ba's, ishfi anta ash-Shaafi",
        "O Allah, Lord of mankind, remove the harm and heal, You are the Healer.",
        "A dua for healing and recovery.",
        &["sick", "ill", "health", "pain", "heal"],
    )
}

/// The curated dua table, tagged with trigger keywords for the local
/// fallback matcher.
pub fn predefined_duas() -> Vec<DuaEntry> {
    vec![
        dua(
            "Relief from Hardship",
            "Patience",
            "رَبِّ اشْرَحْ لِي صَدْرِي وَيَسِّرْ لِي أَمْرِي",
            "Rabbi ishrah li sadri wa yassir li amri",
            "My Lord, expand for me my breast and ease for me my task.",
            "A dua for ease during difficulties and tasks.",
            &["stress", "hard", "exam", "work", "task", "anxiety"],
        ),
        dua(
            "Seeking Forgiveness",
            "Forgiveness",
            "أَسْتَغْفِرُ اللّٰهَ رَبِّي مِنْ كُلِّ ذَنْبٍ",
            "Astaghfirullaha Rabbi min kulli dhanbin",
            "I seek forgiveness from Allah, my Lord, for every sin.",
            "A concise dua for forgiveness and repentance.",
            &["sin", "mistake", "guilt", "forgive"],
        ),
        dua(
            "Healing and Health",
            "Health",
            "اللَّهُمَّ رَبَّ النَّاسِ أَذْهِبِ الْبَاسَ، اشْفِ أَنْتَ الشَّافِي",
            "Allahumma rabban-naasi, adhhibi al-ba's, ishfi anta ash-Shaafi",
            "O Allah, Lord of mankind, remove the harm and heal, You are the Healer.",
            "A dua for healing and recovery.",
            &["sick", "ill", "health", "pain", "heal"],
        ),
        dua(
            "For Pain or Headache",
            "Health",
            "أَعُوذُ بِعِزَّةِ اللَّهِ وَقُدْرَتِهِ مِنْ شَرِّ مَا أَجِدُ وَأُحَاذِرُ",
            "A'udhu bi'izzatillahi wa qudratihi min sharri ma ajidu wa uhadhir",
            "I seek refuge in the might and power of Allah from the evil of what I feel and fear.",
            "Prophetic dua for pain (e.g., headache); recite and place the hand on the pain.",
            &["headache", "head", "migraine", "pain", "hurts", "ache"],
        ),
        dua(
            "Gratitude",
            "Gratitude",
            "الْحَمْدُ لِلَّهِ رَبِّ الْعَالَمِينَ",
            "Alhamdu lillahi rabbil 'alamin",
            "All praise is due to Allah, Lord of the worlds.",
            "A reminder to express gratitude.",
            &["thanks", "grateful", "gratitude"],
        ),
        dua(
            "Before Eating or Drinking",
            "Daily Life",
            "بِسْمِ اللَّهِ",
            "Bismillah",
            "In the name of Allah.",
            "Sunnah to begin meals and drinks with Bismillah.",
            &["eat", "eating", "drink", "drinking", "water", "meal", "food"],
        ),
        dua(
            "After Eating or Drinking",
            "Daily Life",
            "الْحَمْدُ لِلَّهِ الَّذِي أَطْعَمَنَا وَسَقَانَا وَجَعَلَنَا مُسْلِمِينَ",
            "Alhamdu lillahil-ladhi at'amana wa saqana wa ja'alana muslimin",
            "All praise is for Allah who fed us, gave us drink, and made us Muslims.",
            "Gratitude after food and drink.",
            &["after eating", "after meal", "after drinking", "food", "meal", "water"],
        ),
        dua(
            "Before Sleeping",
            "Daily Life",
            "اللَّهُمَّ بِاسْمِكَ أَمُوتُ وَأَحْيَا",
            "Allahumma bismika amutu wa ahya",
            "O Allah, in Your name I die and I live.",
            "Authentic sunnah dhikr before sleep.",
            &["sleep", "sleeping", "bed", "night"],
        ),
        dua(
            "Waking Up",
            "Daily Life",
            "الْحَمْدُ لِلَّهِ الَّذِي أَحْيَانَا بَعْدَمَا أَمَاتَنَا وَإِلَيْهِ النُّشُورُ",
            "Alhamdu lillahil-ladhi ahyana ba'da ma amatana wa ilayhin-nushur",
            "All praise is for Allah who gave us life after causing us to die, and to Him is the resurrection.",
            "Dhikr upon waking up.",
            &["wake", "waking", "morning", "get up"],
        ),
        dua(
            "Entering the Home",
            "Daily Life",
            "بِسْمِ اللَّهِ وَلَجْنَا وَبِسْمِ اللَّهِ خَرَجْنَا وَعَلَى اللَّهِ رَبِّنَا تَوَكَّلْنَا",
            "Bismillahi walajna wa bismillahi kharajna wa 'alallahi rabbina tawakkalna",
            "In the name of Allah we enter, and in the name of Allah we leave, and upon our Lord we place our trust.",
            "Dua when entering/leaving home for protection and blessing.",
            &["home", "house", "enter home", "leaving home"],
        ),
        dua(
            "Entering the Mosque",
            "Daily Life",
            "اللَّهُمَّ افْتَحْ لِي أَبْوَابَ رَحْمَتِكَ",
            "Allahumma iftah li abwaba rahmatik",
            "O Allah, open for me the doors of Your mercy.",
            "Dua when entering the masjid.",
            &["mosque", "masjid", "enter mosque", "enter masjid"],
        ),
        dua(
            "Leaving the Mosque",
            "Daily Life",
            "اللَّهُمَّ إِنِّي أَسْأَلُكَ مِنْ فَضْلِكَ",
            "Allahumma inni as'aluka min fadlik",
            "O Allah, I ask You from Your bounty.",
            "Dua when leaving the masjid.",
            &["leave mosque", "leaving mosque", "leave masjid", "leaving masjid"],
        ),
        dua(
            "Entering the Bathroom",
            "Daily Life",
            "اللَّهُمَّ إِنِّي أَعُوذُ بِكَ مِنَ الْخُبُثِ وَالْخَبَائِثِ",
            "Allahumma inni a'udhu bika minal-khubthi wal-khaba'ith",
            "O Allah, I seek refuge with You from male and female devils.",
            "Protection dua before entering restroom.",
            &["bathroom", "restroom", "toilet", "washroom"],
        ),
        dua(
            "Leaving the Bathroom",
            "Daily Life",
            "غُفْرَانَكَ",
            "Ghufranak",
            "I seek Your forgiveness.",
            "Dua after leaving restroom.",
            &["bathroom", "restroom", "toilet", "washroom", "leaving"],
        ),
        dua(
            "Before Travel",
            "Travel",
            "سُبْحَانَ الَّذِي سَخَّرَ لَنَا هَٰذَا وَمَا كُنَّا لَهُ مُقْرِنِينَ وَإِنَّا إِلَىٰ رَبِّنَا لَمُنقَلِبُونَ",
            "Subhanalladhi sakhkhara lana hadha wa ma kunna lahu muqrinin wa inna ila rabbina lamunqalibun",
            "Glory to Him Who has subjected this to us, and we could never have it by our efforts. Surely, to our Lord we will return.",
            "Dua for riding/travel safety and gratitude.",
            &["travel", "journey", "ride", "car", "bus", "plane", "train"],
        ),
        dua(
            "For Knowledge",
            "Knowledge",
            "رَّبِّ زِدْنِي عِلْمًا",
            "Rabbi zidni ilma",
            "My Lord, increase me in knowledge.",
            "Dua for learning and understanding.",
            &["study", "exam", "learn", "knowledge", "school", "university"],
        ),
        dua(
            "For Parents",
            "Family",
            "رَّبِّ ارْحَمْهُمَا كَمَا رَبَّيَانِي صَغِيرًا",
            "Rabbi rhamhuma kama rabbayani saghira",
            "My Lord, have mercy upon them as they brought me up when I was small.",
            "Dua for showing gratitude and mercy to parents.",
            &["parents", "mother", "father", "mom", "dad"],
        ),
    ]
}

/// The five fixed excerpts, checked as exact lookups before any dua
/// matching.
pub fn surah_excerpts() -> Vec<SurahExcerpt> {
    vec![
        excerpt(
            "Al-Fatiha",
            1,
            "بِسْمِ اللَّهِ الرَّحْمَٰنِ الرَّحِيمِ ۝ الْحَمْدُ لِلَّهِ رَبِّ الْعَالَمِينَ ۝ الرَّحْمَٰنِ الرَّحِيمِ ۝ مَالِكِ يَوْمِ الدِّينِ ۝ إِيَّاكَ نَعْبُدُ وَإِيَّاكَ نَسْتَعِينُ ۝ اهْدِنَا الصِّرَاطَ الْمُسْتَقِيمَ ۝ صِرَاطَ الَّذِينَ أَنْعَمْتَ عَلَيْهِمْ غَيْرِ الْمَغْضُوبِ عَلَيْهِمْ وَلَا الضَّالِّينَ",
            "Bismillāhir-Raḥmānir-Raḥīm. Al-ḥamdu lillāhi rabbil-ʿālamīn. Ar-Raḥmānir-Raḥīm. Māliki yawmid-dīn. Iyyāka naʿbudu wa iyyāka nastaʿīn. Ihdina ṣ-ṣirāṭ al-mustaqīm. Ṣirāṭ al-laḏīna anʿamta ʿalayhim ġayri l-maġḍūbi ʿalayhim walā ḍ-ḍāllīn.",
            "In the name of Allah, the Most Merciful, the Most Compassionate... and not of those who have gone astray.",
            "Opening chapter recited in every rak'ah; comprehensive praise and supplication.",
            &["fatiha", "al fatiha", "fatihah", "surah 1", "surah al fatiha"],
        ),
        excerpt(
            "Al-Baqarah Ayah 255 (Ayat al-Kursi)",
            255,
            "اللَّهُ لَا إِلَٰهَ إِلَّا هُوَ الْحَيُّ الْقَيُّومُ ۚ لَا تَأْخُذُهُ سِنَةٌ وَلَا نَوْمٌ ۚ لَهُ مَا فِي السَّمَاوَاتِ وَمَا فِي الْأَرْضِ ۗ مَنْ ذَا الَّذِي يَشْفَعُ عِنْدَهُ إِلَّا بِإِذْنِهِ ۚ يَعْلَمُ مَا بَيْنَ أَيْدِيهِمْ وَمَا خَلْفَهُمْ ۖ وَلَا يُحِيطُونَ بِشَيْءٍ مِنْ عِلْمِهِ إِلَّا بِمَا شَاءَ ۚ وَسِعَ كُرْسِيُّهُ السَّمَاوَاتِ وَالْأَرْضَ ۖ وَلَا يَئُودُهُ حِفْظُهُمَا ۚ وَهُوَ الْعَلِيُّ الْعَظِيمُ",
            "Allāhu lā ilāha illā huwa al-ḥayyu al-qayyūm, lā ta'khuḏuhu sinatun walā nawm, lahu mā fī s-samāwāti wa mā fī l-arḍ, man ḏā lladhī yashfaʿu ʿindahu illā bi-idhnih, yaʿlamu mā bayna aydīhim wa mā khalfahum, walā yuḥīṭūna bi-shay'in min ʿilmihī illā bimā shā', wasiʿa kursiyyuhū s-samāwāti wal-arḍ, walā ya'ūduhu ḥifẓuhumā, wa huwa l-ʿaliyyu l-ʿaẓīm.",
            "Allah! There is no deity except Him, the Ever-Living, the Sustainer... And He is the Most High, the Most Great.",
            "Powerful verse for protection and remembrance of Allah's sovereignty.",
            &["ayat al kursi", "kursi", "baqarah 255", "surah 2:255", "2:255"],
        ),
        excerpt(
            "Al-Ikhlas",
            112,
            "قُلْ هُوَ اللَّهُ أَحَدٌ ۝ اللَّهُ الصَّمَدُ ۝ لَمْ يَلِدْ وَلَمْ يُولَدْ ۝ وَلَمْ يَكُن لَّهُ كُفُوًا أَحَدٌ",
            "Qul huwa Allāhu aḥad. Allāhu ṣ-ṣamad. Lam yalid wa lam yūlad. Wa lam yakun lahu kufuwan aḥad.",
            "Say, He is Allah, One. Allah, the Eternal Refuge. He neither begets nor is born, nor is there to Him any equivalent.",
            "Affirms pure monotheism; equal to one-third of the Qur'an in virtue.",
            &["ikhlas", "al ikhlas", "surah 112", "112"],
        ),
        excerpt(
            "Al-Falaq",
            113,
            "قُلْ أَعُوذُ بِرَبِّ الْفَلَقِ ۝ مِن شَرِّ مَا خَلَقَ ۝ وَمِن شَرِّ غَاسِقٍ إِذَا وَقَبَ ۝ وَمِن شَرِّ النَّفَّاثَاتِ فِي الْعُقَدِ ۝ وَمِن شَرِّ حَاسِدٍ إِذَا حَسَدَ",
            "Qul aʿūdhu birabbi l-falaq. Min sharri mā khalaq. Wa min sharri ghāsiqin iḏā waqab. Wa min sharri n-naffāthāti fi l-ʿuqad. Wa min sharri ḥāsidin iḏā ḥasad.",
            "Say, I seek refuge in the Lord of daybreak... and from the evil of an envier when he envies.",
            "Protection from external harms and envy.",
            &["falaq", "al falaq", "surah 113", "113"],
        ),
        excerpt(
            "An-Nas",
            114,
            "قُلْ أَعُوذُ بِرَبِّ النَّاسِ ۝ مَلِكِ النَّاسِ ۝ إِلَٰهِ النَّاسِ ۝ مِن شَرِّ الْوَسْوَاسِ الْخَنَّاسِ ۝ الَّذِي يُوَسْوِسُ فِي صُدُورِ النَّاسِ ۝ مِنَ الْجِنَّةِ وَالنَّاسِ",
            "Qul aʿūdhu birabbi n-nās. Maliki n-nās. Ilāhi n-nās. Min sharri l-waswāsi l-khannās. Alladhī yuwaswisu fī ṣudūri n-nās. Mina l-jinnati wa n-nās.",
            "Say, I seek refuge in the Lord of mankind... from the jinn and mankind.",
            "Protection from whispered evil and internal harms.",
            &["nas", "an nas", "surah 114", "114"],
        ),
    ]
}
