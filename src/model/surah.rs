//! Static surah index for the 604-page Madani layout.
//!
//! Read-only; never mutated at runtime.

/// One row of the surah index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Surah {
    /// 1-based surah number.
    pub number: u8,
    /// Transliterated name.
    pub name: &'static str,
    /// Arabic display glyphs.
    pub arabic: &'static str,
    /// Page on which the surah starts.
    pub start_page: u16,
}

impl Surah {
    /// Text matched by the picker filter: `"<number> <name>"`.
    pub fn search_key(&self) -> String {
        format!("{} {}", self.number, self.name).to_lowercase()
    }

    /// Case-insensitive substring match against the search key.
    pub fn matches(&self, query: &str) -> bool {
        self.search_key().contains(&query.trim().to_lowercase())
    }
}

const fn s(number: u8, name: &'static str, arabic: &'static str, start_page: u16) -> Surah {
    Surah {
        number,
        name,
        arabic,
        start_page,
    }
}

/// All 114 surahs in canonical order.
pub static SURAHS: [Surah; 114] = [
    s(1, "Al-Fatihah", "الفاتحة", 1),
    s(2, "Al-Baqarah", "البقرة", 2),
    s(3, "Ali 'Imran", "آل عمران", 50),
    s(4, "An-Nisa'", "النساء", 77),
    s(5, "Al-Ma'idah", "المائدة", 106),
    s(6, "Al-An'am", "الأنعام", 128),
    s(7, "Al-A'raf", "الأعراف", 151),
    s(8, "Al-Anfal", "الأنفال", 177),
    s(9, "At-Taubah", "التوبة", 187),
    s(10, "Yunus", "يونس", 208),
    s(11, "Hud", "هود", 221),
    s(12, "Yusuf", "يوسف", 235),
    s(13, "Ar-Ra'd", "الرعد", 249),
    s(14, "Ibrahim", "إبراهيم", 255),
    s(15, "Al-Hijr", "الحجر", 262),
    s(16, "An-Nahl", "النحل", 267),
    s(17, "Al-Isra'", "الإسراء", 282),
    s(18, "Al-Kahf", "الكهف", 293),
    s(19, "Maryam", "مريم", 305),
    s(20, "Taha", "طه", 312),
    s(21, "Al-Anbiya'", "الأنبياء", 322),
    s(22, "Al-Hajj", "الحج", 332),
    s(23, "Al-Mu'minun", "المؤمنون", 342),
    s(24, "An-Nur", "النور", 350),
    s(25, "Al-Furqan", "الفرقان", 359),
    s(26, "Asy-Syu'ara'", "الشعراء", 367),
    s(27, "An-Naml", "النمل", 377),
    s(28, "Al-Qasas", "القصص", 385),
    s(29, "Al-'Ankabut", "العنكبوت", 396),
    s(30, "Ar-Rum", "الروم", 404),
    s(31, "Luqman", "لقمان", 411),
    s(32, "As-Sajdah", "السجدة", 415),
    s(33, "Al-Ahzab", "الأحزاب", 418),
    s(34, "Saba'", "سبأ", 428),
    s(35, "Fatir", "فاطر", 434),
    s(36, "Yasin", "يس", 440),
    s(37, "As-Saffat", "الصافات", 446),
    s(38, "Sad", "ص", 453),
    s(39, "Az-Zumar", "الزمر", 458),
    s(40, "Gafir", "غافر", 467),
    s(41, "Fussilat", "فصلت", 477),
    s(42, "Asy-Syura", "الشورى", 483),
    s(43, "Az-Zukhruf", "الزخرف", 489),
    s(44, "Ad-Dukhan", "الدخان", 496),
    s(45, "Al-Jasiyah", "الجاثية", 499),
    s(46, "Al-Ahqaf", "الأحقاف", 502),
    s(47, "Muhammad", "محمد", 507),
    s(48, "Al-Fath", "الفتح", 511),
    s(49, "Al-Hujurat", "الحجرات", 515),
    s(50, "Qaf", "ق", 518),
    s(51, "Az-Zariyat", "الذاريات", 520),
    s(52, "At-Tur", "الطور", 523),
    s(53, "An-Najm", "النجم", 526),
    s(54, "Al-Qamar", "القمر", 528),
    s(55, "Ar-Rahman", "الرحمن", 531),
    s(56, "Al-Waqi'ah", "الواقعة", 534),
    s(57, "Al-Hadid", "الحديد", 537),
    s(58, "Al-Mujadilah", "المجادلة", 542),
    s(59, "Al-Hasyr", "الحشر", 545),
    s(60, "Al-Mumtahanah", "الممتحنة", 549),
    s(61, "As-Saff", "الصف", 551),
    s(62, "Al-Jumu'ah", "الجمعة", 553),
    s(63, "Al-Munafiqun", "المنافقون", 554),
    s(64, "At-Tagabun", "التغابن", 556),
    s(65, "At-Talaq", "الطلاق", 558),
    s(66, "At-Tahrim", "التحريم", 560),
    s(67, "Al-Mulk", "الملك", 562),
    s(68, "Al-Qalam", "القلم", 564),
    s(69, "Al-Haqqah", "الحاقة", 566),
    s(70, "Al-Ma'arij", "المعارج", 568),
    s(71, "Nuh", "نوح", 570),
    s(72, "Al-Jinn", "الجن", 572),
    s(73, "Al-Muzzammil", "المزمل", 574),
    s(74, "Al-Muddassir", "المدثر", 575),
    s(75, "Al-Qiyamah", "القيامة", 577),
    s(76, "Al-Insan", "الإنسان", 578),
    s(77, "Al-Mursalat", "المرسلات", 580),
    s(78, "An-Naba'", "النبأ", 582),
    s(79, "An-Nazi'at", "النازعات", 583),
    s(80, "'Abasa", "عبس", 585),
    s(81, "At-Takwir", "التكوير", 586),
    s(82, "Al-Infitar", "الانفطار", 587),
    s(83, "Al-Mutaffifin", "المطففين", 587),
    s(84, "Al-Insyiqaq", "الانشقاق", 589),
    s(85, "Al-Buruj", "البروج", 590),
    s(86, "At-Tariq", "الطارق", 591),
    s(87, "Al-A'la", "الأعلى", 591),
    s(88, "Al-Gasyiyah", "الغاشية", 592),
    s(89, "Al-Fajr", "الفجر", 593),
    s(90, "Al-Balad", "البلد", 594),
    s(91, "Asy-Syams", "الشمس", 595),
    s(92, "Al-Lail", "الليل", 595),
    s(93, "Ad-Duha", "الضحى", 596),
    s(94, "Asy-Syarh", "الشرح", 596),
    s(95, "At-Tin", "التين", 597),
    s(96, "Al-'Alaq", "العلق", 597),
    s(97, "Al-Qadr", "القدر", 598),
    s(98, "Al-Bayyinah", "البينة", 598),
    s(99, "Az-Zalzalah", "الزلزلة", 599),
    s(100, "Al-'Adiyat", "العاديات", 599),
    s(101, "Al-Qari'ah", "القارعة", 600),
    s(102, "At-Takasur", "التكاثر", 600),
    s(103, "Al-'Asr", "العصر", 601),
    s(104, "Al-Humazah", "الهمزة", 601),
    s(105, "Al-Fil", "الفيل", 601),
    s(106, "Quraisy", "قريش", 602),
    s(107, "Al-Ma'un", "الماعون", 602),
    s(108, "Al-Kausar", "الكوثر", 602),
    s(109, "Al-Kafirun", "الكافرون", 603),
    s(110, "An-Nasr", "النصر", 603),
    s(111, "Al-Lahab", "المسد", 603),
    s(112, "Al-Ikhlas", "الإخلاص", 604),
    s(113, "Al-Falaq", "الفلق", 604),
    s(114, "An-Nas", "الناس", 604),
];

/// Surahs whose names (or numbers) match `query`, in canonical order.
///
/// An empty query matches everything.
pub fn filter(query: &str) -> Vec<&'static Surah> {
    SURAHS.iter().filter(|surah| surah.matches(query)).collect()
}

/// The surah being read on `page`: the last surah starting on or before it.
pub fn surah_at_page(page: u16) -> &'static Surah {
    SURAHS
        .iter()
        .rev()
        .find(|surah| surah.start_page <= page)
        .unwrap_or(&SURAHS[0])
}

/// Surahs that begin on `page`.
pub fn surahs_starting_on(page: u16) -> impl Iterator<Item = &'static Surah> {
    SURAHS.iter().filter(move |surah| surah.start_page == page)
}
