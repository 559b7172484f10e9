//! Representative map centers for countries, states and cities.
//!
//! Used to position the map when a region page is opened before any
//! resource bounds are known. Lookups cascade: an unknown city falls back to
//! its state, an unknown state to its country.

use geo::Point;
use mediamap_types::resource::DetailMeta;
use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

/// Returned when no country is given at all.
const ORIGIN: (f64, f64) = (0.0, 0.0);

type Index<V> = FxHashMap<&'static str, V>;

static NAME_TO_CODE: Lazy<FxHashMap<String, &'static str>> = Lazy::new(|| {
    COUNTRY_NAMES
        .iter()
        .flat_map(|(code, names)| names.iter().map(move |name| (name.to_uppercase(), *code)))
        .collect()
});

static COUNTRY_INDEX: Lazy<Index<(f64, f64)>> = Lazy::new(|| {
    COUNTRY_CENTERS
        .iter()
        .map(|&(code, lat, lng)| (code, (lat, lng)))
        .collect()
});

static STATE_INDEX: Lazy<Index<Index<(f64, f64)>>> = Lazy::new(|| {
    let mut index: Index<Index<(f64, f64)>> = FxHashMap::default();
    for &(country, state, lat, lng) in STATE_CENTERS {
        index.entry(country).or_default().insert(state, (lat, lng));
    }
    index
});

static CITY_INDEX: Lazy<Index<Index<Index<(f64, f64)>>>> = Lazy::new(|| {
    let mut index: Index<Index<Index<(f64, f64)>>> = FxHashMap::default();
    for &(country, state, city, lat, lng) in CITY_CENTERS {
        index
            .entry(country)
            .or_default()
            .entry(state)
            .or_default()
            .insert(city, (lat, lng));
    }
    index
});

fn to_point((lat, lng): (f64, f64)) -> Point<f64> {
    Point::new(lng, lat)
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Resolve a country name (English or Japanese) or ISO code to its
/// ISO 3166-1 alpha-2 code.
///
/// Known names are matched case-insensitively. Anything else consisting of
/// exactly two ASCII letters is taken to already be a code.
///
/// # Examples
///
/// ```rust
/// use mediamap::centers::resolve_country_code;
///
/// assert_eq!(resolve_country_code("japan").as_deref(), Some("JP"));
/// assert_eq!(resolve_country_code("日本").as_deref(), Some("JP"));
/// assert_eq!(resolve_country_code("UK").as_deref(), Some("GB"));
/// assert_eq!(resolve_country_code("fr").as_deref(), Some("FR"));
/// assert_eq!(resolve_country_code("Atlantis"), None);
/// ```
pub fn resolve_country_code(name: &str) -> Option<String> {
    let normalized = name.trim().to_uppercase();

    if let Some(code) = NAME_TO_CODE.get(&normalized) {
        return Some((*code).to_string());
    }

    if normalized.len() == 2 && normalized.chars().all(|c| c.is_ascii_alphabetic()) {
        return Some(normalized);
    }

    None
}

/// Center of a country given by name or code (x = longitude, y = latitude).
pub fn country_center(country: &str) -> Option<Point<f64>> {
    let code = resolve_country_code(country)?;
    COUNTRY_INDEX.get(code.as_str()).copied().map(to_point)
}

/// Center of a state, falling back to its country's center.
///
/// With no country at all the origin `(0, 0)` is returned.
pub fn state_center(country: Option<&str>, state: Option<&str>) -> Option<Point<f64>> {
    let Some(country) = present(country) else {
        return Some(to_point(ORIGIN));
    };
    let Some(state) = present(state) else {
        return country_center(country);
    };

    STATE_INDEX
        .get(country)
        .and_then(|states| states.get(state))
        .copied()
        .map(to_point)
        .or_else(|| country_center(country))
}

/// Center of a city, falling back to its state's and then its country's center.
///
/// # Examples
///
/// ```rust
/// use mediamap::centers::city_center;
///
/// let gion = city_center(Some("Japan"), Some("Kyoto"), Some("Gion")).unwrap();
/// assert_eq!((gion.y(), gion.x()), (35.0039, 135.7771));
///
/// // Unknown city: the state's center
/// let kyoto = city_center(Some("Japan"), Some("Kyoto"), Some("Arashiyama")).unwrap();
/// assert_eq!((kyoto.y(), kyoto.x()), (35.0212, 135.7556));
/// ```
pub fn city_center(
    country: Option<&str>,
    state: Option<&str>,
    city: Option<&str>,
) -> Option<Point<f64>> {
    let Some(country_name) = present(country) else {
        return Some(to_point(ORIGIN));
    };
    let Some(state_name) = present(state) else {
        return country_center(country_name);
    };
    let Some(city_name) = present(city) else {
        return state_center(country, state);
    };

    CITY_INDEX
        .get(country_name)
        .and_then(|states| states.get(state_name))
        .and_then(|cities| cities.get(city_name))
        .copied()
        .map(to_point)
        .or_else(|| state_center(country, state))
}

/// Rewrite the detail's country as its ISO code.
///
/// Returns `true` if the country was recognized. Unrecognized or missing
/// countries are left as they are.
pub fn normalize_country(detail: &mut DetailMeta) -> bool {
    let Some(code) = detail.country.as_deref().and_then(resolve_country_code) else {
        return false;
    };
    detail.country = Some(code);
    true
}

/// Place a resource without usable coordinates at its country's center.
///
/// Coordinates are only filled in when at least one of them is missing or
/// non-finite and the country resolves; both are then overwritten. Returns
/// `true` if the detail was moved.
///
/// # Examples
///
/// ```rust
/// use mediamap::centers::locate_by_country;
/// use mediamap::DetailMeta;
///
/// let mut detail = DetailMeta::new("scan").with_region("France", "", "");
/// assert!(locate_by_country(&mut detail));
/// assert_eq!((detail.latitude, detail.longitude), (Some(46.0), Some(2.0)));
///
/// // Already located: untouched
/// let mut pinned = DetailMeta::new("photo").with_location(48.85, 2.35).with_region("France", "", "");
/// assert!(!locate_by_country(&mut pinned));
/// ```
pub fn locate_by_country(detail: &mut DetailMeta) -> bool {
    if detail.geo_point().is_valid() {
        return false;
    }
    let Some(center) = detail.country.as_deref().and_then(country_center) else {
        return false;
    };

    log::debug!(
        "Placing resource {} at the center of {:?}",
        detail.resource_id,
        detail.country
    );
    detail.latitude = Some(center.y());
    detail.longitude = Some(center.x());
    true
}

/// Ingest-time cleanup: fall back to the country center for position, then
/// store the country as its ISO code.
pub fn prepare_detail(detail: &mut DetailMeta) {
    locate_by_country(detail);
    normalize_country(detail);
}

const COUNTRY_CENTERS: &[(&str, f64, f64)] = &[
    ("JP", 36.2048, 138.2529),
    ("KR", 37.0, 127.5),
    ("CN", 35.0, 105.0),
    ("IN", 20.5937, 78.9629),
    ("ID", -0.7893, 113.9213),
    ("TH", 15.87, 100.9925),
    ("PH", 12.8797, 121.774),
    ("VN", 21.0279, 105.851),
    ("SG", 1.3667, 103.8),
    ("MY", 2.5, 112.5),
    ("HK", 22.3, 114.1),
    ("TW", 23.5, 121.0),
    ("US", 37.0902, -95.7129),
    ("CA", 56.1304, -106.3468),
    ("MX", 23.6345, -102.5528),
    ("FR", 46.0, 2.0),
    ("DE", 51.0, 9.0),
    ("GB", 55.3781, -3.436),
    ("IT", 41.8719, 12.5674),
    ("ES", 40.4637, -3.7492),
    ("RU", 61.524, 105.3188),
    ("NL", 52.1326, 5.2913),
    ("BE", 50.5039, 4.4699),
    ("SE", 60.1282, 18.6435),
    ("NO", 60.472, 8.4689),
    ("DK", 56.2639, 9.5018),
    ("FI", 61.9241, 25.7482),
    ("CH", 46.8182, 8.2275),
    ("AT", 47.5162, 14.5501),
    ("PT", 39.3999, -8.2245),
    ("IE", 53.4129, -8.2439),
    ("GR", 39.0742, 21.8243),
    ("PL", 51.9194, 19.1451),
    ("CZ", 49.8175, 15.473),
    ("HU", 47.1625, 19.5033),
    ("BR", -14.235, -51.9253),
    ("AR", -34.8, -64.965),
    ("CL", -35.6751, -71.5429),
    ("CO", 4.5709, -74.2973),
    ("PE", -9.19, -75.0152),
    ("AU", -25.0, 135.0),
    ("NZ", -42.0, 174.0),
    ("ZA", -30.5595, 22.9375),
    ("EG", 26.8206, 30.8025),
    ("NG", 9.082, 8.6753),
    ("SA", 23.8859, 45.0792),
    ("AE", 23.4241, 53.8478),
    ("TR", 38.9637, 35.2433),
];

const COUNTRY_NAMES: &[(&str, &[&str])] = &[
    ("JP", &["Japan", "日本"]),
    ("KR", &["South Korea", "Republic of Korea", "韓国", "Korea"]),
    ("CN", &["China", "中華人民共和国", "中国"]),
    ("IN", &["India", "インド"]),
    ("ID", &["Indonesia", "インドネシア"]),
    ("TH", &["Thailand", "タイ"]),
    ("PH", &["Philippines", "フィリピン"]),
    ("VN", &["Vietnam", "ベトナム"]),
    ("SG", &["Singapore", "シンガポール"]),
    ("MY", &["Malaysia", "マレーシア"]),
    ("HK", &["Hong Kong", "香港"]),
    ("TW", &["Taiwan", "台湾", "Republic of China"]),
    ("US", &["United States", "USA", "United States of America", "米国", "アメリカ"]),
    ("CA", &["Canada", "カナダ"]),
    ("MX", &["Mexico", "メキシコ"]),
    ("FR", &["France", "フランス"]),
    ("DE", &["Germany", "ドイツ"]),
    ("GB", &["United Kingdom", "UK", "イギリス", "英国"]),
    ("IT", &["Italy", "イタリア"]),
    ("ES", &["Spain", "スペイン"]),
    ("RU", &["Russia", "Russian Federation", "ロシア"]),
    ("NL", &["Netherlands", "オランダ"]),
    ("BE", &["Belgium", "ベルギー"]),
    ("SE", &["Sweden", "スウェーデン"]),
    ("NO", &["Norway", "ノルウェー"]),
    ("DK", &["Denmark", "デンマーク"]),
    ("FI", &["Finland", "フィンランド"]),
    ("CH", &["Switzerland", "スイス"]),
    ("AT", &["Austria", "オーストリア"]),
    ("PT", &["Portugal", "ポルトガル"]),
    ("IE", &["Ireland", "アイルランド"]),
    ("GR", &["Greece", "ギリシャ"]),
    ("PL", &["Poland", "ポーランド"]),
    ("CZ", &["Czech Republic", "チェコ"]),
    ("HU", &["Hungary", "ハンガリー"]),
    ("BR", &["Brazil", "ブラジル"]),
    ("AR", &["Argentina", "アルゼンチン"]),
    ("CL", &["Chile", "チリ"]),
    ("CO", &["Colombia", "コロンビア"]),
    ("PE", &["Peru", "ペルー"]),
    ("AU", &["Australia", "オーストラリア"]),
    ("NZ", &["New Zealand", "ニュージーランド"]),
    ("ZA", &["South Africa", "南アフリカ"]),
    ("EG", &["Egypt", "エジプト"]),
    ("NG", &["Nigeria", "ナイジェリア"]),
    ("SA", &["Saudi Arabia", "サウジアラビア"]),
    ("AE", &["United Arab Emirates", "UAE", "アラブ首長国連邦"]),
    ("TR", &["Turkey", "トルコ"]),
];

const STATE_CENTERS: &[(&str, &str, f64, f64)] = &[
    ("Australia", "New South Wales", -32.0, 147.0),
    ("Australia", "Victoria", -37.0, 144.0),
    ("Australia", "Queensland", -23.0, 143.0),
    ("Australia", "Western Australia", -25.0, 121.0),
    ("Australia", "South Australia", -30.0, 134.0),
    ("China", "Guangdong", 23.379, 113.7633),
    ("China", "Jiangsu", 32.9711, 119.4554),
    ("China", "Shandong", 36.6681, 118.0019),
    ("China", "Zhejiang", 29.1832, 120.0934),
    ("China", "Henan", 33.8821, 113.614),
    ("China", "Sichuan", 30.6595, 104.0657),
    ("China", "Hubei", 30.9756, 112.2707),
    ("China", "Fujian", 26.0789, 119.3062),
    ("China", "Hunan", 27.6104, 113.0823),
    ("China", "Anhui", 32.8822, 117.2827),
    ("China", "Hebei", 38.0428, 114.5149),
    ("China", "Shaanxi", 34.3431, 108.9402),
    ("China", "Jiangxi", 27.614, 115.7221),
    ("China", "Liaoning", 41.8057, 123.4291),
    ("China", "Yunnan", 24.8801, 102.8329),
    ("China", "Shanxi", 37.8734, 112.562),
    ("China", "Guizhou", 26.8154, 106.8748),
    ("China", "Heilongjiang", 47.9219, 126.6425),
    ("China", "Jilin", 43.6664, 126.1922),
    ("China", "Gansu", 35.5692, 104.9903),
    ("China", "Hainan", 20.0174, 110.3491),
    ("China", "Qinghai", 35.7452, 95.9956),
    ("China", "Guanxi", 23.8298, 108.3319),
    ("China", "Inner Mongolia", 43.535, 115.7321),
    ("China", "Ningxia", 38.4723, 106.2782),
    ("China", "Xinjiang", 41.0934, 85.24),
    ("China", "Tibet", 30.5081, 91.1403),
    ("China", "Shanghai", 31.2304, 121.4737),
    ("China", "Chongqing", 29.563, 106.5516),
    ("China", "Beijing", 39.9042, 116.4074),
    ("China", "Tianjin", 39.3434, 117.3616),
    ("China", "Hong Kong", 22.3964, 114.1095),
    ("China", "Macau", 22.1987, 113.5439),
    ("Japan", "Hokkaido", 43.0642, 141.3468),
    ("Japan", "Aomori", 40.8246, 140.74),
    ("Japan", "Iwate", 39.7036, 141.1527),
    ("Japan", "Miyagi", 38.2688, 140.8721),
    ("Japan", "Akita", 39.7186, 140.1024),
    ("Japan", "Yamagata", 38.2404, 140.3633),
    ("Japan", "Fukushima", 37.7503, 140.4677),
    ("Japan", "Ibaraki", 36.3418, 140.4468),
    ("Japan", "Tochigi", 36.5658, 139.8836),
    ("Japan", "Gunma", 36.3911, 139.0608),
    ("Japan", "Saitama", 35.8569, 139.6489),
    ("Japan", "Chiba", 35.6046, 140.1233),
    ("Japan", "Tokyo", 35.6895, 139.6917),
    ("Japan", "Kanagawa", 35.4475, 139.6423),
    ("Japan", "Niigata", 37.9022, 139.0236),
    ("Japan", "Toyama", 36.6953, 137.2114),
    ("Japan", "Ishikawa", 36.5946, 136.6256),
    ("Japan", "Fukui", 36.0652, 136.2216),
    ("Japan", "Yamanashi", 35.6641, 138.5683),
    ("Japan", "Nagano", 36.6513, 138.1809),
    ("Japan", "Gifu", 35.3912, 136.7222),
    ("Japan", "Shizuoka", 34.9769, 138.383),
    ("Japan", "Aichi", 35.1802, 136.9064),
    ("Japan", "Mie", 34.7303, 136.5086),
    ("Japan", "Shiga", 35.0045, 135.8686),
    ("Japan", "Kyoto", 35.0212, 135.7556),
    ("Japan", "Osaka", 34.6937, 135.5023),
    ("Japan", "Hyogo", 34.6913, 135.183),
    ("Japan", "Nara", 34.6851, 135.8327),
    ("Japan", "Wakayama", 34.226, 135.1675),
    ("Japan", "Tottori", 35.5033, 134.2382),
    ("Japan", "Shimane", 35.4723, 133.0505),
    ("Japan", "Okayama", 34.6618, 133.9344),
    ("Japan", "Hiroshima", 34.3966, 132.4596),
    ("Japan", "Yamaguchi", 34.1861, 131.4705),
    ("Japan", "Tokushima", 34.0658, 134.5593),
    ("Japan", "Kagawa", 34.3401, 134.0434),
    ("Japan", "Ehime", 33.8416, 132.7657),
    ("Japan", "Kochi", 33.5597, 133.5311),
    ("Japan", "Fukuoka", 33.6066, 130.4183),
    ("Japan", "Saga", 33.2494, 130.2988),
    ("Japan", "Nagasaki", 32.7503, 129.8777),
    ("Japan", "Kumamoto", 32.8031, 130.7079),
    ("Japan", "Oita", 33.2382, 131.612),
    ("Japan", "Miyazaki", 31.9111, 131.4239),
    ("Japan", "Kagoshima", 31.5602, 130.558),
    ("Japan", "Okinawa", 26.2124, 127.6809),
    ("Taiwan", "New Taipei", 25.0169, 121.4628),
    ("Taiwan", "Taipei", 25.033, 121.5654),
    ("Taiwan", "Kaohsiung", 22.6273, 120.3014),
    ("Taiwan", "Taichung", 24.1477, 120.6736),
    ("Taiwan", "Tainan", 22.9999, 120.227),
    ("Taiwan", "Keelung", 25.1302, 121.7415),
    ("Taiwan", "Hsinchu", 24.8138, 120.9685),
    ("Taiwan", "Taoyuan", 24.9932, 121.2969),
    ("Taiwan", "Changhua", 24.0904, 120.5375),
    ("Taiwan", "Yunlin", 23.7104, 120.4223),
    ("Taiwan", "Pingtung County", 22.6722, 120.4875),
    ("New Zealand", "Auckland", -36.8485, 174.7633),
    ("New Zealand", "Wellington", -41.2865, 174.7762),
    ("New Zealand", "Christchurch", -43.5321, 172.6362),
    ("New Zealand", "Canterbury", -43.5321, 172.6362),
    ("New Zealand", "Hamilton", -37.787, 175.2793),
    ("New Zealand", "Tauranga", -37.6861, 176.1651),
    ("New Zealand", "Dunedin", -45.8788, 170.5028),
    ("New Zealand", "Otago", -45.8788, 170.5028),
    ("New Zealand", "Central Otago District", -45.8788, 170.5028),
    ("New Zealand", "PalmerstonNorth", -40.3523, 175.608),
    ("New Zealand", "Napier", -39.4928, 176.9126),
    ("New Zealand", "Hastings", -39.6422, 176.8439),
    ("New Zealand", "Queenstown-Lakes District", -45.0311, 168.6626),
    ("South Korea", "Seoul", 37.5665, 126.978),
    ("South Korea", "Busan", 35.1796, 129.0756),
    ("South Korea", "Incheon", 37.4563, 126.7052),
    ("South Korea", "Daegu", 35.8714, 128.6014),
    ("South Korea", "Daejeon", 36.3504, 127.3845),
    ("South Korea", "Gwangju", 35.1595, 126.8526),
    ("South Korea", "Ulsan", 35.5384, 129.3114),
    ("South Korea", "Sejong", 36.4802, 127.2897),
    ("United States", "Alabama", 32.8065, -86.7911),
    ("United States", "Alaska", 61.3707, -152.4044),
    ("United States", "Arizona", 33.7298, -111.4312),
    ("United States", "Arkansas", 34.7465, -92.2896),
    ("United States", "California", 36.7783, -119.4179),
    ("United States", "Colorado", 39.5501, -105.7821),
    ("United States", "Connecticut", 41.6032, -73.0877),
    ("United States", "Delaware", 38.9108, -75.5277),
    ("United States", "Florida", 27.9944, -81.7603),
    ("United States", "Georgia", 32.1656, -82.9001),
    ("United States", "Hawaii", 19.8968, -155.5828),
    ("United States", "Idaho", 44.0682, -114.742),
    ("United States", "Illinois", 40.6331, -89.3985),
    ("United States", "Indiana", 39.7684, -86.1581),
    ("United States", "Iowa", 41.878, -93.0977),
    ("United States", "Kansas", 38.5266, -96.7265),
    ("United States", "Kentucky", 37.8393, -84.27),
    ("United States", "Louisiana", 30.9843, -91.9623),
    ("United States", "Maine", 45.2538, -69.4455),
    ("United States", "Maryland", 39.0458, -76.6413),
    ("United States", "Massachusetts", 42.4072, -71.3824),
    ("United States", "Michigan", 44.3148, -85.6024),
    ("United States", "Minnesota", 46.7296, -94.6859),
    ("United States", "Mississippi", 32.7416, -89.6787),
    ("United States", "Missouri", 37.9643, -91.8318),
    ("United States", "Montana", 46.8797, -110.3626),
    ("United States", "Nebraska", 41.4925, -99.9018),
    ("United States", "Nevada", 38.8026, -116.4194),
    ("United States", "New Hampshire", 43.1939, -71.5724),
    ("United States", "New Jersey", 40.0583, -74.4057),
    ("United States", "New Mexico", 34.5199, -105.8701),
    ("United States", "New York", 40.7128, -74.006),
    ("United States", "North Carolina", 35.7596, -79.0193),
    ("United States", "North Dakota", 47.5515, -101.002),
    ("United States", "Ohio", 40.4173, -82.9071),
    ("United States", "Oklahoma", 35.4676, -97.5164),
    ("United States", "Oregon", 43.8041, -120.5542),
    ("United States", "Pennsylvania", 41.2033, -77.1945),
    ("United States", "Rhode Island", 41.5801, -71.4774),
    ("United States", "South Carolina", 33.8361, -81.1637),
    ("United States", "South Dakota", 43.9695, -99.9018),
    ("United States", "Tennessee", 35.5175, -86.5804),
    ("United States", "Texas", 31.9686, -99.9018),
    ("United States", "Utah", 39.32, -111.0937),
    ("United States", "Vermont", 44.5588, -72.5778),
    ("United States", "Virginia", 37.4316, -78.6569),
    ("United States", "Washington", 47.7511, -120.7401),
    ("United States", "West Virginia", 38.5976, -80.4549),
    ("United States", "Wisconsin", 43.7844, -88.7879),
    ("United States", "Wyoming", 43.0759, -107.2903),
    ("United Kingdom", "England", 52.3555, -1.1743),
    ("United Kingdom", "Scotland", 56.4907, -4.2026),
    ("United Kingdom", "Wales", 52.6302, -3.958),
    ("United Kingdom", "NorthernIreland", 54.7877, -6.4923),
    ("Vietnam", "Hanoi", 21.0285, 105.8542),
    ("Vietnam", "Hà Nội", 21.0285, 105.8542),
    ("Vietnam", "HoChiMinh", 10.7769, 106.7009),
    ("Vietnam", "Ho Chi Minh City", 10.7769, 106.7009),
    ("Vietnam", "DaNang", 16.0544, 108.2022),
    ("Vietnam", "Đà Nẵng", 16.0544, 108.2022),
    ("Vietnam", "Hue", 16.4637, 107.5909),
    ("Vietnam", "Haiphong", 20.8449, 106.6881),
    ("Vietnam", "CanTho", 10.0452, 105.7469),
    ("Vietnam", "Bà Rịa - Vũng Tàu", 10.583, 107.25),
];

const CITY_CENTERS: &[(&str, &str, &str, f64, f64)] = &[
    ("United Kingdom", "England", "London", 51.5074, -0.1278),
    ("France", "Île-de-France", "Paris", 48.8566, 2.3522),
    ("Japan", "Tokyo", "Shinjuku", 35.6938, 139.7036),
    ("Japan", "Tokyo", "Shibuya", 35.6581, 139.7017),
    ("Japan", "Tokyo", "Chiyoda", 35.6938, 139.7536),
    ("Japan", "Osaka", "Kita", 34.7054, 135.4981),
    ("Japan", "Osaka", "Namba", 34.6688, 135.5015),
    ("Japan", "Kyoto", "Gion", 35.0039, 135.7771),
    ("United States", "California", "LosAngeles", 34.0522, -118.2437),
    ("United States", "California", "SanFrancisco", 37.7749, -122.4194),
    ("United States", "New York", "Manhattan", 40.7831, -73.9712),
    ("United States", "New York", "Brooklyn", 40.6782, -73.9442),
];
